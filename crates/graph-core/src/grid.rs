// File: crates/graph-core/src/grid.rs
// Summary: Fixed-step sample ranges and the per-mode sampling defaults.

use serde::Serialize;

use crate::mode::PlotMode;

/// Slack applied when counting steps so inclusive endpoints survive rounding.
const STEP_TOLERANCE: f64 = 1e-9;
/// Upper bound on samples in one plot: points of a curve, or cells of a grid.
pub const MAX_SAMPLES: usize = 1_000_000;

/// Inclusive arithmetic sequence `start, start + step, ...` not exceeding `end`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Range {
    pub start: f64,
    pub end: f64,
    pub step: f64,
}

impl Range {
    pub const fn new(start: f64, end: f64, step: f64) -> Self {
        Self { start, end, step }
    }

    /// Check the range can be sampled; returns a human-readable reason otherwise.
    pub fn validate(&self) -> Result<(), String> {
        if !self.start.is_finite() || !self.end.is_finite() {
            return Err(format!("bounds must be finite, got [{}, {}]", self.start, self.end));
        }
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(format!("step must be a positive number, got {}", self.step));
        }
        if self.end < self.start {
            return Err(format!("end {} is below start {}", self.end, self.start));
        }
        let count = self.steps() + 1.0;
        if count > MAX_SAMPLES as f64 {
            return Err(format!("{count} samples exceeds the limit of {MAX_SAMPLES}"));
        }
        // A step below the float spacing near the bounds repeats values.
        let mut prev = self.start;
        for i in 1..self.len() {
            let v = self.value(i);
            if v <= prev {
                return Err(format!(
                    "step {} is too small to separate values near {prev}",
                    self.step
                ));
            }
            prev = v;
        }
        Ok(())
    }

    /// Like [`Range::validate`], also bounding the total sample count of `mode`:
    /// grid modes sample every pair of axis values.
    pub fn validate_for(&self, mode: PlotMode) -> Result<(), String> {
        self.validate()?;
        let n = self.len();
        let total = match mode {
            PlotMode::Explicit | PlotMode::Implicit => n.saturating_mul(n),
            PlotMode::Parametric | PlotMode::Polar => n,
        };
        if total > MAX_SAMPLES {
            return Err(format!(
                "{n} values per axis give {total} grid samples, over the limit of {MAX_SAMPLES}"
            ));
        }
        Ok(())
    }

    fn value(&self, i: usize) -> f64 {
        self.start + self.step * i as f64
    }

    fn steps(&self) -> f64 {
        ((self.end - self.start) / self.step + STEP_TOLERANCE).floor()
    }

    /// Number of samples; only meaningful for a range that passes [`Range::validate`].
    pub fn len(&self) -> usize {
        self.steps() as usize + 1
    }

    /// Materialize the sequence. Values are `start + i * step` so error does not accumulate.
    pub fn values(&self) -> Vec<f64> {
        (0..self.len()).map(|i| self.value(i)).collect()
    }
}

/// Sampling ranges per mode. `Default` yields the fixed grids every plot uses unless overridden.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SamplingOptions {
    /// Both axes of the explicit surface grid.
    pub explicit: Range,
    /// Both axes of the implicit contour grid.
    pub implicit: Range,
    /// Parameter `t` of a parametric curve.
    pub parametric: Range,
    /// Angle `theta` of a polar curve.
    pub polar: Range,
}

impl Default for SamplingOptions {
    fn default() -> Self {
        use std::f64::consts::PI;
        Self {
            explicit: Range::new(-10.0, 10.0, 0.5),
            implicit: Range::new(-10.0, 10.0, 0.25),
            parametric: Range::new(0.0, 10.0 * PI, 0.1),
            polar: Range::new(0.0, 2.0 * PI, 0.01),
        }
    }
}

impl SamplingOptions {
    pub fn range(&self, mode: PlotMode) -> Range {
        match mode {
            PlotMode::Explicit => self.explicit,
            PlotMode::Implicit => self.implicit,
            PlotMode::Parametric => self.parametric,
            PlotMode::Polar => self.polar,
        }
    }

    pub fn set_range(&mut self, mode: PlotMode, range: Range) {
        match mode {
            PlotMode::Explicit => self.explicit = range,
            PlotMode::Implicit => self.implicit = range,
            PlotMode::Parametric => self.parametric = range,
            PlotMode::Polar => self.polar = range,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inclusive_endpoint_is_reached() {
        let r = Range::new(-10.0, 10.0, 0.5);
        let v = r.values();
        assert_eq!(v.len(), 41);
        assert_eq!(v[0], -10.0);
        assert_eq!(v[40], 10.0);
    }

    #[test]
    fn endpoint_not_on_step_is_not_exceeded() {
        let r = Range::new(0.0, 2.0 * std::f64::consts::PI, 0.01);
        let v = r.values();
        assert_eq!(v.len(), 629);
        assert!(*v.last().unwrap() <= r.end);
    }

    #[test]
    fn tenth_steps_count_cleanly() {
        // 0.1 is not exact in binary; 0..=1 must still give 11 points.
        assert_eq!(Range::new(0.0, 1.0, 0.1).len(), 11);
    }

    #[test]
    fn step_below_float_spacing_is_rejected() {
        let r = Range::new(1e16, 1e16 + 8.0, 1.0);
        assert!(r.validate().unwrap_err().contains("too small"));
        assert!(Range::new(1e16, 1e16 + 64.0, 4.0).validate().is_ok());
    }

    #[test]
    fn grid_modes_bound_the_cross_product() {
        let r = Range::new(0.0, 999_999.0, 1.0);
        assert!(r.validate().is_ok());
        assert!(r.validate_for(PlotMode::Polar).is_ok());
        assert!(r.validate_for(PlotMode::Explicit).is_err());
        assert!(r.validate_for(PlotMode::Implicit).is_err());

        let edge = Range::new(0.0, 999.0, 1.0);
        assert!(edge.validate_for(PlotMode::Explicit).is_ok());
        assert!(Range::new(0.0, 1000.0, 1.0).validate_for(PlotMode::Implicit).is_err());
    }

    #[test]
    fn degenerate_range_has_one_point() {
        let r = Range::new(3.0, 3.0, 1.0);
        assert!(r.validate().is_ok());
        assert_eq!(r.values(), vec![3.0]);
    }

    #[test]
    fn rejects_bad_ranges() {
        assert!(Range::new(0.0, 1.0, 0.0).validate().is_err());
        assert!(Range::new(0.0, 1.0, -0.1).validate().is_err());
        assert!(Range::new(1.0, 0.0, 0.1).validate().is_err());
        assert!(Range::new(0.0, f64::INFINITY, 0.1).validate().is_err());
        assert!(Range::new(0.0, 1.0, 1e-9).validate().is_err());
    }
}
