// File: crates/graph-render-skia/src/projection.rs
// Summary: Orthographic camera, data-box normalization and screen fitting for 3D plots.

use crate::types::PlotRect;

/// Camera on a sphere around the origin, angles in radians.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub azimuth: f64,
    pub elevation: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { azimuth: -1.07, elevation: 0.63 }
    }
}

impl Camera {
    pub fn new(azimuth: f64, elevation: f64) -> Self {
        Self { azimuth, elevation }
    }

    /// Orthographic projection onto the screen plane; +y is up.
    pub fn project(&self, p: [f64; 3]) -> (f64, f64) {
        let (sa, ca) = self.azimuth.sin_cos();
        let (se, ce) = self.elevation.sin_cos();
        // Right vector: (-sin a, cos a, 0)
        let sx = -p[0] * sa + p[1] * ca;
        // Up vector: (-cos a sin e, -sin a sin e, cos e)
        let sy = -p[0] * ca * se - p[1] * sa * se + p[2] * ce;
        (sx, sy)
    }

    /// Distance along the view direction; larger is further away.
    pub fn depth(&self, p: [f64; 3]) -> f64 {
        let (sa, ca) = self.azimuth.sin_cos();
        let (se, ce) = self.elevation.sin_cos();
        -(p[0] * ce * ca + p[1] * ce * sa + p[2] * se)
    }
}

/// Axis-aligned data box mapped onto the cube [-1, 1]^3.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DataBox {
    pub ranges: [(f64, f64); 3],
}

impl DataBox {
    pub fn new(ranges: [(f64, f64); 3]) -> Self {
        Self { ranges }
    }

    /// Normalized coordinates; a flat axis maps to 0.
    pub fn normalize(&self, p: [f64; 3]) -> [f64; 3] {
        let mut out = [0.0; 3];
        for (k, (lo, hi)) in self.ranges.iter().enumerate() {
            let span = hi - lo;
            out[k] = if span > 0.0 { (p[k] - lo) / span * 2.0 - 1.0 } else { 0.0 };
        }
        out
    }

    /// The eight corners of the unit cube, in normalized coordinates.
    pub fn cube_corners() -> [[f64; 3]; 8] {
        let mut corners = [[0.0; 3]; 8];
        for (i, c) in corners.iter_mut().enumerate() {
            for (k, v) in c.iter_mut().enumerate() {
                *v = if (i >> k) & 1 == 1 { 1.0 } else { -1.0 };
            }
        }
        corners
    }
}

/// Maps projected coordinates into a pixel rectangle with a uniform scale.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    scale: f64,
    center: (f64, f64),
    origin: (f32, f32),
}

impl Viewport {
    /// Fit the projected unit cube into `rect`.
    pub fn fit(camera: &Camera, rect: PlotRect) -> Self {
        let (mut x0, mut x1, mut y0, mut y1) = (f64::MAX, f64::MIN, f64::MAX, f64::MIN);
        for c in DataBox::cube_corners() {
            let (x, y) = camera.project(c);
            x0 = x0.min(x);
            x1 = x1.max(x);
            y0 = y0.min(y);
            y1 = y1.max(y);
        }
        let sx = rect.width() as f64 / (x1 - x0).max(1e-9);
        let sy = rect.height() as f64 / (y1 - y0).max(1e-9);
        Self {
            scale: sx.min(sy),
            center: ((x0 + x1) * 0.5, (y0 + y1) * 0.5),
            origin: rect.center(),
        }
    }

    pub fn to_pixel(&self, (x, y): (f64, f64)) -> (f32, f32) {
        let px = self.origin.0 as f64 + (x - self.center.0) * self.scale;
        let py = self.origin.1 as f64 - (y - self.center.1) * self.scale;
        (px as f32, py as f32)
    }
}
