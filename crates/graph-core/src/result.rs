// File: crates/graph-core/src/result.rs
// Summary: Sampled plot data handed to renderers (grids for surfaces/contours, curves for 3D lines).

use serde::{Serialize, Serializer};

use crate::mode::PlotMode;

/// How a renderer should draw a [`PlotResult`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderKind {
    Surface,
    Contour,
    Line3d,
}

/// Scalar field sampled on the cross product of two axes.
/// `values[i][j]` is the sample at `(x[i], y[j])`; `None` marks a missing sample.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleGrid {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    #[serde(serialize_with = "serialize_rows")]
    pub values: Vec<Vec<Option<f64>>>,
}

impl SampleGrid {
    pub fn rows(&self) -> usize {
        self.values.len()
    }

    pub fn cols(&self) -> usize {
        self.values.first().map_or(0, Vec::len)
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.values.get(i).and_then(|row| row.get(j)).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.values.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn null_count(&self) -> usize {
        self.values.iter().flatten().filter(|v| v.is_none()).count()
    }

    /// Smallest and largest finite sample, if any.
    pub fn finite_range(&self) -> Option<(f64, f64)> {
        finite_min_max(self.values.iter().flatten().filter_map(|v| *v))
    }

    /// Grid rows agree with the axis lengths.
    pub fn is_consistent(&self) -> bool {
        self.values.len() == self.x.len() && self.values.iter().all(|row| row.len() == self.y.len())
    }
}

/// Three parallel coordinate arrays indexed by a shared parameter sequence.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleCurve {
    pub param: Vec<f64>,
    #[serde(serialize_with = "serialize_samples")]
    pub x: Vec<Option<f64>>,
    #[serde(serialize_with = "serialize_samples")]
    pub y: Vec<Option<f64>>,
    #[serde(serialize_with = "serialize_samples")]
    pub z: Vec<Option<f64>>,
}

impl SampleCurve {
    pub fn with_capacity(n: usize) -> Self {
        Self {
            param: Vec::with_capacity(n),
            x: Vec::with_capacity(n),
            y: Vec::with_capacity(n),
            z: Vec::with_capacity(n),
        }
    }

    /// Append one sample; `None` records a gap in all three coordinates.
    pub fn push(&mut self, param: f64, point: Option<[f64; 3]>) {
        self.param.push(param);
        match point {
            Some([x, y, z]) => {
                self.x.push(Some(x));
                self.y.push(Some(y));
                self.z.push(Some(z));
            }
            None => {
                self.x.push(None);
                self.y.push(None);
                self.z.push(None);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.param.len()
    }

    pub fn is_empty(&self) -> bool {
        self.param.is_empty()
    }

    /// The point at `i` when all three coordinates are present.
    pub fn point(&self, i: usize) -> Option<[f64; 3]> {
        match (self.x.get(i)?, self.y.get(i)?, self.z.get(i)?) {
            (Some(x), Some(y), Some(z)) => Some([*x, *y, *z]),
            _ => None,
        }
    }

    pub fn null_count(&self) -> usize {
        (0..self.len()).filter(|&i| self.point(i).is_none()).count()
    }

    /// Per-axis finite `(min, max)` over all present points.
    pub fn bounds(&self) -> Option<[(f64, f64); 3]> {
        let points = (0..self.len()).filter_map(|i| self.point(i));
        let finite: Vec<[f64; 3]> = points.filter(|p| p.iter().all(|v| v.is_finite())).collect();
        Some([
            finite_min_max(finite.iter().map(|p| p[0]))?,
            finite_min_max(finite.iter().map(|p| p[1]))?,
            finite_min_max(finite.iter().map(|p| p[2]))?,
        ])
    }

    /// Arrays share one length and every index is either fully present or fully missing.
    pub fn is_consistent(&self) -> bool {
        let n = self.param.len();
        self.x.len() == n
            && self.y.len() == n
            && self.z.len() == n
            && (0..n).all(|i| {
                let present = [self.x[i], self.y[i], self.z[i]].iter().filter(|v| v.is_some()).count();
                present == 0 || present == 3
            })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "lowercase")]
pub enum PlotData {
    Surface(SampleGrid),
    Contour(SampleGrid),
    Line3d(SampleCurve),
}

/// Output of one plot request. Built fresh per request and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotResult {
    pub title: String,
    pub mode: PlotMode,
    #[serde(flatten)]
    pub data: PlotData,
}

impl PlotResult {
    pub fn kind(&self) -> RenderKind {
        match self.data {
            PlotData::Surface(_) => RenderKind::Surface,
            PlotData::Contour(_) => RenderKind::Contour,
            PlotData::Line3d(_) => RenderKind::Line3d,
        }
    }

    pub fn grid(&self) -> Option<&SampleGrid> {
        match &self.data {
            PlotData::Surface(g) | PlotData::Contour(g) => Some(g),
            PlotData::Line3d(_) => None,
        }
    }

    pub fn curve(&self) -> Option<&SampleCurve> {
        match &self.data {
            PlotData::Line3d(c) => Some(c),
            _ => None,
        }
    }

    pub fn sample_count(&self) -> usize {
        match &self.data {
            PlotData::Surface(g) | PlotData::Contour(g) => g.len(),
            PlotData::Line3d(c) => c.len(),
        }
    }

    pub fn null_count(&self) -> usize {
        match &self.data {
            PlotData::Surface(g) | PlotData::Contour(g) => g.null_count(),
            PlotData::Line3d(c) => c.null_count(),
        }
    }
}

/// One sample on the wire: a number, `null` when missing, or one of the
/// strings `"inf"`, `"-inf"`, `"NaN"` for non-finite values.
struct Sample(Option<f64>);

impl Serialize for Sample {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            None => s.serialize_none(),
            Some(v) if v.is_finite() => s.serialize_f64(v),
            Some(v) if v.is_nan() => s.serialize_str("NaN"),
            Some(v) if v > 0.0 => s.serialize_str("inf"),
            Some(_) => s.serialize_str("-inf"),
        }
    }
}

struct Samples<'a>(&'a [Option<f64>]);

impl Serialize for Samples<'_> {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_seq(self.0.iter().map(|v| Sample(*v)))
    }
}

fn serialize_samples<S: Serializer>(values: &[Option<f64>], s: S) -> Result<S::Ok, S::Error> {
    Samples(values).serialize(s)
}

fn serialize_rows<S: Serializer>(rows: &[Vec<Option<f64>>], s: S) -> Result<S::Ok, S::Error> {
    s.collect_seq(rows.iter().map(|row| Samples(row)))
}

fn finite_min_max(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}
