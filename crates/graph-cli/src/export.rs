// File: crates/graph-cli/src/export.rs
// Summary: CSV and JSON exporters for sampled plots, behind the same Renderer trait as PNG.

use anyhow::{Context, Result};
use graph_core::{PlotData, PlotResult, Renderer};
use serde::Serialize;

/// One grid sample; `value` is empty when the point failed.
#[derive(Serialize)]
struct GridRow {
    x: f64,
    y: f64,
    value: Option<f64>,
}

/// One curve sample; coordinates are empty together when the point failed.
#[derive(Serialize)]
struct CurveRow {
    param: f64,
    x: Option<f64>,
    y: Option<f64>,
    z: Option<f64>,
}

/// Flat CSV: `x,y,value` rows for grids, `param,x,y,z` rows for curves.
#[derive(Clone, Copy, Debug, Default)]
pub struct CsvExporter;

impl Renderer for CsvExporter {
    fn id(&self) -> &'static str {
        "csv"
    }

    fn extension(&self) -> &'static str {
        "csv"
    }

    fn render_to_bytes(&self, plot: &PlotResult) -> Result<Vec<u8>> {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        match &plot.data {
            PlotData::Surface(grid) | PlotData::Contour(grid) => {
                for (i, &x) in grid.x.iter().enumerate() {
                    for (j, &y) in grid.y.iter().enumerate() {
                        wtr.serialize(GridRow { x, y, value: grid.get(i, j) })?;
                    }
                }
            }
            PlotData::Line3d(curve) => {
                for (i, &param) in curve.param.iter().enumerate() {
                    let at = |axis: &[Option<f64>]| axis.get(i).copied().flatten();
                    wtr.serialize(CurveRow { param, x: at(&curve.x), y: at(&curve.y), z: at(&curve.z) })?;
                }
            }
        }
        wtr.into_inner().context("flush CSV buffer")
    }
}

/// The serialized `PlotResult`: `title`, `mode`, `kind` and `data`.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonExporter {
    pub pretty: bool,
}

impl Renderer for JsonExporter {
    fn id(&self) -> &'static str {
        "json"
    }

    fn extension(&self) -> &'static str {
        "json"
    }

    fn render_to_bytes(&self, plot: &PlotResult) -> Result<Vec<u8>> {
        let bytes = if self.pretty { serde_json::to_vec_pretty(plot)? } else { serde_json::to_vec(plot)? };
        Ok(bytes)
    }
}
