// File: crates/graph-render-skia/src/lib.rs
// Summary: Skia renderer crate; implements the graph-core Renderer trait for PNG output.

pub mod contour;
pub mod plot;
pub mod projection;
pub mod text;
pub mod theme;
pub mod types;

pub use plot::{render_png, RenderOptions};
pub use projection::Camera;
pub use theme::Theme;
pub use types::{Insets, HEIGHT, WIDTH};

use anyhow::Result;
use graph_core::{PlotResult, Renderer};

/// PNG backend on a CPU raster surface.
#[derive(Clone, Copy, Debug, Default)]
pub struct SkiaRenderer {
    pub options: RenderOptions,
}

impl SkiaRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }
}

impl Renderer for SkiaRenderer {
    fn id(&self) -> &'static str {
        "png"
    }

    fn extension(&self) -> &'static str {
        "png"
    }

    fn render_to_bytes(&self, plot: &PlotResult) -> Result<Vec<u8>> {
        render_png(plot, &self.options)
    }
}
