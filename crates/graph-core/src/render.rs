// File: crates/graph-core/src/render.rs
// Summary: Renderer adapter trait; backends turn a PlotResult into bytes (PNG, CSV, JSON, ...).

use std::path::Path;

use anyhow::Result;

use crate::result::PlotResult;

pub trait Renderer {
    /// Short backend name used in logs, e.g. "png".
    fn id(&self) -> &'static str;

    /// Usual file extension for this backend's output.
    fn extension(&self) -> &'static str;

    fn render_to_bytes(&self, plot: &PlotResult) -> Result<Vec<u8>>;

    /// Render to `path`, creating parent directories as needed.
    fn render_to_file(&self, plot: &PlotResult, path: &Path) -> Result<()> {
        let bytes = self.render_to_bytes(plot)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, bytes)?;
        log::info!("{} renderer wrote {} ({})", self.id(), path.display(), plot.title);
        Ok(())
    }
}
