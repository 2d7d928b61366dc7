// File: crates/graph-cli/src/cli.rs
// Summary: Command-line flags for `graphplot` and the run loop that samples and writes outputs.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use graph_core::{FieldModel, PlotMode, PlotResult, PlotSampler, Range, Renderer, SamplingOptions};
use graph_render_skia::{theme, Camera, RenderOptions, SkiaRenderer};
use log::{info, LevelFilter};

use crate::export::{CsvExporter, JsonExporter};

#[derive(Parser, Debug)]
#[command(name = "graphplot", author, version, about = "Sample a math expression and plot it", long_about = None)]
pub struct Cli {
    /// Plot mode: explicit, implicit, parametric or polar
    #[arg(short, long, default_value = "explicit")]
    pub mode: PlotMode,

    /// Override an expression slot, e.g. --set zExpr='x*y' (repeatable)
    #[arg(short = 's', long = "set", value_name = "SLOT=EXPR", value_parser = parse_assignment)]
    pub assignments: Vec<(String, String)>,

    /// Print the mode's slots with their default expressions and exit
    #[arg(long)]
    pub list_slots: bool,

    /// Sampling range for the mode's variable(s) as start:end:step
    #[arg(long, value_name = "START:END:STEP", value_parser = parse_range, allow_hyphen_values = true)]
    pub range: Option<Range>,

    /// PNG output path (defaults to <mode>.png)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Skip the PNG and only write the data exports
    #[arg(long)]
    pub no_png: bool,

    /// Also write the samples as CSV
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Also write the plot result as JSON
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Image width in pixels
    #[arg(long, default_value_t = graph_render_skia::WIDTH)]
    pub width: i32,

    /// Image height in pixels
    #[arg(long, default_value_t = graph_render_skia::HEIGHT)]
    pub height: i32,

    /// Color theme (dark, light, solarized-dark, solarized-light, high-contrast-dark)
    #[arg(long, default_value = "dark")]
    pub theme: String,

    /// Omit the title and axis labels
    #[arg(long)]
    pub no_labels: bool,

    /// Camera azimuth in radians for 3D plots
    #[arg(long, allow_hyphen_values = true)]
    pub azimuth: Option<f64>,

    /// Camera elevation in radians for 3D plots
    #[arg(long, allow_hyphen_values = true)]
    pub elevation: Option<f64>,

    /// Log level: off, error, warn, info, debug or trace
    #[arg(long, default_value = "info")]
    pub log_level: LevelFilter,
}

/// Split `SLOT=EXPR` at the first `=`; the expression may itself contain `=`.
pub fn parse_assignment(s: &str) -> Result<(String, String), String> {
    let (slot, expr) = s.split_once('=').ok_or_else(|| format!("expected SLOT=EXPR, got '{s}'"))?;
    let slot = slot.trim();
    if slot.is_empty() {
        return Err(format!("missing slot name in '{s}'"));
    }
    Ok((slot.to_string(), expr.to_string()))
}

/// Parse `start:end:step`; each part accepts anything `f64::from_str` does.
pub fn parse_range(s: &str) -> Result<Range, String> {
    let parts: Vec<&str> = s.split(':').collect();
    let &[start, end, step] = parts.as_slice() else {
        return Err(format!("expected START:END:STEP, got '{s}'"));
    };
    let num = |part: &str| part.trim().parse::<f64>().map_err(|e| format!("bad number '{part}': {e}"));
    let range = Range::new(num(start)?, num(end)?, num(step)?);
    range.validate()?;
    Ok(range)
}

impl Cli {
    pub fn render_options(&self) -> RenderOptions {
        let defaults = Camera::default();
        RenderOptions {
            width: self.width,
            height: self.height,
            theme: theme::find(&self.theme),
            draw_labels: !self.no_labels,
            camera: Camera::new(
                self.azimuth.unwrap_or(defaults.azimuth),
                self.elevation.unwrap_or(defaults.elevation),
            ),
            ..RenderOptions::default()
        }
    }

    /// Apply slot overrides and sample the selected mode.
    pub fn plot(&self) -> Result<PlotResult> {
        let mut model = FieldModel::new(self.mode);
        for (slot, text) in &self.assignments {
            model
                .set_text(slot, text.as_str())
                .with_context(|| format!("cannot set '{slot}'"))?;
        }

        let mut options = SamplingOptions::default();
        if let Some(range) = self.range {
            options.set_range(self.mode, range);
        }
        let sampler = PlotSampler::new().with_options(options);
        let plot = model
            .plot(&sampler)
            .with_context(|| format!("failed to sample {} plot", self.mode))?;
        Ok(plot)
    }
}

/// Text printed by `--list-slots`.
pub fn slot_listing(mode: PlotMode) -> String {
    let mut out = format!("{mode} ({:?} over {}):\n", mode.render_kind(), mode.variables().join(", "));
    for slot in mode.slots() {
        out.push_str(&format!("  {:<6} {:<12} {}\n", slot.id, slot.label, slot.default));
    }
    out
}

pub fn run(cli: &Cli) -> Result<()> {
    if cli.list_slots {
        print!("{}", slot_listing(cli.mode));
        return Ok(());
    }

    let plot = cli.plot()?;
    info!("{}: {} samples, {} missing", plot.title, plot.sample_count(), plot.null_count());

    if !cli.no_png {
        let out = cli.out.clone().unwrap_or_else(|| PathBuf::from(format!("{}.png", cli.mode)));
        write_with(&SkiaRenderer::new(cli.render_options()), &plot, &out)?;
    }
    if let Some(path) = &cli.csv {
        write_with(&CsvExporter, &plot, path)?;
    }
    if let Some(path) = &cli.json {
        write_with(&JsonExporter { pretty: true }, &plot, path)?;
    }
    Ok(())
}

fn write_with(renderer: &dyn Renderer, plot: &PlotResult, path: &std::path::Path) -> Result<()> {
    renderer
        .render_to_file(plot, path)
        .with_context(|| format!("failed to write {} output '{}'", renderer.id(), path.display()))?;
    println!("Wrote {}", path.display());
    Ok(())
}
