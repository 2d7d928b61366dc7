// File: crates/graph-render-skia/tests/determinism.rs
// Purpose: The same plot and options always encode to the same PNG.

use graph_core::{sample, PlotMode, Renderer, SlotTexts};
use graph_render_skia::{RenderOptions, SkiaRenderer};

fn render_bytes(mode: PlotMode) -> Vec<u8> {
    let plot = sample(mode, &SlotTexts::defaults(mode)).expect("plot");
    let opts = RenderOptions { width: 256, height: 256, draw_labels: false, ..RenderOptions::default() };
    SkiaRenderer::new(opts).render_to_bytes(&plot).expect("render")
}

#[test]
fn rendering_is_deterministic() {
    for mode in PlotMode::ALL {
        assert_eq!(render_bytes(mode), render_bytes(mode), "{mode}");
    }
}
