// File: crates/graph-render-skia/src/plot.rs
// Summary: Headless PNG rendering of sampled plots using Skia CPU raster surfaces.

use anyhow::Result;
use graph_core::{PlotData, PlotResult, SampleCurve, SampleGrid};
use skia_safe as skia;

use crate::contour;
use crate::projection::{Camera, DataBox, Viewport};
use crate::text::TextShaper;
use crate::theme::Theme;
use crate::types::{linspace, Insets, PlotRect, HEIGHT, WIDTH};

const TITLE_SIZE: f32 = 18.0;
const LABEL_SIZE: f32 = 14.0;

#[derive(Clone, Copy, Debug)]
pub struct RenderOptions {
    pub width: i32,
    pub height: i32,
    pub insets: Insets,
    pub theme: Theme,
    /// Draw the title and axis labels. Off gives pixel output independent of installed fonts.
    pub draw_labels: bool,
    /// View used for surfaces and 3D curves.
    pub camera: Camera,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            insets: Insets::default(),
            theme: Theme::dark(),
            draw_labels: true,
            camera: Camera::default(),
        }
    }
}

/// Render `plot` and return the encoded PNG.
pub fn render_png(plot: &PlotResult, opts: &RenderOptions) -> Result<Vec<u8>> {
    if opts.width <= 0 || opts.height <= 0 {
        anyhow::bail!("invalid surface size {}x{}", opts.width, opts.height);
    }
    let mut surface = skia::surfaces::raster_n32_premul((opts.width, opts.height))
        .ok_or_else(|| anyhow::anyhow!("failed to create raster surface"))?;
    let canvas = surface.canvas();
    canvas.clear(opts.theme.background);

    let rect = PlotRect::inset(opts.width, opts.height, opts.insets);
    let shaper = opts.draw_labels.then(TextShaper::new);
    let painter = Painter { canvas, theme: &opts.theme, shaper: shaper.as_ref() };

    match &plot.data {
        PlotData::Surface(grid) => painter.surface(grid, rect, &opts.camera),
        PlotData::Contour(grid) => painter.contour(grid, rect),
        PlotData::Line3d(curve) => painter.curve(curve, rect, &opts.camera),
    }
    if let Some(shaper) = painter.shaper {
        let cx = opts.width as f32 * 0.5;
        let y = (opts.insets.top as f32 * 0.5 + TITLE_SIZE * 0.4).max(TITLE_SIZE);
        shaper.draw_centered(canvas, &plot.title, cx, y, TITLE_SIZE, opts.theme.title);
    }

    // Snapshot and encode PNG
    let image = surface.image_snapshot();
    #[allow(deprecated)]
    let data = image
        .encode_to_data(skia::EncodedImageFormat::PNG)
        .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
    log::debug!("rendered {:?} ({}x{}, {} bytes)", plot.kind(), opts.width, opts.height, data.as_bytes().len());
    Ok(data.as_bytes().to_vec())
}

// ---- helpers ----------------------------------------------------------------

fn stroke_paint(color: skia::Color, width: f32) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(width);
    paint.set_color(color);
    paint
}

fn fill_paint(color: skia::Color) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);
    paint.set_color(color);
    paint
}

/// One projected surface cell, ready for painter's-order drawing.
struct Face {
    corners: [(f32, f32); 4],
    depth: f64,
    color: skia::Color,
}

struct Painter<'a> {
    canvas: &'a skia::Canvas,
    theme: &'a Theme,
    shaper: Option<&'a TextShaper>,
}

impl Painter<'_> {
    fn label(&self, text: &str, (x, y): (f32, f32)) {
        if let Some(shaper) = self.shaper {
            shaper.draw_centered(self.canvas, text, x, y + LABEL_SIZE * 0.4, LABEL_SIZE, self.theme.axis_label);
        }
    }

    /// Wire cube around the normalized data box, with x/y/z axes from its low corner.
    fn frame_3d(&self, camera: &Camera, vp: &Viewport) {
        let corners = DataBox::cube_corners();
        let px = |p: [f64; 3]| vp.to_pixel(camera.project(p));

        let grid = stroke_paint(self.theme.grid, 1.0);
        for (i, &a) in corners.iter().enumerate() {
            for k in 0..3 {
                if (i >> k) & 1 == 0 {
                    let b = corners[i | 1 << k];
                    self.canvas.draw_line(px(a), px(b), &grid);
                }
            }
        }

        let axis = stroke_paint(self.theme.axis_line, 1.5);
        let origin = [-1.0, -1.0, -1.0];
        for (k, name) in ["x", "y", "z"].iter().enumerate() {
            let mut end = origin;
            end[k] = 1.0;
            self.canvas.draw_line(px(origin), px(end), &axis);
            let mut tip = origin;
            tip[k] = 1.18;
            self.label(name, px(tip));
        }
    }

    fn surface(&self, grid: &SampleGrid, rect: PlotRect, camera: &Camera) {
        let vp = Viewport::fit(camera, rect);
        let (Some(&x0), Some(&x1), Some(&y0), Some(&y1)) = (grid.x.first(), grid.x.last(), grid.y.first(), grid.y.last()) else {
            self.frame_3d(camera, &vp);
            return;
        };
        let Some(z_range) = grid.finite_range() else {
            self.frame_3d(camera, &vp);
            return;
        };
        let bx = DataBox::new([(x0, x1), (y0, y1), z_range]);
        let z_span = z_range.1 - z_range.0;

        let mut faces = Vec::new();
        if grid.is_consistent() {
            for i in 0..grid.x.len().saturating_sub(1) {
                for j in 0..grid.y.len().saturating_sub(1) {
                    let cell = [(i, j), (i + 1, j), (i + 1, j + 1), (i, j + 1)];
                    let mut points = [[0.0; 3]; 4];
                    let mut complete = true;
                    for (p, &(a, b)) in points.iter_mut().zip(&cell) {
                        match grid.get(a, b) {
                            Some(z) if z.is_finite() => *p = [grid.x[a], grid.y[b], z],
                            _ => complete = false,
                        }
                    }
                    if !complete {
                        continue;
                    }
                    let mean_z = points.iter().map(|p| p[2]).sum::<f64>() / 4.0;
                    let t = if z_span > 0.0 { (mean_z - z_range.0) / z_span } else { 0.5 };
                    let normalized = points.map(|p| bx.normalize(p));
                    faces.push(Face {
                        corners: normalized.map(|p| vp.to_pixel(camera.project(p))),
                        depth: normalized.iter().map(|&p| camera.depth(p)).sum::<f64>() / 4.0,
                        color: self.theme.height_color(t),
                    });
                }
            }
        }

        self.frame_3d(camera, &vp);
        // Painter's algorithm: furthest first.
        faces.sort_by(|a, b| b.depth.total_cmp(&a.depth));
        let wire = stroke_paint(self.theme.wireframe, 0.75);
        for face in &faces {
            let mut path = skia::Path::new();
            path.move_to(face.corners[0]);
            for &c in &face.corners[1..] {
                path.line_to(c);
            }
            path.close();
            self.canvas.draw_path(&path, &fill_paint(face.color));
            self.canvas.draw_path(&path, &wire);
        }
        log::trace!("surface: {} faces drawn", faces.len());
    }

    fn contour(&self, grid: &SampleGrid, rect: PlotRect) {
        let (Some(&x0), Some(&x1), Some(&y0), Some(&y1)) = (grid.x.first(), grid.x.last(), grid.y.first(), grid.y.last()) else {
            return;
        };
        // Equal aspect so circles stay round.
        let xspan = (x1 - x0).max(1e-9);
        let yspan = (y1 - y0).max(1e-9);
        let scale = (rect.width() as f64 / xspan).min(rect.height() as f64 / yspan);
        let (cx, cy) = rect.center();
        let sx = |x: f64| -> f32 { cx + ((x - (x0 + x1) * 0.5) * scale) as f32 };
        let sy = |y: f64| -> f32 { cy - ((y - (y0 + y1) * 0.5) * scale) as f32 };
        let (l, r, t, b) = (sx(x0), sx(x1), sy(y1), sy(y0));

        let grid_paint = stroke_paint(self.theme.grid, 1.0);
        for x in linspace(l as f64, r as f64, 11) {
            self.canvas.draw_line((x as f32, t), (x as f32, b), &grid_paint);
        }
        for y in linspace(t as f64, b as f64, 11) {
            self.canvas.draw_line((l, y as f32), (r, y as f32), &grid_paint);
        }

        let axis = stroke_paint(self.theme.axis_line, 1.5);
        self.canvas.draw_line((l, b), (r, b), &axis);
        self.canvas.draw_line((l, t), (l, b), &axis);
        if (x0..=x1).contains(&0.0) {
            self.canvas.draw_line((sx(0.0), t), (sx(0.0), b), &stroke_paint(self.theme.axis_line, 0.75));
        }
        if (y0..=y1).contains(&0.0) {
            self.canvas.draw_line((l, sy(0.0)), (r, sy(0.0)), &stroke_paint(self.theme.axis_line, 0.75));
        }
        self.label("x", (r + 14.0, b));
        self.label("y", (l, t - 12.0));

        let segments = contour::zero_level(grid);
        let mut path = skia::Path::new();
        for [(ax, ay), (bx, by)] in &segments {
            path.move_to((sx(*ax), sy(*ay)));
            path.line_to((sx(*bx), sy(*by)));
        }
        self.canvas.draw_path(&path, &stroke_paint(self.theme.contour, 2.0));
        log::trace!("contour: {} segments", segments.len());
    }

    fn curve(&self, curve: &SampleCurve, rect: PlotRect, camera: &Camera) {
        let vp = Viewport::fit(camera, rect);
        self.frame_3d(camera, &vp);
        let Some(bounds) = curve.bounds() else { return };
        let bx = DataBox::new(bounds);

        let mut path = skia::Path::new();
        let mut pen_down = false;
        for i in 0..curve.len() {
            match curve.point(i).filter(|p| p.iter().all(|v| v.is_finite())) {
                Some(p) => {
                    let px = vp.to_pixel(camera.project(bx.normalize(p)));
                    if pen_down {
                        path.line_to(px);
                    } else {
                        path.move_to(px);
                        pen_down = true;
                    }
                }
                // Missing samples break the line.
                None => pen_down = false,
            }
        }
        self.canvas.draw_path(&path, &stroke_paint(self.theme.line_stroke, 2.0));
    }
}
