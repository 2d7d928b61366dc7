// File: crates/graph-render-skia/src/theme.rs
// Summary: Color themes for plot rendering, plus the height ramp used by surfaces.

use skia_safe as skia;

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub name: &'static str,
    pub background: skia::Color,
    pub grid: skia::Color,
    pub axis_line: skia::Color,
    pub axis_label: skia::Color,
    pub title: skia::Color,
    /// Stroke for parametric and polar curves.
    pub line_stroke: skia::Color,
    /// Stroke for the implicit zero level set.
    pub contour: skia::Color,
    pub wireframe: skia::Color,
    /// Surface color ramp: lowest, middle and highest sample.
    pub surface_low: skia::Color,
    pub surface_mid: skia::Color,
    pub surface_high: skia::Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: skia::Color::from_argb(255, 18, 18, 20),
            grid: skia::Color::from_argb(255, 40, 40, 45),
            axis_line: skia::Color::from_argb(255, 180, 180, 190),
            axis_label: skia::Color::from_argb(255, 235, 235, 245),
            title: skia::Color::from_argb(255, 235, 235, 245),
            line_stroke: skia::Color::from_argb(255, 0x86, 0x73, 0xf1),
            contour: skia::Color::from_argb(255, 0x86, 0x73, 0xf1),
            wireframe: skia::Color::from_argb(110, 10, 10, 12),
            surface_low: skia::Color::from_argb(255, 94, 130, 181),
            surface_mid: skia::Color::from_argb(255, 99, 176, 74),
            surface_high: skia::Color::from_argb(255, 224, 148, 43),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            background: skia::Color::from_argb(255, 250, 250, 252),
            grid: skia::Color::from_argb(255, 230, 230, 235),
            axis_line: skia::Color::from_argb(255, 60, 60, 70),
            axis_label: skia::Color::from_argb(255, 20, 20, 30),
            title: skia::Color::from_argb(255, 20, 20, 30),
            line_stroke: skia::Color::from_argb(255, 0x86, 0x73, 0xf1),
            contour: skia::Color::from_argb(255, 32, 120, 200),
            wireframe: skia::Color::from_argb(90, 20, 20, 30),
            surface_low: skia::Color::from_argb(255, 94, 130, 181),
            surface_mid: skia::Color::from_argb(255, 99, 176, 74),
            surface_high: skia::Color::from_argb(255, 224, 148, 43),
        }
    }

    pub fn solarized_dark() -> Self {
        // Base colors from Solarized dark palette
        Self {
            name: "solarized-dark",
            background: skia::Color::from_argb(255, 0x00, 0x2b, 0x36), // base03
            grid: skia::Color::from_argb(255, 0x07, 0x36, 0x42),       // base02
            axis_line: skia::Color::from_argb(255, 0x93, 0xa1, 0xa1),  // base1
            axis_label: skia::Color::from_argb(255, 0xee, 0xe8, 0xd5), // base2
            title: skia::Color::from_argb(255, 0xee, 0xe8, 0xd5),
            line_stroke: skia::Color::from_argb(255, 0x6c, 0x71, 0xc4), // violet
            contour: skia::Color::from_argb(255, 0x26, 0x8b, 0xd2),     // blue
            wireframe: skia::Color::from_argb(110, 0x00, 0x2b, 0x36),
            surface_low: skia::Color::from_argb(255, 0x26, 0x8b, 0xd2),
            surface_mid: skia::Color::from_argb(255, 0x85, 0x99, 0x00), // green
            surface_high: skia::Color::from_argb(255, 0xcb, 0x4b, 0x16), // orange
        }
    }

    pub fn solarized_light() -> Self {
        Self {
            name: "solarized-light",
            background: skia::Color::from_argb(255, 0xfd, 0xf6, 0xe3), // base3
            grid: skia::Color::from_argb(255, 0xee, 0xe8, 0xd5),       // base2
            axis_line: skia::Color::from_argb(255, 0x65, 0x7b, 0x83), // base00
            axis_label: skia::Color::from_argb(255, 0x00, 0x2b, 0x36), // base03
            title: skia::Color::from_argb(255, 0x00, 0x2b, 0x36),
            line_stroke: skia::Color::from_argb(255, 0x6c, 0x71, 0xc4),
            contour: skia::Color::from_argb(255, 0x26, 0x8b, 0xd2),
            wireframe: skia::Color::from_argb(90, 0x58, 0x6e, 0x75),
            surface_low: skia::Color::from_argb(255, 0x26, 0x8b, 0xd2),
            surface_mid: skia::Color::from_argb(255, 0x85, 0x99, 0x00),
            surface_high: skia::Color::from_argb(255, 0xcb, 0x4b, 0x16),
        }
    }

    pub fn high_contrast_dark() -> Self {
        Self {
            name: "high-contrast-dark",
            background: skia::Color::from_argb(255, 0x00, 0x00, 0x00),
            grid: skia::Color::from_argb(255, 0x22, 0x22, 0x22),
            axis_line: skia::Color::from_argb(255, 0xff, 0xff, 0xff),
            axis_label: skia::Color::from_argb(255, 0xff, 0xff, 0xff),
            title: skia::Color::from_argb(255, 0xff, 0xff, 0xff),
            line_stroke: skia::Color::from_argb(255, 0x00, 0xff, 0xff),
            contour: skia::Color::from_argb(255, 0xff, 0xff, 0x00),
            wireframe: skia::Color::from_argb(160, 0x00, 0x00, 0x00),
            surface_low: skia::Color::from_argb(255, 0x00, 0x66, 0xff),
            surface_mid: skia::Color::from_argb(255, 0x00, 0xff, 0x00),
            surface_high: skia::Color::from_argb(255, 0xff, 0x00, 0x00),
        }
    }

    /// Surface fill for a height normalized to [0, 1]; out-of-range inputs clamp.
    pub fn height_color(&self, t: f64) -> skia::Color {
        let t = if t.is_nan() { 0.5 } else { t.clamp(0.0, 1.0) };
        if t < 0.5 {
            lerp_color(self.surface_low, self.surface_mid, t * 2.0)
        } else {
            lerp_color(self.surface_mid, self.surface_high, (t - 0.5) * 2.0)
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

fn lerp_color(a: skia::Color, b: skia::Color, s: f64) -> skia::Color {
    let mix = |x: u8, y: u8| (x as f64 * (1.0 - s) + y as f64 * s).round() as u8;
    skia::Color::from_argb(mix(a.a(), b.a()), mix(a.r(), b.r()), mix(a.g(), b.g()), mix(a.b(), b.b()))
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![
        Theme::dark(),
        Theme::light(),
        Theme::solarized_dark(),
        Theme::solarized_light(),
        Theme::high_contrast_dark(),
    ]
}

/// Find a theme by its `name`, falling back to dark.
pub fn find(name: &str) -> Theme {
    for t in presets() { if t.name.eq_ignore_ascii_case(name) { return t; } }
    Theme::dark()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_is_case_insensitive_with_dark_fallback() {
        assert_eq!(find("Solarized-Light").name, "solarized-light");
        assert_eq!(find("neon").name, "dark");
    }

    #[test]
    fn height_ramp_hits_its_stops() {
        let t = Theme::dark();
        assert_eq!(t.height_color(0.0), t.surface_low);
        assert_eq!(t.height_color(0.5), t.surface_mid);
        assert_eq!(t.height_color(1.0), t.surface_high);
        assert_eq!(t.height_color(7.0), t.surface_high);
        assert_eq!(t.height_color(f64::NAN), t.surface_mid);
    }
}
