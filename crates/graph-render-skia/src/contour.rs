// File: crates/graph-render-skia/src/contour.rs
// Summary: Marching squares over a sampled grid; extracts level-set line segments in data space.

use graph_core::SampleGrid;

/// A line segment between two `(x, y)` points in data coordinates.
pub type Segment = [(f64, f64); 2];

/// Segments of the zero level set `F(x, y) = 0`.
pub fn zero_level(grid: &SampleGrid) -> Vec<Segment> {
    level_segments(grid, 0.0)
}

/// Segments where the sampled field crosses `level`.
///
/// Cells with any missing or non-finite corner are skipped. Saddle cells are
/// resolved with the mean of the four corners.
pub fn level_segments(grid: &SampleGrid, level: f64) -> Vec<Segment> {
    let mut segments = Vec::new();
    if !grid.is_consistent() || grid.x.len() < 2 || grid.y.len() < 2 {
        return segments;
    }

    for i in 0..grid.x.len() - 1 {
        for j in 0..grid.y.len() - 1 {
            let corners = [grid.get(i, j), grid.get(i + 1, j), grid.get(i, j + 1), grid.get(i + 1, j + 1)];
            let [Some(v00), Some(v10), Some(v01), Some(v11)] = corners else { continue };
            if ![v00, v10, v01, v11].iter().all(|v| v.is_finite()) {
                continue;
            }

            let case = (v00 >= level) as u8
                | ((v10 >= level) as u8) << 1
                | ((v01 >= level) as u8) << 2
                | ((v11 >= level) as u8) << 3;
            if case == 0 || case == 15 {
                continue;
            }

            let (x0, x1) = (grid.x[i], grid.x[i + 1]);
            let (y0, y1) = (grid.y[j], grid.y[j + 1]);
            let lerp = |va: f64, vb: f64| -> f64 {
                if (vb - va).abs() < f64::EPSILON { 0.5 } else { (level - va) / (vb - va) }
            };
            let bottom = (x0 + (x1 - x0) * lerp(v00, v10), y0);
            let top = (x0 + (x1 - x0) * lerp(v01, v11), y1);
            let left = (x0, y0 + (y1 - y0) * lerp(v00, v01));
            let right = (x1, y0 + (y1 - y0) * lerp(v10, v11));
            let center_high = (v00 + v10 + v01 + v11) * 0.25 >= level;

            match case {
                1 | 14 => segments.push([bottom, left]),
                2 | 13 => segments.push([bottom, right]),
                3 | 12 => segments.push([left, right]),
                4 | 11 => segments.push([left, top]),
                5 | 10 => segments.push([bottom, top]),
                7 | 8 => segments.push([right, top]),
                6 => {
                    if center_high {
                        segments.push([bottom, left]);
                        segments.push([top, right]);
                    } else {
                        segments.push([bottom, right]);
                        segments.push([left, top]);
                    }
                }
                9 => {
                    if center_high {
                        segments.push([bottom, right]);
                        segments.push([left, top]);
                    } else {
                        segments.push([bottom, left]);
                        segments.push([top, right]);
                    }
                }
                _ => {}
            }
        }
    }
    segments
}
