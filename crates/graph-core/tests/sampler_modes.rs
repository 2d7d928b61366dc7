// File: crates/graph-core/tests/sampler_modes.rs
// Purpose: Domain shapes, values and titles produced for each plot mode.

use approx::assert_abs_diff_eq;
use graph_core::{sample, PlotMode, RenderKind, SlotTexts};
use std::f64::consts::PI;

fn assert_fixed_step(values: &[f64], start: f64, step: f64) {
    for (i, v) in values.iter().enumerate() {
        assert_abs_diff_eq!(*v, start + step * i as f64, epsilon = 1e-9);
    }
    assert!(values.windows(2).all(|w| w[1] > w[0]), "sequence must be strictly increasing");
}

#[test]
fn explicit_surface_grid_is_41_by_41() {
    let texts = SlotTexts::new().with("zExpr", "sin(x)*cos(y)");
    let plot = sample(PlotMode::Explicit, &texts).expect("explicit plot");
    assert_eq!(plot.kind(), RenderKind::Surface);
    assert_eq!(plot.title, "z = sin(x)*cos(y)");

    let grid = plot.grid().expect("grid");
    for axis in [&grid.x, &grid.y] {
        assert_eq!(axis.len(), 41);
        assert_eq!(axis[0], -10.0);
        assert_eq!(axis[40], 10.0);
        assert_fixed_step(axis, -10.0, 0.5);
    }
    assert_eq!(grid.rows(), 41);
    assert!(grid.values.iter().all(|row| row.len() == 41));
    assert!(grid.is_consistent());
    assert_eq!(grid.null_count(), 0);

    // values[i][j] is f(x[i], y[j])
    let (i, j) = (3, 17);
    let want = grid.x[i].sin() * grid.y[j].cos();
    assert_abs_diff_eq!(grid.get(i, j).unwrap(), want, epsilon = 1e-12);
}

#[test]
fn implicit_contour_grid_is_81_by_81() {
    let texts = SlotTexts::new().with("FExpr", "x^2+y^2-9");
    let plot = sample(PlotMode::Implicit, &texts).expect("implicit plot");
    assert_eq!(plot.kind(), RenderKind::Contour);
    assert_eq!(plot.title, "F(x, y) = 0: x^2+y^2-9");

    let grid = plot.grid().expect("grid");
    for axis in [&grid.x, &grid.y] {
        assert_eq!(axis.len(), 81);
        assert_eq!(axis[0], -10.0);
        assert_eq!(axis[80], 10.0);
        assert_fixed_step(axis, -10.0, 0.25);
    }
    assert!(grid.is_consistent());
    // Center of the grid is (0, 0): F = -9.
    assert_eq!(grid.get(40, 40), Some(-9.0));
}

#[test]
fn parametric_helix() {
    let texts = SlotTexts::new()
        .with("xExpr", "cos(t)")
        .with("yExpr", "sin(t)")
        .with("zExpr", "t/10");
    let plot = sample(PlotMode::Parametric, &texts).expect("parametric plot");
    assert_eq!(plot.kind(), RenderKind::Line3d);
    assert_eq!(plot.title, "Parametric curve: x(t), y(t), z(t)");

    let curve = plot.curve().expect("curve");
    assert_eq!(curve.param.len(), 315);
    assert_eq!(curve.param[0], 0.0);
    assert!(*curve.param.last().unwrap() <= 10.0 * PI);
    assert_fixed_step(&curve.param, 0.0, 0.1);

    assert_eq!(curve.x.len(), curve.param.len());
    assert_eq!(curve.y.len(), curve.param.len());
    assert_eq!(curve.z.len(), curve.param.len());
    assert!(curve.is_consistent());
    assert_eq!(curve.null_count(), 0);

    let p = curve.point(10).unwrap();
    let t = curve.param[10];
    assert_abs_diff_eq!(p[0], t.cos(), epsilon = 1e-12);
    assert_abs_diff_eq!(p[1], t.sin(), epsilon = 1e-12);
    assert_abs_diff_eq!(p[2], t / 10.0, epsilon = 1e-12);
}

#[test]
fn parametric_failure_nulls_the_whole_triple() {
    // y(t) leaves its domain for t > 5; x and z never fail.
    let texts = SlotTexts::new()
        .with("xExpr", "t")
        .with("yExpr", "sqrt(5 - t)")
        .with("zExpr", "1");
    let plot = sample(PlotMode::Parametric, &texts).expect("parametric plot");
    let curve = plot.curve().unwrap();
    assert!(curve.is_consistent());
    for i in 0..curve.len() {
        let t = curve.param[i];
        if t > 5.0 + 1e-9 {
            assert_eq!((curve.x[i], curve.y[i], curve.z[i]), (None, None, None), "t = {t}");
        } else if t < 5.0 - 1e-9 {
            assert!(curve.point(i).is_some(), "t = {t}");
        }
    }
    assert!(curve.null_count() > 0);
}

#[test]
fn polar_rose_starts_at_radius_two() {
    let texts = SlotTexts::new().with("rExpr", "2+sin(3*theta)");
    let plot = sample(PlotMode::Polar, &texts).expect("polar plot");
    assert_eq!(plot.kind(), RenderKind::Line3d);
    assert_eq!(plot.title, "Polar function: r(θ) = 2+sin(3*theta)");

    let curve = plot.curve().unwrap();
    assert_eq!(curve.len(), 629);
    assert_fixed_step(&curve.param, 0.0, 0.01);
    let [x, y, z] = curve.point(0).unwrap();
    assert_abs_diff_eq!(x, 2.0, epsilon = 1e-9);
    assert_abs_diff_eq!(y, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(z, 0.0, epsilon = 1e-9);

    // z carries theta itself.
    let i = 100;
    assert_abs_diff_eq!(curve.z[i].unwrap(), curve.param[i], epsilon = 1e-12);
}

#[test]
fn defaults_sample_for_every_mode() {
    for mode in PlotMode::ALL {
        let plot = sample(mode, &SlotTexts::defaults(mode)).expect("defaults must plot");
        assert_eq!(plot.mode, mode);
        assert_eq!(plot.kind(), mode.render_kind());
        assert!(plot.sample_count() > 0);
    }
}
