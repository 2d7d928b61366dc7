// File: crates/graph-core/tests/fields.rs
// Purpose: Mode -> slot table and the field model's edit/reset behavior.

use graph_core::{FieldError, FieldModel, PlotMode, PlotSampler};

#[test]
fn slot_table_matches_modes() {
    let ids = |mode: PlotMode| mode.slots().iter().map(|s| s.id).collect::<Vec<_>>();
    assert_eq!(ids(PlotMode::Explicit), ["zExpr"]);
    assert_eq!(ids(PlotMode::Implicit), ["FExpr"]);
    assert_eq!(ids(PlotMode::Parametric), ["xExpr", "yExpr", "zExpr"]);
    assert_eq!(ids(PlotMode::Polar), ["rExpr"]);

    assert_eq!(PlotMode::Explicit.slots()[0].default, "sin(x) * cos(y)");
    assert_eq!(PlotMode::Implicit.slots()[0].default, "x^2 + y^2 - 9");
    assert_eq!(PlotMode::Polar.slots()[0].label, "r(theta) =");
    assert_eq!(PlotMode::Parametric.slot("zExpr").map(|s| s.default), Some("t / 10"));
}

#[test]
fn mode_names_parse_case_insensitively() {
    assert_eq!("Polar".parse::<PlotMode>(), Ok(PlotMode::Polar));
    assert_eq!("IMPLICIT".parse::<PlotMode>(), Ok(PlotMode::Implicit));
    assert!("spherical".parse::<PlotMode>().is_err());
    assert_eq!(PlotMode::Parametric.to_string(), "parametric");
}

#[test]
fn new_model_starts_from_defaults() {
    let model = FieldModel::default();
    assert_eq!(model.mode(), PlotMode::Explicit);
    assert_eq!(model.value("zExpr"), "sin(x) * cos(y)");
    assert_eq!(model.value("rExpr"), "");
}

#[test]
fn edits_are_visible_and_unknown_slots_rejected() {
    let mut model = FieldModel::new(PlotMode::Parametric);
    model.set_text("yExpr", "cos(2t)").unwrap();
    assert_eq!(model.value("yExpr"), "cos(2t)");
    assert_eq!(model.expressions().get("yExpr"), Some("cos(2t)"));

    let err = model.set_text("rExpr", "1").unwrap_err();
    assert_eq!(
        err,
        FieldError::UnknownSlot { mode: PlotMode::Parametric, slot: "rExpr".into() }
    );
}

#[test]
fn switching_modes_discards_edits() {
    let mut model = FieldModel::new(PlotMode::Explicit);
    model.set_text("zExpr", "x*y").unwrap();

    model.select_mode(PlotMode::Parametric);
    assert_eq!(model.slots().len(), 3);
    assert_eq!(model.value("zExpr"), "t / 10");

    model.select_mode(PlotMode::Explicit);
    assert_eq!(model.value("zExpr"), "sin(x) * cos(y)");

    // Re-selecting the active mode also rebuilds.
    model.set_text("zExpr", "x").unwrap();
    model.select_mode(PlotMode::Explicit);
    assert_eq!(model.value("zExpr"), "sin(x) * cos(y)");
}

#[test]
fn plot_uses_live_texts() {
    let mut model = FieldModel::new(PlotMode::Polar);
    model.set_text("rExpr", "3").unwrap();
    let plot = model.plot(&PlotSampler::new()).expect("plot");
    assert_eq!(plot.title, "Polar function: r(θ) = 3");
    let [x, _, _] = plot.curve().unwrap().point(0).unwrap();
    assert_eq!(x, 3.0);

    model.set_text("rExpr", "").unwrap();
    assert!(model.plot(&PlotSampler::new()).is_err());
}
