// File: crates/graph-cli/tests/cli.rs
// Purpose: Flag parsing, slot overrides and the end-to-end run writing every output.

use clap::Parser;
use graph_cli::cli::{parse_assignment, parse_range, slot_listing};
use graph_cli::{run, Cli};
use graph_core::{PlotMode, Range};

#[test]
fn assignment_splits_at_first_equals() {
    assert_eq!(parse_assignment("zExpr=x*y"), Ok(("zExpr".into(), "x*y".into())));
    assert_eq!(parse_assignment(" FExpr =a=b"), Ok(("FExpr".into(), "a=b".into())));
    assert!(parse_assignment("zExpr").is_err());
    assert!(parse_assignment("=x").is_err());
}

#[test]
fn range_parses_and_validates() {
    assert_eq!(parse_range("-2:2:0.5"), Ok(Range::new(-2.0, 2.0, 0.5)));
    assert!(parse_range("0:1").is_err());
    assert!(parse_range("0:1:0").is_err());
    assert!(parse_range("1:0:0.1").is_err());
    assert!(parse_range("a:1:0.1").is_err());
}

#[test]
fn flags_parse() {
    let cli = Cli::try_parse_from([
        "graphplot", "--mode", "Parametric", "-s", "xExpr=cos(2t)", "--set", "zExpr=t",
        "--range", "-1:1:0.5", "--no-labels", "--log-level", "debug", "--azimuth", "-0.5",
    ])
    .expect("valid flags");
    assert_eq!(cli.mode, PlotMode::Parametric);
    assert_eq!(cli.assignments.len(), 2);
    assert_eq!(cli.range, Some(Range::new(-1.0, 1.0, 0.5)));
    assert_eq!(cli.log_level, log::LevelFilter::Debug);

    let opts = cli.render_options();
    assert!(!opts.draw_labels);
    assert_eq!(opts.camera.azimuth, -0.5);

    assert!(Cli::try_parse_from(["graphplot", "--mode", "spherical"]).is_err());
}

#[test]
fn overrides_reach_the_sampler() {
    let cli = Cli::try_parse_from(["graphplot", "-m", "polar", "-s", "rExpr=3", "--range", "0:1:0.5"]).unwrap();
    let plot = cli.plot().unwrap();
    assert_eq!(plot.title, "Polar function: r(θ) = 3");
    assert_eq!(plot.sample_count(), 3);

    let bad = Cli::try_parse_from(["graphplot", "-m", "polar", "-s", "zExpr=3"]).unwrap();
    let err = bad.plot().unwrap_err();
    assert!(format!("{err:#}").contains("zExpr"), "{err:#}");

    let broken = Cli::try_parse_from(["graphplot", "-s", "zExpr=sin("]).unwrap();
    assert!(format!("{:#}", broken.plot().unwrap_err()).contains("zExpr"));
}

#[test]
fn listing_shows_slots_with_defaults() {
    let text = slot_listing(PlotMode::Parametric);
    assert!(text.starts_with("parametric"));
    for id in ["xExpr", "yExpr", "zExpr", "cos(t)", "t / 10"] {
        assert!(text.contains(id), "{text}");
    }
}

#[test]
fn run_writes_png_csv_and_json() {
    let dir = std::path::PathBuf::from("target/test_out/cli");
    let (png, csv, json) = (dir.join("implicit.png"), dir.join("implicit.csv"), dir.join("implicit.json"));
    for p in [&png, &csv, &json] {
        let _ = std::fs::remove_file(p);
    }
    let args = [
        "graphplot".to_string(), "-m".into(), "implicit".into(),
        "--width".into(), "200".into(), "--height".into(), "150".into(), "--no-labels".into(),
        "--out".into(), png.display().to_string(),
        "--csv".into(), csv.display().to_string(),
        "--json".into(), json.display().to_string(),
    ];
    run(&Cli::try_parse_from(args).unwrap()).expect("run");

    assert!(std::fs::read(&png).unwrap().starts_with(&[137, 80, 78, 71]));
    let rows = std::fs::read_to_string(&csv).unwrap().lines().count();
    assert_eq!(rows, 1 + 81 * 81);
    let value: serde_json::Value = serde_json::from_slice(&std::fs::read(&json).unwrap()).unwrap();
    assert_eq!(value["mode"], "implicit");
}
