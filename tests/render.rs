//! End-to-end rendering from CSV tables to SVG files.

use farseer_plot::config::load_overrides;
use farseer_plot::plot::{bar, evolution};
use farseer_plot::{
    BarPlotConfig, BarSeries, BarTemplate, Error, EvolutionConfig, EvolutionSeries, StringTable,
    SvgSurface, TitrationTable,
};
use rstest::rstest;

const CSPS: &str = "\
point,1,2,3,4,5,6,7,8
0.5,0.01,0.02,nan,0.04,0.03,0.01,0.12,0.02
1.0,0.02,0.05,,0.06,0.04,0.02,0.21,0.03
2.0,0.03,0.07,0.01,0.08,0.05,0.02,0.28,0.03
";

const STATUS: &str = "\
point,1,2,3,4,5,6,7,8
0.5,measured,measured,missing,measured,measured,measured,measured,unassigned
1.0,measured,measured,missing,measured,measured,measured,measured,unassigned
2.0,measured,measured,measured,measured,measured,measured,measured,unassigned
";

fn table() -> TitrationTable {
    TitrationTable::from_reader(CSPS.as_bytes()).unwrap()
}

#[rstest]
#[case(BarTemplate::Compacted)]
#[case(BarTemplate::Extended)]
#[case(BarTemplate::ExtendedVertical)]
fn bar_plot_writes_one_subplot_per_point(#[case] template: BarTemplate) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(format!("{template}.svg"));

    let table = table();
    let status = StringTable::from_reader(STATUS.as_bytes()).unwrap();
    let series = BarSeries::new(table.values, table.labels)
        .with_suptitles(table.row_names)
        .with_peak_status(status.values);
    let config = template.default_config().with_figure_path(&path);

    bar::plot(&SvgSurface::new(), template, &series, &config, "CSPs").unwrap();

    let svg = std::fs::read_to_string(&path).unwrap();
    assert_eq!(svg.matches(r#"<g class="subplot""#).count(), 3);
    assert_eq!(svg.matches(r#"class="threshold""#).count(), 6);
    assert!(svg.contains("CSPs"));
    let unassigned_bar = format!(r#"fill="{}" fill-opacity"#, config.unassigned_color);
    assert_eq!(svg.matches(&unassigned_bar).count(), 3);
}

#[test]
fn bar_plot_with_overrides_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let overrides_path = dir.path().join("overrides.json");
    std::fs::write(&overrides_path, r#"{"threshold_flag": false, "y_lims": [0.0, 0.5]}"#).unwrap();

    let overrides = load_overrides(&overrides_path).unwrap();
    let template = BarTemplate::Compacted;
    let config = BarPlotConfig::compacted()
        .with_overrides(template.name(), &overrides)
        .unwrap()
        .with_figure_path(dir.path().join("no_threshold.svg"));
    assert_eq!(config.y_lims, (0.0, 0.5));

    let table = table();
    let series = BarSeries::new(table.values, table.labels);
    bar::plot(&SvgSurface::new(), template, &series, &config, "").unwrap();

    let svg = std::fs::read_to_string(&config.figure_path).unwrap();
    assert!(!svg.contains(r#"class="threshold""#));
}

#[test]
fn bar_linewidth_override_outlines_bars() {
    let dir = tempfile::tempdir().unwrap();
    let template = BarTemplate::Compacted;
    let table = table();
    let series = BarSeries::new(table.values, table.labels);

    let plain = template.default_config().with_figure_path(dir.path().join("plain.svg"));
    let overrides = serde_json::json!({"bar_linewidth": 3.0});
    let outlined = template
        .default_config()
        .with_overrides(template.name(), overrides.as_object().unwrap())
        .unwrap()
        .with_figure_path(dir.path().join("outlined.svg"));

    bar::plot(&SvgSurface::new(), template, &series, &plain, "").unwrap();
    bar::plot(&SvgSurface::new(), template, &series, &outlined, "").unwrap();

    let plain = std::fs::read_to_string(&plain.figure_path).unwrap();
    let outlined = std::fs::read_to_string(&outlined.figure_path).unwrap();
    assert_ne!(plain, outlined);
    assert_eq!(outlined.matches(r#"stroke-width="3"/>"#).count(), 24);
}

#[test]
fn bar_plot_rejects_wrong_override_type() {
    let overrides = serde_json::json!({"cols_page": "three"});
    let err = BarPlotConfig::compacted()
        .with_overrides("Compacted Bar", overrides.as_object().unwrap())
        .unwrap_err();

    assert!(matches!(err, Error::Config { ref key, .. } if key == "cols_page"));
}

#[test]
fn evolution_plot_from_transposed_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("evolution.svg");

    let table = table().transposed();
    let status = StringTable::from_reader(STATUS.as_bytes()).unwrap();
    let series = EvolutionSeries::new(table.values)
        .with_suptitles(table.row_names)
        .with_peak_status(status.values.reversed_axes());
    let config = EvolutionConfig::default()
        .with_titration_x_values(table.labels)
        .with_figure_path(&path);

    evolution::plot(&SvgSurface::new(), &series, &config, "Evolution").unwrap();

    let svg = std::fs::read_to_string(&path).unwrap();
    assert_eq!(svg.matches(r#"<g class="subplot""#).count(), 8);
    assert_eq!(svg.matches(">unassigned<").count(), 1);
}
