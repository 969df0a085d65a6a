use std::io::Write;
use std::sync::Arc;

use ratioplot::options::validator::{in_range, is_number};
use ratioplot::{
    DEBUG_OPTION, Error, LogLevel, MemoryLogger, OptionStore, OptionValue, PlotRequest, RatioPlot,
};

fn store() -> (OptionStore, MemoryLogger) {
    let logger = MemoryLogger::new();
    (OptionStore::with_logger(Arc::new(logger.clone())), logger)
}

fn config_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_unset_read_then_set() {
    let (mut store, logger) = store();
    for key in ["a", "b", "c"] {
        assert!(store.get(key).is_none());
    }
    assert_eq!(logger.messages(LogLevel::Warning).len(), 3);

    store.set("a", vec![1, 2]).unwrap();
    assert_eq!(store.get("a"), Some(&OptionValue::from(vec![1, 2])));
}

#[test]
fn test_replacing_validator_keeps_original() {
    let (mut store, _) = store();
    store.register_validator("k", in_range(0.0, 1.0)).unwrap();
    assert!(store.register_validator("k", is_number()).is_err());

    let err = store.set("k", 42).unwrap_err();
    assert!(matches!(err, Error::ValidatorRejected { ref validator, .. } if validator == "in_range(0, 1)"));
}

#[test]
fn test_layered_defaults() {
    let (mut store, _) = store();
    store.load_defaults([("a", 1)]).unwrap();
    store.load_defaults([("a", 2)]).unwrap();
    assert_eq!(store["a"], OptionValue::from(1));
    store
        .load_defaults_with([("a", 2)], Vec::<(&str, ratioplot::Validator)>::new(), true)
        .unwrap();
    assert_eq!(store["a"], OptionValue::from(2));
}

#[test]
fn test_cli_then_config_file() {
    let (mut store, _) = store();
    store
        .register_flag('o', "output-type", "Output type", "output_file_type", "pdf")
        .unwrap();
    let file = config_file("# plot settings\noutput_file_type;png\ncount;5;int\nflag\n");
    let path = file.path().to_str().unwrap().to_string();

    store
        .parse_cli_from(["ratioplot", "-d", "-o", "eps", "-c", path.as_str()])
        .unwrap();

    assert_eq!(store.get_bool(DEBUG_OPTION), Some(true));
    // config file is applied after the flags
    assert_eq!(store.get_str("output_file_type"), Some("png"));
    assert_eq!(store.get_f64("count"), Some(5.0));
    assert_eq!(store.get_bool("flag"), Some(true));
}

#[test]
fn test_malformed_line_stops_parse() {
    let (mut store, logger) = store();
    let file = config_file("first;1;int\nbad;5;nosuchtype\nlast\n");
    assert!(matches!(
        store.parse_config_file(file.path()),
        Err(Error::MalformedConfigLine { line_number: 2, .. })
    ));
    assert_eq!(store.get_f64("first"), Some(1.0));
    assert!(!store.has_option("last"));
    assert!(logger.contains(LogLevel::Error, "Lines starting with: # will be ignored"));
}

#[test]
fn test_missing_config_leaves_store_untouched() {
    let (mut store, _) = store();
    store.set("kept", true).unwrap();
    let before: Vec<(String, OptionValue)> =
        store.iter().map(|(k, v)| (k.to_string(), v.clone())).collect();

    let dir = tempfile::tempdir().unwrap();
    let result = store.parse_config_file(dir.path().join("absent.cfg"));
    assert!(matches!(result, Err(Error::ConfigNotFound { .. })));

    let after: Vec<(String, OptionValue)> =
        store.iter().map(|(k, v)| (k.to_string(), v.clone())).collect();
    assert_eq!(before, after);
}

#[test]
fn test_validate_all_ignores_unvalidated_keys() {
    let (mut store, _) = store();
    store.set("free_text", "anything").unwrap();
    store.set_with_validator("scale", 1.0, is_number()).unwrap();
    assert!(store.validate_all());

    store.set("scale", "oops").unwrap_err();
    assert!(store.validate_all());
}

#[test]
fn test_ratio_plot_reads_config_file() {
    let logger = MemoryLogger::new();
    let mut plot = RatioPlot::new(Arc::new(logger.clone()));
    let file = config_file("output_file_type;png\ndraw_grid;yes;bool\nratio_maximum;1.25;float\n");
    plot.load_options(file.path()).unwrap();

    let edges = vec![0.0, 1.0, 2.0];
    plot.add_histogram(
        ratioplot::Histogram::from_counts("data", edges.clone(), vec![4.0, 2.0]).unwrap(),
        None,
        None,
    );
    plot.add_histogram(
        ratioplot::Histogram::from_counts("mc", edges, vec![2.0, 2.0]).unwrap(),
        None,
        None,
    );

    let plan = plot.plan(&PlotRequest::new("ratio")).unwrap();
    assert_eq!(plan.output_path.to_str(), Some("ratio.png"));
    assert!(plan.draw_grid);
    assert!(!plan.draw_unity_line);
    assert_eq!(plan.ratio_maximum, Some(1.25));
    assert_eq!(plan.ratios[0].histogram.contents().to_vec(), vec![0.5, 1.0]);

    plot.print_settings();
    assert!(logger.contains(LogLevel::Info, "    output_file_type  ->  png"));
}
