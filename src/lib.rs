#![doc = r#"
ratioplot: option handling and ratio-histogram plot preparation for plotting scripts.

The crate has three layers:

- a pluggable [`Logger`] sink (console with timestamps, `tracing`, or an
  in-memory buffer),
- an [`OptionStore`]: named, dynamically typed options with optional
  validators, layered defaults, command line flags and `name;value;type`
  config files,
- a [`RatioPlot`] that keeps its styling in an `OptionStore`, collects
  histograms and resolves everything into a [`PlotPlan`] for a renderer.

Quick start: options
--------------------
```rust
use std::sync::Arc;
use ratioplot::{MemoryLogger, OptionStore, OptionValue};
use ratioplot::options::validator::in_range;

fn main() -> ratioplot::Result<()> {
    let logger = MemoryLogger::new();
    let mut options = OptionStore::with_logger(Arc::new(logger.clone()));

    options.load_defaults([("ratio_maximum", 2.0), ("ratio_minimum", 0.5)])?;
    options.register_validator("ratio_maximum", in_range(1.0, 10.0))?;

    // rejected by the validator, the default stays in place
    assert!(options.set("ratio_maximum", 20.0).is_err());
    assert_eq!(options.get("ratio_maximum"), Some(&OptionValue::from(2.0)));

    assert!(options.validate_all());
    Ok(())
}
```

Command line and config files
-----------------------------
```rust,no_run
use ratioplot::OptionStore;

fn main() -> ratioplot::Result<()> {
    let mut options = OptionStore::new();
    options.register_flag('o', "output-type", "Output file type", "output_file_type", "pdf")?;

    // -c/--config <PATH> and -d/--debug are always available;
    // a config path is parsed after the flags have been applied.
    options.parse_cli()?;

    for (key, value) in &options {
        println!("{key} -> {value}");
    }
    Ok(())
}
```

A config file holds one option per line:

```text
# comments and blank lines are ignored
draw_grid
atlas_label;Internal
ratio_maximum;1.5;float
legend_x_values;0.6,0.9;list
```

A bare name is set to `true`, `name;value` stores the value as text, and a
third column names the conversion (`int`, `float`, `bool`, `str`, `list`).

Ratio plots
-----------
```rust
use std::sync::Arc;
use ratioplot::{Histogram, MemoryLogger, PlotRequest, RatioPlot};

fn main() -> ratioplot::Result<()> {
    let mut plot = RatioPlot::new(Arc::new(MemoryLogger::new()));
    let edges = vec![0.0, 10.0, 20.0];
    plot.add_histogram(Histogram::from_counts("data", edges.clone(), vec![10.0, 4.0])?, Some("Data"), None);
    plot.add_histogram(Histogram::from_counts("mc", edges, vec![8.0, 5.0])?, Some("MC"), None);

    let plan = plot.plan(&PlotRequest::new("pt_ratio"))?;
    assert_eq!(plan.output_path.to_str(), Some("pt_ratio.pdf"));
    assert_eq!(plan.ratios.len(), 1);
    Ok(())
}
```

Error handling
--------------
Operations log a diagnostic through the configured logger and return
`ratioplot::Result<T>`; match on [`Error`] to tell the causes apart.

Useful modules
--------------
- [`options`]: the option store, validators, CLI and config-file parsing.
- [`ratio`]: histograms, plot defaults and plan resolution.
- [`logging`]: `Logger` trait and sinks.
- [`types`]: `OptionValue` and the config-file type converters.
- [`error`]: crate-level `Error` and `Result`.
"#]

pub mod error;
pub mod logging;
pub mod options;
pub mod ratio;
pub mod types;

// Curated public API surface
pub use error::{Error, Result};
pub use logging::{ConsoleLogger, LogEntry, LogLevel, Logger, MemoryLogger, TracingLogger};
pub use options::{
    DEBUG_OPTION, DEFAULT_CONFIG_FILE, FlagDescriptor, OptionStore, ValidationReport, Validator,
};
pub use ratio::{Histogram, HistogramStyle, PlotPlan, PlotRenderer, PlotRequest, RatioPlot};
pub use types::{ConversionError, OptionValue, ValueType};
