use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use ratioplot::{ConsoleLogger, DEBUG_OPTION, LogLevel, RatioPlot, TracingLogger};

use super::args::register_terminal_flags;
use super::errors::AppError;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut plot = RatioPlot::new(Arc::new(ConsoleLogger));

    register_terminal_flags(plot.options_mut()).map_err(AppError::from)?;
    plot.options_mut().parse_cli().map_err(AppError::from)?;

    // checked with has_option first so a run without -d logs no warning
    let debug = plot.options().has_option(DEBUG_OPTION)
        && plot.options().get_bool(DEBUG_OPTION) == Some(true);
    if debug {
        init_tracing();
        plot.set_logger(Arc::new(TracingLogger));
        plot.options().print_validators(LogLevel::Debug);
        let snapshot = plot.options().to_json().map_err(AppError::from)?;
        tracing::debug!("Option snapshot:\n{}", snapshot);
    }

    plot.print_settings();

    if !plot.options().validate_all() {
        let count = plot.options().validation_report().invalid.len();
        return Err(AppError::InvalidOptions { count }.into());
    }

    Ok(())
}
