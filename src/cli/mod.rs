//! Command Line Interface (CLI) layer for ratioplot.
//!
//! This module defines the terminal flags the binary registers (`args`),
//! error types (`errors`), and the orchestration logic (`runner`): load the
//! plot defaults, layer command line and config-file options on top, print
//! the resulting settings and validate them.
//!
//! If you are embedding ratioplot into another application, use
//! `ratioplot::RatioPlot` and `ratioplot::OptionStore` directly instead.
pub mod args;
pub mod errors;
pub mod runner;

pub use runner::run;
