//! Crate-level error type and `Result` alias.
//! Option-store operations log a diagnostic and then return one of these
//! variants, so callers can branch on the cause instead of parsing log text.
use std::path::PathBuf;

use thiserror::Error;

use crate::types::ConversionError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Command line error: {0}")]
    Cli(#[from] clap::Error),

    #[error("Short flag -{flag} is already registered")]
    DuplicateShortFlag { flag: char },

    #[error("Long flag --{flag} is already registered")]
    DuplicateLongFlag { flag: String },

    #[error("Flag {flag} is not a valid command line name")]
    InvalidFlagName { flag: String },

    #[error("Flag {flag} is reserved by the built-in command line options")]
    ReservedFlag { flag: String },

    #[error("A validator for option '{key}' is already in place")]
    ValidatorExists { key: String },

    #[error("Value {value} for option '{key}' was rejected by validator {validator}")]
    ValidatorRejected {
        key: String,
        value: String,
        validator: String,
    },

    #[error("Option '{key}' must be {expected}")]
    InvalidOption { key: String, expected: &'static str },

    #[error("Config file does not exist: {}", path.display())]
    ConfigNotFound { path: PathBuf },

    #[error("Unable to parse line {line_number} of {}: '{line}': {source}", path.display())]
    MalformedConfigLine {
        path: PathBuf,
        line_number: usize,
        line: String,
        #[source]
        source: ConversionError,
    },

    #[error("Conversion error: {0}")]
    Conversion(#[from] ConversionError),

    #[error("Need at least two histograms to create a ratio plot, got {count}")]
    TooFewHistograms { count: usize },

    #[error("Histograms '{numerator}' and '{denominator}' have different binning")]
    BinningMismatch {
        numerator: String,
        denominator: String,
    },

    #[error("Invalid bin edges for histogram '{name}': {reason}")]
    InvalidBinEdges { name: String, reason: String },

    #[error("Render error: {0}")]
    Render(String),
}

impl Error {
    pub fn render<E: std::fmt::Display>(e: E) -> Self {
        Error::Render(e.to_string())
    }
}
