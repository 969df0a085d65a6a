//! Option handling: a keyed registry of dynamically typed values with
//! optional validators, layered defaults, and two ingestion paths
//! (`terminal` for command line flags, `config_file` for `name;value;type` files).
pub mod config_file;
pub mod store;
pub mod terminal;
pub mod validator;

pub use config_file::DEFAULT_CONFIG_FILE;
pub use store::{
    ALLOW_REPLACE_VALIDATOR, OptionStore, SUPPRESS_OPTION_WARNINGS, SUPPRESS_VALIDATOR_WARNINGS,
    ValidationReport,
};
pub use terminal::{DEBUG_OPTION, FlagDescriptor};
pub use validator::Validator;
