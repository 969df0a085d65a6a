//! Command line ingestion for [`OptionStore`].
//!
//! Flags are registered at runtime, so the parser is a `clap::Command` built
//! with the builder API rather than a derived struct. Two flags are always
//! present: `-c/--config <PATH>` and `-d/--debug`.
use std::ffi::OsString;

use clap::error::ErrorKind;
use clap::{Arg, ArgAction, ArgMatches, Command};

use crate::error::{Error, Result};
use crate::logging::LogLevel;
use crate::types::{ConversionError, OptionValue, ValueType};

use super::store::OptionStore;

/// Option key set to `true` when `-d/--debug` is given.
pub const DEBUG_OPTION: &str = "debug";

const CONFIG_ARG: &str = "config";
const DEBUG_ARG: &str = "debug";
const RESERVED_SHORTS: [char; 3] = ['c', 'd', 'h'];
const RESERVED_LONGS: [&str; 3] = ["config", "debug", "help"];

/// One registrable flag: `-short/--long <VALUE>` mapped onto option `dest`.
#[derive(Debug, Clone, PartialEq)]
pub struct FlagDescriptor {
    pub short: char,
    pub long: String,
    pub help: String,
    pub dest: String,
    pub default: OptionValue,
}

impl FlagDescriptor {
    /// Parsed text is converted to the variant of the default value.
    fn convert(&self, raw: &str) -> std::result::Result<OptionValue, ConversionError> {
        let target = match self.default {
            OptionValue::Bool(_) => ValueType::Bool,
            OptionValue::Number(_) => ValueType::Float,
            OptionValue::Text(_) => ValueType::Text,
            OptionValue::List(_) => ValueType::List,
        };
        target.convert(raw.trim())
    }

    fn to_arg(&self) -> Arg {
        Arg::new(self.long.clone())
            .short(self.short)
            .long(self.long.clone())
            .value_name(self.dest.to_ascii_uppercase())
            .help(format!("{} [default: {}]", self.help, self.default))
            .action(ArgAction::Set)
    }
}

impl OptionStore {
    /// Register `-short/--long` as a source for option `dest`.
    ///
    /// Leading dashes on `long` are ignored. The short name must be an ASCII
    /// letter or digit and the long name must be non-empty without whitespace
    /// or `=`. A name that is malformed, reserved or already taken is logged
    /// and leaves the flag list untouched.
    pub fn register_flag(
        &mut self,
        short: char,
        long: &str,
        help: &str,
        dest: impl Into<String>,
        default: impl Into<OptionValue>,
    ) -> Result<()> {
        let long = long.trim_start_matches('-').to_string();

        let long_ok = !long.is_empty() && !long.chars().any(|c| c.is_whitespace() || c == '=');
        if !short.is_ascii_alphanumeric() || !long_ok {
            self.log(
                &format!("Flag -{}/--{} is not a valid command line name!", short, long),
                LogLevel::Error,
            );
            return Err(Error::InvalidFlagName {
                flag: format!("-{}/--{}", short, long),
            });
        }

        if RESERVED_SHORTS.contains(&short) || RESERVED_LONGS.contains(&long.as_str()) {
            self.log(
                &format!("Flag -{}/--{} is reserved by the built-in options!", short, long),
                LogLevel::Error,
            );
            return Err(Error::ReservedFlag {
                flag: format!("-{}/--{}", short, long),
            });
        }

        if self.flags.iter().any(|f| f.short == short) {
            self.log(
                &format!("Option -{} is already being parsed!", short),
                LogLevel::Error,
            );
            return Err(Error::DuplicateShortFlag { flag: short });
        }

        if self.flags.iter().any(|f| f.long == long) {
            self.log(
                &format!("The long name of option -{}, --{}, is already used!", short, long),
                LogLevel::Error,
            );
            return Err(Error::DuplicateLongFlag { flag: long });
        }

        self.flags.push(FlagDescriptor {
            short,
            long,
            help: help.to_string(),
            dest: dest.into(),
            default: default.into(),
        });
        Ok(())
    }

    pub fn flags(&self) -> &[FlagDescriptor] {
        &self.flags
    }

    /// Parser for the registered flags plus the built-in ones.
    pub fn command(&self) -> Command {
        let base = Command::new(env!("CARGO_PKG_NAME"))
            .arg(
                Arg::new(CONFIG_ARG)
                    .short('c')
                    .long("config")
                    .value_name("PATH")
                    .help("Path to the config file to use."),
            )
            .arg(
                Arg::new(DEBUG_ARG)
                    .short('d')
                    .long("debug")
                    .action(ArgAction::SetTrue)
                    .help("Enable debug mode."),
            );

        self.flags.iter().fold(base, |cmd, flag| cmd.arg(flag.to_arg()))
    }

    /// Parse the process arguments. See [`OptionStore::parse_cli_from`].
    pub fn parse_cli(&mut self) -> Result<()> {
        self.parse_cli_from(std::env::args_os())
    }

    /// Parse `args` (program name first) into the store.
    ///
    /// Sets `debug` when requested, copies every registered flag (or its
    /// default) into its destination option and, if a config path was given,
    /// finishes by parsing that file. `--help` prints usage and exits.
    ///
    /// A flag value that fails conversion or validation is logged and
    /// skipped; the remaining flags and the config file are still applied and
    /// the first failure is returned at the end.
    pub fn parse_cli_from<I, T>(&mut self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = match self.command().try_get_matches_from(args) {
            Ok(matches) => matches,
            Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                e.exit()
            }
            Err(e) => {
                self.log(
                    &format!("Could not parse the command line: {}", e.kind()),
                    LogLevel::Error,
                );
                return Err(e.into());
            }
        };

        let mut failure: Option<Error> = None;

        if matches.get_flag(DEBUG_ARG) {
            if let Err(e) = self.set(DEBUG_OPTION, true) {
                failure.get_or_insert(e);
            }
        }

        for (dest, value) in self.collect_flag_values(&matches) {
            let applied = value
                .map_err(Error::from)
                .and_then(|value| self.set(dest.as_str(), value));
            if let Err(e) = applied {
                self.log(
                    &format!("Skipping command line value for {}: {}", dest, e),
                    LogLevel::Warning,
                );
                failure.get_or_insert(e);
            }
        }

        // must stay last: the config file may refine anything set above
        if let Some(path) = matches.get_one::<String>(CONFIG_ARG) {
            let path = path.clone();
            if let Err(e) = self.parse_config_file(path) {
                failure.get_or_insert(e);
            }
        }

        match failure {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn collect_flag_values(
        &self,
        matches: &ArgMatches,
    ) -> Vec<(String, std::result::Result<OptionValue, ConversionError>)> {
        self.flags
            .iter()
            .map(|flag| {
                self.log(
                    &format!("Mapping: -{}/--{} to {}", flag.short, flag.long, flag.dest),
                    LogLevel::Debug,
                );
                let value = match matches.get_one::<String>(&flag.long) {
                    Some(raw) => flag.convert(raw).inspect_err(|e| {
                        self.log(
                            &format!("Could not convert --{} value: {}", flag.long, e),
                            LogLevel::Error,
                        );
                    }),
                    None => Ok(flag.default.clone()),
                };
                (flag.dest.clone(), value)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::MemoryLogger;
    use crate::options::validator::in_range;
    use std::sync::Arc;

    fn store() -> (OptionStore, MemoryLogger) {
        let logger = MemoryLogger::new();
        (OptionStore::with_logger(Arc::new(logger.clone())), logger)
    }

    #[test]
    fn test_duplicate_flags_rejected() {
        let (mut store, logger) = store();
        store
            .register_flag('o', "--output", "Output type", "output_file_type", "pdf")
            .unwrap();
        assert!(matches!(
            store.register_flag('o', "other", "", "x", 1),
            Err(Error::DuplicateShortFlag { flag: 'o' })
        ));
        assert!(matches!(
            store.register_flag('p', "output", "", "x", 1),
            Err(Error::DuplicateLongFlag { .. })
        ));
        assert_eq!(store.flags().len(), 1);
        assert_eq!(store.flags()[0].long, "output");
        assert_eq!(logger.messages(LogLevel::Error).len(), 2);
    }

    #[test]
    fn test_reserved_flags_rejected() {
        let (mut store, _) = store();
        assert!(matches!(
            store.register_flag('c', "colour", "", "colour", "red"),
            Err(Error::ReservedFlag { .. })
        ));
        assert!(matches!(
            store.register_flag('x', "--debug", "", "x", false),
            Err(Error::ReservedFlag { .. })
        ));
        assert!(store.flags().is_empty());
    }

    #[test]
    fn test_malformed_short_flag_rejected() {
        let (mut store, logger) = store();
        assert!(matches!(
            store.register_flag('-', "dash", "", "dash", "x"),
            Err(Error::InvalidFlagName { .. })
        ));
        assert!(matches!(
            store.register_flag('?', "question", "", "question", "x"),
            Err(Error::InvalidFlagName { .. })
        ));
        assert!(store.flags().is_empty());
        assert!(logger.contains(LogLevel::Error, "not a valid command line name"));
        store.parse_cli_from(["ratioplot"]).unwrap();
    }

    #[test]
    fn test_malformed_long_flag_rejected() {
        let (mut store, _) = store();
        for long in ["", "--", "two words", "key=value"] {
            assert!(matches!(
                store.register_flag('x', long, "", "x", "y"),
                Err(Error::InvalidFlagName { .. })
            ));
        }
        assert!(store.flags().is_empty());
    }

    #[test]
    fn test_parse_cli_copies_values_and_defaults() {
        let (mut store, _) = store();
        store
            .register_flag('o', "output", "Output type", "output_file_type", "pdf")
            .unwrap();
        store
            .register_flag('m', "ratio-max", "Upper ratio bound", "ratio_maximum", 2.0)
            .unwrap();
        store
            .register_flag('g', "grid", "Draw grid", "draw_grid", false)
            .unwrap();

        store
            .parse_cli_from(["ratioplot", "-o", "png", "--ratio-max", "3.5"])
            .unwrap();

        assert_eq!(store.get_str("output_file_type"), Some("png"));
        assert_eq!(store.get_f64("ratio_maximum"), Some(3.5));
        assert_eq!(store.get_bool("draw_grid"), Some(false));
        assert!(!store.has_option(DEBUG_OPTION));
    }

    #[test]
    fn test_parse_cli_debug_toggle() {
        let (mut store, _) = store();
        store.parse_cli_from(["ratioplot", "-d"]).unwrap();
        assert_eq!(store.get_bool(DEBUG_OPTION), Some(true));
    }

    #[test]
    fn test_parse_cli_unknown_flag_is_error() {
        let (mut store, logger) = store();
        let result = store.parse_cli_from(["ratioplot", "--bogus"]);
        assert!(matches!(result, Err(Error::Cli(_))));
        assert!(logger.contains(LogLevel::Error, "Could not parse the command line"));
    }

    #[test]
    fn test_parse_cli_bad_number_is_error() {
        let (mut store, _) = store();
        store
            .register_flag('m', "ratio-max", "", "ratio_maximum", 2.0)
            .unwrap();
        let result = store.parse_cli_from(["ratioplot", "-m", "lots"]);
        assert!(matches!(result, Err(Error::Conversion(_))));
        assert!(!store.has_option("ratio_maximum"));
    }

    #[test]
    fn test_parse_cli_respects_validators() {
        let (mut store, _) = store();
        store.register_validator("ratio_maximum", in_range(1.0, 10.0)).unwrap();
        store
            .register_flag('m', "ratio-max", "", "ratio_maximum", 2.0)
            .unwrap();
        let result = store.parse_cli_from(["ratioplot", "-m", "50"]);
        assert!(matches!(result, Err(Error::ValidatorRejected { .. })));
    }

    #[test]
    fn test_parse_cli_rejected_value_does_not_stop_the_rest() {
        use std::io::Write;

        let (mut store, logger) = store();
        store.register_validator("scale", in_range(1.0, 10.0)).unwrap();
        store.register_flag('a', "scale", "", "scale", 50.0).unwrap();
        store.register_flag('b', "label", "", "label", "x").unwrap();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"from_config;1\n").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let result = store.parse_cli_from(["ratioplot", "-c", path.as_str()]);

        assert!(matches!(result, Err(Error::ValidatorRejected { ref key, .. }) if key == "scale"));
        assert!(!store.has_option("scale"));
        assert_eq!(store.get_str("label"), Some("x"));
        assert_eq!(store.get_str("from_config"), Some("1"));
        assert!(logger.contains(LogLevel::Warning, "Skipping command line value for scale"));
    }

    #[test]
    fn test_parse_cli_bad_number_still_applies_config() {
        use std::io::Write;

        let (mut store, _) = store();
        store.register_flag('m', "ratio-max", "", "ratio_maximum", 2.0).unwrap();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"draw_grid\n").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let result = store.parse_cli_from(["ratioplot", "-m", "lots", "-c", path.as_str()]);

        assert!(matches!(result, Err(Error::Conversion(_))));
        assert_eq!(store.get_bool("draw_grid"), Some(true));
    }

    #[test]
    fn test_parse_cli_missing_config_file() {
        let (mut store, _) = store();
        let result = store.parse_cli_from(["ratioplot", "--config", "/definitely/not/here.cfg"]);
        assert!(matches!(result, Err(Error::ConfigNotFound { .. })));
    }

    #[test]
    fn test_command_lists_registered_flags() {
        let (mut store, _) = store();
        store
            .register_flag('o', "output", "Output type", "output_file_type", "pdf")
            .unwrap();
        let cmd = store.command();
        let longs: Vec<&str> = cmd.get_arguments().filter_map(|a| a.get_long()).collect();
        assert_eq!(longs, vec!["config", "debug", "output"]);
    }
}
