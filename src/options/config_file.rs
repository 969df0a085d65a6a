//! Line-oriented config files.
//!
//! ```text
//! # comment
//! name                 -> true
//! name;value           -> "value" as text
//! name;value;type      -> value converted by type (int, float, bool, str, list)
//! ```
//! Fields after the third are ignored.
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::logging::LogLevel;
use crate::types::{OptionValue, ValueType};

use super::store::OptionStore;

/// Path read by [`OptionStore::parse_default_config_file`].
pub const DEFAULT_CONFIG_FILE: &str = "default.cfg";

const USAGE: [&str; 6] = [
    "Options have to be specified in the following manner: ",
    "Name of the option;option value;option type",
    "The value and the type are optional. If no type is specified a string is assumed.",
    "If value and type have not been specified, the option will be set to True.",
    "Only specifying the type and the name will not work!",
    "Lines starting with: # will be ignored by the option parser.",
];

impl OptionStore {
    /// Apply [`DEFAULT_CONFIG_FILE`] from the working directory.
    pub fn parse_default_config_file(&mut self) -> Result<()> {
        self.parse_config_file(DEFAULT_CONFIG_FILE)
    }

    /// Apply every line of the config file at `path`.
    ///
    /// A missing file fails before anything is read. A typed line whose type
    /// or value cannot be converted stops the parse; lines before it stay
    /// applied. Values rejected by a validator are logged and skipped.
    pub fn parse_config_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.log(
            &format!("Parsing configuration file {}", path.display()),
            LogLevel::Info,
        );

        if !path.exists() {
            self.log("Config file does not exist! Aborting!", LogLevel::Error);
            return Err(Error::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = fs::read_to_string(path).map_err(|e| {
            self.log(
                &format!(
                    "An error occurred while reading the config file {}: {}",
                    path.display(),
                    e
                ),
                LogLevel::Error,
            );
            e
        })?;

        for (index, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = line.split(';').collect();
            let applied = match fields.as_slice() {
                [name] => self.set(name.trim(), true),
                [name, value] => self.set(name.trim(), value.trim()),
                [name, value, kind, ..] => match convert_field(value, kind) {
                    Ok(value) => self.set(name.trim(), value),
                    Err(source) => {
                        self.log(
                            &format!(
                                "Unable to parse option {:?} from config file {}.",
                                fields,
                                path.display()
                            ),
                            LogLevel::Error,
                        );
                        for usage in USAGE {
                            self.log(usage, LogLevel::Error);
                        }
                        return Err(Error::MalformedConfigLine {
                            path: path.to_path_buf(),
                            line_number: index + 1,
                            line: line.to_string(),
                            source,
                        });
                    }
                },
                [] => Ok(()),
            };

            if let Err(e) = applied {
                self.log(
                    &format!("Skipping line {} of {}: {}", index + 1, path.display(), e),
                    LogLevel::Warning,
                );
            }
        }

        Ok(())
    }
}

fn convert_field(value: &str, kind: &str) -> std::result::Result<OptionValue, crate::types::ConversionError> {
    let kind: ValueType = kind.parse()?;
    kind.convert(value.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::MemoryLogger;
    use std::io::Write;
    use std::sync::Arc;

    fn store() -> (OptionStore, MemoryLogger) {
        let logger = MemoryLogger::new();
        (OptionStore::with_logger(Arc::new(logger.clone())), logger)
    }

    fn config(lines: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(lines.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_three_line_shapes() {
        let (mut store, _) = store();
        let file = config("flag\nname;5\ncount;5;int\n");
        store.parse_config_file(file.path()).unwrap();
        assert_eq!(store.get("flag"), Some(&OptionValue::Bool(true)));
        assert_eq!(store.get("name"), Some(&OptionValue::from("5")));
        assert_eq!(store.get("count"), Some(&OptionValue::Number(5.0)));
    }

    #[test]
    fn test_comments_blanks_and_whitespace() {
        let (mut store, _) = store();
        let file = config("# a comment\n\n   \n  title ;  Muon pT  \n  # indented comment\n");
        store.parse_config_file(file.path()).unwrap();
        assert_eq!(store.get_str("title"), Some("Muon pT"));
        assert!(!store.has_option("# indented comment"));
    }

    #[test]
    fn test_extra_fields_ignored() {
        let (mut store, _) = store();
        let file = config("scale; 1.5 ; FLOAT ; ignored ; also ignored\n");
        store.parse_config_file(file.path()).unwrap();
        assert_eq!(store.get_f64("scale"), Some(1.5));
    }

    #[test]
    fn test_unknown_type_aborts_remaining_lines() {
        let (mut store, logger) = store();
        let file = config("before;1\nbad;5;nosuchtype\nafter;2\n");
        let err = store.parse_config_file(file.path()).unwrap_err();
        match err {
            Error::MalformedConfigLine {
                line_number,
                source,
                ..
            } => {
                assert_eq!(line_number, 2);
                assert!(matches!(source, crate::types::ConversionError::UnknownType(_)));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(store.has_option("before"));
        assert!(!store.has_option("bad"));
        assert!(!store.has_option("after"));
        assert!(logger.contains(LogLevel::Error, "Name of the option;option value;option type"));
    }

    #[test]
    fn test_bad_value_aborts() {
        let (mut store, _) = store();
        let file = config("count;five;int\n");
        assert!(matches!(
            store.parse_config_file(file.path()),
            Err(Error::MalformedConfigLine { .. })
        ));
        assert!(!store.has_option("count"));
    }

    #[test]
    fn test_missing_file() {
        let (mut store, logger) = store();
        let before = store.len();
        let result = store.parse_config_file("/no/such/dir/default.cfg");
        assert!(matches!(result, Err(Error::ConfigNotFound { .. })));
        assert_eq!(store.len(), before);
        assert!(logger.contains(LogLevel::Error, "does not exist"));
    }

    #[test]
    fn test_default_config_file_path() {
        let (mut store, _) = store();
        match store.parse_default_config_file() {
            Err(Error::ConfigNotFound { path }) => {
                assert_eq!(path, Path::new(DEFAULT_CONFIG_FILE));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_validator_rejection_does_not_stop_file() {
        let (mut store, logger) = store();
        store
            .register_validator("ratio_maximum", crate::options::validator::is_number())
            .unwrap();
        let file = config("ratio_maximum;high\ndraw_grid;true;bool\n");
        store.parse_config_file(file.path()).unwrap();
        assert!(!store.has_option("ratio_maximum"));
        assert_eq!(store.get_bool("draw_grid"), Some(true));
        assert!(logger.contains(LogLevel::Error, "Could not verify option ratio_maximum"));
    }
}
