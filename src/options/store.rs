use std::collections::BTreeMap;
use std::ops::Index;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::logging::{ConsoleLogger, LogLevel, Logger};
use crate::types::OptionValue;

use super::terminal::FlagDescriptor;
use super::validator::{self, Validator};

/// When false, `validate_all` also lists options that have no validator.
pub const SUPPRESS_VALIDATOR_WARNINGS: &str = "suppress_validator_warnings";
/// When false, overwriting an existing option logs a warning.
pub const SUPPRESS_OPTION_WARNINGS: &str = "suppress_option_warnings";
/// When true, `register_validator` may replace an existing validator.
pub const ALLOW_REPLACE_VALIDATOR: &str = "allow_replace_validator";

/// Outcome of checking every stored option against its validator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub invalid: Vec<String>,
    pub without_validator: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.invalid.is_empty()
    }
}

/// Named option registry with optional per-option validators.
///
/// Options are layered from defaults, the command line and config files.
/// Every operation reports problems through the configured [`Logger`] and
/// returns an error value instead of panicking.
pub struct OptionStore {
    pub(super) options: BTreeMap<String, OptionValue>,
    pub(super) validators: BTreeMap<String, Validator>,
    pub(super) flags: Vec<FlagDescriptor>,
    logger: Arc<dyn Logger>,
}

impl Default for OptionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl OptionStore {
    /// Store that prints to stdout.
    pub fn new() -> Self {
        Self::with_logger(Arc::new(ConsoleLogger))
    }

    pub fn with_logger(logger: Arc<dyn Logger>) -> Self {
        let mut store = Self {
            options: BTreeMap::new(),
            validators: BTreeMap::new(),
            flags: Vec::new(),
            logger,
        };

        for (key, value) in [
            (SUPPRESS_VALIDATOR_WARNINGS, true),
            (SUPPRESS_OPTION_WARNINGS, true),
            (ALLOW_REPLACE_VALIDATOR, false),
        ] {
            store.options.insert(key.to_string(), OptionValue::Bool(value));
            store.validators.insert(key.to_string(), validator::is_bool());
        }

        store
    }

    pub fn logger(&self) -> Arc<dyn Logger> {
        Arc::clone(&self.logger)
    }

    /// Swap the sink, e.g. once the command line has enabled debug output.
    pub fn set_logger(&mut self, logger: Arc<dyn Logger>) {
        self.logger = logger;
    }

    pub(crate) fn log(&self, message: &str, level: LogLevel) {
        self.logger.log(message, level, false);
    }

    pub(crate) fn log_rule(&self, level: LogLevel) {
        self.logger.log_rule(level, false);
    }

    /// Meta options fall back to `default` when unset or not boolean.
    fn meta_flag(&self, key: &str, default: bool) -> bool {
        self.options
            .get(key)
            .and_then(OptionValue::as_bool)
            .unwrap_or(default)
    }

    /// Store `value` under `key` if it passes the key's validator (when one exists).
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Result<()> {
        let key = key.into();
        let value = value.into();

        if let Some(validator) = self.validators.get(&key) {
            if !validator.check(&value) {
                self.log(
                    &format!(
                        "Could not verify option {}, with value {} against validator {}!",
                        key, value, validator
                    ),
                    LogLevel::Error,
                );
                return Err(Error::ValidatorRejected {
                    key,
                    value: value.to_string(),
                    validator: validator.to_string(),
                });
            }
        }

        if !self.meta_flag(SUPPRESS_OPTION_WARNINGS, true) {
            if let Some(previous) = self.options.get(&key) {
                self.log(
                    &format!(
                        "You are overriding option {}. Replacing value {} by {}.",
                        key, previous, value
                    ),
                    LogLevel::Warning,
                );
            }
        }

        self.options.insert(key, value);
        Ok(())
    }

    /// Register `validator` for `key`, then set the value through it.
    /// A rejected registration aborts before the value is considered.
    pub fn set_with_validator(
        &mut self,
        key: impl Into<String>,
        value: impl Into<OptionValue>,
        validator: Validator,
    ) -> Result<()> {
        let key = key.into();
        let name = validator.to_string();
        if let Err(e) = self.register_validator(key.clone(), validator) {
            self.log(
                &format!(
                    "Could not set the option {} because the validator you supplied, {}, caused a problem!",
                    key, name
                ),
                LogLevel::Error,
            );
            return Err(e);
        }
        self.set(key, value)
    }

    pub fn register_validator(&mut self, key: impl Into<String>, validator: Validator) -> Result<()> {
        let key = key.into();

        if let Some(existing) = self.validators.get(&key) {
            if !self.meta_flag(ALLOW_REPLACE_VALIDATOR, false) {
                self.log(
                    &format!(
                        "A validator for {} is already in place! You tried to override {} with {}.",
                        key, existing, validator
                    ),
                    LogLevel::Error,
                );
                return Err(Error::ValidatorExists { key });
            }
            self.log(
                &format!(
                    "You are overriding the validator for {}! Overriding {} with {}.",
                    key, existing, validator
                ),
                LogLevel::Warning,
            );
        }

        self.validators.insert(key, validator);
        Ok(())
    }

    /// Apply `defaults` only where no option exists yet.
    pub fn load_defaults<I, K, V>(&mut self, defaults: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<OptionValue>,
    {
        self.load_defaults_with(defaults, Vec::<(String, Validator)>::new(), false)
    }

    /// Validators are installed first, then values. Existing entries win unless
    /// `override_by_defaults` is set. Every entry is attempted; the first
    /// failure is returned once all have been processed.
    pub fn load_defaults_with<I, K, V, J, L>(
        &mut self,
        defaults: I,
        validators: J,
        override_by_defaults: bool,
    ) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<OptionValue>,
        J: IntoIterator<Item = (L, Validator)>,
        L: Into<String>,
    {
        let keep_existing = !override_by_defaults;
        let mut first_error = None;

        for (key, validator) in validators {
            let key = key.into();
            if self.has_validator(&key) && keep_existing {
                continue;
            }
            if let Err(e) = self.register_validator(key, validator) {
                first_error.get_or_insert(e);
            }
        }

        for (key, value) in defaults {
            let key = key.into();
            if self.has_option(&key) && keep_existing {
                continue;
            }
            if let Err(e) = self.set(key, value) {
                first_error.get_or_insert(e);
            }
        }

        first_error.map_or(Ok(()), Err)
    }

    /// Stored value, or `None` plus a warning when the option was never set.
    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        let value = self.options.get(key);
        if value.is_none() {
            self.log(
                &format!(
                    "Tried to access an option ({}) which has not yet been specified!",
                    key
                ),
                LogLevel::Warning,
            );
        }
        value
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(OptionValue::as_bool)
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(OptionValue::as_f64)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(OptionValue::as_str)
    }

    pub fn has_option(&self, key: &str) -> bool {
        self.options.contains_key(key)
    }

    pub fn has_validator(&self, key: &str) -> bool {
        self.validators.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// `(key, value)` pairs ordered by key.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.options.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn validation_report(&self) -> ValidationReport {
        let mut report = ValidationReport::default();
        for (key, value) in &self.options {
            match self.validators.get(key) {
                Some(validator) if !validator.check(value) => report.invalid.push(key.clone()),
                Some(_) => {}
                None => report.without_validator.push(key.clone()),
            }
        }
        report
    }

    /// True when every option that has a validator passes it. Options
    /// without a validator are listed only if validator warnings are enabled.
    pub fn validate_all(&self) -> bool {
        let report = self.validation_report();

        if !self.meta_flag(SUPPRESS_VALIDATOR_WARNINGS, true) {
            self.log_block(
                LogLevel::Warning,
                "  The following validators are missing:  ",
                report.without_validator.iter().map(|k| format!("     {}", k)),
                "  End of missing validator list ",
            );
        }

        self.log_block(
            LogLevel::Error,
            "  The following options are invalid:  ",
            report.invalid.iter().map(|k| format!("     {}", k)),
            "  End of invalid option list ",
        );

        report.is_valid()
    }

    pub fn print_options(&self, level: LogLevel) {
        self.log_block(
            level,
            "  The following options have been supplied  ",
            self.options
                .iter()
                .map(|(k, v)| format!("    {}  ->  {}", k, v)),
            "  End of option listing  ",
        );
    }

    pub fn print_validators(&self, level: LogLevel) {
        self.log_block(
            level,
            "  The following validators have been supplied  ",
            self.validators
                .iter()
                .map(|(k, v)| format!("    {}  ->  {}", k, v)),
            "  End of validator listing  ",
        );
    }

    fn log_block<I>(&self, level: LogLevel, header: &str, lines: I, footer: &str)
    where
        I: IntoIterator<Item = String>,
    {
        self.log_rule(level);
        self.log(header, level);
        for line in lines {
            self.log(&line, level);
        }
        self.log(footer, level);
        self.log_rule(level);
    }

    /// Pretty JSON object of every option.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.options)?)
    }
}

impl Index<&str> for OptionStore {
    type Output = OptionValue;

    /// # Panics
    ///
    /// Panics if the option was never set; use [`OptionStore::get`] to avoid that.
    fn index(&self, key: &str) -> &OptionValue {
        match self.options.get(key) {
            Some(value) => value,
            None => panic!("option '{}' has not been set", key),
        }
    }
}

impl<'a> IntoIterator for &'a OptionStore {
    type Item = (&'a String, &'a OptionValue);
    type IntoIter = std::collections::btree_map::Iter<'a, String, OptionValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.options.iter()
    }
}
