//! Named validator predicates and a small set of stock constructors.
use std::fmt;

use crate::types::OptionValue;

type Check = Box<dyn Fn(&OptionValue) -> bool + Send + Sync>;

/// A predicate gating acceptance of a proposed option value.
/// Validators only look at the value; they never touch the store.
pub struct Validator {
    name: String,
    check: Check,
}

impl Validator {
    pub fn new<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&OptionValue) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            check: Box::new(check),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn check(&self, value: &OptionValue) -> bool {
        (self.check)(value)
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator").field("name", &self.name).finish()
    }
}

impl fmt::Display for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

pub fn is_bool() -> Validator {
    Validator::new("is_bool", |v| matches!(v, OptionValue::Bool(_)))
}

pub fn is_number() -> Validator {
    Validator::new("is_number", |v| matches!(v, OptionValue::Number(_)))
}

pub fn is_integer() -> Validator {
    Validator::new("is_integer", |v| v.as_i64().is_some())
}

pub fn is_text() -> Validator {
    Validator::new("is_text", |v| matches!(v, OptionValue::Text(_)))
}

pub fn is_list() -> Validator {
    Validator::new("is_list", |v| matches!(v, OptionValue::List(_)))
}

/// Number within `[lo, hi]`.
pub fn in_range(lo: f64, hi: f64) -> Validator {
    Validator::new(format!("in_range({}, {})", lo, hi), move |v| {
        v.as_f64().is_some_and(|n| n >= lo && n <= hi)
    })
}

/// Text equal to one of `choices`, compared case-insensitively.
pub fn one_of(choices: &[&str]) -> Validator {
    let choices: Vec<String> = choices.iter().map(|c| c.to_ascii_lowercase()).collect();
    Validator::new(format!("one_of({})", choices.join("|")), move |v| {
        v.as_str()
            .is_some_and(|s| choices.iter().any(|c| c.eq_ignore_ascii_case(s)))
    })
}

/// List of exactly `len` numbers.
pub fn list_of_len(len: usize) -> Validator {
    Validator::new(format!("list_of_len({})", len), move |v| {
        v.as_f64_list().is_some_and(|items| items.len() == len)
    })
}
