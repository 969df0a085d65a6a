//! Shared value types.
//! Includes the dynamically typed `OptionValue`, the closed `ValueType`
//! converter set used by the config-file `type` column, and `ConversionError`.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A dynamically typed option value. The variant is decided at assignment time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<OptionValue>),
}

impl OptionValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            OptionValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Integral numbers only; `2.5` yields `None`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            OptionValue::Number(n) if n.fract() == 0.0 && n.is_finite() => Some(*n as i64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[OptionValue]> {
        match self {
            OptionValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Numeric list items, e.g. legend coordinates. `None` if any item is not a number.
    pub fn as_f64_list(&self) -> Option<Vec<f64>> {
        self.as_list()?.iter().map(OptionValue::as_f64).collect()
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            OptionValue::Bool(_) => "bool",
            OptionValue::Number(_) => "number",
            OptionValue::Text(_) => "text",
            OptionValue::List(_) => "list",
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(b) => write!(f, "{}", b),
            OptionValue::Number(n) => write!(f, "{}", n),
            OptionValue::Text(s) => write!(f, "{}", s),
            OptionValue::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        OptionValue::Number(value)
    }
}

impl From<i32> for OptionValue {
    fn from(value: i32) -> Self {
        OptionValue::Number(f64::from(value))
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        OptionValue::Number(value as f64)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Text(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Text(value)
    }
}

impl<T: Into<OptionValue>> From<Vec<T>> for OptionValue {
    fn from(values: Vec<T>) -> Self {
        OptionValue::List(values.into_iter().map(Into::into).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("unknown option type '{0}' (expected int, float, bool, str or list)")]
    UnknownType(String),

    #[error("cannot convert '{value}' to {target}")]
    InvalidValue { value: String, target: ValueType },
}

/// Named converters accepted in the third column of a config-file line.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ValueType {
    Int,
    Float,
    Bool,
    Text,
    List,
}

impl FromStr for ValueType {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "int" | "integer" => Ok(ValueType::Int),
            "float" | "double" | "number" => Ok(ValueType::Float),
            "bool" | "boolean" => Ok(ValueType::Bool),
            "str" | "string" | "text" => Ok(ValueType::Text),
            "list" => Ok(ValueType::List),
            other => Err(ConversionError::UnknownType(other.to_string())),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ValueType::Int => "int",
            ValueType::Float => "float",
            ValueType::Bool => "bool",
            ValueType::Text => "str",
            ValueType::List => "list",
        };
        write!(f, "{}", s)
    }
}

impl ValueType {
    /// Convert already-trimmed text into a value of this type.
    pub fn convert(self, raw: &str) -> Result<OptionValue, ConversionError> {
        let invalid = || ConversionError::InvalidValue {
            value: raw.to_string(),
            target: self,
        };

        match self {
            ValueType::Int => raw
                .parse::<i64>()
                .map(OptionValue::from)
                .map_err(|_| invalid()),
            ValueType::Float => match raw.parse::<f64>() {
                Ok(v) if v.is_finite() => Ok(OptionValue::Number(v)),
                _ => Err(invalid()),
            },
            ValueType::Bool => match raw.to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => Ok(OptionValue::Bool(true)),
                "false" | "0" | "no" | "off" => Ok(OptionValue::Bool(false)),
                _ => Err(invalid()),
            },
            ValueType::Text => Ok(OptionValue::Text(raw.to_string())),
            ValueType::List => Ok(OptionValue::List(
                raw.split(',')
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(|item| match item.parse::<f64>() {
                        Ok(n) if n.is_finite() => OptionValue::Number(n),
                        _ => OptionValue::from(item),
                    })
                    .collect(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_type_names() {
        assert_eq!("INT".parse::<ValueType>(), Ok(ValueType::Int));
        assert_eq!(" double ".parse::<ValueType>(), Ok(ValueType::Float));
        assert_eq!("Boolean".parse::<ValueType>(), Ok(ValueType::Bool));
        assert_eq!("str".parse::<ValueType>(), Ok(ValueType::Text));
        assert_eq!(
            "complex".parse::<ValueType>(),
            Err(ConversionError::UnknownType("complex".to_string()))
        );
    }

    #[test]
    fn test_convert_int_rejects_fraction() {
        assert_eq!(ValueType::Int.convert("5"), Ok(OptionValue::Number(5.0)));
        assert!(ValueType::Int.convert("5.5").is_err());
        assert!(ValueType::Float.convert("nan").is_err());
    }

    #[test]
    fn test_convert_bool_is_strict() {
        assert_eq!(ValueType::Bool.convert("Yes"), Ok(OptionValue::Bool(true)));
        assert_eq!(ValueType::Bool.convert("0"), Ok(OptionValue::Bool(false)));
        assert!(ValueType::Bool.convert("maybe").is_err());
    }

    #[test]
    fn test_convert_list() {
        assert_eq!(
            ValueType::List.convert("a, b,,c"),
            Ok(OptionValue::from(vec!["a", "b", "c"]))
        );
        assert_eq!(
            ValueType::List.convert("0.1, 0.4"),
            Ok(OptionValue::from(vec![0.1, 0.4]))
        );
    }

    #[test]
    fn test_display_and_accessors() {
        let v = OptionValue::from(vec![0.69, 0.86]);
        assert_eq!(v.to_string(), "[0.69, 0.86]");
        assert_eq!(v.as_f64_list(), Some(vec![0.69, 0.86]));
        assert_eq!(OptionValue::from(306).as_i64(), Some(306));
        assert_eq!(OptionValue::from(1.5).as_i64(), None);
    }

    #[test]
    fn test_serde_untagged() {
        let v = OptionValue::from(vec![OptionValue::Bool(true), OptionValue::from("x")]);
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, r#"[true,"x"]"#);
        let back: OptionValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
    }
}
