//! Type format checks and coercion
//!
//! Each [`ParamType`] maps to a pair of an optional format pattern, matched
//! against the value's string form, and a coercion function. The table is
//! built on first use and only read afterwards.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Number, Value};

use super::error::{ValidationError, ValidationResult};
use super::types::ParamType;

const TRUE_LITERALS: &[&str] = &["1", "true", "TRUE", "T", "Y"];
const FALSE_LITERALS: &[&str] = &["0", "false", "FALSE", "F", "N"];

type Coercion = fn(&str, &Value) -> ValidationResult<Value>;

struct TypeHandler {
    format: Option<Regex>,
    coerce: Coercion,
}

struct FormatTable {
    handlers: HashMap<ParamType, TypeHandler>,
    integer_prefix: Regex,
    float_prefix: Regex,
}

static FORMAT_TABLE: OnceLock<FormatTable> = OnceLock::new();

fn table() -> &'static FormatTable {
    FORMAT_TABLE.get_or_init(FormatTable::build)
}

fn pattern(source: &str) -> Regex {
    Regex::new(source).expect("built-in format pattern must compile")
}

impl FormatTable {
    fn build() -> Self {
        let number = r"^[-+]?(\d+(\.\d+)?|\.\d+)([eE][-+]?\d+)?$";
        let boolean = format!(
            "^({})$",
            TRUE_LITERALS
                .iter()
                .chain(FALSE_LITERALS)
                .copied()
                .collect::<Vec<_>>()
                .join("|")
        );

        let entries: [(ParamType, Option<Regex>, Coercion); 9] = [
            (ParamType::Integer, Some(pattern(r"^[-+]?\d+$")), coerce_integer),
            (ParamType::Float, Some(pattern(number)), coerce_float),
            (ParamType::Decimal, Some(pattern(number)), coerce_float),
            (ParamType::Datetime, Some(pattern(r"^[-\d:T\s]+$")), pass_through),
            (ParamType::Boolean, Some(pattern(&boolean)), coerce_boolean),
            (ParamType::String, None, coerce_string),
            (ParamType::Array, None, coerce_array),
            (ParamType::Binary, None, pass_through),
            (ParamType::File, None, pass_through),
        ];

        Self {
            handlers: entries
                .into_iter()
                .map(|(param_type, format, coerce)| (param_type, TypeHandler { format, coerce }))
                .collect(),
            integer_prefix: pattern(r"^\s*[-+]?\d+"),
            float_prefix: pattern(r"^\s*[-+]?(\d+(\.\d*)?|\.\d+)([eE][-+]?\d+)?"),
        }
    }
}

/// String form of a value, as used by format checks and messages
pub fn string_form(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Check the value's string form against the declared type's format
pub fn check_format(name: &str, value: &Value, expected: ParamType) -> ValidationResult<()> {
    let handler = match table().handlers.get(&expected) {
        Some(handler) => handler,
        None => return Ok(()),
    };

    match &handler.format {
        Some(format) if !format.is_match(&string_form(value)) => {
            Err(ValidationError::InvalidParamType {
                name: name.to_string(),
                value: string_form(value),
                expected,
            })
        }
        _ => Ok(()),
    }
}

/// Convert a raw value into its declared type
pub fn coerce(name: &str, value: &Value, param_type: ParamType) -> ValidationResult<Value> {
    match table().handlers.get(&param_type) {
        Some(handler) => (handler.coerce)(name, value),
        None => Ok(value.clone()),
    }
}

/// Numeric interpretation used by lower-bound checks
pub fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => leading_float(s),
        _ => None,
    }
}

/// Membership test for value sets; numbers compare by magnitude
pub fn is_member(allowed: &[Value], value: &Value) -> bool {
    allowed.iter().any(|candidate| match (candidate, value) {
        (Value::Number(a), Value::Number(b)) => match (a.as_f64(), b.as_f64()) {
            (Some(a), Some(b)) => a == b,
            _ => a == b,
        },
        _ => candidate == value,
    })
}

fn leading_float(raw: &str) -> Option<f64> {
    table()
        .float_prefix
        .find(raw)
        .and_then(|m| m.as_str().trim().parse::<f64>().ok())
}

fn coerce_integer(name: &str, value: &Value) -> ValidationResult<Value> {
    match value {
        Value::Number(n) if n.is_i64() || n.is_u64() => Ok(value.clone()),
        Value::Number(n) => {
            let truncated = n.as_f64().map(f64::trunc).unwrap_or_default();
            if truncated.is_finite() && truncated >= i64::MIN as f64 && truncated <= i64::MAX as f64 {
                Ok(Value::from(truncated as i64))
            } else {
                Err(ValidationError::invalid_value(
                    name,
                    string_form(value),
                    "out of integer range",
                ))
            }
        }
        Value::String(s) => match table().integer_prefix.find(s) {
            Some(m) => m
                .as_str()
                .trim()
                .parse::<i64>()
                .map(Value::from)
                .map_err(|_| ValidationError::invalid_value(name, s.as_str(), "out of integer range")),
            None => Ok(Value::from(0)),
        },
        other => Err(ValidationError::invalid_value(
            name,
            string_form(other),
            "cannot be converted to an integer",
        )),
    }
}

fn coerce_float(name: &str, value: &Value) -> ValidationResult<Value> {
    let parsed = match value {
        Value::Number(n) if n.is_f64() => return Ok(value.clone()),
        Value::Number(n) => n.as_f64().unwrap_or_default(),
        Value::String(s) => leading_float(s).unwrap_or_default(),
        other => {
            return Err(ValidationError::invalid_value(
                name,
                string_form(other),
                "cannot be converted to a float",
            ))
        }
    };

    Number::from_f64(parsed)
        .map(Value::Number)
        .ok_or_else(|| ValidationError::invalid_value(name, string_form(value), "not a finite number"))
}

fn coerce_string(_name: &str, value: &Value) -> ValidationResult<Value> {
    Ok(Value::String(string_form(value)))
}

fn coerce_boolean(name: &str, value: &Value) -> ValidationResult<Value> {
    if let Value::Bool(_) = value {
        return Ok(value.clone());
    }

    let raw = string_form(value);
    if TRUE_LITERALS.contains(&raw.as_str()) {
        Ok(Value::Bool(true))
    } else if FALSE_LITERALS.contains(&raw.as_str()) {
        Ok(Value::Bool(false))
    } else {
        Err(ValidationError::invalid_value(
            name,
            raw,
            "could not typecast boolean to appropriate value",
        ))
    }
}

fn coerce_array(_name: &str, value: &Value) -> ValidationResult<Value> {
    match value {
        Value::String(s) => {
            let mut items: Vec<&str> = s.split(',').collect();
            // trailing empty segments are dropped ("a,b," has two items)
            while items.last().is_some_and(|item| item.is_empty()) {
                items.pop();
            }
            Ok(Value::Array(
                items.into_iter().map(|item| Value::String(item.to_string())).collect(),
            ))
        }
        other => Ok(other.clone()),
    }
}

fn pass_through(_name: &str, value: &Value) -> ValidationResult<Value> {
    Ok(value.clone())
}
