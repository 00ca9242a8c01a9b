//! Flag definitions shared by command handlers.
//!
//! A command declares the switches it accepts as a table of
//! [`FlagDefinition`]s; the parser in `term-core` turns a token sequence
//! into [`ParsedFlags`] keyed by each definition's canonical name.

use std::collections::BTreeMap;
use thiserror::Error;

/// One accepted switch of a command, e.g. `-w` / `--weight`.
#[derive(Debug, Clone, Copy)]
pub struct FlagDefinition {
    /// Canonical name used as the key in [`ParsedFlags`]
    pub key: &'static str,
    pub short: &'static str,
    pub long: &'static str,
    pub required: bool,
    /// Converts the raw token; the error names the expected shape
    pub parse: fn(&str) -> Result<FlagValue, String>,
}

impl FlagDefinition {
    pub fn matches(&self, token: &str) -> bool {
        token == self.short || token == self.long
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FlagValue {
    Number(f64),
    Integer(u64),
}

impl FlagValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FlagValue::Number(n) => Some(*n),
            FlagValue::Integer(n) => Some(*n as f64),
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            FlagValue::Integer(n) => Some(*n),
            _ => None,
        }
    }
}

/// Parse a non-negative, finite decimal number.
pub fn parse_number(raw: &str) -> Result<FlagValue, String> {
    match raw.parse::<f64>() {
        Ok(n) if n.is_finite() && n >= 0.0 => Ok(FlagValue::Number(n)),
        _ => Err("expected a number".to_string()),
    }
}

/// Largest count `parse_count` accepts. Products of two counts fit in `u64`.
pub const MAX_COUNT: u64 = u32::MAX as u64;

/// Parse a whole count such as sets or reps, at most [`MAX_COUNT`].
pub fn parse_count(raw: &str) -> Result<FlagValue, String> {
    match raw.parse::<u64>() {
        Ok(n) if n <= MAX_COUNT => Ok(FlagValue::Integer(n)),
        Ok(_) => Err(format!("expected a whole number up to {}", MAX_COUNT)),
        Err(_) => Err("expected a whole number".to_string()),
    }
}

/// Result of a successful parse, keyed by canonical flag name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedFlags {
    values: BTreeMap<&'static str, FlagValue>,
}

impl ParsedFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &'static str, value: FlagValue) {
        self.values.insert(key, value);
    }

    pub fn get(&self, key: &str) -> Option<&FlagValue> {
        self.values.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(FlagValue::as_f64)
    }

    pub fn count(&self, key: &str) -> Option<u64> {
        self.get(key).and_then(FlagValue::as_u64)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlagError {
    #[error("Missing value for {flag}")]
    MissingValue { flag: String },

    #[error("Invalid value for {flag}: {value} ({reason})")]
    InvalidValue {
        flag: String,
        value: String,
        reason: String,
    },

    #[error("Missing required flag: {short} {long}")]
    MissingRequired {
        short: &'static str,
        long: &'static str,
    },
}
