//! Loosely-typed operation parameters.
//!
//! Form fields arrive as strings. [`coerce_params`] turns them into a
//! [`Params`] bag of integers, floats, or raw text; each operation then reads
//! the names it understands with [`Params::int_or`] / [`Params::float_or`]
//! and ignores everything else.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ops::OperationError;

/// Form keys that select the operation and never become parameters.
pub const SELECTION_KEYS: [&str; 2] = ["category", "operation"];

/// A single coerced parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl ParamValue {
    /// Coerce a raw string: integer first, then float, then the text itself.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if let Ok(v) = trimmed.parse::<i64>() {
            return ParamValue::Int(v);
        }
        if let Ok(v) = trimmed.parse::<f64>() {
            return ParamValue::Float(v);
        }
        ParamValue::Text(raw.to_string())
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(v) => write!(f, "{v}"),
            ParamValue::Float(v) => write!(f, "{v}"),
            ParamValue::Text(v) => f.write_str(v),
        }
    }
}

/// Parameter mapping handed to an operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params(BTreeMap<String, ParamValue>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: ParamValue) {
        self.0.insert(name.into(), value);
    }

    /// Builder-style insert, handy when assembling parameters in code.
    pub fn with(mut self, name: impl Into<String>, value: ParamValue) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Read an integer parameter, falling back to `default` when absent.
    ///
    /// Floats truncate toward zero. Text is a computation error.
    pub fn int_or(&self, name: &str, default: i64) -> Result<i64, OperationError> {
        match self.get(name) {
            None => Ok(default),
            Some(ParamValue::Int(v)) => Ok(*v),
            Some(ParamValue::Float(v)) if v.is_finite() => Ok(v.trunc() as i64),
            Some(other) => Err(OperationError::InvalidInteger {
                name: name.to_string(),
                value: other.to_string(),
            }),
        }
    }

    /// Read a float parameter, falling back to `default` when absent.
    pub fn float_or(&self, name: &str, default: f64) -> Result<f64, OperationError> {
        match self.get(name) {
            None => Ok(default),
            Some(ParamValue::Int(v)) => Ok(*v as f64),
            Some(ParamValue::Float(v)) => Ok(*v),
            Some(ParamValue::Text(v)) => Err(OperationError::InvalidFloat {
                name: name.to_string(),
                value: v.clone(),
            }),
        }
    }
}

impl FromIterator<(String, ParamValue)> for Params {
    fn from_iter<I: IntoIterator<Item = (String, ParamValue)>>(iter: I) -> Self {
        Params(iter.into_iter().collect())
    }
}

/// Coerce raw form fields into typed parameters.
///
/// Selection keys and empty values are dropped. A repeated key keeps its
/// first value, so an empty first value drops the key altogether.
pub fn coerce_params<I, K, V>(fields: I) -> Params
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut seen = BTreeSet::new();
    let mut params = Params::new();
    for (key, value) in fields {
        let (key, value) = (key.as_ref(), value.as_ref());
        if SELECTION_KEYS.contains(&key) || !seen.insert(key.to_string()) || value.is_empty() {
            continue;
        }
        params.insert(key, ParamValue::parse(value));
    }
    params
}
