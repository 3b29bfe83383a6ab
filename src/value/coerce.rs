//! Type coercion for the typed property getters.
//!
//! # Rules
//! - bool: native booleans as-is; strings are true only for a truthy token
//!   (case-insensitive), everything else is false
//! - int: native integers, or strings that parse as `i64` after trimming
//! - string: any scalar, stringified
//! - list / map: only values already of that shape

use super::{Value, ValueMap};

/// Case-insensitive set of strings that `get_bool` treats as true.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruthyTokens(Vec<String>);

impl TruthyTokens {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            tokens
                .into_iter()
                .map(|t| t.as_ref().trim().to_lowercase())
                .collect(),
        )
    }

    pub fn contains(&self, candidate: &str) -> bool {
        let candidate = candidate.trim().to_lowercase();
        self.0.iter().any(|t| *t == candidate)
    }
}

impl Default for TruthyTokens {
    fn default() -> Self {
        Self::new(["true"])
    }
}

pub fn as_bool(value: &Value, truthy: &TruthyTokens) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Str(s) => truthy.contains(s),
        _ => false,
    }
}

pub fn as_int(value: &Value) -> Option<i64> {
    match value {
        Value::Int(i) => Some(*i),
        Value::Str(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub fn as_string(value: &Value) -> Option<String> {
    match value {
        Value::Bool(b) => Some(b.to_string()),
        Value::Int(i) => Some(i.to_string()),
        Value::Str(s) => Some(s.clone()),
        Value::List(_) | Value::Map(_) => None,
    }
}

pub fn as_list(value: &Value) -> Option<Vec<Value>> {
    value.as_list().map(<[Value]>::to_vec)
}

pub fn as_map(value: &Value) -> Option<ValueMap> {
    value.as_map().cloned()
}
