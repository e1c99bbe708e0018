//! Record filters.
//!
//! A [`ValueFilter`] extracts one field from a record's JSON form and
//! compares it as text. Paths are dotted (`tags.0.key`); `tag:<name>` reads
//! the value of the tag with that key.
//!
//! ## Syntax
//!
//! | Expression      | Meaning                          |
//! |-----------------|----------------------------------|
//! | `field=v`       | equals `v`                       |
//! | `field!=v`      | differs from `v` (or is absent)  |
//! | `field=a\|b`    | one of `a`, `b`                  |
//! | `field!=a\|b`   | none of `a`, `b`                 |
//! | `field?`        | present                          |
//! | `!field`        | absent                           |

use std::str::FromStr;

use serde_json::Value;

use crate::core::domain::KeyRecord;
use crate::error::{ConfigError, Error, Result};

const TAG_PREFIX: &str = "tag:";

/// Comparison a value filter applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Eq,
    Ne,
    In,
    NotIn,
    Present,
    Absent,
}

/// Field comparison against configured values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueFilter {
    key: String,
    op: Op,
    values: Vec<String>,
}

impl ValueFilter {
    pub fn new(key: impl Into<String>, op: Op, values: Vec<String>) -> Self {
        Self {
            key: key.into(),
            op,
            values,
        }
    }

    pub fn eq(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(key, Op::Eq, vec![value.into()])
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn op(&self) -> Op {
        self.op
    }

    /// Whether `record` satisfies this filter.
    pub fn matches(&self, record: &KeyRecord) -> bool {
        match serde_json::to_value(record) {
            Ok(doc) => self.matches_value(&doc),
            Err(_) => false,
        }
    }

    /// Whether the JSON document `doc` satisfies this filter.
    pub fn matches_value(&self, doc: &Value) -> bool {
        let found = extract(doc, &self.key).and_then(as_text);
        match (self.op, found) {
            (Op::Present, found) => found.is_some(),
            (Op::Absent, found) => found.is_none(),
            (Op::Eq | Op::In, Some(text)) => self.values.iter().any(|v| *v == text),
            (Op::Eq | Op::In, None) => false,
            (Op::Ne | Op::NotIn, Some(text)) => self.values.iter().all(|v| *v != text),
            (Op::Ne | Op::NotIn, None) => true,
        }
    }
}

fn extract<'a>(doc: &'a Value, path: &str) -> Option<&'a Value> {
    if let Some(tag_key) = path.strip_prefix(TAG_PREFIX) {
        return doc
            .get("tags")?
            .as_array()?
            .iter()
            .find(|tag| tag.get("key").and_then(Value::as_str) == Some(tag_key))?
            .get("value");
    }

    path.split('.').try_fold(doc, |node, segment| match node {
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => node.get(segment),
    })
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

impl FromStr for ValueFilter {
    type Err = Error;

    fn from_str(expr: &str) -> Result<Self> {
        let invalid = |reason: &str| -> Error {
            ConfigError::InvalidValue {
                field: "filter",
                reason: format!("'{}': {}", expr, reason),
            }
            .into()
        };

        let expr = expr.trim();
        if let Some(key) = expr.strip_prefix('!') {
            if key.is_empty() || key.contains('=') {
                return Err(invalid("expected !field"));
            }
            return Ok(Self::new(key, Op::Absent, Vec::new()));
        }
        if let Some(key) = expr.strip_suffix('?') {
            if key.is_empty() || key.contains('=') {
                return Err(invalid("expected field?"));
            }
            return Ok(Self::new(key, Op::Present, Vec::new()));
        }

        let (key, negated, raw) = if let Some((key, raw)) = expr.split_once("!=") {
            (key, true, raw)
        } else if let Some((key, raw)) = expr.split_once('=') {
            (key, false, raw)
        } else {
            return Err(invalid("expected field=value"));
        };

        let key = key.trim();
        if key.is_empty() {
            return Err(invalid("empty field name"));
        }
        let values: Vec<String> = raw.split('|').map(|v| v.trim().to_string()).collect();
        let op = match (negated, values.len() > 1) {
            (false, false) => Op::Eq,
            (false, true) => Op::In,
            (true, false) => Op::Ne,
            (true, true) => Op::NotIn,
        };
        Ok(Self::new(key, op, values))
    }
}

/// A filter applied to enumerated keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    Value(ValueFilter),
    /// Declared for policies that select keys by state; evaluates exactly
    /// like [`Filter::Value`].
    AllKeysDisable(ValueFilter),
}

impl Filter {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Value(_) => "value",
            Self::AllKeysDisable(_) => "all_keys_disable",
        }
    }

    pub fn matches(&self, record: &KeyRecord) -> bool {
        match self {
            Self::Value(filter) | Self::AllKeysDisable(filter) => filter.matches(record),
        }
    }
}

/// Keep the records every filter accepts.
pub fn apply(filters: &[Filter], records: Vec<KeyRecord>) -> Vec<KeyRecord> {
    records
        .into_iter()
        .filter(|record| filters.iter().all(|f| f.matches(record)))
        .collect()
}
