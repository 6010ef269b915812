//! Dotted field paths into a data record
//!
//! `user.fullName`, `signatories.0.name`. Numeric segments index into
//! sequences, everything else is a mapping key. `null` counts as absent.

use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Key(String),
    Index(usize),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(key) => f.write_str(key),
            Segment::Index(index) => write!(f, "{}", index),
        }
    }
}

/// A parsed field path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    segments: Vec<Segment>,
}

impl FieldPath {
    /// Parse a dotted path. Returns `None` for an empty path or a path with
    /// an empty segment (`"user..name"`, `".x"`).
    pub fn parse(path: &str) -> Option<Self> {
        if path.is_empty() {
            return None;
        }

        let mut segments = Vec::new();
        for raw in path.split('.') {
            if raw.is_empty() {
                return None;
            }
            // Only canonical integers index; "01" and "+1" stay keys
            let segment = match raw.parse::<usize>() {
                Ok(index) if index.to_string() == raw => Segment::Index(index),
                _ => Segment::Key(raw.to_string()),
            };
            segments.push(segment);
        }

        Some(Self { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Walk `record` along this path
    pub fn lookup<'a>(&self, record: &'a Value) -> Option<&'a Value> {
        let mut current = record;
        for segment in &self.segments {
            current = match (segment, current) {
                (Segment::Index(index), Value::Array(items)) => items.get(*index)?,
                (Segment::Key(key), Value::Object(map)) => map.get(key)?,
                _ => return None,
            };
        }

        match current {
            Value::Null => None,
            value => Some(value),
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

/// Resolve `field_path` against `record`
///
/// Total: malformed paths and type mismatches resolve to `None`.
pub fn resolve<'a>(record: &'a Value, field_path: &str) -> Option<&'a Value> {
    FieldPath::parse(field_path)?.lookup(record)
}

/// A value counts as absent when unresolved, `null` or the empty string
pub fn is_absent(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}
