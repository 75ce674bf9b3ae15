//! Human-readable failure descriptions.
use std::fmt;

use crate::data::Data;
use crate::schema::{Kind, SchemaNode};

/// Where in the value graph a check happened: the key being read and the named schema
/// that owns it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Site<'a> {
    pub key: Option<&'a str>,
    pub parent: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub expected: String,
    /// JSON rendering of the offending value, or `nothing` when the key was absent.
    pub actual: String,
    pub key: Option<String>,
    pub parent: Option<String>,
}

impl ValidationError {
    pub fn new(expected: impl Into<String>, value: Option<&Data>, site: Site<'_>) -> Self {
        ValidationError {
            expected: expected.into(),
            actual: render(value),
            key: site.key.map(str::to_string),
            parent: site.parent.map(str::to_string),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Invalid value")?;
        if let Some(key) = &self.key {
            write!(f, " for key {key:?}")?;
        }
        if let Some(parent) = &self.parent {
            write!(f, " on {parent}")?;
        }
        write!(f, ". Expected {} but got {}", self.expected, self.actual)
    }
}

impl std::error::Error for ValidationError {}

impl<'a> Site<'a> {
    pub fn root(parent: &'a str) -> Self {
        Site { key: None, parent: Some(parent) }
    }

    pub fn field(key: &'a str, parent: Option<&'a str>) -> Self {
        Site { key: Some(key), parent }
    }
}

/// Describe the shape a schema node expects.
pub fn describe(node: &SchemaNode) -> String {
    match node {
        SchemaNode::Primitive(kind) => kind.name().to_string(),
        SchemaNode::LiteralSet(values) if values.len() == 1 => values[0].clone(),
        SchemaNode::LiteralSet(values) => {
            format!("one of [{}]", values.iter().map(String::as_str).collect::<Vec<_>>().join(", "))
        }
        SchemaNode::ArrayOf(element) => format!("an array of {}", describe(element)),
        SchemaNode::Union(candidates) => match candidates.as_slice() {
            [SchemaNode::Primitive(Kind::Absent), inner] => format!("an optional {}", describe(inner)),
            _ => format!("one of [{}]", candidates.iter().map(describe).collect::<Vec<_>>().join(", ")),
        },
        SchemaNode::Object(_) => "object".to_string(),
        SchemaNode::Reference(name) => name.clone(),
    }
}

pub fn render(value: Option<&Data>) -> String {
    match value {
        None => "nothing".to_string(),
        Some(v) => v.to_json().to_string(),
    }
}
