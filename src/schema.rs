//! Declarative schema graph and the registry that names its nodes.
//!
//! Nodes are built once (see [`crate::welcome`]) and never mutated afterwards, apart from
//! the write-once property maps hanging off each object node.
pub mod export;

use indexmap::{IndexMap, IndexSet};
use once_cell::sync::OnceCell;

use crate::error::{ConvertError, ConvertResult};
use crate::mapping::{Direction, PropertyMap};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    String,
    Number,
    Boolean,
    Timestamp,
    Any,
    Null,
    Never,
    /// The key is missing altogether. Only meaningful as a union candidate.
    Absent,
}

#[derive(Debug, Clone)]
pub enum SchemaNode {
    Primitive(Kind),
    LiteralSet(IndexSet<String>),
    ArrayOf(Box<SchemaNode>),
    /// Candidate order is significant: first match wins.
    Union(Vec<SchemaNode>),
    Object(ObjectSchema),
    Reference(String),
}

#[derive(Debug, Clone)]
pub struct Property {
    pub wire_name: String,
    pub internal_name: String,
    pub ty: SchemaNode,
}

/// Policy for keys an object schema does not declare.
#[derive(Debug, Clone)]
pub enum Additional {
    Forbid,
    Allow(Box<SchemaNode>),
}

#[derive(Debug, Clone)]
pub struct ObjectSchema {
    pub properties: Vec<Property>,
    pub additional: Additional,
    to_internal: OnceCell<PropertyMap>,
    to_wire: OnceCell<PropertyMap>,
}

#[derive(Debug, Clone, Default)]
pub struct Registry {
    schemas: IndexMap<String, SchemaNode>,
}

/// Structural problem found by [`Registry::issues`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaIssue {
    DanglingReference { from: String, target: String },
    DuplicateWireName { schema: String, name: String },
    DuplicateInternalName { schema: String, name: String },
}

// ————————————————————————————————————————————————————————————————————————————
// CONSTRUCTORS
// ————————————————————————————————————————————————————————————————————————————

impl SchemaNode {
    pub fn string() -> Self { SchemaNode::Primitive(Kind::String) }
    pub fn number() -> Self { SchemaNode::Primitive(Kind::Number) }
    pub fn boolean() -> Self { SchemaNode::Primitive(Kind::Boolean) }
    pub fn timestamp() -> Self { SchemaNode::Primitive(Kind::Timestamp) }
    pub fn any() -> Self { SchemaNode::Primitive(Kind::Any) }

    pub fn literals<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SchemaNode::LiteralSet(values.into_iter().map(Into::into).collect())
    }

    pub fn array(element: SchemaNode) -> Self {
        SchemaNode::ArrayOf(Box::new(element))
    }

    pub fn union(candidates: Vec<SchemaNode>) -> Self {
        SchemaNode::Union(candidates)
    }

    /// `absent | inner`: the key may be left out.
    pub fn optional(inner: SchemaNode) -> Self {
        SchemaNode::Union(vec![SchemaNode::Primitive(Kind::Absent), inner])
    }

    pub fn object(properties: Vec<Property>, additional: Additional) -> Self {
        SchemaNode::Object(ObjectSchema::new(properties, additional))
    }

    pub fn reference(name: impl Into<String>) -> Self {
        SchemaNode::Reference(name.into())
    }
}

impl Property {
    pub fn new(wire_name: impl Into<String>, internal_name: impl Into<String>, ty: SchemaNode) -> Self {
        Property { wire_name: wire_name.into(), internal_name: internal_name.into(), ty }
    }

    /// Same name on both sides.
    pub fn plain(name: impl Into<String>, ty: SchemaNode) -> Self {
        let name = name.into();
        Property::new(name.clone(), name, ty)
    }
}

impl ObjectSchema {
    pub fn new(properties: Vec<Property>, additional: Additional) -> Self {
        ObjectSchema {
            properties,
            additional,
            to_internal: OnceCell::new(),
            to_wire: OnceCell::new(),
        }
    }

    /// Source-name → target map for `direction`, built on first use.
    pub fn mapping(&self, direction: Direction) -> &PropertyMap {
        let cell = match direction {
            Direction::ToInternal => &self.to_internal,
            Direction::ToWire => &self.to_wire,
        };
        cell.get_or_init(|| PropertyMap::build(&self.properties, direction))
    }

    pub fn property(&self, index: usize) -> &Property {
        &self.properties[index]
    }
}

impl Kind {
    pub fn name(self) -> &'static str {
        match self {
            Kind::String => "string",
            Kind::Number => "number",
            Kind::Boolean => "boolean",
            Kind::Timestamp => "timestamp",
            Kind::Any => "any",
            Kind::Null => "null",
            Kind::Never => "never",
            Kind::Absent => "absent",
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// REGISTRY
// ————————————————————————————————————————————————————————————————————————————

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, node: SchemaNode) -> Self {
        self.schemas.insert(name.into(), node);
        self
    }

    pub fn resolve(&self, name: &str) -> ConvertResult<&SchemaNode> {
        self.schemas
            .get(name)
            .ok_or_else(|| ConvertError::SchemaNotFound(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SchemaNode)> {
        self.schemas.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Every reference must resolve and every object must keep its names unique.
    pub fn issues(&self) -> Vec<SchemaIssue> {
        let mut out = Vec::new();
        for (name, node) in &self.schemas {
            self.collect_issues(name, node, &mut out);
        }
        out
    }

    fn collect_issues(&self, owner: &str, node: &SchemaNode, out: &mut Vec<SchemaIssue>) {
        match node {
            SchemaNode::Primitive(_) | SchemaNode::LiteralSet(_) => {}
            SchemaNode::Reference(target) => {
                if !self.schemas.contains_key(target) {
                    out.push(SchemaIssue::DanglingReference {
                        from: owner.to_string(),
                        target: target.clone(),
                    });
                }
            }
            SchemaNode::ArrayOf(element) => self.collect_issues(owner, element, out),
            SchemaNode::Union(candidates) => {
                for c in candidates {
                    self.collect_issues(owner, c, out);
                }
            }
            SchemaNode::Object(object) => {
                let mut wire = IndexSet::new();
                let mut internal = IndexSet::new();
                for p in &object.properties {
                    if !wire.insert(p.wire_name.as_str()) {
                        out.push(SchemaIssue::DuplicateWireName {
                            schema: owner.to_string(),
                            name: p.wire_name.clone(),
                        });
                    }
                    if !internal.insert(p.internal_name.as_str()) {
                        out.push(SchemaIssue::DuplicateInternalName {
                            schema: owner.to_string(),
                            name: p.internal_name.clone(),
                        });
                    }
                    self.collect_issues(owner, &p.ty, out);
                }
                if let Additional::Allow(extra) = &object.additional {
                    self.collect_issues(owner, extra, out);
                }
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_reports_missing_names() {
        let registry = Registry::new().with("A", SchemaNode::string());
        assert!(matches!(registry.resolve("A"), Ok(SchemaNode::Primitive(Kind::String))));
        match registry.resolve("B") {
            Err(ConvertError::SchemaNotFound(name)) => assert_eq!(name, "B"),
            other => panic!("expected SchemaNotFound, got {other:?}"),
        }
    }

    #[test]
    fn issues_finds_dangling_refs_and_duplicates() {
        let registry = Registry::new().with(
            "Thing",
            SchemaNode::object(
                vec![
                    Property::new("a", "x", SchemaNode::reference("Missing")),
                    Property::new("a", "y", SchemaNode::string()),
                    Property::new("b", "y", SchemaNode::string()),
                ],
                Additional::Forbid,
            ),
        );
        let issues = registry.issues();
        assert_eq!(issues.len(), 3, "{issues:?}");
        assert!(issues.contains(&SchemaIssue::DanglingReference {
            from: "Thing".into(),
            target: "Missing".into(),
        }));
        assert!(issues.contains(&SchemaIssue::DuplicateWireName { schema: "Thing".into(), name: "a".into() }));
        assert!(issues.contains(&SchemaIssue::DuplicateInternalName { schema: "Thing".into(), name: "y".into() }));
    }

    #[test]
    fn property_maps_are_built_once_per_direction() {
        let object = ObjectSchema::new(
            vec![Property::new("datumTijd", "datum_tijd", SchemaNode::timestamp())],
            Additional::Forbid,
        );
        let first = object.mapping(Direction::ToInternal);
        let again = object.mapping(Direction::ToInternal);
        assert!(std::ptr::eq(first, again));
        assert!(first.get("datumTijd").is_some());
        assert!(object.mapping(Direction::ToWire).get("datum_tijd").is_some());
        assert!(object.mapping(Direction::ToWire).get("datumTijd").is_none());
    }
}
