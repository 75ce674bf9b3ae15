//! Recursive-descent transform over the schema graph.
//!
//! One function serves both directions. Going to internal names, a wire value (lifted into
//! [`Data`]) is validated and its timestamp strings become instants; going to the wire,
//! internal names are mapped back and instants are rendered as strings. Any mismatch aborts
//! the whole call, except inside a union, where a failing candidate just moves the search
//! on to the next one.
use indexmap::IndexMap;

use crate::data::Data;
use crate::error::{ConvertError, ConvertResult};
use crate::mapping::Direction;
use crate::report::{describe, Site, ValidationError};
use crate::schema::{Additional, Kind, ObjectSchema, Registry, SchemaNode};

#[derive(Debug, Clone, Copy)]
pub struct Engine<'r> {
    registry: &'r Registry,
}

impl<'r> Engine<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Engine { registry }
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// Validate a wire value against the named schema and map it to internal names.
    pub fn cast(&self, name: &str, value: &Data) -> ConvertResult<Data> {
        self.run(name, value, Direction::ToInternal)
    }

    /// Map an internal value back to the wire shape of the named schema.
    pub fn uncast(&self, name: &str, value: &Data) -> ConvertResult<Data> {
        self.run(name, value, Direction::ToWire)
    }

    fn run(&self, name: &str, value: &Data, direction: Direction) -> ConvertResult<Data> {
        let schema = SchemaNode::reference(name);
        let out = self.transform(Some(value), &schema, direction, Site::default())?;
        // a present input never transforms into absence
        Ok(out.unwrap_or(Data::Null))
    }

    /// `value` is `None` when the key was absent. A `None` result means the output key is
    /// left out as well.
    pub fn transform(
        &self,
        value: Option<&Data>,
        schema: &SchemaNode,
        direction: Direction,
        site: Site<'_>,
    ) -> ConvertResult<Option<Data>> {
        let mut node = schema;
        let mut name: Option<&str> = None;
        while let SchemaNode::Reference(target) = node {
            name = Some(target.as_str());
            node = self.registry.resolve(target)?;
        }

        match node {
            SchemaNode::Primitive(kind) => self.primitive(*kind, value, direction, site),
            SchemaNode::LiteralSet(values) => match value {
                Some(Data::String(s)) if values.contains(s.as_str()) => Ok(value.cloned()),
                _ => Err(invalid(describe(node), value, site)),
            },
            SchemaNode::ArrayOf(element) => {
                let Some(Data::Array(items)) = value else {
                    return Err(invalid("array", value, site));
                };
                let items = items
                    .iter()
                    // an absent element can only come from `any`; JSON spells it null
                    .map(|item| -> ConvertResult<Data> {
                        Ok(self.transform(Some(item), element, direction, site)?.unwrap_or(Data::Null))
                    })
                    .collect::<ConvertResult<Vec<_>>>()?;
                Ok(Some(Data::Array(items)))
            }
            SchemaNode::Union(candidates) => {
                for candidate in candidates {
                    match self.transform(value, candidate, direction, site) {
                        Ok(out) => return Ok(out),
                        Err(ConvertError::Validation(rejected)) => {
                            tracing::trace!(%rejected, candidate = %describe(candidate), "union candidate rejected");
                        }
                        Err(other) => return Err(other),
                    }
                }
                Err(invalid(describe(node), value, site))
            }
            SchemaNode::Object(object) => self.object(object, name, value, direction, site),
            SchemaNode::Reference(_) => unreachable!("references are resolved above"),
        }
    }

    fn primitive(
        &self,
        kind: Kind,
        value: Option<&Data>,
        direction: Direction,
        site: Site<'_>,
    ) -> ConvertResult<Option<Data>> {
        let ok = match (kind, value) {
            (Kind::Any, _) => return Ok(value.cloned()),
            (Kind::Absent, None) => return Ok(None),
            (Kind::Timestamp, _) => return self.timestamp(value, direction, site),
            (Kind::Null, Some(Data::Null)) => true,
            (Kind::String, Some(Data::String(_))) => true,
            (Kind::Number, Some(Data::Number(_))) => true,
            (Kind::Boolean, Some(Data::Bool(_))) => true,
            _ => false,
        };
        if ok {
            Ok(value.cloned())
        } else {
            Err(invalid(kind.name(), value, site))
        }
    }

    fn timestamp(&self, value: Option<&Data>, direction: Direction, site: Site<'_>) -> ConvertResult<Option<Data>> {
        let instant = match value {
            Some(Data::Null) => return Ok(Some(Data::Null)),
            Some(Data::Timestamp(t)) => Some(crate::timestamp::truncate(*t)),
            Some(Data::String(s)) => crate::timestamp::parse(s),
            // numbers would read as epoch offsets, never accept them
            _ => None,
        };
        let Some(instant) = instant else {
            return Err(invalid(Kind::Timestamp.name(), value, site));
        };
        Ok(Some(match direction {
            Direction::ToInternal => Data::Timestamp(instant),
            Direction::ToWire => Data::String(crate::timestamp::format(&instant)),
        }))
    }

    fn object(
        &self,
        object: &ObjectSchema,
        name: Option<&str>,
        value: Option<&Data>,
        direction: Direction,
        site: Site<'_>,
    ) -> ConvertResult<Option<Data>> {
        let Some(Data::Object(fields)) = value else {
            return Err(invalid(name.unwrap_or("object"), value, site));
        };
        let mapping = object.mapping(direction);
        let mut out = IndexMap::with_capacity(fields.len());

        for (source, mapped) in mapping.iter() {
            let property = object.property(mapped.index);
            let child = Site::field(source, name);
            if let Some(v) = self.transform(fields.get(source), &property.ty, direction, child)? {
                out.insert(mapped.target.clone(), v);
            }
        }

        for (key, v) in fields {
            if mapping.contains(key) {
                continue;
            }
            let child = Site::field(key, name);
            match &object.additional {
                Additional::Forbid => {
                    return Err(invalid("no property with this name", Some(v), child));
                }
                Additional::Allow(extra) => {
                    if let Some(v) = self.transform(Some(v), extra, direction, child)? {
                        out.insert(key.clone(), v);
                    }
                }
            }
        }

        Ok(Some(Data::Object(out)))
    }
}

fn invalid(expected: impl Into<String>, value: Option<&Data>, site: Site<'_>) -> ConvertError {
    ConvertError::Validation(ValidationError::new(expected, value, site))
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Property;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn validation(err: ConvertError) -> ValidationError {
        match err {
            ConvertError::Validation(v) => v,
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    fn registry() -> Registry {
        Registry::new()
            .with(
                "Event",
                SchemaNode::object(
                    vec![
                        Property::new("$type", "type", SchemaNode::reference("Kind")),
                        Property::new("datumTijd", "datum_tijd", SchemaNode::timestamp()),
                        Property::new("aangemaakt", "aangemaakt", SchemaNode::optional(SchemaNode::timestamp())),
                        Property::plain("tags", SchemaNode::array(SchemaNode::string())),
                    ],
                    Additional::Forbid,
                ),
            )
            .with("Kind", SchemaNode::literals(["a.A", "b.B"]))
            .with(
                "Open",
                SchemaNode::object(
                    vec![Property::plain("id", SchemaNode::number())],
                    Additional::Allow(Box::new(SchemaNode::any())),
                ),
            )
    }

    fn event() -> Data {
        Data::from(json!({
            "$type": "a.A",
            "datumTijd": "2024-09-01T10:00:00Z",
            "tags": ["x", "y"],
        }))
    }

    #[test]
    fn casts_names_and_timestamps() {
        let registry = registry();
        let engine = Engine::new(&registry);
        let out = engine.cast("Event", &event()).unwrap();
        assert_eq!(out.get("type"), Some(&Data::String("a.A".into())));
        assert_eq!(
            out.get("datum_tijd"),
            Some(&Data::Timestamp(Utc.with_ymd_and_hms(2024, 9, 1, 10, 0, 0).unwrap()))
        );
        assert!(out.get("aangemaakt").is_none());
        assert!(out.get("$type").is_none());
    }

    #[test]
    fn uncast_restores_wire_names() {
        let registry = registry();
        let engine = Engine::new(&registry);
        let internal = engine.cast("Event", &event()).unwrap();
        let wire = engine.uncast("Event", &internal).unwrap();
        assert_eq!(
            wire.to_json(),
            json!({"$type": "a.A", "datumTijd": "2024-09-01T10:00:00.000Z", "tags": ["x", "y"]})
        );
    }

    #[test]
    fn no_coercion_between_primitives() {
        let registry = Registry::new().with("N", SchemaNode::number());
        let engine = Engine::new(&registry);
        let err = validation(engine.cast("N", &Data::from(json!("12"))).unwrap_err());
        assert_eq!(err.expected, "number");
        assert_eq!(err.actual, "\"12\"");
    }

    #[test]
    fn numbers_are_not_timestamps() {
        let registry = Registry::new().with("T", SchemaNode::timestamp());
        let engine = Engine::new(&registry);
        assert!(engine.cast("T", &Data::from(json!(1725184800000u64))).is_err());
        assert_eq!(engine.cast("T", &Data::Null).unwrap(), Data::Null);
    }

    #[test]
    fn union_takes_first_matching_candidate() {
        let registry = Registry::new()
            .with("Either", SchemaNode::union(vec![SchemaNode::any(), SchemaNode::timestamp()]))
            .with("Other", SchemaNode::union(vec![SchemaNode::timestamp(), SchemaNode::any()]));
        let engine = Engine::new(&registry);
        let input = Data::from(json!("2024-09-01T10:00:00Z"));
        // `any` keeps the string as-is
        assert_eq!(engine.cast("Either", &input).unwrap(), input);
        assert!(matches!(engine.cast("Other", &input).unwrap(), Data::Timestamp(_)));
    }

    #[test]
    fn union_failure_lists_candidates() {
        let registry = Registry::new().with("U", SchemaNode::union(vec![SchemaNode::string(), SchemaNode::boolean()]));
        let engine = Engine::new(&registry);
        let err = validation(engine.cast("U", &Data::from(json!(3))).unwrap_err());
        assert_eq!(err.expected, "one of [string, boolean]");
    }

    #[test]
    fn union_does_not_swallow_missing_schemas() {
        let registry = Registry::new().with(
            "U",
            SchemaNode::union(vec![SchemaNode::reference("Nope"), SchemaNode::any()]),
        );
        let engine = Engine::new(&registry);
        assert!(matches!(
            engine.cast("U", &Data::Null),
            Err(ConvertError::SchemaNotFound(name)) if name == "Nope"
        ));
    }

    #[test]
    fn missing_required_key_names_the_key() {
        let registry = registry();
        let engine = Engine::new(&registry);
        let input = Data::from(json!({"$type": "a.A", "tags": []}));
        let err = validation(engine.cast("Event", &input).unwrap_err());
        assert_eq!(err.key.as_deref(), Some("datumTijd"));
        assert_eq!(err.parent.as_deref(), Some("Event"));
        assert_eq!(err.actual, "nothing");
    }

    #[test]
    fn array_elements_report_outer_key() {
        let registry = registry();
        let engine = Engine::new(&registry);
        let input = Data::from(json!({"$type": "a.A", "datumTijd": "2024-09-01", "tags": ["ok", 2]}));
        let err = validation(engine.cast("Event", &input).unwrap_err());
        assert_eq!(err.key.as_deref(), Some("tags"));
        assert_eq!(err.expected, "string");
        assert_eq!(err.actual, "2");
    }

    #[test]
    fn forbidden_extra_keys_are_rejected() {
        let registry = registry();
        let engine = Engine::new(&registry);
        let mut input = event();
        if let Data::Object(fields) = &mut input {
            fields.insert("extra".into(), Data::from(json!(42)));
        }
        let err = validation(engine.cast("Event", &input).unwrap_err());
        assert_eq!(err.key.as_deref(), Some("extra"));
    }

    #[test]
    fn allowed_extra_keys_pass_through_both_ways() {
        let registry = registry();
        let engine = Engine::new(&registry);
        let input = Data::from(json!({"id": 1, "extra": 42, "nested": {"k": [true]}}));
        let internal = engine.cast("Open", &input).unwrap();
        assert_eq!(internal, input);
        assert_eq!(engine.uncast("Open", &internal).unwrap(), input);
    }

    #[test]
    fn non_objects_are_named_by_reference() {
        let registry = registry();
        let engine = Engine::new(&registry);
        let err = validation(engine.cast("Event", &Data::from(json!([1]))).unwrap_err());
        assert_eq!(err.expected, "Event");
    }

    #[test]
    fn never_always_fails() {
        let registry = Registry::new().with("X", SchemaNode::Primitive(Kind::Never));
        let engine = Engine::new(&registry);
        assert!(engine.cast("X", &Data::Null).is_err());
    }
}
