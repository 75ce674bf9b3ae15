//! JSON-Schema-style rendering of a registry (wire names).
use serde_json::{json, Map, Value};

use super::{Additional, Kind, Registry, SchemaNode};
use crate::error::ConvertResult;

impl Registry {
    /// Render every named schema under `$defs`, with `root` as the document's `$ref`.
    pub fn to_json_schema(&self, root: &str) -> ConvertResult<Value> {
        self.resolve(root)?;
        let defs: Map<String, Value> = self
            .iter()
            .map(|(name, node)| (name.to_string(), schema_of(node)))
            .collect();
        Ok(json!({
            "$schema": "https://json-schema.org/draft/2020-12/schema",
            "$ref": def_ref(root),
            "$defs": defs,
        }))
    }
}

fn def_ref(name: &str) -> String {
    format!("#/$defs/{name}")
}

fn is_optional(node: &SchemaNode) -> bool {
    match node {
        SchemaNode::Primitive(Kind::Absent | Kind::Any) => true,
        SchemaNode::Union(candidates) => candidates.iter().any(is_optional),
        _ => false,
    }
}

fn schema_of(node: &SchemaNode) -> Value {
    match node {
        SchemaNode::Primitive(kind) => match kind {
            Kind::String => json!({ "type": "string" }),
            Kind::Number => json!({ "type": "number" }),
            Kind::Boolean => json!({ "type": "boolean" }),
            Kind::Null => json!({ "type": "null" }),
            Kind::Timestamp => json!({ "oneOf": [{ "type": "string", "format": "date-time" }, { "type": "null" }] }),
            Kind::Any | Kind::Absent => json!({}),
            Kind::Never => json!({ "not": {} }),
        },

        SchemaNode::LiteralSet(values) if values.len() == 1 => json!({ "const": values[0] }),
        SchemaNode::LiteralSet(values) => json!({ "enum": values.iter().collect::<Vec<_>>() }),

        SchemaNode::ArrayOf(element) => json!({ "type": "array", "items": schema_of(element) }),

        SchemaNode::Union(candidates) => {
            // absence is expressed through `required`, not as a union arm
            let arms: Vec<Value> = candidates
                .iter()
                .filter(|c| !matches!(c, SchemaNode::Primitive(Kind::Absent)))
                .map(schema_of)
                .collect();
            match arms.len() {
                1 => arms.into_iter().next().unwrap_or_default(),
                _ => json!({ "anyOf": arms }),
            }
        }

        SchemaNode::Object(object) => {
            let mut props = Map::new();
            let mut required = Vec::new();
            for p in &object.properties {
                props.insert(p.wire_name.clone(), schema_of(&p.ty));
                if !is_optional(&p.ty) {
                    required.push(Value::from(p.wire_name.clone()));
                }
            }
            let additional = match &object.additional {
                Additional::Forbid => Value::Bool(false),
                Additional::Allow(extra) => schema_of(extra),
            };
            let mut o = json!({
                "type": "object",
                "properties": props,
                "additionalProperties": additional,
            });
            if !required.is_empty() {
                o["required"] = Value::Array(required);
            }
            o
        }

        SchemaNode::Reference(name) => json!({ "$ref": def_ref(name) }),
    }
}

#[cfg(test)]
mod tests {
    use crate::welcome::{ROOT, WELCOME};
    use serde_json::json;

    #[test]
    fn welcome_exports_refs_enums_and_optionals() {
        let doc = WELCOME.to_json_schema(ROOT).unwrap();
        assert_eq!(doc["$ref"], "#/$defs/Welcome");
        assert_eq!(doc["$defs"]["Rel"], json!({ "const": "self" }));
        assert_eq!(doc["$defs"]["Type"]["enum"].as_array().map(Vec::len), Some(6));

        let item = &doc["$defs"]["Item"];
        assert_eq!(item["additionalProperties"], json!(false));
        assert_eq!(item["properties"]["lesgroep"], json!({ "$ref": "#/$defs/Lesgroep" }));
        let required = item["required"].as_array().unwrap();
        assert!(required.contains(&json!("datumTijd")));
        assert!(!required.contains(&json!("aangemaaktOpDatumTijd")));
    }

    #[test]
    fn unknown_root_is_an_error() {
        assert!(WELCOME.to_json_schema("Nope").is_err());
    }
}
