//! Internal representation of a validated value.
//!
//! `Data` is what the engine produces when it maps wire JSON to internal names. It is a
//! superset of `serde_json::Value`: timestamps are held as instants rather than strings.
//! `Data` is also a serde `Deserializer`, which is how the typed model is read out of it.
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::de::value::{Error as DeError, MapDeserializer, SeqDeserializer};
use serde::de::{self, Deserializer as _, Error as _, IntoDeserializer, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::{Number, Value};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, PartialEq)]
pub enum Data {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Timestamp(DateTime<Utc>),
    Array(Vec<Data>),
    Object(IndexMap<String, Data>),
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl Data {
    pub fn get(&self, key: &str) -> Option<&Data> {
        match self {
            Data::Object(fields) => fields.get(key),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Data::Timestamp(t) => Some(*t),
            _ => None,
        }
    }

    /// Render as wire JSON. Timestamps become their canonical string.
    pub fn to_json(&self) -> Value {
        match self {
            Data::Null => Value::Null,
            Data::Bool(b) => Value::Bool(*b),
            Data::Number(n) => Value::Number(n.clone()),
            Data::String(s) => Value::String(s.clone()),
            Data::Timestamp(t) => Value::String(crate::timestamp::format(t)),
            Data::Array(xs) => Value::Array(xs.iter().map(Data::to_json).collect()),
            Data::Object(fields) => Value::Object(
                fields.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
        }
    }
}

impl From<Value> for Data {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Data::Null,
            Value::Bool(b) => Data::Bool(b),
            Value::Number(n) => Data::Number(n),
            Value::String(s) => Data::String(s),
            Value::Array(xs) => Data::Array(xs.into_iter().map(Data::from).collect()),
            Value::Object(m) => Data::Object(m.into_iter().map(|(k, v)| (k, Data::from(v))).collect()),
        }
    }
}

impl From<&Value> for Data {
    fn from(value: &Value) -> Self {
        Data::from(value.clone())
    }
}

impl Serialize for Data {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Data::Null => serializer.serialize_unit(),
            Data::Bool(b) => serializer.serialize_bool(*b),
            Data::Number(n) => n.serialize(serializer),
            Data::String(s) => serializer.serialize_str(s),
            Data::Timestamp(t) => serializer.serialize_str(&crate::timestamp::format(t)),
            Data::Array(xs) => {
                let mut seq = serializer.serialize_seq(Some(xs.len()))?;
                for x in xs {
                    seq.serialize_element(x)?;
                }
                seq.end()
            }
            Data::Object(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (k, v) in fields {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> IntoDeserializer<'de, DeError> for Data {
    type Deserializer = Self;

    fn into_deserializer(self) -> Self {
        self
    }
}

impl<'de> de::Deserializer<'de> for Data {
    type Error = DeError;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, DeError> {
        match self {
            Data::Null => visitor.visit_unit(),
            Data::Bool(b) => visitor.visit_bool(b),
            Data::Number(n) => n.deserialize_any(visitor).map_err(DeError::custom),
            Data::String(s) => visitor.visit_string(s),
            Data::Timestamp(t) => visitor.visit_string(crate::timestamp::format(&t)),
            Data::Array(xs) => {
                let mut seq: SeqDeserializer<_, DeError> = SeqDeserializer::new(xs.into_iter());
                let value = visitor.visit_seq(&mut seq)?;
                seq.end()?;
                Ok(value)
            }
            Data::Object(fields) => {
                let mut map: MapDeserializer<'de, _, DeError> = MapDeserializer::new(fields.into_iter());
                let value = visitor.visit_map(&mut map)?;
                map.end()?;
                Ok(value)
            }
        }
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, DeError> {
        match self {
            Data::Null => visitor.visit_none(),
            other => visitor.visit_some(other),
        }
    }

    // Unit variants arrive as their literal string.
    fn deserialize_enum<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, DeError> {
        match self {
            Data::String(s) => visitor.visit_enum(s.into_deserializer()),
            other => other.deserialize_any(visitor),
        }
    }

    serde::forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct newtype_struct seq tuple
        tuple_struct map struct identifier ignored_any
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————
