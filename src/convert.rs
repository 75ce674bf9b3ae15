//! Public entry points: wire JSON text ⇄ validated values.
//!
//! ```text
//! parse:      text ─serde_json─▶ Data (wire) ─cast─▶ Data (internal) ─serde─▶ Welcome
//! serialize:  Welcome ─serde─▶ Data (internal) ─uncast─▶ Data (wire) ─serde_json─▶ text
//! ```
use crate::data::Data;
use crate::error::{ConvertError, ConvertResult};
use crate::model::Welcome;
use crate::transform::Engine;
use crate::welcome::{ROOT, WELCOME};

/// Parse and validate a `Welcome` document.
pub fn parse(text: &str) -> ConvertResult<Welcome> {
    let internal = parse_data(text)?;
    crate::path_de::from_data_with_path(internal)
}

/// Render a `Welcome` back to wire JSON (two-space indented).
pub fn serialize(value: &Welcome) -> ConvertResult<String> {
    let internal = Data::from(serde_json::to_value(value).map_err(ConvertError::Encode)?);
    serialize_data(&internal)
}

/// Like [`parse`], but stops at the internal [`Data`] tree.
pub fn parse_data(text: &str) -> ConvertResult<Data> {
    let wire: serde_json::Value = serde_json::from_str(text).map_err(ConvertError::MalformedInput)?;
    tracing::debug!(bytes = text.len(), "validating {ROOT} document");
    Engine::new(&WELCOME).cast(ROOT, &Data::from(wire))
}

/// Like [`serialize`], but starts from an internal [`Data`] tree.
pub fn serialize_data(value: &Data) -> ConvertResult<String> {
    let wire = Engine::new(&WELCOME).uncast(ROOT, value)?;
    serde_json::to_string_pretty(&wire).map_err(ConvertError::Encode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntax_errors_are_not_validation_errors() {
        assert!(matches!(parse("{\"items\": ["), Err(ConvertError::MalformedInput(_))));
        assert!(matches!(parse("{\"items\": 3}"), Err(ConvertError::Validation(_))));
    }

    #[test]
    fn empty_document_round_trips() {
        let welcome = parse(r#"{"items": []}"#).unwrap();
        assert!(welcome.items.is_empty());
        assert_eq!(serialize(&welcome).unwrap(), "{\n  \"items\": []\n}");
    }
}
