use serde::de::DeserializeOwned;

use crate::data::Data;
use crate::error::{ConvertError, ConvertResult};

/// Read a typed value out of validated [`Data`], with the JSON path of any mismatch.
pub fn from_data_with_path<T: DeserializeOwned>(data: Data) -> ConvertResult<T> {
    match serde_path_to_error::deserialize::<_, T>(data) {
        Ok(v) => Ok(v),
        Err(err) => {
            let path = err.path().to_string();
            Err(ConvertError::Model { path, message: err.into_inner().to_string() })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    #[allow(dead_code)]
    struct Outer {
        inner: Vec<Inner>,
    }

    #[derive(Debug, Deserialize)]
    #[allow(dead_code)]
    struct Inner {
        id: i64,
    }

    #[test]
    fn mismatch_reports_path() {
        let data = Data::from(json!({"inner": [{"id": 1}, {"id": 1.5}]}));
        match from_data_with_path::<Outer>(data) {
            Err(ConvertError::Model { path, .. }) => assert_eq!(path, "inner[1].id"),
            other => panic!("expected a model error, got {other:?}"),
        }
    }
}
