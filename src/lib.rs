//! Schema-driven validation of Somtoday homework JSON, and its conversion to iCalendar.
//!
//! The core is a small interpreter over a declarative schema graph ([`schema`]): it checks
//! an untyped JSON value against the expected shape and renames it to internal names
//! ([`transform`]), and maps the internal form back to the wire shape. [`convert`] wraps it
//! for the bundled `Welcome` document.
pub mod convert;
pub mod data;
pub mod error;
pub mod homework;
pub mod ics;
pub mod mapping;
pub mod model;
pub mod path_de;
pub mod report;
pub mod schema;
pub mod timestamp;
pub mod transform;
pub mod welcome;

pub use convert::{parse, parse_data, serialize, serialize_data};
pub use data::Data;
pub use error::{ConvertError, ConvertResult, ValidationError};
pub use model::Welcome;
pub use transform::Engine;
