//! bson-schema compiles MongoDB-style `$jsonSchema` documents into in-memory
//! validator trees, then walks documents against those trees to decide
//! conformance and collect violations.
//!
//! The crate covers the schema dialect used for collection validators:
//!
//! - One validator per declared `bsonType`: `object`, `array`, `string`,
//!   `bool`, `int`, `long`, `decimal`, `double`, `objectId`, `date`, plus an
//!   enum-only form for fields with no declared type.
//! - Union fields: a `bsonType` list compiles to candidate validators tried
//!   in order, and a value passes the moment one candidate passes.
//! - A numeric coercion matrix that reconciles whatever representation the
//!   decoder produced (any integer width, either float width, numeral
//!   strings) against the declared kind, without silent precision loss.
//!   Float-to-integer narrowing is a per-validator opt-in.
//! - Enum allow-lists, normalized once at compile time into each field's
//!   canonical representation.
//! - Recursive structural validation: required fields, field counts,
//!   `additionalProperties` policies, array length bounds, unique items,
//!   and per-element object shapes, with violations accumulated under
//!   dot-joined field paths.
//! - Date bounds written as human-readable timestamps, parsed with a
//!   process-wide configurable layout (see [`set_date_layout`]).
//!
//! Compilation is deterministic and the compiled [`Schema`] holds no
//! per-call state, so one compiled schema may be shared freely across
//! threads.
//!
//! ```
//! # use bson_schema::{Schema, Value};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let schema = Schema::from_slice(br#"{
//!     "validator": { "$jsonSchema": {
//!         "bsonType": "object",
//!         "required": ["name"],
//!         "properties": {
//!             "name": { "bsonType": "string", "minLength": 1 },
//!             "age":  { "bsonType": "int", "minimum": 0 }
//!         }
//!     } }
//! }"#)?;
//!
//! let doc: Value = serde_json::from_str(r#"{"name": "ana", "age": 30}"#)?;
//! assert!(schema.validate(&doc).is_ok());
//!
//! let doc: Value = serde_json::from_str(r#"{"age": -1}"#)?;
//! let violations = schema.validate(&doc).unwrap_err();
//! assert_eq!(violations.len(), 2);
//! # Ok(())
//! # }
//! ```
//!
//! Out of scope: `$ref`, the `oneOf`/`allOf`/`anyOf` combinators, and schema
//! composition. `dependencies`, `patternProperties`, and `additionalItems`
//! are recognized but unenforced; they are reported through
//! [`Schema::unsupported`] and rejected by the `_strict` constructors.

mod coerce;
mod date_layout;
mod error;
mod integer;
mod node;
mod schema;
mod types;
mod value;

pub mod validator;

pub use self::coerce::{to_f32, to_f64, to_i32, to_i64};
pub use self::date_layout::{date_layout, set_date_layout, DEFAULT_DATE_LAYOUT};
pub use self::error::{CoerceError, CompileError, Violation};
pub use self::integer::Integer;
pub use self::schema::Schema;
pub use self::types::ObjectId;
pub use self::value::Value;
