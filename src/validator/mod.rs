//! The per-kind validators a schema compiles into.
//!
//! This submodule contains one validator per recognized `bsonType`, which
//! are collected into the [`Validator`] enum for use in a compiled
//! [`Schema`][crate::Schema]. Each struct doubles as a builder, so a
//! validator tree can also be assembled directly without going through a raw
//! schema:
//!
//! ```
//! # use bson_schema::validator::*;
//! let street = ObjectValidator::new()
//!     .req_add("name", StrValidator::new().min_length(1).build())
//!     .req_add("number", Int32Validator::new().minimum(1).build())
//!     .build();
//! ```
//!
//! There is a validator for each document kind:
//! - [`BoolValidator`] - for booleans (`bsonType: "bool"`).
//! - [`Int32Validator`] - for 32-bit integers (`"int"`).
//! - [`Int64Validator`] - for 64-bit integers (`"long"`).
//! - [`Float32Validator`] - for 32-bit floats (`"decimal"`).
//! - [`Float64Validator`] - for 64-bit floats (`"double"`).
//! - [`StrValidator`] - for UTF-8 strings (`"string"`).
//! - [`ObjectIdValidator`] - for 12-byte identifiers (`"objectId"`).
//! - [`DateValidator`] - for Unix-second timestamps (`"date"`).
//! - [`GenericValidator`] - for fields constrained only by an `enum` list.
//! - [`ArrayValidator`] - for sequences of documents (`"array"`).
//! - [`ObjectValidator`] - for nested documents (`"object"`).
//!
//! A field declaring a list of types compiles into a [`MultiValidator`],
//! which passes a value the moment any one candidate passes.

mod array;
mod bool;
mod date;
mod enum_set;
mod float32;
mod float64;
mod generic;
mod int32;
mod int64;
mod multi;
mod object;
mod object_id;
mod string;

pub use self::array::*;
pub use self::bool::*;
pub use self::date::*;
pub use self::enum_set::*;
pub use self::float32::*;
pub use self::float64::*;
pub use self::generic::*;
pub use self::int32::*;
pub use self::int64::*;
pub use self::multi::*;
pub use self::object::*;
pub use self::object_id::*;
pub use self::string::*;

use crate::error::{CompileError, Result, Violation};
use crate::node::SchemaNode;
use crate::value::Value;

/// The closed set of value kinds a schema field may declare.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Kind {
    Object,
    Array,
    String,
    Bool,
    Int32,
    Int64,
    Float32,
    Float64,
    ObjectId,
    Date,
    Generic,
}

impl Kind {
    /// Map a `bsonType` name to its kind. Returns `None` for names this
    /// crate does not implement (`timestamp`, `regex`, `binData`, ...).
    pub fn from_name(name: &str) -> Option<Kind> {
        match name {
            "object" => Some(Kind::Object),
            "array" => Some(Kind::Array),
            "string" => Some(Kind::String),
            "bool" => Some(Kind::Bool),
            "int" => Some(Kind::Int32),
            "long" => Some(Kind::Int64),
            "decimal" => Some(Kind::Float32),
            "double" => Some(Kind::Float64),
            "objectId" => Some(Kind::ObjectId),
            "date" => Some(Kind::Date),
            "generic" => Some(Kind::Generic),
            _ => None,
        }
    }

    /// The `bsonType` name for this kind.
    pub fn name(&self) -> &'static str {
        match self {
            Kind::Object => "object",
            Kind::Array => "array",
            Kind::String => "string",
            Kind::Bool => "bool",
            Kind::Int32 => "int",
            Kind::Int64 => "long",
            Kind::Float32 => "decimal",
            Kind::Float64 => "double",
            Kind::ObjectId => "objectId",
            Kind::Date => "date",
            Kind::Generic => "generic",
        }
    }
}

/// A compiled validator for one declared kind.
///
/// This enum contains all possible validators. See the
/// [module-level documentation][crate::validator] for details.
#[derive(Clone, Debug, PartialEq)]
pub enum Validator {
    /// [`BoolValidator`] - for booleans.
    Bool(Box<BoolValidator>),
    /// [`Int32Validator`] - for 32-bit integers.
    Int32(Box<Int32Validator>),
    /// [`Int64Validator`] - for 64-bit integers.
    Int64(Box<Int64Validator>),
    /// [`Float32Validator`] - for 32-bit floats.
    Float32(Box<Float32Validator>),
    /// [`Float64Validator`] - for 64-bit floats.
    Float64(Box<Float64Validator>),
    /// [`StrValidator`] - for UTF-8 strings.
    Str(Box<StrValidator>),
    /// [`ObjectIdValidator`] - for 12-byte identifiers.
    ObjectId(Box<ObjectIdValidator>),
    /// [`DateValidator`] - for Unix-second timestamps.
    Date(Box<DateValidator>),
    /// [`GenericValidator`] - for enum-only fields.
    Generic(Box<GenericValidator>),
    /// [`ArrayValidator`] - for sequences.
    Array(Box<ArrayValidator>),
    /// [`ObjectValidator`] - for nested documents.
    Object(Box<ObjectValidator>),
}

impl Validator {
    /// The kind this validator checks for.
    pub fn kind(&self) -> Kind {
        match self {
            Validator::Bool(_) => Kind::Bool,
            Validator::Int32(_) => Kind::Int32,
            Validator::Int64(_) => Kind::Int64,
            Validator::Float32(_) => Kind::Float32,
            Validator::Float64(_) => Kind::Float64,
            Validator::Str(_) => Kind::String,
            Validator::ObjectId(_) => Kind::ObjectId,
            Validator::Date(_) => Kind::Date,
            Validator::Generic(_) => Kind::Generic,
            Validator::Array(_) => Kind::Array,
            Validator::Object(_) => Kind::Object,
        }
    }

    pub(crate) fn verify(&self, path: &str, value: &Value, violations: &mut Vec<Violation>) {
        match self {
            Validator::Bool(validator) => {
                if let Err(msg) = validator.verify(value) {
                    violations.push(Violation::new(path, msg));
                }
            }
            Validator::Int32(validator) => {
                if let Err(msg) = validator.verify(value) {
                    violations.push(Violation::new(path, msg));
                }
            }
            Validator::Int64(validator) => {
                if let Err(msg) = validator.verify(value) {
                    violations.push(Violation::new(path, msg));
                }
            }
            Validator::Float32(validator) => {
                if let Err(msg) = validator.verify(value) {
                    violations.push(Violation::new(path, msg));
                }
            }
            Validator::Float64(validator) => {
                if let Err(msg) = validator.verify(value) {
                    violations.push(Violation::new(path, msg));
                }
            }
            Validator::Str(validator) => {
                if let Err(msg) = validator.verify(value) {
                    violations.push(Violation::new(path, msg));
                }
            }
            Validator::ObjectId(validator) => {
                if let Err(msg) = validator.verify(value) {
                    violations.push(Violation::new(path, msg));
                }
            }
            Validator::Date(validator) => {
                if let Err(msg) = validator.verify(value) {
                    violations.push(Violation::new(path, msg));
                }
            }
            Validator::Generic(validator) => {
                if let Err(msg) = validator.verify(value) {
                    violations.push(Violation::new(path, msg));
                }
            }
            Validator::Array(validator) => validator.verify(path, value, violations),
            Validator::Object(validator) => validator.verify(path, value, violations),
        }
    }
}

/// A schema feature that is recognized but carries no runtime enforcement
/// yet. Surfaced through [`Schema::unsupported`][crate::Schema::unsupported]
/// rather than silently dropped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Unsupported {
    /// Dot-joined schema path of the field carrying the feature.
    pub path: String,
    /// The schema key, e.g. `dependencies`.
    pub feature: &'static str,
}

/// Title, description, and enum list shared by every kind.
pub(crate) fn populate_common(node: &SchemaNode) -> Result<(String, String, EnumSet)> {
    let title = node.get_str("title")?.unwrap_or_default().to_string();
    let description = node.get_str("description")?.unwrap_or_default().to_string();
    let enum_set = EnumSet::populate(node)?;
    Ok((title, description, enum_set))
}

/// Compile one declared kind of a schema field.
pub(crate) fn compile_kind(
    kind: Kind,
    node: &SchemaNode,
    path: &str,
    unsupported: &mut Vec<Unsupported>,
) -> Result<Validator> {
    Ok(match kind {
        Kind::Object => ObjectValidator::populate(node, path, unsupported)?.build(),
        Kind::Array => ArrayValidator::populate(node, path, unsupported)?.build(),
        Kind::String => StrValidator::populate(node)?.build(),
        Kind::Bool => BoolValidator::populate(node)?.build(),
        Kind::Int32 => Int32Validator::populate(node)?.build(),
        Kind::Int64 => Int64Validator::populate(node)?.build(),
        Kind::Float32 => Float32Validator::populate(node)?.build(),
        Kind::Float64 => Float64Validator::populate(node)?.build(),
        Kind::ObjectId => ObjectIdValidator::populate(node)?.build(),
        Kind::Date => DateValidator::populate(node)?.build(),
        Kind::Generic => GenericValidator::populate(node)?.build(),
    })
}

/// Resolve a field's declared kind(s) and compile one candidate per kind.
///
/// `bsonType` may be a single name or a list of names. A field with no
/// `bsonType` at all compiles to a single [`GenericValidator`]: with an
/// `enum` list that is the enum-only validator, without one it accepts
/// anything (the `_id: {}` idiom).
pub(crate) fn compile_field(
    node: &SchemaNode,
    path: &str,
    unsupported: &mut Vec<Unsupported>,
) -> Result<MultiValidator> {
    let names = declared_kind_names(node)?;
    let mut multi = MultiValidator::new();
    if names.is_empty() {
        multi = multi.push(compile_kind(Kind::Generic, node, path, unsupported)?);
        return Ok(multi);
    }
    for name in &names {
        let kind =
            Kind::from_name(name).ok_or_else(|| CompileError::TypeNotImplemented(name.clone()))?;
        multi = multi.push(compile_kind(kind, node, path, unsupported)?);
    }
    Ok(multi)
}

fn declared_kind_names(node: &SchemaNode) -> Result<Vec<String>> {
    match node.get("bsonType") {
        None => Ok(Vec::new()),
        Some(Value::Str(name)) => Ok(vec![name.clone()]),
        Some(Value::Array(_)) => {
            let names = node.get_string_list("bsonType")?.unwrap_or_default();
            Ok(names)
        }
        Some(_) => Err(CompileError::WrongType {
            key: "bsonType",
            expected: "a string or an array of strings",
        }),
    }
}

/// Round to `places` decimal places. The float `multiple_of` checks divide
/// and round to one place to absorb representation error before asking for
/// an integer quotient.
pub(crate) fn round_to_place(value: f64, places: f64) -> f64 {
    let pow = 10f64.powf(places);
    let digit = pow * value;
    if digit.fract() >= 0.5 {
        digit.ceil() / pow
    } else {
        digit.floor() / pow
    }
}

pub(crate) fn join_path(parent: &str, field: &str) -> String {
    if parent.is_empty() {
        field.to_string()
    } else {
        let mut path = String::with_capacity(parent.len() + 1 + field.len());
        path.push_str(parent);
        path.push('.');
        path.push_str(field);
        path
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn kind_names_round_trip() {
        for kind in [
            Kind::Object,
            Kind::Array,
            Kind::String,
            Kind::Bool,
            Kind::Int32,
            Kind::Int64,
            Kind::Float32,
            Kind::Float64,
            Kind::ObjectId,
            Kind::Date,
            Kind::Generic,
        ] {
            assert_eq!(Kind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(Kind::from_name("timestamp"), None);
        assert_eq!(Kind::from_name("binData"), None);
    }

    #[test]
    fn paths_join_with_dots() {
        assert_eq!(join_path("", "name"), "name");
        assert_eq!(join_path("street", "number"), "street.number");
    }
}
