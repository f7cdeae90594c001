use std::fmt;

use serde::Serialize;

pub type Result<T, E = CompileError> = std::result::Result<T, E>;

/// Errors raised while compiling a schema into a validator tree.
///
/// Compilation errors are always fatal: a schema that fails to compile has no
/// partially-usable validator tree.
#[derive(Clone, Debug, PartialEq)]
pub enum CompileError {
    /// The schema bytes were not valid JSON.
    BadJson(String),
    /// The top-level `bsonType` was missing or not the literal `"object"`.
    SchemaNotObject,
    /// A `bsonType` name that this crate does not recognize.
    TypeNotImplemented(String),
    /// A recognized schema key held a value of the wrong type.
    WrongType {
        key: &'static str,
        expected: &'static str,
    },
    /// A `pattern` value failed to compile as a regular expression, even
    /// after the fallback builder attempt.
    BadRegex { pattern: String, error: String },
    /// A date bound did not parse under the configured date layout.
    BadDate(String),
    /// An `enum` list held a literal that cannot be normalized to the
    /// field's declared kind.
    BadEnum(String),
    /// `multipleOf` was declared as zero, which can never divide anything.
    ZeroMultipleOf,
    /// An `enum` list was declared on an array field.
    EnumOnArray,
    /// An array schema declared `items` without `items.properties`.
    ItemsWithoutProperties,
    /// A recognized-but-unenforced schema feature, rejected in strict mode.
    Unsupported(&'static str),
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            CompileError::BadJson(ref err) => write!(f, "schema is not valid JSON: {}", err),
            CompileError::SchemaNotObject => {
                f.write_str("top-level schema must have a 'bsonType' key equal to \"object\"")
            }
            CompileError::TypeNotImplemented(ref name) => {
                write!(f, "bsonType '{}' is not implemented", name)
            }
            CompileError::WrongType { key, expected } => {
                write!(f, "schema key '{}' must be {}", key, expected)
            }
            CompileError::BadRegex {
                ref pattern,
                ref error,
            } => write!(f, "invalid pattern '{}': {}", pattern, error),
            CompileError::BadDate(ref value) => {
                write!(f, "'{}' does not match the configured date layout", value)
            }
            CompileError::BadEnum(ref msg) => write!(f, "bad enum literal: {}", msg),
            CompileError::ZeroMultipleOf => f.write_str("'multipleOf' must be non-zero"),
            CompileError::EnumOnArray => {
                f.write_str("'enum' is not compatible with the bson array type")
            }
            CompileError::ItemsWithoutProperties => {
                f.write_str("bsonType 'array' has key 'items', but not key 'items.properties'")
            }
            CompileError::Unsupported(feature) => {
                write!(f, "schema feature '{}' is not supported", feature)
            }
        }
    }
}

impl std::error::Error for CompileError {}

/// Reasons a scalar failed to coerce into a validator's target
/// representation. Always surfaced inside a wrong-type [`Violation`], never
/// silently dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoerceError {
    /// The value does not round-trip at the target width.
    Overflow { target: &'static str },
    /// A string value did not parse as a decimal numeral.
    NotNumeric,
    /// The value's kind has no conversion to the target at all.
    WrongType { found: &'static str },
}

impl fmt::Display for CoerceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            CoerceError::Overflow { target } => {
                write!(f, "value does not fit in {} without loss", target)
            }
            CoerceError::NotNumeric => f.write_str("string value is not a decimal numeral"),
            CoerceError::WrongType { found } => write!(f, "wrong type: got {}", found),
        }
    }
}

impl std::error::Error for CoerceError {}

/// One document-side validation failure, qualified by the dot-joined path of
/// the offending field from the document root.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Dot-joined path from the root to the failing field. Array elements
    /// contribute their index as a path segment, e.g. `tags.2.label`.
    pub path: String,
    /// Human-readable description of the failed constraint.
    pub message: String,
}

impl Violation {
    pub(crate) fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "document: {}", self.message)
        } else {
            write!(f, "field '{}': {}", self.path, self.message)
        }
    }
}

impl std::error::Error for Violation {}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn violation_display_includes_path() {
        let v = Violation::new("street.number", "wrong type: got string");
        assert_eq!(
            v.to_string(),
            "field 'street.number': wrong type: got string"
        );
    }

    #[test]
    fn root_violation_display() {
        let v = Violation::new("", "too few fields");
        assert_eq!(v.to_string(), "document: too few fields");
    }
}
