use std::collections::BTreeMap;

use crate::error::{CompileError, Result, Violation};
use crate::node::SchemaNode;
use crate::validator::{ObjectValidator, Unsupported};
use crate::value::Value;

/// A compiled schema: the validator tree produced from one `$jsonSchema`
/// document.
///
/// A `Schema` is immutable once compiled and holds no per-call state, so one
/// instance can serve any number of concurrent
/// [`validate`][Schema::validate] calls. Each call returns its own fresh
/// violation list.
///
/// ```
/// # use bson_schema::{Schema, Value};
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let schema = Schema::from_slice(br#"{
///     "bsonType": "object",
///     "required": ["name"],
///     "properties": { "name": { "bsonType": "string" } }
/// }"#)?;
///
/// let doc: Value = serde_json::from_str(r#"{"name": "ok"}"#)?;
/// assert!(schema.validate(&doc).is_ok());
///
/// let doc: Value = serde_json::from_str("{}")?;
/// let violations = schema.validate(&doc).unwrap_err();
/// assert_eq!(violations[0].path, "name");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Schema {
    root: ObjectValidator,
    unsupported: Vec<Unsupported>,
}

impl Schema {
    /// Compile a schema from raw JSON bytes.
    ///
    /// The bytes may carry the full `{"validator": {"$jsonSchema": ...}}`
    /// envelope or the bare schema object; both wrapper keys are stripped
    /// when present.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let value: Value =
            serde_json::from_slice(bytes).map_err(|e| CompileError::BadJson(e.to_string()))?;
        Self::compile(&value, false)
    }

    /// Like [`from_slice`][Self::from_slice], but any recognized-yet-
    /// unenforced schema feature fails compilation instead of being
    /// recorded.
    pub fn from_slice_strict(bytes: &[u8]) -> Result<Self> {
        let value: Value =
            serde_json::from_slice(bytes).map_err(|e| CompileError::BadJson(e.to_string()))?;
        Self::compile(&value, true)
    }

    /// Compile a schema from an already-parsed value tree.
    pub fn from_value(value: &Value) -> Result<Self> {
        Self::compile(value, false)
    }

    /// Strict-mode variant of [`from_value`][Self::from_value].
    pub fn from_value_strict(value: &Value) -> Result<Self> {
        Self::compile(value, true)
    }

    fn compile(value: &Value, strict: bool) -> Result<Self> {
        let map = value.as_map().ok_or(CompileError::SchemaNotObject)?;
        let map = strip_envelope(map)?;
        let node = SchemaNode::new(map);
        match node.get("bsonType") {
            Some(Value::Str(name)) if name == "object" => {}
            _ => return Err(CompileError::SchemaNotObject),
        }
        let mut unsupported = Vec::new();
        let root = ObjectValidator::populate(&node, "", &mut unsupported)?;
        if strict {
            if let Some(first) = unsupported.first() {
                return Err(CompileError::Unsupported(first.feature));
            }
        }
        Ok(Self { root, unsupported })
    }

    /// The compiled root object validator.
    pub fn root(&self) -> &ObjectValidator {
        &self.root
    }

    /// Schema features that were recognized during compilation but carry no
    /// enforcement (`dependencies`, `patternProperties`, `additionalItems`,
    /// positional `items`). Empty for fully-enforced schemas.
    pub fn unsupported(&self) -> &[Unsupported] {
        &self.unsupported
    }

    /// Walk a document against the compiled tree.
    ///
    /// Violations accumulate across sibling fields, nested objects, and
    /// array elements; the returned list is owned by the caller and the
    /// schema is untouched.
    pub fn validate(&self, document: &Value) -> Result<(), Vec<Violation>> {
        if document.as_map().is_none() {
            return Err(vec![Violation::new(
                "",
                format!("document must be an object, got {}", document.kind_name()),
            )]);
        }
        let mut violations = Vec::new();
        self.root.verify("", document, &mut violations);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Scans the schema for the `validator` and `$jsonSchema` wrapper keys and
/// unwraps whichever are present.
fn strip_envelope(mut map: &BTreeMap<String, Value>) -> Result<&BTreeMap<String, Value>> {
    if let Some(inner) = map.get("validator") {
        map = inner.as_map().ok_or(CompileError::WrongType {
            key: "validator",
            expected: "an object",
        })?;
    }
    if let Some(inner) = map.get("$jsonSchema") {
        map = inner.as_map().ok_or(CompileError::WrongType {
            key: "$jsonSchema",
            expected: "an object",
        })?;
    }
    Ok(map)
}
