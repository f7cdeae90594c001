use std::collections::{BTreeMap, BTreeSet};

use super::*;

/// Mapping from field name to the candidate validators for that field.
pub type PropertyTable = BTreeMap<String, MultiValidator>;

/// What an object does with document fields that are not in its
/// [`PropertyTable`].
#[derive(Clone, Debug, Default, PartialEq)]
pub enum AdditionalProperties {
    /// Extra fields pass without inspection. The default.
    #[default]
    Allow,
    /// Extra fields are violations; only declared fields may appear.
    Deny,
    /// Extra fields must validate against this sub-schema.
    Schema(MultiValidator),
}

/// Validator for nested documents (`bsonType: "object"`).
///
/// Validation walks every field of the document map and accumulates
/// violations rather than stopping at the first:
///
/// - Each field named in the property table is checked against its
///   candidates; a field passes the moment one candidate passes.
/// - Each field named in `required` must be present in the document.
/// - Fields not in the property table follow
///   [`additional_properties`][Self::additional_properties].
/// - The number of fields in the document must be within
///   `min_properties`/`max_properties`.
///
/// A `null` value passes trivially; presence is the parent's concern.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjectValidator {
    /// Metadata only; no impact on validation.
    pub title: String,
    /// Metadata only; no impact on validation.
    pub description: String,
    /// The minimum number of fields allowed in the document.
    pub min_properties: Option<u64>,
    /// The maximum number of fields allowed in the document.
    pub max_properties: Option<u64>,
    /// Per-field candidate validators.
    pub properties: PropertyTable,
    /// Field names that must be present in a conforming document.
    pub required: BTreeSet<String>,
    /// Policy for fields absent from `properties`.
    pub additional_properties: AdditionalProperties,
}

impl ObjectValidator {
    /// Make a new validator with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the metadata title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the metadata description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Add a required field and its validator.
    pub fn req_add(mut self, field: impl Into<String>, validator: Validator) -> Self {
        let field = field.into();
        self.required.insert(field.clone());
        self.properties
            .entry(field)
            .or_default()
            .any_of
            .push(validator);
        self
    }

    /// Add an optional field and its validator.
    pub fn opt_add(mut self, field: impl Into<String>, validator: Validator) -> Self {
        self.properties
            .entry(field.into())
            .or_default()
            .any_of
            .push(validator);
        self
    }

    /// Set the minimum number of document fields.
    pub fn min_properties(mut self, min_properties: u64) -> Self {
        self.min_properties = Some(min_properties);
        self
    }

    /// Set the maximum number of document fields.
    pub fn max_properties(mut self, max_properties: u64) -> Self {
        self.max_properties = Some(max_properties);
        self
    }

    /// Set the policy for fields absent from the property table.
    pub fn additional_properties(mut self, additional: AdditionalProperties) -> Self {
        self.additional_properties = additional;
        self
    }

    /// Build this into a [`Validator`] enum.
    pub fn build(self) -> Validator {
        Validator::Object(Box::new(self))
    }

    pub(crate) fn populate(
        node: &SchemaNode,
        path: &str,
        unsupported: &mut Vec<Unsupported>,
    ) -> Result<Self> {
        let title = node.get_str("title")?.unwrap_or_default().to_string();
        let description = node.get_str("description")?.unwrap_or_default().to_string();
        let min_properties = node.get_u64("minProperties")?;
        let max_properties = node.get_u64("maxProperties")?;
        let required: BTreeSet<String> = node
            .get_string_list("required")?
            .unwrap_or_default()
            .into_iter()
            .collect();

        let mut properties = PropertyTable::new();
        if let Some(raw_properties) = node.get_map("properties")? {
            for (field, raw_field) in raw_properties {
                let Value::Map(field_map) = raw_field else {
                    return Err(CompileError::WrongType {
                        key: "properties",
                        expected: "an object per declared field",
                    });
                };
                let field_path = join_path(path, field);
                let field_node = SchemaNode::new(field_map);
                properties.insert(
                    field.clone(),
                    compile_field(&field_node, &field_path, unsupported)?,
                );
            }
        }

        let additional_properties = match node.get("additionalProperties") {
            None => AdditionalProperties::Allow,
            Some(Value::Bool(true)) => AdditionalProperties::Allow,
            Some(Value::Bool(false)) => AdditionalProperties::Deny,
            Some(Value::Str(s)) => match s.to_ascii_lowercase().parse::<bool>() {
                Ok(true) => AdditionalProperties::Allow,
                Ok(false) => AdditionalProperties::Deny,
                Err(_) => {
                    return Err(CompileError::WrongType {
                        key: "additionalProperties",
                        expected: "a boolean or a schema object",
                    })
                }
            },
            Some(Value::Map(sub)) => {
                let sub_path = join_path(path, "additionalProperties");
                AdditionalProperties::Schema(compile_field(
                    &SchemaNode::new(sub),
                    &sub_path,
                    unsupported,
                )?)
            }
            Some(_) => {
                return Err(CompileError::WrongType {
                    key: "additionalProperties",
                    expected: "a boolean or a schema object",
                })
            }
        };

        if node.has("dependencies") {
            unsupported.push(Unsupported {
                path: path.to_string(),
                feature: "dependencies",
            });
        }
        if node.has("patternProperties") {
            unsupported.push(Unsupported {
                path: path.to_string(),
                feature: "patternProperties",
            });
        }

        Ok(Self {
            title,
            description,
            min_properties,
            max_properties,
            properties,
            required,
            additional_properties,
        })
    }

    pub(crate) fn verify(&self, path: &str, value: &Value, violations: &mut Vec<Violation>) {
        if value.is_null() {
            return;
        }
        let Some(map) = value.as_map() else {
            violations.push(Violation::new(
                path,
                format!("wrong type: got {}, expected object", value.kind_name()),
            ));
            return;
        };

        let field_count = map.len() as u64;
        if let Some(max_properties) = self.max_properties {
            if field_count > max_properties {
                violations.push(Violation::new(path, "maximum amount of fields exceeded"));
            }
        }
        if let Some(min_properties) = self.min_properties {
            if field_count < min_properties {
                violations.push(Violation::new(path, "minimum amount of fields not reached"));
            }
        }

        for name in &self.required {
            if !map.contains_key(name) {
                violations.push(Violation::new(
                    join_path(path, name),
                    "required field is missing",
                ));
            }
        }

        verify_declared_fields(&self.properties, path, map, violations);

        for (name, field_value) in map {
            if self.properties.contains_key(name) {
                continue;
            }
            match &self.additional_properties {
                AdditionalProperties::Allow => {}
                AdditionalProperties::Deny => {
                    violations.push(Violation::new(
                        join_path(path, name),
                        "field is not declared in the schema",
                    ));
                }
                AdditionalProperties::Schema(candidates) => {
                    candidates.verify(&join_path(path, name), field_value, violations);
                }
            }
        }
    }
}

/// Check every document field that has an entry in the property table.
/// Fields without an entry are the caller's concern.
pub(crate) fn verify_declared_fields(
    table: &PropertyTable,
    path: &str,
    map: &BTreeMap<String, Value>,
    violations: &mut Vec<Violation>,
) {
    for (name, field_value) in map {
        if let Some(candidates) = table.get(name) {
            candidates.verify(&join_path(path, name), field_value, violations);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn street() -> ObjectValidator {
        ObjectValidator::new()
            .req_add("name", StrValidator::new().build())
            .req_add("number", Int32Validator::new().build())
    }

    fn check(validator: &ObjectValidator, value: &Value) -> Vec<Violation> {
        let mut violations = Vec::new();
        validator.verify("street", value, &mut violations);
        violations
    }

    fn map_of(json: &str) -> Value {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn required_fields_must_be_present() {
        let validator = street();
        let violations = check(&validator, &map_of(r#"{"name":"Rua A"}"#));
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].path, "street.number");
        assert_eq!(violations[0].message, "required field is missing");
    }

    #[test]
    fn complete_document_passes() {
        let validator = street();
        let violations = check(&validator, &map_of(r#"{"name":"Rua A","number":123}"#));
        assert!(violations.is_empty());
    }

    #[test]
    fn violations_accumulate_across_fields() {
        let validator = street();
        let violations = check(&validator, &map_of(r#"{"name":7,"number":"x"}"#));
        assert_eq!(violations.len(), 2);
    }

    #[test]
    fn undeclared_fields_follow_the_policy() {
        let lax = street();
        assert!(check(&lax, &map_of(r#"{"name":"a","number":1,"extra":true}"#)).is_empty());

        let strict = street().additional_properties(AdditionalProperties::Deny);
        let violations = check(&strict, &map_of(r#"{"name":"a","number":1,"extra":true}"#));
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].path, "street.extra");

        let schema = street().additional_properties(AdditionalProperties::Schema(
            MultiValidator::new().push(BoolValidator::new().build()),
        ));
        assert!(check(&schema, &map_of(r#"{"name":"a","number":1,"extra":true}"#)).is_empty());
        let violations = check(&schema, &map_of(r#"{"name":"a","number":1,"extra":"no"}"#));
        assert_eq!(violations.len(), 1);
    }

    #[test]
    fn property_counts_use_the_document() {
        let validator = ObjectValidator::new().min_properties(2).max_properties(3);
        assert_eq!(check(&validator, &map_of(r#"{"a":1}"#)).len(), 1);
        assert!(check(&validator, &map_of(r#"{"a":1,"b":2}"#)).is_empty());
        assert_eq!(
            check(&validator, &map_of(r#"{"a":1,"b":2,"c":3,"d":4}"#)).len(),
            1
        );
    }

    #[test]
    fn non_object_value_is_one_violation() {
        let validator = street();
        let violations = check(&validator, &Value::from("not a map"));
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("expected object"));
    }
}
