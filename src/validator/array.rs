use super::*;
use crate::error::Violation;

/// Validator for sequences of documents (`bsonType: "array"`).
///
/// An array value must be a sequence of element-maps. Validation passes if:
///
/// - The sequence length is within `min_items`/`max_items`.
/// - If `unique_items` is set, no two elements are equal.
/// - Every element's fields validate against the `items` property table,
///   which comes from an object-shaped `items` schema (its `properties`
///   describe each element's shape).
///
/// Violations accumulate across elements, with each element's index joined
/// into the field path.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ArrayValidator {
    /// Metadata only; no impact on validation.
    pub title: String,
    /// Metadata only; no impact on validation.
    pub description: String,
    /// Per-field candidates describing the shape of each element.
    pub items: Option<PropertyTable>,
    /// The maximum length of the array.
    pub max_items: Option<u64>,
    /// The minimum length of the array.
    pub min_items: Option<u64>,
    /// If true, each element in the array must be unique.
    pub unique_items: bool,
}

impl ArrayValidator {
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

    /// Add a field validator to the element shape.
    pub fn item_add(mut self, field: impl Into<String>, validator: Validator) -> Self {
        self.items
            .get_or_insert_with(PropertyTable::new)
            .entry(field.into())
            .or_default()
            .any_of
            .push(validator);
        self
    }

    /// Set the maximum number of elements.
    pub fn max_items(mut self, max_items: u64) -> Self {
        self.max_items = Some(max_items);
        self
    }

    /// Set the minimum number of elements.
    pub fn min_items(mut self, min_items: u64) -> Self {
        self.min_items = Some(min_items);
        self
    }

    /// Set whether elements must be pairwise distinct.
    pub fn unique_items(mut self, unique_items: bool) -> Self {
        self.unique_items = unique_items;
        self
    }

    /// Build this into a [`Validator`] enum.
    pub fn build(self) -> Validator {
        Validator::Array(Box::new(self))
    }

    pub(crate) fn populate(
        node: &SchemaNode,
        path: &str,
        unsupported: &mut Vec<Unsupported>,
    ) -> Result<Self> {
        if node.has("enum") {
            return Err(CompileError::EnumOnArray);
        }
        let title = node.get_str("title")?.unwrap_or_default().to_string();
        let description = node.get_str("description")?.unwrap_or_default().to_string();
        let max_items = node.get_u64("maxItems")?;
        let min_items = node.get_u64("minItems")?;
        let unique_items = node.get_bool("uniqueItems")?.unwrap_or(false);

        if node.has("additionalItems") {
            unsupported.push(Unsupported {
                path: path.to_string(),
                feature: "additionalItems",
            });
        }

        let items = match node.get("items") {
            None => None,
            Some(Value::Array(_)) => {
                // Positional (tuple) item schemas are recognized but carry
                // no enforcement.
                unsupported.push(Unsupported {
                    path: path.to_string(),
                    feature: "items as an array of schemas",
                });
                None
            }
            Some(Value::Map(items_map)) => {
                let items_node = SchemaNode::new(items_map);
                let Some(raw_properties) = items_node.get_map("properties")? else {
                    return Err(CompileError::ItemsWithoutProperties);
                };
                let mut table = PropertyTable::new();
                for (field, raw_field) in raw_properties {
                    let Value::Map(field_map) = raw_field else {
                        return Err(CompileError::WrongType {
                            key: "properties",
                            expected: "an object per declared field",
                        });
                    };
                    let field_path = join_path(path, field);
                    table.insert(
                        field.clone(),
                        compile_field(&SchemaNode::new(field_map), &field_path, unsupported)?,
                    );
                }
                Some(table)
            }
            Some(_) => {
                return Err(CompileError::WrongType {
                    key: "items",
                    expected: "a schema object",
                })
            }
        };

        Ok(Self {
            title,
            description,
            items,
            max_items,
            min_items,
            unique_items,
        })
    }

    pub(crate) fn verify(&self, path: &str, value: &Value, violations: &mut Vec<Violation>) {
        if value.is_null() {
            return;
        }
        let Some(elements) = value.as_array() else {
            violations.push(Violation::new(
                path,
                format!("wrong type: got {}, expected array", value.kind_name()),
            ));
            return;
        };

        let length = elements.len() as u64;
        if let Some(max_items) = self.max_items {
            if length > max_items {
                violations.push(Violation::new(path, "maximum number of items exceeded"));
            }
        }
        if let Some(min_items) = self.min_items {
            if length < min_items {
                violations.push(Violation::new(path, "minimum number of items not reached"));
            }
        }

        if self.unique_items {
            for (i, element) in elements.iter().enumerate() {
                if elements[..i].iter().any(|earlier| earlier == element) {
                    violations.push(Violation::new(
                        join_path(path, &i.to_string()),
                        "array items must be unique",
                    ));
                }
            }
        }

        for (i, element) in elements.iter().enumerate() {
            let element_path = join_path(path, &i.to_string());
            let Some(element_map) = element.as_map() else {
                violations.push(Violation::new(
                    element_path,
                    format!("wrong type: got {}, expected object", element.kind_name()),
                ));
                continue;
            };
            if let Some(ref table) = self.items {
                verify_declared_fields(table, &element_path, element_map, violations);
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn tags() -> ArrayValidator {
        ArrayValidator::new()
            .item_add("label", StrValidator::new().min_length(1).build())
            .item_add("weight", Int32Validator::new().minimum(0).build())
            .min_items(1)
            .max_items(3)
    }

    fn check(validator: &ArrayValidator, value: &Value) -> Vec<Violation> {
        let mut violations = Vec::new();
        validator.verify("tags", value, &mut violations);
        violations
    }

    fn array_of(json: &str) -> Value {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn element_fields_validate_recursively() {
        let validator = tags();
        assert!(check(&validator, &array_of(r#"[{"label":"a","weight":1}]"#)).is_empty());
        let violations = check(&validator, &array_of(r#"[{"label":"a"},{"label":""}]"#));
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].path, "tags.1.label");
    }

    #[test]
    fn length_bounds() {
        let validator = tags();
        assert_eq!(check(&validator, &array_of("[]")).len(), 1);
        let too_many = r#"[{"label":"a"},{"label":"b"},{"label":"c"},{"label":"d"}]"#;
        assert_eq!(check(&validator, &array_of(too_many)).len(), 1);
    }

    #[test]
    fn elements_must_be_maps() {
        let validator = tags();
        let violations = check(&validator, &array_of(r#"[{"label":"a"}, 3]"#));
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].path, "tags.1");
    }

    #[test]
    fn unique_items_flags_duplicates() {
        let validator = ArrayValidator::new().unique_items(true);
        let violations = check(
            &validator,
            &array_of(r#"[{"a":1},{"a":2},{"a":1}]"#),
        );
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].path, "tags.2");
    }

    #[test]
    fn enum_on_array_fails_compilation() {
        let raw: Value = serde_json::from_str(r#"{"bsonType":"array","enum":[1,2]}"#).unwrap();
        let mut unsupported = Vec::new();
        assert_eq!(
            ArrayValidator::populate(&SchemaNode::new(raw.as_map().unwrap()), "", &mut unsupported),
            Err(CompileError::EnumOnArray)
        );
    }

    #[test]
    fn items_without_properties_fails_compilation() {
        let raw: Value =
            serde_json::from_str(r#"{"bsonType":"array","items":{"bsonType":"object"}}"#).unwrap();
        let mut unsupported = Vec::new();
        assert_eq!(
            ArrayValidator::populate(&SchemaNode::new(raw.as_map().unwrap()), "", &mut unsupported),
            Err(CompileError::ItemsWithoutProperties)
        );
    }
}
