use super::*;

/// Validator for boolean values (`bsonType: "bool"`).
///
/// After the null/enum handling shared by all scalar validators, the value
/// must literally be `true` or `false`; no other checks apply.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BoolValidator {
    /// Metadata only; no impact on validation.
    pub title: String,
    /// Metadata only; no impact on validation.
    pub description: String,
    /// Allow-list of admissible values.
    pub enum_set: EnumSet,
}

impl BoolValidator {
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

    /// Add a literal to the enum allow-list.
    pub fn enum_add(mut self, value: impl Into<Value>) -> Self {
        self.enum_set = self.enum_set.insert(value);
        self
    }

    /// Build this into a [`Validator`] enum.
    pub fn build(self) -> Validator {
        Validator::Bool(Box::new(self))
    }

    pub(crate) fn populate(node: &SchemaNode) -> Result<Self> {
        let (title, description, enum_set) = populate_common(node)?;
        Ok(Self {
            title,
            description,
            enum_set,
        })
    }

    pub(crate) fn verify(&self, value: &Value) -> Result<(), String> {
        if value.is_null() {
            if self.enum_set.governs() {
                return self.enum_set.verify(value);
            }
            return Ok(());
        }
        if value.as_bool().is_none() {
            return Err(format!("wrong type: got {}", value.kind_name()));
        }
        self.enum_set.verify(value)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn only_booleans_pass() {
        let validator = BoolValidator::new();
        assert!(validator.verify(&Value::from(true)).is_ok());
        assert!(validator.verify(&Value::from(false)).is_ok());
        assert!(validator.verify(&Value::from(1)).is_err());
        assert!(validator.verify(&Value::from("true")).is_err());
    }

    #[test]
    fn null_passes_without_enum() {
        let validator = BoolValidator::new();
        assert!(validator.verify(&Value::Null).is_ok());
    }

    #[test]
    fn enum_restricts_values() {
        let validator = BoolValidator::new().enum_add(true);
        assert!(validator.verify(&Value::from(true)).is_ok());
        assert!(validator.verify(&Value::from(false)).is_err());
        assert!(validator.verify(&Value::Null).is_err());
    }
}
