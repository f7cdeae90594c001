use super::*;
use crate::types::ObjectId;

/// Validator for 12-byte document identifiers (`bsonType: "objectId"`).
///
/// The value must be a well-formed, non-zero identifier: either an
/// [`ObjectId`][crate::types::ObjectId] value or its 24-character hex string
/// form, which is what a JSON-decoded document carries.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjectIdValidator {
    /// Metadata only; no impact on validation.
    pub title: String,
    /// Metadata only; no impact on validation.
    pub description: String,
    /// Allow-list of admissible values.
    pub enum_set: EnumSet,
}

impl ObjectIdValidator {
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

    /// Build this into a [`Validator`] enum.
    pub fn build(self) -> Validator {
        Validator::ObjectId(Box::new(self))
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
        self.enum_set.verify(value)?;
        let id = match value {
            Value::ObjectId(id) => *id,
            Value::Str(s) => s
                .parse::<ObjectId>()
                .map_err(|_| "type must be an objectId".to_string())?,
            other => return Err(format!("type must be an objectId, got {}", other.kind_name())),
        };
        if id.is_zero() {
            return Err("objectId must not be the zero identifier".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn accepts_typed_and_hex_forms() {
        let validator = ObjectIdValidator::new();
        let id: ObjectId = "507f1f77bcf86cd799439011".parse().unwrap();
        assert!(validator.verify(&Value::from(id)).is_ok());
        assert!(validator
            .verify(&Value::from("507f1f77bcf86cd799439011"))
            .is_ok());
    }

    #[test]
    fn rejects_zero_and_malformed() {
        let validator = ObjectIdValidator::new();
        assert!(validator
            .verify(&Value::from("000000000000000000000000"))
            .is_err());
        assert!(validator.verify(&Value::from("not-an-id")).is_err());
        assert!(validator.verify(&Value::from(12)).is_err());
    }

    #[test]
    fn null_is_fine() {
        let validator = ObjectIdValidator::new();
        assert!(validator.verify(&Value::Null).is_ok());
    }
}
