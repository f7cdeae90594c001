use super::*;

/// Validator for fields with no declared `bsonType`.
///
/// When a field declares only an `enum`, the allow-list is the whole
/// constraint and no type check applies. A field declaring neither
/// `bsonType` nor `enum` (the `_id: {}` idiom) compiles here too and
/// accepts anything.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GenericValidator {
    /// Metadata only; no impact on validation.
    pub title: String,
    /// Metadata only; no impact on validation.
    pub description: String,
    /// Allow-list of admissible values, in their raw representation.
    pub enum_set: EnumSet,
}

impl GenericValidator {
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
        Validator::Generic(Box::new(self))
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
        self.enum_set.verify(value)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn without_enum_everything_passes() {
        let validator = GenericValidator::new();
        assert!(validator.verify(&Value::from("anything")).is_ok());
        assert!(validator.verify(&Value::from(42)).is_ok());
        assert!(validator.verify(&Value::Null).is_ok());
    }

    #[test]
    fn enum_is_the_whole_constraint() {
        let validator = GenericValidator::new().enum_add("on").enum_add(1u8);
        assert!(validator.verify(&Value::from("on")).is_ok());
        assert!(validator.verify(&Value::from(1)).is_ok());
        assert!(validator.verify(&Value::from("off")).is_err());
    }
}
