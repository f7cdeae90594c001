use super::*;
use crate::coerce;

/// Validator for 64-bit integer values (`bsonType: "long"`).
///
/// Same rules as [`Int32Validator`], at 64-bit width: exact coercion into
/// `i64`, optional enum allow-list, `multiple_of` divisibility, and
/// independently-exclusive `maximum`/`minimum` bounds.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Int64Validator {
    /// Metadata only; no impact on validation.
    pub title: String,
    /// Metadata only; no impact on validation.
    pub description: String,
    /// Allow-list, normalized to `i64` at compile time.
    pub enum_set: EnumSet,
    /// An integer divisor of the field value.
    pub multiple_of: Option<i64>,
    /// The maximum allowed value.
    pub maximum: Option<i64>,
    /// If true, the value must be strictly less than `maximum`.
    pub exclusive_maximum: bool,
    /// The minimum allowed value.
    pub minimum: Option<i64>,
    /// If true, the value must be strictly greater than `minimum`.
    pub exclusive_minimum: bool,
    /// Accept a float with no fractional component as an integer.
    pub accept_float: bool,
}

impl Int64Validator {
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

    /// Set the required divisor.
    pub fn multiple_of(mut self, multiple_of: i64) -> Self {
        self.multiple_of = Some(multiple_of);
        self
    }

    /// Set the maximum allowed value.
    pub fn maximum(mut self, maximum: i64) -> Self {
        self.maximum = Some(maximum);
        self
    }

    /// Set whether or not `maximum` is an exclusive maximum.
    pub fn exclusive_maximum(mut self, exclusive: bool) -> Self {
        self.exclusive_maximum = exclusive;
        self
    }

    /// Set the minimum allowed value.
    pub fn minimum(mut self, minimum: i64) -> Self {
        self.minimum = Some(minimum);
        self
    }

    /// Set whether or not `minimum` is an exclusive minimum.
    pub fn exclusive_minimum(mut self, exclusive: bool) -> Self {
        self.exclusive_minimum = exclusive;
        self
    }

    /// Set whether floats with no fractional component are accepted.
    pub fn accept_float(mut self, accept_float: bool) -> Self {
        self.accept_float = accept_float;
        self
    }

    /// Build this into a [`Validator`] enum.
    pub fn build(self) -> Validator {
        Validator::Int64(Box::new(self))
    }

    pub(crate) fn populate(node: &SchemaNode) -> Result<Self> {
        let (title, description, mut enum_set) = populate_common(node)?;
        enum_set.normalize(Kind::Int64)?;
        let multiple_of = node.get_i64("multipleOf")?;
        if multiple_of == Some(0) {
            return Err(CompileError::ZeroMultipleOf);
        }
        Ok(Self {
            title,
            description,
            enum_set,
            multiple_of,
            maximum: node.get_i64("maximum")?,
            exclusive_maximum: node.get_bool("exclusiveMaximum")?.unwrap_or(false),
            minimum: node.get_i64("minimum")?,
            exclusive_minimum: node.get_bool("exclusiveMinimum")?.unwrap_or(false),
            accept_float: false,
        })
    }

    pub(crate) fn verify(&self, value: &Value) -> Result<(), String> {
        if value.is_null() {
            if self.enum_set.governs() {
                return self.enum_set.verify(value);
            }
            return Ok(());
        }
        let converted = coerce::to_i64(value, self.accept_float).map_err(|e| e.to_string())?;
        self.enum_set.verify(&Value::from(converted))?;
        if let Some(multiple_of) = self.multiple_of {
            if converted % multiple_of != 0 {
                return Err(format!("number must be multiple of {}", multiple_of));
            }
        }
        if let Some(maximum) = self.maximum {
            if converted > maximum || (self.exclusive_maximum && converted == maximum) {
                return Err("maximum value exceeded".to_string());
            }
        }
        if let Some(minimum) = self.minimum {
            if converted < minimum || (self.exclusive_minimum && converted == minimum) {
                return Err("expected minimum value".to_string());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn multiple_and_inclusive_maximum() {
        // For multipleOf m and inclusive maximum M: valid iff v % m == 0 && v <= M.
        let validator = Int64Validator::new().multiple_of(5).maximum(50);
        for v in (0..=50i64).step_by(5) {
            assert!(validator.verify(&Value::from(v)).is_ok(), "{} should pass", v);
        }
        assert!(validator.verify(&Value::from(55i64)).is_err());
        assert!(validator.verify(&Value::from(47i64)).is_err());
    }

    #[test]
    fn values_beyond_i64_overflow() {
        let validator = Int64Validator::new();
        assert!(validator.verify(&Value::from(u64::MAX)).is_err());
        assert!(validator.verify(&Value::from(i64::MIN)).is_ok());
    }

    #[test]
    fn enum_normalized_to_i64() {
        let raw: Value =
            serde_json::from_str(r#"{"bsonType":"long","enum":[2, 20, 200]}"#).unwrap();
        let validator = Int64Validator::populate(&SchemaNode::new(raw.as_map().unwrap())).unwrap();
        assert!(validator.verify(&Value::from(20i64)).is_ok());
        assert!(validator.verify(&Value::from(21i64)).is_err());
    }
}
