use super::*;
use crate::coerce;

/// Validator for 32-bit floating-point values (`bsonType: "decimal"`).
///
/// Validation passes if:
///
/// - The value coerces to an `f32`. Integers and 64-bit floats always
///   convert; narrowing precision loss is not detected.
/// - If an `enum` list is declared, the coerced value is on it.
/// - `value / multiple_of`, rounded to one decimal place, is an integer.
///   The rounding absorbs floating representation error, so 22.0 counts as
///   a multiple of 2.2.
/// - The value is within `maximum`/`minimum`, each optionally exclusive.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Float32Validator {
    /// Metadata only; no impact on validation.
    pub title: String,
    /// Metadata only; no impact on validation.
    pub description: String,
    /// Allow-list, normalized to `f32` at compile time.
    pub enum_set: EnumSet,
    /// A divisor of the field value, checked with rounding tolerance.
    pub multiple_of: Option<f32>,
    /// The maximum allowed value.
    pub maximum: Option<f32>,
    /// If true, the value must be strictly less than `maximum`.
    pub exclusive_maximum: bool,
    /// The minimum allowed value.
    pub minimum: Option<f32>,
    /// If true, the value must be strictly greater than `minimum`.
    pub exclusive_minimum: bool,
}

impl Float32Validator {
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
    pub fn multiple_of(mut self, multiple_of: f32) -> Self {
        self.multiple_of = Some(multiple_of);
        self
    }

    /// Set the maximum allowed value.
    pub fn maximum(mut self, maximum: f32) -> Self {
        self.maximum = Some(maximum);
        self
    }

    /// Set whether or not `maximum` is an exclusive maximum.
    pub fn exclusive_maximum(mut self, exclusive: bool) -> Self {
        self.exclusive_maximum = exclusive;
        self
    }

    /// Set the minimum allowed value.
    pub fn minimum(mut self, minimum: f32) -> Self {
        self.minimum = Some(minimum);
        self
    }

    /// Set whether or not `minimum` is an exclusive minimum.
    pub fn exclusive_minimum(mut self, exclusive: bool) -> Self {
        self.exclusive_minimum = exclusive;
        self
    }

    /// Build this into a [`Validator`] enum.
    pub fn build(self) -> Validator {
        Validator::Float32(Box::new(self))
    }

    pub(crate) fn populate(node: &SchemaNode) -> Result<Self> {
        let (title, description, mut enum_set) = populate_common(node)?;
        enum_set.normalize(Kind::Float32)?;
        let multiple_of = node.get_f32("multipleOf")?;
        if multiple_of == Some(0.0) {
            return Err(CompileError::ZeroMultipleOf);
        }
        Ok(Self {
            title,
            description,
            enum_set,
            multiple_of,
            maximum: node.get_f32("maximum")?,
            exclusive_maximum: node.get_bool("exclusiveMaximum")?.unwrap_or(false),
            minimum: node.get_f32("minimum")?,
            exclusive_minimum: node.get_bool("exclusiveMinimum")?.unwrap_or(false),
        })
    }

    pub(crate) fn verify(&self, value: &Value) -> Result<(), String> {
        if value.is_null() {
            if self.enum_set.governs() {
                return self.enum_set.verify(value);
            }
            return Ok(());
        }
        let converted = coerce::to_f32(value).map_err(|e| e.to_string())?;
        self.enum_set.verify(&Value::from(converted))?;
        if let Some(multiple_of) = self.multiple_of {
            let module = round_to_place(f64::from(converted) / f64::from(multiple_of), 1.0);
            if module != (module as i64) as f64 {
                return Err(format!("number must be multiple of {:.2}", multiple_of));
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
    fn multiple_of_tolerates_representation_error() {
        let validator = Float32Validator::new().multiple_of(2.2);
        assert!(validator.verify(&Value::from(22.0f32)).is_ok());
        assert!(validator.verify(&Value::from(8.8f32)).is_ok());
        assert!(validator.verify(&Value::from(9.9f32)).is_err());
    }

    #[test]
    fn exclusive_bounds() {
        let validator = Float32Validator::new()
            .maximum(22.0)
            .exclusive_maximum(true)
            .minimum(8.8)
            .exclusive_minimum(true);
        assert!(validator.verify(&Value::from(21.9f32)).is_ok());
        assert!(validator.verify(&Value::from(22.0f32)).is_err());
        assert!(validator.verify(&Value::from(8.8f32)).is_err());
    }

    #[test]
    fn integers_widen_into_the_decimal() {
        let validator = Float32Validator::new().maximum(22.0);
        assert!(validator.verify(&Value::from(22i64)).is_ok());
        assert!(validator.verify(&Value::from(23u8)).is_err());
    }

    #[test]
    fn enum_after_normalization() {
        let raw: Value =
            serde_json::from_str(r#"{"bsonType":"decimal","enum":[1.1, 1.2, 1.3, 1.4]}"#).unwrap();
        let validator =
            Float32Validator::populate(&SchemaNode::new(raw.as_map().unwrap())).unwrap();
        assert!(validator.verify(&Value::from(1.2f32)).is_ok());
        assert!(validator.verify(&Value::from(1.5f32)).is_err());
    }
}
