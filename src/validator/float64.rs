use super::*;
use crate::coerce;

/// Validator for 64-bit floating-point values (`bsonType: "double"`).
///
/// Same rules as [`Float32Validator`], at 64-bit width.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Float64Validator {
    /// Metadata only; no impact on validation.
    pub title: String,
    /// Metadata only; no impact on validation.
    pub description: String,
    /// Allow-list, normalized to `f64` at compile time.
    pub enum_set: EnumSet,
    /// A divisor of the field value, checked with rounding tolerance.
    pub multiple_of: Option<f64>,
    /// The maximum allowed value.
    pub maximum: Option<f64>,
    /// If true, the value must be strictly less than `maximum`.
    pub exclusive_maximum: bool,
    /// The minimum allowed value.
    pub minimum: Option<f64>,
    /// If true, the value must be strictly greater than `minimum`.
    pub exclusive_minimum: bool,
}

impl Float64Validator {
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
    pub fn multiple_of(mut self, multiple_of: f64) -> Self {
        self.multiple_of = Some(multiple_of);
        self
    }

    /// Set the maximum allowed value.
    pub fn maximum(mut self, maximum: f64) -> Self {
        self.maximum = Some(maximum);
        self
    }

    /// Set whether or not `maximum` is an exclusive maximum.
    pub fn exclusive_maximum(mut self, exclusive: bool) -> Self {
        self.exclusive_maximum = exclusive;
        self
    }

    /// Set the minimum allowed value.
    pub fn minimum(mut self, minimum: f64) -> Self {
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
        Validator::Float64(Box::new(self))
    }

    pub(crate) fn populate(node: &SchemaNode) -> Result<Self> {
        let (title, description, mut enum_set) = populate_common(node)?;
        enum_set.normalize(Kind::Float64)?;
        let multiple_of = node.get_f64("multipleOf")?;
        if multiple_of == Some(0.0) {
            return Err(CompileError::ZeroMultipleOf);
        }
        Ok(Self {
            title,
            description,
            enum_set,
            multiple_of,
            maximum: node.get_f64("maximum")?,
            exclusive_maximum: node.get_bool("exclusiveMaximum")?.unwrap_or(false),
            minimum: node.get_f64("minimum")?,
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
        let converted = coerce::to_f64(value).map_err(|e| e.to_string())?;
        self.enum_set.verify(&Value::from(converted))?;
        if let Some(multiple_of) = self.multiple_of {
            let module = round_to_place(converted / multiple_of, 1.0);
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
    fn multiple_of_with_tolerance() {
        let validator = Float64Validator::new().multiple_of(2.2);
        assert!(validator.verify(&Value::from(22.0f64)).is_ok());
        assert!(validator.verify(&Value::from(6.6f64)).is_ok());
        assert!(validator.verify(&Value::from(7.0f64)).is_err());
    }

    #[test]
    fn bounds() {
        let validator = Float64Validator::new().maximum(22.0).minimum(8.8);
        assert!(validator.verify(&Value::from(22.0f64)).is_ok());
        assert!(validator.verify(&Value::from(8.8f64)).is_ok());
        assert!(validator.verify(&Value::from(22.1f64)).is_err());
        assert!(validator.verify(&Value::from(8.7f64)).is_err());
    }

    #[test]
    fn narrower_values_widen() {
        let validator = Float64Validator::new().minimum(0.0);
        assert!(validator.verify(&Value::from(1.5f32)).is_ok());
        assert!(validator.verify(&Value::from(3u8)).is_ok());
        assert!(validator.verify(&Value::from("1.5")).is_ok());
        assert!(validator.verify(&Value::from("um")).is_err());
    }
}
