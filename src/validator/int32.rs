use super::*;
use crate::coerce;

/// Validator for 32-bit integer values (`bsonType: "int"`).
///
/// Validation passes if:
///
/// - The value coerces exactly to an `i32`: integers of any width must
///   round-trip, floats are rejected unless [`accept_float`][Self::accept_float]
///   is set and the value has no fractional component, and strings must
///   parse as a decimal numeral.
/// - If an `enum` list is declared, the coerced value is on it.
/// - The value is an exact multiple of `multiple_of`, if set.
/// - The value is below `maximum` and above `minimum`, where each bound is
///   only enforced when declared (a declared bound of zero still counts) and
///   each has an independent exclusive flag.
///
/// A `null` value passes unless an enum governs the field, in which case the
/// enum must hold an explicit `null`. Field presence is the owning object's
/// concern, not this validator's.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Int32Validator {
    /// Metadata only; no impact on validation.
    pub title: String,
    /// Metadata only; no impact on validation.
    pub description: String,
    /// Allow-list, normalized to `i32` at compile time.
    pub enum_set: EnumSet,
    /// An integer divisor of the field value. For example, with `multiple_of`
    /// set to 3, 6 is a valid value but 7 is not.
    pub multiple_of: Option<i32>,
    /// The maximum allowed value.
    pub maximum: Option<i32>,
    /// If true, the value must be strictly less than `maximum`.
    pub exclusive_maximum: bool,
    /// The minimum allowed value.
    pub minimum: Option<i32>,
    /// If true, the value must be strictly greater than `minimum`.
    pub exclusive_minimum: bool,
    /// Accept a float with no fractional component as an integer.
    pub accept_float: bool,
}

impl Int32Validator {
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
    pub fn multiple_of(mut self, multiple_of: i32) -> Self {
        self.multiple_of = Some(multiple_of);
        self
    }

    /// Set the maximum allowed value.
    pub fn maximum(mut self, maximum: i32) -> Self {
        self.maximum = Some(maximum);
        self
    }

    /// Set whether or not `maximum` is an exclusive maximum.
    pub fn exclusive_maximum(mut self, exclusive: bool) -> Self {
        self.exclusive_maximum = exclusive;
        self
    }

    /// Set the minimum allowed value.
    pub fn minimum(mut self, minimum: i32) -> Self {
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
        Validator::Int32(Box::new(self))
    }

    pub(crate) fn populate(node: &SchemaNode) -> Result<Self> {
        let (title, description, mut enum_set) = populate_common(node)?;
        enum_set.normalize(Kind::Int32)?;
        let multiple_of = node.get_i32("multipleOf")?;
        if multiple_of == Some(0) {
            return Err(CompileError::ZeroMultipleOf);
        }
        Ok(Self {
            title,
            description,
            enum_set,
            multiple_of,
            maximum: node.get_i32("maximum")?,
            exclusive_maximum: node.get_bool("exclusiveMaximum")?.unwrap_or(false),
            minimum: node.get_i32("minimum")?,
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
        let converted = coerce::to_i32(value, self.accept_float).map_err(|e| e.to_string())?;
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
    fn bounds_and_multiple_of() {
        // multipleOf 5, maximum 50 (exclusive), minimum 10.
        let validator = Int32Validator::new()
            .multiple_of(5)
            .maximum(50)
            .exclusive_maximum(true)
            .minimum(10);
        assert!(validator.verify(&Value::from(45)).is_ok());
        assert_eq!(
            validator.verify(&Value::from(50)),
            Err("maximum value exceeded".to_string())
        );
        assert_eq!(
            validator.verify(&Value::from(47)),
            Err("number must be multiple of 5".to_string())
        );
        assert_eq!(
            validator.verify(&Value::from(5)),
            Err("expected minimum value".to_string())
        );
    }

    #[test]
    fn inclusive_bounds_admit_the_boundary() {
        let validator = Int32Validator::new().multiple_of(5).maximum(50).minimum(10);
        assert!(validator.verify(&Value::from(50)).is_ok());
        assert!(validator.verify(&Value::from(10)).is_ok());
    }

    #[test]
    fn zero_bound_is_still_enforced() {
        let validator = Int32Validator::new().maximum(0);
        assert!(validator.verify(&Value::from(0)).is_ok());
        assert!(validator.verify(&Value::from(1)).is_err());
        assert!(validator.verify(&Value::from(-1)).is_ok());
    }

    #[test]
    fn floats_need_the_opt_in() {
        let strict = Int32Validator::new();
        assert!(strict.verify(&Value::from(45.0f64)).is_err());
        let lenient = Int32Validator::new().accept_float(true);
        assert!(lenient.verify(&Value::from(45.0f64)).is_ok());
        assert!(lenient.verify(&Value::from(45.5f64)).is_err());
    }

    #[test]
    fn wide_integers_must_round_trip() {
        let validator = Int32Validator::new();
        assert!(validator.verify(&Value::from(i64::from(i32::MAX))).is_ok());
        assert!(validator
            .verify(&Value::from(i64::from(i32::MAX) + 1))
            .is_err());
    }

    #[test]
    fn populate_reads_schema_keys() {
        let raw: Value = serde_json::from_str(
            r#"{"bsonType":"int","multipleOf":5,"maximum":50,"exclusiveMaximum":true,"minimum":10}"#,
        )
        .unwrap();
        let validator = Int32Validator::populate(&SchemaNode::new(raw.as_map().unwrap())).unwrap();
        assert_eq!(validator.multiple_of, Some(5));
        assert_eq!(validator.maximum, Some(50));
        assert!(validator.exclusive_maximum);
        assert_eq!(validator.minimum, Some(10));
        assert!(!validator.exclusive_minimum);
    }

    #[test]
    fn zero_multiple_of_is_rejected() {
        let raw: Value = serde_json::from_str(r#"{"bsonType":"int","multipleOf":0}"#).unwrap();
        assert_eq!(
            Int32Validator::populate(&SchemaNode::new(raw.as_map().unwrap())),
            Err(CompileError::ZeroMultipleOf)
        );
    }
}
