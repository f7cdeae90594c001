use super::*;
use crate::coerce;
use crate::date_layout;

/// Validator for date values (`bsonType: "date"`).
///
/// Dates are Unix seconds internally: a document value must coerce exactly
/// to an `i64`, under the same rules as [`Int64Validator`]. The schema-side
/// `maximum`/`minimum` bounds are not numeric literals but human-readable
/// timestamps, parsed with the process-wide date layout
/// (see [`set_date_layout`][crate::set_date_layout]; default long form:
/// `Jan 2, 2006 at 3:04pm (MST)`) and compared as seconds in UTC.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DateValidator {
    /// Metadata only; no impact on validation.
    pub title: String,
    /// Metadata only; no impact on validation.
    pub description: String,
    /// Allow-list, normalized to Unix seconds at compile time.
    pub enum_set: EnumSet,
    /// An integer divisor of the field value, in seconds.
    pub multiple_of: Option<i64>,
    /// The maximum allowed timestamp, in Unix seconds.
    pub maximum: Option<i64>,
    /// If true, the value must be strictly less than `maximum`.
    pub exclusive_maximum: bool,
    /// The minimum allowed timestamp, in Unix seconds.
    pub minimum: Option<i64>,
    /// If true, the value must be strictly greater than `minimum`.
    pub exclusive_minimum: bool,
    /// Accept a float with no fractional component as a timestamp.
    pub accept_float: bool,
}

impl DateValidator {
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

    /// Set the required divisor, in seconds.
    pub fn multiple_of(mut self, multiple_of: i64) -> Self {
        self.multiple_of = Some(multiple_of);
        self
    }

    /// Set whether floats with no fractional component are accepted.
    pub fn accept_float(mut self, accept_float: bool) -> Self {
        self.accept_float = accept_float;
        self
    }

    /// Set the maximum allowed timestamp, in Unix seconds.
    pub fn maximum(mut self, maximum: i64) -> Self {
        self.maximum = Some(maximum);
        self
    }

    /// Set whether or not `maximum` is an exclusive maximum.
    pub fn exclusive_maximum(mut self, exclusive: bool) -> Self {
        self.exclusive_maximum = exclusive;
        self
    }

    /// Set the minimum allowed timestamp, in Unix seconds.
    pub fn minimum(mut self, minimum: i64) -> Self {
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
        Validator::Date(Box::new(self))
    }

    pub(crate) fn populate(node: &SchemaNode) -> Result<Self> {
        let (title, description, mut enum_set) = populate_common(node)?;
        enum_set.normalize(Kind::Date)?;
        let multiple_of = node.get_i64("multipleOf")?;
        if multiple_of == Some(0) {
            return Err(CompileError::ZeroMultipleOf);
        }
        let maximum = match node.get_str("maximum")? {
            None => None,
            Some(text) => Some(date_layout::parse_to_unix(text)?),
        };
        let minimum = match node.get_str("minimum")? {
            None => None,
            Some(text) => Some(date_layout::parse_to_unix(text)?),
        };
        Ok(Self {
            title,
            description,
            enum_set,
            multiple_of,
            maximum,
            exclusive_maximum: node.get_bool("exclusiveMaximum")?.unwrap_or(false),
            minimum,
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
                return Err(format!("timestamp must be multiple of {}", multiple_of));
            }
        }
        if let Some(maximum) = self.maximum {
            if converted > maximum || (self.exclusive_maximum && converted == maximum) {
                return Err("maximum date exceeded".to_string());
            }
        }
        if let Some(minimum) = self.minimum {
            if converted < minimum || (self.exclusive_minimum && converted == minimum) {
                return Err("expected minimum date".to_string());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn bounds_compare_as_unix_seconds() {
        // Jan 2, 2006 at 3:04pm UTC.
        let validator = DateValidator::new().maximum(1_136_214_240).minimum(0);
        assert!(validator.verify(&Value::from(1_000_000_000i64)).is_ok());
        assert!(validator.verify(&Value::from(1_136_214_240i64)).is_ok());
        assert!(validator.verify(&Value::from(1_136_214_241i64)).is_err());
        assert!(validator.verify(&Value::from(-1i64)).is_err());
    }

    #[test]
    fn populate_parses_layout_bounds() {
        let raw: Value = serde_json::from_str(
            r#"{"bsonType":"date","maximum":"Jan 2, 2006 at 3:04pm (MST)","minimum":"Jan 1, 2006 at 12:00am (MST)"}"#,
        )
        .unwrap();
        let validator = DateValidator::populate(&SchemaNode::new(raw.as_map().unwrap())).unwrap();
        assert_eq!(validator.maximum, Some(1_136_214_240));
        assert_eq!(validator.minimum, Some(1_136_073_600));
    }

    #[test]
    fn unparseable_bound_fails_compilation() {
        let raw: Value =
            serde_json::from_str(r#"{"bsonType":"date","maximum":"tomorrow-ish"}"#).unwrap();
        assert!(matches!(
            DateValidator::populate(&SchemaNode::new(raw.as_map().unwrap())),
            Err(CompileError::BadDate(_))
        ));
    }

    #[test]
    fn non_numeric_values_fail() {
        let validator = DateValidator::new();
        assert!(validator.verify(&Value::from(1_136_214_240i64)).is_ok());
        assert!(validator.verify(&Value::from(true)).is_err());
    }
}
