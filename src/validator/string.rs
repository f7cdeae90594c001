use super::*;
use regex::Regex;

/// Validator for UTF-8 string values (`bsonType: "string"`).
///
/// Validation passes if:
///
/// - The value is a string (no coercion from other kinds).
/// - If an `enum` list is declared, the string is on it.
/// - The number of characters is within `max_length`/`min_length`. Lengths
///   count characters, not bytes.
/// - If a `pattern` is present, the string matches it. The match is
///   unanchored, as in the source dialect; anchor explicitly with `^`/`$`
///   for a whole-string match.
#[derive(Clone, Debug, Default)]
pub struct StrValidator {
    /// Metadata only; no impact on validation.
    pub title: String,
    /// Metadata only; no impact on validation.
    pub description: String,
    /// Allow-list of admissible strings (and possibly `null`).
    pub enum_set: EnumSet,
    /// The maximum number of characters in the string.
    pub max_length: Option<usize>,
    /// The minimum number of characters in the string.
    pub min_length: Option<usize>,
    /// A regular expression the string value must match.
    pub pattern: Option<Regex>,
}

impl StrValidator {
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

    /// Set the maximum number of characters.
    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Set the minimum number of characters.
    pub fn min_length(mut self, min_length: usize) -> Self {
        self.min_length = Some(min_length);
        self
    }

    /// Set the regular expression to check against.
    pub fn pattern(mut self, pattern: Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// Build this into a [`Validator`] enum.
    pub fn build(self) -> Validator {
        Validator::Str(Box::new(self))
    }

    pub(crate) fn populate(node: &SchemaNode) -> Result<Self> {
        let (title, description, enum_set) = populate_common(node)?;
        let max_length = match node.get_i64("maxLength")? {
            None => None,
            Some(n) => Some(usize::try_from(n).map_err(|_| CompileError::WrongType {
                key: "maxLength",
                expected: "a non-negative integer",
            })?),
        };
        let min_length = match node.get_i64("minLength")? {
            None => None,
            Some(n) => Some(usize::try_from(n).map_err(|_| CompileError::WrongType {
                key: "minLength",
                expected: "a non-negative integer",
            })?),
        };
        Ok(Self {
            title,
            description,
            enum_set,
            max_length,
            min_length,
            pattern: node.get_regex("pattern")?,
        })
    }

    pub(crate) fn verify(&self, value: &Value) -> Result<(), String> {
        if value.is_null() {
            if self.enum_set.governs() {
                return self.enum_set.verify(value);
            }
            return Ok(());
        }
        let Some(val) = value.as_str() else {
            return Err(format!("wrong type: got {}", value.kind_name()));
        };
        self.enum_set.verify(value)?;
        if self.max_length.is_some() || self.min_length.is_some() {
            let len_chars = bytecount::num_chars(val.as_bytes());
            if let Some(max_length) = self.max_length {
                if len_chars > max_length {
                    return Err("maximum string length exceeded".to_string());
                }
            }
            if let Some(min_length) = self.min_length {
                if len_chars < min_length {
                    return Err("minimum string length expected".to_string());
                }
            }
        }
        if let Some(ref pattern) = self.pattern {
            if !pattern.is_match(val) {
                return Err("string does not match the pattern".to_string());
            }
        }
        Ok(())
    }
}

impl PartialEq for StrValidator {
    fn eq(&self, rhs: &Self) -> bool {
        self.title == rhs.title
            && self.description == rhs.description
            && self.enum_set == rhs.enum_set
            && self.max_length == rhs.max_length
            && self.min_length == rhs.min_length
            && match (&self.pattern, &rhs.pattern) {
                (None, None) => true,
                (Some(lhs), Some(rhs)) => lhs.as_str() == rhs.as_str(),
                _ => false,
            }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn lengths_count_characters() {
        let validator = StrValidator::new().max_length(4).min_length(2);
        assert!(validator.verify(&Value::from("três")).is_ok());
        assert!(validator.verify(&Value::from("x")).is_err());
        assert!(validator.verify(&Value::from("quatro")).is_err());
    }

    #[test]
    fn pattern_must_match() {
        let validator = StrValidator::new()
            .pattern(Regex::new("^[a-z][a-z0-9]+$").unwrap())
            .max_length(20)
            .min_length(3);
        assert!(validator.verify(&Value::from("abc123")).is_ok());
        assert_eq!(
            validator.verify(&Value::from("1abc")),
            Err("string does not match the pattern".to_string())
        );
        // A matching value passes independent of other constraints being
        // present, as long as they also hold.
        assert!(validator.verify(&Value::from("ab")).is_err());
    }

    #[test]
    fn enum_with_null() {
        let raw: Value =
            serde_json::from_str(r#"{"bsonType":"string","enum":["um","dois","três",null]}"#)
                .unwrap();
        let validator = StrValidator::populate(&SchemaNode::new(raw.as_map().unwrap())).unwrap();
        assert!(validator.verify(&Value::Null).is_ok());
        assert!(validator.verify(&Value::from("dois")).is_ok());
        assert!(validator.verify(&Value::from("quatro")).is_err());
    }

    #[test]
    fn non_strings_are_wrong_type() {
        let validator = StrValidator::new();
        assert_eq!(
            validator.verify(&Value::from(3)),
            Err("wrong type: got int".to_string())
        );
    }

    #[test]
    fn populate_equality_is_structural() {
        let raw: Value = serde_json::from_str(
            r#"{"bsonType":"string","maxLength":20,"minLength":3,"pattern":"^[a-z]+$"}"#,
        )
        .unwrap();
        let a = StrValidator::populate(&SchemaNode::new(raw.as_map().unwrap())).unwrap();
        let b = StrValidator::populate(&SchemaNode::new(raw.as_map().unwrap())).unwrap();
        assert_eq!(a, b);
    }
}
