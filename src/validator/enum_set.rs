use super::*;
use crate::coerce;

/// A fixed allow-list of admissible values for one field.
///
/// The raw literal list out of the schema is heterogeneous; at compile time
/// [`normalize`][Self::normalize] converts every literal into the owning
/// validator's canonical representation (numeric kinds route through the
/// coercion matrix), so the membership test at verify time is plain value
/// equality. `null` literals survive normalization untouched, which is how a
/// field opts into accepting explicit nulls.
///
/// An absent or empty list always passes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EnumSet {
    values: Option<Vec<Value>>,
}

impl EnumSet {
    /// Make a new, unconstrained set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a literal to the allow-list.
    pub fn insert(mut self, value: impl Into<Value>) -> Self {
        self.values.get_or_insert_with(Vec::new).push(value.into());
        self
    }

    pub(crate) fn populate(node: &SchemaNode) -> Result<Self> {
        let values = match node.get("enum") {
            None => None,
            Some(Value::Array(list)) if list.is_empty() => None,
            Some(Value::Array(list)) => Some(list.clone()),
            Some(_) => {
                return Err(CompileError::WrongType {
                    key: "enum",
                    expected: "an array",
                })
            }
        };
        Ok(Self { values })
    }

    /// True if an enum list was declared for the field.
    pub fn governs(&self) -> bool {
        self.values.is_some()
    }

    /// True if the list contains an explicit `null` literal.
    pub fn allows_null(&self) -> bool {
        self.values
            .as_ref()
            .map(|values| values.iter().any(Value::is_null))
            .unwrap_or(false)
    }

    /// Convert every literal into the canonical representation of `kind`.
    /// Numeric kinds use the coercion matrix with integral floats accepted;
    /// a literal that cannot convert is a compile error.
    pub(crate) fn normalize(&mut self, kind: Kind) -> Result<()> {
        let Some(values) = self.values.as_mut() else {
            return Ok(());
        };
        for value in values.iter_mut() {
            if value.is_null() {
                continue;
            }
            *value = match kind {
                Kind::Int32 => Value::from(
                    coerce::to_i32(value, true)
                        .map_err(|e| CompileError::BadEnum(e.to_string()))?,
                ),
                Kind::Int64 | Kind::Date => Value::from(
                    coerce::to_i64(value, true)
                        .map_err(|e| CompileError::BadEnum(e.to_string()))?,
                ),
                Kind::Float32 => Value::from(
                    coerce::to_f32(value).map_err(|e| CompileError::BadEnum(e.to_string()))?,
                ),
                Kind::Float64 => Value::from(
                    coerce::to_f64(value).map_err(|e| CompileError::BadEnum(e.to_string()))?,
                ),
                _ => continue,
            };
        }
        Ok(())
    }

    /// Membership test on the normalized representation.
    pub(crate) fn verify(&self, value: &Value) -> Result<(), String> {
        let Some(values) = self.values.as_ref() else {
            return Ok(());
        };
        if values.iter().any(|allowed| allowed == value) {
            Ok(())
        } else {
            Err("value is not on the enum list".to_string())
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn absent_list_always_passes() {
        let set = EnumSet::new();
        assert!(!set.governs());
        assert!(set.verify(&Value::from("anything")).is_ok());
    }

    #[test]
    fn membership_after_int_normalization() {
        let mut set = EnumSet::new()
            .insert(1u8)
            .insert(10i64)
            .insert(100.0f64)
            .insert("1000");
        set.normalize(Kind::Int32).unwrap();
        assert!(set.verify(&Value::from(10)).is_ok());
        assert!(set.verify(&Value::from(100)).is_ok());
        assert!(set.verify(&Value::from(1000)).is_ok());
        assert!(set.verify(&Value::from(7)).is_err());
    }

    #[test]
    fn null_literal_survives_and_governs() {
        let mut set = EnumSet::new().insert("um").insert(Value::Null);
        set.normalize(Kind::String).unwrap();
        assert!(set.allows_null());
        assert!(set.verify(&Value::Null).is_ok());
        assert!(set.verify(&Value::from("quatro")).is_err());
    }

    #[test]
    fn fractional_literal_fails_int_normalization() {
        let mut set = EnumSet::new().insert(1.5f64);
        assert!(matches!(
            set.normalize(Kind::Int32),
            Err(CompileError::BadEnum(_))
        ));
    }

    #[test]
    fn float_normalization_widens_ints() {
        let mut set = EnumSet::new().insert(22u8);
        set.normalize(Kind::Float32).unwrap();
        assert!(set.verify(&Value::from(22.0f32)).is_ok());
    }
}
