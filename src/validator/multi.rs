use super::*;

/// Ordered candidate validators for a single field.
///
/// A field declared as `bsonType: ["bool", "int"]` compiles to one candidate
/// per name; a value passes the moment any candidate passes, tried in
/// declaration order. When every candidate fails, the violation reported is
/// the first candidate's, with the observed kind attached so the reader can
/// see what the document actually held.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MultiValidator {
    /// The candidates, one per declared kind, in declaration order.
    pub any_of: Vec<Validator>,
}

impl MultiValidator {
    /// Make a new, empty candidate list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add another candidate validator.
    pub fn push(mut self, validator: Validator) -> Self {
        self.any_of.push(validator);
        self
    }

    /// Iterate over the candidates.
    pub fn iter(&self) -> std::slice::Iter<Validator> {
        self.any_of.iter()
    }

    pub(crate) fn verify(&self, path: &str, value: &Value, violations: &mut Vec<Violation>) {
        let mut first_fail: Option<Vec<Violation>> = None;
        for candidate in &self.any_of {
            let mut scratch = Vec::new();
            candidate.verify(path, value, &mut scratch);
            if scratch.is_empty() {
                return;
            }
            if first_fail.is_none() {
                first_fail = Some(scratch);
            }
        }
        let Some(mut fails) = first_fail else {
            // An empty candidate list passes everything; the compiler never
            // produces one.
            return;
        };
        if self.any_of.len() > 1 {
            // Union field: collapse to a single violation naming the first
            // candidate's complaint and what the document actually held.
            let first = fails.remove(0);
            violations.push(Violation::new(
                path,
                format!("{} (got {})", first.message, value.kind_name()),
            ));
        } else {
            violations.append(&mut fails);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn bool_or_int() -> MultiValidator {
        MultiValidator::new()
            .push(BoolValidator::new().build())
            .push(Int32Validator::new().build())
    }

    #[test]
    fn union_accepts_any_declared_kind() {
        let multi = bool_or_int();
        let mut violations = Vec::new();
        multi.verify("flag", &Value::from(true), &mut violations);
        multi.verify("flag", &Value::from(7), &mut violations);
        assert!(violations.is_empty());
    }

    #[test]
    fn union_rejects_a_third_kind() {
        let multi = bool_or_int();
        let mut violations = Vec::new();
        multi.verify("flag", &Value::from("yes"), &mut violations);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].path, "flag");
        assert!(violations[0].message.contains("got string"));
    }

    #[test]
    fn single_candidate_keeps_its_message() {
        let multi = MultiValidator::new().push(Int32Validator::new().maximum(10).build());
        let mut violations = Vec::new();
        multi.verify("count", &Value::from(11), &mut violations);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].message, "maximum value exceeded");
    }
}
