//! Typed read access to a raw schema map during compilation.

use std::collections::BTreeMap;

use regex::{Regex, RegexBuilder};

use crate::coerce;
use crate::error::{CompileError, Result};
use crate::value::Value;

/// A borrowed view over one raw schema object. Exists only while the
/// compiler walks the schema tree; the compiled validators own their data
/// outright.
#[derive(Clone, Copy)]
pub(crate) struct SchemaNode<'a> {
    map: &'a BTreeMap<String, Value>,
}

impl<'a> SchemaNode<'a> {
    pub fn new(map: &'a BTreeMap<String, Value>) -> Self {
        Self { map }
    }

    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key)
    }

    pub fn has(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    pub fn get_str(&self, key: &'static str) -> Result<Option<&'a str>> {
        match self.map.get(key) {
            None => Ok(None),
            Some(Value::Str(s)) => Ok(Some(s)),
            Some(_) => Err(CompileError::WrongType {
                key,
                expected: "a string",
            }),
        }
    }

    /// Numeric schema properties accept any integer representation, an
    /// integral float, or a numeral string, all routed through the coercion
    /// matrix.
    pub fn get_i64(&self, key: &'static str) -> Result<Option<i64>> {
        match self.map.get(key) {
            None => Ok(None),
            Some(value) => coerce::to_i64(value, true).map(Some).map_err(|_| {
                CompileError::WrongType {
                    key,
                    expected: "numeric",
                }
            }),
        }
    }

    pub fn get_i32(&self, key: &'static str) -> Result<Option<i32>> {
        match self.map.get(key) {
            None => Ok(None),
            Some(value) => coerce::to_i32(value, true).map(Some).map_err(|_| {
                CompileError::WrongType {
                    key,
                    expected: "numeric",
                }
            }),
        }
    }

    pub fn get_u64(&self, key: &'static str) -> Result<Option<u64>> {
        match self.get_i64(key)? {
            None => Ok(None),
            Some(n) => u64::try_from(n).map(Some).map_err(|_| {
                CompileError::WrongType {
                    key,
                    expected: "a non-negative integer",
                }
            }),
        }
    }

    pub fn get_f32(&self, key: &'static str) -> Result<Option<f32>> {
        match self.map.get(key) {
            None => Ok(None),
            Some(value) => coerce::to_f32(value).map(Some).map_err(|_| {
                CompileError::WrongType {
                    key,
                    expected: "numeric",
                }
            }),
        }
    }

    pub fn get_f64(&self, key: &'static str) -> Result<Option<f64>> {
        match self.map.get(key) {
            None => Ok(None),
            Some(value) => coerce::to_f64(value).map(Some).map_err(|_| {
                CompileError::WrongType {
                    key,
                    expected: "numeric",
                }
            }),
        }
    }

    /// Booleans may also be spelled as the strings `"true"`/`"false"`, in
    /// any case.
    pub fn get_bool(&self, key: &'static str) -> Result<Option<bool>> {
        match self.map.get(key) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(Value::Str(s)) => match s.to_ascii_lowercase().parse::<bool>() {
                Ok(b) => Ok(Some(b)),
                Err(_) => Err(CompileError::WrongType {
                    key,
                    expected: "a boolean",
                }),
            },
            Some(_) => Err(CompileError::WrongType {
                key,
                expected: "a boolean",
            }),
        }
    }

    /// Compile a regular expression property. A pattern the default builder
    /// rejects gets one more attempt with Unicode mode disabled before the
    /// schema is rejected.
    pub fn get_regex(&self, key: &'static str) -> Result<Option<Regex>> {
        let pattern = match self.get_str(key)? {
            None => return Ok(None),
            Some(p) => p,
        };
        match Regex::new(pattern) {
            Ok(regex) => Ok(Some(regex)),
            Err(first) => RegexBuilder::new(pattern)
                .unicode(false)
                .build()
                .map(Some)
                .map_err(|_| CompileError::BadRegex {
                    pattern: pattern.to_string(),
                    error: first.to_string(),
                }),
        }
    }

    pub fn get_list(&self, key: &'static str) -> Result<Option<&'a Vec<Value>>> {
        match self.map.get(key) {
            None => Ok(None),
            Some(Value::Array(list)) => Ok(Some(list)),
            Some(_) => Err(CompileError::WrongType {
                key,
                expected: "an array",
            }),
        }
    }

    pub fn get_map(&self, key: &'static str) -> Result<Option<&'a BTreeMap<String, Value>>> {
        match self.map.get(key) {
            None => Ok(None),
            Some(Value::Map(map)) => Ok(Some(map)),
            Some(_) => Err(CompileError::WrongType {
                key,
                expected: "an object",
            }),
        }
    }

    pub fn get_string_list(&self, key: &'static str) -> Result<Option<Vec<String>>> {
        match self.get_list(key)? {
            None => Ok(None),
            Some(list) => list
                .iter()
                .map(|item| match item {
                    Value::Str(s) => Ok(s.clone()),
                    _ => Err(CompileError::WrongType {
                        key,
                        expected: "an array of strings",
                    }),
                })
                .collect::<Result<Vec<_>>>()
                .map(Some),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn node_from_json(json: &str) -> BTreeMap<String, Value> {
        match serde_json::from_str::<Value>(json).unwrap() {
            Value::Map(map) => map,
            _ => panic!("test schema must be an object"),
        }
    }

    #[test]
    fn numeric_getters_route_through_coercion() {
        let map = node_from_json(r#"{"a": 5, "b": 5.0, "c": "5", "d": 5.5}"#);
        let node = SchemaNode::new(&map);
        assert_eq!(node.get_i64("a").unwrap(), Some(5));
        assert_eq!(node.get_i64("b").unwrap(), Some(5));
        assert_eq!(node.get_i64("c").unwrap(), Some(5));
        assert!(node.get_i64("d").is_err());
        assert_eq!(node.get_f64("d").unwrap(), Some(5.5));
        assert_eq!(node.get_i64("missing").unwrap(), None);
    }

    #[test]
    fn bool_getter_accepts_strings() {
        let map = node_from_json(r#"{"a": true, "b": "True", "c": "yes"}"#);
        let node = SchemaNode::new(&map);
        assert_eq!(node.get_bool("a").unwrap(), Some(true));
        assert_eq!(node.get_bool("b").unwrap(), Some(true));
        assert!(node.get_bool("c").is_err());
    }

    #[test]
    fn bad_regex_is_a_compile_error() {
        let map = node_from_json(r#"{"pattern": "["}"#);
        let node = SchemaNode::new(&map);
        assert!(matches!(
            node.get_regex("pattern"),
            Err(CompileError::BadRegex { .. })
        ));
    }

    #[test]
    fn string_list_getter() {
        let map = node_from_json(r#"{"required": ["name", "number"], "bad": ["name", 3]}"#);
        let node = SchemaNode::new(&map);
        assert_eq!(
            node.get_string_list("required").unwrap(),
            Some(vec!["name".to_string(), "number".to_string()])
        );
        assert!(node.get_string_list("bad").is_err());
    }
}
