//! Key Generation Module
//!
//! Derives stable cache keys from an operation identity and its arguments.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::error::{CacheError, Result};

// == Cache Key ==
/// A non-empty key identifying one cacheable operation result.
///
/// Keys start with the operation identity so that prefix rules written
/// against operation names also apply to keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// == Key Generator ==
/// Stateless generator producing `Identity(args)` keys.
///
/// Arguments are serialized to JSON through `serde_json::Value`, whose object
/// keys are sorted, so equal argument values always produce the same key
/// regardless of map iteration order.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyGenerator;

impl KeyGenerator {
    pub fn new() -> Self {
        Self
    }

    // == Generate ==
    /// Generates the key for `identity` called with `args`.
    ///
    /// Pass a tuple for multiple arguments and `()` for none.
    ///
    /// # Errors
    /// `CacheError::KeyGeneration` if the identity is empty or the arguments
    /// cannot be represented (e.g. maps with non-string keys).
    pub fn generate<A>(&self, identity: &str, args: &A) -> Result<CacheKey>
    where
        A: Serialize + ?Sized,
    {
        if identity.is_empty() {
            return Err(key_error(identity, "operation identity must not be empty"));
        }

        let value = serde_json::to_value(args).map_err(|e| key_error(identity, e))?;
        let rendered = match value {
            Value::Null => String::new(),
            other => other.to_string(),
        };

        Ok(CacheKey(format!("{}({})", identity, rendered)))
    }
}

fn key_error(identity: &str, reason: impl fmt::Display) -> CacheError {
    CacheError::KeyGeneration {
        identity: identity.to_string(),
        reason: reason.to_string(),
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use std::collections::{BTreeMap, HashMap};

    #[derive(Serialize)]
    struct Person {
        id: u32,
        name: String,
    }

    #[test]
    fn test_generate_no_args() {
        let key = KeyGenerator::new().generate("RetrievePersons", &()).unwrap();
        assert_eq!(key.as_str(), "RetrievePersons()");
    }

    #[test]
    fn test_generate_scalar_and_tuple() {
        let gen = KeyGenerator::new();

        assert_eq!(gen.generate("GetPerson", &1).unwrap().as_str(), "GetPerson(1)");
        assert_eq!(
            gen.generate("GetPerson", &(1, "x")).unwrap().as_str(),
            r#"GetPerson([1,"x"])"#
        );
    }

    #[test]
    fn test_generate_is_deterministic_by_value() {
        let gen = KeyGenerator::new();
        let a = Person { id: 7, name: "Ada".into() };
        let b = Person { id: 7, name: "Ada".into() };

        assert_eq!(
            gen.generate("RetrievePerson", &a).unwrap(),
            gen.generate("RetrievePerson", &b).unwrap()
        );
    }

    #[test]
    fn test_generate_distinguishes_arguments() {
        let gen = KeyGenerator::new();
        let one = gen.generate("GetPerson", &(1, 2)).unwrap();
        let two = gen.generate("GetPerson", &(2, 1)).unwrap();
        let other_op = gen.generate("GetPet", &(1, 2)).unwrap();

        assert_ne!(one, two);
        assert_ne!(one, other_op);
    }

    #[test]
    fn test_generate_ignores_map_order() {
        let gen = KeyGenerator::new();
        let mut hashed = HashMap::new();
        let mut ordered = BTreeMap::new();
        for (k, v) in [("b", 2), ("a", 1), ("c", 3)] {
            hashed.insert(k, v);
            ordered.insert(k, v);
        }

        assert_eq!(
            gen.generate("Find", &hashed).unwrap(),
            gen.generate("Find", &ordered).unwrap()
        );
    }

    #[test]
    fn test_key_starts_with_identity() {
        let key = KeyGenerator::new().generate("GetPerson", &42).unwrap();
        assert!(key.as_str().starts_with("GetPerson"));
        assert_eq!(key.to_string(), "GetPerson(42)");
    }

    #[test]
    fn test_empty_identity_rejected() {
        let result = KeyGenerator::new().generate("", &1);
        assert!(matches!(result, Err(CacheError::KeyGeneration { .. })));
    }

    #[test]
    fn test_unsupported_map_keys_rejected() {
        let mut args = HashMap::new();
        args.insert((1, 2), "pair");

        let result = KeyGenerator::new().generate("Find", &args);
        assert!(matches!(result, Err(CacheError::KeyGeneration { .. })));
    }
}
