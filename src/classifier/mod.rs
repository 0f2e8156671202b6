//! Number classifier
//!
//! Pure functions describing mathematical properties of an integer, and the
//! response record composed from them. Nothing here holds state, so results
//! are identical for identical inputs.

mod fact;
mod predicates;

pub use fact::build_fun_fact;
pub use predicates::{
    digit_sum, is_armstrong, is_even, is_perfect, is_perfect_cancellable, is_prime,
    is_prime_cancellable,
};

use std::sync::atomic::AtomicBool;

use serde::Serialize;

/// Property tag reported in the `properties` array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Property {
    Even,
    Odd,
    Armstrong,
}

/// Parity tag first, then `armstrong` when it applies.
pub fn compose_properties(n: i64) -> Vec<Property> {
    let mut properties = Vec::with_capacity(2);
    properties.push(if is_even(n) {
        Property::Even
    } else {
        Property::Odd
    });
    if is_armstrong(n) {
        properties.push(Property::Armstrong);
    }
    properties
}

/// Successful classification body
///
/// Field order is the JSON key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationResult {
    pub number: i64,
    pub is_prime: bool,
    pub is_perfect: bool,
    pub properties: Vec<Property>,
    pub digit_sum: u64,
    pub fun_fact: String,
}

impl ClassificationResult {
    /// Run every predicate against `number`
    #[allow(dead_code)]
    pub fn classify(number: i64) -> Self {
        Self {
            number,
            is_prime: is_prime(number),
            is_perfect: is_perfect(number),
            properties: compose_properties(number),
            digit_sum: digit_sum(number),
            fun_fact: build_fun_fact(number),
        }
    }

    /// `classify` that returns `None` once `cancel` is raised mid-computation
    pub fn classify_cancellable(number: i64, cancel: &AtomicBool) -> Option<Self> {
        Some(Self {
            number,
            is_prime: is_prime_cancellable(number, cancel)?,
            is_perfect: is_perfect_cancellable(number, cancel)?,
            properties: compose_properties(number),
            digit_sum: digit_sum(number),
            fun_fact: build_fun_fact(number),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_properties() {
        assert_eq!(
            compose_properties(153),
            vec![Property::Odd, Property::Armstrong]
        );
        // Every single-digit value is its own digit to the first power
        assert_eq!(
            compose_properties(4),
            vec![Property::Even, Property::Armstrong]
        );
        assert_eq!(compose_properties(10), vec![Property::Even]);
        assert_eq!(
            compose_properties(0),
            vec![Property::Even, Property::Armstrong]
        );
        assert_eq!(compose_properties(-153), vec![Property::Odd]);
    }

    #[test]
    fn test_property_serializes_lowercase() {
        let json = serde_json::to_string(&compose_properties(371)).unwrap();
        assert_eq!(json, r#"["odd","armstrong"]"#);
    }

    #[test]
    fn test_classify_28() {
        let result = ClassificationResult::classify(28);
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(
            json,
            r#"{"number":28,"is_prime":false,"is_perfect":true,"properties":["even"],"digit_sum":10,"fun_fact":"28 is an interesting number."}"#
        );
    }

    #[test]
    fn test_classify_matches_predicates() {
        for n in [-97, -1, 0, 1, 2, 7, 153, 496, 9474, 104_729] {
            let result = ClassificationResult::classify(n);
            assert_eq!(result.number, n);
            assert_eq!(result.is_prime, is_prime(n));
            assert_eq!(result.is_perfect, is_perfect(n));
            assert_eq!(result.digit_sum, digit_sum(n));
            assert_eq!(result.properties, compose_properties(n));
        }
    }

    #[test]
    fn test_classify_cancellable() {
        let idle = AtomicBool::new(false);
        assert_eq!(
            ClassificationResult::classify_cancellable(496, &idle),
            Some(ClassificationResult::classify(496))
        );

        let raised = AtomicBool::new(true);
        assert_eq!(
            ClassificationResult::classify_cancellable(9_223_372_036_854_775_783, &raised),
            None
        );
    }

    #[test]
    fn test_classify_is_deterministic() {
        let first = serde_json::to_vec(&ClassificationResult::classify(8128)).unwrap();
        let second = serde_json::to_vec(&ClassificationResult::classify(8128)).unwrap();
        assert_eq!(first, second);
    }
}
