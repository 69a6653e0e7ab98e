//! Property-based tests for normalization and composition

use moltsolve_core::decode::{compose_answer, match_number, normalize, ExtractedValue, Provenance};
use proptest::prelude::*;

const WORDS: &[(&str, i64)] = &[
    ("zero", 0),
    ("four", 4),
    ("seven", 7),
    ("eleven", 11),
    ("fifteen", 15),
    ("nineteen", 19),
    ("twenty", 20),
    ("fifty", 50),
    ("ninety", 90),
];

fn provenance() -> impl Strategy<Value = Provenance> {
    prop_oneof![
        Just(Provenance::Bracket),
        Just(Provenance::Plain),
        Just(Provenance::Word),
        Just(Provenance::Compound),
        Just(Provenance::Single),
    ]
}

proptest! {
    #[test]
    fn normalize_is_idempotent(text in "\\PC*") {
        let once = normalize(&text);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn normalize_keeps_only_lowercase_letters(text in "[a-zA-Z0-9 ^~{}<>/-]{0,40}") {
        let normalized = normalize(&text);
        prop_assert!(normalized.chars().all(|c| c.is_ascii_lowercase()));
    }

    #[test]
    fn matching_ignores_case(index in 0..WORDS.len(), mask in proptest::collection::vec(any::<bool>(), 9)) {
        let (word, value) = WORDS[index];
        let cased: String = word
            .chars()
            .zip(mask.iter().cycle())
            .map(|(c, upper)| if *upper { c.to_ascii_uppercase() } else { c })
            .collect();
        prop_assert_eq!(match_number(&cased), Some(value));
    }

    #[test]
    fn composing_is_deterministic(values in proptest::collection::vec((provenance(), 0i64..100), 0..8)) {
        let values: Vec<ExtractedValue> = values
            .into_iter()
            .map(|(p, v)| ExtractedValue::new(p, v))
            .collect();
        prop_assert_eq!(compose_answer(&values), compose_answer(&values));
    }
}
