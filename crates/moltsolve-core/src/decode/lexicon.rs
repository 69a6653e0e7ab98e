//! Static number-word tables
//!
//! Only zero through ninety (by tens) are needed; challenge answers never
//! involve spelled hundreds.

pub const ONES: &[(&str, i64)] = &[
    ("zero", 0),
    ("one", 1),
    ("two", 2),
    ("three", 3),
    ("four", 4),
    ("five", 5),
    ("six", 6),
    ("seven", 7),
    ("eight", 8),
    ("nine", 9),
    ("ten", 10),
    ("eleven", 11),
    ("twelve", 12),
    ("thirteen", 13),
    ("fourteen", 14),
    ("fifteen", 15),
    ("sixteen", 16),
    ("seventeen", 17),
    ("eighteen", 18),
    ("nineteen", 19),
];

pub const TENS: &[(&str, i64)] = &[
    ("twenty", 20),
    ("thirty", 30),
    ("forty", 40),
    ("fifty", 50),
    ("sixty", 60),
    ("seventy", 70),
    ("eighty", 80),
    ("ninety", 90),
];

/// Misspellings seen in real challenges. Short ones are still subject to the
/// matcher's length guard.
pub const VARIANTS: &[(&str, i64)] = &[
    ("tree", 3),
    ("fiv", 5),
    ("sevon", 7),
    ("nin", 9),
    ("twelv", 12),
    ("fourty", 40),
    ("ninty", 90),
];

/// Canonical words followed by variants, in lookup precedence order
pub fn entries() -> impl Iterator<Item = (&'static str, i64)> {
    ONES.iter().chain(TENS).chain(VARIANTS).copied()
}

/// Units usable as the second half of a compound (one..nineteen)
pub fn units() -> impl Iterator<Item = (&'static str, i64)> {
    ONES.iter().skip(1).copied()
}

/// Exact lookup against canonical words and known variants
pub fn lookup(word: &str) -> Option<i64> {
    entries().find(|(name, _)| *name == word).map(|(_, v)| v)
}

/// Words that can open a compound: the tens plus their misspellings
pub fn tens_prefixes() -> impl Iterator<Item = (&'static str, i64)> {
    TENS.iter()
        .chain(VARIANTS.iter().filter(|(_, v)| *v >= 20 && *v % 10 == 0))
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_canonical() {
        assert_eq!(lookup("zero"), Some(0));
        assert_eq!(lookup("nineteen"), Some(19));
        assert_eq!(lookup("ninety"), Some(90));
        assert_eq!(lookup("hundred"), None);
    }

    #[test]
    fn test_lookup_variants() {
        assert_eq!(lookup("fourty"), Some(40));
        assert_eq!(lookup("sevon"), Some(7));
    }

    #[test]
    fn test_tens_prefixes_include_misspellings() {
        let prefixes: Vec<_> = tens_prefixes().map(|(w, _)| w).collect();
        assert!(prefixes.contains(&"thirty"));
        assert!(prefixes.contains(&"fourty"));
        assert!(!prefixes.contains(&"three"));
        assert!(!prefixes.contains(&"sevon"));
    }

    #[test]
    fn test_units_exclude_zero() {
        let units: Vec<_> = units().collect();
        assert_eq!(units.first(), Some(&("one", 1)));
        assert_eq!(units.last(), Some(&("nineteen", 19)));
        assert_eq!(units.len(), 19);
    }

    #[test]
    fn test_no_duplicate_words() {
        let mut words: Vec<_> = entries().map(|(w, _)| w).collect();
        let total = words.len();
        words.sort_unstable();
        words.dedup();
        assert_eq!(words.len(), total);
    }
}
