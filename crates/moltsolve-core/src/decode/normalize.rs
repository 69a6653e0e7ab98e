//! Token normalization
//!
//! Challenge text hides number words behind random casing and punctuation
//! ("tW/eN-tY"). Everything downstream compares letters only, so this is the
//! first thing applied to any candidate token.

/// Strip every non-alphabetic character and lowercase the rest.
///
/// Total and idempotent: input without letters yields an empty string.
pub fn normalize(text: &str) -> String {
    text.chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_alphabetic())
        .collect()
}

/// A scanned substring together with its letters-only form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberToken<'a> {
    pub raw: &'a str,
    pub normalized: String,
}

impl<'a> NumberToken<'a> {
    pub fn new(raw: &'a str) -> Self {
        Self {
            raw,
            normalized: normalize(raw),
        }
    }

    /// True when the token carries no letters at all (pure punctuation or digits)
    pub fn is_blank(&self) -> bool {
        self.normalized.is_empty()
    }
}
