//! Obfuscated number decoding
//!
//! Challenge text disguises its numbers in three ways:
//! 1. Random letter casing ("tWeNtY")
//! 2. Vowel padding and misspelling ("fIfTeEeN", "fIiV")
//! 3. Delimiter noise splitting words apart ("tW/eN-tY")
//!
//! Decoding runs normalize → match → extract → compose.

mod compose;
mod extract;
mod lexicon;
mod matcher;
mod normalize;

pub use compose::{compose_answer, select_operands, Answer, Composer, Operation};
pub use extract::{bracket_tokens, extract_values, ExtractedValue, Provenance, ValueExtractor};
pub use matcher::{fuzzy_form, match_number, NumberMatcher, Strategy};
pub use normalize::{normalize, NumberToken};
