//! Obfuscated number-word matching
//!
//! A token runs through a ladder of strategies, each looser than the one
//! before it. The first strategy that produces a value wins, so the precise
//! strategies get first say and the guessing ones only see leftovers.

use super::lexicon;
use super::normalize::normalize;
use crate::config::MatcherOptions;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Vowels kept by the fuzzy form after the first letter
const MAX_FUZZY_VOWELS: usize = 2;

/// Minimum remainder length for a truncated unit in a compound ("twentyfiv")
const MIN_UNIT_PREFIX: usize = 3;

const TEEN_MARKERS: &[&str] = &["ten", "tee", "een"];
const FIFTY_MARKERS: &[&str] = &["ty", "fty"];

/// Lexicon words and their fuzzy forms, words first so an exact word is never
/// shadowed by another entry's fuzzy form.
static FUZZY_INDEX: Lazy<HashMap<String, i64>> = Lazy::new(|| {
    let mut index = HashMap::new();
    for (word, value) in lexicon::entries() {
        index.entry(word.to_string()).or_insert(value);
    }
    for (word, value) in lexicon::entries() {
        index.entry(fuzzy_form(word)).or_insert(value);
    }
    index
});

/// One rung of the matching ladder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Canonical word or known misspelling
    Exact,
    /// Tens word followed by a (possibly truncated) unit word
    Compound,
    /// Repeated letters and surplus vowels collapsed before lookup
    Fuzzy,
    /// Hard-coded fifteen/fifty/thirty/seventeen disambiguation
    Confusable,
}

impl Strategy {
    /// Full ladder, in the order it must be applied
    pub const LADDER: [Strategy; 4] = [
        Strategy::Exact,
        Strategy::Compound,
        Strategy::Fuzzy,
        Strategy::Confusable,
    ];

    /// Ladder without the substring guesses, for speculative inputs such as
    /// rejoined fragments
    pub const STRICT: [Strategy; 3] = [Strategy::Exact, Strategy::Compound, Strategy::Fuzzy];

    /// Apply this strategy to an already normalized word
    pub fn apply(self, word: &str) -> Option<i64> {
        match self {
            Self::Exact => lexicon::lookup(word),
            Self::Compound => compound_match(word),
            Self::Fuzzy => FUZZY_INDEX.get(&fuzzy_form(word)).copied(),
            Self::Confusable => confusable_match(word),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Compound => "compound",
            Self::Fuzzy => "fuzzy",
            Self::Confusable => "confusable",
        }
    }
}

/// Matches single tokens against the number lexicon
#[derive(Debug, Clone, Default)]
pub struct NumberMatcher {
    options: MatcherOptions,
}

impl NumberMatcher {
    pub fn new(options: MatcherOptions) -> Self {
        Self { options }
    }

    /// Run the full ladder on a raw token
    pub fn match_number(&self, token: &str) -> Option<i64> {
        self.run(token, &Strategy::LADDER)
    }

    /// Run the ladder without the confusable-substring step
    pub fn match_strict(&self, token: &str) -> Option<i64> {
        self.run(token, &Strategy::STRICT)
    }

    fn run(&self, token: &str, ladder: &[Strategy]) -> Option<i64> {
        let word = normalize(token);
        if !self.passes_length_guard(&word) {
            return None;
        }

        ladder.iter().find_map(|strategy| {
            let value = strategy.apply(&word)?;
            tracing::trace!("'{}' -> {} ({})", token, value, strategy.name());
            Some(value)
        })
    }

    /// Short words are too likely to be ordinary text ("ate", "for"), so only
    /// whitelisted ones get through.
    fn passes_length_guard(&self, word: &str) -> bool {
        if word.is_empty() {
            return false;
        }
        word.chars().count() >= self.options.min_token_len
            || self.options.short_words.iter().any(|w| w == word)
    }
}

/// Match a token with the default options
pub fn match_number(token: &str) -> Option<i64> {
    NumberMatcher::default().match_number(token)
}

/// Collapse letter padding: keep the first letter verbatim, then every
/// consonant, but at most two vowels. A letter repeating the one kept just
/// before it is dropped; no number word contains a doubled consonant, and
/// the doubled "ee" collapses the same way on both sides of the comparison.
///
/// "fifteeen" and "fifteen" both become "fiften"; "fiive" becomes "five";
/// "twenntyy" becomes "twenty".
pub fn fuzzy_form(word: &str) -> String {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };

    let mut out = String::with_capacity(word.len());
    out.push(first);
    let mut prev = first;
    let mut vowels = 0;

    for c in chars {
        if c == prev {
            continue;
        }
        if is_vowel(c) {
            if vowels == MAX_FUZZY_VOWELS {
                continue;
            }
            vowels += 1;
        }
        out.push(c);
        prev = c;
    }
    out
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

fn compound_match(word: &str) -> Option<i64> {
    lexicon::tens_prefixes().find_map(|(tens_word, tens)| {
        let rest = word.strip_prefix(tens_word)?;
        if rest.is_empty() {
            return None;
        }
        let unit = match_unit(rest).or_else(|| match_unit(&fuzzy_form(rest)))?;
        Some(tens + unit)
    })
}

/// Exact unit word, or a truncation of one ("fiv" -> five). Truncations
/// resolve to the first unit in lexicon order, so "sev" is seven, not
/// seventeen.
fn match_unit(rest: &str) -> Option<i64> {
    if let Some((_, value)) = lexicon::units().find(|(w, _)| *w == rest) {
        return Some(value);
    }
    if rest.chars().count() < MIN_UNIT_PREFIX {
        return None;
    }
    lexicon::units()
        .find(|(w, _)| w.starts_with(rest))
        .map(|(_, v)| v)
}

/// Resolve the classic collisions left over once everything else failed.
/// When a token carries both teen and fifty markers the teen reading wins.
fn confusable_match(word: &str) -> Option<i64> {
    let teen = contains_any(word, TEEN_MARKERS);
    let fifty = contains_any(word, FIFTY_MARKERS);

    if word.contains("fif") {
        return match (teen, fifty) {
            (true, _) => Some(15),
            (false, true) => Some(50),
            (false, false) => None,
        };
    }
    if word.contains("thir") && (teen || fifty) {
        return Some(30);
    }
    if word.contains("seve") && teen {
        return Some(17);
    }
    None
}

fn contains_any(word: &str, markers: &[&str]) -> bool {
    markers.iter().any(|m| word.contains(m))
}
