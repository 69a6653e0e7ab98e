//! Numeric evidence extraction
//!
//! Three independent scans run over the raw challenge text:
//! - `<...>` bracketed tokens (digits or number words)
//! - plain decimal digit runs
//! - delimiter-split words run through the [`NumberMatcher`]
//!
//! All evidence is kept, in scan order. Nothing is deduplicated here; that is
//! the composer's job.

use super::lexicon;
use super::matcher::NumberMatcher;
use super::normalize::NumberToken;
use crate::config::{ExtractOptions, MatcherOptions};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static BRACKET_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<([^<>]+)>").unwrap());

static DIGITS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[0-9]+\b").unwrap());

/// Obfuscation noise between word fragments: `[ ] ^ ~ + - { } ? /` and whitespace
static DELIMITER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\[\]\^~+\-{}?/\s]+").unwrap());

/// Most fragments a broken-up word is rebuilt from ("tW eN tY")
const MAX_JOIN: usize = 3;

/// Which scan produced a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    Bracket,
    Plain,
    Word,
    Compound,
    Single,
}

impl Provenance {
    /// Selection rank, lower is more trusted:
    /// bracket > compound > plain > word = single
    pub fn priority(self) -> u8 {
        match self {
            Self::Bracket => 0,
            Self::Compound => 1,
            Self::Plain => 2,
            Self::Word | Self::Single => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bracket => "bracket",
            Self::Plain => "plain",
            Self::Word => "word",
            Self::Compound => "compound",
            Self::Single => "single",
        }
    }
}

/// A number found in the challenge text, tagged with how it was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExtractedValue {
    pub provenance: Provenance,
    pub value: i64,
}

impl ExtractedValue {
    pub fn new(provenance: Provenance, value: i64) -> Self {
        Self { provenance, value }
    }
}

/// A word-scan match covering tokens `first..=last`
#[derive(Debug, Clone, Copy)]
struct WordHit {
    value: i64,
    first: usize,
    last: usize,
}

/// Runs the bracket, digit and word scans over challenge text
#[derive(Debug, Clone, Default)]
pub struct ValueExtractor {
    matcher: NumberMatcher,
    options: ExtractOptions,
}

impl ValueExtractor {
    pub fn new(matcher_options: MatcherOptions, options: ExtractOptions) -> Self {
        Self {
            matcher: NumberMatcher::new(matcher_options),
            options,
        }
    }

    pub fn extract(&self, text: &str) -> Vec<ExtractedValue> {
        let mut values = self.scan_brackets(text);
        values.extend(scan_plain_digits(text));
        values.extend(self.scan_words(text));

        tracing::debug!(
            "Extracted {} value(s): {:?}",
            values.len(),
            values.iter().map(|v| (v.provenance.as_str(), v.value)).collect::<Vec<_>>()
        );
        values
    }

    /// Bracket contents made only of digits are taken verbatim; anything
    /// else must get past the matcher or is dropped.
    fn scan_brackets(&self, text: &str) -> Vec<ExtractedValue> {
        bracket_tokens(text)
            .into_iter()
            .filter_map(|content| {
                let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();
                let value = if !compact.is_empty() && compact.bytes().all(|b| b.is_ascii_digit()) {
                    compact.parse().ok()
                } else {
                    self.matcher.match_number(content)
                };
                value.map(|v| ExtractedValue::new(Provenance::Bracket, v))
            })
            .collect()
    }

    fn scan_words(&self, text: &str) -> Vec<ExtractedValue> {
        let tokens: Vec<NumberToken> = DELIMITER_RE
            .split(text)
            .map(NumberToken::new)
            .filter(|t| !t.is_blank())
            .collect();

        let mut hits = Vec::new();
        let mut i = 0;
        while i < tokens.len() {
            match self.match_at(&tokens, i) {
                Some((value, width)) => {
                    tracing::trace!("Word hit {} at token {} (+{})", value, i, width - 1);
                    hits.push(WordHit {
                        value,
                        first: i,
                        last: i + width - 1,
                    });
                    i += width;
                }
                None => i += 1,
            }
        }

        if self.options.compound_assembly {
            assemble_compounds(&hits)
        } else {
            hits.iter()
                .map(|h| ExtractedValue::new(Provenance::Word, h.value))
                .collect()
        }
    }

    /// Match the token at `i`, possibly glued to the tokens after it.
    /// Returns the value and how many tokens it consumed.
    fn match_at(&self, tokens: &[NumberToken], i: usize) -> Option<(i64, usize)> {
        let single = self.matcher.match_number(tokens[i].raw);
        if !self.options.rejoin_fragments {
            return single.map(|v| (v, 1));
        }

        match single {
            // "sIx tEeN" and "sEvEn tY" read as one word, "sIx tEn" as two
            Some(digit) if (1..=9).contains(&digit) && !is_whole_word(tokens.get(i + 1)) => {
                match self.join(tokens, i, 2) {
                    Some(joined) if is_teen(joined) || is_tens(joined) => Some((joined, 2)),
                    _ => Some((digit, 1)),
                }
            }
            Some(value) => Some((value, 1)),
            None => (2..=MAX_JOIN).find_map(|width| self.join(tokens, i, width).map(|v| (v, width))),
        }
    }

    /// Strict match of `width` tokens starting at `i`, concatenated
    fn join(&self, tokens: &[NumberToken], i: usize, width: usize) -> Option<i64> {
        let window = tokens.get(i..i + width)?;
        let joined: String = window.iter().map(|t| t.normalized.as_str()).collect();
        self.matcher.match_strict(&joined)
    }
}

/// Token that is a lexicon word as written, not a fragment
fn is_whole_word(token: Option<&NumberToken>) -> bool {
    token.is_some_and(|t| lexicon::lookup(&t.normalized).is_some())
}

/// Raw contents of every `<...>` group, in order
pub fn bracket_tokens(text: &str) -> Vec<&str> {
    BRACKET_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}

fn scan_plain_digits(text: &str) -> Vec<ExtractedValue> {
    DIGITS_RE
        .find_iter(text)
        .filter_map(|m| m.as_str().parse().ok())
        .map(|v| ExtractedValue::new(Provenance::Plain, v))
        .collect()
}

/// Merge a tens hit with an adjacent units hit ("twenty" "five" -> 25).
/// Hits that stay alone are tagged single.
fn assemble_compounds(hits: &[WordHit]) -> Vec<ExtractedValue> {
    let mut values = Vec::with_capacity(hits.len());
    let mut iter = hits.iter().peekable();

    while let Some(hit) = iter.next() {
        if is_tens(hit.value) {
            if let Some(next) = iter.next_if(|n| n.value < 10 && n.first == hit.last + 1) {
                values.push(ExtractedValue::new(Provenance::Compound, hit.value + next.value));
                continue;
            }
        }
        values.push(ExtractedValue::new(Provenance::Single, hit.value));
    }
    values
}

fn is_tens(value: i64) -> bool {
    (20..=90).contains(&value) && value % 10 == 0
}

fn is_teen(value: i64) -> bool {
    (13..=19).contains(&value)
}

/// Extract with default options
pub fn extract_values(text: &str) -> Vec<ExtractedValue> {
    ValueExtractor::default().extract(text)
}
