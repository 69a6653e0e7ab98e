//! moltsolve core - decoder for obfuscated verification challenges
//!
//! This library provides:
//! - Normalization and fuzzy matching of disguised number words
//! - Extraction of tagged numeric evidence from challenge text
//! - Answer composition from the most trusted values
//! - A blocking client for the verification endpoint

pub mod challenge;
pub mod config;
pub mod decode;
pub mod submit;

pub use challenge::{Challenge, ChallengeReport, Solver};
pub use config::{env_vars, Config, ConfigError};
pub use decode::{Answer, ExtractedValue, Operation, Provenance};
pub use submit::{SubmitError, VerifyClient, VerifyResponse};

/// Solve challenge text with the given configuration
///
/// This is the main entry point for the library.
pub fn solve(text: &str, config: &Config) -> Answer {
    Solver::new(config).solve(text)
}
