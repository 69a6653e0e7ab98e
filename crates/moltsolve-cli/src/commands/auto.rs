//! Auto command - solve a verification payload read from stdin
//!
//! Accepts either the nested shape returned by the API
//! (`{"verification": {"challenge_text", "verification_code"}, "api_key"}`)
//! or the same fields at the top level.

use super::solve::{print_answer, submit_answer};
use anyhow::{Context, Result};
use console::Term;
use moltsolve_core::{Config, Solver};
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Default, Deserialize, PartialEq)]
struct Verification {
    #[serde(default)]
    challenge_text: Option<String>,
    #[serde(default)]
    verification_code: Option<String>,
}

#[derive(Debug, Default, Deserialize, PartialEq)]
struct AutoInput {
    #[serde(default)]
    verification: Option<Verification>,
    #[serde(default)]
    challenge_text: Option<String>,
    #[serde(default)]
    verification_code: Option<String>,
    #[serde(default)]
    api_key: Option<String>,
}

/// The fields `auto` works with, after flattening either input shape
#[derive(Debug, PartialEq)]
struct Payload {
    challenge_text: String,
    verification_code: Option<String>,
    api_key: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn read_payload(reader: impl Read) -> Result<Payload> {
    let input: AutoInput =
        serde_json::from_reader(reader).context("Failed to parse JSON from stdin")?;

    let nested = input.verification.unwrap_or_default();
    let challenge_text = non_empty(nested.challenge_text)
        .or(non_empty(input.challenge_text))
        .context("No challenge_text found in input")?;

    Ok(Payload {
        challenge_text,
        verification_code: non_empty(nested.verification_code).or(non_empty(input.verification_code)),
        api_key: non_empty(input.api_key),
    })
}

pub fn run(config: &Config, reader: impl Read) -> Result<()> {
    let term = Term::stdout();
    let payload = read_payload(reader)?;

    let answer = Solver::new(config).solve(&payload.challenge_text);
    print_answer(&term, answer)?;

    let Some(code) = payload.verification_code.as_deref() else {
        tracing::debug!("No verification code in input, not submitting");
        return Ok(());
    };
    match config.api_key(payload.api_key.as_deref()) {
        Some(api_key) => submit_answer(&term, config, api_key, code, answer),
        None => {
            tracing::warn!("Verification code present but no API key available, not submitting");
            Ok(())
        }
    }
}
