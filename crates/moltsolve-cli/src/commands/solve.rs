//! Solve command - decode a challenge and optionally submit the answer

use anyhow::{Context, Result};
use console::{style, Term};
use moltsolve_core::{Answer, Config, Solver, VerifyClient, VerifyResponse};

pub fn run(
    config: &Config,
    text: Option<&str>,
    submit: bool,
    code: Option<&str>,
    api_key: Option<&str>,
) -> Result<()> {
    let term = Term::stdout();

    let Some(text) = text.filter(|t| !t.trim().is_empty()) else {
        anyhow::bail!("Please provide challenge text");
    };

    let answer = Solver::new(config).solve(text);
    print_answer(&term, answer)?;

    if !submit {
        return Ok(());
    }

    let Some(code) = code.filter(|c| !c.trim().is_empty()) else {
        anyhow::bail!("A verification code (--code) is required to submit");
    };
    let Some(api_key) = config.api_key(api_key) else {
        anyhow::bail!(
            "An API key is required to submit (--api-key, config, or {})",
            moltsolve_core::env_vars::API_KEY
        );
    };

    submit_answer(&term, config, api_key, code, answer)
}

pub fn print_answer(term: &Term, answer: Answer) -> Result<()> {
    term.write_line(&format!("{} {}", style("Answer:").bold(), answer))?;
    Ok(())
}

/// Submit and print the endpoint's reply. A failed submission is reported,
/// not returned as an error: the answer has already been printed.
pub fn submit_answer(
    term: &Term,
    config: &Config,
    api_key: &str,
    code: &str,
    answer: Answer,
) -> Result<()> {
    let client = VerifyClient::new(&config.api).context("Failed to create verification client")?;
    let response = client.submit_outcome(api_key, code, answer);
    print_verification(term, &response)
}

fn print_verification(term: &Term, response: &VerifyResponse) -> Result<()> {
    let status = if response.success {
        style("✓ Verified").green()
    } else {
        style("✗ Not verified").red()
    };
    term.write_line(&status.to_string())?;
    term.write_line(&serde_json::to_string_pretty(response)?)?;
    Ok(())
}
