//! Parse command - show how a challenge is read

use anyhow::{Context, Result};
use console::Term;
use moltsolve_core::{Config, Solver};

pub fn run(config: &Config, text: Option<&str>) -> Result<()> {
    let Some(text) = text.filter(|t| !t.trim().is_empty()) else {
        anyhow::bail!("Please provide challenge text");
    };

    let report = Solver::new(config).report(text);
    let json = serde_json::to_string_pretty(&report).context("Failed to serialize challenge report")?;

    Term::stdout().write_line(&json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_text() {
        assert!(run(&Config::default(), None).is_err());
        assert!(run(&Config::default(), Some("")).is_err());
    }

    #[test]
    fn test_prints_report() {
        assert!(run(&Config::default(), Some("swims <20> yards")).is_ok());
    }
}
