//! Config command - manage configuration

use anyhow::Result;
use console::{style, Term};
use moltsolve_core::Config;
use std::path::PathBuf;

pub fn show(config: &Config) -> Result<()> {
    let term = Term::stdout();

    term.write_line(&format!("{}", style("moltsolve Configuration").bold()))?;
    term.write_line("")?;

    term.write_line(&format!("{}", style("Matcher:").dim()))?;
    term.write_line(&format!(
        "  Min token length:  {}",
        style(config.matcher.min_token_len).cyan()
    ))?;
    term.write_line(&format!(
        "  Short words:       {}",
        style(config.matcher.short_words.join(", ")).cyan()
    ))?;

    term.write_line(&format!("{}", style("Extraction:").dim()))?;
    term.write_line(&format!(
        "  Compound assembly: {}",
        style(config.extract.compound_assembly).cyan()
    ))?;
    term.write_line(&format!(
        "  Rejoin fragments:  {}",
        style(config.extract.rejoin_fragments).cyan()
    ))?;

    term.write_line(&format!("{}", style("Composer:").dim()))?;
    term.write_line(&format!(
        "  Operation:         {}",
        style(config.composer.operation.display_name()).cyan()
    ))?;

    term.write_line(&format!("{}", style("API:").dim()))?;
    term.write_line(&format!("  Base URL:          {}", style(&config.api.base_url).cyan()))?;
    term.write_line(&format!("  Timeout:           {}s", config.api.timeout_secs))?;
    let key_status = if config.api.api_key.is_some() {
        style("set").green()
    } else {
        style("not set").red()
    };
    term.write_line(&format!("  API key:           {}", key_status))?;

    Ok(())
}

pub fn set_min_length(config: &mut Config, path: Option<&str>, length: usize) -> Result<()> {
    let term = Term::stdout();

    config.set_min_token_len(length)?;
    config.save(path)?;

    term.write_line(&format!(
        "{} Minimum token length set to: {}",
        style("✓").green(),
        length
    ))?;

    Ok(())
}

pub fn add_short_word(config: &mut Config, path: Option<&str>, word: &str) -> Result<()> {
    let term = Term::stdout();

    if !config.add_short_word(word)? {
        term.write_line(&format!(
            "{} '{}' already whitelisted",
            style("ℹ").blue(),
            word
        ))?;
        return Ok(());
    }

    config.save(path)?;

    term.write_line(&format!(
        "{} Added '{}' to short words",
        style("✓").green(),
        word
    ))?;

    Ok(())
}

pub fn show_path(path: Option<&str>) -> Result<()> {
    let term = Term::stdout();
    let config_path = match path {
        Some(p) => PathBuf::from(p),
        None => Config::default_config_path()?,
    };

    term.write_line(&format!("Config file: {:?}", config_path))?;

    if config_path.exists() {
        term.write_line(&format!("{} File exists", style("✓").green()))?;
    } else {
        term.write_line(&format!(
            "{} File does not exist (using defaults)",
            style("ℹ").blue()
        ))?;
    }

    Ok(())
}
