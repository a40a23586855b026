//! Detect step: show ranked language guesses and the pack each maps to.
use crate::cli::DetectArgs;
use crate::config::Settings;
use crate::detect::LanguageDetector;
use crate::error::PackError;
use crate::reporter::Reporter;
use anyhow::{Context, Result};

/// Print one `language  percent  pack` row per guess, highest first.
pub fn run_detect(
    args: &DetectArgs,
    settings: &Settings,
    detector: &dyn LanguageDetector,
    reporter: &mut Reporter<'_>,
) -> Result<()> {
    let guesses = detector.detect(&args.dir)?;
    if guesses.is_empty() {
        return Err(PackError::NoLanguageDetected.into());
    }
    for guess in &guesses {
        reporter
            .line(format_args!(
                "{}\t{:.2}%\t{}",
                guess.language,
                guess.percent,
                settings.aliases.canonical(&guess.language)
            ))
            .context("write detection output")?;
    }
    Ok(())
}
