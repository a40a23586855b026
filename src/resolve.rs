//! Choosing exactly one starter pack.
//!
//! Every lookup is classified as matched, no match, or ambiguous. Detection
//! mode walks language guesses in confidence order: a match stops the walk,
//! no match moves to the next guess, and ambiguity fails the whole run.
use crate::detect::{LanguageAliases, LanguageDetector, LanguageGuess};
use crate::error::PackError;
use crate::reporter::Reporter;
use crate::repository::PackIndex;
use std::path::{Path, PathBuf};

/// How the caller wants the pack chosen.
#[derive(Debug, Clone, Copy)]
pub enum PackRequest<'a> {
    /// Use the pack with this name.
    Named(&'a str),
    /// Classify this source tree and use the pack for its language.
    Detect(&'a Path),
}

/// Result of looking one name up in the pack index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Matched(PathBuf),
    NoMatch,
    Ambiguous(Vec<PathBuf>),
}

impl LookupOutcome {
    pub fn classify(matches: &[PathBuf]) -> Self {
        match matches {
            [] => LookupOutcome::NoMatch,
            [only] => LookupOutcome::Matched(only.clone()),
            many => LookupOutcome::Ambiguous(many.to_vec()),
        }
    }
}

/// Resolve `request` to a single pack directory.
pub fn resolve(
    request: PackRequest<'_>,
    index: &PackIndex,
    detector: &dyn LanguageDetector,
    aliases: &LanguageAliases,
    reporter: &mut Reporter<'_>,
) -> Result<PathBuf, PackError> {
    match request {
        PackRequest::Named(name) => resolve_explicit(index, name),
        PackRequest::Detect(dir) => {
            let guesses = detector.detect(dir)?;
            if guesses.is_empty() {
                return Err(PackError::NoLanguageDetected);
            }
            resolve_detected(index, &guesses, aliases, reporter)
        }
    }
}

/// Resolve a pack the caller named explicitly.
pub fn resolve_explicit(index: &PackIndex, name: &str) -> Result<PathBuf, PackError> {
    match LookupOutcome::classify(index.find(name)) {
        LookupOutcome::Matched(path) => Ok(path),
        LookupOutcome::NoMatch => Err(PackError::PackNotFound(name.to_string())),
        LookupOutcome::Ambiguous(paths) => Err(PackError::AmbiguousPack {
            name: name.to_string(),
            paths,
        }),
    }
}

/// Resolve a pack from ranked language guesses, highest confidence first.
pub fn resolve_detected(
    index: &PackIndex,
    guesses: &[LanguageGuess],
    aliases: &LanguageAliases,
    reporter: &mut Reporter<'_>,
) -> Result<PathBuf, PackError> {
    for guess in guesses {
        let language = aliases.canonical(&guess.language);
        reporter
            .status(format_args!("Detected {} ({:.2}%)", language, guess.percent))
            .map_err(PackError::Output)?;
        match LookupOutcome::classify(index.find(&language)) {
            LookupOutcome::Matched(path) => {
                reporter
                    .detail(format_args!("pack path: {}", path.display()))
                    .map_err(PackError::Output)?;
                tracing::debug!(language = %language, pack = %path.display(), "resolved pack");
                return Ok(path);
            }
            LookupOutcome::Ambiguous(paths) => {
                return Err(PackError::AmbiguousPack {
                    name: language,
                    paths,
                });
            }
            LookupOutcome::NoMatch => {
                reporter
                    .status(format_args!(
                        "Could not find a pack for {language}. Trying to find the next likely language match..."
                    ))
                    .map_err(PackError::Output)?;
            }
        }
    }
    Err(PackError::NoLanguageDetected)
}

#[cfg(test)]
#[path = "resolve_tests.rs"]
mod tests;
