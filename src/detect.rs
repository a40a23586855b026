//! Source language detection and pack-name aliases.
//!
//! Resolution only depends on the `LanguageDetector` trait; the extension
//! detector here is a byte-count heuristic good enough to pick a starter pack.
use crate::error::PackError;
use std::collections::BTreeMap;
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

/// One ranked language guess for a source tree.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageGuess {
    pub language: String,
    pub percent: f64,
}

impl LanguageGuess {
    pub fn new(language: impl Into<String>, percent: f64) -> Self {
        Self {
            language: language.into(),
            percent,
        }
    }
}

/// Classifies a directory into languages, highest confidence first.
pub trait LanguageDetector {
    fn detect(&self, dir: &Path) -> Result<Vec<LanguageGuess>, PackError>;
}

/// Folders that hold vendored or generated code rather than the app's source.
const IGNORED_DIRS: &[&str] = &["node_modules", "vendor", "target", "bower_components"];

const EXTENSIONS: &[(&str, &str)] = &[
    ("c", "C"),
    ("h", "C"),
    ("cc", "C++"),
    ("cpp", "C++"),
    ("hpp", "C++"),
    ("cs", "C#"),
    ("clj", "Clojure"),
    ("ex", "Elixir"),
    ("exs", "Elixir"),
    ("erl", "Erlang"),
    ("go", "Go"),
    ("groovy", "Groovy"),
    ("gradle", "Gradle"),
    ("java", "Java"),
    ("js", "JavaScript"),
    ("mjs", "JavaScript"),
    ("cjs", "JavaScript"),
    ("jsx", "JavaScript"),
    ("kt", "Kotlin"),
    ("kts", "Kotlin"),
    ("php", "PHP"),
    ("py", "Python"),
    ("rb", "Ruby"),
    ("rs", "Rust"),
    ("scala", "Scala"),
    ("swift", "Swift"),
    ("ts", "TypeScript"),
    ("tsx", "TypeScript"),
];

/// Detects languages by summing file sizes per known file extension.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExtensionDetector;

impl ExtensionDetector {
    fn language_for(path: &Path) -> Option<&'static str> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        EXTENSIONS
            .iter()
            .find(|(known, _)| *known == ext)
            .map(|(_, language)| *language)
    }
}

fn is_ignored(entry: &DirEntry) -> bool {
    if entry.depth() == 0 {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.')
        || (entry.file_type().is_dir() && IGNORED_DIRS.iter().any(|dir| *dir == name))
}

impl LanguageDetector for ExtensionDetector {
    fn detect(&self, dir: &Path) -> Result<Vec<LanguageGuess>, PackError> {
        let mut bytes_by_language: BTreeMap<&'static str, u64> = BTreeMap::new();
        let walker = WalkDir::new(dir).into_iter().filter_entry(|e| !is_ignored(e));
        for entry in walker {
            let entry = entry.map_err(|err| {
                let path = err.path().unwrap_or(dir).to_path_buf();
                PackError::Detection {
                    path,
                    source: err.into(),
                }
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(language) = Self::language_for(entry.path()) else {
                continue;
            };
            let size = entry
                .metadata()
                .map_err(|err| PackError::Detection {
                    path: entry.path().to_path_buf(),
                    source: err.into(),
                })?
                .len();
            *bytes_by_language.entry(language).or_default() += size;
        }
        let guesses = rank(bytes_by_language);
        for guess in &guesses {
            tracing::debug!(language = %guess.language, percent = guess.percent, "detected language");
        }
        Ok(guesses)
    }
}

/// Convert byte totals into percentages, highest first and ties by name.
/// Languages with no bytes are dropped.
fn rank(bytes_by_language: BTreeMap<&'static str, u64>) -> Vec<LanguageGuess> {
    let total: u64 = bytes_by_language.values().sum();
    if total == 0 {
        return Vec::new();
    }
    let mut guesses: Vec<LanguageGuess> = bytes_by_language
        .into_iter()
        .filter(|(_, bytes)| *bytes > 0)
        .map(|(language, bytes)| LanguageGuess::new(language, bytes as f64 * 100.0 / total as f64))
        .collect();
    guesses.sort_by(|a, b| {
        b.percent
            .total_cmp(&a.percent)
            .then_with(|| a.language.cmp(&b.language))
    });
    guesses
}

const BUILTIN_ALIASES: &[(&str, &str)] = &[
    ("JavaScript", "nodejs"),
    ("TypeScript", "nodejs"),
    ("Node.js", "nodejs"),
    ("C#", "csharp"),
    ("C++", "cpp"),
    ("Golang", "go"),
    ("Python 3", "python"),
];

/// Maps detected language names to the pack names that serve them.
///
/// Lookups ignore case; unknown languages map to themselves.
#[derive(Debug, Clone)]
pub struct LanguageAliases {
    aliases: BTreeMap<String, String>,
}

impl Default for LanguageAliases {
    fn default() -> Self {
        let mut aliases = Self::empty();
        aliases.extend(
            BUILTIN_ALIASES
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string())),
        );
        aliases
    }
}

impl LanguageAliases {
    /// An alias table with no entries.
    pub fn empty() -> Self {
        Self {
            aliases: BTreeMap::new(),
        }
    }

    /// Add or replace aliases; later entries win.
    pub fn extend<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (from, to) in entries {
            self.aliases.insert(from.to_lowercase(), to);
        }
    }

    /// Pack-lookup name for a detected language.
    pub fn canonical(&self, language: &str) -> String {
        self.aliases
            .get(&language.to_lowercase())
            .cloned()
            .unwrap_or_else(|| language.to_string())
    }
}

#[cfg(test)]
#[path = "detect_tests.rs"]
mod tests;
