//! Packs step: list every starter pack in the configured repositories.
use crate::cli::PacksArgs;
use crate::config::Settings;
use crate::reporter::Reporter;
use crate::repository::PackIndex;
use anyhow::{Context, Result};

pub fn run_packs(_args: &PacksArgs, settings: &Settings, reporter: &mut Reporter<'_>) -> Result<()> {
    reporter.detail(format_args!("config: {}", settings.config_path().display()))?;
    for repository in &settings.repositories {
        reporter.detail(format_args!("repository: {}", repository.root().display()))?;
    }
    let index = PackIndex::build(&settings.repositories)?;
    if index.is_empty() {
        reporter.status(format_args!(
            "No packs found in {} repositories",
            settings.repositories.len()
        ))?;
        return Ok(());
    }
    for (_, path) in index.packs() {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        reporter
            .line(format_args!("{name}\t{}", path.display()))
            .context("write pack listing")?;
    }
    Ok(())
}
