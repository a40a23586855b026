//! Create step: resolve a pack, materialize it, and optionally register a route.
use crate::cli::CreateArgs;
use crate::config::Settings;
use crate::detect::LanguageDetector;
use crate::pack::{materialize, Pack};
use crate::reporter::Reporter;
use crate::repository::PackIndex;
use crate::resolve::{resolve, PackRequest};
use crate::routes::{add_route, RouteLine, RouteOutcome};
use crate::util::{display_path, normalize_app_name};
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::io;
use std::path::Path;

/// Run the create step for one application directory.
pub fn run_create(
    args: &CreateArgs,
    settings: &Settings,
    detector: &dyn LanguageDetector,
    reporter: &mut Reporter<'_>,
) -> Result<()> {
    ensure_app_dir(&args.dest)?;
    let index = PackIndex::build(&settings.repositories)?;

    let request = match args.pack.as_deref() {
        Some(name) => PackRequest::Named(name),
        None => PackRequest::Detect(args.source.as_deref().unwrap_or(&args.dest)),
    };
    let pack_dir = resolve(request, &index, detector, &settings.aliases, reporter)?;
    let pack = Pack::load(&pack_dir)?;
    tracing::info!(
        pack = pack.name(),
        files = pack.files().len(),
        dest = %args.dest.display(),
        "materializing pack"
    );
    materialize(&pack, &args.dest)?;

    if let Some(route_file) = args.route_file.as_deref() {
        let app_name = app_name(&args.dest, reporter)?;
        let prefix = args
            .route_prefix
            .clone()
            .unwrap_or_else(|| format!("/{app_name}"));
        let route = RouteLine::new(prefix, app_name, args.port, "/")?;
        let outcome = add_route(route_file, &route.to_string())?;
        report_route(reporter, route_file, &route, &outcome)?;
    }

    reporter.status("Ready to sail")?;
    Ok(())
}

fn ensure_app_dir(dest: &Path) -> Result<()> {
    if dest.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(dest)
        .with_context(|| format!("there was an error creating {}", dest.display()))
}

/// Service name derived from the application directory, lowercased when needed.
fn app_name(dest: &Path, reporter: &mut Reporter<'_>) -> Result<String> {
    let base = dest
        .canonicalize()
        .ok()
        .and_then(|path| path.file_name().map(|name| name.to_string_lossy().into_owned()))
        .or_else(|| {
            dest.file_name()
                .map(|name| name.to_string_lossy().into_owned())
        })
        .filter(|name| !name.is_empty())
        .ok_or_else(|| anyhow!("cannot derive an application name from {}", dest.display()))?;
    match normalize_app_name(&base) {
        Some(normalized) => {
            reporter.status(format_args!(
                "Application {base} will be renamed to {normalized} for docker compatibility"
            ))?;
            Ok(normalized)
        }
        None => Ok(base),
    }
}

pub(super) fn report_route(
    reporter: &mut Reporter<'_>,
    route_file: &Path,
    route: &RouteLine,
    outcome: &RouteOutcome,
) -> io::Result<()> {
    let file = display_path(route_file, std::env::current_dir().ok().as_deref());
    match outcome {
        RouteOutcome::InsertedBeforeDefault { line } => {
            reporter.status(format_args!(
                "Routing {} to {}:{} in {file}",
                route.prefix, route.target, route.port
            ))?;
            reporter.detail(format_args!("inserted above the default route on line {}", line + 1))
        }
        RouteOutcome::Appended => reporter.status(format_args!(
            "Routing {} to {}:{} in {file}",
            route.prefix, route.target, route.port
        )),
        RouteOutcome::AlreadyPresent => {
            reporter.status(format_args!("Route {} already present in {file}", route.prefix))
        }
    }
}

#[cfg(test)]
#[path = "create_tests.rs"]
mod tests;
