//! Route step: register a route without scaffolding anything.
use super::create::report_route;
use crate::cli::RouteArgs;
use crate::reporter::Reporter;
use crate::routes::{add_route, RouteLine};
use anyhow::Result;

pub fn run_route(args: &RouteArgs, reporter: &mut Reporter<'_>) -> Result<()> {
    let route = RouteLine::new(
        args.prefix.as_str(),
        args.target.as_str(),
        args.port,
        args.rewrite.as_str(),
    )?;
    let outcome = add_route(&args.file, &route.to_string())?;
    report_route(reporter, &args.file, &route, &outcome)?;
    Ok(())
}
