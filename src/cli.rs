//! CLI argument parsing for the scaffolding workflow.
//!
//! The CLI only gathers inputs; resolution, materialization, and routing
//! policy live in their own modules.
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Port used for generated routes when none is given.
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Parser, Debug)]
#[command(
    name = "packgen",
    version,
    about = "Scaffold service deployment boilerplate from starter packs",
    after_help = "Environment:\n  PACKGEN_HOME          Home directory (default ~/.packgen); repositories live under <home>/packs\n  PACKGEN_REPOSITORIES  Path list of repository roots, replacing discovery\n\nExamples:\n  packgen create billing\n  packgen create billing --pack nodejs --route-file deploy/routes.tsv\n  packgen route --file deploy/routes.tsv --prefix /billing --target billing\n  packgen detect ./billing\n  packgen packs",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    Create(CreateArgs),
    Route(RouteArgs),
    Detect(DetectArgs),
    Packs(PacksArgs),
}

/// Create command inputs.
#[derive(Parser, Debug)]
#[command(about = "Scaffold an application directory from a starter pack")]
pub struct CreateArgs {
    /// Application directory to scaffold (created when missing)
    #[arg(value_name = "DEST")]
    pub dest: PathBuf,

    /// The named starter pack to scaffold with (skips language detection)
    #[arg(long, short = 'p', value_name = "NAME")]
    pub pack: Option<String>,

    /// Source tree to detect the language of (defaults to DEST)
    #[arg(long, value_name = "DIR", conflicts_with = "pack")]
    pub source: Option<PathBuf>,

    /// Routing file to register the new service in
    #[arg(long, value_name = "FILE")]
    pub route_file: Option<PathBuf>,

    /// Path prefix for the registered route (defaults to /<app name>)
    #[arg(long, value_name = "PREFIX", requires = "route_file")]
    pub route_prefix: Option<String>,

    /// Service port for the registered route
    #[arg(long, default_value_t = DEFAULT_PORT, requires = "route_file")]
    pub port: u16,
}

/// Route command inputs.
#[derive(Parser, Debug)]
#[command(about = "Register a route above the default static route")]
pub struct RouteArgs {
    /// Tab-delimited routing file to update
    #[arg(long, value_name = "FILE")]
    pub file: PathBuf,

    /// Path prefix to route
    #[arg(long)]
    pub prefix: String,

    /// Target service name
    #[arg(long)]
    pub target: String,

    /// Target service port
    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Path the prefix is rewritten to
    #[arg(long, default_value = "/")]
    pub rewrite: String,
}

/// Detect command inputs.
#[derive(Parser, Debug)]
#[command(about = "Show detected languages and the pack name each maps to")]
pub struct DetectArgs {
    /// Source tree to classify
    #[arg(value_name = "DIR", default_value = ".")]
    pub dir: PathBuf,
}

/// Packs command inputs.
#[derive(Parser, Debug)]
#[command(about = "List starter packs across configured repositories")]
pub struct PacksArgs {}
