//! Command orchestration.
//!
//! Each command wires configuration, the pack index, and the core modules
//! together; the core modules never read the environment themselves.
mod create;
mod detect;
mod packs;
mod route;

pub use create::run_create;
pub use detect::run_detect;
pub use packs::run_packs;
pub use route::run_route;
