//! High-level operations.
//!
//! This module contains the factory steps behind the library entry points
//! and the CLI commands.

pub mod configure;
pub mod create;
pub mod validate;

pub use configure::configure_package;
pub use create::{create_project, load_project};
pub use validate::{validate, CheckResult};
