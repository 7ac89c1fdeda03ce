//! roxci: skip or run CI jobs based on `/roxci` commit directives.
//!
//! A directive in a commit message selects named recipes (sets of jobs)
//! and can include or exclude individual jobs. The most recent directive
//! wins, and every error fails open so work is never skipped by accident.

pub mod cli;
pub mod core;
pub mod history;

pub use crate::core::catalog::RecipeCatalog;
pub use crate::core::resolver::evaluate;
pub use crate::core::types::{CheckError, Decision, Recipe};
