//! RX-005: Recipe file parsing and validation.
//!
//! Parses roxci.yml (a YAML list of recipes) and validates that every
//! recipe has a name, a description, and at least one job.

use super::catalog::RecipeCatalog;
use super::types::Recipe;
use std::path::{Path, PathBuf};

/// Default location of the recipe file, relative to the repository root.
pub const DEFAULT_CONFIG_FILE: &str = ".circleci/roxci.yml";

/// Validation error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("recipe found with a missing name")]
    MissingName,

    #[error("recipe {0} is missing a description")]
    MissingDescription(String),

    #[error("recipe {0} is missing jobs")]
    MissingJobs(String),
}

/// Errors that prevent a catalog from being built. Always fatal to a check.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse recipes: {0}")]
    Parse(String),

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Load, parse and validate a recipe file from disk.
pub fn load_recipes(path: &Path) -> Result<RecipeCatalog, ConfigError> {
    let recipes = read_recipes(path)?;
    if let Some(first) = validate_recipes(&recipes).into_iter().next() {
        return Err(first.into());
    }

    let catalog = RecipeCatalog::new(recipes);
    for name in catalog.duplicate_names() {
        tracing::warn!("recipe {} is declared more than once; the first one is used", name);
    }
    tracing::debug!(path = %path.display(), recipes = catalog.len(), "loaded recipes");
    Ok(catalog)
}

/// Read and parse a recipe file from disk, without validating it.
pub fn read_recipes(path: &Path) -> Result<Vec<Recipe>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_recipes(&content)
}

/// Parse a recipe list from a YAML string, without validating it.
pub fn parse_recipes(yaml: &str) -> Result<Vec<Recipe>, ConfigError> {
    serde_yaml_ng::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))
}

/// Validate parsed recipes. Returns a list of errors (empty = valid).
pub fn validate_recipes(recipes: &[Recipe]) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for recipe in recipes {
        if recipe.name.is_empty() {
            errors.push(ValidationError::MissingName);
            continue;
        }
        if recipe.description.is_empty() {
            errors.push(ValidationError::MissingDescription(recipe.name.clone()));
        }
        if recipe.jobs.is_empty() {
            errors.push(ValidationError::MissingJobs(recipe.name.clone()));
        }
    }

    errors
}
