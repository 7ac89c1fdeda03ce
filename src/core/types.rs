//! RX-001: Recipe, directive, and decision types.
//!
//! Defines the YAML schema for recipes and the values the resolver passes
//! back to callers.

use indexmap::IndexSet;
use serde::Deserialize;
use serde_yaml_ng::Value;
use std::fmt;

// ============================================================================
// Recipes (roxci.yml)
// ============================================================================

/// A named, described set of CI jobs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawRecipe")]
pub struct Recipe {
    /// Selector used in `/roxci` directives
    pub name: String,

    /// Human-readable summary (informational only)
    pub description: String,

    /// Member job names, matched exactly and case-sensitively
    pub jobs: IndexSet<String>,
}

/// Recipe as written in roxci.yml, before job names are normalized.
#[derive(Deserialize)]
struct RawRecipe {
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    jobs: Value,
}

impl Recipe {
    pub fn new<I, S>(name: &str, description: &str, jobs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            jobs: jobs.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `job` is a member of this recipe.
    pub fn contains_job(&self, job: &str) -> bool {
        self.jobs.contains(job)
    }
}

impl TryFrom<RawRecipe> for Recipe {
    type Error = String;

    fn try_from(raw: RawRecipe) -> Result<Self, Self::Error> {
        let jobs = job_names(&raw.jobs)
            .ok_or_else(|| format!("recipe {} has a job that is not a plain name", raw.name))?;
        Ok(Self {
            name: raw.name,
            description: raw.description,
            jobs,
        })
    }
}

/// Jobs may be written as a YAML sequence (`[a, b]`) or as a set
/// (`{a, b}` or `!!set`), which parses as a mapping with null values.
/// Scalar entries such as `123` or `true` are kept as their text.
fn job_names(jobs: &Value) -> Option<IndexSet<String>> {
    match jobs {
        Value::Null => Some(IndexSet::new()),
        Value::Sequence(items) => items.iter().map(scalar_text).collect(),
        Value::Mapping(set) => set.iter().map(|(key, _)| scalar_text(key)).collect(),
        Value::Tagged(tagged) => job_names(&tagged.value),
        _ => None,
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

// ============================================================================
// Directives
// ============================================================================

/// Directive argument keys accepted in `key=value` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveKey {
    Recipe,
    Include,
    Exclude,
}

impl DirectiveKey {
    /// Match an already lowercased key.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "recipe" => Some(Self::Recipe),
            "include" => Some(Self::Include),
            "exclude" => Some(Self::Exclude),
            _ => None,
        }
    }
}

// ============================================================================
// Decisions
// ============================================================================

/// Errors reported by the resolver. None of these block the job: they are
/// returned alongside a decision that still has to be honored.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckError {
    #[error("unexpected argument: {0}")]
    UnexpectedArgument(String),

    #[error("there is no such recipe: {0}")]
    NoSuchRecipe(String),
}

/// Outcome of evaluating one job against the commit history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    /// `true` means execute the job
    pub run: bool,

    /// Set when the directive was malformed or named an unknown recipe
    pub error: Option<CheckError>,
}

impl Decision {
    pub fn run() -> Self {
        Self {
            run: true,
            error: None,
        }
    }

    pub fn skip() -> Self {
        Self {
            run: false,
            error: None,
        }
    }

    /// Fail open: run the job and surface the error.
    pub fn run_with_error(error: CheckError) -> Self {
        Self {
            run: true,
            error: Some(error),
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if self.run { "run" } else { "skip" };
        match &self.error {
            Some(e) => write!(f, "{} ({})", verdict, e),
            None => write!(f, "{}", verdict),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rx001_recipe_jobs_as_sequence() {
        let yaml = r#"
name: one
description: first recipe
jobs: [a, b, c]
"#;
        let recipe: Recipe = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(recipe.name, "one");
        assert!(recipe.contains_job("b"));
        assert!(!recipe.contains_job("d"));
    }

    #[test]
    fn test_rx001_recipe_jobs_as_set() {
        let yaml = r#"
name: three
description: set form
jobs: {a, b, d}
"#;
        let recipe: Recipe = serde_yaml_ng::from_str(yaml).unwrap();
        let jobs: Vec<&str> = recipe.jobs.iter().map(String::as_str).collect();
        assert_eq!(jobs, vec!["a", "b", "d"]);
    }

    #[test]
    fn test_rx001_recipe_missing_fields_default_empty() {
        let recipe: Recipe = serde_yaml_ng::from_str("name: bare").unwrap();
        assert!(recipe.description.is_empty());
        assert!(recipe.jobs.is_empty());
    }

    #[test]
    fn test_rx001_recipe_jobs_as_tagged_set() {
        let yaml = "name: tagged\ndescription: d\njobs: !!set {a, b}\n";
        let recipe: Recipe = serde_yaml_ng::from_str(yaml).unwrap();
        assert!(recipe.contains_job("a"));
        assert!(recipe.contains_job("b"));
    }

    #[test]
    fn test_rx001_recipe_scalar_jobs_as_text() {
        let yaml = "name: x\ndescription: d\njobs: [7, true, lint]\n";
        let recipe: Recipe = serde_yaml_ng::from_str(yaml).unwrap();
        let jobs: Vec<&str> = recipe.jobs.iter().map(String::as_str).collect();
        assert_eq!(jobs, vec!["7", "true", "lint"]);
    }

    #[test]
    fn test_rx001_recipe_nested_job_rejected() {
        let yaml = "name: x\ndescription: d\njobs: [[a], lint]\n";
        let err = serde_yaml_ng::from_str::<Recipe>(yaml).unwrap_err();
        assert!(
            err.to_string().contains("recipe x has a job that is not a plain name"),
            "{}",
            err
        );
    }

    #[test]
    fn test_rx001_job_match_is_case_sensitive() {
        let recipe = Recipe::new("one", "d", ["Lint"]);
        assert!(recipe.contains_job("Lint"));
        assert!(!recipe.contains_job("lint"));
    }

    #[test]
    fn test_rx001_directive_key_lookup() {
        assert_eq!(DirectiveKey::from_key("recipe"), Some(DirectiveKey::Recipe));
        assert_eq!(DirectiveKey::from_key("exclude"), Some(DirectiveKey::Exclude));
        assert_eq!(DirectiveKey::from_key("Recipe"), None);
        assert_eq!(DirectiveKey::from_key("foo"), None);
    }

    #[test]
    fn test_rx001_check_error_messages() {
        assert_eq!(
            CheckError::NoSuchRecipe("four".into()).to_string(),
            "there is no such recipe: four"
        );
        assert_eq!(
            CheckError::UnexpectedArgument("foo=bar".into()).to_string(),
            "unexpected argument: foo=bar"
        );
    }

    #[test]
    fn test_rx001_decision_display() {
        assert_eq!(Decision::run().to_string(), "run");
        assert_eq!(Decision::skip().to_string(), "skip");
        let d = Decision::run_with_error(CheckError::NoSuchRecipe("x".into()));
        assert_eq!(d.to_string(), "run (there is no such recipe: x)");
    }
}
