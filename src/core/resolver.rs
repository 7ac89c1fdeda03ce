//! RX-004: Decide whether a job runs, given commit history and recipes.
//!
//! Precedence is exclude, then include, then recipe membership. Recipes
//! compose with OR semantics and `default` always runs. Every error fails
//! open: the decision says run and carries the error for the caller to log.

use super::catalog::RecipeCatalog;
use super::directive::{find_directive, Directive};
use super::types::{CheckError, Decision};

/// Recipe selector that always runs, without consulting the catalog.
pub const DEFAULT_RECIPE: &str = "default";

/// Evaluate `job` against the most recent directive in `commit_messages`
/// (oldest first). Without a directive the job runs.
pub fn evaluate<S: AsRef<str>>(
    job: &str,
    commit_messages: &[S],
    catalog: &RecipeCatalog,
) -> Decision {
    let Some(tail) = find_directive(commit_messages) else {
        tracing::debug!(job, "no directive found, running by default");
        return Decision::run();
    };

    match Directive::parse(tail) {
        Ok(directive) => evaluate_directive(job, &directive, catalog),
        Err(e) => Decision::run_with_error(e),
    }
}

/// Apply a parsed directive to a job.
pub fn evaluate_directive(job: &str, directive: &Directive, catalog: &RecipeCatalog) -> Decision {
    if directive.excludes(job) {
        tracing::info!("Job '{}' is explicitly excluded", job);
        return Decision::skip();
    }
    if directive.includes(job) {
        tracing::info!("Job '{}' is explicitly included", job);
        return Decision::run();
    }
    check_recipes_for_job(job, &directive.recipes, catalog)
}

fn check_recipes_for_job(job: &str, selectors: &[String], catalog: &RecipeCatalog) -> Decision {
    for selector in selectors {
        if selector == DEFAULT_RECIPE {
            tracing::info!("Recipe '{}' selected, running every job", DEFAULT_RECIPE);
            return Decision::run();
        }

        tracing::info!("Checking for job '{}' in recipe '{}'", job, selector);
        let Some(recipe) = catalog.find(selector) else {
            return Decision::run_with_error(CheckError::NoSuchRecipe(selector.clone()));
        };
        if recipe.contains_job(job) {
            tracing::info!("Job '{}' is included", job);
            return Decision::run();
        }
        tracing::info!("Job '{}' is not included in recipe '{}'", job, selector);
    }

    tracing::info!("Job '{}' is not included in any recipes", job);
    Decision::skip()
}
