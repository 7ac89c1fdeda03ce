//! RX-003: `/roxci` directive extraction and parsing.
//!
//! A directive is a commit message line of the form `/roxci <tail>`,
//! matched case-insensitively. The tail is lowercased and split on single
//! spaces. The first token may be a bare comma-separated list of recipes;
//! every other token must be `recipe=`, `include=` or `exclude=` followed
//! by a comma-separated list. Repeated keys accumulate.

use super::types::{CheckError, DirectiveKey};
use regex::Regex;
use std::sync::LazyLock;

/// Marker token that introduces a directive.
pub const MARKER: &str = "/roxci";

static DIRECTIVE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\s*{} ([^\r\n]*)", regex::escape(MARKER))).unwrap()
});

/// A parsed directive. Values are lowercased.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directive {
    pub recipes: Vec<String>,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

impl Directive {
    /// Parse a raw directive tail. The first malformed token aborts parsing.
    pub fn parse(tail: &str) -> Result<Self, CheckError> {
        let normalized = tail.to_lowercase();
        let mut directive = Directive::default();

        for (idx, token) in normalized.split(' ').enumerate() {
            let pieces: Vec<&str> = token.split('=').collect();
            if idx == 0 && pieces.len() == 1 {
                directive.recipes.extend(split_list(token));
                continue;
            }
            let [key, value] = pieces.as_slice() else {
                return Err(CheckError::UnexpectedArgument(token.to_string()));
            };
            let key = DirectiveKey::from_key(key)
                .ok_or_else(|| CheckError::UnexpectedArgument(token.to_string()))?;
            directive.bucket_mut(key).extend(split_list(value));
        }

        Ok(directive)
    }

    fn bucket_mut(&mut self, key: DirectiveKey) -> &mut Vec<String> {
        match key {
            DirectiveKey::Recipe => &mut self.recipes,
            DirectiveKey::Include => &mut self.include,
            DirectiveKey::Exclude => &mut self.exclude,
        }
    }

    pub fn excludes(&self, job: &str) -> bool {
        self.exclude.iter().any(|j| j == job)
    }

    pub fn includes(&self, job: &str) -> bool {
        self.include.iter().any(|j| j == job)
    }
}

fn split_list(value: &str) -> impl Iterator<Item = String> + '_ {
    value.split(',').map(str::to_string)
}

/// Return the directive tail from the most recent message that carries one.
/// Messages are expected oldest first.
pub fn find_directive<S: AsRef<str>>(messages: &[S]) -> Option<&str> {
    let mut found = None;
    for message in messages {
        let message: &str = message.as_ref();
        if let Some(caps) = DIRECTIVE_PATTERN.captures(message) {
            let tail = caps.get(1).map_or("", |m| m.as_str());
            tracing::debug!(commit = message, "found {} directive", MARKER);
            found = Some(tail);
        }
    }
    found
}
