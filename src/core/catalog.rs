//! RX-002: Read-only lookup over loaded recipes.
//!
//! Lookup is a linear scan; when two recipes share a name the first one
//! in file order wins. Duplicates are reported, never merged.

use super::types::Recipe;

/// Immutable collection of recipes, built once per invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeCatalog {
    recipes: Vec<Recipe>,
}

impl RecipeCatalog {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self { recipes }
    }

    /// Find a recipe by exact, case-sensitive name.
    pub fn find(&self, name: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Recipe> {
        self.recipes.iter()
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Names declared more than once, in order of first repetition.
    pub fn duplicate_names(&self) -> Vec<&str> {
        let mut dupes: Vec<&str> = Vec::new();
        for (i, recipe) in self.recipes.iter().enumerate() {
            let name = recipe.name.as_str();
            if self.recipes[..i].iter().any(|r| r.name == name) && !dupes.contains(&name) {
                dupes.push(name);
            }
        }
        dupes
    }
}

impl<'a> IntoIterator for &'a RecipeCatalog {
    type Item = &'a Recipe;
    type IntoIter = std::slice::Iter<'a, Recipe>;

    fn into_iter(self) -> Self::IntoIter {
        self.recipes.iter()
    }
}
