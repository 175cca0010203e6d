//! Category registry mapping admin panel families to wordlist files.
//!
//! Loaded once at startup from a JSON mapping and treated as read-only for
//! the duration of a run. Wordlist file names are resolved against the base
//! directory the registry was loaded from.

use crate::types::{AdfindError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Reserved meta-selector meaning "run every registered category".
pub const ALL_CATEGORIES: &str = "all";

/// Declarative mapping from category identifier to wordlist file name.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryRegistry {
    word_lists: HashMap<String, String>,

    #[serde(skip)]
    base: PathBuf,
}

impl CategoryRegistry {
    /// Load the registry mapping from a JSON file. Wordlist paths in the
    /// mapping are later resolved relative to the file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut registry: CategoryRegistry = serde_json::from_str(&content)?;
        registry.base = path.parent().unwrap_or_else(|| Path::new(".")).to_path_buf();
        Ok(registry)
    }

    /// Build a registry directly from a mapping, resolving against `base`.
    pub fn from_map(word_lists: HashMap<String, String>, base: PathBuf) -> Self {
        Self { word_lists, base }
    }

    /// Whether `category` is a registered specific category.
    pub fn contains(&self, category: &str) -> bool {
        self.word_lists.contains_key(category)
    }

    /// Resolve a category to the full path of its wordlist.
    pub fn wordlist_path(&self, category: &str) -> Result<PathBuf> {
        self.word_lists
            .get(category)
            .filter(|file| !file.is_empty())
            .map(|file| self.base.join(file))
            .ok_or_else(|| AdfindError::UnknownCategory {
                category: category.to_string(),
            })
    }

    /// All registered category identifiers. Iteration order is map order and
    /// deliberately unspecified.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.word_lists.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.word_lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.word_lists.is_empty()
    }
}
