//! Category descriptions: opaque HTML snippets keyed by category name

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path};

/// Shown for categories without a description
pub const DESCRIPTION_PLACEHOLDER: &str = "<p>Description coming soon.</p>";

/// Category name -> description markup. Content is trusted and passed through untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Descriptions {
    entries: HashMap<String, String>,
}

impl Descriptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, category: impl Into<String>, markup: impl Into<String>) {
        self.entries.insert(category.into(), markup.into());
    }

    /// Description for `category`, or the placeholder if there is none
    pub fn get(&self, category: &str) -> &str {
        self.entries
            .get(category)
            .map(String::as_str)
            .unwrap_or(DESCRIPTION_PLACEHOLDER)
    }

    pub fn contains(&self, category: &str) -> bool {
        self.entries.contains_key(category)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Read `<dir>/<category>.html` for each category. Missing or unreadable
    /// files are skipped; those categories fall back to the placeholder.
    /// Categories that are not a single file name are never looked up.
    pub fn load_dir(dir: &Path, categories: &[&str]) -> Self {
        let mut descriptions = Self::new();
        for category in categories {
            if !is_file_name(category) {
                tracing::warn!(category, "category is not a plain file name; skipping description");
                continue;
            }
            let path = dir.join(format!("{}.html", category));
            match fs::read_to_string(&path) {
                Ok(markup) => descriptions.insert(*category, markup),
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    tracing::debug!(category, path = %path.display(), "no description file");
                }
                Err(e) => {
                    tracing::warn!(category, path = %path.display(), error = %e, "could not load description");
                }
            }
        }
        tracing::debug!(
            loaded = descriptions.len(),
            categories = categories.len(),
            "loaded category descriptions"
        );
        descriptions
    }
}

/// True when `name` is one normal path component (no separators, no `..`)
fn is_file_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

impl FromIterator<(String, String)> for Descriptions {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
