//! Ordered, validated category list.
//!
//! The list keeps the order categories were declared in, since that order is
//! what category index pages show. Lookups are linear: deployments carry a
//! handful of categories, not hundreds. Loading from disk is strict about
//! duplicates, empty names and ids that could not double as a directory name.

use crate::catalog::Category;
use crate::catalog::category::BUILTIN_CATEGORIES;
use crate::schema_loader::categories_schema;
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Version marker expected in category list files.
pub const CATEGORIES_SCHEMA_VERSION: &str = "healthcards_categories_v1";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CategoryFile {
    schema_version: String,
    categories: Vec<Category>,
}

/// Immutable ordered collection of categories with unique ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCatalog {
    categories: Vec<Category>,
}

impl CategoryCatalog {
    /// Build a catalog from in-memory categories, enforcing id and name rules.
    pub fn new(categories: Vec<Category>) -> Result<Self> {
        validate_categories(&categories)?;
        Ok(Self { categories })
    }

    pub(crate) fn builtin() -> Self {
        Self {
            categories: BUILTIN_CATEGORIES
                .iter()
                .map(|(id, name, name_zh)| Category::new(id, name, name_zh))
                .collect(),
        }
    }

    /// Load and validate a category list file.
    ///
    /// The document is checked against the bundled JSON Schema first so
    /// structural mistakes are reported with their JSON pointer, then the
    /// version marker and the catalog invariants are enforced.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading category list {}", path.display()))?;
        let value: Value = serde_json::from_str(&raw)
            .with_context(|| format!("parsing category list {}", path.display()))?;
        categories_schema()?
            .validate(&value)
            .with_context(|| format!("validating category list {}", path.display()))?;

        let file: CategoryFile = serde_json::from_value(value)
            .with_context(|| format!("decoding category list {}", path.display()))?;
        if file.schema_version != CATEGORIES_SCHEMA_VERSION {
            bail!(
                "unsupported category list version '{}', expected {}",
                file.schema_version,
                CATEGORIES_SCHEMA_VERSION
            );
        }
        Self::new(file.categories)
    }

    /// Resolve a category by exact, case-sensitive id.
    pub fn find(&self, category_id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == category_id)
    }

    /// Categories in declaration order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

fn validate_categories(categories: &[Category]) -> Result<()> {
    if categories.is_empty() {
        bail!("category list contains no categories");
    }

    let mut seen: BTreeSet<&str> = BTreeSet::new();
    for category in categories {
        validate_category_id(&category.id)?;
        if !seen.insert(category.id.as_str()) {
            bail!("duplicate category id {}", category.id);
        }
        if category.name.trim().is_empty() {
            bail!("category {} has an empty name", category.id);
        }
        if category.name_zh.trim().is_empty() {
            bail!("category {} has an empty name_zh", category.id);
        }
    }
    Ok(())
}

fn validate_category_id(id: &str) -> Result<()> {
    let mut chars = id.chars();
    let Some(first) = chars.next() else {
        bail!("category id must not be empty");
    };
    let slug_char = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit();
    if !slug_char(first) || !chars.all(|c| slug_char(c) || matches!(c, '-' | '_')) {
        bail!("category id must match ^[a-z0-9][a-z0-9_-]*$, got {id}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_list_satisfies_catalog_rules() {
        let builtin = CategoryCatalog::builtin();
        validate_categories(builtin.categories()).unwrap();
        assert_eq!(builtin.len(), 9);
        assert_eq!(builtin.ids().next(), Some("cancer"));
        assert_eq!(builtin.ids().last(), Some("sexual-health"));
    }

    #[test]
    fn find_is_exact_and_case_sensitive() {
        let builtin = CategoryCatalog::builtin();
        assert_eq!(builtin.find("dental").map(|c| c.name.as_str()), Some("Dental Health"));
        assert!(builtin.find("Dental").is_none());
        assert!(builtin.find("dental ").is_none());
        assert!(builtin.find("").is_none());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = CategoryCatalog::new(vec![
            Category::new("dental", "Dental Health", "牙科健康卡"),
            Category::new("dental", "Teeth", "牙齒"),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("duplicate category id dental"));
    }

    #[test]
    fn rejects_ids_that_are_not_slugs() {
        for bad in ["", "Dental", "../etc", "a/b", "-lead", "with space"] {
            assert!(
                CategoryCatalog::new(vec![Category::new(bad, "Name", "名")]).is_err(),
                "id {bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_blank_names() {
        assert!(CategoryCatalog::new(vec![Category::new("dental", " ", "牙科")]).is_err());
        assert!(CategoryCatalog::new(vec![Category::new("dental", "Dental", "")]).is_err());
    }

    #[test]
    fn rejects_empty_list() {
        assert!(CategoryCatalog::new(Vec::new()).is_err());
    }
}
