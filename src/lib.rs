use anyhow::{Context, Result, bail};
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use tracing::info;

pub mod catalog;
pub mod locale;
pub mod resources;
mod schema_loader;
pub mod site;

pub use catalog::{
    CATEGORIES_SCHEMA_VERSION, Category, CategoryCatalog, builtin_categories, find_category,
};
pub use locale::Locale;
pub use resources::{
    LanguageLabels, Resource, ResourceLister, format_title, infer_language_labels, list_resources,
};
pub use site::{PageView, Request, Response, Route, Site};

/// Directory, relative to the site root, holding one subdirectory per category.
pub const RESOURCE_DIR: &str = "static/resources";
/// URL prefix the static-file server maps onto the resource root.
pub const RESOURCE_URL_PREFIX: &str = "resources";

const ENV_SITE_ROOT: &str = "HEALTHCARDS_ROOT";
const ENV_RESOURCE_ROOT: &str = "HEALTHCARDS_RESOURCE_ROOT";
const ENV_CATEGORIES: &str = "HEALTHCARDS_CATEGORIES";

fn is_site_root(candidate: &Path) -> bool {
    candidate.join(RESOURCE_DIR).is_dir()
}

fn site_root_from_hint(hint: &str) -> Option<PathBuf> {
    if hint.is_empty() {
        return None;
    }
    let hint_path = PathBuf::from(hint);
    if !hint_path.exists() || !is_site_root(&hint_path) {
        return None;
    }
    fs::canonicalize(hint_path).ok()
}

fn search_upwards(start: &Path) -> Option<PathBuf> {
    let mut dir = fs::canonicalize(start).ok()?;
    loop {
        if is_site_root(&dir) {
            return Some(dir);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

/// Locate the directory that contains `static/resources`.
///
/// Order: `HEALTHCARDS_ROOT`, the working directory and its ancestors, the
/// executable's directory and its ancestors, then the build-time hint.
pub fn find_site_root() -> Result<PathBuf> {
    if let Ok(env_root) = env::var(ENV_SITE_ROOT) {
        if let Some(root) = site_root_from_hint(&env_root) {
            return Ok(root);
        }
    }

    if let Ok(cwd) = env::current_dir() {
        if let Some(root) = search_upwards(&cwd) {
            return Ok(root);
        }
    }

    if let Ok(exe_path) = env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            if let Some(root) = search_upwards(exe_dir) {
                return Ok(root);
            }
        }
    }

    if let Some(hint) = option_env!("HEALTHCARDS_ROOT_HINT") {
        if let Some(root) = site_root_from_hint(hint) {
            return Ok(root);
        }
    }

    bail!(
        "Unable to locate the site root (a directory containing {RESOURCE_DIR}). Set {ENV_SITE_ROOT} or pass --resource-root."
    );
}

pub fn default_resource_root(site_root: &Path) -> PathBuf {
    site_root.join(RESOURCE_DIR)
}

/// Resolve the resource root: explicit override, then `HEALTHCARDS_RESOURCE_ROOT`,
/// then `<site-root>/static/resources`.
///
/// The override is returned as given even when the directory is missing;
/// listings against it are simply empty.
pub fn resolve_resource_root(override_path: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = override_path {
        info!(root = %path.display(), "using resource root from command line");
        return Ok(path.to_path_buf());
    }
    if let Some(raw) = env_non_empty(ENV_RESOURCE_ROOT) {
        info!(root = %raw, "using resource root from {ENV_RESOURCE_ROOT}");
        return Ok(PathBuf::from(raw));
    }
    let site_root = find_site_root()?;
    let root = default_resource_root(&site_root);
    info!(root = %root.display(), "using discovered resource root");
    Ok(root)
}

/// Resolve the category list: explicit file, then `HEALTHCARDS_CATEGORIES`,
/// then the built-in list.
pub fn resolve_category_catalog(override_path: Option<&Path>) -> Result<CategoryCatalog> {
    let from_env = env_non_empty(ENV_CATEGORIES).map(PathBuf::from);
    match override_path.map(Path::to_path_buf).or(from_env) {
        Some(path) => {
            info!(file = %path.display(), "loading category list");
            CategoryCatalog::load(&path)
                .with_context(|| format!("loading categories from {}", path.display()))
        }
        None => Ok(builtin_categories().clone()),
    }
}

fn env_non_empty(name: &str) -> Option<String> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => Some(value),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn search_upwards_finds_site_root_from_nested_dir() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join(RESOURCE_DIR).join("cancer")).unwrap();
        let nested = temp.path().join("templates/partials");
        fs::create_dir_all(&nested).unwrap();

        let found = search_upwards(&nested).unwrap();
        assert_eq!(found, fs::canonicalize(temp.path()).unwrap());
    }

    #[test]
    fn hint_without_resource_dir_is_ignored() {
        let temp = TempDir::new().unwrap();
        assert!(site_root_from_hint(temp.path().to_str().unwrap()).is_none());
        assert!(site_root_from_hint("").is_none());
    }

    #[test]
    fn explicit_resource_root_wins() {
        let resolved = resolve_resource_root(Some(Path::new("/srv/cards"))).unwrap();
        assert_eq!(resolved, PathBuf::from("/srv/cards"));
    }

    #[test]
    fn explicit_categories_file_is_loaded() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("categories.json");
        fs::write(
            &path,
            r#"{"schema_version":"healthcards_categories_v1","categories":[{"id":"eyes","name":"Eye Health","name_zh":"眼睛健康卡"}]}"#,
        )
        .unwrap();

        let catalog = resolve_category_catalog(Some(&path)).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.find("eyes").is_some());
    }
}
