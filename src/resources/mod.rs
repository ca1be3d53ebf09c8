//! Category resource listings.
//!
//! A category's cards live as PDFs in `<resource-root>/<category-id>/`. Each
//! listing re-reads that directory; nothing is cached between calls, so
//! dropping a new file into place is enough to publish it.

pub mod language;
pub mod title;

pub use language::{LanguageLabels, infer_language_labels};
pub use title::format_title;

use crate::RESOURCE_URL_PREFIX;
use crate::locale::Locale;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::{self, Metadata};
use std::io;
use std::path::{Path, PathBuf};
use title::split_extension;
use tracing::debug;

const RESOURCE_EXTENSION: &str = "pdf";

/// Display metadata for one downloadable card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resource {
    pub title: String,
    /// `resources/<category-id>/<filename>`, relative to the static file root.
    pub path: String,
    pub language_label_en: Option<&'static str>,
    pub language_label_zh: Option<&'static str>,
}

impl Resource {
    fn from_filename(category_id: &str, filename: &str) -> Self {
        let labels = infer_language_labels(filename);
        Self {
            title: format_title(filename),
            path: format!("{RESOURCE_URL_PREFIX}/{category_id}/{filename}"),
            language_label_en: labels.en,
            language_label_zh: labels.zh,
        }
    }

    pub fn language_label(&self, locale: Locale) -> Option<&'static str> {
        match locale {
            Locale::En => self.language_label_en,
            Locale::Zh => self.language_label_zh,
        }
    }
}

/// Lists resources beneath a fixed resource root.
#[derive(Debug, Clone)]
pub struct ResourceLister {
    root: PathBuf,
}

impl ResourceLister {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn list(&self, category_id: &str) -> Result<Vec<Resource>> {
        list_resources(&self.root, category_id)
    }
}

/// List the PDF cards filed under `category_id`, sorted by filename.
///
/// A missing category directory (or a non-directory in its place) is an
/// empty listing, not an error. Any other I/O failure is returned with the
/// offending path attached.
pub fn list_resources(resource_root: &Path, category_id: &str) -> Result<Vec<Resource>> {
    if !is_directory_segment(category_id) {
        debug!(category = category_id, "category id cannot name a directory");
        return Ok(Vec::new());
    }

    let dir = resource_root.join(category_id);
    match stat_if_present(&dir)? {
        Some(meta) if meta.is_dir() => {}
        _ => {
            debug!(category = category_id, dir = %dir.display(), "no resource directory");
            return Ok(Vec::new());
        }
    }

    let mut names = Vec::new();
    for entry in fs::read_dir(&dir).with_context(|| format!("reading {}", dir.display()))? {
        let entry = entry.with_context(|| format!("reading entry in {}", dir.display()))?;
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(raw) => debug!(dir = %dir.display(), name = ?raw, "skipping non UTF-8 filename"),
        }
    }
    names.sort();

    let mut resources = Vec::new();
    for name in names {
        if name.starts_with('.') || !has_resource_extension(&name) {
            debug!(category = category_id, file = %name, "skipping entry");
            continue;
        }
        let path = dir.join(&name);
        match stat_if_present(&path)? {
            Some(meta) if meta.is_file() => {
                resources.push(Resource::from_filename(category_id, &name));
            }
            _ => debug!(category = category_id, file = %name, "skipping non-file entry"),
        }
    }

    debug!(
        category = category_id,
        dir = %dir.display(),
        count = resources.len(),
        "listed resources"
    );
    Ok(resources)
}

fn has_resource_extension(name: &str) -> bool {
    matches!(split_extension(name), (_, Some(ext)) if ext.eq_ignore_ascii_case(RESOURCE_EXTENSION))
}

/// Reject ids that would escape the resource root or name nothing.
fn is_directory_segment(category_id: &str) -> bool {
    !category_id.is_empty()
        && category_id != "."
        && category_id != ".."
        && !category_id.contains(['/', '\\', '\0'])
}

/// Follows symlinks. Absence (including a dangling or looping link, or a file
/// standing in for a parent directory) is `None`; any other failure is an error.
fn stat_if_present(path: &Path) -> Result<Option<Metadata>> {
    match fs::metadata(path) {
        Ok(meta) => Ok(Some(meta)),
        Err(err) if is_absent(&err) => Ok(None),
        Err(err) => Err(err).with_context(|| format!("inspecting {}", path.display())),
    }
}

fn is_absent(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
    ) || is_symlink_loop(err)
}

#[cfg(unix)]
fn is_symlink_loop(err: &io::Error) -> bool {
    err.raw_os_error() == Some(libc::ELOOP)
}

#[cfg(not(unix))]
fn is_symlink_loop(_err: &io::Error) -> bool {
    false
}
