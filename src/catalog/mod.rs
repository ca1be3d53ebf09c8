//! Category catalog wiring.
//!
//! Categories are the fixed groupings health cards are filed under. Each id
//! doubles as the directory name under the resource root and as the URL
//! segment of the category pages. The built-in list is constructed once per
//! process; deployments that need a different list load one from a JSON file
//! (see `schema/categories.schema.json`) through `CategoryCatalog::load`.

pub mod category;
pub mod index;

pub use category::Category;
pub use index::{CATEGORIES_SCHEMA_VERSION, CategoryCatalog};

use std::sync::OnceLock;

/// The built-in category list, in display order.
pub fn builtin_categories() -> &'static CategoryCatalog {
    static BUILTIN: OnceLock<CategoryCatalog> = OnceLock::new();
    BUILTIN.get_or_init(CategoryCatalog::builtin)
}

/// Look up a built-in category by exact, case-sensitive id.
pub fn find_category(category_id: &str) -> Option<&'static Category> {
    builtin_categories().find(category_id)
}
