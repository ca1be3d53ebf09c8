//! Request routing for the card site.
//!
//! `Site::handle` turns a request path into the structured input of the
//! rendering layer: which template to render and the data it needs, a
//! redirect, or a not-found. The visitor's language is an explicit part of
//! the request and the only write the router ever asks for is carried back in
//! `Response::Redirect::set_locale`; the router itself holds nothing mutable.

use crate::catalog::CategoryCatalog;
use crate::locale::Locale;
use crate::resources::ResourceLister;
use anyhow::Result;
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{debug, warn};

pub const CATEGORY_NOT_FOUND: &str = "Category not found";
pub const PAGE_NOT_FOUND: &str = "Page not found";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    pub path: String,
    pub locale: Locale,
    /// Page the visitor came from, used as the redirect target after a language switch.
    pub referrer: Option<String>,
}

impl Request {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_referrer(mut self, referrer: impl Into<String>) -> Self {
        self.referrer = Some(referrer.into());
        self
    }
}

/// Template name plus the data the renderer feeds it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView {
    pub template: &'static str,
    pub locale: Locale,
    pub data: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Response {
    Page(PageView),
    Redirect {
        location: String,
        /// Language the caller should remember for this visitor, if it changed.
        set_locale: Option<Locale>,
    },
    NotFound {
        message: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<'a> {
    Index,
    Team,
    Contact,
    HealthCards,
    HealthCardCategory(&'a str),
    ResourcesZh,
    ResourcesZhCategory(&'a str),
    SetLanguage(&'a str),
    Unknown,
}

impl<'a> Route<'a> {
    /// Match a request path. A query string is ignored and a single trailing
    /// slash is tolerated on every route except the root.
    pub fn parse(path: &'a str) -> Route<'a> {
        let path = path.split_once('?').map_or(path, |(p, _)| p);
        let Some(rest) = path.strip_prefix('/') else {
            return Route::Unknown;
        };
        if rest.is_empty() {
            return Route::Index;
        }
        let rest = rest.strip_suffix('/').unwrap_or(rest);
        let segments: Vec<&str> = rest.split('/').collect();
        match segments.as_slice() {
            ["team"] => Route::Team,
            ["contact"] => Route::Contact,
            ["health-cards"] => Route::HealthCards,
            ["health-cards", id] if !id.is_empty() => Route::HealthCardCategory(*id),
            ["resources-zh"] => Route::ResourcesZh,
            ["resources-zh", id] if !id.is_empty() => Route::ResourcesZhCategory(*id),
            ["set-language", lang] if !lang.is_empty() => Route::SetLanguage(*lang),
            _ => Route::Unknown,
        }
    }
}

/// Category list plus the lister for their resource directories.
#[derive(Debug, Clone)]
pub struct Site {
    catalog: CategoryCatalog,
    lister: ResourceLister,
}

impl Site {
    pub fn new(catalog: CategoryCatalog, lister: ResourceLister) -> Self {
        Self { catalog, lister }
    }

    pub fn catalog(&self) -> &CategoryCatalog {
        &self.catalog
    }

    pub fn lister(&self) -> &ResourceLister {
        &self.lister
    }

    /// Resolve one request. Only an unexpected filesystem failure while
    /// listing a category is an error.
    pub fn handle(&self, request: &Request) -> Result<Response> {
        let route = Route::parse(&request.path);
        debug!(path = %request.path, ?route, locale = %request.locale, "routing request");
        let response = match route {
            Route::Index => self.page("index.html", request, json!({})),
            Route::Team => self.page("team.html", request, json!({})),
            Route::Contact => self.page("contact.html", request, json!({})),
            Route::HealthCards => self.category_index("health_cards.html", request),
            Route::HealthCardCategory(id) => {
                self.category_detail("health_card_detail.html", id, request)?
            }
            Route::ResourcesZh => self.category_index("resources_zh.html", request),
            Route::ResourcesZhCategory(id) => {
                self.category_detail("resources_zh_detail.html", id, request)?
            }
            Route::SetLanguage(code) => set_language(code, request),
            Route::Unknown => Response::NotFound {
                message: PAGE_NOT_FOUND,
            },
        };
        Ok(response)
    }

    fn page(&self, template: &'static str, request: &Request, data: Value) -> Response {
        Response::Page(PageView {
            template,
            locale: request.locale,
            data,
        })
    }

    fn category_index(&self, template: &'static str, request: &Request) -> Response {
        self.page(
            template,
            request,
            json!({ "categories": self.catalog.categories() }),
        )
    }

    fn category_detail(
        &self,
        template: &'static str,
        category_id: &str,
        request: &Request,
    ) -> Result<Response> {
        let Some(category) = self.catalog.find(category_id) else {
            return Ok(Response::NotFound {
                message: CATEGORY_NOT_FOUND,
            });
        };
        let resources = self.lister.list(&category.id)?;
        Ok(self.page(
            template,
            request,
            json!({ "category": category, "resources": resources }),
        ))
    }
}

fn set_language(code: &str, request: &Request) -> Response {
    let set_locale = match Locale::try_from(code) {
        Ok(locale) => Some(locale),
        Err(err) => {
            warn!("ignoring language switch: {err}");
            None
        }
    };
    let location = request
        .referrer
        .as_deref()
        .filter(|r| !r.is_empty())
        .unwrap_or("/")
        .to_string();
    Response::Redirect {
        location,
        set_locale,
    }
}
