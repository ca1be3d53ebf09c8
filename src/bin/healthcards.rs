//! Command-line front end for the card catalog.
//!
//! Every command prints JSON on stdout so the rendering layer (or an operator
//! with `jq`) can consume it directly. Logs go to stderr, filtered by
//! `HEALTHCARDS_LOG` (defaults to `warn`).
//!
//! Usage:
//!   healthcards categories
//!   healthcards resources cancer
//!   healthcards route /health-cards/dental --lang zh
//!   healthcards --resource-root ./static/resources check

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use healthcards::{
    CategoryCatalog, Locale, Request, ResourceLister, Site, resolve_category_catalog,
    resolve_resource_root,
};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const ENV_LOG: &str = "HEALTHCARDS_LOG";

#[derive(Parser, Debug)]
#[command(name = "healthcards")]
#[command(about = "List bilingual health cards and resolve site routes")]
struct Cli {
    /// Directory holding one subdirectory per category (or set HEALTHCARDS_RESOURCE_ROOT).
    #[arg(long, global = true)]
    resource_root: Option<PathBuf>,
    /// JSON category list replacing the built-in one (or set HEALTHCARDS_CATEGORIES).
    #[arg(long, global = true)]
    categories: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the category list.
    Categories,
    /// Print the PDF cards filed under a category.
    Resources {
        category_id: String,
    },
    /// Resolve a request path into a page, redirect or not-found.
    Route {
        path: String,
        /// Visitor language.
        #[arg(long, default_value = "en", value_parser = parse_locale)]
        lang: Locale,
        /// Referring page, used by /set-language redirects.
        #[arg(long)]
        referrer: Option<String>,
    },
    /// Validate configuration and count the cards in every category.
    Check,
}

#[derive(Serialize)]
struct CategoryCount<'a> {
    id: &'a str,
    resources: usize,
}

fn main() {
    init_logging();
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_locale(raw: &str) -> Result<Locale, String> {
    Locale::try_from(raw).map_err(|err| err.to_string())
}

fn run() -> Result<()> {
    let Cli {
        resource_root,
        categories,
        command,
    } = Cli::parse();
    let catalog = resolve_category_catalog(categories.as_deref())?;

    match command {
        Command::Categories => print_json(catalog.categories()),
        Command::Resources { category_id } => {
            let site = open_site(resource_root, catalog)?;
            let Some(category) = site.catalog().find(&category_id) else {
                bail!("Category not found: {category_id}");
            };
            let resources = site.lister().list(&category.id)?;
            print_json(&resources)
        }
        Command::Route {
            path,
            lang,
            referrer,
        } => {
            let site = open_site(resource_root, catalog)?;
            let request = Request {
                path,
                locale: lang,
                referrer,
            };
            let response = site.handle(&request)?;
            print_json(&response)
        }
        Command::Check => {
            let site = open_site(resource_root, catalog)?;
            let mut counts = Vec::new();
            for category in site.catalog().categories() {
                let resources = site.lister().list(&category.id).with_context(|| {
                    format!("listing resources for category {}", category.id)
                })?;
                counts.push(CategoryCount {
                    id: &category.id,
                    resources: resources.len(),
                });
            }
            print_json(&counts)
        }
    }
}

fn open_site(resource_root: Option<PathBuf>, catalog: CategoryCatalog) -> Result<Site> {
    let root = resolve_resource_root(resource_root.as_deref())?;
    Ok(Site::new(catalog, ResourceLister::new(root)))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
