//! Display languages.
//!
//! Only English and Traditional Chinese are served. The visitor's choice is
//! request-scoped: callers carry it in `Request::locale` and receive updates
//! through `Response::Redirect::set_locale`; nothing in this crate stores it.

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Zh,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Zh];

    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Zh => "zh",
        }
    }
}

impl TryFrom<&str> for Locale {
    type Error = anyhow::Error;

    /// Exact codes only; `EN` or `zh-TW` are not accepted.
    fn try_from(value: &str) -> Result<Self> {
        match value {
            "en" => Ok(Locale::En),
            "zh" => Ok(Locale::Zh),
            other => bail!("Unknown language: {other}"),
        }
    }
}

impl FromStr for Locale {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Locale::try_from(s)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
