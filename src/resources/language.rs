//! Language labels inferred from filename conventions.
//!
//! Cards are named with markers such as `_ENG`, `_CHN` or `_Combined`. The
//! rules below are plain unanchored substring checks evaluated in order, first
//! match wins. That means a name containing `ENGINE` or `TECHNIQUE` is labelled
//! English or Chinese; existing filenames rely on this loose matching, so it
//! stays.

use crate::locale::Locale;
use serde::Serialize;

/// English and Chinese display strings for the language(s) of a card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LanguageLabels {
    pub en: Option<&'static str>,
    pub zh: Option<&'static str>,
}

impl LanguageLabels {
    pub const BILINGUAL: LanguageLabels = LanguageLabels::both("English & Chinese", "中英文");
    pub const CHINESE: LanguageLabels = LanguageLabels::both("Chinese", "中文");
    pub const ENGLISH: LanguageLabels = LanguageLabels::both("English", "英文");
    pub const UNKNOWN: LanguageLabels = LanguageLabels { en: None, zh: None };

    const fn both(en: &'static str, zh: &'static str) -> Self {
        Self {
            en: Some(en),
            zh: Some(zh),
        }
    }

    pub fn label(&self, locale: Locale) -> Option<&'static str> {
        match locale {
            Locale::En => self.en,
            Locale::Zh => self.zh,
        }
    }

    pub fn pair(&self) -> (Option<&'static str>, Option<&'static str>) {
        (self.en, self.zh)
    }
}

struct FilenameView<'a> {
    original: &'a str,
    upper: String,
}

impl FilenameView<'_> {
    fn has(&self, marker: &str) -> bool {
        self.upper.contains(marker)
    }
}

struct LabelRule {
    matches: fn(&FilenameView<'_>) -> bool,
    labels: LanguageLabels,
}

fn is_bilingual(f: &FilenameView<'_>) -> bool {
    f.has("COMBINED") || f.has("BILINGUAL") || (f.has("ENG") && f.has("CHN"))
}

fn is_chinese(f: &FilenameView<'_>) -> bool {
    f.has("CHN") || f.has("CHINESE") || f.original.contains("中文")
}

fn is_english(f: &FilenameView<'_>) -> bool {
    f.has("ENG") || f.has("ENGLISH")
}

const RULES: &[LabelRule] = &[
    LabelRule {
        matches: is_bilingual,
        labels: LanguageLabels::BILINGUAL,
    },
    LabelRule {
        matches: is_chinese,
        labels: LanguageLabels::CHINESE,
    },
    LabelRule {
        matches: is_english,
        labels: LanguageLabels::ENGLISH,
    },
];

/// Infer the language labels for a card from its filename.
pub fn infer_language_labels(filename: &str) -> LanguageLabels {
    let view = FilenameView {
        original: filename,
        upper: filename.to_uppercase(),
    };
    RULES
        .iter()
        .find(|rule| (rule.matches)(&view))
        .map(|rule| rule.labels)
        .unwrap_or(LanguageLabels::UNKNOWN)
}
