use crate::locale::Locale;
use serde::{Deserialize, Serialize};

/// A named grouping of health cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Category {
    /// Stable slug; also the directory name and URL segment.
    pub id: String,
    pub name: String,
    pub name_zh: String,
}

impl Category {
    pub fn new(id: &str, name: &str, name_zh: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            name_zh: name_zh.to_string(),
        }
    }

    pub fn display_name(&self, locale: Locale) -> &str {
        match locale {
            Locale::En => &self.name,
            Locale::Zh => &self.name_zh,
        }
    }
}

/// (id, English name, Chinese name) for the categories every deployment ships with.
pub(crate) const BUILTIN_CATEGORIES: &[(&str, &str, &str)] = &[
    ("cancer", "Cancer", "癌症資料卡"),
    ("cardiovascular", "Cardiovascular Health", "心臟健康卡"),
    ("chronic-illness", "Chronic Illness", "慢性病健康卡"),
    ("dental", "Dental Health", "牙科健康卡"),
    ("infections", "Infections and Virus", "感染和病毒健康卡"),
    ("mental-health", "Mental Health", "心理健康卡"),
    ("preventative", "Preventative Care", "預防保健卡"),
    ("respiratory", "Respiratory Health", "呼吸系統健康卡"),
    ("sexual-health", "Sexual Health", "性健康卡"),
];
