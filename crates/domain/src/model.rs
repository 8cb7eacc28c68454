//! Domain models and value objects

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Text carried in every site language, keyed by language code
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Localized(BTreeMap<String, String>);

impl Localized {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly useful in tests and fixtures
    pub fn with(mut self, lang: impl Into<String>, text: impl Into<String>) -> Self {
        self.0.insert(lang.into(), text.into());
        self
    }

    /// Text for a language, if present
    pub fn get(&self, lang: &str) -> Option<&str> {
        self.0.get(lang).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Languages this text is available in
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

/// The parsed site configuration document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteDocument {
    /// Site languages; the first one is rendered at the output root
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,
    /// Site title, also used as the home section heading
    pub site_title: Localized,
    /// Markup of the home section
    #[serde(default)]
    pub index_content: Localized,
    /// Plain content pages, in menu order
    #[serde(default)]
    pub pages: Vec<PageSpec>,
    /// Per-language overrides of the built-in UI labels
    #[serde(default)]
    pub labels: BTreeMap<String, LabelOverrides>,
    /// Glossary section, if the site has one
    #[serde(default)]
    pub glossary: Option<GlossarySpec>,
}

fn default_languages() -> Vec<String> {
    vec!["en".to_string(), "pl".to_string()]
}

impl SiteDocument {
    /// The language rendered at the output root
    pub fn default_language(&self) -> Option<&str> {
        self.languages.first().map(String::as_str)
    }

    /// UI labels for a language, built-in defaults merged with overrides
    pub fn labels_for(&self, lang: &str) -> Labels {
        Labels::defaults_for(lang).merge(self.labels.get(lang))
    }
}

/// A plain content page rendered as its own section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSpec {
    /// Anchor used for the section and its menu link
    pub slug: String,
    pub title: Localized,
    #[serde(default)]
    pub content: Localized,
}

/// Glossary data as it appears in the site document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlossarySpec {
    #[serde(default)]
    pub topics: Vec<TopicSpec>,
    #[serde(default)]
    pub categories: Vec<CategorySpec>,
    #[serde(default)]
    pub definitions: Vec<DefinitionSpec>,
}

/// A glossary topic listing categories by id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopicSpec {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Localized,
    #[serde(default)]
    pub categories: Vec<String>,
}

/// A glossary category listing definitions by id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategorySpec {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Localized,
    #[serde(default)]
    pub definitions: Vec<String>,
}

/// A glossary definition before it is resolved for one language
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefinitionSpec {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub label: Option<Localized>,
    #[serde(default)]
    pub description: Localized,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Illustrative snippet; code is not translated
    #[serde(default)]
    pub code: Option<String>,
}

/// A glossary definition resolved for one language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    /// Unique identifier, also the anchor key
    pub id: String,
    /// Display title
    pub label: String,
    /// Rich text body, may embed markup
    pub description: String,
    /// Free-form tags in declared order
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub code: Option<String>,
}

/// A glossary category resolved for one language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub title: String,
    /// Definition ids in display order
    pub definitions: Vec<String>,
}

/// A glossary topic resolved for one language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: String,
    pub title: String,
    /// Category ids in display order
    pub categories: Vec<String>,
}

/// Display view of one definition, produced fresh on every render
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub id: String,
    pub title: String,
    /// Description with tag and code markers stripped
    pub body: String,
    pub tags: Vec<String>,
    /// Dedented snippet; `None` means the card has no code section
    pub code: Option<String>,
}

/// Partial label set from the site document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LabelOverrides {
    pub home: Option<String>,
    pub footer: Option<String>,
    pub glossary: Option<String>,
    pub tags: Option<String>,
    pub example: Option<String>,
}

/// UI strings for one language
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Labels {
    pub home: String,
    pub footer: String,
    pub glossary: String,
    pub tags: String,
    pub example: String,
}

impl Labels {
    /// Built-in labels; unknown languages get the English set
    pub fn defaults_for(lang: &str) -> Self {
        match lang {
            "pl" => Self {
                home: "Strona główna".to_string(),
                footer: "Ostatnia aktualizacja: 2024".to_string(),
                glossary: "Słownik".to_string(),
                tags: "Tagi".to_string(),
                example: "Przykład".to_string(),
            },
            _ => Self {
                home: "Home".to_string(),
                footer: "Last updated: 2024".to_string(),
                glossary: "Glossary".to_string(),
                tags: "Tags".to_string(),
                example: "Example".to_string(),
            },
        }
    }

    fn merge(mut self, overrides: Option<&LabelOverrides>) -> Self {
        let Some(o) = overrides else {
            return self;
        };
        if let Some(v) = &o.home {
            self.home = v.clone();
        }
        if let Some(v) = &o.footer {
            self.footer = v.clone();
        }
        if let Some(v) = &o.glossary {
            self.glossary = v.clone();
        }
        if let Some(v) = &o.tags {
            self.tags = v.clone();
        }
        if let Some(v) = &o.example {
            self.example = v.clone();
        }
        self
    }
}

/// A rendered page ready to be written
#[derive(Debug, Clone)]
pub struct RenderedPage {
    /// Language the page was rendered in
    pub lang: String,
    /// Output path relative to the site root
    pub path: PathBuf,
    /// Full HTML document
    pub html: String,
    /// Number of glossary cards on the page
    pub card_count: usize,
    /// Number of distinct tags on the page
    pub tag_count: usize,
}

/// Summary of one page produced by a build
#[derive(Debug, Clone, Serialize)]
pub struct PageReport {
    pub lang: String,
    pub path: PathBuf,
    pub bytes: usize,
    /// SHA-256 of the page content
    pub sha256: String,
    pub cards: usize,
    pub tags: usize,
}

/// Result of a site build
#[derive(Debug, Clone, Default, Serialize)]
pub struct BuildReport {
    pub pages: Vec<PageReport>,
}
