// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Widget configuration.
//!
//! Everything a widget instance needs to know before it mounts: which
//! collections to query and in what order, where the API lives, how long to
//! wait for typing to settle, which filters to send, which page nodes to bind,
//! and what to say in each locale. A `SearchConfig` is frozen once a widget is
//! mounted (the widget holds it behind an `Arc`).
//!
//! The TOML keys follow the add-on's published config file, so an existing
//! `globalsearch.php` translates line for line:
//!
//! ```toml
//! collections = ["experience", "place", "pages"]
//! api_endpoint = "/api/collections"
//! origin = "https://example.com"
//! debounce = 300
//!
//! [messages.locales.en]
//! placeholder = "Type to search..."
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use url::Url;

/// Locales whose text runs right to left.
const RTL_LANGUAGES: &[&str] = &["ar", "he", "fa", "ur"];

/// Complete configuration for one widget instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Collections queried per search, in result order. Must be unique.
    pub collections: Vec<String>,
    /// Base path of the Collection Query API (absolute URL or path).
    #[serde(alias = "api_endpoint")]
    pub api_base: String,
    /// Origin used to resolve a path-only `api_base`.
    pub origin: Option<Url>,
    /// Quiet period before a keystroke burst triggers a search.
    #[serde(alias = "debounce")]
    pub debounce_ms: u64,
    /// Cap on the aggregated list. `None` renders everything returned.
    pub max_results: Option<usize>,
    /// Explicit locale. `None` defers to the host page's document language.
    pub locale: Option<String>,
    pub filters: FilterConfig,
    pub mount: MountIds,
    pub messages: Messages,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            collections: vec![
                "experience".to_string(),
                "place".to_string(),
                "pages".to_string(),
            ],
            api_base: "/api/collections".to_string(),
            origin: None,
            debounce_ms: 300,
            max_results: None,
            locale: None,
            filters: FilterConfig::default(),
            mount: MountIds::default(),
            messages: Messages::default(),
        }
    }
}

/// Optional filter parameters appended to every collection request.
///
/// `filter[title:contains]` is always sent; these two are switchable because
/// the API only honours keys listed in each collection's `allowed_filters`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Send `filter[published:is]=true`.
    pub published_only: bool,
    /// Send `filter[locale:is]={locale}`.
    pub match_locale: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            published_only: true,
            match_locale: true,
        }
    }
}

impl FilterConfig {
    /// Only the title filter.
    pub fn title_only() -> Self {
        Self {
            published_only: false,
            match_locale: false,
        }
    }
}

/// Element ids of the three host page nodes the widget binds to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MountIds {
    /// Text input.
    pub input: String,
    /// Results container (toggled visible/hidden).
    pub results: String,
    /// Results list inside the container (receives rendered markup).
    pub list: String,
}

impl Default for MountIds {
    fn default() -> Self {
        Self {
            input: "global-search-input".to_string(),
            results: "global-search-results".to_string(),
            list: "global-search-results-list".to_string(),
        }
    }
}

/// Localized strings for one locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleMessages {
    pub placeholder: String,
    pub searching: String,
    pub no_results: String,
    pub error: String,
}

impl LocaleMessages {
    pub fn english() -> Self {
        Self {
            placeholder: "Type to search...".to_string(),
            searching: "Searching...".to_string(),
            no_results: "No matching results.".to_string(),
            error: "An error occurred during the search.".to_string(),
        }
    }

    pub fn arabic() -> Self {
        Self {
            placeholder: "اكتب للبحث...".to_string(),
            searching: "جاري البحث...".to_string(),
            no_results: "لا توجد نتائج مطابقة.".to_string(),
            error: "حدث خطأ أثناء البحث.".to_string(),
        }
    }
}

/// Locale code → message record, with an explicit fallback locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub default_locale: String,
    pub locales: BTreeMap<String, LocaleMessages>,
}

impl Default for Messages {
    fn default() -> Self {
        let mut locales = BTreeMap::new();
        locales.insert("en".to_string(), LocaleMessages::english());
        locales.insert("ar".to_string(), LocaleMessages::arabic());
        Self {
            default_locale: "en".to_string(),
            locales,
        }
    }
}

impl Messages {
    /// Messages for `locale`: exact tag, then primary subtag, then the
    /// default locale.
    pub fn for_locale(&self, locale: &str) -> &LocaleMessages {
        if let Some(found) = self.locales.get(locale) {
            return found;
        }
        let primary = primary_subtag(locale);
        if let Some(found) = self.locales.get(primary) {
            return found;
        }
        self.locales
            .get(&self.default_locale)
            .or_else(|| self.locales.values().next())
            .unwrap_or_else(|| fallback_messages())
    }
}

fn fallback_messages() -> &'static LocaleMessages {
    static FALLBACK: std::sync::OnceLock<LocaleMessages> = std::sync::OnceLock::new();
    FALLBACK.get_or_init(LocaleMessages::english)
}

/// `ar-SA` → `ar`, `pt_BR` → `pt`.
fn primary_subtag(locale: &str) -> &str {
    locale.split(['-', '_']).next().unwrap_or(locale)
}

/// Whether `locale` is written right to left.
pub fn is_rtl(locale: &str) -> bool {
    let primary = primary_subtag(locale).to_ascii_lowercase();
    RTL_LANGUAGES.contains(&primary.as_str())
}

impl SearchConfig {
    /// Load and validate a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: SearchConfig = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants a mounted widget relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::with_capacity(self.collections.len());
        for name in &self.collections {
            if name.trim().is_empty() {
                return Err(ConfigError::EmptyCollectionName);
            }
            if !seen.insert(name.as_str()) {
                return Err(ConfigError::DuplicateCollection(name.clone()));
            }
        }
        if self.api_base.trim().is_empty() {
            return Err(ConfigError::EmptyApiBase);
        }
        if !self.messages.locales.contains_key(&self.messages.default_locale) {
            return Err(ConfigError::MissingDefaultLocale(
                self.messages.default_locale.clone(),
            ));
        }
        Ok(())
    }

    /// Absolute base URL for collection requests.
    ///
    /// A path-only base (the add-on default `/api/collections`) is joined onto
    /// `origin`. The result always ends in `/` so collection segments append
    /// rather than replace the last path segment.
    pub fn api_base_url(&self) -> Result<Url, ConfigError> {
        let base = self.api_base.trim();
        if base.is_empty() {
            return Err(ConfigError::EmptyApiBase);
        }
        let mut url = match Url::parse(base) {
            Ok(url) => url,
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                let origin = self
                    .origin
                    .as_ref()
                    .ok_or_else(|| ConfigError::RelativeApiBase(base.to_string()))?;
                origin
                    .join(base)
                    .map_err(|e| ConfigError::InvalidApiBase {
                        base: base.to_string(),
                        message: e.to_string(),
                    })?
            }
            Err(e) => {
                return Err(ConfigError::InvalidApiBase {
                    base: base.to_string(),
                    message: e.to_string(),
                })
            }
        };
        if url.cannot_be_a_base() {
            return Err(ConfigError::InvalidApiBase {
                base: base.to_string(),
                message: "URL cannot carry path segments".to_string(),
            });
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        url.set_query(None);
        url.set_fragment(None);
        Ok(url)
    }

    /// Effective locale: explicit config, then the page language, then the
    /// default locale.
    pub fn resolve_locale(&self, page_lang: Option<&str>) -> String {
        self.locale
            .as_deref()
            .or(page_lang)
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(&self.messages.default_locale)
            .to_string()
    }
}
