//! Locales and translation catalogs.
//!
//! The site speaks four languages. Every user-facing string lives in a flat
//! `key → string` table per locale (`locales/<code>.json`), embedded in the
//! binary at compile time. Keys are dot-namespaced (`nav.home`,
//! `rsvp.thankYou`) and values may carry `{{name}}` placeholders.
//!
//! ## Locale Resolution
//!
//! The active locale is an explicit [`LocaleContext`] value, resolved once
//! at startup and updated only by an explicit selection:
//!
//! ```text
//! stored preference (if supported)
//!   → browser language (primary subtag, if supported)
//!     → fr
//! ```
//!
//! Renderers receive the context (or its [`Catalog`]) as an argument; there
//! is no process-wide current language.
//!
//! ## Lookup Fallback
//!
//! A key missing from a catalog falls back to the default locale's catalog,
//! then to the key itself. Lookups never fail.

use crate::preferences::{PreferenceError, PreferenceStore};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use thiserror::Error;

/// Key under which the selected locale code is persisted.
pub const PREFERENCE_KEY: &str = "language";

#[derive(Error, Debug)]
pub enum LocaleError {
    #[error("unsupported locale '{0}' (expected one of: fr, en, de, es)")]
    Unsupported(String),
    #[error("preference store error: {0}")]
    Store(#[from] PreferenceError),
}

/// A supported site language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    Fr,
    En,
    De,
    Es,
}

impl Locale {
    /// Every supported locale, in switcher order.
    pub const ALL: [Locale; 4] = [Locale::Fr, Locale::En, Locale::De, Locale::Es];

    /// Locale used when neither a stored preference nor the browser gives a
    /// supported answer. Its pages are published at the site root.
    pub const DEFAULT: Locale = Locale::Fr;

    pub const fn code(self) -> &'static str {
        match self {
            Locale::Fr => "fr",
            Locale::En => "en",
            Locale::De => "de",
            Locale::Es => "es",
        }
    }

    pub const fn native_name(self) -> &'static str {
        match self {
            Locale::Fr => "Français",
            Locale::En => "English",
            Locale::De => "Deutsch",
            Locale::Es => "Español",
        }
    }

    /// Marker shown on the language switcher buttons.
    pub const fn emoji(self) -> &'static str {
        match self {
            Locale::Fr => "🥖",
            Locale::En => "💂",
            Locale::De => "🍺",
            Locale::Es => "💃",
        }
    }

    /// Parse an exact locale code (`"en"`). Case and surrounding whitespace
    /// are ignored; region subtags are not accepted here.
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim().to_ascii_lowercase();
        Locale::ALL.into_iter().find(|l| l.code() == code)
    }

    /// Map a browser-reported language tag (`"de-CH"`, `"en_US"`) to a
    /// supported locale by its primary subtag.
    pub fn from_browser_language(tag: &str) -> Option<Self> {
        let primary = tag.trim().split(['-', '_']).next().unwrap_or("");
        Self::from_code(primary)
    }

    /// URL prefix for this locale's copy of the site: empty for the default
    /// locale, `/<code>` otherwise.
    pub fn url_prefix(self) -> String {
        if self == Locale::DEFAULT {
            String::new()
        } else {
            format!("/{}", self.code())
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Locale::from_code(s).ok_or_else(|| LocaleError::Unsupported(s.to_string()))
    }
}

// ============================================================================
// Catalogs
// ============================================================================

const FR_JSON: &str = include_str!("../locales/fr.json");
const EN_JSON: &str = include_str!("../locales/en.json");
const DE_JSON: &str = include_str!("../locales/de.json");
const ES_JSON: &str = include_str!("../locales/es.json");

/// Flat translation table for one locale.
#[derive(Debug, Clone)]
pub struct Catalog {
    locale: Locale,
    entries: BTreeMap<String, String>,
}

impl Catalog {
    /// Build a catalog from a flat JSON object of strings.
    pub fn from_json(locale: Locale, json: &str) -> Result<Self, serde_json::Error> {
        let entries: BTreeMap<String, String> = serde_json::from_str(json)?;
        Ok(Self { locale, entries })
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Raw lookup without fallback.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Translate `key`, falling back to the default locale and then to the
    /// key itself.
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        if let Some(value) = self.get(key) {
            return value;
        }
        if self.locale != Locale::DEFAULT
            && let Some(value) = catalog(Locale::DEFAULT).get(key)
        {
            return value;
        }
        key
    }

    /// Translate `key` and substitute `{{name}}` placeholders from `args`.
    pub fn t_with(&self, key: &str, args: &[(&str, &str)]) -> String {
        interpolate(self.t(key), args)
    }
}

/// The embedded catalog for `locale`.
pub fn catalog(locale: Locale) -> &'static Catalog {
    static CATALOGS: OnceLock<BTreeMap<Locale, Catalog>> = OnceLock::new();
    let catalogs = CATALOGS.get_or_init(|| {
        [
            (Locale::Fr, FR_JSON),
            (Locale::En, EN_JSON),
            (Locale::De, DE_JSON),
            (Locale::Es, ES_JSON),
        ]
        .into_iter()
        .map(|(locale, json)| {
            let catalog = Catalog::from_json(locale, json)
                .expect("embedded locale file must be a flat JSON object of strings");
            (locale, catalog)
        })
        .collect()
    });
    &catalogs[&locale]
}

/// Replace every `{{key}}` in `template` with its value from `args`.
///
/// Unknown placeholders are left as-is.
pub fn interpolate(template: &str, args: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (key, value) in args {
        out = out.replace(&format!("{{{{{key}}}}}"), value);
    }
    out
}

// ============================================================================
// Locale context
// ============================================================================

/// The active locale, passed explicitly to everything that renders text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleContext {
    current: Locale,
}

impl LocaleContext {
    pub fn new(locale: Locale) -> Self {
        Self { current: locale }
    }

    /// Resolve the initial locale: stored preference, then browser language,
    /// then the default.
    pub fn resolve(stored: Option<&str>, browser_language: Option<&str>) -> Self {
        let locale = stored
            .and_then(Locale::from_code)
            .or_else(|| browser_language.and_then(Locale::from_browser_language))
            .unwrap_or(Locale::DEFAULT);
        Self::new(locale)
    }

    /// Resolve the initial locale reading the stored preference from `store`.
    pub fn load(
        store: &dyn PreferenceStore,
        browser_language: Option<&str>,
    ) -> Result<Self, LocaleError> {
        let stored = store.get(PREFERENCE_KEY)?;
        let context = Self::resolve(stored.as_deref(), browser_language);
        tracing::debug!(
            stored = stored.as_deref().unwrap_or("-"),
            browser = browser_language.unwrap_or("-"),
            locale = %context.current,
            "resolved locale"
        );
        Ok(context)
    }

    pub fn current(&self) -> Locale {
        self.current
    }

    pub fn catalog(&self) -> &'static Catalog {
        catalog(self.current)
    }

    /// Switch to `locale` and persist the choice.
    pub fn set(
        &mut self,
        locale: Locale,
        store: &mut dyn PreferenceStore,
    ) -> Result<(), LocaleError> {
        store.set(PREFERENCE_KEY, locale.code())?;
        self.current = locale;
        tracing::info!(locale = %locale, "locale changed");
        Ok(())
    }
}

impl Default for LocaleContext {
    fn default() -> Self {
        Self::new(Locale::DEFAULT)
    }
}
