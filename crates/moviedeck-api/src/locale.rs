//! Application language code to TMDB locale resolution.
//!
//! Resolution is total: every input, including empty or garbage codes,
//! yields a locale tag.

use std::collections::BTreeMap;
use std::fmt;

/// Default application language code.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Default TMDB locale tag.
pub const DEFAULT_LOCALE: &str = "en-US";

/// Built-in language table.
///
/// Estonian has no usable TMDB translation coverage and maps to English.
const DEFAULT_TABLE: &[(&str, &str)] = &[("en", "en-US"), ("et", "en-US"), ("ru", "ru-RU")];

/// A TMDB locale tag such as `en-US`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[allow(clippy::module_name_repetitions)]
pub struct UpstreamLocale(String);

impl UpstreamLocale {
    /// Wraps a locale tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// Full tag (e.g. `ru-RU`).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Primary language subtag (e.g. `ru` for `ru-RU`), used for
    /// TMDB's `include_*_language` filters.
    #[must_use]
    pub fn language(&self) -> &str {
        self.0.split('-').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for UpstreamLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Maps short application codes to TMDB locale tags.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub struct LocaleResolver {
    /// Lower-cased primary subtag -> locale tag.
    table: BTreeMap<String, UpstreamLocale>,
    /// Tag used for unknown codes.
    default: UpstreamLocale,
}

impl Default for LocaleResolver {
    fn default() -> Self {
        Self::new(
            DEFAULT_TABLE
                .iter()
                .map(|(code, tag)| (String::from(*code), String::from(*tag))),
            DEFAULT_LOCALE,
        )
    }
}

impl LocaleResolver {
    /// Creates a resolver from `(code, tag)` pairs and a default tag.
    ///
    /// Codes are matched case-insensitively.
    pub fn new<I>(table: I, default: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let table = table
            .into_iter()
            .map(|(code, tag)| (code.trim().to_lowercase(), UpstreamLocale::new(tag)))
            .collect();
        Self {
            table,
            default: UpstreamLocale::new(default),
        }
    }

    /// Resolves an optional language code to a TMDB locale.
    ///
    /// Absent codes resolve as [`DEFAULT_LANGUAGE`]. Region suffixes are
    /// ignored (`ru-RU` and `RU` both resolve via `ru`). Unknown codes
    /// resolve to the default locale.
    #[must_use]
    pub fn resolve(&self, code: Option<&str>) -> UpstreamLocale {
        let code = code.unwrap_or(DEFAULT_LANGUAGE);
        let primary = code.trim().split('-').next().unwrap_or_default();
        self.table
            .get(&primary.to_lowercase())
            .unwrap_or(&self.default)
            .clone()
    }

    /// The locale used for unknown codes and for overview fallback.
    #[must_use]
    pub const fn default_locale(&self) -> &UpstreamLocale {
        &self.default
    }

    /// Returns `true` if `locale` is the default locale.
    #[must_use]
    pub fn is_default(&self, locale: &UpstreamLocale) -> bool {
        locale == &self.default
    }
}
