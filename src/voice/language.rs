//! Human-readable language names for voice listings
//!
//! Voices carry a BCP-47 tag such as "en-GB". For display we turn that into
//! "English (United Kingdom)". Resolution may fail (unknown subtag, host
//! locale we have no names for); the caller then shows the raw tag.

use crate::{Result, SaybackError};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Outcome of a display-name lookup
///
/// Never an error: an unresolved tag comes back unchanged as `Fallback`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayName {
    Resolved(String),
    Fallback(String),
}

impl DisplayName {
    /// The text to show, whichever way it was produced
    pub fn as_str(&self) -> &str {
        match self {
            DisplayName::Resolved(s) | DisplayName::Fallback(s) => s,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, DisplayName::Resolved(_))
    }
}

impl std::fmt::Display for DisplayName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Turns a language tag into a name in the host locale's language
pub trait LanguageNameResolver {
    fn resolve(&self, tag: &str, host_locale: &str) -> Result<String>;
}

/// Resolve `tag` for display, falling back to the tag itself on any failure
pub fn display_name(resolver: &dyn LanguageNameResolver, tag: &str, host_locale: &str) -> DisplayName {
    match resolver.resolve(tag, host_locale) {
        Ok(name) if !name.is_empty() => DisplayName::Resolved(name),
        Ok(_) => DisplayName::Fallback(tag.to_string()),
        Err(e) => {
            log::debug!("No display name for {:?}: {}", tag, e);
            DisplayName::Fallback(tag.to_string())
        }
    }
}

/// ISO 639-1 primary subtag -> English language name
static LANGUAGES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("ar", "Arabic");
    m.insert("bg", "Bulgarian");
    m.insert("bn", "Bangla");
    m.insert("ca", "Catalan");
    m.insert("cs", "Czech");
    m.insert("cy", "Welsh");
    m.insert("da", "Danish");
    m.insert("de", "German");
    m.insert("el", "Greek");
    m.insert("en", "English");
    m.insert("es", "Spanish");
    m.insert("et", "Estonian");
    m.insert("eu", "Basque");
    m.insert("fa", "Persian");
    m.insert("fi", "Finnish");
    m.insert("fil", "Filipino");
    m.insert("fr", "French");
    m.insert("ga", "Irish");
    m.insert("gl", "Galician");
    m.insert("gu", "Gujarati");
    m.insert("he", "Hebrew");
    m.insert("hi", "Hindi");
    m.insert("hr", "Croatian");
    m.insert("hu", "Hungarian");
    m.insert("id", "Indonesian");
    m.insert("is", "Icelandic");
    m.insert("it", "Italian");
    m.insert("ja", "Japanese");
    m.insert("kn", "Kannada");
    m.insert("ko", "Korean");
    m.insert("lt", "Lithuanian");
    m.insert("lv", "Latvian");
    m.insert("ml", "Malayalam");
    m.insert("mr", "Marathi");
    m.insert("ms", "Malay");
    m.insert("nb", "Norwegian Bokmål");
    m.insert("nl", "Dutch");
    m.insert("no", "Norwegian");
    m.insert("pa", "Punjabi");
    m.insert("pl", "Polish");
    m.insert("pt", "Portuguese");
    m.insert("ro", "Romanian");
    m.insert("ru", "Russian");
    m.insert("sk", "Slovak");
    m.insert("sl", "Slovenian");
    m.insert("sr", "Serbian");
    m.insert("sv", "Swedish");
    m.insert("sw", "Swahili");
    m.insert("ta", "Tamil");
    m.insert("te", "Telugu");
    m.insert("th", "Thai");
    m.insert("tr", "Turkish");
    m.insert("uk", "Ukrainian");
    m.insert("ur", "Urdu");
    m.insert("vi", "Vietnamese");
    m.insert("yue", "Cantonese");
    m.insert("zh", "Chinese");
    m
});

/// ISO 3166-1 region subtag -> English region name
static REGIONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("AR", "Argentina");
    m.insert("AT", "Austria");
    m.insert("AU", "Australia");
    m.insert("BE", "Belgium");
    m.insert("BR", "Brazil");
    m.insert("CA", "Canada");
    m.insert("CH", "Switzerland");
    m.insert("CN", "China");
    m.insert("CO", "Colombia");
    m.insert("DE", "Germany");
    m.insert("DK", "Denmark");
    m.insert("EG", "Egypt");
    m.insert("ES", "Spain");
    m.insert("FI", "Finland");
    m.insert("FR", "France");
    m.insert("GB", "United Kingdom");
    m.insert("GR", "Greece");
    m.insert("HK", "Hong Kong");
    m.insert("IE", "Ireland");
    m.insert("IL", "Israel");
    m.insert("IN", "India");
    m.insert("IT", "Italy");
    m.insert("JP", "Japan");
    m.insert("KR", "South Korea");
    m.insert("MX", "Mexico");
    m.insert("NL", "Netherlands");
    m.insert("NO", "Norway");
    m.insert("NZ", "New Zealand");
    m.insert("PL", "Poland");
    m.insert("PT", "Portugal");
    m.insert("RU", "Russia");
    m.insert("SA", "Saudi Arabia");
    m.insert("SE", "Sweden");
    m.insert("SG", "Singapore");
    m.insert("TR", "Turkey");
    m.insert("TW", "Taiwan");
    m.insert("UA", "Ukraine");
    m.insert("US", "United States");
    m.insert("ZA", "South Africa");
    m
});

/// Built-in English name table
///
/// Only knows English names, so any host locale whose language is not
/// English fails and the caller falls back to the raw tag.
#[derive(Debug, Default, Clone, Copy)]
pub struct LanguageTable;

impl LanguageTable {
    pub fn new() -> Self {
        Self
    }
}

/// Split "en_GB.UTF-8" / "en-gb" into ("en", Some("GB"))
fn split_tag(tag: &str) -> (String, Option<String>) {
    let tag = tag.split(['.', '@']).next().unwrap_or("");
    let mut parts = tag.split(['-', '_']).filter(|p| !p.is_empty());
    let primary = parts.next().unwrap_or("").to_ascii_lowercase();
    // Skip a script subtag (4 letters) to reach the region
    let region = parts
        .find(|p| p.len() == 2 || (p.len() == 3 && p.chars().all(|c| c.is_ascii_digit())))
        .map(|p| p.to_ascii_uppercase());
    (primary, region)
}

impl LanguageNameResolver for LanguageTable {
    fn resolve(&self, tag: &str, host_locale: &str) -> Result<String> {
        let (host_lang, _) = split_tag(host_locale);
        if !host_lang.is_empty() && host_lang != "en" {
            return Err(SaybackError::Other(format!(
                "no language names for host locale {:?}",
                host_locale
            )));
        }

        let (primary, region) = split_tag(tag);
        let language = LANGUAGES
            .get(primary.as_str())
            .ok_or_else(|| SaybackError::Other(format!("unknown language subtag {:?}", primary)))?;

        match region {
            Some(region) => match REGIONS.get(region.as_str()) {
                Some(region_name) => Ok(format!("{} ({})", language, region_name)),
                None => Ok(format!("{} ({})", language, region)),
            },
            None => Ok(language.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Broken;

    impl LanguageNameResolver for Broken {
        fn resolve(&self, _tag: &str, _host_locale: &str) -> Result<String> {
            Err("resolver unavailable".into())
        }
    }

    #[test]
    fn test_resolves_language_and_region() {
        let name = display_name(&LanguageTable, "en-GB", "en-US");
        assert_eq!(name, DisplayName::Resolved("English (United Kingdom)".into()));
    }

    #[test]
    fn test_resolves_bare_language() {
        assert_eq!(display_name(&LanguageTable, "fr", "en").as_str(), "French");
    }

    #[test]
    fn test_underscore_and_case() {
        assert_eq!(
            display_name(&LanguageTable, "pt_br", "en_US.UTF-8").as_str(),
            "Portuguese (Brazil)"
        );
    }

    #[test]
    fn test_script_subtag_skipped() {
        assert_eq!(
            display_name(&LanguageTable, "zh-Hant-TW", "en").as_str(),
            "Chinese (Taiwan)"
        );
    }

    #[test]
    fn test_unknown_tag_falls_back() {
        let name = display_name(&LanguageTable, "xx-YY", "en-US");
        assert_eq!(name, DisplayName::Fallback("xx-YY".into()));
    }

    #[test]
    fn test_non_english_host_falls_back() {
        let name = display_name(&LanguageTable, "en-US", "de-DE");
        assert!(!name.is_resolved());
        assert_eq!(name.as_str(), "en-US");
    }

    #[test]
    fn test_resolver_error_is_masked() {
        assert_eq!(
            display_name(&Broken, "en-US", "en-US"),
            DisplayName::Fallback("en-US".into())
        );
    }

    #[test]
    fn test_empty_tag() {
        assert_eq!(display_name(&LanguageTable, "", "en").as_str(), "");
    }
}
