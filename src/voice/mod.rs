//! Voice selection
//!
//! The speech engine offers a list of installed voices, refreshed whenever
//! the platform announces a change. Out of that list we pick one "best"
//! voice to seed the user's preference on first run.

pub mod language;

pub use language::{display_name, DisplayName, LanguageNameResolver, LanguageTable};

use serde::{Deserialize, Serialize};

/// A voice offered by the speech engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceDescriptor {
    /// Engine-specific voice name, used as the preference key
    pub name: String,

    /// BCP-47 language tag (e.g. "en-US")
    pub lang: String,
}

impl VoiceDescriptor {
    pub fn new(name: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lang: lang.into(),
        }
    }

    fn lang_is(&self, locale: &str) -> bool {
        self.lang.eq_ignore_ascii_case(locale)
    }
}

/// Pick the best voice for `locale`
///
/// Rules are tried in order and the first voice (in list order) matching a
/// rule wins:
/// 1. a "Google" voice for the locale
/// 2. any voice named "daniel" (case-insensitive), whatever its language
/// 3. a "Microsoft" voice for the locale
/// 4. any "Google" voice
pub fn select_best_voice<'a>(
    voices: &'a [VoiceDescriptor],
    locale: &str,
) -> Option<&'a VoiceDescriptor> {
    voices
        .iter()
        .find(|v| v.name.contains("Google") && v.lang_is(locale))
        .or_else(|| {
            voices
                .iter()
                .find(|v| v.name.to_lowercase().contains("daniel"))
        })
        .or_else(|| {
            voices
                .iter()
                .find(|v| v.name.contains("Microsoft") && v.lang_is(locale))
        })
        .or_else(|| voices.iter().find(|v| v.name.contains("Google")))
}

/// Find a voice by exact name
pub fn find_voice<'a>(voices: &'a [VoiceDescriptor], name: &str) -> Option<&'a VoiceDescriptor> {
    if name.is_empty() {
        return None;
    }
    voices.iter().find(|v| v.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(name: &str, lang: &str) -> VoiceDescriptor {
        VoiceDescriptor::new(name, lang)
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(select_best_voice(&[], "en-US"), None);
    }

    #[test]
    fn test_locale_match_is_case_insensitive() {
        let voices = vec![v("Google US English", "EN-us")];
        let best = select_best_voice(&voices, "en-US").unwrap();
        assert_eq!(best.name, "Google US English");
    }

    #[test]
    fn test_daniel_any_case() {
        let voices = vec![v("Alice", "it-IT"), v("DANIEL (Enhanced)", "en-GB")];
        let best = select_best_voice(&voices, "fr-FR").unwrap();
        assert_eq!(best.name, "DANIEL (Enhanced)");
    }

    #[test]
    fn test_google_substring_is_case_sensitive() {
        let voices = vec![v("google-ish", "en-US")];
        assert_eq!(select_best_voice(&voices, "en-US"), None);
    }

    #[test]
    fn test_microsoft_requires_locale() {
        let voices = vec![v("Microsoft Zira", "en-US")];
        assert_eq!(select_best_voice(&voices, "de-DE"), None);
        assert!(select_best_voice(&voices, "en-us").is_some());
    }

    #[test]
    fn test_find_voice_exact() {
        let voices = vec![v("Samantha", "en-US")];
        assert!(find_voice(&voices, "Samantha").is_some());
        assert!(find_voice(&voices, "samantha").is_none());
        assert!(find_voice(&voices, "").is_none());
    }
}
