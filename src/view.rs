//! Text rendering of history, voices and preferences

use crate::speech::PlaybackState;
use crate::state::history::HistoryItem;
use crate::state::preferences::Preferences;
use crate::voice::{display_name, LanguageNameResolver, VoiceDescriptor};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Widest a history entry is shown, in terminal columns
pub const MAX_ENTRY_WIDTH: usize = 60;

/// Cut `text` to at most `max` columns, marking the cut with '…'
///
/// Newlines are flattened so each entry stays on one line.
pub fn truncate_to_width(text: &str, max: usize) -> String {
    let flat: String = text
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    if flat.width() <= max {
        return flat;
    }

    let mut out = String::new();
    let mut width = 0;
    for c in flat.chars() {
        let w = c.width().unwrap_or(0);
        if width + w + 1 > max {
            break;
        }
        out.push(c);
        width += w;
    }
    out.push('…');
    out
}

/// One line per history item, with a marker on the playing one
pub fn render_history(items: &[HistoryItem], playback: PlaybackState) -> Vec<String> {
    if items.is_empty() {
        return vec!["(history is empty)".to_string()];
    }

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let marker = if playback == PlaybackState::Playing(item.id) {
                "■"
            } else {
                "▶"
            };
            format!(
                "{:>3}. {} {}",
                i + 1,
                marker,
                truncate_to_width(&item.text, MAX_ENTRY_WIDTH)
            )
        })
        .collect()
}

/// One line per voice with its language name; the preferred one is starred
pub fn render_voices(
    voices: &[VoiceDescriptor],
    selected: &str,
    resolver: &dyn LanguageNameResolver,
    host_locale: &str,
) -> Vec<String> {
    if voices.is_empty() {
        return vec!["(no voices installed)".to_string()];
    }

    voices
        .iter()
        .map(|voice| {
            let star = if voice.name == selected { '*' } else { ' ' };
            format!(
                "{} {} ({})",
                star,
                voice.name,
                display_name(resolver, &voice.lang, host_locale)
            )
        })
        .collect()
}

pub fn render_preferences(prefs: &Preferences) -> Vec<String> {
    let voice = if prefs.voice.is_empty() {
        "(engine default)"
    } else {
        prefs.voice.as_str()
    };
    vec![format!("speed: {}x", prefs.speed), format!("voice: {}", voice)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voice::LanguageTable;

    #[test]
    fn test_truncate_short_text_unchanged() {
        assert_eq!(truncate_to_width("hello", 10), "hello");
    }

    #[test]
    fn test_truncate_long_text() {
        let out = truncate_to_width("abcdefghij", 5);
        assert_eq!(out, "abcd…");
    }

    #[test]
    fn test_truncate_wide_chars() {
        // Each CJK character is two columns wide
        let out = truncate_to_width("世界世界世界", 5);
        assert_eq!(out, "世界…");
    }

    #[test]
    fn test_truncate_flattens_newlines() {
        assert_eq!(truncate_to_width("a\nb", 10), "a b");
    }

    #[test]
    fn test_render_history_marks_playing() {
        let items = vec![
            HistoryItem { id: 2, text: "second".into() },
            HistoryItem { id: 1, text: "first".into() },
        ];
        let lines = render_history(&items, PlaybackState::Playing(1));
        assert_eq!(lines, vec!["  1. ▶ second", "  2. ■ first"]);
    }

    #[test]
    fn test_render_voices() {
        let voices = vec![
            VoiceDescriptor::new("Daniel", "en-GB"),
            VoiceDescriptor::new("Odd", "zz"),
        ];
        let lines = render_voices(&voices, "Daniel", &LanguageTable, "en-US");
        assert_eq!(lines, vec!["* Daniel (English (United Kingdom))", "  Odd (zz)"]);
    }

    #[test]
    fn test_render_default_preferences() {
        let lines = render_preferences(&Preferences::default());
        assert_eq!(lines, vec!["speed: 1x", "voice: (engine default)"]);
    }
}
