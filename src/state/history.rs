//! Spoken-text history

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// One submitted text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryItem {
    /// Creation time in milliseconds, bumped to stay unique
    pub id: u64,

    /// Trimmed, non-empty text
    pub text: String,
}

/// History list, newest first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    items: Vec<HistoryItem>,
    last_id: u64,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted items
    ///
    /// Entries with blank text or a repeated id are dropped.
    pub fn from_items(items: Vec<HistoryItem>) -> Self {
        let mut seen = std::collections::HashSet::new();
        let items: Vec<HistoryItem> = items
            .into_iter()
            .filter(|item| !item.text.trim().is_empty() && seen.insert(item.id))
            .collect();
        let last_id = items.iter().map(|item| item.id).max().unwrap_or(0);
        Self { items, last_id }
    }

    pub fn items(&self) -> &[HistoryItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&HistoryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Item at a 1-based position as listed (newest is 1)
    pub fn nth(&self, position: usize) -> Option<&HistoryItem> {
        position.checked_sub(1).and_then(|i| self.items.get(i))
    }

    /// Add `text` as the newest item
    ///
    /// Returns `None` (and changes nothing) if `text` is blank.
    pub fn push(&mut self, text: &str) -> Option<&HistoryItem> {
        self.push_at(text, now_millis())
    }

    /// Like `push`, with an explicit clock reading
    ///
    /// Ids are `max(now_ms, last_id + 1)`, so two submissions in the same
    /// millisecond still get distinct, increasing ids. A stored id of
    /// `u64::MAX` pins every later id there instead of wrapping.
    pub fn push_at(&mut self, text: &str, now_ms: u64) -> Option<&HistoryItem> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let id = now_ms.max(self.last_id.saturating_add(1));
        self.last_id = id;
        self.items.insert(
            0,
            HistoryItem {
                id,
                text: text.to_string(),
            },
        );
        self.items.first()
    }

    /// Remove every item
    ///
    /// `last_id` is kept so ids are never reused within a session.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_newest_first() {
        let mut history = History::new();
        history.push_at("first", 100);
        history.push_at("second", 200);
        let texts: Vec<&str> = history.items().iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts, vec!["second", "first"]);
    }

    #[test]
    fn test_push_trims() {
        let mut history = History::new();
        let item = history.push_at("  abc \n", 5).unwrap();
        assert_eq!(item.text, "abc");
        assert_eq!(item.id, 5);
    }

    #[test]
    fn test_blank_is_ignored() {
        let mut history = History::new();
        assert!(history.push_at("   \t", 5).is_none());
        assert!(history.is_empty());
    }

    #[test]
    fn test_same_millisecond_ids_are_distinct() {
        let mut history = History::new();
        let a = history.push_at("a", 1000).unwrap().id;
        let b = history.push_at("b", 1000).unwrap().id;
        let c = history.push_at("c", 999).unwrap().id;
        assert_eq!((a, b, c), (1000, 1001, 1002));
    }

    #[test]
    fn test_ids_continue_after_reload() {
        let items = vec![
            HistoryItem { id: 50, text: "b".into() },
            HistoryItem { id: 40, text: "a".into() },
        ];
        let mut history = History::from_items(items);
        assert_eq!(history.push_at("c", 10).unwrap().id, 51);
    }

    #[test]
    fn test_max_stored_id_does_not_overflow() {
        let items = vec![HistoryItem { id: u64::MAX, text: "far future".into() }];
        let mut history = History::from_items(items);

        let item = history.push_at("next", 10).unwrap();
        assert_eq!(item.id, u64::MAX);
        assert_eq!(item.text, "next");
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_from_items_drops_bad_entries() {
        let items = vec![
            HistoryItem { id: 2, text: "ok".into() },
            HistoryItem { id: 2, text: "dup".into() },
            HistoryItem { id: 3, text: "  ".into() },
        ];
        let history = History::from_items(items);
        assert_eq!(history.len(), 1);
        assert_eq!(history.items()[0].text, "ok");
    }

    #[test]
    fn test_nth() {
        let mut history = History::new();
        history.push_at("old", 1);
        history.push_at("new", 2);
        assert_eq!(history.nth(1).unwrap().text, "new");
        assert_eq!(history.nth(2).unwrap().text, "old");
        assert!(history.nth(0).is_none());
        assert!(history.nth(3).is_none());
    }

    #[test]
    fn test_clear_keeps_id_sequence() {
        let mut history = History::new();
        history.push_at("a", 10);
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.push_at("b", 10).unwrap().id, 11);
    }
}
