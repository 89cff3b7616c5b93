//! Application state management
//!
//! `AppState` owns everything the front end works on: the history list,
//! preferences, the cached voice list, playback, the data store and the
//! speech engine. Every mutation of history or preferences is written
//! through to the store immediately.

pub mod config;
pub mod history;
pub mod preferences;

use crate::speech::{EngineEvent, PlaybackController, PlaybackState, SpeechEngine};
use crate::store::{load_json, save_json, KeyValueStore, HISTORY_KEY, PREFERENCES_KEY};
use crate::voice::{select_best_voice, VoiceDescriptor};
use history::{History, HistoryItem};
use log::{debug, error, info, warn};
use preferences::{Preferences, Speed};

/// Main application state
pub struct AppState {
    /// Submitted texts, newest first
    history: History,

    /// Speed and voice, persisted
    preferences: Preferences,

    /// Voices as last reported by the engine
    voices: Vec<VoiceDescriptor>,

    /// Locale used for best-voice selection
    locale: String,

    /// Which item, if any, is being spoken
    playback: PlaybackController,

    /// Durable storage for history and preferences
    store: Box<dyn KeyValueStore>,

    /// Platform speech engine
    engine: Box<dyn SpeechEngine>,
}

impl AppState {
    /// Build state from what the store holds
    ///
    /// Missing or corrupt blobs fall back to an empty history and default
    /// preferences. The voice list is read once here.
    pub fn new(
        store: Box<dyn KeyValueStore>,
        engine: Box<dyn SpeechEngine>,
        locale: impl Into<String>,
    ) -> Self {
        let items: Vec<HistoryItem> = load_json(store.as_ref(), HISTORY_KEY);
        let preferences: Preferences = load_json(store.as_ref(), PREFERENCES_KEY);
        let locale = locale.into();

        info!("Loaded {} history items", items.len());
        info!("  Speed: {}", preferences.speed);
        info!("  Voice: {:?}", preferences.voice);
        info!("  Locale: {}", locale);

        let mut state = Self {
            history: History::from_items(items),
            preferences,
            voices: Vec::new(),
            locale,
            playback: PlaybackController::new(),
            store,
            engine,
        };
        state.refresh_voices();
        state
    }

    pub fn history(&self) -> &[HistoryItem] {
        self.history.items()
    }

    /// History item at a 1-based list position
    pub fn history_item(&self, position: usize) -> Option<&HistoryItem> {
        self.history.nth(position)
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn voices(&self) -> &[VoiceDescriptor] {
        &self.voices
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn playback(&self) -> PlaybackState {
        self.playback.state()
    }

    /// Add `text` to history and start speaking it
    ///
    /// Blank text is a no-op and returns `None`.
    pub fn submit(&mut self, text: &str) -> Option<u64> {
        let item = self.history.push(text)?.clone();
        debug!("Submitted item {}", item.id);
        self.save_history();
        self.toggle_item(item.id, &item.text);
        Some(item.id)
    }

    /// Play or stop the history item with `id`
    ///
    /// Returns false if no such item exists.
    pub fn toggle(&mut self, id: u64) -> bool {
        let Some(item) = self.history.get(id) else {
            debug!("No history item {}", id);
            return false;
        };
        let text = item.text.clone();
        self.toggle_item(id, &text);
        true
    }

    fn toggle_item(&mut self, id: u64, text: &str) {
        self.playback.toggle(
            self.engine.as_mut(),
            text,
            id,
            self.preferences.speed.multiplier(),
            &self.preferences.voice,
            &self.voices,
        );
    }

    /// Silence playback
    pub fn stop(&mut self) {
        self.playback.stop(self.engine.as_mut());
    }

    /// Remove every history item and persist the empty list
    pub fn clear_history(&mut self) {
        info!("Clearing {} history items", self.history.len());
        self.history.clear();
        self.stop();
        self.save_history();
    }

    pub fn set_speed(&mut self, speed: Speed) {
        debug!("Speed set to {}", speed);
        self.preferences.speed = speed;
        self.save_preferences();
    }

    /// Set the preferred voice name (empty to clear)
    ///
    /// Any text is accepted; names that match no installed voice leave the
    /// engine on its default voice.
    pub fn set_voice(&mut self, name: &str) {
        let name = name.trim();
        debug!("Voice set to {:?}", name);
        self.preferences.voice = name.to_string();
        self.save_preferences();
    }

    /// Re-read the engine's voice list and seed the voice preference
    ///
    /// The preference is seeded with the best voice only while it is empty;
    /// an existing choice is never replaced.
    pub fn refresh_voices(&mut self) {
        self.voices = match self.engine.voices() {
            Ok(voices) => voices,
            Err(e) => {
                warn!("Failed to list voices: {}", e);
                Vec::new()
            }
        };
        debug!("{} voices available", self.voices.len());

        if !self.preferences.voice.is_empty() {
            return;
        }
        if let Some(best) = select_best_voice(&self.voices, &self.locale) {
            info!("Seeding voice preference with {:?}", best.name);
            self.preferences.voice = best.name.clone();
            self.save_preferences();
        }
    }

    /// Apply pending engine notifications
    ///
    /// Called by the event loop on every tick.
    pub fn process_engine_events(&mut self) {
        for event in self.engine.poll_events() {
            match event {
                EngineEvent::Finished(id) => self.playback.on_finished(id),
                EngineEvent::VoicesChanged => self.refresh_voices(),
            }
        }
    }

    fn save_history(&mut self) {
        if let Err(e) = save_json(self.store.as_mut(), HISTORY_KEY, self.history.items()) {
            error!("Failed to save history: {}", e);
        }
    }

    fn save_preferences(&mut self) {
        if let Err(e) = save_json(self.store.as_mut(), PREFERENCES_KEY, &self.preferences) {
            error!("Failed to save preferences: {}", e);
        }
    }
}
