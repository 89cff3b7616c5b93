//! Playback controller
//!
//! Tracks the single history item currently being spoken. Pressing play on
//! the playing item stops it; pressing play on any other item replaces it.
//! Completion notifications are matched against the playing id, so a late
//! notification for a replaced utterance cannot stop the newer one.

use super::{SpeechEngine, Utterance};
use crate::voice::{find_voice, VoiceDescriptor};
use log::{debug, warn};

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Idle,
    Playing(u64),
}

/// Single-utterance playback state machine
///
/// Engine failures never reach the caller: they are logged and the state
/// moves exactly as if the engine had accepted the request.
#[derive(Debug, Default)]
pub struct PlaybackController {
    state: PlaybackState,
}

impl PlaybackController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Id of the item being spoken, if any
    pub fn playing(&self) -> Option<u64> {
        match self.state {
            PlaybackState::Playing(id) => Some(id),
            PlaybackState::Idle => None,
        }
    }

    pub fn is_playing(&self, id: u64) -> bool {
        self.state == PlaybackState::Playing(id)
    }

    /// Play `text` for item `id`, or stop it if it is already playing
    ///
    /// `voice_name` is used only if it names one of `voices` exactly;
    /// otherwise the engine picks its own default.
    pub fn toggle(
        &mut self,
        engine: &mut dyn SpeechEngine,
        text: &str,
        id: u64,
        speed: f32,
        voice_name: &str,
        voices: &[VoiceDescriptor],
    ) {
        if text.is_empty() {
            return;
        }

        // Cancel whatever the engine is saying, ours or not
        match engine.is_speaking() {
            Ok(true) => {
                if let Err(e) = engine.cancel() {
                    warn!("Failed to cancel speech: {}", e);
                }
            }
            Ok(false) => {}
            Err(e) => warn!("Failed to query speaking state: {}", e),
        }

        if self.is_playing(id) {
            debug!("Stopping item {}", id);
            self.state = PlaybackState::Idle;
            return;
        }

        let voice = find_voice(voices, voice_name).map(|v| v.name.clone());
        if voice.is_none() && !voice_name.is_empty() {
            debug!("Voice {:?} not available, using engine default", voice_name);
        }

        let utterance = Utterance {
            id,
            text: text.to_string(),
            rate: speed,
            voice,
        };

        debug!("Playing item {}", id);
        self.state = PlaybackState::Playing(id);
        if let Err(e) = engine.speak(utterance) {
            warn!("Failed to speak item {}: {}", id, e);
        }
    }

    /// Stop playback entirely
    pub fn stop(&mut self, engine: &mut dyn SpeechEngine) {
        match engine.is_speaking() {
            Ok(true) => {
                if let Err(e) = engine.cancel() {
                    warn!("Failed to cancel speech: {}", e);
                }
            }
            Ok(false) => {}
            Err(e) => warn!("Failed to query speaking state: {}", e),
        }
        self.state = PlaybackState::Idle;
    }

    /// Completion notification for item `id`
    ///
    /// Ignored unless `id` is the one currently playing.
    pub fn on_finished(&mut self, id: u64) {
        if self.is_playing(id) {
            debug!("Item {} finished", id);
            self.state = PlaybackState::Idle;
        } else {
            debug!("Ignoring stale completion for item {}", id);
        }
    }
}
