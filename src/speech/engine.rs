//! Speech engine abstraction
//!
//! The engine is the platform collaborator that actually produces audio.
//! It lists voices, speaks one utterance at a time, and reports completion
//! back through `poll_events`, which the event loop drains on every tick.

use crate::voice::VoiceDescriptor;
use crate::Result;
use log::{info, warn};
use std::time::Duration;

/// One request to speak
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    /// History item this utterance belongs to, echoed back on completion
    pub id: u64,

    /// Text to speak (non-empty)
    pub text: String,

    /// Speed multiplier, 1.0 is the engine's normal rate
    pub rate: f32,

    /// Exact voice name, or `None` to let the engine use its default
    pub voice: Option<String>,
}

/// Notifications from the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// The utterance for this id finished (or was stopped)
    Finished(u64),

    /// The installed voice list changed and should be re-read
    VoicesChanged,
}

/// Speech engine trait
///
/// Implementations wrap a platform synthesizer. Only one utterance is ever
/// in flight; callers cancel before submitting a new one.
pub trait SpeechEngine {
    /// List the voices currently installed
    fn voices(&mut self) -> Result<Vec<VoiceDescriptor>>;

    /// Whether the engine is speaking anything right now
    fn is_speaking(&mut self) -> Result<bool>;

    /// Silence the current utterance
    fn cancel(&mut self) -> Result<()>;

    /// Submit an utterance for playback
    fn speak(&mut self, utterance: Utterance) -> Result<()>;

    /// Drain pending notifications
    fn poll_events(&mut self) -> Vec<EngineEvent>;
}

/// Create the platform speech engine
///
/// Tries the native backend (Speech Dispatcher on Linux, AVFoundation on
/// macOS, WinRT/SAPI on Windows). When none is available we still return an
/// engine: the silent one, so the rest of the application behaves the same
/// and nothing is spoken.
pub fn create_engine(voice_poll: Duration) -> Box<dyn SpeechEngine> {
    let platform = std::env::consts::OS;
    info!("Creating speech engine for platform: {}", platform);

    use super::backends::native::NativeEngine;

    match NativeEngine::new(voice_poll) {
        Ok(engine) => {
            info!("✓ Successfully initialized native TTS backend");
            Box::new(engine)
        }
        Err(e) => {
            warn!(
                "✗ No speech backend available on '{}', speech is disabled: {}",
                platform, e
            );
            #[cfg(target_os = "linux")]
            info!("To install: sudo apt install speech-dispatcher");
            Box::new(super::backends::silent::SilentEngine::new())
        }
    }
}
