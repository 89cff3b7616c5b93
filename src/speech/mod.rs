//! Speech output and playback control

pub mod backends;
pub mod controller;
pub mod engine;

pub use controller::{PlaybackController, PlaybackState};
pub use engine::{create_engine, EngineEvent, SpeechEngine, Utterance};
