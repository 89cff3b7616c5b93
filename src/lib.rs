//! sayback - type text, hear it spoken, replay it from history
//!
//! Text is spoken through the platform speech synthesizer and every
//! submission is kept in a persisted history that can be replayed.
//! The core is the best-voice heuristic (`voice`), the single-utterance
//! playback controller (`speech::controller`) and write-through storage
//! of history and preferences (`state`, `store`).

pub mod error;
pub mod input;
pub mod platform;
pub mod speech;
pub mod state;
pub mod store;
pub mod view;
pub mod voice;

pub use error::{Result, SaybackError};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = "sayback";
