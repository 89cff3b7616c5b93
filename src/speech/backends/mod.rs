//! Speech engine backends

// Native TTS backend using the tts crate (cross-platform)
pub mod native;

// Engine that accepts everything and speaks nothing
pub mod silent;
