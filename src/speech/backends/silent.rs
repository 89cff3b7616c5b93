//! Fallback engine used when no platform synthesizer is available
//!
//! Every request succeeds and completes immediately, so playback state
//! returns to idle on the next tick.

use crate::speech::{EngineEvent, SpeechEngine, Utterance};
use crate::voice::VoiceDescriptor;
use crate::Result;
use log::debug;

#[derive(Debug, Default)]
pub struct SilentEngine {
    pending: Vec<EngineEvent>,
}

impl SilentEngine {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SpeechEngine for SilentEngine {
    fn voices(&mut self) -> Result<Vec<VoiceDescriptor>> {
        Ok(Vec::new())
    }

    fn is_speaking(&mut self) -> Result<bool> {
        Ok(false)
    }

    fn cancel(&mut self) -> Result<()> {
        Ok(())
    }

    fn speak(&mut self, utterance: Utterance) -> Result<()> {
        debug!("Silent engine dropping utterance {}", utterance.id);
        self.pending.push(EngineEvent::Finished(utterance.id));
        Ok(())
    }

    fn poll_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completes_immediately() {
        let mut engine = SilentEngine::new();
        engine
            .speak(Utterance {
                id: 7,
                text: "hi".into(),
                rate: 1.0,
                voice: None,
            })
            .unwrap();
        assert!(!engine.is_speaking().unwrap());
        assert_eq!(engine.poll_events(), vec![EngineEvent::Finished(7)]);
        assert!(engine.poll_events().is_empty());
    }

    #[test]
    fn test_no_voices() {
        assert!(SilentEngine::new().voices().unwrap().is_empty());
    }
}
