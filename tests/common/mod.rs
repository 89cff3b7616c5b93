//! Shared test doubles

#![allow(dead_code)]

use sayback::speech::{EngineEvent, SpeechEngine, Utterance};
use sayback::voice::VoiceDescriptor;
use sayback::{Result, SaybackError};
use std::cell::RefCell;
use std::rc::Rc;

/// What the mock engine was asked to do
#[derive(Debug, Default)]
pub struct EngineLog {
    pub spoken: Vec<Utterance>,
    pub cancels: usize,
    pub speaking: bool,
    pub voices: Vec<VoiceDescriptor>,
    pub events: Vec<EngineEvent>,
    pub fail: bool,
}

/// Speech engine that records calls instead of speaking
///
/// The log is shared so a test can inspect it after handing the engine
/// to `AppState`.
#[derive(Clone, Default)]
pub struct MockEngine {
    pub log: Rc<RefCell<EngineLog>>,
}

impl MockEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_voices(voices: Vec<VoiceDescriptor>) -> Self {
        let engine = Self::new();
        engine.log.borrow_mut().voices = voices;
        engine
    }

    /// Deliver a completion notification on the next poll
    pub fn finish(&self, id: u64) {
        let mut log = self.log.borrow_mut();
        log.speaking = false;
        log.events.push(EngineEvent::Finished(id));
    }

    /// Replace the voice list and announce the change
    pub fn change_voices(&self, voices: Vec<VoiceDescriptor>) {
        let mut log = self.log.borrow_mut();
        log.voices = voices;
        log.events.push(EngineEvent::VoicesChanged);
    }

    pub fn cancels(&self) -> usize {
        self.log.borrow().cancels
    }

    pub fn spoken_texts(&self) -> Vec<String> {
        self.log.borrow().spoken.iter().map(|u| u.text.clone()).collect()
    }

    pub fn last_spoken(&self) -> Option<Utterance> {
        self.log.borrow().spoken.last().cloned()
    }
}

impl SpeechEngine for MockEngine {
    fn voices(&mut self) -> Result<Vec<VoiceDescriptor>> {
        let log = self.log.borrow();
        if log.fail {
            return Err(SaybackError::Speech("no engine".into()));
        }
        Ok(log.voices.clone())
    }

    fn is_speaking(&mut self) -> Result<bool> {
        let log = self.log.borrow();
        if log.fail {
            return Err(SaybackError::Speech("no engine".into()));
        }
        Ok(log.speaking)
    }

    fn cancel(&mut self) -> Result<()> {
        let mut log = self.log.borrow_mut();
        log.cancels += 1;
        log.speaking = false;
        Ok(())
    }

    fn speak(&mut self, utterance: Utterance) -> Result<()> {
        let mut log = self.log.borrow_mut();
        if log.fail {
            return Err(SaybackError::Speech("no engine".into()));
        }
        log.speaking = true;
        log.spoken.push(utterance);
        Ok(())
    }

    fn poll_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.log.borrow_mut().events)
    }
}
