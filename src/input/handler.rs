//! Command handler: applies input lines to the application state

use super::command::{create_command_table, parse_command, Command, CommandKind, HELP};
use crate::speech::PlaybackState;
use crate::state::AppState;
use crate::view::{render_history, render_preferences, render_voices};
use crate::voice::LanguageNameResolver;
use crate::Result;
use log::debug;
use std::collections::HashMap;
use std::io::Write;

/// What the event loop should do after a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerAction {
    /// Keep reading input
    Continue,
    /// Leave the event loop
    Quit,
}

/// Turns input lines into state changes and user-facing output
pub struct CommandHandler {
    table: HashMap<&'static str, CommandKind>,
    resolver: Box<dyn LanguageNameResolver>,
}

impl CommandHandler {
    pub fn new(resolver: Box<dyn LanguageNameResolver>) -> Self {
        let table = create_command_table();
        debug!("Creating command handler with {} commands", table.len());
        Self { table, resolver }
    }

    /// Process one line of input, writing any response to `out`
    ///
    /// Only I/O errors on `out` are returned; bad input produces a message.
    pub fn process_line(
        &mut self,
        line: &str,
        state: &mut AppState,
        out: &mut dyn Write,
    ) -> Result<HandlerAction> {
        let command = match parse_command(&self.table, line) {
            Ok(command) => command,
            Err(message) => {
                writeln!(out, "{}", message)?;
                return Ok(HandlerAction::Continue);
            }
        };
        debug!("Command: {:?}", command);

        match command {
            Command::Submit(text) => {
                // Blank lines are ignored
                if state.submit(&text).is_some() {
                    write_lines(out, &render_history(&state.history()[..1], state.playback()))?;
                }
            }
            Command::Play(position) => match state.history_item(position).map(|item| item.id) {
                Some(id) => {
                    state.toggle(id);
                    let playing = state.playback() == PlaybackState::Playing(id);
                    writeln!(out, "{} {}", if playing { "playing" } else { "stopped" }, position)?;
                }
                None => writeln!(out, "no history item {}", position)?,
            },
            Command::Stop => {
                state.stop();
                writeln!(out, "stopped")?;
            }
            Command::History => {
                write_lines(out, &render_history(state.history(), state.playback()))?;
            }
            Command::Clear => {
                state.clear_history();
                writeln!(out, "history cleared")?;
            }
            Command::Speed(speed) => {
                state.set_speed(speed);
                writeln!(out, "speed: {}x", speed)?;
            }
            Command::Voice(name) => {
                state.set_voice(&name);
                if name.is_empty() {
                    writeln!(out, "voice: (engine default)")?;
                } else if state.voices().iter().any(|v| v.name == name) {
                    writeln!(out, "voice: {}", name)?;
                } else {
                    writeln!(out, "voice: {} (not installed, engine default will be used)", name)?;
                }
            }
            Command::Voices => {
                let lines = render_voices(
                    state.voices(),
                    &state.preferences().voice,
                    self.resolver.as_ref(),
                    state.locale(),
                );
                write_lines(out, &lines)?;
            }
            Command::Prefs => {
                write_lines(out, &render_preferences(state.preferences()))?;
            }
            Command::Help => {
                writeln!(out, "{}", HELP)?;
            }
            Command::Quit => {
                state.stop();
                return Ok(HandlerAction::Quit);
            }
        }

        Ok(HandlerAction::Continue)
    }
}

fn write_lines(out: &mut dyn Write, lines: &[String]) -> Result<()> {
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}
