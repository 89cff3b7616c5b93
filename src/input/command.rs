//! Command parsing for the line-oriented front end
//!
//! A line starting with '/' is a command; anything else is text to speak.

use crate::state::preferences::Speed;
use std::collections::HashMap;

/// Command names and what they do
///
/// Each variant is one front-end action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Play,
    Stop,
    History,
    Clear,
    Speed,
    Voice,
    Voices,
    Prefs,
    Help,
    Quit,
}

/// A parsed input line
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Speak this text and add it to history
    Submit(String),
    /// Toggle the history item at this 1-based position
    Play(usize),
    Stop,
    History,
    Clear,
    Speed(Speed),
    /// Set the voice preference; empty clears it
    Voice(String),
    Voices,
    Prefs,
    Help,
    Quit,
}

/// Create the command table
///
/// Maps each command word, with its short aliases, to its kind
pub fn create_command_table() -> HashMap<&'static str, CommandKind> {
    let mut table = HashMap::new();

    table.insert("play", CommandKind::Play);
    table.insert("p", CommandKind::Play);
    table.insert("stop", CommandKind::Stop);
    table.insert("s", CommandKind::Stop);
    table.insert("history", CommandKind::History);
    table.insert("h", CommandKind::History);
    table.insert("clear", CommandKind::Clear);
    table.insert("speed", CommandKind::Speed);
    table.insert("voice", CommandKind::Voice);
    table.insert("voices", CommandKind::Voices);
    table.insert("prefs", CommandKind::Prefs);
    table.insert("help", CommandKind::Help);
    table.insert("?", CommandKind::Help);
    table.insert("quit", CommandKind::Quit);
    table.insert("q", CommandKind::Quit);

    table
}

/// Usage text shown by /help
pub const HELP: &str = "\
Type text and press Enter to hear it.
  /play N     play or stop history item N (1 is newest)
  /stop       stop playback
  /history    list history
  /clear      clear history
  /speed X    set speed (0.5, 0.75, 1, 1.25, 1.5, 1.75, 2, 2.5, 3)
  /voice NAME set preferred voice (no name clears it)
  /voices     list installed voices
  /prefs      show preferences
  /quit       exit";

/// Parse one input line
///
/// Errors are messages meant for the user.
pub fn parse_command(
    table: &HashMap<&'static str, CommandKind>,
    line: &str,
) -> std::result::Result<Command, String> {
    let trimmed = line.trim();
    let Some(rest) = trimmed.strip_prefix('/') else {
        return Ok(Command::Submit(trimmed.to_string()));
    };

    let (word, arg) = match rest.split_once(char::is_whitespace) {
        Some((word, arg)) => (word, arg.trim()),
        None => (rest, ""),
    };

    let kind = table
        .get(word.to_lowercase().as_str())
        .copied()
        .ok_or_else(|| format!("unknown command /{}, try /help", word))?;

    match kind {
        CommandKind::Play => {
            let position: usize = arg
                .parse()
                .map_err(|_| "usage: /play N".to_string())?;
            Ok(Command::Play(position))
        }
        CommandKind::Speed => {
            if arg.is_empty() {
                return Err("usage: /speed X".to_string());
            }
            arg.parse().map(Command::Speed)
        }
        CommandKind::Voice => Ok(Command::Voice(arg.to_string())),
        CommandKind::Stop => Ok(Command::Stop),
        CommandKind::History => Ok(Command::History),
        CommandKind::Clear => Ok(Command::Clear),
        CommandKind::Voices => Ok(Command::Voices),
        CommandKind::Prefs => Ok(Command::Prefs),
        CommandKind::Help => Ok(Command::Help),
        CommandKind::Quit => Ok(Command::Quit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> std::result::Result<Command, String> {
        parse_command(&create_command_table(), line)
    }

    #[test]
    fn test_plain_text_is_submit() {
        assert_eq!(parse("  hello there "), Ok(Command::Submit("hello there".into())));
        assert_eq!(parse("   "), Ok(Command::Submit(String::new())));
    }

    #[test]
    fn test_aliases() {
        assert_eq!(parse("/q"), Ok(Command::Quit));
        assert_eq!(parse("/HISTORY"), Ok(Command::History));
        assert_eq!(parse("/p 2"), Ok(Command::Play(2)));
    }

    #[test]
    fn test_voice_keeps_spaces() {
        assert_eq!(
            parse("/voice Google UK English Male"),
            Ok(Command::Voice("Google UK English Male".into()))
        );
        assert_eq!(parse("/voice"), Ok(Command::Voice(String::new())));
    }

    #[test]
    fn test_errors() {
        assert!(parse("/play").is_err());
        assert!(parse("/play two").is_err());
        assert!(parse("/speed").is_err());
        assert!(parse("/speed 9").is_err());
        assert!(parse("/bogus").is_err());
    }
}
