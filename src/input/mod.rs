//! Input handling
//!
//! Raw stdin bytes are collected into lines by `LineBuffer`, parsed into
//! commands and applied to the application state by `CommandHandler`.

pub mod command;
pub mod handler;
pub mod line_buffer;

pub use command::{create_command_table, parse_command, Command, CommandKind};
pub use handler::{CommandHandler, HandlerAction};
pub use line_buffer::{InputStatus, LineBuffer};
