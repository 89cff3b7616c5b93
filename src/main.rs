//! sayback main entry point
//!
//! The main loop waits on stdin with a short timeout. Each complete line is
//! handed to the command handler; every wake-up also drains speech engine
//! notifications so playback state follows the engine.

use log::{debug, error, info, warn};
use mio::unix::SourceFd;
use mio::{Events, Interest, Poll, Token};
use sayback::input::{CommandHandler, HandlerAction, InputStatus, LineBuffer};
use sayback::platform::set_nonblocking;
use sayback::speech::{create_engine, PlaybackState};
use sayback::state::config::Config;
use sayback::state::AppState;
use sayback::store::FileStore;
use sayback::voice::LanguageTable;
use sayback::Result;
use std::io::{self, Write};
use std::os::unix::io::AsRawFd;
use std::process;
use std::time::Duration;

/// Token for stdin in mio poll
const STDIN: Token = Token(0);

/// Longest wait between engine event checks
const TICK: Duration = Duration::from_millis(100);

fn main() {
    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let debug_mode = args.iter().any(|arg| arg == "--debug" || arg == "-d");

    if args.iter().any(|arg| arg == "--version" || arg == "-V") {
        println!("{} {}", sayback::APP_NAME, sayback::VERSION);
        return;
    }

    // Initialize logger
    if debug_mode {
        // Debug mode: write to sayback.log file
        use std::fs::OpenOptions;
        match OpenOptions::new()
            .create(true)
            .append(true)
            .open("sayback.log")
        {
            Ok(log_file) => {
                env_logger::Builder::new()
                    .filter_level(log::LevelFilter::Debug)
                    .target(env_logger::Target::Pipe(Box::new(log_file)))
                    .init();
            }
            Err(e) => {
                eprintln!("Warning: Failed to open sayback.log for debug logging: {}", e);
                eprintln!("Continuing without file logging...");
                env_logger::Builder::new()
                    .filter_level(log::LevelFilter::Warn)
                    .init();
            }
        }

        info!(
            "sayback version {} starting (debug mode, logging to sayback.log)",
            sayback::VERSION
        );
    } else {
        // Normal mode: minimal logging to stderr, only errors
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Error)
            .init();
    }

    // Run the application
    if let Err(e) = run() {
        error!("Fatal error: {}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    debug!("Initializing sayback");

    let config = Config::load()?;
    info!("Configuration loaded from {:?}", config.path());

    let store = FileStore::open(config.data_dir())?;
    info!("Data directory: {:?}", store.dir());

    let engine = create_engine(config.voice_poll_interval());
    let mut state = AppState::new(Box::new(store), engine, config.locale());
    let mut handler = CommandHandler::new(Box::new(LanguageTable::new()));
    let mut lines = LineBuffer::new();

    let stdin_fd = io::stdin().as_raw_fd();
    let mut poll = Poll::new()?;
    let mut events = Events::with_capacity(16);

    // Regular files can't be polled; treat them as always readable
    let pollable = poll
        .registry()
        .register(&mut SourceFd(&stdin_fd), STDIN, Interest::READABLE)
        .map_err(|e| debug!("stdin not pollable ({}), reading directly", e))
        .is_ok();

    // Edge-triggered readiness: stdin must be drained until it would block.
    // The guard puts the original flags back when we exit.
    let _nonblocking = if pollable {
        Some(set_nonblocking(stdin_fd)?)
    } else {
        None
    };

    println!("{} {} - type text to hear it, /help for commands", sayback::APP_NAME, sayback::VERSION);

    let stdout = io::stdout();
    let mut stdin_open = true;

    loop {
        let readable = if pollable && stdin_open {
            match poll.poll(&mut events, Some(TICK)) {
                Ok(()) => events.iter().any(|event| event.token() == STDIN),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {
                    debug!("poll interrupted by signal");
                    false
                }
                Err(e) => return Err(e.into()),
            }
        } else if stdin_open {
            true
        } else {
            std::thread::sleep(TICK);
            false
        };

        if readable {
            let mut out = stdout.lock();
            match handle_stdin(&mut lines, &mut handler, &mut state, &mut out)? {
                StdinStatus::Open => {}
                StdinStatus::Quit => break,
                StdinStatus::Closed => {
                    info!("stdin closed, waiting for playback to finish");
                    if pollable {
                        let _ = poll.registry().deregister(&mut SourceFd(&stdin_fd));
                    }
                    stdin_open = false;
                }
            }
            out.flush()?;
        }

        state.process_engine_events();

        // Input is gone: leave once the last utterance is done
        if !stdin_open && state.playback() == PlaybackState::Idle {
            break;
        }
    }

    state.stop();
    info!("sayback exiting");
    Ok(())
}

enum StdinStatus {
    Open,
    Closed,
    Quit,
}

/// Drain stdin and run every complete line
fn handle_stdin(
    lines: &mut LineBuffer,
    handler: &mut CommandHandler,
    state: &mut AppState,
    out: &mut dyn Write,
) -> Result<StdinStatus> {
    let status = lines.fill_from(&mut io::stdin()).unwrap_or_else(|e| {
        warn!("stdin error: {}", e);
        InputStatus::Closed
    });

    while let Some(line) = lines.next_line() {
        if handler.process_line(&line, state, out)? == HandlerAction::Quit {
            return Ok(StdinStatus::Quit);
        }
    }

    if status == InputStatus::Closed {
        if let Some(last) = lines.flush() {
            if handler.process_line(&last, state, out)? == HandlerAction::Quit {
                return Ok(StdinStatus::Quit);
            }
        }
        return Ok(StdinStatus::Closed);
    }

    Ok(StdinStatus::Open)
}
