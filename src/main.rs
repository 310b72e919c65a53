use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::thread;

use crossbeam_channel::{never, select, unbounded, Receiver};
use tracing::{debug, error, info, warn};

use wschat::{websocket, Config, DisplayCategory, SafeMarkup, Session};

const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Each stdin line is one submit. The channel disconnects on EOF.
fn spawn_input_reader() -> Receiver<String> {
    let (tx, rx) = unbounded::<String>();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!(%e, "failed to read input");
                    break;
                }
            }
        }
    });
    rx
}

fn main() -> ExitCode {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    let config = match Config::load_with_env(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load {config_path}: {e}");
            eprintln!("Using default configuration.");
            let mut config = Config::default();
            config.apply_env_overrides();
            config
        }
    };

    if let Err(e) = wschat::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        wschat::logging::init_console_only(&config.logging.level);
    }

    let url = match config.server.parsed_url() {
        Ok(url) => url,
        Err(e) => {
            error!(%e, "invalid server url");
            return ExitCode::FAILURE;
        }
    };

    let (event_tx, event_rx) = unbounded();
    let handle = match websocket::spawn(url, event_tx) {
        Ok(handle) => handle,
        Err(e) => {
            error!(%e, "failed to start network thread");
            return ExitCode::FAILURE;
        }
    };

    let stdout = io::stdout();
    let mut session = Session::new(handle, |markup: SafeMarkup, category: DisplayCategory| {
        let mut out = stdout.lock();
        let _ = writeln!(out, "{}", markup.to_element(category));
        let _ = out.flush();
    });

    let mut input_rx = spawn_input_reader();
    loop {
        select! {
            recv(event_rx) -> event => match event {
                Ok(event) => session.handle_event(event),
                // Network thread finished.
                Err(_) => break,
            },
            recv(input_rx) -> line => match line {
                Ok(line) => {
                    if let Err(e) = session.send_raw(&line) {
                        debug!(%e, "submit failed");
                    }
                }
                Err(_) => {
                    if !session.state().is_terminal() {
                        info!("input closed, disconnecting");
                        session.transport().close();
                    }
                    input_rx = never();
                }
            },
        }
    }

    session.into_transport().join();
    ExitCode::SUCCESS
}
