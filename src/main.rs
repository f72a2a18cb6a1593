use ratatui::prelude::*;
use std::io;
use std::path::PathBuf;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::Instant;

use cellview::config::{self, Settings};
use cellview::display::CellTweak;
use cellview::protocol::{CoreConnection, Dispatcher};
use cellview::session::{SessionEvent, SessionShell};
use cellview::tui::crossterm::{into_session_event, window_px};
use cellview::tui::present::{ScreenWidget, TerminalCells};
use cellview::tui::terminal_guard::TerminalGuard;

mod logging;

struct Args {
    core: Option<String>,
    settings: Option<PathBuf>,
    core_args: Vec<String>,
}

/// `--core=CMD` and `--settings=PATH`; everything after `--` goes to the core.
fn parse_args() -> Args {
    let mut args = Args {
        core: None,
        settings: None,
        core_args: Vec::new(),
    };
    let mut rest = std::env::args().skip(1);
    while let Some(arg) = rest.next() {
        if arg == "--" {
            args.core_args.extend(rest.by_ref());
        } else if let Some(value) = arg.strip_prefix("--core=") {
            args.core = Some(value.to_string());
        } else if let Some(value) = arg.strip_prefix("--settings=") {
            args.settings = Some(PathBuf::from(value));
        } else {
            eprintln!("cellview: ignoring unknown argument `{}`", arg);
        }
    }
    args
}

fn load(args: &Args) -> Settings {
    match &args.settings {
        Some(path) => config::load_settings_from(path),
        None => {
            if let Err(e) = config::ensure_settings_file() {
                eprintln!("cellview: cannot create settings file: {}", e);
            }
            config::load_settings()
        }
    }
}

fn main() -> io::Result<()> {
    let args = parse_args();
    let settings = load(&args);
    let _logging = logging::init(settings.log_filter.as_deref());

    let command = args.core.clone().unwrap_or_else(|| settings.core_command.clone());
    let core_args = if args.core_args.is_empty() {
        settings.core_args.clone()
    } else {
        args.core_args.clone()
    };

    let (tx, rx) = mpsc::channel::<SessionEvent>();
    let core = CoreConnection::spawn(&command, &core_args, tx.clone()).map_err(|e| {
        eprintln!("cellview: cannot start editor core `{}`: {}", command, e);
        e
    })?;

    let guard = TerminalGuard::new()?;
    #[cfg(unix)]
    if let Err(e) = cellview::tui::terminal_guard::install_termination_signals(guard.restorer(), tx.clone()) {
        tracing::warn!(error = %e, "install signal handlers failed");
    }

    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let mut options = settings.shell_options(CellTweak::NONE);
    options.metrics = settings.metrics_with(&TerminalCells);
    let (cols, rows) = crossterm::terminal::size()?;
    let mut shell = SessionShell::new(options, core.sender(), window_px(cols, rows))
        .with_dispatcher(Dispatcher::new(Box::new(TerminalCells)));

    let input_tx = tx.clone();
    std::thread::Builder::new()
        .name("cellview-input".to_string())
        .spawn(move || loop {
            match crossterm::event::read() {
                Ok(event) => {
                    if let Some(event) = into_session_event(event) {
                        if input_tx.send(event).is_err() {
                            return;
                        }
                    }
                }
                Err(e) => {
                    tracing::error!(error = %e, "terminal input failed");
                    let _ = input_tx.send(SessionEvent::Shutdown);
                    return;
                }
            }
        })?;
    drop(tx);

    shell.start();
    terminal.draw(|frame| frame.render_widget(ScreenWidget::new(shell.screen(), None), frame.area()))?;

    while shell.is_running() {
        let first = match shell.poll_timeout(Instant::now()) {
            Some(timeout) => match rx.recv_timeout(timeout) {
                Ok(event) => Some(event),
                Err(RecvTimeoutError::Timeout) => None,
                Err(RecvTimeoutError::Disconnected) => break,
            },
            None => match rx.recv() {
                Ok(event) => Some(event),
                Err(_) => break,
            },
        };

        if let Some(event) = first {
            shell.handle(event, Instant::now());
        }
        while shell.is_running() {
            match rx.try_recv() {
                Ok(event) => {
                    shell.handle(event, Instant::now());
                }
                Err(_) => break,
            }
        }
        shell.tick(Instant::now());

        let overlay = shell.composer().overlay();
        terminal.draw(|frame| {
            frame.render_widget(ScreenWidget::new(shell.screen(), overlay.as_ref()), frame.area())
        })?;
    }

    tracing::info!(stats = ?shell.dispatcher().stats(), "session ended");
    drop(terminal);
    drop(guard);
    drop(core);
    Ok(())
}
