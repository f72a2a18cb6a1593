use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// How long the signal thread waits for the session to wind down on its own.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

pub trait TerminalOps: Send + Sync + 'static {
    fn setup(&self) -> io::Result<()>;
    fn restore(&self) -> io::Result<()>;
}

/// Raw mode, alternate screen, bracketed paste. The caret is painted by the
/// presenter, so the hardware cursor stays hidden.
#[derive(Debug, Default)]
pub struct CrosstermTerminalOps;

impl TerminalOps for CrosstermTerminalOps {
    fn setup(&self) -> io::Result<()> {
        use crossterm::{cursor, event, execute, terminal};

        terminal::enable_raw_mode()?;
        execute!(
            io::stdout(),
            terminal::EnterAlternateScreen,
            event::EnableBracketedPaste,
            cursor::Hide
        )
    }

    fn restore(&self) -> io::Result<()> {
        use crossterm::{cursor, event, execute, terminal};

        // Both steps run; the first failure is reported.
        let raw_mode = terminal::disable_raw_mode();
        let screen = execute!(
            io::stdout(),
            event::DisableBracketedPaste,
            terminal::LeaveAlternateScreen,
            cursor::Show
        );
        raw_mode.and(screen)
    }
}

/// Shared by the guard, the signal thread and anyone else who may have to
/// give the terminal back. Only the first `restore` reaches the ops.
#[derive(Clone)]
pub struct TerminalRestorer {
    done: Arc<AtomicBool>,
    ops: Arc<dyn TerminalOps>,
}

impl TerminalRestorer {
    pub fn restore(&self) -> io::Result<()> {
        if self.done.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        self.ops.restore()
    }

    pub fn is_restored(&self) -> bool {
        self.done.load(Ordering::SeqCst)
    }
}

/// Holds the terminal in editor mode for its lifetime.
pub struct TerminalGuard {
    restorer: TerminalRestorer,
}

impl TerminalGuard {
    pub fn new() -> io::Result<Self> {
        Self::with_ops(Arc::new(CrosstermTerminalOps))
    }

    pub fn with_ops(ops: Arc<dyn TerminalOps>) -> io::Result<Self> {
        ops.setup()?;
        let restorer = TerminalRestorer {
            done: Arc::new(AtomicBool::new(false)),
            ops,
        };
        Ok(Self { restorer })
    }

    pub fn restorer(&self) -> TerminalRestorer {
        self.restorer.clone()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = self.restorer.restore() {
            tracing::warn!(error = %e, "terminal restore failed");
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationSignal {
    SigInt,
    SigTerm,
    SigHup,
}

impl TerminationSignal {
    #[cfg(unix)]
    const RAW: [i32; 3] = [
        signal_hook::consts::signal::SIGINT,
        signal_hook::consts::signal::SIGTERM,
        signal_hook::consts::signal::SIGHUP,
    ];

    #[cfg(unix)]
    pub fn from_raw(sig: i32) -> Option<Self> {
        use signal_hook::consts::signal::{SIGHUP, SIGINT, SIGTERM};
        match sig {
            SIGINT => Some(Self::SigInt),
            SIGTERM => Some(Self::SigTerm),
            SIGHUP => Some(Self::SigHup),
            _ => None,
        }
    }

    /// 128 + signal number.
    pub fn exit_code(self) -> i32 {
        match self {
            Self::SigHup => 129,
            Self::SigInt => 130,
            Self::SigTerm => 143,
        }
    }
}

/// Turns termination signals into session events. A session that has not
/// given the terminal back within [`SHUTDOWN_GRACE`] is cut short: the
/// terminal is restored here and the process exits with the signal's code.
#[cfg(unix)]
pub fn install_termination_signals<T>(
    restorer: TerminalRestorer,
    events: std::sync::mpsc::Sender<T>,
) -> io::Result<std::thread::JoinHandle<()>>
where
    T: From<TerminationSignal> + Send + 'static,
{
    let mut signals = signal_hook::iterator::Signals::new(TerminationSignal::RAW)?;
    std::thread::Builder::new()
        .name("cellview-signals".to_string())
        .spawn(move || {
            let Some(signal) = signals.forever().find_map(TerminationSignal::from_raw) else {
                return;
            };
            tracing::info!(signal = ?signal, "termination signal");
            if events.send(T::from(signal)).is_err() {
                tracing::debug!("session loop already gone");
            }

            std::thread::sleep(SHUTDOWN_GRACE);
            if restorer.is_restored() {
                return;
            }
            tracing::warn!(signal = ?signal, "session did not stop in time, exiting");
            let _ = restorer.restore();
            std::process::exit(signal.exit_code());
        })
}

#[cfg(test)]
#[path = "../../tests/unit/tui/terminal_guard.rs"]
mod tests;
