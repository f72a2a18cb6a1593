//! JSON-RPC channel to the editor core.
//!
//! Messages are framed with `Content-Length` headers. One thread reads and
//! forwards notifications into the session's event channel in arrival order;
//! another drains the outbound queue into the core's stdin.

use super::outbound::{InputEvent, ReadyParams};
use crate::input::InputSink;
use crate::session::Outbound;
use lsp_server::{ErrorCode, Message, Response};
use serde_json::Value;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::process::{Child, Command, Stdio};
use std::sync::mpsc;
use std::time::{Duration, Instant};

/// What the reader thread hands to the session.
#[derive(Clone, Debug, PartialEq)]
pub enum Incoming {
    Notification { method: String, params: Value },
    /// The core closed its end or the stream broke.
    Closed,
}

/// Queue of messages for the writer thread.
#[derive(Clone, Debug)]
pub struct OutboundSender {
    tx: mpsc::Sender<Message>,
}

impl OutboundSender {
    pub fn send_message(&self, msg: Message) -> bool {
        if self.tx.send(msg).is_err() {
            tracing::debug!("core writer gone, message dropped");
            return false;
        }
        true
    }
}

impl InputSink for OutboundSender {
    fn emit(&mut self, event: InputEvent) {
        self.send_message(event.to_message());
    }
}

impl Outbound for OutboundSender {
    fn ready(&mut self, params: ReadyParams) {
        self.send_message(params.to_message());
    }
}

/// A running editor core and the threads talking to it.
pub struct CoreConnection {
    sender: OutboundSender,
    child: Option<Child>,
}

impl std::fmt::Debug for CoreConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoreConnection")
            .field("pid", &self.child.as_ref().map(Child::id))
            .finish()
    }
}

impl Drop for CoreConnection {
    fn drop(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

impl CoreConnection {
    /// Starts the editor core with piped stdio.
    pub fn spawn<T>(command: &str, args: &[String], events: mpsc::Sender<T>) -> std::io::Result<Self>
    where
        T: From<Incoming> + Send + 'static,
    {
        let mut child = Command::new(command)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        let (Some(stdin), Some(stdout)) = (child.stdin.take(), child.stdout.take()) else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "editor core stdio unavailable",
            ));
        };

        if let Some(stderr) = child.stderr.take() {
            if let Err(e) = std::thread::Builder::new()
                .name("cellview-core-stderr".to_string())
                .spawn(move || stderr_loop(stderr))
            {
                tracing::warn!(error = %e, "spawn core stderr thread failed");
            }
        }

        tracing::info!(command = %command, pid = child.id(), "editor core started");
        let mut conn = match Self::from_streams(stdout, stdin, events) {
            Ok(conn) => conn,
            Err(e) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(e);
            }
        };
        conn.child = Some(child);
        Ok(conn)
    }

    /// Runs the reader and writer threads over arbitrary streams.
    pub fn from_streams<R, W, T>(reader: R, writer: W, events: mpsc::Sender<T>) -> std::io::Result<Self>
    where
        R: Read + Send + 'static,
        W: Write + Send + 'static,
        T: From<Incoming> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel::<Message>();

        std::thread::Builder::new()
            .name("cellview-core-writer".to_string())
            .spawn(move || writer_loop(writer, rx))?;

        let replies = tx.clone();
        std::thread::Builder::new()
            .name("cellview-core-reader".to_string())
            .spawn(move || reader_loop(reader, events, replies))?;

        Ok(Self {
            sender: OutboundSender { tx },
            child: None,
        })
    }

    pub fn sender(&self) -> OutboundSender {
        self.sender.clone()
    }
}

fn writer_loop<W: Write>(writer: W, rx: mpsc::Receiver<Message>) {
    let mut writer = BufWriter::new(writer);
    while let Ok(msg) = rx.recv() {
        if let Err(e) = msg.write(&mut writer) {
            tracing::error!(error = %e, "core write failed");
            break;
        }
    }
    tracing::debug!("core writer stopped");
}

fn reader_loop<R, T>(reader: R, events: mpsc::Sender<T>, replies: mpsc::Sender<Message>)
where
    R: Read,
    T: From<Incoming>,
{
    let mut reader = BufReader::new(reader);
    loop {
        let msg = match Message::read(&mut reader) {
            Ok(Some(msg)) => msg,
            Ok(None) => {
                tracing::info!("editor core closed the channel");
                break;
            }
            Err(e) => {
                tracing::error!(error = %e, "core read failed");
                break;
            }
        };

        match msg {
            Message::Notification(not) => {
                tracing::debug!(method = %not.method, "core notification");
                let event = Incoming::Notification {
                    method: not.method,
                    params: not.params,
                };
                if events.send(T::from(event)).is_err() {
                    return;
                }
            }
            Message::Request(req) => {
                tracing::debug!(method = %req.method, "core request not supported");
                let resp = Response::new_err(
                    req.id,
                    ErrorCode::MethodNotFound as i32,
                    "Method not found".to_string(),
                );
                let _ = replies.send(Message::Response(resp));
            }
            Message::Response(resp) => {
                if let Some(err) = resp.error {
                    tracing::warn!(id = %resp.id, code = err.code, message = %err.message, "core error response");
                } else {
                    tracing::debug!(id = %resp.id, "core response");
                }
            }
        }
    }
    let _ = events.send(T::from(Incoming::Closed));
}

fn stderr_loop<R: Read>(stderr: R) {
    let mut reader = BufReader::new(stderr);
    let mut line = String::new();
    let mut window_started = Instant::now();
    let mut emitted = 0usize;
    let mut dropped = 0usize;
    let window = Duration::from_secs(1);
    let max_lines = 20usize;
    loop {
        if window_started.elapsed() >= window {
            if dropped > 0 {
                tracing::warn!(dropped, "core stderr rate-limited");
            }
            window_started = Instant::now();
            emitted = 0;
            dropped = 0;
        }

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {
                let trimmed = line.trim_end();
                if trimmed.is_empty() {
                    continue;
                }
                if emitted < max_lines {
                    tracing::warn!("core: {}", trimmed);
                    emitted += 1;
                } else {
                    dropped += 1;
                }
            }
        }
    }

    if dropped > 0 {
        tracing::warn!(dropped, "core stderr rate-limited");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/protocol/transport.rs"]
mod tests;
