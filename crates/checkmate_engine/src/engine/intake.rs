//! Command intake
//!
//! Protocol lines reach the engine in two hops:
//!
//! 1. A [`LineSource`] hands out raw lines. The production source is a
//!    [`ChannelSource`] fed by a dedicated thread that owns stdin, so reading
//!    never blocks the search.
//! 2. The engine moves every available line into a bounded FIFO
//!    [`CommandQueue`] at each poll point and then works through it. More
//!    pending lines than the queue holds is a fatal overflow.

use std::collections::VecDeque;
use std::io::{self, BufRead};
use std::thread::{self, JoinHandle};

use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};
use tracing::{debug, warn};

use crate::error::{EngineError, EngineResult};

/// Bounded FIFO of protocol lines
#[derive(Debug)]
pub struct CommandQueue {
    lines: VecDeque<String>,
    capacity: usize,
}

impl CommandQueue {
    pub fn new(capacity: usize) -> Self {
        CommandQueue {
            lines: VecDeque::with_capacity(capacity.min(64)),
            capacity,
        }
    }

    /// # Errors
    ///
    /// [`EngineError::QueueOverflow`] when the queue is already full.
    pub fn push(&mut self, line: String) -> EngineResult<()> {
        if self.lines.len() >= self.capacity {
            return Err(EngineError::QueueOverflow {
                capacity: self.capacity,
            });
        }
        self.lines.push_back(line);
        Ok(())
    }

    pub fn pop(&mut self) -> Option<String> {
        self.lines.pop_front()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Result of a non-blocking read
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LineStatus {
    Ready(String),
    /// Nothing available right now
    Pending,
    /// Input is exhausted for good
    Closed,
}

/// Where protocol lines come from
pub trait LineSource {
    /// Non-blocking read, used at poll points
    fn try_line(&mut self) -> LineStatus;

    /// Blocking read, used while idle; `None` once input is closed
    fn wait_line(&mut self) -> Option<String>;
}

/// Receiving end of the stdin reader thread
pub struct ChannelSource {
    rx: Receiver<String>,
}

impl ChannelSource {
    pub fn new(rx: Receiver<String>) -> Self {
        ChannelSource { rx }
    }
}

impl LineSource for ChannelSource {
    fn try_line(&mut self) -> LineStatus {
        match self.rx.try_recv() {
            Ok(line) => LineStatus::Ready(line),
            Err(TryRecvError::Empty) => LineStatus::Pending,
            Err(TryRecvError::Disconnected) => LineStatus::Closed,
        }
    }

    fn wait_line(&mut self) -> Option<String> {
        self.rx.recv().ok()
    }
}

/// Forward lines from `reader` until end of input or a read error
///
/// Bytes that are not valid UTF-8 are replaced rather than ending the
/// stream; such a line simply fails to parse as a command.
pub fn forward_lines<R: BufRead>(mut reader: R, tx: &Sender<String>) {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                let line = line.trim_end_matches(['\n', '\r']);
                if tx.send(line.to_string()).is_err() {
                    break;
                }
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                warn!("[INTAKE] Failed to read stdin: {}", e);
                break;
            }
        }
    }
}

/// Start the thread that forwards stdin lines over a channel
///
/// The thread ends at end of input or on a read error, which closes the
/// channel and thereby tells the engine to quit.
pub fn spawn_stdin_reader() -> EngineResult<(ChannelSource, JoinHandle<()>)> {
    let (tx, rx) = unbounded::<String>();

    let handle = thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || {
            forward_lines(io::stdin().lock(), &tx);
            debug!("[INTAKE] stdin closed");
        })?;

    Ok((ChannelSource::new(rx), handle))
}
