use std::thread;
use std::time::{Duration, Instant};

use crate::device::Command;

use super::transport::Transport;
use super::Result;

/// Minimum spacing between commands. The firmware handles at most
/// about 55.6 Hz (one command every 18 ms) in direct serial mode;
/// anything faster gets dropped or corrupted on the device side, so
/// this is a hard floor, not a tuning knob.
pub const MIN_COMMAND_INTERVAL: Duration = Duration::from_millis(18);

/// How often a timed read re-checks the receive buffer.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

const READ_CHUNK: usize = 1024;

/// Frames typed commands onto the wire and pulls raw reply bytes back
/// off it, enforcing the link's command-rate floor on every send.
pub struct CommandChannel {
    transport: Box<dyn Transport>,
    min_interval: Duration,
    poll_interval: Duration,
    last_send: Option<Instant>,
}

impl CommandChannel {
    pub fn new(transport: Box<dyn Transport>) -> Self {
        Self::with_intervals(transport, MIN_COMMAND_INTERVAL, DEFAULT_POLL_INTERVAL)
    }

    /// Build a channel with explicit pacing. `min_interval` below the
    /// firmware's 18 ms floor is only safe against a mock transport.
    pub fn with_intervals(
        transport: Box<dyn Transport>,
        min_interval: Duration,
        poll_interval: Duration,
    ) -> Self {
        Self {
            transport,
            min_interval,
            poll_interval,
            last_send: None,
        }
    }

    /// Encode and write one command. Blocks (sleeping, not spinning)
    /// until `min_interval` has elapsed since the previous send.
    pub fn send(&mut self, command: &Command) -> Result<()> {
        if let Some(last) = self.last_send {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                thread::sleep(self.min_interval - elapsed);
            }
        }

        let line = command.encode();
        log::debug!("-> {}", line.trim_end());
        self.transport.write(line.as_bytes())?;
        self.last_send = Some(Instant::now());
        Ok(())
    }

    /// Poll the receive buffer until data shows up or `timeout`
    /// elapses, then return whatever is buffered. A timeout of `None`
    /// reads immediately without waiting. An empty result is normal,
    /// not an error: fire-and-forget commands get no reply. Callers
    /// must not assume a complete line; partial frames happen.
    pub fn read_with_timeout(&mut self, timeout: Option<Duration>) -> Result<Vec<u8>> {
        if let Some(timeout) = timeout {
            let deadline = Instant::now() + timeout;
            while self.transport.bytes_available()? == 0 && Instant::now() < deadline {
                thread::sleep(self.poll_interval);
            }
        }
        self.drain()
    }

    /// Discard everything currently buffered. Used before a query so a
    /// stale echo is not mistaken for the reply.
    pub fn flush_input(&mut self) -> Result<()> {
        let discarded = self.drain()?;
        if !discarded.is_empty() {
            log::debug!("Flushed {} stale bytes", discarded.len());
        }
        Ok(())
    }

    /// Flush, send, then block for a reply. The returned buffer is raw
    /// and undemultiplexed; when the device emits several objects the
    /// caller parses defensively (last complete one wins).
    pub fn query(&mut self, command: &Command, timeout: Option<Duration>) -> Result<Vec<u8>> {
        self.flush_input()?;
        self.send(command)?;
        self.read_with_timeout(timeout)
    }

    pub fn close(&mut self) {
        self.transport.close();
    }

    fn drain(&mut self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        loop {
            let chunk = self.transport.read_available(READ_CHUNK)?;
            if chunk.is_empty() {
                break;
            }
            out.extend_from_slice(&chunk);
        }
        Ok(out)
    }
}
