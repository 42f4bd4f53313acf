#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use ledlink::serial::transport::Transport;
use ledlink::serial::Result;

#[derive(Default)]
pub struct MockState {
    /// Every write the channel issued, with its timestamp.
    pub writes: Vec<(Instant, Vec<u8>)>,
    /// Bytes pretending to sit in the driver's receive buffer.
    pub read_buffer: Vec<u8>,
    /// Scripted device replies; each write pops one into read_buffer.
    pub replies: VecDeque<Vec<u8>>,
    pub close_calls: u32,
}

/// In-memory transport scripted from the test side. Shares its state
/// through an Arc so the test can inspect writes after handing the
/// transport to a channel or controller.
pub struct MockTransport(Arc<Mutex<MockState>>);

impl MockTransport {
    pub fn new() -> (Self, Arc<Mutex<MockState>>) {
        let state = Arc::new(Mutex::new(MockState::default()));
        (Self(state.clone()), state)
    }
}

impl Transport for MockTransport {
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        let mut state = self.0.lock().unwrap();
        state.writes.push((Instant::now(), bytes.to_vec()));
        if let Some(reply) = state.replies.pop_front() {
            state.read_buffer.extend_from_slice(&reply);
        }
        Ok(())
    }

    fn bytes_available(&mut self) -> Result<usize> {
        Ok(self.0.lock().unwrap().read_buffer.len())
    }

    fn read_available(&mut self, max_bytes: usize) -> Result<Vec<u8>> {
        let mut state = self.0.lock().unwrap();
        let count = state.read_buffer.len().min(max_bytes);
        Ok(state.read_buffer.drain(..count).collect())
    }

    fn close(&mut self) {
        self.0.lock().unwrap().close_calls += 1;
    }
}

/// The wire lines written so far, decoded for assertions.
pub fn written_lines(state: &Arc<Mutex<MockState>>) -> Vec<String> {
    state
        .lock()
        .unwrap()
        .writes
        .iter()
        .map(|(_, bytes)| String::from_utf8(bytes.clone()).expect("wire bytes should be ASCII"))
        .collect()
}
