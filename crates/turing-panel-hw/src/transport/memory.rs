//! In-memory transport for tests and dry runs.

use super::Transport;
use crate::{Error, Result};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct State {
    written: Vec<u8>,
    pending: VecDeque<u8>,
    closed: bool,
    close_calls: usize,
    cts: Option<bool>,
}

/// Transport that records writes and serves scripted reads.
///
/// Clones share the same state, so a test can keep one handle while the
/// panel owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryTransport {
    state: Arc<Mutex<State>>,
}

impl MemoryTransport {
    /// Creates an empty transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transport that will answer the first read with `response`.
    pub fn with_response(response: &[u8]) -> Self {
        let transport = Self::new();
        transport.push_response(response);
        transport
    }

    /// Queues bytes to be returned by later reads.
    pub fn push_response(&self, bytes: &[u8]) {
        self.state().pending.extend(bytes.iter().copied());
    }

    /// Sets the CTS level reported to the driver.
    pub fn set_clear_to_send(&self, cts: bool) {
        self.state().cts = Some(cts);
    }

    /// Returns every byte written so far.
    pub fn written(&self) -> Vec<u8> {
        self.state().written.clone()
    }

    /// Returns and forgets every byte written so far.
    pub fn take_written(&self) -> Vec<u8> {
        std::mem::take(&mut self.state().written)
    }

    /// Returns true once `close()` has been called.
    pub fn is_closed(&self) -> bool {
        self.state().closed
    }

    /// Number of times `close()` was called.
    pub fn close_calls(&self) -> usize {
        self.state().close_calls
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Transport for MemoryTransport {
    fn write_all(&mut self, data: &[u8]) -> Result<usize> {
        let mut state = self.state();
        if state.closed {
            return Err(Error::Closed);
        }
        state.written.extend_from_slice(data);
        Ok(data.len())
    }

    fn read_exact(&mut self, n: usize) -> Result<Vec<u8>> {
        let mut state = self.state();
        if state.closed {
            return Err(Error::Closed);
        }
        let available = state.pending.len().min(n);
        let bytes: Vec<u8> = state.pending.drain(..available).collect();
        if bytes.len() != n {
            return Err(Error::ShortRead {
                expected: n,
                actual: bytes.len(),
            });
        }
        Ok(bytes)
    }

    fn close(&mut self) -> Result<()> {
        let mut state = self.state();
        state.closed = true;
        state.close_calls += 1;
        Ok(())
    }

    fn clear_to_send(&mut self) -> Result<Option<bool>> {
        Ok(self.state().cts)
    }
}
