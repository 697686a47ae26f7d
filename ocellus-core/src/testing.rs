//! Test doubles for the transport and clock

use core::cell::Cell;
use std::collections::VecDeque;
use std::vec::Vec;

use ocellus_hal::{Clock, Transport, TransportError};
use ocellus_protocol::{Frame, Reply};

/// Transport that answers each write from a script
///
/// Every `write` pops the next scripted response (possibly empty) and makes
/// its bytes readable. Bytes trickle out `chunk` at a time per poll, like a
/// slow serial line.
pub struct ScriptedTransport {
    pub written: Vec<Vec<u8>>,
    script: VecDeque<Vec<u8>>,
    incoming: VecDeque<u8>,
    chunk: usize,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self {
            written: Vec::new(),
            script: VecDeque::new(),
            incoming: VecDeque::new(),
            chunk: 4,
        }
    }

    /// Queue the bytes the device sends after the next unanswered write
    pub fn respond(mut self, bytes: Vec<u8>) -> Self {
        self.script.push_back(bytes);
        self
    }

    /// Queue a write that gets no answer at all
    pub fn silent(self) -> Self {
        self.respond(Vec::new())
    }

    /// Bytes still waiting to be read
    pub fn pending(&self) -> usize {
        self.incoming.len()
    }
}

impl Transport for ScriptedTransport {
    fn write(&mut self, data: &[u8]) -> Result<(), TransportError> {
        self.written.push(data.to_vec());
        if let Some(bytes) = self.script.pop_front() {
            self.incoming.extend(bytes);
        }
        Ok(())
    }

    fn bytes_available(&mut self) -> Result<usize, TransportError> {
        Ok(self.incoming.len().min(self.chunk))
    }

    fn read_byte(&mut self) -> Result<Option<u8>, TransportError> {
        Ok(self.incoming.pop_front())
    }
}

/// Clock that moves forward by `step` every time it is read
pub struct ManualClock {
    now: Cell<u64>,
    step: u64,
}

impl ManualClock {
    pub fn new(step: u64) -> Self {
        Self {
            now: Cell::new(0),
            step,
        }
    }

    /// Current time without advancing
    pub fn peek(&self) -> u64 {
        self.now.get()
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        let now = self.now.get();
        self.now.set(now + self.step);
        now
    }
}

/// Wire bytes of a frame
pub fn wire(frame: &Frame) -> Vec<u8> {
    frame.encode_to_vec().unwrap().to_vec()
}

/// Wire bytes of a sequence of replies
pub fn replies(replies: &[Reply]) -> Vec<u8> {
    replies
        .iter()
        .flat_map(|reply| wire(&reply.to_frame().unwrap()))
        .collect()
}
