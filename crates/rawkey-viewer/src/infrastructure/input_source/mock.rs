//! Scripted input source for tests.
//!
//! Tests push records with [`MockInputSource::inject`], or whole key
//! sequences in trace syntax with [`MockInputSource::inject_trace`], and read
//! them back from the receiver returned by `start()` in push order.

use std::sync::mpsc::{self, Sender};
use std::sync::{Mutex, PoisonError};

use super::replay::parse_trace_line;
use super::{CaptureError, InputSource, RawInputRecord};

/// [`InputSource`] fed by the test instead of by hardware or a trace file.
#[derive(Default)]
pub struct MockInputSource {
    sender: Mutex<Option<Sender<RawInputRecord>>>,
}

impl MockInputSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes one record.
    ///
    /// Panics if the source is not started or the receiver is gone.
    pub fn inject(&self, record: RawInputRecord) {
        let guard = self.sender.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(sender) = guard.as_ref() else {
            panic!("MockInputSource::inject called before start()");
        };
        if sender.send(record).is_err() {
            panic!("MockInputSource receiver was dropped");
        }
    }

    /// Pushes every record of a trace (`kbd 1E 00 41`, `mouse 8`, ...) and
    /// returns how many there were.  Comments and blank lines are skipped.
    ///
    /// Panics on the first malformed line, naming its line number.
    pub fn inject_trace(&self, trace: &str) -> usize {
        let mut injected = 0;
        for (index, line) in trace.lines().enumerate() {
            match parse_trace_line(line, index + 1) {
                Ok(Some(record)) => {
                    self.inject(record);
                    injected += 1;
                }
                Ok(None) => {}
                Err(err) => panic!("MockInputSource::inject_trace: {err}"),
            }
        }
        injected
    }
}

impl InputSource for MockInputSource {
    fn start(&self) -> Result<mpsc::Receiver<RawInputRecord>, CaptureError> {
        let (tx, rx) = mpsc::channel();
        *self.sender.lock().unwrap_or_else(PoisonError::into_inner) = Some(tx);
        Ok(rx)
    }

    fn stop(&self) {
        // Dropping the sender closes the channel
        self.sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }
}
