//! Replays raw-input records from a text trace.
//!
//! A trace has one record per line:
//!
//! ```text
//! # Pause/Break: E1 prefix, then the 0x45 completion
//! kbd 1D 04 13
//! kbd 0x45 0x00 0x90
//! mouse 0008
//! ```
//!
//! `kbd <make> <flags> <vkey>` is a keyboard record and `mouse <button-flags>`
//! a mouse record.  All numbers are hexadecimal, with or without `0x`.  Text
//! after `#` is a comment; blank lines are skipped.
//!
//! Unlike the key tables, a trace is parsed strictly: a trace that does not
//! say what it means would silently change the normalizer's input.

use std::io::BufRead;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc, Mutex, PoisonError};
use std::thread;

use rawkey_core::RawKeyEvent;
use tracing::{debug, info};

use super::{CaptureError, InputSource, RawInputRecord, RawMouseEvent};

/// Error type for reading a trace.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("failed to read trace: {0}")]
    Io(#[from] std::io::Error),

    #[error("trace line {line}: {reason}: {content:?}")]
    Malformed {
        /// 1-based line number.
        line: usize,
        content: String,
        reason: &'static str,
    },
}

/// Input source that plays back a parsed trace on a background thread.
pub struct ReplayInputSource {
    records: Mutex<Option<Vec<RawInputRecord>>>,
    running: Arc<AtomicBool>,
}

impl ReplayInputSource {
    pub fn new(records: Vec<RawInputRecord>) -> Self {
        Self {
            records: Mutex::new(Some(records)),
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Parses a complete trace from `reader`.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, ReplayError> {
        parse_trace(reader).map(Self::new)
    }

    /// Parses a complete trace file.
    pub fn from_path(path: &Path) -> Result<Self, ReplayError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }
}

impl InputSource for ReplayInputSource {
    fn start(&self) -> Result<mpsc::Receiver<RawInputRecord>, CaptureError> {
        // The slot is only ever taken, so a poisoned lock still holds valid data.
        let records = self
            .records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .ok_or(CaptureError::AlreadyStarted)?;

        let (tx, rx) = mpsc::channel();
        let running = Arc::clone(&self.running);
        running.store(true, Ordering::SeqCst);

        info!(records = records.len(), "replay started");
        thread::Builder::new()
            .name("replay-input".to_string())
            .spawn(move || {
                for record in records {
                    if !running.load(Ordering::SeqCst) {
                        debug!("replay stopped early");
                        break;
                    }
                    if tx.send(record).is_err() {
                        break;
                    }
                }
            })
            .map_err(CaptureError::Spawn)?;

        Ok(rx)
    }

    fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }
}

/// Parses every line of a trace.
pub fn parse_trace<R: BufRead>(reader: R) -> Result<Vec<RawInputRecord>, ReplayError> {
    let mut records = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        if let Some(record) = parse_trace_line(&line?, index + 1)? {
            records.push(record);
        }
    }
    Ok(records)
}

/// Parses one trace line; comments and blank lines yield `Ok(None)`.
pub fn parse_trace_line(line: &str, line_number: usize) -> Result<Option<RawInputRecord>, ReplayError> {
    let content = line.split('#').next().unwrap_or_default().trim();
    if content.is_empty() {
        return Ok(None);
    }

    let malformed = |reason| ReplayError::Malformed {
        line: line_number,
        content: content.to_string(),
        reason,
    };

    let mut fields = content.split_whitespace();
    let kind = fields.next().unwrap_or_default();
    let numbers = fields
        .map(parse_hex)
        .collect::<Option<Vec<u16>>>()
        .ok_or_else(|| malformed("expected hexadecimal 16-bit fields"))?;

    match (kind, numbers.as_slice()) {
        ("kbd", &[make_code, flags, virtual_key]) => Ok(Some(RawInputRecord::Keyboard(
            RawKeyEvent::new(make_code, flags, virtual_key),
        ))),
        ("kbd", _) => Err(malformed("kbd takes <make> <flags> <vkey>")),
        ("mouse", &[button_flags]) => Ok(Some(RawInputRecord::Mouse(RawMouseEvent::new(
            button_flags,
        )))),
        ("mouse", _) => Err(malformed("mouse takes <button-flags>")),
        _ => Err(malformed("unknown record kind")),
    }
}

fn parse_hex(field: &str) -> Option<u16> {
    let digits = field
        .strip_prefix("0x")
        .or_else(|| field.strip_prefix("0X"))
        .unwrap_or(field);
    u16::from_str_radix(digits, 16).ok()
}
