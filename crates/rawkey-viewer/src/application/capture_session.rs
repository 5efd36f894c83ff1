//! Capture session use case.
//!
//! Turns the stream of raw-input records into the viewer's event log: a
//! list of packed `u32` handles, one per displayed row.  Keyboard records go
//! through the [`Normalizer`] (or straight through when adjustment is off);
//! a right mouse button release clears the log.

use rawkey_core::{
    pack, DefaultTranslator, KeyTables, Library, NormalizedKeyEvent, Normalizer,
    ScanCodeTranslator,
};
use tracing::{debug, info};

use crate::application::display::{KeyRow, NumberFormat};
use crate::infrastructure::input_source::RawInputRecord;

/// What a single record did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionUpdate {
    /// A row was appended; carries its handle.
    Appended(u32),
    /// The normalizer swallowed the record.
    Suppressed,
    /// The log was cleared.
    Cleared,
    /// The record is not relevant to the viewer.
    Ignored,
}

/// Holds the event log and the normalizer feeding it.
pub struct CaptureSession<'t, T = DefaultTranslator> {
    normalizer: Normalizer<T>,
    adjust: bool,
    tables: &'t KeyTables,
    log: Vec<u32>,
}

impl<'t, T: ScanCodeTranslator> CaptureSession<'t, T> {
    pub fn new(tables: &'t KeyTables, translator: T, adjust: bool) -> Self {
        Self {
            normalizer: Normalizer::new(translator),
            adjust,
            tables,
            log: Vec::new(),
        }
    }

    /// Processes one record.
    pub fn handle(&mut self, record: RawInputRecord) -> SessionUpdate {
        match record {
            RawInputRecord::Keyboard(raw) => {
                let event = if self.adjust {
                    self.normalizer.normalize(raw)
                } else {
                    Some(NormalizedKeyEvent::unadjusted(raw))
                };
                match event {
                    Some(event) => {
                        let handle = pack(&event);
                        self.log.push(handle);
                        debug!("event logged: {handle:#010x}");
                        SessionUpdate::Appended(handle)
                    }
                    None => SessionUpdate::Suppressed,
                }
            }
            RawInputRecord::Mouse(mouse) if mouse.is_right_button_up() => {
                self.clear();
                SessionUpdate::Cleared
            }
            RawInputRecord::Mouse(_) => SessionUpdate::Ignored,
        }
    }

    /// Empties the log and forgets any half-received prefix sequence.
    pub fn clear(&mut self) {
        info!(rows = self.log.len(), "event log cleared");
        self.log.clear();
        self.normalizer.reset();
    }

    /// Packed handles in arrival order.
    pub fn log(&self) -> &[u32] {
        &self.log
    }

    pub fn adjust(&self) -> bool {
        self.adjust
    }

    /// Switches normalization on or off for subsequent records.
    pub fn set_adjust(&mut self, adjust: bool) {
        if adjust != self.adjust {
            self.normalizer.reset();
        }
        self.adjust = adjust;
    }

    /// Renders the row for one handle.
    pub fn row(&self, handle: u32, library: Library, format: NumberFormat) -> KeyRow {
        KeyRow::render(handle, self.tables, library, format)
    }

    /// Renders every logged row.
    pub fn rows(&self, library: Library, format: NumberFormat) -> Vec<KeyRow> {
        self.log
            .iter()
            .map(|&handle| self.row(handle, library, format))
            .collect()
    }
}
