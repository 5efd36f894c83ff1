//! Input source infrastructure for the viewer.
//!
//! An input source produces [`RawInputRecord`]s, the keyboard and mouse
//! payloads of the OS raw-input layer, and delivers them over a std `mpsc`
//! channel.  Records are delivered in the order the source produced them;
//! the normalizer downstream depends on that ordering.
//!
//! # Testability
//!
//! The [`InputSource`] trait allows tests to inject synthetic records through
//! [`mock::MockInputSource`] instead of reading a trace.

use std::sync::mpsc;

use rawkey_core::RawKeyEvent;

pub mod mock;
pub mod replay;

/// Mouse payload of a raw-input record.  Only the button transition flags are
/// kept; movement is irrelevant to the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawMouseEvent {
    /// Combination of the `RI_MOUSE_*_BUTTON_*` bits.
    pub button_flags: u16,
}

impl RawMouseEvent {
    /// `RI_MOUSE_RIGHT_BUTTON_UP`.
    pub const RIGHT_BUTTON_UP: u16 = 0x0008;

    pub fn new(button_flags: u16) -> Self {
        Self { button_flags }
    }

    pub fn is_right_button_up(&self) -> bool {
        self.button_flags & Self::RIGHT_BUTTON_UP != 0
    }
}

/// One record delivered by an input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawInputRecord {
    Keyboard(RawKeyEvent),
    Mouse(RawMouseEvent),
}

/// Error type for input source operations.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("input source has already been started")]
    AlreadyStarted,
    #[error("failed to spawn the input thread: {0}")]
    Spawn(#[source] std::io::Error),
}

/// Trait abstracting raw-input production.
///
/// The viewer reads recorded traces through [`replay::ReplayInputSource`];
/// tests use [`mock::MockInputSource`].
pub trait InputSource: Send {
    /// Starts the source and returns a receiver for its records.  The channel
    /// closes when the source is exhausted or stopped.
    fn start(&self) -> Result<mpsc::Receiver<RawInputRecord>, CaptureError>;
    /// Stops the source and releases its resources.
    fn stop(&self);
}
