//! Keyboard event types and the normalization state machine.
//!
//! This module is pure logic: no OS calls, no I/O.  The only outside service
//! the normalizer consults is a [`crate::platform::ScanCodeTranslator`],
//! injected at construction.

pub mod event;
pub mod normalizer;
