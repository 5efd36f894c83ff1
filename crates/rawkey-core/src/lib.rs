//! # rawkey-core
//!
//! Shared library for the raw keyboard viewer: the scan-code normalizer, the
//! compact 32-bit event codec and the key-name tables.
//!
//! Apart from the optional Windows translation service in [`platform`], the
//! crate has no dependencies on OS APIs, UI frameworks or I/O.
//!
//! # Architecture overview (for beginners)
//!
//! The raw-input layer of an operating system reports every keyboard
//! notification as a (make code, flags, virtual key) triple.  Those triples
//! are awkward to display directly: Pause and Num Lock share a make code,
//! prefix bytes arrive as records of their own, and the left and right
//! modifier keys report the same virtual key.  This crate turns them into
//! something a viewer can show:
//!
//! - **`domain`** – The event types and the [`Normalizer`], a small state
//!   machine that swallows prefix fragments and disambiguates keys.
//!
//! - **`codec`** – Packs a [`NormalizedKeyEvent`] into a `u32` handle and back,
//!   so a list widget can store one word per row.
//!
//! - **`keymap`** – Text tables mapping scan codes to key names in three input
//!   libraries, and virtual keys to human-readable names, with fallback rows
//!   for unknown keys.
//!
//! - **`platform`** – The service that recovers a missing make code from a
//!   virtual key: the OS keyboard layout on Windows, a fixed Set 1 table
//!   elsewhere.

pub mod codec;
pub mod domain;
pub mod keymap;
pub mod platform;

// Re-export the most-used types at the crate root so callers can write
// `rawkey_core::Normalizer` instead of `rawkey_core::domain::normalizer::Normalizer`.
pub use codec::{pack, unpack};
pub use domain::event::{AdjustmentFlags, NormalizedKeyEvent, RawKeyEvent};
pub use domain::normalizer::{Normalizer, PendingSequence};
pub use keymap::{KeyDescription, KeyTableEntry, KeyTables, Library, VirtualKeyNames};
pub use platform::{DefaultTranslator, ScanCodeTranslator, Set1Translator, TranslateError};
