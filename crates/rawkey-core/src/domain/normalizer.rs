//! Scan-code normalization state machine.
//!
//! Raw-input delivers one record per scan-code *fragment*.  Most keys arrive
//! as a single record, but two kinds of key span several records:
//!
//! - Pause/Break arrives as an `E1`-flagged record followed by a record with
//!   make code `0x45`, the same code Num Lock uses.
//! - Some extended keys (Print Screen, the navigation cluster with Num Lock
//!   on) are preceded by a "fake left Shift" record: make code `0x2A` with the
//!   `E0` flag.
//!
//! The [`Normalizer`] keeps a one-slot memory of the prefix it has seen
//! ([`PendingSequence`]) so it can tell Pause from Num Lock, swallows prefix
//! fragments, and replaces the generic Shift/Ctrl/Alt virtual keys with their
//! left/right specific variants.
//!
//! The normalizer relies on records arriving in hardware order.  A caller
//! must not reorder, drop or replay records between a prefix and the record
//! that completes it.

use tracing::{debug, trace};

use super::event::{vk, AdjustmentFlags, NormalizedKeyEvent, RawKeyEvent, OVERRUN_MAKE_CODE};
use crate::platform::{DefaultTranslator, ScanCodeTranslator};

/// Fake left-Shift make code that opens an `E0` sequence.
const FAKE_SHIFT_MAKE_CODE: u16 = 0x2A;
/// Right-Shift make code.
const RIGHT_SHIFT_MAKE_CODE: u16 = 0x36;
/// Make code shared by Pause/Break (after `E1`) and Num Lock.
const PAUSE_OR_NUM_LOCK_MAKE_CODE: u16 = 0x45;

/// Prefix fragment waiting for the record that completes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PendingSequence {
    #[default]
    None,
    AwaitingE0Completion,
    AwaitingE1Completion,
}

/// Turns raw keyboard records into [`NormalizedKeyEvent`]s.
///
/// One instance per input stream; instances never share state.
#[derive(Debug)]
pub struct Normalizer<T = DefaultTranslator> {
    pending: PendingSequence,
    translator: T,
}

impl Default for Normalizer<DefaultTranslator> {
    fn default() -> Self {
        Self::new(DefaultTranslator::default())
    }
}

impl<T: ScanCodeTranslator> Normalizer<T> {
    /// Creates a normalizer with an empty pending slot.
    ///
    /// `translator` is consulted only for records whose make code is zero.
    pub fn new(translator: T) -> Self {
        Self {
            pending: PendingSequence::None,
            translator,
        }
    }

    /// Forgets any half-received prefix sequence.
    pub fn reset(&mut self) {
        self.pending = PendingSequence::None;
    }

    /// Normalizes one raw record.
    ///
    /// Returns `None` when the record does not stand on its own: buffer
    /// overruns, prefix fragments, and records whose make code is zero and
    /// cannot be recovered from the virtual key.  None of these are errors.
    pub fn normalize(&mut self, raw: RawKeyEvent) -> Option<NormalizedKeyEvent> {
        if raw.make_code == OVERRUN_MAKE_CODE {
            debug!(?raw, "keyboard overrun suppressed");
            return None;
        }

        if raw.is_e1() {
            trace!(?raw, "E1 prefix buffered");
            self.pending = PendingSequence::AwaitingE1Completion;
            return None;
        }

        if raw.is_e0() && raw.make_code == FAKE_SHIFT_MAKE_CODE {
            trace!(?raw, "E0 fake shift buffered");
            self.pending = PendingSequence::AwaitingE0Completion;
            return None;
        }

        let consumed_sequence = std::mem::take(&mut self.pending);

        let mut make_code = raw.make_code;
        let mut virtual_key = raw.virtual_key;
        let mut adjustments = AdjustmentFlags {
            extended_lookup: raw.is_e0(),
            ..AdjustmentFlags::default()
        };

        if make_code == 0 {
            make_code = self.translator.vk_to_scan_code(virtual_key).unwrap_or_else(|e| {
                debug!(error = %e, "make code recovery failed");
                0
            });
            adjustments.make_code_synthesized = true;
        }

        if make_code == 0 {
            debug!(?raw, "record without recoverable make code suppressed");
            return None;
        }

        if make_code == PAUSE_OR_NUM_LOCK_MAKE_CODE {
            if consumed_sequence == PendingSequence::AwaitingE1Completion {
                virtual_key = vk::PAUSE;
                adjustments.virtual_key_adjusted = true;
            } else {
                adjustments.extended_lookup = true;
            }
        }

        if let Some(specific) = disambiguate_virtual_key(virtual_key, raw.is_e0(), make_code) {
            virtual_key = specific;
            adjustments.virtual_key_adjusted = true;
        }

        Some(NormalizedKeyEvent {
            make_code: make_code as u8,
            flags: raw.flags as u8,
            virtual_key: virtual_key as u8,
            adjustments,
        })
    }
}

/// Maps a generic modifier virtual key to its left/right variant.
///
/// Returns `None` when the virtual key is already specific or the record
/// belongs to the left-hand key.
fn disambiguate_virtual_key(virtual_key: u16, is_e0: bool, make_code: u16) -> Option<u16> {
    match (virtual_key, is_e0, make_code) {
        (vk::SHIFT, _, FAKE_SHIFT_MAKE_CODE) => Some(vk::LSHIFT),
        (vk::SHIFT, _, RIGHT_SHIFT_MAKE_CODE) => Some(vk::RSHIFT),
        (vk::CONTROL, true, _) => Some(vk::RCONTROL),
        (vk::MENU, true, _) => Some(vk::RMENU),
        _ => None,
    }
}
