//! Raw and normalized keyboard event types.
//!
//! A [`RawKeyEvent`] is exactly what the operating system's raw-input layer
//! delivers for one keyboard notification: a make code, a flag word and a
//! virtual key, each 16 bits wide.  A [`NormalizedKeyEvent`] is the same event
//! after the [`Normalizer`](super::normalizer::Normalizer) has resolved prefix
//! sequences and left/right ambiguity; every field fits in one byte, and the
//! [`AdjustmentFlags`] record which fields were synthesized rather than
//! observed.
//!
//! # Flag bits (for beginners)
//!
//! Windows reports keyboard scan codes using the legacy "Set 1" encoding.
//! Keys that did not exist on the original PC keyboard (right Ctrl, arrow
//! cluster, numpad Enter, ...) are sent with an `0xE0` prefix byte; Pause is
//! sent as the six-byte sequence `E1 1D 45 E1 9D C5`.  The raw-input layer
//! folds the prefix bytes into flag bits:
//!
//! | Flag            | Value  | Meaning                               |
//! |-----------------|--------|---------------------------------------|
//! | [`KEY_BREAK`]   | `0x01` | the key was released                  |
//! | [`KEY_E0`]      | `0x02` | the code carried the `E0` prefix      |
//! | [`KEY_E1`]      | `0x04` | the code carried the `E1` prefix      |

use serde::{Deserialize, Serialize};

/// Key released (`RI_KEY_BREAK`).
pub const KEY_BREAK: u16 = 0x01;
/// Extended-0 prefix present (`RI_KEY_E0`).
pub const KEY_E0: u16 = 0x02;
/// Extended-1 prefix present (`RI_KEY_E1`).
pub const KEY_E1: u16 = 0x04;

/// Make code reported when the keyboard controller's buffer overflowed
/// (`KEYBOARD_OVERRUN_MAKE_CODE`).
pub const OVERRUN_MAKE_CODE: u16 = 0xFF;

/// Virtual-key codes the normalizer needs to recognise or produce.
pub mod vk {
    pub const SHIFT: u16 = 0x10;
    pub const CONTROL: u16 = 0x11;
    pub const MENU: u16 = 0x12;
    pub const PAUSE: u16 = 0x13;
    pub const LSHIFT: u16 = 0xA0;
    pub const RSHIFT: u16 = 0xA1;
    pub const LCONTROL: u16 = 0xA2;
    pub const RCONTROL: u16 = 0xA3;
    pub const LMENU: u16 = 0xA4;
    pub const RMENU: u16 = 0xA5;
}

/// One keyboard record as delivered by the raw-input layer.
///
/// Only the first three fields of the OS keyboard payload matter here; the
/// message id and extra information are dropped by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawKeyEvent {
    /// Hardware scan code (Set 1), without prefix bytes.
    pub make_code: u16,
    /// Combination of [`KEY_BREAK`], [`KEY_E0`] and [`KEY_E1`].
    pub flags: u16,
    /// Windows virtual-key code reported alongside the scan code.
    pub virtual_key: u16,
}

impl RawKeyEvent {
    pub fn new(make_code: u16, flags: u16, virtual_key: u16) -> Self {
        Self {
            make_code,
            flags,
            virtual_key,
        }
    }

    /// Returns `true` if the extended-0 prefix bit is set.
    pub fn is_e0(&self) -> bool {
        self.flags & KEY_E0 != 0
    }

    /// Returns `true` if the extended-1 prefix bit is set.
    pub fn is_e1(&self) -> bool {
        self.flags & KEY_E1 != 0
    }
}

/// Which fields of a [`NormalizedKeyEvent`] were changed or synthesized.
///
/// Packed into the top byte of the 32-bit event word, using the bit values
/// [`AdjustmentFlags::MAKE_CODE_SYNTHESIZED`],
/// [`AdjustmentFlags::VIRTUAL_KEY_ADJUSTED`] and
/// [`AdjustmentFlags::EXTENDED_LOOKUP`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct AdjustmentFlags {
    /// The make code was missing and recovered from the virtual key.
    pub make_code_synthesized: bool,
    /// The virtual key was replaced by a more specific one.
    pub virtual_key_adjusted: bool,
    /// Look the key up in the extended (`0x1xx`) half of the scan-code table.
    pub extended_lookup: bool,
}

impl AdjustmentFlags {
    pub const MAKE_CODE_SYNTHESIZED: u8 = 0b0000_0001;
    pub const VIRTUAL_KEY_ADJUSTED: u8 = 0b0000_0010;
    pub const EXTENDED_LOOKUP: u8 = 0b1000_0000;

    /// Builds the flag set from its packed byte.  Unknown bits are ignored.
    pub fn from_bits(bits: u8) -> Self {
        Self {
            make_code_synthesized: bits & Self::MAKE_CODE_SYNTHESIZED != 0,
            virtual_key_adjusted: bits & Self::VIRTUAL_KEY_ADJUSTED != 0,
            extended_lookup: bits & Self::EXTENDED_LOOKUP != 0,
        }
    }

    /// Returns the packed byte for this flag set.
    pub fn bits(self) -> u8 {
        let mut bits = 0;
        if self.make_code_synthesized {
            bits |= Self::MAKE_CODE_SYNTHESIZED;
        }
        if self.virtual_key_adjusted {
            bits |= Self::VIRTUAL_KEY_ADJUSTED;
        }
        if self.extended_lookup {
            bits |= Self::EXTENDED_LOOKUP;
        }
        bits
    }

    /// Returns `true` if the make code or the virtual key differ from what
    /// the hardware reported.
    pub fn any_field_changed(self) -> bool {
        self.make_code_synthesized || self.virtual_key_adjusted
    }

    pub fn is_empty(self) -> bool {
        self.bits() == 0
    }
}

/// A keyboard event with an unambiguous key identity.
///
/// All fields are byte sized so the event packs losslessly into a `u32`
/// (see [`crate::codec::pack`]).  Key-down state is not stored; it is always
/// derived from the `flags` byte by [`NormalizedKeyEvent::is_key_down`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct NormalizedKeyEvent {
    pub make_code: u8,
    /// Low byte of the incoming [`RawKeyEvent::flags`].
    pub flags: u8,
    pub virtual_key: u8,
    pub adjustments: AdjustmentFlags,
}

impl NormalizedKeyEvent {
    /// Builds an event straight from a raw record, truncating each field to
    /// its low byte and running none of the normalization steps.
    ///
    /// The only adjustment recorded is [`AdjustmentFlags::extended_lookup`]
    /// when the record carries the `E0` prefix.
    pub fn unadjusted(raw: RawKeyEvent) -> Self {
        Self {
            make_code: raw.make_code as u8,
            flags: raw.flags as u8,
            virtual_key: raw.virtual_key as u8,
            adjustments: AdjustmentFlags {
                extended_lookup: raw.is_e0(),
                ..AdjustmentFlags::default()
            },
        }
    }

    /// `true` unless the key-released bit is set in `flags`.
    pub fn is_key_down(&self) -> bool {
        u16::from(self.flags) & KEY_BREAK == 0
    }

    /// The 9-bit code used to index the scan-code table: the make code in the
    /// low byte and `0x100` when [`AdjustmentFlags::extended_lookup`] is set.
    pub fn lookup_code(&self) -> u16 {
        u16::from(self.make_code) | if self.adjustments.extended_lookup { 0x100 } else { 0 }
    }
}
