//! Compact 32-bit encoding of normalized keyboard events.
//!
//! Layout, least significant byte first:
//! ```text
//! [make_code:8][flags:8][virtual_key:8][adjustments:8]
//! ```
//! The layout is defined with shifts, so it does not depend on the host's
//! byte order.  Callers treat the word as an opaque handle (for example as
//! per-row user data in a list) and decode it again for display.

use crate::domain::event::{AdjustmentFlags, NormalizedKeyEvent};

const MAKE_CODE_SHIFT: u32 = 0;
const FLAGS_SHIFT: u32 = 8;
const VIRTUAL_KEY_SHIFT: u32 = 16;
const ADJUSTMENTS_SHIFT: u32 = 24;

/// Packs `event` into a 32-bit word.
///
/// # Examples
///
/// ```rust
/// use rawkey_core::codec::{pack, unpack};
/// use rawkey_core::domain::event::NormalizedKeyEvent;
///
/// let event = NormalizedKeyEvent { make_code: 0x1E, virtual_key: 0x41, ..Default::default() };
/// let word = pack(&event);
/// assert_eq!(word, 0x0041_001E);
/// assert_eq!(unpack(word), event);
/// ```
pub fn pack(event: &NormalizedKeyEvent) -> u32 {
    u32::from(event.make_code) << MAKE_CODE_SHIFT
        | u32::from(event.flags) << FLAGS_SHIFT
        | u32::from(event.virtual_key) << VIRTUAL_KEY_SHIFT
        | u32::from(event.adjustments.bits()) << ADJUSTMENTS_SHIFT
}

/// Unpacks a word produced by [`pack`].
///
/// Total over `u32`: any word decodes to some event.  Adjustment bits that
/// do not name a known flag are dropped.
pub fn unpack(word: u32) -> NormalizedKeyEvent {
    NormalizedKeyEvent {
        make_code: (word >> MAKE_CODE_SHIFT) as u8,
        flags: (word >> FLAGS_SHIFT) as u8,
        virtual_key: (word >> VIRTUAL_KEY_SHIFT) as u8,
        adjustments: AdjustmentFlags::from_bits((word >> ADJUSTMENTS_SHIFT) as u8),
    }
}

impl From<NormalizedKeyEvent> for u32 {
    fn from(event: NormalizedKeyEvent) -> Self {
        pack(&event)
    }
}

impl From<u32> for NormalizedKeyEvent {
    fn from(word: u32) -> Self {
        unpack(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::event::{KEY_BREAK, KEY_E0};

    #[test]
    fn test_pack_places_fields_in_fixed_byte_order() {
        let event = NormalizedKeyEvent {
            make_code: 0x11,
            flags: 0x22,
            virtual_key: 0x33,
            adjustments: AdjustmentFlags::from_bits(0x83),
        };
        assert_eq!(pack(&event), 0x8333_2211);
    }

    #[test]
    fn test_letter_a_key_down_packs_to_0x0041001e() {
        let event = NormalizedKeyEvent {
            make_code: 0x1E,
            flags: 0,
            virtual_key: 0x41,
            adjustments: AdjustmentFlags::default(),
        };
        assert_eq!(pack(&event), 0x0041_001E);
    }

    #[test]
    fn test_round_trip_preserves_every_field_and_key_state() {
        // Arrange: every flag-byte value against each adjustment combination
        for adjustment_bits in [0x00u8, 0x01, 0x02, 0x80, 0x83] {
            for flags in 0u8..=0xFF {
                let event = NormalizedKeyEvent {
                    make_code: flags.wrapping_mul(7),
                    flags,
                    virtual_key: flags.wrapping_add(0x41),
                    adjustments: AdjustmentFlags::from_bits(adjustment_bits),
                };

                // Act
                let decoded = unpack(pack(&event));

                // Assert
                assert_eq!(decoded, event);
                assert_eq!(decoded.is_key_down(), u16::from(flags) & KEY_BREAK == 0);
            }
        }
    }

    #[test]
    fn test_unpack_drops_unknown_adjustment_bits() {
        let event = unpack(0x7C00_0000);
        assert!(event.adjustments.is_empty());
    }

    #[test]
    fn test_unpack_is_total_over_extreme_words() {
        let all_ones = unpack(u32::MAX);
        assert_eq!(all_ones.make_code, 0xFF);
        assert_eq!(all_ones.flags, 0xFF);
        assert_eq!(all_ones.virtual_key, 0xFF);
        assert!(!all_ones.is_key_down());

        assert_eq!(unpack(0), NormalizedKeyEvent::default());
    }

    #[test]
    fn test_from_impls_match_pack_and_unpack() {
        let event = NormalizedKeyEvent {
            make_code: 0x1D,
            flags: KEY_E0 as u8,
            virtual_key: 0xA3,
            adjustments: AdjustmentFlags::from_bits(0x82),
        };
        let word: u32 = event.into();
        assert_eq!(word, pack(&event));
        assert_eq!(NormalizedKeyEvent::from(word), event);
    }
}
