//! Portable virtual-key → scan-code Set 1 table (US layout).
//!
//! `VK_TO_SCAN_TABLE` is a compile-time array of 256 entries indexed by
//! virtual-key code.  Position `0x41` holds `0x1E` because `'A'` sits at scan
//! code `0x1E`.  Extended keys carry `0xE0` in the high byte, exactly as
//! `MapVirtualKeyW(.., MAPVK_VK_TO_VSC_EX)` reports them, and Pause carries
//! `0xE1`.  A zero entry means "no mapping".
//!
//! Reference: Microsoft "Keyboard Input: scan codes" and the Set 1 table in
//! the PS/2 keyboard documentation.

use super::{ScanCodeTranslator, TranslateError};

/// Table-driven translator that works without any OS support.
#[derive(Debug, Clone, Copy, Default)]
pub struct Set1Translator;

impl Set1Translator {
    pub fn new() -> Self {
        Self
    }
}

impl ScanCodeTranslator for Set1Translator {
    fn vk_to_scan_code(&self, virtual_key: u16) -> Result<u16, TranslateError> {
        let index = usize::from(virtual_key);
        let code = *VK_TO_SCAN_TABLE
            .get(index)
            .ok_or(TranslateError::OutOfRange(virtual_key))?;
        if code == 0 {
            return Err(TranslateError::NoMapping(virtual_key));
        }
        Ok(code)
    }
}

const VK_TO_SCAN_TABLE: [u16; 256] = {
    let mut t = [0u16; 256];

    // ── Letters (VK 'A'=0x41 … 'Z'=0x5A) ──────────────────────────────────────
    t[0x41] = 0x1E;
    t[0x42] = 0x30;
    t[0x43] = 0x2E;
    t[0x44] = 0x20;
    t[0x45] = 0x12;
    t[0x46] = 0x21;
    t[0x47] = 0x22;
    t[0x48] = 0x23;
    t[0x49] = 0x17;
    t[0x4A] = 0x24;
    t[0x4B] = 0x25;
    t[0x4C] = 0x26;
    t[0x4D] = 0x32;
    t[0x4E] = 0x31;
    t[0x4F] = 0x18;
    t[0x50] = 0x19;
    t[0x51] = 0x10;
    t[0x52] = 0x13;
    t[0x53] = 0x1F;
    t[0x54] = 0x14;
    t[0x55] = 0x16;
    t[0x56] = 0x2F;
    t[0x57] = 0x11;
    t[0x58] = 0x2D;
    t[0x59] = 0x15;
    t[0x5A] = 0x2C;

    // ── Digit row (VK '0'=0x30 … '9'=0x39) ────────────────────────────────────
    t[0x30] = 0x0B;
    let mut d = 1;
    while d <= 9 {
        t[0x30 + d] = 0x01 + d as u16;
        d += 1;
    }

    // ── Control keys ──────────────────────────────────────────────────────────
    t[0x08] = 0x0E; // VK_BACK
    t[0x09] = 0x0F; // VK_TAB
    t[0x0C] = 0x4C; // VK_CLEAR
    t[0x0D] = 0x1C; // VK_RETURN
    t[0x10] = 0x2A; // VK_SHIFT
    t[0x11] = 0x1D; // VK_CONTROL
    t[0x12] = 0x38; // VK_MENU
    t[0x13] = 0xE11D; // VK_PAUSE
    t[0x14] = 0x3A; // VK_CAPITAL
    t[0x1B] = 0x01; // VK_ESCAPE
    t[0x20] = 0x39; // VK_SPACE
    t[0x90] = 0xE045; // VK_NUMLOCK
    t[0x91] = 0x46; // VK_SCROLL

    // ── Navigation cluster (extended) ─────────────────────────────────────────
    t[0x21] = 0xE049; // VK_PRIOR
    t[0x22] = 0xE051; // VK_NEXT
    t[0x23] = 0xE04F; // VK_END
    t[0x24] = 0xE047; // VK_HOME
    t[0x25] = 0xE04B; // VK_LEFT
    t[0x26] = 0xE048; // VK_UP
    t[0x27] = 0xE04D; // VK_RIGHT
    t[0x28] = 0xE050; // VK_DOWN
    t[0x2C] = 0xE037; // VK_SNAPSHOT
    t[0x2D] = 0xE052; // VK_INSERT
    t[0x2E] = 0xE053; // VK_DELETE
    t[0x5B] = 0xE05B; // VK_LWIN
    t[0x5C] = 0xE05C; // VK_RWIN
    t[0x5D] = 0xE05D; // VK_APPS
    t[0x5F] = 0xE05F; // VK_SLEEP

    // ── Numpad ────────────────────────────────────────────────────────────────
    t[0x60] = 0x52;
    t[0x61] = 0x4F;
    t[0x62] = 0x50;
    t[0x63] = 0x51;
    t[0x64] = 0x4B;
    t[0x65] = 0x4C;
    t[0x66] = 0x4D;
    t[0x67] = 0x47;
    t[0x68] = 0x48;
    t[0x69] = 0x49;
    t[0x6A] = 0x37; // VK_MULTIPLY
    t[0x6B] = 0x4E; // VK_ADD
    t[0x6D] = 0x4A; // VK_SUBTRACT
    t[0x6E] = 0x53; // VK_DECIMAL
    t[0x6F] = 0xE035; // VK_DIVIDE

    // ── Function keys ─────────────────────────────────────────────────────────
    let mut f = 0;
    while f < 10 {
        t[0x70 + f] = 0x3B + f as u16; // VK_F1 … VK_F10
        f += 1;
    }
    t[0x7A] = 0x57; // VK_F11
    t[0x7B] = 0x58; // VK_F12
    let mut f = 0;
    while f < 11 {
        t[0x7C + f] = 0x64 + f as u16; // VK_F13 … VK_F23
        f += 1;
    }
    t[0x87] = 0x76; // VK_F24

    // ── Modifiers ─────────────────────────────────────────────────────────────
    t[0xA0] = 0x2A; // VK_LSHIFT
    t[0xA1] = 0x36; // VK_RSHIFT
    t[0xA2] = 0x1D; // VK_LCONTROL
    t[0xA3] = 0xE01D; // VK_RCONTROL
    t[0xA4] = 0x38; // VK_LMENU
    t[0xA5] = 0xE038; // VK_RMENU

    // ── Browser / media keys (extended) ───────────────────────────────────────
    t[0xA6] = 0xE06A; // VK_BROWSER_BACK
    t[0xA7] = 0xE069; // VK_BROWSER_FORWARD
    t[0xA8] = 0xE067; // VK_BROWSER_REFRESH
    t[0xA9] = 0xE068; // VK_BROWSER_STOP
    t[0xAA] = 0xE065; // VK_BROWSER_SEARCH
    t[0xAB] = 0xE066; // VK_BROWSER_FAVORITES
    t[0xAC] = 0xE032; // VK_BROWSER_HOME
    t[0xAD] = 0xE020; // VK_VOLUME_MUTE
    t[0xAE] = 0xE02E; // VK_VOLUME_DOWN
    t[0xAF] = 0xE030; // VK_VOLUME_UP
    t[0xB0] = 0xE019; // VK_MEDIA_NEXT_TRACK
    t[0xB1] = 0xE010; // VK_MEDIA_PREV_TRACK
    t[0xB2] = 0xE024; // VK_MEDIA_STOP
    t[0xB3] = 0xE022; // VK_MEDIA_PLAY_PAUSE
    t[0xB4] = 0xE06C; // VK_LAUNCH_MAIL
    t[0xB5] = 0xE06D; // VK_LAUNCH_MEDIA_SELECT
    t[0xB6] = 0xE06B; // VK_LAUNCH_APP1
    t[0xB7] = 0xE021; // VK_LAUNCH_APP2

    // ── Punctuation (US layout) ───────────────────────────────────────────────
    t[0xBA] = 0x27; // VK_OEM_1      (; :)
    t[0xBB] = 0x0D; // VK_OEM_PLUS   (= +)
    t[0xBC] = 0x33; // VK_OEM_COMMA  (, <)
    t[0xBD] = 0x0C; // VK_OEM_MINUS  (- _)
    t[0xBE] = 0x34; // VK_OEM_PERIOD (. >)
    t[0xBF] = 0x35; // VK_OEM_2      (/ ?)
    t[0xC0] = 0x29; // VK_OEM_3      (` ~)
    t[0xDB] = 0x1A; // VK_OEM_4      ([ {)
    t[0xDC] = 0x2B; // VK_OEM_5      (\ |)
    t[0xDD] = 0x1B; // VK_OEM_6      (] })
    t[0xDE] = 0x28; // VK_OEM_7      (' ")
    t[0xE2] = 0x56; // VK_OEM_102    (non-US \ |)

    t
};
