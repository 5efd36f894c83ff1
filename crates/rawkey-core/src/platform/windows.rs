//! Scan-code translation through the Windows keyboard layout.
//!
//! # Safety
//!
//! `MapVirtualKeyW` only reads the calling thread's active keyboard layout;
//! it takes no pointers and has no preconditions.

#![cfg(target_os = "windows")]

use windows::Win32::UI::Input::KeyboardAndMouse::{MapVirtualKeyW, MAPVK_VK_TO_VSC_EX};

use super::{ScanCodeTranslator, TranslateError};

/// Translator backed by `MapVirtualKeyW(.., MAPVK_VK_TO_VSC_EX)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTranslator;

impl SystemTranslator {
    pub fn new() -> Self {
        Self
    }
}

impl ScanCodeTranslator for SystemTranslator {
    fn vk_to_scan_code(&self, virtual_key: u16) -> Result<u16, TranslateError> {
        if virtual_key > 0xFF {
            return Err(TranslateError::OutOfRange(virtual_key));
        }
        // SAFETY: plain value arguments; see module docs.
        let code = unsafe { MapVirtualKeyW(u32::from(virtual_key), MAPVK_VK_TO_VSC_EX) };
        match code & 0xFFFF {
            0 => Err(TranslateError::NoMapping(virtual_key)),
            low => Ok(low as u16),
        }
    }
}
