//! Virtual-key to scan-code translation.
//!
//! Some keyboards (and most software key injectors) deliver raw-input records
//! with a make code of zero.  The normalizer then asks a
//! [`ScanCodeTranslator`] to recover the scan code from the virtual key.
//!
//! Two implementations exist:
//!
//! - [`set1::Set1Translator`]: a portable compile-time table for a US
//!   keyboard, usable on every platform and in tests.
//! - `windows::SystemTranslator`: asks Windows via `MapVirtualKeyW`, which
//!   honours the active keyboard layout.
//!
//! [`DefaultTranslator`] picks the system translator on Windows and the
//! portable table elsewhere.

pub mod set1;

#[cfg(target_os = "windows")]
pub mod windows;

pub use set1::Set1Translator;

#[cfg(target_os = "windows")]
pub use self::windows::SystemTranslator;

/// Translator used when the caller does not pick one.
#[cfg(target_os = "windows")]
pub type DefaultTranslator = SystemTranslator;

/// Translator used when the caller does not pick one.
#[cfg(not(target_os = "windows"))]
pub type DefaultTranslator = Set1Translator;

/// Error returned when a virtual key cannot be translated.
///
/// The normalizer treats every variant exactly like a translation result of
/// zero: the event is suppressed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranslateError {
    /// The translation service knows no scan code for this virtual key.
    #[error("no scan code mapping for virtual key 0x{0:02X}")]
    NoMapping(u16),

    /// The virtual key does not fit the service's input range.
    #[error("virtual key 0x{0:04X} is out of range")]
    OutOfRange(u16),
}

/// Recovers a hardware scan code from a virtual-key code.
///
/// Extended keys are returned with `0xE0` in the high byte (for example
/// right Ctrl is `0xE01D`), matching `MAPVK_VK_TO_VSC_EX`.
#[cfg_attr(test, mockall::automock)]
pub trait ScanCodeTranslator {
    fn vk_to_scan_code(&self, virtual_key: u16) -> Result<u16, TranslateError>;
}

impl<T: ScanCodeTranslator + ?Sized> ScanCodeTranslator for &T {
    fn vk_to_scan_code(&self, virtual_key: u16) -> Result<u16, TranslateError> {
        (**self).vk_to_scan_code(virtual_key)
    }
}

impl<T: ScanCodeTranslator + ?Sized> ScanCodeTranslator for Box<T> {
    fn vk_to_scan_code(&self, virtual_key: u16) -> Result<u16, TranslateError> {
        (**self).vk_to_scan_code(virtual_key)
    }
}
