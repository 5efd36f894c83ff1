//! Row rendering for captured events.
//!
//! A [`KeyRow`] is everything the viewer prints for one packed event handle:
//! the key's names, its raw numeric fields in the chosen [`NumberFormat`],
//! and which fields the normalizer adjusted.

use std::fmt;
use std::str::FromStr;

use rawkey_core::{unpack, KeyTables, Library};
use serde::{Deserialize, Serialize};

/// How numeric columns are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberFormat {
    /// `0x1e`
    #[default]
    Hex,
    /// `30`
    Dec,
    /// `0b00011110`
    Bin,
}

impl fmt::Display for NumberFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NumberFormat::Hex => "hex",
            NumberFormat::Dec => "dec",
            NumberFormat::Bin => "bin",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown number format {0:?} (expected hex, dec or bin)")]
pub struct UnknownNumberFormat(pub String);

impl FromStr for NumberFormat {
    type Err = UnknownNumberFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hex" => Ok(NumberFormat::Hex),
            "dec" => Ok(NumberFormat::Dec),
            "bin" => Ok(NumberFormat::Bin),
            _ => Err(UnknownNumberFormat(s.to_string())),
        }
    }
}

/// Formats one byte-sized event field.
pub fn format_byte(value: u8, format: NumberFormat) -> String {
    match format {
        NumberFormat::Hex => format!("{value:#04x}"),
        NumberFormat::Dec => value.to_string(),
        NumberFormat::Bin => format!("{value:#010b}"),
    }
}

/// Formats a logical key id; ids that are zero or negative print as `N/A`.
pub fn format_key_code(id: i32, format: NumberFormat) -> String {
    if id <= 0 {
        return "N/A".to_string();
    }
    match format {
        NumberFormat::Hex => format!("{id:#05x}"),
        NumberFormat::Dec => id.to_string(),
        NumberFormat::Bin => format!("{id:#b}"),
    }
}

/// One rendered event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyRow {
    /// The packed handle this row was rendered from.
    pub handle: u32,
    /// Human-readable virtual-key name.
    pub key: String,
    /// OS constant name of the virtual key.
    pub vk_name: String,
    pub virtual_key: String,
    pub make_code: String,
    pub flags: String,
    pub library: Library,
    /// The key's name in `library`.
    pub library_name: String,
    pub key_code: String,
    pub key_down: bool,
    pub virtual_key_adjusted: bool,
    pub make_code_adjusted: bool,
}

impl KeyRow {
    /// Decodes `handle` and looks its names up in `tables`.
    pub fn render(handle: u32, tables: &KeyTables, library: Library, format: NumberFormat) -> Self {
        let event = unpack(handle);
        let description = tables.describe(&event);

        Self {
            handle,
            key: description.virtual_key.common.clone(),
            vk_name: description.virtual_key.raw.clone(),
            virtual_key: format_byte(event.virtual_key, format),
            make_code: format_byte(event.make_code, format),
            flags: format_byte(event.flags, format),
            library,
            library_name: description.key.name_in(library).to_string(),
            key_code: format_key_code(description.key.logical_key_id, format),
            key_down: event.is_key_down(),
            virtual_key_adjusted: event.adjustments.virtual_key_adjusted,
            make_code_adjusted: event.adjustments.make_code_synthesized,
        }
    }

    /// Column headers matching [`KeyRow::text_line`].
    pub fn header_line(library: Library) -> String {
        format!(
            "{:<20} {:<22} {:<11} {:<11} {:<11} {:<26} {}",
            "Key",
            "VK name",
            "VKey",
            "MakeCode",
            "Flags",
            library.title(),
            "Key code"
        )
    }

    /// Fixed-width text rendering.  Adjusted fields carry a `*` suffix.
    pub fn text_line(&self) -> String {
        let marked = |value: &str, adjusted: bool| {
            if adjusted {
                format!("{value}*")
            } else {
                value.to_string()
            }
        };
        format!(
            "{:<20} {:<22} {:<11} {:<11} {:<11} {:<26} {}",
            self.key,
            self.vk_name,
            marked(&self.virtual_key, self.virtual_key_adjusted),
            marked(&self.make_code, self.make_code_adjusted),
            self.flags,
            self.library_name,
            self.key_code
        )
    }
}
