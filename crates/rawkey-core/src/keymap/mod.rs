//! Key-name tables and the lookup façade over them.
//!
//! Two tables ship embedded in the crate:
//!
//! - the **scan-code table**, keyed by the 9-bit lookup code of a
//!   [`NormalizedKeyEvent`] (`0x1xx` for extended keys), mapping to a logical
//!   key id and the key's name in three input libraries;
//! - the **virtual-key table**, keyed by the 8-bit virtual-key code, mapping to
//!   the OS constant name and a human-readable name.
//!
//! Lookups never fail.  A missing row falls back to the table's sentinel row
//! (`0x000` for scan codes, `0xFF` for virtual keys), and a missing sentinel
//! falls back to an empty entry.

pub mod loader;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::domain::event::NormalizedKeyEvent;

pub use loader::{
    load_scan_code_table, load_virtual_key_table, parse_scan_code_table,
    parse_virtual_key_table, TableWarning, TableWarningKind,
};

/// Row returned when a scan-code lookup misses.
pub const SCAN_CODE_SENTINEL: u16 = 0x000;
/// Row returned when a virtual-key lookup misses.
pub const VIRTUAL_KEY_SENTINEL: u16 = 0xFF;

const EMBEDDED_SCAN_CODES: &str = include_str!("../../data/scan_codes.txt");
const EMBEDDED_VIRTUAL_KEYS: &str = include_str!("../../data/virtual_keys.txt");

static EMPTY_ENTRY: KeyTableEntry = KeyTableEntry {
    logical_key_id: 0,
    name_library_a: String::new(),
    name_library_b: String::new(),
    name_library_c: String::new(),
};

static EMPTY_NAMES: VirtualKeyNames = VirtualKeyNames {
    raw: String::new(),
    common: String::new(),
};

/// One row of the scan-code table.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KeyTableEntry {
    /// Library-independent key id (the USB HID keyboard usage in the embedded
    /// table).  Zero or negative means the key has no canonical id.
    pub logical_key_id: i32,
    /// SFML scancode name.
    pub name_library_a: String,
    /// raylib key name.
    pub name_library_b: String,
    /// GLFW key name.
    pub name_library_c: String,
}

impl KeyTableEntry {
    /// The key's name in `library`.
    pub fn name_in(&self, library: Library) -> &str {
        match library {
            Library::Sfml => &self.name_library_a,
            Library::Raylib => &self.name_library_b,
            Library::Glfw => &self.name_library_c,
        }
    }

    /// The logical key id, or `None` if the key has no canonical id.
    pub fn key_id(&self) -> Option<i32> {
        (self.logical_key_id > 0).then_some(self.logical_key_id)
    }
}

/// One row of the virtual-key table.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VirtualKeyNames {
    /// OS constant name, e.g. `VK_LSHIFT`.
    pub raw: String,
    /// Human-readable name, e.g. `Left Shift`.
    pub common: String,
}

/// The input libraries whose key names the scan-code table carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Library {
    #[default]
    Sfml,
    Raylib,
    Glfw,
}

impl Library {
    /// Display name used in column headers.
    pub fn title(self) -> &'static str {
        match self {
            Library::Sfml => "SFML",
            Library::Raylib => "raylib",
            Library::Glfw => "GLFW",
        }
    }
}

impl fmt::Display for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Library::Sfml => "sfml",
            Library::Raylib => "raylib",
            Library::Glfw => "glfw",
        })
    }
}

/// Error returned when a string names no known [`Library`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown library {0:?} (expected sfml, raylib or glfw)")]
pub struct UnknownLibrary(pub String);

impl FromStr for Library {
    type Err = UnknownLibrary;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sfml" => Ok(Library::Sfml),
            "raylib" => Ok(Library::Raylib),
            "glfw" => Ok(Library::Glfw),
            _ => Err(UnknownLibrary(s.to_string())),
        }
    }
}

/// Scan-code lookup code → [`KeyTableEntry`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanCodeTable {
    pub(crate) entries: BTreeMap<u16, KeyTableEntry>,
}

impl ScanCodeTable {
    /// Exact-match lookup with no fallback.
    pub fn get(&self, code: u16) -> Option<&KeyTableEntry> {
        self.entries.get(&code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Virtual-key code → [`VirtualKeyNames`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VirtualKeyTable {
    pub(crate) entries: BTreeMap<u16, VirtualKeyNames>,
}

impl VirtualKeyTable {
    /// Exact-match lookup with no fallback.
    pub fn get(&self, virtual_key: u16) -> Option<&VirtualKeyNames> {
        self.entries.get(&virtual_key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Everything known about one event, ready for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyDescription<'a> {
    pub event: NormalizedKeyEvent,
    /// The code the scan-code table was indexed with.
    pub lookup_code: u16,
    pub key: &'a KeyTableEntry,
    pub virtual_key: &'a VirtualKeyNames,
}

/// The pair of key-name tables plus fallback-aware lookups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyTables {
    scan_codes: ScanCodeTable,
    virtual_keys: VirtualKeyTable,
}

impl KeyTables {
    pub fn new(scan_codes: ScanCodeTable, virtual_keys: VirtualKeyTable) -> Self {
        Self {
            scan_codes,
            virtual_keys,
        }
    }

    /// Parses both tables from text, logging any repaired lines.
    pub fn from_text(scan_codes: &str, virtual_keys: &str) -> Self {
        Self::new(
            load_scan_code_table(scan_codes),
            load_virtual_key_table(virtual_keys),
        )
    }

    /// The tables compiled into the crate, parsed on first use.
    pub fn embedded() -> &'static KeyTables {
        static TABLES: OnceLock<KeyTables> = OnceLock::new();
        TABLES.get_or_init(|| KeyTables::from_text(EMBEDDED_SCAN_CODES, EMBEDDED_VIRTUAL_KEYS))
    }

    /// Raw text of the embedded tables, scan codes first.
    pub fn embedded_text() -> (&'static str, &'static str) {
        (EMBEDDED_SCAN_CODES, EMBEDDED_VIRTUAL_KEYS)
    }

    pub fn scan_codes(&self) -> &ScanCodeTable {
        &self.scan_codes
    }

    pub fn virtual_keys(&self) -> &VirtualKeyTable {
        &self.virtual_keys
    }

    /// Scan-code row for `event`, falling back to the `0x000` sentinel row.
    pub fn lookup_scan_code(&self, event: &NormalizedKeyEvent) -> &KeyTableEntry {
        self.scan_codes
            .get(event.lookup_code())
            .or_else(|| self.scan_codes.get(SCAN_CODE_SENTINEL))
            .unwrap_or(&EMPTY_ENTRY)
    }

    /// Virtual-key row for `event`, falling back to the `0xFF` sentinel row.
    pub fn lookup_virtual_key(&self, event: &NormalizedKeyEvent) -> &VirtualKeyNames {
        self.virtual_keys
            .get(u16::from(event.virtual_key))
            .or_else(|| self.virtual_keys.get(VIRTUAL_KEY_SENTINEL))
            .unwrap_or(&EMPTY_NAMES)
    }

    /// Both lookups for `event` in one value.
    pub fn describe(&self, event: &NormalizedKeyEvent) -> KeyDescription<'_> {
        KeyDescription {
            event: *event,
            lookup_code: event.lookup_code(),
            key: self.lookup_scan_code(event),
            virtual_key: self.lookup_virtual_key(event),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::event::AdjustmentFlags;

    fn event(make_code: u8, virtual_key: u8, extended_lookup: bool) -> NormalizedKeyEvent {
        NormalizedKeyEvent {
            make_code,
            flags: 0,
            virtual_key,
            adjustments: AdjustmentFlags {
                extended_lookup,
                ..AdjustmentFlags::default()
            },
        }
    }

    fn small_tables() -> KeyTables {
        KeyTables::from_text(
            "000=0,Unknown,KEY_NULL,GLFW_KEY_UNKNOWN\n1E=4,Scan::A,KEY_A,GLFW_KEY_A\n",
            "41=VK_A,A\nFF=VK__none_,Unknown\n",
        )
    }

    // ── Scan-code lookup ──────────────────────────────────────────────────────

    #[test]
    fn test_lookup_scan_code_exact_match() {
        let tables = small_tables();
        let entry = tables.lookup_scan_code(&event(0x1E, 0x41, false));
        assert_eq!(entry.name_library_a, "Scan::A");
        assert_eq!(entry.logical_key_id, 4);
    }

    #[test]
    fn test_lookup_scan_code_miss_returns_sentinel_row() {
        let tables = small_tables();
        let entry = tables.lookup_scan_code(&event(0x1E, 0x41, true));
        assert_eq!(entry.name_library_a, "Unknown");
    }

    #[test]
    fn test_lookup_scan_code_without_sentinel_returns_empty_entry() {
        let tables = KeyTables::from_text("1E=4,A,B,C\n", "");
        let entry = tables.lookup_scan_code(&event(0x30, 0, false));
        assert_eq!(entry, &KeyTableEntry::default());
    }

    #[test]
    fn test_malformed_table_line_keeps_sentinel_fallback() {
        // Arrange: a bad key after the sentinel row
        let tables = KeyTables::from_text(
            "000=0,Scan::Unknown,KEY_NULL,GLFW_KEY_UNKNOWN\n1E=4,Scan::A,KEY_A,GLFW_KEY_A\nzz=1,A,B,C\n",
            "FF=VK__none_,Unknown\n",
        );

        // Act
        let entry = tables.lookup_scan_code(&event(0x30, 0x42, false));

        // Assert
        assert_eq!(entry.name_library_a, "Scan::Unknown");
        assert_eq!(entry.logical_key_id, 0);
    }

    // ── Virtual-key lookup ────────────────────────────────────────────────────

    #[test]
    fn test_lookup_virtual_key_exact_match_and_sentinel() {
        let tables = small_tables();
        assert_eq!(tables.lookup_virtual_key(&event(0, 0x41, false)).raw, "VK_A");
        assert_eq!(tables.lookup_virtual_key(&event(0, 0x07, false)).common, "Unknown");
    }

    #[test]
    fn test_lookup_virtual_key_on_empty_table_returns_empty_names() {
        let tables = KeyTables::default();
        let names = tables.lookup_virtual_key(&event(0, 0x41, false));
        assert!(names.raw.is_empty());
        assert!(names.common.is_empty());
    }

    // ── Embedded tables ───────────────────────────────────────────────────────

    #[test]
    fn test_embedded_tables_parse_without_warnings() {
        let (scan_text, vk_text) = KeyTables::embedded_text();
        let (_, scan_warnings) = parse_scan_code_table(scan_text);
        let (_, vk_warnings) = parse_virtual_key_table(vk_text);
        assert!(scan_warnings.is_empty(), "{scan_warnings:?}");
        assert!(vk_warnings.is_empty(), "{vk_warnings:?}");
    }

    #[test]
    fn test_embedded_tables_contain_both_sentinels() {
        let tables = KeyTables::embedded();
        assert!(tables.scan_codes().get(SCAN_CODE_SENTINEL).is_some());
        assert_eq!(
            tables.virtual_keys().get(VIRTUAL_KEY_SENTINEL).map(|n| n.common.as_str()),
            Some("Unknown")
        );
    }

    #[test]
    fn test_embedded_pause_and_numlock_rows_differ() {
        let tables = KeyTables::embedded();
        assert_eq!(tables.lookup_scan_code(&event(0x45, 0x13, false)).name_library_c, "GLFW_KEY_PAUSE");
        assert_eq!(tables.lookup_scan_code(&event(0x45, 0x90, true)).name_library_c, "GLFW_KEY_NUM_LOCK");
    }

    #[test]
    fn test_embedded_right_control_uses_extended_row() {
        let entry = KeyTables::embedded().lookup_scan_code(&event(0x1D, 0xA3, true));
        assert_eq!(entry.name_library_b, "KEY_RIGHT_CONTROL");
        assert_eq!(entry.logical_key_id, 228);
    }

    #[test]
    fn test_describe_bundles_both_lookups() {
        let tables = small_tables();
        let description = tables.describe(&event(0x1E, 0x41, false));
        assert_eq!(description.lookup_code, 0x01E);
        assert_eq!(description.key.name_in(Library::Glfw), "GLFW_KEY_A");
        assert_eq!(description.virtual_key.common, "A");
    }

    // ── Library ───────────────────────────────────────────────────────────────

    #[test]
    fn test_library_parses_case_insensitively() {
        assert_eq!("SFML".parse::<Library>(), Ok(Library::Sfml));
        assert_eq!("raylib".parse::<Library>(), Ok(Library::Raylib));
        assert_eq!("Glfw".parse::<Library>(), Ok(Library::Glfw));
        assert!("sdl".parse::<Library>().is_err());
    }

    #[test]
    fn test_key_id_is_none_for_non_positive_ids() {
        let mut entry = KeyTableEntry::default();
        assert_eq!(entry.key_id(), None);
        entry.logical_key_id = -1;
        assert_eq!(entry.key_id(), None);
        entry.logical_key_id = 4;
        assert_eq!(entry.key_id(), Some(4));
    }
}
