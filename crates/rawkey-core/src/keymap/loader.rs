//! Parsers for the textual key-mapping tables.
//!
//! Both tables are line oriented:
//!
//! ```text
//! scan-code table:  <hex-scancode>=<dec-logical-id>,<nameA>,<nameB>,<nameC>
//! vkey table:       <hex-vkey>=<nameRaw>,<nameCommon>
//! ```
//!
//! Parsing is permissive.  Trailing whitespace is trimmed, empty lines are
//! skipped, a numeric field that does not parse becomes `0`, missing name
//! fields become empty strings, and a later line for the same key replaces
//! the earlier one.  A line whose key does not parse is stored under the
//! value of its leading digits only when that slot is still free, so it can
//! never displace a sentinel row.  A bad line therefore degrades a single
//! entry and never the whole table.  Every such repair is reported as a [`TableWarning`] so a
//! corrupted table does not go unnoticed.

use std::collections::btree_map::{BTreeMap, Entry};

use tracing::warn;

use super::{KeyTableEntry, ScanCodeTable, VirtualKeyNames, VirtualKeyTable};

/// What was wrong with a table line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableWarningKind {
    /// The key before `=` is not a hexadecimal number; the entry was stored
    /// under the value of its leading digits (usually `0`) unless that key
    /// already had an entry, in which case the line was dropped.
    #[error("key {0:?} is not a hexadecimal number")]
    MalformedKey(String),

    /// The logical key id is not a decimal number; it was stored as the value
    /// of its leading digits (usually `0`).
    #[error("logical key id {0:?} is not a decimal number")]
    MalformedKeyId(String),

    /// An earlier line defined the same key; this line replaced it.
    #[error("duplicate key 0x{0:03X} replaces an earlier entry")]
    DuplicateKey(u16),
}

/// A recovered problem on one line of a table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}: {kind}")]
pub struct TableWarning {
    /// 1-based line number in the source text.
    pub line: usize,
    pub kind: TableWarningKind,
}

/// Parses the scan-code table and logs every warning.
pub fn load_scan_code_table(text: &str) -> ScanCodeTable {
    let (table, warnings) = parse_scan_code_table(text);
    log_warnings("scan-code", &warnings);
    table
}

/// Parses the virtual-key table and logs every warning.
pub fn load_virtual_key_table(text: &str) -> VirtualKeyTable {
    let (table, warnings) = parse_virtual_key_table(text);
    log_warnings("virtual-key", &warnings);
    table
}

/// Parses the scan-code table, returning the repairs it had to make.
pub fn parse_scan_code_table(text: &str) -> (ScanCodeTable, Vec<TableWarning>) {
    let mut entries = BTreeMap::new();
    let mut warnings = Vec::new();

    for (line, content) in significant_lines(text) {
        let (key_text, rest) = split_once(content, '=');
        let (id_text, rest) = split_once(rest, ',');
        let (name_a, rest) = split_once(rest, ',');
        let (name_b, name_c) = split_once(rest, ',');

        let (key, key_ok) = parse_key(key_text, line, &mut warnings);

        let (logical_key_id, id_ok) = parse_leading_integer(id_text, 10);
        if !id_ok {
            warnings.push(TableWarning {
                line,
                kind: TableWarningKind::MalformedKeyId(id_text.to_string()),
            });
        }

        let entry = KeyTableEntry {
            logical_key_id: logical_key_id as i32,
            name_library_a: name_a.to_string(),
            name_library_b: name_b.to_string(),
            name_library_c: name_c.to_string(),
        };
        store(&mut entries, key, key_ok, entry, line, &mut warnings);
    }

    (ScanCodeTable { entries }, warnings)
}

/// Parses the virtual-key table, returning the repairs it had to make.
pub fn parse_virtual_key_table(text: &str) -> (VirtualKeyTable, Vec<TableWarning>) {
    let mut entries = BTreeMap::new();
    let mut warnings = Vec::new();

    for (line, content) in significant_lines(text) {
        let (key_text, rest) = split_once(content, '=');
        let (raw, common) = split_once(rest, ',');

        let (key, key_ok) = parse_key(key_text, line, &mut warnings);
        let names = VirtualKeyNames {
            raw: raw.to_string(),
            common: common.to_string(),
        };
        store(&mut entries, key, key_ok, names, line, &mut warnings);
    }

    (VirtualKeyTable { entries }, warnings)
}

fn log_warnings(table: &str, warnings: &[TableWarning]) {
    for warning in warnings {
        warn!(table, "{warning}");
    }
}

/// Returns the key and whether it was well formed.
fn parse_key(text: &str, line: usize, warnings: &mut Vec<TableWarning>) -> (u16, bool) {
    let (key, ok) = parse_leading_integer(text, 16);
    if !ok {
        warnings.push(TableWarning {
            line,
            kind: TableWarningKind::MalformedKey(text.to_string()),
        });
    }
    (key as u16, ok)
}

/// Inserts one row.  A well-formed key replaces an earlier row and reports
/// the duplicate; a malformed key only fills a free slot.
fn store<V>(
    entries: &mut BTreeMap<u16, V>,
    key: u16,
    key_ok: bool,
    value: V,
    line: usize,
    warnings: &mut Vec<TableWarning>,
) {
    match entries.entry(key) {
        Entry::Vacant(slot) => {
            slot.insert(value);
        }
        Entry::Occupied(mut slot) if key_ok => {
            slot.insert(value);
            warnings.push(TableWarning {
                line,
                kind: TableWarningKind::DuplicateKey(key),
            });
        }
        Entry::Occupied(_) => {}
    }
}

/// Yields `(line_number, content)` for every non-empty line, with trailing
/// whitespace removed.
fn significant_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.split('\n')
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim_end()))
        .filter(|(_, line)| !line.is_empty())
}

/// Splits at the first `separator`; a missing separator yields an empty tail.
fn split_once(text: &str, separator: char) -> (&str, &str) {
    text.split_once(separator).unwrap_or((text, ""))
}

/// Parses the integer at the start of `text` the way C's `strtoll` does:
/// leading whitespace, an optional sign, an optional `0x` prefix in base 16,
/// then as many digits as are present.
///
/// Returns the value (0 when there are no digits) and whether the whole field
/// was a well-formed number.
fn parse_leading_integer(text: &str, radix: u32) -> (i64, bool) {
    let trimmed = text.trim_start();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits = if radix == 16 {
        unsigned
            .strip_prefix("0x")
            .or_else(|| unsigned.strip_prefix("0X"))
            .unwrap_or(unsigned)
    } else {
        unsigned
    };

    let end = digits
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(digits.len());
    if end == 0 {
        return (0, false);
    }

    let magnitude = digits[..end]
        .chars()
        .filter_map(|c| c.to_digit(radix))
        .fold(0i64, |acc, d| acc.saturating_mul(i64::from(radix)).saturating_add(i64::from(d)));
    let value = if negative { -magnitude } else { magnitude };
    (value, end == digits.len())
}
