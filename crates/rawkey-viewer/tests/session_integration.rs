//! Integration tests for the viewer pipeline.
//!
//! These tests exercise the application layer end-to-end:
//! input source → `CaptureSession` → rendered rows.

use std::io::Cursor;
use std::path::PathBuf;

use rawkey_core::{unpack, KeyTables, Library, Set1Translator};
use rawkey_viewer::application::capture_session::{CaptureSession, SessionUpdate};
use rawkey_viewer::application::display::NumberFormat;
use rawkey_viewer::infrastructure::input_source::mock::MockInputSource;
use rawkey_viewer::infrastructure::input_source::replay::{ReplayError, ReplayInputSource};
use rawkey_viewer::infrastructure::input_source::InputSource;
use uuid::Uuid;

const TYPING_TRACE: &str = "\
# Shift+A, Right Ctrl, Pause, Num Lock
kbd 2A 00 10
kbd 1E 00 41
kbd 1E 01 41
kbd 2A 01 10
kbd 1D 02 11
kbd 1D 04 13
kbd 45 00 90
kbd 45 00 90
";

fn run(source: &dyn InputSource, adjust: bool) -> CaptureSession<'static, Set1Translator> {
    let mut session = CaptureSession::new(KeyTables::embedded(), Set1Translator::new(), adjust);
    let rx = source.start().expect("start should succeed");
    for record in rx {
        session.handle(record);
    }
    session
}

#[test]
fn test_replayed_trace_renders_expected_rows() {
    // Arrange
    let source = ReplayInputSource::from_reader(Cursor::new(TYPING_TRACE)).unwrap();

    // Act
    let session = run(&source, true);
    let rows = session.rows(Library::Raylib, NumberFormat::Hex);

    // Assert: the E1 prefix is the only record swallowed
    let names: Vec<_> = rows.iter().map(|r| r.library_name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "KEY_LEFT_SHIFT",
            "KEY_A",
            "KEY_A",
            "KEY_LEFT_SHIFT",
            "KEY_RIGHT_CONTROL",
            "KEY_PAUSE",
            "KEY_NUM_LOCK",
        ]
    );
    assert!(!rows[2].key_down);
    assert_eq!(rows[4].vk_name, "VK_RCONTROL");
    assert_eq!(rows[5].key, "Pause");
    assert!(rows[5].virtual_key_adjusted);
    assert_eq!(rows[6].key, "Num Lock");
}

#[test]
fn test_replayed_trace_without_adjustment_keeps_every_record() {
    let source = ReplayInputSource::from_reader(Cursor::new(TYPING_TRACE)).unwrap();

    let session = run(&source, false);

    assert_eq!(session.log().len(), 8);
    let generic_shift = unpack(session.log()[0]);
    assert_eq!(generic_shift.virtual_key, 0x10);
    assert!(!generic_shift.adjustments.virtual_key_adjusted);
}

#[test]
fn test_mock_source_right_button_up_clears_session() {
    // Arrange
    let source = MockInputSource::new();
    let mut session = CaptureSession::new(KeyTables::embedded(), Set1Translator::new(), true);
    let rx = source.start().expect("start should succeed");

    // Act: A, right click, B
    source.inject_trace("kbd 1E 00 41\nmouse 8\nkbd 30 00 42\n");
    source.stop();
    let updates: Vec<_> = rx.iter().map(|record| session.handle(record)).collect();

    // Assert
    assert_eq!(updates[1], SessionUpdate::Cleared);
    assert_eq!(session.log().len(), 1);
    assert_eq!(
        session.rows(Library::Sfml, NumberFormat::Hex)[0].library_name,
        "Scan::B"
    );
}

#[test]
fn test_trace_file_is_read_from_disk() {
    // Arrange
    let dir = std::env::temp_dir().join(format!("rawkey_test_{}", Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    let path: PathBuf = dir.join("keys.trace");
    std::fs::write(&path, "kbd 0x1E 0x00 0x41\n").unwrap();

    // Act
    let source = ReplayInputSource::from_path(&path).expect("trace must parse");
    let session = run(&source, true);

    // Assert
    assert_eq!(session.log(), &[0x0041_001E]);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_missing_trace_file_is_io_error() {
    let path = std::env::temp_dir().join(format!("rawkey_missing_{}.trace", Uuid::new_v4()));
    assert!(matches!(
        ReplayInputSource::from_path(&path),
        Err(ReplayError::Io(_))
    ));
}
