use cpu_analyzer::output::write_capture;
use cpu_analyzer::parser::{group_by_thread, read_capture, Capture, Snapshot, TargetInfo};
use cpu_analyzer::utils::error::ParseError;

#[test]
fn test_read_capture_written_by_record() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("runs/capture.json");
    let capture = Capture {
        version: "1.0.0".to_string(),
        target: Some(TargetInfo {
            pid: 4242,
            name: Some("indexer".to_string()),
        }),
        samples: 2,
        interval_ms: 500,
        time_unit: "clock_ticks".to_string(),
        captured_at: "2026-01-01T00:00:00Z".to_string(),
        snapshots: vec![
            Snapshot::new(1, 1, 2, vec!["main".to_string(), "poll".to_string()]),
            Snapshot::new(1, 3, 4, vec!["main".to_string(), "poll".to_string()]),
        ],
    };

    write_capture(&capture, &path).unwrap();
    let loaded = read_capture(&path).unwrap();

    assert_eq!(loaded.target, capture.target);
    assert_eq!(loaded.interval_ms, 500);
    assert_eq!(loaded.snapshots, capture.snapshots);
}

#[test]
fn test_read_capture_alternate_field_name() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("capture.json");
    std::fs::write(
        &path,
        r#"{"records": [
            {"tid": 3, "kernel": 0, "user": 1, "frames": ["a"]},
            {"tid": 3, "kernel": 0, "user": 4, "frames": ["a"]}
        ]}"#,
    )
    .unwrap();

    let capture = read_capture(&path).unwrap();
    let threads = group_by_thread(capture.snapshots);

    assert_eq!(threads[&3].len(), 2);
    assert_eq!(threads[&3][1].user_time, 4);
    assert_eq!(capture.time_unit, "unknown");
}

#[test]
fn test_read_capture_errors() {
    let temp_dir = tempfile::tempdir().unwrap();

    assert!(matches!(
        read_capture(temp_dir.path().join("missing.json")),
        Err(ParseError::IoError(_))
    ));

    let garbage = temp_dir.path().join("garbage.json");
    std::fs::write(&garbage, "{ not json").unwrap();
    assert!(matches!(read_capture(&garbage), Err(ParseError::JsonError(_))));

    let empty = temp_dir.path().join("empty.json");
    std::fs::write(&empty, r#"{"snapshots": []}"#).unwrap();
    assert!(matches!(read_capture(&empty), Err(ParseError::EmptyCapture)));
}
