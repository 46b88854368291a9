//! Capture file parser.
//!
//! Parses raw capture JSON into a `Capture` and groups its flat snapshot
//! stream per thread for the analysis pipeline.

use super::schema::{Capture, Snapshot, TargetInfo, ThreadSnapshots};
use crate::utils::config::{SCHEMA_VERSION, SNAPSHOT_FIELD_NAMES};
use crate::utils::error::ParseError;
use log::{debug, warn};
use std::path::Path;

/// Parse raw capture JSON
///
/// **Public** - main entry point for parsing
///
/// # Arguments
/// * `raw` - Either a capture object or a bare array of snapshots
///
/// # Returns
/// Capture with every well-formed snapshot
///
/// # Errors
/// * `ParseError::InvalidFormat` - Not an object/array, or every snapshot malformed
/// * `ParseError::EmptyCapture` - No snapshots at all
pub fn parse_capture(raw: &serde_json::Value) -> Result<Capture, ParseError> {
    let capture = match raw {
        serde_json::Value::Object(obj) => {
            let snapshots = extract_snapshots(obj)?;
            Capture {
                version: obj
                    .get("version")
                    .and_then(|v| v.as_str())
                    .unwrap_or(SCHEMA_VERSION)
                    .to_string(),
                target: obj
                    .get("target")
                    .and_then(|v| serde_json::from_value::<TargetInfo>(v.clone()).ok()),
                samples: obj
                    .get("samples")
                    .and_then(|v| v.as_u64())
                    .and_then(|n| usize::try_from(n).ok())
                    .unwrap_or(0),
                interval_ms: obj.get("interval_ms").and_then(|v| v.as_u64()).unwrap_or(0),
                time_unit: obj
                    .get("time_unit")
                    .and_then(|v| v.as_str())
                    .unwrap_or("unknown")
                    .to_string(),
                captured_at: obj
                    .get("captured_at")
                    .and_then(|v| v.as_str())
                    .unwrap_or_default()
                    .to_string(),
                snapshots,
            }
        }

        serde_json::Value::Array(items) => {
            debug!("Capture is a bare snapshot array");
            Capture {
                version: SCHEMA_VERSION.to_string(),
                target: None,
                samples: 0,
                interval_ms: 0,
                time_unit: "unknown".to_string(),
                captured_at: String::new(),
                snapshots: parse_snapshots_array(items)?,
            }
        }

        _ => {
            return Err(ParseError::InvalidFormat(
                "Capture must be a JSON object or array".to_string(),
            ))
        }
    };

    if capture.snapshots.is_empty() {
        return Err(ParseError::EmptyCapture);
    }

    debug!("Parsed capture with {} snapshots", capture.snapshots.len());
    Ok(capture)
}

/// Read and parse a capture file
///
/// **Public** - used by the analyze command
pub fn read_capture(input_path: impl AsRef<Path>) -> Result<Capture, ParseError> {
    let input_path = input_path.as_ref();
    debug!("Reading capture from: {}", input_path.display());

    let file = std::fs::File::open(input_path)?;
    let raw: serde_json::Value = serde_json::from_reader(std::io::BufReader::new(file))?;
    parse_capture(&raw)
}

/// Group an arrival-ordered snapshot stream by thread
///
/// **Public** - produces the analysis input mapping
///
/// Order within each thread is the order snapshots arrive in.
pub fn group_by_thread(snapshots: impl IntoIterator<Item = Snapshot>) -> ThreadSnapshots {
    let mut threads = ThreadSnapshots::new();
    for snapshot in snapshots {
        threads.entry(snapshot.thread_id).or_default().push(snapshot);
    }
    threads
}

/// Check that a JSON value looks like a capture without fully parsing it
///
/// **Public** - cheap pre-flight used by the validate command
pub fn validate_capture_format(raw: &serde_json::Value) -> bool {
    match raw {
        serde_json::Value::Array(_) => true,
        serde_json::Value::Object(obj) => SNAPSHOT_FIELD_NAMES
            .iter()
            .any(|field| obj.get(*field).map(|v| v.is_array()).unwrap_or(false)),
        _ => false,
    }
}

/// Locate the snapshot array inside a capture object
///
/// **Private** - internal extraction logic
fn extract_snapshots(
    obj: &serde_json::Map<String, serde_json::Value>,
) -> Result<Vec<Snapshot>, ParseError> {
    for field in SNAPSHOT_FIELD_NAMES {
        if let Some(items) = obj.get(*field).and_then(|v| v.as_array()) {
            return parse_snapshots_array(items);
        }
    }

    Err(ParseError::InvalidFormat(format!(
        "Missing snapshot array (expected one of: {})",
        SNAPSHOT_FIELD_NAMES.join(", ")
    )))
}

/// Parse array of snapshots, skipping malformed entries
///
/// **Private** - internal parsing logic
fn parse_snapshots_array(items: &[serde_json::Value]) -> Result<Vec<Snapshot>, ParseError> {
    let mut snapshots = Vec::with_capacity(items.len());

    for (index, item) in items.iter().enumerate() {
        match serde_json::from_value::<Snapshot>(item.clone()) {
            Ok(snapshot) => snapshots.push(snapshot),
            Err(e) => {
                // Log but don't fail - partial captures are still useful
                warn!("Failed to parse snapshot {}: {}", index, e);
            }
        }
    }

    if snapshots.is_empty() && !items.is_empty() {
        return Err(ParseError::InvalidFormat(
            "All snapshots failed to parse".to_string(),
        ));
    }

    Ok(snapshots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_capture_object() {
        let raw = json!({
            "version": "1.0.0",
            "target": { "pid": 42, "name": "worker" },
            "samples": 2,
            "interval_ms": 500,
            "time_unit": "clock_ticks",
            "captured_at": "2024-01-01T00:00:00Z",
            "snapshots": [
                { "thread_id": 1, "kernel_time": 1, "user_time": 2, "stack": ["main", "run"] },
                { "thread_id": 1, "kernel_time": 3, "user_time": 4, "stack": ["main"] }
            ]
        });

        let capture = parse_capture(&raw).unwrap();
        assert_eq!(capture.snapshots.len(), 2);
        assert_eq!(capture.target.unwrap().pid, 42);
        assert_eq!(capture.interval_ms, 500);
        assert_eq!(capture.snapshots[0].stack, vec!["main", "run"]);
    }

    #[test]
    fn test_parse_capture_samples_out_of_range() {
        let snapshot = json!({ "thread_id": 1, "kernel_time": 0, "user_time": 0 });
        let negative = json!({ "samples": -3, "snapshots": [snapshot.clone()] });
        let huge = json!({ "samples": u64::MAX, "snapshots": [snapshot] });

        assert_eq!(parse_capture(&negative).unwrap().samples, 0);
        let expected = usize::try_from(u64::MAX).unwrap_or(0);
        assert_eq!(parse_capture(&huge).unwrap().samples, expected);
    }

    #[test]
    fn test_parse_capture_bare_array_with_aliases() {
        let raw = json!([
            { "id": 7, "kernel": 10, "user": 5, "stackTrace": ["a", "b"] }
        ]);

        let capture = parse_capture(&raw).unwrap();
        assert_eq!(capture.snapshots[0].thread_id, 7);
        assert_eq!(capture.snapshots[0].total_time(), 15);
        assert_eq!(capture.version, SCHEMA_VERSION);
    }

    #[test]
    fn test_parse_capture_missing_stack_is_empty() {
        let raw = json!([{ "thread_id": 1, "kernel_time": 0, "user_time": 0 }]);
        let capture = parse_capture(&raw).unwrap();
        assert!(capture.snapshots[0].stack.is_empty());
    }

    #[test]
    fn test_parse_capture_skips_malformed() {
        let raw = json!([
            { "thread_id": "not a number" },
            { "thread_id": 2, "kernel_time": 1, "user_time": 1, "stack": [] }
        ]);

        let capture = parse_capture(&raw).unwrap();
        assert_eq!(capture.snapshots.len(), 1);
        assert_eq!(capture.snapshots[0].thread_id, 2);
    }

    #[test]
    fn test_parse_capture_skips_snapshot_without_counters() {
        let raw = json!([
            { "tid": 1, "kernel": 10, "user": 90, "stack": ["a"] },
            { "thread_id": 1, "stack": ["a"] },
            { "thread_id": 1, "kernel_time": 12 }
        ]);

        let capture = parse_capture(&raw).unwrap();
        assert_eq!(capture.snapshots.len(), 1);
        assert_eq!(capture.snapshots[0].total_time(), 100);
    }

    #[test]
    fn test_parse_capture_all_malformed() {
        let raw = json!([{ "thread_id": "x" }]);
        assert!(matches!(parse_capture(&raw), Err(ParseError::InvalidFormat(_))));
    }

    #[test]
    fn test_parse_capture_empty() {
        assert!(matches!(parse_capture(&json!([])), Err(ParseError::EmptyCapture)));
    }

    #[test]
    fn test_parse_capture_rejects_scalar() {
        assert!(parse_capture(&json!(12)).is_err());
    }

    #[test]
    fn test_group_by_thread_keeps_arrival_order() {
        let snapshots = vec![
            Snapshot::new(2, 0, 0, vec!["x".into()]),
            Snapshot::new(1, 0, 0, vec!["a".into()]),
            Snapshot::new(2, 1, 0, vec!["y".into()]),
        ];

        let threads = group_by_thread(snapshots);
        assert_eq!(threads.keys().copied().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(threads[&2][0].stack, vec!["x"]);
        assert_eq!(threads[&2][1].stack, vec!["y"]);
    }

    #[test]
    fn test_validate_capture_format() {
        assert!(validate_capture_format(&json!({ "snapshots": [] })));
        assert!(validate_capture_format(&json!([])));
        assert!(!validate_capture_format(&json!({ "other": [] })));
    }
}
