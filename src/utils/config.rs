//! Configuration and constants for the CLI.

use std::time::Duration;

/// Current report and capture schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Separator used when rendering a stack suffix to text.
/// Fingerprints are computed over the rendered text, so changing this
/// changes every fingerprint.
pub const FRAME_SEPARATOR: &str = "\n";

/// Separator used for collapsed (folded) stack lines fed to the flamegraph
pub const COLLAPSED_SEPARATOR: char = ';';

/// Marker printed in place of a stack identical to the previous sample
pub const UNCHANGED_MARKER: &str = "<skipped>";

// Sampling defaults match the classic tool: 10 samples, one per second
pub const DEFAULT_SAMPLES: usize = 10;
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(1000);
pub const MAX_SAMPLES: usize = 10_000;
pub const MAX_INTERVAL_MS: u64 = 3_600_000;

/// Number of cost groups shown by default
pub const DEFAULT_TOP_GROUPS: usize = 20;
pub const MAX_TOP_GROUPS: usize = 1000;

/// Unit of the kernel/user counters produced by the procfs sampler
pub const PROCFS_TIME_UNIT: &str = "clock_ticks";

/// Root of the proc filesystem
pub const PROC_ROOT: &str = "/proc";

// Field names accepted when parsing capture files
pub const SNAPSHOT_FIELD_NAMES: &[&str] = &["snapshots", "samples_data", "records"];
