use crate::flamegraph::FlamegraphConfig;
use crate::utils::config::{DEFAULT_INTERVAL, DEFAULT_SAMPLES, DEFAULT_TOP_GROUPS};
use std::path::PathBuf;

/// What to produce once a capture has been analyzed
///
/// **Public** - shared by record and analyze
#[derive(Debug, Clone)]
pub struct OutputArgs {
    /// Output path for JSON report (optional)
    pub output_json: Option<PathBuf>,

    /// Output path for SVG flamegraph (optional)
    pub output_svg: Option<PathBuf>,

    /// Number of top cost groups to include in the report
    pub top_groups: usize,

    /// Flamegraph configuration
    pub flamegraph_config: Option<FlamegraphConfig>,

    /// Print text report to stdout
    pub print_summary: bool,
}

impl OutputArgs {
    /// True when any analysis output was requested
    pub fn wants_analysis(&self) -> bool {
        self.output_json.is_some() || self.output_svg.is_some() || self.print_summary
    }
}

impl Default for OutputArgs {
    fn default() -> Self {
        Self {
            output_json: None,
            output_svg: None,
            top_groups: DEFAULT_TOP_GROUPS,
            flamegraph_config: None,
            print_summary: false,
        }
    }
}

/// Arguments for the record command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct RecordArgs {
    /// Process id or exact process name
    pub target: String,

    /// Number of sampling ticks
    pub samples: usize,

    /// Interval between ticks in milliseconds
    pub interval_ms: u64,

    /// Stop the process while each tick is read
    pub freeze: bool,

    /// Output path for the capture file
    pub output_capture: PathBuf,

    pub outputs: OutputArgs,
}

impl Default for RecordArgs {
    fn default() -> Self {
        Self {
            target: String::new(),
            samples: DEFAULT_SAMPLES,
            interval_ms: DEFAULT_INTERVAL.as_millis() as u64,
            freeze: false,
            output_capture: PathBuf::from("capture.json"),
            outputs: OutputArgs::default(),
        }
    }
}

/// Arguments for the analyze command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct AnalyzeArgs {
    /// Capture file to analyze
    pub input: PathBuf,

    pub outputs: OutputArgs,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::from("capture.json"),
            outputs: OutputArgs {
                print_summary: true,
                ..OutputArgs::default()
            },
        }
    }
}
