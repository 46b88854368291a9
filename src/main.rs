//! CPU Analyzer CLI
//!
//! Samples the threads of a running process and reports where its CPU
//! time went, as ranked stacks, per-thread traces and flamegraphs.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use cpu_analyzer::commands::{
    display_schema, display_version, execute_analyze, execute_record, validate_analyze_args,
    validate_file, validate_record_args, AnalyzeArgs, OutputArgs, RecordArgs,
};
use cpu_analyzer::flamegraph::FlamegraphConfig;
use cpu_analyzer::utils::config::{DEFAULT_SAMPLES, DEFAULT_TOP_GROUPS};

/// CPU Analyzer - sampling CPU hotspot analysis
#[derive(Parser, Debug)]
#[command(name = "cpu-analyzer")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Report outputs shared by record and analyze
#[derive(clap::Args, Debug)]
struct ReportFlags {
    /// Output path for SVG flamegraph (optional)
    #[arg(short, long)]
    flamegraph: Option<PathBuf>,

    /// Number of top cost groups to include
    #[arg(long, default_value_t = DEFAULT_TOP_GROUPS)]
    top: usize,

    /// Flamegraph title
    #[arg(long)]
    title: Option<String>,

    /// Flamegraph width in pixels
    #[arg(long, default_value = "1200")]
    width: usize,

    /// Print text report to stdout
    #[arg(long)]
    summary: bool,
}

impl ReportFlags {
    fn into_outputs(self, output_json: Option<PathBuf>) -> OutputArgs {
        let flamegraph_config = self.flamegraph.as_ref().map(|_| {
            let mut config = FlamegraphConfig::new();
            if let Some(title) = self.title {
                config = config.with_title(title);
            }
            config.width = self.width;
            config
        });

        OutputArgs {
            output_json,
            output_svg: self.flamegraph,
            top_groups: self.top,
            flamegraph_config,
            print_summary: self.summary,
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Sample a running process and write a capture
    Record {
        /// Process id or exact process name
        target: String,

        /// Number of samples to take
        #[arg(short, long, default_value_t = DEFAULT_SAMPLES)]
        samples: usize,

        /// Interval between samples in milliseconds
        #[arg(short, long, default_value = "1000")]
        interval: u64,

        /// Output path for the capture file
        #[arg(short, long, default_value = "capture.json")]
        output: PathBuf,

        /// Stop the process with SIGSTOP while each sample is read
        #[arg(long)]
        freeze: bool,

        /// Also write an analysis report to this path
        #[arg(long)]
        report: Option<PathBuf>,

        #[command(flatten)]
        flags: ReportFlags,
    },

    /// Analyze a previously recorded capture
    Analyze {
        /// Path to capture JSON file
        #[arg(short, long)]
        input: PathBuf,

        /// Output path for JSON report
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        flags: ReportFlags,
    },

    /// Validate a report or capture JSON file
    Validate {
        /// Path to report or capture JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Record {
            target,
            samples,
            interval,
            output,
            freeze,
            report,
            flags,
        } => {
            let args = RecordArgs {
                target,
                samples,
                interval_ms: interval,
                freeze,
                output_capture: output,
                outputs: flags.into_outputs(report),
            };

            validate_record_args(&args)?;
            execute_record(args)?;
        }

        Commands::Analyze {
            input,
            output,
            flags,
        } => {
            let mut outputs = flags.into_outputs(output);
            // Nothing requested means print the report
            if !outputs.wants_analysis() {
                outputs.print_summary = true;
            }

            let args = AnalyzeArgs { input, outputs };

            validate_analyze_args(&args)?;
            execute_analyze(args)?;
        }

        Commands::Validate { file } => {
            validate_file(file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
