//! Snapshot sources.
//!
//! A `Sampler` produces one snapshot per live thread each time it is
//! asked. `collect_snapshots` drives a sampler for a fixed number of ticks
//! and returns the flat arrival-ordered stream the analysis consumes.

pub mod procfs;

pub use procfs::{resolve_target, resolve_target_in, ProcfsSampler};

use crate::parser::schema::Snapshot;
use crate::utils::config::{DEFAULT_INTERVAL, DEFAULT_SAMPLES};
use crate::utils::error::SampleError;
use log::{debug, info, warn};
use std::time::Duration;

/// A source of per-tick thread snapshots
pub trait Sampler {
    /// Take one tick: one snapshot per live thread
    fn sample(&mut self) -> Result<Vec<Snapshot>, SampleError>;
}

/// How many ticks to take and how far apart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamplingConfig {
    pub samples: usize,
    pub interval: Duration,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            samples: DEFAULT_SAMPLES,
            interval: DEFAULT_INTERVAL,
        }
    }
}

/// Drive a sampler for `config.samples` ticks
///
/// **Public** - main entry point for sampling
///
/// # Returns
/// Snapshots in arrival order
///
/// # Errors
/// Only a failure on the very first tick is an error. A later failure
/// (typically the target exiting) ends sampling early with what was
/// collected so far.
pub fn collect_snapshots<S: Sampler + ?Sized>(
    sampler: &mut S,
    config: &SamplingConfig,
) -> Result<Vec<Snapshot>, SampleError> {
    info!(
        "Taking {} samples every {} ms",
        config.samples,
        config.interval.as_millis()
    );

    let mut snapshots = Vec::new();

    for tick in 0..config.samples {
        match sampler.sample() {
            Ok(batch) => {
                debug!("Sample {}/{}: {} threads", tick + 1, config.samples, batch.len());
                snapshots.extend(batch);
            }
            Err(e) if tick > 0 => {
                warn!("Sampling stopped after {} of {} samples: {}", tick, config.samples, e);
                break;
            }
            Err(e) => return Err(e),
        }

        if tick + 1 < config.samples {
            std::thread::sleep(config.interval);
        }
    }

    Ok(snapshots)
}
