//! Linux procfs sampler.
//!
//! Per tick, every task under `/proc/<pid>/task` contributes one snapshot:
//! - `stat` fields 14 and 15 (`utime`, `stime`, in clock ticks)
//! - `stack`, the task's kernel stack (innermost first, usually root-only)
//!
//! A stack that cannot be read becomes an empty stack.

use super::Sampler;
use crate::parser::schema::{Snapshot, TargetInfo};
use crate::utils::config::PROC_ROOT;
use crate::utils::error::SampleError;
use log::{debug, warn};
use nix::errno::Errno;
use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

// Field offsets counted from the state field (field 3) after the comm
const UTIME_OFFSET: usize = 14 - 3;
const STIME_OFFSET: usize = 15 - 3;

/// Samples every thread of one process through procfs
#[derive(Debug, Clone)]
pub struct ProcfsSampler {
    root: PathBuf,
    pid: i32,
    freeze: bool,
}

impl ProcfsSampler {
    pub fn new(pid: i32) -> Self {
        Self::with_root(PROC_ROOT, pid)
    }

    /// Sample from an alternate proc root (used by tests)
    pub fn with_root(root: impl Into<PathBuf>, pid: i32) -> Self {
        Self {
            root: root.into(),
            pid,
            freeze: false,
        }
    }

    /// Stop the process with SIGSTOP while each tick's counters are read
    pub fn with_freeze(mut self, freeze: bool) -> Self {
        self.freeze = freeze;
        self
    }

    fn task_dir(&self) -> PathBuf {
        self.root.join(self.pid.to_string()).join("task")
    }

    fn list_tasks(&self) -> Result<(PathBuf, Vec<u32>), SampleError> {
        let task_dir = self.task_dir();
        let entries = fs::read_dir(&task_dir).map_err(|source| SampleError::ProcRead {
            path: task_dir.display().to_string(),
            source,
        })?;

        let mut tids: Vec<u32> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().to_str().and_then(|s| s.parse().ok()))
            .collect();
        tids.sort_unstable();

        Ok((task_dir, tids))
    }
}

impl Sampler for ProcfsSampler {
    /// One tick over every task of the process
    ///
    /// Kernel stacks are read before the process is frozen: a stopped task
    /// reports the signal-stop path instead of where it was running. Only
    /// the CPU counters are read while frozen.
    fn sample(&mut self) -> Result<Vec<Snapshot>, SampleError> {
        let (task_dir, tids) = self.list_tasks()?;

        let stacks: Vec<(u32, Vec<String>)> = tids
            .into_iter()
            .map(|tid| (tid, read_stack(&task_dir.join(tid.to_string()), tid)))
            .collect();

        let _frozen = if self.freeze {
            Some(FrozenProcess::stop(self.pid)?)
        } else {
            None
        };

        let mut snapshots = Vec::with_capacity(stacks.len());
        for (tid, stack) in stacks {
            match read_counters(&task_dir.join(tid.to_string()), tid) {
                Ok((user_time, kernel_time)) => {
                    snapshots.push(Snapshot::new(tid, kernel_time, user_time, stack))
                }
                Err(SampleError::ProcRead { source, .. }) if task_exited(&source) => {
                    debug!("Task {} exited before it could be read", tid);
                }
                Err(e) => return Err(e),
            }
        }

        if snapshots.is_empty() {
            return Err(SampleError::NoThreads(self.pid));
        }

        Ok(snapshots)
    }
}

/// Read (utime, stime) of one task
fn read_counters(dir: &Path, tid: u32) -> Result<(u64, u64), SampleError> {
    let stat_path = dir.join("stat");
    let stat = fs::read_to_string(&stat_path).map_err(|source| SampleError::ProcRead {
        path: stat_path.display().to_string(),
        source,
    })?;
    parse_stat_times(tid, &stat)
}

/// Read one task's kernel stack, empty when unavailable
fn read_stack(dir: &Path, tid: u32) -> Vec<String> {
    match fs::read_to_string(dir.join("stack")) {
        Ok(text) => parse_kernel_stack(&text),
        Err(e) => {
            debug!("Task {}: kernel stack unavailable ({})", tid, e);
            Vec::new()
        }
    }
}

/// True when a read failed because the task is gone
///
/// **Private** - a task exiting mid-read surfaces as ENOENT or ESRCH
fn task_exited(err: &std::io::Error) -> bool {
    err.kind() == ErrorKind::NotFound || err.raw_os_error() == Some(Errno::ESRCH as i32)
}

/// Keeps a process stopped until dropped
///
/// **Private** - SIGSTOP on creation, SIGCONT on drop
struct FrozenProcess {
    pid: Pid,
}

impl FrozenProcess {
    fn stop(pid: i32) -> Result<Self, SampleError> {
        let pid = Pid::from_raw(pid);
        kill(pid, Signal::SIGSTOP).map_err(|source| SampleError::Signal {
            pid: pid.as_raw(),
            source,
        })?;
        Ok(Self { pid })
    }
}

impl Drop for FrozenProcess {
    fn drop(&mut self) {
        if let Err(e) = kill(self.pid, Signal::SIGCONT) {
            warn!("Failed to resume process {}: {}", self.pid, e);
        }
    }
}

/// Extract (utime, stime) from a `stat` line
///
/// **Public** - the comm field may contain spaces and parentheses, so
/// fields are counted from the last `)`
pub fn parse_stat_times(tid: u32, stat: &str) -> Result<(u64, u64), SampleError> {
    let malformed = |reason: &str| SampleError::MalformedStat {
        tid,
        reason: reason.to_string(),
    };

    let close = stat.rfind(')').ok_or_else(|| malformed("missing comm terminator"))?;
    let fields: Vec<&str> = stat[close + 1..].split_whitespace().collect();

    let field = |offset: usize, name: &str| -> Result<u64, SampleError> {
        fields
            .get(offset)
            .ok_or_else(|| malformed(&format!("missing {}", name)))?
            .parse::<u64>()
            .map_err(|e| malformed(&format!("invalid {}: {}", name, e)))
    };

    Ok((field(UTIME_OFFSET, "utime")?, field(STIME_OFFSET, "stime")?))
}

/// Convert a `stack` file to frames, outermost first
///
/// **Public** - lines look like `[<0>] do_sys_poll+0x3b2/0x5a0`
pub fn parse_kernel_stack(text: &str) -> Vec<String> {
    let mut frames: Vec<String> = text
        .lines()
        .filter_map(|line| {
            let symbol = match line.find("] ") {
                Some(i) => &line[i + 2..],
                None => line,
            };
            let symbol = symbol.split('+').next().unwrap_or(symbol).trim();
            (!symbol.is_empty()).then(|| symbol.to_string())
        })
        .collect();

    // procfs lists the innermost frame first
    frames.reverse();
    frames
}

/// Resolve a pid or process name to a target
///
/// **Public** - numeric input is a pid; otherwise exact `comm` match
pub fn resolve_target(target: &str) -> Result<TargetInfo, SampleError> {
    resolve_target_in(Path::new(PROC_ROOT), target)
}

/// Resolve against an alternate proc root
pub fn resolve_target_in(root: &Path, target: &str) -> Result<TargetInfo, SampleError> {
    if let Ok(pid) = target.parse::<i32>() {
        let dir = root.join(pid.to_string());
        if !dir.is_dir() {
            return Err(SampleError::ProcessNotFound(target.to_string()));
        }
        return Ok(TargetInfo {
            pid,
            name: read_comm(&dir),
        });
    }

    let entries = fs::read_dir(root).map_err(|source| SampleError::ProcRead {
        path: root.display().to_string(),
        source,
    })?;

    let mut matches: Vec<i32> = entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let pid: i32 = entry.file_name().to_str()?.parse().ok()?;
            (read_comm(&entry.path()).as_deref() == Some(target)).then_some(pid)
        })
        .collect();
    matches.sort_unstable();

    match matches.as_slice() {
        [] => Err(SampleError::ProcessNotFound(target.to_string())),
        [pid] => Ok(TargetInfo {
            pid: *pid,
            name: Some(target.to_string()),
        }),
        [pid, ..] => {
            warn!(
                "{} processes are named '{}', sampling the first (pid {})",
                matches.len(),
                target,
                pid
            );
            Ok(TargetInfo {
                pid: *pid,
                name: Some(target.to_string()),
            })
        }
    }
}

fn read_comm(dir: &Path) -> Option<String> {
    fs::read_to_string(dir.join("comm"))
        .ok()
        .map(|s| s.trim_end().to_string())
}
