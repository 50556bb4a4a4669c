mod display;
mod metrics;
mod priority;
mod process;
mod report;
mod round_robin;
mod runner;
mod schedule;
mod shortest_job_first;
mod simulation;

use crate::error::SchedulerError;
use std::collections::HashSet;

pub use metrics::{Makespan, Metrics};
pub use priority::PreemptivePriorityScheduler;
pub use process::Process;
pub use report::PolicyReport;
pub use round_robin::RoundRobinScheduler;
pub use runner::ReportViewer;
pub use schedule::{Schedule, Slice};
pub use shortest_job_first::ShortestJobFirstScheduler;
pub use simulation::{reference_workload, Policy, Simulation};

pub const DEFAULT_QUANTUM: u64 = 2;

pub trait Scheduler {
    const NAME: &'static str;

    /// Simulates the policy over its own copy of `processes`; the caller's
    /// records are left untouched.
    fn schedule(&self, processes: &[Process]) -> Result<Schedule, SchedulerError>;
}

/// Validates the input of a run and returns fresh copies to mutate.
///
/// No policy lets the clock pass the latest arrival plus the total burst, so
/// bounding that sum keeps every clock update in range.
fn snapshot(processes: &[Process]) -> Result<Vec<Process>, SchedulerError> {
    let latest_arrival = processes.iter().map(Process::arrival_time).max().unwrap_or(0);
    processes
        .iter()
        .try_fold(latest_arrival, |horizon, process| {
            horizon.checked_add(process.burst_time())
        })
        .ok_or(SchedulerError::ClockOverflow)?;

    let mut seen = HashSet::with_capacity(processes.len());
    processes
        .iter()
        .map(|process| {
            if process.burst_time() == 0 {
                return Err(SchedulerError::InvalidBurst { pid: process.pid() });
            }
            if !seen.insert(process.pid()) {
                return Err(SchedulerError::DuplicateProcess(process.pid()));
            }
            let mut copy = process.clone();
            copy.reset();
            Ok(copy)
        })
        .collect()
}
