use super::Process;
use crate::error::SchedulerError;
use serde::Serialize;
use std::{fmt, str::FromStr};

/// How the end of a workload is determined for utilization and throughput.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Makespan {
    /// Completion time of the last process in the sequence as passed in.
    ///
    /// Matches the historical report output. When the sequence is not sorted
    /// by completion time this understates the makespan, and utilization can
    /// exceed 100%.
    #[default]
    LastListed,
    /// Latest completion time of any process.
    LatestCompletion,
}

impl Makespan {
    pub fn of(&self, processes: &[Process]) -> Option<u64> {
        match self {
            Makespan::LastListed => processes.last().map(Process::completion_time),
            Makespan::LatestCompletion => processes.iter().map(Process::completion_time).max(),
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Makespan::LastListed => Makespan::LatestCompletion,
            Makespan::LatestCompletion => Makespan::LastListed,
        }
    }
}

impl fmt::Display for Makespan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Makespan::LastListed => write!(f, "legacy"),
            Makespan::LatestCompletion => write!(f, "max"),
        }
    }
}

impl FromStr for Makespan {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "legacy" => Ok(Makespan::LastListed),
            "max" => Ok(Makespan::LatestCompletion),
            other => Err(format!("unknown makespan mode: {other}")),
        }
    }
}

/// Aggregate outcome of a completed workload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metrics {
    pub process_count: usize,
    pub makespan_mode: Makespan,
    pub makespan: u64,
    pub total_burst_time: u64,
    /// Percentage of the makespan spent on process bursts.
    pub cpu_utilization: f64,
    /// Completed processes per time unit.
    pub throughput: f64,
    pub average_waiting_time: f64,
    pub average_turnaround_time: f64,
    pub average_response_time: f64,
}

impl Metrics {
    pub fn compute(processes: &[Process], mode: Makespan) -> Result<Self, SchedulerError> {
        if let Some(process) = processes.iter().find(|process| !process.is_complete()) {
            return Err(SchedulerError::Incomplete {
                pid: process.pid(),
                remaining: process.remaining_time(),
            });
        }
        let makespan = mode.of(processes).ok_or(SchedulerError::EmptyInput)?;

        let count = processes.len() as f64;
        let total_burst_time: u64 = processes.iter().map(Process::burst_time).sum();
        let total_waiting_time: u64 = processes.iter().map(Process::waiting_time).sum();
        let total_turnaround_time: u64 = processes.iter().map(Process::turnaround_time).sum();
        let total_response_time: u64 = processes.iter().filter_map(Process::response_time).sum();

        Ok(Self {
            process_count: processes.len(),
            makespan_mode: mode,
            makespan,
            total_burst_time,
            cpu_utilization: total_burst_time as f64 / makespan as f64 * 100.0,
            throughput: count / makespan as f64,
            average_waiting_time: total_waiting_time as f64 / count,
            average_turnaround_time: total_turnaround_time as f64 / count,
            average_response_time: total_response_time as f64 / count,
        })
    }
}
