use super::{Makespan, Metrics, Schedule};
use crate::error::SchedulerError;
use serde::Serialize;
use std::fmt;

/// A finished run of one policy together with its metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicyReport {
    pub schedule: Schedule,
    pub metrics: Metrics,
}

impl PolicyReport {
    pub fn new(schedule: Schedule, mode: Makespan) -> Result<Self, SchedulerError> {
        let metrics = Metrics::compute(schedule.processes(), mode)?;
        Ok(Self { schedule, metrics })
    }

    pub fn policy(&self) -> &'static str {
        self.schedule.policy()
    }

    pub fn title(&self) -> String {
        format!("{} SCHEDULING", self.policy().to_uppercase())
    }

    /// Recomputes the metrics of the same schedule under another makespan mode.
    pub fn with_makespan(&self, mode: Makespan) -> Result<Self, SchedulerError> {
        Self::new(self.schedule.clone(), mode)
    }
}

impl fmt::Display for PolicyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title())?;
        writeln!(f)?;
        for process in self.schedule.processes() {
            writeln!(f, "P{} Waiting Time: {}", process.pid(), process.waiting_time())?;
        }
        writeln!(f)?;
        writeln!(f, "CPU Utilization: {:.2}%", self.metrics.cpu_utilization)?;
        writeln!(f, "System Throughput: {:.2}", self.metrics.throughput)?;
        writeln!(f, "Average Waiting Time: {:.2}", self.metrics.average_waiting_time)?;
        writeln!(f, "Average Turnaround Time: {:.2}", self.metrics.average_turnaround_time)?;
        // The legacy layout ends with two blank lines and no makespan line
        if self.metrics.makespan_mode == Makespan::LatestCompletion {
            writeln!(f, "Makespan: {}", self.metrics.makespan)?;
        }
        writeln!(f)?;
        writeln!(f)
    }
}
