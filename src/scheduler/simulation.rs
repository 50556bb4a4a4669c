use super::{
    Makespan, PolicyReport, PreemptivePriorityScheduler, Process, RoundRobinScheduler, Schedule,
    Scheduler, ShortestJobFirstScheduler, DEFAULT_QUANTUM,
};
use crate::error::SchedulerError;
use log::info;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    RoundRobin,
    ShortestJobFirst,
    PreemptivePriority,
}

impl Policy {
    pub const ALL: [Policy; 3] = [
        Policy::RoundRobin,
        Policy::ShortestJobFirst,
        Policy::PreemptivePriority,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Policy::RoundRobin => RoundRobinScheduler::NAME,
            Policy::ShortestJobFirst => ShortestJobFirstScheduler::NAME,
            Policy::PreemptivePriority => PreemptivePriorityScheduler::NAME,
        }
    }

    pub fn run(&self, processes: &[Process], quantum: u64) -> Result<Schedule, SchedulerError> {
        match self {
            Policy::RoundRobin => RoundRobinScheduler::with_quantum(quantum)?.schedule(processes),
            Policy::ShortestJobFirst => ShortestJobFirstScheduler::new().schedule(processes),
            Policy::PreemptivePriority => PreemptivePriorityScheduler::new().schedule(processes),
        }
    }
}

impl FromStr for Policy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rr" => Ok(Policy::RoundRobin),
            "sjf" => Ok(Policy::ShortestJobFirst),
            "priority" => Ok(Policy::PreemptivePriority),
            other => Err(format!("unknown policy: {other}")),
        }
    }
}

/// The four-process workload used by the demonstration report.
pub fn reference_workload() -> Vec<Process> {
    vec![
        Process::with_priority(1, 0, 8, 3),
        Process::with_priority(2, 1, 6, 1),
        Process::with_priority(3, 2, 9, 2),
        Process::with_priority(4, 3, 5, 4),
    ]
}

/// A fixed workload run under one or more policies. Every run starts from the
/// same untouched inputs.
#[derive(Debug, Clone)]
pub struct Simulation {
    processes: Vec<Process>,
    quantum: u64,
    makespan: Makespan,
}

impl Simulation {
    pub fn new(processes: Vec<Process>, quantum: u64, makespan: Makespan) -> Self {
        Self {
            processes,
            quantum,
            makespan,
        }
    }

    pub fn reference() -> Self {
        Simulation::new(reference_workload(), DEFAULT_QUANTUM, Makespan::default())
    }

    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    pub fn run(&self, policy: Policy) -> Result<PolicyReport, SchedulerError> {
        info!(
            "Running {} over {} processes (quantum {}, makespan {})",
            policy.name(),
            self.processes.len(),
            self.quantum,
            self.makespan
        );
        let schedule = policy.run(&self.processes, self.quantum)?;
        PolicyReport::new(schedule, self.makespan)
    }

    pub fn run_all(&self, policies: &[Policy]) -> Result<Vec<PolicyReport>, SchedulerError> {
        policies.iter().map(|&policy| self.run(policy)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_do_not_share_state() {
        let simulation = Simulation::reference();
        let first = simulation.run(Policy::RoundRobin).unwrap();
        simulation.run(Policy::ShortestJobFirst).unwrap();
        let again = simulation.run(Policy::RoundRobin).unwrap();

        assert_eq!(first, again);
        assert!(simulation.processes().iter().all(|p| !p.is_complete()));
    }

    #[test]
    fn test_invalid_quantum_only_affects_round_robin() {
        let simulation = Simulation::new(reference_workload(), 0, Makespan::LastListed);

        assert_eq!(
            simulation.run(Policy::RoundRobin).unwrap_err(),
            SchedulerError::InvalidQuantum(0)
        );
        assert!(simulation.run(Policy::PreemptivePriority).is_ok());
    }

    #[test]
    fn test_run_all_keeps_policy_order() {
        let reports = Simulation::reference().run_all(&Policy::ALL).unwrap();
        let names: Vec<&str> = reports.iter().map(PolicyReport::policy).collect();

        assert_eq!(
            names,
            vec!["Round Robin", "Shortest Job First", "Preemptive Priority"]
        );
    }

    #[test]
    fn test_policy_names_parse() {
        assert_eq!("rr".parse::<Policy>(), Ok(Policy::RoundRobin));
        assert_eq!("sjf".parse::<Policy>(), Ok(Policy::ShortestJobFirst));
        assert_eq!("priority".parse::<Policy>(), Ok(Policy::PreemptivePriority));
        assert!("fifo".parse::<Policy>().is_err());
    }
}
