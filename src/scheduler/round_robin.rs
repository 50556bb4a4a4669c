use super::{schedule::ScheduleBuilder, snapshot, Process, Schedule, Scheduler, DEFAULT_QUANTUM};
use crate::error::SchedulerError;
use log::{debug, trace};
use std::collections::VecDeque;

/// Time-sliced round robin.
///
/// Every process is queued up front in input order; a process that has not
/// arrived yet when it reaches the head of the queue makes the clock jump to
/// its arrival time.
#[derive(Debug, Clone, Copy)]
pub struct RoundRobinScheduler {
    quantum: u64,
}

impl RoundRobinScheduler {
    pub fn new() -> Self {
        Self {
            quantum: DEFAULT_QUANTUM,
        }
    }

    pub fn with_quantum(quantum: u64) -> Result<Self, SchedulerError> {
        if quantum == 0 {
            return Err(SchedulerError::InvalidQuantum(quantum));
        }
        Ok(Self { quantum })
    }

    pub fn quantum(&self) -> u64 {
        self.quantum
    }
}

impl Default for RoundRobinScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for RoundRobinScheduler {
    const NAME: &'static str = "Round Robin";

    fn schedule(&self, processes: &[Process]) -> Result<Schedule, SchedulerError> {
        let mut processes = snapshot(processes)?;
        let mut builder = ScheduleBuilder::new(Self::NAME);
        let mut queue: VecDeque<usize> = (0..processes.len()).collect();
        let mut clock = 0;

        while let Some(index) = queue.pop_front() {
            let process = &mut processes[index];
            if clock < process.arrival_time() {
                builder.idle(clock, process.arrival_time());
                clock = process.arrival_time();
            }

            let start = clock;
            clock += process.run(start, self.quantum);
            builder.run(process.pid(), start, clock);
            trace!("P{} ran {}..{}", process.pid(), start, clock);

            if process.is_complete() {
                process.complete(clock);
                builder.complete(index);
                debug!("P{} completed at {}", process.pid(), clock);
            } else {
                queue.push_back(index);
            }
        }

        Ok(builder.in_input_order(processes))
    }
}
