use serde::Serialize;

/// A single process of a simulated workload.
///
/// The static inputs (`pid`, `arrival_time`, `burst_time`, `priority`) never
/// change. `remaining_time` is always initialized and counts down as CPU time
/// is consumed; the timing outputs are written once, when it reaches zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Process {
    pid: u32,
    arrival_time: u64,
    burst_time: u64,
    priority: i32,
    remaining_time: u64,
    response_time: Option<u64>,
    completion_time: u64,
    turnaround_time: u64,
    waiting_time: u64,
}

impl Process {
    const DEFAULT_PRIORITY: i32 = 0;

    pub fn new(pid: u32, arrival_time: u64, burst_time: u64) -> Self {
        Process::with_priority(pid, arrival_time, burst_time, Process::DEFAULT_PRIORITY)
    }

    pub fn with_priority(pid: u32, arrival_time: u64, burst_time: u64, priority: i32) -> Self {
        Self {
            pid,
            arrival_time,
            burst_time,
            priority,
            remaining_time: burst_time,
            response_time: None,
            completion_time: 0,
            turnaround_time: 0,
            waiting_time: 0,
        }
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    pub fn arrival_time(&self) -> u64 {
        self.arrival_time
    }

    pub fn burst_time(&self) -> u64 {
        self.burst_time
    }

    /// Lower values are scheduled first.
    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn remaining_time(&self) -> u64 {
        self.remaining_time
    }

    /// Delay between arrival and the first time the process got the CPU.
    pub fn response_time(&self) -> Option<u64> {
        self.response_time
    }

    pub fn completion_time(&self) -> u64 {
        self.completion_time
    }

    pub fn turnaround_time(&self) -> u64 {
        self.turnaround_time
    }

    pub fn waiting_time(&self) -> u64 {
        self.waiting_time
    }

    pub fn is_complete(&self) -> bool {
        self.remaining_time == 0
    }

    /// Discards every result of a previous run.
    pub fn reset(&mut self) {
        self.remaining_time = self.burst_time;
        self.response_time = None;
        self.completion_time = 0;
        self.turnaround_time = 0;
        self.waiting_time = 0;
    }

    /// Gives the process the CPU at `clock` for at most `units`, returning the
    /// time actually consumed.
    pub(super) fn run(&mut self, clock: u64, units: u64) -> u64 {
        if self.response_time.is_none() {
            self.response_time = Some(clock.saturating_sub(self.arrival_time));
        }
        let consumed = units.min(self.remaining_time);
        self.remaining_time -= consumed;
        consumed
    }

    /// Records the timing outputs of a process that just ran out of work.
    pub(super) fn complete(&mut self, clock: u64) {
        debug_assert!(self.is_complete());

        self.completion_time = clock;
        self.turnaround_time = clock.saturating_sub(self.arrival_time);
        self.waiting_time = self.turnaround_time.saturating_sub(self.burst_time);
    }
}
