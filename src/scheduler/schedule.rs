use super::Process;
use serde::Serialize;

/// A contiguous stretch of the simulated timeline. `pid` is `None` while the
/// CPU sits idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Slice {
    pub pid: Option<u32>,
    pub start: u64,
    pub end: u64,
}

impl Slice {
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    pub fn is_idle(&self) -> bool {
        self.pid.is_none()
    }
}

/// The outcome of one scheduler run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schedule {
    policy: &'static str,
    processes: Vec<Process>,
    completion_order: Vec<u32>,
    timeline: Vec<Slice>,
}

impl Schedule {
    pub fn policy(&self) -> &'static str {
        self.policy
    }

    /// Completed processes, in the policy's reporting order.
    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    pub fn completion_order(&self) -> &[u32] {
        &self.completion_order
    }

    pub fn timeline(&self) -> &[Slice] {
        &self.timeline
    }

    pub fn process(&self, pid: u32) -> Option<&Process> {
        self.processes.iter().find(|process| process.pid() == pid)
    }

    /// Clock value when the last slice ends.
    pub fn end_time(&self) -> u64 {
        self.timeline.last().map_or(0, |slice| slice.end)
    }

    pub fn idle_time(&self) -> u64 {
        self.timeline
            .iter()
            .filter(|slice| slice.is_idle())
            .map(Slice::len)
            .sum()
    }

    /// Every slice given to `pid`, in timeline order.
    pub fn slices_of(&self, pid: u32) -> impl Iterator<Item = &Slice> {
        self.timeline
            .iter()
            .filter(move |slice| slice.pid == Some(pid))
    }
}

/// Accumulates the timeline and completion order while a scheduler runs over
/// a snapshot of processes addressed by index.
pub(super) struct ScheduleBuilder {
    policy: &'static str,
    completed: Vec<usize>,
    timeline: Vec<Slice>,
}

impl ScheduleBuilder {
    pub fn new(policy: &'static str) -> Self {
        Self {
            policy,
            completed: Vec::new(),
            timeline: Vec::new(),
        }
    }

    pub fn run(&mut self, pid: u32, start: u64, end: u64) {
        self.push(Some(pid), start, end);
    }

    pub fn idle(&mut self, start: u64, end: u64) {
        self.push(None, start, end);
    }

    pub fn complete(&mut self, index: usize) {
        self.completed.push(index);
    }

    fn push(&mut self, pid: Option<u32>, start: u64, end: u64) {
        if start == end {
            return;
        }
        // Merge with the previous slice when the same process keeps the CPU
        match self.timeline.last_mut() {
            Some(last) if last.pid == pid && last.end == start => last.end = end,
            _ => self.timeline.push(Slice { pid, start, end }),
        }
    }

    fn completion_order(&self, processes: &[Process]) -> Vec<u32> {
        self.completed
            .iter()
            .map(|&index| processes[index].pid())
            .collect()
    }

    /// Reports the processes in the order they were given to the scheduler.
    pub fn in_input_order(self, processes: Vec<Process>) -> Schedule {
        let completion_order = self.completion_order(&processes);
        Schedule {
            policy: self.policy,
            processes,
            completion_order,
            timeline: self.timeline,
        }
    }

    /// Reports the processes in the order they finished.
    pub fn in_completion_order(self, processes: Vec<Process>) -> Schedule {
        let completion_order = self.completion_order(&processes);
        let mut slots: Vec<Option<Process>> = processes.into_iter().map(Some).collect();
        let processes = self
            .completed
            .iter()
            .filter_map(|&index| slots[index].take())
            .collect();

        Schedule {
            policy: self.policy,
            processes,
            completion_order,
            timeline: self.timeline,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjacent_slices_are_merged() {
        let mut builder = ScheduleBuilder::new("Test");
        builder.run(1, 0, 1);
        builder.run(1, 1, 2);
        builder.idle(2, 3);
        builder.idle(3, 4);
        builder.run(2, 4, 6);
        builder.run(1, 6, 7);

        let schedule = builder.in_input_order(Vec::new());
        assert_eq!(
            schedule.timeline(),
            &[
                Slice { pid: Some(1), start: 0, end: 2 },
                Slice { pid: None, start: 2, end: 4 },
                Slice { pid: Some(2), start: 4, end: 6 },
                Slice { pid: Some(1), start: 6, end: 7 },
            ]
        );
        assert_eq!(schedule.idle_time(), 2);
        assert_eq!(schedule.end_time(), 7);
    }

    #[test]
    fn test_empty_slices_are_dropped() {
        let mut builder = ScheduleBuilder::new("Test");
        builder.idle(3, 3);

        assert!(builder.in_input_order(Vec::new()).timeline().is_empty());
    }

    #[test]
    fn test_completion_order_reordering() {
        let processes = vec![Process::new(1, 0, 1), Process::new(2, 0, 1)];
        let mut builder = ScheduleBuilder::new("Test");
        builder.complete(1);
        builder.complete(0);

        let schedule = builder.in_completion_order(processes);
        let pids: Vec<u32> = schedule.processes().iter().map(Process::pid).collect();
        assert_eq!(pids, vec![2, 1]);
        assert_eq!(schedule.completion_order(), &[2, 1]);
    }
}
