use super::{schedule::ScheduleBuilder, snapshot, Process, Schedule, Scheduler};
use crate::error::SchedulerError;
use log::{debug, trace};
use std::{
    cmp::{Ordering, Reverse},
    collections::{BinaryHeap, VecDeque},
};

/// Preemptive priority scheduling in unit time steps.
///
/// Each step admits every process that has arrived, then gives one unit of
/// CPU to the ready process with the lowest priority value. Equal priorities
/// are ordered by arrival time, then by pid. With nothing ready the clock
/// skips straight to the next arrival.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreemptivePriorityScheduler;

impl PreemptivePriorityScheduler {
    pub fn new() -> Self {
        Self
    }
}

/// Ready queue entry, ordered by `(priority, arrival_time, pid)`.
#[derive(Debug, PartialEq, Eq)]
struct ReadyEntry {
    key: (i32, u64, u32),
    index: usize,
}

impl ReadyEntry {
    fn new(process: &Process, index: usize) -> Self {
        Self {
            key: (process.priority(), process.arrival_time(), process.pid()),
            index,
        }
    }
}

impl Ord for ReadyEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl PartialOrd for ReadyEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Scheduler for PreemptivePriorityScheduler {
    const NAME: &'static str = "Preemptive Priority";

    fn schedule(&self, processes: &[Process]) -> Result<Schedule, SchedulerError> {
        let mut processes = snapshot(processes)?;
        let mut builder = ScheduleBuilder::new(Self::NAME);

        let mut arrivals: Vec<usize> = (0..processes.len()).collect();
        arrivals.sort_by_key(|&index| (processes[index].arrival_time(), processes[index].pid()));
        let mut arrivals = VecDeque::from(arrivals);
        let mut ready: BinaryHeap<Reverse<ReadyEntry>> = BinaryHeap::new();
        let mut clock = 0;

        while !arrivals.is_empty() || !ready.is_empty() {
            while let Some(&index) = arrivals.front() {
                if processes[index].arrival_time() > clock {
                    break;
                }
                arrivals.pop_front();
                ready.push(Reverse(ReadyEntry::new(&processes[index], index)));
            }

            let Some(Reverse(entry)) = ready.pop() else {
                // Nothing changes while idle, so skip to the next arrival
                let next = arrivals
                    .front()
                    .map_or(clock, |&index| processes[index].arrival_time());
                builder.idle(clock, next);
                clock = next;
                continue;
            };

            let process = &mut processes[entry.index];
            let start = clock;
            clock += process.run(start, 1);
            builder.run(process.pid(), start, clock);
            trace!("P{} ran {}..{}", process.pid(), start, clock);

            if process.is_complete() {
                process.complete(clock);
                builder.complete(entry.index);
                debug!("P{} completed at {}", process.pid(), clock);
            } else {
                ready.push(Reverse(entry));
            }
        }

        Ok(builder.in_completion_order(processes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::Slice;

    #[test]
    fn test_higher_priority_arrival_preempts() {
        let schedule = PreemptivePriorityScheduler::new()
            .schedule(&[
                Process::with_priority(1, 0, 4, 5),
                Process::with_priority(2, 2, 2, 1),
            ])
            .unwrap();
        let runs: Vec<(u32, u64, u64)> = schedule
            .timeline()
            .iter()
            .map(|slice| (slice.pid.unwrap(), slice.start, slice.end))
            .collect();

        assert_eq!(runs, vec![(1, 0, 2), (2, 2, 4), (1, 4, 6)]);
        assert_eq!(schedule.completion_order(), &[2, 1]);
        assert_eq!(schedule.process(1).unwrap().waiting_time(), 2);
        assert_eq!(schedule.process(1).unwrap().response_time(), Some(0));
    }

    #[test]
    fn test_equal_priority_prefers_earlier_arrival_then_pid() {
        let schedule = PreemptivePriorityScheduler::new()
            .schedule(&[
                Process::with_priority(3, 1, 2, 1),
                Process::with_priority(2, 0, 2, 1),
                Process::with_priority(1, 1, 2, 1),
            ])
            .unwrap();

        assert_eq!(schedule.completion_order(), &[2, 1, 3]);
    }

    #[test]
    fn test_idle_until_first_arrival() {
        let schedule = PreemptivePriorityScheduler::new()
            .schedule(&[Process::with_priority(1, 3, 2, 0)])
            .unwrap();

        assert_eq!(schedule.idle_time(), 3);
        assert_eq!(schedule.process(1).unwrap().completion_time(), 5);
        assert_eq!(schedule.process(1).unwrap().waiting_time(), 0);
    }

    #[test]
    fn test_unsorted_input_is_admitted_by_arrival() {
        let schedule = PreemptivePriorityScheduler::new()
            .schedule(&[
                Process::with_priority(1, 4, 1, 0),
                Process::with_priority(2, 0, 2, 9),
            ])
            .unwrap();

        assert_eq!(schedule.completion_order(), &[2, 1]);
        assert_eq!(schedule.process(1).unwrap().completion_time(), 5);
        assert_eq!(schedule.idle_time(), 2);
    }

    #[test]
    fn test_distant_arrival_is_one_idle_slice() {
        let schedule = PreemptivePriorityScheduler::new()
            .schedule(&[
                Process::with_priority(1, 0, 1, 0),
                Process::with_priority(2, 2_000_000_000_000, 1, 0),
            ])
            .unwrap();

        assert_eq!(
            schedule.timeline(),
            &[
                Slice { pid: Some(1), start: 0, end: 1 },
                Slice { pid: None, start: 1, end: 2_000_000_000_000 },
                Slice { pid: Some(2), start: 2_000_000_000_000, end: 2_000_000_000_001 },
            ]
        );
        assert_eq!(schedule.process(2).unwrap().completion_time(), 2_000_000_000_001);
    }

    #[test]
    fn test_running_process_has_lowest_ready_priority() {
        let input = [
            Process::with_priority(1, 0, 5, 3),
            Process::with_priority(2, 1, 3, 2),
            Process::with_priority(3, 2, 4, 1),
            Process::with_priority(4, 6, 2, 2),
        ];
        let schedule = PreemptivePriorityScheduler::new().schedule(&input).unwrap();

        for slice in schedule.timeline() {
            let Some(pid) = slice.pid else { continue };
            let running = schedule.process(pid).unwrap();
            for time in slice.start..slice.end {
                // Anyone arrived and not yet finished at `time` is ready
                let competitor = input.iter().any(|other| {
                    let done = schedule.process(other.pid()).unwrap().completion_time();
                    other.arrival_time() <= time
                        && done > time
                        && other.priority() < running.priority()
                });
                assert!(!competitor, "P{pid} ran at {time} over a higher priority");
            }
        }
    }
}
