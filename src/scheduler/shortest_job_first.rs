use super::{schedule::ScheduleBuilder, snapshot, Process, Schedule, Scheduler};
use crate::error::SchedulerError;
use log::{debug, trace};

/// Non-preemptive shortest job first.
///
/// Selection looks at every process that has not run yet, whether or not it
/// has arrived: a later, shorter job is picked ahead of one that is already
/// waiting, and the clock jumps forward to its arrival. Processes are reported
/// in input order; the selection order is the schedule's completion order.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortestJobFirstScheduler;

impl ShortestJobFirstScheduler {
    pub fn new() -> Self {
        Self
    }
}

impl Scheduler for ShortestJobFirstScheduler {
    const NAME: &'static str = "Shortest Job First";

    fn schedule(&self, processes: &[Process]) -> Result<Schedule, SchedulerError> {
        let mut processes = snapshot(processes)?;
        let mut builder = ScheduleBuilder::new(Self::NAME);
        let mut pending: Vec<usize> = (0..processes.len()).collect();
        let mut clock = 0;

        while let Some(position) = next_shortest(&processes, &pending) {
            let index = pending.remove(position);

            let process = &mut processes[index];
            if clock < process.arrival_time() {
                builder.idle(clock, process.arrival_time());
                clock = process.arrival_time();
            }

            let start = clock;
            clock += process.run(start, process.burst_time());
            builder.run(process.pid(), start, clock);
            trace!("P{} ran {}..{}", process.pid(), start, clock);

            process.complete(clock);
            builder.complete(index);
            debug!("P{} completed at {}", process.pid(), clock);
        }

        Ok(builder.in_input_order(processes))
    }
}

/// Position in `pending` of the job with the shortest burst. Keys are unique
/// since pids are, so the minimum is unambiguous.
fn next_shortest(processes: &[Process], pending: &[usize]) -> Option<usize> {
    pending
        .iter()
        .enumerate()
        .min_by_key(|&(_, &index)| {
            let process = &processes[index];
            (process.burst_time(), process.arrival_time(), process.pid())
        })
        .map(|(position, _)| position)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shorter_bursts_run_first() {
        let schedule = ShortestJobFirstScheduler::new()
            .schedule(&[
                Process::new(1, 0, 6),
                Process::new(2, 0, 2),
                Process::new(3, 0, 4),
            ])
            .unwrap();

        assert_eq!(schedule.completion_order(), &[2, 3, 1]);
        assert_eq!(schedule.process(1).unwrap().completion_time(), 12);
        assert_eq!(schedule.process(3).unwrap().waiting_time(), 2);
    }

    #[test]
    fn test_equal_bursts_break_ties_by_arrival() {
        let schedule = ShortestJobFirstScheduler::new()
            .schedule(&[Process::new(1, 2, 3), Process::new(2, 0, 3)])
            .unwrap();

        assert_eq!(schedule.completion_order(), &[2, 1]);
    }

    #[test]
    fn test_unarrived_short_job_is_picked_over_waiting_job() {
        let schedule = ShortestJobFirstScheduler::new()
            .schedule(&[Process::new(1, 0, 10), Process::new(2, 5, 1)])
            .unwrap();

        // P2 is chosen first and the CPU idles until it arrives
        assert_eq!(schedule.completion_order(), &[2, 1]);
        assert_eq!(schedule.process(2).unwrap().completion_time(), 6);
        assert_eq!(schedule.process(1).unwrap().completion_time(), 16);
        assert_eq!(schedule.idle_time(), 5);
    }

    #[test]
    fn test_processes_are_reported_in_input_order() {
        let schedule = ShortestJobFirstScheduler::new()
            .schedule(&[Process::new(1, 0, 6), Process::new(2, 0, 2)])
            .unwrap();
        let pids: Vec<u32> = schedule.processes().iter().map(Process::pid).collect();

        assert_eq!(pids, vec![1, 2]);
        assert_eq!(schedule.completion_order(), &[2, 1]);
    }

    #[test]
    fn test_each_job_runs_in_one_slice() {
        let input = [
            Process::new(1, 0, 8),
            Process::new(2, 1, 6),
            Process::new(3, 2, 9),
        ];
        let schedule = ShortestJobFirstScheduler::new().schedule(&input).unwrap();

        for process in &input {
            assert_eq!(schedule.slices_of(process.pid()).count(), 1);
        }
    }
}
