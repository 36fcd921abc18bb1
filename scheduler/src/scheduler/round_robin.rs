use super::{policy, Process, Run, Scheduler, Timeline, DEFAULT_QUANTUM};
use log::debug;
use std::collections::VecDeque;

pub struct RoundRobinScheduler {
    quantum: u64,
}

impl RoundRobinScheduler {
    pub fn new() -> Self {
        RoundRobinScheduler::with_quantum(DEFAULT_QUANTUM)
    }

    pub fn with_quantum(quantum: u64) -> Self {
        debug_assert!(quantum > 0);
        Self { quantum }
    }

    pub fn quantum(&self) -> u64 {
        self.quantum
    }

    // A process is `Ready` exactly while it sits in the queue, so admission
    // can never enqueue it twice.
    fn poll_arrivals(processes: &mut [Process], ready: &mut VecDeque<usize>, clock: u64) {
        ready.extend(policy::admit_arrivals(processes, clock));
    }
}

impl Default for RoundRobinScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for RoundRobinScheduler {
    const NAME: &'static str = "Round Robin Scheduling";

    fn schedule(&self, mut processes: Vec<Process>) -> Run {
        let mut ready = VecDeque::new();
        let mut timeline = Timeline::new();
        let mut clock = 0;

        while !policy::all_done(&processes) {
            RoundRobinScheduler::poll_arrivals(&mut processes, &mut ready, clock);

            let Some(index) = ready.pop_front() else {
                match policy::idle_until_next_arrival(&processes, clock) {
                    Some(next) => clock = next,
                    None => break,
                }
                continue;
            };

            let process = &mut processes[index];
            process.dispatch(clock);
            let start = clock;
            clock = process.execute(clock, self.quantum);
            timeline.push(process.pid(), start, clock);

            // Arrivals during the slice queue up ahead of the process that just ran.
            RoundRobinScheduler::poll_arrivals(&mut processes, &mut ready, clock);

            let process = &mut processes[index];
            if !process.is_done() {
                debug!("P{} quantum expired at {}", process.pid(), clock);
                process.preempt();
                ready.push_back(index);
            }
        }

        Run {
            processes,
            timeline,
        }
    }
}
