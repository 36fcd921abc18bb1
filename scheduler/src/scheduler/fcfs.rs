use super::{Process, Run, Scheduler, Timeline};
use log::trace;

/// First-come-first-served. Arrival ties keep input order.
#[derive(Debug, Default, Clone, Copy)]
pub struct FcfsScheduler;

impl FcfsScheduler {
    pub fn new() -> Self {
        Self
    }
}

impl Scheduler for FcfsScheduler {
    const NAME: &'static str = "FCFS Scheduling";

    fn schedule(&self, mut processes: Vec<Process>) -> Run {
        let mut order: Vec<usize> = (0..processes.len()).collect();
        order.sort_by_key(|&index| processes[index].arrival());

        let mut timeline = Timeline::new();
        let mut clock = 0;
        for index in order {
            let process = &mut processes[index];
            if clock < process.arrival() {
                trace!("CPU idle from {} to {}", clock, process.arrival());
                clock = process.arrival();
            }

            let burst = process.burst();
            process.admit(clock);
            process.dispatch(clock);
            let start = clock;
            clock = process.execute(clock, burst);
            timeline.push(process.pid(), start, clock);
        }

        Run {
            processes,
            timeline,
        }
    }
}
