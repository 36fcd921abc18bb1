//! Selection and clock helpers shared by the key-based schedulers.
//!
//! Every selection breaks ties on the lowest pid, so a given workload always
//! produces the same timeline. Idle periods jump the clock straight to the
//! next arrival, and preemptive runs only re-evaluate their choice at arrival
//! or completion boundaries. Both give the same intervals as stepping the
//! clock one unit at a time.

use super::{Process, ProcessState, Run, Timeline};
use log::{debug, trace};

/// Moves every process that has arrived by `clock` into the ready set, in pid order.
/// Returns the indices that were admitted.
pub fn admit_arrivals(processes: &mut [Process], clock: u64) -> Vec<usize> {
    processes
        .iter_mut()
        .enumerate()
        .filter_map(|(index, process)| {
            if process.admit(clock) {
                trace!("P{} ready at {}", process.pid(), clock);
                Some(index)
            } else {
                None
            }
        })
        .collect()
}

/// Earliest arrival among processes not yet admitted.
pub fn next_arrival(processes: &[Process]) -> Option<u64> {
    processes
        .iter()
        .filter(|process| process.state() == ProcessState::Pending)
        .map(Process::arrival)
        .min()
}

/// Index of the ready or running process with the smallest key, lowest pid first on ties.
pub fn select<K, F>(processes: &[Process], key: F) -> Option<usize>
where
    K: Ord,
    F: Fn(&Process) -> K,
{
    processes
        .iter()
        .enumerate()
        .filter(|(_, process)| {
            matches!(process.state(), ProcessState::Ready | ProcessState::Running)
        })
        .min_by_key(|&(_, process)| (key(process), process.pid()))
        .map(|(index, _)| index)
}

pub fn all_done(processes: &[Process]) -> bool {
    processes.iter().all(Process::is_done)
}

/// Idles until the next arrival. Returns `None` when nothing is left to arrive.
pub fn idle_until_next_arrival(processes: &[Process], clock: u64) -> Option<u64> {
    let next = next_arrival(processes)?;
    trace!("CPU idle from {} to {}", clock, next);
    Some(next)
}

/// Picks by `key` whenever the CPU frees up and runs the pick to completion.
pub fn run_to_completion<K, F>(mut processes: Vec<Process>, key: F) -> Run
where
    K: Ord,
    F: Fn(&Process) -> K,
{
    let mut timeline = Timeline::new();
    let mut clock = 0;

    while !all_done(&processes) {
        admit_arrivals(&mut processes, clock);

        let Some(index) = select(&processes, &key) else {
            match idle_until_next_arrival(&processes, clock) {
                Some(next) => clock = next,
                None => break,
            }
            continue;
        };

        let process = &mut processes[index];
        let burst = process.burst();
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

/// Re-picks by `key` at every arrival and completion, preempting the running
/// process when something with a smaller key shows up.
pub fn run_preemptive<K, F>(mut processes: Vec<Process>, key: F) -> Run
where
    K: Ord,
    F: Fn(&Process) -> K,
{
    let mut timeline = Timeline::new();
    let mut running: Option<usize> = None;
    let mut clock = 0;

    while !all_done(&processes) {
        admit_arrivals(&mut processes, clock);

        let Some(index) = select(&processes, &key) else {
            match idle_until_next_arrival(&processes, clock) {
                Some(next) => clock = next,
                None => break,
            }
            continue;
        };

        if running != Some(index) {
            if let Some(current) = running {
                debug!(
                    "P{} preempts P{} at {}",
                    processes[index].pid(),
                    processes[current].pid(),
                    clock
                );
                processes[current].preempt();
            }
            processes[index].dispatch(clock);
            running = Some(index);
        }

        // Nothing can change the choice before the next arrival.
        let slice = match next_arrival(&processes) {
            Some(arrival) => arrival - clock,
            None => processes[index].remaining(),
        };

        let process = &mut processes[index];
        let start = clock;
        clock = process.execute(clock, slice);
        timeline.extend(process.pid(), start, clock);

        if process.is_done() {
            running = None;
        }
    }

    Run {
        processes,
        timeline,
    }
}
