use super::{
    display::DisplayTerminal, FcfsScheduler, Metrics, PreemptivePriorityScheduler,
    PriorityScheduler, ProcessStats, RoundRobinScheduler, Scheduler, ShortestJobScheduler,
    ShortestRemainingTimeScheduler, SimulationError, Timeline, Workload,
};
use clap::ValueEnum;
use log::info;
use serde::Serialize;
use std::io;

/// The six disciplines, declared in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    Fcfs,
    Sjf,
    Srtf,
    Priority,
    PriorityPreemptive,
    RoundRobin,
}

impl Algorithm {
    pub const ALL: [Algorithm; 6] = [
        Algorithm::Fcfs,
        Algorithm::Sjf,
        Algorithm::Srtf,
        Algorithm::Priority,
        Algorithm::PriorityPreemptive,
        Algorithm::RoundRobin,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Fcfs => FcfsScheduler::NAME,
            Algorithm::Sjf => ShortestJobScheduler::NAME,
            Algorithm::Srtf => ShortestRemainingTimeScheduler::NAME,
            Algorithm::Priority => PriorityScheduler::NAME,
            Algorithm::PriorityPreemptive => PreemptivePriorityScheduler::NAME,
            Algorithm::RoundRobin => RoundRobinScheduler::NAME,
        }
    }

    pub fn simulate(self, workload: &Workload) -> Result<Report, SimulationError> {
        match self {
            Algorithm::Fcfs => simulate(self, &FcfsScheduler::new(), workload),
            Algorithm::Sjf => simulate(self, &ShortestJobScheduler::new(), workload),
            Algorithm::Srtf => simulate(self, &ShortestRemainingTimeScheduler::new(), workload),
            Algorithm::Priority => simulate(self, &PriorityScheduler::new(), workload),
            Algorithm::PriorityPreemptive => {
                simulate(self, &PreemptivePriorityScheduler::new(), workload)
            }
            Algorithm::RoundRobin => simulate(
                self,
                &RoundRobinScheduler::with_quantum(workload.quantum()),
                workload,
            ),
        }
    }
}

/// What the output side receives for one algorithm.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub algorithm: Algorithm,
    pub name: &'static str,
    pub timeline: Timeline,
    /// Per-process figures in pid order.
    pub processes: Vec<ProcessStats>,
    pub metrics: Metrics,
}

fn simulate<S>(
    algorithm: Algorithm,
    scheduler: &S,
    workload: &Workload,
) -> Result<Report, SimulationError>
where
    S: Scheduler,
{
    info!("Running {} over {} processes", S::NAME, workload.len());
    let run = scheduler.schedule(workload.processes());

    let processes = run
        .processes
        .iter()
        .map(ProcessStats::of)
        .collect::<Result<Vec<_>, _>>()?;
    let metrics = Metrics::from_stats(&processes)?;

    info!(
        "{} done at {} (avg turnaround {:.2}, avg waiting {:.2}, avg response {:.2})",
        S::NAME,
        metrics.makespan,
        metrics.avg_turnaround,
        metrics.avg_waiting,
        metrics.avg_response
    );

    Ok(Report {
        algorithm,
        name: S::NAME,
        timeline: run.timeline,
        processes,
        metrics,
    })
}

/// Runs a set of algorithms over one workload, always in reporting order.
pub struct ProcessRunner {
    workload: Workload,
    algorithms: Vec<Algorithm>,
}

impl ProcessRunner {
    pub fn new(workload: Workload) -> Self {
        ProcessRunner::with_algorithms(workload, &Algorithm::ALL)
    }

    pub fn with_algorithms(workload: Workload, algorithms: &[Algorithm]) -> Self {
        let mut algorithms = algorithms.to_vec();
        algorithms.sort();
        algorithms.dedup();

        Self {
            workload,
            algorithms,
        }
    }

    pub fn algorithms(&self) -> &[Algorithm] {
        &self.algorithms
    }

    pub fn run(&self) -> Result<Vec<Report>, SimulationError> {
        self.algorithms
            .iter()
            .map(|algorithm| algorithm.simulate(&self.workload))
            .collect()
    }
}

pub enum RunnerEvent {
    Quit,
    Next,
    Previous,
    None,
}

/// Interactive browser over finished reports.
pub struct ReportBrowser {
    terminal: DisplayTerminal,
    reports: Vec<Report>,
    selected: usize,
}

impl ReportBrowser {
    pub fn new(reports: Vec<Report>) -> Result<Self, io::Error> {
        let terminal = DisplayTerminal::new()?;

        Ok(Self {
            terminal,
            reports,
            selected: 0,
        })
    }

    // Returns false if the browser should quit
    pub fn run(&mut self) -> Result<bool, io::Error> {
        if let Some(report) = self.reports.get(self.selected) {
            self.terminal.draw(report, self.selected, self.reports.len())?;
        }

        let count = self.reports.len().max(1);
        match self.terminal.get_input() {
            RunnerEvent::Quit => return Ok(false),
            RunnerEvent::Next => self.selected = (self.selected + 1) % count,
            RunnerEvent::Previous => self.selected = (self.selected + count - 1) % count,
            RunnerEvent::None => {}
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::ProcessSpec;
    use proptest::prelude::*;
    use std::collections::VecDeque;

    fn workload(specs: &[(i64, i64, i64)], quantum: i64) -> Workload {
        let specs: Vec<ProcessSpec> = specs
            .iter()
            .map(|&(arrival, burst, priority)| ProcessSpec::new(arrival, burst, priority))
            .collect();
        Workload::new(&specs, quantum).unwrap()
    }

    fn mixed() -> Workload {
        workload(
            &[
                (0, 7, 3),
                (2, 4, 1),
                (4, 1, 4),
                (5, 4, 2),
                (15, 3, 0),
                (15, 2, 5),
            ],
            3,
        )
    }

    fn spans(report: &Report) -> Vec<(u32, u64, u64)> {
        report
            .timeline
            .intervals()
            .iter()
            .map(|i| (i.pid, i.start, i.end))
            .collect()
    }

    #[test]
    fn runs_in_reporting_order_without_duplicates() {
        let runner = ProcessRunner::with_algorithms(
            mixed(),
            &[Algorithm::RoundRobin, Algorithm::Fcfs, Algorithm::RoundRobin],
        );
        let names: Vec<&str> = runner.run().unwrap().iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["FCFS Scheduling", "Round Robin Scheduling"]);
    }

    #[test]
    fn report_names_match_algorithm_names() {
        let workload = mixed();
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.simulate(&workload).unwrap().name, algorithm.name());
        }
    }

    #[test]
    fn default_runner_covers_all_six() {
        let reports = ProcessRunner::new(mixed()).run().unwrap();
        let algorithms: Vec<Algorithm> = reports.iter().map(|r| r.algorithm).collect();
        assert_eq!(algorithms, Algorithm::ALL.to_vec());
    }

    #[test]
    fn fcfs_worked_example() {
        let report = Algorithm::Fcfs
            .simulate(&workload(&[(0, 5, 2), (1, 3, 1), (2, 8, 3)], 2))
            .unwrap();
        assert_eq!(spans(&report), vec![(1, 0, 5), (2, 5, 8), (3, 8, 16)]);
        assert_eq!(format!("{:.2}", report.metrics.avg_turnaround), "8.67");
    }

    #[test]
    fn round_robin_worked_example() {
        let report = Algorithm::RoundRobin
            .simulate(&workload(&[(0, 4, 0), (1, 3, 0)], 2))
            .unwrap();
        assert_eq!(
            spans(&report),
            vec![(1, 0, 2), (2, 2, 4), (1, 4, 6), (2, 6, 7)]
        );
    }

    #[test]
    fn every_process_finishes_exactly_once_with_sane_times() {
        let workload = mixed();
        for algorithm in Algorithm::ALL {
            let report = algorithm.simulate(&workload).unwrap();
            let pids: Vec<u32> = report.processes.iter().map(|p| p.pid).collect();
            assert_eq!(pids, vec![1, 2, 3, 4, 5, 6], "{}", report.name);

            for stats in &report.processes {
                assert!(stats.start >= stats.arrival, "{}", report.name);
                assert!(stats.finish >= stats.start, "{}", report.name);
                let span = stats.finish - stats.start;
                match algorithm {
                    Algorithm::Fcfs | Algorithm::Sjf | Algorithm::Priority => {
                        assert_eq!(span, stats.burst, "{}", report.name)
                    }
                    _ => assert!(span >= stats.burst, "{}", report.name),
                }
            }
        }
    }

    #[test]
    fn interval_durations_sum_to_burst() {
        let workload = mixed();
        for algorithm in Algorithm::ALL {
            let report = algorithm.simulate(&workload).unwrap();
            for stats in &report.processes {
                assert_eq!(
                    report.timeline.cpu_time(stats.pid),
                    stats.burst,
                    "{} P{}",
                    report.name,
                    stats.pid
                );
            }
        }
    }

    #[test]
    fn intervals_never_overlap() {
        let workload = mixed();
        for algorithm in Algorithm::ALL {
            let report = algorithm.simulate(&workload).unwrap();
            for pair in report.timeline.intervals().windows(2) {
                assert!(pair[0].end <= pair[1].start, "{}", report.name);
                assert!(pair[0].start < pair[0].end, "{}", report.name);
            }
        }
    }

    #[test]
    fn repeated_runs_are_identical() {
        let workload = mixed();
        for algorithm in Algorithm::ALL {
            let first = algorithm.simulate(&workload).unwrap();
            let second = algorithm.simulate(&workload).unwrap();
            assert_eq!(first.timeline, second.timeline);
            assert_eq!(first.processes, second.processes);
            assert_eq!(first.metrics, second.metrics);
        }
    }

    #[test]
    fn round_robin_with_large_quantum_matches_fcfs() {
        let workload = workload(&[(3, 4, 0), (0, 6, 0), (0, 2, 0), (20, 1, 0)], 6);
        let fcfs = Algorithm::Fcfs.simulate(&workload).unwrap();
        let round_robin = Algorithm::RoundRobin.simulate(&workload).unwrap();
        assert_eq!(fcfs.timeline, round_robin.timeline);
        assert_eq!(fcfs.metrics, round_robin.metrics);
    }

    #[test]
    fn preemptive_runs_stamp_response_on_first_dispatch() {
        let workload = workload(&[(0, 5, 2), (1, 3, 1), (2, 8, 3)], 2);
        let report = Algorithm::PriorityPreemptive.simulate(&workload).unwrap();
        let p1 = &report.processes[0];
        assert_eq!(p1.start, 0);
        assert_eq!(p1.response, 0);
        assert_eq!(p1.finish, 8);
        assert_eq!(p1.waiting, 3);
    }

    #[test]
    fn workloads_at_the_clock_limit_simulate() {
        let workload = workload(&[(0, i64::MAX, 1), (0, i64::MAX, 0)], i64::MAX);
        for algorithm in Algorithm::ALL {
            let report = algorithm.simulate(&workload).unwrap();
            assert_eq!(report.metrics.makespan, u64::MAX - 1, "{}", report.name);
        }
    }

    // Straightforward one-unit-per-step versions of each discipline, picking
    // the first index with the smallest key. Jobs are (arrival, burst, priority).
    type Job = (u64, u64, u64);

    fn stepped_to_completion(jobs: &[Job], key: fn(&Job) -> u64) -> Vec<(u32, u64, u64)> {
        let mut done = vec![false; jobs.len()];
        let mut clock = 0;
        let mut spans = Vec::new();
        while done.contains(&false) {
            let pick = (0..jobs.len())
                .filter(|&i| !done[i] && jobs[i].0 <= clock)
                .min_by_key(|&i| (key(&jobs[i]), i));
            match pick {
                Some(i) => {
                    spans.push((i as u32 + 1, clock, clock + jobs[i].1));
                    clock += jobs[i].1;
                    done[i] = true;
                }
                None => clock += 1,
            }
        }
        spans
    }

    fn stepped_preemptive(jobs: &[Job], by_priority: bool) -> Vec<(u32, u64, u64)> {
        let mut remaining: Vec<u64> = jobs.iter().map(|job| job.1).collect();
        let mut clock = 0;
        let mut spans: Vec<(u32, u64, u64)> = Vec::new();
        while remaining.iter().any(|&left| left > 0) {
            let pick = (0..jobs.len())
                .filter(|&i| remaining[i] > 0 && jobs[i].0 <= clock)
                .min_by_key(|&i| (if by_priority { jobs[i].2 } else { remaining[i] }, i));
            if let Some(i) = pick {
                remaining[i] -= 1;
                let pid = i as u32 + 1;
                match spans.last_mut() {
                    Some(last) if last.0 == pid && last.2 == clock => last.2 += 1,
                    _ => spans.push((pid, clock, clock + 1)),
                }
            }
            clock += 1;
        }
        spans
    }

    fn stepped_round_robin(jobs: &[Job], quantum: u64) -> Vec<(u32, u64, u64)> {
        let mut remaining: Vec<u64> = jobs.iter().map(|job| job.1).collect();
        let mut queued = vec![false; jobs.len()];
        let mut ready = VecDeque::new();
        let mut clock = 0;
        let mut spans = Vec::new();
        let mut admit = |clock: u64, ready: &mut VecDeque<usize>| {
            for i in 0..jobs.len() {
                if !queued[i] && jobs[i].0 <= clock {
                    queued[i] = true;
                    ready.push_back(i);
                }
            }
        };
        while remaining.iter().any(|&left| left > 0) {
            admit(clock, &mut ready);
            let Some(i) = ready.pop_front() else {
                clock += 1;
                continue;
            };
            let slice = quantum.min(remaining[i]);
            spans.push((i as u32 + 1, clock, clock + slice));
            clock += slice;
            remaining[i] -= slice;
            admit(clock, &mut ready);
            if remaining[i] > 0 {
                ready.push_back(i);
            }
        }
        spans
    }

    fn jobs_workload(jobs: &[Job], quantum: u64) -> Workload {
        let specs: Vec<(i64, i64, i64)> = jobs
            .iter()
            .map(|&(arrival, burst, priority)| (arrival as i64, burst as i64, priority as i64))
            .collect();
        workload(&specs, quantum as i64)
    }

    proptest! {
        #[test]
        fn event_driven_runs_match_unit_stepping(
            jobs in prop::collection::vec((0u64..12, 1u64..9, 0u64..4), 1..7),
            quantum in 1u64..5,
        ) {
            let workload = jobs_workload(&jobs, quantum);
            let simulated = |algorithm: Algorithm| spans(&algorithm.simulate(&workload).unwrap());

            prop_assert_eq!(simulated(Algorithm::Fcfs), stepped_to_completion(&jobs, |job| job.0));
            prop_assert_eq!(simulated(Algorithm::Sjf), stepped_to_completion(&jobs, |job| job.1));
            prop_assert_eq!(simulated(Algorithm::Srtf), stepped_preemptive(&jobs, false));
            prop_assert_eq!(simulated(Algorithm::Priority), stepped_to_completion(&jobs, |job| job.2));
            prop_assert_eq!(simulated(Algorithm::PriorityPreemptive), stepped_preemptive(&jobs, true));
            prop_assert_eq!(simulated(Algorithm::RoundRobin), stepped_round_robin(&jobs, quantum));
        }
    }
}
