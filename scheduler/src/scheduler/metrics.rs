use super::{Process, SimulationError};
use serde::Serialize;
use std::fmt;

/// Per-process figures derived from a finished record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProcessStats {
    pub pid: u32,
    pub arrival: u64,
    pub burst: u64,
    pub priority: u64,
    pub start: u64,
    pub finish: u64,
    pub turnaround: u64,
    pub waiting: u64,
    pub response: u64,
}

impl ProcessStats {
    pub fn of(process: &Process) -> Result<Self, SimulationError> {
        let unfinished = SimulationError::Unfinished { pid: process.pid() };
        let (start, finish) = match (process.response(), process.finish()) {
            (Some(start), Some(finish)) if process.is_done() => (start, finish),
            _ => return Err(unfinished),
        };

        let turnaround = finish - process.arrival();
        Ok(Self {
            pid: process.pid(),
            arrival: process.arrival(),
            burst: process.burst(),
            priority: process.priority(),
            start,
            finish,
            turnaround,
            waiting: turnaround - process.burst(),
            response: start - process.arrival(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metrics {
    pub avg_turnaround: f64,
    pub avg_waiting: f64,
    pub avg_response: f64,
    /// Time at which the last process finished.
    pub makespan: u64,
    /// Share of the makespan the CPU spent running processes, in `[0, 1]`.
    pub utilization: f64,
}

impl Metrics {
    /// Averages over a finished process set. The set must not be empty.
    pub fn calculate(processes: &[Process]) -> Result<Self, SimulationError> {
        let stats = processes
            .iter()
            .map(ProcessStats::of)
            .collect::<Result<Vec<_>, _>>()?;
        Metrics::from_stats(&stats)
    }

    pub fn from_stats(stats: &[ProcessStats]) -> Result<Self, SimulationError> {
        if stats.is_empty() {
            return Err(SimulationError::EmptyProcessSet);
        }

        let count = stats.len() as f64;
        // Summed as floats, a u64 total can overflow on large workloads.
        let total = |field: fn(&ProcessStats) -> u64| {
            stats.iter().map(|s| field(s) as f64).sum::<f64>()
        };

        let makespan = stats.iter().map(|s| s.finish).max().unwrap_or_default();
        let busy = total(|s| s.burst);

        Ok(Self {
            avg_turnaround: total(|s| s.turnaround) / count,
            avg_waiting: total(|s| s.waiting) / count,
            avg_response: total(|s| s.response) / count,
            makespan,
            utilization: busy / makespan as f64,
        })
    }
}

impl fmt::Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Average Turnaround Time: {:.2}", self.avg_turnaround)?;
        writeln!(f, "Average Waiting Time: {:.2}", self.avg_waiting)?;
        write!(f, "Average Response Time: {:.2}", self.avg_response)
    }
}
