use super::{Process, SimulationError};

/// A process as described by the user, before validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessSpec {
    pub arrival: i64,
    pub burst: i64,
    pub priority: i64,
}

impl ProcessSpec {
    pub fn new(arrival: i64, burst: i64, priority: i64) -> Self {
        Self {
            arrival,
            burst,
            priority,
        }
    }
}

/// The validated input shared by every algorithm run.
///
/// Runs never touch these records directly, they each get their own copy
/// through [`Workload::processes`] so results stay comparable.
#[derive(Debug, Clone)]
pub struct Workload {
    processes: Vec<Process>,
    quantum: u64,
}

impl Workload {
    pub fn new(specs: &[ProcessSpec], quantum: i64) -> Result<Self, SimulationError> {
        if specs.is_empty() {
            return Err(SimulationError::EmptyWorkload);
        }
        if quantum <= 0 {
            return Err(SimulationError::NonPositiveQuantum { value: quantum });
        }

        let processes = specs
            .iter()
            .zip(1..)
            .map(|(spec, pid)| validate(pid, spec))
            .collect::<Result<Vec<_>, _>>()?;

        // No clock value ever exceeds the last arrival plus all of the work.
        let latest_arrival = processes.iter().map(Process::arrival).max().unwrap_or_default();
        processes
            .iter()
            .try_fold(latest_arrival, |horizon, process| {
                horizon.checked_add(process.burst())
            })
            .ok_or(SimulationError::TimeOverflow)?;

        Ok(Self {
            processes,
            quantum: quantum as u64,
        })
    }

    /// A fresh, unmutated copy of the validated process set.
    pub fn processes(&self) -> Vec<Process> {
        self.processes.clone()
    }

    pub fn quantum(&self) -> u64 {
        self.quantum
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }
}

fn validate(pid: u32, spec: &ProcessSpec) -> Result<Process, SimulationError> {
    if spec.arrival < 0 {
        return Err(SimulationError::NegativeArrival {
            pid,
            value: spec.arrival,
        });
    }
    if spec.burst <= 0 {
        return Err(SimulationError::NonPositiveBurst {
            pid,
            value: spec.burst,
        });
    }
    if spec.priority < 0 {
        return Err(SimulationError::NegativePriority {
            pid,
            value: spec.priority,
        });
    }

    Ok(Process::with_priority(
        pid,
        spec.arrival as u64,
        spec.burst as u64,
        spec.priority as u64,
    ))
}
