use std::{error, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationError {
    /// The workload contains no processes.
    EmptyWorkload,
    NegativeArrival { pid: u32, value: i64 },
    NonPositiveBurst { pid: u32, value: i64 },
    NegativePriority { pid: u32, value: i64 },
    NonPositiveQuantum { value: i64 },
    /// The latest arrival plus all bursts does not fit the simulated clock.
    TimeOverflow,
    /// Metrics were requested over an empty set of finished processes.
    EmptyProcessSet,
    /// Metrics were requested for a process that never completed.
    Unfinished { pid: u32 },
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyWorkload => write!(f, "at least one process is required"),
            Self::NegativeArrival { pid, value } => {
                write!(f, "P{} has a negative arrival time ({})", pid, value)
            }
            Self::NonPositiveBurst { pid, value } => {
                write!(f, "P{} must have a positive burst ({})", pid, value)
            }
            Self::NegativePriority { pid, value } => {
                write!(f, "P{} has a negative priority ({})", pid, value)
            }
            Self::NonPositiveQuantum { value } => {
                write!(f, "the time quantum must be positive ({})", value)
            }
            Self::TimeOverflow => {
                write!(f, "arrival and burst times are too large to simulate")
            }
            Self::EmptyProcessSet => write!(f, "cannot average metrics over zero processes"),
            Self::Unfinished { pid } => write!(f, "P{} has not finished", pid),
        }
    }
}

impl error::Error for SimulationError {}
