mod display;
mod error;
mod fcfs;
mod metrics;
mod policy;
mod priority;
mod process;
mod round_robin;
mod runner;
mod shortest_job;
mod timeline;
mod workload;

pub use error::SimulationError;
pub use fcfs::FcfsScheduler;
pub use metrics::{Metrics, ProcessStats};
pub use priority::{PreemptivePriorityScheduler, PriorityScheduler};
pub use process::{Process, ProcessState};
pub use round_robin::RoundRobinScheduler;
pub use runner::{Algorithm, ProcessRunner, Report, ReportBrowser, RunnerEvent};
pub use shortest_job::{ShortestJobScheduler, ShortestRemainingTimeScheduler};
pub use timeline::{Interval, Segment, Timeline};
pub use workload::{ProcessSpec, Workload};

pub const DEFAULT_QUANTUM: u64 = 2;

/// Outcome of one algorithm over its own copy of the workload.
#[derive(Debug, Clone)]
pub struct Run {
    /// Every process of the run, all `Done`, in pid order.
    pub processes: Vec<Process>,
    pub timeline: Timeline,
}

pub trait Scheduler {
    const NAME: &'static str;

    /// Simulates the whole process set from time zero until every process is done.
    fn schedule(&self, processes: Vec<Process>) -> Run;
}
