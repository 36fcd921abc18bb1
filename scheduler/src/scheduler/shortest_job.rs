use super::{policy, Process, Run, Scheduler};

/// Non-preemptive shortest job first, picking by total burst.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShortestJobScheduler;

impl ShortestJobScheduler {
    pub fn new() -> Self {
        Self
    }
}

impl Scheduler for ShortestJobScheduler {
    const NAME: &'static str = "SJF Non-Preemptive Scheduling";

    fn schedule(&self, processes: Vec<Process>) -> Run {
        policy::run_to_completion(processes, Process::burst)
    }
}

/// Shortest remaining time first, the preemptive variant of SJF.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShortestRemainingTimeScheduler;

impl ShortestRemainingTimeScheduler {
    pub fn new() -> Self {
        Self
    }
}

impl Scheduler for ShortestRemainingTimeScheduler {
    const NAME: &'static str = "SJF Preemptive (SRTF) Scheduling";

    fn schedule(&self, processes: Vec<Process>) -> Run {
        policy::run_preemptive(processes, Process::remaining)
    }
}
