use super::{policy, Process, Run, Scheduler};

/// Non-preemptive priority scheduling. A lower value means a higher priority.
#[derive(Debug, Default, Clone, Copy)]
pub struct PriorityScheduler;

impl PriorityScheduler {
    pub fn new() -> Self {
        Self
    }
}

impl Scheduler for PriorityScheduler {
    const NAME: &'static str = "Priority Non-Preemptive Scheduling";

    fn schedule(&self, processes: Vec<Process>) -> Run {
        policy::run_to_completion(processes, Process::priority)
    }
}

/// Preemptive priority scheduling. The running process loses the CPU as soon
/// as a process with a numerically lower priority arrives.
#[derive(Debug, Default, Clone, Copy)]
pub struct PreemptivePriorityScheduler;

impl PreemptivePriorityScheduler {
    pub fn new() -> Self {
        Self
    }
}

impl Scheduler for PreemptivePriorityScheduler {
    const NAME: &'static str = "Priority Preemptive Scheduling";

    fn schedule(&self, processes: Vec<Process>) -> Run {
        policy::run_preemptive(processes, Process::priority)
    }
}
