use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
    /// Not yet admitted to the ready set.
    Pending,
    Ready,
    Running,
    /// `finish` is set and nothing about the process changes anymore.
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Process {
    pid: u32,
    arrival: u64,
    burst: u64,
    priority: u64,
    remaining: u64,
    state: ProcessState,
    start: Option<u64>,
    finish: Option<u64>,
}

impl Process {
    const DEFAULT_PRIORITY: u64 = 0;

    pub fn new(pid: u32, arrival: u64, burst: u64) -> Self {
        Process::with_priority(pid, arrival, burst, Process::DEFAULT_PRIORITY)
    }

    pub fn with_priority(pid: u32, arrival: u64, burst: u64, priority: u64) -> Self {
        Self {
            pid,
            arrival,
            burst,
            priority,
            remaining: burst,
            state: ProcessState::Pending,
            start: None,
            finish: None,
        }
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    pub fn arrival(&self) -> u64 {
        self.arrival
    }

    pub fn burst(&self) -> u64 {
        self.burst
    }

    pub fn priority(&self) -> u64 {
        self.priority
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    pub fn state(&self) -> ProcessState {
        self.state
    }

    pub fn start(&self) -> Option<u64> {
        self.start
    }

    /// First dispatch time. Identical to `start` in this model.
    pub fn response(&self) -> Option<u64> {
        self.start
    }

    pub fn finish(&self) -> Option<u64> {
        self.finish
    }

    pub fn is_done(&self) -> bool {
        self.state == ProcessState::Done
    }

    /// Arrived and still holding work.
    pub fn is_eligible(&self, clock: u64) -> bool {
        self.arrival <= clock && !self.is_done()
    }

    /// `Pending -> Ready` once the process has arrived. Returns whether a transition happened.
    pub fn admit(&mut self, clock: u64) -> bool {
        if self.state == ProcessState::Pending && self.arrival <= clock {
            self.state = ProcessState::Ready;
            true
        } else {
            false
        }
    }

    /// `Ready -> Running`. The first dispatch stamps `start` (and so `response`).
    pub fn dispatch(&mut self, clock: u64) {
        debug_assert_eq!(self.state, ProcessState::Ready, "P{} dispatched while not ready", self.pid);
        if self.start.is_none() {
            debug!("P{} first dispatched at {}", self.pid, clock);
            self.start = Some(clock);
        }
        self.state = ProcessState::Running;
    }

    /// `Running -> Ready` with work still outstanding.
    pub fn preempt(&mut self) {
        debug_assert_eq!(self.state, ProcessState::Running);
        debug_assert!(self.remaining > 0);
        self.state = ProcessState::Ready;
    }

    /// Runs for at most `units` starting at `clock` and returns the clock afterwards.
    /// Reaching zero remaining work moves the process to `Done` and stamps `finish`.
    pub fn execute(&mut self, clock: u64, units: u64) -> u64 {
        debug_assert_eq!(self.state, ProcessState::Running);
        let executed = units.min(self.remaining);
        self.remaining -= executed;
        let clock = clock + executed;

        if self.remaining == 0 {
            debug!("P{} completed at {}", self.pid, clock);
            self.finish = Some(clock);
            self.state = ProcessState::Done;
        }
        clock
    }
}
