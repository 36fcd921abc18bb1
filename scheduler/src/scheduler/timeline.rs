use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Interval {
    pub pid: u32,
    pub start: u64,
    pub end: u64,
}

impl Interval {
    pub fn duration(&self) -> u64 {
        self.end - self.start
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{} [{}-{}]", self.pid, self.start, self.end)
    }
}

/// A stretch of the timeline: either a process running or the CPU idling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Busy(Interval),
    Idle { start: u64, end: u64 },
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Busy(interval) => write!(f, "{}", interval),
            Segment::Idle { start, end } => write!(f, "idle [{}-{}]", start, end),
        }
    }
}

/// Ordered, non-overlapping execution intervals of a single run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Timeline {
    intervals: Vec<Interval>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one dispatch as its own interval.
    pub fn push(&mut self, pid: u32, start: u64, end: u64) {
        debug_assert!(start < end);
        debug_assert!(self.intervals.last().map_or(true, |last| last.end <= start));
        self.intervals.push(Interval { pid, start, end });
    }

    /// Like [`Timeline::push`], but continues the last interval when the same
    /// process keeps the CPU without a gap.
    pub fn extend(&mut self, pid: u32, start: u64, end: u64) {
        match self.intervals.last_mut() {
            Some(last) if last.pid == pid && last.end == start => last.end = end,
            _ => self.push(pid, start, end),
        }
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// The intervals with the idle periods between them, starting from time zero.
    pub fn segments(&self) -> Vec<Segment> {
        let mut clock = 0;
        let mut segments = Vec::with_capacity(self.intervals.len());
        for &interval in &self.intervals {
            if interval.start > clock {
                segments.push(Segment::Idle {
                    start: clock,
                    end: interval.start,
                });
            }
            segments.push(Segment::Busy(interval));
            clock = interval.end;
        }
        segments
    }

    pub fn idle_time(&self) -> u64 {
        self.segments()
            .iter()
            .map(|segment| match segment {
                Segment::Idle { start, end } => end - start,
                Segment::Busy(_) => 0,
            })
            .sum()
    }

    /// Total CPU time the given process received.
    pub fn cpu_time(&self, pid: u32) -> u64 {
        self.intervals
            .iter()
            .filter(|interval| interval.pid == pid)
            .map(Interval::duration)
            .sum()
    }
}
