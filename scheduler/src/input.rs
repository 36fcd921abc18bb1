//! Reading workloads, either from a file or interactively.
//!
//! A workload file holds one process per line as `arrival burst priority`.
//! Lines starting with `#` and blank lines are ignored, and a line of the
//! form `quantum <n>` sets the Round Robin quantum:
//!
//! ```text
//! # arrival burst priority
//! 0 5 2
//! 1 3 1
//! 2 8 3
//! quantum 2
//! ```

use crate::scheduler::ProcessSpec;
use anyhow::{bail, Context, Result};
use log::{debug, warn};
use std::collections::VecDeque;
use std::io::{BufRead, Write};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadInput {
    pub processes: Vec<ProcessSpec>,
    pub quantum: Option<i64>,
}

pub fn parse_workload<R: BufRead>(reader: R) -> Result<WorkloadInput> {
    let mut processes = Vec::new();
    let mut quantum = None;

    for (number, line) in reader.lines().enumerate() {
        let number = number + 1;
        let line = line.with_context(|| format!("Failed to read line {}", number))?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut parts = line.split_whitespace().peekable();
        if parts.next_if_eq(&"quantum").is_some() {
            let value = parse_field(parts.next(), "quantum", number)?;
            if quantum.replace(value).is_some() {
                warn!("Line {}: quantum given more than once, using {}", number, value);
            }
        } else {
            let arrival = parse_field(parts.next(), "arrival", number)?;
            let burst = parse_field(parts.next(), "burst", number)?;
            let priority = parse_field(parts.next(), "priority", number)?;
            processes.push(ProcessSpec::new(arrival, burst, priority));
        }

        if parts.next().is_some() {
            warn!("Line {}: ignoring trailing input \"{}\"", number, line);
        }
    }

    debug!("Read {} processes from the workload file", processes.len());
    Ok(WorkloadInput { processes, quantum })
}

fn parse_field(field: Option<&str>, name: &str, line: usize) -> Result<i64> {
    let field = field.with_context(|| format!("Line {}: missing {}", line, name))?;
    field
        .parse::<i64>()
        .with_context(|| format!("Line {}: invalid {} \"{}\"", line, name, field))
}

/// Asks for the process count, each process and the quantum, one prompt at a time.
pub fn prompt_workload<R: BufRead, W: Write>(input: R, mut output: W) -> Result<WorkloadInput> {
    let mut tokens = Tokens::new(input);

    prompt(&mut output, "Enter number of processes: ")?;
    let count = tokens.next_int("process count")?;
    if count <= 0 {
        bail!("The number of processes must be positive, got {}", count);
    }

    // The count is untrusted, so the list only grows as processes are typed in.
    let mut processes = Vec::new();
    for pid in 1..=count {
        prompt(&mut output, &format!("Process {} (Arrival Burst Priority): ", pid))?;
        let arrival = tokens.next_int("arrival")?;
        let burst = tokens.next_int("burst")?;
        let priority = tokens.next_int("priority")?;
        processes.push(ProcessSpec::new(arrival, burst, priority));
    }

    prompt(&mut output, "Enter time quantum (for Round Robin): ")?;
    let quantum = tokens.next_int("time quantum")?;

    Ok(WorkloadInput {
        processes,
        quantum: Some(quantum),
    })
}

fn prompt<W: Write>(output: &mut W, text: &str) -> Result<()> {
    output.write_all(text.as_bytes())?;
    output.flush().context("Failed to write prompt")
}

/// Whitespace separated tokens, read a line at a time as they are needed.
struct Tokens<R> {
    reader: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> Tokens<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
        }
    }

    fn next_int(&mut self, name: &str) -> Result<i64> {
        while self.pending.is_empty() {
            let mut line = String::new();
            let read = self
                .reader
                .read_line(&mut line)
                .with_context(|| format!("Failed to read {}", name))?;
            if read == 0 {
                bail!("Input ended before the {} was given", name);
            }
            self.pending.extend(line.split_whitespace().map(str::to_owned));
        }

        let token = self.pending.pop_front().unwrap_or_default();
        token
            .parse::<i64>()
            .with_context(|| format!("Invalid {} \"{}\"", name, token))
    }
}
