use crate::scheduler::Report;
use std::io::{self, Write};

pub fn write_text<W: Write>(mut out: W, reports: &[Report]) -> io::Result<()> {
    for report in reports {
        writeln!(out, "\n--- {} ---", report.name)?;

        let timeline: Vec<String> = report
            .timeline
            .segments()
            .iter()
            .map(ToString::to_string)
            .collect();
        writeln!(out, "{}", timeline.join(" "))?;

        writeln!(
            out,
            "\n{:>4} {:>8} {:>6} {:>9} {:>6} {:>7} {:>6} {:>8} {:>9}",
            "PID", "Arrival", "Burst", "Priority", "Start", "Finish", "TAT", "Waiting", "Response"
        )?;
        for stats in &report.processes {
            writeln!(
                out,
                "{:>4} {:>8} {:>6} {:>9} {:>6} {:>7} {:>6} {:>8} {:>9}",
                format!("P{}", stats.pid),
                stats.arrival,
                stats.burst,
                stats.priority,
                stats.start,
                stats.finish,
                stats.turnaround,
                stats.waiting,
                stats.response
            )?;
        }

        writeln!(out, "\n{}", report.metrics)?;
        writeln!(
            out,
            "Makespan: {}, CPU utilization: {:.2}%",
            report.metrics.makespan,
            report.metrics.utilization * 100.0
        )?;
    }
    Ok(())
}

pub fn write_json<W: Write>(out: W, reports: &[Report]) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(out, reports)
}
