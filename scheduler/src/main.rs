use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use env_logger::Builder;
use log::{info, LevelFilter};
use scheduling_simulator::{
    input::{self, WorkloadInput},
    report,
    scheduler::{Algorithm, ProcessRunner, ReportBrowser, Workload, DEFAULT_QUANTUM},
};
use std::{
    fs::File,
    io::{self, BufReader, Write},
    path::PathBuf,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Timelines and averages as plain text
    Text,
    /// Every report as one JSON document
    Json,
    /// Interactive terminal view
    Tui,
}

/// Simulate classic CPU scheduling algorithms over one workload
#[derive(Parser, Debug)]
#[command(name = "scheduling-simulator", version, long_about = None)]
struct Args {
    /// Workload file with one `arrival burst priority` line per process.
    /// Prompts on stdin when omitted
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Round Robin time quantum, overrides the one given by the input
    #[arg(short, long, allow_negative_numbers = true)]
    quantum: Option<i64>,

    /// Only run the given algorithms (repeatable). Reports keep the usual order
    #[arg(short, long = "algorithm", value_enum)]
    algorithms: Vec<Algorithm>,

    /// How to render the reports
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Log more (-v info, -vv debug, -vvv trace). RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let input = read_input(&args)?;
    let quantum = args
        .quantum
        .or(input.quantum)
        .unwrap_or(DEFAULT_QUANTUM as i64);
    let workload = Workload::new(&input.processes, quantum).context("Invalid workload")?;
    info!(
        "Loaded {} processes, quantum {}",
        workload.len(),
        workload.quantum()
    );

    let runner = if args.algorithms.is_empty() {
        ProcessRunner::new(workload)
    } else {
        ProcessRunner::with_algorithms(workload, &args.algorithms)
    };
    let reports = runner.run().context("Simulation failed")?;

    match args.format {
        OutputFormat::Text => report::write_text(io::stdout().lock(), &reports)?,
        OutputFormat::Json => {
            let mut stdout = io::stdout().lock();
            report::write_json(&mut stdout, &reports)?;
            writeln!(stdout)?;
        }
        OutputFormat::Tui => {
            let mut browser = ReportBrowser::new(reports)?;
            while browser.run()? {}
        }
    }
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();
}

fn read_input(args: &Args) -> Result<WorkloadInput> {
    match &args.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open file: {}", path.display()))?;
            input::parse_workload(BufReader::new(file))
                .with_context(|| format!("Failed to read workload from {}", path.display()))
        }
        None => input::prompt_workload(io::stdin().lock(), io::stdout()),
    }
}
