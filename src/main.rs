use std::{
    io::{self, BufWriter, Write},
    path::PathBuf,
};

use anyhow::Context;
use clap::{
    CommandFactory, Parser,
    error::{ContextKind, ContextValue, ErrorKind},
};
use env_logger::{Builder, Env};
use log::info;
use rr_sched::{
    PriorityOrder, Report, SimConfig, input::read_descriptors, output::write_report, simulate,
};

/// Simulate a priority round-robin CPU scheduler over a workload file
#[derive(Parser, Debug)]
#[command(name = "rr_sched", version, long_about = None)]
struct Args {
    /// Workload file, one `name priority arrival total block_interval` per line
    input_file: PathBuf,

    /// Maximum CPU time granted per dispatch
    time_slice: u64,

    /// Time a process stays blocked after an I/O event
    block_duration: u64,

    /// Treat numerically smaller priorities as more urgent
    #[arg(long, default_value_t = false)]
    lower_first: bool,
}

fn main() -> anyhow::Result<()> {
    Builder::from_env(Env::default().default_filter_or("warn"))
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) if is_wrong_arg_count(&err) => {
            println!("{}", Args::command().render_usage());
            return Ok(());
        }
        Err(err) => err.exit(),
    };

    let mut config = SimConfig::new(args.time_slice, args.block_duration)
        .context("invalid scheduler parameters")?;
    if args.lower_first {
        config = config.with_priority_order(PriorityOrder::LowerFirst);
    }

    let descriptors = read_descriptors(&args.input_file)
        .with_context(|| format!("failed to load workload {}", args.input_file.display()))?;
    let report = simulate(&descriptors, &config).context("simulation failed")?;
    log_summary(&report);

    let mut out = BufWriter::new(io::stdout().lock());
    write_report(&mut out, &report).context("failed to write event log")?;
    out.flush()?;

    Ok(())
}

// Too few positionals, or a surplus one. Unknown `--flags` fall through to
// clap's own error.
fn is_wrong_arg_count(err: &clap::Error) -> bool {
    match err.kind() {
        ErrorKind::MissingRequiredArgument => true,
        ErrorKind::UnknownArgument => matches!(
            err.get(ContextKind::InvalidArg),
            Some(ContextValue::String(arg)) if !arg.starts_with('-')
        ),
        _ => false,
    }
}

fn log_summary(report: &Report) {
    for stats in report.process_stats() {
        info!(
            "{}: turnaround {} waiting {} response {}",
            stats.name,
            stats.turnaround,
            stats.waiting_time,
            stats.response_time()
        );
    }
    if let (Some(waiting), Some(response)) =
        (report.mean_waiting_time(), report.mean_response_time())
    {
        info!("Average waiting time: {waiting:.2}, average response time: {response:.2}");
    }
    if let Some(utilization) = report.cpu_utilization() {
        info!("CPU utilization: {:.1}%", utilization * 100.0);
    }
}
