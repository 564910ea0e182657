//! Tab-separated event log.

use std::io::{self, Write};

use crate::{
    core::SchedEvent,
    sim::Report,
};

pub const IDLE_MARKER: &str = "(IDLE)";

pub fn format_event(report: &Report, event: &SchedEvent) -> String {
    let name = event
        .proc
        .and_then(|id| report.name(id))
        .unwrap_or(IDLE_MARKER);
    format!(
        "{}\t{}\t{}\t{}",
        event.start,
        name,
        event.duration,
        event.outcome.tag()
    )
}

/// Empty workloads report an average of zero.
pub fn format_average(report: &Report) -> String {
    let average = report.average_turnaround().unwrap_or(0.0);
    format!("Average turnaround time: {average:.2}")
}

pub fn write_report<W: Write>(out: &mut W, report: &Report) -> io::Result<()> {
    for event in report.events() {
        writeln!(out, "{}", format_event(report, event))?;
    }
    writeln!(out, "{}", format_average(report))
}

pub fn render(report: &Report) -> String {
    let mut buf = Vec::new();
    write_report(&mut buf, report).expect("Writing to a Vec cannot fail");
    String::from_utf8(buf).expect("Report output is UTF-8")
}
