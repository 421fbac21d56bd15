use super::RunOutcome;

/// Lines of the end-of-run report.
#[must_use]
pub fn summary_lines(outcome: &RunOutcome) -> Vec<String> {
    let stats = &outcome.stats;
    let duration = outcome.duration;
    let mut lines = Vec::new();
    lines.push("Final summary:".to_owned());
    lines.push(format!("Total tasks: {}", stats.count));
    lines.push(format!("Failed requests: {}", outcome.dispatch.failed));
    lines.push(format!("Sum: {} ms", stats.sum_ms));
    lines.push(format!("Average per task: {} ms", stats.average_ms()));
    lines.push(format!(
        "Min per task: {} ms",
        stats.min_latency_ms().unwrap_or(0)
    ));
    lines.push(format!("Max per task: {} ms", stats.max_ms));
    lines.push(format!("Total Duration: {:?}", duration));
    lines.push(format!("Duration in seconds: {}", duration.as_secs_f64()));
    lines.push(format!("Duration in milliseconds: {}", duration.as_millis()));
    lines
}

pub(crate) fn print_summary(outcome: &RunOutcome) {
    println!();
    for line in summary_lines(outcome) {
        println!("{}", line);
    }
}
