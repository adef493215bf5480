//! Human-readable run summary.

use crate::pool::PoolReport;
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};

/// Format a pool report as a table, one row per worker plus a total row.
pub fn format_table(report: &PoolReport) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        "Worker",
        "Iterations",
        "Succeeded",
        "Failed",
        "Duration",
        "Records/sec",
    ]);

    for worker in &report.workers {
        let failed_cell = if worker.failed > 0 {
            Cell::new(format_number(worker.failed)).fg(Color::Red)
        } else {
            Cell::new("0")
        };

        table.add_row(vec![
            Cell::new(worker.worker_id),
            Cell::new(format_number(worker.iterations_completed)),
            Cell::new(format_number(worker.succeeded)).fg(Color::Green),
            failed_cell,
            Cell::new(format!("{} ms", worker.elapsed.as_millis())),
            Cell::new(format!("{:.1}", worker.records_per_second())),
        ]);
    }

    table.add_row(vec![
        Cell::new("TOTAL").fg(Color::Cyan),
        Cell::new(format_number(report.total_submissions())),
        Cell::new(format_number(report.total_succeeded())),
        Cell::new(format_number(report.total_failed())),
        Cell::new(format!("{} ms*", report.wall_clock.as_millis())),
        Cell::new(format!("{:.1}", report.aggregate_records_per_second())),
    ]);

    let mut output = table.to_string();
    output.push_str("\n* Wall clock (parallel)\n");
    output
}

/// Format number with thousand separators.
fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worker::WorkerResult;
    use std::time::Duration;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn test_format_table() {
        let report = PoolReport {
            workers: vec![
                WorkerResult {
                    worker_id: 1,
                    iterations_completed: 100,
                    elapsed: Duration::from_millis(1500),
                    succeeded: 97,
                    failed: 3,
                },
                WorkerResult {
                    worker_id: 2,
                    iterations_completed: 100,
                    elapsed: Duration::from_millis(2000),
                    succeeded: 100,
                    failed: 0,
                },
            ],
            wall_clock: Duration::from_millis(2000),
        };

        let output = format_table(&report);
        assert!(output.contains("Worker"));
        assert!(output.contains("TOTAL"));
        assert!(output.contains("1500 ms"));
        assert!(output.contains("2000 ms*"));
        assert!(output.contains("197"));
        assert!(output.contains("100.0"));
        assert!(output.contains("Wall clock"));
    }
}
