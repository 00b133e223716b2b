//! CLI integration tests for the demo and bench modes.

use std::process::Command;

#[test]
fn demo_cli_extracts_in_priority_order() {
    let bin = env!("CARGO_BIN_EXE_heap_scheduler");
    // Run the demo binary with default settings.
    let output = Command::new(bin)
        .output()
        .expect("failed to run demo binary");

    // Demo should exit cleanly.
    assert!(
        output.status.success(),
        "demo exited with non-zero status: {:?}",
        output.status
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("DEMO SUMMARY"),
        "demo summary missing from output"
    );

    // The unique-priority prefix of the extraction order is fixed:
    // task 5 (priority 1), task 3 (priority 2), then task 2 once its
    // priority drops to 2. Ties beyond that may land either way.
    let order_line = stdout
        .lines()
        .find(|line| line.starts_with("extraction_order="))
        .expect("extraction_order line missing");
    assert!(
        order_line.starts_with("extraction_order=[5, 3, 2"),
        "unexpected extraction order: {order_line}"
    );

    let priorities_line = stdout
        .lines()
        .find(|line| line.starts_with("priorities_non_decreasing="))
        .expect("priorities_non_decreasing line missing");
    assert_eq!(priorities_line.trim(), "priorities_non_decreasing=true");

    // Draining the queue must leave it empty and refusing extraction.
    let empty_line = stdout
        .lines()
        .find(|line| line.starts_with("queue_empty="))
        .expect("queue_empty line missing");
    assert_eq!(empty_line.trim(), "queue_empty=true");

    let error_line = stdout
        .lines()
        .find(|line| line.starts_with("empty_queue_error="))
        .expect("empty_queue_error line missing");
    assert_eq!(error_line.trim(), "empty_queue_error=true");
}

#[test]
fn bench_cli_emits_csv_row() {
    let bin = env!("CARGO_BIN_EXE_heap_scheduler");
    // Tiny workload to keep the test fast.
    let output = Command::new(bin)
        .args(["bench", "32", "4", "2", "reversed"])
        .output()
        .expect("failed to run bench binary");
    assert!(
        output.status.success(),
        "bench exited with non-zero status: {:?}",
        output.status
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.lines().any(|line| line.starts_with("pattern,size,")),
        "CSV header missing"
    );
    let row = stdout
        .lines()
        .find(|line| line.starts_with("reversed,32,4,2,"))
        .expect("CSV row missing");
    assert!(
        row.ends_with(",true"),
        "bench output failed validation: {row}"
    );
}
