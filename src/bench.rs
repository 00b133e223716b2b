//! Demo, benchmark, and stress-test runners for the heap scheduler.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::log_dev;
use crate::priority_queue::MinHeapPriorityQueue;
use crate::sort::heap_sort;
use crate::types::{Priority, Task, TaskId};

// Benchmark defaults (size mirrors the classic 500-element workload).
const DEFAULT_BENCH_SIZE: usize = 500;
const DEFAULT_BENCH_RUNS: usize = 1000;
const DEFAULT_BENCH_REPEAT: usize = 5;
// Stress defaults.
const DEFAULT_STRESS_SIZES: [usize; 4] = [10, 100, 500, 1000];
const DEFAULT_STRESS_RUNS: usize = 100;
const DEFAULT_STRESS_REPEAT: usize = 3;
// Fixed seed so bench and stress rows stay comparable across runs.
const RANDOM_INPUT_SEED: u64 = 42;

const CSV_HEADER: &str =
    "pattern,size,runs,repeat,min_elapsed_ms,avg_elapsed_ms,throughput_elems_per_s,cpu_user_s,cpu_sys_s,sorted_ok";

/// Best-effort CPU user/system time snapshot (seconds) on Unix platforms.
#[cfg(unix)]
fn cpu_times_seconds() -> Option<(f64, f64)> {
    let mut usage: libc::rusage = unsafe { std::mem::zeroed() };
    let rc = unsafe { libc::getrusage(libc::RUSAGE_SELF, &mut usage) };
    if rc != 0 {
        return None;
    }
    let user = usage.ru_utime.tv_sec as f64 + (usage.ru_utime.tv_usec as f64 / 1_000_000.0);
    let sys = usage.ru_stime.tv_sec as f64 + (usage.ru_stime.tv_usec as f64 / 1_000_000.0);
    Some((user, sys))
}

/// Stub on non-Unix platforms.
#[cfg(not(unix))]
fn cpu_times_seconds() -> Option<(f64, f64)> {
    None
}

/// Input shapes the benchmark can sort.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputPattern {
    Random,
    Sorted,
    Reversed,
}

impl InputPattern {
    const ALL: [InputPattern; 3] = [
        InputPattern::Random,
        InputPattern::Sorted,
        InputPattern::Reversed,
    ];

    pub fn parse(arg: &str) -> Option<Self> {
        match arg {
            "random" => Some(InputPattern::Random),
            "sorted" => Some(InputPattern::Sorted),
            "reversed" => Some(InputPattern::Reversed),
            _ => None,
        }
    }

    fn label(self) -> &'static str {
        match self {
            InputPattern::Random => "random",
            InputPattern::Sorted => "sorted",
            InputPattern::Reversed => "reversed",
        }
    }
}

fn make_input(pattern: InputPattern, size: usize) -> Vec<i64> {
    match pattern {
        InputPattern::Sorted => (0..size as i64).collect(),
        InputPattern::Reversed => (0..size as i64).rev().collect(),
        InputPattern::Random => {
            let mut rng = StdRng::seed_from_u64(RANDOM_INPUT_SEED);
            (0..size).map(|_| rng.gen_range(0..=size as i64)).collect()
        }
    }
}

/// Aggregated metrics from a single benchmark configuration.
struct BenchResult {
    pattern: InputPattern,
    size: usize,
    runs: usize,
    repeat: usize,
    min_elapsed_ms: f64,
    avg_elapsed_ms: f64,
    throughput: f64,
    cpu_user_s: Option<f64>,
    cpu_sys_s: Option<f64>,
    sorted_ok: bool,
}

fn benchmark_once(pattern: InputPattern, size: usize, runs: usize, repeat: usize) -> BenchResult {
    debug_assert!(size > 0, "size must be > 0");
    debug_assert!(runs > 0, "runs must be > 0");
    debug_assert!(repeat > 0, "repeat must be > 0");

    let base = make_input(pattern, size);
    let mut scratch = base.clone();

    // One repetition = `runs` restore-and-sort cycles; keeping the
    // minimum across repetitions filters out scheduler noise.
    let mut elapsed_ms = Vec::with_capacity(repeat);
    let cpu_start = cpu_times_seconds();
    for _ in 0..repeat {
        let start = Instant::now();
        for _ in 0..runs {
            scratch.copy_from_slice(&base);
            heap_sort(&mut scratch);
        }
        elapsed_ms.push(start.elapsed().as_secs_f64() * 1000.0);
    }
    let (cpu_user_s, cpu_sys_s) = match (cpu_start, cpu_times_seconds()) {
        (Some((user_start, sys_start)), Some((user_end, sys_end))) => {
            (Some(user_end - user_start), Some(sys_end - sys_start))
        }
        _ => (None, None),
    };

    let min_elapsed_ms = elapsed_ms.iter().copied().fold(f64::INFINITY, f64::min);
    let avg_elapsed_ms = elapsed_ms.iter().sum::<f64>() / repeat as f64;
    let throughput = if min_elapsed_ms > 0.0 {
        (size * runs) as f64 / (min_elapsed_ms / 1000.0)
    } else {
        0.0
    };
    let sorted_ok = scratch.windows(2).all(|pair| pair[0] <= pair[1]);

    BenchResult {
        pattern,
        size,
        runs,
        repeat,
        min_elapsed_ms,
        avg_elapsed_ms,
        throughput,
        cpu_user_s,
        cpu_sys_s,
        sorted_ok,
    }
}

fn print_result_row(result: &BenchResult) {
    let cpu_user = result
        .cpu_user_s
        .map(|v| format!("{v:.4}"))
        .unwrap_or_else(|| "NA".to_string());
    let cpu_sys = result
        .cpu_sys_s
        .map(|v| format!("{v:.4}"))
        .unwrap_or_else(|| "NA".to_string());
    println!(
        "{},{},{},{},{:.3},{:.3},{:.0},{},{},{}",
        result.pattern.label(),
        result.size,
        result.runs,
        result.repeat,
        result.min_elapsed_ms,
        result.avg_elapsed_ms,
        result.throughput,
        cpu_user,
        cpu_sys,
        result.sorted_ok
    );
    if !result.sorted_ok {
        eprintln!("# violation,unsorted_output,{}", result.pattern.label());
    }
}

/// Run a single benchmark with optional parameter overrides.
pub fn run_benchmark(
    size: Option<usize>,
    runs: Option<usize>,
    repeat: Option<usize>,
    pattern: Option<InputPattern>,
) {
    let size = size.unwrap_or(DEFAULT_BENCH_SIZE);
    let runs = runs.unwrap_or(DEFAULT_BENCH_RUNS);
    let repeat = repeat.unwrap_or(DEFAULT_BENCH_REPEAT);
    let pattern = pattern.unwrap_or(InputPattern::Random);
    if size == 0 {
        eprintln!("benchmark error: size must be > 0");
        return;
    }
    if runs == 0 {
        eprintln!("benchmark error: runs must be > 0");
        return;
    }
    if repeat == 0 {
        eprintln!("benchmark error: repeat must be > 0");
        return;
    }

    log_dev!(
        "[BENCH] pattern={} size={size} runs={runs} repeat={repeat}",
        pattern.label()
    );
    let result = benchmark_once(pattern, size, runs, repeat);
    println!("{CSV_HEADER}");
    print_result_row(&result);
}

/// Sweep size and pattern configurations and print CSV output.
pub fn run_stress(size_sets: Option<Vec<usize>>, runs: Option<usize>, repeat: Option<usize>) {
    let runs = runs.unwrap_or(DEFAULT_STRESS_RUNS);
    let repeat = repeat.unwrap_or(DEFAULT_STRESS_REPEAT);
    let mut size_sets = size_sets.unwrap_or_else(|| DEFAULT_STRESS_SIZES.to_vec());
    if runs == 0 {
        eprintln!("stress error: runs must be > 0");
        return;
    }
    if repeat == 0 {
        eprintln!("stress error: repeat must be > 0");
        return;
    }
    if size_sets.iter().any(|&size| size == 0) {
        let before = size_sets.len();
        size_sets.retain(|&size| size > 0);
        let dropped = before.saturating_sub(size_sets.len());
        if dropped > 0 {
            eprintln!("stress warning: ignored {dropped} size set(s) <= 0");
        }
        if size_sets.is_empty() {
            eprintln!("stress error: sizes must be > 0");
            return;
        }
    }

    println!("{CSV_HEADER}");
    for size in size_sets {
        for pattern in InputPattern::ALL {
            let result = benchmark_once(pattern, size, runs, repeat);
            print_result_row(&result);
        }
    }
}

/// Run the default demo: load the six-task workload, then exercise
/// peek, extract, and decrease-priority, printing queue state before
/// and after along with a machine-checkable summary.
pub fn run_demo() {
    log_dev!("[DEMO] start");

    let mut queue = MinHeapPriorityQueue::new();
    let workload = [
        Task::new(1, 3, "10:00", "12:00"),
        Task::new(2, 5, "10:05", "12:05"),
        Task::new(3, 2, "10:10", "12:10"),
        Task::new(4, 3, "10:23", "12:15"),
        Task::new(5, 1, "10:16", "12:20"),
        Task::new(6, 5, "10:30", "12:30"),
    ];
    let tasks_inserted = workload.len();
    for task in workload {
        log_dev!("[QUEUE] insert task {} priority {}", task.id, task.priority);
        queue.insert(task);
    }

    println!("QUEUE BEFORE EXTRACTION");
    for task in queue.iter() {
        println!(
            "task_id={} priority={} arrival={} deadline={}",
            task.id, task.priority, task.arrival_time, task.deadline
        );
    }

    let peeked = queue.peek_minimum().expect("queue was just loaded").id;
    log_dev!("[QUEUE] most urgent task is {peeked}");

    fn take(
        queue: &mut MinHeapPriorityQueue,
        extracted_ids: &mut Vec<TaskId>,
        extracted_priorities: &mut Vec<Priority>,
    ) {
        let task = queue.extract_minimum().expect("queue has tasks");
        log_dev!("[QUEUE] extracted task {} priority {}", task.id, task.priority);
        extracted_ids.push(task.id);
        extracted_priorities.push(task.priority);
    }

    let mut extracted_ids = Vec::new();
    let mut extracted_priorities = Vec::new();

    // Two extractions, then two urgency bumps, then drain.
    take(&mut queue, &mut extracted_ids, &mut extracted_priorities);
    take(&mut queue, &mut extracted_ids, &mut extracted_priorities);

    queue.decrease_priority(2, 2).expect("strict decrease");
    log_dev!("[QUEUE] task 2 priority lowered to 2");
    queue.decrease_priority(6, 4).expect("strict decrease");
    log_dev!("[QUEUE] task 6 priority lowered to 4");

    take(&mut queue, &mut extracted_ids, &mut extracted_priorities);

    println!("QUEUE AFTER EXTRACTION");
    println!("remaining={}", queue.len());
    for task in queue.iter() {
        println!(
            "task_id={} priority={} arrival={} deadline={}",
            task.id, task.priority, task.arrival_time, task.deadline
        );
    }

    while !queue.is_empty() {
        take(&mut queue, &mut extracted_ids, &mut extracted_priorities);
    }
    // The drained queue must refuse further extraction.
    let empty_queue_error = queue.extract_minimum().is_err();

    let non_decreasing = extracted_priorities
        .windows(2)
        .all(|pair| pair[0] <= pair[1]);

    println!("DEMO SUMMARY");
    println!("tasks_inserted={tasks_inserted}");
    println!("first_peeked_id={peeked}");
    println!("extraction_order={extracted_ids:?}");
    println!("extraction_priorities={extracted_priorities:?}");
    println!("priorities_non_decreasing={non_decreasing}");
    println!("empty_queue_error={empty_queue_error}");
    println!("queue_empty={}", queue.is_empty());
}
