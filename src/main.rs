mod bench;
mod heap;
mod logging;
mod priority_queue;
mod sort;
mod types;

use bench::InputPattern;

fn parse_usize_list(arg: &str) -> Option<Vec<usize>> {
    if arg == "-" {
        return None;
    }
    let mut values = Vec::new();
    for part in arg.split(',') {
        if part.trim().is_empty() {
            return None;
        }
        let value = part.trim().parse::<usize>().ok()?;
        values.push(value);
    }
    Some(values)
}

fn print_usage(program: &str) {
    println!("Heap Scheduler CLI");
    println!("Usage:");
    println!("  {program} (run demo)");
    println!("  {program} bench [size] [runs] [repeat] [pattern]");
    println!("  {program} stress [size_sets] [runs] [repeat]");
    println!("  {program} --help");
    println!();
    println!("Size sets are comma-separated lists (e.g., 10,100,500). Use \"-\" to keep defaults.");
    println!("Patterns: random, sorted, reversed.");
    println!("Defaults:");
    println!("  bench  size=500 runs=1000 repeat=5 pattern=random");
    println!("  stress size_sets=10,100,500,1000 runs=100 repeat=3 (sweeps every pattern)");
}

fn exit_with_usage(program: &str, message: &str) -> ! {
    eprintln!("{message}");
    print_usage(program);
    std::process::exit(2);
}

fn main() {
    let program = std::env::args()
        .next()
        .unwrap_or_else(|| "heap_scheduler".to_string());
    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("bench") => {
            let size = args.next().and_then(|v| v.parse::<usize>().ok());
            let runs = args.next().and_then(|v| v.parse::<usize>().ok());
            let repeat = args.next().and_then(|v| v.parse::<usize>().ok());
            let pattern = match args.next() {
                Some(arg) => match InputPattern::parse(&arg) {
                    Some(pattern) => Some(pattern),
                    None => exit_with_usage(&program, &format!("bench: invalid pattern: {arg}")),
                },
                None => None,
            };
            if let Some(extra) = args.next() {
                exit_with_usage(&program, &format!("bench: unexpected argument: {extra}"));
            }
            bench::run_benchmark(size, runs, repeat, pattern);
        }
        Some("stress") => {
            let mut size_sets: Option<Vec<usize>> = None;
            let mut size_sets_skipped = false;
            let mut runs: Option<usize> = None;
            let mut repeat: Option<usize> = None;

            for arg in args {
                if size_sets.is_none() && !size_sets_skipped {
                    if arg == "-" {
                        size_sets_skipped = true;
                    } else if let Some(values) = parse_usize_list(&arg) {
                        size_sets = Some(values);
                    } else {
                        exit_with_usage(&program, &format!("stress: invalid size_sets value: {arg}"));
                    }
                    continue;
                }
                if runs.is_none() {
                    if let Ok(value) = arg.parse::<usize>() {
                        runs = Some(value);
                    } else {
                        exit_with_usage(&program, &format!("stress: invalid runs value: {arg}"));
                    }
                    continue;
                }
                if repeat.is_none() {
                    if let Ok(value) = arg.parse::<usize>() {
                        repeat = Some(value);
                    } else {
                        exit_with_usage(&program, &format!("stress: invalid repeat value: {arg}"));
                    }
                    continue;
                }

                exit_with_usage(&program, &format!("stress: unexpected argument: {arg}"));
            }

            bench::run_stress(size_sets, runs, repeat);
        }
        Some("--help") | Some("-h") | Some("help") => print_usage(&program),
        Some(other) => {
            exit_with_usage(&program, &format!("unknown command: {other}"));
        }
        None => bench::run_demo(),
    }
}
