//! Debug-build tracing for the demo and bench drivers. The library
//! modules never log; summary output goes through plain `println!`.

use std::time::{SystemTime, UNIX_EPOCH};

pub fn dev_log(message: &str) {
    if !cfg!(debug_assertions) {
        return;
    }

    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    println!("[{ts}ms] {message}");
}

#[macro_export]
macro_rules! log_dev {
    ($($arg:tt)*) => {
        if cfg!(debug_assertions) {
            $crate::logging::dev_log(&format!($($arg)*));
        }
    };
}
