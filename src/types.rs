//! Shared identifiers and the task model used across the system.

/// Unique identifier for a task in the queue.
pub type TaskId = u64;
/// Priority key; lower values are more urgent.
pub type Priority = u32;

/// Unit of schedulable work held by the priority queue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Task {
    /// Stable task identifier for lookups and demo output.
    pub id: TaskId,
    /// Ordering key; the only field the heap logic reads.
    pub priority: Priority,
    /// Opaque metadata carried for the caller ("HH:MM" in the demo).
    pub arrival_time: String,
    /// Opaque metadata carried for the caller.
    pub deadline: String,
}

impl Task {
    /// Construct a new task with the provided id, priority, and times.
    pub fn new(
        id: TaskId,
        priority: Priority,
        arrival_time: impl Into<String>,
        deadline: impl Into<String>,
    ) -> Self {
        Self {
            id,
            priority,
            arrival_time: arrival_time.into(),
            deadline: deadline.into(),
        }
    }
}
