//! Min-heap priority queue over tasks, ordered by urgency.

use std::error::Error;
use std::fmt;

use crate::heap::{sift_down, sift_up};
use crate::types::{Priority, Task, TaskId};

/// Failure modes surfaced to callers of the queue API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueueError {
    /// `peek_minimum` or `extract_minimum` was called on an empty queue.
    EmptyQueue,
    /// `decrease_priority` was asked to raise (or keep) a task's
    /// priority; the task is left unchanged.
    InvalidPriority {
        task_id: TaskId,
        current: Priority,
        requested: Priority,
    },
}

impl fmt::Display for QueueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueError::EmptyQueue => write!(f, "priority queue is empty"),
            QueueError::InvalidPriority {
                task_id,
                current,
                requested,
            } => write!(
                f,
                "new priority {requested} for task {task_id} must be strictly below current {current}"
            ),
        }
    }
}

impl Error for QueueError {}

/// A min-heap of tasks: the lowest `priority` value sits at the root.
///
/// Single consumer, single thread. Callers sharing an instance across
/// threads must wrap every operation in their own critical section;
/// the queue itself holds no lock.
#[derive(Debug, Default)]
pub struct MinHeapPriorityQueue {
    heap: Vec<Task>,
}

fn more_urgent(a: &Task, b: &Task) -> bool {
    a.priority < b.priority
}

impl MinHeapPriorityQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self { heap: Vec::new() }
    }

    /// Take ownership of `task` and place it by priority.
    pub fn insert(&mut self, task: Task) {
        self.heap.push(task);
        let last = self.heap.len() - 1;
        sift_up(&mut self.heap, last, more_urgent);
    }

    /// Borrow the most urgent task without removing it.
    pub fn peek_minimum(&self) -> Result<&Task, QueueError> {
        self.heap.first().ok_or(QueueError::EmptyQueue)
    }

    /// Remove and return the most urgent task.
    pub fn extract_minimum(&mut self) -> Result<Task, QueueError> {
        if self.heap.is_empty() {
            return Err(QueueError::EmptyQueue);
        }
        // Move the last leaf into the root slot, then repair downward.
        let minimum = self.heap.swap_remove(0);
        if !self.heap.is_empty() {
            let bound = self.heap.len();
            sift_down(&mut self.heap, bound, 0, more_urgent);
        }
        Ok(minimum)
    }

    /// Make the task with `task_id` more urgent.
    ///
    /// The new priority must be strictly below the current one; a
    /// lowered key can only violate the heap property toward the root,
    /// so the repair direction is upward. An unknown `task_id` is a
    /// no-op: whether that is an error is the caller's call, not ours.
    pub fn decrease_priority(
        &mut self,
        task_id: TaskId,
        new_priority: Priority,
    ) -> Result<(), QueueError> {
        let Some(index) = self.heap.iter().position(|task| task.id == task_id) else {
            return Ok(());
        };
        let current = self.heap[index].priority;
        if new_priority >= current {
            return Err(QueueError::InvalidPriority {
                task_id,
                current,
                requested: new_priority,
            });
        }
        self.heap[index].priority = new_priority;
        sift_up(&mut self.heap, index, more_urgent);
        Ok(())
    }

    /// Whether the queue holds no tasks.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Current number of queued tasks.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Tasks in storage order (heap order, not priority order).
    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.heap.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_queue() -> MinHeapPriorityQueue {
        // The classic six-task workload: ids 1..=6 with priorities
        // [3, 5, 2, 3, 1, 5].
        let mut queue = MinHeapPriorityQueue::new();
        queue.insert(Task::new(1, 3, "10:00", "12:00"));
        queue.insert(Task::new(2, 5, "10:05", "12:05"));
        queue.insert(Task::new(3, 2, "10:10", "12:10"));
        queue.insert(Task::new(4, 3, "10:23", "12:15"));
        queue.insert(Task::new(5, 1, "10:16", "12:20"));
        queue.insert(Task::new(6, 5, "10:30", "12:30"));
        queue
    }

    fn assert_min_heap(queue: &MinHeapPriorityQueue) {
        let tasks: Vec<&Task> = queue.iter().collect();
        for index in 0..tasks.len() {
            for child in [2 * index + 1, 2 * index + 2] {
                if child < tasks.len() {
                    assert!(
                        tasks[index].priority <= tasks[child].priority,
                        "heap property broken at parent {index} / child {child}"
                    );
                }
            }
        }
    }

    #[test]
    fn extraction_yields_non_decreasing_priorities() {
        let mut queue = sample_queue();

        // Priority 1 is unique, so the first extraction is fixed.
        let first = queue.extract_minimum().expect("queue has tasks");
        assert_eq!(first.id, 5);
        assert_eq!(first.priority, 1);

        let mut priorities = vec![first.priority];
        while let Ok(task) = queue.extract_minimum() {
            priorities.push(task.priority);
        }
        // Ties may come out in either order; the priorities may not.
        assert_eq!(priorities, vec![1, 2, 3, 3, 5, 5]);
        assert!(queue.is_empty());
    }

    #[test]
    fn heap_property_holds_across_mixed_operations() {
        let mut queue = sample_queue();
        assert_min_heap(&queue);

        queue.extract_minimum().expect("queue has tasks");
        assert_min_heap(&queue);

        queue.insert(Task::new(7, 4, "10:45", "12:45"));
        assert_min_heap(&queue);

        queue.decrease_priority(6, 1).expect("strict decrease");
        assert_min_heap(&queue);

        queue.extract_minimum().expect("queue has tasks");
        assert_min_heap(&queue);
    }

    #[test]
    fn peek_does_not_remove() {
        let mut queue = sample_queue();
        let peeked_id = queue.peek_minimum().expect("queue has tasks").id;
        assert_eq!(peeked_id, 5);
        assert_eq!(queue.len(), 6);
        let extracted = queue.extract_minimum().expect("queue has tasks");
        assert_eq!(extracted.id, peeked_id);
        assert_eq!(queue.len(), 5);
    }

    #[test]
    fn decrease_priority_repositions_task() {
        let mut queue = sample_queue();
        queue.decrease_priority(2, 0).expect("strict decrease");
        let next = queue.extract_minimum().expect("queue has tasks");
        assert_eq!(next.id, 2);
        assert_eq!(next.priority, 0);
        assert_min_heap(&queue);
    }

    #[test]
    fn decrease_priority_rejects_non_decrease() {
        let mut queue = sample_queue();
        // Task 3 currently holds priority 2; equal and higher values
        // must both be refused without touching the task.
        for requested in [2, 9] {
            let result = queue.decrease_priority(3, requested);
            assert_eq!(
                result,
                Err(QueueError::InvalidPriority {
                    task_id: 3,
                    current: 2,
                    requested,
                })
            );
        }
        let unchanged = queue
            .iter()
            .find(|task| task.id == 3)
            .expect("task 3 still queued");
        assert_eq!(unchanged.priority, 2);
        assert_min_heap(&queue);
    }

    #[test]
    fn decrease_priority_for_unknown_id_is_a_no_op() {
        let mut queue = sample_queue();
        let before: Vec<(TaskId, Priority)> =
            queue.iter().map(|task| (task.id, task.priority)).collect();
        queue
            .decrease_priority(99, 0)
            .expect("unknown id is not an error");
        let after: Vec<(TaskId, Priority)> =
            queue.iter().map(|task| (task.id, task.priority)).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn empty_queue_operations_fail() {
        let mut queue = MinHeapPriorityQueue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.peek_minimum().unwrap_err(), QueueError::EmptyQueue);
        assert_eq!(queue.extract_minimum().unwrap_err(), QueueError::EmptyQueue);
    }

    #[test]
    fn single_task_round_trip() {
        let mut queue = MinHeapPriorityQueue::new();
        queue.insert(Task::new(1, 7, "09:00", "11:00"));
        assert_eq!(queue.len(), 1);
        let task = queue.extract_minimum().expect("queue has one task");
        assert_eq!(task.id, 1);
        assert!(queue.is_empty());
        assert_eq!(queue.extract_minimum().unwrap_err(), QueueError::EmptyQueue);
    }

    #[test]
    fn interleaved_insert_and_extract() {
        let mut queue = MinHeapPriorityQueue::new();
        queue.insert(Task::new(1, 5, "10:00", "12:00"));
        queue.insert(Task::new(2, 3, "10:01", "12:01"));
        assert_eq!(queue.extract_minimum().expect("nonempty").id, 2);

        queue.insert(Task::new(3, 1, "10:02", "12:02"));
        queue.insert(Task::new(4, 4, "10:03", "12:03"));
        assert_eq!(queue.extract_minimum().expect("nonempty").id, 3);
        assert_eq!(queue.extract_minimum().expect("nonempty").id, 4);
        assert_eq!(queue.extract_minimum().expect("nonempty").id, 1);
        assert!(queue.is_empty());
    }
}
