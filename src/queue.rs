use crate::task::{Task, TaskKind};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

/// Outcome of a kind-gated pop attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popped {
    /// The head matched and was removed.
    Task(Task),
    /// The head belongs to the other role; nothing was removed.
    HeadMismatch(TaskKind),
    /// The queue is empty.
    Empty,
}

/// Thread-safe FIFO of pending tasks.
///
/// A single lock covers the whole structure; every operation is one short
/// critical section. Cloning yields another handle to the same queue.
///
/// Consumption eligibility is decided only at the head: a consumer that is
/// not responsible for the head's kind must leave it in place, so a task can
/// never be overtaken by anything behind it.
#[derive(Debug)]
pub struct SharedQueue {
    inner: Arc<Mutex<VecDeque<Task>>>,
}

impl SharedQueue {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    /// Append a task at the tail.
    pub fn push(&self, task: Task) {
        self.inner.lock().push_back(task);
    }

    /// Remove and return the head task, `None` if the queue is empty.
    ///
    /// Never blocks waiting for a task to arrive.
    pub fn pop(&self) -> Option<Task> {
        self.inner.lock().pop_front()
    }

    /// Kind of the head task without removing it.
    pub fn peek_kind(&self) -> Option<TaskKind> {
        self.inner.lock().front().map(|t| t.kind())
    }

    /// Remove the head only if its kind matches, in one lock acquisition.
    ///
    /// The inspect-and-remove must be atomic: checking the head and popping
    /// it under separate lock acquisitions would let a task of the wrong
    /// kind slip to a consumer that raced in between.
    pub fn pop_if(&self, kind: TaskKind) -> Popped {
        let mut queue = self.inner.lock();
        match queue.front() {
            Some(head) if head.kind() == kind => {
                let task = *head;
                queue.pop_front();
                Popped::Task(task)
            }
            Some(head) => Popped::HeadMismatch(head.kind()),
            None => Popped::Empty,
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

impl Default for SharedQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for SharedQueue {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let queue = SharedQueue::new();
        queue.push(Task::compute(1));
        queue.push(Task::compute(2));
        queue.push(Task::wait(3));

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.pop(), Some(Task::compute(1)));
        assert_eq!(queue.pop(), Some(Task::compute(2)));
        assert_eq!(queue.pop(), Some(Task::wait(3)));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn test_peek_does_not_remove() {
        let queue = SharedQueue::new();
        queue.push(Task::wait(0));

        assert_eq!(queue.peek_kind(), Some(TaskKind::Wait));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_pop_if_matching_head() {
        let queue = SharedQueue::new();
        queue.push(Task::compute(5));

        assert_eq!(queue.pop_if(TaskKind::Compute), Popped::Task(Task::compute(5)));
        assert_eq!(queue.pop_if(TaskKind::Compute), Popped::Empty);
    }

    #[test]
    fn test_pop_if_foreign_head_stays_put() {
        let queue = SharedQueue::new();
        queue.push(Task::wait(1));
        queue.push(Task::compute(2));

        // A compute consumer cannot reach past the wait at the head.
        assert_eq!(
            queue.pop_if(TaskKind::Compute),
            Popped::HeadMismatch(TaskKind::Wait)
        );
        assert_eq!(queue.len(), 2);

        assert_eq!(queue.pop_if(TaskKind::Wait), Popped::Task(Task::wait(1)));
        assert_eq!(queue.pop_if(TaskKind::Compute), Popped::Task(Task::compute(2)));
    }

    #[test]
    fn test_zero_value_distinct_from_empty() {
        let queue = SharedQueue::new();
        queue.push(Task::compute(0));

        assert_eq!(queue.pop(), Some(Task::compute(0)));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn test_handles_share_one_queue() {
        let queue = SharedQueue::new();
        let other = queue.clone();

        queue.push(Task::compute(9));
        assert_eq!(other.pop(), Some(Task::compute(9)));
        assert!(queue.is_empty());
    }
}
