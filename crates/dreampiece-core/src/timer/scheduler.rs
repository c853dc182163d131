//! Scheduler abstraction for the focus timer.
//!
//! The timer never sleeps or spawns. It asks a [`Scheduler`] for repeating
//! and one-shot tasks, and the caller drains due tasks with
//! [`Scheduler::next_due`] (via `FocusTimer::pump`). Two implementations:
//!
//! - [`ManualScheduler`]: virtual clock advanced by hand, for tests.
//! - [`SystemScheduler`]: monotonic wall clock, for real sessions.

use std::time::{Duration, Instant};

/// Handle for a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

pub trait Scheduler {
    /// Fire every `period`, first after one `period`.
    fn schedule_repeating(&mut self, period: Duration) -> TaskId;

    /// Fire once after `delay`.
    fn schedule_once(&mut self, delay: Duration) -> TaskId;

    /// Cancel a task. Unknown or already-fired ids are ignored.
    fn cancel(&mut self, id: TaskId);

    /// Pop the earliest task that is due now, if any.
    ///
    /// Repeating tasks are re-armed one period after the firing they
    /// report, so a caller that fell behind sees every missed firing.
    fn next_due(&mut self) -> Option<TaskId>;

    /// Number of scheduled (not yet cancelled or spent) tasks.
    fn active_count(&self) -> usize;
}

#[derive(Debug, Clone)]
struct Task {
    id: TaskId,
    due: Duration,
    period: Option<Duration>,
}

/// Clock-agnostic task list. Times are offsets from the owner's origin.
///
/// While a drain is in progress `cursor` is the time of the firing being
/// handled, so tasks scheduled from inside a handler are measured from that
/// firing. Outside a drain new tasks are measured from "now".
#[derive(Debug, Default)]
struct TaskQueue {
    next_id: u64,
    cursor: Duration,
    /// Set by a firing, cleared once `pop_due` runs dry.
    draining: bool,
    tasks: Vec<Task>,
}

impl TaskQueue {
    /// Outside of a drain the cursor may lag behind the clock.
    fn sync_cursor(&mut self, now: Duration) {
        if !self.draining && self.cursor < now {
            self.cursor = now;
        }
    }

    fn push(&mut self, delay: Duration, period: Option<Duration>) -> TaskId {
        self.next_id += 1;
        let id = TaskId(self.next_id);
        self.tasks.push(Task {
            id,
            due: self.cursor + delay,
            period,
        });
        id
    }

    fn cancel(&mut self, id: TaskId) {
        self.tasks.retain(|t| t.id != id);
    }

    fn pop_due(&mut self, now: Duration) -> Option<TaskId> {
        let index = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= now)
            .min_by_key(|(_, t)| (t.due, t.id))
            .map(|(i, _)| i);

        let Some(index) = index else {
            self.cursor = now;
            self.draining = false;
            return None;
        };

        let task = &mut self.tasks[index];
        let id = task.id;
        self.cursor = task.due;
        self.draining = true;
        match task.period {
            Some(period) => task.due += period,
            None => {
                self.tasks.swap_remove(index);
            }
        }
        Some(id)
    }
}

/// Scheduler driven by an explicit virtual clock.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    queue: TaskQueue,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the virtual clock forward. Tasks become due but do not fire
    /// until drained.
    pub fn advance(&mut self, by: Duration) {
        self.now += by;
    }

    /// Virtual time since creation.
    pub fn now(&self) -> Duration {
        self.now
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_repeating(&mut self, period: Duration) -> TaskId {
        self.queue.sync_cursor(self.now);
        self.queue.push(period, Some(period))
    }

    fn schedule_once(&mut self, delay: Duration) -> TaskId {
        self.queue.sync_cursor(self.now);
        self.queue.push(delay, None)
    }

    fn cancel(&mut self, id: TaskId) {
        self.queue.cancel(id);
    }

    fn next_due(&mut self) -> Option<TaskId> {
        self.queue.pop_due(self.now)
    }

    fn active_count(&self) -> usize {
        self.queue.tasks.len()
    }
}

/// Scheduler backed by [`Instant`].
#[derive(Debug)]
pub struct SystemScheduler {
    origin: Instant,
    queue: TaskQueue,
}

impl SystemScheduler {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            queue: TaskQueue::default(),
        }
    }

    fn elapsed(&self) -> Duration {
        self.origin.elapsed()
    }
}

impl Default for SystemScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for SystemScheduler {
    fn schedule_repeating(&mut self, period: Duration) -> TaskId {
        let now = self.elapsed();
        self.queue.sync_cursor(now);
        self.queue.push(period, Some(period))
    }

    fn schedule_once(&mut self, delay: Duration) -> TaskId {
        let now = self.elapsed();
        self.queue.sync_cursor(now);
        self.queue.push(delay, None)
    }

    fn cancel(&mut self, id: TaskId) {
        self.queue.cancel(id);
    }

    fn next_due(&mut self) -> Option<TaskId> {
        let now = self.elapsed();
        self.queue.pop_due(now)
    }

    fn active_count(&self) -> usize {
        self.queue.tasks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(s: &mut impl Scheduler) -> Vec<TaskId> {
        std::iter::from_fn(|| s.next_due()).collect()
    }

    #[test]
    fn repeating_task_fires_each_period() {
        let mut s = ManualScheduler::new();
        let id = s.schedule_repeating(Duration::from_secs(1));
        s.advance(Duration::from_millis(999));
        assert!(drain(&mut s).is_empty());
        s.advance(Duration::from_millis(2001));
        assert_eq!(drain(&mut s), vec![id, id, id]);
        assert_eq!(s.active_count(), 1);
    }

    #[test]
    fn once_task_fires_once() {
        let mut s = ManualScheduler::new();
        let id = s.schedule_once(Duration::from_secs(2));
        s.advance(Duration::from_secs(10));
        assert_eq!(drain(&mut s), vec![id]);
        assert_eq!(s.active_count(), 0);
    }

    #[test]
    fn cancelled_task_never_fires() {
        let mut s = ManualScheduler::new();
        let id = s.schedule_repeating(Duration::from_secs(1));
        s.cancel(id);
        s.cancel(id);
        s.advance(Duration::from_secs(5));
        assert!(drain(&mut s).is_empty());
        assert_eq!(s.active_count(), 0);
    }

    #[test]
    fn tasks_fire_in_due_order() {
        let mut s = ManualScheduler::new();
        let slow = s.schedule_once(Duration::from_secs(3));
        let fast = s.schedule_repeating(Duration::from_secs(2));
        s.advance(Duration::from_secs(4));
        assert_eq!(drain(&mut s), vec![fast, slow, fast]);
    }

    #[test]
    fn task_scheduled_during_drain_counts_from_firing_time() {
        let mut s = ManualScheduler::new();
        let first = s.schedule_once(Duration::from_secs(1));
        s.advance(Duration::from_secs(10));
        assert_eq!(s.next_due(), Some(first));
        // Handler for `first` schedules a follow-up at t=1+2.
        let follow = s.schedule_once(Duration::from_secs(2));
        assert_eq!(s.next_due(), Some(follow));
        assert_eq!(s.next_due(), None);
    }

    #[test]
    fn task_scheduled_after_drain_counts_from_now() {
        let mut s = ManualScheduler::new();
        s.advance(Duration::from_secs(100));
        assert!(drain(&mut s).is_empty());
        let id = s.schedule_once(Duration::from_secs(1));
        assert_eq!(s.next_due(), None);
        s.advance(Duration::from_secs(1));
        assert_eq!(s.next_due(), Some(id));
    }

    #[test]
    fn task_scheduled_after_undrained_advance_counts_from_now() {
        let mut s = ManualScheduler::new();
        s.advance(Duration::from_secs(10));
        let once = s.schedule_once(Duration::from_secs(2));
        assert_eq!(s.next_due(), None);

        let tick = s.schedule_repeating(Duration::from_secs(1));
        s.advance(Duration::from_secs(1));
        assert_eq!(drain(&mut s), vec![tick]);
        s.advance(Duration::from_secs(1));
        assert_eq!(drain(&mut s), vec![once, tick]);
    }

    #[test]
    fn system_scheduler_does_not_fire_early() {
        let mut s = SystemScheduler::new();
        s.schedule_once(Duration::from_secs(60));
        assert_eq!(s.next_due(), None);
        assert_eq!(s.active_count(), 1);
    }
}
