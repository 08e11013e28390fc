// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Deferred one-shot actions

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;

use log::trace;

/// A task that runs once, on the thread that scheduled it.
pub type Task = Box<dyn FnOnce()>;

/// Something that can run a [`Task`] after a delay.
///
/// Tasks are never cancelled or merged: every call to [`schedule`](Scheduler::schedule)
/// runs its task exactly once, no earlier than `delay` after the call.
pub trait Scheduler {
    fn schedule(&self, delay: Duration, task: Task);
}

impl<T> Scheduler for &T
where
    T: Scheduler + ?Sized,
{
    fn schedule(&self, delay: Duration, task: Task) {
        (**self).schedule(delay, task)
    }
}

impl<T> Scheduler for Rc<T>
where
    T: Scheduler + ?Sized,
{
    fn schedule(&self, delay: Duration, task: Task) {
        (**self).schedule(delay, task)
    }
}

#[derive(Default)]
struct Queue {
    now: Duration,
    seq: u64,
    // Keyed by deadline, then by scheduling order.
    tasks: BTreeMap<(Duration, u64), Task>,
}

/// A [`Scheduler`] driven by a manual clock.
///
/// Nothing runs until the clock is moved with [`advance`](TimerQueue::advance)
/// or [`run_until_idle`](TimerQueue::run_until_idle). Clones share the same
/// clock and queue.
#[derive(Clone, Default)]
pub struct TimerQueue {
    queue: Rc<RefCell<Queue>>,
}

impl TimerQueue {
    pub fn new() -> Self {
        TimerQueue::default()
    }

    /// Time elapsed on this queue's clock.
    pub fn now(&self) -> Duration {
        self.queue.borrow().now
    }

    /// Number of tasks that have not run yet.
    pub fn pending(&self) -> usize {
        self.queue.borrow().tasks.len()
    }

    /// Deadline of the next task to run, if any.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.queue.borrow().tasks.keys().next().map(|&(deadline, _)| deadline)
    }

    /// Move the clock forward by `by`, running every task that becomes due.
    /// Returns the number of tasks that ran.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.now().saturating_add(by);
        let mut ran = 0;

        while let Some(task) = self.pop_due(target) {
            // Queue is not borrowed here, tasks are free to schedule more tasks.
            task();
            ran += 1;
        }

        self.queue.borrow_mut().now = target;

        ran
    }

    /// Run tasks until the queue is empty, moving the clock to each deadline in turn.
    pub fn run_until_idle(&self) -> usize {
        let mut ran = 0;

        while let Some(deadline) = self.next_deadline() {
            ran += self.advance(deadline.saturating_sub(self.now()));
        }

        ran
    }

    fn pop_due(&self, target: Duration) -> Option<Task> {
        let mut queue = self.queue.borrow_mut();
        let entry = queue.tasks.first_entry()?;

        let (deadline, seq) = *entry.key();

        if deadline > target {
            return None;
        }

        let task = entry.remove();
        // Clock reads the task's own deadline while it runs.
        queue.now = deadline;

        trace!("running task #{seq} at {deadline:?}");

        Some(task)
    }
}

impl Scheduler for TimerQueue {
    fn schedule(&self, delay: Duration, task: Task) {
        let mut queue = self.queue.borrow_mut();

        let deadline = queue.now.saturating_add(delay);
        let seq = queue.seq;
        queue.seq += 1;

        trace!("scheduled task #{seq} for {deadline:?}");

        queue.tasks.insert((deadline, seq), task);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::Cell;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn log_task(log: &Rc<RefCell<Vec<&'static str>>>, tag: &'static str) -> Task {
        let log = log.clone();
        Box::new(move || log.borrow_mut().push(tag))
    }

    #[test]
    fn nothing_runs_before_deadline() {
        let timers = TimerQueue::new();
        let fired = Rc::new(Cell::new(false));

        let flag = fired.clone();
        timers.schedule(ms(1500), Box::new(move || flag.set(true)));

        assert_eq!(timers.advance(ms(1499)), 0);
        assert!(!fired.get());
        assert_eq!(timers.pending(), 1);

        assert_eq!(timers.advance(ms(1)), 1);
        assert!(fired.get());
        assert_eq!(timers.pending(), 0);
        assert_eq!(timers.now(), ms(1500));
    }

    #[test]
    fn runs_in_deadline_then_schedule_order() {
        let timers = TimerQueue::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        timers.schedule(ms(30), log_task(&log, "late"));
        timers.schedule(ms(10), log_task(&log, "a"));
        timers.schedule(ms(10), log_task(&log, "b"));
        timers.schedule(ms(20), log_task(&log, "mid"));

        assert_eq!(timers.advance(ms(100)), 4);
        assert_eq!(&*log.borrow(), &["a", "b", "mid", "late"]);
    }

    #[test]
    fn tasks_can_schedule_tasks() {
        let timers = TimerQueue::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let inner = timers.clone();
        let inner_log = log.clone();
        timers.schedule(
            ms(10),
            Box::new(move || {
                inner_log.borrow_mut().push("outer");
                inner.schedule(ms(10), log_task(&inner_log, "inner"));
            }),
        );

        // Inner task is due at 20ms, measured from when the outer one ran.
        assert_eq!(timers.advance(ms(15)), 1);
        assert_eq!(timers.next_deadline(), Some(ms(20)));
        assert_eq!(timers.advance(ms(5)), 1);
        assert_eq!(&*log.borrow(), &["outer", "inner"]);
    }

    #[test]
    fn run_until_idle() {
        let timers = TimerQueue::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        timers.schedule(ms(5), log_task(&log, "x"));
        timers.schedule(ms(2500), log_task(&log, "y"));

        assert_eq!(timers.run_until_idle(), 2);
        assert_eq!(timers.now(), ms(2500));
        assert_eq!(timers.run_until_idle(), 0);
    }
}
