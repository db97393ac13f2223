//! Refresh driver and timer queue
//!
//! Each paint ends by arming the [`RefreshDriver`], which posts one delayed
//! task to the host's [`Scheduler`]. When that task fires the host hands it
//! back through [`RefreshDriver::deliver`]; a match means "repaint now".
//!
//! ```text
//! Idle --arm--> Armed(task) --deliver(task)--> Idle --(paint)--> Armed ...
//!   \                |
//!    \--cancel-------+------> Cancelled --resume--> Idle
//! ```
//!
//! The driver only holds a [`TaskId`], never a reference back to the widget,
//! so cancelling on teardown is just dropping that id from the scheduler.

use embassy_time::{Duration, Instant};
use heapless::Vec;
use log::{debug, warn};

use crate::error::SchedulerError;

/// Handle for one scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u32);

/// Delayed-callback capability provided by the host.
///
/// Tasks fire on the UI thread; the host passes the fired [`TaskId`] back to
/// whoever posted it.
pub trait Scheduler {
    /// Schedule a task to fire after `delay`.
    fn post_delayed(&mut self, delay: Duration) -> Result<TaskId, SchedulerError>;

    /// Drop a pending task. Returns `false` if it already fired or never existed.
    fn cancel(&mut self, task: TaskId) -> bool;
}

impl<S: Scheduler + ?Sized> Scheduler for &mut S {
    fn post_delayed(&mut self, delay: Duration) -> Result<TaskId, SchedulerError> {
        (**self).post_delayed(delay)
    }

    fn cancel(&mut self, task: TaskId) -> bool {
        (**self).cancel(task)
    }
}

// ---------------------------------------------------------------------------
// RefreshDriver
// ---------------------------------------------------------------------------

/// Lifecycle of the refresh loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshState {
    /// Nothing scheduled
    Idle,
    /// One repaint task is pending
    Armed(TaskId),
    /// Torn down; arming is ignored until resumed
    Cancelled,
}

/// Keeps exactly one repaint pending while the widget is alive.
#[derive(Debug, Clone)]
pub struct RefreshDriver {
    period: Duration,
    state: RefreshState,
}

impl RefreshDriver {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            state: RefreshState::Idle,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn state(&self) -> RefreshState {
        self.state
    }

    /// The task currently waiting to fire, if any
    pub fn pending(&self) -> Option<TaskId> {
        match self.state {
            RefreshState::Armed(task) => Some(task),
            _ => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.state == RefreshState::Cancelled
    }

    /// Schedule the next repaint one period from now.
    ///
    /// An already pending task is replaced, so repeated paints never stack
    /// up timers. If the scheduler refuses the task the driver stays idle
    /// and the display simply goes stale.
    pub fn arm<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        match self.state {
            RefreshState::Cancelled => {
                debug!("Refresh driver cancelled, not arming");
                return;
            }
            RefreshState::Armed(previous) => {
                scheduler.cancel(previous);
            }
            RefreshState::Idle => {}
        }

        self.state = match scheduler.post_delayed(self.period) {
            Ok(task) => RefreshState::Armed(task),
            Err(e) => {
                warn!("Failed to schedule refresh: {}", e);
                RefreshState::Idle
            }
        };
    }

    /// Handle a fired task.
    ///
    /// Returns `true` when `task` is the pending repaint and the host should
    /// invalidate. Stale tasks and tasks arriving after cancellation are
    /// ignored.
    pub fn deliver(&mut self, task: TaskId) -> bool {
        match self.state {
            RefreshState::Armed(pending) if pending == task => {
                self.state = RefreshState::Idle;
                true
            }
            _ => false,
        }
    }

    /// Tear down: drop the pending task and refuse further arming.
    pub fn cancel<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if let RefreshState::Armed(task) = self.state {
            scheduler.cancel(task);
        }
        debug!("Refresh driver cancelled");
        self.state = RefreshState::Cancelled;
    }

    /// Allow arming again after [`cancel`](Self::cancel).
    pub fn resume(&mut self) {
        if self.state == RefreshState::Cancelled {
            self.state = RefreshState::Idle;
        }
    }
}

// ---------------------------------------------------------------------------
// TimerQueue
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct TimerEntry {
    task: TaskId,
    deadline: Instant,
}

/// Fixed-capacity scheduler driven by explicit timestamps.
///
/// The host loop calls [`advance_to`](Self::advance_to) with the current
/// time and then drains [`pop_due`](Self::pop_due). Nothing here reads a
/// clock, so the queue behaves the same on hardware, in the simulator, and
/// in tests.
#[derive(Debug)]
pub struct TimerQueue<const N: usize> {
    now: Instant,
    next_id: u32,
    entries: Vec<TimerEntry, N>,
}

impl<const N: usize> TimerQueue<N> {
    pub fn new(now: Instant) -> Self {
        Self {
            now,
            next_id: 0,
            entries: Vec::new(),
        }
    }

    pub fn now(&self) -> Instant {
        self.now
    }

    /// Move the queue's clock forward. Going backwards is ignored.
    pub fn advance_to(&mut self, now: Instant) {
        if now > self.now {
            self.now = now;
        }
    }

    /// Remove and return the earliest task whose deadline has passed.
    ///
    /// Tasks with equal deadlines fire in the order they were posted.
    pub fn pop_due(&mut self) -> Option<TaskId> {
        let now = self.now;
        let (index, _) = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.deadline <= now)
            .min_by_key(|(_, entry)| entry.deadline)?;
        Some(self.entries.remove(index).task)
    }

    pub fn pending_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_pending(&self, task: TaskId) -> bool {
        self.entries.iter().any(|entry| entry.task == task)
    }

    /// Earliest deadline among pending tasks
    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.iter().map(|entry| entry.deadline).min()
    }
}

impl<const N: usize> Scheduler for TimerQueue<N> {
    fn post_delayed(&mut self, delay: Duration) -> Result<TaskId, SchedulerError> {
        let task = TaskId(self.next_id);
        self.entries
            .push(TimerEntry {
                task,
                deadline: self.now + delay,
            })
            .map_err(|_| SchedulerError::QueueFull { max: N })?;
        self.next_id = self.next_id.wrapping_add(1);
        Ok(task)
    }

    fn cancel(&mut self, task: TaskId) -> bool {
        match self.entries.iter().position(|entry| entry.task == task) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    fn driver() -> RefreshDriver {
        RefreshDriver::new(Duration::from_millis(1000))
    }

    #[test]
    fn test_arm_posts_one_task() {
        let mut queue = TimerQueue::<4>::new(at(0));
        let mut driver = driver();
        assert_eq!(driver.state(), RefreshState::Idle);

        driver.arm(&mut queue);
        assert_eq!(queue.pending_count(), 1);
        assert_eq!(queue.next_deadline(), Some(at(1000)));
        assert!(driver.pending().is_some_and(|task| queue.is_pending(task)));
    }

    #[test]
    fn test_rearm_replaces_pending_task() {
        let mut queue = TimerQueue::<4>::new(at(0));
        let mut driver = driver();

        driver.arm(&mut queue);
        let first = driver.pending().unwrap();
        queue.advance_to(at(300));
        driver.arm(&mut queue);

        assert_eq!(queue.pending_count(), 1);
        assert!(!queue.is_pending(first));
        assert_eq!(queue.next_deadline(), Some(at(1300)));
    }

    #[test]
    fn test_task_fires_after_period() {
        let mut queue = TimerQueue::<4>::new(at(0));
        let mut driver = driver();
        driver.arm(&mut queue);

        queue.advance_to(at(999));
        assert_eq!(queue.pop_due(), None);

        queue.advance_to(at(1000));
        let task = queue.pop_due().unwrap();
        assert!(driver.deliver(task));
        assert_eq!(driver.state(), RefreshState::Idle);
        assert_eq!(queue.pending_count(), 0);
    }

    #[test]
    fn test_stale_task_is_ignored() {
        let mut queue = TimerQueue::<4>::new(at(0));
        let mut driver = driver();
        driver.arm(&mut queue);
        let first = driver.pending().unwrap();
        driver.arm(&mut queue);

        assert!(!driver.deliver(first));
        assert!(driver.pending().is_some());
    }

    #[test]
    fn test_cancel_clears_queue_and_blocks_arm() {
        let mut queue = TimerQueue::<4>::new(at(0));
        let mut driver = driver();
        driver.arm(&mut queue);
        let task = driver.pending().unwrap();

        driver.cancel(&mut queue);
        assert_eq!(queue.pending_count(), 0);
        assert!(driver.is_cancelled());
        assert!(!driver.deliver(task));

        driver.arm(&mut queue);
        assert_eq!(queue.pending_count(), 0);

        driver.resume();
        driver.arm(&mut queue);
        assert_eq!(queue.pending_count(), 1);
    }

    #[test]
    fn test_full_queue_leaves_driver_idle() {
        let mut queue = TimerQueue::<1>::new(at(0));
        queue.post_delayed(Duration::from_millis(5)).unwrap();

        let mut driver = driver();
        driver.arm(&mut queue);
        assert_eq!(driver.state(), RefreshState::Idle);
        assert_eq!(
            queue.post_delayed(Duration::from_millis(5)),
            Err(SchedulerError::QueueFull { max: 1 })
        );
    }

    #[test]
    fn test_pop_due_orders_by_deadline_then_post_order() {
        let mut queue = TimerQueue::<4>::new(at(0));
        let late = queue.post_delayed(Duration::from_millis(50)).unwrap();
        let early_a = queue.post_delayed(Duration::from_millis(10)).unwrap();
        let early_b = queue.post_delayed(Duration::from_millis(10)).unwrap();

        queue.advance_to(at(100));
        assert_eq!(queue.pop_due(), Some(early_a));
        assert_eq!(queue.pop_due(), Some(early_b));
        assert_eq!(queue.pop_due(), Some(late));
        assert_eq!(queue.pop_due(), None);
    }

    #[test]
    fn test_advance_never_goes_backwards() {
        let mut queue = TimerQueue::<2>::new(at(500));
        queue.advance_to(at(100));
        assert_eq!(queue.now(), at(500));
    }

    #[test]
    fn test_cancel_unknown_task() {
        let mut queue = TimerQueue::<2>::new(at(0));
        let task = queue.post_delayed(Duration::from_millis(1)).unwrap();
        assert!(queue.cancel(task));
        assert!(!queue.cancel(task));
    }
}
