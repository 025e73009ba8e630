use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use std::time::{Duration, SystemTime};

use log::trace;

use crate::clock::Clock;

pub type TaskId = u64;

/// Return value of a repeating task callback; `Continue(false)` retires the
/// task from inside its own callback.
pub struct Continue(pub bool);

enum TaskKind {
    Once(Option<Box<dyn FnOnce()>>),
    // callback is taken out of the entry while it runs so the entry itself
    // can be cancelled from inside the callback
    Repeating {
        every: Duration,
        callback: Option<Box<dyn FnMut() -> Continue>>,
    },
}

struct Task {
    due: SystemTime,
    kind: TaskKind,
}

enum TakenCallback {
    Once(Box<dyn FnOnce()>),
    Repeating(Box<dyn FnMut() -> Continue>),
}

struct SchedulerInner {
    tasks: HashMap<TaskId, Task>,
    next_id: TaskId,
}

/// Deadline queue pumped by the host loop. Components schedule work against
/// the shared `Clock` and hold `TaskHandle`s; the host calls `run_pending`
/// whenever time may have advanced.
pub struct Scheduler {
    clock: Rc<dyn Clock>,
    inner: Rc<RefCell<SchedulerInner>>,
}

impl Clone for Scheduler {
    fn clone(&self) -> Self {
        Self {
            clock: Rc::clone(&self.clock),
            inner: Rc::clone(&self.inner),
        }
    }
}

/// Handle to a scheduled task. Cancelling is idempotent; a handle that
/// outlives the scheduler is inert.
pub struct TaskHandle {
    id: TaskId,
    inner: Weak<RefCell<SchedulerInner>>,
}

impl TaskHandle {
    pub fn cancel(&self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.borrow_mut().tasks.remove(&self.id);
        }
    }
}

impl Scheduler {
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        Self {
            clock,
            inner: Rc::new(RefCell::new(SchedulerInner {
                tasks: HashMap::new(),
                next_id: 0,
            })),
        }
    }

    pub fn schedule_once<F>(&self, delay: Duration, callback: F) -> TaskHandle
    where
        F: FnOnce() + 'static,
    {
        self.insert(Task {
            due: self.clock.now() + delay,
            kind: TaskKind::Once(Some(Box::new(callback))),
        })
    }

    pub fn schedule_repeating<F>(&self, every: Duration, callback: F) -> TaskHandle
    where
        F: FnMut() -> Continue + 'static,
    {
        self.insert(Task {
            due: self.clock.now() + every,
            kind: TaskKind::Repeating {
                every,
                callback: Some(Box::new(callback)),
            },
        })
    }

    fn insert(&self, task: Task) -> TaskHandle {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.tasks.insert(id, task);
        TaskHandle {
            id,
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Earliest deadline across pending tasks, for hosts that sleep between
    /// pumps.
    pub fn next_deadline(&self) -> Option<SystemTime> {
        self.inner
            .borrow()
            .tasks
            .values()
            .map(|task| task.due)
            .min()
    }

    /// Runs every task that was due when the pump started, each at most once.
    /// Callbacks run with the queue unborrowed, so they may schedule and
    /// cancel freely; tasks they schedule wait for the next pump.
    pub fn run_pending(&self) {
        let now = self.clock.now();
        let due_ids: Vec<TaskId> = {
            let inner = self.inner.borrow();
            let mut due: Vec<(SystemTime, TaskId)> = inner
                .tasks
                .iter()
                .filter(|(_, task)| task.due <= now)
                .map(|(id, task)| (task.due, *id))
                .collect();
            due.sort();
            due.into_iter().map(|(_, id)| id).collect()
        };

        for id in due_ids {
            let taken = {
                let mut inner = self.inner.borrow_mut();
                match inner.tasks.get_mut(&id) {
                    Some(task) => {
                        let Task { due, kind } = task;
                        match kind {
                            TaskKind::Once(callback) => callback.take().map(TakenCallback::Once),
                            TaskKind::Repeating { every, callback } => {
                                *due = now + *every;
                                callback.take().map(TakenCallback::Repeating)
                            }
                        }
                    }
                    // cancelled by an earlier callback in this pump
                    None => None,
                }
            };

            match taken {
                Some(TakenCallback::Once(callback)) => {
                    trace!(target: "scheduler", "Running one-shot task {}", id);
                    self.inner.borrow_mut().tasks.remove(&id);
                    callback();
                }
                Some(TakenCallback::Repeating(mut callback)) => {
                    trace!(target: "scheduler", "Running repeating task {}", id);
                    let Continue(keep_going) = callback();
                    let mut inner = self.inner.borrow_mut();
                    if !keep_going {
                        inner.tasks.remove(&id);
                    } else if let Some(task) = inner.tasks.get_mut(&id) {
                        // entry still present means nobody cancelled it while
                        // the callback ran; hand the callback back
                        if let TaskKind::Repeating { callback: slot, .. } = &mut task.kind {
                            *slot = Some(callback);
                        }
                    }
                }
                None => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::test_support::ManualClock;
    use std::cell::Cell;
    use std::time::UNIX_EPOCH;

    fn fixture() -> (Rc<ManualClock>, Scheduler) {
        let clock = Rc::new(ManualClock::new(UNIX_EPOCH + Duration::from_secs(1_000)));
        let scheduler = Scheduler::new(clock.clone());
        (clock, scheduler)
    }

    #[test]
    fn test_once_fires_at_deadline() {
        let (clock, scheduler) = fixture();
        let fired = Rc::new(Cell::new(0));
        let fired_clone = fired.clone();

        let _handle = scheduler.schedule_once(Duration::from_millis(500), move || {
            fired_clone.set(fired_clone.get() + 1);
        });

        scheduler.run_pending();
        assert_eq!(fired.get(), 0);

        clock.advance(Duration::from_millis(499));
        scheduler.run_pending();
        assert_eq!(fired.get(), 0);

        clock.advance(Duration::from_millis(1));
        scheduler.run_pending();
        assert_eq!(fired.get(), 1);

        // a one-shot never fires twice
        clock.advance(Duration::from_secs(10));
        scheduler.run_pending();
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_repeating_fires_until_stopped() {
        let (clock, scheduler) = fixture();
        let ticks = Rc::new(Cell::new(0));
        let ticks_clone = ticks.clone();

        let _handle = scheduler.schedule_repeating(Duration::from_secs(1), move || {
            ticks_clone.set(ticks_clone.get() + 1);
            Continue(ticks_clone.get() < 3)
        });

        for _ in 0..5 {
            clock.advance(Duration::from_secs(1));
            scheduler.run_pending();
        }

        assert_eq!(ticks.get(), 3);
    }

    #[test]
    fn test_repeating_fires_once_per_pump() {
        let (clock, scheduler) = fixture();
        let ticks = Rc::new(Cell::new(0));
        let ticks_clone = ticks.clone();

        let _handle = scheduler.schedule_repeating(Duration::from_secs(1), move || {
            ticks_clone.set(ticks_clone.get() + 1);
            Continue(true)
        });

        // a long gap between pumps does not produce a burst of catch-up runs
        clock.advance(Duration::from_secs(30));
        scheduler.run_pending();
        assert_eq!(ticks.get(), 1);
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let (clock, scheduler) = fixture();
        let fired = Rc::new(Cell::new(false));
        let fired_clone = fired.clone();

        let handle = scheduler.schedule_once(Duration::from_secs(1), move || {
            fired_clone.set(true);
        });

        handle.cancel();
        handle.cancel();

        clock.advance(Duration::from_secs(5));
        scheduler.run_pending();
        assert!(!fired.get());

        // cancelling after the queue already dropped the task is a no-op too
        handle.cancel();
    }

    #[test]
    fn test_cancel_from_within_own_callback_sticks() {
        let (clock, scheduler) = fixture();
        let ticks = Rc::new(Cell::new(0));
        let handle_slot: Rc<RefCell<Option<TaskHandle>>> = Rc::new(RefCell::new(None));

        let ticks_clone = ticks.clone();
        let handle_slot_clone = handle_slot.clone();
        let handle = scheduler.schedule_repeating(Duration::from_secs(1), move || {
            ticks_clone.set(ticks_clone.get() + 1);
            if let Some(handle) = handle_slot_clone.borrow_mut().take() {
                handle.cancel();
            }
            // asking to continue must not resurrect a cancelled task
            Continue(true)
        });
        *handle_slot.borrow_mut() = Some(handle);

        for _ in 0..3 {
            clock.advance(Duration::from_secs(1));
            scheduler.run_pending();
        }

        assert_eq!(ticks.get(), 1);
    }

    #[test]
    fn test_callback_may_schedule_new_tasks() {
        let (clock, scheduler) = fixture();
        let fired = Rc::new(Cell::new(0));

        let fired_clone = fired.clone();
        let scheduler_clone = scheduler.clone();
        let _handle = scheduler.schedule_once(Duration::from_secs(1), move || {
            fired_clone.set(fired_clone.get() + 1);
            let fired_inner = fired_clone.clone();
            let _ = scheduler_clone.schedule_once(Duration::from_secs(1), move || {
                fired_inner.set(fired_inner.get() + 10);
            });
        });

        clock.advance(Duration::from_secs(1));
        scheduler.run_pending();
        assert_eq!(fired.get(), 1);

        clock.advance(Duration::from_secs(1));
        scheduler.run_pending();
        assert_eq!(fired.get(), 11);
    }

    #[test]
    fn test_overlapping_one_shots_both_fire() {
        let (clock, scheduler) = fixture();
        let cleared = Rc::new(Cell::new(0));

        for _ in 0..2 {
            let cleared_clone = cleared.clone();
            let _ = scheduler.schedule_once(Duration::from_millis(500), move || {
                cleared_clone.set(cleared_clone.get() + 1);
            });
            clock.advance(Duration::from_millis(100));
        }

        clock.advance(Duration::from_secs(1));
        scheduler.run_pending();
        assert_eq!(cleared.get(), 2);
    }

    #[test]
    fn test_next_deadline_tracks_earliest_task() {
        let (clock, scheduler) = fixture();
        assert!(scheduler.next_deadline().is_none());

        let _late = scheduler.schedule_once(Duration::from_secs(10), || {});
        let early = scheduler.schedule_once(Duration::from_secs(2), || {});

        let now = clock.now();
        assert_eq!(scheduler.next_deadline(), Some(now + Duration::from_secs(2)));

        early.cancel();
        assert_eq!(
            scheduler.next_deadline(),
            Some(now + Duration::from_secs(10))
        );
    }

    #[test]
    fn test_handle_outliving_scheduler_is_inert() {
        let (_clock, scheduler) = fixture();
        let handle = scheduler.schedule_once(Duration::from_secs(1), || {});
        drop(scheduler);
        handle.cancel();
    }
}
