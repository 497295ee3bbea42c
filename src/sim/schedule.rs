//! Virtual-time timer queue
//!
//! Stands in for `setTimeout`/`setInterval`: the platform moves time forward
//! and the owner pulls due tasks one at a time, so a task that cancels other
//! timers takes effect before they can fire. Every timer is identified by a
//! [`TimerHandle`] that doubles as its cancel token.

use serde::{Deserialize, Serialize};

/// Cancel token for a scheduled task. Handles are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Repeat {
    Once,
    Every(u64),
}

#[derive(Debug, Clone)]
struct Timer<T> {
    handle: TimerHandle,
    due_ms: u64,
    repeat: Repeat,
    task: T,
}

/// Pending timers over a monotonic millisecond clock
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    now_ms: u64,
    next_handle: u64,
    timers: Vec<Timer<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_handle: 1,
            timers: Vec::new(),
        }
    }

    /// Current virtual time (ms)
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of armed timers
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.timers.iter().any(|t| t.handle == handle)
    }

    /// Run `task` once, `delay_ms` from now
    pub fn set_timeout(&mut self, delay_ms: u64, task: T) -> TimerHandle {
        self.arm(delay_ms, Repeat::Once, task)
    }

    /// Run `task` every `period_ms` (at least 1 ms), first firing one period from now
    pub fn set_interval(&mut self, period_ms: u64, task: T) -> TimerHandle {
        let period_ms = period_ms.max(1);
        self.arm(period_ms, Repeat::Every(period_ms), task)
    }

    fn arm(&mut self, delay_ms: u64, repeat: Repeat, task: T) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        self.timers.push(Timer {
            handle,
            due_ms: self.now_ms.saturating_add(delay_ms),
            repeat,
            task,
        });
        handle
    }

    /// Disarm a timer. Returns false for handles that already fired or were cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.timers.iter().position(|t| t.handle == handle) {
            Some(idx) => {
                self.timers.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn cancel_all(&mut self) {
        self.timers.clear();
    }

    /// Move the clock forward without firing anything. Never moves backward.
    pub fn advance_to(&mut self, ms: u64) {
        self.now_ms = self.now_ms.max(ms);
    }
}

impl<T: Clone> Scheduler<T> {
    /// Remove and return the earliest timer due at or before `until_ms`.
    ///
    /// The clock jumps to that timer's deadline. Intervals are re-armed at
    /// `deadline + period`. Timers due at the same instant fire in handle
    /// order.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<(TimerHandle, T)> {
        let idx = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= until_ms)
            .min_by_key(|(_, t)| (t.due_ms, t.handle.0))
            .map(|(idx, _)| idx)?;

        let due_ms = self.timers[idx].due_ms;
        self.now_ms = self.now_ms.max(due_ms);

        match self.timers[idx].repeat {
            Repeat::Every(period_ms) => {
                let timer = &mut self.timers[idx];
                timer.due_ms = due_ms.saturating_add(period_ms);
                Some((timer.handle, timer.task.clone()))
            }
            Repeat::Once => {
                let timer = self.timers.remove(idx);
                Some((timer.handle, timer.task))
            }
        }
    }
}
