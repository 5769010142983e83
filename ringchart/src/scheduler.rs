// Copyright 2025 the Ringchart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame and timer scheduling.
//!
//! Animations and the selection timer never own a clock. They ask a [`Scheduler`] for a frame or
//! a timer, remember the returned handle, and are later called back by the host with that handle
//! and the current time. A callback carrying a handle that is no longer pending (because it was
//! cancelled by a restart) is ignored, so stale callbacks can never mutate new state.
//!
//! Everything runs on one logical thread: the host delivers callbacks one at a time.
//!
//! [`SimulatedScheduler`] is a deterministic implementation driven by a virtual clock, for tests
//! and offline rendering.

extern crate alloc;

use alloc::vec::Vec;

use hashbrown::HashMap;
use smallvec::SmallVec;

/// Identifies a requested animation frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(pub u64);

/// Identifies a scheduled timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(pub u64);

/// Host capability delivering display-refresh and timer callbacks.
///
/// Times are milliseconds on a monotonic clock chosen by the host.
pub trait Scheduler {
    /// Requests a callback on the next display refresh.
    fn request_frame(&mut self) -> FrameHandle;
    /// Cancels a pending frame request. Unknown handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);
    /// Requests a callback after `delay` milliseconds.
    fn set_timer(&mut self, delay: f64) -> TimerHandle;
    /// Cancels a pending timer. Unknown handles are ignored.
    fn cancel_timer(&mut self, handle: TimerHandle);
}

/// A callback delivered by the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Wakeup {
    /// A requested frame is due.
    Frame {
        /// The handle returned by [`Scheduler::request_frame`].
        handle: FrameHandle,
        /// Frame timestamp in milliseconds.
        now: f64,
    },
    /// A timer fired.
    Timer {
        /// The handle returned by [`Scheduler::set_timer`].
        handle: TimerHandle,
        /// Firing time in milliseconds.
        now: f64,
    },
}

/// A deterministic scheduler with a virtual clock.
///
/// Frames requested before a call to [`advance_to`](Self::advance_to) are all delivered by that
/// call; frames requested while handling them wait for the next one. Timers are delivered once
/// their deadline has been reached, in deadline order.
#[derive(Debug, Default)]
pub struct SimulatedScheduler {
    now: f64,
    next_id: u64,
    frames: SmallVec<[FrameHandle; 4]>,
    timers: HashMap<TimerHandle, f64>,
}

impl SimulatedScheduler {
    /// Creates a scheduler at time `0`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scheduler at time `now`.
    pub fn starting_at(now: f64) -> Self {
        Self {
            now,
            ..Self::default()
        }
    }

    /// Current virtual time.
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Number of frame requests waiting for delivery.
    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    /// Number of timers waiting to fire.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Moves the clock to `now` (never backwards) and returns the callbacks that became due.
    ///
    /// Due timers come first, ordered by deadline then by handle, followed by every pending
    /// frame in request order.
    pub fn advance_to(&mut self, now: f64) -> Vec<Wakeup> {
        self.now = self.now.max(now);

        let mut due: Vec<(f64, TimerHandle)> = self
            .timers
            .iter()
            .filter(|&(_, &deadline)| deadline <= self.now)
            .map(|(&handle, &deadline)| (deadline, handle))
            .collect();
        due.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        let mut out = Vec::with_capacity(due.len() + self.frames.len());
        for (_, handle) in due {
            self.timers.remove(&handle);
            out.push(Wakeup::Timer {
                handle,
                now: self.now,
            });
        }
        for handle in self.frames.drain(..) {
            out.push(Wakeup::Frame {
                handle,
                now: self.now,
            });
        }
        out
    }

    /// Advances by `dt` milliseconds.
    pub fn advance_by(&mut self, dt: f64) -> Vec<Wakeup> {
        self.advance_to(self.now + dt)
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl Scheduler for SimulatedScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_id());
        self.frames.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.frames.retain(|h| *h != handle);
    }

    fn set_timer(&mut self, delay: f64) -> TimerHandle {
        let handle = TimerHandle(self.next_id());
        self.timers.insert(handle, self.now + delay.max(0.0));
        handle
    }

    fn cancel_timer(&mut self, handle: TimerHandle) {
        self.timers.remove(&handle);
    }
}
