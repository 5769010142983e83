// Copyright 2025 the Ringchart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-arc selection with auto-hide.

use log::trace;

use crate::scheduler::{Scheduler, TimerHandle};

/// The selection as seen from outside.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectionState {
    /// Nothing selected.
    #[default]
    Idle,
    /// The arc at this index is selected.
    Selected(usize),
}

impl SelectionState {
    /// The selected index, if any.
    pub fn index(self) -> Option<usize> {
        match self {
            Self::Idle => None,
            Self::Selected(i) => Some(i),
        }
    }
}

/// At most one selected arc, cleared automatically after `auto_hide_delay` milliseconds.
///
/// The auto-hide timer is rescheduled on every transition into [`SelectionState::Selected`],
/// including a direct switch from one arc to another. A delay of `0` disables it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Selection {
    state: SelectionState,
    auto_hide_delay: f64,
    timer: Option<TimerHandle>,
}

impl Selection {
    /// Creates an idle selection.
    pub fn new(auto_hide_delay: f64) -> Self {
        Self {
            state: SelectionState::Idle,
            auto_hide_delay,
            timer: None,
        }
    }

    /// Current state.
    pub fn state(&self) -> SelectionState {
        self.state
    }

    /// Selected index, if any.
    pub fn selected(&self) -> Option<usize> {
        self.state.index()
    }

    /// Auto-hide delay in milliseconds (`0` when disabled).
    pub fn auto_hide_delay(&self) -> f64 {
        self.auto_hide_delay
    }

    /// Changes the auto-hide delay. A pending timer keeps its original deadline.
    pub fn set_auto_hide_delay(&mut self, delay: f64) {
        self.auto_hide_delay = delay;
    }

    /// Selects `index`, or deselects it if it is already selected.
    ///
    /// Returns the new selected index.
    pub fn toggle(&mut self, index: usize, scheduler: &mut impl Scheduler) -> Option<usize> {
        if self.state == SelectionState::Selected(index) {
            self.clear(scheduler);
        } else {
            self.state = SelectionState::Selected(index);
            self.restart_timer(scheduler);
            trace!("selected arc {index}");
        }
        self.selected()
    }

    /// Deselects everything and cancels the auto-hide timer.
    pub fn clear(&mut self, scheduler: &mut impl Scheduler) {
        self.cancel_timer(scheduler);
        if self.state != SelectionState::Idle {
            trace!("selection cleared");
        }
        self.state = SelectionState::Idle;
    }

    /// Handles a timer callback; returns `true` if it cleared the selection.
    pub fn on_timer(&mut self, handle: TimerHandle, scheduler: &mut impl Scheduler) -> bool {
        if self.timer != Some(handle) {
            return false;
        }
        self.timer = None;
        trace!("selection auto-hidden");
        self.clear(scheduler);
        true
    }

    /// Clears a selection that points past the end of a series of `count` arcs.
    pub fn retain_within(&mut self, count: usize, scheduler: &mut impl Scheduler) {
        if matches!(self.state, SelectionState::Selected(i) if i >= count) {
            self.clear(scheduler);
        }
    }

    fn restart_timer(&mut self, scheduler: &mut impl Scheduler) {
        self.cancel_timer(scheduler);
        if self.auto_hide_delay > 0.0 {
            self.timer = Some(scheduler.set_timer(self.auto_hide_delay));
        }
    }

    fn cancel_timer(&mut self, scheduler: &mut impl Scheduler) {
        if let Some(handle) = self.timer.take() {
            scheduler.cancel_timer(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use crate::scheduler::{SimulatedScheduler, Wakeup};

    use super::*;

    fn fire(selection: &mut Selection, s: &mut SimulatedScheduler, now: f64) -> bool {
        let mut cleared = false;
        for wakeup in s.advance_to(now) {
            if let Wakeup::Timer { handle, .. } = wakeup {
                cleared |= selection.on_timer(handle, s);
            }
        }
        cleared
    }

    #[test]
    fn toggling_the_same_index_deselects() {
        let mut s = SimulatedScheduler::new();
        let mut sel = Selection::new(3000.0);
        assert_eq!(sel.toggle(2, &mut s), Some(2));
        assert_eq!(sel.toggle(2, &mut s), None);
        assert_eq!(sel.state(), SelectionState::Idle);
        assert_eq!(s.pending_timers(), 0);
    }

    #[test]
    fn switching_goes_directly_to_the_new_index() {
        let mut s = SimulatedScheduler::new();
        let mut sel = Selection::new(3000.0);
        sel.toggle(2, &mut s);
        assert_eq!(sel.toggle(5, &mut s), Some(5));
        assert_eq!(sel.state(), SelectionState::Selected(5));
        assert_eq!(s.pending_timers(), 1);
    }

    #[test]
    fn auto_hide_restarts_on_every_selection() {
        let mut s = SimulatedScheduler::new();
        let mut sel = Selection::new(3000.0);
        sel.toggle(0, &mut s);
        assert!(!fire(&mut sel, &mut s, 2000.0));
        sel.toggle(1, &mut s);
        assert!(!fire(&mut sel, &mut s, 4000.0));
        assert_eq!(sel.selected(), Some(1));
        assert!(fire(&mut sel, &mut s, 5000.0));
        assert_eq!(sel.selected(), None);
    }

    #[test]
    fn zero_delay_disables_auto_hide() {
        let mut s = SimulatedScheduler::new();
        let mut sel = Selection::new(0.0);
        sel.toggle(3, &mut s);
        assert_eq!(s.pending_timers(), 0);
        assert!(!fire(&mut sel, &mut s, 1.0e9));
        assert_eq!(sel.selected(), Some(3));
    }

    #[test]
    fn stale_timer_is_ignored() {
        let mut s = SimulatedScheduler::new();
        let mut sel = Selection::new(100.0);
        sel.toggle(0, &mut s);
        let stale = TimerHandle(u64::MAX);
        assert!(!sel.on_timer(stale, &mut s));
        assert_eq!(sel.selected(), Some(0));
    }

    #[test]
    fn out_of_range_selection_is_dropped() {
        let mut s = SimulatedScheduler::new();
        let mut sel = Selection::new(100.0);
        sel.toggle(4, &mut s);
        sel.retain_within(5, &mut s);
        assert_eq!(sel.selected(), Some(4));
        sel.retain_within(3, &mut s);
        assert_eq!(sel.selected(), None);
        assert_eq!(s.pending_timers(), 0);
    }
}
