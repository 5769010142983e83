// Copyright 2025 the Ringchart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame-driven animation clock.
//!
//! Two animations are provided:
//! - [`EntranceAnimation`]: per-arc progress from 0 to 1 when a chart first appears (or is
//!   replayed), optionally staggered so earlier arcs start first.
//! - [`SelectionAnimation`]: per-arc scale and opacity easing towards the targets implied by the
//!   current selection.
//!
//! Both publish a whole snapshot per frame: the progress arrays are replaced at once, never
//! updated element by element across frames.

extern crate alloc;

use alloc::boxed::Box;

use log::{debug, trace};
use smallvec::SmallVec;

use crate::easing::{Easing, EasingCurve, EasingTable};
use crate::scheduler::{FrameHandle, Scheduler};

/// Per-arc values published by one frame.
pub type Snapshot = SmallVec<[f64; 8]>;

/// Duration of the selection scale/opacity animation, in milliseconds.
pub const SELECTION_ANIMATION_DURATION: f64 = 200.0;

/// What a frame callback did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The handle was not the pending one (cancelled or already delivered); nothing changed.
    Stale,
    /// Values were updated (or the delay window is still open) and another frame was requested.
    Running,
    /// Every tracked quantity reached its target; no further frame was requested.
    Completed,
}

/// Resolved entrance animation settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationConfig {
    /// When `false`, progress is 1 immediately and no frame is requested.
    pub enabled: bool,
    /// Duration of each arc's animation in milliseconds.
    pub duration: f64,
    /// Delay before the first arc starts, in milliseconds.
    pub delay: f64,
    /// Easing curve.
    pub curve: EasingCurve,
    /// Stagger arcs in input order.
    pub sequential: bool,
    /// Stagger step in milliseconds.
    pub sequential_delay: f64,
}

impl AnimationConfig {
    /// Pie chart defaults: 800 ms, cubic ease-out, 100 ms stagger step (stagger off).
    pub const PIE: Self = Self {
        enabled: true,
        duration: 800.0,
        delay: 0.0,
        curve: EasingCurve::new(EasingTable::Cubic, Easing::EaseOut),
        sequential: false,
        sequential_delay: 100.0,
    };

    /// Gauge defaults: 1000 ms, quadratic ease-out.
    pub const GAUGE: Self = Self {
        enabled: true,
        duration: 1000.0,
        delay: 0.0,
        curve: EasingCurve::new(EasingTable::Quadratic, Easing::EaseOut),
        sequential: false,
        sequential_delay: 0.0,
    };

    /// Extra delay of arc `index` relative to the first arc.
    pub fn arc_delay(&self, index: usize) -> f64 {
        if self.sequential {
            index as f64 * self.sequential_delay
        } else {
            0.0
        }
    }

    /// Timeline of arc `index` for a run whose first arc starts at `run_start`.
    pub fn timeline(&self, run_start: f64, index: usize) -> Timeline {
        Timeline {
            start: run_start,
            delay: self.arc_delay(index),
            duration: self.duration,
            curve: self.curve,
        }
    }
}

/// One animated quantity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Timeline {
    /// Start time in milliseconds.
    pub start: f64,
    /// Delay added to `start`.
    pub delay: f64,
    /// Duration in milliseconds.
    pub duration: f64,
    /// Easing applied to the raw progress.
    pub curve: EasingCurve,
}

impl Timeline {
    /// Linear progress at `now`: 0 during the delay window, then `elapsed / duration` capped at 1.
    pub fn raw_progress(&self, now: f64) -> f64 {
        let elapsed = now - (self.start + self.delay);
        if elapsed < 0.0 {
            0.0
        } else if self.duration <= 0.0 {
            1.0
        } else {
            (elapsed / self.duration).min(1.0)
        }
    }

    /// Eased progress at `now`.
    pub fn sample(&self, now: f64) -> f64 {
        self.curve.sample(self.raw_progress(now))
    }

    /// Whether the quantity has reached its target at `now`.
    pub fn is_finished(&self, now: f64) -> bool {
        self.raw_progress(now) >= 1.0
    }
}

/// Entrance animation for a batch of arcs.
///
/// A run restarts when the arc count or the caller's replay key changes (see
/// [`sync`](Self::sync)); value changes alone do not restart it.
pub struct EntranceAnimation {
    config: AnimationConfig,
    progress: Snapshot,
    arc_count: usize,
    replay_key: u64,
    run_start: f64,
    pending: Option<FrameHandle>,
    completed: bool,
    on_complete: Option<Box<dyn FnMut()>>,
}

impl core::fmt::Debug for EntranceAnimation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EntranceAnimation")
            .field("config", &self.config)
            .field("progress", &self.progress)
            .field("arc_count", &self.arc_count)
            .field("replay_key", &self.replay_key)
            .field("run_start", &self.run_start)
            .field("pending", &self.pending)
            .field("completed", &self.completed)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

impl EntranceAnimation {
    /// Creates an idle animation with no arcs.
    pub fn new(config: AnimationConfig) -> Self {
        Self {
            config,
            progress: Snapshot::new(),
            arc_count: 0,
            replay_key: 0,
            run_start: 0.0,
            pending: None,
            completed: false,
            on_complete: None,
        }
    }

    /// Sets a callback invoked once each time a run completes.
    pub fn with_on_complete(mut self, on_complete: impl FnMut() + 'static) -> Self {
        self.on_complete = Some(Box::new(on_complete));
        self
    }

    /// Replaces the completion callback.
    pub fn set_on_complete(&mut self, on_complete: Option<Box<dyn FnMut()>>) {
        self.on_complete = on_complete;
    }

    /// The active settings.
    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    /// Current per-arc progress.
    pub fn progress(&self) -> &[f64] {
        &self.progress
    }

    /// Progress of arc `index`; arcs not yet tracked are at 0 (or 1 when disabled).
    pub fn progress_at(&self, index: usize) -> f64 {
        self.progress
            .get(index)
            .copied()
            .unwrap_or(if self.config.enabled { 0.0 } else { 1.0 })
    }

    /// Number of tracked arcs.
    pub fn arc_count(&self) -> usize {
        self.arc_count
    }

    /// Replay key of the current run.
    pub fn replay_key(&self) -> u64 {
        self.replay_key
    }

    /// Whether a frame request is outstanding.
    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    /// Whether the last run reached progress 1 for every arc.
    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// Starts a fresh run for `arc_count` arcs at `now`, cancelling any run in flight.
    ///
    /// When disabled, every arc is set to 1 and no frame is requested.
    pub fn start(&mut self, arc_count: usize, now: f64, scheduler: &mut impl Scheduler) {
        self.cancel(scheduler);
        self.arc_count = arc_count;
        self.completed = false;

        if !self.config.enabled {
            self.progress = Snapshot::from_elem(1.0, arc_count);
            self.completed = true;
            trace!("entrance animation disabled, {arc_count} arcs at full progress");
            return;
        }

        self.progress = Snapshot::from_elem(0.0, arc_count);
        self.run_start = now + self.config.delay;
        self.pending = Some(scheduler.request_frame());
        debug!(
            "entrance animation started: {arc_count} arcs, {}ms, first arc at {}",
            self.config.duration, self.run_start
        );
    }

    /// Restarts the run if the arc count or the replay key differs from the current run.
    ///
    /// Returns `true` if a restart happened.
    pub fn sync(
        &mut self,
        arc_count: usize,
        replay_key: u64,
        now: f64,
        scheduler: &mut impl Scheduler,
    ) -> bool {
        if arc_count == self.arc_count && replay_key == self.replay_key && self.has_run() {
            return false;
        }
        self.replay_key = replay_key;
        self.start(arc_count, now, scheduler);
        true
    }

    /// Replaces the settings and restarts the run when they changed.
    pub fn set_config(
        &mut self,
        config: AnimationConfig,
        now: f64,
        scheduler: &mut impl Scheduler,
    ) {
        if config == self.config {
            return;
        }
        self.config = config;
        self.start(self.arc_count, now, scheduler);
    }

    /// Cancels the outstanding frame request, freezing progress where it is.
    pub fn cancel(&mut self, scheduler: &mut impl Scheduler) {
        if let Some(handle) = self.pending.take() {
            scheduler.cancel_frame(handle);
            trace!("entrance animation frame {handle:?} cancelled");
        }
    }

    /// Handles a frame callback.
    pub fn on_frame(
        &mut self,
        handle: FrameHandle,
        now: f64,
        scheduler: &mut impl Scheduler,
    ) -> FrameOutcome {
        if self.pending != Some(handle) {
            return FrameOutcome::Stale;
        }
        self.pending = None;

        if now < self.run_start {
            self.pending = Some(scheduler.request_frame());
            return FrameOutcome::Running;
        }

        let mut all_finished = true;
        let next: Snapshot = (0..self.arc_count)
            .map(|i| {
                let timeline = self.config.timeline(self.run_start, i);
                all_finished &= timeline.is_finished(now);
                timeline.sample(now)
            })
            .collect();
        self.progress = next;

        if all_finished {
            self.completed = true;
            debug!("entrance animation complete");
            if let Some(on_complete) = self.on_complete.as_mut() {
                on_complete();
            }
            FrameOutcome::Completed
        } else {
            self.pending = Some(scheduler.request_frame());
            FrameOutcome::Running
        }
    }

    fn has_run(&self) -> bool {
        self.completed || self.pending.is_some() || !self.progress.is_empty()
    }
}

/// Starts an entrance animation for `arc_count` arcs.
///
/// Feed frame callbacks to [`EntranceAnimation::on_frame`] and read
/// [`EntranceAnimation::progress`] after each one.
pub fn drive_entrance_animation(
    arc_count: usize,
    config: AnimationConfig,
    on_complete: Option<Box<dyn FnMut()>>,
    now: f64,
    scheduler: &mut impl Scheduler,
) -> EntranceAnimation {
    let mut animation = EntranceAnimation::new(config);
    animation.on_complete = on_complete;
    animation.start(arc_count, now, scheduler);
    animation
}

/// Resolved selection animation settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SelectionAnimationConfig {
    /// Duration in milliseconds.
    pub duration: f64,
    /// Scale of the selected arc (1 disables the expansion).
    pub selection_scale: f64,
    /// Opacity of unselected arcs while something is selected.
    pub unselected_opacity: f64,
    /// Ease scale changes; otherwise they snap.
    pub animate_scale: bool,
    /// Ease opacity changes; otherwise they snap.
    pub animate_opacity: bool,
}

impl Default for SelectionAnimationConfig {
    fn default() -> Self {
        Self {
            duration: SELECTION_ANIMATION_DURATION,
            selection_scale: 1.05,
            unselected_opacity: 0.5,
            animate_scale: true,
            animate_opacity: true,
        }
    }
}

impl SelectionAnimationConfig {
    /// Target scale of arc `index`.
    pub fn target_scale(&self, index: usize, selected: Option<usize>) -> f64 {
        if selected == Some(index) {
            self.selection_scale
        } else {
            1.0
        }
    }

    /// Target opacity of arc `index`.
    pub fn target_opacity(&self, index: usize, selected: Option<usize>) -> f64 {
        match selected {
            Some(s) if s != index => self.unselected_opacity,
            _ => 1.0,
        }
    }
}

/// Scale and opacity animation following the selection.
#[derive(Debug)]
pub struct SelectionAnimation {
    config: SelectionAnimationConfig,
    scales: Snapshot,
    opacities: Snapshot,
    from_scales: Snapshot,
    from_opacities: Snapshot,
    to_scales: Snapshot,
    to_opacities: Snapshot,
    start: f64,
    pending: Option<FrameHandle>,
}

impl SelectionAnimation {
    /// Creates an animation with every arc at rest (scale 1, opacity 1).
    pub fn new(config: SelectionAnimationConfig, arc_count: usize) -> Self {
        let rest = Snapshot::from_elem(1.0, arc_count);
        Self {
            config,
            scales: rest.clone(),
            opacities: rest.clone(),
            from_scales: rest.clone(),
            from_opacities: rest.clone(),
            to_scales: rest.clone(),
            to_opacities: rest,
            start: 0.0,
            pending: None,
        }
    }

    /// The active settings.
    pub fn config(&self) -> &SelectionAnimationConfig {
        &self.config
    }

    /// Replaces the settings; takes effect on the next retarget.
    pub fn set_config(&mut self, config: SelectionAnimationConfig) {
        self.config = config;
    }

    /// Current per-arc scales.
    pub fn scales(&self) -> &[f64] {
        &self.scales
    }

    /// Current per-arc opacities.
    pub fn opacities(&self) -> &[f64] {
        &self.opacities
    }

    /// Scale of arc `index` (1 if untracked).
    pub fn scale_at(&self, index: usize) -> f64 {
        self.scales.get(index).copied().unwrap_or(1.0)
    }

    /// Opacity of arc `index` (1 if untracked).
    pub fn opacity_at(&self, index: usize) -> f64 {
        self.opacities.get(index).copied().unwrap_or(1.0)
    }

    /// Whether a frame request is outstanding.
    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    /// Starts easing from the current values towards the targets implied by `selected`.
    ///
    /// Any run in flight is cancelled first; its current values become the new starting point.
    pub fn retarget(
        &mut self,
        arc_count: usize,
        selected: Option<usize>,
        now: f64,
        scheduler: &mut impl Scheduler,
    ) {
        self.cancel(scheduler);
        self.scales.resize(arc_count, 1.0);
        self.opacities.resize(arc_count, 1.0);

        let config = self.config;
        self.to_scales = (0..arc_count)
            .map(|i| config.target_scale(i, selected))
            .collect();
        self.to_opacities = (0..arc_count)
            .map(|i| config.target_opacity(i, selected))
            .collect();

        if !config.animate_scale {
            self.scales.clone_from(&self.to_scales);
        }
        if !config.animate_opacity {
            self.opacities.clone_from(&self.to_opacities);
        }
        self.from_scales.clone_from(&self.scales);
        self.from_opacities.clone_from(&self.opacities);
        self.start = now;

        let moving = self.scales != self.to_scales || self.opacities != self.to_opacities;
        if moving {
            self.pending = Some(scheduler.request_frame());
            trace!("selection animation towards {selected:?}");
        }
    }

    /// Cancels the outstanding frame request, freezing values where they are.
    pub fn cancel(&mut self, scheduler: &mut impl Scheduler) {
        if let Some(handle) = self.pending.take() {
            scheduler.cancel_frame(handle);
        }
    }

    /// Handles a frame callback.
    pub fn on_frame(
        &mut self,
        handle: FrameHandle,
        now: f64,
        scheduler: &mut impl Scheduler,
    ) -> FrameOutcome {
        if self.pending != Some(handle) {
            return FrameOutcome::Stale;
        }
        self.pending = None;

        let timeline = Timeline {
            start: self.start,
            delay: 0.0,
            duration: self.config.duration,
            curve: EasingCurve::new(EasingTable::Cubic, Easing::EaseOut),
        };
        let eased = timeline.sample(now);
        self.scales = lerp_all(&self.from_scales, &self.to_scales, eased);
        self.opacities = lerp_all(&self.from_opacities, &self.to_opacities, eased);

        if timeline.is_finished(now) {
            FrameOutcome::Completed
        } else {
            self.pending = Some(scheduler.request_frame());
            FrameOutcome::Running
        }
    }
}

fn lerp_all(from: &[f64], to: &[f64], t: f64) -> Snapshot {
    from.iter().zip(to).map(|(a, b)| a + (b - a) * t).collect()
}

/// Starts a selection animation for `arc_count` arcs at rest, easing towards `selected`.
pub fn drive_selection_animations(
    arc_count: usize,
    selected: Option<usize>,
    config: SelectionAnimationConfig,
    now: f64,
    scheduler: &mut impl Scheduler,
) -> SelectionAnimation {
    let mut animation = SelectionAnimation::new(config, arc_count);
    animation.retarget(arc_count, selected, now, scheduler);
    animation
}
