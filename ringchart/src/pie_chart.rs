// Copyright 2025 the Ringchart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pie and donut chart controller.

extern crate alloc;

use alloc::boxed::Box;
use alloc::vec::Vec;

use kurbo::{Circle, Point};
use log::debug;
use peniko::Color;

use crate::animation::{EntranceAnimation, FrameOutcome, SelectionAnimation};
use crate::config::PieChartConfig;
use crate::datum::WeightedValue;
use crate::error::LayoutError;
use crate::layout::{ArcSpan, layout_full_circle};
use crate::ring::SegmentRadii;
use crate::scheduler::{FrameHandle, Scheduler, TimerHandle, Wakeup};
use crate::sector::SectorSpec;
use crate::selection::Selection;
use crate::tooltip::{TooltipPlacement, mid_radius_anchor, place_full_circle};

/// One visible slice in a render snapshot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SliceRender {
    /// Index into the series.
    pub index: usize,
    /// Start angle in radians.
    pub start_angle: f64,
    /// End angle at the current entrance progress.
    pub end_angle: f64,
    /// Inner radius after selection scaling (0 for a filled pie).
    pub inner_radius: f64,
    /// Outer radius after selection scaling.
    pub outer_radius: f64,
    /// Fill.
    pub color: Color,
    /// Selection opacity.
    pub opacity: f64,
    /// Entrance progress.
    pub progress: f64,
}

impl SliceRender {
    /// The slice as a drawable sector around `center`.
    pub fn sector(&self, center: Point) -> SectorSpec {
        SectorSpec::new(
            center,
            self.inner_radius,
            self.outer_radius,
            self.start_angle,
            self.end_angle,
        )
        .with_fill(self.color)
        .with_opacity(self.opacity)
    }
}

/// Tooltip for one slice.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TooltipData {
    /// Index into the series.
    pub index: usize,
    /// Slice value.
    pub value: f64,
    /// Share of the total, in percent.
    pub percentage: f64,
    /// Sum of all values.
    pub total: f64,
    /// Box and arrow placement.
    pub placement: TooltipPlacement,
    /// Arrow size.
    pub arrow_size: f64,
    /// Whether the slice has a label; without one the default tooltip body is not drawn.
    pub has_text: bool,
}

/// Filled donut hole.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoverRender {
    /// Hole disc.
    pub circle: Circle,
    /// Hole fill.
    pub color: Color,
}

/// Ring drawn along the nominal outer radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OuterBorder {
    /// Border circle.
    pub circle: Circle,
    /// Stroke width.
    pub width: f64,
}

/// Everything needed to draw a pie chart at one instant.
#[derive(Clone, Debug, PartialEq)]
pub struct PieRenderData {
    /// Side length of the chart area.
    pub size: f64,
    /// Chart center.
    pub center: Point,
    /// Nominal outer radius.
    pub radius: f64,
    /// Sum of all values.
    pub total: f64,
    /// Selected slice.
    pub selected: Option<usize>,
    /// Visible slices in paint order.
    pub slices: Vec<SliceRender>,
    /// Donut hole fill, painted after the slices.
    pub cover: Option<CoverRender>,
    /// Outer border.
    pub outer_border: Option<OuterBorder>,
    /// Tooltips to show.
    pub tooltips: Vec<TooltipData>,
}

/// A pie or donut chart.
///
/// Owns the series, its layout, the entrance and selection animations, and the selection.
/// The host forwards frame and timer callbacks and pulls [`render_data`](Self::render_data)
/// whenever it needs to draw.
#[derive(Debug)]
pub struct PieChart<M = ()> {
    config: PieChartConfig,
    series: Vec<WeightedValue<M>>,
    arcs: Vec<ArcSpan>,
    total: f64,
    entrance: EntranceAnimation,
    highlight: SelectionAnimation,
    selection: Selection,
}

impl<M> PieChart<M> {
    /// Lays out `series` and starts the entrance animation.
    pub fn new(
        config: PieChartConfig,
        series: Vec<WeightedValue<M>>,
        now: f64,
        scheduler: &mut impl Scheduler,
    ) -> Result<Self, LayoutError> {
        let arcs = layout_full_circle(&series, config.pad_angle)?;
        let total = series.iter().map(|s| s.value).sum();
        let mut entrance = EntranceAnimation::new(config.animation);
        entrance.sync(series.len(), 0, now, scheduler);
        debug!("pie chart with {} slices, total {total}", series.len());
        Ok(Self {
            highlight: SelectionAnimation::new(config.selection, series.len()),
            selection: Selection::new(config.tooltip_delay),
            config,
            series,
            arcs,
            total,
            entrance,
        })
    }

    /// Sets a callback invoked each time the entrance animation completes.
    pub fn set_on_animation_complete(&mut self, on_complete: impl FnMut() + 'static) {
        self.entrance.set_on_complete(Some(Box::new(on_complete)));
    }

    /// The resolved configuration.
    pub fn config(&self) -> &PieChartConfig {
        &self.config
    }

    /// The series.
    pub fn series(&self) -> &[WeightedValue<M>] {
        &self.series
    }

    /// One arc per series entry.
    pub fn arcs(&self) -> &[ArcSpan] {
        &self.arcs
    }

    /// Sum of all values.
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Selected slice.
    pub fn selected(&self) -> Option<usize> {
        self.selection.selected()
    }

    /// Entrance progress per slice.
    pub fn progress(&self) -> &[f64] {
        self.entrance.progress()
    }

    /// Selection scale per slice.
    pub fn scales(&self) -> &[f64] {
        self.highlight.scales()
    }

    /// Selection opacity per slice.
    pub fn opacities(&self) -> &[f64] {
        self.highlight.opacities()
    }

    /// Whether any animation is waiting for a frame.
    pub fn is_animating(&self) -> bool {
        self.entrance.is_running() || self.highlight.is_running()
    }

    /// Replaces the series.
    ///
    /// The entrance animation restarts only when the number of slices changes; a change of
    /// values alone keeps the current progress. On error nothing changes.
    pub fn set_series(
        &mut self,
        series: Vec<WeightedValue<M>>,
        now: f64,
        scheduler: &mut impl Scheduler,
    ) -> Result<(), LayoutError> {
        let arcs = layout_full_circle(&series, self.config.pad_angle)?;
        let count_changed = series.len() != self.series.len();
        self.total = series.iter().map(|s| s.value).sum();
        self.arcs = arcs;
        self.series = series;

        if count_changed {
            let count = self.series.len();
            let key = self.entrance.replay_key();
            self.entrance.sync(count, key, now, scheduler);
            self.selection.retain_within(count, scheduler);
            self.highlight
                .retarget(count, self.selection.selected(), now, scheduler);
        }
        Ok(())
    }

    /// Replaces the configuration, restarting the entrance animation if its settings changed.
    pub fn set_config(
        &mut self,
        config: PieChartConfig,
        now: f64,
        scheduler: &mut impl Scheduler,
    ) -> Result<(), LayoutError> {
        self.arcs = layout_full_circle(&self.series, config.pad_angle)?;
        self.config = config;
        self.entrance.set_config(config.animation, now, scheduler);
        self.selection.set_auto_hide_delay(config.tooltip_delay);
        self.highlight.set_config(config.selection);
        self.highlight
            .retarget(self.series.len(), self.selection.selected(), now, scheduler);
        Ok(())
    }

    /// Restarts the entrance animation if `key` differs from the current replay key.
    pub fn replay(&mut self, key: u64, now: f64, scheduler: &mut impl Scheduler) -> bool {
        self.entrance.sync(self.series.len(), key, now, scheduler)
    }

    /// Handles a press on slice `index` and returns the pressed entry.
    ///
    /// Selection only toggles when tooltips are enabled.
    pub fn press(
        &mut self,
        index: usize,
        now: f64,
        scheduler: &mut impl Scheduler,
    ) -> Option<&WeightedValue<M>> {
        if index >= self.series.len() {
            return None;
        }
        if self.config.show_tooltip {
            let selected = self.selection.toggle(index, scheduler);
            self.highlight.retarget(self.series.len(), selected, now, scheduler);
        }
        self.series.get(index)
    }

    /// Deselects everything.
    pub fn clear_selection(&mut self, now: f64, scheduler: &mut impl Scheduler) {
        self.selection.clear(scheduler);
        self.highlight.retarget(self.series.len(), None, now, scheduler);
    }

    /// Handles a frame callback.
    pub fn on_frame(
        &mut self,
        handle: FrameHandle,
        now: f64,
        scheduler: &mut impl Scheduler,
    ) -> FrameOutcome {
        match self.entrance.on_frame(handle, now, scheduler) {
            FrameOutcome::Stale => self.highlight.on_frame(handle, now, scheduler),
            outcome => outcome,
        }
    }

    /// Handles a timer callback; returns `true` if it cleared the selection.
    pub fn on_timer(
        &mut self,
        handle: TimerHandle,
        now: f64,
        scheduler: &mut impl Scheduler,
    ) -> bool {
        if !self.selection.on_timer(handle, scheduler) {
            return false;
        }
        self.highlight.retarget(self.series.len(), None, now, scheduler);
        true
    }

    /// Dispatches a host callback; returns `true` if any state changed.
    pub fn on_wakeup(&mut self, wakeup: Wakeup, scheduler: &mut impl Scheduler) -> bool {
        match wakeup {
            Wakeup::Frame { handle, now } => {
                self.on_frame(handle, now, scheduler) != FrameOutcome::Stale
            }
            Wakeup::Timer { handle, now } => self.on_timer(handle, now, scheduler),
        }
    }

    /// Tooltip for slice `index`, anchored on the unscaled ring.
    pub fn tooltip_for(&self, index: usize) -> Option<TooltipData> {
        let arc = self.arcs.get(index)?;
        let slice = arc.source(&self.series)?;
        let radius = self.config.radius;
        let inner = self.config.cover_ratio.map_or(0.0, |c| c * radius);
        let anchor = mid_radius_anchor(
            self.config.center,
            SegmentRadii::new(inner, radius),
            arc.mid_angle(),
        );
        let tooltip = self.config.tooltip;
        Some(TooltipData {
            index,
            value: arc.value,
            percentage: arc.value / self.total * 100.0,
            total: self.total,
            placement: place_full_circle(arc.mid_angle(), anchor, tooltip.size, tooltip.margin),
            arrow_size: tooltip.arrow_size,
            has_text: slice.label.is_some(),
        })
    }

    /// Snapshot of everything to draw now.
    pub fn render_data(&self) -> PieRenderData {
        let center = self.config.center;
        let radius = self.config.radius;

        let slices = self
            .arcs
            .iter()
            .filter_map(|arc| {
                let index = arc.source_index;
                let progress = self.entrance.progress_at(index);
                if progress <= 0.0 || arc.is_empty() {
                    return None;
                }
                let color = arc.source(&self.series)?.color?;
                let outer = radius * self.highlight.scale_at(index);
                Some(SliceRender {
                    index,
                    start_angle: arc.start_angle,
                    end_angle: arc.animated_end(progress),
                    inner_radius: self.config.cover_ratio.map_or(0.0, |c| c * outer),
                    outer_radius: outer,
                    color,
                    opacity: self.highlight.opacity_at(index),
                    progress,
                })
            })
            .collect();

        let cover = match (self.config.cover_ratio, self.config.cover_color) {
            (Some(ratio), Some(color)) => Some(CoverRender {
                circle: Circle::new(center, ratio * radius),
                color,
            }),
            _ => None,
        };

        let tooltips = if !self.config.show_tooltip {
            Vec::new()
        } else if self.config.always_show_tooltips {
            (0..self.arcs.len())
                .filter_map(|i| self.tooltip_for(i))
                .collect()
        } else {
            self.selection
                .selected()
                .and_then(|i| self.tooltip_for(i))
                .into_iter()
                .collect()
        };

        PieRenderData {
            size: self.config.size,
            center,
            radius,
            total: self.total,
            selected: self.selection.selected(),
            slices,
            cover,
            outer_border: self.config.outer_border.map(|width| OuterBorder {
                circle: Circle::new(center, radius),
                width,
            }),
            tooltips,
        }
    }
}
