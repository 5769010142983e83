// Copyright 2025 the Ringchart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Semi-circular gauge controller.
//!
//! The gauge draws at most two arcs: a background track over the whole half circle, styled after
//! the last segment, and a progress arc for the first segment that grows with a single entrance
//! progress value. Every segment can still be selected and gets its own tooltip anchor.

extern crate alloc;

use alloc::boxed::Box;
use alloc::vec::Vec;

use kurbo::Point;
use log::debug;
use peniko::Color;

use crate::animation::{EntranceAnimation, FrameOutcome};
use crate::config::{GaugeConfig, GaugeDimensions};
use crate::datum::WeightedValue;
use crate::error::LayoutError;
use crate::layout::{ArcSpan, GaugeArcs, layout_half_circle};
use crate::ring::{ArcStyle, EndCap, RingGeometry, SegmentRadii};
use crate::scheduler::{FrameHandle, Scheduler, TimerHandle, Wakeup};
use crate::sector::SectorSpec;
use crate::selection::Selection;
use crate::tooltip::{TooltipPlacement, mid_radius_anchor, place_half_circle};

/// Which of the two drawn arcs a [`GaugeArcRender`] is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArcRole {
    /// Full half-circle background.
    Track,
    /// Animated foreground.
    Progress,
}

/// One drawn gauge arc.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GaugeArcRender {
    /// Index of the segment that styles this arc.
    pub index: usize,
    /// Track or progress.
    pub role: ArcRole,
    /// Start angle in radians.
    pub start_angle: f64,
    /// End of the flat part of the arc, already pulled back for an end cap.
    pub end_angle: f64,
    /// Segment radii.
    pub radii: SegmentRadii,
    /// Corner radius, already clamped to half the segment thickness.
    pub corner_radius: f64,
    /// Round end cap, if any.
    pub end_cap: Option<EndCap>,
    /// Fill.
    pub color: Color,
}

impl GaugeArcRender {
    /// The flat part of the arc as a drawable sector around `center`, with rounded corners.
    pub fn sector(&self, center: Point) -> SectorSpec {
        SectorSpec::new(
            center,
            self.radii.inner,
            self.radii.outer,
            self.start_angle,
            self.end_angle,
        )
        .with_fill(self.color)
        .with_corner_radius(self.corner_radius)
    }
}

/// Chart-level values for center content.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartRenderData {
    /// Sum of all segment values.
    pub total: f64,
    /// Selected segment.
    pub selected: Option<usize>,
    /// Entrance progress.
    pub progress: f64,
    /// Size and ring placement.
    pub dimensions: GaugeDimensions,
}

/// Tooltip for the selected segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GaugeTooltip {
    /// Segment index.
    pub index: usize,
    /// Box and arrow placement.
    pub placement: TooltipPlacement,
    /// Arrow size.
    pub arrow_size: f64,
    /// Whether the segment has a label or sublabel for the default tooltip body.
    pub has_text: bool,
}

/// Everything needed to draw a gauge at one instant.
#[derive(Clone, Debug, PartialEq)]
pub struct GaugeRenderData {
    /// Chart-level values.
    pub chart: ChartRenderData,
    /// Vertical offset of the center content.
    pub center_offset: f64,
    /// Drawn arcs in paint order.
    pub arcs: Vec<GaugeArcRender>,
    /// Tooltip of the selected segment.
    pub tooltip: Option<GaugeTooltip>,
}

/// A semi-circular gauge.
#[derive(Debug)]
pub struct Gauge<M = ()> {
    config: GaugeConfig,
    segments: Vec<WeightedValue<M>>,
    arcs: GaugeArcs,
    ring: RingGeometry,
    total: f64,
    entrance: EntranceAnimation,
    selection: Selection,
}

impl<M> Gauge<M> {
    /// Lays out `segments` and starts the entrance animation.
    pub fn new(
        config: GaugeConfig,
        segments: Vec<WeightedValue<M>>,
        now: f64,
        scheduler: &mut impl Scheduler,
    ) -> Result<Self, LayoutError> {
        let arcs = layout_half_circle(&segments, config.pad_angle)?;
        let ring = ring_for(&config.dimensions, &segments);
        let total = segments.iter().map(|s| s.value).sum();
        let mut entrance = EntranceAnimation::new(config.animation);
        entrance.sync(1, 0, now, scheduler);
        debug!("gauge with {} segments, total {total}", segments.len());
        Ok(Self {
            selection: Selection::new(config.auto_hide_delay),
            config,
            segments,
            arcs,
            ring,
            total,
            entrance,
        })
    }

    /// Sets a callback invoked each time the entrance animation completes.
    pub fn set_on_animation_complete(&mut self, on_complete: impl FnMut() + 'static) {
        self.entrance.set_on_complete(Some(Box::new(on_complete)));
    }

    /// The resolved configuration.
    pub fn config(&self) -> &GaugeConfig {
        &self.config
    }

    /// The segments.
    pub fn segments(&self) -> &[WeightedValue<M>] {
        &self.segments
    }

    /// Partition spans and drawn arcs.
    pub fn arcs(&self) -> &GaugeArcs {
        &self.arcs
    }

    /// Shared ring geometry.
    pub fn ring(&self) -> &RingGeometry {
        &self.ring
    }

    /// Entrance progress.
    pub fn progress(&self) -> f64 {
        self.entrance.progress_at(0)
    }

    /// Selected segment.
    pub fn selected(&self) -> Option<usize> {
        self.selection.selected()
    }

    /// Whether the entrance animation is waiting for a frame.
    pub fn is_animating(&self) -> bool {
        self.entrance.is_running()
    }

    /// Replaces the segments without restarting the entrance animation.
    pub fn set_segments(
        &mut self,
        segments: Vec<WeightedValue<M>>,
        scheduler: &mut impl Scheduler,
    ) -> Result<(), LayoutError> {
        self.arcs = layout_half_circle(&segments, self.config.pad_angle)?;
        self.ring = ring_for(&self.config.dimensions, &segments);
        self.total = segments.iter().map(|s| s.value).sum();
        self.segments = segments;
        self.selection.retain_within(self.segments.len(), scheduler);
        Ok(())
    }

    /// Replaces the configuration, restarting the entrance animation if its settings changed.
    pub fn set_config(
        &mut self,
        config: GaugeConfig,
        now: f64,
        scheduler: &mut impl Scheduler,
    ) -> Result<(), LayoutError> {
        self.arcs = layout_half_circle(&self.segments, config.pad_angle)?;
        self.ring = ring_for(&config.dimensions, &self.segments);
        self.config = config;
        self.entrance.set_config(config.animation, now, scheduler);
        self.selection.set_auto_hide_delay(config.auto_hide_delay);
        Ok(())
    }

    /// Restarts the entrance animation if `key` differs from the current replay key.
    pub fn replay(&mut self, key: u64, now: f64, scheduler: &mut impl Scheduler) -> bool {
        self.entrance.sync(1, key, now, scheduler)
    }

    /// Handles a press on segment `index` and returns the pressed segment.
    pub fn press(
        &mut self,
        index: usize,
        scheduler: &mut impl Scheduler,
    ) -> Option<&WeightedValue<M>> {
        if index >= self.segments.len() {
            return None;
        }
        self.selection.toggle(index, scheduler);
        self.segments.get(index)
    }

    /// Deselects everything.
    pub fn clear_selection(&mut self, scheduler: &mut impl Scheduler) {
        self.selection.clear(scheduler);
    }

    /// Handles a frame callback.
    pub fn on_frame(
        &mut self,
        handle: FrameHandle,
        now: f64,
        scheduler: &mut impl Scheduler,
    ) -> FrameOutcome {
        self.entrance.on_frame(handle, now, scheduler)
    }

    /// Handles a timer callback; returns `true` if it cleared the selection.
    pub fn on_timer(&mut self, handle: TimerHandle, scheduler: &mut impl Scheduler) -> bool {
        self.selection.on_timer(handle, scheduler)
    }

    /// Dispatches a host callback; returns `true` if any state changed.
    pub fn on_wakeup(&mut self, wakeup: Wakeup, scheduler: &mut impl Scheduler) -> bool {
        match wakeup {
            Wakeup::Frame { handle, now } => {
                self.on_frame(handle, now, scheduler) != FrameOutcome::Stale
            }
            Wakeup::Timer { handle, .. } => self.on_timer(handle, scheduler),
        }
    }

    /// Radii of segment `index`.
    pub fn segment_radii(&self, index: usize) -> Option<SegmentRadii> {
        let segment = self.segments.get(index)?;
        Some(self.ring.radii_for(segment.thickness_multiplier()))
    }

    /// Tooltip for segment `index`, anchored on that segment's own mid-radius.
    pub fn tooltip_for(&self, index: usize) -> Option<GaugeTooltip> {
        let arc = self.arcs.segments.get(index)?;
        let segment = self.segments.get(index)?;
        let radii = self.ring.radii_for(segment.thickness_multiplier());
        let anchor = mid_radius_anchor(self.ring.center, radii, arc.mid_angle());
        let tooltip = self.config.tooltip;
        Some(GaugeTooltip {
            index,
            placement: place_half_circle(arc.mid_angle(), anchor, tooltip.size, tooltip.margin),
            arrow_size: tooltip.arrow_size,
            has_text: segment.has_tooltip_text(),
        })
    }

    /// Chart-level values.
    pub fn chart_data(&self) -> ChartRenderData {
        ChartRenderData {
            total: self.total,
            selected: self.selection.selected(),
            progress: self.progress(),
            dimensions: self.config.dimensions,
        }
    }

    /// Snapshot of everything to draw now.
    pub fn render_data(&self) -> GaugeRenderData {
        let progress = self.progress();
        let mut arcs = Vec::with_capacity(2);
        if let Some(track) = &self.arcs.track {
            arcs.extend(self.arc_render(track, ArcRole::Track, track.end_angle, true));
        }
        if let Some(bar) = self.arcs.progress.as_ref().filter(|_| progress > 0.0) {
            let end = bar.animated_end(progress);
            arcs.extend(self.arc_render(bar, ArcRole::Progress, end, progress >= 1.0));
        }

        let tooltip = if self.config.show_tooltip {
            self.selection
                .selected()
                .and_then(|i| self.tooltip_for(i))
        } else {
            None
        };

        GaugeRenderData {
            chart: self.chart_data(),
            center_offset: self.config.center_offset,
            arcs,
            tooltip,
        }
    }

    fn arc_render(
        &self,
        arc: &ArcSpan,
        role: ArcRole,
        end: f64,
        with_cap: bool,
    ) -> Option<GaugeArcRender> {
        let segment = arc.source(&self.segments)?;
        let radii = self.ring.radii_for(segment.thickness_multiplier());
        let style = ArcStyle::resolve(segment, self.config.corner_radius, radii);
        let end_cap = if with_cap {
            style.end_cap_at(self.ring.center, arc.end_angle, radii)
        } else {
            None
        };
        Some(GaugeArcRender {
            index: arc.source_index,
            role,
            start_angle: arc.start_angle,
            end_angle: style.drawn_end(arc.start_angle, end, radii),
            radii,
            corner_radius: style.corner_radius,
            end_cap,
            color: segment.color?,
        })
    }
}

fn ring_for<M>(dimensions: &GaugeDimensions, segments: &[WeightedValue<M>]) -> RingGeometry {
    RingGeometry::for_segments(
        dimensions.center,
        dimensions.radius,
        dimensions.inner_radius,
        segments,
    )
}
