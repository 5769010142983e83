// Copyright 2025 the Ringchart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arc geometry and animation engine for pie/donut charts and semi-circular gauges.
//!
//! The crate turns a small series of weighted values into arcs and keeps them animated:
//! - **Layout** partitions a full or half circle proportionally, in input order, with optional
//!   padding between arcs.
//! - **Ring geometry** resolves per-segment radii, corner radii and end caps, and builds
//!   `kurbo` outlines for drawing.
//! - **Animation** computes per-arc entrance progress and selection scale/opacity from frame
//!   callbacks delivered through an injected [`Scheduler`].
//! - **Selection** tracks at most one selected arc and hides it again after a delay.
//! - **Tooltips** are placed next to the selected arc's mid-radius point.
//!
//! [`PieChart`] and [`Gauge`] tie these together behind a pull-based render snapshot. Drawing
//! itself is left to the caller.
//!
//! ```
//! use ringchart::{PieChart, PieChartOptions, SimulatedScheduler, WeightedValue};
//! use peniko::color::palette::css;
//!
//! let mut scheduler = SimulatedScheduler::new();
//! let config = PieChartOptions::default().resolve().unwrap();
//! let series = vec![
//!     WeightedValue::new(3.0, css::TOMATO),
//!     WeightedValue::new(1.0, css::STEEL_BLUE),
//! ];
//! let mut chart = PieChart::new(config, series, 0.0, &mut scheduler).unwrap();
//!
//! for wakeup in scheduler.advance_to(1000.0) {
//!     chart.on_wakeup(wakeup, &mut scheduler);
//! }
//! assert_eq!(chart.progress(), [1.0, 1.0]);
//! ```

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod animation;
#[cfg(test)]
mod chart_tests;
mod config;
mod datum;
mod easing;
mod error;
#[cfg(not(feature = "std"))]
mod float;
mod gauge;
mod layout;
mod pie_chart;
mod ring;
mod scheduler;
mod sector;
mod selection;
mod tooltip;
mod validate;

pub use animation::{
    AnimationConfig, EntranceAnimation, FrameOutcome, SELECTION_ANIMATION_DURATION,
    SelectionAnimation, SelectionAnimationConfig, Snapshot, Timeline, drive_entrance_animation,
    drive_selection_animations,
};
pub use config::{
    AnimationOption, AnimationOptions, CoverOption, CoverOptions, DEFAULT_GAUGE_WIDTH,
    DEFAULT_PIE_SIZE, GaugeAnimationOptions, GaugeConfig, GaugeDimensions, GaugeOptions,
    GaugeTooltipOptions, PieChartConfig, PieChartOptions, TooltipBox, TooltipOptions,
};
pub use datum::WeightedValue;
pub use easing::{Easing, EasingCurve, EasingTable};
pub use error::{ConfigError, InvalidGeometryError, InvalidValueError, LayoutError};
pub use gauge::{ArcRole, ChartRenderData, Gauge, GaugeArcRender, GaugeRenderData, GaugeTooltip};
pub use layout::{ArcSpan, Domain, GaugeArcs, layout, layout_full_circle, layout_half_circle};
pub use pie_chart::{CoverRender, OuterBorder, PieChart, PieRenderData, SliceRender, TooltipData};
pub use ring::{ArcStyle, EndCap, RingGeometry, SegmentRadii, point_at, reference_mid_radius};
pub use scheduler::{FrameHandle, Scheduler, SimulatedScheduler, TimerHandle, Wakeup};
pub use sector::SectorSpec;
pub use selection::{Selection, SelectionState};
pub use tooltip::{
    ArrowDirection, TooltipPlacement, full_circle_direction, mid_radius_anchor, place_full_circle,
    place_half_circle,
};
pub use validate::{
    validate_chart_size, validate_cover_radius, validate_pad_angle, validate_series,
    validate_thickness,
};
