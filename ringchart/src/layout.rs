// Copyright 2025 the Ringchart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arc layout: partition a domain angle proportionally to a series.
//!
//! Angles follow the usual pie-chart convention: radians, measured clockwise from 12 o'clock.
//! Arcs are emitted in input order. Unlike generic pie layouts there is no sorting, so the visual
//! position of an entry never depends on its magnitude.

extern crate alloc;

use alloc::vec::Vec;
use core::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::datum::WeightedValue;
use crate::error::LayoutError;
use crate::validate::{validate_pad_angle, validate_series};

/// The angular extent a layout fills.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Domain {
    /// A full turn starting at 12 o'clock.
    FullCircle,
    /// The upper half turn, from 9 o'clock to 3 o'clock.
    HalfCircle,
}

impl Domain {
    /// Angle at which the first arc starts.
    pub fn start_angle(self) -> f64 {
        match self {
            Self::FullCircle => 0.0,
            Self::HalfCircle => -FRAC_PI_2,
        }
    }

    /// Angle at which the last arc ends.
    pub fn end_angle(self) -> f64 {
        self.start_angle() + self.span()
    }

    /// Total angular extent.
    pub fn span(self) -> f64 {
        match self {
            Self::FullCircle => TAU,
            Self::HalfCircle => PI,
        }
    }
}

/// The angular interval of one entry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcSpan {
    /// Start angle in radians.
    pub start_angle: f64,
    /// End angle in radians (`>= start_angle`).
    pub end_angle: f64,
    /// Index of the entry this arc was derived from.
    pub source_index: usize,
    /// Value of that entry.
    pub value: f64,
}

impl ArcSpan {
    /// Angular width.
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Bisecting angle.
    pub fn mid_angle(&self) -> f64 {
        0.5 * (self.start_angle + self.end_angle)
    }

    /// Returns `true` for zero-width arcs, which should not be drawn.
    pub fn is_empty(&self) -> bool {
        self.sweep() <= 0.0
    }

    /// End angle of the visible part of the arc at entrance `progress` (clamped to `[0, 1]`).
    pub fn animated_end(&self, progress: f64) -> f64 {
        self.start_angle + self.sweep() * progress.clamp(0.0, 1.0)
    }

    /// Looks up the entry this arc was derived from.
    pub fn source<'a, M>(&self, series: &'a [WeightedValue<M>]) -> Option<&'a WeightedValue<M>> {
        series.get(self.source_index)
    }
}

/// Partitions `domain` proportionally to the values of `values`.
///
/// `pad_angle` carves `pad_angle / 2` from both sides of every interior boundary. The start of the
/// first arc and the end of the last arc are never padded. When the padding exceeds an arc's
/// share, that arc collapses to zero width at the middle of its share.
///
/// This does not validate its input; a non-positive total yields zero-width arcs at the domain
/// start. Use [`layout_full_circle`] or [`layout_half_circle`] for the validated entry points.
pub fn layout<M>(values: &[WeightedValue<M>], domain: Domain, pad_angle: f64) -> Vec<ArcSpan> {
    let total: f64 = values.iter().map(|v| v.value).sum();
    let last = values.len().saturating_sub(1);
    let half_pad = 0.5 * pad_angle.max(0.0);
    let start = domain.start_angle();

    let mut out = Vec::with_capacity(values.len());
    let mut cumulative = 0.0;
    let mut a0 = start;
    for (i, v) in values.iter().enumerate() {
        cumulative += v.value;
        let a1 = if i == last {
            domain.end_angle()
        } else if total > 0.0 {
            start + domain.span() * (cumulative / total)
        } else {
            start
        };

        let padded_start = if i > 0 { a0 + half_pad } else { a0 };
        let padded_end = if i < last { a1 - half_pad } else { a1 };
        let (start_angle, end_angle) = if padded_end >= padded_start {
            (padded_start, padded_end)
        } else {
            let mid = 0.5 * (a0 + a1);
            (mid, mid)
        };

        out.push(ArcSpan {
            start_angle,
            end_angle,
            source_index: i,
            value: v.value,
        });
        a0 = a1;
    }

    // A zero total leaves every boundary at the start; only the last arc would reach the end.
    if total <= 0.0 {
        if let Some(arc) = out.last_mut() {
            arc.start_angle = start;
            arc.end_angle = start;
        }
    }
    out
}

/// Validates `series` and lays it out over a full circle.
pub fn layout_full_circle<M>(
    series: &[WeightedValue<M>],
    pad_angle: f64,
) -> Result<Vec<ArcSpan>, LayoutError> {
    validate_series(series)?;
    validate_pad_angle(pad_angle)?;
    Ok(layout(series, Domain::FullCircle, pad_angle))
}

/// Gauge layout: the half-circle partition plus the two arcs the gauge actually draws.
///
/// The gauge draws a background track spanning the whole half circle (styled after the last
/// segment) and overlays the first segment's span as the progress arc. The two drawn arcs overlap
/// rather than partition the domain.
#[derive(Clone, Debug, PartialEq)]
pub struct GaugeArcs {
    /// One span per segment, as for a pie.
    pub segments: Vec<ArcSpan>,
    /// Full-domain background arc, present when there are at least two segments.
    pub track: Option<ArcSpan>,
    /// Foreground arc, the first segment's span.
    pub progress: Option<ArcSpan>,
}

impl GaugeArcs {
    /// Iterates the drawn arcs in paint order (track first).
    pub fn drawn(&self) -> impl Iterator<Item = &ArcSpan> {
        self.track.iter().chain(self.progress.iter())
    }
}

/// Validates `segments` and lays them out over the upper half circle.
pub fn layout_half_circle<M>(
    segments: &[WeightedValue<M>],
    pad_angle: f64,
) -> Result<GaugeArcs, LayoutError> {
    validate_series(segments)?;
    validate_pad_angle(pad_angle)?;

    let spans = layout(segments, Domain::HalfCircle, pad_angle);
    let track = if spans.len() > 1 {
        spans.last().map(|last| ArcSpan {
            start_angle: Domain::HalfCircle.start_angle(),
            end_angle: Domain::HalfCircle.end_angle(),
            source_index: last.source_index,
            value: last.value,
        })
    } else {
        None
    };
    let progress = spans.first().copied();
    Ok(GaugeArcs {
        segments: spans,
        track,
        progress,
    })
}
