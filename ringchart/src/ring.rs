// Copyright 2025 the Ringchart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ring radii, corner treatment and end caps.
//!
//! Gauge segments may be individually thicker or thinner than the base ring. All segments are
//! centered on a shared *reference mid-radius*, chosen so that the thickest segment's outer edge
//! touches the nominal radius. Tooltip anchors use each segment's own mid-radius, which is the
//! reference mid-radius for every segment, so anchors line up regardless of thickness.

use kurbo::{Circle, Point, Vec2};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::datum::WeightedValue;

/// Point at `radius` from `center` along `angle` (radians, clockwise from 12 o'clock).
pub fn point_at(center: Point, radius: f64, angle: f64) -> Point {
    center + Vec2::new(radius * angle.sin(), -radius * angle.cos())
}

/// Inner and outer radius of one ring band.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentRadii {
    /// Inner radius.
    pub inner: f64,
    /// Outer radius.
    pub outer: f64,
}

impl SegmentRadii {
    /// Creates a band from its radii.
    pub fn new(inner: f64, outer: f64) -> Self {
        Self { inner, outer }
    }

    /// Creates a band of `thickness` centered on `mid`.
    pub fn centered(mid: f64, thickness: f64) -> Self {
        Self {
            inner: mid - 0.5 * thickness,
            outer: mid + 0.5 * thickness,
        }
    }

    /// Radial thickness.
    pub fn thickness(&self) -> f64 {
        self.outer - self.inner
    }

    /// Midpoint between inner and outer radius.
    pub fn mid(&self) -> f64 {
        0.5 * (self.outer + self.inner)
    }

    /// Largest corner radius that does not self-intersect.
    pub fn max_corner_radius(&self) -> f64 {
        0.5 * self.thickness()
    }

    /// Clamps a requested corner or cap radius to `[0, thickness / 2]`.
    pub fn clamp_corner_radius(&self, radius: f64) -> f64 {
        radius.max(0.0).min(self.max_corner_radius())
    }
}

/// Chart-level ring geometry shared by all segments.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingGeometry {
    /// Ring center.
    pub center: Point,
    /// Nominal outer radius.
    pub radius: f64,
    /// Nominal inner radius.
    pub inner_radius: f64,
    /// Mid-radius every segment is centered on.
    pub reference_mid_radius: f64,
}

impl RingGeometry {
    /// Creates a ring where every segment has the base thickness.
    pub fn new(center: Point, radius: f64, inner_radius: f64) -> Self {
        Self {
            center,
            radius,
            inner_radius,
            reference_mid_radius: 0.5 * (radius + inner_radius),
        }
    }

    /// Creates a ring for `segments`, accounting for their thickness multipliers.
    pub fn for_segments<M>(
        center: Point,
        radius: f64,
        inner_radius: f64,
        segments: &[WeightedValue<M>],
    ) -> Self {
        let max_multiplier = segments
            .iter()
            .map(WeightedValue::thickness_multiplier)
            .fold(f64::NEG_INFINITY, f64::max);
        let max_multiplier = if max_multiplier.is_finite() {
            max_multiplier
        } else {
            1.0
        };
        Self {
            center,
            radius,
            inner_radius,
            reference_mid_radius: reference_mid_radius(max_multiplier, radius, inner_radius),
        }
    }

    /// Base ring thickness.
    pub fn base_thickness(&self) -> f64 {
        self.radius - self.inner_radius
    }

    /// Radii of a segment with the given thickness multiplier.
    pub fn radii_for(&self, multiplier: f64) -> SegmentRadii {
        SegmentRadii::centered(self.reference_mid_radius, self.base_thickness() * multiplier)
    }

    /// Point on a segment's mid-radius along `angle`.
    pub fn mid_point(&self, radii: SegmentRadii, angle: f64) -> Point {
        point_at(self.center, radii.mid(), angle)
    }
}

/// Mid-radius that places the thickest segment flush with the nominal outer radius.
pub fn reference_mid_radius(max_multiplier: f64, radius: f64, inner_radius: f64) -> f64 {
    let max_thickness = (radius - inner_radius) * max_multiplier;
    radius - 0.5 * max_thickness
}

/// How the ends of an arc are finished, resolved once per segment.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ArcStyle {
    /// Corner radius applied to all four corners, already clamped.
    pub corner_radius: f64,
    /// Radius of the round cap at the arc end, already clamped.
    pub end_cap: Option<f64>,
}

impl ArcStyle {
    /// Resolves the per-segment options against the chart-wide corner radius.
    ///
    /// Setting only `end_corner_radius` selects end-cap mode: the corners stay flat and a disc is
    /// drawn at the end instead.
    pub fn resolve<M>(
        segment: &WeightedValue<M>,
        global_corner_radius: f64,
        radii: SegmentRadii,
    ) -> Self {
        let end_cap_only = segment.end_corner_radius.is_some() && segment.corner_radius.is_none();
        let corner = if end_cap_only {
            0.0
        } else {
            segment.corner_radius.unwrap_or(global_corner_radius)
        };
        let end_cap = segment
            .end_corner_radius
            .filter(|&r| r > 0.0)
            .map(|r| radii.clamp_corner_radius(r))
            .filter(|&r| r > 0.0);
        Self {
            corner_radius: radii.clamp_corner_radius(corner),
            end_cap,
        }
    }

    /// Angle the arc end is pulled back by to make room for the cap.
    ///
    /// This is the angle the cap radius subtends at the mid-radius, so the cap's outer edge lands
    /// near the original end and the total visual length stays the same.
    pub fn end_cap_angle(&self, radii: SegmentRadii) -> f64 {
        match self.end_cap {
            Some(cap) if radii.mid() > 0.0 => cap / radii.mid(),
            _ => 0.0,
        }
    }

    /// End angle of the flat part of the arc, never before `start`.
    pub fn drawn_end(&self, start: f64, end: f64, radii: SegmentRadii) -> f64 {
        (end - self.end_cap_angle(radii)).max(start)
    }

    /// The cap disc for an arc ending at `end` (before shortening).
    pub fn end_cap_at(&self, center: Point, end: f64, radii: SegmentRadii) -> Option<EndCap> {
        let radius = self.end_cap?;
        let angle = end - self.end_cap_angle(radii);
        Some(EndCap {
            center: point_at(center, radii.mid(), angle),
            radius,
        })
    }
}

/// A filled disc rounding off the end of an arc.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EndCap {
    /// Disc center, on the arc's mid-radius.
    pub center: Point,
    /// Disc radius.
    pub radius: f64,
}

impl EndCap {
    /// The cap as a kurbo circle.
    pub fn circle(&self) -> Circle {
        Circle::new(self.center, self.radius)
    }
}
