// Copyright 2025 the Ringchart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sector (arc) outline generation.
//!
//! A sector is an annulus slice, or a pie wedge when the inner radius is zero. Drawing stays with
//! the caller; this only turns a resolved arc into a `BezPath`.
//!
//! With a corner radius, each corner is replaced by a fillet tangent to both the radial edge and
//! the arc it meets. A wedge only rounds its two outer corners.

use core::f64::consts::{FRAC_PI_2, PI, TAU};

use kurbo::{Arc, BezPath, Circle, Point, Rect, Shape, Vec2};
use peniko::Color;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// A drawable sector.
///
/// Angles are in radians, clockwise from 12 o'clock, matching [`ArcSpan`](crate::ArcSpan).
#[derive(Clone, Debug, PartialEq)]
pub struct SectorSpec {
    /// Center in chart coordinates.
    pub center: Point,
    /// Inner radius (0 for a pie wedge).
    pub inner_radius: f64,
    /// Outer radius.
    pub outer_radius: f64,
    /// Start angle in radians.
    pub start_angle: f64,
    /// End angle in radians.
    pub end_angle: f64,
    /// Fill color.
    pub fill: Color,
    /// Opacity multiplier in `[0, 1]`.
    pub opacity: f64,
    /// Corner radius; clamped to what the sector can fit when the outline is built.
    pub corner_radius: f64,
    /// Curve flattening tolerance when converting the sector to a `BezPath`.
    pub tolerance: f64,
}

impl SectorSpec {
    /// Creates a new sector spec.
    pub fn new(
        center: Point,
        inner_radius: f64,
        outer_radius: f64,
        start_angle: f64,
        end_angle: f64,
    ) -> Self {
        Self {
            center,
            inner_radius,
            outer_radius,
            start_angle,
            end_angle,
            fill: Color::BLACK,
            opacity: 1.0,
            corner_radius: 0.0,
            tolerance: 0.1,
        }
    }

    /// Sets the fill color.
    pub fn with_fill(mut self, fill: impl Into<Color>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the opacity multiplier.
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    /// Sets the corner radius.
    pub fn with_corner_radius(mut self, corner_radius: f64) -> Self {
        self.corner_radius = corner_radius;
        self
    }

    /// Sets the curve flattening tolerance used for `BezPath` conversion.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Angular width.
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Outline of the sector, or `None` for a zero-width sector.
    pub fn path(&self) -> Option<BezPath> {
        let sweep = self.sweep();
        if !(sweep > 0.0 && self.outer_radius > 0.0) {
            return None;
        }
        let corner = self.clamped_corner_radius(sweep);
        if corner > 0.0 && sweep < TAU {
            return Some(self.rounded_path(sweep, corner));
        }
        let circle = Circle::new(self.center, self.outer_radius);
        // kurbo measures angles from +x towards +y, which puts 12 o'clock at -pi/2.
        let segment = circle.segment(
            self.inner_radius.max(0.0),
            self.start_angle - FRAC_PI_2,
            sweep,
        );
        Some(segment.path_elements(self.tolerance).collect())
    }

    /// Bounding box of the outline.
    pub fn bounds(&self) -> Option<Rect> {
        self.path().map(|p| p.bounding_box())
    }

    /// The corner radius actually used for a sector of angular width `sweep`.
    ///
    /// It never exceeds half the ring thickness, and narrow sectors shrink it further so the
    /// fillets at both ends of an edge do not overlap.
    pub fn clamped_corner_radius(&self, sweep: f64) -> f64 {
        let inner = self.inner_radius.max(0.0);
        let mut corner = self.corner_radius.min(0.5 * (self.outer_radius - inner));
        if sweep < PI {
            let s = (0.5 * sweep).sin();
            corner = corner.min(self.outer_radius * s / (1.0 + s));
            if inner > 0.0 {
                corner = corner.min(inner * s / (1.0 - s));
            }
        }
        if corner > 0.0 { corner } else { 0.0 }
    }

    fn rounded_path(&self, sweep: f64, corner: f64) -> BezPath {
        let c = self.center;
        let outer = self.outer_radius;
        let inner = self.inner_radius.max(0.0);
        // kurbo angles: 12 o'clock is -pi/2, positive sweep is clockwise on screen.
        let t0 = self.start_angle - FRAC_PI_2;
        let t1 = t0 + sweep;

        // Outer fillet centers sit at `outer - corner` from the center, `d_out` inside each edge.
        let d_out = (corner / (outer - corner)).asin();
        let along_out = (outer - corner) * d_out.cos();

        let mut path = BezPath::new();
        if inner > 0.0 {
            path.move_to(c + along_out * Vec2::from_angle(t0));
        } else {
            path.move_to(c);
            path.line_to(c + along_out * Vec2::from_angle(t0));
        }
        self.append_arc(
            &mut path,
            c + (outer - corner) * Vec2::from_angle(t0 + d_out),
            corner,
            t0 - FRAC_PI_2,
            FRAC_PI_2 + d_out,
        );
        self.append_arc(&mut path, c, outer, t0 + d_out, sweep - 2.0 * d_out);
        self.append_arc(
            &mut path,
            c + (outer - corner) * Vec2::from_angle(t1 - d_out),
            corner,
            t1 - d_out,
            FRAC_PI_2 + d_out,
        );

        if inner > 0.0 {
            // Inner fillets touch the inner circle from outside.
            let d_in = (corner / (inner + corner)).asin();
            let along_in = (inner + corner) * d_in.cos();
            path.line_to(c + along_in * Vec2::from_angle(t1));
            self.append_arc(
                &mut path,
                c + (inner + corner) * Vec2::from_angle(t1 - d_in),
                corner,
                t1 + FRAC_PI_2,
                FRAC_PI_2 - d_in,
            );
            self.append_arc(&mut path, c, inner, t1 - d_in, -(sweep - 2.0 * d_in));
            self.append_arc(
                &mut path,
                c + (inner + corner) * Vec2::from_angle(t0 + d_in),
                corner,
                t0 + d_in + PI,
                FRAC_PI_2 - d_in,
            );
        }
        path.close_path();
        path
    }

    fn append_arc(&self, path: &mut BezPath, center: Point, radius: f64, start: f64, sweep: f64) {
        let arc = Arc::new(center, (radius, radius), start, sweep, 0.0);
        path.extend(arc.append_iter(self.tolerance));
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use core::f64::consts::{PI, TAU};

    use peniko::color::palette::css;

    use super::*;

    #[test]
    fn quarter_sector_lies_in_upper_right_quadrant() {
        let sector = SectorSpec::new(Point::new(50.0, 50.0), 10.0, 20.0, 0.0, PI / 2.0)
            .with_fill(css::TOMATO)
            .with_opacity(0.5);
        let bounds = sector.bounds().unwrap();
        assert!(bounds.x0 >= 50.0 - 1e-6, "{bounds:?}");
        assert!(bounds.y1 <= 50.0 + 1e-6, "{bounds:?}");
        assert!((bounds.x1 - 70.0).abs() < 0.5, "{bounds:?}");
        assert!((bounds.y0 - 30.0).abs() < 0.5, "{bounds:?}");
        assert_eq!(sector.fill, css::TOMATO);
    }

    #[test]
    fn full_pie_wedge_covers_the_disc() {
        let sector = SectorSpec::new(Point::ORIGIN, 0.0, 10.0, 0.0, TAU);
        let bounds = sector.bounds().unwrap();
        assert!((bounds.width() - 20.0).abs() < 0.5, "{bounds:?}");
        assert!((bounds.height() - 20.0).abs() < 0.5, "{bounds:?}");
    }

    #[test]
    fn corner_radius_rounds_the_outline() {
        let square = SectorSpec::new(Point::new(50.0, 50.0), 10.0, 20.0, 0.0, PI / 2.0);
        let rounded = square.clone().with_corner_radius(3.0);

        let square_bounds = square.bounds().unwrap();
        let rounded_bounds = rounded.bounds().unwrap();
        // The 3 o'clock outer corner is cut off, so the outline no longer reaches x = 70.
        assert!(
            rounded_bounds.x1 < square_bounds.x1 - 0.1,
            "{rounded_bounds:?} vs {square_bounds:?}"
        );
        // Fillets stay inside the sector.
        assert!(rounded_bounds.x0 >= 50.0 - 1e-3, "{rounded_bounds:?}");
        assert!(rounded_bounds.y1 <= 50.0 + 1e-3, "{rounded_bounds:?}");
        assert!(
            rounded.path().unwrap().elements().len() > square.path().unwrap().elements().len(),
            "fillets add curve segments"
        );
    }

    #[test]
    fn oversized_corner_radius_is_clamped() {
        let sector =
            SectorSpec::new(Point::ORIGIN, 40.0, 50.0, 0.0, 0.2).with_corner_radius(100.0);
        let corner = sector.clamped_corner_radius(sector.sweep());
        assert!(corner > 0.0 && corner <= 5.0, "{corner}");
        let bounds = sector.bounds().unwrap();
        assert!(bounds.is_finite(), "{bounds:?}");

        let wedge = SectorSpec::new(Point::ORIGIN, 0.0, 10.0, 0.0, PI).with_corner_radius(2.0);
        assert_eq!(wedge.clamped_corner_radius(wedge.sweep()), 2.0);
        assert!(wedge.path().is_some());
    }

    #[test]
    fn zero_width_sector_has_no_path() {
        let sector = SectorSpec::new(Point::ORIGIN, 5.0, 10.0, 1.0, 1.0);
        assert!(sector.path().is_none());
        assert!(sector.bounds().is_none());
    }
}
