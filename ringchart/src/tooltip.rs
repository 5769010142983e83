// Copyright 2025 the Ringchart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tooltip placement.
//!
//! Placement is a pure function of the selected arc's geometry and the tooltip box size. The box
//! is put on the side of the anchor facing away from the ring, with a small arrow on the box edge
//! closest to the anchor.
//!
//! Full-circle charts pick one of four sides from the arc's mid-angle (in degrees, clockwise from
//! 12 o'clock, normalized to `[0, 360)`), using half-open intervals:
//!
//! | Mid-angle         | Box            | Arrow points |
//! |-------------------|----------------|--------------|
//! | `[315, 45)`       | above anchor   | down         |
//! | `[45, 135)`       | right of anchor| left         |
//! | `[135, 225)`      | below anchor   | up           |
//! | `[225, 315)`      | left of anchor | right        |
//!
//! Half-circle gauges only split left and right.

use kurbo::{Point, Rect, Size};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::ring::{SegmentRadii, point_at};

/// Angles within this many degrees of a quadrant boundary are treated as on the boundary.
const BOUNDARY_EPSILON_DEG: f64 = 1e-9;

/// Which way the tooltip arrow points.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "camelCase")
)]
pub enum ArrowDirection {
    /// Box is below the anchor; arrow on its top edge.
    Up,
    /// Box is above the anchor; arrow on its bottom edge.
    Down,
    /// Box is right of the anchor; arrow on its left edge.
    Left,
    /// Box is left of the anchor; arrow on its right edge.
    Right,
}

/// Where to draw a tooltip.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TooltipPlacement {
    /// The point the arrow refers to.
    pub anchor: Point,
    /// Left edge of the box.
    pub left: f64,
    /// Top edge of the box.
    pub top: f64,
    /// Box size.
    pub size: Size,
    /// Arrow direction.
    pub arrow: ArrowDirection,
}

impl TooltipPlacement {
    /// The tooltip box.
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(Point::new(self.left, self.top), self.size)
    }

    /// The arrow as `[tip, base, base]`, centered on the box edge facing the anchor.
    ///
    /// The base is `2 * arrow_size` wide and the tip sits `arrow_size` outside the box.
    pub fn arrow_triangle(&self, arrow_size: f64) -> [Point; 3] {
        let r = self.rect();
        let cx = r.center().x;
        let cy = r.center().y;
        let a = arrow_size;
        match self.arrow {
            ArrowDirection::Down => [
                Point::new(cx, r.y1 + a),
                Point::new(cx - a, r.y1),
                Point::new(cx + a, r.y1),
            ],
            ArrowDirection::Up => [
                Point::new(cx, r.y0 - a),
                Point::new(cx - a, r.y0),
                Point::new(cx + a, r.y0),
            ],
            ArrowDirection::Left => [
                Point::new(r.x0 - a, cy),
                Point::new(r.x0, cy - a),
                Point::new(r.x0, cy + a),
            ],
            ArrowDirection::Right => [
                Point::new(r.x1 + a, cy),
                Point::new(r.x1, cy - a),
                Point::new(r.x1, cy + a),
            ],
        }
    }
}

/// Tooltip anchor: the arc's mid-radius point along its mid-angle.
pub fn mid_radius_anchor(center: Point, radii: SegmentRadii, mid_angle: f64) -> Point {
    point_at(center, radii.mid(), mid_angle)
}

/// Mid-angle in degrees, normalized to `[0, 360)` and snapped onto quadrant boundaries.
fn clock_degrees(mid_angle: f64) -> f64 {
    let deg = mid_angle.to_degrees().rem_euclid(360.0);
    for boundary in [0.0, 45.0, 135.0, 225.0, 315.0, 360.0] {
        if deg > boundary - BOUNDARY_EPSILON_DEG && deg < boundary + BOUNDARY_EPSILON_DEG {
            return if boundary >= 360.0 { 0.0 } else { boundary };
        }
    }
    deg
}

/// Arrow direction for a full-circle arc with the given mid-angle.
pub fn full_circle_direction(mid_angle: f64) -> ArrowDirection {
    let deg = clock_degrees(mid_angle);
    if deg >= 315.0 || deg < 45.0 {
        ArrowDirection::Down
    } else if deg < 135.0 {
        ArrowDirection::Left
    } else if deg < 225.0 {
        ArrowDirection::Up
    } else {
        ArrowDirection::Right
    }
}

/// Places a tooltip for a full-circle chart.
///
/// The box is centered on the anchor along the axis perpendicular to the placement side and kept
/// `margin` away from the anchor along it.
pub fn place_full_circle(
    mid_angle: f64,
    anchor: Point,
    size: Size,
    margin: f64,
) -> TooltipPlacement {
    let arrow = full_circle_direction(mid_angle);
    let (left, top) = match arrow {
        ArrowDirection::Down => (anchor.x - size.width / 2.0, anchor.y - size.height - margin),
        ArrowDirection::Left => (anchor.x + margin, anchor.y - size.height / 2.0),
        ArrowDirection::Up => (anchor.x - size.width / 2.0, anchor.y + margin),
        ArrowDirection::Right => (anchor.x - size.width - margin, anchor.y - size.height / 2.0),
    };
    TooltipPlacement {
        anchor,
        left,
        top,
        size,
        arrow,
    }
}

/// Places a tooltip for a half-circle gauge.
///
/// Segments left of 12 o'clock (`mid_angle < 0`) get their tooltip on the left, all others on the
/// right. The box is vertically centered on the anchor.
pub fn place_half_circle(
    mid_angle: f64,
    anchor: Point,
    size: Size,
    offset: f64,
) -> TooltipPlacement {
    let top = anchor.y - size.height / 2.0;
    let (left, arrow) = if mid_angle < 0.0 {
        (anchor.x - size.width - offset, ArrowDirection::Right)
    } else {
        (anchor.x + offset, ArrowDirection::Left)
    };
    TooltipPlacement {
        anchor,
        left,
        top,
        size,
        arrow,
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use core::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    use super::*;

    #[test]
    fn quadrant_boundaries_are_half_open() {
        assert_eq!(full_circle_direction(0.0), ArrowDirection::Down);
        assert_eq!(full_circle_direction(FRAC_PI_4), ArrowDirection::Left);
        assert_eq!(full_circle_direction(3.0 * FRAC_PI_4), ArrowDirection::Up);
        assert_eq!(full_circle_direction(5.0 * FRAC_PI_4), ArrowDirection::Right);
        assert_eq!(full_circle_direction(7.0 * FRAC_PI_4), ArrowDirection::Down);
        assert_eq!(
            full_circle_direction(FRAC_PI_4 - 1e-6),
            ArrowDirection::Down
        );
        assert_eq!(
            full_circle_direction(7.0 * FRAC_PI_4 - 1e-6),
            ArrowDirection::Right
        );
    }

    #[test]
    fn angles_outside_one_turn_are_normalized() {
        assert_eq!(full_circle_direction(-FRAC_PI_2), ArrowDirection::Right);
        assert_eq!(full_circle_direction(2.0 * PI + FRAC_PI_2), ArrowDirection::Left);
    }

    #[test]
    fn full_circle_box_positions() {
        let anchor = Point::new(100.0, 100.0);
        let size = Size::new(90.0, 50.0);

        let above = place_full_circle(0.0, anchor, size, 10.0);
        assert_eq!((above.left, above.top), (55.0, 40.0));

        let right = place_full_circle(FRAC_PI_2, anchor, size, 10.0);
        assert_eq!((right.left, right.top), (110.0, 75.0));

        let below = place_full_circle(PI, anchor, size, 10.0);
        assert_eq!((below.left, below.top), (55.0, 110.0));

        let left = place_full_circle(3.0 * FRAC_PI_2, anchor, size, 10.0);
        assert_eq!((left.left, left.top), (0.0, 75.0));
        assert_eq!(left.arrow, ArrowDirection::Right);
    }

    #[test]
    fn half_circle_splits_at_twelve_o_clock() {
        let anchor = Point::new(200.0, 150.0);
        let size = Size::new(110.0, 70.0);

        let left = place_half_circle(-0.3, anchor, size, 15.0);
        assert_eq!(left.arrow, ArrowDirection::Right);
        assert_eq!((left.left, left.top), (75.0, 115.0));

        let right = place_half_circle(0.0, anchor, size, 15.0);
        assert_eq!(right.arrow, ArrowDirection::Left);
        assert_eq!((right.left, right.top), (215.0, 115.0));
    }

    #[test]
    fn anchor_sits_on_mid_radius() {
        let anchor = mid_radius_anchor(Point::new(50.0, 50.0), SegmentRadii::new(20.0, 40.0), PI);
        assert!((anchor.x - 50.0).abs() < 1e-9);
        assert!((anchor.y - 80.0).abs() < 1e-9);
    }

    #[test]
    fn arrow_points_at_the_anchor_side() {
        let anchor = Point::new(100.0, 100.0);
        let size = Size::new(90.0, 50.0);

        let above = place_full_circle(0.0, anchor, size, 10.0);
        let [tip, b0, b1] = above.arrow_triangle(6.0);
        assert_eq!(tip, Point::new(100.0, 96.0));
        assert_eq!(b0, Point::new(94.0, 90.0));
        assert_eq!(b1, Point::new(106.0, 90.0));

        let right = place_half_circle(0.5, anchor, size, 15.0);
        let [tip, ..] = right.arrow_triangle(10.0);
        assert_eq!(tip, Point::new(105.0, 100.0));
    }
}
