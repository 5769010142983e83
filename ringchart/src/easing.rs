// Copyright 2025 the Ringchart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Easing curves.
//!
//! The pie chart and the gauge each have their own easing table. The same named easing produces a
//! different curve in each (`EaseIn` is cubic for the pie and quadratic for the gauge), so the
//! table is selected per chart rather than shared.

/// Named easing kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(rename_all = "camelCase")
)]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Slow start.
    EaseIn,
    /// Slow end.
    #[default]
    EaseOut,
    /// Slow start and end.
    EaseInOut,
}

/// Family of curves an [`Easing`] is evaluated with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EasingTable {
    /// Cubic curves (pie chart).
    Cubic,
    /// Quadratic curves (gauge).
    Quadratic,
}

impl EasingTable {
    /// Evaluates `easing` at `t`, clamped to `[0, 1]`.
    pub fn apply(self, easing: Easing, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match (self, easing) {
            (_, Easing::Linear) => t,
            (Self::Cubic, Easing::EaseIn) => t * t * t,
            (Self::Cubic, Easing::EaseOut) => {
                let u = 1.0 - t;
                1.0 - u * u * u
            }
            (Self::Cubic, Easing::EaseInOut) => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u * u / 2.0
                }
            }
            (Self::Quadratic, Easing::EaseIn) => t * t,
            (Self::Quadratic, Easing::EaseOut) => t * (2.0 - t),
            (Self::Quadratic, Easing::EaseInOut) => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
        }
    }
}

/// An easing kind bound to its table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EasingCurve {
    /// Curve family.
    pub table: EasingTable,
    /// Named easing within the family.
    pub easing: Easing,
}

impl EasingCurve {
    /// Creates a curve.
    pub const fn new(table: EasingTable, easing: Easing) -> Self {
        Self { table, easing }
    }

    /// Evaluates the curve at `t`.
    pub fn sample(&self, t: f64) -> f64 {
        self.table.apply(self.easing, t)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    const ALL: [Easing; 4] = [
        Easing::Linear,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
    ];

    #[test]
    fn every_curve_is_anchored_at_zero_and_one() {
        for table in [EasingTable::Cubic, EasingTable::Quadratic] {
            for easing in ALL {
                assert_eq!(table.apply(easing, 0.0), 0.0, "{table:?} {easing:?}");
                assert_eq!(table.apply(easing, 1.0), 1.0, "{table:?} {easing:?}");
            }
        }
    }

    #[test]
    fn same_name_differs_between_tables() {
        assert_eq!(EasingTable::Cubic.apply(Easing::EaseIn, 0.5), 0.125);
        assert_eq!(EasingTable::Quadratic.apply(Easing::EaseIn, 0.5), 0.25);
        assert_eq!(EasingTable::Cubic.apply(Easing::EaseOut, 0.5), 0.875);
        assert_eq!(EasingTable::Quadratic.apply(Easing::EaseOut, 0.5), 0.75);
        assert_eq!(EasingTable::Cubic.apply(Easing::EaseInOut, 0.25), 0.0625);
        assert_eq!(EasingTable::Quadratic.apply(Easing::EaseInOut, 0.25), 0.125);
        assert_eq!(EasingTable::Cubic.apply(Easing::EaseInOut, 0.75), 0.9375);
        assert_eq!(EasingTable::Quadratic.apply(Easing::EaseInOut, 0.75), 0.875);
    }

    #[test]
    fn curves_are_monotonic() {
        for table in [EasingTable::Cubic, EasingTable::Quadratic] {
            for easing in ALL {
                let mut prev = 0.0;
                for i in 1..=100 {
                    let v = table.apply(easing, f64::from(i) / 100.0);
                    assert!(v >= prev, "{table:?} {easing:?} at {i}");
                    prev = v;
                }
            }
        }
    }

    #[test]
    fn input_is_clamped() {
        let curve = EasingCurve::new(EasingTable::Cubic, Easing::EaseOut);
        assert_eq!(curve.sample(-1.0), 0.0);
        assert_eq!(curve.sample(2.0), 1.0);
    }
}
