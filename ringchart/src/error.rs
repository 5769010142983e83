// Copyright 2025 the Ringchart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Validation errors.
//!
//! Both error kinds signal a caller contract violation. They are returned synchronously from the
//! layout entry points and are never corrected silently.

extern crate alloc;

use alloc::string::String;

use thiserror::Error;

/// A series that cannot be laid out.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum InvalidValueError {
    /// A value is negative or not finite.
    #[error("invalid series: value {value} at index {index} must be a finite, non-negative number")]
    InvalidValue {
        /// Position of the offending entry in the series.
        index: usize,
        /// The rejected value.
        value: f64,
    },
    /// An entry has no color.
    #[error("invalid series: entry at index {index} has no color")]
    MissingColor {
        /// Position of the offending entry in the series.
        index: usize,
    },
    /// The values do not add up to a positive total (this includes the empty series).
    #[error("invalid series: sum of values is {sum}, expected a positive total")]
    NonPositiveTotal {
        /// The computed total.
        sum: f64,
    },
    /// The values are individually finite but their total overflows.
    #[error("invalid series: sum of values overflows to {sum}")]
    NonFiniteTotal {
        /// The computed total.
        sum: f64,
    },
}

/// Geometry parameters that cannot be laid out.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum InvalidGeometryError {
    /// A cover (hole) ratio outside the open interval `(0, 1)`.
    #[error("invalid cover radius {0}: expected a ratio strictly between 0 and 1")]
    CoverRadius(f64),
    /// A gauge ring thickness outside the open interval `(0, 1)`.
    #[error("invalid thickness {0}: expected a ratio strictly between 0 and 1")]
    Thickness(f64),
    /// A negative or non-finite pad angle.
    #[error("invalid pad angle {0}: expected a finite, non-negative angle in radians")]
    PadAngle(f64),
    /// A non-positive or non-finite chart size.
    #[error("invalid chart size {0}: expected a finite, positive length")]
    ChartSize(f64),
}

/// Any error returned by the layout entry points.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum LayoutError {
    /// The series was rejected.
    #[error(transparent)]
    Value(#[from] InvalidValueError),
    /// The geometry was rejected.
    #[error(transparent)]
    Geometry(#[from] InvalidGeometryError),
}

/// Chart options that cannot be resolved.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// A geometry option is out of range.
    #[error(transparent)]
    Geometry(#[from] InvalidGeometryError),
    /// A color string could not be parsed.
    #[error("invalid color {0:?}")]
    Color(String),
    /// A numeric option is outside its accepted range.
    #[error("invalid {option} {value}: expected {expected}")]
    OutOfRange {
        /// Option name as written in the options document.
        option: &'static str,
        /// The rejected value.
        value: f64,
        /// The accepted range.
        expected: &'static str,
    },
}
