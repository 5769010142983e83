// Copyright 2025 the Ringchart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input validation performed before layout.

use crate::datum::WeightedValue;
use crate::error::{InvalidGeometryError, InvalidValueError};

/// Checks that a series can be laid out.
///
/// Fails if any value is negative or not finite, if any entry lacks a color, or if the values do
/// not add up to a finite, positive total. Individual zero values are accepted.
pub fn validate_series<M>(values: &[WeightedValue<M>]) -> Result<(), InvalidValueError> {
    let mut sum = 0.0;
    for (index, v) in values.iter().enumerate() {
        if v.value < 0.0 || !v.value.is_finite() {
            return Err(InvalidValueError::InvalidValue {
                index,
                value: v.value,
            });
        }
        if v.color.is_none() {
            return Err(InvalidValueError::MissingColor { index });
        }
        sum += v.value;
    }
    if !sum.is_finite() {
        Err(InvalidValueError::NonFiniteTotal { sum })
    } else if sum > 0.0 {
        Ok(())
    } else {
        Err(InvalidValueError::NonPositiveTotal { sum })
    }
}

/// Checks a cover (hole) ratio.
///
/// `None` means no hole was requested and is always valid. Both `0` and `1` are rejected.
pub fn validate_cover_radius(ratio: Option<f64>) -> Result<(), InvalidGeometryError> {
    match ratio {
        Some(r) if !(r > 0.0 && r < 1.0) => Err(InvalidGeometryError::CoverRadius(r)),
        _ => Ok(()),
    }
}

/// Checks a gauge ring thickness ratio.
pub fn validate_thickness(thickness: f64) -> Result<(), InvalidGeometryError> {
    if thickness > 0.0 && thickness < 1.0 {
        Ok(())
    } else {
        Err(InvalidGeometryError::Thickness(thickness))
    }
}

/// Checks a pad angle.
pub fn validate_pad_angle(pad_angle: f64) -> Result<(), InvalidGeometryError> {
    if pad_angle >= 0.0 && pad_angle.is_finite() {
        Ok(())
    } else {
        Err(InvalidGeometryError::PadAngle(pad_angle))
    }
}

/// Checks a chart size (pie side length or gauge width/height).
pub fn validate_chart_size(size: f64) -> Result<(), InvalidGeometryError> {
    if size > 0.0 && size.is_finite() {
        Ok(())
    } else {
        Err(InvalidGeometryError::ChartSize(size))
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::vec;

    use peniko::color::palette::css;

    use super::*;

    #[test]
    fn negative_value_is_rejected() {
        let err = validate_series(&[WeightedValue::new(-1.0, css::RED)]).unwrap_err();
        assert_eq!(
            err,
            InvalidValueError::InvalidValue {
                index: 0,
                value: -1.0
            }
        );
    }

    #[test]
    fn zero_total_is_rejected() {
        let err = validate_series(&[WeightedValue::new(0.0, css::RED)]).unwrap_err();
        assert_eq!(err, InvalidValueError::NonPositiveTotal { sum: 0.0 });

        let empty: [WeightedValue; 0] = [];
        assert!(matches!(
            validate_series(&empty),
            Err(InvalidValueError::NonPositiveTotal { .. })
        ));
    }

    #[test]
    fn overflowing_total_is_rejected() {
        let series = [
            WeightedValue::new(1e308, css::RED),
            WeightedValue::new(1e308, css::BLUE),
        ];
        assert_eq!(
            validate_series(&series),
            Err(InvalidValueError::NonFiniteTotal { sum: f64::INFINITY })
        );
    }

    #[test]
    fn missing_color_is_rejected() {
        let series = vec![
            WeightedValue::new(1.0, css::RED),
            WeightedValue::uncolored(2.0),
        ];
        assert_eq!(
            validate_series(&series),
            Err(InvalidValueError::MissingColor { index: 1 })
        );
    }

    #[test]
    fn nan_value_is_rejected() {
        assert!(matches!(
            validate_series(&[WeightedValue::new(f64::NAN, css::RED)]),
            Err(InvalidValueError::InvalidValue { index: 0, .. })
        ));
    }

    #[test]
    fn valid_series_with_zero_entry_passes() {
        let series = [
            WeightedValue::new(5.0, css::RED),
            WeightedValue::new(0.0, css::GREEN),
            WeightedValue::new(5.0, css::BLUE),
        ];
        assert_eq!(validate_series(&series), Ok(()));
    }

    #[test]
    fn cover_radius_bounds_are_exclusive() {
        assert_eq!(
            validate_cover_radius(Some(0.0)),
            Err(InvalidGeometryError::CoverRadius(0.0))
        );
        assert_eq!(
            validate_cover_radius(Some(1.0)),
            Err(InvalidGeometryError::CoverRadius(1.0))
        );
        assert!(validate_cover_radius(Some(f64::NAN)).is_err());
        assert_eq!(validate_cover_radius(Some(0.5)), Ok(()));
        assert_eq!(validate_cover_radius(None), Ok(()));
    }

    #[test]
    fn pad_angle_and_thickness_checks() {
        assert!(validate_pad_angle(0.0).is_ok());
        assert!(validate_pad_angle(-0.1).is_err());
        assert!(validate_pad_angle(f64::INFINITY).is_err());
        assert!(validate_thickness(0.18).is_ok());
        assert!(validate_thickness(1.0).is_err());
        assert!(validate_chart_size(0.0).is_err());
    }
}
