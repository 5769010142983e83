// Copyright 2025 the Ringchart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart options and their resolution.
//!
//! Options are loosely typed: every field is optional, and with the `serde` feature they
//! deserialize from camelCase documents such as
//!
//! ```json
//! { "cover": 0.6, "padAngle": 0.02, "animation": { "sequential": true } }
//! ```
//!
//! [`PieChartOptions::resolve`] and [`GaugeOptions::resolve`] apply every default in one place
//! and validate the geometry, producing configs with no optional fields left.

extern crate alloc;

use alloc::string::String;

use kurbo::{Point, Size};
use peniko::Color;
use peniko::color::{Srgb, parse_color};

use crate::animation::{AnimationConfig, SELECTION_ANIMATION_DURATION, SelectionAnimationConfig};
use crate::easing::{Easing, EasingCurve, EasingTable};
use crate::error::ConfigError;
use crate::validate::{
    validate_chart_size, validate_cover_radius, validate_pad_angle, validate_thickness,
};

/// Pie chart side length used when none is given.
pub const DEFAULT_PIE_SIZE: f64 = 250.0;

/// Gauge width used when none is given.
pub const DEFAULT_GAUGE_WIDTH: f64 = 300.0;

/// Donut hole, given as a bare ratio or with a fill color.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(untagged)
)]
pub enum CoverOption {
    /// Hole radius as a fraction of the outer radius.
    Ratio(f64),
    /// Hole radius plus fill color.
    Cover(CoverOptions),
}

impl CoverOption {
    /// The hole ratio.
    pub fn ratio(&self) -> f64 {
        match self {
            Self::Ratio(r) => *r,
            Self::Cover(c) => c.radius,
        }
    }

    fn color(&self) -> Option<&str> {
        match self {
            Self::Ratio(_) => None,
            Self::Cover(c) => c.color.as_deref(),
        }
    }
}

/// Donut hole with an optional fill.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(rename_all = "camelCase")
)]
pub struct CoverOptions {
    /// Hole radius as a fraction of the outer radius.
    pub radius: f64,
    /// CSS color string for the hole.
    #[cfg_attr(feature = "serde", serde(default))]
    pub color: Option<String>,
}

/// Pie entrance and selection animation options.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(default, rename_all = "camelCase")
)]
pub struct AnimationOptions {
    /// Run the entrance animation. Default `true`.
    pub enabled: Option<bool>,
    /// Duration in milliseconds. Default 800.
    pub duration: Option<f64>,
    /// Easing. Default ease-out.
    pub easing: Option<Easing>,
    /// Delay before the first slice starts. Default 0.
    pub delay: Option<f64>,
    /// Stagger slices in input order. Default `false`.
    pub sequential: Option<bool>,
    /// Stagger step in milliseconds. Default 100.
    pub sequential_delay: Option<f64>,
    /// Scale of the selected slice. Default 1.05.
    pub selection_scale: Option<f64>,
    /// Opacity of unselected slices while one is selected. Default 0.5.
    pub unselected_opacity: Option<f64>,
    /// Ease opacity changes. Default `true`.
    pub animate_opacity: Option<bool>,
    /// Expand the selected slice. Default `true`.
    pub enable_selection_scale: Option<bool>,
}

/// Animation given as a bare switch or as full options.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(untagged)
)]
pub enum AnimationOption {
    /// `true` uses the defaults, `false` disables the entrance animation.
    Toggle(bool),
    /// Explicit options.
    Config(AnimationOptions),
}

impl AnimationOption {
    fn options(&self) -> AnimationOptions {
        match self {
            Self::Toggle(enabled) => AnimationOptions {
                enabled: Some(*enabled),
                ..AnimationOptions::default()
            },
            Self::Config(options) => options.clone(),
        }
    }
}

/// Pie tooltip box options.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(default, rename_all = "camelCase")
)]
pub struct TooltipOptions {
    /// Box width. Default 90.
    pub width: Option<f64>,
    /// Box height. Default 50.
    pub height: Option<f64>,
    /// Gap between anchor and box. Default 10.
    pub margin: Option<f64>,
    /// Arrow size. Default 6.
    pub arrow_size: Option<f64>,
}

/// Pie chart options.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(default, rename_all = "camelCase")
)]
pub struct PieChartOptions {
    /// Side length of the square chart area.
    #[cfg_attr(feature = "serde", serde(alias = "widthAndHeight"))]
    pub size: Option<f64>,
    /// Donut hole. Unset means a filled pie.
    pub cover: Option<CoverOption>,
    /// Gap between slices in radians. Default 0.
    pub pad_angle: Option<f64>,
    /// Outer radius as a fraction of half the size. Default 0.40.
    pub radius_scale: Option<f64>,
    /// Toggle selection and show a tooltip on press. Default `true`.
    pub show_tooltip: Option<bool>,
    /// Show a tooltip on every slice at once; ignored when `show_tooltip` is off. Default `false`.
    pub always_show_tooltips: Option<bool>,
    /// Auto-hide delay in milliseconds, 0 to disable. Default 3000.
    pub tooltip_delay: Option<f64>,
    /// Tooltip box.
    pub tooltip: Option<TooltipOptions>,
    /// Draw a ring along the outer edge. Default `true`.
    pub show_outer_border: Option<bool>,
    /// Width of that ring. Default 5.
    pub outer_border_width: Option<f64>,
    /// Entrance and selection animation.
    pub animation: Option<AnimationOption>,
}

/// Resolved tooltip box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TooltipBox {
    /// Box size.
    pub size: Size,
    /// Gap between the anchor and the box.
    pub margin: f64,
    /// Arrow size.
    pub arrow_size: f64,
}

/// Resolved pie chart configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PieChartConfig {
    /// Side length of the chart area.
    pub size: f64,
    /// Nominal outer radius (before selection scaling).
    pub radius: f64,
    /// Chart center.
    pub center: Point,
    /// Hole ratio, `None` for a filled pie.
    pub cover_ratio: Option<f64>,
    /// Hole fill.
    pub cover_color: Option<Color>,
    /// Gap between slices in radians.
    pub pad_angle: f64,
    /// Toggle selection and show a tooltip on press.
    pub show_tooltip: bool,
    /// Show a tooltip on every slice, if tooltips are shown at all.
    pub always_show_tooltips: bool,
    /// Auto-hide delay in milliseconds.
    pub tooltip_delay: f64,
    /// Tooltip box.
    pub tooltip: TooltipBox,
    /// Outer border width, `None` when hidden.
    pub outer_border: Option<f64>,
    /// Entrance animation.
    pub animation: AnimationConfig,
    /// Selection scale and opacity animation.
    pub selection: SelectionAnimationConfig,
}

impl PieChartOptions {
    /// Applies defaults and validates.
    pub fn resolve(&self) -> Result<PieChartConfig, ConfigError> {
        let size = self.size.unwrap_or(DEFAULT_PIE_SIZE);
        validate_chart_size(size)?;
        let cover_ratio = self.cover.as_ref().map(CoverOption::ratio);
        validate_cover_radius(cover_ratio)?;
        let pad_angle = self.pad_angle.unwrap_or(0.0);
        validate_pad_angle(pad_angle)?;
        let cover_color = self
            .cover
            .as_ref()
            .and_then(CoverOption::color)
            .map(parse_css_color)
            .transpose()?;

        let radius_scale = positive("radiusScale", self.radius_scale.unwrap_or(0.40))?;
        let tooltip = self.tooltip.clone().unwrap_or_default();
        let anim = self
            .animation
            .as_ref()
            .map(AnimationOption::options)
            .unwrap_or_default();

        let defaults = AnimationConfig::PIE;
        let animation = AnimationConfig {
            enabled: anim.enabled.unwrap_or(defaults.enabled),
            duration: non_negative("duration", anim.duration.unwrap_or(defaults.duration))?,
            delay: non_negative("delay", anim.delay.unwrap_or(defaults.delay))?,
            curve: EasingCurve::new(EasingTable::Cubic, anim.easing.unwrap_or_default()),
            sequential: anim.sequential.unwrap_or(defaults.sequential),
            sequential_delay: non_negative(
                "sequentialDelay",
                anim.sequential_delay.unwrap_or(defaults.sequential_delay),
            )?,
        };

        let selection_defaults = SelectionAnimationConfig::default();
        let selection_scale = anim
            .selection_scale
            .unwrap_or(selection_defaults.selection_scale);
        if !(selection_scale >= 1.0 && selection_scale.is_finite()) {
            return Err(ConfigError::OutOfRange {
                option: "selectionScale",
                value: selection_scale,
                expected: "a finite scale of at least 1",
            });
        }
        let unselected_opacity = anim
            .unselected_opacity
            .unwrap_or(selection_defaults.unselected_opacity);
        if !(0.0..=1.0).contains(&unselected_opacity) {
            return Err(ConfigError::OutOfRange {
                option: "unselectedOpacity",
                value: unselected_opacity,
                expected: "an opacity between 0 and 1",
            });
        }
        let selection = SelectionAnimationConfig {
            duration: SELECTION_ANIMATION_DURATION,
            selection_scale: if anim.enable_selection_scale.unwrap_or(true) {
                selection_scale
            } else {
                1.0
            },
            unselected_opacity,
            animate_scale: animation.enabled,
            animate_opacity: animation.enabled && anim.animate_opacity.unwrap_or(true),
        };

        Ok(PieChartConfig {
            size,
            radius: size / 2.0 * radius_scale,
            center: Point::new(size / 2.0, size / 2.0),
            cover_ratio,
            cover_color,
            pad_angle,
            show_tooltip: self.show_tooltip.unwrap_or(true),
            always_show_tooltips: self.always_show_tooltips.unwrap_or(false),
            tooltip_delay: non_negative("tooltipDelay", self.tooltip_delay.unwrap_or(3000.0))?,
            tooltip: TooltipBox::resolve(
                tooltip.width.unwrap_or(90.0),
                tooltip.height.unwrap_or(50.0),
                tooltip.margin.unwrap_or(10.0),
                tooltip.arrow_size.unwrap_or(6.0),
            )?,
            outer_border: if self.show_outer_border.unwrap_or(true) {
                Some(non_negative(
                    "outerBorderWidth",
                    self.outer_border_width.unwrap_or(5.0),
                )?)
            } else {
                None
            },
            animation,
            selection,
        })
    }
}

/// Gauge tooltip options.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(default, rename_all = "camelCase")
)]
pub struct GaugeTooltipOptions {
    /// Toggle-driven tooltips. Default `true`.
    pub show: Option<bool>,
    /// Box width. Default 110.
    pub width: Option<f64>,
    /// Box height. Default 70.
    pub height: Option<f64>,
    /// Auto-hide delay in milliseconds, 0 to disable. Default 3000.
    pub auto_hide_delay: Option<f64>,
    /// Gap between the anchor and the box. Default 15.
    pub offset: Option<f64>,
    /// Arrow size. Default 10.
    pub arrow_size: Option<f64>,
}

/// Gauge entrance animation options.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(default, rename_all = "camelCase")
)]
pub struct GaugeAnimationOptions {
    /// Run the entrance animation. Default `true`.
    pub enabled: Option<bool>,
    /// Duration in milliseconds. Default 1000.
    pub duration: Option<f64>,
    /// Delay before start. Default 0.
    pub delay: Option<f64>,
    /// Easing. Default ease-out.
    pub easing: Option<Easing>,
}

/// Gauge options.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(default, rename_all = "camelCase")
)]
pub struct GaugeOptions {
    /// Chart width.
    pub width: Option<f64>,
    /// Chart height. Default `width * 0.55`.
    pub height: Option<f64>,
    /// Ring thickness as a fraction of the radius. Default 0.18.
    pub thickness: Option<f64>,
    /// Gap between segments in radians. Default 0.04.
    pub pad_angle: Option<f64>,
    /// Corner radius for all segments. Default 0.
    pub corner_radius: Option<f64>,
    /// Vertical offset of the center content. Default `inner_radius * 0.35`.
    pub center_offset: Option<f64>,
    /// Tooltips.
    pub tooltip: Option<GaugeTooltipOptions>,
    /// Entrance animation.
    pub animation: Option<GaugeAnimationOptions>,
}

/// Gauge size and ring placement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GaugeDimensions {
    /// Chart width.
    pub width: f64,
    /// Chart height.
    pub height: f64,
    /// Nominal outer radius.
    pub radius: f64,
    /// Nominal inner radius.
    pub inner_radius: f64,
    /// Ring center, below the middle so the half ring fits.
    pub center: Point,
}

impl GaugeDimensions {
    /// Derives the dimensions from the chart width and ring thickness.
    pub fn new(width: f64, height: Option<f64>, thickness: f64) -> Self {
        let radius = width * 0.38;
        let height = height.unwrap_or(width * 0.55);
        Self {
            width,
            height,
            radius,
            inner_radius: radius * (1.0 - thickness),
            center: Point::new(width / 2.0, height * 0.78),
        }
    }
}

/// Resolved gauge configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GaugeConfig {
    /// Size and ring placement.
    pub dimensions: GaugeDimensions,
    /// Ring thickness ratio.
    pub thickness: f64,
    /// Gap between segments in radians.
    pub pad_angle: f64,
    /// Corner radius for all segments.
    pub corner_radius: f64,
    /// Vertical offset of the center content.
    pub center_offset: f64,
    /// Toggle-driven tooltips.
    pub show_tooltip: bool,
    /// Tooltip box; `margin` is the offset from the anchor.
    pub tooltip: TooltipBox,
    /// Auto-hide delay in milliseconds.
    pub auto_hide_delay: f64,
    /// Entrance animation.
    pub animation: AnimationConfig,
}

impl GaugeOptions {
    /// Applies defaults and validates.
    pub fn resolve(&self) -> Result<GaugeConfig, ConfigError> {
        let width = self.width.unwrap_or(DEFAULT_GAUGE_WIDTH);
        validate_chart_size(width)?;
        if let Some(height) = self.height {
            validate_chart_size(height)?;
        }
        let thickness = self.thickness.unwrap_or(0.18);
        validate_thickness(thickness)?;
        let pad_angle = self.pad_angle.unwrap_or(0.04);
        validate_pad_angle(pad_angle)?;

        let dimensions = GaugeDimensions::new(width, self.height, thickness);
        let tooltip = self.tooltip.clone().unwrap_or_default();
        let anim = self.animation.clone().unwrap_or_default();
        let defaults = AnimationConfig::GAUGE;

        let center_offset = self
            .center_offset
            .unwrap_or(dimensions.inner_radius * 0.35);
        if !center_offset.is_finite() {
            return Err(ConfigError::OutOfRange {
                option: "centerOffset",
                value: center_offset,
                expected: "a finite offset",
            });
        }

        Ok(GaugeConfig {
            dimensions,
            thickness,
            pad_angle,
            corner_radius: non_negative("cornerRadius", self.corner_radius.unwrap_or(0.0))?,
            center_offset,
            show_tooltip: tooltip.show.unwrap_or(true),
            tooltip: TooltipBox::resolve(
                tooltip.width.unwrap_or(110.0),
                tooltip.height.unwrap_or(70.0),
                tooltip.offset.unwrap_or(15.0),
                tooltip.arrow_size.unwrap_or(10.0),
            )?,
            auto_hide_delay: non_negative(
                "autoHideDelay",
                tooltip.auto_hide_delay.unwrap_or(3000.0),
            )?,
            animation: AnimationConfig {
                enabled: anim.enabled.unwrap_or(defaults.enabled),
                duration: non_negative("duration", anim.duration.unwrap_or(defaults.duration))?,
                delay: non_negative("delay", anim.delay.unwrap_or(defaults.delay))?,
                curve: EasingCurve::new(EasingTable::Quadratic, anim.easing.unwrap_or_default()),
                ..defaults
            },
        })
    }
}

impl TooltipBox {
    fn resolve(width: f64, height: f64, margin: f64, arrow_size: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            size: Size::new(non_negative("width", width)?, non_negative("height", height)?),
            margin: non_negative("margin", margin)?,
            arrow_size: non_negative("arrowSize", arrow_size)?,
        })
    }
}

/// Durations, delays and lengths.
fn non_negative(option: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value >= 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::OutOfRange {
            option,
            value,
            expected: "a finite, non-negative number",
        })
    }
}

fn positive(option: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::OutOfRange {
            option,
            value,
            expected: "a finite, positive number",
        })
    }
}

fn parse_css_color(s: &str) -> Result<Color, ConfigError> {
    parse_color(s)
        .map(|c| c.to_alpha_color::<Srgb>())
        .map_err(|_| ConfigError::Color(s.into()))
}
