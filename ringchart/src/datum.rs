// Copyright 2025 the Ringchart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input data for both chart kinds.

extern crate alloc;

use alloc::string::String;

use peniko::Color;

/// One weighted entry of a series (pie slices) or of a gauge (segments).
///
/// Order within a series is significant: it defines angular order, and the layout engine never
/// sorts. `color` is optional here so that [`validate_series`](crate::validate_series) can reject
/// entries that lack one.
///
/// `meta` is an opaque caller payload carried alongside the value.
#[derive(Clone, Debug, PartialEq)]
pub struct WeightedValue<M = ()> {
    /// Non-negative weight.
    pub value: f64,
    /// Fill color.
    pub color: Option<Color>,
    /// Main tooltip label.
    pub label: Option<String>,
    /// Secondary tooltip label (gauge).
    pub sublabel: Option<String>,
    /// Sublabel color, falling back to `color`.
    pub sublabel_color: Option<Color>,
    /// Ring thickness multiplier (gauge), `1.0` when unset.
    pub thickness_multiplier: Option<f64>,
    /// Uniform corner radius in pixels (gauge), overriding the chart-wide corner radius.
    pub corner_radius: Option<f64>,
    /// Radius of a round cap drawn only at the end of the arc (gauge).
    pub end_corner_radius: Option<f64>,
    /// Opaque caller payload.
    pub meta: M,
}

impl WeightedValue {
    /// Creates a colored entry.
    pub fn new(value: f64, color: impl Into<Color>) -> Self {
        Self {
            value,
            color: Some(color.into()),
            label: None,
            sublabel: None,
            sublabel_color: None,
            thickness_multiplier: None,
            corner_radius: None,
            end_corner_radius: None,
            meta: (),
        }
    }

    /// Creates an entry without a color.
    ///
    /// Such an entry fails validation; this exists for callers that fill the color in later.
    pub fn uncolored(value: f64) -> Self {
        Self {
            color: None,
            ..Self::new(value, Color::TRANSPARENT)
        }
    }
}

impl<M> WeightedValue<M> {
    /// Attaches a caller payload, replacing the current one.
    pub fn with_meta<N>(self, meta: N) -> WeightedValue<N> {
        WeightedValue {
            value: self.value,
            color: self.color,
            label: self.label,
            sublabel: self.sublabel,
            sublabel_color: self.sublabel_color,
            thickness_multiplier: self.thickness_multiplier,
            corner_radius: self.corner_radius,
            end_corner_radius: self.end_corner_radius,
            meta,
        }
    }

    /// Sets the tooltip label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the secondary tooltip label.
    pub fn with_sublabel(mut self, sublabel: impl Into<String>) -> Self {
        self.sublabel = Some(sublabel.into());
        self
    }

    /// Sets the sublabel color.
    pub fn with_sublabel_color(mut self, color: impl Into<Color>) -> Self {
        self.sublabel_color = Some(color.into());
        self
    }

    /// Sets the ring thickness multiplier.
    pub fn with_thickness_multiplier(mut self, multiplier: f64) -> Self {
        self.thickness_multiplier = Some(multiplier);
        self
    }

    /// Sets a uniform corner radius.
    pub fn with_corner_radius(mut self, radius: f64) -> Self {
        self.corner_radius = Some(radius);
        self
    }

    /// Sets an end-only cap radius.
    pub fn with_end_corner_radius(mut self, radius: f64) -> Self {
        self.end_corner_radius = Some(radius);
        self
    }

    /// Returns the thickness multiplier, defaulting to `1.0`.
    pub fn thickness_multiplier(&self) -> f64 {
        self.thickness_multiplier.unwrap_or(1.0)
    }

    /// Returns the sublabel color, falling back to the fill color.
    pub fn sublabel_color(&self) -> Option<Color> {
        self.sublabel_color.or(self.color)
    }

    /// Returns `true` when this entry carries something a default tooltip can show.
    pub fn has_tooltip_text(&self) -> bool {
        self.label.is_some() || self.sublabel.is_some()
    }
}
