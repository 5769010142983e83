// Copyright 2025 the Ringchart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

extern crate std;

use alloc::rc::Rc;
use alloc::vec;
use alloc::vec::Vec;
use core::cell::Cell;
use core::f64::consts::{FRAC_PI_2, PI};

use kurbo::{Point, Shape};
use peniko::color::palette::css;

use crate::{
    AnimationOption, AnimationOptions, ArcRole, ArrowDirection, Gauge, GaugeOptions,
    PieChart, PieChartOptions, SimulatedScheduler, WeightedValue, point_at,
};

const EPS: f64 = 1e-9;

fn pump_pie<M>(chart: &mut PieChart<M>, s: &mut SimulatedScheduler, now: f64) {
    for wakeup in s.advance_to(now) {
        chart.on_wakeup(wakeup, s);
    }
}

fn pump_gauge<M>(gauge: &mut Gauge<M>, s: &mut SimulatedScheduler, now: f64) {
    for wakeup in s.advance_to(now) {
        gauge.on_wakeup(wakeup, s);
    }
}

fn slices(values: &[f64]) -> Vec<WeightedValue> {
    const FILLS: [peniko::Color; 4] = [css::TOMATO, css::GOLD, css::SEA_GREEN, css::STEEL_BLUE];
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| WeightedValue::new(v, FILLS[i % FILLS.len()]))
        .collect()
}

fn assert_point_close(a: Point, b: Point) {
    assert!((a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS, "{a:?} != {b:?}");
}

#[test]
fn sequential_entrance_staggers_slices() {
    let mut s = SimulatedScheduler::new();
    let config = PieChartOptions {
        animation: Some(AnimationOption::Config(AnimationOptions {
            sequential: Some(true),
            sequential_delay: Some(100.0),
            duration: Some(800.0),
            ..AnimationOptions::default()
        })),
        ..PieChartOptions::default()
    }
    .resolve()
    .unwrap();
    let mut chart = PieChart::new(config, slices(&[1.0, 1.0, 1.0]), 0.0, &mut s).unwrap();

    pump_pie(&mut chart, &mut s, 150.0);
    assert_eq!(chart.progress()[2], 0.0);
    let visible: Vec<usize> = chart.render_data().slices.iter().map(|r| r.index).collect();
    assert_eq!(visible, [0, 1]);

    pump_pie(&mut chart, &mut s, 250.0);
    assert!(chart.progress()[2] > 0.0);
    assert_eq!(chart.render_data().slices.len(), 3);

    pump_pie(&mut chart, &mut s, 1000.0);
    assert_eq!(chart.progress(), [1.0, 1.0, 1.0]);
    assert!(!chart.is_animating());
}

#[test]
fn disabled_animation_renders_full_slices_without_frames() {
    let mut s = SimulatedScheduler::new();
    let config = PieChartOptions {
        animation: Some(AnimationOption::Toggle(false)),
        ..PieChartOptions::default()
    }
    .resolve()
    .unwrap();
    let fired = Rc::new(Cell::new(false));
    let flag = fired.clone();
    let mut chart = PieChart::new(config, slices(&[2.0, 1.0]), 0.0, &mut s).unwrap();
    chart.set_on_animation_complete(move || flag.set(true));

    assert_eq!(chart.progress(), [1.0, 1.0]);
    assert_eq!(s.pending_frames(), 0);
    let render = chart.render_data();
    assert!((render.slices[1].end_angle - 2.0 * PI).abs() < EPS);
    assert!(!fired.get());

    chart.press(0, 10.0, &mut s);
    assert_eq!(s.pending_frames(), 0);
    assert_eq!(chart.scales(), [1.05, 1.0]);
    assert_eq!(chart.opacities(), [1.0, 0.5]);
}

#[test]
fn completion_callback_fires_once_per_run() {
    let mut s = SimulatedScheduler::new();
    let config = PieChartOptions::default().resolve().unwrap();
    let count = Rc::new(Cell::new(0));
    let counter = count.clone();
    let mut chart = PieChart::new(config, slices(&[1.0, 3.0]), 0.0, &mut s).unwrap();
    chart.set_on_animation_complete(move || counter.set(counter.get() + 1));

    pump_pie(&mut chart, &mut s, 400.0);
    assert_eq!(count.get(), 0);
    pump_pie(&mut chart, &mut s, 900.0);
    assert_eq!(count.get(), 1);
    pump_pie(&mut chart, &mut s, 2000.0);
    assert_eq!(count.get(), 1);

    assert!(chart.replay(1, 2000.0, &mut s));
    pump_pie(&mut chart, &mut s, 3000.0);
    assert_eq!(count.get(), 2);
}

#[test]
fn press_selects_animates_and_auto_hides() {
    let mut s = SimulatedScheduler::new();
    let config = PieChartOptions::default().resolve().unwrap();
    let mut chart = PieChart::new(config, slices(&[1.0, 1.0, 1.0, 1.0]), 0.0, &mut s).unwrap();
    pump_pie(&mut chart, &mut s, 1000.0);

    let pressed = chart.press(1, 1000.0, &mut s).map(|d| d.value);
    assert_eq!(pressed, Some(1.0));
    assert_eq!(chart.selected(), Some(1));

    pump_pie(&mut chart, &mut s, 1100.0);
    assert!(chart.scales()[1] > 1.0 && chart.scales()[1] < 1.05);
    pump_pie(&mut chart, &mut s, 1200.0);
    assert_eq!(chart.scales(), [1.0, 1.05, 1.0, 1.0]);
    assert_eq!(chart.opacities(), [0.5, 1.0, 0.5, 0.5]);

    let render = chart.render_data();
    let selected = render.slices[1];
    assert!((selected.outer_radius - 50.0 * 1.05).abs() < EPS);
    assert_eq!(selected.opacity, 1.0);

    // Slice 1 spans 90..180 degrees, so its mid-angle sits exactly on the 135 degree boundary.
    let [tooltip] = render.tooltips.as_slice() else {
        panic!("expected one tooltip, got {:?}", render.tooltips);
    };
    assert_eq!(tooltip.index, 1);
    assert_eq!(tooltip.percentage, 25.0);
    assert_eq!(tooltip.total, 4.0);
    assert_eq!(tooltip.placement.arrow, ArrowDirection::Up);
    let anchor = point_at(Point::new(125.0, 125.0), 25.0, 0.75 * PI);
    assert_point_close(tooltip.placement.anchor, anchor);
    assert!((tooltip.placement.left - (anchor.x - 45.0)).abs() < EPS);
    assert!((tooltip.placement.top - (anchor.y + 10.0)).abs() < EPS);

    pump_pie(&mut chart, &mut s, 3999.0);
    assert_eq!(chart.selected(), Some(1));
    pump_pie(&mut chart, &mut s, 4000.0);
    assert_eq!(chart.selected(), None);
    assert!(chart.render_data().tooltips.is_empty());
    pump_pie(&mut chart, &mut s, 4300.0);
    assert_eq!(chart.scales(), [1.0, 1.0, 1.0, 1.0]);
    assert_eq!(chart.opacities(), [1.0, 1.0, 1.0, 1.0]);
}

#[test]
fn press_without_tooltips_reports_but_does_not_select() {
    let mut s = SimulatedScheduler::new();
    let config = PieChartOptions {
        show_tooltip: Some(false),
        ..PieChartOptions::default()
    }
    .resolve()
    .unwrap();
    let mut chart = PieChart::new(config, slices(&[1.0, 2.0]), 0.0, &mut s).unwrap();
    assert!(chart.press(1, 0.0, &mut s).is_some());
    assert_eq!(chart.selected(), None);
    assert!(chart.press(7, 0.0, &mut s).is_none());
}

#[test]
fn value_changes_keep_progress_but_count_changes_restart() {
    let mut s = SimulatedScheduler::new();
    let config = PieChartOptions::default().resolve().unwrap();
    let mut chart = PieChart::new(config, slices(&[1.0, 1.0]), 0.0, &mut s).unwrap();
    pump_pie(&mut chart, &mut s, 400.0);
    let mid: Vec<f64> = chart.progress().to_vec();
    assert!(mid[0] > 0.0 && mid[0] < 1.0);

    chart.set_series(slices(&[1.0, 5.0]), 410.0, &mut s).unwrap();
    assert_eq!(chart.progress(), mid.as_slice());
    assert!(chart.is_animating());
    assert_eq!(chart.total(), 6.0);

    chart
        .set_series(slices(&[1.0, 5.0, 2.0]), 420.0, &mut s)
        .unwrap();
    assert_eq!(chart.progress(), [0.0, 0.0, 0.0]);
    pump_pie(&mut chart, &mut s, 1300.0);
    assert_eq!(chart.progress(), [1.0, 1.0, 1.0]);
}

#[test]
fn invalid_series_leaves_chart_untouched() {
    let mut s = SimulatedScheduler::new();
    let config = PieChartOptions::default().resolve().unwrap();
    let mut chart = PieChart::new(config, slices(&[1.0, 1.0]), 0.0, &mut s).unwrap();
    assert!(chart.set_series(slices(&[1.0, -1.0]), 0.0, &mut s).is_err());
    assert!(chart.set_series(Vec::new(), 0.0, &mut s).is_err());
    assert_eq!(chart.series().len(), 2);
    assert_eq!(chart.total(), 2.0);
}

#[test]
fn always_show_tooltips_covers_every_slice() {
    let mut s = SimulatedScheduler::new();
    let config = PieChartOptions {
        always_show_tooltips: Some(true),
        cover: Some(crate::CoverOption::Ratio(0.5)),
        ..PieChartOptions::default()
    }
    .resolve()
    .unwrap();
    let chart = PieChart::new(config, slices(&[1.0, 2.0, 3.0]), 0.0, &mut s).unwrap();
    let render = chart.render_data();
    let indices: Vec<usize> = render.tooltips.iter().map(|t| t.index).collect();
    assert_eq!(indices, [0, 1, 2]);
    // Donut anchors sit halfway between the hole and the rim.
    let first = render.tooltips[0].placement.anchor;
    assert!(((first - render.center).hypot() - 37.5).abs() < EPS);
}

#[test]
fn disabled_tooltips_override_always_show() {
    let mut s = SimulatedScheduler::new();
    let config = PieChartOptions {
        show_tooltip: Some(false),
        always_show_tooltips: Some(true),
        ..PieChartOptions::default()
    }
    .resolve()
    .unwrap();
    let mut chart = PieChart::new(config, slices(&[1.0, 2.0, 3.0]), 0.0, &mut s).unwrap();
    pump_pie(&mut chart, &mut s, 5_000.0);
    assert!(chart.render_data().tooltips.is_empty());

    assert!(chart.press(1, 5_000.0, &mut s).is_some());
    assert!(chart.render_data().tooltips.is_empty());
}

#[test]
fn tooltip_text_follows_slice_label() {
    let mut s = SimulatedScheduler::new();
    let config = PieChartOptions {
        always_show_tooltips: Some(true),
        ..PieChartOptions::default()
    }
    .resolve()
    .unwrap();
    let series = vec![
        WeightedValue::new(1.0, css::TOMATO).with_label("Apples"),
        WeightedValue::new(2.0, css::GOLD),
    ];
    let chart = PieChart::new(config, series, 0.0, &mut s).unwrap();
    let flags: Vec<bool> = chart
        .render_data()
        .tooltips
        .iter()
        .map(|t| t.has_text)
        .collect();
    assert_eq!(flags, [true, false]);
}

fn gauge_segments() -> Vec<WeightedValue> {
    vec![
        WeightedValue::new(220.0, css::MEDIUM_SEA_GREEN)
            .with_label("220")
            .with_sublabel("73% checked")
            .with_end_corner_radius(6.0),
        WeightedValue::new(80.0, css::LIGHT_GRAY),
    ]
}

#[test]
fn gauge_draws_track_then_growing_progress_arc() {
    let mut s = SimulatedScheduler::new();
    let config = GaugeOptions {
        width: Some(400.0),
        ..GaugeOptions::default()
    }
    .resolve()
    .unwrap();
    let mut gauge = Gauge::new(config, gauge_segments(), 0.0, &mut s).unwrap();

    let render = gauge.render_data();
    assert_eq!(render.arcs.len(), 1);
    let track = render.arcs[0];
    assert_eq!(track.role, ArcRole::Track);
    assert_eq!(track.index, 1);
    assert_eq!(track.start_angle, -FRAC_PI_2);
    assert_eq!(track.end_angle, FRAC_PI_2);
    assert_eq!(track.end_cap, None);

    pump_gauge(&mut gauge, &mut s, 500.0);
    assert_eq!(gauge.progress(), 0.75);
    let render = gauge.render_data();
    let roles: Vec<ArcRole> = render.arcs.iter().map(|a| a.role).collect();
    assert_eq!(roles, [ArcRole::Track, ArcRole::Progress]);
    assert_eq!(render.arcs[1].end_cap, None);

    pump_gauge(&mut gauge, &mut s, 1000.0);
    let render = gauge.render_data();
    assert_eq!(render.chart.progress, 1.0);
    assert_eq!(render.chart.total, 300.0);
    let bar = render.arcs[1];
    let radii = bar.radii;
    let full_end = -FRAC_PI_2 + PI * 220.0 / 300.0 - 0.02;
    let cap_angle = 6.0 / radii.mid();
    assert!((bar.end_angle - (full_end - cap_angle)).abs() < EPS);
    let cap = bar.end_cap.unwrap();
    assert_eq!(cap.radius, 6.0);
    assert_point_close(
        cap.center,
        point_at(config.dimensions.center, radii.mid(), full_end - cap_angle),
    );
    assert!(bar.sector(config.dimensions.center).path().is_some());
}

#[test]
fn gauge_selection_always_toggles_and_places_tooltip_by_side() {
    let mut s = SimulatedScheduler::new();
    let config = GaugeOptions::default().resolve().unwrap();
    let mut gauge = Gauge::new(config, gauge_segments(), 0.0, &mut s).unwrap();

    assert!(gauge.press(0, &mut s).is_some());
    let tooltip = gauge.render_data().tooltip.unwrap();
    assert_eq!(tooltip.index, 0);
    assert_eq!(tooltip.placement.arrow, ArrowDirection::Right);
    assert!(tooltip.has_text);
    assert_eq!(tooltip.arrow_size, 10.0);

    gauge.press(1, &mut s);
    let tooltip = gauge.render_data().tooltip.unwrap();
    assert_eq!(tooltip.placement.arrow, ArrowDirection::Left);
    assert!(!tooltip.has_text);

    gauge.press(1, &mut s);
    assert!(gauge.render_data().tooltip.is_none());
    assert_eq!(s.pending_timers(), 0);
}

#[test]
fn gauge_tooltips_align_across_thickness_multipliers() {
    let mut s = SimulatedScheduler::new();
    let config = GaugeOptions::default().resolve().unwrap();
    let segments = vec![
        WeightedValue::new(1.0, css::GREEN).with_thickness_multiplier(1.5),
        WeightedValue::new(1.0, css::GRAY),
    ];
    let gauge = Gauge::new(config, segments, 0.0, &mut s).unwrap();
    let center = gauge.ring().center;
    let mid = gauge.ring().reference_mid_radius;
    for i in 0..2 {
        let anchor = gauge.tooltip_for(i).unwrap().placement.anchor;
        assert!(((anchor - center).hypot() - mid).abs() < EPS, "segment {i}");
    }
    let thick = gauge.segment_radii(0).unwrap();
    assert!((thick.outer - config.dimensions.radius).abs() < EPS);
}

#[test]
fn gauge_segment_updates_do_not_restart_the_entrance() {
    let mut s = SimulatedScheduler::new();
    let config = GaugeOptions::default().resolve().unwrap();
    let mut gauge = Gauge::new(config, gauge_segments(), 0.0, &mut s).unwrap();
    pump_gauge(&mut gauge, &mut s, 1000.0);
    assert_eq!(gauge.progress(), 1.0);

    gauge.press(1, &mut s);
    gauge.set_segments(slices(&[5.0]), &mut s).unwrap();
    assert_eq!(gauge.progress(), 1.0);
    assert_eq!(gauge.selected(), None);
    assert!(gauge.arcs().track.is_none());

    assert!(gauge.replay(3, 1000.0, &mut s));
    assert_eq!(gauge.progress(), 0.0);
    assert!(gauge.render_data().arcs.is_empty());
}

#[test]
fn gauge_corner_radius_rounds_drawn_arcs() {
    let mut s = SimulatedScheduler::new();
    let config = GaugeOptions {
        width: Some(400.0),
        corner_radius: Some(4.0),
        ..GaugeOptions::default()
    }
    .resolve()
    .unwrap();
    let gauge = Gauge::new(config, gauge_segments(), 0.0, &mut s).unwrap();
    let track = gauge.render_data().arcs[0];
    assert_eq!(track.corner_radius, 4.0);

    let center = config.dimensions.center;
    let rounded = track.sector(center).path().unwrap();
    let square = track.sector(center).with_corner_radius(0.0).path().unwrap();
    // Just inside the outer corner at the start of the track.
    let corner = Point::new(center.x - track.radii.outer + 0.3, center.y - 0.3);
    assert!(square.contains(corner));
    assert!(!rounded.contains(corner));
    // Away from the corners both outlines agree.
    let top = Point::new(center.x, center.y - track.radii.mid());
    assert!(square.contains(top) && rounded.contains(top));
}
