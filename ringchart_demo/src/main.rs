// Copyright 2025 the Ringchart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Offline frame dumps for `ringchart`.
//!
//! Drives a pie chart and a gauge with a [`SimulatedScheduler`], captures the render snapshot at a
//! fixed frame interval and writes the frames as SVG strips into one HTML file.
mod html;
mod svg;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use log::{debug, info};
use peniko::color::palette::css;
use ringchart::{
    AnimationOption, AnimationOptions, Gauge, GaugeOptions, PieChart, PieChartOptions,
    SimulatedScheduler, Wakeup, WeightedValue,
};
use serde::de::DeserializeOwned;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Where to write the HTML report.
    #[arg(short, long, default_value = "ringchart_demo.html")]
    out: PathBuf,

    /// JSON file with pie chart options (camelCase keys).
    #[arg(long)]
    pie_options: Option<PathBuf>,

    /// JSON file with gauge options (camelCase keys).
    #[arg(long)]
    gauge_options: Option<PathBuf>,

    /// Number of frames captured per strip.
    #[arg(long, default_value_t = 8)]
    frames: usize,

    /// Milliseconds between captured frames.
    #[arg(long, default_value_t = 150.0)]
    interval: f64,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let pie_options: PieChartOptions = read_options(args.pie_options.as_deref())?;
    let gauge_options: GaugeOptions = read_options(args.gauge_options.as_deref())?;

    let sections = vec![
        pie_entrance(&pie_options, &args)?,
        pie_selection(&pie_options, &args)?,
        gauge_entrance(&gauge_options, &args)?,
        gauge_selection(&gauge_options)?,
    ];

    let html = html::render_report("ringchart demo", &sections);
    std::fs::write(&args.out, html).with_context(|| format!("writing {}", args.out.display()))?;
    info!("wrote {}", args.out.display());
    Ok(())
}

fn read_options<T: Default + DeserializeOwned>(path: Option<&Path>) -> anyhow::Result<T> {
    let Some(path) = path else {
        return Ok(T::default());
    };
    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn pie_series() -> Vec<WeightedValue> {
    vec![
        WeightedValue::new(40.0, css::CORNFLOWER_BLUE),
        WeightedValue::new(25.0, css::TOMATO),
        WeightedValue::new(20.0, css::GOLD),
        WeightedValue::new(15.0, css::MEDIUM_SEA_GREEN),
    ]
}

fn gauge_segments() -> Vec<WeightedValue> {
    vec![
        WeightedValue::new(68.0, css::DODGER_BLUE)
            .with_label("Storage")
            .with_sublabel("68 GB used")
            .with_end_corner_radius(12.0),
        WeightedValue::new(32.0, css::LIGHT_GRAY)
            .with_label("Free")
            .with_thickness_multiplier(0.6)
            .with_corner_radius(6.0),
    ]
}

/// Advances the clock to `now` and forwards every due callback.
fn pump<F: FnMut(Wakeup, &mut SimulatedScheduler)>(
    scheduler: &mut SimulatedScheduler,
    now: f64,
    mut deliver: F,
) {
    for wakeup in scheduler.advance_to(now) {
        deliver(wakeup, scheduler);
    }
}

fn pie_entrance(options: &PieChartOptions, args: &Args) -> anyhow::Result<html::HtmlSection> {
    let mut options = options.clone();
    // Stagger the slices unless the options file configures the animation itself.
    if options.animation.is_none() {
        options.animation = Some(AnimationOption::Config(AnimationOptions {
            sequential: Some(true),
            ..AnimationOptions::default()
        }));
    }
    let config = options.resolve().context("resolving pie options")?;
    let mut scheduler = SimulatedScheduler::new();
    let mut chart = PieChart::new(config, pie_series(), 0.0, &mut scheduler)?;
    chart.set_on_animation_complete(|| debug!("pie entrance complete"));

    let mut frames = Vec::with_capacity(args.frames);
    for i in 0..args.frames {
        let now = i as f64 * args.interval;
        pump(&mut scheduler, now, |wakeup, s| {
            chart.on_wakeup(wakeup, s);
        });
        frames.push(html::Frame {
            label: format!("{now:.0} ms"),
            svg: svg::pie_scene(&chart.render_data()).to_svg_string(),
        });
    }

    Ok(html::HtmlSection {
        title: "Pie entrance",
        description: "Slices sweep in one after another unless the options file sets its own animation.",
        frames,
    })
}

fn pie_selection(options: &PieChartOptions, args: &Args) -> anyhow::Result<html::HtmlSection> {
    let mut options = options.clone();
    options.show_tooltip = Some(true);
    let config = options.resolve().context("resolving pie options")?;
    let mut scheduler = SimulatedScheduler::new();
    let mut chart = PieChart::new(config, pie_series(), 0.0, &mut scheduler)?;

    // Let the entrance finish before pressing.
    let settled = 5_000.0;
    pump(&mut scheduler, settled, |wakeup, s| {
        chart.on_wakeup(wakeup, s);
    });
    if let Some(pressed) = chart.press(1, settled, &mut scheduler) {
        info!("pressed slice with value {}", pressed.value);
    }

    let mut frames = Vec::new();
    let step = args.interval / 3.0;
    for i in 0..args.frames {
        let now = settled + i as f64 * step;
        pump(&mut scheduler, now, |wakeup, s| {
            chart.on_wakeup(wakeup, s);
        });
        frames.push(html::Frame {
            label: format!("+{:.0} ms", now - settled),
            svg: svg::pie_scene(&chart.render_data()).to_svg_string(),
        });
    }

    // Past the auto-hide delay the tooltip is gone and the highlight reverses.
    let hidden = settled + chart.config().tooltip_delay + 1.0;
    pump(&mut scheduler, hidden, |wakeup, s| {
        chart.on_wakeup(wakeup, s);
    });
    pump(&mut scheduler, hidden + 1_000.0, |wakeup, s| {
        chart.on_wakeup(wakeup, s);
    });
    frames.push(html::Frame {
        label: "after auto-hide".to_string(),
        svg: svg::pie_scene(&chart.render_data()).to_svg_string(),
    });

    Ok(html::HtmlSection {
        title: "Pie selection",
        description: "Pressing a slice scales it up, dims the others and shows its tooltip.",
        frames,
    })
}

fn gauge_entrance(options: &GaugeOptions, args: &Args) -> anyhow::Result<html::HtmlSection> {
    let config = options.resolve().context("resolving gauge options")?;
    let mut scheduler = SimulatedScheduler::new();
    let mut gauge = Gauge::new(config, gauge_segments(), 0.0, &mut scheduler)?;
    gauge.set_on_animation_complete(|| debug!("gauge entrance complete"));

    let mut frames = Vec::with_capacity(args.frames);
    for i in 0..args.frames {
        let now = i as f64 * args.interval;
        pump(&mut scheduler, now, |wakeup, s| {
            gauge.on_wakeup(wakeup, s);
        });
        frames.push(html::Frame {
            label: format!("{now:.0} ms"),
            svg: svg::gauge_scene(&gauge.render_data(), None).to_svg_string(),
        });
    }

    Ok(html::HtmlSection {
        title: "Gauge entrance",
        description: "The progress arc grows over the track and gains its end cap on completion.",
        frames,
    })
}

fn gauge_selection(options: &GaugeOptions) -> anyhow::Result<html::HtmlSection> {
    let config = options.resolve().context("resolving gauge options")?;
    let mut scheduler = SimulatedScheduler::new();
    let mut gauge = Gauge::new(config, gauge_segments(), 0.0, &mut scheduler)?;
    pump(&mut scheduler, 5_000.0, |wakeup, s| {
        gauge.on_wakeup(wakeup, s);
    });

    let mut frames = Vec::new();
    for index in 0..gauge.segments().len() {
        gauge.press(index, &mut scheduler);
        let label = gauge.segments()[index].label.clone();
        let data = gauge.render_data();
        frames.push(html::Frame {
            label: format!("segment {index} selected"),
            svg: svg::gauge_scene(&data, label.as_deref()).to_svg_string(),
        });
    }
    gauge.clear_selection(&mut scheduler);
    debug!("{} timers left pending", scheduler.pending_timers());

    Ok(html::HtmlSection {
        title: "Gauge selection",
        description: "Each segment gets a tooltip on the side of the half circle it sits on.",
        frames,
    })
}
