// Copyright 2025 the Ringchart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal SVG dump utilities for `ringchart_demo`.

use kurbo::{BezPath, Circle, Point, Rect};
use peniko::Color;
use ringchart::{EndCap, GaugeRenderData, PieRenderData, SectorSpec, TooltipPlacement};

#[derive(Debug)]
enum Element {
    Path {
        path: BezPath,
        fill: Color,
        opacity: f64,
    },
    Circle {
        circle: Circle,
        fill: Option<Color>,
        stroke: Option<(Color, f64)>,
    },
    Rect {
        rect: Rect,
        fill: Color,
    },
    Polygon {
        points: Vec<Point>,
        fill: Color,
    },
    Text {
        pos: Point,
        font_size: f64,
        fill: Color,
        text: String,
    },
}

/// Elements in paint order, serialized to a standalone `<svg>`.
#[derive(Debug, Default)]
pub(crate) struct SvgScene {
    elements: Vec<Element>,
    view_box: Option<Rect>,
}

const TOOLTIP_FILL: Color = Color::from_rgba8(0x33, 0x33, 0x33, 0xe6);

impl SvgScene {
    pub(crate) fn set_view_box(&mut self, view_box: Rect) {
        self.view_box = Some(view_box);
    }

    pub(crate) fn push_sector(&mut self, sector: &SectorSpec) {
        // Zero-width sectors have no outline.
        if let Some(path) = sector.path() {
            self.elements.push(Element::Path {
                path,
                fill: sector.fill,
                opacity: sector.opacity,
            });
        }
    }

    pub(crate) fn push_end_cap(&mut self, cap: &EndCap, fill: Color) {
        self.elements.push(Element::Circle {
            circle: cap.circle(),
            fill: Some(fill),
            stroke: None,
        });
    }

    pub(crate) fn push_circle(
        &mut self,
        circle: Circle,
        fill: Option<Color>,
        stroke: Option<(Color, f64)>,
    ) {
        self.elements.push(Element::Circle {
            circle,
            fill,
            stroke,
        });
    }

    pub(crate) fn push_tooltip(
        &mut self,
        placement: &TooltipPlacement,
        arrow_size: f64,
        text: &str,
    ) {
        let rect = placement.rect();
        self.elements.push(Element::Rect {
            rect,
            fill: TOOLTIP_FILL,
        });
        self.elements.push(Element::Polygon {
            points: placement.arrow_triangle(arrow_size).to_vec(),
            fill: TOOLTIP_FILL,
        });
        self.push_text(
            Point::new(rect.x0 + 6.0, rect.center().y),
            11.0,
            Color::WHITE,
            text,
        );
    }

    pub(crate) fn push_text(&mut self, pos: Point, font_size: f64, fill: Color, text: &str) {
        self.elements.push(Element::Text {
            pos,
            font_size,
            fill,
            text: text.to_string(),
        });
    }

    pub(crate) fn to_svg_string(&self) -> String {
        let view_box = self.view_box.unwrap_or(Rect::new(0.0, 0.0, 100.0, 100.0));
        let mut out = String::new();

        out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" "#);
        out.push_str(&format!(
            r#"viewBox="{} {} {} {}" width="{}" height="{}" preserveAspectRatio="xMinYMin meet">"#,
            view_box.x0,
            view_box.y0,
            view_box.width(),
            view_box.height(),
            view_box.width(),
            view_box.height()
        ));
        out.push('\n');

        for element in &self.elements {
            match element {
                Element::Path {
                    path,
                    fill,
                    opacity,
                } => {
                    out.push_str(&format!(r#"<path d="{}""#, path.to_svg()));
                    write_paint_attr(&mut out, "fill", *fill);
                    if *opacity < 1.0 {
                        out.push_str(&format!(r#" opacity="{opacity:.3}""#));
                    }
                    out.push_str("/>\n");
                }
                Element::Circle {
                    circle,
                    fill,
                    stroke,
                } => {
                    out.push_str(&format!(
                        r#"<circle cx="{}" cy="{}" r="{}""#,
                        circle.center.x, circle.center.y, circle.radius
                    ));
                    match fill {
                        Some(fill) => write_paint_attr(&mut out, "fill", *fill),
                        None => out.push_str(r#" fill="none""#),
                    }
                    if let Some((color, width)) = stroke {
                        write_paint_attr(&mut out, "stroke", *color);
                        out.push_str(&format!(r#" stroke-width="{width}""#));
                    }
                    out.push_str("/>\n");
                }
                Element::Rect { rect, fill } => {
                    out.push_str(&format!(
                        r#"<rect x="{}" y="{}" width="{}" height="{}" rx="4""#,
                        rect.x0,
                        rect.y0,
                        rect.width(),
                        rect.height(),
                    ));
                    write_paint_attr(&mut out, "fill", *fill);
                    out.push_str("/>\n");
                }
                Element::Polygon { points, fill } => {
                    let points: Vec<String> =
                        points.iter().map(|p| format!("{},{}", p.x, p.y)).collect();
                    out.push_str(&format!(r#"<polygon points="{}""#, points.join(" ")));
                    write_paint_attr(&mut out, "fill", *fill);
                    out.push_str("/>\n");
                }
                Element::Text {
                    pos,
                    font_size,
                    fill,
                    text,
                } => {
                    out.push_str(&format!(
                        r#"<text x="{}" y="{}" font-size="{}" dominant-baseline="middle""#,
                        pos.x, pos.y, font_size
                    ));
                    write_paint_attr(&mut out, "fill", *fill);
                    out.push('>');
                    out.push_str(&escape_xml(text));
                    out.push_str("</text>\n");
                }
            }
        }

        out.push_str("</svg>\n");
        out
    }
}

/// Draws one pie frame.
pub(crate) fn pie_scene(data: &PieRenderData) -> SvgScene {
    let mut scene = SvgScene::default();
    // Leave room for the selection scale and for tooltips outside the ring.
    let pad = data.size * 0.5;
    scene.set_view_box(Rect::new(-pad, -pad, data.size + pad, data.size + pad));

    for slice in &data.slices {
        scene.push_sector(&slice.sector(data.center));
    }
    if let Some(cover) = &data.cover {
        scene.push_circle(cover.circle, Some(cover.color), None);
    }
    if let Some(border) = &data.outer_border {
        scene.push_circle(border.circle, None, Some((Color::WHITE, border.width)));
    }
    for tooltip in &data.tooltips {
        let text = format!("{} ({:.1}%)", tooltip.value, tooltip.percentage);
        scene.push_tooltip(&tooltip.placement, tooltip.arrow_size, &text);
    }
    scene
}

/// Draws one gauge frame; `label` is the text of the selected segment's tooltip.
pub(crate) fn gauge_scene(data: &GaugeRenderData, label: Option<&str>) -> SvgScene {
    let mut scene = SvgScene::default();
    let dims = data.chart.dimensions;
    let pad = dims.width * 0.4;
    scene.set_view_box(Rect::new(-pad, -pad, dims.width + pad, dims.height + pad * 0.5));

    for arc in &data.arcs {
        scene.push_sector(&arc.sector(dims.center));
        if let Some(cap) = &arc.end_cap {
            scene.push_end_cap(cap, arc.color);
        }
    }
    scene.push_text(
        Point::new(dims.center.x - 30.0, dims.center.y + data.center_offset - 12.0),
        20.0,
        Color::BLACK,
        &format!("{:.0}%", data.chart.progress * 100.0),
    );
    if let Some(tooltip) = &data.tooltip {
        let text = label.filter(|_| tooltip.has_text).unwrap_or("");
        scene.push_tooltip(&tooltip.placement, tooltip.arrow_size, text);
    }
    scene
}

fn svg_paint(color: Color) -> (String, Option<f64>) {
    let rgba = color.to_rgba8();
    let fill = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
    let opacity = if rgba.a == 255 {
        None
    } else {
        Some(f64::from(rgba.a) / 255.0)
    };
    (fill, opacity)
}

fn write_paint_attr(out: &mut String, name: &str, color: Color) {
    let (value, opacity) = svg_paint(color);
    out.push_str(&format!(r#" {name}="{value}""#));
    if let Some(o) = opacity {
        out.push_str(&format!(r#" {name}-opacity="{o}""#));
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
