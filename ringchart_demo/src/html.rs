// Copyright 2025 the Ringchart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! HTML report assembly.

/// One captured frame.
#[derive(Debug)]
pub(crate) struct Frame {
    pub(crate) label: String,
    pub(crate) svg: String,
}

/// A titled strip of frames.
#[derive(Debug)]
pub(crate) struct HtmlSection {
    pub(crate) title: &'static str,
    pub(crate) description: &'static str,
    pub(crate) frames: Vec<Frame>,
}

pub(crate) fn render_report(title: &str, sections: &[HtmlSection]) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str(&format!("<title>{}</title>\n", escape_html(title)));
    out.push_str(
        "<style>\n\
         body { font-family: sans-serif; margin: 24px; }\n\
         .strip { display: flex; flex-wrap: wrap; gap: 12px; }\n\
         figure { margin: 0; }\n\
         figcaption { font-size: 12px; color: #555; text-align: center; }\n\
         </style>\n",
    );
    out.push_str("</head>\n<body>\n");
    out.push_str(&format!("<h1>{}</h1>\n", escape_html(title)));

    for section in sections {
        out.push_str(&format!("<h2>{}</h2>\n", escape_html(section.title)));
        out.push_str(&format!("<p>{}</p>\n", escape_html(section.description)));
        out.push_str("<div class=\"strip\">\n");
        for frame in &section.frames {
            out.push_str("<figure>\n");
            out.push_str(&frame.svg);
            out.push_str(&format!(
                "<figcaption>{}</figcaption>\n</figure>\n",
                escape_html(&frame.label)
            ));
        }
        out.push_str("</div>\n");
    }

    out.push_str("</body>\n</html>\n");
    out
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
