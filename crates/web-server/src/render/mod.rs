//! Walks a `ReportModel` and writes it out as HTML with inline SVG charts.

pub mod html;
pub mod svg;

pub use html::{render_page, render_report};
pub use svg::render_bar_chart;

/// Escapes text for use in element content and quoted attribute values.
pub(crate) fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
