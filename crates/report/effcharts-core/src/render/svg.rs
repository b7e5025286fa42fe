//! SVG markup for bar charts.

use std::fmt::Write;

use super::Chart;
use crate::bars::Color;

const MARGIN_LEFT: f64 = 72.0;
const MARGIN_RIGHT: f64 = 24.0;
const MARGIN_TOP: f64 = 56.0;
const MARGIN_BOTTOM: f64 = 96.0;
const Y_TICKS: usize = 5;
const FALLBACK_BAR: Color = Color::rgb(0x9e, 0x9e, 0x9e);
const FONT: &str = "Segoe UI, DejaVu Sans, Arial, sans-serif";

/// Escape text for use inside SVG elements and attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

/// Split a label into lines of at most `max_chars`, breaking at spaces.
/// Words longer than the limit stay on their own line.
pub fn wrap_label(label: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in label.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > max_chars {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn tick_text(value: f64, max: f64) -> String {
    if max >= 100.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

/// Render a planned chart as a standalone SVG document.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn markup(chart: &Chart<'_>) -> String {
    let layout = chart.layout;
    let width = f64::from(layout.width);
    let height = f64::from(layout.height);
    let font = layout.font_size;

    let plot_left = MARGIN_LEFT;
    let plot_right = width - MARGIN_RIGHT;
    let plot_top = MARGIN_TOP;
    let plot_bottom = height - MARGIN_BOTTOM;
    let plot_height = plot_bottom - plot_top;

    let (y_min, y_max) = chart.y_range;
    let span = if y_max > y_min { y_max - y_min } else { 1.0 };
    let y_of = |v: f64| plot_bottom - (v.clamp(y_min, y_min + span) - y_min) / span * plot_height;

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        "<svg xmlns='http://www.w3.org/2000/svg' width='{}' height='{}' viewBox='0 0 {} {}'>",
        layout.width, layout.height, layout.width, layout.height
    );
    let _ = writeln!(svg, "  <rect width='100%' height='100%' fill='#ffffff'/>");
    let _ = writeln!(
        svg,
        "  <text x='{:.1}' y='28' text-anchor='middle' font-family='{FONT}' font-size='14' fill='#333333'>{}</text>",
        width / 2.0,
        escape(&chart.title)
    );

    // Value axis with evenly spaced ticks.
    let _ = writeln!(
        svg,
        "  <line x1='{plot_left:.1}' y1='{plot_top:.1}' x2='{plot_left:.1}' y2='{plot_bottom:.1}' stroke='#666666'/>"
    );
    let _ = writeln!(
        svg,
        "  <line x1='{plot_left:.1}' y1='{plot_bottom:.1}' x2='{plot_right:.1}' y2='{plot_bottom:.1}' stroke='#666666'/>"
    );
    for i in 0..=Y_TICKS {
        let value = y_min + span * i as f64 / Y_TICKS as f64;
        let y = y_of(value);
        let _ = writeln!(
            svg,
            "  <line x1='{plot_left:.1}' y1='{y:.1}' x2='{plot_right:.1}' y2='{y:.1}' stroke='#e6e6e6'/>"
        );
        let _ = writeln!(
            svg,
            "  <text x='{:.1}' y='{:.1}' text-anchor='end' font-family='{FONT}' font-size='{font}' fill='#333333'>{}</text>",
            plot_left - 6.0,
            y + font / 3.0,
            tick_text(value, y_max)
        );
    }

    if chart.bars.is_empty() {
        let _ = writeln!(svg, "</svg>");
        return svg;
    }

    let slot = (plot_right - plot_left) / chart.bars.len() as f64;
    let bar_width = f64::from(layout.bar_width).min(slot * 0.9);
    // Rough glyph width of 0.6em.
    let max_chars = (slot / (font * 0.6)).floor().max(1.0) as usize;

    for (i, bar) in chart.bars.iter().enumerate() {
        let center = plot_left + slot * (i as f64 + 0.5);
        if bar.style.show {
            let top = y_of(bar.value);
            let fill = bar.style.fill.unwrap_or(FALLBACK_BAR);
            let stroke = bar.style.stroke.unwrap_or(fill);
            let _ = writeln!(
                svg,
                "  <rect x='{:.1}' y='{top:.1}' width='{bar_width:.1}' height='{:.1}' fill='{}' stroke='{}'/>",
                center - bar_width / 2.0,
                (plot_bottom - top).max(0.0),
                rgb(fill),
                rgb(stroke)
            );
        }

        let _ = write!(
            svg,
            "  <text text-anchor='middle' font-family='{FONT}' font-size='{font}' fill='#333333'>"
        );
        for (line_no, line) in wrap_label(&bar.label, max_chars).iter().enumerate() {
            let _ = write!(
                svg,
                "<tspan x='{center:.1}' y='{:.1}'>{}</tspan>",
                plot_bottom + font * 1.6 + line_no as f64 * font * 1.25,
                escape(line)
            );
        }
        let _ = writeln!(svg, "</text>");
    }

    let _ = writeln!(svg, "</svg>");
    svg
}

fn rgb(color: Color) -> String {
    if color.a == 255 {
        format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
    } else {
        format!(
            "rgba({},{},{},{:.3})",
            color.r,
            color.g,
            color.b,
            f64::from(color.a) / 255.0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bars::{Bar, BarStyle};
    use crate::render::RenderProfile;

    #[test]
    fn escapes_markup() {
        assert_eq!(escape("a<b & 'c'"), "a&lt;b &amp; &apos;c&apos;");
    }

    #[test]
    fn wraps_at_spaces() {
        assert_eq!(
            wrap_label("Good vs chrome.exe (smaller is better)", 12),
            ["Good vs", "chrome.exe", "(smaller is", "better)"]
        );
        assert_eq!(wrap_label("short", 40), ["short"]);
        assert!(wrap_label("", 10).is_empty());
    }

    #[test]
    fn markup_contains_bars_and_title() {
        let bars = vec![
            Bar {
                label: "browser.exe (1.00)".into(),
                value: 1.0,
                style: BarStyle {
                    show: true,
                    fill: Some(Color::rgb(255, 0, 0)),
                    stroke: Some(Color::rgb(255, 0, 0)),
                },
                browser: "browser.exe".into(),
            },
            Bar {
                label: "websrv.exe (2.00)".into(),
                value: 2.0,
                style: BarStyle {
                    show: true,
                    fill: None,
                    stroke: None,
                },
                browser: "websrv.exe".into(),
            },
        ];
        let chart = Chart::plan("srum <EnergyLoss>", &bars, RenderProfile::Magnitude, "now");
        let svg = markup(&chart);
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("srum &lt;EnergyLoss&gt; now"));
        assert!(svg.contains("fill='#ff0000'"));
        assert!(svg.contains("fill='#9e9e9e'"));
        assert_eq!(svg.matches("<tspan").count(), 2);
    }
}
