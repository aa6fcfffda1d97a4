use super::escape;
use report::{Chart, format_number};

const MARGIN_LEFT: f64 = 80.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 70.0;
const MARGIN_BOTTOM: f64 = 170.0;
const Y_TICKS: u32 = 5;
const PALETTE: [&str; 6] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b",
];

/// Renders a grouped bar chart: one group per category, one bar per series.
///
/// The output is a standalone `<svg>` element meant to be inlined in HTML.
/// An empty chart still gets its frame, title and axis titles.
pub fn render_bar_chart(chart: &Chart) -> String {
    let width = f64::from(chart.size.width);
    let height = f64::from(chart.size.height);
    let plot_w = (width - MARGIN_LEFT - MARGIN_RIGHT).max(1.0);
    let plot_h = (height - MARGIN_TOP - MARGIN_BOTTOM).max(1.0);
    let base_y = MARGIN_TOP + plot_h;

    let (axis_max, step) = axis_scale(chart.max_value());
    let scale = plot_h / axis_max;

    let mut out = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif" font-size="12" role="img">
<title>{title}</title>
<rect x="0" y="0" width="{w}" height="{h}" fill="white"/>
<text x="{cx:.1}" y="28" text-anchor="middle" font-size="18">{title}</text>
"#,
        w = chart.size.width,
        h = chart.size.height,
        cx = width / 2.0,
        title = escape(&chart.title),
    );

    // Horizontal grid lines with their tick values.
    let ticks = (axis_max / step).round() as u32;
    for k in 0..=ticks {
        let tick = step * f64::from(k);
        let y = base_y - tick * scale;
        out.push_str(&format!(
            r##"<line x1="{x1:.1}" y1="{y:.1}" x2="{x2:.1}" y2="{y:.1}" stroke="#e0e0e0"/>
<text x="{tx:.1}" y="{ty:.1}" text-anchor="end">{label}</text>
"##,
            x1 = MARGIN_LEFT,
            x2 = MARGIN_LEFT + plot_w,
            tx = MARGIN_LEFT - 6.0,
            ty = y + 4.0,
            label = format_number(tick),
        ));
    }

    let groups = chart.x_labels.len();
    let series_count = chart.series.len().max(1);
    if groups > 0 {
        let group_w = plot_w / groups as f64;
        let bar_w = group_w * 0.8 / series_count as f64;

        for (s, series) in chart.series.iter().enumerate() {
            let color = PALETTE[s % PALETTE.len()];
            for (i, value) in series.values.iter().enumerate() {
                let bar_h = (value.max(0.0) * scale).min(plot_h);
                let x = MARGIN_LEFT + group_w * i as f64 + group_w * 0.1 + bar_w * s as f64;
                out.push_str(&format!(
                    r#"<rect class="bar" x="{x:.1}" y="{y:.1}" width="{bw:.1}" height="{bh:.1}" fill="{color}"><title>{label}: {value}</title></rect>
"#,
                    y = base_y - bar_h,
                    bw = bar_w,
                    bh = bar_h,
                    label = escape(&chart.x_labels[i]),
                    value = format_number(*value),
                ));
            }
        }

        for (i, label) in chart.x_labels.iter().enumerate() {
            let x = MARGIN_LEFT + group_w * (i as f64 + 0.5);
            let y = base_y + 14.0;
            out.push_str(&format!(
                r#"<text class="category" x="{x:.1}" y="{y:.1}" text-anchor="end" transform="rotate(-45 {x:.1} {y:.1})">{label}</text>
"#,
                label = escape(label),
            ));
        }
    }

    // Axes and their titles.
    out.push_str(&format!(
        r##"<line x1="{l:.1}" y1="{t:.1}" x2="{l:.1}" y2="{b:.1}" stroke="#333"/>
<line x1="{l:.1}" y1="{b:.1}" x2="{r:.1}" y2="{b:.1}" stroke="#333"/>
<text x="{cx:.1}" y="{xt:.1}" text-anchor="middle" font-size="14">{x_title}</text>
<text x="18" y="{cy:.1}" text-anchor="middle" font-size="14" transform="rotate(-90 18 {cy:.1})">{y_title}</text>
"##,
        l = MARGIN_LEFT,
        t = MARGIN_TOP,
        b = base_y,
        r = MARGIN_LEFT + plot_w,
        cx = MARGIN_LEFT + plot_w / 2.0,
        xt = height - 12.0,
        cy = MARGIN_TOP + plot_h / 2.0,
        x_title = escape(&chart.x_title),
        y_title = escape(&chart.y_title),
    ));

    // Legend, top right.
    for (s, series) in chart.series.iter().enumerate() {
        let y = 44.0 + 18.0 * s as f64;
        let x = width - MARGIN_RIGHT - 160.0;
        out.push_str(&format!(
            r#"<rect x="{x:.1}" y="{ry:.1}" width="12" height="12" fill="{color}"/>
<text class="legend" x="{tx:.1}" y="{y:.1}">{name}</text>
"#,
            ry = y - 10.0,
            tx = x + 18.0,
            color = PALETTE[s % PALETTE.len()],
            name = escape(&series.name),
        ));
    }

    out.push_str("</svg>");
    out
}

/// Rounds the largest value up to a 1/2/5 step so ticks land on round numbers.
/// Returns `(axis_max, step)`; an all-zero chart gets unit steps.
fn axis_scale(max: f64) -> (f64, f64) {
    if !max.is_finite() || max <= 0.0 {
        return (f64::from(Y_TICKS), 1.0);
    }
    let raw = max / f64::from(Y_TICKS);
    let magnitude = 10f64.powf(raw.log10().floor());
    let step = [1.0, 2.0, 5.0, 10.0]
        .iter()
        .map(|m| m * magnitude)
        .find(|s| *s >= raw)
        .unwrap_or(10.0 * magnitude);
    ((max / step).ceil() * step, step)
}

#[cfg(test)]
mod tests {
    use super::*;
    use report::ChartSize;

    fn chart(labels: &[&str]) -> Chart {
        Chart::new(
            "points",
            "Constructors",
            "Position",
            "Points",
            ChartSize::STANDINGS,
            labels.iter().map(|l| l.to_string()).collect(),
        )
    }

    #[test]
    fn one_bar_per_category_and_series() {
        let mut c = chart(&["A", "B", "C"]);
        c.add_series("Total Podiums", vec![10.0, 4.0, 0.0]).unwrap();
        c.add_series("Total Race Wins", vec![6.0, 1.0, 0.0]).unwrap();
        let svg = render_bar_chart(&c);

        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert_eq!(svg.matches(r#"<rect class="bar""#).count(), 6);
        assert_eq!(svg.matches(r#"<text class="category""#).count(), 3);
        assert_eq!(svg.matches(r#"<text class="legend""#).count(), 2);
        assert!(svg.contains(r#"width="900" height="600""#));
        assert!(svg.contains(">Total Race Wins</text>"));
    }

    #[test]
    fn empty_chart_keeps_its_frame() {
        let mut c = chart(&[]);
        c.add_series("Points", vec![]).unwrap();
        let svg = render_bar_chart(&c);
        assert_eq!(svg.matches(r#"<rect class="bar""#).count(), 0);
        assert!(svg.contains(">Constructors</text>"));
        assert!(svg.contains(">Position</text>"));
        assert!(svg.contains(">Points</text>"));
    }

    #[test]
    fn labels_are_escaped() {
        let mut c = chart(&["Brabham & <BT46>"]);
        c.add_series("Points", vec![3.0]).unwrap();
        let svg = render_bar_chart(&c);
        assert!(svg.contains("Brabham &amp; &lt;BT46&gt;"));
        assert!(!svg.contains("<BT46>"));
    }

    #[test]
    fn axis_rounds_up_to_a_round_step() {
        assert_eq!(axis_scale(400.0), (400.0, 100.0));
        assert_eq!(axis_scale(437.0), (500.0, 100.0));
        assert_eq!(axis_scale(7.0), (8.0, 2.0));
        assert_eq!(axis_scale(0.0), (5.0, 1.0));
    }
}
