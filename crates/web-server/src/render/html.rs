use super::escape;
use super::svg::render_bar_chart;
use report::{ReportModel, Section, Table};

const HTMX_SCRIPT: &str = "https://unpkg.com/htmx.org@2.0.4";
const PURE_CSS: &str = "https://cdn.jsdelivr.net/npm/purecss@3.0.0/build/pure-min.css";
const PURE_CSS_INTEGRITY: &str =
    "sha384-X38yfunGUhNzHpBaEBsWLO+A0HDYOQi8ufWDkZ0k9e0eXz/tH3II7uKZ9msv++Ls";
const INDICATOR_CSS: &str = ".my-indicator{display:none;} \
.htmx-request .my-indicator{display:inline;} \
.htmx-request.my-indicator{display:inline;}";

/// The page shell: a season picker that loads the selected season's report
/// into `#content` without a page reload.
///
/// `seasons` is rendered in the order given; the caller passes them newest
/// first. The leading empty option carries year `0`, which the season
/// endpoint answers with an empty body.
pub fn render_page(seasons: &[i32]) -> String {
    let options: String = seasons
        .iter()
        .map(|year| format!(r#"<option value="{year}">{year}</option>"#))
        .collect();

    format!(
        r##"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>F1 Stats</title>
<script src="{HTMX_SCRIPT}"></script>
<link rel="stylesheet" href="{PURE_CSS}" integrity="{PURE_CSS_INTEGRITY}" crossorigin="anonymous">
<style>{INDICATOR_CSS}</style>
</head>
<body style="padding: 20px">
<h1>F1 Stats</h1>
<h3>Select season</h3>
<div id="seasons">
<select name="year" style="width: 100px" hx-get="/api/season" hx-trigger="change" hx-target="#content" hx-indicator="#spinner">
<option value="0"></option>{options}
</select>
</div>
<hr>
<img id="spinner" class="my-indicator" src="static/img/clock.svg" alt="loading">
<div id="content"></div>
</body>
</html>
"##
    )
}

/// Renders a report as an HTML fragment. The empty report renders as nothing.
pub fn render_report(report: &ReportModel) -> String {
    if report.is_empty() {
        return String::new();
    }

    let mut out = String::new();
    if let Some(title) = &report.title {
        out.push_str(&format!("<h2>{}</h2>\n", escape(title)));
    }
    for section in &report.sections {
        out.push_str(&render_section(section));
    }
    out
}

fn render_section(section: &Section) -> String {
    let mut out = format!("<h3>{}</h3>\n", escape(&section.heading));
    for line in &section.summary {
        out.push_str(&format!("<p>{}</p>\n", escape(line)));
    }

    // Tables on the left, their charts on the right.
    let tables: String = section.tables.iter().map(render_table).collect();
    let charts: String = section
        .charts
        .iter()
        .map(|chart| format!("<div class=\"chart\">{}</div>\n", render_bar_chart(chart)))
        .collect();

    if charts.is_empty() {
        out.push_str(&tables);
    } else {
        out.push_str(&format!(
            "<table>\n<tr>\n<td style=\"vertical-align: top\">\n{}</td>\n<td style=\"vertical-align: top\">\n{}</td>\n</tr>\n</table>\n",
            tables, charts
        ));
    }
    out
}

fn render_table(table: &Table) -> String {
    let header: String = table
        .columns
        .iter()
        .map(|c| format!("<th>{}</th>", escape(c)))
        .collect();

    let body: String = table
        .rows
        .iter()
        .map(|row| {
            let cells: String = row
                .iter()
                .map(|cell| format!("<td>{}</td>", escape(&cell.to_string())))
                .collect();
            format!("<tr>{}</tr>\n", cells)
        })
        .collect();

    format!(
        "<table class=\"pure-table pure-table-bordered\" data-name=\"{}\">\n<thead>\n<tr>{}</tr>\n</thead>\n<tbody>\n{}</tbody>\n</table>\n",
        escape(&table.name),
        header,
        body
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use report::{Cell, Chart, ChartSize};

    fn sample_report() -> ReportModel {
        let mut table = Table::new("drivers", &["Pos", "Driver"]);
        table
            .push_row(vec![Cell::from(1), Cell::from("Kimi <Iceman>")])
            .unwrap();
        table.push_row(vec![Cell::Empty, Cell::from("B & C")]).unwrap();

        let mut chart = Chart::new(
            "points",
            "Drivers",
            "Position",
            "Points",
            ChartSize::STANDINGS,
            vec!["Kimi".to_string()],
        );
        chart.add_series("Points", vec![10.0]).unwrap();

        let mut section = Section::new("Drivers Standing 2007");
        section.summary.push("Number of races: 17".to_string());
        section.tables.push(table);
        section.charts.push(chart);

        ReportModel {
            title: Some("Season".to_string()),
            sections: vec![section],
        }
    }

    #[test]
    fn page_lists_seasons_in_given_order() {
        let page = render_page(&[2024, 2023, 1950]);
        let a = page.find(r#"<option value="2024">"#).unwrap();
        let b = page.find(r#"<option value="2023">"#).unwrap();
        let c = page.find(r#"<option value="1950">"#).unwrap();
        assert!(a < b && b < c);
        assert!(page.contains(r#"<option value="0"></option>"#));
        assert!(page.contains(r#"hx-get="/api/season""#));
        assert!(page.contains(r##"hx-target="#content""##));
        assert!(page.contains(r#"<div id="content"></div>"#));
    }

    #[test]
    fn empty_report_renders_nothing() {
        assert_eq!(render_report(&ReportModel::empty()), "");
    }

    #[test]
    fn report_text_is_escaped() {
        let html = render_report(&sample_report());
        assert!(html.contains("<h2>Season</h2>"));
        assert!(html.contains("<h3>Drivers Standing 2007</h3>"));
        assert!(html.contains("<p>Number of races: 17</p>"));
        assert!(html.contains("<td>Kimi &lt;Iceman&gt;</td>"));
        assert!(html.contains("<td>B &amp; C</td>"));
        assert!(!html.contains("<Iceman>"));
    }

    #[test]
    fn tables_use_pure_classes_and_charts_are_inline() {
        let html = render_report(&sample_report());
        assert!(html.contains(r#"class="pure-table pure-table-bordered""#));
        assert!(html.contains("<th>Pos</th><th>Driver</th>"));
        assert!(html.contains("<svg"));
        // Missing positions render as empty cells.
        assert!(html.contains("<tr><td></td><td>B &amp; C</td></tr>"));
    }
}
