use crate::error::ReportError;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// A complete report: an optional title followed by ordered sections.
///
/// This struct is the final output of the builders and the only input a
/// renderer needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportModel {
    pub title: Option<String>,
    pub sections: Vec<Section>,
}

/// One heading with the tables and charts shown under it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub heading: String,
    pub summary: Vec<String>,
    pub tables: Vec<Table>,
    pub charts: Vec<Chart>,
}

/// A named table: a header row and body rows of the same width.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

/// A typed table cell. `Empty` stands for a missing value, e.g. an
/// unclassified position.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Cell {
    Text(String),
    Integer(i64),
    Float(f64),
    Date(NaiveDate),
    Empty,
}

/// Pixel size a renderer should draw a chart at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChartSize {
    pub width: u32,
    pub height: u32,
}

impl ChartSize {
    /// Charts next to a season's standings.
    pub const STANDINGS: ChartSize = ChartSize { width: 900, height: 600 };
    /// Charts over the whole history, which carry many more categories.
    pub const ALL_YEARS: ChartSize = ChartSize { width: 1300, height: 800 };
}

/// A bar chart. `x_labels[i]` is the category of `values[i]` in every series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub name: String,
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub size: ChartSize,
    pub x_labels: Vec<String>,
    pub series: Vec<Series>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
}

impl ReportModel {
    /// The report of "nothing selected": no title, no sections.
    pub fn empty() -> Self {
        Self {
            title: None,
            sections: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.sections.is_empty()
    }

    /// Every table of the report, in display order.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.sections.iter().flat_map(|s| s.tables.iter())
    }

    /// Every chart of the report, in display order.
    pub fn charts(&self) -> impl Iterator<Item = &Chart> {
        self.sections.iter().flat_map(|s| s.charts.iter())
    }

    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables().find(|t| t.name == name)
    }

    pub fn chart(&self, name: &str) -> Option<&Chart> {
        self.charts().find(|c| c.name == name)
    }

    /// Re-checks the alignment of every chart and the width of every row.
    pub fn validate(&self) -> Result<(), ReportError> {
        for table in self.tables() {
            table.check_rows()?;
        }
        for chart in self.charts() {
            chart.check_alignment()?;
        }
        Ok(())
    }
}

impl Section {
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            summary: Vec::new(),
            tables: Vec::new(),
            charts: Vec::new(),
        }
    }
}

impl Table {
    pub fn new(name: impl Into<String>, columns: &[&str]) -> Self {
        Self {
            name: name.into(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Appends a body row; its width must match the header.
    pub fn push_row(&mut self, row: Vec<Cell>) -> Result<(), ReportError> {
        if row.len() != self.columns.len() {
            return Err(ReportError::RowWidth {
                table: self.name.clone(),
                expected: self.columns.len(),
                actual: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn check_rows(&self) -> Result<(), ReportError> {
        match self.rows.iter().find(|r| r.len() != self.columns.len()) {
            Some(row) => Err(ReportError::RowWidth {
                table: self.name.clone(),
                expected: self.columns.len(),
                actual: row.len(),
            }),
            None => Ok(()),
        }
    }
}

impl Chart {
    pub fn new(
        name: impl Into<String>,
        title: impl Into<String>,
        x_title: impl Into<String>,
        y_title: impl Into<String>,
        size: ChartSize,
        x_labels: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            x_title: x_title.into(),
            y_title: y_title.into(),
            size,
            x_labels,
            series: Vec::new(),
        }
    }

    /// Attaches a series. Fails if it does not have one value per category.
    pub fn add_series(
        &mut self,
        name: impl Into<String>,
        values: Vec<f64>,
    ) -> Result<(), ReportError> {
        let name = name.into();
        if values.len() != self.x_labels.len() {
            return Err(ReportError::SeriesMisaligned {
                chart: self.name.clone(),
                series: name,
                labels: self.x_labels.len(),
                values: values.len(),
            });
        }
        self.series.push(Series { name, values });
        Ok(())
    }

    pub fn check_alignment(&self) -> Result<(), ReportError> {
        match self.series.iter().find(|s| s.values.len() != self.x_labels.len()) {
            Some(series) => Err(ReportError::SeriesMisaligned {
                chart: self.name.clone(),
                series: series.name.clone(),
                labels: self.x_labels.len(),
                values: series.values.len(),
            }),
            None => Ok(()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.x_labels.is_empty()
    }

    /// Largest value over all series, or 0 for an empty chart.
    pub fn max_value(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .fold(0.0, f64::max)
    }
}

// --- Cell conversions ---

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Integer(value)
    }
}

impl From<i32> for Cell {
    fn from(value: i32) -> Self {
        Cell::Integer(i64::from(value))
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Float(value)
    }
}

impl From<NaiveDate> for Cell {
    fn from(value: NaiveDate) -> Self {
        Cell::Date(value)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map_or(Cell::Empty, Into::into)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => f.write_str(s),
            Cell::Integer(n) => write!(f, "{}", n),
            Cell::Float(v) => f.write_str(&format_number(*v)),
            Cell::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Cell::Empty => Ok(()),
        }
    }
}

/// Formats points and counts without a trailing `.0` for whole numbers.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}
