use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    #[error("Chart '{chart}': series '{series}' has {values} values for {labels} categories")]
    SeriesMisaligned {
        chart: String,
        series: String,
        labels: usize,
        values: usize,
    },

    #[error("Table '{table}': row has {actual} cells but the header has {expected} columns")]
    RowWidth {
        table: String,
        expected: usize,
        actual: usize,
    },
}
