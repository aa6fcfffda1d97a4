use thiserror::Error;

#[derive(Error, Debug)]
pub enum AggregatorError {
    #[error("Database error: {0}")]
    Database(#[from] database::DbError),

    #[error("{0}")]
    InvalidSelector(#[from] core_types::CoreError),
}
