use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Invalid database connection settings: {0}")]
    ConnectionConfigError(String),

    #[error("The results store at '{url}' could not be opened: {source}")]
    StoreUnavailable {
        url: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("A query against the results store failed: {0}")]
    QueryError(#[from] sqlx::Error),
}
