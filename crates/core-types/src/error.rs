use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid season selector: {0}")]
    InvalidSelector(i32),
}
