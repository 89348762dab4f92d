use thiserror::Error;

pub type AnnotResult<T> = Result<T, AnnotError>;

#[derive(Debug, Error)]
pub enum AnnotError {
    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("drawing kind {kind} requires {expected} anchor points, got {actual}")]
    InvalidPointCount {
        kind: &'static str,
        expected: usize,
        actual: usize,
    },
}
