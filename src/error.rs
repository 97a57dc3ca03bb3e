use thiserror::Error;

pub type TraceViewResult<T> = Result<T, TraceViewError>;

#[derive(Debug, Error)]
pub enum TraceViewError {
    #[error("invalid view range: start={start}, end={end}")]
    InvalidRange { start: f64, end: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("unknown representation `{0}`")]
    UnknownRepresentation(String),

    #[error("representation `{key}` failed: {reason}")]
    TransformFailed { key: String, reason: String },

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
