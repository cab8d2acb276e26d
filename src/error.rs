use thiserror::Error;

pub type Result<T> = std::result::Result<T, RatError>;

#[derive(Debug, Error)]
pub enum RatError {
    #[error("invalid function: {0}")]
    InvalidFunction(String),
    #[error("degenerate evaluation at x = {x}")]
    DegenerateEvaluation { x: String },
    #[error("parse error: {0}")]
    Parse(String),
    #[error("config error: {0}")]
    Config(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
