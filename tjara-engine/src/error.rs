use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("geolocation database error: {0}")]
    Geo(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
