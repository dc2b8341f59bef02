use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    #[error("invalid viewport {width}x{height}: dimensions must be finite and non-negative")]
    InvalidViewport { width: f64, height: f64 },
    #[error("unknown theme {0:?}, expected \"light\" or \"dark\"")]
    UnknownTheme(String),
}
