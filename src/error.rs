use thiserror::Error;

/// Error kinds surfaced by acquisition, tracking, and sample I/O.
#[derive(Debug, Error)]
pub enum Error {
    #[error("insufficient samples: requested {requested}, available {available}")]
    InsufficientSamples { requested: usize, available: usize },

    #[error("invalid satellite id {0}: must be in 1..=32")]
    InvalidSatelliteId(u8),

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("sample source I/O error: {0}")]
    SampleIo(String),
}

pub type Result<T> = std::result::Result<T, Error>;
