/// Errors raised at the edges of the crate: configuration I/O and input validation.
///
/// The astronomical core itself is infallible for valid dates.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid date: {year}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },

    #[error("Invalid location: latitude {latitude}, longitude {longitude}")]
    InvalidLocation { latitude: f64, longitude: f64 },

    #[error("Invalid time: {0:?}")]
    InvalidTime(String),
}

pub type Result<T> = std::result::Result<T, Error>;
