//! Error type shared by the in-memory core (catalog, rating control and
//! place validation). Persistence and UI code keep using `anyhow`, so these
//! errors convert transparently through `?`.

use thiserror::Error;

/// Local, synchronous failures raised by the core. Neither variant is worth
/// retrying: the caller passed something it should have validated first.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An argument that does not name any valid value, e.g. an unknown sort
    /// key or an empty place name.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A numeric argument outside its inclusive bounds.
    #[error("{value} is out of range ({min}..={max})")]
    OutOfRange { value: u32, min: u32, max: u32 },
}

/// Result alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;
