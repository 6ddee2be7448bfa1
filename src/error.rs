//! Error types.
//!
//! Routing and layout never fail; unknown panel names degrade to no-ops and
//! fractions clamp. Errors only arise at the edges: reading configuration
//! and parsing key bindings.

use thiserror::Error;

/// Result type alias for fallible trellis operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while configuring trellis.
#[derive(Debug, Error)]
pub enum Error {
    /// IO errors while reading a configuration file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed TOML configuration.
    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// A key binding that does not parse (e.g. `hyper+q`).
    #[error("Invalid key binding: {0:?}")]
    KeyBinding(String),
}
