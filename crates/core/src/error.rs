use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("invalid {field}: {value} (expected an http:// or https:// URL)")]
    InvalidUrl { field: &'static str, value: String },

    #[error("invalid route {0}: routes start with '/'")]
    InvalidRoute(String),

    #[error("request timeout must be at least one second")]
    InvalidTimeout,
}
