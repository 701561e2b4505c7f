use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid easing curve {name}: {reason}")]
    InvalidEasing { name: String, reason: String },

    #[error("Invalid duration {name}: {value}s")]
    InvalidDuration { name: String, value: f64 },

    #[error("Invalid stagger interval {name}: {value}s")]
    InvalidStagger { name: String, value: f64 },

    #[error("Invalid viewport trigger {name}: visible fraction {value} not in (0, 1]")]
    InvalidViewport { name: String, value: f64 },

    #[error("Variant {variant} is missing state {state}")]
    MissingState { variant: String, state: String },

    #[error("Variant {variant} animates {property} in one terminal state only")]
    AsymmetricVariant { variant: String, property: String },

    #[error("Unknown name: {0}")]
    UnknownName(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;
