// =============================================================================
// Engine error taxonomy
// =============================================================================
//
// Only two classes of failure ever reach a caller: malformed input bars and an
// unusable configuration.  Degenerate divisions (zero volume, flat range, no
// losses) are normal market conditions and are mapped to `None` at the point
// where they occur instead of being surfaced here.

use chrono::NaiveDate;
use thiserror::Error;

/// Top-level error returned by [`crate::engine::compute`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Price field of a [`crate::types::Bar`], used to point at the offending value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceField {
    Open,
    High,
    Low,
    Close,
}

impl std::fmt::Display for PriceField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::High => write!(f, "high"),
            Self::Low => write!(f, "low"),
            Self::Close => write!(f, "close"),
        }
    }
}

/// Problems with the bar series itself.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("series is empty")]
    EmptySeries,

    #[error("timestamp at row {index} ({current}) does not follow {previous}")]
    NonIncreasingTimestamp {
        index: usize,
        previous: NaiveDate,
        current: NaiveDate,
    },

    #[error("{field} at row {index} is not finite")]
    NonFinitePrice { index: usize, field: PriceField },

    #[error("{field} at row {index} must be positive, got {value}")]
    NonPositivePrice {
        index: usize,
        field: PriceField,
        value: f64,
    },
}

/// Problems with the requested indicator parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{param} must be a positive integer")]
    NonPositiveWindow { param: String },

    #[error("bollinger multiplier must be positive and finite, got {value}")]
    InvalidMultiplier { value: f64 },

    #[error("{param} = {window} is too short (minimum {min})")]
    WindowTooShort {
        param: String,
        window: usize,
        min: usize,
    },

    /// Every row of the column would be undefined.
    #[error("{param} needs {required} bars but the series has {available}")]
    InsufficientHistory {
        param: String,
        required: usize,
        available: usize,
    },
}

impl ConfigError {
    pub fn non_positive(param: impl Into<String>) -> Self {
        Self::NonPositiveWindow {
            param: param.into(),
        }
    }

    pub fn insufficient(param: impl Into<String>, required: usize, available: usize) -> Self {
        Self::InsufficientHistory {
            param: param.into(),
            required,
            available,
        }
    }
}
