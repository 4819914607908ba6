//! Error types.

use thiserror::Error;

/// Failures surfaced by [`crate::resize`] and the separable passes.
#[derive(Debug, Error)]
pub enum ResizeError {
    #[error("Invalid target dimensions {width}x{height}: both must be non-zero")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Failed to allocate {bytes} bytes for {what}")]
    Allocation { what: &'static str, bytes: usize },

    #[error("Expected {expected} {what} values, got {actual}")]
    ChannelLength {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Failed to read pixel span {width}x{height} at ({x}, {y}): {reason}")]
    PixelCache {
        x: isize,
        y: isize,
        width: usize,
        height: usize,
        reason: String,
    },

    #[error("Resize cancelled after {offset} of {span} lines")]
    Cancelled { offset: u64, span: u64 },

    #[error(transparent)]
    Option(#[from] OptionError),
}

/// Malformed `filter:*` option values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptionError {
    #[error("Option '{key}' expects a number, got '{value}'")]
    InvalidNumber { key: String, value: String },

    #[error("Unknown filter name '{name}'")]
    UnknownFilter { name: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let e = ResizeError::InvalidDimensions { width: 0, height: 5 };
        assert_eq!(
            e.to_string(),
            "Invalid target dimensions 0x5: both must be non-zero"
        );
        let e = ResizeError::Cancelled { offset: 3, span: 10 };
        assert_eq!(e.to_string(), "Resize cancelled after 3 of 10 lines");
    }

    #[test]
    fn test_option_error_is_transparent() {
        let inner = OptionError::InvalidNumber {
            key: "filter:blur".to_string(),
            value: "soft".to_string(),
        };
        let e: ResizeError = inner.clone().into();
        assert_eq!(e.to_string(), inner.to_string());
    }
}
