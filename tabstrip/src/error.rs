//! Error types for strip operations.

use thiserror::Error;

/// Errors returned by fallible [`crate::TabStrip`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StripError {
    /// An index-based operation referenced an item outside the current range.
    #[error("index {index} is out of range 0..{count}")]
    IndexOutOfBounds {
        /// The offending index.
        index: usize,
        /// The item count at the time of the call.
        count: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = StripError::IndexOutOfBounds { index: 5, count: 3 };
        assert_eq!(err.to_string(), "index 5 is out of range 0..3");
    }
}
