//! Error type shared by the simulator crates.

use crate::distance::Distance;

/// Error type for simulator input validation and replay control.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimError {
    /// A matrix row does not have as many columns as there are rows.
    #[error("matrix must be square: row {row} has {len} columns, expected {expected}")]
    InvalidShape {
        /// Index of the offending row.
        row: usize,
        /// Number of columns found in that row.
        len: usize,
        /// Number of rows in the matrix.
        expected: usize,
    },

    /// The vertex count lies outside the accepted bounds.
    #[error("matrix size {size} is outside the supported range {min}..={max}")]
    InvalidSize {
        /// Vertex count of the rejected matrix.
        size: usize,
        /// Smallest accepted vertex count.
        min: usize,
        /// Largest accepted vertex count.
        max: usize,
    },

    /// A diagonal entry is not zero.
    #[error("diagonal elements must be 0 (element [{index}][{index}] is {value})")]
    InvalidDiagonal {
        /// Vertex whose self-distance is non-zero.
        index: usize,
        /// The offending value.
        value: Distance,
    },

    /// An input matrix could not be read.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// A paced replay was cancelled by the driver.
    #[error("replay cancelled")]
    Cancelled,
}

impl SimError {
    /// Whether the error rejects an input matrix.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidShape { .. }
                | Self::InvalidSize { .. }
                | Self::InvalidDiagonal { .. }
                | Self::InvalidInput(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sim_error_display() {
        let err = SimError::InvalidShape {
            row: 2,
            len: 4,
            expected: 3,
        };
        assert_eq!(
            err.to_string(),
            "matrix must be square: row 2 has 4 columns, expected 3"
        );

        let err = SimError::InvalidDiagonal {
            index: 1,
            value: Distance::new(7),
        };
        assert_eq!(
            err.to_string(),
            "diagonal elements must be 0 (element [1][1] is 7)"
        );

        let err = SimError::Cancelled;
        assert_eq!(err.to_string(), "replay cancelled");
    }

    #[test]
    fn input_errors_are_classified() {
        assert!(SimError::InvalidSize {
            size: 0,
            min: 1,
            max: 10
        }
        .is_input_error());
        assert!(SimError::InvalidInput("expected an array".into()).is_input_error());
        assert!(!SimError::Config("workers".into()).is_input_error());
        assert!(!SimError::Cancelled.is_input_error());
    }
}
