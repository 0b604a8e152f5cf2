//! Error handling for the polynomial engine

#[cfg(feature = "alloc")]
use alloc::borrow::Cow;

/// The error type for polynomial operations
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(thiserror::Error))]
pub enum Error {
    /// Parameter validation error
    #[cfg_attr(feature = "std", error("Invalid parameter '{name}': {reason}"))]
    Parameter {
        /// Name of the invalid parameter
        #[cfg(feature = "alloc")]
        name: Cow<'static, str>,
        /// Name of the invalid parameter
        #[cfg(not(feature = "alloc"))]
        name: &'static str,
        /// Reason why the parameter is invalid
        reason: &'static str,
    },

    /// Length validation error
    #[cfg_attr(
        feature = "std",
        error("Invalid length for {context}: expected {expected}, got {actual}")
    )]
    Length {
        /// Context where the length error occurred
        context: &'static str,
        /// Expected number of elements
        expected: usize,
        /// Actual number of elements
        actual: usize,
    },
}

impl Error {
    /// Shorthand to create a Parameter error
    #[cfg(feature = "alloc")]
    pub fn param<N: Into<Cow<'static, str>>>(name: N, reason: &'static str) -> Self {
        Error::Parameter {
            name: name.into(),
            reason,
        }
    }

    /// Shorthand to create a Parameter error
    #[cfg(not(feature = "alloc"))]
    pub fn param(name: &'static str, reason: &'static str) -> Self {
        Error::Parameter { name, reason }
    }
}

#[cfg(not(feature = "std"))]
impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Parameter { name, reason } => {
                write!(f, "Invalid parameter '{}': {}", name, reason)
            }
            Error::Length {
                context,
                expected,
                actual,
            } => write!(
                f,
                "Invalid length for {}: expected {}, got {}",
                context, expected, actual
            ),
        }
    }
}

/// Result type for polynomial operations
pub type Result<T> = core::result::Result<T, Error>;

pub mod validate;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_error_display() {
        let err = Error::Length {
            context: "polynomial",
            expected: 256,
            actual: 255,
        };
        assert_eq!(
            err.to_string(),
            "Invalid length for polynomial: expected 256, got 255"
        );
    }

    #[test]
    fn test_param_helper() {
        let err = Error::param("coefficient", "out of range");
        match err {
            Error::Parameter { name, reason } => {
                assert_eq!(name, "coefficient");
                assert_eq!(reason, "out of range");
            }
            _ => panic!("Expected Parameter error"),
        }
    }
}
