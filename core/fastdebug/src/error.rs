//! Error types raised while building an inspection report.
//!
//! None of these ever reach the program being debugged: the entry point in
//! [`crate::inspector`] logs them and turns the call into a no-op.

use std::{fmt, io};
use thiserror::Error;

/// Result type for inspection operations.
pub type InspectResult<T> = Result<T, InspectError>;

/// The call-site source texts could not be matched to the evaluated values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    /// The number of captured source texts differs from the number of values.
    #[error("captured {sources} source expressions for {values} values")]
    ArityMismatch {
        /// Number of captured source texts.
        sources: usize,
        /// Number of evaluated values.
        values: usize,
    },

    /// An argument was captured with no source text at all.
    #[error("argument {index} has no source text")]
    EmptySource {
        /// Position of the offending argument.
        index: usize,
    },
}

/// Any failure while inspecting one call.
#[derive(Debug, Error)]
pub enum InspectError {
    /// Source texts could not be paired with values.
    #[error("cannot resolve the call site: {0}")]
    Resolution(#[from] ResolutionError),

    /// A value does not belong to any rendering category.
    #[error("unsupported type `{type_name}`")]
    UnsupportedType {
        /// Name of the offending type.
        type_name: &'static str,
    },

    /// Classification or rendering panicked.
    #[error("inspection panicked: {0}")]
    Panicked(String),

    /// The current time could not be formatted.
    #[error("cannot format timestamp: {0}")]
    Timestamp(#[from] time::error::Format),

    /// Assembling the report failed.
    #[error(transparent)]
    Fmt(#[from] fmt::Error),

    /// Writing the report failed.
    #[error("cannot write report: {0}")]
    Io(#[from] io::Error),
}

impl InspectError {
    /// Builds an [`InspectError::Panicked`] from a caught panic payload.
    pub(crate) fn from_panic(payload: &(dyn std::any::Any + Send)) -> Self {
        let message = payload
            .downcast_ref::<&str>()
            .map(ToString::to_string)
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "<non-string panic payload>".to_string());
        Self::Panicked(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_messages() {
        let err = ResolutionError::ArityMismatch {
            sources: 1,
            values: 2,
        };
        assert_eq!(err.to_string(), "captured 1 source expressions for 2 values");

        let err = InspectError::from(ResolutionError::EmptySource { index: 3 });
        assert_eq!(
            err.to_string(),
            "cannot resolve the call site: argument 3 has no source text"
        );
    }

    #[test]
    fn panic_payloads() {
        let payload: Box<dyn std::any::Any + Send> = Box::new("boom");
        assert!(matches!(
            InspectError::from_panic(payload.as_ref()),
            InspectError::Panicked(message) if message == "boom"
        ));

        let payload: Box<dyn std::any::Any + Send> = Box::new(String::from("owned"));
        assert!(matches!(
            InspectError::from_panic(payload.as_ref()),
            InspectError::Panicked(message) if message == "owned"
        ));

        let payload: Box<dyn std::any::Any + Send> = Box::new(7_u8);
        assert!(matches!(
            InspectError::from_panic(payload.as_ref()),
            InspectError::Panicked(message) if message.contains("non-string")
        ));
    }
}
