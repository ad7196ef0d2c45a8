//! Error conventions used across the workspace.
//!
//! [`HubError`] is the only error type that crosses component boundaries.
//! Each variant is typed; callers can distinguish an unknown category from a
//! known-but-pending one, and a timed-out scan from a failed one.

use std::time::Duration;

use crate::category::HandlerCategory;

/// Top-level error for factory and discovery operations.
#[derive(Debug, thiserror::Error)]
pub enum HubError {
    /// The category tag is outside every supported set.
    #[error("unsupported thing category '{0}'")]
    UnsupportedCategory(String),

    /// The category is known but its handler construction is still pending.
    #[error("handler for category '{0}' is not implemented yet")]
    NotImplemented(HandlerCategory),

    /// A discovery scan exceeded its wall-clock budget.
    #[error("discovery scan exceeded its budget of {}s", budget.as_secs())]
    ScanTimeout {
        /// The budget that was exceeded.
        budget: Duration,
    },

    /// The opaque handler configuration could not be deserialized.
    #[error("invalid handler configuration")]
    Configuration(#[from] serde_json::Error),

    /// A domain invariant failed.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// The device directory could not produce a snapshot.
    #[error("device directory unavailable")]
    Directory(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl HubError {
    /// Wrap a directory-side failure for propagation across the port
    /// boundary.
    pub fn directory(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Directory(Box::new(err))
    }
}

/// Domain invariant violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A display name was empty.
    #[error("name must not be empty")]
    EmptyName,

    /// A bridge-reported identifier was empty.
    #[error("identifier must not be empty")]
    EmptyIdentifier,

    /// An actuator's product unique index was empty.
    #[error("unique index must not be empty")]
    EmptyUniqueIndex,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_unsupported_category_with_tag() {
        let err = HubError::UnsupportedCategory("heating".to_string());
        assert_eq!(err.to_string(), "unsupported thing category 'heating'");
    }

    #[test]
    fn should_display_not_implemented_with_category() {
        let err = HubError::NotImplemented(HandlerCategory::Scene);
        assert_eq!(
            err.to_string(),
            "handler for category 'scene' is not implemented yet"
        );
    }

    #[test]
    fn should_display_scan_timeout_in_seconds() {
        let err = HubError::ScanTimeout {
            budget: Duration::from_secs(300),
        };
        assert_eq!(err.to_string(), "discovery scan exceeded its budget of 300s");
    }

    #[test]
    fn should_convert_validation_error() {
        let err: HubError = ValidationError::EmptyName.into();
        assert!(matches!(
            err,
            HubError::Validation(ValidationError::EmptyName)
        ));
    }

    #[test]
    fn should_expose_directory_source() {
        let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "gateway gone");
        let err = HubError::directory(io);
        assert!(std::error::Error::source(&err).is_some());
    }
}
