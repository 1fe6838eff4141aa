use crate::platform::KnownLocation;

/// Failure to resolve a well-known system location.
///
/// Discovery has no fallback for its platform-level inputs: problems with
/// individual candidate directories are swallowed, but a well-known location
/// that cannot be resolved at all is fatal to the query that needs it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot resolve {location}: {reason}")]
pub struct ResolveError {
    /// The location that failed to resolve.
    pub location: KnownLocation,
    /// Human-readable cause.
    pub reason: String,
}

impl ResolveError {
    pub fn new(location: KnownLocation, reason: impl Into<String>) -> Self {
        Self {
            location,
            reason: reason.into(),
        }
    }
}
