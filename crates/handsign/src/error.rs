//! Error type returned by fallible library operations.

use std::fmt;

use crate::landmark::NUM_LANDMARKS;

/// Errors reported by `handsign`.
///
/// Tools built on top of the library generally wrap these in [`anyhow::Error`].
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A hand landmark set did not contain exactly [`NUM_LANDMARKS`] keypoints.
    ///
    /// This is a precondition violation of the caller. Only the affected hand should be skipped.
    InvalidLandmarkCount { count: usize },
    /// A configuration referred to a gesture rule that does not exist.
    UnknownRule(String),
    /// A configuration value is out of its permitted range.
    InvalidConfig(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidLandmarkCount { count } => write!(
                f,
                "invalid landmark count: expected {NUM_LANDMARKS} hand landmarks, got {count}"
            ),
            Error::UnknownRule(name) => write!(f, "unknown gesture rule `{name}`"),
            Error::InvalidConfig(msg) => write!(f, "invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(
            Error::InvalidLandmarkCount { count: 20 }.to_string(),
            "invalid landmark count: expected 21 hand landmarks, got 20"
        );
        assert_eq!(
            Error::UnknownRule("wave".into()).to_string(),
            "unknown gesture rule `wave`"
        );
    }

    #[test]
    fn converts_to_anyhow() {
        let err: anyhow::Error = Error::InvalidLandmarkCount { count: 0 }.into();
        assert_eq!(
            err.downcast_ref::<Error>(),
            Some(&Error::InvalidLandmarkCount { count: 0 })
        );
    }
}
