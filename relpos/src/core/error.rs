//! Error types for a relative-position run.

use std::path::PathBuf;

use crate::core::domain::CameraRole;

/// Result type for relpos operations
pub type Result<T> = std::result::Result<T, RelposError>;

/// Fatal conditions of a run.
///
/// An empty match set and a report file that cannot be created are outcomes,
/// not errors; see [`crate::pipeline::RunOutcome`].
#[derive(Debug, thiserror::Error)]
pub enum RelposError {
    #[error("Usage error: {0}")]
    Usage(String),

    #[error("Cannot resolve file <{}>: {reason}", .path.display())]
    SourceUnreadable { path: PathBuf, reason: String },

    #[error("Malformed line: {0}")]
    MalformedLine(String),

    #[error("Malformed image label <{label}>: {reason}")]
    MalformedLabel { label: String, reason: String },

    #[error("{0} data is unavailable")]
    RoleIncomplete(CameraRole),

    #[error("Both <{first}> and <{second}> are {role} cameras")]
    RoleConflict {
        role: CameraRole,
        first: String,
        second: String,
    },

    #[error("Time range do not match: {0}")]
    TemporalInconsistency(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RelposError {
    /// Process exit code for this error class.
    ///
    /// # Examples
    ///
    /// ```
    /// use relpos::core::error::RelposError;
    ///
    /// let err = RelposError::TemporalInconsistency("dates differ".to_string());
    /// assert_eq!(err.exit_code(), 4);
    /// ```
    pub fn exit_code(&self) -> u8 {
        match self {
            RelposError::Usage(_) | RelposError::Configuration(_) => 1,
            RelposError::SourceUnreadable { .. }
            | RelposError::MalformedLine(_)
            | RelposError::MalformedLabel { .. }
            | RelposError::Io(_) => 2,
            RelposError::RoleIncomplete(_) | RelposError::RoleConflict { .. } => 3,
            RelposError::TemporalInconsistency(_) => 4,
        }
    }

    pub(crate) fn malformed_label(label: &str, reason: impl Into<String>) -> Self {
        RelposError::MalformedLabel {
            label: label.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_follow_severity_order() {
        assert_eq!(RelposError::Usage("missing paths".into()).exit_code(), 1);
        assert_eq!(
            RelposError::SourceUnreadable {
                path: PathBuf::from("a.txt"),
                reason: "no records".into(),
            }
            .exit_code(),
            2
        );
        assert_eq!(RelposError::RoleIncomplete(CameraRole::Follower).exit_code(), 3);
        assert_eq!(
            RelposError::RoleConflict {
                role: CameraRole::Reference,
                first: "005".into(),
                second: "010".into(),
            }
            .exit_code(),
            3
        );
    }

    #[test]
    fn test_messages() {
        let err = RelposError::RoleIncomplete(CameraRole::Reference);
        assert_eq!(err.to_string(), "FFoV data is unavailable");

        let err = RelposError::SourceUnreadable {
            path: PathBuf::from("/tmp/jfov.txt"),
            reason: "no records".into(),
        };
        assert_eq!(err.to_string(), "Cannot resolve file </tmp/jfov.txt>: no records");
    }
}
