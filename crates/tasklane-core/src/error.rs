use std::fmt;

use crate::model::task::ParseStatusError;

/// Machine-readable error codes for agent-friendly decision making.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    NotInitialized,
    ConfigParseError,
    TaskNotFound,
    ProjectNotFound,
    InvalidEnumValue,
    RankSpaceExhausted,
    StoreFailure,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::NotInitialized => "E1001",
            Self::ConfigParseError => "E1002",
            Self::TaskNotFound => "E2001",
            Self::ProjectNotFound => "E2002",
            Self::InvalidEnumValue => "E2005",
            Self::RankSpaceExhausted => "E3001",
            Self::StoreFailure => "E5001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::NotInitialized => "Project not initialized",
            Self::ConfigParseError => "Config file parse error",
            Self::TaskNotFound => "Task not found",
            Self::ProjectNotFound => "Project not found",
            Self::InvalidEnumValue => "Invalid status value",
            Self::RankSpaceExhausted => "No rank left between neighbors",
            Self::StoreFailure => "Store operation failed",
        }
    }

    /// Optional remediation hint that can be surfaced to operators and agents.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::NotInitialized => Some("Run `tl init` to initialize this directory."),
            Self::ConfigParseError => Some("Fix syntax in .tasklane/config.toml and retry."),
            Self::TaskNotFound | Self::ProjectNotFound => None,
            Self::InvalidEnumValue => Some("Use one of: todo, in_progress, done."),
            Self::RankSpaceExhausted => {
                Some("Move the task to a different offset; the gap at this one is used up.")
            }
            Self::StoreFailure => Some("Retry once. The database may be locked by another writer."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors surfaced by the ordering engine and its store.
#[derive(Debug, thiserror::Error)]
pub enum RankError {
    /// The task does not exist at mutation time.
    #[error("task not found: {0}")]
    TaskNotFound(String),

    /// The parent project does not exist at mutation time.
    #[error("project not found: {0}")]
    ProjectNotFound(String),

    /// Bisection or extension produced a rank equal to one of its bounds.
    #[error(
        "rank space exhausted in project {project_id}: no distinct rank between {lower} and {upper}"
    )]
    RankExhausted {
        project_id: String,
        lower: f64,
        upper: f64,
    },

    /// A status string did not name a known column.
    #[error(transparent)]
    InvalidStatus(#[from] ParseStatusError),

    /// Underlying `SQLite` failure (connection, busy timeout, constraint).
    #[error("store error: {0}")]
    Store(#[from] rusqlite::Error),

    /// Configuration could not be read or failed validation.
    #[error("config error: {0}")]
    Config(String),
}

impl RankError {
    /// Machine-readable code associated with this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::TaskNotFound(_) => ErrorCode::TaskNotFound,
            Self::ProjectNotFound(_) => ErrorCode::ProjectNotFound,
            Self::RankExhausted { .. } => ErrorCode::RankSpaceExhausted,
            Self::InvalidStatus(_) => ErrorCode::InvalidEnumValue,
            Self::Store(_) => ErrorCode::StoreFailure,
            Self::Config(_) => ErrorCode::ConfigParseError,
        }
    }

    /// Optional remediation hint for operators and agents.
    #[must_use]
    pub const fn hint(&self) -> Option<&'static str> {
        self.code().hint()
    }

    /// Returns `true` for the not-found family.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::TaskNotFound(_) | Self::ProjectNotFound(_))
    }
}
