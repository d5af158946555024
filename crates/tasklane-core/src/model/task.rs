use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Workflow status column a task sits in.
///
/// Tasks are ordered across the whole project and, separately, inside the
/// column of their status.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl Status {
    pub const ALL: [Self; 3] = [Self::Todo, Self::InProgress, Self::Done];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a status from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStatusError {
    pub got: String,
}

impl fmt::Display for ParseStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid status: '{}'", self.got)
    }
}

impl std::error::Error for ParseStatusError {}

impl FromStr for Status {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "todo" => Ok(Self::Todo),
            "in_progress" | "in-progress" | "doing" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            _ => Err(ParseStatusError { got: s.to_string() }),
        }
    }
}

/// A task row: the ordered item.
///
/// `rank` is the only field the move path rewrites besides `status` and
/// `updated_at_us`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub project_id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: Status,
    pub rank: f64,
    pub created_at_us: i64,
    pub updated_at_us: i64,
}

/// Payload for appending a task to a project.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewTask {
    pub project_id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: Status,
}

impl NewTask {
    #[must_use]
    pub fn new(project_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
