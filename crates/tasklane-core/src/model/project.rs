use serde::{Deserialize, Serialize};

/// A task project: the parent scope every rank comparison is confined to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub created_at_us: i64,
    pub updated_at_us: i64,
}

impl Project {
    /// Build a fresh project with a generated ID, stamped at `now_us`.
    #[must_use]
    pub fn new(name: impl Into<String>, now_us: i64) -> Self {
        let name = name.into();
        Self {
            id: super::id::project_id(&name, now_us),
            name,
            created_at_us: now_us,
            updated_at_us: now_us,
        }
    }
}
