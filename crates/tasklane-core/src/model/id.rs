//! Opaque identifier generation.
//!
//! IDs are `<prefix>-<10 hex>` where the hex digits are the head of a blake3
//! digest over the owning scope, the title, the creation timestamp and a
//! random salt. The salt keeps two creations in the same microsecond apart.

const HEX_LEN: usize = 10;

pub const PROJECT_PREFIX: &str = "prj";
pub const TASK_PREFIX: &str = "tsk";

fn generate(prefix: &str, scope: &str, title: &str, now_us: i64) -> String {
    let salt: u64 = rand::random();
    let mut hasher = blake3::Hasher::new();
    hasher.update(scope.as_bytes());
    hasher.update(&[0]);
    hasher.update(title.as_bytes());
    hasher.update(&now_us.to_le_bytes());
    hasher.update(&salt.to_le_bytes());
    let hex = hasher.finalize().to_hex();
    format!("{prefix}-{}", &hex.as_str()[..HEX_LEN])
}

/// Generate a new project ID.
#[must_use]
pub fn project_id(name: &str, now_us: i64) -> String {
    generate(PROJECT_PREFIX, "", name, now_us)
}

/// Generate a new task ID scoped to `project_id`.
#[must_use]
pub fn task_id(project_id: &str, title: &str, now_us: i64) -> String {
    generate(TASK_PREFIX, project_id, title, now_us)
}
