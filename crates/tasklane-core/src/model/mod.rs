//! Domain types for projects and the tasks ordered inside them.

pub mod id;
pub mod project;
pub mod task;

pub use project::Project;
pub use task::{NewTask, ParseStatusError, Status, Task};

/// Current wall-clock time as Unix microseconds.
#[must_use]
pub fn now_us() -> i64 {
    chrono::Utc::now().timestamp_micros()
}
