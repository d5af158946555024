//! tasklane-core library.
//!
//! Keeps tasks of a project in a dense total order using sparse `f64`
//! ranks, so repositioning a task (optionally into another status column)
//! rewrites that task's rank only.
//!
//! # Conventions
//!
//! - **Errors**: library functions return [`error::RankError`].
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod config;
pub mod db;
pub mod engine;
pub mod error;
pub mod model;
pub mod rank;
pub mod store;

pub use engine::{Engine, MoveOutcome};
pub use error::{ErrorCode, RankError};
pub use model::{NewTask, Project, Status, Task};
