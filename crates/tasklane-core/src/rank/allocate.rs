use crate::error::RankError;
use crate::store::{Scope, TaskStore};

/// Rank for a task appended to the end of `project_id`.
///
/// Zero for an empty project, otherwise one `gap` above the current maximum
/// across every status.
///
/// # Errors
///
/// Returns an error if the max-rank probe fails.
pub fn allocate_append_rank(
    store: &impl TaskStore,
    project_id: &str,
    gap: f64,
) -> Result<f64, RankError> {
    let rank = store
        .fetch_max_rank(&Scope::project(project_id))?
        .map_or(0.0, |max| max + gap);
    tracing::trace!(project_id, rank, "allocated append rank");
    Ok(rank)
}
