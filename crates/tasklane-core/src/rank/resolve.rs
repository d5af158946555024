use crate::error::RankError;
use crate::model::Task;
use crate::store::{Scope, TaskStore};

/// The task at zero-based `offset` in `scope`, ascending by rank.
///
/// `None` when the offset is at or past the end of the scope; that is not
/// an error.
///
/// # Errors
///
/// Returns an error if the offset probe fails.
pub fn resolve_at(
    store: &impl TaskStore,
    scope: &Scope<'_>,
    offset: u32,
) -> Result<Option<Task>, RankError> {
    store.fetch_at_offset(scope, offset)
}
