use super::{OrderingOptions, PivotScope, Placement, RankPlan, resolve_at};
use crate::error::RankError;
use crate::model::{Status, Task};
use crate::store::{Scope, TaskStore};

/// Inputs for computing a moved task's new rank.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveRequest<'a> {
    pub task_id: &'a str,
    pub project_id: &'a str,
    pub target_status: Status,
    /// The task's rank before the move.
    pub current_rank: f64,
    pub target_offset: u32,
}

impl<'a> MoveRequest<'a> {
    /// Request moving `task` to `target_offset` of `target_status`.
    #[must_use]
    pub fn for_task(task: &'a Task, target_status: Status, target_offset: u32) -> Self {
        Self {
            task_id: &task.id,
            project_id: &task.project_id,
            target_status,
            current_rank: task.rank,
            target_offset,
        }
    }
}

/// Compute the new rank for a move. Reads neighbors, writes nothing.
///
/// Offset zero targets the head of the status column. Any other offset
/// resolves a pivot (project-wide unless `options.pivot_scope` says
/// otherwise), then bisects toward the column sibling on the side the task
/// is coming from, or extends one gap past the pivot when that sibling does
/// not exist.
///
/// # Errors
///
/// Propagates store failures unchanged. Returns [`RankError::RankExhausted`]
/// when the computed rank is not finite or collapses onto one of its bounds.
pub fn plan_rank(
    store: &impl TaskStore,
    request: &MoveRequest<'_>,
    options: &OrderingOptions,
) -> Result<RankPlan, RankError> {
    let column = Scope::column(request.project_id, request.target_status);

    let plan = if request.target_offset == 0 {
        plan_head(store, request, &column, options.gap)?
    } else {
        plan_interior(store, request, &column, options)?
    };

    tracing::debug!(
        task_id = request.task_id,
        project_id = request.project_id,
        status = %request.target_status,
        offset = request.target_offset,
        placement = ?plan.placement,
        pivot_rank = ?plan.pivot_rank,
        sibling_rank = ?plan.sibling_rank,
        rank = plan.rank,
        "planned rank"
    );

    Ok(plan)
}

fn plan_head(
    store: &impl TaskStore,
    request: &MoveRequest<'_>,
    column: &Scope<'_>,
    gap: f64,
) -> Result<RankPlan, RankError> {
    let Some(head) = resolve_at(store, column, 0)? else {
        return Ok(RankPlan::new(0.0, Placement::EmptyTarget));
    };

    if head.id == request.task_id {
        return Ok(unchanged(&head));
    }

    let rank = head.rank - gap;
    ensure_distinct(request.project_id, rank, head.rank, None)?;
    Ok(RankPlan {
        rank,
        placement: Placement::ExtendBelow,
        pivot_rank: Some(head.rank),
        sibling_rank: None,
    })
}

fn plan_interior(
    store: &impl TaskStore,
    request: &MoveRequest<'_>,
    column: &Scope<'_>,
    options: &OrderingOptions,
) -> Result<RankPlan, RankError> {
    let pivot_scope = match options.pivot_scope {
        PivotScope::Project => Scope::project(request.project_id),
        PivotScope::Status => *column,
    };
    let offset = request.target_offset;

    let Some(pivot) = resolve_at(store, &pivot_scope, offset)? else {
        return Ok(RankPlan::new(0.0, Placement::EmptyTarget));
    };

    if pivot.id == request.task_id {
        return Ok(unchanged(&pivot));
    }

    let moving_earlier = request.current_rank > pivot.rank;
    let sibling_offset = if moving_earlier {
        offset.checked_sub(1)
    } else {
        offset.checked_add(1)
    };
    let sibling = sibling_offset
        .map(|at| resolve_at(store, column, at))
        .transpose()?
        .flatten();

    let (rank, placement) = match (&sibling, moving_earlier) {
        (Some(sibling), _) => (f64::midpoint(pivot.rank, sibling.rank), Placement::Bisect),
        (None, true) => (pivot.rank - options.gap, Placement::ExtendBelow),
        (None, false) => (pivot.rank + options.gap, Placement::ExtendAbove),
    };

    let sibling_rank = sibling.as_ref().map(|s| s.rank);
    ensure_distinct(request.project_id, rank, pivot.rank, sibling_rank)?;

    Ok(RankPlan {
        rank,
        placement,
        pivot_rank: Some(pivot.rank),
        sibling_rank,
    })
}

const fn unchanged(task: &Task) -> RankPlan {
    RankPlan {
        rank: task.rank,
        placement: Placement::Unchanged,
        pivot_rank: Some(task.rank),
        sibling_rank: None,
    }
}

/// Reject a rank that float precision has collapsed onto a bound.
///
/// Only the pivot and sibling are compared. With a project-wide pivot an
/// extension can still land on the rank of another task in the target
/// column; that tie is left for the `task_id` order to break.
fn ensure_distinct(
    project_id: &str,
    rank: f64,
    pivot_rank: f64,
    sibling_rank: Option<f64>,
) -> Result<(), RankError> {
    #[allow(clippy::float_cmp)]
    let collides = !rank.is_finite() || rank == pivot_rank || sibling_rank == Some(rank);
    if !collides {
        return Ok(());
    }

    let other = sibling_rank.unwrap_or(pivot_rank);
    let (lower, upper) = if pivot_rank <= other {
        (pivot_rank, other)
    } else {
        (other, pivot_rank)
    };
    tracing::warn!(project_id, lower, upper, rank, "rank space exhausted");
    Err(RankError::RankExhausted {
        project_id: project_id.to_string(),
        lower,
        upper,
    })
}

#[cfg(test)]
mod tests {
    use super::{MoveRequest, plan_rank};
    use crate::error::RankError;
    use crate::model::{Status, Task};
    use crate::rank::{OrderingOptions, PivotScope, Placement};
    use crate::store::memory::MemoryStore;
    use crate::store::TaskStore;

    const PROJECT: &str = "prj-1";

    fn board(rows: &[(&str, Status, f64)]) -> MemoryStore {
        let store = MemoryStore::new();
        for &(id, status, rank) in rows {
            store.put_task(Task {
                id: id.into(),
                project_id: PROJECT.into(),
                title: id.into(),
                description: None,
                status,
                rank,
                created_at_us: 0,
                updated_at_us: 0,
            });
        }
        store
    }

    fn plan(
        store: &MemoryStore,
        id: &str,
        status: Status,
        offset: u32,
        options: &OrderingOptions,
    ) -> Result<super::RankPlan, RankError> {
        let task = store.fetch_task(id).unwrap().expect("seeded task");
        plan_rank(store, &MoveRequest::for_task(&task, status, offset), options)
    }

    fn plan_default(store: &MemoryStore, id: &str, status: Status, offset: u32) -> super::RankPlan {
        plan(store, id, status, offset, &OrderingOptions::default()).expect("plan succeeds")
    }

    #[test]
    fn head_of_empty_column_is_zero() {
        let store = board(&[("tsk-a", Status::Todo, 4000.0)]);
        let plan = plan_default(&store, "tsk-a", Status::Done, 0);
        assert_eq!(plan.rank, 0.0);
        assert_eq!(plan.placement, Placement::EmptyTarget);
    }

    #[test]
    fn head_extends_below_current_head() {
        let store = board(&[
            ("tsk-h", Status::Todo, 500.0),
            ("tsk-m", Status::Todo, 1500.0),
        ]);
        let plan = plan_default(&store, "tsk-m", Status::Todo, 0);
        assert_eq!(plan.rank, -500.0);
        assert_eq!(plan.placement, Placement::ExtendBelow);
        assert_eq!(plan.pivot_rank, Some(500.0));
    }

    #[test]
    fn moving_current_head_to_head_is_unchanged() {
        let store = board(&[
            ("tsk-a", Status::Todo, 0.0),
            ("tsk-b", Status::Todo, 1000.0),
        ]);
        let plan = plan_default(&store, "tsk-a", Status::Todo, 0);
        assert_eq!(plan.rank, 0.0);
        assert_eq!(plan.placement, Placement::Unchanged);
    }

    #[test]
    fn reorder_last_to_head_within_status() {
        let store = board(&[
            ("tsk-a", Status::Todo, 0.0),
            ("tsk-b", Status::Todo, 1000.0),
            ("tsk-c", Status::Todo, 2000.0),
        ]);
        assert_eq!(plan_default(&store, "tsk-c", Status::Todo, 0).rank, -1000.0);
    }

    #[test]
    fn cross_status_head_extends_below_target_head() {
        let store = board(&[
            ("tsk-a", Status::Todo, 500.0),
            ("tsk-d", Status::Done, 100.0),
        ]);
        let plan = plan_default(&store, "tsk-a", Status::Done, 0);
        assert_eq!(plan.rank, -900.0);
        assert_eq!(plan.placement, Placement::ExtendBelow);
    }

    #[test]
    fn moving_earlier_bisects_with_previous_sibling() {
        let store = board(&[
            ("tsk-x", Status::Todo, 1000.0),
            ("tsk-y", Status::Todo, 2000.0),
            ("tsk-z", Status::Todo, 3000.0),
        ]);
        let plan = plan_default(&store, "tsk-z", Status::Todo, 1);
        assert_eq!(plan.rank, 1500.0);
        assert_eq!(plan.placement, Placement::Bisect);
        assert_eq!(plan.pivot_rank, Some(2000.0));
        assert_eq!(plan.sibling_rank, Some(1000.0));
    }

    #[test]
    fn moving_later_bisects_with_next_sibling() {
        let store = board(&[
            ("tsk-a", Status::Todo, 0.0),
            ("tsk-b", Status::Todo, 1000.0),
            ("tsk-c", Status::Todo, 2000.0),
            ("tsk-d", Status::Todo, 3000.0),
        ]);
        let plan = plan_default(&store, "tsk-a", Status::Todo, 2);
        assert_eq!(plan.rank, 2500.0);
        assert_eq!(plan.placement, Placement::Bisect);
    }

    #[test]
    fn moving_past_last_extends_above() {
        let store = board(&[
            ("tsk-a", Status::Todo, 1000.0),
            ("tsk-b", Status::Todo, 2000.0),
            ("tsk-c", Status::Todo, 3000.0),
        ]);
        let plan = plan_default(&store, "tsk-a", Status::Todo, 2);
        assert_eq!(plan.rank, 4000.0);
        assert_eq!(plan.placement, Placement::ExtendAbove);
    }

    #[test]
    fn moving_earlier_without_column_sibling_extends_below() {
        let store = board(&[
            ("tsk-d", Status::Done, 0.0),
            ("tsk-p", Status::Done, 1000.0),
            ("tsk-m", Status::Todo, 5000.0),
        ]);
        let plan = plan_default(&store, "tsk-m", Status::InProgress, 1);
        assert_eq!(plan.pivot_rank, Some(1000.0));
        assert_eq!(plan.sibling_rank, None);
        assert_eq!(plan.rank, 0.0);
        assert_eq!(plan.placement, Placement::ExtendBelow);
    }

    #[test]
    fn sibling_lookup_can_find_the_moved_task() {
        let store = board(&[
            ("tsk-d", Status::Done, 0.0),
            ("tsk-p", Status::Done, 1000.0),
            ("tsk-m", Status::Todo, 5000.0),
        ]);
        // The todo column holds only the moved task, so it is its own sibling.
        let plan = plan_default(&store, "tsk-m", Status::Todo, 1);
        assert_eq!(plan.pivot_rank, Some(1000.0));
        assert_eq!(plan.sibling_rank, Some(5000.0));
        assert_eq!(plan.rank, 3000.0);
    }

    #[test]
    fn occupying_target_offset_is_unchanged() {
        let store = board(&[
            ("tsk-a", Status::Todo, 0.0),
            ("tsk-b", Status::Todo, 1000.0),
            ("tsk-c", Status::Todo, 2000.0),
        ]);
        let plan = plan_default(&store, "tsk-b", Status::Todo, 1);
        assert_eq!(plan.rank, 1000.0);
        assert_eq!(plan.placement, Placement::Unchanged);
    }

    #[test]
    fn offset_past_end_resets_to_zero() {
        let store = board(&[
            ("tsk-a", Status::Todo, 1000.0),
            ("tsk-b", Status::Todo, 2000.0),
        ]);
        let plan = plan_default(&store, "tsk-a", Status::Todo, 7);
        assert_eq!(plan.rank, 0.0);
        assert_eq!(plan.placement, Placement::EmptyTarget);
    }

    #[test]
    fn pivot_scope_controls_cross_column_averaging() {
        let rows = [
            ("tsk-t1", Status::Todo, 0.0),
            ("tsk-d1", Status::Done, 1000.0),
            ("tsk-t2", Status::Todo, 3000.0),
            ("tsk-t3", Status::Todo, 4000.0),
        ];

        // Project-wide pivot: offset 1 is the done task.
        let store = board(&rows);
        let project_plan = plan_default(&store, "tsk-t3", Status::Todo, 1);
        assert_eq!(project_plan.pivot_rank, Some(1000.0));
        assert_eq!(project_plan.rank, 500.0);

        // Column pivot: offset 1 is the second todo task.
        let store = board(&rows);
        let options = OrderingOptions {
            pivot_scope: PivotScope::Status,
            ..OrderingOptions::default()
        };
        let column_plan = plan(&store, "tsk-t3", Status::Todo, 1, &options).unwrap();
        assert_eq!(column_plan.pivot_rank, Some(3000.0));
        assert_eq!(column_plan.rank, 1500.0);
    }

    #[test]
    fn project_pivot_extension_can_tie_a_column_neighbor() {
        let store = board(&[
            ("tsk-a", Status::Todo, 0.0),
            ("tsk-b", Status::Done, 1000.0),
            ("tsk-c", Status::Todo, 2000.0),
        ]);
        // Pivot is the done task; the todo column has nothing at offset 2.
        let plan = plan_default(&store, "tsk-a", Status::Todo, 1);
        assert_eq!(plan.pivot_rank, Some(1000.0));
        assert_eq!(plan.sibling_rank, None);
        assert_eq!(plan.placement, Placement::ExtendAbove);
        assert_eq!(plan.rank, store.fetch_task("tsk-c").unwrap().unwrap().rank);
    }

    #[test]
    fn custom_gap_is_used_for_extension() {
        let store = board(&[
            ("tsk-a", Status::Todo, 10.0),
            ("tsk-b", Status::Todo, 20.0),
        ]);
        let options = OrderingOptions {
            gap: 1.0,
            ..OrderingOptions::default()
        };
        let head = plan(&store, "tsk-b", Status::Todo, 0, &options).unwrap();
        assert_eq!(head.rank, 9.0);
        let tail = plan(&store, "tsk-a", Status::Todo, 1, &options).unwrap();
        assert_eq!(tail.rank, 21.0);
    }

    #[test]
    fn converged_bisection_is_rejected() {
        let lower = 1.0;
        let upper = 1.0 + f64::EPSILON;
        let store = board(&[
            ("tsk-s", Status::Todo, lower),
            ("tsk-p", Status::Todo, upper),
            ("tsk-m", Status::Todo, 5.0),
        ]);
        let err = plan(&store, "tsk-m", Status::Todo, 1, &OrderingOptions::default())
            .expect_err("midpoint collapses onto a bound");
        match err {
            RankError::RankExhausted {
                project_id,
                lower: lo,
                upper: hi,
            } => {
                assert_eq!(project_id, PROJECT);
                assert_eq!(lo, lower);
                assert_eq!(hi, upper);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn extension_swallowed_by_magnitude_is_rejected() {
        let store = board(&[
            ("tsk-h", Status::Todo, 1e20),
            ("tsk-m", Status::Todo, 2e20),
        ]);
        let err = plan(&store, "tsk-m", Status::Todo, 0, &OrderingOptions::default())
            .expect_err("gap vanishes at this magnitude");
        assert!(matches!(err, RankError::RankExhausted { .. }));
    }
}
