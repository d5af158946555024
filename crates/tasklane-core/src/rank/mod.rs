//! Rank-based ordering.
//!
//! Every task carries a floating-point `rank`. Ascending rank inside a
//! project is the list order; ascending rank inside `(project, status)` is
//! the column order. New tasks are appended one gap above the project's
//! highest rank. A move computes one new rank for the moved task by
//! bisecting its two bounding neighbors, or by extending one gap past the
//! only neighbor there is. No other task's rank is ever rewritten.
//!
//! The pivot of a move (the task currently at the requested offset) is
//! looked up across the whole project by default, while the sibling it is
//! averaged with is looked up inside the target status column. See
//! [`PivotScope`].

pub mod allocate;
pub mod plan;
pub mod resolve;

pub use allocate::allocate_append_rank;
pub use plan::{MoveRequest, plan_rank};
pub use resolve::resolve_at;

use serde::{Deserialize, Serialize};

/// Distance between freshly appended siblings.
pub const DEFAULT_GAP: f64 = 1000.0;

/// Rows visible to the pivot lookup of a move at a non-zero offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PivotScope {
    /// Every task in the project regardless of status. The sibling lookup
    /// stays status-scoped, so a pivot from another column can be averaged
    /// with a sibling from the target column.
    #[default]
    Project,
    /// Only tasks in the target status, matching the sibling lookup.
    Status,
}

/// Tunables for rank computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderingOptions {
    pub gap: f64,
    pub pivot_scope: PivotScope,
}

impl Default for OrderingOptions {
    fn default() -> Self {
        Self {
            gap: DEFAULT_GAP,
            pivot_scope: PivotScope::Project,
        }
    }
}

/// Which branch of the planner produced a rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    /// Nothing occupies the target offset; the rank resets to zero.
    EmptyTarget,
    /// The task already occupies the target offset.
    Unchanged,
    /// One gap below the pivot (new head, or moving earlier with no sibling before it).
    ExtendBelow,
    /// One gap above the pivot (moving later with no sibling after it).
    ExtendAbove,
    /// Midpoint of the pivot and its sibling.
    Bisect,
}

/// A computed rank plus the neighbors it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankPlan {
    pub rank: f64,
    pub placement: Placement,
    pub pivot_rank: Option<f64>,
    pub sibling_rank: Option<f64>,
}

impl RankPlan {
    const fn new(rank: f64, placement: Placement) -> Self {
        Self {
            rank,
            placement,
            pivot_rank: None,
            sibling_rank: None,
        }
    }
}
