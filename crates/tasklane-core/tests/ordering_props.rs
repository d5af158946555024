use proptest::prelude::*;
use std::collections::BTreeMap;
use tasklane_core::engine::{create_task_in, move_task_in};
use tasklane_core::model::{NewTask, Project, Status};
use tasklane_core::rank::{DEFAULT_GAP, OrderingOptions};
use tasklane_core::store::memory::MemoryStore;
use tasklane_core::store::{Scope, TaskStore};
use tasklane_core::RankError;

const PROJECT: &str = "prj-props";

fn board() -> MemoryStore {
    let store = MemoryStore::new();
    store.put_project(Project {
        id: PROJECT.into(),
        name: "Props".into(),
        created_at_us: 0,
        updated_at_us: 0,
    });
    store
}

fn status_from(index: u8) -> Status {
    Status::ALL[usize::from(index) % Status::ALL.len()]
}

fn seed(store: &MemoryStore, statuses: &[u8]) -> Vec<String> {
    let options = OrderingOptions::default();
    statuses
        .iter()
        .enumerate()
        .map(|(i, &s)| {
            let new_task = NewTask::new(PROJECT, format!("task {i}")).with_status(status_from(s));
            create_task_in(store, &new_task, &options, 1)
                .expect("append succeeds")
                .id
        })
        .collect()
}

fn rank_map(store: &MemoryStore) -> BTreeMap<String, f64> {
    store
        .ordered(&Scope::project(PROJECT))
        .into_iter()
        .map(|t| (t.id, t.rank))
        .collect()
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(256))]

    #[test]
    fn appends_are_strictly_increasing_by_one_gap(statuses in prop::collection::vec(0u8..3, 1..40)) {
        let store = board();
        seed(&store, &statuses);

        let ranks: Vec<f64> = store
            .ordered(&Scope::project(PROJECT))
            .into_iter()
            .map(|t| t.rank)
            .collect();
        prop_assert_eq!(ranks[0], 0.0);
        for pair in ranks.windows(2) {
            prop_assert_eq!(pair[1] - pair[0], DEFAULT_GAP);
        }
    }

    #[test]
    fn moves_rewrite_only_the_moved_rank(
        statuses in prop::collection::vec(0u8..3, 2..12),
        moves in prop::collection::vec((0usize..12, 0u8..3, 0u32..14), 1..25),
    ) {
        let store = board();
        let ids = seed(&store, &statuses);
        let options = OrderingOptions::default();

        for (pick, status, offset) in moves {
            let id = &ids[pick % ids.len()];
            let before = rank_map(&store);

            match move_task_in(&store, id, Some(status_from(status)), offset, &options, 2) {
                Ok(outcome) => {
                    prop_assert_eq!(&outcome.task_id, id);
                    let moved = store.fetch_task(id).unwrap().unwrap();
                    prop_assert_eq!(moved.status, status_from(status));
                    prop_assert_eq!(moved.rank, outcome.to_rank);
                }
                Err(RankError::RankExhausted { .. }) => {}
                Err(other) => prop_assert!(false, "unexpected error: {other}"),
            }

            let after = rank_map(&store);
            prop_assert_eq!(before.len(), after.len());
            for (other, rank) in &before {
                if other != id {
                    prop_assert_eq!(after.get(other), Some(rank));
                }
            }
        }
    }

    #[test]
    fn moving_to_current_offset_is_idempotent(count in 1usize..20, pick in 0usize..20) {
        let store = board();
        let ids = seed(&store, &vec![0; count]);
        let index = pick % count;
        let id = &ids[index];
        let before = store.fetch_task(id).unwrap().unwrap().rank;

        let offset = u32::try_from(index).unwrap();
        let outcome = move_task_in(&store, id, None, offset, &OrderingOptions::default(), 2).unwrap();
        prop_assert_eq!(outcome.to_rank, before);
        prop_assert_eq!(store.fetch_task(id).unwrap().unwrap().rank, before);
    }
}
