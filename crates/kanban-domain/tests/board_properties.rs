use chrono::{Duration, TimeZone, Utc};
use kanban_core::Frozen;
use kanban_domain::{
    reduce, Action, BoardState, BoardStore, ColumnId, DragCoordinator, FilterPatch, Priority,
    Task, TaskPatch, MAX_HISTORY,
};
use serde_json::json;

fn task(id: &str, priority: Priority) -> Task {
    let at = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
    Task::new(id, format!("Task {}", id), "", priority, at)
}

/// Small deterministic generator so the action mix is reproducible.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next() % items.len() as u64) as usize]
    }
}

fn random_action(rng: &mut Lcg, step: usize) -> Action {
    let ids = ["t0", "t1", "t2", "t3", "t4", "t5"];
    let id = *rng.pick(&ids);
    let column = *rng.pick(&ColumnId::ALL);
    let other = *rng.pick(&ColumnId::ALL);
    match rng.next() % 8 {
        0 | 1 => Action::add_task(task(id, *rng.pick(&[Priority::Low, Priority::High]))),
        2 => Action::move_task(id, column, other, rng.next() as i64 % 12 - 4),
        3 => Action::delete_task(id),
        4 => Action::update_task(
            id,
            TaskPatch {
                title: Some(format!("edit {}", step)),
                ..Default::default()
            },
            Utc::now(),
        ),
        5 => Action::Undo,
        6 => Action::Redo,
        _ => Action::set_filter(FilterPatch::text(if step % 2 == 0 { "" } else { "task" })),
    }
}

#[test]
fn order_and_tasks_stay_consistent() {
    let mut rng = Lcg(42);
    let mut state = Frozen::new(BoardState::initial());

    for step in 0..2_000 {
        let action = random_action(&mut rng, step);
        state = reduce(&state, action.clone());
        if let Err(problem) = state.snapshot().check_consistency() {
            panic!("step {} ({:?}): {}", step, action, problem);
        }
        assert!(state.history().len() <= MAX_HISTORY);
        assert!(state.future().len() <= MAX_HISTORY);
    }
}

#[test]
fn undo_then_redo_restores_snapshot() {
    let mut rng = Lcg(7);
    let mut state = Frozen::new(BoardState::initial());

    for step in 0..300 {
        state = reduce(&state, random_action(&mut rng, step));
        if !state.can_undo() {
            continue;
        }
        let before = state.snapshot_handle().clone();
        let round_trip = reduce(&reduce(&state, Action::Undo), Action::Redo);
        assert_eq!(round_trip.snapshot_handle(), &before);
    }
}

#[test]
fn mutation_after_undo_clears_redo() {
    let mut state = Frozen::new(BoardState::initial());
    state = reduce(&state, Action::add_task(task("a", Priority::Low)));
    state = reduce(&state, Action::Undo);
    assert!(state.can_redo());

    state = reduce(&state, Action::add_task(task("b", Priority::Low)));
    assert!(!state.can_redo());
}

#[test]
fn add_then_move_to_done() {
    let mut store = BoardStore::new();
    store.apply(Action::add_task(task("t1", Priority::Medium)));
    let state = store
        .apply(Action::move_task("t1", ColumnId::Todo, ColumnId::Done, 0))
        .clone();

    assert!(state.order().todo.is_empty());
    assert_eq!(state.order().done, vec!["t1".into()]);
    assert_eq!(
        state.snapshot().task("t1").map(|t| t.status),
        Some(ColumnId::Done.status())
    );
    assert_eq!(state.history_size(), 2);
}

#[test]
fn filtered_drop_lands_in_master_position() {
    let mut store = BoardStore::new();
    store.apply(Action::add_task(task("a", Priority::Low)));
    store.apply(Action::add_task(task("b", Priority::High)));
    store.apply(Action::add_task(task("c", Priority::Low)));
    store.apply(Action::add_task(task("d", Priority::Low)));
    store.apply(Action::move_task("d", ColumnId::Todo, ColumnId::Done, 0));
    store.apply(Action::set_filter(FilterPatch::priority(Some(Priority::Low))));

    let projection = store.projection();
    assert_eq!(projection.badge(ColumnId::Todo), "2 / 3");

    let mut drag = DragCoordinator::new();
    drag.drag_start("d".into(), ColumnId::Done);
    drag.drop(&mut store, ColumnId::Todo, 150.0, 0, &projection);

    let order: Vec<&str> = store.state().order().todo.iter().map(|id| id.as_str()).collect();
    assert_eq!(order, ["a", "b", "d", "c"]);
}

#[test]
fn hydration_roundtrip_drops_view_state() {
    let mut store = BoardStore::new();
    store.apply(Action::add_task(task("a", Priority::High)));
    store.apply(Action::set_filter(FilterPatch::text("zzz")));
    let saved = serde_json::to_value(store.state().snapshot()).unwrap();

    let mut restored = BoardStore::new();
    restored.hydrate(Some(saved));

    assert_eq!(restored.state().snapshot(), store.state().snapshot());
    assert!(!restored.state().filters().has_active_filters());
    assert!(!restored.state().can_undo());
}

#[test]
fn hydration_rejects_bad_records() {
    let mut store = BoardStore::new();
    store.apply(Action::add_task(task("a", Priority::High)));

    store.hydrate(Some(json!({ "tasks": {}, "order": { "todo": [] } })));
    assert!(store.state().snapshot().is_empty());

    store.hydrate(Some(json!([1, 2, 3])));
    assert!(store.state().snapshot().is_empty());
}

#[test]
fn update_never_rewinds_timestamp() {
    let created = task("a", Priority::Low);
    let earlier = created.updated_at - Duration::seconds(30);
    let mut state = Frozen::new(BoardState::initial());
    state = reduce(&state, Action::add_task(created.clone()));
    state = reduce(
        &state,
        Action::update_task(
            "a",
            TaskPatch {
                priority: Some(Priority::High),
                ..Default::default()
            },
            earlier,
        ),
    );

    let updated = state.snapshot().task("a").unwrap();
    assert_eq!(updated.priority, Priority::High);
    assert_eq!(updated.updated_at, created.updated_at);
}
