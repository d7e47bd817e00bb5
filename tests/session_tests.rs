//! End-to-end session tests using the in-memory store and a scripted
//! presenter.

use chrono::{Duration, NaiveDate};
use drillbook::{
    Color, DrillError, FixedClock, MemoryStore, RootRecord, Scheduler, ScriptedPresenter, Session,
    SessionConfig, Status, TrainRng, TrainingMode, TrainingRecord, TreeBuilder, TreeId,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn scheduler(today: NaiveDate, seed: u64) -> Scheduler {
    Scheduler::new(Box::new(FixedClock(today)), TrainRng::new(seed))
}

/// Black trainee over 1.e4 e5 2.Nf3 Nc6 3.Bb5 a6: solutions e5, Nc6, a6.
fn mainline_tree() -> drillbook::MoveTree {
    let mut b = TreeBuilder::new(Color::White);
    let mut parent = b.root();
    for san in ["e4", "e5", "Nf3", "Nc6", "Bb5", "a6"] {
        parent = b.child(parent, san);
    }
    b.finish()
}

fn solution_records(store: &MemoryStore, id: &TreeId) -> Vec<TrainingRecord> {
    let tree = store.get(id).unwrap();
    let root = RootRecord::decode(tree.get(tree.root()).note.as_ref().unwrap()).unwrap();
    let resolution = drillbook::resolve(tree, root.perspective).unwrap();
    resolution
        .solutions
        .iter()
        .map(|&s| TrainingRecord::decode(tree.get(s).note.as_deref()).unwrap())
        .collect()
}

fn stored_root(store: &MemoryStore, id: &TreeId) -> RootRecord {
    let tree = store.get(id).unwrap();
    RootRecord::decode(tree.get(tree.root()).note.as_ref().unwrap()).unwrap()
}

// =============================================================================
// Learning a Fresh Tree
// =============================================================================

#[test]
fn test_fresh_tree_learning_session() {
    // Three new units, reinsertion at index 3 with no jitter: each unit
    // is played exactly 3 times (new → learning 1 → learning 2 →
    // learned) and reinserted twice, cycling in A B C order.
    let today = date(2024, 6, 10);
    let id = TreeId::new("ruy");
    let mut store = MemoryStore::new();
    store.put(&id, mainline_tree());

    let mut presenter = ScriptedPresenter::new();
    for _ in 0..3 {
        presenter.push_move("e5");
        presenter.push_move("Nc6");
        presenter.push_move("a6");
    }

    let config = SessionConfig::default()
        .with_perspective(Color::Black)
        .with_insertion(3, 0);
    let summary = Session::new(&mut store, &mut presenter, scheduler(today, 1), config)
        .run(&id)
        .unwrap();

    assert_eq!(summary.solutions, 3);
    assert_eq!(summary.queued, 3);
    assert_eq!(summary.plays, 9);
    assert_eq!(summary.reinserts, 6);
    assert_eq!(summary.discards, 3);
    assert!(!summary.aborted);

    // All answers consumed; the presented problems cycle through the
    // three positions.
    assert_eq!(presenter.remaining(), 0);
    assert_eq!(presenter.shown.len(), 9);
    assert_eq!(presenter.shown[0].len(), 1);
    assert_eq!(presenter.shown[0][0].san, "e4");
    assert_eq!(presenter.perspective, Some(Color::Black));

    // Every record reached review, due tomorrow.
    for rec in solution_records(&store, &id) {
        assert_eq!(rec.status, Status::Review);
        assert_eq!(rec.due, Some(today + Duration::days(1)));
        assert_eq!(rec.successes, 1);
        assert_eq!(rec.failures, 0);
    }

    // Three first-time learns consumed three units of capacity.
    let root = stored_root(&store, &id);
    assert_eq!(root.learning_remaining, root.learning_limit - 3);
    assert_eq!(root.last_access, today);
}

#[test]
fn test_learning_quota_gates_population() {
    let today = date(2024, 6, 10);
    let id = TreeId::new("ruy");
    let mut store = MemoryStore::new();
    let mut tree = mainline_tree();
    let mut root = RootRecord::new(Color::Black, today);
    root.learning_remaining = 2;
    let root_id = tree.root();
    tree.get_mut(root_id).note = Some(root.encode());
    store.put(&id, tree);

    // Front reinsertion (the default) drills a unit to completion
    // before moving on: e5 three times, then Nc6 three times.
    let mut presenter = ScriptedPresenter::new();
    for san in ["e5", "Nc6"] {
        for _ in 0..3 {
            presenter.push_move(san);
        }
    }

    let summary = Session::new(
        &mut store,
        &mut presenter,
        scheduler(today, 1),
        SessionConfig::default(),
    )
    .run(&id)
    .unwrap();

    // Only the first two solutions fit today's quota.
    assert_eq!(summary.queued, 2);
    assert_eq!(summary.plays, 6);

    let records = solution_records(&store, &id);
    assert_eq!(records[0].status, Status::Review);
    assert_eq!(records[1].status, Status::Review);
    assert_eq!(records[2].status, Status::New);
    assert_eq!(stored_root(&store, &id).learning_remaining, 0);
}

#[test]
fn test_new_day_refreshes_quota() {
    let today = date(2024, 6, 10);
    let id = TreeId::new("ruy");
    let mut store = MemoryStore::new();
    let mut tree = mainline_tree();
    let mut root = RootRecord::new(Color::Black, date(2024, 6, 9));
    root.learning_limit = 2;
    root.learning_remaining = 0;
    let root_id = tree.root();
    tree.get_mut(root_id).note = Some(root.encode());
    store.put(&id, tree);

    let mut presenter = ScriptedPresenter::new();
    for san in ["e5", "Nc6"] {
        for _ in 0..3 {
            presenter.push_move(san);
        }
    }

    let summary = Session::new(
        &mut store,
        &mut presenter,
        scheduler(today, 1),
        SessionConfig::default(),
    )
    .run(&id)
    .unwrap();

    // Yesterday's exhausted quota was reset to the daily limit.
    assert_eq!(summary.queued, 2);
    assert_eq!(stored_root(&store, &id).last_access, today);
}

// =============================================================================
// Reviews
// =============================================================================

fn seeded_review_tree(today: NaiveDate) -> drillbook::MoveTree {
    // All three solutions in review, due today, with deterministic
    // projection tuning (gap 5, factor 2, no jitter).
    let mut tree = mainline_tree();
    let mut root = RootRecord::new(Color::Black, today);
    root.recall_factor = 2.0;
    root.recall_radius = 0;
    let root_id = tree.root();
    tree.get_mut(root_id).note = Some(root.encode());

    let resolution = drillbook::resolve(&tree, Color::Black).unwrap();
    for &s in &resolution.solutions {
        let rec = TrainingRecord {
            status: Status::Review,
            last_study: Some(today - Duration::days(5)),
            due: Some(today),
            successes: 1,
            failures: 0,
        };
        tree.get_mut(s).note = Some(rec.encode());
    }
    tree
}

#[test]
fn test_due_reviews_recall_and_reschedule() {
    let today = date(2024, 6, 10);
    let id = TreeId::new("ruy");
    let mut store = MemoryStore::new();
    store.put(&id, seeded_review_tree(today));

    let mut presenter = ScriptedPresenter::new();
    presenter.push_move("e5");
    presenter.push_move("Nc6");
    presenter.push_move("a6");

    let summary = Session::new(
        &mut store,
        &mut presenter,
        scheduler(today, 1),
        SessionConfig::default(),
    )
    .run(&id)
    .unwrap();

    // Each due review succeeds on its single play.
    assert_eq!(summary.queued, 3);
    assert_eq!(summary.plays, 3);
    assert_eq!(summary.discards, 3);
    assert_eq!(summary.reinserts, 0);

    for rec in solution_records(&store, &id) {
        assert_eq!(rec.status, Status::Review);
        // Gap 5 × factor 2.0, no jitter.
        assert_eq!(rec.due, Some(today + Duration::days(10)));
        assert_eq!(rec.successes, 2);
    }
}

#[test]
fn test_future_reviews_stay_out_of_the_queue() {
    let today = date(2024, 6, 10);
    let id = TreeId::new("ruy");
    let mut store = MemoryStore::new();
    // Seed the reviews as due tomorrow by building for a later day.
    store.put(&id, seeded_review_tree(date(2024, 6, 11)));

    let mut presenter = ScriptedPresenter::new();
    let summary = Session::new(
        &mut store,
        &mut presenter,
        scheduler(today, 1),
        SessionConfig::default(),
    )
    .run(&id)
    .unwrap();

    assert_eq!(summary.queued, 0);
    assert_eq!(summary.plays, 0);
    assert!(presenter.shown.is_empty());
}

#[test]
fn test_forgotten_review_relearned_within_session() {
    let today = date(2024, 6, 10);
    let id = TreeId::new("mini");
    let mut store = MemoryStore::new();

    let mut b = TreeBuilder::new(Color::White);
    let e4 = b.child(b.root(), "e4");
    let e5 = b.child(e4, "e5");
    let mut tree = b.finish();
    let mut root = RootRecord::new(Color::Black, today);
    root.recall_radius = 0;
    let root_id = tree.root();
    tree.get_mut(root_id).note = Some(root.encode());
    let due_before = today;
    tree.get_mut(e5).note = Some(
        TrainingRecord {
            status: Status::Review,
            last_study: Some(today - Duration::days(3)),
            due: Some(due_before),
            successes: 4,
            failures: 0,
        }
        .encode(),
    );
    store.put(&id, tree);

    // Wrong answer first, then two successes to climb back through the
    // remembering stages.
    let mut presenter = ScriptedPresenter::new();
    presenter.push_move("d6");
    presenter.push_move("e5");
    presenter.push_move("e5");

    let summary = Session::new(
        &mut store,
        &mut presenter,
        scheduler(today, 1),
        SessionConfig::default(),
    )
    .run(&id)
    .unwrap();

    assert_eq!(summary.plays, 3);
    assert_eq!(summary.reinserts, 2);
    assert_eq!(summary.discards, 1);

    let rec = &solution_records(&store, &id)[0];
    assert_eq!(rec.status, Status::Review);
    assert_eq!(rec.failures, 1);
    assert_eq!(rec.successes, 5);
    // Remembering leaves the due date untouched.
    assert_eq!(rec.due, Some(due_before));
}

// =============================================================================
// Line Mode
// =============================================================================

#[test]
fn test_line_session_reviews_whole_line() {
    let today = date(2024, 6, 10);
    let id = TreeId::new("ruy");
    let mut store = MemoryStore::new();
    store.put(&id, seeded_review_tree(today));

    let mut presenter = ScriptedPresenter::new();
    presenter.push_move("e5");
    presenter.push_move("Nc6");
    presenter.push_move("a6");

    let config = SessionConfig::default().with_mode(TrainingMode::Lines);
    let summary = Session::new(&mut store, &mut presenter, scheduler(today, 1), config)
        .run(&id)
        .unwrap();

    // One line covering all three positions, played once.
    assert_eq!(summary.queued, 1);
    assert_eq!(summary.plays, 1);
    assert_eq!(summary.discards, 1);
    assert_eq!(presenter.shown.len(), 3);

    for rec in solution_records(&store, &id) {
        assert_eq!(rec.successes, 2);
        assert_eq!(rec.due, Some(today + Duration::days(10)));
    }
}

#[test]
fn test_line_with_unlearned_member_not_queued() {
    let today = date(2024, 6, 10);
    let id = TreeId::new("ruy");
    let mut store = MemoryStore::new();
    let mut tree = seeded_review_tree(today);
    // Knock one member back to new.
    let resolution = drillbook::resolve(&tree, Color::Black).unwrap();
    tree.get_mut(resolution.solutions[2]).note = None;
    store.put(&id, tree);

    let mut presenter = ScriptedPresenter::new();
    let config = SessionConfig::default().with_mode(TrainingMode::Lines);
    let summary = Session::new(&mut store, &mut presenter, scheduler(today, 1), config)
        .run(&id)
        .unwrap();

    assert_eq!(summary.queued, 0);
}

// =============================================================================
// Abort and Persistence
// =============================================================================

#[test]
fn test_quit_aborts_but_still_persists_once() {
    let today = date(2024, 6, 10);
    let id = TreeId::new("ruy");
    let mut store = MemoryStore::new();
    store.put(&id, mainline_tree());

    // Learn the first unit once, then quit.
    let mut presenter = ScriptedPresenter::new();
    presenter.push_move("e5");
    presenter.push_quit();

    let config = SessionConfig::default().with_perspective(Color::Black);
    let summary = Session::new(&mut store, &mut presenter, scheduler(today, 1), config)
        .run(&id)
        .unwrap();

    assert!(summary.aborted);
    assert_eq!(summary.plays, 2);
    assert_eq!(summary.reinserts, 1);

    // The abort still wrote the session back: the first unit's advance
    // to learning stands, the unplayed ones remain new.
    let records = solution_records(&store, &id);
    assert_eq!(records[0].status, Status::Learning1);
    assert_eq!(records[1].status, Status::New);
    assert_eq!(records[2].status, Status::New);
    assert_eq!(stored_root(&store, &id).last_access, today);
}

#[test]
fn test_malformed_record_is_fatal_before_write() {
    let today = date(2024, 6, 10);
    let id = TreeId::new("ruy");
    let mut store = MemoryStore::new();
    let mut tree = mainline_tree();
    let root_note = RootRecord::new(Color::Black, date(2024, 6, 1)).encode();
    let root_id = tree.root();
    tree.get_mut(root_id).note = Some(root_note.clone());
    // A present-but-malformed solution note must not be defaulted.
    let resolution = drillbook::resolve(&tree, Color::Black).unwrap();
    tree.get_mut(resolution.solutions[0]).note = Some("not a record".to_string());
    store.put(&id, tree);

    let mut presenter = ScriptedPresenter::new();
    let err = Session::new(
        &mut store,
        &mut presenter,
        scheduler(today, 1),
        SessionConfig::default(),
    )
    .run(&id)
    .unwrap_err();

    assert!(matches!(err, DrillError::Record(_)));

    // The store was never written: the stale root note (with its old
    // last-access date) is still in place.
    let stored = store.get(&id).unwrap();
    assert_eq!(
        stored.get(stored.root()).note.as_ref().unwrap(),
        &root_note
    );
}

#[test]
fn test_structural_error_is_fatal_before_write() {
    let today = date(2024, 6, 10);
    let id = TreeId::new("bad");
    let mut store = MemoryStore::new();

    let mut b = TreeBuilder::new(Color::White);
    let e4 = b.child(b.root(), "e4");
    b.child(e4, "e5");
    b.child(e4, "c5");
    store.put(&id, b.finish());

    let mut presenter = ScriptedPresenter::new();
    let config = SessionConfig::default().with_perspective(Color::Black);
    let err = Session::new(&mut store, &mut presenter, scheduler(today, 1), config)
        .run(&id)
        .unwrap_err();

    assert!(matches!(err, DrillError::Tree(_)));

    // No root record was ever persisted.
    let stored = store.get(&id).unwrap();
    assert!(stored.get(stored.root()).note.is_none());
}

#[test]
fn test_missing_tree_is_a_store_error() {
    let today = date(2024, 6, 10);
    let mut store = MemoryStore::new();
    let mut presenter = ScriptedPresenter::new();

    let err = Session::new(
        &mut store,
        &mut presenter,
        scheduler(today, 1),
        SessionConfig::default(),
    )
    .run(&TreeId::new("missing"))
    .unwrap_err();

    assert!(matches!(err, DrillError::Store(_)));
}

// =============================================================================
// Determinism
// =============================================================================

#[test]
fn test_same_seed_replays_identically() {
    let today = date(2024, 6, 10);
    let id = TreeId::new("ruy");

    let run = || {
        let mut store = MemoryStore::new();
        store.put(&id, mainline_tree());
        let mut presenter = ScriptedPresenter::new();
        for _ in 0..3 {
            presenter.push_move("e5");
            presenter.push_move("Nc6");
            presenter.push_move("a6");
        }
        let config = SessionConfig::default()
            .with_perspective(Color::Black)
            .with_shuffle()
            .with_seed(1234)
            .with_insertion(1, 1);
        let summary = Session::new(&mut store, &mut presenter, scheduler(today, 1234), config)
            .run(&id)
            .unwrap();
        let saved = serde_json::to_string(store.get(&id).unwrap()).unwrap();
        (summary, saved)
    };

    let (summary1, saved1) = run();
    let (summary2, saved2) = run();

    assert_eq!(summary1, summary2);
    assert_eq!(saved1, saved2);
}
