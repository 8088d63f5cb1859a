//! End-to-end tests: dashboard data feeding the dice roller.
//!
//! Time is paused, so timer-driven events arrive at exact virtual instants.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use taskdeck_core::{
    mock, Breakdown, CommitMode, Config, DiceRoller, Event, GatePhase, NewTask, Notice,
    ScriptedDice, SelectionError, TaskStatus,
};
use tokio::time::Instant;

fn fast_config() -> Config {
    let mut cfg = Config::default();
    cfg.set("roller.roll_delay_ms", "100").unwrap();
    cfg.set("roller.tick_interval_ms", "10").unwrap();
    cfg.set("roller.progress_step", "25").unwrap();
    cfg
}

async fn drain(roller: &mut DiceRoller<impl taskdeck_core::Candidate, ScriptedDice>) -> Vec<Event> {
    let mut events = Vec::new();
    while let Some(event) = roller.next_event().await.unwrap() {
        events.push(event);
    }
    events
}

#[tokio::test(start_paused = true)]
async fn committed_board_task_moves_to_in_progress() {
    let mut board = mock::board();
    for title in ["Write tests", "Fix login bug", "Plan sprint", "Reply to email", "Clean inbox", "Book venue"] {
        board.create(NewTask::titled(title)).unwrap();
    }
    let candidates = board.pending();
    assert_eq!(candidates.len(), 7);

    let committed = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&committed);
    let mut roller = DiceRoller::new(candidates.clone(), fast_config().gate_policy(), ScriptedDice::new(vec![1, 2]))
        .on_commit(move |task: &taskdeck_core::BoardTask| sink.lock().unwrap().push(task.id.clone()));

    assert_eq!(roller.dice_count(), 2);
    let started = Instant::now();
    roller.roll().unwrap();
    let events = drain(&mut roller).await;

    // 1 + 2 = 3 -> index 2
    let Some(Event::SelectionCommitted { index, item_id, .. }) = events.last() else {
        panic!("expected a commit, got {events:?}");
    };
    assert_eq!(*index, 2);
    assert_eq!(item_id, &candidates[2].id);
    assert_eq!(started.elapsed(), Duration::from_millis(140));
    assert_eq!(events.iter().filter(|e| e.is_commit()).count(), 1);
    assert_eq!(roller.phase(), GatePhase::Idle);

    let ids = committed.lock().unwrap().clone();
    assert_eq!(ids, vec![candidates[2].id.clone()]);
    board.set_status(&ids[0], TaskStatus::InProgress).unwrap();
    assert_eq!(board.pending().len(), 6);
    assert_eq!(board.count(TaskStatus::InProgress), 2);
}

#[tokio::test(start_paused = true)]
async fn manual_breakdown_roll_rerolls_then_accepts() {
    let mut plan = Breakdown::plan("Launch the new website").unwrap();
    plan.toggle_step("1").unwrap();
    let open = plan.open_steps();
    assert_eq!(open.len(), 4);

    let mut cfg = fast_config();
    cfg.set("roller.commit_mode", "manual").unwrap();
    assert_eq!(cfg.roller.commit_mode, CommitMode::Manual);

    let mut roller = DiceRoller::new(open, cfg.gate_policy(), ScriptedDice::new(vec![6, 3]));
    roller.roll().unwrap();

    // 6 on four steps wraps to index 1
    let first = drain(&mut roller).await;
    assert!(matches!(first.as_slice(), [Event::DiceRolled { index: 1, .. }]));
    assert_eq!(roller.phase(), GatePhase::AwaitingConfirmation);

    let rerolled = roller.reroll().unwrap();
    assert!(matches!(rerolled, Event::Rerolled { discarded_index: 1, .. }));
    let second = drain(&mut roller).await;
    assert!(matches!(second.as_slice(), [Event::DiceRolled { index: 2, .. }]));

    match roller.accept().unwrap() {
        Event::SelectionCommitted { item_label, .. } => assert_eq!(item_label, "Testing and Validation"),
        other => panic!("unexpected event {other:?}"),
    }
    assert!(!roller.has_pending_timers());
}

#[tokio::test(start_paused = true)]
async fn empty_candidates_surface_a_notice() {
    let mut roller = DiceRoller::new(Vec::<String>::new(), Config::default().gate_policy(), ScriptedDice::new(vec![1]));
    let err = roller.roll().unwrap_err();
    assert!(matches!(err, taskdeck_core::CoreError::Selection(SelectionError::EmptyList)));

    let notice = Notice::from(&SelectionError::EmptyList);
    assert_eq!(notice.title, "No tasks available");
    assert_eq!(roller.phase(), GatePhase::Idle);
}

#[tokio::test(start_paused = true)]
async fn dropping_roller_mid_countdown_never_commits() {
    let calls = Arc::new(Mutex::new(0usize));
    let counter = Arc::clone(&calls);
    let mut roller = DiceRoller::new(
        vec!["a".to_string(), "b".to_string()],
        fast_config().gate_policy(),
        ScriptedDice::new(vec![2]),
    )
    .on_commit(move |_: &String| *counter.lock().unwrap() += 1);

    roller.roll().unwrap();
    assert!(matches!(roller.next_event().await.unwrap(), Some(Event::DiceRolled { .. })));
    assert!(matches!(roller.next_event().await.unwrap(), Some(Event::CountdownProgress { progress: 25, .. })));
    drop(roller);

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(*calls.lock().unwrap(), 0);
}

#[tokio::test(start_paused = true)]
async fn events_serialize_with_type_tag() {
    let mut roller = DiceRoller::new(vec!["only".to_string()], fast_config().gate_policy(), ScriptedDice::new(vec![4]));
    let started = roller.roll().unwrap();
    let json = serde_json::to_value(&started).unwrap();
    assert_eq!(json["type"], "RollStarted");
    assert_eq!(json["candidates"], 1);

    let events = drain(&mut roller).await;
    let commit = serde_json::to_value(events.last().unwrap()).unwrap();
    assert_eq!(commit["type"], "SelectionCommitted");
    assert_eq!(commit["roll"], serde_json::json!([4]));
    assert_eq!(commit["item_id"], "only");
}
