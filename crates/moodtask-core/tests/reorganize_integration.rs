//! Property and workflow tests for mood-based reorganization.

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;

use moodtask_core::reorganize::compare;
use moodtask_core::{
    Mood, MoodClassifier, Priority, ReorganizationEngine, ReorganizeOptions, Task, TaskDb,
    TaskStatus,
};

fn arb_mood() -> impl Strategy<Value = Mood> {
    prop::sample::select(Mood::ALL.to_vec())
}

fn arb_priority() -> impl Strategy<Value = Priority> {
    prop::sample::select(vec![Priority::Low, Priority::Medium, Priority::High])
}

fn arb_status() -> impl Strategy<Value = TaskStatus> {
    prop::sample::select(vec![
        TaskStatus::Todo,
        TaskStatus::InProgress,
        TaskStatus::Completed,
    ])
}

prop_compose! {
    fn arb_task()(
        priority in arb_priority(),
        status in arb_status(),
        importance in 1u8..=10,
        due_offset in 0i64..30,
        reorganizable in any::<bool>(),
        strict in any::<bool>(),
    ) -> Task {
        let base = Utc.with_ymd_and_hms(2026, 6, 1, 9, 0, 0).unwrap();
        let mut task = Task::new("generated", base + Duration::days(due_offset));
        task.priority = priority;
        task.status = status;
        task.importance = importance;
        task.reorganizable = reorganizable;
        task.strict = strict;
        task
    }
}

fn ids(tasks: &[Task]) -> Vec<String> {
    tasks.iter().map(|t| t.id.clone()).collect()
}

proptest! {
    #[test]
    fn output_is_a_permutation(
        tasks in prop::collection::vec(arb_task(), 0..24),
        mood in arb_mood(),
    ) {
        let out = ReorganizationEngine::new().reorganize(&tasks, mood);
        let mut before = ids(&tasks);
        let mut after = ids(&out);
        before.sort();
        after.sort();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn ineligible_tasks_do_not_move(
        tasks in prop::collection::vec(arb_task(), 0..24),
        mood in arb_mood(),
        pin_strict in any::<bool>(),
    ) {
        let engine = ReorganizationEngine::with_options(ReorganizeOptions { pin_strict });
        let out = engine.reorganize(&tasks, mood);
        for (i, task) in tasks.iter().enumerate() {
            if !engine.is_eligible(task) {
                prop_assert_eq!(&out[i].id, &task.id);
            }
        }
    }

    #[test]
    fn eligible_tasks_are_sorted_and_stable(
        tasks in prop::collection::vec(arb_task(), 0..24),
        mood in arb_mood(),
    ) {
        let engine = ReorganizationEngine::new();
        let input_index = |id: &str| tasks.iter().position(|t| t.id == id).unwrap();

        let out = engine.reorganize(&tasks, mood);
        let eligible: Vec<&Task> = out.iter().filter(|t| engine.is_eligible(t)).collect();
        for pair in eligible.windows(2) {
            let ord = compare(mood, pair[0], pair[1]);
            prop_assert_ne!(ord, std::cmp::Ordering::Greater);
            if ord == std::cmp::Ordering::Equal {
                prop_assert!(input_index(&pair[0].id) < input_index(&pair[1].id));
            }
        }
    }

    #[test]
    fn reorganize_is_idempotent(
        tasks in prop::collection::vec(arb_task(), 0..24),
        mood in arb_mood(),
    ) {
        let engine = ReorganizationEngine::new();
        let once = engine.reorganize(&tasks, mood);
        let twice = engine.reorganize(&once, mood);
        prop_assert_eq!(ids(&once), ids(&twice));
    }
}

#[tokio::test]
async fn test_classify_reorganize_persist() {
    let db = TaskDb::open_memory().unwrap();
    let due = Utc.with_ymd_and_hms(2026, 6, 1, 9, 0, 0).unwrap();

    let mut report = Task::new("Quarterly report", due);
    report.priority = Priority::High;
    let mut inbox = Task::new("Tidy inbox", due);
    inbox.priority = Priority::Low;
    let mut review = Task::new("Review PR", due);
    review.priority = Priority::Medium;
    review.reorganizable = false;
    for task in [&report, &inbox, &review] {
        db.create_task(task).unwrap();
    }

    let assessment = MoodClassifier::default()
        .classify("I'm exhausted and drained")
        .await;
    assert_eq!(assessment.mood, Mood::Tired);
    db.record_mood(&assessment, "I'm exhausted and drained").unwrap();

    let tasks = db.list_tasks().unwrap();
    let reordered = ReorganizationEngine::new().reorganize(&tasks, assessment.mood);
    db.save_order(&reordered).unwrap();

    let titles: Vec<String> = db.list_tasks().unwrap().into_iter().map(|t| t.title).collect();
    assert_eq!(titles, ["Tidy inbox", "Quarterly report", "Review PR"]);

    let history = db.mood_history(5).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].mood, Mood::Tired);
}
