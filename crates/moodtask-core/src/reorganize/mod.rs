//! Mood-conditioned task reordering.
//!
//! Eligible tasks (reorganizable and not completed) are stable-sorted by a
//! mood-specific key and written back into the slots eligible tasks
//! occupied. Every other task keeps its index, so the result is always a
//! permutation of the input.
//!
//! | Mood      | Key                          | Direction  |
//! |-----------|------------------------------|------------|
//! | Tired     | priority rank                | ascending  |
//! | Energetic | priority rank                | descending |
//! | Focused   | importance                   | descending |
//! | Stressed  | due date                     | ascending  |
//! | Happy     | importance + priority rank   | descending |

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::mood::Mood;
use crate::storage::config::ReorganizeConfig;
use crate::task::Task;

/// Engine options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorganizeOptions {
    /// Treat `strict` tasks as pinned in place.
    pub pin_strict: bool,
}

impl From<&ReorganizeConfig> for ReorganizeOptions {
    fn from(config: &ReorganizeConfig) -> Self {
        Self {
            pin_strict: config.pin_strict,
        }
    }
}

/// Reorders tasks according to a mood. Stateless apart from its options.
#[derive(Debug, Clone, Default)]
pub struct ReorganizationEngine {
    options: ReorganizeOptions,
}

impl ReorganizationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ReorganizeOptions) -> Self {
        Self { options }
    }

    /// Whether `task` takes part in reordering.
    pub fn is_eligible(&self, task: &Task) -> bool {
        task.reorganizable && !task.is_completed() && !(self.options.pin_strict && task.strict)
    }

    /// Eligible tasks in their mood order.
    pub fn eligible_order<'a>(&self, tasks: &'a [Task], mood: Mood) -> Vec<&'a Task> {
        let mut eligible: Vec<&Task> = tasks.iter().filter(|t| self.is_eligible(t)).collect();
        // sort_by is stable: equal keys keep their input order.
        eligible.sort_by(|a, b| compare(mood, a, b));
        eligible
    }

    /// Reorder `tasks` for `mood`.
    ///
    /// Ineligible tasks stay at their original indices; eligible tasks are
    /// permuted among the remaining slots.
    pub fn reorganize(&self, tasks: &[Task], mood: Mood) -> Vec<Task> {
        let slots: Vec<usize> = tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| self.is_eligible(t))
            .map(|(i, _)| i)
            .collect();

        let eligible = slots.len();
        let ordered = self.eligible_order(tasks, mood);
        let mut result = tasks.to_vec();
        for (slot, task) in slots.into_iter().zip(ordered) {
            result[slot] = task.clone();
        }

        tracing::debug!(
            %mood,
            total = tasks.len(),
            eligible,
            "reorganized tasks"
        );
        result
    }
}

/// Mood comparator. Exhaustive over [`Mood`].
pub fn compare(mood: Mood, a: &Task, b: &Task) -> Ordering {
    match mood {
        Mood::Tired => a.priority.rank().cmp(&b.priority.rank()),
        Mood::Energetic => b.priority.rank().cmp(&a.priority.rank()),
        Mood::Focused => b.importance.cmp(&a.importance),
        Mood::Stressed => a.due_date.cmp(&b.due_date),
        Mood::Happy => happy_score(b).cmp(&happy_score(a)),
    }
}

fn happy_score(task: &Task) -> u16 {
    u16::from(task.importance) + u16::from(task.priority.rank())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{Priority, TaskStatus};
    use chrono::{Duration, TimeZone, Utc};

    fn task(id: &str, priority: Priority) -> Task {
        let mut t = Task::new(id, Utc.with_ymd_and_hms(2026, 1, 1, 9, 0, 0).unwrap());
        t.id = id.to_string();
        t.priority = priority;
        t
    }

    fn ids(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn tired_puts_easy_tasks_first() {
        let tasks = vec![
            task("h", Priority::High),
            task("l", Priority::Low),
            task("m", Priority::Medium),
        ];
        let out = ReorganizationEngine::new().reorganize(&tasks, Mood::Tired);
        assert_eq!(ids(&out), ["l", "m", "h"]);
    }

    #[test]
    fn energetic_puts_hard_tasks_first() {
        let tasks = vec![
            task("l", Priority::Low),
            task("h", Priority::High),
            task("m", Priority::Medium),
        ];
        let out = ReorganizationEngine::new().reorganize(&tasks, Mood::Energetic);
        assert_eq!(ids(&out), ["h", "m", "l"]);
    }

    #[test]
    fn stressed_sorts_by_due_date() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let mut a = task("d5", Priority::Medium);
        a.due_date = now + Duration::days(5);
        let mut b = task("d1", Priority::Medium);
        b.due_date = now + Duration::days(1);
        let mut c = task("d3", Priority::Medium);
        c.due_date = now + Duration::days(3);

        let out = ReorganizationEngine::new().reorganize(&[a, b, c], Mood::Stressed);
        assert_eq!(ids(&out), ["d1", "d3", "d5"]);
    }

    #[test]
    fn focused_sorts_by_importance() {
        let mut a = task("i3", Priority::High);
        a.importance = 3;
        let mut b = task("i9", Priority::Low);
        b.importance = 9;
        let mut c = task("i6", Priority::Medium);
        c.importance = 6;

        let out = ReorganizationEngine::new().reorganize(&[a, b, c], Mood::Focused);
        assert_eq!(ids(&out), ["i9", "i6", "i3"]);
    }

    #[test]
    fn happy_balances_importance_and_priority() {
        // Scores: 5+3=8, 7+1=8, 4+2=6, 9+2=11
        let mut a = task("a", Priority::High);
        a.importance = 5;
        let mut b = task("b", Priority::Low);
        b.importance = 7;
        let mut c = task("c", Priority::Medium);
        c.importance = 4;
        let mut d = task("d", Priority::Medium);
        d.importance = 9;

        let out = ReorganizationEngine::new().reorganize(&[a, b, c, d], Mood::Happy);
        assert_eq!(ids(&out), ["d", "a", "b", "c"]);
    }

    #[test]
    fn equal_keys_keep_input_order() {
        let tasks = vec![
            task("m1", Priority::Medium),
            task("l1", Priority::Low),
            task("m2", Priority::Medium),
            task("l2", Priority::Low),
        ];
        let out = ReorganizationEngine::new().reorganize(&tasks, Mood::Tired);
        assert_eq!(ids(&out), ["l1", "l2", "m1", "m2"]);
    }

    #[test]
    fn ineligible_tasks_keep_their_positions() {
        let mut pinned = task("pinned", Priority::Low);
        pinned.reorganizable = false;
        let mut done = task("done", Priority::Low);
        done.status = TaskStatus::Completed;

        let tasks = vec![
            task("h", Priority::High),
            pinned,
            task("m", Priority::Medium),
            done,
            task("l", Priority::Low),
        ];
        let out = ReorganizationEngine::new().reorganize(&tasks, Mood::Tired);
        assert_eq!(ids(&out), ["l", "pinned", "m", "done", "h"]);
    }

    #[test]
    fn strict_is_advisory_by_default() {
        let mut strict = task("strict", Priority::High);
        strict.strict = true;
        let tasks = vec![strict, task("l", Priority::Low)];

        let out = ReorganizationEngine::new().reorganize(&tasks, Mood::Tired);
        assert_eq!(ids(&out), ["l", "strict"]);

        let pinning = ReorganizationEngine::with_options(ReorganizeOptions { pin_strict: true });
        let out = pinning.reorganize(&tasks, Mood::Tired);
        assert_eq!(ids(&out), ["strict", "l"]);
    }

    #[test]
    fn eligible_order_excludes_ineligible() {
        let mut done = task("done", Priority::Low);
        done.status = TaskStatus::Completed;
        let tasks = vec![task("h", Priority::High), done, task("l", Priority::Low)];

        let order = ReorganizationEngine::new().eligible_order(&tasks, Mood::Tired);
        let order_ids: Vec<&str> = order.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(order_ids, ["l", "h"]);
    }

    #[test]
    fn empty_input() {
        assert!(ReorganizationEngine::new().reorganize(&[], Mood::Happy).is_empty());
    }
}
