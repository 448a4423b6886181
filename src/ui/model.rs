//! Pure view-model helpers: filtering, overdue marking, selection
//!
//! Filtering maps (task list, filter, reference date) to an
//! order-preserving subset of list indices. The reference date is a
//! `NaiveDate`, so time-of-day can never affect bucketing.

use chrono::NaiveDate;

use crate::task::{Filter, Task};

/// Whether a task belongs to a filter bucket on the given day.
pub fn matches(task: &Task, filter: Filter, today: NaiveDate) -> bool {
    match filter {
        Filter::All => true,
        Filter::Active => !task.completed,
        Filter::Completed => task.completed,
        Filter::Upcoming => task.due_date > today && !task.completed,
        // No completed exclusion: a completed task due today still
        // shows under Today.
        Filter::Today => task.due_date == today,
    }
}

/// Indices of the tasks visible under `filter`, in input order.
pub fn filter_indices(tasks: &[Task], filter: Filter, today: NaiveDate) -> Vec<usize> {
    tasks
        .iter()
        .enumerate()
        .filter(|(_, task)| matches(task, filter, today))
        .map(|(idx, _)| idx)
        .collect()
}

/// Presentation-only flag: incomplete and strictly past due.
pub fn is_overdue(task: &Task, today: NaiveDate) -> bool {
    task.due_date < today && !task.completed
}

/// Keep the cursor on the same task across a reload when possible,
/// otherwise fall back to the first visible task.
pub fn select_by_id(tasks: &[Task], filtered: &[usize], previous_id: Option<i64>) -> Option<usize> {
    if filtered.is_empty() {
        return None;
    }
    if let Some(id) = previous_id {
        if let Some(index) = tasks.iter().position(|task| task.id == Some(id)) {
            if filtered.contains(&index) {
                return Some(index);
            }
        }
    }
    Some(filtered[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("date")
    }

    fn task(id: i64, name: &str, due: NaiveDate, completed: bool) -> Task {
        Task {
            id: Some(id),
            name: name.to_string(),
            description: format!("{name} description"),
            due_date: due,
            completed,
        }
    }

    fn sample(today: NaiveDate) -> Vec<Task> {
        let yesterday = today.pred_opt().expect("yesterday");
        let tomorrow = today.succ_opt().expect("tomorrow");
        vec![
            task(1, "overdue open", yesterday, false),
            task(2, "due today open", today, false),
            task(3, "due today done", today, true),
            task(4, "future open", tomorrow, false),
            task(5, "future done", tomorrow, true),
        ]
    }

    #[test]
    fn all_filter_is_identity() {
        let today = date(2026, 8, 27);
        let tasks = sample(today);
        assert_eq!(
            filter_indices(&tasks, Filter::All, today),
            vec![0, 1, 2, 3, 4]
        );
    }

    #[test]
    fn active_and_completed_partition_the_list() {
        let today = date(2026, 8, 27);
        let tasks = sample(today);
        let active = filter_indices(&tasks, Filter::Active, today);
        let completed = filter_indices(&tasks, Filter::Completed, today);

        let mut union: Vec<usize> = active.iter().chain(completed.iter()).copied().collect();
        union.sort_unstable();
        assert_eq!(union, vec![0, 1, 2, 3, 4]);
        assert!(active.iter().all(|idx| !completed.contains(idx)));
        assert!(active.iter().all(|idx| !tasks[*idx].completed));
        assert!(completed.iter().all(|idx| tasks[*idx].completed));
    }

    #[test]
    fn today_keeps_completed_tasks() {
        let today = date(2026, 8, 27);
        let tasks = sample(today);
        let visible = filter_indices(&tasks, Filter::Today, today);
        assert_eq!(visible, vec![1, 2]);
        assert!(visible.iter().all(|idx| tasks[*idx].due_date == today));
    }

    #[test]
    fn upcoming_excludes_completed_and_past() {
        let today = date(2026, 8, 27);
        let tasks = sample(today);
        let visible = filter_indices(&tasks, Filter::Upcoming, today);
        assert_eq!(visible, vec![3]);
        for idx in visible {
            assert!(tasks[idx].due_date > today);
            assert!(!tasks[idx].completed);
        }
    }

    #[test]
    fn overdue_task_shows_only_under_all_and_active() {
        // Scenario: one incomplete task due yesterday.
        let today = date(2026, 8, 27);
        let yesterday = today.pred_opt().expect("yesterday");
        let tasks = vec![task(1, "A", yesterday, false)];

        assert_eq!(filter_indices(&tasks, Filter::All, today), vec![0]);
        assert_eq!(filter_indices(&tasks, Filter::Active, today), vec![0]);
        assert!(filter_indices(&tasks, Filter::Upcoming, today).is_empty());
        assert!(filter_indices(&tasks, Filter::Today, today).is_empty());
        assert!(is_overdue(&tasks[0], today));
    }

    #[test]
    fn completed_task_due_today_is_not_active_or_upcoming() {
        let today = date(2026, 8, 27);
        let tasks = vec![task(9, "C", today, true)];
        assert_eq!(filter_indices(&tasks, Filter::Today, today), vec![0]);
        assert!(filter_indices(&tasks, Filter::Active, today).is_empty());
        assert!(filter_indices(&tasks, Filter::Upcoming, today).is_empty());
    }

    #[test]
    fn overdue_requires_incomplete() {
        let today = date(2026, 8, 27);
        let yesterday = today.pred_opt().expect("yesterday");
        assert!(is_overdue(&task(1, "open", yesterday, false), today));
        assert!(!is_overdue(&task(2, "done", yesterday, true), today));
        assert!(!is_overdue(&task(3, "today", today, false), today));
    }

    #[test]
    fn select_by_id_prefers_previous_selection() {
        let today = date(2026, 8, 27);
        let tasks = sample(today);
        let filtered = filter_indices(&tasks, Filter::All, today);
        assert_eq!(select_by_id(&tasks, &filtered, Some(3)), Some(2));
        assert_eq!(select_by_id(&tasks, &filtered, Some(42)), Some(0));
        assert_eq!(select_by_id(&tasks, &filtered, None), Some(0));
        assert_eq!(select_by_id(&tasks, &[], Some(1)), None);
    }

    #[test]
    fn select_by_id_falls_back_when_task_left_the_bucket() {
        let today = date(2026, 8, 27);
        let tasks = sample(today);
        let active = filter_indices(&tasks, Filter::Active, today);
        // Task 3 is completed, so it is not in the active bucket.
        assert_eq!(select_by_id(&tasks, &active, Some(3)), Some(active[0]));
    }
}
