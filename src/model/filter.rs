use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::date_range::{rolling_window, DateRange};
use super::task::{Category, Task};

/// Rolling lookahead measured in whole weeks from today.
///
/// Only these spans exist, so a zero or negative window is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationWindow {
    OneWeek,
    TwoWeeks,
    ThreeWeeks,
}

impl DurationWindow {
    pub const ALL: [DurationWindow; 3] = [
        DurationWindow::OneWeek,
        DurationWindow::TwoWeeks,
        DurationWindow::ThreeWeeks,
    ];

    pub fn weeks(&self) -> i64 {
        match self {
            DurationWindow::OneWeek => 1,
            DurationWindow::TwoWeeks => 2,
            DurationWindow::ThreeWeeks => 3,
        }
    }

    /// The lookahead range this window spans, anchored at `today`.
    pub fn window(&self, today: NaiveDate) -> DateRange {
        rolling_window(today, self.weeks())
    }

    pub fn label(&self) -> &'static str {
        match self {
            DurationWindow::OneWeek => "Next week",
            DurationWindow::TwoWeeks => "Next 2 weeks",
            DurationWindow::ThreeWeeks => "Next 3 weeks",
        }
    }
}

/// Active view criteria. The three parts compose with AND; each part in
/// its neutral state passes everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    /// Categories to keep; the empty set keeps every category.
    #[serde(default)]
    pub categories: BTreeSet<Category>,
    /// Optional lookahead window anchored at today; `None` is unbounded.
    #[serde(default)]
    pub duration: Option<DurationWindow>,
    /// Case-insensitive substring on the task name; blank keeps everything.
    #[serde(default)]
    pub search_query: String,
}

impl FilterState {
    /// True when every task passes untouched.
    pub fn is_default(&self) -> bool {
        self.categories.is_empty()
            && self.duration.is_none()
            && self.search_query.trim().is_empty()
    }

    /// Does `task` survive all three criteria? The duration test is an
    /// overlap, not containment: a task merely straddling the window stays.
    pub fn matches(&self, task: &Task, today: NaiveDate) -> bool {
        if !self.categories.is_empty() && !self.categories.contains(&task.category) {
            return false;
        }
        if let Some(window) = self.duration {
            if !task.range().overlaps(&window.window(today)) {
                return false;
            }
        }
        match NameMatcher::new(&self.search_query) {
            Some(matcher) => matcher.matches(&task.name),
            None => true,
        }
    }
}

/// Partial filter update; `None` fields keep their current value.
#[derive(Debug, Clone, Default)]
pub struct FilterUpdate {
    pub categories: Option<BTreeSet<Category>>,
    pub duration: Option<Option<DurationWindow>>,
    pub search_query: Option<String>,
}

/// Keep the tasks that pass `filter`, preserving input order. Pure: the
/// input slice is never reordered or mutated.
pub fn filter_tasks<'a>(tasks: &'a [Task], filter: &FilterState, today: NaiveDate) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|task| filter.matches(task, today))
        .collect()
}

/// Case-insensitive substring matcher. Blank queries produce no matcher,
/// which callers read as "keep everything".
struct NameMatcher {
    needle: String,
}

impl NameMatcher {
    fn new(query: &str) -> Option<Self> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self {
                needle: trimmed.to_lowercase(),
            })
        }
    }

    fn matches(&self, name: &str) -> bool {
        name.to_lowercase().contains(&self.needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).expect("valid date")
    }

    fn today() -> NaiveDate {
        d(2024, 6, 20)
    }

    fn board() -> Vec<Task> {
        let mut review = Task::new("Design review", d(2024, 6, 10), d(2024, 6, 12));
        review.category = Category::Review;
        let mut fix = Task::new("Fix login bug", d(2024, 6, 18), d(2024, 6, 21));
        fix.category = Category::InProgress;
        let mut ship = Task::new("Ship release", d(2024, 6, 27), d(2024, 6, 27));
        ship.category = Category::Todo;
        vec![review, fix, ship]
    }

    fn names<'a>(tasks: &[&'a Task]) -> Vec<&'a str> {
        tasks.iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn default_filter_keeps_everything_in_order() {
        let tasks = board();
        let filter = FilterState::default();
        assert!(filter.is_default());
        let visible = filter_tasks(&tasks, &filter, today());
        assert_eq!(
            names(&visible),
            ["Design review", "Fix login bug", "Ship release"]
        );
    }

    #[test]
    fn empty_category_set_passes_all_categories() {
        let tasks = board();
        let filter = FilterState {
            categories: BTreeSet::new(),
            ..Default::default()
        };
        assert_eq!(filter_tasks(&tasks, &filter, today()).len(), 3);
    }

    #[test]
    fn category_set_keeps_only_members() {
        let tasks = board();
        let mut filter = FilterState::default();
        filter.categories.insert(Category::Review);
        filter.categories.insert(Category::Todo);
        let visible = filter_tasks(&tasks, &filter, today());
        assert_eq!(names(&visible), ["Design review", "Ship release"]);
    }

    #[test]
    fn one_week_window_drops_tasks_already_over() {
        // Window 2024-06-20 ..= 2024-06-27; the review ended on the 12th.
        let tasks = board();
        let filter = FilterState {
            duration: Some(DurationWindow::OneWeek),
            ..Default::default()
        };
        let visible = filter_tasks(&tasks, &filter, today());
        assert_eq!(names(&visible), ["Fix login bug", "Ship release"]);
    }

    #[test]
    fn window_test_is_overlap_not_containment() {
        // Starts inside the one-week window, ends far outside it.
        let long = Task::new("Quarter planning", d(2024, 6, 26), d(2024, 7, 20));
        let filter = FilterState {
            duration: Some(DurationWindow::OneWeek),
            ..Default::default()
        };
        assert!(filter.matches(&long, today()));
    }

    #[test]
    fn single_day_task_on_the_window_edge_stays() {
        let edge = Task::new("Edge case", d(2024, 6, 27), d(2024, 6, 27));
        let filter = FilterState {
            duration: Some(DurationWindow::OneWeek),
            ..Default::default()
        };
        assert!(filter.matches(&edge, today()));
        let past = Task::new("Yesterday", d(2024, 6, 19), d(2024, 6, 19));
        assert!(!filter.matches(&past, today()));
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let tasks = board();
        let filter = FilterState {
            search_query: "LOGIN".to_string(),
            ..Default::default()
        };
        let visible = filter_tasks(&tasks, &filter, today());
        assert_eq!(names(&visible), ["Fix login bug"]);
    }

    #[test]
    fn blank_search_keeps_everything() {
        let tasks = board();
        let filter = FilterState {
            search_query: "   ".to_string(),
            ..Default::default()
        };
        assert_eq!(filter_tasks(&tasks, &filter, today()).len(), 3);
    }

    #[test]
    fn criteria_compose_with_and() {
        let tasks = board();
        let mut filter = FilterState {
            duration: Some(DurationWindow::OneWeek),
            search_query: "i".to_string(),
            ..Default::default()
        };
        filter.categories.insert(Category::InProgress);
        // "Design review" matches the query but fails category and window.
        let visible = filter_tasks(&tasks, &filter, today());
        assert_eq!(names(&visible), ["Fix login bug"]);
    }

    #[test]
    fn filtering_twice_changes_nothing() {
        let tasks = board();
        let mut filter = FilterState {
            search_query: "e".to_string(),
            ..Default::default()
        };
        filter.categories.insert(Category::Review);
        filter.categories.insert(Category::Todo);

        let once: Vec<Task> = filter_tasks(&tasks, &filter, today())
            .into_iter()
            .cloned()
            .collect();
        let twice = filter_tasks(&once, &filter, today());
        let once_ids: Vec<_> = once.iter().map(|t| t.id).collect();
        let twice_ids: Vec<_> = twice.iter().map(|t| t.id).collect();
        assert_eq!(once_ids, twice_ids);
    }

    #[test]
    fn window_spans_match_their_week_counts() {
        assert_eq!(DurationWindow::OneWeek.window(today()).end, d(2024, 6, 27));
        assert_eq!(DurationWindow::TwoWeeks.window(today()).end, d(2024, 7, 4));
        assert_eq!(DurationWindow::ThreeWeeks.window(today()).end, d(2024, 7, 11));
    }
}
