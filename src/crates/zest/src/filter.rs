//! Task filtering
//!
//! A [`TaskFilter`] combines a free-text search, exact priority, status and
//! workflow matches, and a [`DueWindow`] on the due date. Calendar
//! arithmetic is done in UTC.

use crate::error::{Result, ZestError};
use crate::models::{Priority, Task, TaskStatus};
use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use std::str::FromStr;

/// Due-date window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DueWindow {
    /// No restriction
    #[default]
    All,
    /// Due on the same calendar date as now
    Today,
    /// Due between now and the end of the week (weeks end on Sunday)
    ThisWeek,
    /// Due between now and the end of the current month's last day
    ThisMonth,
    /// Due after now and at most seven days ahead
    Upcoming,
}

impl DueWindow {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Today => "today",
            Self::ThisWeek => "week",
            Self::ThisMonth => "month",
            Self::Upcoming => "upcoming",
        }
    }

    /// Whether a due date falls in this window as seen at `now`
    pub fn contains(&self, due: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match self {
            Self::All => true,
            Self::Today => due.date_naive() == now.date_naive(),
            Self::ThisWeek => {
                let days_left = 7 - i64::from(now.weekday().num_days_from_sunday());
                due >= now && due <= now + Duration::days(days_left)
            }
            Self::ThisMonth => due >= now && due < start_of_next_month(now),
            Self::Upcoming => due > now && due <= now + Duration::days(7),
        }
    }
}

fn start_of_next_month(now: DateTime<Utc>) -> DateTime<Utc> {
    let (year, month) = if now.month() == 12 {
        (now.year() + 1, 1)
    } else {
        (now.year(), now.month() + 1)
    };

    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

impl std::fmt::Display for DueWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DueWindow {
    type Err = ZestError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "all" => Ok(Self::All),
            "today" => Ok(Self::Today),
            "week" => Ok(Self::ThisWeek),
            "month" => Ok(Self::ThisMonth),
            "upcoming" => Ok(Self::Upcoming),
            other => Err(ZestError::InvalidInput(format!(
                "Unknown window '{}' (expected all, today, week, month or upcoming)",
                other
            ))),
        }
    }
}

/// Criteria a task must meet to be shown
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskFilter {
    /// Case-insensitive substring over title, description and tags
    pub search: String,
    pub priority: Option<Priority>,
    pub status: Option<TaskStatus>,
    pub workflow: Option<String>,
    pub window: DueWindow,
}

impl TaskFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_workflow(mut self, workflow: impl Into<String>) -> Self {
        self.workflow = Some(workflow.into());
        self
    }

    pub fn with_window(mut self, window: DueWindow) -> Self {
        self.window = window;
        self
    }

    fn matches_search(&self, task: &Task) -> bool {
        if self.search.is_empty() {
            return true;
        }

        let needle = self.search.to_lowercase();
        task.title.to_lowercase().contains(&needle)
            || task.description.to_lowercase().contains(&needle)
            || task.tags.iter().any(|tag| tag.to_lowercase().contains(&needle))
    }

    /// Whether `task` passes every criterion at `now`
    pub fn matches(&self, task: &Task, now: DateTime<Utc>) -> bool {
        self.matches_search(task)
            && self.priority.map_or(true, |p| task.priority == p)
            && self.status.map_or(true, |s| task.status == s)
            && self
                .workflow
                .as_deref()
                .map_or(true, |w| task.workflow.as_deref() == Some(w))
            && self.window.contains(task.due_date, now)
    }

    /// Tasks passing the filter, in their original order
    pub fn apply<'a>(&self, tasks: &'a [Task], now: DateTime<Utc>) -> Vec<&'a Task> {
        tasks.iter().filter(|task| self.matches(task, now)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewTask;

    // Wednesday
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 4, 30, 10, 0, 0).unwrap()
    }

    fn task(title: &str, due: DateTime<Utc>) -> Task {
        NewTask::new(title).with_due_date(due).into_task(title)
    }

    #[test]
    fn test_search_is_case_insensitive_over_title_description_and_tags() {
        let tasks = vec![
            NewTask::new("Buy MILK").into_task("1"),
            NewTask::new("Errand")
                .with_description("pick up milk")
                .into_task("2"),
            NewTask::new("Shopping")
                .with_tags(vec!["Milkshake".to_string()])
                .into_task("3"),
            NewTask::new("Gym").into_task("4"),
        ];

        let found = TaskFilter::new().with_search("milk").apply(&tasks, Utc::now());
        let ids: Vec<&str> = found.iter().map(|t| t.id.as_str()).collect();

        assert_eq!(ids, vec!["1", "2", "3"]);
        assert_eq!(TaskFilter::new().apply(&tasks, Utc::now()).len(), 4);
    }

    #[test]
    fn test_exact_field_filters() {
        let tasks = vec![
            NewTask::new("a1").with_priority(Priority::High).into_task("1"),
            NewTask::new("a2")
                .with_priority(Priority::High)
                .with_status(TaskStatus::Completed)
                .into_task("2"),
            NewTask::new("a3").with_workflow("Study").into_task("3"),
        ];
        let now = Utc::now();

        assert_eq!(TaskFilter::new().with_priority(Priority::High).apply(&tasks, now).len(), 2);
        assert_eq!(
            TaskFilter::new()
                .with_priority(Priority::High)
                .with_status(TaskStatus::Pending)
                .apply(&tasks, now)
                .len(),
            1
        );
        assert_eq!(TaskFilter::new().with_workflow("Study").apply(&tasks, now)[0].id, "3");
    }

    #[test]
    fn test_today_window() {
        let now = now();
        assert!(DueWindow::Today.contains(Utc.with_ymd_and_hms(2025, 4, 30, 0, 0, 0).unwrap(), now));
        assert!(DueWindow::Today.contains(Utc.with_ymd_and_hms(2025, 4, 30, 23, 59, 0).unwrap(), now));
        assert!(!DueWindow::Today.contains(Utc.with_ymd_and_hms(2025, 5, 1, 0, 0, 0).unwrap(), now));
    }

    #[test]
    fn test_week_window_ends_sunday() {
        let now = now();
        // 7 - 3 = 4 days ahead, Sunday May 4th at the same time of day
        assert!(DueWindow::ThisWeek.contains(Utc.with_ymd_and_hms(2025, 5, 4, 10, 0, 0).unwrap(), now));
        assert!(!DueWindow::ThisWeek.contains(Utc.with_ymd_and_hms(2025, 5, 4, 10, 0, 1).unwrap(), now));
        assert!(!DueWindow::ThisWeek.contains(Utc.with_ymd_and_hms(2025, 4, 30, 9, 0, 0).unwrap(), now));
    }

    #[test]
    fn test_month_window_includes_last_day() {
        let now = Utc.with_ymd_and_hms(2025, 4, 10, 8, 0, 0).unwrap();
        assert!(DueWindow::ThisMonth.contains(Utc.with_ymd_and_hms(2025, 4, 30, 23, 0, 0).unwrap(), now));
        assert!(!DueWindow::ThisMonth.contains(Utc.with_ymd_and_hms(2025, 5, 1, 0, 0, 0).unwrap(), now));

        let december = Utc.with_ymd_and_hms(2025, 12, 20, 8, 0, 0).unwrap();
        assert!(DueWindow::ThisMonth.contains(Utc.with_ymd_and_hms(2025, 12, 31, 12, 0, 0).unwrap(), december));
    }

    #[test]
    fn test_upcoming_window_excludes_now() {
        let now = now();
        let tasks = vec![
            task("now", now),
            task("soon", now + Duration::days(2)),
            task("edge", now + Duration::days(7)),
            task("late", now + Duration::days(8)),
        ];

        let found = TaskFilter::new().with_window(DueWindow::Upcoming).apply(&tasks, now);
        let titles: Vec<&str> = found.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["soon", "edge"]);
    }

    #[test]
    fn test_window_parse() {
        assert_eq!("week".parse::<DueWindow>().unwrap(), DueWindow::ThisWeek);
        assert!("fortnight".parse::<DueWindow>().is_err());
    }
}
