//! Sample tasks for seeding a new account

use crate::models::{NewTask, Priority, TaskStatus};
use chrono::{DateTime, Duration, Utc};

/// (title, description, priority, days from now)
const SAMPLE_TASKS: [(&str, &str, Priority, i64); 12] = [
    (
        "Prepare for Math Test",
        "Review algebra, calculus and statistics. Complete practice questions.",
        Priority::High,
        3,
    ),
    (
        "Get Groceries",
        "Milk, eggs, bread, vegetables, fruits, and snacks for the week.",
        Priority::Medium,
        1,
    ),
    (
        "Hit the Gym",
        "Leg day - 30 min cardio, squats, lunges, and leg press.",
        Priority::Medium,
        1,
    ),
    (
        "Read Research Papers",
        "Complete reading the assigned papers for the literature review.",
        Priority::High,
        5,
    ),
    (
        "Clean Apartment",
        "Vacuum, dust, laundry, and organize desk.",
        Priority::Low,
        2,
    ),
    (
        "Pay Bills",
        "Rent, utilities, phone, and internet bills.",
        Priority::High,
        7,
    ),
    (
        "Call Parents",
        "Weekly catch-up call with family.",
        Priority::Medium,
        2,
    ),
    (
        "Finish Project Report",
        "Complete the final draft and send for review.",
        Priority::High,
        4,
    ),
    (
        "Meal Prep",
        "Prepare lunches and dinners for the workweek.",
        Priority::Medium,
        1,
    ),
    (
        "Submit Assignment",
        "Final check and submit the assignment online.",
        Priority::High,
        2,
    ),
    (
        "Morning Meditation",
        "Practice 15 minutes of mindfulness meditation.",
        Priority::Low,
        1,
    ),
    (
        "Update Resume",
        "Add recent projects and update skills section.",
        Priority::Medium,
        5,
    ),
];

/// The twelve everyday sample tasks, pending and due relative to `now`
pub fn sample_tasks(now: DateTime<Utc>) -> Vec<NewTask> {
    SAMPLE_TASKS
        .iter()
        .map(|(title, description, priority, days)| {
            NewTask::new(*title)
                .with_description(*description)
                .with_priority(*priority)
                .with_status(TaskStatus::Pending)
                .with_due_date(now + Duration::days(*days))
        })
        .collect()
}
