//! Seed data. Every view starts from these sets; nothing is loaded from or
//! written to disk.

use chrono::{Days, NaiveDate};

use crate::board::{BoardTask, TaskBoard};
use crate::calendar::{CalendarTask, CompletionCalendar, DayCompletion};
use crate::dashboard::{DashboardStats, Deadline, DeadlinePriority, WeeklyMetric};
use crate::task::{Priority, TaskStatus};

fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

pub fn board() -> TaskBoard {
    TaskBoard::new(vec![
        BoardTask {
            id: "1".into(),
            title: "Design system documentation".into(),
            description: "Create comprehensive documentation for the design system components and guidelines"
                .into(),
            priority: Priority::High,
            status: TaskStatus::InProgress,
            due_date: ymd(2024, 12, 25),
            estimated_time: "4 hours".into(),
            category: "Documentation".into(),
        },
        BoardTask {
            id: "2".into(),
            title: "Code review for feature branch".into(),
            description: "Review pull request for new authentication feature".into(),
            priority: Priority::Medium,
            status: TaskStatus::Pending,
            due_date: ymd(2024, 12, 24),
            estimated_time: "1 hour".into(),
            category: "Development".into(),
        },
        BoardTask {
            id: "3".into(),
            title: "Update project dependencies".into(),
            description: "Update all npm packages to latest stable versions".into(),
            priority: Priority::Low,
            status: TaskStatus::Completed,
            due_date: ymd(2024, 12, 23),
            estimated_time: "2 hours".into(),
            category: "Maintenance".into(),
        },
    ])
}

/// Calendar tasks spread over `today` and the two following days.
pub fn calendar(today: NaiveDate) -> crate::calendar::TaskCalendar {
    let plus = |n: u64| today.checked_add_days(Days::new(n)).unwrap_or(today);
    let task = |id: &str, title: &str, date: NaiveDate, priority: Priority, status: TaskStatus, estimated_time: &str| CalendarTask {
        id: id.into(),
        title: title.into(),
        date,
        priority,
        status,
        estimated_time: estimated_time.into(),
    };
    crate::calendar::TaskCalendar::new(vec![
        task("1", "Review project proposal", today, Priority::High, TaskStatus::Pending, "2 hours"),
        task("2", "Team standup meeting", today, Priority::Medium, TaskStatus::Completed, "30 minutes"),
        task("3", "Update documentation", plus(1), Priority::Low, TaskStatus::Pending, "1 hour"),
        task("4", "Client presentation prep", plus(2), Priority::High, TaskStatus::InProgress, "3 hours"),
    ])
}

pub fn completion_calendar() -> CompletionCalendar {
    let days = [
        (1, 5, 5),
        (2, 3, 4),
        (3, 2, 2),
        (15, 4, 6),
        (20, 1, 1),
        (24, 0, 3),
    ];
    CompletionCalendar::new(days.into_iter().filter_map(|(day, completed, total)| {
        Some((ymd(2024, 12, day)?, DayCompletion { completed, total }))
    }))
}

pub fn dashboard_stats() -> DashboardStats {
    DashboardStats {
        total: 24,
        completed: 18,
        pending: 6,
        today: 5,
    }
}

pub fn deadlines() -> Vec<Deadline> {
    [
        ("Product launch presentation", 24, DeadlinePriority::Critical),
        ("Budget review meeting", 26, DeadlinePriority::High),
        ("Team retrospective", 28, DeadlinePriority::Medium),
    ]
    .into_iter()
    .filter_map(|(task, day, priority)| {
        Some(Deadline {
            task: task.into(),
            date: ymd(2024, 12, day)?,
            priority,
        })
    })
    .collect()
}

pub fn weekly_metrics() -> Vec<WeeklyMetric> {
    [(65, 45), (75, 55), (85, 70), (78, 65), (90, 80), (88, 85)]
        .into_iter()
        .enumerate()
        .map(|(i, (productivity, quality))| WeeklyMetric {
            week: format!("W{}", i + 1),
            productivity,
            quality,
        })
        .collect()
}
