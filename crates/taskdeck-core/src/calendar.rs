//! Calendar views: tasks bucketed by day, and a contribution-style
//! completion grid.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::task::{Priority, TaskStatus};

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarTask {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    pub priority: Priority,
    pub status: TaskStatus,
    pub estimated_time: String,
}

/// Indicator drawn under a day that has tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayMarker {
    pub count: usize,
    /// Marker is highlighted when any task that day is high priority.
    pub has_high_priority: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskCalendar {
    tasks: Vec<CalendarTask>,
}

impl TaskCalendar {
    pub fn new(tasks: Vec<CalendarTask>) -> Self {
        Self { tasks }
    }

    pub fn tasks(&self) -> &[CalendarTask] {
        &self.tasks
    }

    pub fn tasks_for(&self, date: NaiveDate) -> Vec<&CalendarTask> {
        self.tasks.iter().filter(|t| t.date == date).collect()
    }

    /// `None` for days without tasks.
    pub fn day_marker(&self, date: NaiveDate) -> Option<DayMarker> {
        let day = self.tasks_for(date);
        if day.is_empty() {
            return None;
        }
        Some(DayMarker {
            count: day.len(),
            has_high_priority: day.iter().any(|t| t.priority == Priority::High),
        })
    }

    /// Tasks on or after `today`, earliest first. Same-day tasks keep their
    /// insertion order.
    pub fn upcoming(&self, today: NaiveDate) -> Vec<&CalendarTask> {
        let mut upcoming: Vec<_> = self.tasks.iter().filter(|t| t.date >= today).collect();
        upcoming.sort_by_key(|t| t.date);
        upcoming
    }
}

/// A calendar month, used to walk the completion grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonthCursor {
    year: i32,
    month: u32,
}

impl MonthCursor {
    /// `None` unless `month` is in `1..=12`.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn prev(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                month: self.month - 1,
                ..self
            }
        }
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                month: self.month + 1,
                ..self
            }
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    pub fn days_in_month(&self) -> u32 {
        let next = self.next().first_day();
        next.signed_duration_since(self.first_day()).num_days() as u32
    }

    pub fn day(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    /// Sunday-first grid: leading `None`s up to the first weekday, then the
    /// day numbers.
    pub fn grid(&self) -> Vec<Option<u32>> {
        let leading = self.first_day().weekday().num_days_from_sunday() as usize;
        let mut cells = vec![None; leading];
        cells.extend((1..=self.days_in_month()).map(Some));
        cells
    }

    /// Label such as "Dec 2024".
    pub fn label(&self) -> String {
        format!("{} {}", MONTH_NAMES[(self.month - 1) as usize], self.year)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCompletion {
    pub completed: u32,
    pub total: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionStatus {
    /// Every task that day was finished.
    Completed,
    Incomplete,
    /// No data for the day.
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridCell {
    pub day: u32,
    pub status: CompletionStatus,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompletionCalendar {
    days: BTreeMap<NaiveDate, DayCompletion>,
}

impl CompletionCalendar {
    pub fn new(days: impl IntoIterator<Item = (NaiveDate, DayCompletion)>) -> Self {
        Self {
            days: days.into_iter().collect(),
        }
    }

    pub fn record(&mut self, date: NaiveDate, completion: DayCompletion) {
        self.days.insert(date, completion);
    }

    pub fn day_status(&self, date: NaiveDate) -> CompletionStatus {
        match self.days.get(&date) {
            None => CompletionStatus::None,
            Some(d) if d.completed == d.total => CompletionStatus::Completed,
            Some(_) => CompletionStatus::Incomplete,
        }
    }

    /// Month grid with a status on every real day.
    pub fn month(&self, cursor: MonthCursor) -> Vec<Option<GridCell>> {
        cursor
            .grid()
            .into_iter()
            .map(|cell| {
                let day = cell?;
                let status = cursor
                    .day(day)
                    .map(|d| self.day_status(d))
                    .unwrap_or(CompletionStatus::None);
                Some(GridCell { day, status })
            })
            .collect()
    }
}
