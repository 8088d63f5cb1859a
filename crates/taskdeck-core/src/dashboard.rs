//! Dashboard figures derived from task data.

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::board::TaskBoard;
use crate::task::TaskStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    /// Tasks due on the reference day.
    pub today: usize,
}

impl DashboardStats {
    /// Count board tasks. Anything not completed counts as pending.
    pub fn from_board(board: &TaskBoard, today: NaiveDate) -> Self {
        let total = board.len();
        let completed = board.count(TaskStatus::Completed);
        Self {
            total,
            completed,
            pending: total - completed,
            today: board
                .tasks()
                .iter()
                .filter(|t| t.due_date == Some(today))
                .count(),
        }
    }

    /// Completed share in percent; 0 when there are no tasks.
    pub fn completion_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.completed as f64 / self.total as f64 * 100.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeadlinePriority {
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deadline {
    pub task: String,
    pub date: NaiveDate,
    pub priority: DeadlinePriority,
}

/// Deadlines on or after `today`, soonest first, most urgent first on ties.
pub fn upcoming_deadlines(deadlines: &[Deadline], today: NaiveDate) -> Vec<&Deadline> {
    let mut upcoming: Vec<_> = deadlines.iter().filter(|d| d.date >= today).collect();
    upcoming.sort_by(|a, b| a.date.cmp(&b.date).then(b.priority.cmp(&a.priority)));
    upcoming
}

/// Date of the soonest deadline, `None` for an empty list.
pub fn earliest_deadline(deadlines: &[Deadline]) -> Option<NaiveDate> {
    deadlines.iter().map(|d| d.date).min()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyMetric {
    pub week: String,
    pub productivity: u32,
    pub quality: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricSummary {
    pub avg_productivity: f64,
    pub avg_quality: f64,
    /// Last week minus first week.
    pub productivity_trend: i64,
    pub quality_trend: i64,
}

pub fn summarize_metrics(series: &[WeeklyMetric]) -> Option<MetricSummary> {
    let (first, last) = (series.first()?, series.last()?);
    let n = series.len() as f64;
    Some(MetricSummary {
        avg_productivity: series.iter().map(|m| m.productivity as f64).sum::<f64>() / n,
        avg_quality: series.iter().map(|m| m.quality as f64).sum::<f64>() / n,
        productivity_trend: last.productivity as i64 - first.productivity as i64,
        quality_trend: last.quality as i64 - first.quality as i64,
    })
}

/// Hand angles for an analog 12-hour clock, in degrees.
///
/// Zero degrees points at 3 o'clock, so every angle carries a -90 offset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClockFace {
    pub hour: f64,
    pub minute: f64,
    pub second: f64,
}

impl ClockFace {
    pub fn at(time: NaiveTime) -> Self {
        let hours = (time.hour() % 12) as f64;
        let minutes = time.minute() as f64;
        let seconds = time.second() as f64;
        Self {
            hour: hours * 30.0 + minutes * 0.5 - 90.0,
            minute: minutes * 6.0 - 90.0,
            second: seconds * 6.0 - 90.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn completion_rate_of_mock_dashboard() {
        let stats = mock::dashboard_stats();
        assert_eq!(stats.total, 24);
        assert!((stats.completion_rate() - 75.0).abs() < 1e-9);
        assert_eq!(DashboardStats::default().completion_rate(), 0.0);
    }

    #[test]
    fn stats_from_board() {
        let board = mock::board();
        let stats = DashboardStats::from_board(&board, date(2024, 12, 24));
        assert_eq!(stats.total, 3);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.pending, 2);
        assert_eq!(stats.today, 1);
    }

    #[test]
    fn earliest_deadline_keeps_every_seeded_deadline_upcoming() {
        let deadlines = mock::deadlines();
        let since = earliest_deadline(&deadlines).unwrap();
        assert_eq!(since, date(2024, 12, 24));
        assert_eq!(upcoming_deadlines(&deadlines, since).len(), deadlines.len());
        assert_eq!(earliest_deadline(&[]), None);
    }

    #[test]
    fn deadlines_sorted_by_date_then_urgency() {
        let mut deadlines = mock::deadlines();
        deadlines.push(Deadline {
            task: "Same-day review".into(),
            date: date(2024, 12, 24),
            priority: DeadlinePriority::Medium,
        });
        let upcoming = upcoming_deadlines(&deadlines, date(2024, 12, 24));
        assert_eq!(upcoming.len(), 4);
        assert_eq!(upcoming[0].priority, DeadlinePriority::Critical);
        assert_eq!(upcoming[1].task, "Same-day review");

        assert_eq!(upcoming_deadlines(&deadlines, date(2024, 12, 27)).len(), 1);
    }

    #[test]
    fn metric_summary() {
        let summary = summarize_metrics(&mock::weekly_metrics()).unwrap();
        assert!((summary.avg_productivity - 80.166_666).abs() < 1e-3);
        assert_eq!(summary.productivity_trend, 23);
        assert_eq!(summary.quality_trend, 40);
        assert!(summarize_metrics(&[]).is_none());
    }

    #[test]
    fn clock_angles() {
        let face = ClockFace::at(NaiveTime::from_hms_opt(15, 30, 15).unwrap());
        assert_eq!(face.hour, 3.0 * 30.0 + 15.0 - 90.0);
        assert_eq!(face.minute, 90.0);
        assert_eq!(face.second, 0.0);

        let noon = ClockFace::at(NaiveTime::from_hms_opt(12, 0, 0).unwrap());
        assert_eq!(noon.hour, -90.0);
    }
}
