use chrono::Local;
use taskdeck_core::dashboard::{earliest_deadline, summarize_metrics, upcoming_deadlines};
use taskdeck_core::{mock, ClockFace, DashboardStats};

use super::{print_json, CmdResult};

pub fn run() -> CmdResult {
    let now = Local::now();
    let board = mock::board();
    let stats = mock::dashboard_stats();
    let deadlines = mock::deadlines();
    // The seeded deadlines are fixed dates, so count from the earliest one.
    let since = earliest_deadline(&deadlines).unwrap_or_else(|| now.date_naive());

    print_json(&serde_json::json!({
        "stats": stats,
        "completion_rate": stats.completion_rate(),
        "board": DashboardStats::from_board(&board, now.date_naive()),
        "deadlines": upcoming_deadlines(&deadlines, since),
        "metrics": summarize_metrics(&mock::weekly_metrics()),
        "clock": ClockFace::at(now.time()),
    }))
}
