use clap::Subcommand;
use taskdeck_core::{mock, MonthCursor};

use super::{date_or_today, print_json, CmdResult};

#[derive(Subcommand)]
pub enum CalendarAction {
    /// Tasks and marker for one day
    Day {
        /// Date (YYYY-MM-DD); defaults to today
        date: Option<String>,
    },
    /// Tasks from today onwards, earliest first
    Upcoming,
    /// Completion grid for a month
    Month {
        /// Year; defaults to the mock data's year
        #[arg(long, default_value = "2024")]
        year: i32,
        /// Month number (1-12)
        #[arg(long, default_value = "12")]
        month: u32,
    },
}

pub fn run(action: CalendarAction) -> CmdResult {
    let today = date_or_today(None)?;
    let calendar = mock::calendar(today);

    match action {
        CalendarAction::Day { date } => {
            let date = date_or_today(date.as_deref())?;
            print_json(&serde_json::json!({
                "date": date,
                "marker": calendar.day_marker(date),
                "tasks": calendar.tasks_for(date),
            }))
        }
        CalendarAction::Upcoming => print_json(&calendar.upcoming(today)),
        CalendarAction::Month { year, month } => {
            let cursor = MonthCursor::new(year, month).ok_or_else(|| format!("invalid month: {month}"))?;
            let completions = mock::completion_calendar();
            print_json(&serde_json::json!({
                "label": cursor.label(),
                "prev": cursor.prev().label(),
                "next": cursor.next().label(),
                "cells": completions.month(cursor),
            }))
        }
    }
}
