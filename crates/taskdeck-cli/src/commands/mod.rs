pub mod board;
pub mod breakdown;
pub mod calendar;
pub mod config;
pub mod dashboard;
pub mod roll;

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Parse a `YYYY-MM-DD` argument; today when absent.
pub fn date_or_today(raw: Option<&str>) -> Result<chrono::NaiveDate, Box<dyn std::error::Error>> {
    match raw {
        Some(s) => Ok(chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|e| format!("invalid date '{s}': {e}"))?),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

/// Current-thread runtime for commands that wait on timers.
pub fn runtime() -> std::io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread().enable_time().build()
}

pub fn print_json<T: serde::Serialize>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
