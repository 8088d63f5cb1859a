use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Progress value at which an auto-commit fires.
pub const PROGRESS_MAX: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitMode {
    /// Commit after the countdown completes.
    #[default]
    Auto,
    /// Wait for an explicit accept or reroll.
    Manual,
}

impl std::str::FromStr for CommitMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(CommitMode::Auto),
            "manual" => Ok(CommitMode::Manual),
            _ => Err(format!("invalid commit mode: {s}. Use 'auto' or 'manual'")),
        }
    }
}

impl std::fmt::Display for CommitMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommitMode::Auto => write!(f, "auto"),
            CommitMode::Manual => write!(f, "manual"),
        }
    }
}

/// Timing and mode for one roller.
///
/// The defaults give a 1.5 s roll animation and a 3 s countdown
/// (50 ticks of 60 ms, +2 progress per tick).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatePolicy {
    pub mode: CommitMode,
    /// Progress added on every countdown tick.
    pub progress_step: u8,
    pub tick_interval_ms: u64,
    /// Simulated roll animation before the dice settle.
    pub roll_delay_ms: u64,
}

impl Default for GatePolicy {
    fn default() -> Self {
        Self {
            mode: CommitMode::Auto,
            progress_step: 2,
            tick_interval_ms: 60,
            roll_delay_ms: 1500,
        }
    }
}

impl GatePolicy {
    pub fn manual() -> Self {
        Self {
            mode: CommitMode::Manual,
            ..Self::default()
        }
    }

    /// Progress step, never zero.
    pub fn step(&self) -> u8 {
        self.progress_step.max(1)
    }

    /// Ticks from progress 0 to commit.
    pub fn ticks_to_commit(&self) -> u32 {
        ticks_between(0, self.step())
    }

    /// Countdown time left at `progress`.
    pub fn remaining_ms(&self, progress: u8) -> u64 {
        ticks_between(progress, self.step()) as u64 * self.tick_interval_ms
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    pub fn roll_delay(&self) -> Duration {
        Duration::from_millis(self.roll_delay_ms)
    }
}

fn ticks_between(progress: u8, step: u8) -> u32 {
    let left = PROGRESS_MAX.saturating_sub(progress) as u32;
    left.div_ceil(step as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_countdown_is_three_seconds() {
        let policy = GatePolicy::default();
        assert_eq!(policy.ticks_to_commit(), 50);
        assert_eq!(policy.remaining_ms(0), 3000);
        assert_eq!(policy.remaining_ms(50), 1500);
        assert_eq!(policy.remaining_ms(100), 0);
    }

    #[test]
    fn uneven_step_rounds_up() {
        let policy = GatePolicy {
            progress_step: 3,
            ..GatePolicy::default()
        };
        assert_eq!(policy.ticks_to_commit(), 34);
    }

    #[test]
    fn zero_step_is_treated_as_one() {
        let policy = GatePolicy {
            progress_step: 0,
            ..GatePolicy::default()
        };
        assert_eq!(policy.step(), 1);
        assert_eq!(policy.ticks_to_commit(), 100);
    }

    #[test]
    fn commit_mode_parses_case_insensitively() {
        assert_eq!("Manual".parse::<CommitMode>(), Ok(CommitMode::Manual));
        assert_eq!("auto".parse::<CommitMode>(), Ok(CommitMode::Auto));
        assert!("later".parse::<CommitMode>().is_err());
    }
}
