//! # Taskdeck Core Library
//!
//! This library provides the core logic behind the Taskdeck dashboard.
//! All behavior is available through the standalone `taskdeck-cli` binary,
//! which is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Dice**: maps one or two six-sided dice onto an index into a candidate list
//! - **Gate**: the commit gate state machine that turns a roll into a
//!   committed selection, automatically after a countdown or on manual accept
//! - **Roller**: drives the gate with real tokio timers and emits [`Event`]s
//! - **Board / Breakdown / Calendar / Dashboard**: the in-memory views the
//!   roller draws candidates from
//! - **Config**: TOML-based preferences for roller timing and commit mode
//!
//! ## Key Components
//!
//! - [`DiceRoller`]: timer-driven commit gate
//! - [`transition`]: pure gate transition function
//! - [`select`]: dice-to-index selection
//! - [`Config`]: application configuration management

pub mod board;
pub mod breakdown;
pub mod calendar;
pub mod config;
pub mod dashboard;
pub mod dice;
pub mod error;
pub mod events;
pub mod gate;
pub mod mock;
pub mod notice;
pub mod roller;
pub mod schedule;
pub mod task;

pub use board::{BoardTask, NewTask, StatusFilter, TaskBoard, TaskFilter};
pub use breakdown::{Breakdown, BreakdownSimulator, BreakdownStep};
pub use calendar::{CompletionCalendar, MonthCursor, TaskCalendar};
pub use config::Config;
pub use dashboard::{ClockFace, DashboardStats, Deadline};
pub use dice::{select, selection_weights, Candidate, DieSource, ScriptedDice, SeededDice, Selection};
pub use error::{ConfigError, CoreError, GateError, SelectionError, ValidationError};
pub use events::Event;
pub use gate::{transition, CommitMode, GateInput, GateOutcome, GatePhase, GatePolicy, GateState};
pub use notice::{Notice, NoticeLevel};
pub use roller::DiceRoller;
pub use task::{Priority, TaskStatus};
