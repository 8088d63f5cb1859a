//! Commit gate: decides when a dice selection becomes final.
//!
//! Two policies are supported. `Auto` runs a progress countdown after the
//! roll and commits when it reaches 100; `Manual` waits for the user to
//! accept or reroll.

mod machine;
mod policy;

pub use machine::{transition, GateInput, GateOutcome, GatePhase, GateState, Transition};
pub use policy::{CommitMode, GatePolicy, PROGRESS_MAX};
