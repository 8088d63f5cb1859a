//! Commit gate state machine.
//!
//! ## State Transitions
//!
//! ```text
//! Idle --Roll--> Rolling --Rolled--> Counting               (auto)
//!                                \-> AwaitingConfirmation   (manual)
//!
//! Counting --Tick--> Counting | Idle + Committed (progress >= 100)
//! AwaitingConfirmation --Accept--> Idle + Committed
//! AwaitingConfirmation --Reroll--> Rolling + Rerolled
//! * --Teardown--> Idle + Cancelled
//! ```
//!
//! [`transition`] is pure: it never mutates its input and never reads the
//! clock. Timers live in the roller, which feeds `Tick` inputs in.

use serde::{Deserialize, Serialize};

use super::policy::{CommitMode, GatePolicy, PROGRESS_MAX};
use crate::dice::Selection;
use crate::error::GateError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatePhase {
    Idle,
    Rolling,
    Counting,
    AwaitingConfirmation,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum GateState {
    #[default]
    Idle,
    Rolling,
    Counting {
        selection: Selection,
        progress: u8,
    },
    AwaitingConfirmation {
        selection: Selection,
    },
}

impl GateState {
    pub fn phase(&self) -> GatePhase {
        match self {
            GateState::Idle => GatePhase::Idle,
            GateState::Rolling => GatePhase::Rolling,
            GateState::Counting { .. } => GatePhase::Counting,
            GateState::AwaitingConfirmation { .. } => GatePhase::AwaitingConfirmation,
        }
    }

    /// Selection waiting to be committed, if any.
    pub fn selection(&self) -> Option<&Selection> {
        match self {
            GateState::Counting { selection, .. }
            | GateState::AwaitingConfirmation { selection } => Some(selection),
            _ => None,
        }
    }

    pub fn progress(&self) -> Option<u8> {
        match self {
            GateState::Counting { progress, .. } => Some(*progress),
            _ => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, GateState::Idle)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "input", rename_all = "snake_case")]
pub enum GateInput {
    /// User asked for a roll.
    Roll,
    /// Dice settled on a selection.
    Rolled { selection: Selection },
    /// Countdown timer fired.
    Tick,
    Accept,
    Reroll,
    /// Owner is going away; drop whatever is in flight.
    Teardown,
}

/// Side effect the caller must act on after a transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GateOutcome {
    /// Selection is final; hand it to the caller.
    Committed { selection: Selection },
    /// Prior selection discarded; the caller must roll again.
    Rerolled { discarded: Selection },
    /// An in-flight roll or selection was dropped.
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub next: GateState,
    pub outcome: Option<GateOutcome>,
}

impl Transition {
    fn to(next: GateState) -> Self {
        Self { next, outcome: None }
    }

    fn with(next: GateState, outcome: GateOutcome) -> Self {
        Self {
            next,
            outcome: Some(outcome),
        }
    }
}

/// Apply `input` to `state` under `policy`.
///
/// # Errors
///
/// Returns [`GateError::InvalidTransition`] when the input makes no sense in
/// the current phase (accepting while idle, rolling twice, ...). Stray
/// countdown ticks outside `Counting` are ignored rather than rejected.
pub fn transition(
    state: &GateState,
    input: GateInput,
    policy: &GatePolicy,
) -> Result<Transition, GateError> {
    match (state, input) {
        (GateState::Idle, GateInput::Roll) => Ok(Transition::to(GateState::Rolling)),

        (GateState::Rolling, GateInput::Rolled { selection }) => Ok(Transition::to(match policy.mode {
            CommitMode::Auto => GateState::Counting {
                selection,
                progress: 0,
            },
            CommitMode::Manual => GateState::AwaitingConfirmation { selection },
        })),

        (GateState::Counting { selection, progress }, GateInput::Tick) => {
            let progress = progress.saturating_add(policy.step()).min(PROGRESS_MAX);
            if progress >= PROGRESS_MAX {
                Ok(Transition::with(
                    GateState::Idle,
                    GateOutcome::Committed {
                        selection: selection.clone(),
                    },
                ))
            } else {
                Ok(Transition::to(GateState::Counting {
                    selection: selection.clone(),
                    progress,
                }))
            }
        }
        (_, GateInput::Tick) => Ok(Transition::to(state.clone())),

        (GateState::AwaitingConfirmation { selection }, GateInput::Accept) => Ok(Transition::with(
            GateState::Idle,
            GateOutcome::Committed {
                selection: selection.clone(),
            },
        )),
        (GateState::AwaitingConfirmation { selection }, GateInput::Reroll) => Ok(Transition::with(
            GateState::Rolling,
            GateOutcome::Rerolled {
                discarded: selection.clone(),
            },
        )),

        (GateState::Idle, GateInput::Teardown) => Ok(Transition::to(GateState::Idle)),
        (_, GateInput::Teardown) => Ok(Transition::with(GateState::Idle, GateOutcome::Cancelled)),

        (state, input) => Err(GateError::InvalidTransition {
            from: state.phase(),
            input,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::RollOutcome;

    fn selection(index: usize, faces: Vec<u8>) -> Selection {
        Selection {
            roll: RollOutcome::new(faces),
            index,
        }
    }

    fn apply(state: GateState, input: GateInput, policy: &GatePolicy) -> Transition {
        transition(&state, input, policy).unwrap()
    }

    #[test]
    fn auto_commit_after_fifty_ticks_exactly_once() {
        let policy = GatePolicy::default();
        let rolling = apply(GateState::Idle, GateInput::Roll, &policy).next;
        let mut state = apply(
            rolling,
            GateInput::Rolled {
                selection: selection(2, vec![3]),
            },
            &policy,
        )
        .next;
        assert_eq!(state.progress(), Some(0));

        let mut commits = 0;
        let mut ticks = 0;
        while !state.is_idle() {
            let t = apply(state, GateInput::Tick, &policy);
            ticks += 1;
            if let Some(GateOutcome::Committed { selection }) = t.outcome {
                assert_eq!(selection.index, 2);
                commits += 1;
            }
            state = t.next;
        }
        assert_eq!(ticks, 50);
        assert_eq!(commits, 1);

        // Late ticks after the commit are ignored.
        let late = apply(state, GateInput::Tick, &policy);
        assert!(late.next.is_idle());
        assert!(late.outcome.is_none());
    }

    #[test]
    fn progress_reaches_exactly_one_hundred_before_commit() {
        let policy = GatePolicy::default();
        let mut state = GateState::Counting {
            selection: selection(0, vec![1]),
            progress: 0,
        };
        for _ in 0..49 {
            state = apply(state, GateInput::Tick, &policy).next;
        }
        assert_eq!(state.progress(), Some(98));
        let last = apply(state, GateInput::Tick, &policy);
        assert!(matches!(last.outcome, Some(GateOutcome::Committed { .. })));
    }

    #[test]
    fn manual_accept_commits() {
        let policy = GatePolicy::manual();
        let state = apply(
            GateState::Rolling,
            GateInput::Rolled {
                selection: selection(1, vec![2]),
            },
            &policy,
        )
        .next;
        assert_eq!(state.phase(), GatePhase::AwaitingConfirmation);

        let t = apply(state, GateInput::Accept, &policy);
        assert!(t.next.is_idle());
        assert_eq!(
            t.outcome,
            Some(GateOutcome::Committed {
                selection: selection(1, vec![2])
            })
        );
    }

    #[test]
    fn manual_reroll_discards_selection() {
        let policy = GatePolicy::manual();
        let state = GateState::AwaitingConfirmation {
            selection: selection(4, vec![5]),
        };
        let t = apply(state, GateInput::Reroll, &policy);
        assert_eq!(t.next, GateState::Rolling);
        assert!(t.next.selection().is_none());
        assert_eq!(
            t.outcome,
            Some(GateOutcome::Rerolled {
                discarded: selection(4, vec![5])
            })
        );
    }

    #[test]
    fn ticks_do_not_commit_in_manual_mode() {
        let policy = GatePolicy::manual();
        let state = GateState::AwaitingConfirmation {
            selection: selection(0, vec![1]),
        };
        let t = apply(state.clone(), GateInput::Tick, &policy);
        assert_eq!(t.next, state);
        assert!(t.outcome.is_none());
    }

    #[test]
    fn teardown_cancels_in_flight_work() {
        let policy = GatePolicy::default();
        let t = apply(GateState::Rolling, GateInput::Teardown, &policy);
        assert!(t.next.is_idle());
        assert_eq!(t.outcome, Some(GateOutcome::Cancelled));

        let t = apply(GateState::Idle, GateInput::Teardown, &policy);
        assert!(t.outcome.is_none());
    }

    #[test]
    fn invalid_inputs_are_rejected() {
        let policy = GatePolicy::default();
        let err = transition(&GateState::Idle, GateInput::Accept, &policy).unwrap_err();
        assert_eq!(
            err,
            GateError::InvalidTransition {
                from: GatePhase::Idle,
                input: GateInput::Accept,
            }
        );

        let counting = GateState::Counting {
            selection: selection(0, vec![1]),
            progress: 10,
        };
        assert!(transition(&counting, GateInput::Roll, &policy).is_err());
        assert!(transition(&counting, GateInput::Reroll, &policy).is_err());
        assert!(transition(&GateState::Rolling, GateInput::Roll, &policy).is_err());
    }

    #[test]
    fn state_serializes_with_phase_tag() {
        let json = serde_json::to_value(GateState::Counting {
            selection: selection(3, vec![4]),
            progress: 40,
        })
        .unwrap();
        assert_eq!(json["phase"], "counting");
        assert_eq!(json["progress"], 40);
        assert_eq!(json["selection"]["roll"], serde_json::json!([4]));
    }
}
