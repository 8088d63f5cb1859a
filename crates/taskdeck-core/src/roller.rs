//! Dice roller: the commit gate driven by real timers.
//!
//! The roller owns everything that outlives a single call: the candidate
//! snapshot, the die source, the gate state and two timers (the roll
//! animation delay and the auto-commit countdown). Timers never touch the
//! state themselves; they post inputs to a channel that
//! [`DiceRoller::next_event`] drains, so every state change happens on the
//! owner's side.
//!
//! ## Usage
//!
//! ```ignore
//! let mut roller = DiceRoller::new(steps, GatePolicy::default(), SeededDice::from_entropy())
//!     .on_commit(|step| println!("focus on {}", step.title));
//! roller.roll()?;
//! while let Some(event) = roller.next_event().await? {
//!     // render event
//! }
//! ```
//!
//! Dropping the roller drops both timer handles, which aborts them.

use std::ops::ControlFlow;

use chrono::Utc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::dice::{dice_for, select, Candidate, DieSource, Selection};
use crate::error::{Result, SelectionError};
use crate::events::Event;
use crate::gate::{transition, GateInput, GateOutcome, GatePhase, GatePolicy, GateState};
use crate::schedule::ScheduledTask;

/// Timer input tagged with the roll generation that scheduled it.
#[derive(Debug, Clone, Copy)]
enum TimerInput {
    Settled(u64),
    Tick(u64),
}

type CommitCallback<T> = Box<dyn FnMut(&T) + Send>;

pub struct DiceRoller<T, D> {
    candidates: Vec<T>,
    policy: GatePolicy,
    dice: D,
    state: GateState,
    /// Bumped on every roll and teardown; inputs from older timers are stale.
    generation: u64,
    inputs_tx: mpsc::UnboundedSender<TimerInput>,
    inputs_rx: mpsc::UnboundedReceiver<TimerInput>,
    roll_timer: Option<ScheduledTask>,
    countdown: Option<ScheduledTask>,
    on_commit: Option<CommitCallback<T>>,
}

impl<T, D> std::fmt::Debug for DiceRoller<T, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiceRoller")
            .field("candidates", &self.candidates.len())
            .field("policy", &self.policy)
            .field("state", &self.state)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

impl<T, D> DiceRoller<T, D>
where
    T: Candidate,
    D: DieSource,
{
    pub fn new(candidates: Vec<T>, policy: GatePolicy, dice: D) -> Self {
        let (inputs_tx, inputs_rx) = mpsc::unbounded_channel();
        Self {
            candidates,
            policy,
            dice,
            state: GateState::Idle,
            generation: 0,
            inputs_tx,
            inputs_rx,
            roll_timer: None,
            countdown: None,
            on_commit: None,
        }
    }

    /// Called with the chosen item every time a selection commits.
    pub fn on_commit<F>(mut self, f: F) -> Self
    where
        F: FnMut(&T) + Send + 'static,
    {
        self.on_commit = Some(Box::new(f));
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &GateState {
        &self.state
    }

    pub fn phase(&self) -> GatePhase {
        self.state.phase()
    }

    pub fn policy(&self) -> &GatePolicy {
        &self.policy
    }

    pub fn candidates(&self) -> &[T] {
        &self.candidates
    }

    /// Dice the next roll will throw.
    pub fn dice_count(&self) -> usize {
        dice_for(self.candidates.len())
    }

    /// Item behind the pending selection, if any.
    pub fn selected(&self) -> Option<&T> {
        self.state
            .selection()
            .and_then(|s| self.candidates.get(s.index))
    }

    pub fn has_pending_timers(&self) -> bool {
        self.roll_timer.is_some() || self.countdown.is_some()
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Replace the candidate list. Any roll in flight is torn down first.
    pub fn set_candidates(&mut self, candidates: Vec<T>) -> Option<Event> {
        let cancelled = self.teardown();
        self.candidates = candidates;
        cancelled
    }

    /// Start rolling. The dice settle after the policy's roll delay.
    ///
    /// # Errors
    ///
    /// `SelectionError::EmptyList` when there is nothing to pick from,
    /// `GateError::InvalidTransition` when a roll is already in progress.
    pub fn roll(&mut self) -> Result<Event> {
        if self.candidates.is_empty() {
            warn!("roll requested with no candidates");
            return Err(SelectionError::EmptyList.into());
        }
        self.apply(GateInput::Roll)?;
        self.schedule_settle();
        Ok(Event::RollStarted {
            candidates: self.candidates.len(),
            dice: self.dice_count(),
            at: Utc::now(),
        })
    }

    /// Wait for the next timer-driven event.
    ///
    /// Returns `Ok(None)` right away when no timer is pending (idle, or
    /// waiting on a manual accept/reroll).
    pub async fn next_event(&mut self) -> Result<Option<Event>> {
        loop {
            if !self.has_pending_timers() {
                return Ok(None);
            }
            let Some(input) = self.inputs_rx.recv().await else {
                return Ok(None);
            };
            match input {
                TimerInput::Settled(epoch) if epoch == self.generation => {
                    self.roll_timer = None;
                    return self.settle().map(Some);
                }
                TimerInput::Tick(epoch) if epoch == self.generation => {
                    return self.tick().map(Some);
                }
                stale => debug!(?stale, generation = self.generation, "dropping stale timer input"),
            }
        }
    }

    /// Manual mode: take the pending selection.
    pub fn accept(&mut self) -> Result<Event> {
        match self.apply(GateInput::Accept)? {
            Some(GateOutcome::Committed { selection }) => Ok(self.commit(selection)),
            _ => unreachable_outcome(),
        }
    }

    /// Manual mode: throw the pending selection away and roll again.
    pub fn reroll(&mut self) -> Result<Event> {
        match self.apply(GateInput::Reroll)? {
            Some(GateOutcome::Rerolled { discarded }) => {
                self.schedule_settle();
                let discarded_item_id = self
                    .candidates
                    .get(discarded.index)
                    .map(|c| c.candidate_id().to_string())
                    .unwrap_or_default();
                debug!(index = discarded.index, "selection discarded, rerolling");
                Ok(Event::Rerolled {
                    discarded_index: discarded.index,
                    discarded_item_id,
                    at: Utc::now(),
                })
            }
            _ => unreachable_outcome(),
        }
    }

    /// Cancel both timers and return to idle.
    ///
    /// Returns `RollCancelled` when something was in flight.
    pub fn teardown(&mut self) -> Option<Event> {
        self.generation += 1;
        self.roll_timer = None;
        self.countdown = None;
        while self.inputs_rx.try_recv().is_ok() {}

        match self.apply(GateInput::Teardown) {
            Ok(Some(GateOutcome::Cancelled)) => {
                debug!("roll cancelled on teardown");
                Some(Event::RollCancelled { at: Utc::now() })
            }
            _ => None,
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn apply(&mut self, input: GateInput) -> Result<Option<GateOutcome>> {
        let t = transition(&self.state, input, &self.policy)?;
        self.state = t.next;
        Ok(t.outcome)
    }

    fn schedule_settle(&mut self) {
        self.generation += 1;
        let epoch = self.generation;
        let tx = self.inputs_tx.clone();
        self.roll_timer = Some(ScheduledTask::after(
            "roll-delay",
            self.policy.roll_delay(),
            move || {
                let _ = tx.send(TimerInput::Settled(epoch));
            },
        ));
    }

    /// The ticker stops by itself after the ticks needed to commit, so an
    /// unpolled roller queues at most `ticks_to_commit()` inputs.
    fn start_countdown(&mut self) {
        let epoch = self.generation;
        let tx = self.inputs_tx.clone();
        let mut remaining = self.policy.ticks_to_commit();
        self.countdown = Some(ScheduledTask::every(
            "countdown",
            self.policy.tick_interval(),
            move || {
                if tx.send(TimerInput::Tick(epoch)).is_err() {
                    return ControlFlow::Break(());
                }
                remaining = remaining.saturating_sub(1);
                if remaining == 0 {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            },
        ));
    }

    fn settle(&mut self) -> Result<Event> {
        let selection = select(&self.candidates, &mut self.dice)?;
        self.apply(GateInput::Rolled {
            selection: selection.clone(),
        })?;
        if self.phase() == GatePhase::Counting {
            self.start_countdown();
        }

        let item = &self.candidates[selection.index];
        Ok(Event::DiceRolled {
            item_id: item.candidate_id().to_string(),
            item_label: item.candidate_label().to_string(),
            roll: selection.roll,
            index: selection.index,
            at: Utc::now(),
        })
    }

    fn tick(&mut self) -> Result<Event> {
        match self.apply(GateInput::Tick)? {
            Some(GateOutcome::Committed { selection }) => {
                self.countdown = None;
                Ok(self.commit(selection))
            }
            _ => {
                let progress = self.state.progress().unwrap_or_default();
                Ok(Event::CountdownProgress {
                    progress,
                    remaining_ms: self.policy.remaining_ms(progress),
                    at: Utc::now(),
                })
            }
        }
    }

    fn commit(&mut self, selection: Selection) -> Event {
        let item = &self.candidates[selection.index];
        info!(
            item = item.candidate_id(),
            index = selection.index,
            faces = ?selection.roll.faces(),
            "selection committed"
        );
        if let Some(callback) = self.on_commit.as_mut() {
            callback(item);
        }
        Event::SelectionCommitted {
            item_id: item.candidate_id().to_string(),
            item_label: item.candidate_label().to_string(),
            roll: selection.roll,
            index: selection.index,
            at: Utc::now(),
        }
    }
}

fn unreachable_outcome<T>() -> Result<T> {
    Err(crate::error::CoreError::Custom(
        "commit gate returned an unexpected outcome".into(),
    ))
}
