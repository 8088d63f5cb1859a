use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dice::RollOutcome;
use crate::notice::Notice;

/// Every user-visible outcome of the roller produces an Event.
/// The CLI prints them as JSON lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// Dice started rolling (animation delay running).
    RollStarted {
        candidates: usize,
        dice: usize,
        at: DateTime<Utc>,
    },
    /// Dice settled on a candidate.
    DiceRolled {
        roll: RollOutcome,
        index: usize,
        item_id: String,
        item_label: String,
        at: DateTime<Utc>,
    },
    /// Auto-commit countdown advanced.
    CountdownProgress {
        progress: u8,
        remaining_ms: u64,
        at: DateTime<Utc>,
    },
    /// Selection became final and was handed to the caller.
    SelectionCommitted {
        roll: RollOutcome,
        index: usize,
        item_id: String,
        item_label: String,
        at: DateTime<Utc>,
    },
    /// User discarded the selection and rolled again.
    Rerolled {
        discarded_index: usize,
        discarded_item_id: String,
        at: DateTime<Utc>,
    },
    /// Roller torn down with work in flight.
    RollCancelled {
        at: DateTime<Utc>,
    },
    /// Something the user should see.
    Notice {
        notice: Notice,
        at: DateTime<Utc>,
    },
}

impl Event {
    pub fn notice(notice: Notice) -> Self {
        Event::Notice {
            notice,
            at: Utc::now(),
        }
    }

    pub fn is_commit(&self) -> bool {
        matches!(self, Event::SelectionCommitted { .. })
    }
}
