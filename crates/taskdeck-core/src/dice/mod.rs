mod selector;
mod source;

pub use selector::{dice_for, select, selection_weights, Candidate, RollOutcome, Selection};
pub use source::{DieSource, ScriptedDice, SeededDice};

/// Number of faces on every die the roller uses.
pub const DIE_FACES: u8 = 6;
