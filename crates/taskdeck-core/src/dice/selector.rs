//! Dice-roll selection.
//!
//! One die addresses up to six candidates; longer lists throw two dice and
//! index by the sum. Both mappings wrap with `mod len`:
//!
//! ```text
//! one die:  index = (die - 1)     mod len    len <= 6
//! two dice: index = (d1 + d2 - 1) mod len    len >  6
//! ```
//!
//! The mapping is not uniform. Sums near 7 are more likely, lists of length
//! 4 and 5 favour the low indices, and with more than 12 candidates some
//! indices can never come up. [`selection_weights`] gives the exact odds.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::source::DieSource;
use super::DIE_FACES;
use crate::error::SelectionError;

/// Largest list a single die can address.
const SINGLE_DIE_LIMIT: usize = DIE_FACES as usize;

/// Item that can be put in front of the dice.
///
/// The selector only uses list position; the id is carried into events so
/// the caller can tell which record was chosen.
pub trait Candidate {
    fn candidate_id(&self) -> &str;

    fn candidate_label(&self) -> &str {
        self.candidate_id()
    }
}

impl Candidate for String {
    fn candidate_id(&self) -> &str {
        self
    }
}

impl Candidate for &str {
    fn candidate_id(&self) -> &str {
        self
    }
}

/// Faces thrown for one selection, in throw order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RollOutcome(Vec<u8>);

impl RollOutcome {
    pub fn new(faces: Vec<u8>) -> Self {
        Self(faces)
    }

    pub fn faces(&self) -> &[u8] {
        &self.0
    }

    pub fn dice(&self) -> usize {
        self.0.len()
    }

    pub fn sum(&self) -> u32 {
        self.0.iter().map(|&f| f as u32).sum()
    }
}

/// Result of a roll: the faces and the index they map to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub roll: RollOutcome,
    pub index: usize,
}

/// Dice needed for a list of `len` candidates.
pub fn dice_for(len: usize) -> usize {
    if len > SINGLE_DIE_LIMIT {
        2
    } else {
        1
    }
}

/// Throw the dice and pick one of `candidates`.
///
/// # Errors
///
/// Returns [`SelectionError::EmptyList`] when `candidates` is empty; no die
/// is thrown in that case.
pub fn select<T, D>(candidates: &[T], source: &mut D) -> Result<Selection, SelectionError>
where
    D: DieSource + ?Sized,
{
    let len = candidates.len();
    if len == 0 {
        warn!("selection rejected: empty candidate list");
        return Err(SelectionError::EmptyList);
    }

    let faces: Vec<u8> = (0..dice_for(len)).map(|_| source.roll_d6()).collect();
    let roll = RollOutcome::new(faces);
    let index = index_for(roll.sum(), len);

    debug!(faces = ?roll.faces(), index, len, "dice rolled");
    Ok(Selection { roll, index })
}

/// Probability of each index being selected for a list of `len` items.
///
/// Empty for `len == 0`. The weights always sum to 1.
pub fn selection_weights(len: usize) -> Vec<f64> {
    let mut weights = vec![0.0; len];
    if len == 0 {
        return weights;
    }

    let faces = 1..=DIE_FACES as u32;
    if dice_for(len) == 1 {
        for face in faces {
            weights[index_for(face, len)] += 1.0 / 6.0;
        }
    } else {
        for a in faces.clone() {
            for b in faces.clone() {
                weights[index_for(a + b, len)] += 1.0 / 36.0;
            }
        }
    }
    weights
}

fn index_for(sum: u32, len: usize) -> usize {
    (sum as usize - 1) % len
}
