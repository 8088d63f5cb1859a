//! Die sources.
//!
//! The selector never touches a global RNG; a [`DieSource`] is injected so
//! production code can roll from entropy while tests and replays get exact
//! faces.

use std::collections::VecDeque;

use rand::prelude::*;
use rand_pcg::Mcg128Xsl64;

use super::DIE_FACES;

/// Anything that can throw a fair six-sided die.
pub trait DieSource {
    /// Returns a face in `1..=6`.
    fn roll_d6(&mut self) -> u8;
}

impl<D: DieSource + ?Sized> DieSource for &mut D {
    fn roll_d6(&mut self) -> u8 {
        (**self).roll_d6()
    }
}

impl<D: DieSource + ?Sized> DieSource for Box<D> {
    fn roll_d6(&mut self) -> u8 {
        (**self).roll_d6()
    }
}

/// PCG-backed dice, reproducible when built from a seed.
#[derive(Debug, Clone)]
pub struct SeededDice {
    rng: Mcg128Xsl64,
}

impl SeededDice {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: Mcg128Xsl64::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: Mcg128Xsl64::from_entropy(),
        }
    }

    /// Seeded when `seed` is set, entropy otherwise.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_entropy(),
        }
    }
}

impl DieSource for SeededDice {
    fn roll_d6(&mut self) -> u8 {
        self.rng.gen_range(1..=DIE_FACES)
    }
}

/// Replays a fixed list of faces, cycling once exhausted.
///
/// Faces outside `1..=6` are clamped into range.
#[derive(Debug, Clone)]
pub struct ScriptedDice {
    script: Vec<u8>,
    queue: VecDeque<u8>,
    rolled: usize,
}

impl ScriptedDice {
    pub fn new(faces: impl Into<Vec<u8>>) -> Self {
        let script: Vec<u8> = faces
            .into()
            .into_iter()
            .map(|f| f.clamp(1, DIE_FACES))
            .collect();
        Self {
            queue: script.iter().copied().collect(),
            script,
            rolled: 0,
        }
    }

    /// How many faces have been handed out so far.
    pub fn rolled(&self) -> usize {
        self.rolled
    }
}

impl DieSource for ScriptedDice {
    fn roll_d6(&mut self) -> u8 {
        if self.queue.is_empty() {
            self.queue.extend(self.script.iter().copied());
        }
        self.rolled += 1;
        self.queue.pop_front().unwrap_or(1)
    }
}
