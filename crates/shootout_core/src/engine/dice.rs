//! Randomness as an injected capability.
//!
//! The engine draws every random decision through [`Dice`]. Any
//! `rand::RngCore` is a `Dice`, so a seeded `ChaCha8Rng` reproduces every
//! kick of a match (record ids and dates still come from `uuid`/`chrono`).
//! [`ScriptedDice`] replays fixed draws for exact scenarios.

use rand::{Rng, RngCore};
use std::collections::VecDeque;

pub trait Dice {
    /// Uniform draw in `[0, 1)`.
    fn roll(&mut self) -> f64;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn pick(&mut self, len: usize) -> usize;

    fn chance(&mut self, probability: f64) -> bool {
        self.roll() < probability
    }

    fn choose<T: Copy>(&mut self, items: &[T]) -> T
    where
        Self: Sized,
    {
        items[self.pick(items.len())]
    }
}

impl<R: RngCore> Dice for R {
    fn roll(&mut self) -> f64 {
        self.gen::<f64>()
    }

    fn pick(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Draw {
    Roll(f64),
    Pick(usize),
}

/// Replays a fixed sequence of draws.
///
/// Each call must match the next scripted draw kind; running out of script
/// or a kind mismatch panics, which is what a scenario test wants.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    script: VecDeque<Draw>,
}

impl ScriptedDice {
    pub fn new(script: impl IntoIterator<Item = Draw>) -> Self {
        Self { script: script.into_iter().collect() }
    }

    pub fn is_exhausted(&self) -> bool {
        self.script.is_empty()
    }
}

impl Dice for ScriptedDice {
    fn roll(&mut self) -> f64 {
        match self.script.pop_front() {
            Some(Draw::Roll(v)) => v,
            other => panic!("scripted dice expected a roll, found {:?}", other),
        }
    }

    fn pick(&mut self, len: usize) -> usize {
        match self.script.pop_front() {
            Some(Draw::Pick(i)) if i < len => i,
            other => panic!("scripted dice expected a pick below {}, found {:?}", len, other),
        }
    }
}
