//! Kick resolution.
//!
//! All functions are pure apart from the dice they draw from, so each can be
//! tested on its own with a seeded or scripted source.

use super::dice::Dice;
use crate::models::{Difficulty, ShotResult, ShotZone};

/// Where the CPU keeper dives against a player kick aimed at `target`.
///
/// Reads the kick with `save_chance`; otherwise dives next to it with
/// `adjacent_chance`; otherwise anywhere but the target.
pub fn generate_keeper_dive<D: Dice>(
    dice: &mut D,
    target: ShotZone,
    difficulty: Difficulty,
    adjacent_chance: f64,
) -> ShotZone {
    if dice.chance(difficulty.save_chance()) {
        return target;
    }

    if dice.chance(adjacent_chance) {
        return dice.choose(target.adjacent());
    }

    let others: Vec<ShotZone> = ShotZone::ALL.iter().copied().filter(|&z| z != target).collect();
    dice.choose(&others)
}

/// Where the CPU striker aims.
pub fn generate_cpu_shot_target<D: Dice>(dice: &mut D, difficulty: Difficulty) -> ShotZone {
    match difficulty.corner_bias() {
        None => dice.choose(&ShotZone::ALL),
        Some(bias) => {
            if dice.chance(bias) {
                dice.choose(&ShotZone::CORNERS)
            } else {
                dice.choose(&ShotZone::CENTERS)
            }
        }
    }
}

/// A kick misses outright with `miss_chance`; otherwise the keeper saves it
/// only by diving to the exact zone.
pub fn resolve_kick<D: Dice>(
    dice: &mut D,
    target: ShotZone,
    keeper: ShotZone,
    miss_chance: f64,
) -> ShotResult {
    if dice.chance(miss_chance) {
        return ShotResult::Missed;
    }
    if target == keeper {
        return ShotResult::Saved;
    }
    ShotResult::Goal
}
