//! The shootout state machine.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::config::EngineConfig;
use super::dice::Dice;
use super::resolution::{generate_cpu_shot_target, generate_keeper_dive, resolve_kick};
use super::rules::{check_shootout_end, Tally};
use super::state::{EngineEvent, GameState};
use crate::error::{EngineError, Result};
use crate::models::{Difficulty, Shootout, ShootoutStatus, Shot, ShotResult, ShotZone, Side};
use crate::save::{MemoryStore, ShootoutStore};

/// Owns one shootout at a time and enforces the turn order.
///
/// The caller starts a shootout, then alternates `player_shoot` /
/// `after_player_shot` and `player_dive` / `after_opponent_shot`. Each
/// "after" call is made once the caller is done presenting the kick.
/// Finished shootouts are handed to the store exactly once.
pub struct ShootoutEngine<D = ChaCha8Rng, S = MemoryStore> {
    config: EngineConfig,
    dice: D,
    store: S,
    shootout: Shootout,
    state: GameState,
    difficulty: Difficulty,
    /// Round tag shared by both kicks of the pair in progress
    open_round: u32,
    events: VecDeque<EngineEvent>,
}

impl ShootoutEngine<ChaCha8Rng, MemoryStore> {
    /// Default config, in-memory store, seeded ChaCha8.
    pub fn seeded(seed: u64) -> Self {
        Self::from_parts(EngineConfig::default(), ChaCha8Rng::seed_from_u64(seed), MemoryStore::new())
    }
}

impl<D: Dice, S: ShootoutStore> ShootoutEngine<D, S> {
    pub fn new(config: EngineConfig, dice: D, store: S) -> Result<Self> {
        config.validate().map_err(EngineError::Config)?;
        Ok(Self::from_parts(config, dice, store))
    }

    fn from_parts(config: EngineConfig, dice: D, store: S) -> Self {
        let difficulty = Difficulty::default();
        let shootout = Self::fresh_shootout(&config, difficulty);
        Self {
            config,
            dice,
            store,
            shootout,
            state: GameState::Ready,
            difficulty,
            open_round: 0,
            events: VecDeque::new(),
        }
    }

    fn fresh_shootout(config: &EngineConfig, difficulty: Difficulty) -> Shootout {
        Shootout::with_names(
            config.player_name.clone(),
            config.opponent_name.clone(),
            difficulty,
            config.regulation_rounds,
        )
    }

    // ========================
    // Accessors
    // ========================

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn shootout(&self) -> &Shootout {
        &self.shootout
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn player_score(&self) -> u32 {
        self.shootout.player_score()
    }

    pub fn opponent_score(&self) -> u32 {
        self.shootout.opponent_score()
    }

    pub fn current_round(&self) -> u32 {
        self.shootout.current_round()
    }

    pub fn status_text(&self) -> String {
        self.state.status_text(&self.shootout)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Take every event queued since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        self.events.drain(..).collect()
    }

    // ========================
    // Transitions
    // ========================

    /// Begin a new shootout, discarding any unfinished one.
    pub fn start_new(&mut self, difficulty: Difficulty) {
        if self.state != GameState::Ready && self.state != GameState::Finished {
            tracing::debug!(
                shootout = %self.shootout.id,
                state = %self.state,
                "Discarding unfinished shootout"
            );
        }

        self.difficulty = difficulty;
        self.shootout = Self::fresh_shootout(&self.config, difficulty);
        self.open_round = 0;
        tracing::debug!(shootout = %self.shootout.id, %difficulty, "Shootout started");
        self.set_state(GameState::PlayerShooting);
    }

    /// Abandon the current shootout without recording it.
    pub fn cancel(&mut self) {
        if self.state == GameState::Ready {
            return;
        }
        tracing::debug!(shootout = %self.shootout.id, state = %self.state, "Shootout cancelled");
        self.shootout = Self::fresh_shootout(&self.config, self.difficulty);
        self.open_round = 0;
        self.set_state(GameState::Ready);
    }

    /// The player kicks at `target`. Returns the CPU keeper's dive and the
    /// result for the caller to animate.
    pub fn player_shoot(&mut self, target: ShotZone) -> Result<(ShotZone, ShotResult)> {
        self.expect_state("player_shoot", GameState::PlayerShooting)?;
        self.set_state(GameState::Animating { shooter: Side::Player });

        let keeper = generate_keeper_dive(
            &mut self.dice,
            target,
            self.difficulty,
            self.config.adjacent_dive_chance,
        );
        let result = resolve_kick(&mut self.dice, target, keeper, self.config.player_miss_chance);

        self.open_round = self.shootout.player_shots.len() as u32 + 1;
        self.shootout.player_shots.push(Shot::new(self.open_round, target, keeper, result, Side::Player));

        tracing::debug!(round = self.open_round, %target, %keeper, %result, "Player kick");
        Ok((keeper, result))
    }

    pub fn after_player_shot(&mut self) -> Result<GameState> {
        self.expect_state("after_player_shot", GameState::Animating { shooter: Side::Player })?;
        self.advance(GameState::PlayerKeeping)
    }

    /// The player dives to `keeper` against the CPU's kick. Returns the
    /// CPU's target and the result.
    pub fn player_dive(&mut self, keeper: ShotZone) -> Result<(ShotZone, ShotResult)> {
        self.expect_state("player_dive", GameState::PlayerKeeping)?;
        self.set_state(GameState::Animating { shooter: Side::Opponent });

        let target = generate_cpu_shot_target(&mut self.dice, self.difficulty);
        let result = resolve_kick(&mut self.dice, target, keeper, self.difficulty.miss_chance());

        self.shootout.opponent_shots.push(Shot::new(self.open_round, target, keeper, result, Side::Opponent));

        tracing::debug!(round = self.open_round, %target, %keeper, %result, "Opponent kick");
        Ok((target, result))
    }

    pub fn after_opponent_shot(&mut self) -> Result<GameState> {
        self.expect_state("after_opponent_shot", GameState::Animating { shooter: Side::Opponent })?;
        self.advance(GameState::PlayerShooting)
    }

    // ========================
    // Internals
    // ========================

    fn expect_state(&self, operation: &'static str, expected: GameState) -> Result<()> {
        if self.state == expected {
            return Ok(());
        }
        if self.state == GameState::Finished {
            return Err(EngineError::ShootoutFinished { operation });
        }
        Err(EngineError::IllegalTransition { operation, state: self.state })
    }

    fn set_state(&mut self, state: GameState) {
        self.state = state;
        self.events.push_back(EngineEvent::StateChanged(state));
    }

    fn advance(&mut self, next: GameState) -> Result<GameState> {
        let tally = Tally::of(&self.shootout);
        if check_shootout_end(&tally, self.shootout.regulation_rounds) {
            self.finish()?;
        } else {
            self.set_state(next);
        }
        Ok(self.state)
    }

    /// Complete the shootout and hand it to the store. The engine ends in
    /// `Finished` even if the store fails.
    fn finish(&mut self) -> Result<()> {
        self.shootout.status = ShootoutStatus::Completed;

        let persisted = self
            .store
            .add_shootout(&self.shootout)
            .and_then(|_| self.store.update_aggregate_stats(&self.shootout));

        self.set_state(GameState::Finished);
        self.events.push_back(EngineEvent::ShootoutEnded(self.shootout.clone()));

        tracing::info!(
            shootout = %self.shootout.id,
            difficulty = %self.difficulty,
            rounds = self.shootout.player_shots.len(),
            outcome = %self.shootout.outcome(),
            "Shootout finished {}",
            self.shootout.score_line()
        );

        if let Err(e) = &persisted {
            tracing::warn!(shootout = %self.shootout.id, error = %e, "Failed to persist shootout");
        }
        persisted.map_err(EngineError::from)
    }
}
