use anyhow::{bail, Context, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use shootout_core::calibration::{measure_keeper, measure_striker, simulate_batch};
use shootout_core::{
    Dice, Difficulty, EngineConfig, EngineEvent, GameState, HistorySaveManager, Shootout,
    ShootoutEngine, ShootoutStore, ShotZone,
};

pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let config = match path {
        Some(path) => EngineConfig::from_file(&path.to_string_lossy()),
        None => EngineConfig::from_env(),
    };
    config.map_err(anyhow::Error::msg)
}

pub fn open_history(path: Option<PathBuf>) -> Result<HistorySaveManager> {
    let path = path.unwrap_or_else(HistorySaveManager::default_path);
    HistorySaveManager::open(&path).map_err(|e| {
        let hint = if e.is_unreadable_file() { " (run `shootout reset` to start over)" } else { "" };
        anyhow::Error::new(e)
            .context(format!("Failed to open shootout history at {}{}", path.display(), hint))
    })
}

/// Delete the history file. Works on damaged files too; returns how many
/// shootouts were removed when the file could still be read.
pub fn reset(path: Option<PathBuf>) -> Result<Option<usize>> {
    let path = path.unwrap_or_else(HistorySaveManager::default_path);
    let removed = match HistorySaveManager::open(&path) {
        Ok(history) => Some(history.shootouts().len()),
        Err(e) => {
            tracing::warn!("Deleting unreadable history at {}: {}", path.display(), e);
            None
        }
    };

    HistorySaveManager::reset_path(&path)
        .with_context(|| format!("Failed to delete shootout history at {}", path.display()))?;
    Ok(removed)
}

/// Where the player's aim and dive come from.
pub enum Controls<'a> {
    Auto(ChaCha8Rng),
    Prompt(Box<dyn BufRead + 'a>),
}

impl Controls<'_> {
    fn next_zone(&mut self, prompt: &str) -> Result<ShotZone> {
        match self {
            Controls::Auto(rng) => Ok(rng.choose(&ShotZone::ALL)),
            Controls::Prompt(input) => loop {
                print!("{} [tl tc tr bl bc br]: ", prompt);
                std::io::stdout().flush()?;

                let mut line = String::new();
                if input.read_line(&mut line)? == 0 {
                    bail!("Input closed before the shootout finished");
                }
                match line.parse::<ShotZone>() {
                    Ok(zone) => return Ok(zone),
                    Err(e) => println!("  {}", e),
                }
            },
        }
    }
}

pub fn play<S: ShootoutStore>(
    engine: &mut ShootoutEngine<ChaCha8Rng, S>,
    difficulty: Difficulty,
    controls: &mut Controls,
) -> Result<Shootout> {
    engine.start_new(difficulty);
    println!(
        "⚽ {} vs {} ({}, {} rounds)",
        engine.config().player_name,
        engine.config().opponent_name,
        difficulty,
        engine.config().regulation_rounds
    );

    loop {
        match engine.state() {
            GameState::PlayerShooting => {
                let round = engine.current_round();
                let target = controls.next_zone(&format!("Round {} - aim", round))?;
                let (keeper, result) = engine.player_shoot(target)?;
                println!(
                    "  R{:<2} You      -> {:<13} keeper {:<13} {}",
                    round, target, keeper, result
                );
                engine.after_player_shot()?;
            }
            GameState::PlayerKeeping => {
                let round = engine.shootout().player_shots.len();
                let dive = controls.next_zone(&format!("Round {} - dive", round))?;
                let (target, result) = engine.player_dive(dive)?;
                println!(
                    "  R{:<2} {:<8} -> {:<13} you    {:<13} {}",
                    round,
                    engine.config().opponent_name,
                    target,
                    dive,
                    result
                );
                engine.after_opponent_shot()?;
                println!("       {}", engine.shootout().score_line());
            }
            GameState::Finished => break,
            state => bail!("Engine stuck in unexpected state: {}", state),
        }
    }

    for event in engine.drain_events() {
        if let EngineEvent::ShootoutEnded(shootout) = event {
            println!();
            println!("🏁 {} - {}", shootout.result_text(), shootout.score_line());
            if shootout.went_to_sudden_death() {
                println!("   decided in sudden death after {} rounds", shootout.player_shots.len());
            }
            return Ok(shootout);
        }
    }
    bail!("Shootout finished without an end event")
}

pub fn print_stats(history: &HistorySaveManager) {
    let stats = history.stats();
    println!("📊 Player statistics ({})", history.path().display());
    println!("   Shootouts:    {}", stats.total_shootouts);
    println!("   Wins/Losses:  {}/{} ({:.1}%)", stats.wins, stats.losses, stats.win_rate());
    println!("   Streak:       {} (best {})", stats.current_streak, stats.best_streak);
    println!(
        "   Shooting:     {} goals from {} kicks ({:.1}%), {} missed",
        stats.goals,
        stats.total_shots,
        stats.accuracy(),
        stats.misses
    );
    println!(
        "   Keeping:      {} saves from {} kicks faced ({:.1}%)",
        stats.saves,
        stats.shots_faced,
        stats.save_rate()
    );

    println!();
    println!("   {:<14} {:>8} {:>6} {:>6} {:>6} {:>8}", "Zone", "Attempts", "Goals", "Saved", "Missed", "Success");
    for zone in history.zone_statistics() {
        println!(
            "   {:<14} {:>8} {:>6} {:>6} {:>6} {:>7.1}%",
            zone.zone.display_name(),
            zone.attempts,
            zone.goals,
            zone.saved,
            zone.missed,
            zone.success_rate()
        );
    }
}

pub fn print_history(history: &HistorySaveManager, limit: usize) {
    let shootouts = history.completed_shootouts();
    if shootouts.is_empty() {
        println!("No shootouts played yet");
        return;
    }

    for shootout in shootouts.into_iter().take(limit) {
        let kicks: String = shootout
            .shots()
            .iter()
            .map(|shot| if shot.result.is_goal() { 'o' } else { 'x' })
            .collect();
        println!(
            "{}  {:<4} {:<6} {:<20} {}",
            shootout.date.format("%Y-%m-%d %H:%M"),
            shootout.result_text(),
            shootout.difficulty,
            shootout.score_line(),
            kicks
        );
    }
}

pub fn calibrate(config: &EngineConfig, difficulty: Difficulty, trials: u32, seed: u64) -> Result<()> {
    let keeper = measure_keeper(config, difficulty, trials, seed);
    let striker = measure_striker(difficulty, trials, seed.wrapping_add(1));
    let batch = simulate_batch(config, difficulty, (trials / 10).max(1), seed.wrapping_add(2))?;

    println!("🎯 Calibration on {} ({} trials, seed {})", difficulty, trials, seed);
    println!(
        "   Your kicks:  goal {:.3}  saved {:.3} (save_chance {:.2})  missed {:.3} (target {:.2})",
        keeper.goal,
        keeper.saved,
        difficulty.save_chance(),
        keeper.missed,
        config.player_miss_chance
    );
    println!(
        "   CPU kicks:   goal {:.3}  saved {:.3}  missed {:.3} (target {:.2})",
        striker.goal,
        striker.saved,
        striker.missed,
        difficulty.miss_chance()
    );
    println!(
        "   Shootouts:   {} played, win rate {:.1}%, mean {:.2} rounds, longest {}, sudden death {}",
        batch.games,
        batch.win_rate(),
        batch.mean_rounds,
        batch.longest,
        batch.sudden_deaths
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shootout_core::MemoryStore;
    use std::io::Cursor;

    #[test]
    fn test_auto_play_records_shootout() {
        let mut engine = ShootoutEngine::new(
            EngineConfig::default(),
            ChaCha8Rng::seed_from_u64(1),
            MemoryStore::new(),
        )
        .unwrap();
        let mut controls = Controls::Auto(ChaCha8Rng::seed_from_u64(2));

        let shootout = play(&mut engine, Difficulty::Easy, &mut controls).unwrap();
        assert!(shootout.is_completed());
        assert_eq!(engine.store().shootouts().len(), 1);
    }

    #[test]
    fn test_prompt_skips_bad_input_and_fails_on_eof() {
        let mut engine = ShootoutEngine::new(
            EngineConfig::default(),
            ChaCha8Rng::seed_from_u64(1),
            MemoryStore::new(),
        )
        .unwrap();
        let input = Cursor::new("nowhere\ntl\nbr\n".as_bytes().to_vec());
        let mut controls = Controls::Prompt(Box::new(input));

        let err = play(&mut engine, Difficulty::Medium, &mut controls).unwrap_err();
        assert!(err.to_string().contains("Input closed"));
        // one full round was played before input ran out
        assert_eq!(engine.shootout().player_shots.len(), 1);
        assert_eq!(engine.shootout().opponent_shots.len(), 1);
    }

    #[test]
    fn test_history_roundtrip_through_cli_helpers() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("h.dat");

        let store = open_history(Some(path.clone())).unwrap();
        let mut engine =
            ShootoutEngine::new(EngineConfig::default(), ChaCha8Rng::seed_from_u64(3), store).unwrap();
        let mut controls = Controls::Auto(ChaCha8Rng::seed_from_u64(4));
        let shootout = play(&mut engine, Difficulty::Hard, &mut controls).unwrap();

        let reopened = open_history(Some(path.clone())).unwrap();
        assert_eq!(reopened.shootouts()[0], shootout);
        print_stats(&reopened);
        print_history(&reopened, 5);

        assert_eq!(reset(Some(path.clone())).unwrap(), Some(1));
        assert!(!path.exists());
    }

    #[test]
    fn test_reset_clears_a_corrupted_history() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("h.dat");
        std::fs::write(&path, vec![0xAB; 64]).unwrap();

        let err = open_history(Some(path.clone())).unwrap_err();
        assert!(format!("{:#}", err).contains("shootout reset"));

        assert_eq!(reset(Some(path.clone())).unwrap(), None);
        assert!(!path.exists());
        assert!(open_history(Some(path)).unwrap().shootouts().is_empty());
    }
}
