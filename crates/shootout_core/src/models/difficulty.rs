use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// CPU strength. Each level fixes how often the CPU keeper reads the
/// player's shot and how accurate the CPU striker is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Probability that the CPU keeper dives exactly to the player's target.
    pub fn save_chance(self) -> f64 {
        match self {
            Difficulty::Easy => 0.2,
            Difficulty::Medium => 0.35,
            Difficulty::Hard => 0.5,
        }
    }

    /// Probability that a CPU shot is on target.
    pub fn cpu_accuracy(self) -> f64 {
        match self {
            Difficulty::Easy => 0.5,
            Difficulty::Medium => 0.65,
            Difficulty::Hard => 0.8,
        }
    }

    pub fn miss_chance(self) -> f64 {
        1.0 - self.cpu_accuracy()
    }

    /// Share of CPU shots aimed at a corner. `None` means the CPU aims
    /// uniformly over all six zones.
    pub fn corner_bias(self) -> Option<f64> {
        match self {
            Difficulty::Easy => None,
            Difficulty::Medium => Some(0.6),
            Difficulty::Hard => Some(0.75),
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(self.display_name())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" | "normal" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("Unknown difficulty: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_constants() {
        assert_eq!(Difficulty::Easy.save_chance(), 0.2);
        assert_eq!(Difficulty::Easy.cpu_accuracy(), 0.5);
        assert_eq!(Difficulty::Medium.save_chance(), 0.35);
        assert_eq!(Difficulty::Medium.cpu_accuracy(), 0.65);
        assert_eq!(Difficulty::Hard.save_chance(), 0.5);
        assert_eq!(Difficulty::Hard.cpu_accuracy(), 0.8);
    }

    #[test]
    fn test_harder_means_stronger_cpu() {
        for pair in Difficulty::ALL.windows(2) {
            assert!(pair[0].save_chance() < pair[1].save_chance());
            assert!(pair[0].miss_chance() > pair[1].miss_chance());
        }
    }

    #[test]
    fn test_parse() {
        assert_eq!("HARD".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!(" easy ".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert!("legendary".parse::<Difficulty>().is_err());
        assert_eq!(Difficulty::default(), Difficulty::Medium);
    }
}
