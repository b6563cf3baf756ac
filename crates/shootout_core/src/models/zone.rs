use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the six target regions inside the goal mouth.
///
/// The goal is a 2×3 grid:
///
/// ```text
/// +----------+------------+-------------+
/// | TopLeft  | TopCenter  | TopRight    |
/// +----------+------------+-------------+
/// |BottomLeft|BottomCenter| BottomRight |
/// +----------+------------+-------------+
/// ```
///
/// The same value is used for the striker's aim and the keeper's dive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ShotZone {
    TopLeft = 0,
    TopCenter = 1,
    TopRight = 2,
    BottomLeft = 3,
    BottomCenter = 4,
    BottomRight = 5,
}

impl ShotZone {
    pub const ALL: [ShotZone; 6] = [
        ShotZone::TopLeft,
        ShotZone::TopCenter,
        ShotZone::TopRight,
        ShotZone::BottomLeft,
        ShotZone::BottomCenter,
        ShotZone::BottomRight,
    ];

    pub const CORNERS: [ShotZone; 4] =
        [ShotZone::TopLeft, ShotZone::TopRight, ShotZone::BottomLeft, ShotZone::BottomRight];

    pub const CENTERS: [ShotZone; 2] = [ShotZone::TopCenter, ShotZone::BottomCenter];

    /// Zones sharing an edge with `self` on the goal grid.
    pub fn adjacent(self) -> &'static [ShotZone] {
        use ShotZone::*;
        match self {
            TopLeft => &[TopCenter, BottomLeft],
            TopCenter => &[TopLeft, TopRight, BottomCenter],
            TopRight => &[TopCenter, BottomRight],
            BottomLeft => &[BottomCenter, TopLeft],
            BottomCenter => &[BottomLeft, BottomRight, TopCenter],
            BottomRight => &[BottomCenter, TopRight],
        }
    }

    pub fn is_adjacent_to(self, other: ShotZone) -> bool {
        self.adjacent().contains(&other)
    }

    pub fn is_corner(self) -> bool {
        !matches!(self, ShotZone::TopCenter | ShotZone::BottomCenter)
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<ShotZone> {
        Self::ALL.get(index).copied()
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ShotZone::TopLeft => "Top Left",
            ShotZone::TopCenter => "Top Center",
            ShotZone::TopRight => "Top Right",
            ShotZone::BottomLeft => "Bottom Left",
            ShotZone::BottomCenter => "Bottom Center",
            ShotZone::BottomRight => "Bottom Right",
        }
    }
}

impl fmt::Display for ShotZone {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(self.display_name())
    }
}

impl FromStr for ShotZone {
    type Err = String;

    /// Accepts `top-left`, `top_left`, `TopLeft`, `tl` or the grid index `0`..`5`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String =
            s.trim().chars().filter(|c| !matches!(c, '-' | '_' | ' ')).collect::<String>();
        let key = key.to_ascii_lowercase();

        if let Ok(index) = key.parse::<usize>() {
            return ShotZone::from_index(index).ok_or_else(|| format!("Unknown zone: {}", s));
        }

        match key.as_str() {
            "topleft" | "tl" => Ok(ShotZone::TopLeft),
            "topcenter" | "tc" => Ok(ShotZone::TopCenter),
            "topright" | "tr" => Ok(ShotZone::TopRight),
            "bottomleft" | "bl" => Ok(ShotZone::BottomLeft),
            "bottomcenter" | "bc" => Ok(ShotZone::BottomCenter),
            "bottomright" | "br" => Ok(ShotZone::BottomRight),
            _ => Err(format!("Unknown zone: {}", s)),
        }
    }
}
