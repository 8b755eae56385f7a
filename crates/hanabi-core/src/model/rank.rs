use core::fmt;
use serde::{Deserialize, Serialize};

pub const TOTAL_RANKS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum Rank {
    One = 1,
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
}

impl Rank {
    pub const ORDERED: [Rank; TOTAL_RANKS] =
        [Rank::One, Rank::Two, Rank::Three, Rank::Four, Rank::Five];

    pub const fn from_value(value: u8) -> Option<Self> {
        match value {
            1 => Some(Rank::One),
            2 => Some(Rank::Two),
            3 => Some(Rank::Three),
            4 => Some(Rank::Four),
            5 => Some(Rank::Five),
            _ => None,
        }
    }

    pub const fn value(self) -> u8 {
        self as u8
    }

    pub const fn index(self) -> usize {
        self as usize - 1
    }

    /// Table height a stack must show before this rank can be played on it.
    pub const fn prerequisite_height(self) -> u8 {
        self.value() - 1
    }
}

impl TryFrom<u8> for Rank {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rank::from_value(value)
            .ok_or_else(|| format!("rank {value} is outside 1..=5"))
    }
}

impl From<Rank> for u8 {
    fn from(rank: Rank) -> Self {
        rank.value()
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}
