use crate::model::color::Color;
use crate::model::rank::Rank;
use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub color: Color,
}

impl Card {
    pub const fn new(rank: Rank, color: Color) -> Self {
        Self { rank, color }
    }

    pub const fn is_last_of_color(self) -> bool {
        matches!(self.rank, Rank::Five)
    }
}

/// Canonical abbreviation: color letter then rank digit, e.g. `R1`.
impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.color.symbol(), self.rank)
    }
}
