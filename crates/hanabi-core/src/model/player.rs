use core::fmt;
use serde::{Deserialize, Serialize};

pub const PLAYER_COUNT: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Seat {
    First = 0,
    Second = 1,
}

impl Seat {
    pub const LOOP: [Seat; PLAYER_COUNT] = [Seat::First, Seat::Second];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Seat::First),
            1 => Some(Seat::Second),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Seat that acts after this one.
    pub const fn next(self) -> Seat {
        match self {
            Seat::First => Seat::Second,
            Seat::Second => Seat::First,
        }
    }

    /// Seat whose hand this seat's hints target.
    pub const fn partner(self) -> Seat {
        self.next()
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {}", self.index())
    }
}
