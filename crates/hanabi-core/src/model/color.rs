use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

pub const TOTAL_COLORS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Color {
    Red = 0,
    Green = 1,
    Blue = 2,
    Yellow = 3,
    White = 4,
}

impl Color {
    pub const ALL: [Color; TOTAL_COLORS] = [
        Color::Red,
        Color::Green,
        Color::Blue,
        Color::Yellow,
        Color::White,
    ];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Color::Red),
            1 => Some(Color::Green),
            2 => Some(Color::Blue),
            3 => Some(Color::Yellow),
            4 => Some(Color::White),
            _ => None,
        }
    }

    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'R' => Some(Color::Red),
            'G' => Some(Color::Green),
            'B' => Some(Color::Blue),
            'Y' => Some(Color::Yellow),
            'W' => Some(Color::White),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn symbol(self) -> char {
        match self {
            Color::Red => 'R',
            Color::Green => 'G',
            Color::Blue => 'B',
            Color::Yellow => 'Y',
            Color::White => 'W',
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Color::Red => "Red",
            Color::Green => "Green",
            Color::Blue => "Blue",
            Color::Yellow => "Yellow",
            Color::White => "White",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownColor(pub String);

impl fmt::Display for UnknownColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown color '{}'", self.0)
    }
}

impl std::error::Error for UnknownColor {}

impl FromStr for Color {
    type Err = UnknownColor;

    /// Parses a color name, ignoring case.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Color::ALL
            .iter()
            .copied()
            .find(|color| color.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| UnknownColor(value.to_string()))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
