use crate::model::card::Card;
use crate::model::color::{Color, TOTAL_COLORS};
use serde::Serialize;

pub const MAX_HEIGHT: u8 = 5;

/// Highest rank played so far on each color stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Table {
    heights: [u8; TOTAL_COLORS],
}

impl Table {
    pub const fn new() -> Self {
        Self {
            heights: [0; TOTAL_COLORS],
        }
    }

    pub fn height(&self, color: Color) -> u8 {
        self.heights[color.index()]
    }

    pub fn heights(&self) -> &[u8; TOTAL_COLORS] {
        &self.heights
    }

    /// Whether `card` is the next rank its color stack needs.
    pub fn accepts(&self, card: Card) -> bool {
        self.height(card.color) + 1 == card.rank.value()
    }

    /// Stacks `card`. Returns false, leaving the table unchanged, when the
    /// card is not the next rank for its color.
    pub fn place(&mut self, card: Card) -> bool {
        if !self.accepts(card) {
            return false;
        }
        self.heights[card.color.index()] += 1;
        true
    }

    pub fn is_complete(&self) -> bool {
        self.heights.iter().all(|&height| height == MAX_HEIGHT)
    }
}
