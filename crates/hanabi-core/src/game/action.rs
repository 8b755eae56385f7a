use crate::model::card::Card;
use crate::model::color::Color;
use crate::model::knowledge::Hint;
use crate::model::rank::Rank;
use serde::{Deserialize, Serialize};

/// A typed command for the engine. Hints address the partner's hand; plays
/// and drops address the acting player's own hand. `Pass` hands the seat on
/// without taking a turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
    StartNewGame { cards: Vec<Card> },
    TellColor { color: Color, cards: Vec<usize> },
    TellRank { rank: Rank, cards: Vec<usize> },
    PlayCard { index: usize },
    DropCard { index: usize },
    Pass,
}

impl Action {
    pub fn tell_color(color: Color, cards: impl Into<Vec<usize>>) -> Self {
        Action::TellColor {
            color,
            cards: cards.into(),
        }
    }

    pub fn tell_rank(rank: Rank, cards: impl Into<Vec<usize>>) -> Self {
        Action::TellRank {
            rank,
            cards: cards.into(),
        }
    }

    pub fn hint(&self) -> Option<(Hint, &[usize])> {
        match self {
            Action::TellColor { color, cards } => Some((Hint::Color(*color), cards)),
            Action::TellRank { rank, cards } => Some((Hint::Rank(*rank), cards)),
            _ => None,
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Action::StartNewGame { .. } => "start",
            Action::TellColor { .. } => "tell_color",
            Action::TellRank { .. } => "tell_rank",
            Action::PlayCard { .. } => "play",
            Action::DropCard { .. } => "drop",
            Action::Pass => "pass",
        }
    }
}
