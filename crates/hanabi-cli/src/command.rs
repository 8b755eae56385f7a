//! Line grammar for arbiter input.
//!
//! ```text
//! Start new game with deck R1 G2 B3 ...
//! Tell color Red for cards 0 2
//! Tell rank 1 for cards 1 3 4
//! Play card 0
//! Drop card 4
//! ```

use hanabi_core::game::action::Action;
use hanabi_core::model::card::Card;
use hanabi_core::model::color::Color;
use hanabi_core::model::rank::Rank;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unrecognized command")]
    Unrecognized,
    #[error("invalid card abbreviation '{0}'")]
    InvalidCard(String),
    #[error("unknown color '{0}'")]
    UnknownColor(String),
    #[error("invalid rank '{0}'")]
    InvalidRank(String),
    #[error("invalid card index '{0}'")]
    InvalidIndex(String),
    #[error("hint names no cards")]
    MissingIndices,
}

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<Action>, CommandError> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let action = match words.as_slice() {
        [] => return Ok(None),
        ["Start", "new", "game", "with", "deck", cards @ ..] => Action::StartNewGame {
            cards: cards
                .iter()
                .map(|abbreviation| parse_card(abbreviation))
                .collect::<Result<_, _>>()?,
        },
        ["Tell", "color", color, "for", "cards", indices @ ..] => Action::TellColor {
            color: color
                .parse::<Color>()
                .map_err(|_| CommandError::UnknownColor(color.to_string()))?,
            cards: parse_indices(indices)?,
        },
        ["Tell", "rank", rank, "for", "cards", indices @ ..] => Action::TellRank {
            rank: parse_rank(rank)?,
            cards: parse_indices(indices)?,
        },
        ["Play", "card", index] => Action::PlayCard {
            index: parse_index(index)?,
        },
        ["Drop", "card", index] => Action::DropCard {
            index: parse_index(index)?,
        },
        _ => return Err(CommandError::Unrecognized),
    };
    Ok(Some(action))
}

/// Parses a card abbreviation: color letter then rank digit.
pub fn parse_card(abbreviation: &str) -> Result<Card, CommandError> {
    let invalid = || CommandError::InvalidCard(abbreviation.to_string());
    let mut chars = abbreviation.chars();
    let (Some(symbol), Some(digit), None) = (chars.next(), chars.next(), chars.next()) else {
        return Err(invalid());
    };
    let color = Color::from_symbol(symbol).ok_or_else(invalid)?;
    let rank = digit
        .to_digit(10)
        .and_then(|value| Rank::from_value(value as u8))
        .ok_or_else(invalid)?;
    Ok(Card::new(rank, color))
}

fn parse_rank(text: &str) -> Result<Rank, CommandError> {
    text.parse::<u8>()
        .ok()
        .and_then(Rank::from_value)
        .ok_or_else(|| CommandError::InvalidRank(text.to_string()))
}

fn parse_index(text: &str) -> Result<usize, CommandError> {
    text.parse::<usize>()
        .map_err(|_| CommandError::InvalidIndex(text.to_string()))
}

fn parse_indices(texts: &[&str]) -> Result<Vec<usize>, CommandError> {
    if texts.is_empty() {
        return Err(CommandError::MissingIndices);
    }
    texts.iter().map(|text| parse_index(text)).collect()
}

/// Renders an action back into the line grammar. `Pass` renders as a blank
/// line.
pub fn render(action: &Action) -> String {
    let join = |indices: &[usize]| {
        indices
            .iter()
            .map(usize::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    };
    match action {
        Action::StartNewGame { cards } => format!(
            "Start new game with deck {}",
            cards
                .iter()
                .map(Card::to_string)
                .collect::<Vec<_>>()
                .join(" ")
        ),
        Action::TellColor { color, cards } => {
            format!("Tell color {color} for cards {}", join(cards))
        }
        Action::TellRank { rank, cards } => format!("Tell rank {rank} for cards {}", join(cards)),
        Action::PlayCard { index } => format!("Play card {index}"),
        Action::DropCard { index } => format!("Drop card {index}"),
        Action::Pass => String::new(),
    }
}
