use core::fmt;
use serde::{Deserialize, Serialize};

/// Why a game stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    Contradiction,
    IllegalPlay,
    DeckExhausted,
    TableComplete,
}

impl EndReason {
    pub const fn as_str(self) -> &'static str {
        match self {
            EndReason::Contradiction => "contradiction",
            EndReason::IllegalPlay => "illegal_play",
            EndReason::DeckExhausted => "deck_exhausted",
            EndReason::TableComplete => "table_complete",
        }
    }
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Counters reported once per finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub turns: u32,
    pub played_cards: u32,
    pub risked_turns: u32,
    pub ending: EndReason,
}

#[cfg(test)]
mod tests {
    use super::{EndReason, GameResult};

    #[test]
    fn result_serializes_snake_case() {
        let result = GameResult {
            turns: 7,
            played_cards: 3,
            risked_turns: 1,
            ending: EndReason::DeckExhausted,
        };
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(
            json,
            r#"{"turns":7,"played_cards":3,"risked_turns":1,"ending":"deck_exhausted"}"#
        );
        let back: GameResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }
}
