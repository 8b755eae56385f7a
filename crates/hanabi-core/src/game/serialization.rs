use super::engine::{GameEngine, Phase};
use crate::model::color::Color;
use crate::model::knowledge::{CardKnowledge, Certainty};
use crate::model::player::Seat;
use serde::Serialize;
use std::collections::BTreeMap;

/// Read-only view of an engine, rendered for trace logs.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EngineSnapshot {
    pub phase: Phase,
    pub seat_to_act: Seat,
    pub turns: u32,
    pub played_cards: u32,
    pub risked_turns: u32,
    pub table: BTreeMap<&'static str, u8>,
    pub deck_remaining: usize,
    pub hands: Vec<Vec<SlotSnapshot>>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SlotSnapshot {
    pub card: String,
    pub rank: Certainty,
    pub color: Certainty,
    pub excluded_ranks: Vec<u8>,
    pub excluded_colors: Vec<&'static str>,
}

impl SlotSnapshot {
    fn capture(knowledge: &CardKnowledge) -> Self {
        SlotSnapshot {
            card: knowledge.card().to_string(),
            rank: knowledge.rank().certainty(),
            color: knowledge.color().certainty(),
            excluded_ranks: knowledge.rank().excluded().map(|r| r.value()).collect(),
            excluded_colors: knowledge.color().excluded().map(Color::as_str).collect(),
        }
    }
}

impl EngineSnapshot {
    pub fn capture(engine: &GameEngine) -> Self {
        EngineSnapshot {
            phase: engine.phase(),
            seat_to_act: engine.seat_to_act(),
            turns: engine.turns(),
            played_cards: engine.played_cards(),
            risked_turns: engine.risked_turns(),
            table: Color::ALL
                .iter()
                .map(|color| (color.as_str(), engine.table().height(*color)))
                .collect(),
            deck_remaining: engine.deck_len(),
            hands: Seat::LOOP
                .iter()
                .map(|seat| {
                    let hand = engine.hand(*seat);
                    hand.iter().map(SlotSnapshot::capture).collect()
                })
                .collect(),
        }
    }

    pub fn to_json(engine: &GameEngine) -> serde_json::Result<String> {
        serde_json::to_string(&Self::capture(engine))
    }
}
