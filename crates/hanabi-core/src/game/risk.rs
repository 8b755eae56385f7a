//! Classifies plays made without full certainty of being legal.
//!
//! The rules are checked in order and the first match decides:
//! 1. a known 1 is safe when its color is known or nothing was played yet;
//! 2. a card known in both rank and color is safe;
//! 3. a card of known rank is risky unless every color it could still be
//!    sits exactly one below that rank on the table;
//! 4. anything else is risky.

use crate::model::color::Color;
use crate::model::knowledge::CardKnowledge;
use crate::model::rank::Rank;
use crate::model::table::Table;

pub fn is_risky(knowledge: &CardKnowledge, played_cards: u32, table: &Table) -> bool {
    let rank = knowledge.card().rank;

    if knowledge.rank_known()
        && rank == Rank::One
        && (knowledge.color_known() || played_cards == 0)
    {
        return false;
    }

    if knowledge.fully_known() {
        return false;
    }

    if knowledge.rank_known() {
        let needed = rank.prerequisite_height();
        return Color::ALL
            .iter()
            .copied()
            .filter(|color| !knowledge.color().excludes(*color))
            .any(|color| table.height(color) != needed);
    }

    true
}
