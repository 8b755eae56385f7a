use crate::model::card::Card;
use crate::model::knowledge::{CardKnowledge, Hint, Observation};

pub const HAND_SIZE: usize = 5;

/// Cards held by one player, addressed by slot index in deal/draw order.
#[derive(Debug, Clone, Default)]
pub struct Hand {
    slots: Vec<CardKnowledge>,
}

impl Hand {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    pub fn with_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            slots: cards.into_iter().map(CardKnowledge::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CardKnowledge> {
        self.slots.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CardKnowledge> {
        self.slots.iter()
    }

    /// Delivers a hint to every slot: selected slots learn the value, the
    /// rest learn they are not it. Returns false if any slot contradicts.
    pub fn apply_hint(&mut self, hint: Hint, selected: &[usize]) -> bool {
        let mut consistent = true;
        for (index, slot) in self.slots.iter_mut().enumerate() {
            let observation = if selected.contains(&index) {
                Observation::Is(hint)
            } else {
                Observation::IsNot(hint)
            };
            if let Err(contradiction) = slot.observe(observation) {
                tracing::debug!(slot = index, %contradiction, "hint contradicts card");
                consistent = false;
            }
        }
        consistent
    }

    /// Removes the slot at `index`, shifting later slots down, and appends the
    /// drawn card if there was one.
    pub fn drop_and_draw(&mut self, index: usize, next: Option<Card>) -> CardKnowledge {
        let removed = self.slots.remove(index);
        if let Some(card) = next {
            self.slots.push(CardKnowledge::new(card));
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::Hand;
    use crate::model::card::Card;
    use crate::model::color::Color;
    use crate::model::knowledge::Hint;
    use crate::model::rank::Rank;

    fn sample_hand() -> Hand {
        Hand::with_cards([
            Card::new(Rank::One, Color::Red),
            Card::new(Rank::Two, Color::Green),
            Card::new(Rank::One, Color::Blue),
            Card::new(Rank::Four, Color::Yellow),
            Card::new(Rank::Five, Color::White),
        ])
    }

    #[test]
    fn hint_marks_selected_and_excludes_the_rest() {
        let mut hand = sample_hand();
        assert!(hand.apply_hint(Hint::Rank(Rank::One), &[0, 2]));
        assert!(hand.get(0).unwrap().rank_known());
        assert!(hand.get(2).unwrap().rank_known());
        assert!(hand.get(1).unwrap().rank().excludes(Rank::One));
        assert!(hand.get(4).unwrap().rank().excludes(Rank::One));
    }

    #[test]
    fn hint_missing_a_matching_card_fails() {
        let mut hand = sample_hand();
        assert!(!hand.apply_hint(Hint::Rank(Rank::One), &[0]));
        // later slots still receive their facts
        assert!(hand.get(3).unwrap().rank().excludes(Rank::One));
    }

    #[test]
    fn hint_naming_a_wrong_card_fails() {
        let mut hand = sample_hand();
        assert!(!hand.apply_hint(Hint::Color(Color::Green), &[0, 1]));
    }

    #[test]
    fn drop_and_draw_shifts_and_appends() {
        let mut hand = sample_hand();
        let drawn = Card::new(Rank::Three, Color::Red);
        let removed = hand.drop_and_draw(1, Some(drawn));
        assert_eq!(removed.card(), Card::new(Rank::Two, Color::Green));
        assert_eq!(hand.len(), 5);
        assert_eq!(
            hand.get(1).unwrap().card(),
            Card::new(Rank::One, Color::Blue)
        );
        assert_eq!(hand.get(4).unwrap().card(), drawn);
        assert!(!hand.get(4).unwrap().rank_known());
    }

    #[test]
    fn drop_without_draw_shrinks() {
        let mut hand = sample_hand();
        hand.drop_and_draw(0, None);
        assert_eq!(hand.len(), 4);
    }
}
