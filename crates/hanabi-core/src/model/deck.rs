use crate::model::card::Card;
use crate::model::color::Color;
use crate::model::rank::Rank;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::collections::VecDeque;

/// Copies of each rank per color in a standard deck.
const RANK_COPIES: [(Rank, usize); 5] = [
    (Rank::One, 3),
    (Rank::Two, 2),
    (Rank::Three, 2),
    (Rank::Four, 2),
    (Rank::Five, 1),
];

/// Face-down draw pile, drawn from the front.
#[derive(Debug, Clone, Default)]
pub struct Deck {
    cards: VecDeque<Card>,
}

impl Deck {
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            cards: cards.into_iter().collect(),
        }
    }

    pub fn standard() -> Self {
        let mut cards = VecDeque::with_capacity(50);
        for color in Color::ALL.iter().copied() {
            for (rank, copies) in RANK_COPIES {
                for _ in 0..copies {
                    cards.push_back(Card::new(rank, color));
                }
            }
        }
        Self { cards }
    }

    pub fn shuffled<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::standard();
        deck.cards.make_contiguous().shuffle(rng);
        deck
    }

    pub fn shuffled_with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::shuffled(&mut rng)
    }

    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop_front()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }
}
