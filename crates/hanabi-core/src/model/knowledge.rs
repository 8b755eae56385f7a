//! What a player provably knows about one of their own hidden cards.
//!
//! Each card carries two independent facets, one for rank and one for
//! color. A facet starts `Unknown`, becomes `Hinted` when the value is told
//! directly, and becomes `Deduced` once every other value has been ruled out.

use crate::model::card::Card;
use crate::model::color::{Color, TOTAL_COLORS};
use crate::model::rank::{Rank, TOTAL_RANKS};
use core::fmt;
use core::marker::PhantomData;
use serde::{Deserialize, Serialize};

/// A card attribute that hints can name.
pub trait Attribute: Copy + Eq + fmt::Debug + 'static {
    const VARIANTS: usize;

    fn slot(self) -> usize;

    fn all() -> &'static [Self];
}

impl Attribute for Rank {
    const VARIANTS: usize = TOTAL_RANKS;

    fn slot(self) -> usize {
        self.index()
    }

    fn all() -> &'static [Self] {
        &Rank::ORDERED
    }
}

impl Attribute for Color {
    const VARIANTS: usize = TOTAL_COLORS;

    fn slot(self) -> usize {
        self.index()
    }

    fn all() -> &'static [Self] {
        &Color::ALL
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Certainty {
    Unknown,
    Hinted,
    Deduced,
}

impl Certainty {
    pub const fn is_known(self) -> bool {
        !matches!(self, Certainty::Unknown)
    }
}

/// Certainty plus the set of values excluded by negative hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Facet<T: Attribute> {
    certainty: Certainty,
    excluded: u8,
    _attribute: PhantomData<T>,
}

impl<T: Attribute> Default for Facet<T> {
    fn default() -> Self {
        Self {
            certainty: Certainty::Unknown,
            excluded: 0,
            _attribute: PhantomData,
        }
    }
}

impl<T: Attribute> Facet<T> {
    pub fn certainty(&self) -> Certainty {
        self.certainty
    }

    pub fn is_known(&self) -> bool {
        self.certainty.is_known()
    }

    pub fn excludes(&self, value: T) -> bool {
        self.excluded & (1 << value.slot()) != 0
    }

    pub fn excluded_count(&self) -> usize {
        self.excluded.count_ones() as usize
    }

    pub fn excluded(&self) -> impl Iterator<Item = T> + '_ {
        T::all()
            .iter()
            .copied()
            .filter(|value| self.excludes(*value))
    }

    /// Values still possible from the holder's point of view.
    pub fn candidates(&self) -> impl Iterator<Item = T> + '_ {
        T::all()
            .iter()
            .copied()
            .filter(|value| !self.excludes(*value))
    }

    fn confirm(&mut self, actual: T, told: T) -> bool {
        if told != actual {
            return false;
        }
        self.certainty = Certainty::Hinted;
        true
    }

    fn exclude(&mut self, actual: T, told: T) -> bool {
        if told == actual {
            return false;
        }
        self.excluded |= 1 << told.slot();
        if self.certainty == Certainty::Unknown && self.excluded_count() == T::VARIANTS - 1 {
            self.certainty = Certainty::Deduced;
        }
        true
    }
}

/// The value a hint names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hint {
    Rank(Rank),
    Color(Color),
}

impl fmt::Display for Hint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hint::Rank(rank) => write!(f, "rank {rank}"),
            Hint::Color(color) => write!(f, "color {color}"),
        }
    }
}

/// One fact delivered to one card by a hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    Is(Hint),
    IsNot(Hint),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contradiction {
    pub observation: Observation,
    pub actual: Card,
}

impl fmt::Display for Contradiction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.observation {
            Observation::Is(hint) => write!(f, "{} told {hint}", self.actual),
            Observation::IsNot(hint) => write!(f, "{} told not {hint}", self.actual),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardKnowledge {
    card: Card,
    rank: Facet<Rank>,
    color: Facet<Color>,
}

impl CardKnowledge {
    pub fn new(card: Card) -> Self {
        Self {
            card,
            rank: Facet::default(),
            color: Facet::default(),
        }
    }

    pub fn card(&self) -> Card {
        self.card
    }

    pub fn rank(&self) -> &Facet<Rank> {
        &self.rank
    }

    pub fn color(&self) -> &Facet<Color> {
        &self.color
    }

    pub fn rank_known(&self) -> bool {
        self.rank.is_known()
    }

    pub fn color_known(&self) -> bool {
        self.color.is_known()
    }

    pub fn fully_known(&self) -> bool {
        self.rank_known() && self.color_known()
    }

    pub fn observe(&mut self, observation: Observation) -> Result<(), Contradiction> {
        let consistent = match observation {
            Observation::Is(Hint::Rank(rank)) => self.rank.confirm(self.card.rank, rank),
            Observation::Is(Hint::Color(color)) => self.color.confirm(self.card.color, color),
            Observation::IsNot(Hint::Rank(rank)) => self.rank.exclude(self.card.rank, rank),
            Observation::IsNot(Hint::Color(color)) => self.color.exclude(self.card.color, color),
        };
        if consistent {
            Ok(())
        } else {
            Err(Contradiction {
                observation,
                actual: self.card,
            })
        }
    }
}
