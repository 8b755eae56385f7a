use crate::game::action::Action;
use crate::game::result::{EndReason, GameResult};
use crate::game::risk;
use crate::game::serialization::EngineSnapshot;
use crate::model::card::Card;
use crate::model::deck::Deck;
use crate::model::hand::{HAND_SIZE, Hand};
use crate::model::knowledge::Hint;
use crate::model::player::{PLAYER_COUNT, Seat};
use crate::model::table::Table;
use core::fmt;
use serde::Serialize;
use std::array;
use std::borrow::Borrow;
use tracing::Level;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    NotStarted,
    InProgress,
    Over(EndReason),
}

/// Actions the engine refuses. A refused action changes nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    NotStarted,
    CardOutOfRange { index: usize, hand_len: usize },
    ShortDeal { dealt: usize, required: usize },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::NotStarted => f.write_str("no game has been started"),
            EngineError::CardOutOfRange { index, hand_len } => {
                write!(f, "index {index} out of range for a hand of {hand_len}")
            }
            EngineError::ShortDeal { dealt, required } => {
                write!(f, "deal has {dealt} cards, {required} required")
            }
        }
    }
}

impl std::error::Error for EngineError {}

/// Referee for one two-player table, reused across consecutive games.
#[derive(Debug, Clone)]
pub struct GameEngine {
    phase: Phase,
    hands: [Hand; PLAYER_COUNT],
    deck: Deck,
    table: Table,
    to_act: Seat,
    turns: u32,
    played_cards: u32,
    risked_turns: u32,
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GameEngine {
    pub fn new() -> Self {
        Self {
            phase: Phase::NotStarted,
            hands: array::from_fn(|_| Hand::new()),
            deck: Deck::default(),
            table: Table::new(),
            to_act: Seat::First,
            turns: 0,
            played_cards: 0,
            risked_turns: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::Over(_))
    }

    pub fn seat_to_act(&self) -> Seat {
        self.to_act
    }

    pub fn hand(&self, seat: Seat) -> &Hand {
        &self.hands[seat.index()]
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn deck_len(&self) -> usize {
        self.deck.len()
    }

    pub fn turns(&self) -> u32 {
        self.turns
    }

    pub fn played_cards(&self) -> u32 {
        self.played_cards
    }

    pub fn risked_turns(&self) -> u32 {
        self.risked_turns
    }

    /// Applies one action. Returns the final counters when this action ends
    /// the game in progress.
    pub fn apply(&mut self, action: &Action) -> Result<Option<GameResult>, EngineError> {
        match action {
            Action::StartNewGame { cards } => {
                self.start(cards)?;
                return Ok(None);
            }
            Action::Pass => {
                self.to_act = self.to_act.next();
                return Ok(None);
            }
            _ => {}
        }

        match self.phase {
            Phase::NotStarted => return Err(EngineError::NotStarted),
            Phase::Over(_) => {
                self.to_act = self.to_act.next();
                return Ok(None);
            }
            Phase::InProgress => {}
        }

        let seat = self.to_act;
        match action {
            Action::TellColor { .. } | Action::TellRank { .. } => {
                if let Some((hint, cards)) = action.hint() {
                    self.tell(hint, cards)?;
                }
            }
            Action::PlayCard { index } => self.play(*index)?,
            Action::DropCard { index } => self.drop_card(*index)?,
            Action::StartNewGame { .. } | Action::Pass => {}
        }

        self.turns += 1;
        self.to_act = self.to_act.next();
        tracing::trace!(
            %seat,
            action = action.label(),
            turn = self.turns,
            deck = self.deck.len(),
            "action applied"
        );
        self.trace_snapshot();

        Ok(match self.phase {
            Phase::Over(ending) => {
                let result = self.result(ending);
                tracing::debug!(
                    %ending,
                    turns = result.turns,
                    played = result.played_cards,
                    risked = result.risked_turns,
                    "game over"
                );
                Some(result)
            }
            _ => None,
        })
    }

    /// Feeds `actions` through the engine lazily, yielding a result each time
    /// a game ends and an error for each refused action.
    pub fn run_games<I>(&mut self, actions: I) -> RunGames<'_, I::IntoIter>
    where
        I: IntoIterator,
        I::Item: Borrow<Action>,
    {
        RunGames {
            engine: self,
            actions: actions.into_iter(),
        }
    }

    fn start(&mut self, cards: &[Card]) -> Result<(), EngineError> {
        let required = PLAYER_COUNT * HAND_SIZE;
        if cards.len() < required {
            return Err(EngineError::ShortDeal {
                dealt: cards.len(),
                required,
            });
        }

        let (dealt, pile) = cards.split_at(required);
        self.hands = array::from_fn(|seat| {
            let slots = &dealt[seat * HAND_SIZE..(seat + 1) * HAND_SIZE];
            Hand::with_cards(slots.iter().copied())
        });
        self.deck = Deck::from_cards(pile.iter().copied());
        self.table = Table::new();
        self.phase = Phase::InProgress;
        self.to_act = Seat::First;
        self.turns = 0;
        self.played_cards = 0;
        self.risked_turns = 0;

        tracing::debug!(deck = self.deck.len(), "new game dealt");
        Ok(())
    }

    fn tell(&mut self, hint: Hint, selected: &[usize]) -> Result<(), EngineError> {
        let target = &mut self.hands[self.to_act.partner().index()];
        let hand_len = target.len();
        if let Some(&index) = selected.iter().find(|&&i| i >= hand_len) {
            return Err(EngineError::CardOutOfRange { index, hand_len });
        }

        if !target.apply_hint(hint, selected) {
            self.finish(EndReason::Contradiction);
        }
        Ok(())
    }

    fn play(&mut self, index: usize) -> Result<(), EngineError> {
        let hand = &self.hands[self.to_act.index()];
        let knowledge = hand.get(index).ok_or(EngineError::CardOutOfRange {
            index,
            hand_len: hand.len(),
        })?;
        let card = knowledge.card();

        if !self.table.accepts(card) {
            tracing::debug!(%card, height = self.table.height(card.color), "illegal play");
            self.finish(EndReason::IllegalPlay);
            return Ok(());
        }

        let risky = risk::is_risky(knowledge, self.played_cards, &self.table);
        if risky {
            self.risked_turns += 1;
        }

        let placed = self.table.place(card);
        debug_assert!(placed, "legality checked above");
        let exhausted = self.discard_and_draw(index);
        if card.is_last_of_color() && self.table.is_complete() {
            self.finish(EndReason::TableComplete);
        } else if exhausted {
            self.finish(EndReason::DeckExhausted);
        }
        self.played_cards += 1;
        Ok(())
    }

    fn drop_card(&mut self, index: usize) -> Result<(), EngineError> {
        let hand_len = self.hands[self.to_act.index()].len();
        if index >= hand_len {
            return Err(EngineError::CardOutOfRange { index, hand_len });
        }

        if self.discard_and_draw(index) {
            self.finish(EndReason::DeckExhausted);
        }
        Ok(())
    }

    /// Removes the acting player's card at `index` and draws its replacement.
    /// Returns true when the deck is empty afterwards.
    fn discard_and_draw(&mut self, index: usize) -> bool {
        let next = self.deck.draw();
        self.hands[self.to_act.index()].drop_and_draw(index, next);
        next.is_none() || self.deck.is_empty()
    }

    fn trace_snapshot(&self) {
        if !tracing::enabled!(Level::TRACE) {
            return;
        }
        match EngineSnapshot::to_json(self) {
            Ok(state) => tracing::trace!(%state, "engine state"),
            Err(err) => tracing::warn!(error = %err, "failed to encode engine state"),
        }
    }

    fn finish(&mut self, reason: EndReason) {
        if self.phase == Phase::InProgress {
            self.phase = Phase::Over(reason);
        }
    }

    fn result(&self, ending: EndReason) -> GameResult {
        GameResult {
            turns: self.turns,
            played_cards: self.played_cards,
            risked_turns: self.risked_turns,
            ending,
        }
    }
}

/// Lazy stream of finished games produced by [`GameEngine::run_games`].
pub struct RunGames<'a, I> {
    engine: &'a mut GameEngine,
    actions: I,
}

impl<I> Iterator for RunGames<'_, I>
where
    I: Iterator,
    I::Item: Borrow<Action>,
{
    type Item = Result<GameResult, EngineError>;

    fn next(&mut self) -> Option<Self::Item> {
        for action in self.actions.by_ref() {
            match self.engine.apply(action.borrow()) {
                Ok(Some(result)) => return Some(Ok(result)),
                Ok(None) => {}
                Err(err) => return Some(Err(err)),
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::{EngineError, GameEngine, Phase};
    use crate::game::action::Action;
    use crate::game::result::EndReason;
    use crate::model::card::Card;
    use crate::model::color::Color;
    use crate::model::player::Seat;
    use crate::model::rank::Rank;

    fn card(color: Color, rank: u8) -> Card {
        Card::new(Rank::from_value(rank).unwrap(), color)
    }

    fn deal(extra: &[Card]) -> Action {
        let mut cards: Vec<Card> = (1..=5).map(|r| card(Color::Red, r)).collect();
        cards.extend((1..=5).map(|r| card(Color::Green, r)));
        cards.extend_from_slice(extra);
        Action::StartNewGame { cards }
    }

    fn started(extra: &[Card]) -> GameEngine {
        let mut engine = GameEngine::new();
        engine.apply(&deal(extra)).unwrap();
        engine
    }

    #[test]
    fn actions_before_start_are_refused() {
        let mut engine = GameEngine::new();
        assert_eq!(
            engine.apply(&Action::PlayCard { index: 0 }),
            Err(EngineError::NotStarted)
        );
        assert_eq!(engine.phase(), Phase::NotStarted);
    }

    #[test]
    fn short_deal_is_refused() {
        let mut engine = GameEngine::new();
        let err = engine
            .apply(&Action::StartNewGame {
                cards: vec![card(Color::Red, 1); 9],
            })
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::ShortDeal {
                dealt: 9,
                required: 10,
            }
        );
    }

    #[test]
    fn start_deals_five_each_and_keeps_the_rest() {
        let engine = started(&[card(Color::Blue, 1), card(Color::Blue, 2)]);
        let first = engine.hand(Seat::First);
        let second = engine.hand(Seat::Second);
        assert_eq!(first.len(), 5);
        assert_eq!(second.len(), 5);
        assert_eq!(first.get(0).unwrap().card(), card(Color::Red, 1));
        assert_eq!(second.get(0).unwrap().card(), card(Color::Green, 1));
        assert_eq!(engine.deck_len(), 2);
        assert_eq!(engine.seat_to_act(), Seat::First);
        assert_eq!(engine.turns(), 0);
    }

    #[test]
    fn out_of_range_index_changes_nothing() {
        let mut engine = started(&[card(Color::Blue, 1), card(Color::Blue, 2)]);
        let out_of_range = |index| EngineError::CardOutOfRange { index, hand_len: 5 };

        let err = engine.apply(&Action::PlayCard { index: 5 }).unwrap_err();
        assert_eq!(err, out_of_range(5));
        let err = engine
            .apply(&Action::tell_rank(Rank::One, vec![0, 7]))
            .unwrap_err();
        assert_eq!(err, out_of_range(7));
        assert_eq!(engine.turns(), 0);
        assert_eq!(engine.seat_to_act(), Seat::First);
        assert!(!engine.hand(Seat::Second).get(0).unwrap().rank_known());
    }

    #[test]
    fn illegal_play_ends_without_consuming_the_card() {
        let mut engine = started(&[card(Color::Blue, 1), card(Color::Blue, 2)]);
        let result = engine
            .apply(&Action::PlayCard { index: 1 })
            .unwrap()
            .unwrap();
        assert_eq!(result.ending, EndReason::IllegalPlay);
        assert_eq!(result.turns, 1);
        assert_eq!(result.played_cards, 0);
        let kept = engine.hand(Seat::First).get(1).unwrap().card();
        assert_eq!(kept, card(Color::Red, 2));
        assert_eq!(engine.table().height(Color::Red), 0);
    }

    #[test]
    fn over_absorbs_actions_until_restart() {
        let mut engine = started(&[card(Color::Blue, 1), card(Color::Blue, 2)]);
        engine.apply(&Action::PlayCard { index: 4 }).unwrap();
        assert!(engine.is_over());
        assert_eq!(engine.apply(&Action::PlayCard { index: 0 }), Ok(None));
        assert_eq!(engine.apply(&Action::DropCard { index: 0 }), Ok(None));
        assert_eq!(engine.turns(), 1);
        assert_eq!(engine.table().height(Color::Red), 0);

        engine.apply(&deal(&[card(Color::Blue, 1)])).unwrap();
        assert_eq!(engine.phase(), Phase::InProgress);
        assert_eq!(engine.turns(), 0);
        assert_eq!(engine.seat_to_act(), Seat::First);
    }

    #[test]
    fn pass_moves_the_seat_without_a_turn() {
        let mut engine = GameEngine::new();
        assert_eq!(engine.apply(&Action::Pass), Ok(None));
        assert_eq!(engine.seat_to_act(), Seat::Second);
        assert_eq!(engine.phase(), Phase::NotStarted);

        engine.apply(&deal(&[card(Color::Blue, 1)])).unwrap();
        assert_eq!(engine.seat_to_act(), Seat::First);
        engine.apply(&Action::Pass).unwrap();
        assert_eq!(engine.seat_to_act(), Seat::Second);
        assert_eq!(engine.turns(), 0);

        // the second seat now hints the first seat's red hand
        engine
            .apply(&Action::tell_color(Color::Red, vec![0, 1, 2, 3, 4]))
            .unwrap();
        assert!(!engine.is_over());
        assert_eq!(engine.turns(), 1);
        assert!(engine.hand(Seat::First).iter().all(|k| k.color_known()));
    }

    #[test]
    fn drop_emptying_deck_ends_game() {
        let mut engine = started(&[card(Color::Blue, 1)]);
        let result = engine
            .apply(&Action::DropCard { index: 2 })
            .unwrap()
            .unwrap();
        assert_eq!(result.ending, EndReason::DeckExhausted);
        let hand = engine.hand(Seat::First);
        assert_eq!(hand.len(), 5);
        assert_eq!(hand.get(4).unwrap().card(), card(Color::Blue, 1));
    }

    #[test]
    fn drop_from_an_empty_deck_shrinks_hand_and_ends_game() {
        let mut engine = started(&[]);
        let result = engine
            .apply(&Action::DropCard { index: 0 })
            .unwrap()
            .unwrap();
        assert_eq!(result.ending, EndReason::DeckExhausted);
        assert_eq!(engine.hand(Seat::First).len(), 4);
    }

    #[test]
    fn contradicting_hint_ends_game() {
        let mut engine = started(&[card(Color::Blue, 1), card(Color::Blue, 2)]);
        let result = engine
            .apply(&Action::tell_color(Color::Red, vec![0]))
            .unwrap()
            .unwrap();
        assert_eq!(result.ending, EndReason::Contradiction);
        assert_eq!(result.turns, 1);
    }

    #[test]
    fn hints_target_the_partner() {
        let mut engine = started(&[card(Color::Blue, 1), card(Color::Blue, 2)]);
        engine
            .apply(&Action::tell_color(Color::Green, vec![0, 1, 2, 3, 4]))
            .unwrap();
        assert!(!engine.is_over());
        assert!(engine.hand(Seat::Second).iter().all(|k| k.color_known()));
        assert!(engine.hand(Seat::First).iter().all(|k| !k.color_known()));
        assert_eq!(engine.seat_to_act(), Seat::Second);
    }
}
