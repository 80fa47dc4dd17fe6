use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank, Suit};
use crate::hand::{Board, HoleCards};

/// Which physical deck a round is played with.
///
/// `DoubleDeck` merges two standard decks, so any card can appear twice.
/// The evaluator and snapshot restore both tolerate duplicate copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    Standard,
    DoubleDeck,
}

impl GameMode {
    pub const fn deck_size(self) -> usize {
        match self {
            GameMode::Standard => 52,
            GameMode::DoubleDeck => 104,
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DeckError {
    #[error("deck is empty")]
    Empty,
    #[error("not enough cards to deal: need {need}, have {have}")]
    Insufficient { need: usize, have: usize },
    #[error("board already has five cards")]
    BoardFull,
}

/// An ordered pile of cards. The top of the deck is the end of the vector.
///
/// ```
/// use holdem_engine::deck::Deck;
///
/// let mut deck = Deck::standard();
/// deck.shuffle_seeded(42);
/// let card = deck.draw().unwrap();
/// assert_eq!(deck.len(), 51);
/// let _ = card;
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// A single 52-card deck in canonical order.
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(52);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(rank, suit));
            }
        }
        Self { cards }
    }

    /// Two standard decks merged: 104 cards, each card twice.
    pub fn doubled() -> Self {
        let mut deck = Self::standard();
        let copy = deck.cards.clone();
        deck.cards.extend(copy);
        deck
    }

    pub fn for_mode(mode: GameMode) -> Self {
        match mode {
            GameMode::Standard => Self::standard(),
            GameMode::DoubleDeck => Self::doubled(),
        }
    }

    pub(crate) fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Shuffle with the thread RNG.
    pub fn shuffle(&mut self) {
        self.shuffle_with(&mut rand::rng());
    }

    /// Shuffle with a fixed seed. Same seed, same order.
    pub fn shuffle_seeded(&mut self, seed: u64) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.shuffle_with(&mut rng);
    }

    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Remove and return the top card.
    pub fn draw(&mut self) -> Result<Card, DeckError> {
        self.cards.pop().ok_or(DeckError::Empty)
    }

    /// Deal two hole cards to each seat, one card per seat per pass.
    ///
    /// With seats `a, b, c` the top six cards land as `a b c a b c`, not
    /// `aa bb cc`.
    pub fn deal(&mut self, seats: usize) -> Result<Vec<HoleCards>, DeckError> {
        let need = seats * 2;
        if self.cards.len() < need {
            return Err(DeckError::Insufficient {
                need,
                have: self.cards.len(),
            });
        }
        let mut firsts = Vec::with_capacity(seats);
        for _ in 0..seats {
            firsts.push(self.draw()?);
        }
        let mut hands = Vec::with_capacity(seats);
        for first in firsts {
            let second = self.draw()?;
            hands.push(HoleCards::pair(first, second));
        }
        Ok(hands)
    }

    /// Move the top card to the bottom of the deck. No-op when empty.
    pub fn burn(&mut self) {
        if let Some(card) = self.cards.pop() {
            self.cards.insert(0, card);
        }
    }

    /// Draw the top card onto the board.
    pub fn reveal(&mut self, board: &mut Board) -> Result<Card, DeckError> {
        if board.len() >= Board::MAX {
            return Err(DeckError::BoardFull);
        }
        let card = self.draw()?;
        board.push(card);
        Ok(card)
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn standard_deck_has_52_unique_cards() {
        let deck = Deck::standard();
        assert_eq!(deck.len(), 52);
        let unique: HashSet<Card> = deck.cards.iter().copied().collect();
        assert_eq!(unique.len(), 52);
    }

    #[test]
    fn doubled_deck_has_each_card_twice() {
        let deck = Deck::doubled();
        assert_eq!(deck.len(), 104);
        let target = Card::new(Rank::Ace, Suit::Spades);
        let copies = deck.cards.iter().filter(|c| **c == target).count();
        assert_eq!(copies, 2);
    }

    #[test]
    fn for_mode_matches_deck_size() {
        assert_eq!(Deck::for_mode(GameMode::Standard).len(), GameMode::Standard.deck_size());
        assert_eq!(
            Deck::for_mode(GameMode::DoubleDeck).len(),
            GameMode::DoubleDeck.deck_size()
        );
    }

    #[test]
    fn shuffle_preserves_the_card_multiset() {
        let mut deck = Deck::doubled();
        deck.shuffle_seeded(9);
        let mut shuffled = deck.cards.clone();
        let mut fresh = Deck::doubled().cards;
        shuffled.sort();
        fresh.sort();
        assert_eq!(shuffled, fresh);
    }

    #[test]
    fn seeded_shuffle_is_reproducible() {
        let mut a = Deck::standard();
        let mut b = Deck::standard();
        a.shuffle_seeded(42);
        b.shuffle_seeded(42);
        assert_eq!(a, b);

        let mut c = Deck::standard();
        c.shuffle_seeded(43);
        assert_ne!(a, c);
    }

    #[test]
    fn draw_empties_the_deck_then_errors() {
        let mut deck = Deck::standard();
        for _ in 0..52 {
            assert!(deck.draw().is_ok());
        }
        assert!(deck.is_empty());
        assert_eq!(deck.draw(), Err(DeckError::Empty));
    }

    #[test]
    fn deal_interleaves_across_seats() {
        let mut deck = Deck::standard();
        deck.shuffle_seeded(7);

        let mut probe = deck.clone();
        let tops: Vec<Card> = (0..6).map(|_| probe.draw().unwrap()).collect();

        let hands = deck.deal(3).unwrap();
        assert_eq!(hands.len(), 3);
        assert_eq!(hands[0], HoleCards::pair(tops[0], tops[3]));
        assert_eq!(hands[1], HoleCards::pair(tops[1], tops[4]));
        assert_eq!(hands[2], HoleCards::pair(tops[2], tops[5]));
        assert_eq!(deck.len(), 46);
    }

    #[test]
    fn deal_errors_when_short() {
        let mut deck = Deck::standard();
        for _ in 0..47 {
            deck.draw().unwrap();
        }
        assert_eq!(deck.deal(3), Err(DeckError::Insufficient { need: 6, have: 5 }));
        // deck untouched on failure
        assert_eq!(deck.len(), 5);
    }

    #[test]
    fn burn_moves_top_card_to_bottom() {
        let mut deck = Deck::standard();
        deck.shuffle_seeded(11);
        let top = deck.clone().draw().unwrap();

        deck.burn();
        assert_eq!(deck.len(), 52);

        let mut last = None;
        while let Ok(card) = deck.draw() {
            last = Some(card);
        }
        assert_eq!(last, Some(top));
    }

    #[test]
    fn burn_on_empty_deck_is_noop() {
        let mut deck = Deck::from_cards(Vec::new());
        deck.burn();
        assert!(deck.is_empty());
    }

    #[test]
    fn reveal_fills_board_up_to_five() {
        let mut deck = Deck::standard();
        deck.shuffle_seeded(3);
        let mut board = Board::new();
        for expected in 1..=5 {
            deck.reveal(&mut board).unwrap();
            assert_eq!(board.len(), expected);
        }
        assert_eq!(deck.reveal(&mut board), Err(DeckError::BoardFull));
        assert_eq!(deck.len(), 47);
    }
}
