use crate::cards::{parse_cards, Card};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HandError {
    #[error("duplicate cards in hole cards")]
    DuplicateHoleCards,
    #[error("too many board cards: {0}")]
    TooManyBoardCards(usize),
    #[error("duplicate cards on board")]
    DuplicateBoardCards,
    #[error("hole cards overlap with board")]
    Overlap,
    #[error("expected exactly two hole cards, got {0}")]
    HoleCount(usize),
    #[error("card parse error: {0}")]
    CardParse(String),
}

/// A player's two private hole cards.
///
/// `try_new` rejects identical cards, which is right for user input against
/// a single deck. Cards dealt from a double deck bypass that check, since
/// two physical copies of the same card are legal there.
///
/// ```
/// use holdem_engine::cards::{Card, Rank, Suit};
/// use holdem_engine::hand::HoleCards;
///
/// let hole = HoleCards::try_new(
///     Card::new(Rank::Ace, Suit::Spades),
///     Card::new(Rank::King, Suit::Spades),
/// ).unwrap();
/// assert_eq!(hole.as_array().len(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoleCards(Card, Card);

impl HoleCards {
    /// Return the first (left) hole card.
    pub fn first(&self) -> Card {
        self.0
    }

    /// Return the second (right) hole card.
    pub fn second(&self) -> Card {
        self.1
    }

    /// Return both hole cards as a fixed array.
    pub fn as_array(&self) -> [Card; 2] {
        [self.0, self.1]
    }

    pub fn try_new(a: Card, b: Card) -> Result<Self, HandError> {
        if a == b {
            return Err(HandError::DuplicateHoleCards);
        }
        Ok(Self(a, b))
    }

    /// Unchecked constructor for cards coming off a deck, where duplicates
    /// are possible in double-deck mode.
    pub(crate) fn pair(a: Card, b: Card) -> Self {
        Self(a, b)
    }

    pub fn from_slice(slice: &[Card]) -> Result<Self, HandError> {
        if slice.len() != 2 {
            return Err(HandError::HoleCount(slice.len()));
        }
        Self::try_new(slice[0], slice[1])
    }

    /// A copy with the two cards in the other order, for display. Hand
    /// value is unaffected.
    pub fn swapped(&self) -> Self {
        Self(self.1, self.0)
    }
}

impl FromStr for HoleCards {
    type Err = HandError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = parse_cards(s).map_err(|e| HandError::CardParse(e.to_string()))?;
        Self::from_slice(&cards)
    }
}

/// Community cards revealed so far: empty preflop, then 3, 4, 5.
///
/// ```
/// use holdem_engine::cards::{Card, Rank, Suit};
/// use holdem_engine::hand::Board;
///
/// let board = Board::try_new(vec![
///     Card::new(Rank::Two, Suit::Clubs),
///     Card::new(Rank::Three, Suit::Clubs),
///     Card::new(Rank::Four, Suit::Clubs),
/// ]).unwrap();
/// assert_eq!(board.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cards: Vec<Card>,
}

impl Board {
    pub const MAX: usize = 5;

    /// An empty board, as a round starts with.
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    /// Build a board without checks. Double-deck boards may hold
    /// duplicate copies, so `try_new` would wrongly reject them.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Build a board for a single deck: at most five cards, all distinct.
    pub fn try_new(cards: Vec<Card>) -> Result<Self, HandError> {
        if cards.len() > Self::MAX {
            return Err(HandError::TooManyBoardCards(cards.len()));
        }
        let set: HashSet<Card> = cards.iter().copied().collect();
        if set.len() != cards.len() {
            return Err(HandError::DuplicateBoardCards);
        }
        Ok(Self { cards })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.cards.len() == Self::MAX
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    pub(crate) fn push(&mut self, card: Card) {
        self.cards.push(card);
    }
}

impl FromStr for Board {
    type Err = HandError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = parse_cards(s).map_err(|e| HandError::CardParse(e.to_string()))?;
        Board::try_new(cards)
    }
}

/// Validate that hole cards and board form a consistent single-deck state.
/// Allows 0..=5 board cards (useful mid-round). Ensures uniqueness across
/// all cards, so it does not apply to double-deck games.
///
/// ```
/// use holdem_engine::cards::{Card, Rank, Suit};
/// use holdem_engine::hand::{Board, HoleCards, validate_holdem};
///
/// let hole = HoleCards::try_new(
///     Card::new(Rank::Ace, Suit::Spades),
///     Card::new(Rank::King, Suit::Spades),
/// ).unwrap();
/// let board = Board::try_new(vec![
///     Card::new(Rank::Two, Suit::Clubs),
///     Card::new(Rank::Three, Suit::Clubs),
///     Card::new(Rank::Four, Suit::Clubs),
/// ]).unwrap();
/// validate_holdem(&hole, &board).unwrap();
/// ```
pub fn validate_holdem(hole: &HoleCards, board: &Board) -> Result<(), HandError> {
    if board.len() > Board::MAX {
        return Err(HandError::TooManyBoardCards(board.len()));
    }
    // Board may have been built via `from_cards`
    let set: HashSet<Card> = board.as_slice().iter().copied().collect();
    if set.len() != board.len() {
        return Err(HandError::DuplicateBoardCards);
    }
    if set.contains(&hole.first()) || set.contains(&hole.second()) {
        return Err(HandError::Overlap);
    }
    if hole.first() == hole.second() {
        return Err(HandError::DuplicateHoleCards);
    }
    Ok(())
}
