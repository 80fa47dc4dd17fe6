//! Hand-category detection and scoring.
//!
//! Nine category detectors run strongest-first over an unordered card set;
//! the first present category yields the best [`Combination`] it can form.
//! Combinations order by a single packed score, so showdown ranking is a
//! plain numeric sort.

mod analysis;
mod combination;
mod detector;

pub use combination::{Category, Combination};

use analysis::HandAnalysis;
use detector::{detector_for, DETECTORS};

use crate::cards::Card;
use crate::hand::{Board, HoleCards};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EvalError {
    #[error("need at least 5 cards to build a combination, got {0}")]
    TooFewCards(usize),
    #[error("no {0} can be formed from these cards")]
    CategoryAbsent(Category),
}

/// Evaluate a card set into its strongest combination.
///
/// Categories are tried strongest to weakest, so the result is always the
/// best category the cards can form. Needs at least five cards; tolerates
/// six, seven, or more (double-deck sets included).
///
/// ```
/// use holdem_engine::cards::parse_cards;
/// use holdem_engine::evaluator::{eval, Category};
///
/// let cards = parse_cards("Kh Ks Kd Qc Qh").unwrap();
/// let combo = eval(&cards).unwrap();
/// assert_eq!(combo.category(), Category::FullHouse);
/// ```
pub fn eval(cards: &[Card]) -> Result<Combination, EvalError> {
    if cards.len() < 5 {
        return Err(EvalError::TooFewCards(cards.len()));
    }
    let analysis = HandAnalysis::new(cards);
    for detector in DETECTORS {
        if detector.is_present(&analysis) {
            return Ok(detector.best(&analysis));
        }
    }
    // High card matches any non-empty card set.
    unreachable!("high card detector always matches")
}

/// Evaluate the two-plus-five card set a showdown compares: hole cards and
/// the full board.
pub fn eval_holdem(hole: &HoleCards, board: &Board) -> Result<Combination, EvalError> {
    let mut cards = Vec::with_capacity(2 + board.len());
    cards.extend_from_slice(&hole.as_array());
    cards.extend_from_slice(board.as_slice());
    eval(&cards)
}

/// Can `category` be formed from some subset of `cards`?
///
/// Tolerates card sets as small as the category's own minimum (a pair needs
/// two cards, trips three, two pair or quads four, everything else five);
/// below that minimum the category is simply absent.
pub fn is_present(category: Category, cards: &[Card]) -> bool {
    let detector = detector_for(category);
    if cards.len() < detector.min_cards() {
        return false;
    }
    detector.is_present(&HandAnalysis::new(cards))
}

/// The single best instance of `category` formable from `cards`.
///
/// A combination is only valid when built from at least five cards, so
/// smaller sets fail with [`EvalError::TooFewCards`] even when the presence
/// test alone would pass.
pub fn best(category: Category, cards: &[Card]) -> Result<Combination, EvalError> {
    if cards.len() < 5 {
        return Err(EvalError::TooFewCards(cards.len()));
    }
    let detector = detector_for(category);
    let analysis = HandAnalysis::new(cards);
    if !detector.is_present(&analysis) {
        return Err(EvalError::CategoryAbsent(category));
    }
    Ok(detector.best(&analysis))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{parse_cards, Rank};

    fn cards(input: &str) -> Vec<Card> {
        parse_cards(input).expect("valid cards")
    }

    #[test]
    fn eval_requires_five_cards() {
        let err = eval(&cards("Ah Kh Qh Jh")).unwrap_err();
        assert_eq!(err, EvalError::TooFewCards(4));
    }

    #[test]
    fn eval_returns_strongest_present_category() {
        // A straight flush is also a flush and a straight; eval must pick
        // the strongest reading.
        let combo = eval(&cards("9h 8h 7h 6h 5h")).unwrap();
        assert_eq!(combo, Combination::StraightFlush { high: Rank::Nine });
    }

    #[test]
    fn eval_scans_seven_card_sets() {
        let combo = eval(&cards("Ah As 2d 2c 2h 9s 4d")).unwrap();
        assert_eq!(combo, Combination::FullHouse { trips: Rank::Two, pair: Rank::Ace });
    }

    #[test]
    fn eval_holdem_combines_hole_and_board() {
        let hole: HoleCards = "Ah Ad".parse().unwrap();
        let board: Board = "As Ac Kd Qh 2c".parse().unwrap();
        let combo = eval_holdem(&hole, &board).unwrap();
        assert_eq!(combo, Combination::FourOfAKind { rank: Rank::Ace, kicker: Rank::King });
    }

    #[test]
    fn best_rejects_absent_categories() {
        let err = best(Category::Flush, &cards("Ah Ks Qd Jc 9h")).unwrap_err();
        assert_eq!(err, EvalError::CategoryAbsent(Category::Flush));
    }

    #[test]
    fn presence_tolerates_small_sets() {
        assert!(is_present(Category::Pair, &cards("Kh Ks")));
        assert!(is_present(Category::ThreeOfAKind, &cards("Kh Ks Kd")));
        assert!(!is_present(Category::Straight, &cards("5h 4s 3d 2c")));
        assert!(!is_present(Category::Pair, &cards("Kh")));
    }

    #[test]
    fn full_house_scenario() {
        // Kings full of queens, no kickers.
        let combo = eval(&cards("Kh Ks Kd Qc Qh")).unwrap();
        assert_eq!(combo, Combination::FullHouse { trips: Rank::King, pair: Rank::Queen });
        assert!(combo.kickers().is_empty());
    }

    #[test]
    fn high_card_scenario() {
        let combo = eval(&cards("Ah Ks Qd Jc 9h")).unwrap();
        assert_eq!(
            combo,
            Combination::HighCard {
                high: Rank::Ace,
                kickers: [Rank::King, Rank::Queen, Rank::Jack, Rank::Nine],
            }
        );
    }
}
