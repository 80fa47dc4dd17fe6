use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::cards::Rank;

/// Poker hand category from weakest to strongest. Ordinals are the distinct
/// constants 0..=8, so `Category` order alone settles cross-category ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Category {
    HighCard = 0,
    Pair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl Category {
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    pub const fn label(self) -> &'static str {
        match self {
            Category::HighCard => "high card",
            Category::Pair => "pair",
            Category::TwoPair => "two pair",
            Category::ThreeOfAKind => "three of a kind",
            Category::Straight => "straight",
            Category::Flush => "flush",
            Category::FullHouse => "full house",
            Category::FourOfAKind => "four of a kind",
            Category::StraightFlush => "straight flush",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The best instance of one hand category, carrying exactly the ranks that
/// order it against other hands: primaries first, then kickers.
///
/// A `Combination` is only built by the per-category detectors from a source
/// set of at least five cards; there is no public constructor that could
/// fabricate an unachievable category/value pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Combination {
    HighCard { high: Rank, kickers: [Rank; 4] },
    Pair { rank: Rank, kickers: [Rank; 2] },
    TwoPair { pairs: [Rank; 2], kicker: Rank },
    ThreeOfAKind { rank: Rank, kickers: [Rank; 2] },
    Straight { high: Rank },
    Flush { ranks: [Rank; 5] },
    FullHouse { trips: Rank, pair: Rank },
    FourOfAKind { rank: Rank, kicker: Rank },
    StraightFlush { high: Rank },
}

impl Combination {
    pub const fn category(&self) -> Category {
        match self {
            Combination::HighCard { .. } => Category::HighCard,
            Combination::Pair { .. } => Category::Pair,
            Combination::TwoPair { .. } => Category::TwoPair,
            Combination::ThreeOfAKind { .. } => Category::ThreeOfAKind,
            Combination::Straight { .. } => Category::Straight,
            Combination::Flush { .. } => Category::Flush,
            Combination::FullHouse { .. } => Category::FullHouse,
            Combination::FourOfAKind { .. } => Category::FourOfAKind,
            Combination::StraightFlush { .. } => Category::StraightFlush,
        }
    }

    /// The category's defining ranks, strongest first.
    pub fn primaries(&self) -> Vec<Rank> {
        match *self {
            Combination::HighCard { high, .. } => vec![high],
            Combination::Pair { rank, .. } => vec![rank],
            Combination::TwoPair { pairs, .. } => pairs.to_vec(),
            Combination::ThreeOfAKind { rank, .. } => vec![rank],
            Combination::Straight { high } => vec![high],
            Combination::Flush { ranks } => ranks.to_vec(),
            Combination::FullHouse { trips, pair } => vec![trips, pair],
            Combination::FourOfAKind { rank, .. } => vec![rank],
            Combination::StraightFlush { high } => vec![high],
        }
    }

    /// Tie-breaking ranks outside the primary grouping, strongest first.
    pub fn kickers(&self) -> Vec<Rank> {
        match *self {
            Combination::HighCard { kickers, .. } => kickers.to_vec(),
            Combination::Pair { kickers, .. } => kickers.to_vec(),
            Combination::TwoPair { kicker, .. } => vec![kicker],
            Combination::ThreeOfAKind { kickers, .. } => kickers.to_vec(),
            Combination::FourOfAKind { kicker, .. } => vec![kicker],
            Combination::Straight { .. }
            | Combination::Flush { .. }
            | Combination::FullHouse { .. }
            | Combination::StraightFlush { .. } => Vec::new(),
        }
    }

    /// Pack the hand into a single monotone key: plain `u64` comparison of
    /// two scores orders the hands.
    ///
    /// The category ordinal sits at the 10^10 slot; the primary ranks and
    /// then the kickers fill consecutive two-decimal-digit slots below it
    /// (10^8, 10^6, 10^4, 10^2, 10^0). Each slot holds the rank's face value
    /// 2..=14, so Ace outranks King in every slot. No hand uses more than
    /// five slots (a flush uses all five as primaries).
    pub fn score(&self) -> u64 {
        let mut slots = [0u64; 5];
        let mut i = 0;
        for rank in self.primaries() {
            slots[i] = rank.value() as u64;
            i += 1;
        }
        for rank in self.kickers() {
            slots[i] = rank.value() as u64;
            i += 1;
        }
        let mut score = self.category().ordinal() as u64 * 10_u64.pow(10);
        for (slot, value) in slots.iter().enumerate() {
            score += value * 10_u64.pow(8 - 2 * slot as u32);
        }
        score
    }
}

impl Ord for Combination {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score().cmp(&other.score())
    }
}

impl PartialOrd for Combination {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Combination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Combination::HighCard { high, .. } => write!(f, "high card {high}"),
            Combination::Pair { rank, .. } => write!(f, "pair of {rank}s"),
            Combination::TwoPair { pairs, .. } => {
                write!(f, "two pair, {}s and {}s", pairs[0], pairs[1])
            }
            Combination::ThreeOfAKind { rank, .. } => write!(f, "three {rank}s"),
            Combination::Straight { high } => write!(f, "straight to {high}"),
            Combination::Flush { ranks } => write!(f, "flush, {} high", ranks[0]),
            Combination::FullHouse { trips, pair } => {
                write!(f, "full house, {trips}s over {pair}s")
            }
            Combination::FourOfAKind { rank, .. } => write!(f, "four {rank}s"),
            Combination::StraightFlush { high } => write!(f, "straight flush to {high}"),
        }
    }
}
