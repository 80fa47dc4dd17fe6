use crate::cards::{Card, Rank, Suit};

/// Pre-computed view of an unordered card set, built once per evaluation and
/// shared by every category detector.
///
/// Works over any slice size: 5 for a completed hand, 6-7 at showdown, or a
/// smaller set when a single presence test is asked about fewer cards. In a
/// double-deck game a rank count may exceed four.
#[derive(Debug, Clone)]
pub(crate) struct HandAnalysis {
    /// Every card rank, descending, duplicates kept.
    ranks_desc: Vec<Rank>,
    /// Count per rank value, indexed 2..=14.
    counts: [u8; 15],
    /// Ranks held per suit, descending, duplicates kept.
    suit_ranks: [Vec<Rank>; 4],
}

fn rank_of(value: u8) -> Rank {
    Rank::ALL[(value - 2) as usize]
}

/// Highest straight high-card formable from the given rank presence flags,
/// the wheel included (Ace counts below Two when the run needs it).
fn best_run(present: &[bool; 15]) -> Option<Rank> {
    for high in (5..=14u8).rev() {
        let complete = (high - 4..=high).all(|v| {
            let idx = if v == 1 { 14 } else { v as usize };
            present[idx]
        });
        if complete {
            return Some(rank_of(high));
        }
    }
    None
}

impl HandAnalysis {
    pub(crate) fn new(cards: &[Card]) -> Self {
        let mut ranks_desc: Vec<Rank> = cards.iter().map(|c| c.rank()).collect();
        ranks_desc.sort_by(|a, b| b.cmp(a));

        let mut counts = [0u8; 15];
        for rank in &ranks_desc {
            counts[rank.value() as usize] += 1;
        }

        let mut suit_ranks: [Vec<Rank>; 4] = Default::default();
        for card in cards {
            suit_ranks[card.suit().index()].push(card.rank());
        }
        for ranks in &mut suit_ranks {
            ranks.sort_by(|a, b| b.cmp(a));
        }

        Self { ranks_desc, counts, suit_ranks }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.ranks_desc.is_empty()
    }

    /// Highest rank held at least `n` times.
    pub(crate) fn best_group(&self, n: u8) -> Option<Rank> {
        (2..=14u8).rev().find(|&v| self.counts[v as usize] >= n).map(rank_of)
    }

    /// Highest rank other than `excluded` held at least `n` times.
    pub(crate) fn best_group_except(&self, n: u8, excluded: Rank) -> Option<Rank> {
        (2..=14u8)
            .rev()
            .filter(|&v| v != excluded.value())
            .find(|&v| self.counts[v as usize] >= n)
            .map(rank_of)
    }

    /// Ranks held at least twice, descending. A rank held three or four
    /// times still qualifies as a pair source.
    pub(crate) fn paired_ranks(&self) -> Vec<Rank> {
        (2..=14u8).rev().filter(|&v| self.counts[v as usize] >= 2).map(rank_of).collect()
    }

    /// The `take` highest remaining ranks after removing `copies` cards of
    /// each rank in `used`, descending, duplicates kept.
    pub(crate) fn kickers(&self, used: &[(Rank, u8)], take: usize) -> Vec<Rank> {
        let mut counts = self.counts;
        for &(rank, copies) in used {
            counts[rank.value() as usize] -= copies;
        }
        let mut out = Vec::with_capacity(take);
        for v in (2..=14u8).rev() {
            let mut left = counts[v as usize];
            while left > 0 && out.len() < take {
                out.push(rank_of(v));
                left -= 1;
            }
        }
        out
    }

    /// Highest card, then the next `take` as kickers.
    pub(crate) fn top_ranks(&self, take: usize) -> Vec<Rank> {
        self.ranks_desc.iter().copied().take(take).collect()
    }

    /// High card of the best straight across all suits, if any.
    pub(crate) fn straight_high(&self) -> Option<Rank> {
        let mut present = [false; 15];
        for v in 2..=14usize {
            present[v] = self.counts[v] > 0;
        }
        best_run(&present)
    }

    /// The suit holding five or more cards whose top five ranks are best,
    /// with those five ranks descending.
    pub(crate) fn flush_ranks(&self) -> Option<(Suit, [Rank; 5])> {
        let mut best: Option<(Suit, [Rank; 5])> = None;
        for suit in Suit::ALL {
            let ranks = &self.suit_ranks[suit.index()];
            if ranks.len() < 5 {
                continue;
            }
            let top = [ranks[0], ranks[1], ranks[2], ranks[3], ranks[4]];
            if best.as_ref().map_or(true, |(_, b)| top > *b) {
                best = Some((suit, top));
            }
        }
        best
    }

    /// High card of the best straight confined to a single suit, if any.
    pub(crate) fn suited_straight_high(&self) -> Option<Rank> {
        let mut best: Option<Rank> = None;
        for suit in Suit::ALL {
            let ranks = &self.suit_ranks[suit.index()];
            if ranks.len() < 5 {
                continue;
            }
            let mut present = [false; 15];
            for rank in ranks {
                present[rank.value() as usize] = true;
            }
            if let Some(high) = best_run(&present) {
                if best.map_or(true, |b| high > b) {
                    best = Some(high);
                }
            }
        }
        best
    }
}
