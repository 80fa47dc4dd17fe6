use super::analysis::HandAnalysis;
use super::combination::{Category, Combination};
use crate::cards::Rank;

/// One hand category: a presence test plus a best-instance constructor.
///
/// `is_present` works on any card set of at least `min_cards`; `best` may
/// only be called when `is_present` holds and the source set carries the
/// five cards a full combination needs (enforced in the module entry
/// points, not re-checked here).
pub(crate) trait CategoryDetector {
    fn category(&self) -> Category;
    /// Smallest card set the presence test is meaningful on.
    fn min_cards(&self) -> usize;
    fn is_present(&self, analysis: &HandAnalysis) -> bool;
    fn best(&self, analysis: &HandAnalysis) -> Combination;
}

pub(crate) struct StraightFlushDetector;

impl CategoryDetector for StraightFlushDetector {
    fn category(&self) -> Category {
        Category::StraightFlush
    }
    fn min_cards(&self) -> usize {
        5
    }
    fn is_present(&self, analysis: &HandAnalysis) -> bool {
        analysis.suited_straight_high().is_some()
    }
    fn best(&self, analysis: &HandAnalysis) -> Combination {
        let high = analysis.suited_straight_high().unwrap_or(Rank::Five);
        Combination::StraightFlush { high }
    }
}

pub(crate) struct FourOfAKindDetector;

impl CategoryDetector for FourOfAKindDetector {
    fn category(&self) -> Category {
        Category::FourOfAKind
    }
    fn min_cards(&self) -> usize {
        4
    }
    fn is_present(&self, analysis: &HandAnalysis) -> bool {
        analysis.best_group(4).is_some()
    }
    fn best(&self, analysis: &HandAnalysis) -> Combination {
        let rank = analysis.best_group(4).unwrap_or(Rank::Two);
        let kicker = analysis.kickers(&[(rank, 4)], 1)[0];
        Combination::FourOfAKind { rank, kicker }
    }
}

pub(crate) struct FullHouseDetector;

impl CategoryDetector for FullHouseDetector {
    fn category(&self) -> Category {
        Category::FullHouse
    }
    fn min_cards(&self) -> usize {
        5
    }
    fn is_present(&self, analysis: &HandAnalysis) -> bool {
        match analysis.best_group(3) {
            Some(trips) => analysis.best_group_except(2, trips).is_some(),
            None => false,
        }
    }
    fn best(&self, analysis: &HandAnalysis) -> Combination {
        let trips = analysis.best_group(3).unwrap_or(Rank::Two);
        let pair = analysis.best_group_except(2, trips).unwrap_or(Rank::Two);
        Combination::FullHouse { trips, pair }
    }
}

pub(crate) struct FlushDetector;

impl CategoryDetector for FlushDetector {
    fn category(&self) -> Category {
        Category::Flush
    }
    fn min_cards(&self) -> usize {
        5
    }
    fn is_present(&self, analysis: &HandAnalysis) -> bool {
        analysis.flush_ranks().is_some()
    }
    fn best(&self, analysis: &HandAnalysis) -> Combination {
        let ranks = match analysis.flush_ranks() {
            Some((_, ranks)) => ranks,
            None => [Rank::Two; 5],
        };
        Combination::Flush { ranks }
    }
}

pub(crate) struct StraightDetector;

impl CategoryDetector for StraightDetector {
    fn category(&self) -> Category {
        Category::Straight
    }
    fn min_cards(&self) -> usize {
        5
    }
    fn is_present(&self, analysis: &HandAnalysis) -> bool {
        analysis.straight_high().is_some()
    }
    fn best(&self, analysis: &HandAnalysis) -> Combination {
        let high = analysis.straight_high().unwrap_or(Rank::Five);
        Combination::Straight { high }
    }
}

pub(crate) struct ThreeOfAKindDetector;

impl CategoryDetector for ThreeOfAKindDetector {
    fn category(&self) -> Category {
        Category::ThreeOfAKind
    }
    fn min_cards(&self) -> usize {
        3
    }
    fn is_present(&self, analysis: &HandAnalysis) -> bool {
        analysis.best_group(3).is_some()
    }
    fn best(&self, analysis: &HandAnalysis) -> Combination {
        let rank = analysis.best_group(3).unwrap_or(Rank::Two);
        let ks = analysis.kickers(&[(rank, 3)], 2);
        Combination::ThreeOfAKind { rank, kickers: [ks[0], ks[1]] }
    }
}

pub(crate) struct TwoPairDetector;

impl CategoryDetector for TwoPairDetector {
    fn category(&self) -> Category {
        Category::TwoPair
    }
    fn min_cards(&self) -> usize {
        4
    }
    fn is_present(&self, analysis: &HandAnalysis) -> bool {
        analysis.paired_ranks().len() >= 2
    }
    fn best(&self, analysis: &HandAnalysis) -> Combination {
        let paired = analysis.paired_ranks();
        let pairs = [paired[0], paired[1]];
        // The kicker may itself belong to a third pair when six or seven
        // cards are in play.
        let kicker = analysis.kickers(&[(pairs[0], 2), (pairs[1], 2)], 1)[0];
        Combination::TwoPair { pairs, kicker }
    }
}

pub(crate) struct PairDetector;

impl CategoryDetector for PairDetector {
    fn category(&self) -> Category {
        Category::Pair
    }
    fn min_cards(&self) -> usize {
        2
    }
    fn is_present(&self, analysis: &HandAnalysis) -> bool {
        analysis.best_group(2).is_some()
    }
    fn best(&self, analysis: &HandAnalysis) -> Combination {
        let rank = analysis.best_group(2).unwrap_or(Rank::Two);
        let ks = analysis.kickers(&[(rank, 2)], 2);
        Combination::Pair { rank, kickers: [ks[0], ks[1]] }
    }
}

pub(crate) struct HighCardDetector;

impl CategoryDetector for HighCardDetector {
    fn category(&self) -> Category {
        Category::HighCard
    }
    fn min_cards(&self) -> usize {
        1
    }
    fn is_present(&self, analysis: &HandAnalysis) -> bool {
        !analysis.is_empty()
    }
    fn best(&self, analysis: &HandAnalysis) -> Combination {
        let top = analysis.top_ranks(5);
        Combination::HighCard { high: top[0], kickers: [top[1], top[2], top[3], top[4]] }
    }
}

/// Detectors strongest-first: evaluation takes the first present category.
pub(crate) const DETECTORS: [&dyn CategoryDetector; 9] = [
    &StraightFlushDetector,
    &FourOfAKindDetector,
    &FullHouseDetector,
    &FlushDetector,
    &StraightDetector,
    &ThreeOfAKindDetector,
    &TwoPairDetector,
    &PairDetector,
    &HighCardDetector,
];

pub(crate) fn detector_for(category: Category) -> &'static dyn CategoryDetector {
    match category {
        Category::StraightFlush => &StraightFlushDetector,
        Category::FourOfAKind => &FourOfAKindDetector,
        Category::FullHouse => &FullHouseDetector,
        Category::Flush => &FlushDetector,
        Category::Straight => &StraightDetector,
        Category::ThreeOfAKind => &ThreeOfAKindDetector,
        Category::TwoPair => &TwoPairDetector,
        Category::Pair => &PairDetector,
        Category::HighCard => &HighCardDetector,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn analyze(input: &str) -> HandAnalysis {
        HandAnalysis::new(&parse_cards(input).expect("valid cards"))
    }

    #[test]
    fn detectors_report_their_category() {
        for detector in DETECTORS {
            assert_eq!(detector_for(detector.category()).category(), detector.category());
        }
    }

    #[test]
    fn straight_flush_needs_suit_and_run() {
        let a = analyze("9h 8h 7h 6h 5h");
        assert!(StraightFlushDetector.is_present(&a));
        let a = analyze("9h 8s 7h 6h 5h");
        assert!(!StraightFlushDetector.is_present(&a));
        assert!(StraightDetector.is_present(&a));
    }

    #[test]
    fn full_house_picks_highest_trips_then_pair() {
        let a = analyze("2h 2s 2d Kh Ks Kd 9c");
        let best = FullHouseDetector.best(&a);
        assert_eq!(best, Combination::FullHouse { trips: Rank::King, pair: Rank::Two });
    }

    #[test]
    fn two_pair_kicker_can_come_from_a_third_pair() {
        let a = analyze("Kh Ks Qh Qs Jh Js 2c");
        let best = TwoPairDetector.best(&a);
        assert_eq!(
            best,
            Combination::TwoPair { pairs: [Rank::King, Rank::Queen], kicker: Rank::Jack }
        );
    }

    #[test]
    fn pair_presence_works_on_two_cards() {
        let a = analyze("Kh Ks");
        assert!(PairDetector.is_present(&a));
        let a = analyze("Kh Qs");
        assert!(!PairDetector.is_present(&a));
    }

    #[test]
    fn quads_keep_the_single_best_kicker() {
        let a = analyze("9h 9s 9d 9c Ah Kd 2s");
        let best = FourOfAKindDetector.best(&a);
        assert_eq!(best, Combination::FourOfAKind { rank: Rank::Nine, kicker: Rank::Ace });
    }

    #[test]
    fn trips_keep_two_kickers_descending() {
        let a = analyze("Qh Qs Qd 9c 7h 4s 2d");
        let best = ThreeOfAKindDetector.best(&a);
        assert_eq!(
            best,
            Combination::ThreeOfAKind { rank: Rank::Queen, kickers: [Rank::Nine, Rank::Seven] }
        );
    }
}
