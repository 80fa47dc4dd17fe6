//! Round persistence: capture a live round into a serializable snapshot and
//! restore it later.
//!
//! A snapshot stores only what is visible at the table: board, per-seat
//! ledger and hole cards, pot, street, acting pointer. The reserve is not
//! stored; restore rebuilds it as the mode's full deck minus every visible
//! card. Reserve order is therefore not preserved, which leaves showdown
//! ranking and payout of the restored round identical to the original.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::deck::{Deck, GameMode};
use crate::hand::{Board, HoleCards};
use crate::round::{Round, SeatState, SeatStatus, Street};

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum SnapshotError {
    #[error("snapshot shows {card} but the {mode:?} deck has no copy left")]
    CardUnavailable { card: Card, mode: GameMode },
    #[error("snapshot serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// One seat's slice of a [`RoundSnapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatSnapshot {
    pub name: String,
    pub credit: u64,
    pub stake: u64,
    pub status: SeatStatus,
    pub hole: Option<HoleCards>,
    pub folded_at: Option<Street>,
}

/// Everything needed to rebuild a round mid-play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    pub big_blind: u64,
    pub mode: GameMode,
    pub pot: u64,
    pub street: Street,
    pub current: usize,
    pub dealt: bool,
    pub finished: bool,
    pub board: Vec<Card>,
    pub seats: Vec<SeatSnapshot>,
}

impl RoundSnapshot {
    /// Capture the visible state of a live round.
    pub fn capture(round: &Round) -> Self {
        Self {
            big_blind: round.big_blind(),
            mode: round.mode(),
            pot: round.pot(),
            street: round.street(),
            current: round.current(),
            dealt: round.dealt(),
            finished: round.finished,
            board: round.board().as_slice().to_vec(),
            seats: round
                .seats()
                .iter()
                .map(|seat| SeatSnapshot {
                    name: seat.name().to_string(),
                    credit: seat.credit(),
                    stake: seat.stake(),
                    status: seat.status(),
                    hole: seat.hole(),
                    folded_at: seat.folded_at(),
                })
                .collect(),
        }
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The mode's full deck minus every card the snapshot shows.
    ///
    /// Fails when a visible card has no copy left to remove, which flags a
    /// snapshot inconsistent with its own game mode (three copies of one
    /// card in a standard-deck round, say).
    fn rebuild_reserve(&self) -> Result<Deck, SnapshotError> {
        let mut full = Deck::for_mode(self.mode);
        let mut pool = Vec::with_capacity(full.len());
        while let Ok(card) = full.draw() {
            pool.push(card);
        }

        let mut visible: Vec<Card> = self.board.clone();
        for seat in &self.seats {
            if let Some(hole) = seat.hole {
                visible.extend_from_slice(&hole.as_array());
            }
        }
        for card in visible {
            match pool.iter().position(|&c| c == card) {
                Some(at) => {
                    pool.remove(at);
                }
                None => return Err(SnapshotError::CardUnavailable { card, mode: self.mode }),
            }
        }
        Ok(Deck::from_cards(pool))
    }
}

impl Round {
    /// Capture this round as a [`RoundSnapshot`].
    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot::capture(self)
    }

    /// Rebuild a round from a snapshot.
    ///
    /// The rebuilt reserve holds the right card population in arbitrary
    /// order, so a restored round ranks and pays out exactly like the
    /// original; only future reveals may differ.
    pub fn restore(snapshot: &RoundSnapshot) -> Result<Self, SnapshotError> {
        let deck = snapshot.rebuild_reserve()?;
        let seats = snapshot
            .seats
            .iter()
            .map(|seat| SeatState {
                name: seat.name.clone(),
                credit: seat.credit,
                stake: seat.stake,
                status: seat.status,
                hole: seat.hole,
                folded_at: seat.folded_at,
            })
            .collect();
        Ok(Self {
            big_blind: snapshot.big_blind,
            mode: snapshot.mode,
            deck,
            board: Board::from_cards(snapshot.board.clone()),
            seats,
            pot: snapshot.pot,
            street: snapshot.street,
            current: snapshot.current,
            dealt: snapshot.dealt,
            finished: snapshot.finished,
            history: Vec::new(),
        })
    }
}
