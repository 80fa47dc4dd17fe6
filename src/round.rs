//! The per-round state machine: blinds, four betting streets, action
//! validation, showdown ranking and pot settlement.
//!
//! A round owns its deck, board and seat ledger exclusively. Credits are
//! never touched while betting runs; stakes accrue in the ledger and settle
//! exactly once when the pot is distributed. Every rejected action leaves
//! the round untouched: validation always precedes mutation.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::deck::{Deck, DeckError, GameMode};
use crate::evaluator::{eval_holdem, Combination, EvalError};
use crate::hand::{Board, HoleCards};
use crate::payout;

/// One betting phase of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
}

impl Street {
    pub const fn label(self) -> &'static str {
        match self {
            Street::Preflop => "preflop",
            Street::Flop => "flop",
            Street::Turn => "turn",
            Street::River => "river",
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Where a seat stands inside the current round.
///
/// `Inactive` exists only between construction and the deal. A `Folded` or
/// `AllIn` seat never re-enters the acting rotation; `Matched` seats return
/// to `ToAct` when a raise reopens the street.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeatStatus {
    Inactive,
    ToAct,
    Matched,
    Folded,
    AllIn,
}

/// A player action, dispatched through [`Round::act`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Decline to bet; only valid with nothing left to call.
    Check,
    /// Match the street maximum, optionally raising by `raise` on top.
    Call { raise: u64 },
    /// Commit the entire remaining bankroll.
    AllIn,
    /// Leave the round for good.
    Fold,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ActionParseError {
    #[error("unknown action: '{0}'")]
    UnknownAction(String),
    #[error("bad amount in action: '{0}'")]
    BadAmount(String),
}

impl FromStr for Action {
    type Err = ActionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let mut words = lower.split_whitespace();
        let action = match (words.next(), words.next()) {
            (Some("check"), None) => Action::Check,
            (Some("call"), None) => Action::Call { raise: 0 },
            (Some("call"), Some(amount)) => {
                let raise =
                    amount.parse().map_err(|_| ActionParseError::BadAmount(s.to_string()))?;
                Action::Call { raise }
            }
            (Some("all-in"), None) | (Some("allin"), None) | (Some("all"), Some("in")) => {
                Action::AllIn
            }
            (Some("fold"), None) => Action::Fold,
            _ => return Err(ActionParseError::UnknownAction(s.to_string())),
        };
        if words.next().is_some() {
            return Err(ActionParseError::UnknownAction(s.to_string()));
        }
        Ok(action)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ActionError {
    #[error("a round needs at least two seats, got {have}")]
    NotEnoughSeats { have: usize },
    #[error("seat {seat} out of range for {seats} seats")]
    SeatOutOfRange { seat: usize, seats: usize },
    #[error("the round has already been dealt")]
    AlreadyDealt,
    #[error("the round has not been dealt yet")]
    NotStarted,
    #[error("the round is over")]
    RoundOver,
    #[error("seat {seat} acted out of turn (seat {current} to act)")]
    NotYourTurn { seat: usize, current: usize },
    #[error("cannot check facing a bet: {to_call} to call")]
    CannotCheck { to_call: u64 },
    #[error("calling the {bet} bet would consume the {credit} bankroll; go all-in instead")]
    MustAllIn { bet: u64, credit: u64 },
    #[error("raising by {raise} over the {bet} bet exceeds the {credit} bankroll")]
    RaiseTooLarge { raise: u64, bet: u64, credit: u64 },
    #[error("seat {seat} has already folded")]
    AlreadyFolded { seat: usize },
    #[error("the current street still has seats to act")]
    StreetUnfinished,
    #[error("cannot advance from {from} to {to}")]
    InvalidTransition { from: Street, to: Street },
    #[error("board incomplete: {have} of 5 cards revealed")]
    BoardIncomplete { have: usize },
    #[error("no seat remains in contention")]
    NoContenders,
    #[error("every seat has folded")]
    AllFolded,
    #[error("no seat owes an action")]
    NothingToAct,
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

/// What one history entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum RecordVerb {
    SmallBlind,
    BigBlind,
    Check,
    Call,
    Raise,
    AllIn,
    Fold,
    Win,
    Refund,
}

/// One entry in the round's action log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct ActionRecord {
    pub seat: usize,
    pub verb: RecordVerb,
    pub amount: Option<u64>,
    pub street: Street,
}

/// Per-seat ledger entry for one round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatState {
    pub(crate) name: String,
    pub(crate) credit: u64,
    pub(crate) stake: u64,
    pub(crate) status: SeatStatus,
    pub(crate) hole: Option<HoleCards>,
    pub(crate) folded_at: Option<Street>,
}

impl SeatState {
    /// Returns the seat's player name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the seat's bankroll as of round start (settled at payout)
    pub fn credit(&self) -> u64 {
        self.credit
    }

    /// Returns the chips staked so far this round
    pub fn stake(&self) -> u64 {
        self.stake
    }

    /// Returns the seat's status
    pub fn status(&self) -> SeatStatus {
        self.status
    }

    /// Returns the seat's hole cards, if dealt
    pub fn hole(&self) -> Option<HoleCards> {
        self.hole
    }

    /// Returns the street at which the seat folded, if it did
    pub fn folded_at(&self) -> Option<Street> {
        self.folded_at
    }
}

/// One Texas Hold'em round over a fixed set of seats.
#[derive(Debug, Clone)]
pub struct Round {
    pub(crate) big_blind: u64,
    pub(crate) mode: GameMode,
    pub(crate) deck: Deck,
    pub(crate) board: Board,
    pub(crate) seats: Vec<SeatState>,
    pub(crate) pot: u64,
    pub(crate) street: Street,
    pub(crate) current: usize,
    pub(crate) dealt: bool,
    pub(crate) finished: bool,
    pub(crate) history: Vec<ActionRecord>,
}

impl Round {
    /// Build a round over `(name, credit)` seats in table order. Seat 0
    /// posts the small blind, seat 1 the big blind.
    pub fn new(
        seats: Vec<(String, u64)>,
        big_blind: u64,
        mode: GameMode,
    ) -> Result<Self, ActionError> {
        if seats.len() < 2 {
            return Err(ActionError::NotEnoughSeats { have: seats.len() });
        }
        let seats = seats
            .into_iter()
            .map(|(name, credit)| SeatState {
                name,
                credit,
                stake: 0,
                status: SeatStatus::Inactive,
                hole: None,
                folded_at: None,
            })
            .collect();
        Ok(Self {
            big_blind,
            mode,
            deck: Deck::for_mode(mode),
            board: Board::new(),
            seats,
            pot: 0,
            street: Street::Preflop,
            current: 0,
            dealt: false,
            finished: false,
            history: Vec::new(),
        })
    }

    /// Returns the big blind amount
    pub fn big_blind(&self) -> u64 {
        self.big_blind
    }

    /// Returns the game mode the round's deck was built for
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Returns a reference to the board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the seat ledger in table order
    pub fn seats(&self) -> &[SeatState] {
        &self.seats
    }

    /// Returns one seat's ledger entry
    pub fn seat(&self, seat: usize) -> Option<&SeatState> {
        self.seats.get(seat)
    }

    /// Returns the current pot size (the sum of all stakes)
    pub fn pot(&self) -> u64 {
        self.pot
    }

    /// Returns the current street
    pub fn street(&self) -> Street {
        self.street
    }

    /// Returns the acting seat index
    pub fn current(&self) -> usize {
        self.current
    }

    /// Returns whether hole cards have been dealt
    pub fn dealt(&self) -> bool {
        self.dealt
    }

    /// Returns the highest stake committed this round
    pub fn max_stake(&self) -> u64 {
        self.seats.iter().map(|s| s.stake).max().unwrap_or(0)
    }

    /// Chips `seat` must add to match the street maximum.
    pub fn to_call(&self, seat: usize) -> u64 {
        match self.seats.get(seat) {
            Some(s) => self.max_stake().saturating_sub(s.stake),
            None => 0,
        }
    }

    /// Seats still in contention for the pot (not folded), in table order.
    pub fn contenders(&self) -> Vec<usize> {
        self.seats
            .iter()
            .enumerate()
            .filter(|(_, s)| s.status != SeatStatus::Folded && s.status != SeatStatus::Inactive)
            .map(|(i, _)| i)
            .collect()
    }

    /// The last `n` action log entries, oldest first.
    pub fn recent_actions(&self, n: usize) -> &[ActionRecord] {
        let start = self.history.len().saturating_sub(n);
        &self.history[start..]
    }

    /// The full action log for the round.
    pub fn history(&self) -> &[ActionRecord] {
        &self.history
    }

    /// Shuffle, deal two hole cards per seat and post the blinds.
    pub fn preflop(&mut self) -> Result<(), ActionError> {
        let seed: u64 = rand::rng().random();
        self.preflop_seeded(seed)
    }

    /// [`Round::preflop`] with a fixed shuffle seed. Same seed, same deal.
    pub fn preflop_seeded(&mut self, seed: u64) -> Result<(), ActionError> {
        if self.dealt {
            return Err(ActionError::AlreadyDealt);
        }
        self.deck.shuffle_seeded(seed);
        self.deal_and_post()
    }

    fn deal_and_post(&mut self) -> Result<(), ActionError> {
        let n = self.seats.len();
        let hands = self.deck.deal(n)?;
        for (seat, hand) in self.seats.iter_mut().zip(hands) {
            seat.hole = Some(hand);
            seat.status = SeatStatus::ToAct;
        }
        let small_blind = self.big_blind / 2;
        let big_blind = self.big_blind;
        self.post_blind(0, small_blind, RecordVerb::SmallBlind);
        self.post_blind(1, big_blind, RecordVerb::BigBlind);
        self.current = 2 % n;
        self.dealt = true;
        log::debug!(
            "preflop: dealt {n} seats, blinds {small_blind}/{big_blind}, seat {} to act",
            self.current
        );
        Ok(())
    }

    /// A blind is forced: a seat too short for it goes all-in for less.
    fn post_blind(&mut self, seat: usize, amount: u64, verb: RecordVerb) {
        let posted = {
            let s = &mut self.seats[seat];
            let posted = s.credit.min(amount);
            s.stake += posted;
            if s.stake == s.credit {
                s.status = SeatStatus::AllIn;
            }
            posted
        };
        self.pot += posted;
        self.record(seat, verb, Some(posted));
    }

    /// Burn once, reveal the flop, reopen the street.
    pub fn flop(&mut self) -> Result<(), ActionError> {
        self.advance(Street::Preflop, Street::Flop, 3)
    }

    /// Burn once, reveal the turn card, reopen the street.
    pub fn turn(&mut self) -> Result<(), ActionError> {
        self.advance(Street::Flop, Street::Turn, 1)
    }

    /// Burn once, reveal the river card, reopen the street.
    pub fn river(&mut self) -> Result<(), ActionError> {
        self.advance(Street::Turn, Street::River, 1)
    }

    fn advance(&mut self, from: Street, to: Street, reveal: usize) -> Result<(), ActionError> {
        if self.finished {
            return Err(ActionError::RoundOver);
        }
        if !self.dealt {
            return Err(ActionError::NotStarted);
        }
        if self.street != from {
            return Err(ActionError::InvalidTransition { from: self.street, to });
        }
        if !self.street_settled() {
            return Err(ActionError::StreetUnfinished);
        }
        self.deck.burn();
        for _ in 0..reveal {
            self.deck.reveal(&mut self.board)?;
        }
        self.street = to;
        for seat in &mut self.seats {
            if seat.status == SeatStatus::Matched {
                seat.status = SeatStatus::ToAct;
            }
        }
        // First seat after the blinds opens the street.
        if let Ok(next) = self.next_actor(1) {
            self.current = next;
        }
        log::debug!(
            "{to}: board {:?}, pot {}, seat {} to act",
            self.board.as_slice(),
            self.pot,
            self.current
        );
        Ok(())
    }

    /// Next seat still owing an action, scanning clockwise from `from`.
    ///
    /// Folded and all-in seats are skipped for the rest of the round.
    /// Fails with [`ActionError::AllFolded`] when every seat has folded
    /// (unreachable in driven play: fold-to-one ends the round first) and
    /// [`ActionError::NothingToAct`] when the street is settled.
    pub fn next_actor(&self, from: usize) -> Result<usize, ActionError> {
        if self.seats.iter().all(|s| s.status == SeatStatus::Folded) {
            return Err(ActionError::AllFolded);
        }
        let n = self.seats.len();
        let mut i = (from + 1) % n;
        for _ in 0..n {
            if self.seats[i].status == SeatStatus::ToAct {
                return Ok(i);
            }
            i = (i + 1) % n;
        }
        Err(ActionError::NothingToAct)
    }

    /// Validate and apply one player action, then advance the acting seat.
    ///
    /// Returns the total debited from the seat's stack (zero for checks and
    /// folds). A rejected action mutates nothing.
    pub fn act(&mut self, seat: usize, action: Action) -> Result<u64, ActionError> {
        let n = self.seats.len();
        if seat >= n {
            return Err(ActionError::SeatOutOfRange { seat, seats: n });
        }
        if self.finished {
            return Err(ActionError::RoundOver);
        }
        if !self.dealt {
            return Err(ActionError::NotStarted);
        }
        if self.contenders().len() <= 1 {
            return Err(ActionError::RoundOver);
        }
        if self.seats[seat].status == SeatStatus::Folded {
            return Err(ActionError::AlreadyFolded { seat });
        }
        if self.current != seat || self.seats[seat].status != SeatStatus::ToAct {
            return Err(ActionError::NotYourTurn { seat, current: self.current });
        }

        let debited = match action {
            Action::Check => self.apply_check(seat)?,
            Action::Call { raise } => self.apply_call(seat, raise)?,
            Action::AllIn => self.apply_all_in(seat),
            Action::Fold => self.apply_fold(seat),
        };

        if let Ok(next) = self.next_actor(seat) {
            self.current = next;
        }
        Ok(debited)
    }

    /// Timeout fallback for an unresponsive seat: check when nothing is
    /// owed, fold otherwise. Returns the action taken.
    pub fn auto_act(&mut self, seat: usize) -> Result<Action, ActionError> {
        let action = if self.to_call(seat) == 0 { Action::Check } else { Action::Fold };
        self.act(seat, action)?;
        log::debug!("seat {seat} timed out, auto {action:?}");
        Ok(action)
    }

    fn apply_check(&mut self, seat: usize) -> Result<u64, ActionError> {
        let to_call = self.to_call(seat);
        if to_call > 0 {
            return Err(ActionError::CannotCheck { to_call });
        }
        self.seats[seat].status = SeatStatus::Matched;
        self.record(seat, RecordVerb::Check, None);
        Ok(0)
    }

    fn apply_call(&mut self, seat: usize, raise: u64) -> Result<u64, ActionError> {
        let bet = self.max_stake();
        let credit = self.seats[seat].credit;
        if bet >= credit {
            return Err(ActionError::MustAllIn { bet, credit });
        }
        if raise > 0 && raise + bet >= credit {
            return Err(ActionError::RaiseTooLarge { raise, bet, credit });
        }
        let to_call = bet - self.seats[seat].stake;
        let debited = to_call + raise;
        self.seats[seat].stake += debited;
        self.pot += debited;
        self.seats[seat].status = SeatStatus::Matched;
        if raise > 0 {
            // The bet went up: everyone already matched must respond again.
            self.reopen_street(seat);
            self.record(seat, RecordVerb::Raise, Some(debited));
        } else {
            self.record(seat, RecordVerb::Call, Some(debited));
        }
        Ok(debited)
    }

    fn apply_all_in(&mut self, seat: usize) -> u64 {
        let prior_bet = self.max_stake();
        let debited = {
            let s = &mut self.seats[seat];
            let debited = s.credit - s.stake;
            s.stake = s.credit;
            s.status = SeatStatus::AllIn;
            debited
        };
        self.pot += debited;
        // An all-in past the street maximum is a raise and reopens betting.
        if self.seats[seat].stake > prior_bet {
            self.reopen_street(seat);
        }
        self.record(seat, RecordVerb::AllIn, Some(debited));
        debited
    }

    fn apply_fold(&mut self, seat: usize) -> u64 {
        self.seats[seat].folded_at = Some(self.street);
        self.seats[seat].status = SeatStatus::Folded;
        self.record(seat, RecordVerb::Fold, None);
        if self.contenders().len() <= 1 {
            log::debug!("seat {seat} folded, round down to one contender");
        }
        0
    }

    fn reopen_street(&mut self, raiser: usize) {
        for (i, seat) in self.seats.iter_mut().enumerate() {
            if i != raiser && seat.status == SeatStatus::Matched {
                seat.status = SeatStatus::ToAct;
            }
        }
    }

    /// True once every non-folded seat is matched or all-in. Pure query.
    pub fn street_settled(&self) -> bool {
        self.dealt
            && self.seats.iter().all(|s| {
                matches!(s.status, SeatStatus::Matched | SeatStatus::AllIn | SeatStatus::Folded)
            })
    }

    /// True once at most one contender remains or the pot was distributed.
    pub fn is_over(&self) -> bool {
        self.finished || (self.dealt && self.contenders().len() <= 1)
    }

    /// Best combination `seat` holds against the completed board.
    pub fn best_hand(&self, seat: usize) -> Result<Combination, ActionError> {
        if self.board.len() < Board::MAX {
            return Err(ActionError::BoardIncomplete { have: self.board.len() });
        }
        let state = self
            .seats
            .get(seat)
            .ok_or(ActionError::SeatOutOfRange { seat, seats: self.seats.len() })?;
        let hole = state.hole.ok_or(ActionError::NotStarted)?;
        Ok(eval_holdem(&hole, &self.board)?)
    }

    /// Rank the contenders at showdown, best first, equal hands grouped
    /// into one tier (stable: ties keep seat order).
    pub fn showdown_ranking(&self) -> Result<Vec<Vec<usize>>, ActionError> {
        if self.board.len() < Board::MAX {
            return Err(ActionError::BoardIncomplete { have: self.board.len() });
        }
        let contenders = self.contenders();
        if contenders.is_empty() {
            return Err(ActionError::NoContenders);
        }
        let mut scored = Vec::with_capacity(contenders.len());
        for seat in contenders {
            scored.push((seat, self.best_hand(seat)?.score()));
        }
        Ok(payout::rank_tiers(&scored))
    }

    /// Split the pot and settle every seat's credit, exactly once.
    ///
    /// A lone contender takes the whole pot with no board requirement.
    /// Otherwise the river betting must be settled; the contenders are
    /// ranked and the side-pot recovery in [`crate::payout`] runs tier by
    /// tier. Returns the seats with a nonzero gain, refunds included.
    pub fn distribute_pot(&mut self) -> Result<Vec<(usize, u64)>, ActionError> {
        if self.finished {
            return Err(ActionError::RoundOver);
        }
        if !self.dealt {
            return Err(ActionError::NotStarted);
        }
        let contenders = self.contenders();
        if contenders.is_empty() {
            return Err(ActionError::NoContenders);
        }

        let stakes: Vec<u64> = self.seats.iter().map(|s| s.stake).collect();
        let gains = if contenders.len() == 1 {
            let mut gains = vec![0u64; self.seats.len()];
            gains[contenders[0]] = self.pot;
            gains
        } else {
            if !self.street_settled() {
                return Err(ActionError::StreetUnfinished);
            }
            let tiers = self.showdown_ranking()?;
            payout::distribute(&stakes, &tiers)
        };
        debug_assert_eq!(gains.iter().sum::<u64>(), self.pot);

        for (i, seat) in self.seats.iter_mut().enumerate() {
            seat.credit = seat.credit - stakes[i] + gains[i];
        }
        self.finished = true;

        let mut payouts = Vec::new();
        for (seat, &gain) in gains.iter().enumerate() {
            if gain > 0 {
                let verb = if self.seats[seat].status == SeatStatus::Folded {
                    RecordVerb::Refund
                } else {
                    RecordVerb::Win
                };
                self.record(seat, verb, Some(gain));
                payouts.push((seat, gain));
            }
        }
        log::debug!("pot {} distributed: {payouts:?}", self.pot);
        Ok(payouts)
    }

    fn record(&mut self, seat: usize, verb: RecordVerb, amount: Option<u64>) {
        self.history.push(ActionRecord { seat, verb, amount, street: self.street });
    }
}
