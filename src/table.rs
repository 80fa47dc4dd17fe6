//! Table and seating: an ordered seat list, dealer rotation, and the round
//! lifecycle around it.
//!
//! A table owns its players and at most one live round. Seat mutations are
//! refused while a round runs, so the round's ledger stays index-aligned
//! with the table seats and `settle_round` can copy credits straight back.

use std::time::Duration;

use crate::deck::GameMode;
use crate::round::{ActionError, Round};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TableError {
    #[error("table is full ({max_seats} seats)")]
    TableFull { max_seats: usize },
    #[error("seat {seat} out of range for {seats} seats")]
    SeatOutOfRange { seat: usize, seats: usize },
    #[error("need at least two funded players, have {have}")]
    NotEnoughPlayers { have: usize },
    #[error("a round is in progress")]
    RoundInProgress,
    #[error("no round to settle")]
    NoRound,
    #[error(transparent)]
    Round(#[from] ActionError),
}

/// A seated player: display name and chip count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub credit: u64,
}

impl Player {
    pub fn new(name: impl Into<String>, credit: u64) -> Self {
        Self { name: name.into(), credit }
    }
}

/// Static table parameters. The turn timeout is enforced by the serving
/// layer, which calls [`Round::auto_act`] when it expires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    pub max_seats: usize,
    pub big_blind: u64,
    pub mode: GameMode,
    pub turn_timeout: Option<Duration>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self { max_seats: 9, big_blind: 10, mode: GameMode::Standard, turn_timeout: None }
    }
}

/// One poker table: seats in play order (seat 0 is the small blind) and the
/// round currently running on it, if any.
#[derive(Debug)]
pub struct Table {
    config: TableConfig,
    seats: Vec<Player>,
    round: Option<Round>,
}

impl Table {
    pub fn new(config: TableConfig) -> Self {
        Self { config, seats: Vec::new(), round: None }
    }

    /// Returns the table configuration
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Returns the seated players in play order
    pub fn seats(&self) -> &[Player] {
        &self.seats
    }

    /// Returns the per-turn timeout, if one is configured
    pub fn turn_timeout(&self) -> Option<Duration> {
        self.config.turn_timeout
    }

    /// Returns the live round, if one is running
    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    /// Returns the live round mutably, if one is running
    pub fn round_mut(&mut self) -> Option<&mut Round> {
        self.round.as_mut()
    }

    /// Seat a player at the end of the table.
    pub fn add_player(&mut self, player: Player) -> Result<(), TableError> {
        if self.round.is_some() {
            return Err(TableError::RoundInProgress);
        }
        if self.seats.len() >= self.config.max_seats {
            return Err(TableError::TableFull { max_seats: self.config.max_seats });
        }
        self.seats.push(player);
        Ok(())
    }

    /// Remove and return the player at `seat`.
    pub fn remove_player(&mut self, seat: usize) -> Result<Player, TableError> {
        if self.round.is_some() {
            return Err(TableError::RoundInProgress);
        }
        if seat >= self.seats.len() {
            return Err(TableError::SeatOutOfRange { seat, seats: self.seats.len() });
        }
        Ok(self.seats.remove(seat))
    }

    /// Pass the blinds on: seat 0 moves to the end of the table.
    pub fn rotate_dealer(&mut self) -> Result<(), TableError> {
        if self.round.is_some() {
            return Err(TableError::RoundInProgress);
        }
        if !self.seats.is_empty() {
            self.seats.rotate_left(1);
        }
        Ok(())
    }

    /// Start a round over the seated players.
    ///
    /// Players who cannot cover the big blind are evicted first and
    /// returned to the caller; the eviction stands even when too few
    /// players remain to play.
    pub fn start_round(&mut self) -> Result<Vec<Player>, TableError> {
        if self.round.is_some() {
            return Err(TableError::RoundInProgress);
        }
        let mut evicted = Vec::new();
        let mut kept = Vec::with_capacity(self.seats.len());
        for player in self.seats.drain(..) {
            if player.credit < self.config.big_blind {
                log::debug!("evicting {} with {} chips", player.name, player.credit);
                evicted.push(player);
            } else {
                kept.push(player);
            }
        }
        self.seats = kept;

        if self.seats.len() < 2 {
            return Err(TableError::NotEnoughPlayers { have: self.seats.len() });
        }
        let entries =
            self.seats.iter().map(|p| (p.name.clone(), p.credit)).collect();
        self.round = Some(Round::new(entries, self.config.big_blind, self.config.mode)?);
        Ok(evicted)
    }

    /// Copy the settled credits back into the seats and clear the round.
    ///
    /// Valid only once the round's pot has been distributed.
    pub fn settle_round(&mut self) -> Result<(), TableError> {
        let round = self.round.as_ref().ok_or(TableError::NoRound)?;
        if !round.finished {
            return Err(TableError::RoundInProgress);
        }
        for (player, seat) in self.seats.iter_mut().zip(round.seats()) {
            player.credit = seat.credit();
        }
        self.round = None;
        Ok(())
    }
}
