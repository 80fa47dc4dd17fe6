//! holdem-engine: Texas Hold'em round engine
//!
//! Goals:
//! - Correct hand ranking for 5-to-7+ card sets, ties and kickers included
//! - A full per-round state machine: blinds, four betting streets, all-in
//!   side pots, pot settlement
//! - No panics for invalid input; use `Result` for recoverable errors
//!
//! ## Quick start: rank a hand
//! ```
//! use holdem_engine::cards::parse_cards;
//! use holdem_engine::evaluator::{eval, Category};
//!
//! let cards = parse_cards("Kh Ks Kd Qc Qh").unwrap();
//! let combo = eval(&cards).unwrap();
//! assert_eq!(combo.category(), Category::FullHouse);
//! ```
//!
//! ## Quick start: play a round
//! ```
//! use holdem_engine::deck::GameMode;
//! use holdem_engine::round::{Action, Round};
//!
//! let seats = vec![("alice".to_string(), 500), ("bob".to_string(), 500)];
//! let mut round = Round::new(seats, 10, GameMode::Standard).unwrap();
//! round.preflop_seeded(7).unwrap();
//! // Heads-up: seat 0 posted the small blind and acts first.
//! round.act(0, Action::Call { raise: 0 }).unwrap();
//! round.act(1, Action::Check).unwrap();
//! round.flop().unwrap();
//! assert_eq!(round.board().len(), 3);
//! ```

pub mod cards;
pub mod deck;
pub mod evaluator;
pub mod hand;
pub mod payout;
pub mod round;
pub mod snapshot;
pub mod table;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
