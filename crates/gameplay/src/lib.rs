//! Poker table state machine with action handling and settlement.
//!
//! This module implements the rules and mechanics of No-Limit Texas Hold'em
//! for a single table of 2–9 seats: blind posting, turn order, betting
//! legality, street progression, and pot distribution.
//!
//! ## State Representation
//!
//! - [`Game`] — One table's authoritative state: seats, board, deck, pot
//! - [`Seat`] — A player in the hand: stack, commitments, status, role
//! - [`Phase`] — The hand lifecycle from lobby through showdown
//!
//! ## Actions
//!
//! - [`Action`] — A player decision: fold, check, call, raise, or shove
//! - [`Rejection`] — Why an action was refused (state is never mutated)
//!
//! ## Resolution
//!
//! - [`Pots`] — Main and side pot layering from contribution vectors
//! - [`Transition`] — What an accepted command did, for event emission
mod action;
mod error;
mod game;
mod phase;
mod position;
mod pots;
mod seat;
mod transition;

pub use action::*;
pub use error::*;
pub use game::*;
pub use phase::*;
pub use position::*;
pub use pots::*;
pub use seat::*;
pub use transition::*;
