//! Error types for the engine.
//!
//! None of these are fatal. `MoveError` values are recovered locally and
//! surface from `GameSession::dispatch` only as a "nothing changed" flag;
//! `DealError` reports bad deck input before a game starts.

use thiserror::Error;

use crate::card::Card;
use crate::container::ContainerKind;

/// Why a move, query, or history step did not happen.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MoveError {
    /// A card or run violates the destination's placement rule.
    #[error("{card} cannot be placed on this {kind:?} container")]
    IllegalPlacement { card: Card, kind: ContainerKind },

    /// A query or transfer needed a card but the container holds none.
    #[error("container is empty")]
    EmptyContainer,

    /// Undo or redo was requested with nothing to step to.
    #[error("no history in that direction")]
    NoHistory,

    /// A hit-test found no container under the given position.
    #[error("no container at position ({x}, {y})")]
    NoContainerAtPosition { x: f32, y: f32 },

    /// Source and destination of a transfer are the same container.
    #[error("source and destination are the same container")]
    SameContainer,
}

/// Problems with a deck given to start a game.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DealError {
    #[error("deck must have {expected} cards, got {got}")]
    WrongLength { expected: usize, got: usize },

    #[error("duplicate card {0} in deck")]
    DuplicateCard(Card),

    #[error("card index {0} out of range 0..=51")]
    CardIndexOutOfRange(u32),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("invalid deal seed: {0}")]
    InvalidSeed(String),
}
