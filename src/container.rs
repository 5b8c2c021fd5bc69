//! Card containers and their placement rules.
//!
//! A `Container` is an ordered stack of cards, bottom to top. Which card
//! may go on top is decided by the container's `ContainerKind`:
//!
//!   - `Foundation`: Ace on empty, then the next rank of the same suit.
//!   - `Reserve`: anything, but only while empty (a free cell).
//!   - `Tableau`: anything on empty, then one rank lower, opposite color.
//!
//! After dealing, cards only enter a container through `put` / `put_run`,
//! so every adjacent pair always satisfies the kind's rule.

use crate::card::{is_next_of_same_suit, is_one_lower_opposite_color, Card, Rank};
use crate::error::MoveError;

/// The closed set of container variants.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ContainerKind {
    Foundation,
    Reserve,
    Tableau,
}

impl ContainerKind {
    /// Placement predicate: may `card` be placed on a container of this
    /// kind whose current top is `top` (`None` when empty)?
    pub fn accepts(self, top: Option<Card>, card: Card) -> bool {
        match (self, top) {
            (ContainerKind::Foundation, None) => card.rank() == Rank::Ace,
            (ContainerKind::Foundation, Some(top)) => is_next_of_same_suit(card, top),
            (ContainerKind::Reserve, None) => true,
            (ContainerKind::Reserve, Some(_)) => false,
            (ContainerKind::Tableau, None) => true,
            (ContainerKind::Tableau, Some(top)) => is_one_lower_opposite_color(card, top),
        }
    }

    /// Single-character tag used in pile names ("r1", "f3", "t8").
    pub fn short_char(self) -> char {
        match self {
            ContainerKind::Foundation => 'f',
            ContainerKind::Reserve => 'r',
            ContainerKind::Tableau => 't',
        }
    }
}

/// An ordered stack of cards governed by a placement rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Container {
    kind: ContainerKind,
    cards: Vec<Card>,
}

impl Container {
    pub fn new(kind: ContainerKind) -> Self {
        Container {
            kind,
            cards: Vec::new(),
        }
    }

    #[inline]
    pub fn kind(&self) -> ContainerKind {
        self.kind
    }

    /// All cards, bottom to top.
    #[inline]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The top card, without removing it.
    pub fn topmost(&self) -> Result<Card, MoveError> {
        self.cards.last().copied().ok_or(MoveError::EmptyContainer)
    }

    /// Put a single card on top if the placement rule allows it.
    ///
    /// On failure the container is unchanged.
    pub fn put(&mut self, card: Card) -> Result<(), MoveError> {
        if self.kind.accepts(self.cards.last().copied(), card) {
            self.cards.push(card);
            Ok(())
        } else {
            Err(MoveError::IllegalPlacement {
                card,
                kind: self.kind,
            })
        }
    }

    /// Put a whole run (bottom to top), all or nothing.
    ///
    /// If any card is rejected the container is restored to exactly its
    /// state before the call and the rejection is returned.
    pub fn put_run(&mut self, run: &[Card]) -> Result<(), MoveError> {
        // `put` only ever appends, so the frozen state is fully described
        // by the length before the run.
        let frozen_len = self.cards.len();
        for &card in run {
            if let Err(e) = self.put(card) {
                self.cards.truncate(frozen_len);
                return Err(e);
            }
        }
        Ok(())
    }

    /// The last `n` cards (bottom to top) without removing them.
    ///
    /// `n` larger than the container yields every card.
    pub fn peek_suffix(&self, n: usize) -> &[Card] {
        let start = self.cards.len().saturating_sub(n);
        &self.cards[start..]
    }

    /// Remove and return the last `n` cards as a run (bottom to top).
    pub fn take_suffix(&mut self, n: usize) -> Vec<Card> {
        let start = self.cards.len().saturating_sub(n);
        self.cards.split_off(start)
    }

    /// Length of the trailing run: the longest suffix whose adjacent pairs
    /// all satisfy this container's placement rule as a non-empty stack.
    ///
    /// Always 1 for a non-empty reserve, 0 for an empty container.
    pub fn trailing_run_len(&self) -> usize {
        if self.cards.is_empty() {
            return 0;
        }
        let mut len = 1;
        for pair in self.cards.windows(2).rev() {
            if !self.kind.accepts(Some(pair[0]), pair[1]) {
                break;
            }
            len += 1;
        }
        len
    }

    /// Setup path used while dealing: appends without checking the rule.
    pub(crate) fn deal(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Replace the whole content, used when restoring a history snapshot.
    pub(crate) fn load(&mut self, cards: Vec<Card>) {
        self.cards = cards;
    }
}
