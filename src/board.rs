//! The fixed FreeCell board: 4 reserves, 4 foundations, 8 tableau columns.
//!
//! Containers live in one flat arena indexed by `ContainerId::slot()`, in
//! the order reserves, foundations, tableau. They are created once and
//! never added or removed; only their contents change.

use core::fmt;

use tracing::debug;

use crate::card::{Card, DECK_LEN};
use crate::container::{Container, ContainerKind};
use crate::error::MoveError;
use crate::transfer::{max_run_length, receive_from};

pub const NUM_RESERVES: usize = 4;
pub const NUM_FOUNDATIONS: usize = 4;
pub const NUM_COLUMNS: usize = 8;
pub const NUM_CONTAINERS: usize = NUM_RESERVES + NUM_FOUNDATIONS + NUM_COLUMNS;

const FOUNDATION_BASE: usize = NUM_RESERVES;
const TABLEAU_BASE: usize = NUM_RESERVES + NUM_FOUNDATIONS;

/// Identifies one container on the board by kind and 0-based position
/// within its group.
///
/// The fields are private so every id names a container that exists: the
/// checked constructors return `None` past the end of a group.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ContainerId {
    kind: ContainerKind,
    index: u8,
}

/// Number of containers of one kind.
pub const fn group_len(kind: ContainerKind) -> usize {
    match kind {
        ContainerKind::Reserve => NUM_RESERVES,
        ContainerKind::Foundation => NUM_FOUNDATIONS,
        ContainerKind::Tableau => NUM_COLUMNS,
    }
}

impl ContainerId {
    /// Id of container `index` (0-based) of `kind`, if the board has one.
    pub const fn new(kind: ContainerKind, index: u8) -> Option<Self> {
        if (index as usize) < group_len(kind) {
            Some(ContainerId { kind, index })
        } else {
            None
        }
    }

    pub const fn reserve(index: u8) -> Option<Self> {
        ContainerId::new(ContainerKind::Reserve, index)
    }

    pub const fn foundation(index: u8) -> Option<Self> {
        ContainerId::new(ContainerKind::Foundation, index)
    }

    pub const fn tableau(index: u8) -> Option<Self> {
        ContainerId::new(ContainerKind::Tableau, index)
    }

    #[inline]
    pub fn kind(self) -> ContainerKind {
        self.kind
    }

    /// 0-based position within the container's group.
    #[inline]
    pub fn index(self) -> u8 {
        self.index
    }

    /// Position of this container in the board arena (and in snapshots).
    pub fn slot(self) -> usize {
        let base = match self.kind {
            ContainerKind::Reserve => 0,
            ContainerKind::Foundation => FOUNDATION_BASE,
            ContainerKind::Tableau => TABLEAU_BASE,
        };
        base + self.index as usize
    }

    /// Inverse of `slot()`.
    pub fn from_slot(slot: usize) -> Option<Self> {
        let (kind, index) = match slot {
            s if s < FOUNDATION_BASE => (ContainerKind::Reserve, s),
            s if s < TABLEAU_BASE => (ContainerKind::Foundation, s - FOUNDATION_BASE),
            s if s < NUM_CONTAINERS => (ContainerKind::Tableau, s - TABLEAU_BASE),
            _ => return None,
        };
        Some(ContainerId { kind, index: index as u8 })
    }

    /// Every container id in arena order.
    pub fn all() -> impl Iterator<Item = ContainerId> {
        (0..NUM_CONTAINERS).filter_map(ContainerId::from_slot)
    }

    /// All ids of one kind, in board order.
    pub fn all_of(kind: ContainerKind) -> impl Iterator<Item = ContainerId> {
        ContainerId::all().filter(move |id| id.kind == kind)
    }

    /// Parse a pile name such as "r1", "f4" or "t8" (1-based).
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        let mut chars = name.chars();
        let kind = match chars.next()? {
            'r' => ContainerKind::Reserve,
            'f' => ContainerKind::Foundation,
            't' => ContainerKind::Tableau,
            _ => return None,
        };
        let number: u8 = chars.as_str().parse().ok()?;
        ContainerId::new(kind, number.checked_sub(1)?)
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.short_char(), self.index + 1)
    }
}

/// The board: every container, in arena order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    containers: [Container; NUM_CONTAINERS],
}

impl Default for Board {
    fn default() -> Self {
        Board::new_empty()
    }
}

impl Board {
    /// A board with all containers empty.
    pub fn new_empty() -> Self {
        let containers = core::array::from_fn(|slot| {
            let kind = ContainerId::from_slot(slot)
                .map(|id| id.kind)
                .unwrap_or(ContainerKind::Tableau);
            Container::new(kind)
        });
        Board { containers }
    }

    /// Deal a full deck round-robin into the tableau columns: card `i` goes
    /// to column `i % 8`, so the first four columns get 7 cards and the
    /// rest 6.
    pub fn deal(deck: &[Card; DECK_LEN]) -> Self {
        let mut board = Board::new_empty();
        for (i, &card) in deck.iter().enumerate() {
            board.containers[TABLEAU_BASE + i % NUM_COLUMNS].deal(card);
        }
        board
    }

    #[inline]
    pub fn container(&self, id: ContainerId) -> &Container {
        &self.containers[id.slot()]
    }

    /// All containers in arena order.
    pub fn containers(&self) -> &[Container] {
        &self.containers
    }

    pub fn reserves(&self) -> &[Container] {
        &self.containers[..FOUNDATION_BASE]
    }

    pub fn foundations(&self) -> &[Container] {
        &self.containers[FOUNDATION_BASE..TABLEAU_BASE]
    }

    pub fn tableau(&self) -> &[Container] {
        &self.containers[TABLEAU_BASE..]
    }

    pub(crate) fn containers_mut(&mut self) -> &mut [Container] {
        &mut self.containers
    }

    /// Mutable access to two distinct containers at once.
    fn pair_mut(
        &mut self,
        a: ContainerId,
        b: ContainerId,
    ) -> Result<(&mut Container, &mut Container), MoveError> {
        let (ia, ib) = (a.slot(), b.slot());
        if ia == ib {
            return Err(MoveError::SameContainer);
        }
        if ia < ib {
            let (lo, hi) = self.containers.split_at_mut(ib);
            Ok((&mut lo[ia], &mut hi[0]))
        } else {
            let (lo, hi) = self.containers.split_at_mut(ia);
            Ok((&mut hi[0], &mut lo[ib]))
        }
    }

    /// Number of empty containers of one kind.
    pub fn count_empty(&self, kind: ContainerKind) -> usize {
        self.containers
            .iter()
            .filter(|c| c.kind() == kind && c.is_empty())
            .count()
    }

    /// Largest run a player move may relocate right now.
    pub fn max_run_length(&self) -> usize {
        max_run_length(
            self.count_empty(ContainerKind::Reserve),
            self.count_empty(ContainerKind::Tableau),
        )
    }

    /// Player move: transfer from `source` to `destination` under the
    /// current free-cell policy. Returns the number of cards moved.
    pub fn transfer(
        &mut self,
        source: ContainerId,
        destination: ContainerId,
    ) -> Result<usize, MoveError> {
        let limit = self.max_run_length();
        self.transfer_with_limit(source, destination, limit)
    }

    /// Transfer with an explicit run-length limit.
    pub fn transfer_with_limit(
        &mut self,
        source: ContainerId,
        destination: ContainerId,
        max_run_length: usize,
    ) -> Result<usize, MoveError> {
        let (dst, src) = self.pair_mut(destination, source)?;
        receive_from(dst, src, max_run_length)
    }

    /// Push single cards from the tableau onto the foundations until a full
    /// pass over every (column, foundation) pair moves nothing.
    ///
    /// Returns the number of cards promoted.
    pub fn promote_to_foundations(&mut self) -> usize {
        let mut total = 0;
        loop {
            let mut pass = 0;
            for column in ContainerId::all_of(ContainerKind::Tableau) {
                for foundation in ContainerId::all_of(ContainerKind::Foundation) {
                    if let Ok(n) = self.transfer_with_limit(column, foundation, 1) {
                        pass += n;
                    }
                }
            }
            if pass == 0 {
                break;
            }
            total += pass;
        }
        debug!(promoted = total, score = self.score(), "foundation push");
        total
    }

    /// Cards resting on the foundations.
    pub fn score(&self) -> usize {
        self.foundations().iter().map(Container::len).sum()
    }

    /// Won when every card of the deck is on a foundation.
    pub fn is_won(&self) -> bool {
        self.score() == DECK_LEN
    }

    /// Every card on the board, container by container, bottom to top.
    pub fn flatten_cards(&self) -> Vec<Card> {
        self.containers
            .iter()
            .flat_map(|c| c.cards().iter().copied())
            .collect()
    }
}
