//! Linear undo/redo over full-board snapshots.
//
//! `History` keeps three things:
//!   - `past`: snapshots of earlier confirmed states, most recent last
//!   - `current`: the snapshot of the last confirmed state
//!   - `future`: states undone since then, available to redo
//!
//! Recording a new confirmed state clears `future`; there is no branching.

use tracing::debug;

use crate::board::{Board, NUM_CONTAINERS};
use crate::card::Card;
use crate::error::MoveError;

/// 64-bit FNV-1a parameters.
const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01B3;

/// Mix a single byte into an FNV-1a hash.
#[inline]
fn fnv1a_mix_byte(mut h: u64, byte: u8) -> u64 {
    h ^= byte as u64;
    h = h.wrapping_mul(FNV_PRIME);
    h
}

/// Immutable copy of every container's cards, indexed by board slot.
///
/// A snapshot owns its cards; later board mutation cannot reach it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Snapshot {
    piles: [Vec<Card>; NUM_CONTAINERS],
}

impl Snapshot {
    /// Capture the live state of `board`.
    pub fn capture(board: &Board) -> Self {
        let containers = board.containers();
        Snapshot {
            piles: core::array::from_fn(|slot| containers[slot].cards().to_vec()),
        }
    }

    /// Cards of the container at `slot`, bottom to top.
    pub fn pile(&self, slot: usize) -> &[Card] {
        &self.piles[slot]
    }

    /// Overwrite `board` with this snapshot's contents.
    pub fn restore_into(&self, board: &mut Board) {
        for (container, pile) in board.containers_mut().iter_mut().zip(self.piles.iter()) {
            container.load(pile.clone());
        }
    }

    /// 64-bit FNV-1a hash of the snapshot.
    ///
    /// Each pile contributes its length and then its cards, so moving a
    /// card between piles changes the hash even when the flattened card
    /// order would not. Used to tag history entries in logs.
    pub fn fingerprint(&self) -> u64 {
        let mut h = FNV_OFFSET_BASIS;
        for pile in &self.piles {
            h = fnv1a_mix_byte(h, 0xC0);
            h = fnv1a_mix_byte(h, pile.len() as u8);
            for card in pile {
                h = fnv1a_mix_byte(h, card.index());
            }
        }
        h
    }
}

/// Past / current / future stacks of board snapshots.
#[derive(Clone, Debug, Default)]
pub struct History {
    past: Vec<Snapshot>,
    current: Option<Snapshot>,
    future: Vec<Snapshot>,
}

impl History {
    pub fn new() -> Self {
        History::default()
    }

    /// Record `board` as the new confirmed state.
    ///
    /// The previous current state moves to `past`; any redo states are
    /// discarded.
    pub fn record(&mut self, board: &Board) {
        if let Some(previous) = self.current.take() {
            self.past.push(previous);
        }
        let snapshot = Snapshot::capture(board);
        debug!(
            fingerprint = snapshot.fingerprint(),
            past = self.past.len(),
            dropped_future = self.future.len(),
            "saving state to history"
        );
        self.current = Some(snapshot);
        self.future.clear();
    }

    /// Step back one confirmed state and load it into `board`.
    pub fn undo(&mut self, board: &mut Board) -> Result<(), MoveError> {
        let state = self.past.pop().ok_or(MoveError::NoHistory)?;
        if let Some(current) = self.current.take() {
            self.future.push(current);
        }
        self.load(state, board);
        Ok(())
    }

    /// Step forward one undone state and load it into `board`.
    pub fn redo(&mut self, board: &mut Board) -> Result<(), MoveError> {
        let state = self.future.pop().ok_or(MoveError::NoHistory)?;
        if let Some(current) = self.current.take() {
            self.past.push(current);
        }
        self.load(state, board);
        Ok(())
    }

    fn load(&mut self, state: Snapshot, board: &mut Board) {
        state.restore_into(board);
        debug!(
            past = self.past.len(),
            future = self.future.len(),
            "load historical state"
        );
        self.current = Some(state);
    }

    pub fn current(&self) -> Option<&Snapshot> {
        self.current.as_ref()
    }

    pub fn past_len(&self) -> usize {
        self.past.len()
    }

    pub fn future_len(&self) -> usize {
        self.future.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }
}
