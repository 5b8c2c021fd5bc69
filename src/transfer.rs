//! Moving runs of cards between two containers.
//!
//! `receive_from` is the only way cards change containers after the deal.
//! It tries the longest candidate run first and shortens it one card at a
//! time, so a click on a tableau column moves as much of the trailing run
//! as the destination (and the free-cell policy) allows.

use tracing::trace;

use crate::container::Container;
use crate::error::MoveError;

/// How many cards a single move may relocate, given the number of empty
/// reserves and empty tableau columns available as temporary space.
///
/// ```text
/// (1 + empty_reserves) * (1 + empty_tableaus)
/// ```
#[inline]
pub fn max_run_length(empty_reserves: usize, empty_tableaus: usize) -> usize {
    (1 + empty_reserves) * (1 + empty_tableaus)
}

/// Move the longest acceptable trailing run of `source` onto `destination`.
///
/// Candidate lengths go from `max_run_length` (capped at the source size)
/// down to 1. For each, the suffix is copied out of `source` without
/// touching it and offered to `destination.put_run`; the first length that
/// fits is then removed from `source`.
///
/// Returns the number of cards moved. On failure neither container is
/// modified: the error is the destination's last rejection, or
/// `EmptyContainer` when there was nothing to move.
pub fn receive_from(
    destination: &mut Container,
    source: &mut Container,
    max_run_length: usize,
) -> Result<usize, MoveError> {
    let longest = max_run_length.min(source.len());
    let mut last_err = MoveError::EmptyContainer;

    for k in (1..=longest).rev() {
        // `put_run` needs its own copy: `source` stays borrowed otherwise.
        let run = source.peek_suffix(k).to_vec();
        match destination.put_run(&run) {
            Ok(()) => {
                source.take_suffix(k);
                trace!(moved = k, "transfer accepted");
                return Ok(k);
            }
            Err(e) => last_err = e,
        }
    }

    Err(last_err)
}
