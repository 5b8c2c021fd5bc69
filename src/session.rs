//! Interaction controller: one game, driven by discrete input events.
//!
//! A `GameSession` owns the `Board`, its `History`, and the transient
//! interaction state (the current selection and any peek overlays). The
//! presentation layer feeds it `Event`s through `dispatch` and redraws
//! whenever `dispatch` reports a change, reading everything it needs from
//! `snapshot_for_render`.
//!
//! Selection is an explicit two-state machine:
//!
//! ```text
//! Idle --select non-empty X--> Focused(X)
//! Focused(F) --select F--> Idle                      (deselect)
//! Focused(F) --select X != F--> Idle                 (attempt F -> X)
//! Focused(F) --select nothing--> Idle
//! ```
//!
//! A successful player move is a *confirmed move*: auto-promotion to the
//! foundations runs, then the resulting board is recorded as one history
//! entry.

use tracing::{debug, info};

use crate::board::{Board, ContainerId, NUM_CONTAINERS};
use crate::card::{Card, DECK_LEN};
use crate::error::{DealError, MoveError};
use crate::history::History;
use crate::layout::{Layout, Point};

/// Session settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionConfig {
    /// Geometry used to resolve peek offsets and pointer positions.
    pub layout: Layout,
    /// Push tableau cards to the foundations after every confirmed move.
    pub auto_promote: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            layout: Layout::default(),
            auto_promote: true,
        }
    }
}

/// Semantic input events.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    /// Primary click on a container, or on nothing (`None`).
    PrimarySelect(Option<ContainerId>),
    /// Secondary press on a container at an offset from its origin.
    SecondaryPeek(ContainerId, Point),
    /// Secondary button released: every peek overlay goes away.
    SecondaryRelease,
    Undo,
    Redo,
}

/// Selection state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Idle,
    Focused(ContainerId),
}

/// Read-only view of one container for drawing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PileView<'a> {
    pub id: ContainerId,
    /// Cards bottom to top.
    pub cards: &'a [Card],
    pub selected: bool,
    /// Index of the card being peeked at, if any.
    pub peek: Option<usize>,
}

/// Read-only view of the whole session for drawing.
#[derive(Clone, Debug, PartialEq)]
pub struct BoardView<'a> {
    /// One entry per container, in board order.
    pub piles: Vec<PileView<'a>>,
    pub score: usize,
    pub won: bool,
}

impl<'a> BoardView<'a> {
    pub fn pile(&self, id: ContainerId) -> &PileView<'a> {
        &self.piles[id.slot()]
    }
}

/// Check that `deck` is a full deck of 52 distinct cards.
fn validate_deck(deck: &[Card]) -> Result<[Card; DECK_LEN], DealError> {
    let cards: [Card; DECK_LEN] = deck.try_into().map_err(|_| DealError::WrongLength {
        expected: DECK_LEN,
        got: deck.len(),
    })?;
    let mut seen = [false; DECK_LEN];
    for card in cards {
        let idx = card.index() as usize;
        if seen[idx] {
            return Err(DealError::DuplicateCard(card));
        }
        seen[idx] = true;
    }
    Ok(cards)
}

/// One game in progress.
#[derive(Clone, Debug)]
pub struct GameSession {
    board: Board,
    history: History,
    selection: Selection,
    peeks: [Option<usize>; NUM_CONTAINERS],
    config: SessionConfig,
}

impl GameSession {
    /// Deal `deck` round-robin into the tableau and record the deal as the
    /// first history entry.
    pub fn new(deck: &[Card], config: SessionConfig) -> Result<Self, DealError> {
        let deck = validate_deck(deck)?;
        let board = Board::deal(&deck);
        let mut history = History::new();
        history.record(&board);
        info!(first = %deck[0], "new game dealt");
        Ok(GameSession {
            board,
            history,
            selection: Selection::Idle,
            peeks: [None; NUM_CONTAINERS],
            config,
        })
    }

    /// `new` with the default configuration.
    pub fn initialize(deck: &[Card]) -> Result<Self, DealError> {
        GameSession::new(deck, SessionConfig::default())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn score(&self) -> usize {
        self.board.score()
    }

    pub fn is_won(&self) -> bool {
        self.board.is_won()
    }

    /// Process one event to completion. Returns true when anything a
    /// renderer shows has changed.
    pub fn dispatch(&mut self, event: Event) -> bool {
        debug!(?event, selection = ?self.selection, "dispatch");
        match event {
            Event::PrimarySelect(target) => self.primary_select(target),
            Event::SecondaryPeek(id, offset) => self.peek(id, offset).is_ok(),
            Event::SecondaryRelease => self.release_peeks(),
            Event::Undo => self.step_history(History::undo),
            Event::Redo => self.step_history(History::redo),
        }
    }

    /// Primary click at a board position, resolved with the layout.
    pub fn click_at(&mut self, position: Point) -> bool {
        let target = self.config.layout.hit_test(&self.board, position).ok();
        self.dispatch(Event::PrimarySelect(target.map(|(id, _)| id)))
    }

    /// Secondary press at a board position, resolved with the layout.
    pub fn peek_at(&mut self, position: Point) -> bool {
        match self.config.layout.hit_test(&self.board, position) {
            Ok((id, offset)) => self.dispatch(Event::SecondaryPeek(id, offset)),
            Err(e) => {
                debug!(%e, "peek missed");
                false
            }
        }
    }

    fn primary_select(&mut self, target: Option<ContainerId>) -> bool {
        match (self.selection, target) {
            (Selection::Idle, None) => false,
            (Selection::Idle, Some(x)) => {
                if self.board.container(x).is_empty() {
                    return false;
                }
                self.selection = Selection::Focused(x);
                true
            }
            (Selection::Focused(_), None) => {
                self.selection = Selection::Idle;
                true
            }
            (Selection::Focused(f), Some(x)) if f == x => {
                self.selection = Selection::Idle;
                true
            }
            (Selection::Focused(f), Some(x)) => {
                self.selection = Selection::Idle;
                match self.confirmed_move(f, x) {
                    Ok(moved) => info!(from = %f, to = %x, moved, score = self.score(), "move"),
                    Err(e) => debug!(from = %f, to = %x, %e, "move refused"),
                }
                // The selection marker went away either way.
                true
            }
        }
    }

    /// Transfer from `source` to `destination`, auto-promote, and record the
    /// result as one history entry. Nothing is recorded on failure.
    fn confirmed_move(
        &mut self,
        source: ContainerId,
        destination: ContainerId,
    ) -> Result<usize, MoveError> {
        let moved = self.board.transfer(source, destination)?;
        if self.config.auto_promote {
            self.board.promote_to_foundations();
        }
        self.history.record(&self.board);
        if self.board.is_won() {
            info!("Congrats !");
        }
        Ok(moved)
    }

    /// Mark the card under `offset` in container `id` as peeked at.
    fn peek(&mut self, id: ContainerId, offset: Point) -> Result<usize, MoveError> {
        let layout = &self.config.layout;
        let container = self.board.container(id);
        let (kind, len) = (container.kind(), container.len());
        if !layout.contains(kind, len, offset) {
            return Err(MoveError::NoContainerAtPosition {
                x: offset.x,
                y: offset.y,
            });
        }
        let index = layout
            .index_at(kind, len, offset)
            .ok_or(MoveError::EmptyContainer)?;
        debug!(container = %id, index, "peeking");
        self.peeks[id.slot()] = Some(index);
        Ok(index)
    }

    fn release_peeks(&mut self) -> bool {
        let any = self.peeks.iter().any(Option::is_some);
        self.peeks = [None; NUM_CONTAINERS];
        any
    }

    fn step_history(
        &mut self,
        step: fn(&mut History, &mut Board) -> Result<(), MoveError>,
    ) -> bool {
        match step(&mut self.history, &mut self.board) {
            Ok(()) => {
                // The restored board may not have a card where the marker was.
                self.selection = Selection::Idle;
                self.peeks = [None; NUM_CONTAINERS];
                true
            }
            Err(e) => {
                debug!(%e, "failed history step");
                false
            }
        }
    }

    /// Everything a renderer needs: cards per container plus selection and
    /// peek markers.
    pub fn snapshot_for_render(&self) -> BoardView<'_> {
        let piles = ContainerId::all()
            .map(|id| {
                let cards = self.board.container(id).cards();
                PileView {
                    id,
                    cards,
                    selected: self.selection == Selection::Focused(id),
                    peek: self.peeks[id.slot()].filter(|&i| i < cards.len()),
                }
            })
            .collect();
        BoardView {
            piles,
            score: self.score(),
            won: self.is_won(),
        }
    }
}
