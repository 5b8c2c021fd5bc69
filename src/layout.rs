//! Board geometry: where each container sits and which card is under a point.
//!
//! Positions are in pixels with the origin at the top-left of the board.
//! Containers sit on a grid measured in card units: row 0 holds the four
//! reserves then the four foundations, row 1 the eight tableau columns.
//! Tableau columns are drawn spread downwards so every card shows a strip;
//! the other kinds show only their top card.
//!
//! Nothing here draws. The presentation layer uses `hit_test` to turn a
//! pointer position into a container and a relative offset, and the
//! session uses `index_at` to find the card a peek refers to.

use crate::board::{Board, ContainerId, NUM_COLUMNS};
use crate::container::ContainerKind;
use crate::error::MoveError;

/// A position in pixels, absolute or relative to a container origin.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }
}

/// Card metrics and spacing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    /// Card width in pixels.
    pub card_width: f32,
    /// Card height in pixels.
    pub card_height: f32,
    /// Gap between grid cells, in card units.
    pub margin: f32,
    /// Maximum height of a spread tableau column, in card heights.
    pub tableau_spread: f32,
}

impl Default for Layout {
    fn default() -> Self {
        Layout {
            card_width: 75.0,
            card_height: 120.0,
            margin: 0.08,
            tableau_spread: 2.5,
        }
    }
}

impl Layout {
    /// Grid position of a container, in card units.
    fn grid_origin(&self, id: ContainerId) -> (f32, f32) {
        let k = id.slot();
        let m = self.margin;
        (
            m + (1.0 + m) * (k % NUM_COLUMNS) as f32,
            m + (1.0 + m) * (k / NUM_COLUMNS) as f32,
        )
    }

    /// Top-left corner of a container, in pixels.
    pub fn origin(&self, id: ContainerId) -> Point {
        let (gx, gy) = self.grid_origin(id);
        Point::new(gx * self.card_width, gy * self.card_height)
    }

    /// Vertical distance between consecutive cards of a container holding
    /// `len` cards. Zero for containers that are not spread.
    pub fn step_height(&self, kind: ContainerKind, len: usize) -> f32 {
        if kind != ContainerKind::Tableau || len == 0 {
            return 0.0;
        }
        let h = self.card_height;
        (h / 6.0).min((self.tableau_spread - 1.0) * h / len as f32)
    }

    /// Width and height covered by a container holding `len` cards.
    pub fn extent(&self, kind: ContainerKind, len: usize) -> (f32, f32) {
        let step = self.step_height(kind, len);
        let below_top = len.saturating_sub(1) as f32 * step;
        (self.card_width, below_top + self.card_height)
    }

    /// Offset of card `index` from the container origin.
    pub fn card_offset(&self, kind: ContainerKind, len: usize, index: usize) -> Point {
        Point::new(0.0, index as f32 * self.step_height(kind, len))
    }

    /// Is `offset` (relative to the container origin) inside its extent?
    pub fn contains(&self, kind: ContainerKind, len: usize, offset: Point) -> bool {
        let (w, h) = self.extent(kind, len);
        offset.x >= 0.0 && offset.y >= 0.0 && offset.x < w && offset.y < h
    }

    /// Index of the card shown under `offset`, or `None` for an empty
    /// container. The top card also owns everything below the spread.
    pub fn index_at(&self, kind: ContainerKind, len: usize, offset: Point) -> Option<usize> {
        let last = len.checked_sub(1)?;
        let step = self.step_height(kind, len);
        if step <= 0.0 {
            return Some(last);
        }
        let row = (offset.y.max(0.0) / step) as usize;
        Some(row.min(last))
    }

    /// Map a board position to the container drawn there and the position
    /// relative to that container's origin.
    ///
    /// The candidate is the nearest container origin (Manhattan distance in
    /// card units) lying above and to the left of `position`; it only
    /// counts if `position` falls inside that container's extent.
    pub fn hit_test(&self, board: &Board, position: Point) -> Result<(ContainerId, Point), MoveError> {
        let miss = MoveError::NoContainerAtPosition {
            x: position.x,
            y: position.y,
        };
        let (px, py) = (position.x / self.card_width, position.y / self.card_height);

        let nearest = ContainerId::all()
            .filter_map(|id| {
                let (gx, gy) = self.grid_origin(id);
                (gx <= px && gy <= py).then(|| (id, (px - gx).abs() + (py - gy).abs()))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id);

        let id = nearest.ok_or_else(|| miss.clone())?;
        let origin = self.origin(id);
        let offset = Point::new(position.x - origin.x, position.y - origin.y);
        let container = board.container(id);
        if self.contains(container.kind(), container.len(), offset) {
            Ok((id, offset))
        } else {
            Err(miss)
        }
    }
}
