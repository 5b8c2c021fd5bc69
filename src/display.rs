//! Human-readable rendering of a game in progress.
//!
//! Renders a `BoardView` as multi-line text using the compact `Card`
//! representation. The top line holds the four reserves and the four
//! foundations, followed by the eight tableau columns top-justified.
//!
//! Markers:
//!   * `*` after a container label: the container is selected
//!   * `^` before a card: that card is being peeked at

use crate::board::ContainerId;
use crate::card::Card;
use crate::container::ContainerKind;
use crate::session::{BoardView, PileView};

/// Format one card cell, three characters wide, with the peek marker.
fn format_cell(card: Card, peeked: bool) -> String {
    let marker = if peeked { '^' } else { ' ' };
    format!("{}{:>2}", marker, card.short_str())
}

/// Render one reserve or foundation slot, showing only its top card.
///   - Empty: `[  ]`
///   - Non-empty: e.g. `[AH]`, `[^7C]` when peeked
fn render_slot(pile: &PileView<'_>) -> String {
    let mut s = String::new();
    s.push('[');
    match pile.cards.last() {
        None => s.push_str("  "),
        Some(&top) => {
            if pile.peek.is_some() {
                s.push('^');
            }
            s.push_str(&top.short_str());
        }
    }
    s.push(']');
    if pile.selected {
        s.push('*');
    }
    s
}

/// Render the reserve and foundation row on a single line.
pub fn render_cells(view: &BoardView<'_>) -> String {
    let mut s = String::new();
    s.push_str("Reserves: ");
    for id in ContainerId::all_of(ContainerKind::Reserve) {
        s.push_str(&render_slot(view.pile(id)));
        s.push(' ');
    }
    s.push_str("   Foundations: ");
    for id in ContainerId::all_of(ContainerKind::Foundation) {
        s.push_str(&render_slot(view.pile(id)));
        s.push(' ');
    }
    s.trim_end().to_string()
}

/// Render all tableau columns as a multi-line string.
///
/// The columns are **top-justified**: the bottom cards of all columns share
/// the first row and the playable card of each column is its lowest row.
pub fn render_columns(view: &BoardView<'_>) -> String {
    let mut s = String::new();

    s.push_str("      ");
    for (col_idx, id) in ContainerId::all_of(ContainerKind::Tableau).enumerate() {
        let mark = if view.pile(id).selected { '*' } else { ' ' };
        s.push_str(&format!(" C{}{}", col_idx + 1, mark));
    }
    s.push('\n');

    let columns: Vec<&PileView<'_>> = ContainerId::all_of(ContainerKind::Tableau)
        .map(|id| view.pile(id))
        .collect();
    let max_height = columns.iter().map(|p| p.cards.len()).max().unwrap_or(0);

    for row in 0..max_height {
        s.push_str("      ");
        for pile in &columns {
            match pile.cards.get(row) {
                None => s.push_str("    "),
                Some(&card) => {
                    s.push_str(&format_cell(card, pile.peek == Some(row)));
                    s.push(' ');
                }
            }
        }
        s.push('\n');
    }

    s
}

/// Render the whole board plus a status line.
pub fn render_board(view: &BoardView<'_>) -> String {
    let mut s = String::new();
    s.push_str(&render_cells(view));
    s.push('\n');
    s.push('\n');
    s.push_str(&render_columns(view));
    s.push_str(&format!("Score: {}/52", view.score));
    if view.won {
        s.push_str("  Congrats !");
    }
    s
}

/// Print a board to stdout using `render_board`.
pub fn print_board(view: &BoardView<'_>) {
    println!("{}", render_board(view));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::shuffled_deck_from_seed;
    use crate::layout::Point;
    use crate::session::{Event, GameSession};
    use crate::board::NUM_COLUMNS;

    /// Parse the body of `render_columns` back into per-cell strings, with
    /// peek markers stripped.
    fn parse_rendered_column_grid(rendered: &str) -> Vec<Vec<String>> {
        let base_offset = 6;
        rendered
            .lines()
            .skip(1)
            .map(|line| {
                (0..NUM_COLUMNS)
                    .map(|col| {
                        let start = base_offset + 4 * col;
                        let end = (start + 4).min(line.len());
                        line.get(start..end)
                            .unwrap_or("")
                            .trim()
                            .trim_start_matches('^')
                            .to_string()
                    })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn columns_match_the_board() {
        let s = GameSession::initialize(&shuffled_deck_from_seed(123456789)).unwrap();
        let view = s.snapshot_for_render();
        let grid = parse_rendered_column_grid(&render_columns(&view));
        assert_eq!(grid.len(), 7);

        for (col, id) in ContainerId::all_of(ContainerKind::Tableau).enumerate() {
            let cards = s.board().container(id).cards();
            for (row, line) in grid.iter().enumerate() {
                let expected = cards.get(row).map(|c| c.short_str()).unwrap_or_default();
                assert_eq!(line[col], expected, "row {row} col {col}");
            }
        }
    }

    #[test]
    fn markers_show_selection_and_peek() {
        let mut s = GameSession::initialize(&shuffled_deck_from_seed(5)).unwrap();
        let t3 = ContainerId::tableau(2).unwrap();
        s.dispatch(Event::PrimarySelect(Some(t3)));
        s.dispatch(Event::SecondaryPeek(ContainerId::tableau(0).unwrap(), Point::new(5.0, 1.0)));

        let view = s.snapshot_for_render();
        let text = render_columns(&view);
        let header = text.lines().next().unwrap();
        assert!(header.contains(" C3*"));
        assert!(!header.contains(" C1*"));

        let first_row = text.lines().nth(1).unwrap();
        let bottom = s.board().container(ContainerId::tableau(0).unwrap()).cards()[0];
        assert!(first_row.contains(&format!("^{:>2}", bottom.short_str())));
    }

    #[test]
    fn cells_show_empty_slots_and_score() {
        let s = GameSession::initialize(&shuffled_deck_from_seed(9)).unwrap();
        let view = s.snapshot_for_render();
        let line = render_cells(&view);
        assert_eq!(line.matches("[  ]").count(), 8);

        let board = render_board(&view);
        assert!(board.ends_with("Score: 0/52"));
        assert!(!board.contains("Congrats"));
    }

    #[test]
    fn won_board_says_congrats() {
        let mut s = GameSession::initialize(&crate::canonical_decks::promotion_ladder_deck()).unwrap();
        s.dispatch(Event::PrimarySelect(ContainerId::tableau(0)));
        s.dispatch(Event::PrimarySelect(ContainerId::foundation(0)));

        let text = render_board(&s.snapshot_for_render());
        assert!(text.contains("Score: 52/52  Congrats !"));
        assert!(text.contains("[KS]"));
    }
}
