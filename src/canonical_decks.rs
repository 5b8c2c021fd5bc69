//! Canonical fixed 52-card deals used in tests and the `--demo` mode.
//!
//! Goals:
//!   * A "promotion ladder" deal that is won by a single foundation move,
//!     because auto-promotion cascades through every remaining card.
//!   * A "jammed" deal with no direct move at all after the deal: the only
//!     legal moves park a card in a reserve.
//!
//! Both are constructed from the round-robin dealing model (card `i` lands
//! in column `i % 8`, row `i / 8`) and need no solver to verify.

use crate::board::NUM_COLUMNS;
use crate::card::{is_one_lower_opposite_color, standard_deck, Card, Rank, Suit, DECK_LEN};

/// Deck in rank-descending order, suits cycling in `Suit::ALL` order.
///
/// Dealt round-robin, column `c` receives a single suit (`Suit::ALL[c % 4]`)
/// in ranks stepping down by two: columns 1-4 end K, J, 9, 7, 5, 3, A and
/// columns 5-8 end Q, T, 8, 6, 4, 2. Every column top is therefore the next
/// card its foundation needs once the aces are up.
pub fn promotion_ladder_deck() -> [Card; DECK_LEN] {
    core::array::from_fn(|i| {
        let rank = Rank::from_u8(12 - (i / 4) as u8);
        let suit = Suit::ALL[i % 4];
        Card::new(suit, rank)
    })
}

/// Deck indices of the top card of each column after the deal.
///
/// The first four columns receive 7 cards, the rest 6, so the tops are
/// deck positions 48..=51 for columns 1-4 and 44..=47 for columns 5-8.
pub fn column_top_indices() -> [usize; NUM_COLUMNS] {
    core::array::from_fn(|c| if c < 4 { 48 + c } else { 40 + c })
}

/// Deck with no direct move after the deal.
///
/// The eight column tops are all black and odd (3, 5, 7, 9 of spades and
/// clubs): no ace for a foundation, and no two tops of opposite color to
/// stack. Everything else follows `standard_deck()` order.
pub fn jammed_deck() -> [Card; DECK_LEN] {
    use Rank::*;
    use Suit::*;

    const FORCED_TOPS: [(Suit, Rank); NUM_COLUMNS] = [
        (Spades, Three),
        (Spades, Five),
        (Spades, Seven),
        (Spades, Nine),
        (Clubs, Three),
        (Clubs, Five),
        (Clubs, Seven),
        (Clubs, Nine),
    ];
    let top_indices = column_top_indices();
    let forced: Vec<Card> = FORCED_TOPS.iter().map(|&(s, r)| Card::new(s, r)).collect();

    let mut deck = standard_deck();
    for (&idx, &card) in top_indices.iter().zip(forced.iter()) {
        deck[idx] = card;
    }

    // Fill the remaining positions with the unforced cards in order.
    let mut rest = standard_deck().into_iter().filter(|c| !forced.contains(c));
    for (i, slot) in deck.iter_mut().enumerate() {
        if top_indices.contains(&i) {
            continue;
        }
        if let Some(card) = rest.next() {
            *slot = card;
        }
    }
    deck
}

/// True if, right after dealing `deck`, some column top can go to a
/// foundation (an ace) or onto another column top.
pub fn has_direct_move(deck: &[Card; DECK_LEN]) -> bool {
    let tops: Vec<Card> = column_top_indices().iter().map(|&i| deck[i]).collect();
    if tops.iter().any(|c| c.rank() == Rank::Ace) {
        return true;
    }
    tops.iter()
        .any(|&upper| tops.iter().any(|&lower| is_one_lower_opposite_color(upper, lower)))
}
