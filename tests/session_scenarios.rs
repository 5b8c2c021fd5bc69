//! End-to-end behaviour through the public API: placement rules, run
//! transfers, history, and the interaction state machine.

use freecell_engine::canonical_decks::{jammed_deck, promotion_ladder_deck};
use freecell_engine::card::{
    is_next_of_same_suit, is_one_lower_opposite_color, shuffled_deck_from_seed, standard_deck,
};
use freecell_engine::session::Selection;
use freecell_engine::transfer::{max_run_length, receive_from};
use freecell_engine::{
    Card, Container, ContainerId, ContainerKind, Event, GameSession, MoveError, Rank,
    SessionConfig, Suit,
};

fn c(suit: Suit, rank: Rank) -> Card {
    Card::new(suit, rank)
}

/// Build a container by legal `put`s, starting from empty.
fn built(kind: ContainerKind, cards: &[Card]) -> Container {
    let mut container = Container::new(kind);
    for &card in cards {
        container.put(card).unwrap();
    }
    container
}

fn select(s: &mut GameSession, id: ContainerId) -> bool {
    s.dispatch(Event::PrimarySelect(Some(id)))
}

fn move_cards(s: &mut GameSession, from: ContainerId, to: ContainerId) {
    select(s, from);
    select(s, to);
}

fn without_promotion(seed: u32) -> GameSession {
    let config = SessionConfig {
        auto_promote: false,
        ..SessionConfig::default()
    };
    GameSession::new(&shuffled_deck_from_seed(seed), config).unwrap()
}

// ---------------------------------------------------------------------------
// Placement rules

#[test]
fn empty_foundation_refuses_a_two() {
    for suit in Suit::ALL {
        let mut foundation = Container::new(ContainerKind::Foundation);
        let two = c(suit, Rank::Two);
        assert_eq!(
            foundation.put(two),
            Err(MoveError::IllegalPlacement {
                card: two,
                kind: ContainerKind::Foundation
            })
        );
        assert!(foundation.is_empty());
    }
}

#[test]
fn tableau_takes_one_lower_of_opposite_color() {
    let mut column = built(ContainerKind::Tableau, &[c(Suit::Clubs, Rank::Seven)]);
    assert!(column.put(c(Suit::Spades, Rank::Six)).is_err());
    assert!(column.put(c(Suit::Hearts, Rank::Six)).is_ok());
    assert_eq!(column.len(), 2);
}

#[test]
fn occupied_reserve_refuses_everything() {
    let parked = c(Suit::Diamonds, Rank::Queen);
    let mut cell = built(ContainerKind::Reserve, &[parked]);
    for index in 0..52u8 {
        assert!(cell.put(Card::from_index(index)).is_err());
    }
    assert_eq!(cell.cards(), [parked]);
}

#[test]
fn run_moves_in_one_action_with_free_space() {
    // Two empty reserves and one empty column.
    let limit = max_run_length(2, 1);
    assert_eq!(limit, 6);

    let mut source = built(
        ContainerKind::Tableau,
        &[
            c(Suit::Spades, Rank::King),
            c(Suit::Hearts, Rank::Six),
            c(Suit::Clubs, Rank::Five),
        ],
    );
    let mut destination = built(ContainerKind::Tableau, &[c(Suit::Spades, Rank::Seven)]);

    assert_eq!(receive_from(&mut destination, &mut source, limit), Ok(2));
    assert_eq!(
        destination.cards(),
        [
            c(Suit::Spades, Rank::Seven),
            c(Suit::Hearts, Rank::Six),
            c(Suit::Clubs, Rank::Five)
        ]
    );
    assert_eq!(source.cards(), [c(Suit::Spades, Rank::King)]);
}

// ---------------------------------------------------------------------------
// Container properties

#[test]
fn put_run_is_all_or_nothing() {
    for seed in 0..40u32 {
        let deck = shuffled_deck_from_seed(seed);
        for window in deck.windows(3).step_by(5) {
            let mut column = built(ContainerKind::Tableau, &[c(Suit::Clubs, Rank::Eight)]);
            let before = column.clone();
            match column.put_run(window) {
                Ok(()) => {
                    assert_eq!(column.len(), before.len() + window.len());
                    for pair in column.cards().windows(2) {
                        assert!(is_one_lower_opposite_color(pair[1], pair[0]));
                    }
                }
                Err(_) => assert_eq!(column, before),
            }
        }
    }
}

#[test]
fn longest_legal_suffix_is_preferred() {
    // K, Q, J, 10, 9 alternating: any suffix fits somewhere.
    let run = [
        c(Suit::Spades, Rank::King),
        c(Suit::Hearts, Rank::Queen),
        c(Suit::Clubs, Rank::Jack),
        c(Suit::Diamonds, Rank::Ten),
        c(Suit::Spades, Rank::Nine),
    ];
    for limit in 1..=6usize {
        let mut source = built(ContainerKind::Tableau, &run);
        let mut empty = Container::new(ContainerKind::Tableau);
        let moved = receive_from(&mut empty, &mut source, limit).unwrap();
        assert_eq!(moved, limit.min(run.len()));
        assert_eq!(empty.cards(), &run[run.len() - moved..]);
    }

    // Onto a red queen only the J-10-9 suffix fits, even with room for more.
    let mut source = built(ContainerKind::Tableau, &run);
    let mut queen = built(ContainerKind::Tableau, &[c(Suit::Diamonds, Rank::Queen)]);
    assert_eq!(receive_from(&mut queen, &mut source, 6), Ok(3));
    assert_eq!(source.len(), 2);
}

#[test]
fn foundation_only_grows_in_suit_order() {
    for seed in 0..20u32 {
        let mut foundation = Container::new(ContainerKind::Foundation);
        // Offer the whole deck repeatedly; only the next card of a suit sticks.
        for _ in 0..13 {
            for card in shuffled_deck_from_seed(seed) {
                let _ = foundation.put(card);
            }
        }
        let cards = foundation.cards();
        assert_eq!(cards.len(), 13);
        assert_eq!(cards[0].rank(), Rank::Ace);
        for pair in cards.windows(2) {
            assert!(is_next_of_same_suit(pair[1], pair[0]));
        }
    }
}

#[test]
fn reserve_never_holds_two_cards() {
    let mut cell = Container::new(ContainerKind::Reserve);
    let mut source = built(
        ContainerKind::Tableau,
        &[c(Suit::Hearts, Rank::Nine), c(Suit::Spades, Rank::Eight)],
    );
    assert_eq!(receive_from(&mut cell, &mut source, 6), Ok(1));
    assert!(receive_from(&mut cell, &mut source, 6).is_err());
    assert_eq!(cell.len(), 1);
    assert_eq!(source.len(), 1);
}

// ---------------------------------------------------------------------------
// Move-size limit through the controller

/// Standard deck with `placed` cards swapped into the given deck positions.
fn deck_with(placed: &[(usize, Card)]) -> [Card; 52] {
    let mut deck = standard_deck();
    for &(pos, card) in placed {
        let from = deck.iter().position(|&d| d == card).unwrap();
        deck.swap(pos, from);
    }
    deck
}

/// Column 1 ends in the run 6H 5S; column 2 shows 7C, column 3 shows 6D.
/// No ace is on top of any column after the deal.
fn run_session() -> GameSession {
    let deck = deck_with(&[
        (40, c(Suit::Hearts, Rank::Six)),
        (48, c(Suit::Spades, Rank::Five)),
        (49, c(Suit::Clubs, Rank::Seven)),
        (50, c(Suit::Diamonds, Rank::Six)),
    ]);
    GameSession::initialize(&deck).unwrap()
}

fn top_cards(s: &GameSession, id: ContainerId, n: usize) -> Vec<Card> {
    s.board().container(id).peek_suffix(n).to_vec()
}

#[test]
fn controller_moves_a_whole_run_when_space_allows() {
    let mut s = run_session();
    let (t1, t2) = (ContainerId::tableau(0).unwrap(), ContainerId::tableau(1).unwrap());
    // Four empty reserves, no empty column.
    assert_eq!(s.board().max_run_length(), 5);

    move_cards(&mut s, t1, t2);
    assert_eq!(
        top_cards(&s, t2, 3),
        [
            c(Suit::Clubs, Rank::Seven),
            c(Suit::Hearts, Rank::Six),
            c(Suit::Spades, Rank::Five)
        ]
    );
    assert_eq!(s.board().container(t1).len(), 5);
    assert_eq!(s.history().past_len(), 1);
}

#[test]
fn full_reserves_limit_the_controller_to_single_cards() {
    let mut s = run_session();
    let (t1, t2, t3) = (
        ContainerId::tableau(0).unwrap(),
        ContainerId::tableau(1).unwrap(),
        ContainerId::tableau(2).unwrap(),
    );
    for i in 0..4u8 {
        move_cards(&mut s, ContainerId::tableau(3 + i).unwrap(), ContainerId::reserve(i).unwrap());
    }
    assert_eq!(s.history().past_len(), 4);
    assert_eq!(s.board().max_run_length(), 1);

    // The run needs two cards of room and the lone 5S does not fit on 7C.
    let before = s.board().clone();
    move_cards(&mut s, t1, t2);
    assert_eq!(s.board(), &before);
    assert_eq!(s.history().past_len(), 4);

    // Only the top card goes where a single card fits.
    move_cards(&mut s, t1, t3);
    assert_eq!(top_cards(&s, t3, 1), [c(Suit::Spades, Rank::Five)]);
    assert_eq!(top_cards(&s, t1, 1), [c(Suit::Hearts, Rank::Six)]);

    // Back to three parked cards: one free reserve allows a run of two.
    assert!(s.dispatch(Event::Undo));
    assert!(s.dispatch(Event::Undo));
    assert_eq!(s.board().max_run_length(), 2);
    move_cards(&mut s, t1, t2);
    assert_eq!(
        top_cards(&s, t2, 2),
        [c(Suit::Hearts, Rank::Six), c(Suit::Spades, Rank::Five)]
    );
}

// ---------------------------------------------------------------------------
// History

#[test]
fn three_moves_two_undos_one_new_move() {
    let mut s = without_promotion(2024);
    for i in 0..3u8 {
        move_cards(&mut s, ContainerId::tableau(i).unwrap(), ContainerId::reserve(i).unwrap());
    }
    assert_eq!(s.history().past_len(), 3);

    assert!(s.dispatch(Event::Undo));
    assert!(s.dispatch(Event::Undo));
    assert_eq!(s.history().future_len(), 2);

    move_cards(&mut s, ContainerId::tableau(6).unwrap(), ContainerId::reserve(3).unwrap());
    assert_eq!(s.history().future_len(), 0);
    assert_eq!(s.history().past_len(), 2);
    assert!(!s.dispatch(Event::Redo));
}

#[test]
fn undo_then_redo_restores_the_same_board() {
    let mut s = without_promotion(77);
    move_cards(&mut s, ContainerId::tableau(0).unwrap(), ContainerId::reserve(0).unwrap());
    move_cards(&mut s, ContainerId::tableau(5).unwrap(), ContainerId::reserve(1).unwrap());
    let reached = s.board().clone();

    assert!(s.dispatch(Event::Undo));
    assert_ne!(s.board(), &reached);
    assert!(s.dispatch(Event::Redo));
    assert_eq!(s.board(), &reached);
}

#[test]
fn redo_is_lost_after_a_new_move() {
    let mut s = without_promotion(5);
    move_cards(&mut s, ContainerId::tableau(1).unwrap(), ContainerId::reserve(0).unwrap());
    let undone = s.board().clone();
    assert!(s.dispatch(Event::Undo));

    move_cards(&mut s, ContainerId::tableau(2).unwrap(), ContainerId::reserve(0).unwrap());
    assert!(!s.dispatch(Event::Redo));
    assert_ne!(s.board(), &undone);
}

// ---------------------------------------------------------------------------
// Interaction and winning

#[test]
fn one_move_wins_the_ladder_deal() {
    let mut s = GameSession::initialize(&promotion_ladder_deck()).unwrap();
    assert!(!s.is_won());

    move_cards(&mut s, ContainerId::tableau(0).unwrap(), ContainerId::foundation(0).unwrap());
    assert_eq!(s.score(), 52);
    assert!(s.is_won());
    assert!(s.board().tableau().iter().all(Container::is_empty));
    // Promotion belongs to the same history entry as the move.
    assert_eq!(s.history().past_len(), 1);

    assert!(s.dispatch(Event::Undo));
    assert_eq!(s.score(), 0);
    assert!(!s.is_won());
}

#[test]
fn partial_foundations_are_not_a_win() {
    let config = SessionConfig {
        auto_promote: false,
        ..SessionConfig::default()
    };
    let mut s = GameSession::new(&promotion_ladder_deck(), config).unwrap();
    for i in 0..4u8 {
        move_cards(&mut s, ContainerId::tableau(i).unwrap(), ContainerId::foundation(i).unwrap());
    }
    assert_eq!(s.score(), 4);
    assert!(!s.is_won());
}

#[test]
fn jammed_deal_only_allows_parking() {
    let mut s = GameSession::initialize(&jammed_deck()).unwrap();
    for col in 0..8u8 {
        for other in (0..8u8).filter(|&o| o != col) {
            select(&mut s, ContainerId::tableau(col).unwrap());
            assert!(select(&mut s, ContainerId::tableau(other).unwrap()));
            assert_eq!(s.selection(), Selection::Idle);
        }
    }
    assert_eq!(s.history().past_len(), 0);

    move_cards(&mut s, ContainerId::tableau(0).unwrap(), ContainerId::reserve(0).unwrap());
    assert_eq!(s.history().past_len(), 1);
    assert_eq!(s.board().container(ContainerId::reserve(0).unwrap()).len(), 1);
}

#[test]
fn selection_goes_idle_after_every_second_click() {
    let mut s = without_promotion(9);
    let targets = [
        ContainerId::foundation(2).unwrap(),
        ContainerId::reserve(1).unwrap(),
        ContainerId::tableau(3).unwrap(),
    ];
    for target in targets {
        assert!(select(&mut s, ContainerId::tableau(7).unwrap()));
        assert_eq!(s.selection(), Selection::Focused(ContainerId::tableau(7).unwrap()));
        assert!(select(&mut s, target));
        assert_eq!(s.selection(), Selection::Idle);
    }
}
