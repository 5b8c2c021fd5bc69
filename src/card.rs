//! Card, Suit, Rank and Color types for a standard 52-card deck.
//!
//! - `Card` is an immutable `(rank, suit)` value; ordering compares rank first.
//! - `Card::index()` gives a compact 0..=51 encoding (`suit * 13 + rank`).
//! - Suits carry an index 0..=3 whose parity decides the color class.

use core::fmt;
use core::str::FromStr;

use crate::error::DealError;

/// Number of suits in a standard deck.
pub const NUM_SUITS: u8 = 4;
/// Number of ranks in a standard deck.
pub const NUM_RANKS: u8 = 13;
/// Number of cards in a standard deck.
pub const CARDS_PER_DECK: u8 = NUM_SUITS * NUM_RANKS;

/// Deck length as `usize`, for array sizes.
pub const DECK_LEN: usize = CARDS_PER_DECK as usize;

/// The two color classes. Suits with an even index are black, odd are red.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Color {
    Black,
    Red,
}

/// The four suits, in the fixed index order used throughout the engine.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
#[repr(u8)]
pub enum Suit {
    Spades = 0,
    Hearts = 1,
    Clubs = 2,
    Diamonds = 3,
}

/// The thirteen ranks, Ace low.
///
/// The discriminant is 0-based; use `number()` for the 1..=13 value.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
#[repr(u8)]
pub enum Rank {
    Ace = 0,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King, // 12
}

/// A playing card.
///
/// Field order matters: the derived `Ord` compares by rank, then suit.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    /// Create a new card from a suit and rank.
    #[inline]
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Card { rank, suit }
    }

    /// Create a card from a compact index in 0..=51.
    ///
    /// # Panics
    ///
    /// Panics if `index >= 52`.
    #[inline]
    pub fn from_index(index: u8) -> Self {
        assert!(index < CARDS_PER_DECK, "invalid card index: {index}");
        Card {
            rank: Rank::from_u8(index % NUM_RANKS),
            suit: Suit::from_u8(index / NUM_RANKS),
        }
    }

    /// Return the compact 0..=51 index of this card.
    #[inline]
    pub fn index(self) -> u8 {
        self.suit as u8 * NUM_RANKS + self.rank as u8
    }

    #[inline]
    pub fn suit(self) -> Suit {
        self.suit
    }

    #[inline]
    pub fn rank(self) -> Rank {
        self.rank
    }

    /// Rank number in 1..=13 (Ace=1, King=13).
    #[inline]
    pub fn rank_number(self) -> u8 {
        self.rank.number()
    }

    #[inline]
    pub fn color(self) -> Color {
        self.suit.color()
    }

    /// Short string like "AH", "7C", "TD", "KS".
    pub fn short_str(self) -> String {
        format!("{}{}", self.rank.short_char(), self.suit.short_char())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short_str())
    }
}

/// Parse the short form produced by `short_str()`. "10" is accepted for Ten.
impl FromStr for Card {
    type Err = DealError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim().to_ascii_uppercase();
        let bad = || DealError::Parse(format!("not a card: {s:?}"));
        let suit_char = t.chars().last().ok_or_else(bad)?;
        let rank_part = &t[..t.len() - suit_char.len_utf8()];
        let suit = Suit::from_short_char(suit_char).ok_or_else(bad)?;
        let rank = match rank_part {
            "10" => Rank::Ten,
            _ => {
                let mut chars = rank_part.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Rank::from_short_char(c).ok_or_else(bad)?,
                    _ => return Err(bad()),
                }
            }
        };
        Ok(Card::new(suit, rank))
    }
}

impl Suit {
    /// All suits in index order.
    pub const ALL: [Suit; NUM_SUITS as usize] =
        [Suit::Spades, Suit::Hearts, Suit::Clubs, Suit::Diamonds];

    /// Construct a suit from a small integer 0..=3.
    ///
    /// # Panics
    ///
    /// Panics if `v >= 4`.
    #[inline]
    pub fn from_u8(v: u8) -> Self {
        match v {
            0 => Suit::Spades,
            1 => Suit::Hearts,
            2 => Suit::Clubs,
            3 => Suit::Diamonds,
            _ => panic!("invalid suit: {v}"),
        }
    }

    #[inline]
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Color class by parity of the suit index.
    #[inline]
    pub fn color(self) -> Color {
        if self.index() % 2 == 0 {
            Color::Black
        } else {
            Color::Red
        }
    }

    /// Single-character representation: 'S', 'H', 'C', or 'D'.
    #[inline]
    pub fn short_char(self) -> char {
        match self {
            Suit::Spades => 'S',
            Suit::Hearts => 'H',
            Suit::Clubs => 'C',
            Suit::Diamonds => 'D',
        }
    }

    pub fn from_short_char(c: char) -> Option<Self> {
        Suit::ALL
            .into_iter()
            .find(|s| s.short_char() == c.to_ascii_uppercase())
    }
}

impl Rank {
    /// All ranks in a fixed, reproducible order (Ace..King).
    pub const ALL: [Rank; NUM_RANKS as usize] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Construct a rank from a small integer 0..=12.
    ///
    /// # Panics
    ///
    /// Panics if `v >= 13`.
    #[inline]
    pub fn from_u8(v: u8) -> Self {
        match Rank::ALL.get(v as usize) {
            Some(&rank) => rank,
            None => panic!("invalid rank: {v}"),
        }
    }

    /// Rank number in 1..=13 (Ace=1, King=13).
    #[inline]
    pub fn number(self) -> u8 {
        self as u8 + 1
    }

    /// The rank directly above this one, if any.
    #[inline]
    pub fn succ(self) -> Option<Rank> {
        Rank::ALL.get(self as usize + 1).copied()
    }

    pub fn short_char(self) -> char {
        match self {
            Rank::Ace => 'A',
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
        }
    }

    pub fn from_short_char(c: char) -> Option<Self> {
        Rank::ALL
            .into_iter()
            .find(|r| r.short_char() == c.to_ascii_uppercase())
    }
}

/// Tableau stacking rule: can `upper` be placed on `lower`?
///
/// True if `upper` is exactly one rank lower than `lower` and of the
/// opposite color class.
#[inline]
pub fn is_one_lower_opposite_color(upper: Card, lower: Card) -> bool {
    upper.rank_number() + 1 == lower.rank_number() && upper.color() != lower.color()
}

/// Foundation stacking rule: is `upper` the next card of `lower`'s suit?
#[inline]
pub fn is_next_of_same_suit(upper: Card, lower: Card) -> bool {
    upper.suit() == lower.suit() && lower.rank().succ() == Some(upper.rank())
}

/// Generate a standard 52-card deck in a fixed order.
///
/// Suits follow `Suit::ALL` order, and ranks follow `Rank::ALL` order,
/// so `standard_deck()[i].index() == i`.
pub fn standard_deck() -> [Card; DECK_LEN] {
    core::array::from_fn(|i| Card::from_index(i as u8))
}

/// Return a deterministically shuffled standard deck given a 32-bit seed.
///
/// Simple LCG driving a Fisher-Yates shuffle; no external RNG involved, so
/// a seed names the same deal on every platform.
pub fn shuffled_deck_from_seed(seed: u32) -> [Card; DECK_LEN] {
    let mut deck = standard_deck();
    let mut state = seed;

    fn lcg(state: &mut u32) -> u32 {
        *state = state.wrapping_mul(1664525).wrapping_add(1013904223);
        *state
    }

    let len = deck.len();
    for i in (1..len).rev() {
        let r = (lcg(&mut state) as usize) % (i + 1);
        deck.swap(i, r);
    }

    deck
}
