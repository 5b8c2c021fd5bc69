//! Where starting decks come from.
//!
//! Three sources, all producing a `DeckSpec` in dealing order:
//!   * a 32-bit seed for the built-in LCG shuffle (`card::shuffled_deck_from_seed`)
//!   * a PySolFC game number / seed string, reproduced in pure Rust
//!   * an explicit bracketed list of card indices, e.g. `[51, 32, 3, ...]`

use num_bigint::BigUint;
use num_traits::Zero;

use crate::card::{shuffled_deck_from_seed, Card, DECK_LEN};
use crate::error::DealError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeckSpec {
    /// Human-readable label (seed, deal number, ...).
    pub label: String,
    /// The exact deck permutation in dealing order.
    pub deck: [Card; DECK_LEN],
}

/// Deck from the built-in seeded shuffle.
pub fn deck_from_seed(seed: u32) -> DeckSpec {
    DeckSpec {
        label: format!("seed:{seed}"),
        deck: shuffled_deck_from_seed(seed),
    }
}

/// Parse a single bracketed integer list (e.g. "[1, 2, 3]") into a deck.
///
/// The list must contain exactly 52 integers, each a `Card::index()` in
/// 0..=51, with no duplicates.
pub fn parse_bracketed_deck_list(s: &str) -> Result<[Card; DECK_LEN], DealError> {
    let open = s
        .find('[')
        .ok_or_else(|| DealError::Parse("missing '['".to_string()))?;
    let close = s
        .rfind(']')
        .ok_or_else(|| DealError::Parse("missing ']'".to_string()))?;
    if close <= open {
        return Err(DealError::Parse("malformed [...] list".to_string()));
    }

    let mut nums: Vec<u32> = Vec::with_capacity(DECK_LEN);
    for part in s[open + 1..close].split(',') {
        let t = part.trim();
        if t.is_empty() {
            continue;
        }
        let v: u32 = t
            .parse()
            .map_err(|_| DealError::Parse(format!("could not parse '{t}' as a card index")))?;
        nums.push(v);
    }

    if nums.len() != DECK_LEN {
        return Err(DealError::WrongLength {
            expected: DECK_LEN,
            got: nums.len(),
        });
    }

    let mut seen = [false; DECK_LEN];
    let mut deck = [Card::from_index(0); DECK_LEN];
    for (slot, &v) in deck.iter_mut().zip(nums.iter()) {
        if v as usize >= DECK_LEN {
            return Err(DealError::CardIndexOutOfRange(v));
        }
        let card = Card::from_index(v as u8);
        if seen[v as usize] {
            return Err(DealError::DuplicateCard(card));
        }
        seen[v as usize] = true;
        *slot = card;
    }
    Ok(deck)
}

// -----------------------------------------------------------------------------
// Pure-Rust reproduction of PySolFC + pysol_cards shuffles from seeds.
//
//   * Cards are built in PySolFC order: suit-major then rank-minor,
//     with suit order C,S,H,D and rank order A..K. LCRandom31 deals first
//     rearrange them into Microsoft order (rank-major, C,D,H,S).
//   * RNG selection matches pysollib.pysolrandom.construct_random(str(seed)):
//       - an "msNNNN" deal or a number < 32000 => LCRandom31
//       - anything else => MT19937 (Python's random.Random core)
//   * Shuffle uses RandomBase.shuffle (Fisher-Yates) with randint semantics.
//   * Dealing order is the shuffled talon reversed.

/// Generate a `DeckSpec` from a PySolFC game number / seed string.
///
/// Accepts:
///   * "13101775566348840960"   (numeric, arbitrarily large)
///   * "ms12345"                (MS-style)
///   * strings with whitespace / punctuation (like PySolFC seed strings)
pub fn deck_from_pysol_seed_str(seed_s: &str) -> Result<DeckSpec, DealError> {
    let seed = normalize_pysol_seed_str(seed_s)?;
    let label = format!("deal:{}", seed.as_display_str());
    let deck = generate_deck_from_seed(&seed)?;
    Ok(DeckSpec { label, deck })
}

// PySolFC suit order: Clubs(0), Spades(1), Hearts(2), Diamonds(3)
// engine suit order:  Spades(0), Hearts(1), Clubs(2), Diamonds(3)
const PYSOL_SUIT_TO_ENGINE_SUIT: [u8; 4] = [2, 0, 1, 3];

fn pysol_card(pysol_suit: u8, rank_0_12: u8) -> Card {
    let suit = PYSOL_SUIT_TO_ENGINE_SUIT[pysol_suit as usize];
    Card::from_index(suit * 13 + rank_0_12)
}

#[derive(Clone, Debug)]
enum PysolSeed {
    Ms(u64),
    /// A non-negative integer seed (PySolFC accepts arbitrarily-large ints).
    Num(BigUint),
}

impl PysolSeed {
    fn as_display_str(&self) -> String {
        match self {
            PysolSeed::Ms(n) => format!("ms{}", n),
            PysolSeed::Num(n) => n.to_string(),
        }
    }
}

fn normalize_pysol_seed_str(s: &str) -> Result<PysolSeed, DealError> {
    // Mirrors:
    //   s = re.sub(r"L$", "", str(s))
    //   s = re.sub(r"[\s\#\-\_\.\,]", "", s.lower())
    let mut t = s.trim().to_string();
    if t.ends_with('L') {
        t.pop();
    }
    let cleaned: String = t
        .chars()
        .map(|ch| ch.to_ascii_lowercase())
        .filter(|&ch| !(ch.is_whitespace() || matches!(ch, '#' | '-' | '_' | '.' | ',')))
        .collect();
    if cleaned.is_empty() {
        return Err(DealError::InvalidSeed("empty seed".to_string()));
    }

    if let Some(rest) = cleaned.strip_prefix("ms") {
        if rest.is_empty() || !rest.chars().all(|c| c.is_ascii_digit()) {
            return Err(DealError::InvalidSeed(format!("invalid ms seed {s:?}")));
        }
        let n: u64 = rest
            .parse()
            .map_err(|_| DealError::InvalidSeed(format!("could not parse ms seed {s:?}")))?;
        return Ok(PysolSeed::Ms(n));
    }

    if !cleaned.chars().all(|c| c.is_ascii_digit()) {
        return Err(DealError::InvalidSeed(format!(
            "seed contains non-digits after normalization: {cleaned:?}"
        )));
    }
    let n = BigUint::parse_bytes(cleaned.as_bytes(), 10)
        .ok_or_else(|| DealError::InvalidSeed(format!("could not parse seed {s:?}")))?;
    Ok(PysolSeed::Num(n))
}

fn generate_deck_from_seed(seed: &PysolSeed) -> Result<[Card; DECK_LEN], DealError> {
    let mut cards: Vec<(u8, u8)> = Vec::with_capacity(DECK_LEN);
    for suit in 0u8..4u8 {
        for rank in 0u8..13u8 {
            cards.push((suit, rank));
        }
    }

    match seed {
        PysolSeed::Ms(n) => cards = shuffle_ms(*n, &cards)?,
        PysolSeed::Num(n) if n < &BigUint::from(32000u32) => {
            // Below 32000, so a single digit holds it.
            let small = n.to_u64_digits().first().copied().unwrap_or(0);
            cards = shuffle_ms(small, &cards)?;
        }
        PysolSeed::Num(n) => MTRandom::new_big(n).shuffle(&mut cards),
    }

    // Dealing order is reversed (top of talon is the end of the list).
    cards.reverse();

    let mut deck = [Card::from_index(0); DECK_LEN];
    for (slot, (suit, rank)) in deck.iter_mut().zip(cards) {
        *slot = pysol_card(suit, rank);
    }
    Ok(deck)
}

/// Microsoft FreeCell card order: rank-major, suits C, D, H, S within a
/// rank (AC AD AH AS 2C ...). `cards` is in PySolFC order.
fn ms_rearrange(cards: &[(u8, u8)]) -> Vec<(u8, u8)> {
    const MS_SUITS: [usize; 4] = [0, 3, 2, 1];
    (0..13)
        .flat_map(|rank| MS_SUITS.iter().map(move |&suit| cards[rank + suit * 13]))
        .collect()
}

/// LCRandom31 deals are numbered like Microsoft FreeCell, so they shuffle
/// the Microsoft card order rather than PySolFC's.
fn shuffle_ms(seed: u64, cards: &[(u8, u8)]) -> Result<Vec<(u8, u8)>, DealError> {
    let mut rng = LCRandom31::new(seed)?;
    let mut ms = ms_rearrange(cards);
    rng.shuffle(&mut ms);
    Ok(ms)
}

// --- RandomBase.shuffle equivalent (Fisher–Yates) ---

trait Shuffle {
    fn randint_inclusive(&mut self, a: usize, b: usize) -> usize;

    fn shuffle<T>(&mut self, seq: &mut [T]) {
        if seq.len() <= 1 {
            return;
        }
        for n in (1..seq.len()).rev() {
            let j = self.randint_inclusive(0, n);
            seq.swap(n, j);
        }
    }
}

// --- LCRandom31 (matches pysol_cards.random.LCRandom31) ---

struct LCRandom31 {
    seed: u64,
    seedx: u64,
}

impl LCRandom31 {
    const MAX_SEED: u64 = (1u64 << 33) - 1;

    fn new(seed: u64) -> Result<Self, DealError> {
        if seed < 1 || seed > Self::MAX_SEED {
            return Err(DealError::InvalidSeed(format!("ms seed {seed} out of range")));
        }
        let seedx = if seed < 0x1_0000_0000 {
            seed
        } else {
            seed - 0x1_0000_0000
        };
        Ok(Self { seed, seedx })
    }

    fn rand_step(&mut self) {
        self.seedx = (self.seedx.wrapping_mul(214013).wrapping_add(2531011)) & Self::MAX_SEED;
    }

    fn rand_15(&mut self) -> u16 {
        self.rand_step();
        ((self.seedx >> 16) & 0x7fff) as u16
    }

    fn rand_16(&mut self) -> u16 {
        self.rand_step();
        ((self.seedx >> 16) & 0xffff) as u16
    }

    /// Mirrors LCRandom31.random() from pysol_cards.
    fn random_u16ish(&mut self) -> u32 {
        if self.seed < 0x1_0000_0000 {
            let r = self.rand_15() as u32;
            if self.seed < 0x8000_0000 { r } else { r | 0x8000 }
        } else {
            (self.rand_16() as u32) + 1
        }
    }
}

impl Shuffle for LCRandom31 {
    fn randint_inclusive(&mut self, a: usize, b: usize) -> usize {
        let span = (b + 1).saturating_sub(a);
        if span <= 1 {
            return a;
        }
        let r = self.random_u16ish() as usize;
        a + (r % span)
    }
}

// --- MT19937 matching CPython's _random (used by random.Random.random()) ---

struct MTRandom {
    mt: [u32; 624],
    index: usize,
}

impl MTRandom {
    fn new_big(seed: &BigUint) -> Self {
        let mut r = Self {
            mt: [0u32; 624],
            index: 624,
        };
        r.seed_big(seed);
        r
    }

    fn seed_big(&mut self, seed: &BigUint) {
        // CPython feeds the 32-bit little-endian words of the integer to
        // init_by_array.
        if seed.is_zero() {
            self.init_by_array(&[0u32]);
            return;
        }
        let mut key = seed.to_u32_digits();
        while key.last().copied() == Some(0) {
            key.pop();
        }
        if key.is_empty() {
            key.push(0);
        }
        self.init_by_array(&key);
    }

    fn init_genrand(&mut self, s: u32) {
        self.mt[0] = s;
        for i in 1..624 {
            let prev = self.mt[i - 1];
            self.mt[i] = 1812433253u32
                .wrapping_mul(prev ^ (prev >> 30))
                .wrapping_add(i as u32);
        }
        self.index = 624;
    }

    fn init_by_array(&mut self, key: &[u32]) {
        self.init_genrand(19650218u32);
        let mut i: usize = 1;
        let mut j: usize = 0;
        let key_len = key.len().max(1);
        let mut k: usize = 624.max(key_len);

        while k > 0 {
            let prev = self.mt[i - 1];
            let x = prev ^ (prev >> 30);
            let mul = 1664525u32.wrapping_mul(x);
            self.mt[i] = (self.mt[i] ^ mul)
                .wrapping_add(key[j])
                .wrapping_add(j as u32);
            i += 1;
            j += 1;
            if i >= 624 {
                self.mt[0] = self.mt[623];
                i = 1;
            }
            if j >= key_len {
                j = 0;
            }
            k -= 1;
        }

        k = 623;
        while k > 0 {
            let prev = self.mt[i - 1];
            let x = prev ^ (prev >> 30);
            let mul = 1566083941u32.wrapping_mul(x);
            self.mt[i] = (self.mt[i] ^ mul).wrapping_sub(i as u32);
            i += 1;
            if i >= 624 {
                self.mt[0] = self.mt[623];
                i = 1;
            }
            k -= 1;
        }

        self.mt[0] = 0x8000_0000;
        self.index = 624;
    }

    fn twist(&mut self) {
        const N: usize = 624;
        const M: usize = 397;
        const MATRIX_A: u32 = 0x9908_b0df;
        const UPPER_MASK: u32 = 0x8000_0000;
        const LOWER_MASK: u32 = 0x7fff_ffff;

        for i in 0..N {
            let x = (self.mt[i] & UPPER_MASK) | (self.mt[(i + 1) % N] & LOWER_MASK);
            let mut x_a = x >> 1;
            if (x & 1) != 0 {
                x_a ^= MATRIX_A;
            }
            self.mt[i] = self.mt[(i + M) % N] ^ x_a;
        }
        self.index = 0;
    }

    fn next_u32(&mut self) -> u32 {
        if self.index >= 624 {
            self.twist();
        }
        let mut y = self.mt[self.index];
        self.index += 1;

        // tempering
        y ^= y >> 11;
        y ^= (y << 7) & 0x9d2c_5680;
        y ^= (y << 15) & 0xefc6_0000;
        y ^= y >> 18;
        y
    }

    fn random_f64(&mut self) -> f64 {
        // CPython random():
        //   a = genrand_uint32() >> 5  (27 bits)
        //   b = genrand_uint32() >> 6  (26 bits)
        //   return (a*2^26 + b) / 2^53
        let a = (self.next_u32() >> 5) as u64;
        let b = (self.next_u32() >> 6) as u64;
        let numerator = (a << 26) + b;
        (numerator as f64) / ((1u64 << 53) as f64)
    }
}

impl Shuffle for MTRandom {
    fn randint_inclusive(&mut self, a: usize, b: usize) -> usize {
        let span = (b + 1).saturating_sub(a);
        if span <= 1 {
            return a;
        }
        // Mirrors RandomBase.randint: a + int(random()*span)
        let r = self.random_f64();
        a + ((r * (span as f64)) as usize)
    }
}
