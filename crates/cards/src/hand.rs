use super::card::Card;

/// An unordered set of cards as a bitstring of 52 bits stored in a u64.
///
/// Set algebra (union, complement, removal) is one instruction each, which
/// keeps dealing bookkeeping and hand evaluation allocation-free.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(into = "u64", from = "u64")]
pub struct Hand(u64);

impl Hand {
    /// Bitmask covering the full 52-card universe.
    pub const fn mask() -> u64 {
        (1 << 52) - 1
    }
    /// The empty set.
    pub const fn empty() -> Self {
        Self(0)
    }
    /// Number of cards in the set.
    pub const fn size(&self) -> usize {
        self.0.count_ones() as usize
    }
    /// Union of two hands.
    pub fn add(lhs: Self, rhs: Self) -> Self {
        debug_assert!(lhs.0 & rhs.0 == 0, "overlapping hands");
        Self(lhs.0 | rhs.0)
    }
    /// Union, permitting overlap.
    pub const fn or(lhs: Self, rhs: Self) -> Self {
        Self(lhs.0 | rhs.0)
    }
    /// Removes a card from the set, if present.
    pub fn remove(&mut self, card: Card) {
        self.0 &= !u64::from(card);
    }
    /// Tests membership.
    pub fn contains(&self, card: &Card) -> bool {
        self.0 & u64::from(*card) != 0
    }
    /// All cards NOT in this set.
    pub const fn complement(&self) -> Self {
        Self(!self.0 & Self::mask())
    }
}

/// u64 isomorphism
impl From<u64> for Hand {
    fn from(n: u64) -> Self {
        Self(n & Self::mask())
    }
}
impl From<Hand> for u64 {
    fn from(hand: Hand) -> Self {
        hand.0
    }
}

/// Card isomorphism (singleton set)
impl From<Card> for Hand {
    fn from(card: Card) -> Self {
        Self(u64::from(card))
    }
}

/// Vec<Card> isomorphism
impl From<Vec<Card>> for Hand {
    fn from(cards: Vec<Card>) -> Self {
        Self(cards.into_iter().map(u64::from).fold(0, |a, c| a | c))
    }
}
impl From<Hand> for Vec<Card> {
    fn from(hand: Hand) -> Self {
        let mut bits = hand.0;
        let mut cards = Vec::with_capacity(hand.size());
        while bits != 0 {
            cards.push(Card::from(bits.trailing_zeros() as u8));
            bits &= bits - 1;
        }
        cards
    }
}

/// str isomorphism ("Ah Kd 2c")
impl TryFrom<&str> for Hand {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.split_whitespace()
            .map(Card::try_from)
            .collect::<Result<Vec<Card>, _>>()
            .map(Self::from)
    }
}

impl IntoIterator for Hand {
    type Item = Card;
    type IntoIter = std::vec::IntoIter<Card>;
    fn into_iter(self) -> Self::IntoIter {
        Vec::<Card>::from(self).into_iter()
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}",
            Vec::<Card>::from(*self)
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<String>>()
                .join(" ")
        )
    }
}
