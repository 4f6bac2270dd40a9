use super::rank::Rank;
use super::suit::Suit;

/// A playing card, one of the 52 distinct (Rank, Suit) combinations.
///
/// Encoded in a single byte as `rank * 4 + suit`, which is also the card's
/// position in a sorted deck and its bit index inside a [`Hand`] bitmask.
///
/// [`Hand`]: super::hand::Hand
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(into = "u8", from = "u8")]
pub struct Card(u8);

impl Card {
    pub fn rank(&self) -> Rank {
        Rank::from(self.0 / 4)
    }
    pub fn suit(&self) -> Suit {
        Suit::from(self.0 % 4)
    }
}

/// (Rank, Suit) isomorphism
impl From<(Rank, Suit)> for Card {
    fn from((r, s): (Rank, Suit)) -> Self {
        Self(u8::from(r) * 4 + u8::from(s))
    }
}

/// u8 isomorphism
/// each card is mapped to its location in a sorted deck 0-51
impl From<Card> for u8 {
    fn from(c: Card) -> u8 {
        c.0
    }
}
impl From<u8> for Card {
    fn from(n: u8) -> Self {
        debug_assert!(n < 52);
        Self(n)
    }
}

/// u64 isomorphism
/// each card is just one bit turned on
impl From<Card> for u64 {
    fn from(c: Card) -> u64 {
        1 << u8::from(c)
    }
}
impl From<u64> for Card {
    fn from(n: u64) -> Self {
        debug_assert!(n.count_ones() == 1);
        Self(n.trailing_zeros() as u8)
    }
}

/// str isomorphism
impl TryFrom<&str> for Card {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let s = s.trim();
        let split = s
            .char_indices()
            .nth(1)
            .map(|(i, _)| i)
            .ok_or_else(|| format!("invalid card str: {}", s))?;
        let rank = Rank::try_from(&s[..split])?;
        let suit = Suit::try_from(&s[split..])?;
        Ok(Card::from((rank, suit)))
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}{}", self.rank(), self.suit())
    }
}

impl rvb_core::Arbitrary for Card {
    fn random() -> Self {
        Self(rand::random_range(0..52) as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rvb_core::Arbitrary;

    #[test]
    fn bijective_rank_suit() {
        let card = Card::random();
        assert_eq!(card, Card::from((card.rank(), card.suit())));
    }

    #[test]
    fn bijective_u8() {
        let card = Card::random();
        assert_eq!(card, Card::from(u8::from(card)));
    }

    #[test]
    fn bijective_u64() {
        let card = Card::random();
        assert_eq!(card, Card::from(u64::from(card)));
    }

    #[test]
    fn bijective_str() {
        assert_eq!(Card::try_from("As").unwrap().rank(), Rank::Ace);
        assert_eq!(Card::try_from("As").unwrap().suit(), Suit::S);
        assert_eq!(Card::try_from("Td").unwrap().to_string(), "Td");
        assert!(Card::try_from("1x").is_err());
    }

    #[test]
    fn accepts_glyph_suits() {
        assert_eq!(Card::try_from("Q♥").unwrap(), Card::try_from("Qh").unwrap());
    }
}
