use super::card::Card;
use super::hand::Hand;
use super::hole::Hole;
use rand::Rng;

/// Failure modes for deck operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckError {
    /// Fewer cards remain than were requested.
    Exhausted,
}

impl std::fmt::Display for DeckError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exhausted => write!(f, "deck exhausted"),
        }
    }
}

impl std::error::Error for DeckError {}

/// An ordered 52-card permutation dealt through a cursor.
///
/// The permutation is fixed at shuffle time (Fisher–Yates over the full
/// universe); every subsequent draw advances the cursor without touching the
/// order, so a snapshot of `(order, cursor)` replays the hand exactly. Burn
/// cards advance the cursor but are tallied separately and never revealed.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Deck {
    order: Vec<Card>,
    cursor: usize,
    burned: usize,
}

impl Deck {
    /// Shuffles a fresh deck with the given rng.
    ///
    /// Fisher–Yates yields a uniformly distributed permutation; pass a
    /// seeded rng for reproducible deals.
    pub fn shuffled<R: Rng>(rng: &mut R) -> Self {
        let mut order = (0..52u8).map(Card::from).collect::<Vec<Card>>();
        for i in (1..order.len()).rev() {
            let j = rng.random_range(0..=i);
            order.swap(i, j);
        }
        Self {
            order,
            cursor: 0,
            burned: 0,
        }
    }
    /// Stacks the given cards on top, the rest of the universe below in
    /// canonical order. For deterministic tests and replays.
    pub fn stacked(top: Vec<Card>) -> Self {
        let mut seen = Hand::from(top.clone());
        debug_assert!(seen.size() == top.len(), "duplicate stacked cards");
        let mut order = top;
        order.extend((0..52u8).map(Card::from).filter(|c| !seen.contains(c)));
        seen = Hand::from(order.clone());
        debug_assert!(seen.size() == 52);
        Self {
            order,
            cursor: 0,
            burned: 0,
        }
    }
    /// Draws the next n cards, advancing the cursor.
    pub fn draw(&mut self, n: usize) -> Result<Vec<Card>, DeckError> {
        if self.remaining() < n {
            return Err(DeckError::Exhausted);
        }
        let cards = self.order[self.cursor..self.cursor + n].to_vec();
        self.cursor += n;
        Ok(cards)
    }
    /// Draws a single card.
    pub fn draw_one(&mut self) -> Result<Card, DeckError> {
        self.draw(1).map(|cards| cards[0])
    }
    /// Draws two cards as a player's hole cards.
    pub fn hole(&mut self) -> Result<Hole, DeckError> {
        let a = self.draw_one()?;
        let b = self.draw_one()?;
        Ok(Hole::from((a, b)))
    }
    /// Draws one card face down. Burned cards are never revealed.
    pub fn burn(&mut self) -> Result<(), DeckError> {
        self.draw_one()?;
        self.burned += 1;
        Ok(())
    }
    /// Cards not yet dealt.
    pub fn remaining(&self) -> usize {
        self.order.len() - self.cursor
    }
    /// Cards drawn face down so far this hand.
    pub fn burned(&self) -> usize {
        self.burned
    }
    /// Cards dealt face up or to players so far this hand.
    pub fn dealt(&self) -> usize {
        self.cursor - self.burned
    }
}

/// explicit-order isomorphism; order must be a full permutation
impl From<Vec<Card>> for Deck {
    fn from(order: Vec<Card>) -> Self {
        debug_assert!(order.len() == 52);
        debug_assert!(Hand::from(order.clone()).size() == 52);
        Self {
            order,
            cursor: 0,
            burned: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = SmallRng::seed_from_u64(0);
        let mut deck = Deck::shuffled(&mut rng);
        let cards = deck.draw(52).unwrap();
        assert_eq!(Hand::from(cards).size(), 52);
    }

    #[test]
    fn same_seed_same_order() {
        let a = Deck::shuffled(&mut SmallRng::seed_from_u64(42));
        let b = Deck::shuffled(&mut SmallRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn different_seed_different_order() {
        let a = Deck::shuffled(&mut SmallRng::seed_from_u64(1));
        let b = Deck::shuffled(&mut SmallRng::seed_from_u64(2));
        assert_ne!(a, b);
    }

    #[test]
    fn draws_advance_cursor() {
        let mut deck = Deck::stacked(vec![]);
        let first = deck.draw(3).unwrap();
        let next = deck.draw_one().unwrap();
        assert_eq!(deck.remaining(), 48);
        assert!(!first.contains(&next));
    }

    #[test]
    fn exhaustion_is_an_error() {
        let mut deck = Deck::stacked(vec![]);
        deck.draw(50).unwrap();
        assert_eq!(deck.draw(3), Err(DeckError::Exhausted));
        assert_eq!(deck.draw(2).map(|c| c.len()), Ok(2));
        assert_eq!(deck.draw_one(), Err(DeckError::Exhausted));
    }

    #[test]
    fn burns_are_tallied() {
        let mut deck = Deck::stacked(vec![]);
        deck.hole().unwrap();
        deck.burn().unwrap();
        deck.draw(3).unwrap();
        assert_eq!(deck.burned(), 1);
        assert_eq!(deck.dealt(), 5);
        assert_eq!(deck.remaining(), 46);
    }

    #[test]
    fn stacked_deals_in_order() {
        let top = vec![
            Card::try_from("As").unwrap(),
            Card::try_from("Ks").unwrap(),
            Card::try_from("2c").unwrap(),
        ];
        let mut deck = Deck::stacked(top.clone());
        assert_eq!(deck.draw(3).unwrap(), top);
    }
}
