use super::card::Card;
use super::hand::Hand;

/// The two private cards a seat is dealt at hand start.
///
/// Stored as a two-card [`Hand`] so it unions with the board for free at
/// showdown. Construction enforces the exactly-two invariant; equality is
/// set equality, so deal order never matters.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct Hole(Hand);

impl Hole {
    pub fn cards(&self) -> Vec<Card> {
        Vec::<Card>::from(self.0)
    }
}

impl From<(Card, Card)> for Hole {
    fn from((one, two): (Card, Card)) -> Self {
        debug_assert!(one != two, "dealt the same card twice");
        Self(Hand::or(Hand::from(one), Hand::from(two)))
    }
}

impl From<Hand> for Hole {
    fn from(hand: Hand) -> Self {
        debug_assert!(hand.size() == 2, "a hole is exactly two cards");
        Self(hand)
    }
}
impl From<Hole> for Hand {
    fn from(hole: Hole) -> Self {
        hole.0
    }
}

impl TryFrom<&str> for Hole {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match Hand::try_from(s)? {
            hand if hand.size() == 2 => Ok(Self(hand)),
            hand => Err(format!("expected two cards, got {}", hand.size())),
        }
    }
}

impl std::fmt::Display for Hole {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_of_dealing_is_irrelevant() {
        let a = Card::try_from("As").unwrap();
        let k = Card::try_from("Kd").unwrap();
        assert_eq!(Hole::from((a, k)), Hole::from((k, a)));
    }

    #[test]
    fn parses_exactly_two() {
        assert!(Hole::try_from("As Kd").is_ok());
        assert!(Hole::try_from("As").is_err());
        assert!(Hole::try_from("As Kd 2c").is_err());
    }
}
