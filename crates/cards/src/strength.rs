use super::evaluator::Evaluator;
use super::hand::Hand;
use super::kicks::Kickers;
use super::rank::Rank;
use super::ranking::Ranking;

/// Attempting to evaluate fewer than five cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsufficientCards(pub usize);

impl std::fmt::Display for InsufficientCards {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "need at least 5 cards to evaluate, got {}", self.0)
    }
}

impl std::error::Error for InsufficientCards {}

/// A fully-evaluated hand strength for comparison.
///
/// Combines a [`Ranking`] (hand category like flush or two pair) with
/// [`Kickers`] (tie-breaking cards). Ordering is lexicographic: ranking
/// first, then kickers. Equal strengths are genuine ties and split pots.
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct Strength {
    value: Ranking,
    kicks: Kickers,
}

impl Strength {
    /// Evaluates the best five-card selection from 5–7 cards.
    pub fn evaluate(hand: Hand) -> Result<Self, InsufficientCards> {
        match hand.size() {
            n if n < 5 => Err(InsufficientCards(n)),
            _ => Ok(Self::from(hand)),
        }
    }
    /// The hand category with its defining ranks.
    pub fn value(&self) -> Ranking {
        self.value
    }
    /// The tie-breaking kickers.
    pub fn kickers(&self) -> Kickers {
        self.kicks
    }
    /// A presentational description: "Full House, Queens full of Tens".
    /// Not part of the ordering.
    pub fn describe(&self) -> String {
        match self.value {
            Ranking::HighCard(r) => format!("High Card, {}", r.word()),
            Ranking::OnePair(r) => format!("Pair of {}", r.plural()),
            Ranking::TwoPair(hi, lo) => format!("Two Pair, {} and {}", hi.plural(), lo.plural()),
            Ranking::ThreeOAK(r) => format!("Three of a Kind, {}", r.plural()),
            Ranking::Straight(r) => format!("Straight, {} high", r.word()),
            Ranking::Flush(r) => format!("Flush, {} high", r.word()),
            Ranking::FullHouse(t, p) => {
                format!("Full House, {} full of {}", t.plural(), p.plural())
            }
            Ranking::FourOAK(r) => format!("Four of a Kind, {}", r.plural()),
            Ranking::StraightFlush(Rank::Ace) => "Royal Flush".to_string(),
            Ranking::StraightFlush(r) => format!("Straight Flush, {} high", r.word()),
        }
    }
}

impl From<Hand> for Strength {
    fn from(hand: Hand) -> Self {
        debug_assert!(hand.size() >= 5);
        Self::from(Evaluator::from(hand))
    }
}

impl From<Evaluator> for Strength {
    fn from(e: Evaluator) -> Self {
        let value = e.find_ranking();
        let kicks = e.find_kickers(value);
        Self::from((value, kicks))
    }
}

impl From<(Ranking, Kickers)> for Strength {
    fn from((value, kicks): (Ranking, Kickers)) -> Self {
        Self { value, kicks }
    }
}

impl std::fmt::Display for Strength {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:<18}{:>5}", self.value, self.kicks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strength(cards: &str) -> Strength {
        Strength::evaluate(Hand::try_from(cards).unwrap()).unwrap()
    }

    #[test]
    fn too_few_cards() {
        let hand = Hand::try_from("As Kh 2c").unwrap();
        assert_eq!(Strength::evaluate(hand), Err(InsufficientCards(3)));
    }

    #[test]
    fn kickers_decide_equal_categories() {
        let better = strength("As Ah Kd Qc Js");
        let worse = strength("Ac Ad Kh Qs 9h");
        assert!(better > worse);
    }

    #[test]
    fn suits_never_decide() {
        let spades = strength("As Ks Qd Jc 9h");
        let hearts = strength("Ah Kh Qc Jd 9s");
        assert_eq!(spades, hearts);
    }

    #[test]
    fn flushes_differ_below_the_top_card() {
        let better = strength("Ah Kh Qh Jh 9h");
        let worse = strength("As Ks Qs Js 8s");
        assert!(better > worse);
    }

    #[test]
    fn wheel_loses_to_six_high() {
        let wheel = strength("As 2h 3d 4c 5s");
        let six = strength("2s 3h 4d 5c 6s");
        assert!(wheel < six);
    }

    #[test]
    fn comparison_is_a_total_order() {
        let hands = [
            strength("As Kh Qd Jc 9s"),
            strength("As Ah Kd Qc Js"),
            strength("As Ah Kd Kc Qs"),
            strength("As Ah Ad Kc Qs"),
            strength("Ts Jh Qd Kc As"),
            strength("As Ks Qs Js 9s"),
            strength("As Ah Ad Kc Ks"),
            strength("As Ah Ad Ac Ks"),
            strength("Ts Js Qs Ks As"),
        ];
        for window in hands.windows(2) {
            assert!(window[0] < window[1]);
        }
        for hand in hands {
            assert_eq!(hand.cmp(&hand), std::cmp::Ordering::Equal);
        }
    }

    #[test]
    fn descriptions() {
        assert_eq!(
            strength("Qs Qh Qd Tc Ts").describe(),
            "Full House, Queens full of Tens"
        );
        assert_eq!(strength("9s 9h Kd Qc Js").describe(), "Pair of Nines");
        assert_eq!(strength("Ts Js Qs Ks As").describe(), "Royal Flush");
        assert_eq!(
            strength("As 2h 3d 4c 5s").describe(),
            "Straight, Five high"
        );
        assert_eq!(
            strength("As Ks Qs Js 2s").describe(),
            "Flush, Ace high"
        );
    }
}
