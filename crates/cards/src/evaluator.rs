use super::hand::Hand;
use super::kicks::Kickers;
use super::rank::Rank;
use super::ranking::Ranking;
use super::suit::Suit;

/// Best-five search over a set of 5–7 cards.
///
/// Works on the compact bitmask representation: rank multiplicities come out
/// of 4-bit nibbles, straights out of shifted rank masks, flushes out of
/// per-suit rank masks. Categories are probed from strongest to weakest and
/// the first hit wins.
///
/// Flushes are probed before quads and boats: five suited cards cannot
/// coexist with four of a kind (or a full house) in seven cards, so the
/// reordering is safe and lets the straight-flush probe reuse the flush
/// suit it just found.
pub struct Evaluator(Hand);

impl From<Hand> for Evaluator {
    fn from(h: Hand) -> Self {
        Self(h)
    }
}

impl Evaluator {
    pub fn find_ranking(&self) -> Ranking {
        self.find_flush()
            .or_else(|| self.find_quads())
            .or_else(|| self.find_boat())
            .or_else(|| self.find_straight())
            .or_else(|| self.find_trips())
            .or_else(|| self.find_pairs())
            .or_else(|| self.find_high())
            .expect("at least one card in hand")
    }
    pub fn find_kickers(&self, value: Ranking) -> Kickers {
        let n = value.n_kickers();
        if n == 0 {
            return Kickers::default();
        }
        let pool = match value {
            Ranking::Flush(_) => {
                let suit = self.find_suit_of_flush().expect("flush has a suit");
                self.suit_mask(suit)
            }
            _ => self.rank_mask(),
        };
        let mut bits = pool & !value.mask();
        while bits.count_ones() as usize > n {
            bits &= bits - 1;
        }
        Kickers::from(bits)
    }

    fn find_high(&self) -> Option<Ranking> {
        self.find_rank_of_n_oak(1, None).map(Ranking::HighCard)
    }
    /// One pair or, when a second distinct pair exists, two pair.
    fn find_pairs(&self) -> Option<Ranking> {
        let hi = self.find_rank_of_n_oak(2, None)?;
        Some(match self.find_rank_of_n_oak(2, Some(hi)) {
            Some(lo) => Ranking::TwoPair(hi, lo),
            None => Ranking::OnePair(hi),
        })
    }
    fn find_trips(&self) -> Option<Ranking> {
        self.find_rank_of_n_oak(3, None).map(Ranking::ThreeOAK)
    }
    fn find_quads(&self) -> Option<Ranking> {
        self.find_rank_of_n_oak(4, None).map(Ranking::FourOAK)
    }
    /// Trips plus any other pair, above or below: KKK with AA is Kings
    /// full of Aces.
    fn find_boat(&self) -> Option<Ranking> {
        let trips = self.find_rank_of_n_oak(3, None)?;
        let pairs = self.find_rank_of_n_oak(2, Some(trips))?;
        Some(Ranking::FullHouse(trips, pairs))
    }
    fn find_straight(&self) -> Option<Ranking> {
        self.find_rank_of_straight(self.rank_mask())
            .map(Ranking::Straight)
    }
    fn find_flush(&self) -> Option<Ranking> {
        let suit = self.find_suit_of_flush()?;
        let suited = self.suit_mask(suit);
        Some(match self.find_rank_of_straight(suited) {
            Some(top) => Ranking::StraightFlush(top),
            None => Ranking::Flush(Rank::from(suited)),
        })
    }

    /// Top rank of any five-in-a-row in the given rank mask.
    ///
    /// ANDing the mask against itself shifted by one through four leaves a
    /// bit only where that rank and the four below it are all present. The
    /// wheel needs its own probe since the ace sits at the top bit; it keys
    /// at Five so A-2-3-4-5 sorts below a six-high straight.
    fn find_rank_of_straight(&self, ranks: u16) -> Option<Rank> {
        let runs = ranks & (ranks << 1) & (ranks << 2) & (ranks << 3) & (ranks << 4);
        let wheel = u16::from(Rank::Ace) | 0b1111;
        if runs != 0 {
            Some(Rank::from(runs))
        } else if ranks & wheel == wheel {
            Some(Rank::Five)
        } else {
            None
        }
    }
    fn find_suit_of_flush(&self) -> Option<Suit> {
        Suit::all()
            .into_iter()
            .find(|suit| self.suit_mask(*suit).count_ones() >= 5)
    }
    /// Highest rank held at least n times, skipping an excluded rank.
    /// The exclusion lets pair searches look both above and below a made
    /// rank.
    fn find_rank_of_n_oak(&self, n: usize, except: Option<Rank>) -> Option<Rank> {
        Rank::all()
            .into_iter()
            .rev()
            .filter(|rank| Some(*rank) != except)
            .find(|rank| self.count_of_rank(*rank) >= n)
    }
    fn count_of_rank(&self, rank: Rank) -> usize {
        let nibble = u64::from(self.0) >> (4 * u8::from(rank) as u64);
        (nibble & 0xF).count_ones() as usize
    }
    /// Which ranks are present, suits ignored.
    fn rank_mask(&self) -> u16 {
        self.0
            .into_iter()
            .fold(0, |acc, card| acc | u16::from(card.rank()))
    }
    /// Which ranks are present in one suit.
    fn suit_mask(&self, suit: Suit) -> u16 {
        self.0
            .into_iter()
            .filter(|card| card.suit() == suit)
            .fold(0, |acc, card| acc | u16::from(card.rank()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranking(cards: &str) -> Ranking {
        Evaluator::from(Hand::try_from(cards).unwrap()).find_ranking()
    }

    #[test]
    fn high_card() {
        assert_eq!(ranking("As Kh Qd Jc 9s"), Ranking::HighCard(Rank::Ace));
    }

    #[test]
    fn one_pair() {
        assert_eq!(ranking("As Ah Kd Qc Js"), Ranking::OnePair(Rank::Ace));
    }

    #[test]
    fn two_pair() {
        assert_eq!(
            ranking("As Ah Kd Kc Qs"),
            Ranking::TwoPair(Rank::Ace, Rank::King)
        );
    }

    #[test]
    fn three_oak() {
        assert_eq!(ranking("As Ah Ad Kc Qs"), Ranking::ThreeOAK(Rank::Ace));
    }

    #[test]
    fn straight() {
        assert_eq!(ranking("Ts Jh Qd Kc As"), Ranking::Straight(Rank::Ace));
    }

    #[test]
    fn flush() {
        assert_eq!(ranking("As Ks Qs Js 9s"), Ranking::Flush(Rank::Ace));
    }

    #[test]
    fn full_house() {
        assert_eq!(
            ranking("As Ah Ad Kc Ks"),
            Ranking::FullHouse(Rank::Ace, Rank::King)
        );
    }

    #[test]
    fn full_house_pair_above_trips() {
        assert_eq!(
            ranking("As Ah Kd Kc Kh"),
            Ranking::FullHouse(Rank::King, Rank::Ace)
        );
    }

    #[test]
    fn four_oak() {
        assert_eq!(ranking("As Ah Ad Ac Ks"), Ranking::FourOAK(Rank::Ace));
    }

    #[test]
    fn straight_flush() {
        assert_eq!(ranking("Ts Js Qs Ks As"), Ranking::StraightFlush(Rank::Ace));
    }

    #[test]
    fn wheel_straight() {
        assert_eq!(ranking("As 2h 3d 4c 5s"), Ranking::Straight(Rank::Five));
    }

    #[test]
    fn wheel_straight_flush() {
        assert_eq!(ranking("As 2s 3s 4s 5s"), Ranking::StraightFlush(Rank::Five));
    }

    #[test]
    fn seven_card_hand() {
        assert_eq!(
            ranking("As Ah Kd Kc Qs Jh 9d"),
            Ranking::TwoPair(Rank::Ace, Rank::King)
        );
    }

    #[test]
    fn flush_vs_straight() {
        assert_eq!(ranking("4h 6h 7h 8h 9h Ts"), Ranking::Flush(Rank::Nine));
    }

    #[test]
    fn full_house_vs_flush() {
        assert_eq!(
            ranking("As Ah Ad Ks Kh Qs Js"),
            Ranking::FullHouse(Rank::Ace, Rank::King)
        );
    }

    #[test]
    fn two_three_oak() {
        assert_eq!(
            ranking("As Ah Ad Kc Ks Kh Qd"),
            Ranking::FullHouse(Rank::Ace, Rank::King)
        );
    }

    #[test]
    fn four_oak_vs_full_house() {
        assert_eq!(ranking("As Ah Ad Ac Ks Kh Qd"), Ranking::FourOAK(Rank::Ace));
    }

    #[test]
    fn straight_flush_vs_four_oak() {
        assert_eq!(
            ranking("Ts Js Qs Ks As Ah Ad"),
            Ranking::StraightFlush(Rank::Ace)
        );
    }

    #[test]
    fn low_straight_prefers_high_end() {
        assert_eq!(ranking("As 2s 3h 4d 5c 6s"), Ranking::Straight(Rank::Six));
    }

    #[test]
    fn three_pair_takes_top_two() {
        assert_eq!(
            ranking("As Ah Kd Kc Qs Qh Jd"),
            Ranking::TwoPair(Rank::Ace, Rank::King)
        );
    }

    #[test]
    fn kickers_skip_made_ranks() {
        let hand = Hand::try_from("As Ah Kd Qc Js 9h 2d").unwrap();
        let evaluator = Evaluator::from(hand);
        let value = evaluator.find_ranking();
        let kicks = evaluator.find_kickers(value);
        assert_eq!(value, Ranking::OnePair(Rank::Ace));
        assert_eq!(kicks.ranks(), vec![Rank::King, Rank::Queen, Rank::Jack]);
    }

    #[test]
    fn flush_kickers_come_from_the_suit() {
        let hand = Hand::try_from("As Ks Qs Js 9s Ah Ad").unwrap();
        let evaluator = Evaluator::from(hand);
        let value = evaluator.find_ranking();
        let kicks = evaluator.find_kickers(value);
        assert_eq!(value, Ranking::Flush(Rank::Ace));
        assert_eq!(
            kicks.ranks(),
            vec![Rank::King, Rank::Queen, Rank::Jack, Rank::Nine]
        );
    }

    #[test]
    fn flush_kickers_trim_to_best_five() {
        let hand = Hand::try_from("As Ks Qs Js 9s 2s").unwrap();
        let evaluator = Evaluator::from(hand);
        let kicks = evaluator.find_kickers(evaluator.find_ranking());
        assert_eq!(
            kicks.ranks(),
            vec![Rank::King, Rank::Queen, Rank::Jack, Rank::Nine]
        );
    }
}
