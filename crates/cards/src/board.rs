use super::card::Card;
use super::hand::Hand;
use super::street::Street;

/// The face-up community cards.
///
/// Grows monotonically through the hand: empty preflop, three at the flop,
/// then one more at the turn and river. A reveal may only take the board to
/// the next legal size; nothing already showing ever changes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Board(Hand);

impl Board {
    /// A bare table before any cards are dealt.
    pub const fn empty() -> Self {
        Self(Hand::empty())
    }
    /// Turns the next street's cards face up.
    pub fn reveal(&mut self, cards: Hand) {
        let grown = Hand::or(self.0, cards);
        debug_assert!(
            grown.size() == self.street().next().n_board(),
            "board must grow street by street"
        );
        self.0 = grown;
    }
    /// Sweeps the board for the next hand.
    pub fn clear(&mut self) {
        *self = Self::empty();
    }
    /// Number of community cards showing.
    pub fn size(&self) -> usize {
        self.0.size()
    }
    /// The street this board size corresponds to.
    pub fn street(&self) -> Street {
        Street::from(self.size())
    }
    /// The face-up cards, lowest index first.
    pub fn cards(&self) -> Vec<Card> {
        Vec::<Card>::from(self.0)
    }
}

impl From<Board> for Hand {
    fn from(board: Board) -> Self {
        board.0
    }
}
impl From<Hand> for Board {
    fn from(hand: Hand) -> Self {
        debug_assert!(matches!(hand.size(), 0 | 3 | 4 | 5), "not a board size");
        Self(hand)
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
