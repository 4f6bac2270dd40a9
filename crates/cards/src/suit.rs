/// One of the four French suits.
///
/// Hold'em never ranks suits against each other; the declared order exists
/// only so displays and iteration stay stable. The discriminant doubles as
/// an index into the per-suit tables below.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Suit {
    #[default]
    C = 0,
    D = 1,
    H = 2,
    S = 3,
}

const LETTERS: [char; 4] = ['c', 'd', 'h', 's'];
const GLYPHS: [char; 4] = ['♣', '♦', '♥', '♠'];

impl Suit {
    /// All four suits in declaration order.
    pub const fn all() -> [Suit; 4] {
        [Suit::C, Suit::D, Suit::H, Suit::S]
    }
    /// Lowercase letter used in card notation ("Ah", "Td").
    pub const fn letter(&self) -> char {
        LETTERS[*self as usize]
    }
    /// Unicode pip for display.
    pub const fn glyph(&self) -> char {
        GLYPHS[*self as usize]
    }
}

/// u8 isomorphism
impl From<u8> for Suit {
    fn from(n: u8) -> Suit {
        debug_assert!(n < 4, "suit index out of range");
        Self::all()[(n & 3) as usize]
    }
}
impl From<Suit> for u8 {
    fn from(suit: Suit) -> u8 {
        suit as u8
    }
}

/// str isomorphism, accepting letters or pips
impl TryFrom<&str> for Suit {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let c = s.trim().chars().next().map(|c| c.to_ascii_lowercase());
        Suit::all()
            .into_iter()
            .find(|suit| c == Some(suit.letter()) || c == Some(suit.glyph()))
            .ok_or_else(|| format!("not a suit: {:?}", s))
    }
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}
