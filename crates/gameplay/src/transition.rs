use super::action::Action;
use super::pots::Pots;
use rvb_cards::Card;
use rvb_cards::Hole;
use rvb_cards::Street;
use rvb_cards::Strength;
use rvb_core::Chips;
use rvb_core::ID;
use rvb_core::Position;
use rvb_core::User;

/// A contesting seat's cards shown at showdown.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Reveal {
    pub seat: Position,
    pub hole: Hole,
    pub strength: Strength,
    pub description: String,
}

/// Chips moved from the pot to a seat at hand end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Payout {
    pub seat: Position,
    pub amount: Chips,
}

/// What an accepted command did to the table.
///
/// One command can cascade: a call that closes the river round produces
/// `Acted`, then `Showdown`, then `Complete`. The dispatcher maps each
/// transition onto one journal event, so the engine never needs to know
/// about sequence numbers or subscribers.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Transition {
    /// A new hand is underway; stacks are pre-blind.
    Started {
        hand: u64,
        dealer: Position,
        field: Vec<Position>,
        stacks: Vec<Chips>,
    },
    /// A blind was posted.
    Posted { seat: Position, amount: Chips },
    /// Hole cards went to a seat (private).
    Dealt { seat: Position, hole: Hole },
    /// An action was accepted, including synthesized folds and checks.
    Acted {
        seat: Position,
        action: Action,
        pot: Chips,
        bet: Chips,
    },
    /// The action moved to a seat.
    Turn { seat: Position },
    /// Community cards were revealed.
    Street { street: Street, cards: Vec<Card> },
    /// Cards were shown and the pot paid out.
    Showdown {
        reveals: Vec<Reveal>,
        pots: Pots,
        payouts: Vec<Payout>,
    },
    /// Everyone else folded; the pot moved without a showdown.
    Won { seat: Position, amount: Chips },
    /// The hand is over.
    Complete,
    /// A parting seat was released after hand completion.
    Released { seat: Position, user: ID<User> },
}

impl std::fmt::Display for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Started { hand, dealer, .. } => write!(f, "hand #{} (dealer P{})", hand, dealer),
            Self::Posted { seat, amount } => write!(f, "P{} posts {}", seat, amount),
            Self::Dealt { seat, .. } => write!(f, "P{} dealt", seat),
            Self::Acted { seat, action, .. } => write!(f, "P{}: {}", seat, action),
            Self::Turn { seat } => write!(f, "P{} to act", seat),
            Self::Street { street, .. } => write!(f, "{}", street),
            Self::Showdown { payouts, .. } => {
                let s = payouts
                    .iter()
                    .map(|p| format!("P{} wins {}", p.seat, p.amount))
                    .collect::<Vec<String>>()
                    .join(", ");
                write!(f, "showdown: {}", s)
            }
            Self::Won { seat, amount } => write!(f, "P{} wins {} uncontested", seat, amount),
            Self::Complete => write!(f, "hand complete"),
            Self::Released { seat, .. } => write!(f, "P{} released", seat),
        }
    }
}
