use rvb_core::Chips;

/// Why a command was refused by the table state machine.
///
/// A rejected command never mutates state; the submitter is told why and
/// everyone else sees nothing. `Invariant` is the exception: it reports a
/// broken internal postcondition, after which the table must be quarantined.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Rejection {
    /// Another seat holds the action.
    NotYourTurn,
    /// The seat is folded, all-in, or sitting out.
    Ineligible,
    /// The user holds no seat at this table.
    NotSeated,
    /// The user already holds a seat at this table.
    AlreadySeated,
    /// No seat is open.
    TableFull,
    /// The hand is live and the command needs an idle table.
    HandInProgress,
    /// No hand is live.
    NoHand,
    /// Fewer than two seats can be dealt in.
    TooFewPlayers,
    /// Checking while facing a bet.
    CannotCheck,
    /// Calling with no bet outstanding.
    NothingToCall,
    /// Betting with an empty stack.
    EmptyStack,
    /// Raise below the minimum (permitted only as an all-in).
    ShortRaise { minimum: Chips },
    /// Raise beyond the seat's chips.
    OverStack { maximum: Chips },
    /// Raising after already acting at this bet level (betting not reopened).
    BettingClosed,
    /// Buy-in below the table minimum.
    ShortBuyIn { minimum: Chips },
    /// A postcondition failed; the table state can no longer be trusted.
    Invariant { detail: String },
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotYourTurn => write!(f, "not your turn"),
            Self::Ineligible => write!(f, "seat cannot act in this hand"),
            Self::NotSeated => write!(f, "user is not seated"),
            Self::AlreadySeated => write!(f, "user is already seated"),
            Self::TableFull => write!(f, "table is full"),
            Self::HandInProgress => write!(f, "hand in progress"),
            Self::NoHand => write!(f, "no hand in progress"),
            Self::TooFewPlayers => write!(f, "need two players with chips"),
            Self::CannotCheck => write!(f, "cannot check facing a bet"),
            Self::NothingToCall => write!(f, "no bet to call"),
            Self::EmptyStack => write!(f, "no chips behind"),
            Self::ShortRaise { minimum } => write!(f, "raise must be at least {}", minimum),
            Self::OverStack { maximum } => write!(f, "raise exceeds stack, max {}", maximum),
            Self::BettingClosed => write!(f, "betting is not reopened"),
            Self::ShortBuyIn { minimum } => write!(f, "buy-in must be at least {}", minimum),
            Self::Invariant { detail } => write!(f, "table invariant violated: {}", detail),
        }
    }
}

impl std::error::Error for Rejection {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_reasons() {
        assert_eq!(
            Rejection::ShortRaise { minimum: 40 }.to_string(),
            "raise must be at least 40"
        );
        assert_eq!(Rejection::NotYourTurn.to_string(), "not your turn");
    }
}
