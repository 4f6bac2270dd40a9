use super::error::TableError;
use rvb_core::Chips;
use rvb_core::ID;
use rvb_core::User;

/// A player decision as it arrives over the wire.
///
/// Amounts are separate: only `Raise` carries one, and the table computes
/// the chips actually moved for calls and shoves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Move {
    Fold,
    Check,
    Call,
    Raise,
    AllIn,
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Move::Fold => write!(f, "fold"),
            Move::Check => write!(f, "check"),
            Move::Call => write!(f, "call"),
            Move::Raise => write!(f, "raise"),
            Move::AllIn => write!(f, "allin"),
        }
    }
}

/// The commands a table accepts.
///
/// Transport adapters translate whatever they speak (HTTP, WebSocket, CLI)
/// into exactly these; there is no second path into the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    Join { user: ID<User>, buyin: Chips },
    Leave { user: ID<User> },
    Start { user: ID<User> },
    Act { user: ID<User>, play: Move, amount: Option<Chips> },
}

impl Command {
    /// The submitting user, for unicast rejections.
    pub fn user(&self) -> ID<User> {
        match self {
            Command::Join { user, .. }
            | Command::Leave { user }
            | Command::Start { user }
            | Command::Act { user, .. } => *user,
        }
    }
    /// Structural validation at the dispatcher boundary.
    ///
    /// An amount is required and positive exactly when the move is a raise;
    /// anything else is malformed before it ever reaches the controller.
    pub fn validate(&self) -> Result<(), TableError> {
        match self {
            Command::Join { buyin, .. } if *buyin <= 0 => {
                Err(TableError::OutOfRange("buy-in must be positive".into()))
            }
            Command::Act {
                play: Move::Raise,
                amount: None,
                ..
            } => Err(TableError::Malformed("raise requires an amount".into())),
            Command::Act {
                play: Move::Raise,
                amount: Some(n),
                ..
            } if *n <= 0 => Err(TableError::OutOfRange("raise must be positive".into())),
            Command::Act {
                play,
                amount: Some(_),
                ..
            } if !matches!(play, Move::Raise) => Err(TableError::Malformed(format!(
                "{} takes no amount",
                play
            ))),
            _ => Ok(()),
        }
    }
}

/// Parses a client action string ("raise 60") into a move and amount.
pub fn decode(s: &str) -> Result<(Move, Option<Chips>), TableError> {
    let parts: Vec<&str> = s.split_whitespace().collect();
    let play = match parts.first().map(|p| p.to_lowercase()).as_deref() {
        Some("fold") => Move::Fold,
        Some("check") => Move::Check,
        Some("call") => Move::Call,
        Some("raise") => Move::Raise,
        Some("allin") | Some("all-in") => Move::AllIn,
        _ => return Err(TableError::Malformed(format!("unknown action: {}", s))),
    };
    let amount = match parts.get(1) {
        None => None,
        Some(n) => Some(
            n.parse::<Chips>()
                .map_err(|_| TableError::Malformed(format!("bad amount: {}", n)))?,
        ),
    };
    Ok((play, amount))
}
