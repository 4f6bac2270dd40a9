use rvb_cards::Hole;
use rvb_core::Chips;
use rvb_core::ID;
use rvb_core::User;

/// A player's involvement in the current hand.
///
/// - `Active` — can still make decisions
/// - `Folded` — out of this hand
/// - `AllIn` — no more decisions, but still competing for the pot
/// - `SittingOut` — seated but not dealt in (busted, or leaving)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Active,
    Folded,
    AllIn,
    SittingOut,
}

impl Status {
    /// True if still competing for the pot.
    pub fn is_contesting(&self) -> bool {
        matches!(self, Self::Active | Self::AllIn)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Status::Active => write!(f, "A"),
            Status::Folded => write!(f, "F"),
            Status::AllIn => write!(f, "S"),
            Status::SittingOut => write!(f, "O"),
        }
    }
}

/// Positional obligation for the current hand.
///
/// Exactly one Dealer per hand; in heads-up play the Dealer doubles as
/// SmallBlind and the role reads Dealer.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    None,
    Dealer,
    SmallBlind,
    BigBlind,
}

/// A player's seat at the table.
///
/// Tracks chips, betting status, and hole cards. The `hole` field is private
/// information: projections only reveal it to its owner, and to everyone at
/// showdown.
///
/// # Fields
///
/// - `stack` — Chips behind (not yet committed)
/// - `stake` — Chips committed this betting round
/// - `spent` — Total chips committed this hand
/// - `acted` — Whether this seat has acted at the current bet level
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Seat {
    user: ID<User>,
    stack: Chips,
    stake: Chips,
    spent: Chips,
    status: Status,
    acted: bool,
    role: Role,
    hole: Option<Hole>,
    parting: bool,
}

impl From<(ID<User>, Chips)> for Seat {
    fn from((user, stack): (ID<User>, Chips)) -> Self {
        Self {
            user,
            stack,
            stake: 0,
            spent: 0,
            status: Status::Active,
            acted: false,
            role: Role::None,
            hole: None,
            parting: false,
        }
    }
}

impl Seat {
    pub fn user(&self) -> ID<User> {
        self.user
    }
    /// Chips behind (not committed to pot).
    pub fn stack(&self) -> Chips {
        self.stack
    }
    /// Chips committed this betting round.
    pub fn stake(&self) -> Chips {
        self.stake
    }
    /// Total chips committed this hand.
    pub fn spent(&self) -> Chips {
        self.spent
    }
    pub fn status(&self) -> Status {
        self.status
    }
    /// Whether this seat has acted at the current bet level.
    pub fn acted(&self) -> bool {
        self.acted
    }
    pub fn role(&self) -> Role {
        self.role
    }
    /// Hole cards (private information).
    pub fn hole(&self) -> Option<Hole> {
        self.hole
    }
    /// True if this seat was dealt into the current hand and hasn't folded.
    pub fn is_contesting(&self) -> bool {
        self.hole.is_some() && self.status.is_contesting()
    }
    /// True if this seat can still act this hand.
    pub fn is_active(&self) -> bool {
        self.hole.is_some() && self.status == Status::Active
    }
    /// True if this seat takes cards in the hand being opened.
    pub fn is_playing(&self) -> bool {
        self.status == Status::Active
    }
    /// True if the player asked to leave and the seat frees up at hand end.
    pub fn is_parting(&self) -> bool {
        self.parting
    }
}

/// Hand-lifecycle mutations, called only by the table state machine.
impl Seat {
    /// Commits chips from stack to the pot. Flips to AllIn on the last chip.
    pub fn bet(&mut self, bet: Chips) {
        debug_assert!(bet <= self.stack);
        self.stack -= bet;
        self.stake += bet;
        self.spent += bet;
        if self.stack == 0 {
            self.status = Status::AllIn;
        }
    }
    /// Adds winnings to stack.
    pub fn win(&mut self, win: Chips) {
        self.stack += win;
    }
    pub fn set_status(&mut self, status: Status) {
        self.status = status;
    }
    pub fn set_acted(&mut self, acted: bool) {
        self.acted = acted;
    }
    pub fn set_role(&mut self, role: Role) {
        self.role = role;
    }
    pub fn deal(&mut self, hole: Hole) {
        debug_assert!(self.hole.is_none());
        self.hole = Some(hole);
    }
    pub fn set_parting(&mut self) {
        self.parting = true;
    }
    /// Clears per-round state when a new street begins.
    pub fn reset_round(&mut self) {
        self.stake = 0;
        self.acted = false;
    }
    /// Clears per-hand state when a new hand begins.
    pub fn reset_hand(&mut self) {
        self.stake = 0;
        self.spent = 0;
        self.acted = false;
        self.role = Role::None;
        self.hole = None;
        self.status = if self.stack > 0 {
            Status::Active
        } else {
            Status::SittingOut
        };
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} {:>6} {:>5}", self.status, self.stack, self.stake)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seat(stack: Chips) -> Seat {
        Seat::from((ID::default(), stack))
    }

    #[test]
    fn bet_moves_chips() {
        let mut seat = seat(100);
        seat.bet(30);
        assert_eq!(seat.stack(), 70);
        assert_eq!(seat.stake(), 30);
        assert_eq!(seat.spent(), 30);
        assert_eq!(seat.status(), Status::Active);
    }

    #[test]
    fn last_chip_is_all_in() {
        let mut seat = seat(50);
        seat.bet(50);
        assert_eq!(seat.status(), Status::AllIn);
    }

    #[test]
    fn round_reset_keeps_spent() {
        let mut seat = seat(100);
        seat.bet(30);
        seat.set_acted(true);
        seat.reset_round();
        assert_eq!(seat.stake(), 0);
        assert_eq!(seat.spent(), 30);
        assert!(!seat.acted());
    }

    #[test]
    fn hand_reset_sits_out_busted() {
        let mut seat = seat(50);
        seat.bet(50);
        seat.reset_hand();
        assert_eq!(seat.status(), Status::SittingOut);
        let mut seat = Seat::from((ID::default(), 100));
        seat.bet(50);
        seat.reset_hand();
        assert_eq!(seat.status(), Status::Active);
    }
}
