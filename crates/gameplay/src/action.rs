use rvb_core::Chips;

/// A player's betting decision.
///
/// Chip-carrying variants record the amounts the table actually moved, so a
/// replayed action sequence reconstructs the hand exactly:
///
/// - `Call(n)` / `Shove(n)` / `Blind(n)` carry the chips moved from stack
///   to street commitment.
/// - `Raise(n)` carries the raise-to total: the seat's street commitment
///   after the raise, not the increment.
#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq, Ord, PartialOrd, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "chips", rename_all = "snake_case")]
pub enum Action {
    Fold,
    Check,
    Call(Chips),
    Raise(Chips),
    Shove(Chips),
    Blind(Chips),
}

impl Action {
    /// True if this is a raise or shove (aggressive action).
    pub fn is_aggro(&self) -> bool {
        matches!(self, Action::Raise(_) | Action::Shove(_))
    }
    /// True if this is an all-in bet.
    pub fn is_shove(&self) -> bool {
        matches!(self, Action::Shove(_))
    }
    /// True if this is a blind post.
    pub fn is_blind(&self) -> bool {
        matches!(self, Action::Blind(_))
    }
    /// True if this is a fold or check (no chips added).
    pub fn is_passive(&self) -> bool {
        matches!(self, Action::Fold | Action::Check)
    }
    /// Extracts the chip amount from betting actions.
    pub fn amount(&self) -> Option<Chips> {
        match *self {
            Action::Call(amount)
            | Action::Raise(amount)
            | Action::Shove(amount)
            | Action::Blind(amount) => Some(amount),
            _ => None,
        }
    }
    pub fn label(&self) -> &'static str {
        match self {
            Action::Fold => "Fold",
            Action::Check => "Check",
            Action::Call(_) => "Call",
            Action::Raise(_) => "Raise",
            Action::Shove(_) => "Shove",
            Action::Blind(_) => "Blind",
        }
    }
}

impl TryFrom<&str> for Action {
    type Error = &'static str;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let parts: Vec<&str> = s.split_whitespace().collect();
        match parts.first().map(|p| p.to_uppercase()).as_deref() {
            Some("CHECK") => Ok(Action::Check),
            Some("FOLD") => Ok(Action::Fold),
            Some("CALL") => parts
                .get(1)
                .and_then(|n| n.parse().ok())
                .map(Action::Call)
                .ok_or("invalid call amount"),
            Some("RAISE") => parts
                .get(1)
                .and_then(|n| n.parse().ok())
                .map(Action::Raise)
                .ok_or("invalid raise amount"),
            Some("SHOVE") => parts
                .get(1)
                .and_then(|n| n.parse().ok())
                .map(Action::Shove)
                .ok_or("invalid shove amount"),
            Some("BLIND") => parts
                .get(1)
                .and_then(|n| n.parse().ok())
                .map(Action::Blind)
                .ok_or("invalid blind amount"),
            _ => Err("invalid action type"),
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Action::Fold => write!(f, "FOLD"),
            Action::Check => write!(f, "CHECK"),
            Action::Call(amount) => write!(f, "CALL  {}", amount),
            Action::Blind(amount) => write!(f, "BLIND {}", amount),
            Action::Raise(amount) => write!(f, "RAISE {}", amount),
            Action::Shove(amount) => write!(f, "SHOVE {}", amount),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed() {
        assert_eq!(Action::try_from("fold"), Ok(Action::Fold));
        assert_eq!(Action::try_from("check"), Ok(Action::Check));
        assert_eq!(Action::try_from("call 10"), Ok(Action::Call(10)));
        assert_eq!(Action::try_from("RAISE 60"), Ok(Action::Raise(60)));
    }

    #[test]
    fn rejects_malformed() {
        assert!(Action::try_from("call").is_err());
        assert!(Action::try_from("raise abc").is_err());
        assert!(Action::try_from("jump 5").is_err());
        assert!(Action::try_from("").is_err());
    }

    #[test]
    fn roundtrips_display() {
        for action in [Action::Fold, Action::Check, Action::Call(5), Action::Raise(40)] {
            assert_eq!(Action::try_from(action.to_string().as_str()), Ok(action));
        }
    }
}
