use rvb_cards::Street;

/// The hand lifecycle for one table.
///
/// Transitions are driven exclusively by the [`Game`] state machine:
/// opening a hand, accepted player actions, and internal round completion.
///
/// ```text
/// Lobby → PreFlop → Flop → Turn → River → Showdown → Complete
///            └────────── fold-out ──────────┘           │
///              Complete ←──────────────────────────────-┘
/// ```
///
/// [`Game`]: super::game::Game
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Phase {
    #[default]
    Lobby,
    PreFlop,
    Flop,
    Turn,
    River,
    Showdown,
    Complete,
}

impl Phase {
    /// The betting street underway, if any.
    pub fn street(&self) -> Option<Street> {
        match self {
            Phase::PreFlop => Some(Street::Pref),
            Phase::Flop => Some(Street::Flop),
            Phase::Turn => Some(Street::Turn),
            Phase::River => Some(Street::Rive),
            _ => None,
        }
    }
    /// True while a hand is being played (cards out, betting possible).
    pub fn is_live(&self) -> bool {
        self.street().is_some()
    }
    /// True when a new hand may be opened.
    pub fn is_idle(&self) -> bool {
        matches!(self, Phase::Lobby | Phase::Complete)
    }
}

impl From<Street> for Phase {
    fn from(street: Street) -> Self {
        match street {
            Street::Pref => Phase::PreFlop,
            Street::Flop => Phase::Flop,
            Street::Turn => Phase::Turn,
            Street::Rive => Phase::River,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Lobby => write!(f, "lobby"),
            Phase::PreFlop => write!(f, "preflop"),
            Phase::Flop => write!(f, "flop"),
            Phase::Turn => write!(f, "turn"),
            Phase::River => write!(f, "river"),
            Phase::Showdown => write!(f, "showdown"),
            Phase::Complete => write!(f, "complete"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn streets_map_to_live_phases() {
        for street in Street::all() {
            assert!(Phase::from(street).is_live());
            assert_eq!(Phase::from(street).street(), Some(street));
        }
    }

    #[test]
    fn idle_phases() {
        assert!(Phase::Lobby.is_idle());
        assert!(Phase::Complete.is_idle());
        assert!(!Phase::Flop.is_idle());
        assert!(!Phase::Showdown.is_idle());
    }
}
