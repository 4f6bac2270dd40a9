use rvb_cards::Card;
use rvb_cards::Hole;
use rvb_core::Chips;
use rvb_core::ID;
use rvb_core::Position;
use rvb_core::User;
use rvb_gameplay::Action;
use rvb_gameplay::Payout;
use rvb_gameplay::Pots;
use rvb_gameplay::Reveal;

/// Events emitted by a table.
///
/// The payload is exhaustive per kind, so consumers and the persistence
/// layer agree on shape. Most events broadcast; `HoleCardsDealt` goes only
/// to the seat's owner and `ActionRejected` only to the submitter. Hole
/// cards otherwise appear only inside `Showdown` reveals.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Event {
    TableCreated {
        owner: ID<User>,
        limit: usize,
        sblind: Chips,
        bblind: Chips,
    },
    PlayerJoined {
        seat: Position,
        user: ID<User>,
        stack: Chips,
    },
    PlayerLeft {
        seat: Position,
        user: ID<User>,
    },
    HandStarted {
        dealer: Position,
        sblind: Chips,
        bblind: Chips,
        field: Vec<Position>,
        stacks: Vec<Chips>,
    },
    HoleCardsDealt {
        seat: Position,
        cards: Hole,
    },
    BlindPosted {
        seat: Position,
        amount: Chips,
    },
    ActionTaken {
        seat: Position,
        action: Action,
        pot: Chips,
        bet: Chips,
    },
    TurnChanged {
        seat: Position,
        deadline_ms: u64,
    },
    FlopRevealed {
        cards: Vec<Card>,
    },
    TurnRevealed {
        card: Card,
    },
    RiverRevealed {
        card: Card,
    },
    Showdown {
        reveals: Vec<Reveal>,
        pots: Pots,
        payouts: Vec<Payout>,
    },
    HandComplete {
        payouts: Vec<Payout>,
    },
    TableClosed,
    /// Diagnostic emitted when a postcondition fails and the table is
    /// quarantined pending operator intervention.
    TableQuarantined {
        detail: String,
    },
    ActionRejected {
        user: ID<User>,
        reason: String,
    },
}

impl Event {
    /// The single user this event is addressed to, if it is not a broadcast.
    pub fn recipient(&self, owner_of: impl Fn(Position) -> Option<ID<User>>) -> Option<ID<User>> {
        match self {
            Event::HoleCardsDealt { seat, .. } => owner_of(*seat),
            Event::ActionRejected { user, .. } => Some(*user),
            _ => None,
        }
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Event::TableCreated { limit, .. } => write!(f, "table created ({} seats)", limit),
            Event::PlayerJoined { seat, stack, .. } => write!(f, "P{} joined ({})", seat, stack),
            Event::PlayerLeft { seat, .. } => write!(f, "P{} left", seat),
            Event::HandStarted { dealer, .. } => write!(f, "hand start (dealer P{})", dealer),
            Event::HoleCardsDealt { seat, cards } => write!(f, "P{} holds {}", seat, cards),
            Event::BlindPosted { seat, amount } => write!(f, "P{} posts {}", seat, amount),
            Event::ActionTaken { seat, action, .. } => write!(f, "P{}: {}", seat, action),
            Event::TurnChanged { seat, .. } => write!(f, "P{} to act", seat),
            Event::FlopRevealed { cards } => write!(
                f,
                "flop: {}",
                cards
                    .iter()
                    .map(|c| c.to_string())
                    .collect::<Vec<String>>()
                    .join(" ")
            ),
            Event::TurnRevealed { card } => write!(f, "turn: {}", card),
            Event::RiverRevealed { card } => write!(f, "river: {}", card),
            Event::Showdown { payouts, .. } => {
                let s = payouts
                    .iter()
                    .map(|p| format!("P{} wins {}", p.seat, p.amount))
                    .collect::<Vec<String>>()
                    .join(", ");
                write!(f, "showdown: {}", s)
            }
            Event::HandComplete { .. } => write!(f, "hand complete"),
            Event::TableClosed => write!(f, "table closed"),
            Event::TableQuarantined { detail } => write!(f, "quarantined: {}", detail),
            Event::ActionRejected { reason, .. } => write!(f, "rejected: {}", reason),
        }
    }
}

/// One journaled table event.
///
/// Sequence numbers strictly increase per table; subscribers dedupe on
/// `seq` since delivery is at-least-once. `hand` is 0 for events outside
/// any hand; `at` is wall-clock epoch milliseconds. `to` pins a private
/// event to its recipient at emission time, so journal replay can never
/// leak hole cards through a reshuffled seat map.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Record {
    pub seq: u64,
    pub hand: u64,
    pub at: u64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub to: Option<ID<User>>,
    pub event: Event,
}

impl Record {
    /// True if this record may be shown to the given user.
    pub fn visible_to(&self, user: ID<User>) -> bool {
        match self.to {
            None => true,
            Some(recipient) => recipient == user,
        }
    }
}

impl Record {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("serialize record")
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "#{} {}", self.seq, self.event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn private_events_have_recipients() {
        let user = ID::default();
        let hole = Event::HoleCardsDealt {
            seat: 2,
            cards: Hole::try_from("As Kd").unwrap(),
        };
        assert_eq!(hole.recipient(|_| Some(user)), Some(user));
        let rejected = Event::ActionRejected {
            user,
            reason: "not your turn".into(),
        };
        assert_eq!(rejected.recipient(|_| None), Some(user));
        let public = Event::TableClosed;
        assert_eq!(public.recipient(|_| Some(user)), None);
    }

    #[test]
    fn records_serialize_with_kind_tags() {
        let record = Record {
            seq: 3,
            hand: 1,
            at: 0,
            to: None,
            event: Event::BlindPosted { seat: 1, amount: 10 },
        };
        let json = record.to_json();
        assert!(json.contains("\"kind\":\"blind_posted\""));
        assert_eq!(serde_json::from_str::<Record>(&json).unwrap(), record);
    }

    #[test]
    fn visibility_follows_the_recipient() {
        let user = ID::default();
        let private = Record {
            seq: 1,
            hand: 1,
            at: 0,
            to: Some(user),
            event: Event::TableClosed,
        };
        assert!(private.visible_to(user));
        assert!(!private.visible_to(ID::default()));
        let public = Record { to: None, ..private };
        assert!(public.visible_to(ID::default()));
    }
}
