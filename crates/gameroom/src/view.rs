use rvb_cards::Card;
use rvb_cards::Hole;
use rvb_core::Chips;
use rvb_core::ID;
use rvb_core::Position;
use rvb_core::User;
use rvb_gameplay::Phase;
use rvb_gameplay::PositionName;
use rvb_gameplay::Role;
use rvb_gameplay::Status;

/// One seat as everyone may see it. No hole cards here, ever.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SeatView {
    pub seat: Position,
    pub user: ID<User>,
    pub stack: Chips,
    pub stake: Chips,
    pub spent: Chips,
    pub status: Status,
    pub role: Role,
    pub acted: bool,
    pub position: String,
}

/// The public projection of a table for one viewer.
///
/// Everything is shared state except `hole`, which is the viewer's own
/// cards and nothing else; other players' cards surface only through
/// showdown events. `seq` ties the projection to the event stream so a
/// reconnecting consumer can line them up.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Projection {
    pub seq: u64,
    pub hand: u64,
    pub phase: Phase,
    pub pot: Chips,
    pub bet: Chips,
    pub min_raise: Chips,
    pub sblind: Chips,
    pub bblind: Chips,
    pub dealer: Position,
    pub board: Vec<Card>,
    pub turn: Option<Position>,
    pub deadline_ms: Option<u64>,
    pub seats: Vec<SeatView>,
    pub hole: Option<Hole>,
}

impl Projection {
    /// Builds the projection of a game for one viewer.
    pub fn of(
        game: &rvb_gameplay::Game,
        seq: u64,
        deadline_ms: Option<u64>,
        viewer: ID<User>,
    ) -> Self {
        let n = game.seats().len().max(1);
        let seats = game
            .seats()
            .iter()
            .enumerate()
            .map(|(i, s)| SeatView {
                seat: i,
                user: s.user(),
                stack: s.stack(),
                stake: s.stake(),
                spent: s.spent(),
                status: s.status(),
                role: s.role(),
                acted: s.acted(),
                position: PositionName::from_seat(i, game.dealer(), n).to_string(),
            })
            .collect();
        let hole = game
            .position_of(viewer)
            .and_then(|p| game.seats()[p].hole());
        let (sblind, bblind) = game.blinds();
        Self {
            seq,
            hand: game.hand_number(),
            phase: game.phase(),
            pot: game.pot(),
            bet: game.current_bet(),
            min_raise: game.min_raise(),
            sblind,
            bblind,
            dealer: game.dealer(),
            board: game.board().cards(),
            turn: game.turn(),
            deadline_ms,
            seats,
            hole,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rvb_cards::Deck;
    use rvb_core::MAX_SEATS;
    use rvb_gameplay::Game;

    #[test]
    fn viewers_see_only_their_own_cards() {
        let mut game = Game::new(MAX_SEATS, 10, 20);
        let alice = ID::default();
        let bob = ID::default();
        let lurker = ID::default();
        game.join(alice, 1000).unwrap();
        game.join(bob, 1000).unwrap();
        game.open_hand(Deck::stacked(vec![])).unwrap();
        let for_alice = Projection::of(&game, 5, None, alice);
        let for_bob = Projection::of(&game, 5, None, bob);
        let for_lurker = Projection::of(&game, 5, None, lurker);
        assert_eq!(for_alice.hole, game.seats()[0].hole());
        assert_eq!(for_bob.hole, game.seats()[1].hole());
        assert_eq!(for_lurker.hole, None);
        // the public half is identical for everyone
        assert_eq!(for_alice.seats, for_bob.seats);
        assert_eq!(for_alice.pot, 30);
        assert_eq!(for_alice.seats[0].position, "BTN");
        assert_eq!(for_alice.seats[1].position, "BB");
    }
}
