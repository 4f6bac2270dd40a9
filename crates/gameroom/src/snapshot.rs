use rvb_core::ID;
use rvb_core::Position;
use rvb_core::User;
use rvb_gameplay::Game;

/// A durable copy of everything a table needs to come back.
///
/// The game state embeds the deck order and cursor, so a restored table
/// resumes dealing mid-hand exactly where it left off. `deadline_ms` is the
/// armed turn deadline as absolute wall-clock epoch milliseconds; restoring
/// never extends it.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Snapshot {
    pub seq: u64,
    pub owner: ID<User>,
    pub auto_start: bool,
    pub game: Game,
    pub deadline: Option<(Position, u64)>,
    pub at: u64,
}
