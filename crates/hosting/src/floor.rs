use super::handle::Handle;
use rvb_core::Chips;
use rvb_core::ID;
use rvb_core::MAX_SEATS;
use rvb_core::MIN_SEATS;
use rvb_core::Position;
use rvb_core::User;
use rvb_gameroom::Call;
use rvb_gameroom::Command;
use rvb_gameroom::Desk;
use rvb_gameroom::Journal;
use rvb_gameroom::Projection;
use rvb_gameroom::Record;
use rvb_gameroom::Room;
use rvb_gameroom::Table;
use rvb_gameroom::TableError;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::oneshot;

/// Manages active tables and their lifecycles.
///
/// The registry is accessed only via coarse insert/lookup/remove; the lock
/// is never held across command execution. Everything else happens inside
/// the per-table actor.
pub struct Floor {
    journal: Arc<dyn Journal>,
    tables: RwLock<HashMap<ID<Table>, Handle>>,
}

impl Floor {
    pub fn new(journal: Arc<dyn Journal>) -> Self {
        Self {
            journal,
            tables: RwLock::new(HashMap::new()),
        }
    }
    /// Opens a new table and spawns its actor.
    pub async fn create(
        &self,
        owner: ID<User>,
        limit: usize,
        sblind: Chips,
        bblind: Chips,
        auto_start: bool,
    ) -> Result<ID<Table>, TableError> {
        if !(MIN_SEATS..=MAX_SEATS).contains(&limit) {
            return Err(TableError::OutOfRange(format!(
                "tables seat {} to {} players",
                MIN_SEATS, MAX_SEATS
            )));
        }
        if sblind <= 0 || bblind < sblind {
            return Err(TableError::OutOfRange(
                "blinds must be positive and ordered".into(),
            ));
        }
        let id = ID::default();
        let mut room = Room::new(
            id,
            owner,
            limit,
            sblind,
            bblind,
            auto_start,
            self.journal.clone(),
        );
        room.inaugurate().await?;
        let desk = Desk::open(room);
        self.tables.write().await.insert(id, Handle::new(id, desk));
        log::info!("[floor] table {} opened", id);
        Ok(id)
    }
    /// Rehydrates a table from its latest durable snapshot.
    pub async fn reopen(&self, id: ID<Table>) -> Result<(), TableError> {
        let snapshot = self
            .journal
            .get_snapshot(id)
            .await
            .map_err(|_| TableError::StorageUnavailable)?
            .ok_or(TableError::TableClosed)?;
        let room = Room::restore(id, snapshot, self.journal.clone());
        let desk = Desk::open(room);
        self.tables.write().await.insert(id, Handle::new(id, desk));
        log::info!("[floor] table {} reopened", id);
        Ok(())
    }
    /// Submits a command to a table. Accepted commands are totally ordered
    /// per table; the ack carries the last sequence number they produced.
    pub async fn submit(&self, id: ID<Table>, cmd: Command) -> Result<u64, TableError> {
        let desk = self.lookup(id).await?;
        let (reply, rx) = oneshot::channel();
        desk.send(Call::Submit { cmd, reply })
            .map_err(|_| TableError::TableClosed)?;
        rx.await.map_err(|_| TableError::TableClosed)?
    }
    /// Opens an event stream on a table, resuming after `since`.
    pub async fn subscribe(
        &self,
        id: ID<Table>,
        user: ID<User>,
        since: Option<u64>,
    ) -> Result<UnboundedReceiver<Record>, TableError> {
        let desk = self.lookup(id).await?;
        let (reply, rx) = oneshot::channel();
        desk.send(Call::Subscribe { user, since, reply })
            .map_err(|_| TableError::TableClosed)?;
        rx.await.map_err(|_| TableError::TableClosed)?
    }
    /// The current public projection of a table for one viewer.
    pub async fn view(&self, id: ID<Table>, user: ID<User>) -> Result<Projection, TableError> {
        let desk = self.lookup(id).await?;
        let (reply, rx) = oneshot::channel();
        desk.send(Call::View { user, reply })
            .map_err(|_| TableError::TableClosed)?;
        rx.await.map_err(|_| TableError::TableClosed)
    }
    /// Closes a table and removes it from the registry.
    pub async fn close(&self, id: ID<Table>) -> Result<(), TableError> {
        let handle = self
            .tables
            .write()
            .await
            .remove(&id)
            .ok_or(TableError::TableClosed)?;
        let (reply, rx) = oneshot::channel();
        if handle.desk.send(Call::Close { reply }).is_ok() {
            let _ = rx.await;
        }
        log::info!("[floor] table {} closed", id);
        Ok(())
    }
    /// Tables currently open.
    pub async fn occupancy(&self) -> usize {
        self.tables.read().await.len()
    }
    async fn lookup(
        &self,
        id: ID<Table>,
    ) -> Result<tokio::sync::mpsc::UnboundedSender<Call>, TableError> {
        self.tables
            .read()
            .await
            .get(&id)
            .map(|handle| handle.desk.clone())
            .ok_or(TableError::TableClosed)
    }
}

/// Convenience for building action commands at the transport boundary.
pub fn act(user: ID<User>, play: rvb_gameroom::Move, amount: Option<Chips>) -> Command {
    Command::Act { user, play, amount }
}

/// Convenience for seat lookups in adapters.
pub fn seat_of(projection: &Projection, user: ID<User>) -> Option<Position> {
    projection
        .seats
        .iter()
        .find(|s| s.user == user)
        .map(|s| s.seat)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rvb_gameroom::Event;
    use rvb_gameroom::MemoryJournal;
    use rvb_gameroom::Move;
    use rvb_gameplay::Phase;

    fn floor() -> Floor {
        Floor::new(Arc::new(MemoryJournal::new()))
    }

    #[tokio::test]
    async fn create_validates_ranges() {
        let floor = floor();
        let owner = ID::default();
        assert!(matches!(
            floor.create(owner, 1, 10, 20, false).await,
            Err(TableError::OutOfRange(_))
        ));
        assert!(matches!(
            floor.create(owner, 10, 10, 20, false).await,
            Err(TableError::OutOfRange(_))
        ));
        assert!(matches!(
            floor.create(owner, 6, 20, 10, false).await,
            Err(TableError::OutOfRange(_))
        ));
        assert!(floor.create(owner, 6, 10, 20, false).await.is_ok());
        assert_eq!(floor.occupancy().await, 1);
    }

    #[tokio::test]
    async fn tables_run_independently() {
        let floor = floor();
        let alice = ID::default();
        let bob = ID::default();
        let t1 = floor.create(alice, 6, 10, 20, false).await.unwrap();
        let t2 = floor.create(bob, 6, 10, 20, false).await.unwrap();
        floor
            .submit(t1, Command::Join { user: alice, buyin: 1000 })
            .await
            .unwrap();
        floor
            .submit(t2, Command::Join { user: bob, buyin: 5000 })
            .await
            .unwrap();
        let v1 = floor.view(t1, alice).await.unwrap();
        let v2 = floor.view(t2, bob).await.unwrap();
        assert_eq!(v1.seats.len(), 1);
        assert_eq!(v2.seats.len(), 1);
        assert_eq!(v2.seats[0].stack, 5000);
    }

    #[tokio::test]
    async fn full_hand_through_the_floor() {
        let floor = floor();
        let alice = ID::default();
        let bob = ID::default();
        let table = floor.create(alice, 6, 10, 20, false).await.unwrap();
        floor
            .submit(table, Command::Join { user: alice, buyin: 1000 })
            .await
            .unwrap();
        floor
            .submit(table, Command::Join { user: bob, buyin: 1000 })
            .await
            .unwrap();
        let mut stream = floor.subscribe(table, bob, Some(0)).await.unwrap();
        floor
            .submit(table, Command::Start { user: alice })
            .await
            .unwrap();
        floor
            .submit(table, act(alice, Move::Fold, None))
            .await
            .unwrap();
        let view = floor.view(table, bob).await.unwrap();
        assert_eq!(view.phase, Phase::Complete);
        assert_eq!(view.seats[1].stack, 1010);
        // the subscriber saw the whole hand, own cards included
        let mut kinds = Vec::new();
        while let Ok(record) = stream.try_recv() {
            kinds.push(record.event);
        }
        assert!(kinds.iter().any(|e| matches!(e, Event::HandStarted { .. })));
        assert!(kinds.iter().any(|e| matches!(e, Event::HoleCardsDealt { seat: 1, .. })));
        assert!(!kinds.iter().any(|e| matches!(e, Event::HoleCardsDealt { seat: 0, .. })));
        assert!(kinds.iter().any(|e| matches!(e, Event::HandComplete { .. })));
    }

    #[tokio::test]
    async fn close_then_submit_is_table_closed() {
        let floor = floor();
        let owner = ID::default();
        let table = floor.create(owner, 6, 10, 20, false).await.unwrap();
        floor.close(table).await.unwrap();
        assert_eq!(floor.occupancy().await, 0);
        let result = floor
            .submit(table, Command::Join { user: owner, buyin: 1000 })
            .await;
        assert_eq!(result, Err(TableError::TableClosed));
        assert_eq!(floor.close(table).await, Err(TableError::TableClosed));
    }

    #[tokio::test]
    async fn reopen_restores_from_snapshot() {
        let journal = Arc::new(MemoryJournal::new());
        let floor = Floor::new(journal.clone() as Arc<dyn Journal>);
        let alice = ID::default();
        let bob = ID::default();
        let table = floor.create(alice, 6, 10, 20, false).await.unwrap();
        floor
            .submit(table, Command::Join { user: alice, buyin: 1000 })
            .await
            .unwrap();
        floor
            .submit(table, Command::Join { user: bob, buyin: 1000 })
            .await
            .unwrap();
        floor
            .submit(table, Command::Start { user: alice })
            .await
            .unwrap();
        floor
            .submit(table, act(alice, Move::Fold, None))
            .await
            .unwrap();
        let before = floor.view(table, alice).await.unwrap();
        floor.close(table).await.unwrap();
        floor.reopen(table).await.unwrap();
        let after = floor.view(table, alice).await.unwrap();
        assert_eq!(after.seats, before.seats);
        assert_eq!(after.hand, before.hand);
        assert_eq!(after.phase, Phase::Complete);
    }
}
