use super::event::Record;
use super::room::Table;
use super::snapshot::Snapshot;
use rvb_core::ID;
use std::collections::HashMap;
use std::sync::Mutex;

/// Durable storage boundary for tables.
///
/// The dispatcher is write-ahead: a mutating command is acknowledged only
/// after its records land here. Schema is the implementor's concern; a
/// database-backed journal implements this same trait.
#[async_trait::async_trait]
pub trait Journal: Send + Sync {
    /// Appends records for a table. Must be atomic per call.
    async fn append(&self, table: ID<Table>, records: &[Record]) -> anyhow::Result<()>;
    /// All records with `seq` strictly greater than `since`, in order.
    async fn since(&self, table: ID<Table>, since: u64) -> anyhow::Result<Vec<Record>>;
    /// Stores the latest snapshot, replacing any previous one.
    async fn put_snapshot(&self, table: ID<Table>, snapshot: &Snapshot) -> anyhow::Result<()>;
    /// The latest snapshot, if any.
    async fn get_snapshot(&self, table: ID<Table>) -> anyhow::Result<Option<Snapshot>>;
}

/// In-process journal keeping everything in a map.
///
/// The reference implementation for tests and single-node deployments;
/// replay never truncates, so `since` can always fill a subscriber gap.
#[derive(Default)]
pub struct MemoryJournal {
    inner: Mutex<HashMap<ID<Table>, (Vec<Record>, Option<Snapshot>)>>,
}

impl MemoryJournal {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn len(&self, table: ID<Table>) -> usize {
        self.inner
            .lock()
            .expect("journal lock")
            .get(&table)
            .map(|(records, _)| records.len())
            .unwrap_or(0)
    }
}

#[async_trait::async_trait]
impl Journal for MemoryJournal {
    async fn append(&self, table: ID<Table>, records: &[Record]) -> anyhow::Result<()> {
        let mut inner = self.inner.lock().expect("journal lock");
        let (log, _) = inner.entry(table).or_default();
        if let (Some(last), Some(first)) = (log.last(), records.first()) {
            anyhow::ensure!(
                first.seq > last.seq,
                "non-monotonic append: {} after {}",
                first.seq,
                last.seq
            );
        }
        log.extend_from_slice(records);
        Ok(())
    }
    async fn since(&self, table: ID<Table>, since: u64) -> anyhow::Result<Vec<Record>> {
        let inner = self.inner.lock().expect("journal lock");
        Ok(inner
            .get(&table)
            .map(|(log, _)| log.iter().filter(|r| r.seq > since).cloned().collect())
            .unwrap_or_default())
    }
    async fn put_snapshot(&self, table: ID<Table>, snapshot: &Snapshot) -> anyhow::Result<()> {
        let mut inner = self.inner.lock().expect("journal lock");
        inner.entry(table).or_default().1 = Some(snapshot.clone());
        Ok(())
    }
    async fn get_snapshot(&self, table: ID<Table>) -> anyhow::Result<Option<Snapshot>> {
        let inner = self.inner.lock().expect("journal lock");
        Ok(inner.get(&table).and_then(|(_, snap)| snap.clone()))
    }
}
