use rvb_core::ID;
use rvb_gameroom::Call;
use rvb_gameroom::Table;
use tokio::sync::mpsc::UnboundedSender;

/// Handle to a running table's mailbox.
///
/// Cloned out of the registry per operation; a closed channel means the
/// actor retired and the caller gets `TableClosed`.
#[derive(Clone)]
pub struct Handle {
    pub id: ID<Table>,
    pub desk: UnboundedSender<Call>,
}

impl Handle {
    pub fn new(id: ID<Table>, desk: UnboundedSender<Call>) -> Self {
        Self { id, desk }
    }
    /// True while the table actor is still serving.
    pub fn is_open(&self) -> bool {
        !self.desk.is_closed()
    }
}
