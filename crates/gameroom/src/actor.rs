use super::*;
use rvb_core::ID;
use rvb_core::User;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::mpsc::unbounded_channel;
use tokio::sync::oneshot;

/// A request into a table's mailbox, with its reply channel.
pub enum Call {
    Submit {
        cmd: Command,
        reply: oneshot::Sender<Result<u64, TableError>>,
    },
    Subscribe {
        user: ID<User>,
        since: Option<u64>,
        reply: oneshot::Sender<Result<UnboundedReceiver<Record>, TableError>>,
    },
    View {
        user: ID<User>,
        reply: oneshot::Sender<Projection>,
    },
    Close {
        reply: oneshot::Sender<()>,
    },
}

/// The actor driving one table.
///
/// Exactly one command applies at a time: the loop interleaves mailbox
/// calls with the turn deadline and nothing else, so a handler always sees
/// a consistent state from start to finish and no intra-table locks exist.
/// Commands are applied in reception order; the timer only fires while the
/// mailbox is quiet, never mid-command.
pub struct Desk {
    room: Room,
    mailbox: UnboundedReceiver<Call>,
}

impl Desk {
    /// Spawns the table actor, returning its mailbox handle.
    pub fn open(room: Room) -> UnboundedSender<Call> {
        let (tx, rx) = unbounded_channel();
        let desk = Self { room, mailbox: rx };
        tokio::spawn(desk.run());
        tx
    }
    async fn run(mut self) {
        let id = self.room.id();
        log::debug!("[desk {}] serving", id);
        loop {
            tokio::select! {
                biased;
                call = self.mailbox.recv() => match call {
                    Some(Call::Submit { cmd, reply }) => {
                        let _ = reply.send(self.room.execute(cmd).await);
                    }
                    Some(Call::Subscribe { user, since, reply }) => {
                        let _ = reply.send(self.room.subscribe(user, since).await);
                    }
                    Some(Call::View { user, reply }) => {
                        let _ = reply.send(self.room.project(user));
                    }
                    Some(Call::Close { reply }) => {
                        self.room.close().await;
                        let _ = reply.send(());
                        break;
                    }
                    None => {
                        self.room.close().await;
                        break;
                    }
                },
                _ = Self::alarm(&self.room) => {
                    if let Err(e) = self.room.expire().await {
                        log::warn!("[desk {}] expiry failed: {}", id, e);
                    }
                }
            }
        }
        log::debug!("[desk {}] retired", id);
    }
    /// Resolves at the armed turn deadline; pends forever when no turn is
    /// on the clock.
    async fn alarm(room: &Room) {
        match room.alarm_at() {
            Some(at) => tokio::time::sleep_until(at).await,
            None => std::future::pending().await,
        }
    }
}
