use super::event::Record;
use rvb_core::ID;
use rvb_core::User;
use std::collections::HashMap;
use tokio::sync::mpsc::UnboundedSender;

/// Per-user event delivery for one table.
///
/// Subscribers hang off unbounded channels so delivery never blocks command
/// application. A send failure means the subscriber hung up; its entry is
/// dropped and a later re-subscribe replays the journal from its last
/// sequence number.
#[derive(Debug, Default)]
pub struct Switchboard {
    lines: HashMap<ID<User>, UnboundedSender<Record>>,
}

impl Switchboard {
    pub fn new() -> Self {
        Self {
            lines: HashMap::new(),
        }
    }
    /// Connects a user, replacing any previous subscription.
    pub fn plug(&mut self, user: ID<User>, line: UnboundedSender<Record>) {
        self.lines.insert(user, line);
    }
    /// Drops a user's subscription.
    pub fn unplug(&mut self, user: ID<User>) {
        self.lines.remove(&user);
    }
    /// Drops every subscription (table shutdown).
    pub fn clear(&mut self) {
        self.lines.clear();
    }
    pub fn connected(&self) -> usize {
        self.lines.len()
    }
    /// Delivers a record: broadcast, or unicast when it has a recipient.
    pub fn deliver(&mut self, record: &Record) {
        match record.to {
            Some(user) => self.unicast(user, record),
            None => self.broadcast(record),
        }
    }
    fn unicast(&mut self, user: ID<User>, record: &Record) {
        log::debug!("[switchboard] unicast {} to {}", record, user);
        if let Some(line) = self.lines.get(&user) {
            if line.send(record.clone()).is_err() {
                log::debug!("[switchboard] {} hung up", user);
                self.lines.remove(&user);
            }
        }
    }
    fn broadcast(&mut self, record: &Record) {
        log::debug!("[switchboard] broadcast {}", record);
        self.lines.retain(|user, line| {
            let alive = line.send(record.clone()).is_ok();
            if !alive {
                log::debug!("[switchboard] {} hung up", user);
            }
            alive
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Event;
    use rvb_cards::Hole;
    use tokio::sync::mpsc::unbounded_channel;

    fn public(event: Event) -> Record {
        Record {
            seq: 1,
            hand: 1,
            at: 0,
            to: None,
            event,
        }
    }

    #[test]
    fn broadcasts_public_events() {
        let mut board = Switchboard::new();
        let (tx_a, mut rx_a) = unbounded_channel();
        let (tx_b, mut rx_b) = unbounded_channel();
        board.plug(ID::default(), tx_a);
        board.plug(ID::default(), tx_b);
        board.deliver(&public(Event::TableClosed));
        assert!(rx_a.try_recv().is_ok());
        assert!(rx_b.try_recv().is_ok());
    }

    #[test]
    fn hole_cards_go_to_their_owner_only() {
        let mut board = Switchboard::new();
        let owner = ID::default();
        let other = ID::default();
        let (tx_a, mut rx_a) = unbounded_channel();
        let (tx_b, mut rx_b) = unbounded_channel();
        board.plug(owner, tx_a);
        board.plug(other, tx_b);
        let record = Record {
            to: Some(owner),
            event: Event::HoleCardsDealt {
                seat: 0,
                cards: Hole::try_from("As Kd").unwrap(),
            },
            ..public(Event::TableClosed)
        };
        board.deliver(&record);
        assert!(rx_a.try_recv().is_ok());
        assert!(rx_b.try_recv().is_err());
    }

    #[test]
    fn hung_up_subscribers_are_dropped() {
        let mut board = Switchboard::new();
        let user = ID::default();
        let (tx, rx) = unbounded_channel();
        drop(rx);
        board.plug(user, tx);
        assert_eq!(board.connected(), 1);
        board.deliver(&public(Event::TableClosed));
        assert_eq!(board.connected(), 0);
    }
}
