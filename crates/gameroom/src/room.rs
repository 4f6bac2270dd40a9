use super::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rvb_cards::Street;
use rvb_core::*;
use rvb_gameplay::*;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::unbounded_channel;

/// Marker type for table identity.
pub struct Table;

/// Wall-clock now in epoch milliseconds.
pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves forward")
        .as_millis() as u64
}

/// One live table: the imperative shell around the [`Game`] core.
///
/// Owns the sequence counter, the turn timer, the subscriber switchboard,
/// and the journal handle. Every mutating command follows the same path:
/// apply to the game, mint records, append to the journal (write-ahead),
/// then acknowledge and fan out. A persistent storage failure freezes the
/// table; a broken game invariant quarantines it.
pub struct Room {
    id: ID<Table>,
    owner: ID<User>,
    auto_start: bool,
    game: Game,
    seq: u64,
    timer: Timer,
    journal: Arc<dyn Journal>,
    switchboard: Switchboard,
    rng: SmallRng,
    frozen: bool,
}

impl Room {
    pub fn new(
        id: ID<Table>,
        owner: ID<User>,
        limit: usize,
        sblind: Chips,
        bblind: Chips,
        auto_start: bool,
        journal: Arc<dyn Journal>,
    ) -> Self {
        Self {
            id,
            owner,
            auto_start,
            game: Game::new(limit, sblind, bblind),
            seq: 0,
            timer: Timer::with_defaults(),
            journal,
            switchboard: Switchboard::new(),
            rng: SmallRng::from_os_rng(),
            frozen: false,
        }
    }
    /// Rehydrates a table from its latest snapshot. The pending deadline is
    /// resumed as-is: going down and up again buys nobody extra time.
    pub fn restore(id: ID<Table>, snapshot: Snapshot, journal: Arc<dyn Journal>) -> Self {
        let mut room = Self::new(
            id,
            snapshot.owner,
            snapshot.game.limit(),
            snapshot.game.blinds().0,
            snapshot.game.blinds().1,
            snapshot.auto_start,
            journal,
        );
        room.seq = snapshot.seq;
        room.game = snapshot.game;
        if let Some((seat, epoch_ms)) = snapshot.deadline {
            room.timer.resume(seat, epoch_ms, now_ms());
        }
        room
    }
    /// Deterministic shuffles for tests and replays.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }
    pub fn with_timer(mut self, config: TimerConfig) -> Self {
        self.timer = Timer::new(config);
        self
    }
    pub fn id(&self) -> ID<Table> {
        self.id
    }
    pub fn seq(&self) -> u64 {
        self.seq
    }
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }
    /// The armed turn deadline, for the actor's sleep.
    pub fn alarm_at(&self) -> Option<tokio::time::Instant> {
        self.timer.deadline().map(|d| d.at)
    }
}

impl Unique<Table> for Room {
    fn id(&self) -> ID<Table> {
        self.id
    }
}

/// Command application.
impl Room {
    /// Journals the table's birth certificate. Call once before serving.
    pub async fn inaugurate(&mut self) -> Result<u64, TableError> {
        let (sblind, bblind) = self.game.blinds();
        let event = Event::TableCreated {
            owner: self.owner,
            limit: self.game.limit(),
            sblind,
            bblind,
        };
        let now = now_ms();
        let records = self.mint(vec![event], now);
        self.commit(&records).await?;
        self.deliver(&records);
        Ok(self.seq)
    }
    /// Applies one command; the acknowledged sequence number covers every
    /// event the command produced.
    pub async fn execute(&mut self, cmd: Command) -> Result<u64, TableError> {
        if self.frozen {
            return Err(TableError::TableClosed);
        }
        if self.game.is_corrupt() {
            return Err(TableError::Corrupt);
        }
        cmd.validate()?;
        log::debug!("[room {}] executing {:?}", self.id, cmd);
        let now = now_ms();
        let outcome = match cmd {
            Command::Join { user, buyin } => self.game.join(user, buyin).map(|seat| {
                vec![Event::PlayerJoined {
                    seat,
                    user,
                    stack: buyin,
                }]
            }),
            Command::Leave { user } => self
                .game
                .leave(user)
                .map(|transitions| self.events_of(transitions, now)),
            Command::Start { user } => {
                if user != self.owner
                    && !(self.auto_start && self.game.position_of(user).is_some())
                {
                    return Err(TableError::IllegalAction(
                        "not authorized to start the hand".into(),
                    ));
                }
                self.game
                    .open_hand_with(&mut self.rng)
                    .map(|transitions| self.events_of(transitions, now))
            }
            Command::Act { user, play, amount } => {
                let pos = match self.game.position_of(user) {
                    Some(pos) => pos,
                    None => return Err(TableError::IllegalAction("not seated".into())),
                };
                let action = match play {
                    Move::Fold => Action::Fold,
                    Move::Check => Action::Check,
                    Move::Call => Action::Call(0),
                    Move::Raise => Action::Raise(amount.expect("validated")),
                    Move::AllIn => Action::Shove(0),
                };
                self.game
                    .act(pos, action)
                    .map(|transitions| self.events_of(transitions, now))
            }
        };
        match outcome {
            Ok(events) => {
                let records = self.mint(events, now);
                self.commit(&records).await?;
                self.deliver(&records);
                self.retime(&records, now);
                self.checkpoint(&records).await;
                Ok(self.seq)
            }
            Err(rejection) => self.refuse(cmd, rejection, now).await,
        }
    }
    /// The armed deadline fired: synthesize the timed-out seat's action.
    /// Auto-fold is not an error; it emits the same ActionTaken a player
    /// would have.
    pub async fn expire(&mut self) -> Result<(), TableError> {
        let Some(deadline) = self.timer.deadline() else {
            return Ok(());
        };
        self.timer.clear();
        if self.frozen || self.game.is_corrupt() {
            return Ok(());
        }
        if self.game.turn() != Some(deadline.seat) {
            return Ok(());
        }
        let action = self.game.forfeit(deadline.seat);
        log::info!(
            "[room {}] P{} timed out, auto-{}",
            self.id,
            deadline.seat,
            action.label().to_lowercase()
        );
        let now = now_ms();
        match self.game.act(deadline.seat, action) {
            Ok(transitions) => {
                let events = self.events_of(transitions, now);
                let records = self.mint(events, now);
                self.commit(&records).await?;
                self.deliver(&records);
                self.retime(&records, now);
                self.checkpoint(&records).await;
                Ok(())
            }
            Err(rejection) => Err(TableError::from(rejection)),
        }
    }
    /// Announces closure to the journal and all subscribers.
    pub async fn close(&mut self) {
        self.timer.clear();
        let now = now_ms();
        let records = self.mint(vec![Event::TableClosed], now);
        if let Err(e) = self.journal.append(self.id, &records).await {
            log::warn!("[room {}] closing unjournaled: {}", self.id, e);
        }
        self.deliver(&records);
        self.switchboard.clear();
        log::info!("[room {}] closed", self.id);
    }
    /// Turns a rejection into the submitter-only error path: no mutation,
    /// a unicast ActionRejected for action commands, and quarantine
    /// bookkeeping for invariant failures.
    async fn refuse(
        &mut self,
        cmd: Command,
        rejection: Rejection,
        now: u64,
    ) -> Result<u64, TableError> {
        let error = TableError::from(rejection.clone());
        log::debug!("[room {}] refused {:?}: {}", self.id, cmd, error);
        if let Rejection::Invariant { detail } = rejection {
            let records = self.mint(vec![Event::TableQuarantined { detail }], now);
            let _ = self.journal.append(self.id, &records).await;
            self.deliver(&records);
            return Err(error);
        }
        if let Command::Act { user, .. } = cmd {
            let records = self.mint(
                vec![Event::ActionRejected {
                    user,
                    reason: error.to_string(),
                }],
                now,
            );
            self.commit(&records).await?;
            self.deliver(&records);
        }
        Err(error)
    }
}

/// Projections and subscriptions.
impl Room {
    /// The current public state for one viewer: everything shared, plus
    /// only that viewer's hole cards.
    pub fn project(&self, user: ID<User>) -> Projection {
        Projection::of(
            &self.game,
            self.seq,
            self.timer.deadline().map(|d| d.epoch_ms),
            user,
        )
    }
    /// Opens an event stream for a user, replaying the journal from
    /// `since` (or from the latest snapshot when omitted) before going
    /// live. Command serialization guarantees no gap between the two.
    pub async fn subscribe(
        &mut self,
        user: ID<User>,
        since: Option<u64>,
    ) -> Result<UnboundedReceiver<Record>, TableError> {
        let since = match since {
            Some(seq) => seq,
            None => self
                .journal
                .get_snapshot(self.id)
                .await
                .map_err(|_| TableError::StorageUnavailable)?
                .map(|snapshot| snapshot.seq)
                .unwrap_or(0),
        };
        let backlog = self
            .journal
            .since(self.id, since)
            .await
            .map_err(|_| TableError::StorageUnavailable)?;
        let (tx, rx) = unbounded_channel();
        for record in backlog.iter().filter(|r| r.visible_to(user)) {
            let _ = tx.send(record.clone());
        }
        self.switchboard.plug(user, tx);
        log::debug!(
            "[room {}] {} subscribed since {} ({} replayed)",
            self.id,
            user,
            since,
            backlog.len()
        );
        Ok(rx)
    }
    /// Drops a user's subscription; their seat is untouched.
    pub fn unsubscribe(&mut self, user: ID<User>) {
        self.switchboard.unplug(user);
    }
    /// The full durable state: game (deck cursor included), sequence
    /// counter, and pending deadline.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            seq: self.seq,
            owner: self.owner,
            auto_start: self.auto_start,
            game: self.game.clone(),
            deadline: self.timer.deadline().map(|d| (d.seat, d.epoch_ms)),
            at: now_ms(),
        }
    }
}

/// Event plumbing.
impl Room {
    /// Maps controller transitions onto wire events. Fold-out winnings ride
    /// the HandComplete payload; showdowns get their own event first.
    fn events_of(&self, transitions: Vec<Transition>, now: u64) -> Vec<Event> {
        let (sblind, bblind) = self.game.blinds();
        let horizon = now + self.timer.decision_timeout().as_millis() as u64;
        let mut events = Vec::with_capacity(transitions.len());
        let mut payouts: Vec<Payout> = Vec::new();
        for transition in transitions {
            match transition {
                Transition::Started {
                    dealer,
                    field,
                    stacks,
                    ..
                } => events.push(Event::HandStarted {
                    dealer,
                    sblind,
                    bblind,
                    field,
                    stacks,
                }),
                Transition::Posted { seat, amount } => {
                    events.push(Event::BlindPosted { seat, amount })
                }
                Transition::Dealt { seat, hole } => {
                    events.push(Event::HoleCardsDealt { seat, cards: hole })
                }
                Transition::Acted {
                    seat,
                    action,
                    pot,
                    bet,
                } => events.push(Event::ActionTaken {
                    seat,
                    action,
                    pot,
                    bet,
                }),
                Transition::Turn { seat } => events.push(Event::TurnChanged {
                    seat,
                    deadline_ms: horizon,
                }),
                Transition::Street { street, cards } => events.push(match street {
                    Street::Flop => Event::FlopRevealed { cards },
                    Street::Turn => Event::TurnRevealed { card: cards[0] },
                    Street::Rive => Event::RiverRevealed { card: cards[0] },
                    Street::Pref => unreachable!("preflop is never dealt as a street"),
                }),
                Transition::Showdown {
                    reveals,
                    pots,
                    payouts: paid,
                } => {
                    payouts = paid.clone();
                    events.push(Event::Showdown {
                        reveals,
                        pots,
                        payouts: paid,
                    });
                }
                Transition::Won { seat, amount } => {
                    payouts = vec![Payout { seat, amount }];
                }
                Transition::Complete => events.push(Event::HandComplete {
                    payouts: std::mem::take(&mut payouts),
                }),
                Transition::Released { seat, user } => {
                    events.push(Event::PlayerLeft { seat, user })
                }
            }
        }
        events
    }
    /// Stamps events with sequence numbers, the hand counter, and their
    /// recipient (bound to the seat map as of emission).
    fn mint(&mut self, events: Vec<Event>, at: u64) -> Vec<Record> {
        let mut records = Vec::with_capacity(events.len());
        for event in events {
            self.seq += 1;
            let to = event.recipient(|seat| self.game.seats().get(seat).map(|s| s.user()));
            records.push(Record {
                seq: self.seq,
                hand: self.game.hand_number(),
                at,
                to,
                event,
            });
        }
        records
    }
    /// Write-ahead append with bounded retry. Persistent failure freezes
    /// the table; callers see StorageUnavailable now and TableClosed after.
    async fn commit(&mut self, records: &[Record]) -> Result<(), TableError> {
        if records.is_empty() {
            return Ok(());
        }
        for attempt in 1..=STORAGE_RETRIES {
            match self.journal.append(self.id, records).await {
                Ok(()) => return Ok(()),
                Err(e) => log::warn!(
                    "[room {}] append attempt {}/{} failed: {}",
                    self.id,
                    attempt,
                    STORAGE_RETRIES,
                    e
                ),
            }
        }
        log::error!("[room {}] storage unavailable, freezing", self.id);
        self.frozen = true;
        Err(TableError::StorageUnavailable)
    }
    fn deliver(&mut self, records: &[Record]) {
        for record in records {
            self.switchboard.deliver(record);
        }
    }
    /// Re-arms the decision clock from the journaled deadline so the timer
    /// and the TurnChanged event can never disagree.
    fn retime(&mut self, records: &[Record], now: u64) {
        for record in records {
            match record.event {
                Event::TurnChanged { seat, deadline_ms } => {
                    self.timer.resume(seat, deadline_ms, now)
                }
                Event::HandComplete { .. } | Event::TableClosed => self.timer.clear(),
                _ => {}
            }
        }
    }
    /// Durable snapshot after every completed hand.
    async fn checkpoint(&mut self, records: &[Record]) {
        if !records
            .iter()
            .any(|r| matches!(r.event, Event::HandComplete { .. }))
        {
            return;
        }
        let snapshot = self.snapshot();
        match self.journal.put_snapshot(self.id, &snapshot).await {
            Ok(()) => log::debug!("[room {}] snapshot at seq {}", self.id, snapshot.seq),
            Err(e) => {
                log::error!("[room {}] snapshot failed, freezing: {}", self.id, e);
                self.frozen = true;
            }
        }
    }
}
