use super::*;
use rvb_cards::*;
use rvb_core::*;

/// The authoritative state of one poker table.
///
/// `Game` owns everything a hand needs: the seat ring, the shuffled deck,
/// the board, the pot, and the betting bookkeeping. Commands arrive through
/// [`join`](Self::join), [`leave`](Self::leave), [`open_hand`](Self::open_hand),
/// and [`act`](Self::act); each either mutates and reports what happened as
/// [`Transition`]s, or rejects with a [`Rejection`] leaving state untouched.
///
/// Round completion, street dealing, fold-outs, all-in runouts, and showdown
/// are internal: a single accepted action can cascade through all of them.
///
/// # Fields
///
/// - `bet` — The street's matching target (highest stake)
/// - `min_raise` — The increment a re-raise must add, never below the big blind
/// - `turn` — The seat holding the action, if betting is underway
/// - `aggressor` — Last seat to bet or raise this hand, for showdown order
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Game {
    seats: Vec<Seat>,
    dealer: Position,
    phase: Phase,
    board: Board,
    deck: Deck,
    pot: Chips,
    bet: Chips,
    min_raise: Chips,
    turn: Option<Position>,
    aggressor: Option<Position>,
    hand: u64,
    limit: usize,
    sblind: Chips,
    bblind: Chips,
    corrupt: bool,
}

impl Game {
    pub fn new(limit: usize, sblind: Chips, bblind: Chips) -> Self {
        debug_assert!((MIN_SEATS..=MAX_SEATS).contains(&limit));
        debug_assert!(sblind > 0 && bblind >= sblind);
        Self {
            seats: Vec::new(),
            dealer: 0,
            phase: Phase::Lobby,
            board: Board::empty(),
            deck: Deck::stacked(vec![]),
            pot: 0,
            bet: 0,
            min_raise: bblind,
            turn: None,
            aggressor: None,
            hand: 0,
            limit,
            sblind,
            bblind,
            corrupt: false,
        }
    }
}

/// Public state accessors.
impl Game {
    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }
    pub fn board(&self) -> Board {
        self.board
    }
    pub fn pot(&self) -> Chips {
        self.pot
    }
    pub fn current_bet(&self) -> Chips {
        self.bet
    }
    pub fn min_raise(&self) -> Chips {
        self.min_raise
    }
    pub fn turn(&self) -> Option<Position> {
        self.turn
    }
    pub fn dealer(&self) -> Position {
        self.dealer
    }
    pub fn hand_number(&self) -> u64 {
        self.hand
    }
    pub fn blinds(&self) -> (Chips, Chips) {
        (self.sblind, self.bblind)
    }
    pub fn limit(&self) -> usize {
        self.limit
    }
    pub fn is_corrupt(&self) -> bool {
        self.corrupt
    }
    /// The seat held by a user, if any.
    pub fn position_of(&self, user: ID<User>) -> Option<Position> {
        self.seats.iter().position(|s| s.user() == user)
    }
    /// Total chips at the table, pot included. Constant across a hand.
    pub fn chips_in_play(&self) -> Chips {
        self.pot + self.seats.iter().map(|s| s.stack()).sum::<Chips>()
    }
    /// The action a timed-out seat is deemed to take.
    pub fn forfeit(&self, pos: Position) -> Action {
        if self.seats[pos].stake() == self.bet {
            Action::Check
        } else {
            Action::Fold
        }
    }
}

/// Seating.
impl Game {
    /// Takes the next open seat. Mid-hand joiners sit out until the next deal.
    pub fn join(&mut self, user: ID<User>, buyin: Chips) -> Result<Position, Rejection> {
        self.ensure_intact()?;
        if self.seats.iter().any(|s| s.user() == user) {
            return Err(Rejection::AlreadySeated);
        }
        if self.seats.len() >= self.limit {
            return Err(Rejection::TableFull);
        }
        let minimum = self.bblind * MIN_BUYIN_BBS;
        if buyin < minimum {
            return Err(Rejection::ShortBuyIn { minimum });
        }
        let pos = self.seats.len();
        let mut seat = Seat::from((user, buyin));
        if self.phase.is_live() {
            seat.set_status(Status::SittingOut);
        }
        self.seats.push(seat);
        log::debug!("[game] P{} joined with {}", pos, buyin);
        Ok(pos)
    }
    /// Releases a seat. During a hand the seat folds (if it still could act)
    /// and is held until the hand completes so positions stay stable; an
    /// all-in seat stays live for the pots it already funded.
    pub fn leave(&mut self, user: ID<User>) -> Result<Vec<Transition>, Rejection> {
        self.ensure_intact()?;
        let pos = self.position_of(user).ok_or(Rejection::NotSeated)?;
        if !self.phase.is_live() {
            let seat = self.seats.remove(pos);
            if self.dealer > pos {
                self.dealer -= 1;
            }
            self.dealer = match self.seats.len() {
                0 => 0,
                n => self.dealer % n,
            };
            return Ok(vec![Transition::Released {
                seat: pos,
                user: seat.user(),
            }]);
        }
        self.seats[pos].set_parting();
        if !self.seats[pos].is_active() {
            return Ok(vec![]);
        }
        let acting = self.turn == Some(pos);
        self.seats[pos].set_status(Status::Folded);
        let mut out = Vec::new();
        if acting {
            out.push(Transition::Acted {
                seat: pos,
                action: Action::Fold,
                pot: self.pot,
                bet: self.bet,
            });
            self.audit()?;
            self.resolve(pos, &mut out)?;
        } else {
            self.audit()?;
            // the action stays where it was unless this fold ends the hand
            if self.n_contesting() == 1 {
                self.bestow(&mut out)?;
            }
        }
        Ok(out)
    }
}

/// Hand lifecycle.
impl Game {
    /// Opens a hand with a deck shuffled from the given rng.
    pub fn open_hand_with<R: rand::Rng>(&mut self, rng: &mut R) -> Result<Vec<Transition>, Rejection> {
        self.open_hand(Deck::shuffled(rng))
    }
    /// Opens a hand dealing from the given deck: rotates the button, posts
    /// blinds, deals hole cards two at a time around the ring, and puts the
    /// action on the first seat left of the big blind.
    pub fn open_hand(&mut self, deck: Deck) -> Result<Vec<Transition>, Rejection> {
        self.ensure_intact()?;
        if !self.phase.is_idle() {
            return Err(Rejection::HandInProgress);
        }
        if self.seats.iter().filter(|s| s.stack() > 0).count() < MIN_SEATS {
            return Err(Rejection::TooFewPlayers);
        }
        for seat in self.seats.iter_mut() {
            seat.reset_hand();
        }
        let field: Vec<Position> = (0..self.seats.len())
            .filter(|p| self.seats[*p].is_playing())
            .collect();
        self.dealer = match self.hand {
            0 => field[0],
            _ => self.scan(self.dealer, |s| s.is_playing()).expect("two seats"),
        };
        self.hand += 1;
        self.deck = deck;
        self.board.clear();
        self.pot = 0;
        self.bet = 0;
        self.min_raise = self.bblind;
        self.aggressor = None;
        let mut out = vec![Transition::Started {
            hand: self.hand,
            dealer: self.dealer,
            field: field.clone(),
            stacks: self.seats.iter().map(|s| s.stack()).collect(),
        }];
        let (sb, bb) = self.blind_seats(&field);
        self.seats[self.dealer].set_role(Role::Dealer);
        if sb != self.dealer {
            self.seats[sb].set_role(Role::SmallBlind);
        }
        self.seats[bb].set_role(Role::BigBlind);
        self.post(sb, self.sblind, &mut out);
        self.post(bb, self.bblind, &mut out);
        self.deal_holes(&field, &mut out)?;
        self.bet = self.bblind;
        self.phase = Phase::PreFlop;
        self.audit()?;
        self.resolve(bb, &mut out)?;
        Ok(out)
    }
    /// Applies one player action, then whatever it cascades into: turn
    /// change, street deal, fold-out, runout, or showdown.
    pub fn act(&mut self, pos: Position, action: Action) -> Result<Vec<Transition>, Rejection> {
        self.ensure_intact()?;
        if pos >= self.seats.len() {
            return Err(Rejection::NotSeated);
        }
        let turn = match self.phase.is_live() {
            true => self.turn,
            false => None,
        }
        .ok_or(Rejection::NoHand)?;
        if turn != pos {
            return Err(Rejection::NotYourTurn);
        }
        let seat = &self.seats[pos];
        if !seat.is_active() {
            return Err(Rejection::Ineligible);
        }
        match action {
            Action::Check if seat.stake() != self.bet => return Err(Rejection::CannotCheck),
            Action::Call(_) if self.bet <= seat.stake() => return Err(Rejection::NothingToCall),
            Action::Call(_) if seat.stack() == 0 => return Err(Rejection::EmptyStack),
            Action::Raise(_) if seat.acted() => return Err(Rejection::BettingClosed),
            Action::Raise(to) if to > seat.stake() + seat.stack() => {
                return Err(Rejection::OverStack {
                    maximum: seat.stake() + seat.stack(),
                });
            }
            Action::Raise(to) if to < self.bet + self.min_raise => {
                return Err(Rejection::ShortRaise {
                    minimum: self.bet + self.min_raise,
                });
            }
            Action::Shove(_) if seat.stack() == 0 => return Err(Rejection::EmptyStack),
            Action::Blind(_) => return Err(Rejection::Ineligible),
            _ => {}
        }
        let normalized = self.apply(pos, action);
        self.seats[pos].set_acted(true);
        let mut out = vec![Transition::Acted {
            seat: pos,
            action: normalized,
            pot: self.pot,
            bet: self.bet,
        }];
        self.audit()?;
        self.resolve(pos, &mut out)?;
        Ok(out)
    }
}

/// Action application. Validation already happened; these only mutate.
impl Game {
    fn apply(&mut self, pos: Position, action: Action) -> Action {
        match action {
            Action::Fold => {
                self.seats[pos].set_status(Status::Folded);
                Action::Fold
            }
            Action::Check => Action::Check,
            Action::Call(_) => {
                let owed = self.bet - self.seats[pos].stake();
                let chips = owed.min(self.seats[pos].stack());
                self.wager(pos, chips);
                Action::Call(chips)
            }
            Action::Raise(to) => {
                let chips = to - self.seats[pos].stake();
                self.wager(pos, chips);
                self.min_raise = to - self.bet;
                self.bet = to;
                self.aggressor = Some(pos);
                self.reopen(pos);
                Action::Raise(to)
            }
            Action::Shove(_) => {
                let chips = self.seats[pos].stack();
                let to = self.seats[pos].stake() + chips;
                self.wager(pos, chips);
                if to > self.bet {
                    // a full-increment shove reopens betting; a short one
                    // only moves the matching target
                    if to - self.bet >= self.min_raise {
                        self.min_raise = to - self.bet;
                        self.reopen(pos);
                    }
                    self.bet = to;
                    self.aggressor = Some(pos);
                }
                Action::Shove(chips)
            }
            Action::Blind(_) => unreachable!("blinds are posted by the table"),
        }
    }
    fn wager(&mut self, pos: Position, chips: Chips) {
        self.seats[pos].bet(chips);
        self.pot += chips;
    }
    fn post(&mut self, pos: Position, blind: Chips, out: &mut Vec<Transition>) {
        let chips = blind.min(self.seats[pos].stack());
        self.wager(pos, chips);
        out.push(Transition::Posted {
            seat: pos,
            amount: chips,
        });
    }
    /// Everyone else must act again at the new bet level.
    fn reopen(&mut self, except: Position) {
        for (i, seat) in self.seats.iter_mut().enumerate() {
            if i != except && seat.status() == Status::Active {
                seat.set_acted(false);
            }
        }
    }
    fn deal_holes(&mut self, field: &[Position], out: &mut Vec<Transition>) -> Result<(), Rejection> {
        let order: Vec<Position> = self
            .ring(self.dealer)
            .filter(|p| field.contains(p))
            .collect();
        let mut first = Vec::with_capacity(order.len());
        for _ in order.iter() {
            first.push(self.deck.draw_one().map_err(|e| self.misdeal(e))?);
        }
        for (i, &p) in order.iter().enumerate() {
            let second = self.deck.draw_one().map_err(|e| self.misdeal(e))?;
            let hole = Hole::from((first[i], second));
            self.seats[p].deal(hole);
            out.push(Transition::Dealt { seat: p, hole });
        }
        Ok(())
    }
}

/// Turn and round advancement.
impl Game {
    /// Decides what follows an accepted action (or the blinds): pass the
    /// action along, close the round, or end the hand.
    fn resolve(&mut self, from: Position, out: &mut Vec<Transition>) -> Result<(), Rejection> {
        if self.n_contesting() == 1 {
            return self.bestow(out);
        }
        if !self.playable() {
            return self.close_round(out);
        }
        let bet = self.bet;
        match self.scan(from, |s| s.is_active() && (!s.acted() || s.stake() < bet)) {
            Some(next) => {
                self.turn = Some(next);
                out.push(Transition::Turn { seat: next });
                Ok(())
            }
            None => self.close_round(out),
        }
    }
    /// Deals the next street, or runs the board out to showdown when no
    /// further betting is possible.
    fn close_round(&mut self, out: &mut Vec<Transition>) -> Result<(), Rejection> {
        self.turn = None;
        loop {
            let street = match self.phase {
                Phase::PreFlop => Street::Flop,
                Phase::Flop => Street::Turn,
                Phase::Turn => Street::Rive,
                Phase::River => return self.showdown(out),
                _ => unreachable!("no round to close in {}", self.phase),
            };
            self.deal_street(street, out)?;
            if self.playable() {
                let first = self.scan(self.dealer, |s| s.is_active()).expect("playable");
                self.turn = Some(first);
                out.push(Transition::Turn { seat: first });
                return Ok(());
            }
        }
    }
    fn deal_street(&mut self, street: Street, out: &mut Vec<Transition>) -> Result<(), Rejection> {
        self.deck.burn().map_err(|e| self.misdeal(e))?;
        let cards = self
            .deck
            .draw(street.n_revealed())
            .map_err(|e| self.misdeal(e))?;
        self.board.reveal(Hand::from(cards.clone()));
        for seat in self.seats.iter_mut() {
            seat.reset_round();
        }
        self.bet = 0;
        self.min_raise = self.bblind;
        self.phase = Phase::from(street);
        out.push(Transition::Street { street, cards });
        self.audit()
    }
    /// True while a wager could still change the outcome: two seats can act,
    /// or a lone active seat still owes chips to the pot.
    fn playable(&self) -> bool {
        let actives: Vec<Position> = (0..self.seats.len())
            .filter(|p| self.seats[*p].is_active())
            .collect();
        match actives.as_slice() {
            [] => false,
            [lone] => self.seats[*lone].stake() < self.bet,
            _ => true,
        }
    }
}

/// Hand resolution.
impl Game {
    /// Everyone else folded: the last seat standing takes the pot unseen.
    fn bestow(&mut self, out: &mut Vec<Transition>) -> Result<(), Rejection> {
        let winner = (0..self.seats.len())
            .find(|p| self.seats[*p].is_contesting())
            .expect("a seat remains");
        let amount = self.pot;
        self.seats[winner].win(amount);
        self.pot = 0;
        self.turn = None;
        out.push(Transition::Won {
            seat: winner,
            amount,
        });
        self.conclude(out);
        Ok(())
    }
    /// Reveals the remaining hands, layers the pot, and pays the winners.
    fn showdown(&mut self, out: &mut Vec<Transition>) -> Result<(), Rejection> {
        self.phase = Phase::Showdown;
        self.turn = None;
        let n = self.seats.len();
        let board = Hand::from(self.board);
        let eligible: Vec<Position> = (0..n)
            .filter(|p| self.seats[*p].is_contesting())
            .collect();
        let mut strengths: Vec<Option<Strength>> = vec![None; n];
        for &p in eligible.iter() {
            let hole = self.seats[p].hole().expect("contesting seats hold cards");
            let seven = Hand::or(Hand::from(hole), board);
            strengths[p] = match Strength::evaluate(seven) {
                Ok(strength) => Some(strength),
                Err(e) => return Err(self.denounce(e.to_string())),
            };
        }
        let spent: Vec<Chips> = self.seats.iter().map(|s| s.spent()).collect();
        let pots = Pots::layer(&spent, &eligible);
        if pots.total() != self.pot {
            return Err(self.denounce(format!(
                "layered pots {} != pot {}",
                pots.total(),
                self.pot
            )));
        }
        let payouts = pots.settle(n, self.dealer, |p| strengths[p]);
        if payouts.iter().sum::<Chips>() != self.pot {
            return Err(self.denounce("payouts do not conserve the pot".to_string()));
        }
        let start = self.aggressor.unwrap_or((self.dealer + 1) % n);
        let reveals = (0..n)
            .map(|i| (start + i) % n)
            .filter(|p| eligible.contains(p))
            .map(|p| {
                let strength = strengths[p].expect("eligible seats were evaluated");
                Reveal {
                    seat: p,
                    hole: self.seats[p].hole().expect("eligible"),
                    strength,
                    description: strength.describe(),
                }
            })
            .collect();
        for (p, amount) in payouts.iter().copied().enumerate() {
            self.seats[p].win(amount);
        }
        self.pot = 0;
        let payouts = payouts
            .into_iter()
            .enumerate()
            .filter(|(_, amount)| *amount > 0)
            .map(|(seat, amount)| Payout { seat, amount })
            .collect();
        out.push(Transition::Showdown {
            reveals,
            pots,
            payouts,
        });
        self.conclude(out);
        Ok(())
    }
    /// Marks the hand complete and frees any seats whose players left.
    fn conclude(&mut self, out: &mut Vec<Transition>) {
        self.phase = Phase::Complete;
        out.push(Transition::Complete);
        let mut p = 0;
        while p < self.seats.len() {
            if self.seats[p].is_parting() {
                let seat = self.seats.remove(p);
                out.push(Transition::Released {
                    seat: p,
                    user: seat.user(),
                });
                if self.dealer > p {
                    self.dealer -= 1;
                }
            } else {
                p += 1;
            }
        }
        self.dealer = match self.seats.len() {
            0 => 0,
            n => self.dealer % n,
        };
    }
}

/// Ring arithmetic.
impl Game {
    fn ring(&self, from: Position) -> impl Iterator<Item = Position> {
        let n = self.seats.len();
        (1..=n).map(move |i| (from + i) % n)
    }
    fn scan(&self, from: Position, keep: impl Fn(&Seat) -> bool) -> Option<Position> {
        self.ring(from).find(|p| keep(&self.seats[*p]))
    }
    fn blind_seats(&self, field: &[Position]) -> (Position, Position) {
        match field.len() {
            2 => {
                let other = self
                    .scan(self.dealer, |s| s.is_playing())
                    .expect("two seats");
                (self.dealer, other)
            }
            _ => {
                let sb = self
                    .scan(self.dealer, |s| s.is_playing())
                    .expect("blind seat");
                let bb = self.scan(sb, |s| s.is_playing()).expect("blind seat");
                (sb, bb)
            }
        }
    }
    fn n_contesting(&self) -> usize {
        self.seats.iter().filter(|s| s.is_contesting()).count()
    }
}

/// Postcondition checks. Failure quarantines the table.
impl Game {
    fn ensure_intact(&self) -> Result<(), Rejection> {
        match self.corrupt {
            false => Ok(()),
            true => Err(Rejection::Invariant {
                detail: "table is quarantined".to_string(),
            }),
        }
    }
    fn audit(&mut self) -> Result<(), Rejection> {
        if !self.phase.is_live() {
            return Ok(());
        }
        let spent = self.seats.iter().map(|s| s.spent()).sum::<Chips>();
        if self.pot != spent {
            return Err(self.denounce(format!("pot {} != contributions {}", self.pot, spent)));
        }
        let holes = self.seats.iter().filter(|s| s.hole().is_some()).count();
        let accounted =
            self.deck.remaining() + self.board.size() + 2 * holes + self.deck.burned();
        if accounted != 52 {
            return Err(self.denounce(format!("{} cards accounted for", accounted)));
        }
        Ok(())
    }
    fn denounce(&mut self, detail: String) -> Rejection {
        log::error!("[game] invariant violation: {}", detail);
        self.corrupt = true;
        Rejection::Invariant { detail }
    }
    fn misdeal(&mut self, e: DeckError) -> Rejection {
        self.denounce(e.to_string())
    }
}

impl std::fmt::Display for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for seat in self.seats.iter() {
            writeln!(f, "{}", seat)?;
        }
        writeln!(f, "Pot   {}", self.pot)?;
        writeln!(f, "Board {}", self.board)?;
        writeln!(f, "Phase {}", self.phase)?;
        Ok(())
    }
}
