use rvb_cards::Strength;
use rvb_core::Chips;
use rvb_core::Position;

/// One layer of the pot with the seats eligible to win it.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Pot {
    pub amount: Chips,
    pub eligible: Vec<Position>,
}

/// Main and side pots constructed from a hand's contribution vector.
///
/// Eligible (non-folded) contribution levels are sorted into distinct
/// thresholds t1 < t2 < … < tk. Layer i collects, from every seat, the
/// chips it committed between t(i-1) and t(i); seats whose total
/// contribution reaches t(i) compete for that layer. Folded seats fund
/// layers but never compete.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Pots(Vec<Pot>);

impl Pots {
    /// Layers the pot from per-seat hand contributions.
    ///
    /// `spent[p]` is what seat p committed over the whole hand; `eligible`
    /// are the non-folded seats.
    pub fn layer(spent: &[Chips], eligible: &[Position]) -> Self {
        let mut thresholds = eligible
            .iter()
            .map(|p| spent[*p])
            .filter(|t| *t > 0)
            .collect::<Vec<Chips>>();
        thresholds.sort_unstable();
        thresholds.dedup();
        let mut pots = Vec::with_capacity(thresholds.len());
        let mut floor = 0;
        for t in thresholds {
            let amount = spent
                .iter()
                .map(|s| s.min(&t) - s.min(&floor))
                .sum::<Chips>();
            let winners = eligible
                .iter()
                .copied()
                .filter(|p| spent[*p] >= t)
                .collect::<Vec<Position>>();
            pots.push(Pot {
                amount,
                eligible: winners,
            });
            floor = t;
        }
        Self(pots)
    }
    /// The layers, main pot first.
    pub fn layers(&self) -> &[Pot] {
        &self.0
    }
    /// Total chips across all layers.
    pub fn total(&self) -> Chips {
        self.0.iter().map(|p| p.amount).sum()
    }
    /// Distributes every layer to its strongest eligible seats.
    ///
    /// `strength` maps contesting seats to evaluated strengths; seats of
    /// equal maximum strength split the layer equally. Remainder chips go
    /// to the winner earliest clockwise from the dealer button, which makes
    /// payouts reproducible. Returns per-seat payouts indexed by position.
    pub fn settle<F>(&self, seats: usize, dealer: Position, strength: F) -> Vec<Chips>
    where
        F: Fn(Position) -> Option<Strength>,
    {
        let mut payouts = vec![0; seats];
        for pot in self.0.iter() {
            let winners = match pot.eligible.len() {
                0 => continue,
                1 => pot.eligible.clone(),
                _ => {
                    let best = pot
                        .eligible
                        .iter()
                        .filter_map(|p| strength(*p))
                        .max()
                        .expect("contested pot has strengths");
                    pot.eligible
                        .iter()
                        .copied()
                        .filter(|p| strength(*p) == Some(best))
                        .collect()
                }
            };
            let share = pot.amount / winners.len() as Chips;
            let bonus = pot.amount % winners.len() as Chips;
            for winner in winners.iter() {
                payouts[*winner] += share;
            }
            if bonus > 0 {
                let first = winners
                    .iter()
                    .copied()
                    .min_by_key(|p| (p + seats - dealer - 1) % seats)
                    .expect("at least one winner");
                payouts[first] += bonus;
            }
        }
        payouts
    }
}
