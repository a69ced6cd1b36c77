//! Session-wide ranking by Final Destiny.

use crate::records::{Allocation, EventOccurrence, Reserve};
use crate::scoring::{ScoreCalculator, ScoreReport};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Someone who played in the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    #[serde(default)]
    pub display_name: String,
    /// Contact identifier, usually an email address.
    #[serde(default, alias = "email")]
    pub contact: String,
}

impl Participant {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            contact: String::new(),
        }
    }

    pub fn with_contact(mut self, contact: impl Into<String>) -> Self {
        self.contact = contact.into();
        self
    }
}

/// Everything needed to score one participant.
#[derive(Debug, Clone)]
pub struct PlayerRecords {
    pub participant: Participant,
    pub allocations: Vec<Allocation>,
    pub reserve: Option<Reserve>,
    pub events: Vec<EventOccurrence>,
}

/// A scored participant and their position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedPlayer {
    /// 1-based; every position gets its own rank.
    pub rank: usize,
    pub participant: Participant,
    pub report: ScoreReport,
}

/// All participants of a session, best first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Leaderboard {
    entries: Vec<RankedPlayer>,
}

impl Leaderboard {
    /// Score every participant independently and rank them.
    pub fn build(calculator: &ScoreCalculator<'_>, players: Vec<PlayerRecords>) -> Self {
        let mut scored: Vec<(Participant, ScoreReport)> = players
            .into_iter()
            .map(|records| {
                let report = calculator.calculate(
                    &records.allocations,
                    records.reserve.as_ref(),
                    &records.events,
                );
                (records.participant, report)
            })
            .collect();

        scored.sort_by(|a, b| compare_standing(&a.0, &a.1, &b.0, &b.1));

        let entries: Vec<RankedPlayer> = scored
            .into_iter()
            .enumerate()
            .map(|(position, (participant, report))| RankedPlayer {
                rank: position + 1,
                participant,
                report,
            })
            .collect();

        tracing::info!(
            players = entries.len(),
            leader = entries.first().map(|e| e.participant.id.as_str()).unwrap_or("-"),
            "built leaderboard"
        );

        Self { entries }
    }

    pub fn entries(&self) -> &[RankedPlayer] {
        &self.entries
    }

    pub fn get(&self, player_id: &str) -> Option<&RankedPlayer> {
        self.entries
            .iter()
            .find(|entry| entry.participant.id == player_id)
    }

    pub fn rank_of(&self, player_id: &str) -> Option<usize> {
        self.get(player_id).map(|entry| entry.rank)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Final Destiny descending, then Balance Index descending, then id ascending.
fn compare_standing(
    a_player: &Participant,
    a: &ScoreReport,
    b_player: &Participant,
    b: &ScoreReport,
) -> Ordering {
    b.final_destiny
        .total_cmp(&a.final_destiny)
        .then(b.balance_index.total_cmp(&a.balance_index))
        .then_with(|| a_player.id.cmp(&b_player.id))
}
