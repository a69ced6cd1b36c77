//! A dump of one game room's stored records.
//!
//! The store hands over three flat record streams plus the participant list;
//! this module groups them per player and decodes them into typed inputs.

use crate::error::SessionError;
use crate::leaderboard::{Leaderboard, Participant, PlayerRecords};
use crate::records::{parse_allocations, Allocation, EventOccurrence, RawAllocation, RawReserve, Reserve};
use crate::scoring::ScoreCalculator;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionDump {
    #[serde(default)]
    pub room_id: Option<String>,
    #[serde(default)]
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub allocations: Vec<RawAllocation>,
    #[serde(default)]
    pub reserves: Vec<RawReserve>,
    #[serde(default)]
    pub events: Vec<EventOccurrence>,
}

impl SessionDump {
    pub fn from_json(json: &str) -> Result<Self, SessionError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SessionError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&json)
    }

    /// Listed participants first, then anyone who only shows up in the
    /// allocation or reserve streams, in first-seen order. Each id appears
    /// once; a repeated listing keeps the first entry.
    pub fn participants(&self) -> Vec<Participant> {
        let mut seen = HashSet::new();
        let mut participants = Vec::with_capacity(self.participants.len());
        for participant in &self.participants {
            if seen.insert(participant.id.as_str()) {
                participants.push(participant.clone());
            } else {
                tracing::warn!(id = %participant.id, "ignoring duplicate participant");
            }
        }

        let unlisted = self
            .allocations
            .iter()
            .filter_map(|raw| raw.user_id.as_deref())
            .chain(self.reserves.iter().filter_map(|raw| raw.user_id.as_deref()));

        for id in unlisted {
            if !id.is_empty() && seen.insert(id) {
                participants.push(Participant::new(id, id));
            }
        }
        participants
    }

    /// Typed inputs for every participant.
    pub fn player_records(&self) -> Vec<PlayerRecords> {
        let mut allocations: HashMap<String, Vec<Allocation>> = HashMap::new();
        for allocation in parse_allocations(&self.allocations) {
            allocations
                .entry(allocation.player_id.clone())
                .or_default()
                .push(allocation);
        }

        let reserves = self.reserves_by_player();

        self.participants()
            .into_iter()
            .map(|participant| {
                let events = self
                    .events
                    .iter()
                    .filter(|occurrence| occurrence.affects(&participant.id))
                    .cloned()
                    .collect();
                PlayerRecords {
                    allocations: allocations.remove(&participant.id).unwrap_or_default(),
                    reserve: reserves.get(&participant.id).cloned(),
                    events,
                    participant,
                }
            })
            .collect()
    }

    /// Score and rank everyone in the room.
    pub fn leaderboard(&self, calculator: &ScoreCalculator<'_>) -> Leaderboard {
        Leaderboard::build(calculator, self.player_records())
    }

    fn reserves_by_player(&self) -> HashMap<String, Reserve> {
        let mut reserves = HashMap::new();
        for raw in &self.reserves {
            let reserve = Reserve::from_raw(raw);
            if reserves.contains_key(&reserve.player_id) {
                tracing::warn!(user_id = %reserve.player_id, "ignoring duplicate reserve");
                continue;
            }
            reserves.insert(reserve.player_id.clone(), reserve);
        }
        reserves
    }
}
