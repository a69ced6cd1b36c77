//! Stored record shapes and their conversion into typed inputs.
//!
//! The backing store keeps allocation values as loosely typed JSON: sometimes
//! an object, sometimes that object serialized into a string. Everything is
//! decoded here so the calculator only ever sees [`FactorValues`].

use crate::error::RecordError;
use crate::factor::{Factor, FactorValues, VALUE_LIMIT};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Who submitted an allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    Player,
    System,
}

impl Provenance {
    /// Only the literal `"player"` marks a player submission.
    pub fn from_wire(choose_by: Option<&str>) -> Self {
        match choose_by {
            Some("player") => Provenance::Player,
            _ => Provenance::System,
        }
    }
}

/// Allocation row as it comes out of the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawAllocation {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    pub round: u32,
    #[serde(default)]
    pub values: Value,
    #[serde(default)]
    pub choose_by: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

/// One player's point distribution for one round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Allocation {
    pub player_id: String,
    pub round: u32,
    pub values: FactorValues,
    pub provenance: Provenance,
}

impl Allocation {
    pub fn new(
        player_id: impl Into<String>,
        round: u32,
        values: FactorValues,
        provenance: Provenance,
    ) -> Self {
        Self {
            player_id: player_id.into(),
            round,
            values,
            provenance,
        }
    }

    pub fn from_raw(raw: &RawAllocation) -> Result<Self, RecordError> {
        Ok(Self {
            player_id: raw.user_id.clone().unwrap_or_default(),
            round: raw.round,
            values: parse_values(&raw.values)?,
            provenance: Provenance::from_wire(raw.choose_by.as_deref()),
        })
    }
}

/// Convert stored allocations, dropping the ones whose values cannot be read.
pub fn parse_allocations(raws: &[RawAllocation]) -> Vec<Allocation> {
    raws.iter()
        .filter_map(|raw| match Allocation::from_raw(raw) {
            Ok(allocation) => Some(allocation),
            Err(err) => {
                tracing::warn!(
                    id = raw.id.as_deref().unwrap_or("-"),
                    user_id = raw.user_id.as_deref().unwrap_or("-"),
                    round = raw.round,
                    error = %err,
                    "skipping malformed allocation"
                );
                None
            }
        })
        .collect()
}

/// Reserve row as it comes out of the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawReserve {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub values: Value,
    #[serde(default)]
    pub total: Option<f64>,
    #[serde(default)]
    pub reflection: Option<String>,
}

/// A player's pre-game endowment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reserve {
    pub player_id: String,
    pub values: FactorValues,
    /// Precomputed total as stored; 0 when the store had none.
    pub total: i64,
    pub reflection: Option<String>,
}

impl Reserve {
    pub fn new(player_id: impl Into<String>, values: FactorValues, total: i64) -> Self {
        Self {
            player_id: player_id.into(),
            values,
            total,
            reflection: None,
        }
    }

    /// Scoring only reads `total`, so an unreadable values payload or total
    /// is logged and zeroed instead of dropping the whole reserve.
    pub fn from_raw(raw: &RawReserve) -> Self {
        let user_id = raw.user_id.as_deref().unwrap_or("-");
        let values = match &raw.values {
            Value::Null => FactorValues::new(),
            payload => parse_values(payload).unwrap_or_else(|err| {
                tracing::warn!(user_id, error = %err, "reserve values unreadable, using zeros");
                FactorValues::new()
            }),
        };
        let total = match raw.total {
            None => 0,
            Some(total) if total.is_finite() && total.abs() <= VALUE_LIMIT as f64 => {
                total.round() as i64
            }
            Some(total) => {
                tracing::warn!(user_id, total, "reserve total out of range, using 0");
                0
            }
        };
        Self {
            player_id: raw.user_id.clone().unwrap_or_default(),
            values,
            total,
            reflection: raw.reflection.clone(),
        }
    }
}

/// A catalog event that hit a player (or the whole room) in some round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventOccurrence {
    pub round: u32,
    #[serde(rename = "event")]
    pub event_id: String,
    /// `None` means the event was applied room-wide.
    #[serde(default, rename = "user_id", skip_serializing_if = "Option::is_none")]
    pub player_id: Option<String>,
}

impl EventOccurrence {
    pub fn new(round: u32, event_id: impl Into<String>) -> Self {
        Self {
            round,
            event_id: event_id.into(),
            player_id: None,
        }
    }

    /// Whether this occurrence applies to the given player.
    pub fn affects(&self, player_id: &str) -> bool {
        self.player_id.as_deref().map_or(true, |id| id == player_id)
    }
}

/// Decode a stored values payload.
///
/// Accepts a JSON object or a string holding a JSON object. Unknown keys are
/// ignored, absent or null factors count as zero, fractional numbers are
/// rounded.
pub fn parse_values(payload: &Value) -> Result<FactorValues, RecordError> {
    match payload {
        Value::Object(map) => values_from_map(map),
        Value::String(encoded) => match serde_json::from_str::<Value>(encoded)? {
            Value::Object(map) => values_from_map(&map),
            _ => Err(RecordError::NotAnObject),
        },
        _ => Err(RecordError::NotAnObject),
    }
}

fn values_from_map(map: &Map<String, Value>) -> Result<FactorValues, RecordError> {
    let mut values = FactorValues::new();
    for factor in Factor::ALL {
        let amount = match map.get(factor.as_str()) {
            None | Some(Value::Null) => 0,
            Some(value) => number_value(factor, value)?,
        };
        *values.get_mut(factor) = amount;
    }
    Ok(values)
}

fn number_value(factor: Factor, value: &Value) -> Result<i64, RecordError> {
    let amount = value.as_f64().ok_or(RecordError::NonNumeric {
        factor: factor.as_str(),
    })?;
    if amount.abs() > VALUE_LIMIT as f64 {
        return Err(RecordError::OutOfRange {
            factor: factor.as_str(),
            value: amount,
        });
    }
    Ok(amount.round() as i64)
}
