//! The ten life factors and a typed per-factor value record.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the ten fixed life dimensions a player allocates points to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    Health,
    Spiritual,
    Intelligence,
    Ai,
    Emotion,
    Career,
    Finance,
    Culture,
    Community,
    Environment,
}

impl Factor {
    /// Every factor, in display order.
    pub const ALL: [Factor; 10] = [
        Factor::Health,
        Factor::Spiritual,
        Factor::Intelligence,
        Factor::Ai,
        Factor::Emotion,
        Factor::Career,
        Factor::Finance,
        Factor::Culture,
        Factor::Community,
        Factor::Environment,
    ];

    /// Key used for this factor in stored records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Factor::Health => "health",
            Factor::Spiritual => "spiritual",
            Factor::Intelligence => "intelligence",
            Factor::Ai => "ai",
            Factor::Emotion => "emotion",
            Factor::Career => "career",
            Factor::Finance => "finance",
            Factor::Culture => "culture",
            Factor::Community => "community",
            Factor::Environment => "environment",
        }
    }

    /// Human readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Factor::Health => "Health",
            Factor::Spiritual => "Spiritual",
            Factor::Intelligence => "Intelligence",
            Factor::Ai => "AI",
            Factor::Emotion => "Emotion",
            Factor::Career => "Career",
            Factor::Finance => "Finance",
            Factor::Culture => "Culture",
            Factor::Community => "Community",
            Factor::Environment => "Environment",
        }
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Factor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Factor::ALL
            .iter()
            .copied()
            .find(|factor| factor.as_str() == s)
            .ok_or_else(|| format!("unknown factor: {}", s))
    }
}

/// Largest magnitude a single stored factor value or event modifier may have.
///
/// Keeps lifetime sums far away from `i64` overflow.
pub const VALUE_LIMIT: i64 = i32::MAX as i64;

/// A signed integer for each factor.
///
/// Used both for the points of a single allocation and for lifetime totals,
/// which can go negative once event penalties are applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactorValues {
    pub health: i64,
    pub spiritual: i64,
    pub intelligence: i64,
    pub ai: i64,
    pub emotion: i64,
    pub career: i64,
    pub finance: i64,
    pub culture: i64,
    pub community: i64,
    pub environment: i64,
}

impl FactorValues {
    /// All factors at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every factor set to the same value.
    pub fn uniform(value: i64) -> Self {
        let mut values = Self::default();
        for factor in Factor::ALL {
            *values.get_mut(factor) = value;
        }
        values
    }

    pub fn get(&self, factor: Factor) -> i64 {
        match factor {
            Factor::Health => self.health,
            Factor::Spiritual => self.spiritual,
            Factor::Intelligence => self.intelligence,
            Factor::Ai => self.ai,
            Factor::Emotion => self.emotion,
            Factor::Career => self.career,
            Factor::Finance => self.finance,
            Factor::Culture => self.culture,
            Factor::Community => self.community,
            Factor::Environment => self.environment,
        }
    }

    pub fn get_mut(&mut self, factor: Factor) -> &mut i64 {
        match factor {
            Factor::Health => &mut self.health,
            Factor::Spiritual => &mut self.spiritual,
            Factor::Intelligence => &mut self.intelligence,
            Factor::Ai => &mut self.ai,
            Factor::Emotion => &mut self.emotion,
            Factor::Career => &mut self.career,
            Factor::Finance => &mut self.finance,
            Factor::Culture => &mut self.culture,
            Factor::Community => &mut self.community,
            Factor::Environment => &mut self.environment,
        }
    }

    /// Add a (possibly negative) delta to one factor.
    pub fn add(&mut self, factor: Factor, delta: i64) {
        *self.get_mut(factor) += delta;
    }

    /// Add every factor of `other` into `self`.
    pub fn merge(&mut self, other: &FactorValues) {
        for factor in Factor::ALL {
            self.add(factor, other.get(factor));
        }
    }

    /// Sum across all ten factors.
    pub fn sum(&self) -> i64 {
        self.iter().map(|(_, value)| value).sum()
    }

    /// `(factor, value)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Factor, i64)> + '_ {
        Factor::ALL
            .into_iter()
            .map(move |factor| (factor, self.get(factor)))
    }
}
