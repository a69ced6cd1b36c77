//! Player archetypes and the ordered rules that pick one.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Categorical label describing a player's overall play pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    Legend,
    TrueWealth,
    SuccessfulUnfulfilled,
    Survivor,
    Balanced,
}

/// Presentation metadata for an archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchetypeInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

impl Archetype {
    pub const ALL: [Archetype; 5] = [
        Archetype::Legend,
        Archetype::TrueWealth,
        Archetype::SuccessfulUnfulfilled,
        Archetype::Survivor,
        Archetype::Balanced,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Archetype::Legend => "legend",
            Archetype::TrueWealth => "true_wealth",
            Archetype::SuccessfulUnfulfilled => "successful_unfulfilled",
            Archetype::Survivor => "survivor",
            Archetype::Balanced => "balanced",
        }
    }

    pub fn info(&self) -> ArchetypeInfo {
        match self {
            Archetype::Legend => ArchetypeInfo {
                name: "Legend",
                description: "Reached near-perfect balance and an outstanding score in every part of life",
                icon: "👑",
            },
            Archetype::TrueWealth => ArchetypeInfo {
                name: "True Wealth",
                description: "Made a positive impact on the community and used resources efficiently",
                icon: "💎",
            },
            Archetype::SuccessfulUnfulfilled => ArchetypeInfo {
                name: "Successful but Unfulfilled",
                description: "Financially rich but short on balance across the rest of life",
                icon: "💼",
            },
            Archetype::Survivor => ArchetypeInfo {
                name: "Survivor",
                description: "Spent most of the reserve early just to get through hard times",
                icon: "🛡️",
            },
            Archetype::Balanced => ArchetypeInfo {
                name: "Balanced",
                description: "Kept life stable and grew steadily",
                icon: "⚖️",
            },
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Archetype {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Archetype::ALL
            .iter()
            .copied()
            .find(|archetype| archetype.as_str() == s)
            .ok_or_else(|| format!("unknown archetype: {}", s))
    }
}

/// Everything the classification rules look at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifyInput {
    pub final_destiny: f64,
    pub balance_index: f64,
    pub impact_index: f64,
    pub efficiency_index: f64,
    pub finance_total: i64,
    /// Stored reserve total, if the player has a reserve record at all.
    pub reserve_total: Option<i64>,
    pub allocation_count: usize,
    /// Player-submitted points in rounds up to the survivor cutoff.
    pub early_player_points: i64,
}

pub const LEGEND_MIN_DESTINY: f64 = 85.0;
pub const LEGEND_MIN_BALANCE: f64 = 80.0;
pub const TRUE_WEALTH_MIN_IMPACT: f64 = 75.0;
pub const TRUE_WEALTH_MIN_EFFICIENCY: f64 = 70.0;
pub const UNFULFILLED_MIN_FINANCE: i64 = 1500;
pub const UNFULFILLED_MAX_BALANCE: f64 = 50.0;
pub const SURVIVOR_RESERVE_SHARE: f64 = 0.8;
/// Share base used when the stored reserve total is zero.
pub const SURVIVOR_FALLBACK_RESERVE: i64 = 1000;

/// First matching rule wins.
pub fn classify(input: &ClassifyInput) -> Archetype {
    if input.final_destiny >= LEGEND_MIN_DESTINY && input.balance_index >= LEGEND_MIN_BALANCE {
        return Archetype::Legend;
    }

    if input.impact_index >= TRUE_WEALTH_MIN_IMPACT
        && input.efficiency_index >= TRUE_WEALTH_MIN_EFFICIENCY
    {
        return Archetype::TrueWealth;
    }

    if input.finance_total > UNFULFILLED_MIN_FINANCE && input.balance_index < UNFULFILLED_MAX_BALANCE
    {
        return Archetype::SuccessfulUnfulfilled;
    }

    if let Some(stored_total) = input.reserve_total {
        if input.allocation_count > 0 {
            let base = if stored_total == 0 {
                SURVIVOR_FALLBACK_RESERVE
            } else {
                stored_total
            };
            if input.early_player_points as f64 > base as f64 * SURVIVOR_RESERVE_SHARE {
                return Archetype::Survivor;
            }
        }
    }

    Archetype::Balanced
}

#[cfg(test)]
mod tests {
    use super::*;

    fn baseline() -> ClassifyInput {
        ClassifyInput {
            final_destiny: 50.0,
            balance_index: 60.0,
            impact_index: 20.0,
            efficiency_index: 30.0,
            finance_total: 100,
            reserve_total: None,
            allocation_count: 10,
            early_player_points: 0,
        }
    }

    #[test]
    fn default_is_balanced() {
        assert_eq!(classify(&baseline()), Archetype::Balanced);
    }

    #[test]
    fn legend_beats_true_wealth() {
        let input = ClassifyInput {
            final_destiny: 90.0,
            balance_index: 85.0,
            impact_index: 80.0,
            efficiency_index: 75.0,
            ..baseline()
        };
        assert_eq!(classify(&input), Archetype::Legend);
    }

    #[test]
    fn legend_thresholds_are_inclusive() {
        let input = ClassifyInput {
            final_destiny: 85.0,
            balance_index: 80.0,
            ..baseline()
        };
        assert_eq!(classify(&input), Archetype::Legend);

        let just_short = ClassifyInput {
            balance_index: 79.99,
            ..input
        };
        assert_eq!(classify(&just_short), Archetype::Balanced);
    }

    #[test]
    fn true_wealth_needs_impact_and_efficiency() {
        let input = ClassifyInput {
            impact_index: 75.0,
            efficiency_index: 70.0,
            ..baseline()
        };
        assert_eq!(classify(&input), Archetype::TrueWealth);

        let inefficient = ClassifyInput {
            efficiency_index: 69.99,
            ..input
        };
        assert_eq!(classify(&inefficient), Archetype::Balanced);
    }

    #[test]
    fn unfulfilled_needs_strictly_more_than_1500_finance() {
        let input = ClassifyInput {
            finance_total: 1501,
            balance_index: 10.0,
            ..baseline()
        };
        assert_eq!(classify(&input), Archetype::SuccessfulUnfulfilled);

        let exactly = ClassifyInput {
            finance_total: 1500,
            ..input
        };
        assert_eq!(classify(&exactly), Archetype::Balanced);
    }

    #[test]
    fn survivor_requires_reserve_and_allocations() {
        let input = ClassifyInput {
            reserve_total: Some(1000),
            early_player_points: 801,
            ..baseline()
        };
        assert_eq!(classify(&input), Archetype::Survivor);

        let at_share = ClassifyInput {
            early_player_points: 800,
            ..input
        };
        assert_eq!(classify(&at_share), Archetype::Balanced);

        let no_reserve = ClassifyInput {
            reserve_total: None,
            ..input
        };
        assert_eq!(classify(&no_reserve), Archetype::Balanced);

        let no_allocations = ClassifyInput {
            allocation_count: 0,
            ..input
        };
        assert_eq!(classify(&no_allocations), Archetype::Balanced);
    }

    #[test]
    fn survivor_zero_total_falls_back_to_1000() {
        let input = ClassifyInput {
            reserve_total: Some(0),
            early_player_points: 801,
            ..baseline()
        };
        assert_eq!(classify(&input), Archetype::Survivor);

        let below = ClassifyInput {
            early_player_points: 700,
            ..input
        };
        assert_eq!(classify(&below), Archetype::Balanced);
    }

    #[test]
    fn tags_round_trip() {
        for archetype in Archetype::ALL {
            assert_eq!(archetype.as_str().parse::<Archetype>().unwrap(), archetype);
            assert_eq!(
                serde_json::to_string(&archetype).unwrap(),
                format!("\"{}\"", archetype)
            );
        }
    }
}
