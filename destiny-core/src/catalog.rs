//! The event catalog: a read-only table of wheel events and their effects.
//!
//! Event selection happens elsewhere; this table only answers "what did event
//! X do to each factor".

use crate::error::CatalogError;
use crate::factor::{Factor, VALUE_LIMIT};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Wheel segment an event belongs to. Display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    BadEvent,
    Opportunity,
    SelfDevelopment,
}

impl EventCategory {
    pub fn label(&self) -> &'static str {
        match self {
            EventCategory::BadEvent => "Bad event",
            EventCategory::Opportunity => "Opportunity",
            EventCategory::SelfDevelopment => "Self development",
        }
    }
}

/// A signed change to one factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Effect {
    pub factor: Factor,
    pub modifier: i64,
}

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDefinition {
    pub id: String,
    pub category: EventCategory,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Age band the event is drawn from.
    #[serde(default)]
    pub min_age: u32,
    #[serde(default)]
    pub max_age: u32,
    pub effects: Vec<Effect>,
}

/// Immutable lookup table of events keyed by id.
#[derive(Debug, Clone, Default)]
pub struct EventCatalog {
    events: Vec<EventDefinition>,
    index: HashMap<String, usize>,
}

impl EventCatalog {
    /// Build a catalog, rejecting duplicate ids and out-of-range modifiers.
    pub fn new(events: Vec<EventDefinition>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(events.len());
        for (position, event) in events.iter().enumerate() {
            if let Some(effect) = event
                .effects
                .iter()
                .find(|effect| effect.modifier.abs() > VALUE_LIMIT)
            {
                return Err(CatalogError::ModifierOutOfRange {
                    id: event.id.clone(),
                    modifier: effect.modifier,
                });
            }
            if index.insert(event.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateId(event.id.clone()));
            }
        }
        Ok(Self { events, index })
    }

    /// The game's stock events.
    pub fn builtin() -> Self {
        let events = stock::EVENTS
            .iter()
            .map(|stock| EventDefinition {
                id: stock.id.to_string(),
                category: stock.category,
                name: stock.name.to_string(),
                description: stock.description.to_string(),
                min_age: stock.ages.0,
                max_age: stock.ages.1,
                effects: stock
                    .effects
                    .iter()
                    .map(|(factor, modifier)| Effect {
                        factor: *factor,
                        modifier: *modifier,
                    })
                    .collect(),
            })
            .collect::<Vec<_>>();

        let index = events
            .iter()
            .enumerate()
            .map(|(position, event)| (event.id.clone(), position))
            .collect();
        Self { events, index }
    }

    /// Parse a JSON array of event definitions.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let events: Vec<EventDefinition> = serde_json::from_str(json)?;
        Self::new(events)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&json)?;
        tracing::info!(path = %path.display(), events = catalog.len(), "loaded event catalog");
        Ok(catalog)
    }

    pub fn lookup(&self, id: &str) -> Option<&EventDefinition> {
        self.index.get(id).map(|&position| &self.events[position])
    }

    pub fn effects(&self, id: &str) -> Option<&[Effect]> {
        self.lookup(id).map(|event| event.effects.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = &EventDefinition> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn to_json(&self) -> Result<String, CatalogError> {
        Ok(serde_json::to_string_pretty(&self.events)?)
    }
}

mod stock {
    use super::EventCategory::{self, BadEvent, Opportunity, SelfDevelopment};
    use crate::factor::Factor::{self, *};

    pub struct StockEvent {
        pub id: &'static str,
        pub category: EventCategory,
        pub name: &'static str,
        pub description: &'static str,
        pub ages: (u32, u32),
        pub effects: &'static [(Factor, i64)],
    }

    const fn event(
        id: &'static str,
        category: EventCategory,
        name: &'static str,
        description: &'static str,
        ages: (u32, u32),
        effects: &'static [(Factor, i64)],
    ) -> StockEvent {
        StockEvent {
            id,
            category,
            name,
            description,
            ages,
            effects,
        }
    }

    const YOUNG: (u32, u32) = (19, 29);
    const THIRTIES: (u32, u32) = (30, 39);
    const MIDLIFE: (u32, u32) = (40, 59);
    const ELDER: (u32, u32) = (60, 120);

    #[rustfmt::skip]
    pub const EVENTS: &[StockEvent] = &[
        // 19-29
        event("Y20_BAD_FIRE", BadEvent, "fire", "Laid off from a first job", YOUNG, &[(Emotion, -5), (Career, -10)]),
        event("Y20_BAD_TOXICLOVE", BadEvent, "toxic_love", "Toxic relationship", YOUNG, &[(Intelligence, -5), (Emotion, -10)]),
        event("Y20_BAD_DEBT", BadEvent, "debt", "Consumer debt", YOUNG, &[(Finance, -15)]),
        event("Y20_BAD_BURNOUT", BadEvent, "burnout", "Early burnout", YOUNG, &[(Health, -10), (Emotion, -5)]),
        event("Y20_OP_MENTOR", Opportunity, "mentor", "A mentor shows the way", YOUNG, &[(Intelligence, 15)]),
        event("Y20_OP_SIDEHUSTLE", Opportunity, "side_hustle", "Small side business", YOUNG, &[(Career, 10)]),
        event("Y20_OP_SCHOLAR", Opportunity, "scholarship", "Scholarship", YOUNG, &[(Intelligence, 10), (Culture, 10)]),
        event("Y20_GR_DISCIPLINE", SelfDevelopment, "discipline", "Early discipline", YOUNG, &[(Health, 10)]),
        event("Y20_GR_MINDFUL", SelfDevelopment, "mindful", "Emotional detox", YOUNG, &[(Emotion, 10)]),
        event("Y20_GR_LEARNAI", SelfDevelopment, "learn_ai", "Learning AI fundamentals", YOUNG, &[(Ai, 10)]),
        // 30-39
        event("Y30_BAD_FAMILY", BadEvent, "family_crisis", "Family crisis", THIRTIES, &[(Emotion, -15)]),
        event("Y30_BAD_FOMO", BadEvent, "fomo_invest", "FOMO investment", THIRTIES, &[(Finance, -20)]),
        event("Y30_BAD_HEALTH", BadEvent, "health_alert", "Health alarm", THIRTIES, &[(Health, -15)]),
        event("Y30_OP_PROMO", Opportunity, "promotion", "Major promotion", THIRTIES, &[(Career, 20)]),
        event("Y30_OP_NETWORK", Opportunity, "network", "Growing the network", THIRTIES, &[(Community, 15)]),
        event("Y30_OP_PASSIVE", Opportunity, "passive_income", "Passive income", THIRTIES, &[(Finance, 20)]),
        event("Y30_GR_THERAPY", SelfDevelopment, "therapy", "Coaching and therapy", THIRTIES, &[(Intelligence, 5), (Emotion, 15)]),
        event("Y30_GR_BIOMARKER", SelfDevelopment, "health_optimize", "Health optimisation", THIRTIES, &[(Health, 20)]),
        event("Y30_GR_SYSTEMS", SelfDevelopment, "systems", "Systematising work", THIRTIES, &[(Ai, 10), (Career, 5)]),
        // 40-59
        event("Y40_BAD_MIDLIFE", BadEvent, "midlife_crisis", "Midlife crisis", MIDLIFE, &[(Emotion, -20)]),
        event("Y40_BAD_HEALTH_CRASH", BadEvent, "health_crash", "Health collapse", MIDLIFE, &[(Health, -30)]),
        event("Y40_BAD_DIVORCE", BadEvent, "divorce", "Marriage breakdown", MIDLIFE, &[(Emotion, -20), (Finance, -15)]),
        event("Y40_OP_AI_BOOST", Opportunity, "ai_boost", "AI leap", MIDLIFE, &[(Ai, 20), (Finance, 10)]),
        event("Y40_OP_EXIT", Opportunity, "exit", "Company exit", MIDLIFE, &[(Finance, 30)]),
        event("Y40_OP_LEGACY", Opportunity, "legacy", "Sharing a legacy", MIDLIFE, &[(Culture, 15), (Community, 15)]),
        event("Y40_GR_HEALTH_TX", SelfDevelopment, "health_transform", "Health transformation", MIDLIFE, &[(Health, 30)]),
        event("Y40_GR_RECONNECT", SelfDevelopment, "reconnect", "Back to family", MIDLIFE, &[(Emotion, 20)]),
        event("Y40_GR_REFOCUS", SelfDevelopment, "refocus", "Redefining success", MIDLIFE, &[(Spiritual, 15), (Intelligence, 10)]),
        // 60-120
        event("Y60_BAD_LONELY", BadEvent, "lonely", "Loneliness in old age", ELDER, &[(Emotion, -20)]),
        event("Y60_BAD_MEDICAL", BadEvent, "medical_cost", "Medical bills", ELDER, &[(Finance, -25)]),
        event("Y60_BAD_LIMIT", BadEvent, "physical_limit", "Physical limits", ELDER, &[(Career, -30)]),
        event("Y60_OP_MENTORING", Opportunity, "mentoring", "Inspiring the next generation", ELDER, &[(Community, 20)]),
        event("Y60_OP_HERITAGE", Opportunity, "heritage", "Cultural heritage", ELDER, &[(Culture, 25)]),
        event("Y60_OP_EARTH", Opportunity, "environment", "Devotion to the environment", ELDER, &[(Environment, 20)]),
        event("Y60_GR_SERENITY", SelfDevelopment, "serenity", "Inner peace", ELDER, &[(Spiritual, 30)]),
        event("Y60_GR_WISDOM", SelfDevelopment, "wisdom", "Wisdom", ELDER, &[(Intelligence, 20)]),
        event("Y60_GR_GENTLEHEALTH", SelfDevelopment, "gentle_health", "Slow living, lasting health", ELDER, &[(Health, 20)]),
    ];
}
