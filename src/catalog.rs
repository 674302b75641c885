//! Satellite catalog
//!
//! The fixed list of quiz items, loaded once from JSON. The core never
//! modifies it.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::morse;
use crate::progress::Tiered;

/// Catalog shipped with the game
const BUILTIN_CATALOG: &str = include_str!("../data/satellites.json");

/// Catalog loading failures
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("catalog is empty")]
    Empty,
    #[error("duplicate satellite id {0:?}")]
    DuplicateId(String),
    #[error("satellite {0:?} has tier 0 (tiers start at 1)")]
    InvalidTier(String),
    #[error("satellite {0:?} does not list its answer among the choices")]
    AnswerNotInChoices(String),
}

/// One quiz item: a satellite broadcasting a Morse signal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Satellite {
    pub id: String,
    pub title: String,
    /// Degrees, for the globe
    pub lat: f64,
    /// Degrees, for the globe
    pub lon: f64,
    /// Signal in Morse notation; derived from `answer` when empty
    #[serde(default)]
    pub morse: String,
    pub answer: String,
    pub choices: Vec<String>,
    #[serde(default)]
    pub hint: String,
    /// Difficulty tier, 1 = easiest
    #[serde(rename = "level")]
    pub tier: u32,
}

impl Satellite {
    /// Morse string to play
    pub fn signal(&self) -> String {
        if self.morse.is_empty() {
            morse::encode(&self.answer)
        } else {
            self.morse.clone()
        }
    }

    pub fn is_correct(&self, choice: &str) -> bool {
        choice == self.answer
    }
}

impl Tiered for Satellite {
    fn id(&self) -> &str {
        &self.id
    }

    fn tier(&self) -> u32 {
        self.tier
    }
}

/// Ordered, validated list of satellites
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    satellites: Vec<Satellite>,
}

impl Catalog {
    pub fn new(satellites: Vec<Satellite>) -> Result<Self, CatalogError> {
        if satellites.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = HashSet::new();
        for sat in &satellites {
            if !seen.insert(sat.id.as_str()) {
                return Err(CatalogError::DuplicateId(sat.id.clone()));
            }
            if sat.tier == 0 {
                return Err(CatalogError::InvalidTier(sat.id.clone()));
            }
            if !sat.choices.iter().any(|c| c == &sat.answer) {
                return Err(CatalogError::AnswerNotInChoices(sat.id.clone()));
            }
        }
        Ok(Self { satellites })
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let satellites: Vec<Satellite> = serde_json::from_str(json)?;
        let catalog = Self::new(satellites)?;
        log::info!(
            "Loaded catalog: {} satellites in {} tiers",
            catalog.len(),
            catalog.max_tier()
        );
        Ok(catalog)
    }

    /// The catalog bundled with the crate
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.satellites)
    }

    pub fn satellites(&self) -> &[Satellite] {
        &self.satellites
    }

    pub fn get(&self, id: &str) -> Option<&Satellite> {
        self.satellites.iter().find(|s| s.id == id)
    }

    pub fn in_tier(&self, tier: u32) -> impl Iterator<Item = &Satellite> {
        self.satellites.iter().filter(move |s| s.tier == tier)
    }

    pub fn max_tier(&self) -> u32 {
        self.satellites.iter().map(|s| s.tier).max().unwrap_or(1)
    }

    pub fn len(&self) -> usize {
        self.satellites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.satellites.is_empty()
    }
}
