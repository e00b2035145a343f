use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Field injected into every upstream record before it is persisted.
pub const GAMEWEEK_FIELD: &str = "gameweek_index";

/// A league round, e.g. gameweek 13 of the Premier League season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Gameweek(u32);

impl Gameweek {
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    pub fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Gameweek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One player's stats as returned upstream. The schema is not ours, so the
/// fields are kept as an insertion-ordered JSON map and passed through as-is.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    pub data: Map<String, Value>,
}

impl Record {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.data.get(field)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.data)
    }
}

/// Augmented records of a single run, in upstream order.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    pub gameweek: Gameweek,
    pub records: Vec<Record>,
}

impl Batch {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// What the load stage reports back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    pub inserted: u64,
}

/// Outcome of a full extract/transform/load run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub gameweek: Gameweek,
    pub fetched: usize,
    pub inserted: u64,
}

/// How the gameweek for a run is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameweekSelector {
    Fixed(Gameweek),
    /// The last gameweek upstream marks as finished with checked data.
    Latest,
}
