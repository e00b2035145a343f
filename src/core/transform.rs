use crate::core::{Batch, Gameweek, Record};
use crate::domain::model::GAMEWEEK_FIELD;
use serde_json::Value;

/// Tags a single upstream record with the gameweek it belongs to.
pub fn augment(mut record: Record, gameweek: Gameweek) -> Record {
    record
        .data
        .insert(GAMEWEEK_FIELD.to_string(), Value::from(gameweek.index()));
    record
}

pub fn augment_records(records: Vec<Record>, gameweek: Gameweek) -> Batch {
    Batch {
        gameweek,
        records: records
            .into_iter()
            .map(|record| augment(record, gameweek))
            .collect(),
    }
}
