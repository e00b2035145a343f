pub mod etl;
pub mod load;
pub mod pipeline;
pub mod transform;

pub use crate::domain::model::{
    Batch, Gameweek, GameweekSelector, LoadReport, Record, RunSummary,
};
pub use crate::domain::ports::{
    ConfigProvider, DocumentStore, Pipeline, PlayerSource, StoreConnection,
};
pub use crate::utils::error::Result;
