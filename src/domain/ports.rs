use crate::domain::model::{Batch, Gameweek, LoadReport, Record};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Upstream source of per-player gameweek stats.
pub trait PlayerSource: Send + Sync {
    fn fetch_live(
        &self,
        gameweek: Gameweek,
    ) -> impl std::future::Future<Output = Result<Vec<Record>>> + Send;
}

/// A document store the loader can open a connection to.
pub trait DocumentStore: Send + Sync {
    type Connection: StoreConnection;

    fn connect(&self) -> impl std::future::Future<Output = Result<Self::Connection>> + Send;
}

/// An open connection, bound to the target collection.
pub trait StoreConnection: Send + Sync {
    /// Unordered bulk insert. Returns the number of documents written.
    fn insert_many(
        &self,
        records: &[Record],
    ) -> impl std::future::Future<Output = Result<u64>> + Send;

    fn close(self) -> impl std::future::Future<Output = ()> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_base(&self) -> &str;
    fn request_timeout(&self) -> Option<Duration>;
    /// `None` when no URI was configured; reported only once a connection is attempted.
    fn mongodb_uri(&self) -> Option<&str>;
    fn database(&self) -> &str;
    fn collection(&self) -> &str;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    fn gameweek(&self) -> Gameweek;
    async fn extract(&self) -> Result<Vec<Record>>;
    async fn transform(&self, data: Vec<Record>) -> Result<Batch>;
    async fn load(&self, batch: Batch) -> Result<LoadReport>;
}
