use crate::core::{ConfigProvider, DocumentStore, Record, StoreConnection};
use crate::utils::error::{EtlError, Result};
use mongodb::bson::{doc, Document};
use mongodb::{Client, Collection};

pub const DEFAULT_DATABASE: &str = "premier_league";
pub const DEFAULT_COLLECTION: &str = "gameweek_stats";

/// MongoDB target for gameweek documents.
#[derive(Debug, Clone)]
pub struct MongoStore {
    uri: Option<String>,
    database: String,
    collection: String,
}

impl MongoStore {
    pub fn new(
        uri: Option<String>,
        database: impl Into<String>,
        collection: impl Into<String>,
    ) -> Self {
        Self {
            uri,
            database: database.into(),
            collection: collection.into(),
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self::new(
            config.mongodb_uri().map(str::to_string),
            config.database(),
            config.collection(),
        )
    }
}

pub struct MongoConnection {
    client: Client,
    collection: Collection<Document>,
}

impl DocumentStore for MongoStore {
    type Connection = MongoConnection;

    async fn connect(&self) -> Result<MongoConnection> {
        let uri = self
            .uri
            .as_deref()
            .ok_or_else(|| EtlError::connect("MONGODB_URI is not set"))?;

        let client = Client::with_uri_str(uri)
            .await
            .map_err(|e| EtlError::connect(e.to_string()))?;

        // The driver connects lazily; ping so an unreachable cluster fails here.
        let ping = client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await;
        if let Err(e) = ping {
            client.shutdown().await;
            return Err(EtlError::connect(e.to_string()));
        }

        let collection = client
            .database(&self.database)
            .collection::<Document>(&self.collection);
        tracing::debug!("Using {}.{}", self.database, self.collection);

        Ok(MongoConnection { client, collection })
    }
}

impl StoreConnection for MongoConnection {
    async fn insert_many(&self, records: &[Record]) -> Result<u64> {
        let documents = records
            .iter()
            .map(to_document)
            .collect::<Result<Vec<_>>>()?;

        let result = self
            .collection
            .insert_many(documents)
            .ordered(false)
            .await
            .map_err(|e| EtlError::write(e.to_string()))?;

        Ok(result.inserted_ids.len() as u64)
    }

    async fn close(self) {
        self.client.shutdown().await;
    }
}

fn to_document(record: &Record) -> Result<Document> {
    mongodb::bson::to_document(&record.data).map_err(|e| EtlError::write(e.to_string()))
}
