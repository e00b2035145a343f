// Adapters: concrete implementations of the domain ports for external systems.

pub mod http;
pub mod mongo;

pub use http::FplClient;
pub use mongo::MongoStore;
