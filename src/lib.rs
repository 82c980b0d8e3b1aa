pub mod error;
pub mod gomod;
pub mod indexer;
pub mod report;
pub mod server;
pub mod tools;
