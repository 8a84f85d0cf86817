pub mod app;
pub mod config;
pub mod errors;
pub mod filter;
pub mod handlers;
pub mod models;
pub mod rest;
pub mod stats;
pub mod store;
pub mod summary;
pub mod tables;
pub mod ui;
pub mod state;

pub use app::router;
pub use config::Config;
pub use filter::filter_records;
pub use state::AppState;
pub use store::{MemoryStore, RemoteStore};
pub use summary::summarize;
