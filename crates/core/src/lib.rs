pub mod config;
pub mod counter;
pub mod error;
pub mod path_utils;
pub mod state;
pub mod types;

pub use counter::CounterStore;
pub use error::CoreError;
pub use types::{MemoryRecord, SearchQuery, SearchResult};

use tracing::info;

pub fn init() {
    info!("🔎 Recall Core Initialized");
}
