use crate::config::AppConfig;
use crate::counter::CounterStore;
use tracing::info;

/// Everything that lives for the duration of one app session.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub counter: CounterStore,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        info!("📦 App state created (api: {})", config.api_url);
        Self {
            config,
            counter: CounterStore::new(),
        }
    }

    /// Ends the session. Counter state does not survive this.
    pub fn teardown(self) {
        info!("📦 App state torn down (final count {})", self.counter.count());
    }
}
