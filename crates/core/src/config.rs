use config::{Config, ConfigBuilder, ConfigError, Environment, File, builder::DefaultState};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::CoreError;

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const DEFAULT_TIMEOUT_SECS: i64 = 10;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    /// Base URL of the REST API, without a trailing slash.
    #[serde(alias = "API_URL")]
    pub api_url: String,

    /// Full GraphQL endpoint. Falls back to `{api_url}/graphql`.
    #[serde(alias = "GRAPHQL_URL")]
    pub graphql_url: Option<String>,

    #[serde(alias = "REQUEST_TIMEOUT_SECS")]
    pub request_timeout_secs: u64,

    /// Route the TUI opens on.
    #[serde(alias = "INITIAL_ROUTE")]
    pub initial_route: String,

    #[serde(skip)]
    pub app_root: PathBuf,
}

impl AppConfig {
    pub fn load() -> Result<Self, CoreError> {
        // 1. Standard dotenv discovery from current dir
        if dotenvy::dotenv().is_err() {
            // 2. Fallback: the resolved RECALL_ROOT
            let path = crate::path_utils::get_app_root().join(".env");
            if path.exists() {
                let _ = dotenvy::from_path(&path);
            }
        }

        let builder = Self::defaults()?
            .add_source(File::with_name("recall").required(false))
            .add_source(Environment::default());

        Self::from_builder(builder)
    }

    pub fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("api_url", DEFAULT_API_URL)?
            .set_default("request_timeout_secs", DEFAULT_TIMEOUT_SECS)?
            .set_default("initial_route", "/")
    }

    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, CoreError> {
        let mut config: Self = builder.build()?.try_deserialize()?;

        config.app_root = crate::path_utils::get_app_root();
        config.api_url = config.api_url.trim_end_matches('/').to_string();
        if config.graphql_url.as_deref().is_some_and(|u| u.trim().is_empty()) {
            config.graphql_url = None;
        }

        config.validate()?;
        Ok(config)
    }

    /// Applies command-line overrides on top of the loaded values.
    pub fn with_overrides(mut self, api_url: Option<String>, graphql_url: Option<String>) -> Result<Self, CoreError> {
        if let Some(url) = api_url {
            self.api_url = url.trim_end_matches('/').to_string();
        }
        if let Some(url) = graphql_url {
            self.graphql_url = Some(url);
        }
        self.validate()?;
        Ok(self)
    }

    /// Overrides the route the TUI opens on.
    pub fn with_initial_route(mut self, route: Option<String>) -> Result<Self, CoreError> {
        if let Some(route) = route {
            self.initial_route = route;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        check_url("api_url", &self.api_url)?;
        if let Some(url) = &self.graphql_url {
            check_url("graphql_url", url)?;
        }
        if self.request_timeout_secs == 0 {
            return Err(CoreError::InvalidTimeout);
        }
        if !self.initial_route.starts_with('/') {
            return Err(CoreError::InvalidRoute(self.initial_route.clone()));
        }
        Ok(())
    }

    pub fn graphql_endpoint(&self) -> String {
        match &self.graphql_url {
            Some(url) => url.clone(),
            None => format!("{}/graphql", self.api_url),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn check_url(field: &'static str, value: &str) -> Result<(), CoreError> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(CoreError::InvalidUrl { field, value: value.to_string() })
    }
}
