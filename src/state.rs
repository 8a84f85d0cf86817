use crate::config::Config;
use crate::errors::StoreError;
use crate::rest::RestStore;
use crate::store::{MemoryStore, RemoteStore};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RemoteStore>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: Arc<dyn RemoteStore>, config: Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    /// Connects to the hosted store when `STORE_URL` is set, otherwise keeps
    /// everything in memory for the lifetime of the process.
    pub fn from_config(config: Config) -> Result<Self, StoreError> {
        let store: Arc<dyn RemoteStore> = match &config.store_url {
            Some(url) => {
                info!("using remote store at {url}");
                Arc::new(RestStore::new(url, config.store_api_key.as_deref())?)
            }
            None => {
                warn!("STORE_URL is not set; data is kept in memory and lost on restart");
                Arc::new(MemoryStore::new())
            }
        };
        Ok(Self::new(store, config))
    }

    pub fn row_limit(&self) -> usize {
        self.config.row_limit
    }
}
