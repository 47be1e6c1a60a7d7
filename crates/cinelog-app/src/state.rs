use std::sync::Arc;

use cinelog_dal::{JsonFileStore, DEFAULT_PAGE_SIZE};

#[derive(Clone)]
pub struct AppState {
    state: Arc<AppStateInner>,
}

impl AppState {
    pub fn new(app_config: AppConfig, store: JsonFileStore) -> Self {
        AppState {
            state: Arc::new(AppStateInner { app_config, store }),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.state.app_config
    }

    pub fn store(&self) -> &JsonFileStore {
        &self.state.store
    }
}

struct AppStateInner {
    store: JsonFileStore,
    app_config: AppConfig,
}

pub struct AppConfig {
    pub default_page_size: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            default_page_size: DEFAULT_PAGE_SIZE as u32,
        }
    }
}
