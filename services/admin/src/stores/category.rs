//! Category state container

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::error;

use crate::models::Category;
use crate::notification::Notifier;
use crate::services::CategoryService;

pub const LOAD_FAILED: &str = "Failed to load categories";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryState {
    pub categories: Vec<Category>,
    pub loading: bool,
}

/// Category store, refreshed whenever the listing page loads
#[derive(Clone)]
pub struct CategoryStore {
    state: Arc<RwLock<CategoryState>>,
    service: CategoryService,
    notifier: Notifier,
}

impl CategoryStore {
    pub fn new(service: CategoryService, notifier: Notifier) -> Self {
        Self {
            state: Arc::new(RwLock::new(CategoryState::default())),
            service,
            notifier,
        }
    }

    pub async fn state(&self) -> CategoryState {
        self.state.read().await.clone()
    }

    pub async fn reset(&self) {
        *self.state.write().await = CategoryState::default();
    }

    pub async fn get_all_category(&self) -> bool {
        self.state.write().await.loading = true;

        let success = match self.service.get_all_category().await {
            Ok(categories) => {
                self.state.write().await.categories = categories;
                true
            }
            Err(e) => {
                error!("Failed to load categories: {}", e);
                self.notifier.error(LOAD_FAILED);
                false
            }
        };

        self.state.write().await.loading = false;
        success
    }
}
