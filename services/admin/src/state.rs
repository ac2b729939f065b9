//! Application state owned by the composition root

use std::sync::Arc;

use common::config::ClientConfig;
use common::token::TokenStorage;
use tracing::info;

use crate::api::ApiClient;
use crate::error::ApiResult;
use crate::notification::Notifier;
use crate::services::{AuthService, CategoryService, ProductService};
use crate::stores::{AuthStore, CategoryStore, ProductStore};

/// Application state shared with every view
#[derive(Clone)]
pub struct AppState {
    pub config: ClientConfig,
    pub auth_store: AuthStore,
    pub product_store: ProductStore,
    pub category_store: CategoryStore,
    pub product_service: ProductService,
}

impl AppState {
    /// Wire clients, services and stores together
    pub fn new(
        config: ClientConfig,
        token_storage: Arc<dyn TokenStorage>,
        notifier: Notifier,
    ) -> ApiResult<Self> {
        let public = ApiClient::public(&config)?;
        let authenticated = ApiClient::authenticated(&config, Arc::clone(&token_storage))?;

        let auth_service = AuthService::new(public, authenticated.clone());
        let product_service = ProductService::new(authenticated.clone());
        let category_service = CategoryService::new(authenticated);

        let auth_store = AuthStore::new(auth_service, token_storage, notifier.clone());
        let product_store =
            ProductStore::new(product_service.clone(), notifier.clone(), config.page_size);
        let category_store = CategoryStore::new(category_service, notifier);

        info!("Catalog admin client targeting {}", config.base_url);

        Ok(Self {
            config,
            auth_store,
            product_store,
            category_store,
            product_service,
        })
    }

    /// Load the listing page: one page of products plus the category list
    pub async fn load_listing(&self, page_index: u32) -> bool {
        let (products, categories) = tokio::join!(
            self.product_store.get_all_products(page_index),
            self.category_store.get_all_category()
        );
        products && categories
    }

    /// Load one page of the products matching `term` plus the category list
    pub async fn load_search(&self, term: &str, page_index: u32) -> bool {
        let (products, categories) = tokio::join!(
            self.product_store.search_page(term, page_index),
            self.category_store.get_all_category()
        );
        products && categories
    }

    /// Log out and drop every cached catalog view
    pub async fn log_out(&self) {
        self.auth_store.log_out().await;
        self.product_store.reset().await;
        self.category_store.reset().await;
    }
}
