//! Product listing state container
//!
//! Mutations apply the server's answer locally right away, notify, and then
//! refetch a page so the list matches the server's ordering and defaults.
//! Listing fetches carry a sequence number; only the most recently issued
//! fetch may write the listing or clear `loading`.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;
use tracing::{debug, error, info};

use crate::error::ApiResult;
use crate::models::{Product, ProductDraft, ProductPage};
use crate::notification::Notifier;
use crate::services::ProductService;

pub const LOAD_FAILED: &str = "Failed to load products";
pub const ADD_SUCCESS: &str = "Product added successfully";
pub const ADD_FAILED: &str = "Failed to add product";
pub const UPDATE_SUCCESS: &str = "Product updated successfully";
pub const UPDATE_FAILED: &str = "Failed to update product";
pub const DELETE_SUCCESS: &str = "Product deleted successfully";
pub const DELETE_FAILED: &str = "Failed to delete product";

/// Listing page state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductListState {
    pub products: Vec<Product>,
    /// Total number of products matching the current search
    pub quantity: u64,
    pub loading: bool,
    pub total_pages: u32,
    /// Zero-based index of the page on display
    pub current_page: u32,
    pub search: Option<String>,
}

/// Product store
#[derive(Clone)]
pub struct ProductStore {
    state: Arc<RwLock<ProductListState>>,
    service: ProductService,
    notifier: Notifier,
    page_size: u32,
    latest_fetch: Arc<AtomicU64>,
    /// Bumped by `reset`; mutations started before it must not write
    generation: Arc<AtomicU64>,
}

impl ProductStore {
    /// Create a new product store
    pub fn new(service: ProductService, notifier: Notifier, page_size: u32) -> Self {
        Self {
            state: Arc::new(RwLock::new(ProductListState::default())),
            service,
            notifier,
            page_size: page_size.max(1),
            latest_fetch: Arc::new(AtomicU64::new(0)),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Snapshot of the current state
    pub async fn state(&self) -> ProductListState {
        self.state.read().await.clone()
    }

    /// Forget everything, e.g. after logout
    pub async fn reset(&self) {
        // Outstanding fetches and mutations become stale
        self.latest_fetch.fetch_add(1, Ordering::SeqCst);
        self.generation.fetch_add(1, Ordering::SeqCst);
        *self.state.write().await = ProductListState::default();
    }

    /// Load one page of the listing
    pub async fn get_all_products(&self, page_index: u32) -> bool {
        let seq = self.latest_fetch.fetch_add(1, Ordering::SeqCst) + 1;

        let search = {
            let mut state = self.state.write().await;
            state.loading = true;
            state.search.clone()
        };

        let result = self.fetch_page(page_index, search.as_deref()).await;

        let mut state = self.state.write().await;
        if self.latest_fetch.load(Ordering::SeqCst) != seq {
            debug!(
                "Discarding superseded products response for page {}",
                page_index
            );
            return false;
        }

        state.loading = false;
        match result {
            Ok(page) => {
                debug!(
                    "Loaded page {} with {} products ({} per page)",
                    page.number,
                    page.content.len(),
                    page.size
                );
                state.quantity = page.total_elements;
                state.total_pages = page.total_pages;
                state.current_page = page.number;
                state.products = page.content;
                state.products.truncate(self.page_size as usize);
                true
            }
            Err(e) => {
                drop(state);
                error!("Failed to load products: {}", e);
                self.notifier.error(LOAD_FAILED);
                false
            }
        }
    }

    /// Fetch a page, falling back to the last page if the requested one is
    /// past the end of the listing
    async fn fetch_page(&self, page_index: u32, search: Option<&str>) -> ApiResult<ProductPage> {
        let page = self
            .service
            .get_all_products(page_index, self.page_size, search)
            .await?;

        if page.total_pages > 0 && page.number >= page.total_pages {
            let last = page.total_pages - 1;
            debug!("Page {} is past the end, loading {}", page.number, last);
            return self
                .service
                .get_all_products(last, self.page_size, search)
                .await;
        }

        Ok(page)
    }

    /// Navigate to another page if it exists
    /// Navigate to another page if it exists
    pub async fn change_page(&self, new_page: u32) -> bool {
        let total_pages = self.state.read().await.total_pages;
        if new_page >= total_pages {
            debug!("Page {} is out of range ({} pages)", new_page, total_pages);
            return false;
        }
        self.get_all_products(new_page).await
    }

    /// Filter the listing by product name and go back to the first page
    pub async fn search(&self, term: &str) -> bool {
        self.search_page(term, 0).await
    }

    /// Filter the listing by product name and load one page of the matches
    ///
    /// A page past the end of the matches falls back to the last one.
    pub async fn search_page(&self, term: &str, page_index: u32) -> bool {
        let term = term.trim();
        self.state.write().await.search = (!term.is_empty()).then(|| term.to_string());

        let loaded = self.get_all_products(page_index).await;
        if loaded && !term.is_empty() && self.state.read().await.products.is_empty() {
            self.notifier.info(format!("No products match \"{}\"", term));
        }
        loaded
    }

    /// Start a mutation; returns the generation it belongs to
    async fn begin_mutation(&self) -> u64 {
        let generation = self.generation.load(Ordering::SeqCst);
        self.state.write().await.loading = true;
        generation
    }

    /// Whether `reset` ran since the mutation started
    fn is_reset_since(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) != generation
    }

    async fn finish_mutation(&self, generation: u64) {
        if !self.is_reset_since(generation) {
            self.state.write().await.loading = false;
        }
    }

    pub async fn add_product(&self, draft: &ProductDraft) -> bool {
        let generation = self.begin_mutation().await;

        let success = match self.service.add_product(draft).await {
            Ok(product) => {
                info!("Product created with id {}", product.id);
                self.notifier.success(ADD_SUCCESS);
                if self.is_reset_since(generation) {
                    debug!("Store was reset, not applying product {}", product.id);
                } else {
                    {
                        let mut state = self.state.write().await;
                        state.products.push(product);
                        state.quantity += 1;
                    }
                    self.get_all_products(0).await;
                }
                true
            }
            Err(e) => {
                error!("Failed to add product: {}", e);
                self.notifier.error(ADD_FAILED);
                false
            }
        };

        self.finish_mutation(generation).await;
        success
    }

    pub async fn update_product(&self, id: i64, draft: &ProductDraft) -> bool {
        let generation = self.begin_mutation().await;

        let success = match self.service.update_product(id, draft).await {
            Ok(updated) => {
                self.notifier.success(UPDATE_SUCCESS);
                if self.is_reset_since(generation) {
                    debug!("Store was reset, not applying update of product {}", id);
                } else {
                    let current_page = {
                        let mut state = self.state.write().await;
                        if let Some(slot) = state.products.iter_mut().find(|p| p.id == id) {
                            *slot = updated;
                        }
                        state.current_page
                    };
                    self.get_all_products(current_page).await;
                }
                true
            }
            Err(e) => {
                error!("Failed to update product {}: {}", id, e);
                self.notifier.error(UPDATE_FAILED);
                false
            }
        };

        self.finish_mutation(generation).await;
        success
    }

    pub async fn delete_product(&self, id: i64) -> bool {
        let generation = self.begin_mutation().await;

        let success = match self.service.delete_product(id).await {
            Ok(()) => {
                self.notifier.success(DELETE_SUCCESS);
                if self.is_reset_since(generation) {
                    debug!("Store was reset, not applying removal of product {}", id);
                } else {
                    let current_page = {
                        let mut state = self.state.write().await;
                        let before = state.products.len();
                        state.products.retain(|p| p.id != id);
                        if state.products.len() < before {
                            state.quantity = state.quantity.saturating_sub(1);
                        }
                        state.current_page
                    };
                    self.get_all_products(current_page).await;
                }
                true
            }
            Err(e) => {
                error!("Failed to delete product {}: {}", id, e);
                self.notifier.error(DELETE_FAILED);
                false
            }
        };

        self.finish_mutation(generation).await;
        success
    }
}
