//! Product service

use tracing::{debug, info};

use crate::api::ApiClient;
use crate::error::ApiResult;
use crate::models::{Product, ProductDraft, ProductPage};

/// Sort order requested for every listing page
const LISTING_SORT: &str = "id,desc";

/// Product CRUD against the backend
#[derive(Clone)]
pub struct ProductService {
    client: ApiClient,
}

impl ProductService {
    /// Create a new product service
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Fetch one page of products, optionally filtered by name
    ///
    /// Filtering and pagination metadata are computed by the server.
    pub async fn get_all_products(
        &self,
        page_index: u32,
        page_size: u32,
        search: Option<&str>,
    ) -> ApiResult<ProductPage> {
        debug!(
            "Fetching products page {} (size {}, search {:?})",
            page_index, page_size, search
        );

        let mut query = vec![
            ("page", page_index.to_string()),
            ("size", page_size.to_string()),
            ("sort", LISTING_SORT.to_string()),
        ];
        if let Some(term) = search {
            query.push(("search", term.to_string()));
        }

        self.client.get_with_query("/products", &query).await
    }

    pub async fn get_product(&self, id: i64) -> ApiResult<Product> {
        self.client.get(&format!("/products/{}", id)).await
    }

    pub async fn add_product(&self, draft: &ProductDraft) -> ApiResult<Product> {
        info!("Creating product: {}", draft.product_name);
        self.client.post("/products", draft).await
    }

    pub async fn update_product(&self, id: i64, draft: &ProductDraft) -> ApiResult<Product> {
        info!("Updating product: {}", id);
        self.client.put(&format!("/products/{}", id), draft).await
    }

    pub async fn delete_product(&self, id: i64) -> ApiResult<()> {
        info!("Deleting product: {}", id);
        self.client.delete(&format!("/products/{}", id)).await
    }
}
