//! Category service

use crate::api::ApiClient;
use crate::error::ApiResult;
use crate::models::Category;

/// Read-only access to product categories
#[derive(Clone)]
pub struct CategoryService {
    client: ApiClient,
}

impl CategoryService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Fetch the full, unpaginated category list
    pub async fn get_all_category(&self) -> ApiResult<Vec<Category>> {
        self.client.get("/categories").await
    }
}
