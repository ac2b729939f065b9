//! HTTP client for the catalog backend
//!
//! Two configurations share one base address: a public client used for login
//! and an authenticated client that attaches `Authorization: Bearer <token>`.
//! The token is read from storage at request time, never cached, so a login
//! or logout is picked up by the very next call.

use std::sync::Arc;
use std::time::Duration;

use common::config::ClientConfig;
use common::token::TokenStorage;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::error::{ApiError, ApiResult};

/// Catalog backend client
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token_storage: Option<Arc<dyn TokenStorage>>,
}

impl ApiClient {
    /// Create a client that sends no credentials
    pub fn public(config: &ClientConfig) -> ApiResult<Self> {
        Self::build(config, None)
    }

    /// Create a client that attaches the stored bearer token to every request
    pub fn authenticated(
        config: &ClientConfig,
        token_storage: Arc<dyn TokenStorage>,
    ) -> ApiResult<Self> {
        Self::build(config, Some(token_storage))
    }

    fn build(
        config: &ClientConfig,
        token_storage: Option<Arc<dyn TokenStorage>>,
    ) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApiError::Unknown(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token_storage,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Start a request, running the token hook for authenticated clients
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.url(path));

        let Some(storage) = &self.token_storage else {
            return builder;
        };

        match storage.get() {
            Ok(Some(token)) => builder.bearer_auth(token),
            Ok(None) => {
                debug!("No session token stored, sending request without credentials");
                builder
            }
            Err(e) => {
                warn!("Failed to read session token: {}", e);
                builder
            }
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        Self::parse(self.execute(self.request(Method::GET, path)).await?).await
    }

    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> ApiResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let builder = self.request(Method::GET, path).query(query);
        Self::parse(self.execute(builder).await?).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let builder = self.request(Method::POST, path).json(body);
        Self::parse(self.execute(builder).await?).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let builder = self.request(Method::PUT, path).json(body);
        Self::parse(self.execute(builder).await?).await
    }

    /// Send a DELETE and ignore whatever body comes back
    pub async fn delete(&self, path: &str) -> ApiResult<()> {
        self.execute(self.request(Method::DELETE, path)).await?;
        Ok(())
    }

    /// Send the request and turn non-2xx statuses into `ApiError::Response`
    async fn execute(&self, builder: RequestBuilder) -> ApiResult<Response> {
        let response = builder.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        debug!("Backend answered {} with body: {}", status, body);

        Err(ApiError::Response {
            status: status.as_u16(),
            body,
        })
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Unknown(format!("Failed to decode response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::token::MemoryTokenStorage;
    use serde_json::{Value, json};
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(base_url: &str) -> ClientConfig {
        ClientConfig::with_base_url(base_url, std::env::temp_dir().join("unused-token"))
    }

    #[tokio::test]
    async fn test_authenticated_client_reads_token_on_each_call() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/profile"))
            .and(header("Authorization", "Bearer tok-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"step": 1})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/auth/profile"))
            .and(header("Authorization", "Bearer tok-2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"step": 2})))
            .expect(1)
            .mount(&server)
            .await;

        let storage = Arc::new(MemoryTokenStorage::with_token("tok-1"));
        let client = ApiClient::authenticated(&config(&server.uri()), storage.clone()).unwrap();

        let first: Value = client.get("/auth/profile").await.unwrap();
        storage.set("tok-2").unwrap();
        let second: Value = client.get("auth/profile").await.unwrap();

        assert_eq!(first["step"], 1);
        assert_eq!(second["step"], 2);
    }

    #[tokio::test]
    async fn test_public_client_sends_no_authorization() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"ok": true})),
            )
            .mount(&server)
            .await;

        let client = ApiClient::public(&config(&format!("{}/", server.uri()))).unwrap();
        let _: Value = client
            .post("/auth/login", &json!({"username": "a"}))
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(!requests[0].headers.contains_key("authorization"));
    }

    #[tokio::test]
    async fn test_error_status_becomes_response_error() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/products/9"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"message": "Product not found"})),
            )
            .mount(&server)
            .await;

        let client = ApiClient::public(&config(&server.uri())).unwrap();
        let error = client.delete("/products/9").await.unwrap_err();

        assert_eq!(error.status(), Some(404));
        assert_eq!(error.server_message().as_deref(), Some("Product not found"));
    }

    #[tokio::test]
    async fn test_unreachable_server_becomes_request_error() {
        let client = ApiClient::public(&config("http://127.0.0.1:1")).unwrap();
        let error = client.get::<Value>("/categories").await.unwrap_err();

        assert!(matches!(error, ApiError::Request(_)), "{error:?}");
    }

    #[tokio::test]
    async fn test_undecodable_body_becomes_unknown_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/categories"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = ApiClient::public(&config(&server.uri())).unwrap();
        let error = client.get::<Vec<Value>>("/categories").await.unwrap_err();

        assert!(matches!(error, ApiError::Unknown(_)), "{error:?}");
    }
}
