//! Authentication service

use tracing::info;

use crate::api::ApiClient;
use crate::error::ApiResult;
use crate::models::{LoginRequest, LoginResponse, UserProfile};

/// Login and profile lookups
#[derive(Clone)]
pub struct AuthService {
    public: ApiClient,
    authenticated: ApiClient,
}

impl AuthService {
    /// Create a new auth service
    pub fn new(public: ApiClient, authenticated: ApiClient) -> Self {
        Self {
            public,
            authenticated,
        }
    }

    /// Exchange credentials for a bearer token
    pub async fn log_in(&self, username: &str, password: &str) -> ApiResult<LoginResponse> {
        info!("Login attempt for user: {}", username);

        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        self.public.post("/auth/login", &request).await
    }

    /// Read the profile belonging to the stored token
    pub async fn fetch_user(&self) -> ApiResult<UserProfile> {
        self.authenticated.get("/auth/profile").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::config::ClientConfig;
    use common::token::MemoryTokenStorage;
    use serde_json::json;
    use std::sync::Arc;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_log_in_and_fetch_user() {
        let server = MockServer::start().await;
        let credentials = json!({"username": "admin123", "password": "admin123"});
        let login_body = json!({"accessToken": "tok-1", "username": "admin123"});
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .and(body_json(credentials))
            .respond_with(ResponseTemplate::new(200).set_body_json(login_body))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/auth/profile"))
            .and(header("Authorization", "Bearer tok-1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"id": 1, "username": "admin123"})),
            )
            .mount(&server)
            .await;

        let config = ClientConfig::with_base_url(server.uri(), std::env::temp_dir().join("t"));
        let storage = Arc::new(MemoryTokenStorage::with_token("tok-1"));
        let service = AuthService::new(
            ApiClient::public(&config).unwrap(),
            ApiClient::authenticated(&config, storage).unwrap(),
        );

        let login = service.log_in("admin123", "admin123").await.unwrap();
        assert_eq!(login.access_token.as_deref(), Some("tok-1"));
        assert_eq!(login.username.as_deref(), Some("admin123"));

        let profile = service.fetch_user().await.unwrap();
        assert_eq!(profile.username, "admin123");
    }
}
