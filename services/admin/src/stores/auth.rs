//! Authentication state container

use std::sync::Arc;

use common::token::TokenStorage;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use crate::error::ApiError;
use crate::models::UserProfile;
use crate::notification::{Notification, NotificationKind, Notifier};
use crate::services::AuthService;

pub const LOGIN_SUCCESS: &str = "Logged in successfully";
pub const LOGIN_SUCCESS_TEST_ID: &str = "login-success";
pub const INVALID_CREDENTIALS: &str = "Incorrect username or password!";
pub const SERVER_ERROR: &str = "The server is having problems, please try again later!";
pub const GENERIC_ERROR: &str = "Something went wrong";
pub const UNREACHABLE: &str = "Cannot connect to the server. Please check your connection!";
pub const MISSING_TOKEN: &str = "No token received";
pub const LOGOUT_SUCCESS: &str = "Logged out!";
pub const LOGOUT_FAILED: &str = "Logout failed";

/// Session state shown to the views
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub access_token: Option<String>,
    pub user: Option<UserProfile>,
    pub loading: bool,
    pub initialized: bool,
}

impl AuthState {
    /// Unauthenticated state after an explicit reset
    fn signed_out() -> Self {
        Self {
            initialized: true,
            ..Self::default()
        }
    }
}

/// Auth store orchestrating login, logout and session restore
#[derive(Clone)]
pub struct AuthStore {
    state: Arc<RwLock<AuthState>>,
    service: AuthService,
    token_storage: Arc<dyn TokenStorage>,
    notifier: Notifier,
}

impl AuthStore {
    /// Create a new auth store
    pub fn new(
        service: AuthService,
        token_storage: Arc<dyn TokenStorage>,
        notifier: Notifier,
    ) -> Self {
        Self {
            state: Arc::new(RwLock::new(AuthState::default())),
            service,
            token_storage,
            notifier,
        }
    }

    /// Snapshot of the current state
    pub async fn state(&self) -> AuthState {
        self.state.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.access_token.is_some()
    }

    /// Restore a persisted session on startup
    ///
    /// A failed profile fetch keeps the token; only the backend decides
    /// whether it is still good.
    pub async fn init(&self) {
        let token = match self.token_storage.get() {
            Ok(token) => token,
            Err(e) => {
                warn!("Failed to read persisted session token: {}", e);
                None
            }
        };

        let Some(token) = token else {
            self.state.write().await.initialized = true;
            return;
        };

        {
            let mut state = self.state.write().await;
            state.access_token = Some(token);
            state.initialized = true;
        }

        match self.service.fetch_user().await {
            Ok(user) => {
                info!("Restored session for user: {}", user.username);
                self.state.write().await.user = Some(user);
            }
            Err(e) => error!("Failed to fetch user profile: {}", e),
        }
    }

    /// Reset to the unauthenticated default
    pub async fn clear_state(&self) {
        *self.state.write().await = AuthState::signed_out();
    }

    /// Log in and persist the issued token
    ///
    /// Returns whether the login succeeded; every failure is reported through
    /// a notification instead of an error.
    pub async fn log_in(&self, username: &str, password: &str) -> bool {
        self.state.write().await.loading = true;

        let success = match self.try_log_in(username, password).await {
            Ok(token) => {
                self.state.write().await.access_token = Some(token);
                self.notifier.emit(
                    Notification::new(NotificationKind::Success, LOGIN_SUCCESS)
                        .with_description("Success")
                        .with_test_id(LOGIN_SUCCESS_TEST_ID),
                );
                true
            }
            Err(e) => {
                error!("Login failed: {}", e);
                self.notifier.error(login_failure_message(&e));
                false
            }
        };

        self.state.write().await.loading = false;
        success
    }

    async fn try_log_in(&self, username: &str, password: &str) -> Result<String, ApiError> {
        let response = self.service.log_in(username, password).await?;
        info!(
            "Login accepted for {}",
            response.username.as_deref().unwrap_or(username)
        );

        let token = response
            .access_token
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| ApiError::Unknown(MISSING_TOKEN.to_string()))?;

        self.token_storage
            .set(&token)
            .map_err(|e| ApiError::Unknown(e.to_string()))?;

        Ok(token)
    }

    /// Drop the session locally and forget the persisted token
    pub async fn log_out(&self) {
        self.clear_state().await;

        match self.token_storage.remove() {
            Ok(()) => {
                info!("User logged out");
                self.notifier.success(LOGOUT_SUCCESS);
            }
            Err(e) => {
                error!("Failed to remove session token: {}", e);
                self.notifier.error(LOGOUT_FAILED);
            }
        }

        self.state.write().await.loading = false;
    }
}

/// Pick the user-facing message for a failed login
pub fn login_failure_message(error: &ApiError) -> String {
    match error {
        ApiError::Response { status, .. } => match *status {
            401 | 403 => INVALID_CREDENTIALS.to_string(),
            s if s >= 500 => SERVER_ERROR.to_string(),
            _ => error
                .server_message()
                .unwrap_or_else(|| GENERIC_ERROR.to_string()),
        },
        ApiError::Request(_) => UNREACHABLE.to_string(),
        ApiError::Unknown(message) => format!("Unknown error: {}", message),
    }
}
