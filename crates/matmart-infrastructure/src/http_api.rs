//! reqwest-backed implementation of the marketplace API traits.
//!
//! One shared [`reqwest::Client`] serves all endpoints. Every request
//! carries a stable per-process client id; authenticated requests add the
//! session token as a bearer credential. Transport failures map to
//! `MatmartError::Network`, 401s to `Auth`, other non-success statuses to
//! `Api` with the server's message when it sends one.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use matmart_core::api::{AuthApi, CartApi, NotificationApi};
use matmart_core::cart::CartResponse;
use matmart_core::error::{MatmartError, Result};
use matmart_core::notification::NotificationPage;
use matmart_core::session::{
    AuthResponse, CustomerRegistration, LoginRequest, SupplierRegistration,
};
use matmart_core::user::{RoleProfile, User, UserRole};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the marketplace REST API.
#[derive(Clone)]
pub struct HttpApi {
    client: Client,
    base_url: String,
    /// Stable per-process id, sent as `X-Client-Id` on every request.
    client_id: String,
}

impl HttpApi {
    /// Creates a client for the given API base URL (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| MatmartError::config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client_id: Uuid::new_v4().to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let mut builder = self
            .client
            .request(method, self.url(path))
            .header("X-Client-Id", &self.client_id);
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await.map_err(map_transport_error)?;
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(map_http_error(status, body))
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = self.send(builder).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| MatmartError::serialization("JSON", e.to_string()))
    }

    async fn send_unit(&self, builder: RequestBuilder) -> Result<()> {
        self.send(builder).await.map(|_| ())
    }
}

fn map_transport_error(err: reqwest::Error) -> MatmartError {
    if err.is_timeout() {
        MatmartError::network(format!("request timed out: {err}"))
    } else {
        MatmartError::network(err.to_string())
    }
}

/// Maps a non-success HTTP response to an error, preferring the server's
/// own `message` field over the raw body.
fn map_http_error(status: StatusCode, body: String) -> MatmartError {
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| {
            if body.is_empty() {
                status.to_string()
            } else {
                body
            }
        });

    if status == StatusCode::UNAUTHORIZED {
        MatmartError::auth(message)
    } else {
        MatmartError::api(status.as_u16(), message)
    }
}

#[async_trait]
impl AuthApi for HttpApi {
    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.send_json(self.request(Method::POST, "/auth/login", None).json(&body))
            .await
    }

    async fn logout(&self, token: &str) -> Result<()> {
        self.send_unit(self.request(Method::POST, "/auth/logout", Some(token)))
            .await
    }

    async fn register_customer(&self, data: &CustomerRegistration) -> Result<AuthResponse> {
        self.send_json(
            self.request(Method::POST, "/auth/register/customer", None)
                .json(data),
        )
        .await
    }

    async fn register_supplier(&self, data: &SupplierRegistration) -> Result<()> {
        self.send_unit(
            self.request(Method::POST, "/auth/register/supplier", None)
                .json(data),
        )
        .await
    }

    async fn current_user(&self, token: &str) -> Result<User> {
        self.send_json(self.request(Method::GET, "/users/me", Some(token)))
            .await
    }

    async fn fetch_role_profile(&self, token: &str, role: UserRole) -> Result<RoleProfile> {
        match role {
            UserRole::Customer => {
                let profile = self
                    .send_json(self.request(Method::GET, "/customers/me", Some(token)))
                    .await?;
                Ok(RoleProfile::Customer(profile))
            }
            UserRole::Supplier => {
                let profile = self
                    .send_json(self.request(Method::GET, "/suppliers/me", Some(token)))
                    .await?;
                Ok(RoleProfile::Supplier(profile))
            }
            UserRole::Admin => {
                let profile = self
                    .send_json(self.request(Method::GET, "/admins/me", Some(token)))
                    .await?;
                Ok(RoleProfile::Admin(profile))
            }
        }
    }
}

#[async_trait]
impl CartApi for HttpApi {
    async fn fetch_cart(&self, token: &str) -> Result<CartResponse> {
        self.send_json(self.request(Method::GET, "/cart", Some(token)))
            .await
    }

    async fn add_item(&self, token: &str, product_id: &str, quantity: u32) -> Result<()> {
        let body = serde_json::json!({
            "product_id": product_id,
            "quantity": quantity,
        });
        self.send_unit(
            self.request(Method::POST, "/cart/items", Some(token))
                .json(&body),
        )
        .await
    }

    async fn update_item(&self, token: &str, item_id: &str, quantity: u32) -> Result<()> {
        let body = serde_json::json!({ "quantity": quantity });
        self.send_unit(
            self.request(Method::PATCH, &format!("/cart/items/{item_id}"), Some(token))
                .json(&body),
        )
        .await
    }

    async fn remove_item(&self, token: &str, item_id: &str) -> Result<()> {
        self.send_unit(self.request(
            Method::DELETE,
            &format!("/cart/items/{item_id}"),
            Some(token),
        ))
        .await
    }

    async fn clear_cart(&self, token: &str) -> Result<()> {
        self.send_unit(self.request(Method::DELETE, "/cart", Some(token)))
            .await
    }
}

#[async_trait]
impl NotificationApi for HttpApi {
    async fn fetch(&self, token: &str, limit: u32, offset: u32) -> Result<NotificationPage> {
        self.send_json(
            self.request(
                Method::GET,
                &format!("/notifications?limit={limit}&offset={offset}"),
                Some(token),
            ),
        )
        .await
    }

    async fn mark_read(&self, token: &str, id: &str) -> Result<()> {
        self.send_unit(self.request(
            Method::PATCH,
            &format!("/notifications/{id}/read"),
            Some(token),
        ))
        .await
    }

    async fn mark_all_read(&self, token: &str) -> Result<()> {
        self.send_unit(self.request(Method::POST, "/notifications/read-all", Some(token)))
            .await
    }
}
