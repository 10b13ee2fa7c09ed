//! Backend seam for the store plus its HTTP implementation.
//!
//! DESIGN
//! ======
//! The store talks to [`BlogBackend`] only, so tests substitute scripted
//! backends. [`HttpBackend`] is a thin `reqwest` wrapper over three GET
//! endpoints; parsing is kept in free functions for testability.
//!
//! ERROR HANDLING
//! ==============
//! Every failure is returned as an [`ApiError`]. The store decides what to
//! do with it (log and keep prior state).

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::time::Duration;

use reqwest::header::COOKIE;
use serde::de::DeserializeOwned;

use super::session::SessionCredential;
use super::types::{ApiError, Blog, BlogFilter, SavedBlog, User};
use crate::config::{ClientConfig, ServiceName};

const ME_PATH: &str = "/api/v1/me";
const BLOG_LIST_PATH: &str = "/api/v1/blog/all";
const SAVED_BLOGS_PATH: &str = "/api/v1/blog/saved/all";

/// Operations the store needs from the user and blog services.
#[async_trait::async_trait]
pub trait BlogBackend: Send + Sync {
    /// Identify the session holder. Credentialed.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] when there is no valid session or the request fails.
    async fn fetch_current_user(&self) -> Result<User, ApiError>;

    /// List blogs matching `filter`. Not credentialed.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or the body is malformed.
    async fn fetch_blogs(&self, filter: &BlogFilter) -> Result<Vec<Blog>, ApiError>;

    /// List the session holder's bookmarks. Credentialed.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] when there is no valid session or the request fails.
    async fn fetch_saved_blogs(&self) -> Result<Vec<SavedBlog>, ApiError>;
}

// =============================================================================
// HTTP BACKEND
// =============================================================================

pub struct HttpBackend {
    http: reqwest::Client,
    user_service: String,
    blog_service: String,
    session: SessionCredential,
}

impl HttpBackend {
    /// Build a backend for the services named in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::HttpClientBuild`] if the HTTP client cannot be constructed.
    pub fn new(config: &ClientConfig, session: SessionCredential) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
        Ok(Self {
            http,
            user_service: config.base_url(ServiceName::User).to_owned(),
            blog_service: config.base_url(ServiceName::Blog).to_owned(),
            session,
        })
    }

    fn get(&self, url: &str, credentialed: bool) -> reqwest::RequestBuilder {
        let request = self.http.get(url);
        if !credentialed {
            return request;
        }
        match self.session.cookie_header() {
            Some(cookie) => request.header(COOKIE, cookie),
            None => request,
        }
    }

    async fn send_json<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::ApiRequest(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::ApiRequest(e.to_string()))?;

        if !status.is_success() {
            return Err(ApiError::ApiResponse { status: status.as_u16(), body: text });
        }

        parse_json(&text)
    }
}

#[async_trait::async_trait]
impl BlogBackend for HttpBackend {
    async fn fetch_current_user(&self) -> Result<User, ApiError> {
        let url = endpoint(&self.user_service, ME_PATH);
        self.send_json(self.get(&url, true)).await
    }

    async fn fetch_blogs(&self, filter: &BlogFilter) -> Result<Vec<Blog>, ApiError> {
        let url = endpoint(&self.blog_service, BLOG_LIST_PATH);
        let request = self.get(&url, false).query(&filter.query_pairs());
        self.send_json(request).await
    }

    async fn fetch_saved_blogs(&self) -> Result<Vec<SavedBlog>, ApiError> {
        let url = endpoint(&self.blog_service, SAVED_BLOGS_PATH);
        self.send_json(self.get(&url, true)).await
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{path}", base_url.trim_end_matches('/'))
}

fn parse_json<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    serde_json::from_str(text).map_err(|e| ApiError::ApiParse(e.to_string()))
}
