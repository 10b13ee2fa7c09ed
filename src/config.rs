//! Client configuration parsed from environment variables.
//!
//! DESIGN
//! ======
//! Base URLs for the user, author and blog services are resolved once at
//! startup. `USE_PROD_API` picks between the hosted and local defaults and
//! per-service variables override either set.

use std::fmt;

pub const PROD_USER_SERVICE_URL: &str = "https://user-service-production-sva4.onrender.com";
pub const PROD_AUTHOR_SERVICE_URL: &str = "https://author-service-production.onrender.com";
pub const PROD_BLOG_SERVICE_URL: &str = "https://blog-service-production.onrender.com";

pub const LOCAL_USER_SERVICE_URL: &str = "http://localhost:5000";
pub const LOCAL_AUTHOR_SERVICE_URL: &str = "http://localhost:5001";
pub const LOCAL_BLOG_SERVICE_URL: &str = "http://localhost:5002";

/// Errors produced while resolving [`ClientConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// A service base URL is not an absolute http(s) URL.
    #[error("invalid base URL for {service} service: {url}")]
    InvalidBaseUrl { service: ServiceName, url: String },
}

/// Backend services the front-end talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceName {
    User,
    Author,
    Blog,
}

impl ServiceName {
    pub const ALL: [Self; 3] = [Self::User, Self::Author, Self::Blog];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Author => "author",
            Self::Blog => "blog",
        }
    }

    fn env_var(self) -> &'static str {
        match self {
            Self::User => "USER_SERVICE_URL",
            Self::Author => "AUTHOR_SERVICE_URL",
            Self::Blog => "BLOG_SERVICE_URL",
        }
    }

    fn default_url(self, environment: ApiEnvironment) -> &'static str {
        match (environment, self) {
            (ApiEnvironment::Production, Self::User) => PROD_USER_SERVICE_URL,
            (ApiEnvironment::Production, Self::Author) => PROD_AUTHOR_SERVICE_URL,
            (ApiEnvironment::Production, Self::Blog) => PROD_BLOG_SERVICE_URL,
            (ApiEnvironment::Local, Self::User) => LOCAL_USER_SERVICE_URL,
            (ApiEnvironment::Local, Self::Author) => LOCAL_AUTHOR_SERVICE_URL,
            (ApiEnvironment::Local, Self::Blog) => LOCAL_BLOG_SERVICE_URL,
        }
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which set of default service URLs applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiEnvironment {
    Production,
    #[default]
    Local,
}

/// How the store treats a blog-list response whose request has been
/// superseded by a newer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlogResponsePolicy {
    /// Only the most recently issued request may update the list.
    #[default]
    LatestOnly,
    /// Every response is applied as it arrives; a slow earlier response can
    /// overwrite a newer one.
    ArrivalOrder,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceUrls {
    pub user: String,
    pub author: String,
    pub blog: String,
}

impl ServiceUrls {
    #[must_use]
    pub fn defaults(environment: ApiEnvironment) -> Self {
        Self {
            user: ServiceName::User.default_url(environment).to_owned(),
            author: ServiceName::Author.default_url(environment).to_owned(),
            blog: ServiceName::Blog.default_url(environment).to_owned(),
        }
    }

    fn slot_mut(&mut self, service: ServiceName) -> &mut String {
        match service {
            ServiceName::User => &mut self.user,
            ServiceName::Author => &mut self.author,
            ServiceName::Blog => &mut self.blog,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub environment: ApiEnvironment,
    pub services: ServiceUrls,
    /// OAuth client identifier handed to the federated login widget.
    pub google_client_id: Option<String>,
    /// Per-request timeout. `None` lets a hung request wait forever.
    pub request_timeout_secs: Option<u64>,
    pub blog_response_policy: BlogResponsePolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::for_environment(ApiEnvironment::Local)
    }
}

impl ClientConfig {
    #[must_use]
    pub fn for_environment(environment: ApiEnvironment) -> Self {
        Self {
            environment,
            services: ServiceUrls::defaults(environment),
            google_client_id: None,
            request_timeout_secs: None,
            blog_response_policy: BlogResponsePolicy::default(),
        }
    }

    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `USE_PROD_API`: hosted service defaults when true, localhost otherwise
    /// - `USER_SERVICE_URL`, `AUTHOR_SERVICE_URL`, `BLOG_SERVICE_URL`: overrides
    /// - `GOOGLE_CLIENT_ID`: OAuth client identifier
    /// - `REQUEST_TIMEOUT_SECS`: request timeout, none when absent
    /// - `BLOG_RESPONSE_POLICY`: `latest` (default) or `arrival`
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = match env_bool("USE_PROD_API") {
            Some(true) => ApiEnvironment::Production,
            _ => ApiEnvironment::Local,
        };
        let mut config = Self::for_environment(environment);

        for service in ServiceName::ALL {
            if let Some(url) = env_non_empty(service.env_var()) {
                config = config.with_base_url(service, &url)?;
            }
        }

        config.google_client_id = env_non_empty("GOOGLE_CLIENT_ID");
        config.request_timeout_secs = match env_non_empty("REQUEST_TIMEOUT_SECS") {
            Some(raw) => Some(
                raw.parse::<u64>()
                    .map_err(|_| ConfigError::ConfigParse(format!("invalid REQUEST_TIMEOUT_SECS: {raw}")))?,
            ),
            None => None,
        };
        config.blog_response_policy = parse_blog_response_policy(env_non_empty("BLOG_RESPONSE_POLICY").as_deref())?;

        Ok(config)
    }

    /// Replace the base URL for one service.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] unless `url` is an absolute
    /// http or https URL.
    pub fn with_base_url(mut self, service: ServiceName, url: &str) -> Result<Self, ConfigError> {
        *self.services.slot_mut(service) = normalize_base_url(service, url)?;
        Ok(self)
    }

    #[must_use]
    pub fn base_url(&self, service: ServiceName) -> &str {
        match service {
            ServiceName::User => &self.services.user,
            ServiceName::Author => &self.services.author,
            ServiceName::Blog => &self.services.blog,
        }
    }
}

fn normalize_base_url(service: ServiceName, raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let invalid = || ConfigError::InvalidBaseUrl { service, url: raw.to_owned() };
    let parsed = reqwest::Url::parse(trimmed).map_err(|_| invalid())?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(invalid());
    }
    Ok(trimmed.to_owned())
}

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

fn parse_blog_response_policy(raw: Option<&str>) -> Result<BlogResponsePolicy, ConfigError> {
    match raw.unwrap_or("latest") {
        "latest" => Ok(BlogResponsePolicy::LatestOnly),
        "arrival" => Ok(BlogResponsePolicy::ArrivalOrder),
        other => Err(ConfigError::ConfigParse(format!(
            "unsupported BLOG_RESPONSE_POLICY '{other}' (expected 'latest' or 'arrival')"
        ))),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
