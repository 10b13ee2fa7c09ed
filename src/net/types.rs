//! Wire DTOs for the user and blog services, plus API errors.
//!
//! DESIGN
//! ======
//! Field names follow the services' JSON (`_id`, `blogcontent`, `create_at`)
//! through serde renames so the Rust side can use readable names. Ids are
//! accepted as strings or numbers because the blog service hands out
//! numeric row ids.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Categories offered by the category picker.
pub const BLOG_CATEGORIES: [&str; 7] =
    ["Technology", "Health", "Finance", "Travel", "Education", "Entertainment", "Study"];

/// Whether `category` is one of [`BLOG_CATEGORIES`] (exact match).
#[must_use]
pub fn is_known_category(category: &str) -> bool {
    BLOG_CATEGORIES.contains(&category)
}

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by backend calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request could not be sent or its body could not be read.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The service returned a non-success HTTP status.
    #[error("API response error: status {status}")]
    ApiResponse { status: u16, body: String },

    /// The response body could not be deserialized.
    #[error("API response parse failed: {0}")]
    ApiParse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl ApiError {
    /// `true` for 401/403 responses, i.e. the session is missing or expired.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::ApiResponse { status: 401 | 403, .. })
    }
}

// =============================================================================
// USER
// =============================================================================

/// The signed-in user as returned by the user service's `/api/v1/me`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    /// Avatar image URL.
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub image: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub instagram: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub facebook: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub linkedin: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub bio: String,
}

// =============================================================================
// BLOGS
// =============================================================================

/// A published blog post from `/api/v1/blog/all`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blog {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub description: String,
    /// Post body, stored by the blog service as `blogcontent`.
    #[serde(rename = "blogcontent", default, deserialize_with = "deserialize_nullable_string")]
    pub content: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub image: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub category: String,
    /// Author's user id.
    #[serde(deserialize_with = "deserialize_id")]
    pub author: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub created_at: String,
}

/// A bookmark linking a user to a blog, from `/api/v1/blog/saved/all`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedBlog {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(rename = "userid", deserialize_with = "deserialize_id")]
    pub user_id: String,
    #[serde(rename = "blogid", deserialize_with = "deserialize_id")]
    pub blog_id: String,
    #[serde(rename = "create_at", alias = "created_at", default, deserialize_with = "deserialize_nullable_string")]
    pub created_at: String,
}

/// Search text and category that select which blogs are listed.
/// Empty strings mean "no filter".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogFilter {
    #[serde(rename = "searchQuery")]
    pub search_query: String,
    pub category: String,
}

impl BlogFilter {
    #[must_use]
    pub fn new(search_query: impl Into<String>, category: impl Into<String>) -> Self {
        Self { search_query: search_query.into(), category: category.into() }
    }

    /// Query-string pairs in the order the listing endpoint expects.
    #[must_use]
    pub fn query_pairs(&self) -> [(&'static str, &str); 2] {
        [("searchQuery", self.search_query.as_str()), ("category", self.category.as_str())]
    }
}

// =============================================================================
// SERDE HELPERS
// =============================================================================

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(number) => {
            if number.is_i64() || number.is_u64() {
                Ok(number.to_string())
            } else {
                Err(D::Error::custom("expected integer id"))
            }
        }
        _ => Err(D::Error::custom("expected string or integer id")),
    }
}

fn deserialize_nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
