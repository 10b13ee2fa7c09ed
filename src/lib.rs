//! # blog-client
//!
//! Session and catalog store for the blogging front-end.
//!
//! This crate holds the signed-in user, the filtered blog list and the
//! user's saved blogs, and keeps them in sync with the user and blog
//! services over HTTP. UI layers receive an [`AppStore`] handle and read
//! or mutate state through it.

pub mod config;
pub mod net;
pub mod state;

pub use config::{ClientConfig, ServiceName};
pub use net::types::{ApiError, BLOG_CATEGORIES, Blog, BlogFilter, SavedBlog, User};
pub use state::store::AppStore;
