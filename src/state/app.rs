//! Session and catalog state plus the reducer that mutates it.
//!
//! DESIGN
//! ======
//! All changes go through [`AppState::apply`], which reports whether
//! anything changed and whether the blog filter moved. The store uses the
//! first to decide whether to notify subscribers and the second to trigger
//! a blog-list refetch.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use serde::Serialize;

use crate::config::BlogResponsePolicy;
use crate::net::types::{Blog, BlogFilter, SavedBlog, User};

/// Everything UI consumers can read from the store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AppState {
    pub user: Option<User>,
    pub is_auth: bool,
    /// True until the first identity lookup settles.
    pub loading: bool,
    pub blog_loading: bool,
    /// `None` until the first successful blog-list fetch.
    pub blogs: Option<Vec<Blog>>,
    pub saved_blogs: Option<Vec<SavedBlog>>,
    pub category: String,
    pub search_query: String,
    /// Number of the most recently issued blog-list request.
    #[serde(skip)]
    pub blog_generation: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            user: None,
            is_auth: false,
            loading: true,
            blog_loading: true,
            blogs: None,
            saved_blogs: None,
            category: String::new(),
            search_query: String::new(),
            blog_generation: 0,
        }
    }
}

impl AppState {
    /// The current search/category pair.
    #[must_use]
    pub fn filter(&self) -> BlogFilter {
        BlogFilter::new(self.search_query.clone(), self.category.clone())
    }

    /// Apply one mutation and report its effect.
    pub fn apply(&mut self, action: Action) -> Change {
        match action {
            Action::SetUser(user) => replace(&mut self.user, user),
            Action::SetLoading(loading) => replace(&mut self.loading, loading),
            Action::SetAuthenticated(is_auth) => replace(&mut self.is_auth, is_auth),
            Action::SetSearchQuery(query) => replace(&mut self.search_query, query).as_filter(),
            Action::SetCategory(category) => replace(&mut self.category, category).as_filter(),
            Action::SetFilter(BlogFilter { search_query, category }) => {
                let query_changed = replace(&mut self.search_query, search_query);
                query_changed.merge(replace(&mut self.category, category)).as_filter()
            }
            Action::UserLoaded(user) | Action::SignedIn(user) => {
                let user_changed = replace(&mut self.user, Some(user));
                user_changed.merge(replace(&mut self.is_auth, true))
            }
            Action::UserLoadSettled => replace(&mut self.loading, false),
            Action::BlogsRequested => {
                self.blog_generation += 1;
                self.blog_loading = true;
                Change::State
            }
            Action::BlogsFinished { generation, blogs, policy } => {
                if generation != self.blog_generation && policy == BlogResponsePolicy::LatestOnly {
                    return Change::None;
                }
                let loaded = blogs.map_or(Change::None, |blogs| replace(&mut self.blogs, Some(blogs)));
                loaded.merge(replace(&mut self.blog_loading, false))
            }
            Action::SavedBlogsLoaded(saved) => replace(&mut self.saved_blogs, Some(saved)),
            Action::SignedOut => {
                let user_changed = replace(&mut self.user, None);
                user_changed.merge(replace(&mut self.is_auth, false))
            }
        }
    }
}

/// Every mutation the store can perform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    SetUser(Option<User>),
    SetLoading(bool),
    SetAuthenticated(bool),
    SetSearchQuery(String),
    SetCategory(String),
    /// Replace query and category in one step.
    SetFilter(BlogFilter),
    /// Identity lookup succeeded.
    UserLoaded(User),
    /// Identity lookup finished, successfully or not.
    UserLoadSettled,
    /// A blog-list request was issued; bumps `blog_generation`.
    BlogsRequested,
    /// Blog-list request `generation` finished. `blogs` is `None` when the
    /// fetch failed. Ignored under `LatestOnly` once a newer request exists.
    BlogsFinished {
        generation: u64,
        blogs: Option<Vec<Blog>>,
        policy: BlogResponsePolicy,
    },
    SavedBlogsLoaded(Vec<SavedBlog>),
    SignedIn(User),
    SignedOut,
}

/// Outcome of [`AppState::apply`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Change {
    None,
    State,
    /// Search query or category changed; the blog list is stale.
    Filter,
}

impl Change {
    #[must_use]
    pub fn is_changed(self) -> bool {
        !matches!(self, Self::None)
    }

    fn as_filter(self) -> Self {
        match self {
            Self::None => Self::None,
            Self::State | Self::Filter => Self::Filter,
        }
    }

    fn merge(self, other: Self) -> Self {
        match (self, other) {
            (Self::Filter, _) | (_, Self::Filter) => Self::Filter,
            (Self::State, _) | (_, Self::State) => Self::State,
            (Self::None, Self::None) => Self::None,
        }
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> Change {
    if *slot == value {
        return Change::None;
    }
    *slot = value;
    Change::State
}
