//! Shared session/catalog store handed to UI consumers.
//!
//! DESIGN
//! ======
//! [`AppStore`] is a cheap `Clone` handle around one `watch` channel holding
//! [`AppState`]. Consumers receive the handle explicitly; there is no global
//! lookup. Every mutation funnels through the reducer in `state::app`, and
//! a change to the search query or category spawns a blog-list reload.
//!
//! ERROR HANDLING
//! ==============
//! Fetch failures are logged and swallowed. Consumers only ever see absent
//! or stale data, never an error.
//!
//! CONCURRENCY
//! ===========
//! Fetches are never cancelled. Each blog-list request carries a generation
//! number kept in [`AppState`]; [`BlogResponsePolicy`] decides whether a
//! response from a superseded request may still overwrite the list. Issuing
//! a request and applying its response each happen inside one `watch`
//! write, so the generation check cannot race a newer request.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

use super::app::{Action, AppState, Change};
use super::notify::{Notification, Notifier};
use crate::config::ClientConfig;
pub use crate::config::BlogResponsePolicy;
use crate::net::api::{BlogBackend, HttpBackend};
use crate::net::session::SessionCredential;
use crate::net::types::{ApiError, BlogFilter, User, is_known_category};

/// Result of [`AppStore::dispatch`].
#[derive(Debug)]
pub struct Dispatched {
    pub change: Change,
    /// Blog-list reload spawned because the filter changed.
    pub refetch: Option<JoinHandle<()>>,
}

#[derive(Clone)]
pub struct AppStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    backend: Arc<dyn BlogBackend>,
    session: SessionCredential,
    state: watch::Sender<AppState>,
    notifier: Notifier,
    policy: BlogResponsePolicy,
    mounted: AtomicBool,
}

impl AppStore {
    #[must_use]
    pub fn new(backend: Arc<dyn BlogBackend>, session: SessionCredential, policy: BlogResponsePolicy) -> Self {
        let (state, _) = watch::channel(AppState::default());
        Self {
            inner: Arc::new(StoreInner {
                backend,
                session,
                state,
                notifier: Notifier::default(),
                policy,
                mounted: AtomicBool::new(false),
            }),
        }
    }

    /// Build a store backed by the HTTP services named in `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn from_config(config: &ClientConfig, session: SessionCredential) -> Result<Self, ApiError> {
        let backend = HttpBackend::new(config, session.clone())?;
        Ok(Self::new(Arc::new(backend), session, config.blog_response_policy))
    }

    // =========================================================================
    // READ ACCESS
    // =========================================================================

    /// Snapshot of the full state bundle.
    #[must_use]
    pub fn state(&self) -> AppState {
        self.inner.state.borrow().clone()
    }

    /// Receiver that observes every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.inner.state.subscribe()
    }

    #[must_use]
    pub fn notifications(&self) -> broadcast::Receiver<Notification> {
        self.inner.notifier.subscribe()
    }

    #[must_use]
    pub fn session(&self) -> &SessionCredential {
        &self.inner.session
    }

    // =========================================================================
    // MUTATION
    // =========================================================================

    /// Apply `action` to the state. A filter change spawns a blog-list
    /// reload on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if the filter changes while called outside a tokio runtime.
    pub fn dispatch(&self, action: Action) -> Dispatched {
        warn_unknown_category(&action);
        let mut change = Change::None;
        let mut request = None;
        self.inner.state.send_if_modified(|state| {
            change = state.apply(action);
            if change == Change::Filter {
                request = Some(issue_blog_request(state));
            }
            change.is_changed()
        });
        let refetch = request.map(|request| tokio::spawn(self.clone().run_blog_request(request)));
        Dispatched { change, refetch }
    }

    fn commit(&self, action: Action) -> Change {
        let mut change = Change::None;
        self.inner.state.send_if_modified(|state| {
            change = state.apply(action);
            change.is_changed()
        });
        change
    }

    pub fn set_user(&self, user: Option<User>) {
        self.dispatch(Action::SetUser(user));
    }

    pub fn set_loading(&self, loading: bool) {
        self.dispatch(Action::SetLoading(loading));
    }

    pub fn set_is_auth(&self, is_auth: bool) {
        self.dispatch(Action::SetAuthenticated(is_auth));
    }

    /// Returns the spawned reload when the query actually changed.
    ///
    /// # Panics
    ///
    /// Panics on a change outside a tokio runtime; see [`Self::dispatch`].
    pub fn set_search_query(&self, query: impl Into<String>) -> Option<JoinHandle<()>> {
        self.dispatch(Action::SetSearchQuery(query.into())).refetch
    }

    /// Returns the spawned reload when the category actually changed.
    ///
    /// # Panics
    ///
    /// Panics on a change outside a tokio runtime; see [`Self::dispatch`].
    pub fn set_category(&self, category: impl Into<String>) -> Option<JoinHandle<()>> {
        self.dispatch(Action::SetCategory(category.into())).refetch
    }

    /// Set query and category together. At most one reload is spawned.
    ///
    /// # Panics
    ///
    /// Panics on a change outside a tokio runtime; see [`Self::dispatch`].
    pub fn set_filter(&self, filter: BlogFilter) -> Option<JoinHandle<()>> {
        self.dispatch(Action::SetFilter(filter)).refetch
    }

    // =========================================================================
    // OPERATIONS
    // =========================================================================

    /// Initial load: identity, saved blogs and the blog list, concurrently.
    /// Only the first call on a store does anything.
    pub async fn mount(&self) {
        if self.inner.mounted.swap(true, Ordering::SeqCst) {
            tracing::debug!("store already mounted");
            return;
        }
        tracing::info!(session = self.inner.session.is_present(), "mounting store");
        tokio::join!(self.load_current_user(), self.load_saved_blogs(), self.load_blogs());
    }

    /// Look up the session holder. `loading` is cleared whatever the outcome.
    pub async fn load_current_user(&self) {
        match self.inner.backend.fetch_current_user().await {
            Ok(user) => {
                tracing::debug!(user_id = %user.id, "current user loaded");
                self.commit(Action::UserLoaded(user));
            }
            Err(e) => tracing::warn!(error = %e, unauthorized = e.is_unauthorized(), "fetch current user failed"),
        }
        self.commit(Action::UserLoadSettled);
    }

    /// Reload the blog list for the filter as it is right now.
    ///
    /// The filter is captured and `blog_loading` raised when this is called,
    /// not when the returned future is first polled.
    pub fn load_blogs(&self) -> impl Future<Output = ()> + Send + 'static {
        let mut request = BlogRequest::default();
        self.inner.state.send_modify(|state| request = issue_blog_request(state));
        self.clone().run_blog_request(request)
    }

    async fn run_blog_request(self, request: BlogRequest) {
        let BlogRequest { generation, filter } = request;
        let blogs = match self.inner.backend.fetch_blogs(&filter).await {
            Ok(blogs) => {
                tracing::debug!(
                    count = blogs.len(),
                    generation,
                    search_query = %filter.search_query,
                    category = %filter.category,
                    "blog list received"
                );
                Some(blogs)
            }
            Err(e) => {
                tracing::warn!(error = %e, generation, "fetch blogs failed");
                None
            }
        };

        let policy = self.inner.policy;
        let mut superseded = false;
        self.inner.state.send_if_modified(|state| {
            superseded = state.blog_generation != generation;
            state.apply(Action::BlogsFinished { generation, blogs, policy }).is_changed()
        });
        if superseded {
            tracing::debug!(generation, ?policy, "blog list request superseded");
        }
    }

    pub async fn load_saved_blogs(&self) {
        match self.inner.backend.fetch_saved_blogs().await {
            Ok(saved) => {
                tracing::debug!(count = saved.len(), "saved blogs loaded");
                self.commit(Action::SavedBlogsLoaded(saved));
            }
            Err(e) => tracing::warn!(error = %e, "fetch saved blogs failed"),
        }
    }

    /// Forget the session locally. No server call; blog collections stay.
    pub fn logout(&self) {
        let had_token = self.inner.session.clear();
        self.commit(Action::SignedOut);
        tracing::info!(had_token, "session cleared");
        self.inner.notifier.success("User Logged Out");
    }

    /// Record a completed login: keep the issued token and mark the user
    /// authenticated.
    pub fn sign_in(&self, token: impl Into<String>, user: User) {
        self.inner.session.set(token.into());
        let message = format!("Signed in as {}", user.name);
        self.commit(Action::SignedIn(user));
        self.inner.notifier.success(message);
    }
}

/// A blog-list request as issued: its generation and the filter it carries.
#[derive(Debug, Default)]
struct BlogRequest {
    generation: u64,
    filter: BlogFilter,
}

fn issue_blog_request(state: &mut AppState) -> BlogRequest {
    state.apply(Action::BlogsRequested);
    BlogRequest { generation: state.blog_generation, filter: state.filter() }
}

/// Unknown categories are still sent to the blog service; they are only logged.
fn warn_unknown_category(action: &Action) {
    let (Action::SetCategory(category) | Action::SetFilter(BlogFilter { category, .. })) = action else {
        return;
    };
    if !category.is_empty() && !is_known_category(category) {
        tracing::warn!(%category, "category is not one of the known blog categories");
    }
}
