use super::*;

fn make_user(id: &str) -> User {
    User {
        id: id.to_owned(),
        name: "Alice".to_owned(),
        email: "alice@example.com".to_owned(),
        image: String::new(),
        instagram: String::new(),
        facebook: String::new(),
        linkedin: String::new(),
        bio: String::new(),
    }
}

fn finished(generation: u64, blogs: Option<Vec<Blog>>, policy: BlogResponsePolicy) -> Action {
    Action::BlogsFinished { generation, blogs, policy }
}

/// Issue a request and finish it as the latest one.
fn finish_latest(state: &mut AppState, blogs: Option<Vec<Blog>>) -> Change {
    state.apply(Action::BlogsRequested);
    let generation = state.blog_generation;
    state.apply(finished(generation, blogs, BlogResponsePolicy::LatestOnly))
}

fn blog_ids(state: &AppState) -> Vec<String> {
    state.blogs.iter().flatten().map(|b| b.id.clone()).collect()
}

fn make_blog(id: &str) -> Blog {
    Blog {
        id: id.to_owned(),
        title: format!("Post {id}"),
        description: String::new(),
        content: String::new(),
        image: String::new(),
        category: "Technology".to_owned(),
        author: "u1".to_owned(),
        created_at: "2025-03-01".to_owned(),
    }
}

// =============================================================
// Defaults
// =============================================================

#[test]
fn default_state_is_loading_and_signed_out() {
    let state = AppState::default();
    assert!(state.loading);
    assert!(state.blog_loading);
    assert!(!state.is_auth);
    assert!(state.user.is_none());
    assert!(state.blogs.is_none());
    assert!(state.saved_blogs.is_none());
    assert_eq!(state.filter(), BlogFilter::default());
}

// =============================================================
// Filter changes
// =============================================================

#[test]
fn category_change_reports_filter() {
    let mut state = AppState::default();
    assert_eq!(state.apply(Action::SetCategory("Health".into())), Change::Filter);
    assert_eq!(state.filter(), BlogFilter::new("", "Health"));
}

#[test]
fn set_filter_changes_both_fields_in_one_step() {
    let mut state = AppState::default();
    assert_eq!(state.apply(Action::SetFilter(BlogFilter::new("rust", "Health"))), Change::Filter);
    assert_eq!(state.filter(), BlogFilter::new("rust", "Health"));

    assert_eq!(state.apply(Action::SetFilter(BlogFilter::new("rust", "Health"))), Change::None);
    assert_eq!(state.apply(Action::SetFilter(BlogFilter::new("rust", ""))), Change::Filter);
    assert_eq!(state.search_query, "rust");
    assert_eq!(state.category, "");
}

#[test]
fn same_filter_value_is_not_a_change() {
    let mut state = AppState::default();
    state.apply(Action::SetSearchQuery("rust".into()));
    assert_eq!(state.apply(Action::SetSearchQuery("rust".into())), Change::None);
    assert_eq!(state.apply(Action::SetCategory(String::new())), Change::None);
}

// =============================================================
// Identity
// =============================================================

#[test]
fn user_loaded_sets_user_and_auth_together() {
    let mut state = AppState::default();
    assert_eq!(state.apply(Action::UserLoaded(make_user("u1"))), Change::State);
    assert!(state.is_auth);
    assert_eq!(state.user.as_ref().map(|u| u.id.as_str()), Some("u1"));
    assert!(state.loading, "settling is a separate step");

    state.apply(Action::UserLoadSettled);
    assert!(!state.loading);
}

#[test]
fn signed_out_clears_identity_but_keeps_collections() {
    let mut state = AppState::default();
    state.apply(Action::SignedIn(make_user("u1")));
    finish_latest(&mut state, Some(vec![make_blog("1")]));
    state.apply(Action::SavedBlogsLoaded(Vec::new()));

    assert_eq!(state.apply(Action::SignedOut), Change::State);
    assert!(state.user.is_none());
    assert!(!state.is_auth);
    assert_eq!(state.blogs.as_ref().map(Vec::len), Some(1));
    assert!(state.saved_blogs.is_some());
}

#[test]
fn signed_out_twice_is_a_no_op() {
    let mut state = AppState::default();
    assert_eq!(state.apply(Action::SignedOut), Change::None);
}

#[test]
fn raw_setters_touch_only_their_field() {
    let mut state = AppState::default();
    state.apply(Action::SetAuthenticated(true));
    assert!(state.is_auth);
    assert!(state.user.is_none());

    state.apply(Action::SetUser(Some(make_user("u2"))));
    state.apply(Action::SetLoading(false));
    assert!(!state.loading);
    assert_eq!(state.user.as_ref().map(|u| u.id.as_str()), Some("u2"));
}

// =============================================================
// Blog list
// =============================================================

#[test]
fn blogs_finished_replaces_wholesale() {
    let mut state = AppState::default();
    finish_latest(&mut state, Some(vec![make_blog("1"), make_blog("2")]));
    finish_latest(&mut state, Some(vec![make_blog("3")]));
    assert_eq!(blog_ids(&state), vec!["3"]);
}

#[test]
fn blog_loading_brackets_a_request() {
    let mut state = AppState::default();
    assert_eq!(state.apply(Action::BlogsRequested), Change::State);
    assert!(state.blog_loading);
    assert_eq!(state.blog_generation, 1);

    assert_eq!(state.apply(finished(1, None, BlogResponsePolicy::LatestOnly)), Change::State);
    assert!(!state.blog_loading);
    assert!(state.blogs.is_none(), "a failed fetch leaves the list alone");
}

#[test]
fn latest_only_ignores_a_finish_after_a_newer_request() {
    let mut state = AppState::default();
    state.apply(Action::BlogsRequested);
    state.apply(Action::BlogsRequested);

    let stale = finished(1, Some(vec![make_blog("old")]), BlogResponsePolicy::LatestOnly);
    assert_eq!(state.apply(stale), Change::None);
    assert!(state.blog_loading, "request 2 is still in flight");
    assert!(state.blogs.is_none());

    state.apply(finished(2, Some(vec![make_blog("new")]), BlogResponsePolicy::LatestOnly));
    assert!(!state.blog_loading);
    assert_eq!(blog_ids(&state), vec!["new"]);
}

#[test]
fn arrival_order_applies_every_finish() {
    let mut state = AppState::default();
    state.apply(Action::BlogsRequested);
    state.apply(Action::BlogsRequested);

    state.apply(finished(2, Some(vec![make_blog("new")]), BlogResponsePolicy::ArrivalOrder));
    state.apply(finished(1, Some(vec![make_blog("old")]), BlogResponsePolicy::ArrivalOrder));
    assert!(!state.blog_loading);
    assert_eq!(blog_ids(&state), vec!["old"]);
}

#[test]
fn generation_is_not_serialized() {
    let mut state = AppState::default();
    state.apply(Action::BlogsRequested);
    let json = serde_json::to_value(&state).unwrap();
    assert!(json.get("blog_generation").is_none());
    assert_eq!(json["blog_loading"], true);
}
