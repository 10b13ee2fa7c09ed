use super::*;

// =============================================================
// User
// =============================================================

#[test]
fn user_reads_mongo_style_id() {
    let user: User = serde_json::from_value(serde_json::json!({
        "_id": "665f1c",
        "name": "Alice",
        "email": "alice@example.com",
        "image": "https://cdn.example.com/alice.png",
        "instagram": "https://instagram.com/alice",
        "facebook": "",
        "linkedin": "https://linkedin.com/in/alice",
        "bio": "Writes about Rust."
    }))
    .unwrap();
    assert_eq!(user.id, "665f1c");
    assert_eq!(user.image, "https://cdn.example.com/alice.png");
    assert_eq!(user.bio, "Writes about Rust.");
}

#[test]
fn user_missing_or_null_profile_fields_default_to_empty() {
    let user: User = serde_json::from_value(serde_json::json!({
        "_id": "u1",
        "name": "Bob",
        "email": "bob@example.com",
        "bio": null
    }))
    .unwrap();
    assert_eq!(user.instagram, "");
    assert_eq!(user.linkedin, "");
    assert_eq!(user.bio, "");
}

#[test]
fn user_serializes_id_under_wire_name() {
    let user: User = serde_json::from_value(serde_json::json!({
        "_id": "u1", "name": "Bob", "email": "bob@example.com"
    }))
    .unwrap();
    let json = serde_json::to_value(&user).unwrap();
    assert_eq!(json["_id"], "u1");
    assert!(json.get("id").is_none());
}

// =============================================================
// Blog / SavedBlog
// =============================================================

#[test]
fn blog_maps_blogcontent_and_numeric_id() {
    let blog: Blog = serde_json::from_value(serde_json::json!({
        "id": 42,
        "title": "Ownership in practice",
        "description": "Borrowing without tears",
        "blogcontent": "<p>body</p>",
        "image": null,
        "category": "Technology",
        "author": "665f1c",
        "created_at": "2025-03-01T10:00:00.000Z"
    }))
    .unwrap();
    assert_eq!(blog.id, "42");
    assert_eq!(blog.content, "<p>body</p>");
    assert_eq!(blog.image, "");
    assert_eq!(blog.category, "Technology");
}

#[test]
fn blog_rejects_fractional_id() {
    let result: Result<Blog, _> = serde_json::from_value(serde_json::json!({
        "id": 4.5, "title": "t", "author": "a"
    }));
    assert!(result.is_err());
}

#[test]
fn saved_blog_accepts_create_at_and_created_at() {
    let legacy: SavedBlog = serde_json::from_value(serde_json::json!({
        "id": 1, "userid": "u1", "blogid": 7, "create_at": "2025-03-02"
    }))
    .unwrap();
    assert_eq!(legacy.user_id, "u1");
    assert_eq!(legacy.blog_id, "7");
    assert_eq!(legacy.created_at, "2025-03-02");

    let renamed: SavedBlog = serde_json::from_value(serde_json::json!({
        "id": "1", "userid": "u1", "blogid": "7", "created_at": "2025-03-03"
    }))
    .unwrap();
    assert_eq!(renamed.created_at, "2025-03-03");
}

// =============================================================
// BlogFilter / categories
// =============================================================

#[test]
fn blog_filter_default_is_unfiltered() {
    let filter = BlogFilter::default();
    assert_eq!(filter.query_pairs(), [("searchQuery", ""), ("category", "")]);
}

#[test]
fn blog_filter_query_pairs_carry_values() {
    let filter = BlogFilter::new("borrow checker", "Technology");
    assert_eq!(filter.query_pairs(), [("searchQuery", "borrow checker"), ("category", "Technology")]);
}

#[test]
fn known_categories_are_case_sensitive() {
    assert!(is_known_category("Health"));
    assert!(!is_known_category("health"));
    assert!(!is_known_category(""));
    assert_eq!(BLOG_CATEGORIES.len(), 7);
}

#[test]
fn unauthorized_detection() {
    assert!(ApiError::ApiResponse { status: 401, body: String::new() }.is_unauthorized());
    assert!(!ApiError::ApiResponse { status: 500, body: String::new() }.is_unauthorized());
    assert!(!ApiError::ApiRequest("connection refused".into()).is_unauthorized());
}
