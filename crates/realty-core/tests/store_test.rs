#![allow(clippy::unwrap_used)]
// Integration tests for the optimistic stores against a mock API.

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use realty_core::{
    CategoryFilter, Console, ConsoleConfig, CoreError, NoticeLevel, OptimisticCollectionStore,
    Property, PropertyPatch, Resource, StatisticField, StatisticsBoard, TeamMember, User,
    UserPatch, UserRole,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Console) {
    let server = MockServer::start().await;
    let mut config = ConsoleConfig::new(server.uri().parse().unwrap());
    config.token = Some("tok-abc".to_owned().into());
    let console = Console::new(&config).unwrap();
    (server, console)
}

fn property_json(id: &str, title: &str, featured: bool) -> serde_json::Value {
    json!({
        "_id": id,
        "title": title,
        "location": "Malibu",
        "price": 950_000,
        "type": "villa",
        "bedrooms": 4,
        "bathrooms": 3,
        "area": 2800,
        "status": "available",
        "featured": featured
    })
}

async fn mount_properties(server: &MockServer, items: Vec<serde_json::Value>) {
    Mock::given(method("GET"))
        .and(path("/properties"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "properties": items })))
        .mount(server)
        .await;
}

async fn loaded_properties(
    server: &MockServer,
    console: &Console,
    items: Vec<serde_json::Value>,
) -> OptimisticCollectionStore<Property> {
    mount_properties(server, items).await;
    let store = console.store::<Property>();
    store.refresh().await.unwrap();
    store
}

fn member(name: &str) -> TeamMember {
    TeamMember {
        name: name.into(),
        email: format!("{}@example.com", name.to_lowercase()),
        phone: "555-0100".into(),
        role: "Agent".into(),
        bio: "Local market specialist.".into(),
        ..TeamMember::default()
    }
}

// ── Refresh ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_refresh_sends_bearer_from_cookie_session() {
    let (server, console) = setup().await;

    Mock::given(method("GET"))
        .and(path("/user/users"))
        .and(header("authorization", "Bearer tok-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": [{ "_id": "u1", "name": "Ada", "email": "ada@example.com", "role": "user" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = console.store::<User>();
    store.refresh().await.unwrap();
    let snap = store.snapshot();
    assert_eq!(snap.len(), 1);
    assert!(!snap.loading);
    assert!(snap.last_error.is_none());
}

#[tokio::test]
async fn test_failed_refresh_keeps_previous_collection() {
    let (server, console) = setup().await;
    let store = loaded_properties(
        &server,
        &console,
        vec![property_json("a", "Sunset Villa", false), property_json("b", "Loft", false)],
    )
    .await;

    server.reset().await;
    Mock::given(method("GET"))
        .and(path("/properties"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let mut notices = console.notices();
    let err = store.refresh().await.unwrap_err();
    assert!(matches!(err, CoreError::Http { status: 503, .. }));

    let snap = store.snapshot();
    assert_eq!(snap.len(), 2);
    assert!(!snap.loading);
    assert_eq!(snap.last_error, Some(err));
    assert_eq!(notices.recv().await.unwrap().level, NoticeLevel::Error);
}

// ── Create ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_rejected_create_leaves_empty_collection_empty() {
    let (server, console) = setup().await;

    Mock::given(method("POST"))
        .and(path("/team"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upload failed"))
        .mount(&server)
        .await;

    let store = console.store::<TeamMember>();
    let err = store.create_optimistic(member("Grace")).await.unwrap_err();
    assert!(matches!(err, CoreError::Http { status: 500, .. }));
    assert!(store.snapshot().is_empty());
}

#[tokio::test]
async fn test_pending_entry_visible_until_server_answers() {
    let (server, console) = setup().await;

    Mock::given(method("POST"))
        .and(path("/team"))
        .and(body_string_contains("Grace"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({
                    "_id": "t-9",
                    "name": "Grace",
                    "email": "grace@example.com",
                    "phone": "555-0100",
                    "role": "Agent",
                    "bio": "Local market specialist.",
                    "image": "/uploads/grace.jpg"
                }))
                .set_delay(Duration::from_millis(150)),
        )
        .mount(&server)
        .await;

    let store = console.store::<TeamMember>();
    let mut rx = store.subscribe();

    let (created, pending_seen) = tokio::join!(store.create_optimistic(member("Grace")), async {
        rx.changed().await.unwrap();
        let snap = rx.borrow_and_update().clone();
        (snap.len(), snap.pending_count(), snap.entries[0].key.as_server().is_none())
    });

    assert_eq!(pending_seen, (1, 1, true));
    let created = created.unwrap();
    assert_eq!(created.id(), Some("t-9"));

    let snap = store.snapshot();
    assert_eq!(snap.len(), 1);
    assert_eq!(snap.pending_count(), 0);
    assert_eq!(snap.position("t-9"), Some(0));
    assert_eq!(snap.get("t-9").unwrap().image.as_deref(), Some("/uploads/grace.jpg"));
}

// ── Update ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_rejected_update_restores_exact_entry() {
    let (server, console) = setup().await;
    let store = loaded_properties(&server, &console, vec![property_json("a", "Sunset Villa", false)]).await;
    let before = Arc::clone(store.snapshot().get("a").unwrap());

    Mock::given(method("PATCH"))
        .and(path("/properties/a"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .mount(&server)
        .await;

    let patch = PropertyPatch {
        title: Some("Renamed".into()),
        featured: Some(true),
        ..PropertyPatch::default()
    };
    let err = store.update_optimistic("a", patch).await.unwrap_err();
    assert!(err.is_auth_rejected());

    let snap = store.snapshot();
    let after = snap.get("a").unwrap();
    assert!(Arc::ptr_eq(&before, after));
    assert_eq!(**after, *before);
    assert_eq!(snap.pending_count(), 0);
}

#[tokio::test]
async fn test_toggle_featured_twice_returns_to_original() {
    let (server, console) = setup().await;
    let store = loaded_properties(&server, &console, vec![property_json("a", "Sunset Villa", false)]).await;

    Mock::given(method("PATCH"))
        .and(path("/properties/a"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "updated" })))
        .expect(2)
        .mount(&server)
        .await;

    for _ in 0..2 {
        let current = Arc::clone(store.snapshot().get("a").unwrap());
        store.update_optimistic("a", current.toggle_featured()).await.unwrap();
    }
    let snap = store.snapshot();
    let after = snap.get("a").unwrap();
    assert!(!after.featured);
    assert_eq!(after.title, "Sunset Villa");
}

#[tokio::test]
async fn test_partial_echo_keeps_fields_the_server_left_out() {
    let (server, console) = setup().await;
    let store = loaded_properties(&server, &console, vec![property_json("a", "Sunset Villa", false)]).await;

    Mock::given(method("PATCH"))
        .and(path("/properties/a"))
        .and(body_json(json!({ "featured": true })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "_id": "a", "featured": true, "status": "sold" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let patch = PropertyPatch {
        featured: Some(true),
        ..PropertyPatch::default()
    };
    let updated = store.update_optimistic("a", patch).await.unwrap();

    assert!(updated.featured);
    assert_eq!(updated.status, "sold");
    assert_eq!(updated.title, "Sunset Villa");
    assert_eq!(updated.location, "Malibu");
    assert_eq!(updated.bedrooms, 4);

    let snap = store.snapshot();
    assert_eq!(**snap.get("a").unwrap(), *updated);
    assert_eq!(snap.pending_count(), 0);
}

#[tokio::test]
async fn test_user_role_update_uses_body_id() {
    let (server, console) = setup().await;

    Mock::given(method("GET"))
        .and(path("/user/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "_id": "u1", "name": "Ada", "email": "ada@example.com", "role": "user" }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/user/update"))
        .and(body_json(json!({ "userId": "u1", "role": "admin" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    let store = console.store::<User>();
    store.refresh().await.unwrap();
    let updated = store
        .update_optimistic("u1", UserPatch::role(UserRole::Admin))
        .await
        .unwrap();
    assert_eq!(updated.role_kind(), Some(UserRole::Admin));
    assert_eq!(updated.name, "Ada");
}

#[tokio::test]
async fn test_unsupported_operation_rolls_back_without_request() {
    let (server, console) = setup().await;

    let store = console.store::<User>();
    Mock::given(method("GET"))
        .and(path("/user/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    store.refresh().await.unwrap();

    let err = store
        .create_optimistic(User {
            name: "Eve".into(),
            email: "eve@example.com".into(),
            ..User::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Unsupported { entity: "user", .. }));
    assert!(store.snapshot().is_empty());
}

// ── Delete ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_rejected_delete_reinserts_at_original_position() {
    let (server, console) = setup().await;
    let store = loaded_properties(
        &server,
        &console,
        vec![
            property_json("a", "First", false),
            property_json("b", "Second", false),
            property_json("c", "Third", false),
        ],
    )
    .await;

    Mock::given(method("DELETE"))
        .and(path("/properties/b"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    store.delete_optimistic("b").await.unwrap_err();
    let titles: Vec<_> = store
        .snapshot()
        .items()
        .iter()
        .map(|p| p.title.clone())
        .collect();
    assert_eq!(titles, ["First", "Second", "Third"]);
}

#[tokio::test]
async fn test_delete_removes_entry() {
    let (server, console) = setup().await;
    let store = loaded_properties(
        &server,
        &console,
        vec![property_json("a", "First", false), property_json("b", "Second", false)],
    )
    .await;

    Mock::given(method("DELETE"))
        .and(path("/properties/a"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "deleted" })))
        .mount(&server)
        .await;

    store.delete_optimistic("a").await.unwrap();
    assert_eq!(store.snapshot().position("b"), Some(0));
}

// ── Screens ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_property_screen_filters_loaded_collection() {
    let (server, console) = setup().await;
    mount_properties(
        &server,
        vec![
            property_json("a", "Sunset Villa", true),
            json!({ "_id": "b", "title": "Downtown Loft", "location": "Chicago", "type": "apartment" }),
        ],
    )
    .await;

    let mut screen = console.screen::<Property>();
    screen.load().await.unwrap();
    screen.set_search("villa");
    screen.set_category("type", CategoryFilter::All);
    let visible = screen.visible();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].title, "Sunset Villa");
}

// ── Statistics blob ─────────────────────────────────────────────────

#[tokio::test]
async fn test_statistics_defaults_kept_when_backend_has_none() {
    let (server, console) = setup().await;

    Mock::given(method("GET"))
        .and(path("/page/statistics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "not set" })))
        .mount(&server)
        .await;

    let stats = console.statistics();
    stats.load().await.unwrap();
    assert_eq!(stats.value(), StatisticsBoard::default());
}

#[tokio::test]
async fn test_statistics_edit_and_save_whole_array() {
    let (server, console) = setup().await;

    Mock::given(method("GET"))
        .and(path("/page/statistics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "statistics": [
                { "icon": "home", "value": "510", "label": "Properties Sold", "description": "d" }
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/page/statistics"))
        .and(body_json(json!({
            "statistics": [
                { "icon": "home", "value": "520", "label": "Properties Sold", "description": "d" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    let stats = console.statistics();
    stats.load().await.unwrap();
    assert_eq!(stats.value().len(), 1);

    stats
        .edit(|board| board.set_field(0, StatisticField::Value, "520"))
        .unwrap();
    assert!(stats.snapshot().dirty);
    stats.save().await.unwrap();
    assert!(!stats.snapshot().dirty);
}

#[tokio::test]
async fn test_statistics_failed_save_keeps_edits() {
    let (server, console) = setup().await;

    Mock::given(method("POST"))
        .and(path("/page/statistics"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let stats = console.statistics();
    stats
        .edit(|board| board.set_field(3, StatisticField::Value, "99"))
        .unwrap();
    stats.save().await.unwrap_err();

    let snap = stats.snapshot();
    assert!(snap.dirty);
    assert!(!snap.saving);
    assert_eq!(snap.value.entries()[3].value, "99");
}
