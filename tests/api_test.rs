use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use readmark::api::{self, AppState};
use readmark::google_books::GoogleBooksClient;
use readmark::{auth, db};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use serde_json::{Value, json};
use tower::util::ServiceExt; // for `oneshot`

async fn setup_test_app() -> (Router, DatabaseConnection) {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    let catalog = GoogleBooksClient::new("http://127.0.0.1:1", None);
    let app = api::api_router(AppState::new(db.clone(), catalog));
    (app, db)
}

async fn create_test_user(db: &DatabaseConnection, email: &str) -> String {
    let now = chrono::Utc::now().to_rfc3339();
    let id = uuid::Uuid::new_v4().to_string();
    let user = readmark::models::user::ActiveModel {
        id: Set(id.clone()),
        email: Set(email.to_string()),
        password_hash: Set("hash".to_string()),
        created_at: Set(now.clone()),
        updated_at: Set(now),
    };
    user.insert(db).await.expect("Failed to create user");
    id
}

fn bearer(user_id: &str, email: &str) -> String {
    format!(
        "Bearer {}",
        auth::create_jwt(user_id, email).expect("Failed to create token")
    )
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body is not JSON")
}

#[tokio::test]
async fn health_check_is_public() {
    let (app, _db) = setup_test_app().await;

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn protected_routes_reject_missing_token() {
    let (app, _db) = setup_test_app().await;

    for uri in ["/books", "/records", "/stats", "/dashboard", "/profile"] {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "uri {}", uri);
    }
}

#[tokio::test]
async fn register_then_login_round_trip() {
    let (app, _db) = setup_test_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/register")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({ "email": "reader@example.com", "password": "hunter2hunter2" })
                        .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({ "email": "reader@example.com", "password": "hunter2hunter2" })
                        .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["token"].is_string());

    // Registration creates the profile row implicitly
    let token = format!("Bearer {}", body["token"].as_str().unwrap());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/profile")
                .header(header::AUTHORIZATION, token)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn register_rejects_bad_input() {
    let (app, _db) = setup_test_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/register")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({ "email": "not-an-email", "password": "hunter2hunter2" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/register")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({ "email": "short@example.com", "password": "short" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn book_crud_over_http() {
    let (app, db) = setup_test_app().await;
    let user_id = create_test_user(&db, "crud@example.com").await;
    let token = bearer(&user_id, "crud@example.com");

    // Create
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/books")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, &token)
                .body(Body::from(
                    json!({ "title": "Dune", "author": "Frank Herbert", "genre": "sf" })
                        .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    let book_id = body["book"]["id"].as_i64().expect("book id missing");

    // Read back
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/books/{}", book_id))
                .header(header::AUTHORIZATION, &token)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["title"], "Dune");

    // Validation failure
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/books")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, &token)
                .body(Body::from(json!({ "title": "", "author": "X" }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Delete, then the detail view 404s
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/books/{}", book_id))
                .header(header::AUTHORIZATION, &token)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/books/{}", book_id))
                .header(header::AUTHORIZATION, &token)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn users_cannot_read_each_others_books() {
    let (app, db) = setup_test_app().await;
    let alice = create_test_user(&db, "alice@example.com").await;
    let bob = create_test_user(&db, "bob@example.com").await;
    let alice_token = bearer(&alice, "alice@example.com");
    let bob_token = bearer(&bob, "bob@example.com");

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/books")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, &alice_token)
                .body(Body::from(
                    json!({ "title": "Secret", "author": "A" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    let body = body_json(response).await;
    let book_id = body["book"]["id"].as_i64().unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/books/{}", book_id))
                .header(header::AUTHORIZATION, &bob_token)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn goal_endpoints_report_progress() {
    let (app, db) = setup_test_app().await;
    let user_id = create_test_user(&db, "goal@example.com").await;
    let token = bearer(&user_id, "goal@example.com");

    // No goal yet: 404 on the goal, undefined progress on the report
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/goals/2024")
                .header(header::AUTHORIZATION, &token)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/goals/2024/progress")
                .header(header::AUTHORIZATION, &token)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["goal"].is_null());
    assert!(body["progress"].is_null());

    // Set a goal, then the report carries a percentage
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/goals")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, &token)
                .body(Body::from(
                    json!({ "year": 2024, "target_books": 12 }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/goals/2024/progress")
                .header(header::AUTHORIZATION, &token)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["goal"]["target_books"], 12);
    assert_eq!(body["progress"], 0.0);
}

#[tokio::test]
async fn dashboard_combines_stats_and_goal() {
    let (app, db) = setup_test_app().await;
    let user_id = create_test_user(&db, "dash@example.com").await;
    let token = bearer(&user_id, "dash@example.com");

    let response = app
        .oneshot(
            Request::builder()
                .uri("/dashboard?year=2024")
                .header(header::AUTHORIZATION, &token)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["year"], 2024);
    assert_eq!(body["statistics"]["total_books"], 0);
    assert_eq!(body["status_breakdown"]["finished"], 0);
    assert!(body["goal"]["progress"].is_null());
}
