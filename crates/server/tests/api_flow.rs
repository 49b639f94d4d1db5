use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use migration::MigratorTrait;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use server::routes::{
    self,
    auth::{AuthSettings, ServerState},
};
use server::session::SessionStore;

fn cors() -> tower_http::cors::CorsLayer {
    tower_http::cors::CorsLayer::very_permissive()
}

/// Build the full router against the test database, or skip.
async fn build_app() -> Option<Router> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let db = match models::db::connect_from_env().await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("skip: cannot connect to db: {}", e);
            return None;
        }
    };
    if let Err(e) = migration::Migrator::up(&db, None).await {
        eprintln!("skip: migrate up failed: {}", e);
        return None;
    }
    let state = ServerState {
        db,
        sessions: SessionStore::new(24),
        auth: AuthSettings { token_ttl_hours: 12, session_ttl_hours: 24, secure_cookies: false },
    };
    Some(routes::build_router(cors(), state))
}

async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder().method(method).uri(uri).body(Body::empty()).unwrap()
}

/// POST /api/users then /api/users/login, returning (user id, token).
async fn register_and_login(app: &Router, username: &str, password: &str) -> (Uuid, String) {
    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/users",
            json!({"name": "Tester", "username": username, "password": password}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let user = body_json(resp).await;
    let user_id: Uuid = user["id"].as_str().unwrap().parse().unwrap();

    let basic = BASE64.encode(format!("{}:{}", username, password));
    let req = Request::builder()
        .method("POST")
        .uri("/api/users/login")
        .header("authorization", format!("Basic {}", basic))
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let token = body_json(resp).await;
    (user_id, token["value"].as_str().unwrap().to_string())
}

fn bearer(req: Request<Body>, token: &str) -> Request<Body> {
    let (mut parts, body) = req.into_parts();
    parts
        .headers
        .insert("authorization", format!("Bearer {}", token).parse().unwrap());
    Request::from_parts(parts, body)
}

#[tokio::test]
async fn health_is_open() -> anyhow::Result<()> {
    let Some(app) = build_app().await else { return Ok(()) };
    let resp = app.oneshot(empty_request("GET", "/health")).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, json!({"status": "ok"}));
    Ok(())
}

#[tokio::test]
async fn user_listing_never_exposes_password_hash() -> anyhow::Result<()> {
    let Some(app) = build_app().await else { return Ok(()) };

    let username = format!("user_{}", Uuid::new_v4());
    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/users",
            json!({"name": "Hasher", "username": username, "password": "S3curePass!"}),
        ))
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let created = body_json(resp).await;
    assert!(created.get("password_hash").is_none());
    assert!(created.get("password").is_none());

    let resp = app.clone().oneshot(empty_request("GET", "/api/users")).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let listed = body_json(resp).await;
    for entry in listed.as_array().unwrap() {
        assert!(entry.get("password_hash").is_none());
        assert!(entry.get("password").is_none());
    }

    let resp = app
        .clone()
        .oneshot(empty_request("GET", &format!("/api/users/{}", created["id"].as_str().unwrap())))
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched = body_json(resp).await;
    assert!(fetched.get("password_hash").is_none());
    Ok(())
}

#[tokio::test]
async fn duplicate_username_conflicts() -> anyhow::Result<()> {
    let Some(app) = build_app().await else { return Ok(()) };

    let username = format!("user_{}", Uuid::new_v4());
    let payload = json!({"name": "First", "username": username, "password": "S3curePass!"});
    let resp = app.clone().oneshot(json_request("POST", "/api/users", payload.clone())).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let resp = app.clone().oneshot(json_request("POST", "/api/users", payload)).await?;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    Ok(())
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() -> anyhow::Result<()> {
    let Some(app) = build_app().await else { return Ok(()) };

    let username = format!("user_{}", Uuid::new_v4());
    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/users",
            json!({"name": "Tester", "username": username, "password": "RightPass1"}),
        ))
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);

    let basic = BASE64.encode(format!("{}:WrongPass1", username));
    let req = Request::builder()
        .method("POST")
        .uri("/api/users/login")
        .header("authorization", format!("Basic {}", basic))
        .body(Body::empty())?;
    let resp = app.clone().oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Missing credentials entirely
    let resp = app.clone().oneshot(empty_request("POST", "/api/users/login")).await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn acronym_crud_roundtrip() -> anyhow::Result<()> {
    let Some(app) = build_app().await else { return Ok(()) };
    let username = format!("user_{}", Uuid::new_v4());
    let (user_id, token) = register_and_login(&app, &username, "S3curePass!").await;

    // Create
    let marker = Uuid::new_v4().simple().to_string();
    let short = format!("LOL{}", marker);
    let long = format!("laugh out loud {}", marker);
    let resp = app
        .clone()
        .oneshot(bearer(
            json_request("POST", "/api/acronyms", json!({"short": short, "long": long})),
            &token,
        ))
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let created = body_json(resp).await;
    assert_eq!(created["short"], json!(short));
    assert_eq!(created["creator_id"], json!(user_id.to_string()));
    let id = created["id"].as_str().unwrap().to_string();

    // Read back identical
    let resp = app.clone().oneshot(empty_request("GET", &format!("/api/acronyms/{}", id))).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched = body_json(resp).await;
    assert_eq!(fetched["short"], created["short"]);
    assert_eq!(fetched["long"], created["long"]);
    assert_eq!(fetched["creator_id"], created["creator_id"]);

    // Creator resolves to the public projection of the author
    let resp = app
        .clone()
        .oneshot(empty_request("GET", &format!("/api/acronyms/{}/creator", id)))
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let creator = body_json(resp).await;
    assert_eq!(creator["id"], json!(user_id.to_string()));
    assert!(creator.get("password_hash").is_none());

    // Exact-match search finds only this row
    let resp = app
        .clone()
        .oneshot(empty_request("GET", &format!("/api/acronyms/search?term={}", short)))
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let hits = body_json(resp).await;
    assert_eq!(hits.as_array().unwrap().len(), 1);
    assert_eq!(hits[0]["id"], json!(id));

    // Delete, then the lookup misses
    let resp = app
        .clone()
        .oneshot(bearer(empty_request("DELETE", &format!("/api/acronyms/{}", id)), &token))
        .await?;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let resp = app.clone().oneshot(empty_request("GET", &format!("/api/acronyms/{}", id))).await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn update_transfers_ownership_to_editor() -> anyhow::Result<()> {
    let Some(app) = build_app().await else { return Ok(()) };

    let (author_id, author_token) =
        register_and_login(&app, &format!("author_{}", Uuid::new_v4()), "S3curePass!").await;
    let (editor_id, editor_token) =
        register_and_login(&app, &format!("editor_{}", Uuid::new_v4()), "S3curePass!").await;

    let resp = app
        .clone()
        .oneshot(bearer(
            json_request("POST", "/api/acronyms", json!({"short": "TIL", "long": "today I learned"})),
            &author_token,
        ))
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let created = body_json(resp).await;
    assert_eq!(created["creator_id"], json!(author_id.to_string()));
    let id = created["id"].as_str().unwrap().to_string();

    let resp = app
        .clone()
        .oneshot(bearer(
            json_request(
                "PUT",
                &format!("/api/acronyms/{}", id),
                json!({"short": "TIL", "long": "today I learnt"}),
            ),
            &editor_token,
        ))
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated = body_json(resp).await;
    assert_eq!(updated["creator_id"], json!(editor_id.to_string()));
    assert_eq!(updated["long"], json!("today I learnt"));

    // cleanup
    let resp = app
        .clone()
        .oneshot(bearer(empty_request("DELETE", &format!("/api/acronyms/{}", id)), &editor_token))
        .await?;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    Ok(())
}

#[tokio::test]
async fn unauthenticated_mutations_are_rejected_before_persistence() -> anyhow::Result<()> {
    let Some(app) = build_app().await else { return Ok(()) };

    let marker = Uuid::new_v4().simple().to_string();
    let short = format!("NOPE{}", marker);

    // No credentials at all
    let resp = app
        .clone()
        .oneshot(json_request("POST", "/api/acronyms", json!({"short": short, "long": "denied"})))
        .await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Garbage bearer token
    let resp = app
        .clone()
        .oneshot(bearer(
            json_request("POST", "/api/acronyms", json!({"short": short, "long": "denied"})),
            "not-a-real-token",
        ))
        .await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Nothing was written
    let resp = app
        .clone()
        .oneshot(empty_request("GET", &format!("/api/acronyms/search?term={}", short)))
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_json(resp).await.as_array().unwrap().is_empty());

    // The attach endpoint is gated like every other mutation
    let resp = app
        .clone()
        .oneshot(empty_request(
            "POST",
            &format!("/api/acronyms/{}/categories/{}", Uuid::new_v4(), Uuid::new_v4()),
        ))
        .await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn search_without_term_is_bad_request() -> anyhow::Result<()> {
    let Some(app) = build_app().await else { return Ok(()) };
    let resp = app.clone().oneshot(empty_request("GET", "/api/acronyms/search")).await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn category_attach_flow() -> anyhow::Result<()> {
    let Some(app) = build_app().await else { return Ok(()) };
    let (_user_id, token) =
        register_and_login(&app, &format!("cat_{}", Uuid::new_v4()), "S3curePass!").await;

    let resp = app
        .clone()
        .oneshot(bearer(
            json_request("POST", "/api/acronyms", json!({"short": "DM", "long": "direct message"})),
            &token,
        ))
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let acronym_id = body_json(resp).await["id"].as_str().unwrap().to_string();

    let resp = app
        .clone()
        .oneshot(bearer(
            json_request(
                "POST",
                "/api/categories",
                json!({"name": format!("Chat {}", Uuid::new_v4())}),
            ),
            &token,
        ))
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let category_id = body_json(resp).await["id"].as_str().unwrap().to_string();

    // First attach succeeds, the duplicate conflicts
    let attach_uri = format!("/api/acronyms/{}/categories/{}", acronym_id, category_id);
    let resp = app.clone().oneshot(bearer(empty_request("POST", &attach_uri), &token)).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let resp = app.clone().oneshot(bearer(empty_request("POST", &attach_uri), &token)).await?;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // Both sides of the relation list exactly one association
    let resp = app
        .clone()
        .oneshot(empty_request("GET", &format!("/api/acronyms/{}/categories", acronym_id)))
        .await?;
    let cats = body_json(resp).await;
    assert_eq!(
        cats.as_array().unwrap().iter().filter(|c| c["id"] == json!(category_id)).count(),
        1
    );

    let resp = app
        .clone()
        .oneshot(empty_request("GET", &format!("/api/categories/{}/acronyms", category_id)))
        .await?;
    let listed = body_json(resp).await;
    assert_eq!(
        listed.as_array().unwrap().iter().filter(|a| a["id"] == json!(acronym_id)).count(),
        1
    );

    // cleanup
    let resp = app
        .clone()
        .oneshot(bearer(empty_request("DELETE", &format!("/api/acronyms/{}", acronym_id)), &token))
        .await?;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    Ok(())
}

#[tokio::test]
async fn user_acronyms_listing() -> anyhow::Result<()> {
    let Some(app) = build_app().await else { return Ok(()) };
    let (user_id, token) =
        register_and_login(&app, &format!("list_{}", Uuid::new_v4()), "S3curePass!").await;

    let resp = app
        .clone()
        .oneshot(bearer(
            json_request("POST", "/api/acronyms", json!({"short": "BRB", "long": "be right back"})),
            &token,
        ))
        .await?;
    let id = body_json(resp).await["id"].as_str().unwrap().to_string();

    let resp = app
        .clone()
        .oneshot(empty_request("GET", &format!("/api/users/{}/acronyms", user_id)))
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let listed = body_json(resp).await;
    assert!(listed.as_array().unwrap().iter().any(|a| a["id"] == json!(id)));

    let resp = app
        .clone()
        .oneshot(empty_request("GET", &format!("/api/users/{}/acronyms", Uuid::new_v4())))
        .await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = app
        .clone()
        .oneshot(bearer(empty_request("DELETE", &format!("/api/acronyms/{}", id)), &token))
        .await?;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    Ok(())
}
