//! End-to-end save/send workflows against fake PostgREST and email-proxy
//! servers on loopback ports.

use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    body::{Body, to_bytes},
    extract::State,
    http::{Request, StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use tidemail::session::{self, AUTH_CLAIM};

const COOKIE_SECRET: &str = "workflow-test-cookie-secret";
const ADMIN_TOKEN: &str = "workflow-admin-token";

#[derive(Clone, Default)]
struct FakeSupabase {
    row: Arc<Mutex<Option<Value>>>,
    fail_patch: bool,
}

impl FakeSupabase {
    fn failing_patch() -> Self {
        Self {
            fail_patch: true,
            ..Self::default()
        }
    }

    fn seed(&self, row: Value) {
        *self.row.lock().unwrap() = Some(row);
    }

    fn row(&self) -> Option<Value> {
        self.row.lock().unwrap().clone()
    }
}

async fn supa_get(State(s): State<FakeSupabase>) -> axum::response::Response {
    match s.row() {
        Some(row) => Json(row).into_response(),
        // PostgREST answers 406 for an object request with no row
        None => (StatusCode::NOT_ACCEPTABLE, Json(json!({"code": "PGRST116"}))).into_response(),
    }
}

async fn supa_upsert(State(s): State<FakeSupabase>, Json(body): Json<Value>) -> StatusCode {
    merge_row(&s, body);
    StatusCode::CREATED
}

async fn supa_patch(State(s): State<FakeSupabase>, Json(body): Json<Value>) -> StatusCode {
    if s.fail_patch {
        return StatusCode::INTERNAL_SERVER_ERROR;
    }
    merge_row(&s, body);
    StatusCode::NO_CONTENT
}

fn merge_row(s: &FakeSupabase, incoming: Value) {
    let mut row = s.row.lock().unwrap();
    match row.as_mut().and_then(Value::as_object_mut) {
        Some(existing) => {
            for (k, v) in incoming.as_object().cloned().unwrap_or_default() {
                existing.insert(k, v);
            }
        }
        None => *row = Some(incoming),
    }
}

async fn spawn_fake_supabase(state: FakeSupabase) -> String {
    let app = Router::new()
        .route(
            "/rest/v1/EDemail",
            get(supa_get).post(supa_upsert).patch(supa_patch),
        )
        .with_state(state);
    spawn(app).await
}

#[derive(Clone)]
struct FakeMailer {
    sent: Arc<Mutex<Vec<Value>>>,
    fail_with: Option<String>,
    seen_token: Arc<Mutex<Option<String>>>,
}

impl FakeMailer {
    fn new(fail_with: Option<&str>) -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            fail_with: fail_with.map(str::to_string),
            seen_token: Arc::new(Mutex::new(None)),
        }
    }

    fn sent(&self) -> Vec<Value> {
        self.sent.lock().unwrap().clone()
    }
}

async fn mailer_send(
    State(m): State<FakeMailer>,
    headers: axum::http::HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    *m.seen_token.lock().unwrap() = headers
        .get("x-admin-token")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    m.sent.lock().unwrap().push(body);
    match &m.fail_with {
        Some(reason) => Json(json!({"success": false, "error": reason})),
        None => Json(json!({"success": true})),
    }
}

async fn spawn_fake_mailer(state: FakeMailer) -> String {
    let app = Router::new()
        .route("/admin/api/email-proxy/send", post(mailer_send))
        .with_state(state);
    spawn(app).await
}

async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind loopback listener");
    let addr = listener.local_addr().expect("listener has no local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("fake server died");
    });
    format!("http://{addr}")
}

fn test_app(supabase_url: String, mailer_url: String) -> Router {
    let cfg = tidemail::Config {
        supabase_url,
        supabase_service_key: "svc-key".to_string(),
        mailer_url,
        mailer_admin_token: ADMIN_TOKEN.to_string(),
        pin: "123456".to_string(),
        cookie_secret: COOKIE_SECRET.to_string(),
        port: 0,
        loglevel: "info".to_string(),
    };
    tidemail::router::app_router(tidemail::router::AppState::new(cfg))
}

fn auth_cookie() -> String {
    format!("auth={}", session::issue(AUTH_CLAIM, COOKIE_SECRET))
}

async fn api_response(app: &Router, path: &str, body: Option<Value>) -> Value {
    let request = match body {
        Some(body) => Request::post(path)
            .header(header::COOKIE, auth_cookie())
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => Request::post(path)
            .header(header::COOKIE, auth_cookie())
            .body(Body::empty())
            .unwrap(),
    };
    let resp = app.clone().oneshot(request).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn seeded_row(content: &str) -> Value {
    json!({
        "id": 1,
        "content": content,
        "send_time": "08:20",
        "to_emails": null,
        "cc_emails": null,
        "last_sent_at": null,
        "updated_at": null,
    })
}

#[tokio::test]
async fn save_then_reload_returns_the_saved_fields() {
    let store = FakeSupabase::default();
    let mailer = FakeMailer::new(None);
    let app = test_app(
        spawn_fake_supabase(store.clone()).await,
        spawn_fake_mailer(mailer).await,
    );

    let result = api_response(
        &app,
        "/api/save",
        Some(json!({
            "content": "See you {{location}}.",
            "send_time": "09:15",
            "to_emails": "crew@example.com",
            "cc_emails": "",
        })),
    )
    .await;
    assert_eq!(result, json!({"success": true}));

    let row = store.row().expect("save should create the row");
    assert_eq!(row["id"], 1);
    assert_eq!(row["content"], "See you {{location}}.");
    assert_eq!(row["send_time"], "09:15");
    assert_eq!(row["to_emails"], "crew@example.com");
    assert!(row["updated_at"].is_string());
    assert!(row.get("last_sent_at").is_none_or(Value::is_null));

    // The editor reflects the saved fields; empty CC falls back to defaults.
    let resp = app
        .oneshot(
            Request::get("/")
                .header(header::COOKIE, auth_cookie())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let page = String::from_utf8(
        to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec(),
    )
    .unwrap();
    assert!(page.contains("See you {{location}}."));
    assert!(page.contains(r#"value="09:15""#));
    assert!(page.contains("crew@example.com"));
    assert!(page.contains("mail@bradsimms.com, ryansimms@gmail.com"));
}

#[tokio::test]
async fn save_never_touches_last_sent_at() {
    let store = FakeSupabase::default();
    store.seed(json!({
        "id": 1,
        "content": "old",
        "last_sent_at": "2025-01-01T00:00:00Z",
        "updated_at": "2025-01-01T00:00:00Z",
    }));
    let app = test_app(
        spawn_fake_supabase(store.clone()).await,
        spawn_fake_mailer(FakeMailer::new(None)).await,
    );

    let result = api_response(
        &app,
        "/api/save",
        Some(json!({
            "content": "new content",
            "send_time": "10:00",
            "to_emails": "",
            "cc_emails": "",
        })),
    )
    .await;
    assert_eq!(result, json!({"success": true}));

    let row = store.row().unwrap();
    assert_eq!(row["content"], "new content");
    assert_eq!(row["last_sent_at"], "2025-01-01T00:00:00Z");
    assert_ne!(row["updated_at"], "2025-01-01T00:00:00Z");
}

#[tokio::test]
async fn send_composes_the_body_and_marks_sent() {
    let store = FakeSupabase::default();
    store.seed(seeded_row("See you {{location}}."));
    let mailer = FakeMailer::new(None);
    let app = test_app(
        spawn_fake_supabase(store.clone()).await,
        spawn_fake_mailer(mailer.clone()).await,
    );

    let started = chrono::Utc::now();
    let result = api_response(&app, "/api/send", None).await;
    assert_eq!(result, json!({"success": true}));

    let sent = mailer.sent();
    assert_eq!(sent.len(), 1);
    let email = &sent[0];
    // Recipient fallbacks apply when the stored fields are null/empty.
    assert_eq!(email["to"], "edsimms12@gmail.com");
    assert_eq!(email["cc"], "mail@bradsimms.com, ryansimms@gmail.com");
    assert_eq!(email["subject"], "Email from Ryan and Brad about your day");

    let text = email["text"].as_str().unwrap();
    assert!(text.starts_with("Hello Ed,\nToday is "));
    assert!(text.contains("\n\nSee you on the boat."));
    assert!(!text.contains("{{location}}"));

    assert_eq!(
        mailer.seen_token.lock().unwrap().as_deref(),
        Some(ADMIN_TOKEN)
    );

    let marked = store.row().unwrap()["last_sent_at"]
        .as_str()
        .expect("last_sent_at should be set after a successful send")
        .parse::<chrono::DateTime<chrono::Utc>>()
        .unwrap();
    assert!(marked >= started);
}

#[tokio::test]
async fn mark_sent_failure_after_a_real_send_still_reports_success() {
    let store = FakeSupabase::failing_patch();
    store.seed(seeded_row("content"));
    let mailer = FakeMailer::new(None);
    let app = test_app(
        spawn_fake_supabase(store.clone()).await,
        spawn_fake_mailer(mailer.clone()).await,
    );

    // The email went out, so the failed bookkeeping write must not turn the
    // response into a send failure.
    let result = api_response(&app, "/api/send", None).await;
    assert_eq!(result, json!({"success": true}));

    assert_eq!(mailer.sent().len(), 1);
    assert!(store.row().unwrap()["last_sent_at"].is_null());
}

#[tokio::test]
async fn mailer_failure_surfaces_its_reason_and_skips_mark_sent() {
    let store = FakeSupabase::default();
    store.seed(seeded_row("content"));
    let mailer = FakeMailer::new(Some("smtp relay down"));
    let app = test_app(
        spawn_fake_supabase(store.clone()).await,
        spawn_fake_mailer(mailer.clone()).await,
    );

    let result = api_response(&app, "/api/send", None).await;
    assert_eq!(
        result,
        json!({"success": false, "error": "smtp relay down"})
    );

    assert_eq!(mailer.sent().len(), 1);
    assert!(store.row().unwrap()["last_sent_at"].is_null());
}

#[tokio::test]
async fn send_with_no_content_never_calls_the_mailer() {
    let mailer = FakeMailer::new(None);
    let empty_store = FakeSupabase::default();
    let app = test_app(
        spawn_fake_supabase(empty_store).await,
        spawn_fake_mailer(mailer.clone()).await,
    );

    let result = api_response(&app, "/api/send", None).await;
    assert_eq!(
        result,
        json!({"success": false, "error": "No email content found. Save content first."})
    );
    assert!(mailer.sent().is_empty());

    // Same outcome for a row whose content is empty.
    let blank_store = FakeSupabase::default();
    blank_store.seed(seeded_row(""));
    let app = test_app(
        spawn_fake_supabase(blank_store).await,
        spawn_fake_mailer(mailer.clone()).await,
    );
    let result = api_response(&app, "/api/send", None).await;
    assert_eq!(result["success"], false);
    assert!(mailer.sent().is_empty());
}
