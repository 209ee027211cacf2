use std::sync::Arc;

use tempfile::TempDir;

use projectboard::api::{self, AppState};
use projectboard::service::TicketService;
use projectboard::storage::sqlite::SqliteTicketRepository;

const ALLOWED_ORIGIN: &str = "http://localhost:4200";

async fn spawn_server() -> (String, TempDir) {
    let dir = TempDir::new().unwrap();
    let repo = SqliteTicketRepository::open(dir.path().join("board.db")).unwrap();
    let state = AppState {
        service: Arc::new(TicketService::new(Arc::new(repo))),
        allowed_origin: ALLOWED_ORIGIN.to_string(),
    };
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve") });

    (format!("http://{addr}"), dir)
}

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

#[tokio::test]
async fn test_create_then_get_scenario() {
    let (base, _dir) = spawn_server().await;
    let http = client();

    let resp = http
        .post(format!("{base}/api/tickets"))
        .json(&serde_json::json!({
            "name": "Fix bug",
            "category": "Bug",
            "status": "Backlog"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 201);
    let location = resp
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    let created: serde_json::Value = resp.json().await.unwrap();
    let id = created["id"].as_i64().unwrap();
    assert!(id > 0);
    assert_eq!(location, format!("/api/tickets/{id}"));
    assert_eq!(created["name"], "Fix bug");
    assert_eq!(created["category"], "Bug");
    assert_eq!(created["status"], "Backlog");
    assert!(created["createdAt"].is_string());
    assert!(created["description"].is_null());

    let fetched: serde_json::Value = http
        .get(format!("{base}/api/tickets/{id}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_list_returns_created_tickets() {
    let (base, _dir) = spawn_server().await;
    let http = client();

    for name in ["a", "b"] {
        http.post(format!("{base}/api/tickets"))
            .json(&serde_json::json!({
                "name": name,
                "category": "Feature",
                "status": "Backlog"
            }))
            .send()
            .await
            .unwrap();
    }

    let resp = http.get(format!("{base}/api/tickets")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    let tickets: Vec<serde_json::Value> = resp.json().await.unwrap();
    assert_eq!(tickets.len(), 2);
}

#[tokio::test]
async fn test_patch_status_persists() {
    let (base, _dir) = spawn_server().await;
    let http = client();

    let created: serde_json::Value = http
        .post(format!("{base}/api/tickets"))
        .json(&serde_json::json!({
            "name": "movable",
            "category": "Feature",
            "status": "Backlog"
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let id = created["id"].as_i64().unwrap();

    let resp = http
        .patch(format!("{base}/api/tickets/{id}/status"))
        .json(&serde_json::json!({ "status": "Done" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let patched: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(patched["status"], "Done");
    assert_eq!(patched["createdAt"], created["createdAt"]);

    let fetched: serde_json::Value = http
        .get(format!("{base}/api/tickets/{id}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched["status"], "Done");
}

#[tokio::test]
async fn test_put_replaces_fields_but_not_created_at() {
    let (base, _dir) = spawn_server().await;
    let http = client();

    let created: serde_json::Value = http
        .post(format!("{base}/api/tickets"))
        .json(&serde_json::json!({
            "name": "before",
            "category": "Bug",
            "status": "Backlog"
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let id = created["id"].as_i64().unwrap();

    let resp = http
        .put(format!("{base}/api/tickets/{id}"))
        .json(&serde_json::json!({
            "name": "after",
            "description": "now described",
            "category": "RAndD",
            "status": "Review"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let updated: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(updated["name"], "after");
    assert_eq!(updated["description"], "now described");
    assert_eq!(updated["category"], "RAndD");
    assert_eq!(updated["createdAt"], created["createdAt"]);
}

#[tokio::test]
async fn test_delete_twice_reports_not_found() {
    let (base, _dir) = spawn_server().await;
    let http = client();

    let created: serde_json::Value = http
        .post(format!("{base}/api/tickets"))
        .json(&serde_json::json!({
            "name": "short lived",
            "category": "Feature",
            "status": "Done"
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let id = created["id"].as_i64().unwrap();

    let first = http
        .delete(format!("{base}/api/tickets/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(first.status(), 204);

    let second = http
        .delete(format!("{base}/api/tickets/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(second.status(), 404);
    let body: serde_json::Value = second.json().await.unwrap();
    assert_eq!(body["message"], format!("Ticket with ID {id} not found"));
}

#[tokio::test]
async fn test_blank_name_is_rejected() {
    let (base, _dir) = spawn_server().await;
    let http = client();

    let resp = http
        .post(format!("{base}/api/tickets"))
        .json(&serde_json::json!({
            "name": "   ",
            "category": "Bug",
            "status": "Backlog"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Ticket name cannot be empty or whitespace");
}

#[tokio::test]
async fn test_unknown_enum_value_is_rejected() {
    let (base, _dir) = spawn_server().await;
    let http = client();

    let resp = http
        .post(format!("{base}/api/tickets"))
        .json(&serde_json::json!({
            "name": "x",
            "category": "Chore",
            "status": "Backlog"
        }))
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_client_error());
}

#[tokio::test]
async fn test_invalid_id_is_rejected() {
    let (base, _dir) = spawn_server().await;
    let http = client();

    let resp = http
        .delete(format!("{base}/api/tickets/0"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Invalid ticket ID");
}

#[tokio::test]
async fn test_get_missing_ticket_message_embeds_id() {
    let (base, _dir) = spawn_server().await;
    let http = client();

    let resp = http
        .get(format!("{base}/api/tickets/424242"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Ticket with ID 424242 not found");
}

#[tokio::test]
async fn test_cors_allows_only_configured_origin() {
    let (base, _dir) = spawn_server().await;
    let http = client();

    let preflight = http
        .request(reqwest::Method::OPTIONS, format!("{base}/api/tickets"))
        .header("origin", ALLOWED_ORIGIN)
        .header("access-control-request-method", "POST")
        .send()
        .await
        .unwrap();
    assert_eq!(preflight.status(), 204);
    assert_eq!(
        preflight
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some(ALLOWED_ORIGIN)
    );

    let other = http
        .request(reqwest::Method::OPTIONS, format!("{base}/api/tickets"))
        .header("origin", "http://evil.example")
        .send()
        .await
        .unwrap();
    assert!(other
        .headers()
        .get("access-control-allow-origin")
        .is_none());

    let plain = http
        .get(format!("{base}/api/tickets"))
        .header("origin", ALLOWED_ORIGIN)
        .send()
        .await
        .unwrap();
    assert_eq!(
        plain
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some(ALLOWED_ORIGIN)
    );
}
