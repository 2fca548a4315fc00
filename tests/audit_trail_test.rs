mod common;

use aws_image_manager::server::build_app;
use poem::http::StatusCode;
use poem::test::TestClient;
use serde_json::json;

use common::{login, register, setup_app_data, ADMIN_PASSWORD, ADMIN_USERNAME};

#[tokio::test]
async fn test_successful_call_writes_one_entry_without_token() {
    let app_data = setup_app_data().await;
    let cli = TestClient::new(build_app(&app_data, "http://localhost"));
    register(&cli, "alice", "wonderland").await;
    let token = login(&cli, "alice", "wonderland").await;

    cli.post("/api/create_ami")
        .header("Authorization", format!("Bearer {}", token))
        .header("X-Forwarded-For", "203.0.113.7, 10.0.0.1")
        .body_json(&json!({ "ip": "10.0.0.5" }))
        .send()
        .await
        .assert_status_is_ok();

    let entries = app_data.audit_store.recent(10).await.unwrap();
    assert_eq!(entries.len(), 1);

    let entry = &entries[0];
    assert_eq!(entry.method, "POST");
    assert_eq!(entry.action_name, "create_ami");
    assert_eq!(entry.body, json!({ "ip": "10.0.0.5" }));
    assert_eq!(entry.claims.sub, "alice");
    assert_eq!(entry.ip_address, Some("203.0.113.7".parse().unwrap()));
    assert!(!entry.body.to_string().contains(&token));
}

#[tokio::test]
async fn test_failed_call_writes_nothing() {
    let app_data = setup_app_data().await;
    let cli = TestClient::new(build_app(&app_data, "http://localhost"));
    register(&cli, "alice", "wonderland").await;
    let token = login(&cli, "alice", "wonderland").await;

    cli.put("/api/update_launch_template")
        .header("Authorization", format!("Bearer {}", token))
        .body_json(&json!({ "launch_template_id": "not-an-id" }))
        .send()
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    assert!(app_data.audit_store.recent(10).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_method_is_recorded_per_action() {
    let app_data = setup_app_data().await;
    let cli = TestClient::new(build_app(&app_data, "http://localhost"));
    register(&cli, "alice", "wonderland").await;
    let bearer = format!("Bearer {}", login(&cli, "alice", "wonderland").await);

    cli.post("/api/create_launch_template")
        .header("Authorization", bearer.clone())
        .body_json(&json!({ "launch_template_name": "web" }))
        .send()
        .await
        .assert_status_is_ok();
    cli.put("/api/update_launch_template")
        .header("Authorization", bearer)
        .body_json(&json!({ "launch_template_id": "lt-0123456789abcdef0" }))
        .send()
        .await
        .assert_status_is_ok();

    let entries = app_data.audit_store.recent(10).await.unwrap();
    let recorded: Vec<(&str, &str)> = entries
        .iter()
        .map(|e| (e.method.as_str(), e.action_name.as_str()))
        .collect();
    assert_eq!(
        recorded,
        vec![("PUT", "update_launch_template"), ("POST", "create_launch_template")]
    );
}

#[tokio::test]
async fn test_admin_can_review_audit_logs() {
    let app_data = setup_app_data().await;
    let cli = TestClient::new(build_app(&app_data, "http://localhost"));
    register(&cli, "alice", "wonderland").await;
    let user_bearer = format!("Bearer {}", login(&cli, "alice", "wonderland").await);
    let admin_bearer = format!("Bearer {}", login(&cli, ADMIN_USERNAME, ADMIN_PASSWORD).await);

    for ip in ["10.0.0.1", "10.0.0.2", "10.0.0.3"] {
        cli.post("/api/create_ami")
            .header("Authorization", user_bearer.clone())
            .body_json(&json!({ "ip": ip }))
            .send()
            .await
            .assert_status_is_ok();
    }

    let resp = cli
        .get("/api/audit_logs")
        .query("limit", &2)
        .header("Authorization", admin_bearer)
        .send()
        .await;
    resp.assert_status_is_ok();

    let json = resp.json().await;
    let entries = json.value().array();
    entries.assert_len(2);
    let newest = entries.get(0).object();
    newest.get("action_name").assert_string("create_ami");
    newest.get("subject").assert_string("alice");
    newest.get("body").object().get("ip").assert_string("10.0.0.3");

    // Reviewing the log is not itself audited
    assert_eq!(app_data.audit_store.recent(10).await.unwrap().len(), 3);
}
