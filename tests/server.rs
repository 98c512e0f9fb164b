use std::sync::Arc;

use serde_json::{json, Value};
use tokio::net::TcpListener;
use tracing::Level;
use webhook_receiver::{
    config::Config,
    utils::logger::MemoryLog,
    web, AppContext,
};

async fn spawn_server() -> (String, Arc<MemoryLog>) {
    let log = Arc::new(MemoryLog::new());
    let ctx = Arc::new(AppContext::new(Config::default(), log.clone()));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(web::serve(listener, ctx));

    (format!("http://{}", addr), log)
}

#[tokio::test]
async fn test_webhook_over_http() {
    let (base, log) = spawn_server().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/webhook", base))
        .header("x-bank-signature", "abc")
        .json(&json!({
            "transactionId": "tx-http",
            "status": "SETTLED",
            "amount": 1200,
            "customer": "ACME"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["dataReceived"], true);
    assert_eq!(body["message"], "Webhook received successfully");

    let info = log.messages(Level::INFO);
    assert!(info.iter().any(|line| line.contains("\"x-bank-signature\": \"abc\"")));
    assert!(info.contains(&"- Amount: 1200".to_string()));
}

#[tokio::test]
async fn test_discovery_status_and_not_found_over_http() {
    let (base, _log) = spawn_server().await;
    let client = reqwest::Client::new();

    let body: Value = client.get(&base).send().await.unwrap().json().await.unwrap();
    assert_eq!(body["endpoints"]["webhook"], "/webhook");

    let body: Value = client
        .get(format!("{}/status", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["status"], "API Online");
    assert_eq!(body["env"], "development");

    let response = client
        .delete(format!("{}/webhook?id=1", base))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["path"], "/webhook?id=1");
    assert_eq!(body["method"], "DELETE");
}

#[tokio::test]
async fn test_echo_form_over_http() {
    let (base, _log) = spawn_server().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/test", base))
        .header("content-type", "application/x-www-form-urlencoded")
        .body("a=1&b=two")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["dataReceived"], json!({"a": "1", "b": "two"}));
}
