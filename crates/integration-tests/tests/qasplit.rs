mod harness;

use harness::config::ConfigBuilder;
use harness::server::TestServer;

async fn qasplit(server: &TestServer, body: &serde_json::Value) -> reqwest::Response {
    server
        .client()
        .post(server.url("/qasplit"))
        .json(body)
        .send()
        .await
        .unwrap()
}

fn words(n: usize) -> String {
    vec!["word"; n].join(" ")
}

#[tokio::test]
async fn short_pair_is_single_unmodified_chunk() {
    let server = TestServer::start(ConfigBuilder::new().build()).await.unwrap();

    let resp = qasplit(
        &server,
        &serde_json::json!({
            "question": "Salam necesen",
            "answer": "Yaxshiyam",
            "intent": "greeting"
        }),
    )
    .await;

    assert_eq!(resp.status(), 200);

    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "status": "success",
            "data": [{
                "text": "Q: Salam necesen A: Yaxshiyam",
                "intent": "greeting",
                "token_count": 9
            }]
        })
    );
}

#[tokio::test]
async fn long_pair_is_split_into_full_windows() {
    let server = TestServer::start(ConfigBuilder::new().build()).await.unwrap();

    let resp = qasplit(
        &server,
        &serde_json::json!({
            "question": words(597),
            "answer": words(597),
            "intent": "long"
        }),
    )
    .await;

    assert_eq!(resp.status(), 200);

    let json: serde_json::Value = resp.json().await.unwrap();
    let counts: Vec<u64> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|chunk| chunk["token_count"].as_u64().unwrap())
        .collect();

    assert_eq!(counts, vec![500, 500, 204]);
    assert!(json["data"].as_array().unwrap().iter().all(|c| c["intent"] == "long"));
}

#[tokio::test]
async fn request_budget_overrides_configured_default() {
    let server = TestServer::start(ConfigBuilder::new().with_max_tokens(500).build())
        .await
        .unwrap();

    let resp = qasplit(
        &server,
        &serde_json::json!({
            "question": words(10),
            "answer": words(10),
            "intent": "budget",
            "max_tokens": 8
        }),
    )
    .await;

    let json: serde_json::Value = resp.json().await.unwrap();
    let chunks = json["data"].as_array().unwrap();

    // 24 content tokens in windows of 6
    assert_eq!(chunks.len(), 4);
    assert!(chunks.iter().all(|c| c["token_count"] == 8));
}

#[tokio::test]
async fn non_positive_budget_is_bad_request() {
    let server = TestServer::start(ConfigBuilder::new().build()).await.unwrap();

    let resp = qasplit(
        &server,
        &serde_json::json!({
            "question": "q",
            "answer": "a",
            "intent": "x",
            "max_tokens": 0
        }),
    )
    .await;

    assert_eq!(resp.status(), 400);

    let json: serde_json::Value = resp.json().await.unwrap();
    assert!(json["detail"].is_string());
}

#[tokio::test]
async fn missing_field_is_bad_request() {
    let server = TestServer::start(ConfigBuilder::new().build()).await.unwrap();

    let resp = qasplit(&server, &serde_json::json!({ "question": "q", "answer": "a" })).await;

    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn non_json_body_is_unsupported_media_type() {
    let server = TestServer::start(ConfigBuilder::new().build()).await.unwrap();

    let resp = server
        .client()
        .post(server.url("/qasplit"))
        .header("content-type", "text/plain")
        .body("question=q")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 415);
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let server = TestServer::start(ConfigBuilder::new().with_body_limit(256).build())
        .await
        .unwrap();

    let resp = qasplit(
        &server,
        &serde_json::json!({
            "question": words(200),
            "answer": "a",
            "intent": "big"
        }),
    )
    .await;

    assert_eq!(resp.status(), 413);
}
