//! Integration tests for the WhatTheGovDoin query client.
//!
//! Every test runs against a local `wiremock` server; nothing leaves the host.

use govdoin::api::*;
use govdoin::config::ConfigError;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(server: &MockServer) -> QueryClient {
    QueryClient::new(server.uri()).unwrap()
}

/// A base URL nothing listens on.
fn refused_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

// =============================================================================
// Generic GET
// =============================================================================

mod fetch_json {
    use super::*;

    #[tokio::test]
    async fn test_success_returns_payload_unmodified() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/articles"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"x": 1})))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let payload = client
            .fetch_json("/api/articles", &QueryParams::new())
            .await
            .unwrap();
        assert_eq!(payload, json!({"x": 1}));
    }

    #[tokio::test]
    async fn test_params_are_encoded_in_input_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/articles"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let params = QueryParams::new()
            .with("query_text", "hello world&more")
            .with("top_k", 5);
        client.fetch_json("/api/articles", &params).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].url.query(),
            Some("query_text=hello+world%26more&top_k=5")
        );
    }

    #[tokio::test]
    async fn test_absolute_endpoint_bypasses_base() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/issues"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let client = QueryClient::new("http://localhost:5001").unwrap();
        let endpoint = format!("{}/api/issues", server.uri());
        let payload = client.fetch_json(&endpoint, &QueryParams::new()).await.unwrap();
        assert_eq!(payload, json!([]));
    }

    #[tokio::test]
    async fn test_404_fails_regardless_of_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"x": 1})))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client
            .fetch_json("/api/missing", &QueryParams::new())
            .await
            .unwrap_err();
        assert!(err.is_status());
        assert_eq!(err.status(), Some(404));
        assert_eq!(client.fetch_json_opt("/api/missing", &QueryParams::new()).await, None);
    }

    #[tokio::test]
    async fn test_malformed_json_fails() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"x":"#))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client
            .fetch_json("/api/articles", &QueryParams::new())
            .await
            .unwrap_err();
        assert!(err.is_parse());
        assert_eq!(client.fetch_json_opt("/api/articles", &QueryParams::new()).await, None);
    }

    #[tokio::test]
    async fn test_connection_refused_fails_without_panicking() {
        let client = QueryClient::new(refused_base_url()).unwrap();
        let err = client
            .fetch_json("/api/articles", &QueryParams::new())
            .await
            .unwrap_err();
        assert!(err.is_transport());
        assert_eq!(err.status(), None);
        assert_eq!(client.fetch_json_opt("/api/articles", &QueryParams::new()).await, None);
    }

    #[tokio::test]
    async fn test_concurrent_calls_do_not_interfere() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/articles"))
            .and(query_param("query_text", "alpha"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"q": "alpha"})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/articles"))
            .and(query_param("query_text", "beta"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"q": "beta"})))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let alpha = QueryParams::new().with("query_text", "alpha");
        let beta = QueryParams::new().with("query_text", "beta");
        let (a, b) = tokio::join!(
            client.fetch_json("/api/articles", &alpha),
            client.fetch_json("/api/articles", &beta),
        );
        assert_eq!(a.unwrap(), json!({"q": "alpha"}));
        assert_eq!(b.unwrap(), json!({"q": "beta"}));
    }

    #[tokio::test]
    async fn test_empty_endpoint_sends_nothing() {
        let server = MockServer::start().await;
        let client = client_for(&server).await;
        let err = client.fetch_json("", &QueryParams::new()).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidEndpoint(_)));
        assert!(server.received_requests().await.unwrap().is_empty());
    }
}

// =============================================================================
// Generic POST
// =============================================================================

mod post_json {
    use super::*;

    #[tokio::test]
    async fn test_post_sends_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/summarize"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({"prompt": "tariffs"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let payload = client
            .post_json("/api/summarize", &json!({"prompt": "tariffs"}))
            .await
            .unwrap();
        assert_eq!(payload, json!({"ok": true}));
    }

    #[tokio::test]
    async fn test_error_field_becomes_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({"error": "Missing required fields"})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.post_json("/api/issues", &json!({})).await.unwrap_err();
        match err {
            ApiError::HttpStatus { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Missing required fields");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_status_text_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.post_json("/api/issues", &json!({})).await.unwrap_err();
        assert_eq!(err.to_string(), "HTTP error 500: Internal Server Error");
        assert_eq!(client.post_json_opt("/api/issues", &json!({})).await, None);
        assert!(!client.post_ok("/api/issues", &json!({})).await);
    }

    #[tokio::test]
    async fn test_post_refused() {
        let client = QueryClient::new(refused_base_url()).unwrap();
        assert!(!client.post_ok("/api/issues", &json!({"_id": 1})).await);
    }
}

// =============================================================================
// Service routes
// =============================================================================

mod routes {
    use super::*;

    fn hit(id: i64, name: &str, score: f64) -> serde_json::Value {
        json!({"article_id": id, "name": name, "summary": "s", "similarity_score": score})
    }

    #[tokio::test]
    async fn test_fetch_articles() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/articles"))
            .and(query_param("query_text", "border policy"))
            .and(query_param("top_k", "2"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([hit(7, "First", 0.91), hit(3, "Second", 0.42)])),
            )
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let hits = client.fetch_articles("border policy", 2).await.unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].article_id, DocumentId::Int(7));
        assert_eq!(hits[0].name, "First");
        assert!(hits[0].similarity_score > hits[1].similarity_score);
    }

    #[tokio::test]
    async fn test_fetch_executive_string_ids() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/executive"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"article_id": "eo-14000", "name": "Order", "summary": "text", "similarity_score": 0.5}
            ])))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let hits = client.fetch_executive("energy", 5).await.unwrap();
        assert_eq!(hits[0].article_id, DocumentId::Text("eo-14000".into()));
    }

    #[tokio::test]
    async fn test_empty_query_text_is_rejected_locally() {
        let server = MockServer::start().await;
        let client = client_for(&server).await;
        let err = client.fetch_articles("", 5).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidParameter(_)));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_biography() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/biography"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "articles": [hit(1, "A", 0.3)],
                "executive orders": [hit(2, "E", 0.2)],
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let bio = client.fetch_biography("senator", 5).await.unwrap();
        assert_eq!(bio.articles.len(), 1);
        assert_eq!(bio.executive_orders[0].name, "E");
    }

    #[tokio::test]
    async fn test_fetch_issues() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/issues"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "_id": 1,
                "issue": "Tariffs",
                "summary": "Trade policy",
                "llm_summary": "TBD",
                "articles": [],
                "executive_orders": []
            }])))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let issues = client.fetch_issues().await.unwrap();
        assert_eq!(issues, vec![Issue::new(1, "Tariffs", "Trade policy")]);
    }

    #[tokio::test]
    async fn test_wrong_shape_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/issues"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"not": "a list"})))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert!(client.fetch_issues().await.unwrap_err().is_parse());
    }

    #[tokio::test]
    async fn test_fetch_summary() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/summarize"))
            .and(body_json(json!({"prompt": "What changed?"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "llm_response": "A lot.",
                "articles": [],
                "executive_orders": [],
                "debug": "dropped"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let summary = client.fetch_summary("What changed?").await.unwrap();
        assert_eq!(summary.llm_response.as_deref(), Some("A lot."));
        assert_eq!(summary.articles, Some(json!([])));
    }

    #[tokio::test]
    async fn test_replace_issue_boolean_contract() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/issues"))
            .and(body_json(json!({
                "_id": 1,
                "issue": "Tariffs",
                "summary": "Trade policy",
                "llm_summary": "Updated",
                "articles": [],
                "executive_orders": []
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"message": "Issue successfully replaced."})),
            )
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/issues"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(json!({"error": "No issue found with the specified _id"})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let known = Issue::new(1, "Tariffs", "Trade policy").with_llm_summary("Updated");
        assert!(client.replace_issue(&known).await);

        let unknown = Issue::new(99, "Nope", "Nothing");
        assert!(!client.replace_issue(&unknown).await);
        let err = client.try_replace_issue(&unknown).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "HTTP error 404: No issue found with the specified _id"
        );
    }

    #[tokio::test]
    async fn test_health_check() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"message": "Hello World!", "status": "OK"})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert!(client.health_check().await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn test_load_config_over_http() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/env.js"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("config.API_BASE_URL = \"https://gov.example.org\";\n"),
            )
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let config = client.load_config("/env.js").await.unwrap();
        assert_eq!(config.api_base_url, "https://gov.example.org");

        let configured = QueryClient::from_config(&config).unwrap();
        assert_eq!(configured.base_url().host_str(), Some("gov.example.org"));
    }

    #[tokio::test]
    async fn test_load_config_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/env.js"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        match client.load_config("/env.js").await.unwrap_err() {
            ApiError::HttpStatus { status, .. } => assert_eq!(status, 404),
            other => panic!("expected HttpStatus, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_load_config_malformed_document() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/env.js"))
            .respond_with(ResponseTemplate::new(200).set_body_string("# ok\nAPI_BASE_URL\n"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        match client.load_config("/env.js").await.unwrap_err() {
            ApiError::Config(ConfigError::Malformed { line, content }) => {
                assert_eq!(line, 2);
                assert_eq!(content, "API_BASE_URL");
            }
            other => panic!("expected Config(Malformed), got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_whitespace_query_text_reaches_server() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/articles"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let results = client.fetch_articles("   ", 5).await.unwrap();
        assert!(results.is_empty());

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url.query(), Some("query_text=+++&top_k=5"));
    }
}
