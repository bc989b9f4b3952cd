//! Status-code mapping tests for post endpoints.

use writeas::{
    claim_posts, get_collection_post, get_user_posts, pin_post, unpin_post, ClientConfig,
    Create, Delete, DomainErrorKind, Get, OwnedPostParams, PinnedPostParams, Post, PostParams,
    Update, WriteAsClient, WriteAsError,
};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn anonymous_client(server: &MockServer) -> WriteAsClient {
    WriteAsClient::with_config(ClientConfig::default().with_url(server.uri())).unwrap()
}

fn authed_client(server: &MockServer) -> WriteAsClient {
    WriteAsClient::with_config(
        ClientConfig::default()
            .with_url(server.uri())
            .with_token("test-token"),
    )
    .unwrap()
}

fn post_json(id: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "slug": null,
        "appearance": "norm",
        "language": "",
        "rtl": false,
        "created": "2016-07-09T01:43:46Z",
        "title": "My First Post",
        "body": "This is my first post on Write.as.",
        "tags": [],
        "views": 0
    })
}

#[tokio::test]
async fn test_get_post_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/posts/3psnxyhqxy3hq"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "code": 200,
            "data": post_json("3psnxyhqxy3hq")
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = anonymous_client(&mock_server);
    let post = Post::get(&client, "3psnxyhqxy3hq".to_string()).await.unwrap();

    assert_eq!(post.id, "3psnxyhqxy3hq");
    assert_eq!(post.title, "My First Post");
    assert_eq!(post.font.as_deref(), Some("norm"));
}

#[tokio::test]
async fn test_get_post_not_found_and_gone() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/posts/missing"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({"code": 404, "error_msg": "Not here."})),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/posts/unpublished"))
        .respond_with(
            ResponseTemplate::new(410)
                .set_body_json(serde_json::json!({"code": 410, "error_msg": "Gone."})),
        )
        .mount(&mock_server)
        .await;

    let client = anonymous_client(&mock_server);

    let err = Post::get(&client, "missing".to_string()).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Post not found.");

    let err = Post::get(&client, "unpublished".to_string())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), Some(DomainErrorKind::Gone));
    assert_eq!(err.to_string(), "Post unpublished.");
    assert_eq!(err.status_code(), Some(410));
}

#[tokio::test]
async fn test_create_anonymous_post_returns_token() {
    let mock_server = MockServer::start().await;

    let mut created = post_json("rf3t35fkax0aw");
    created["token"] = serde_json::json!("ozPEuJWYK8L1QsysBUcTUKy9za7yqQ4M");

    Mock::given(method("POST"))
        .and(path("/posts"))
        .and(body_json(serde_json::json!({
            "title": "My First Post",
            "body": "This is my first post on Write.as.",
            "font": "norm"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "code": 201,
            "data": created
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = anonymous_client(&mock_server);
    let post = Post::create(
        &client,
        PostParams::new("This is my first post on Write.as.")
            .with_title("My First Post")
            .with_font("norm"),
    )
    .await
    .unwrap();

    assert_eq!(post.id, "rf3t35fkax0aw");
    assert_eq!(
        post.token.as_deref(),
        Some("ozPEuJWYK8L1QsysBUcTUKy9za7yqQ4M")
    );
}

#[tokio::test]
async fn test_create_post_in_collection_uses_collection_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/collections/blog/posts"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "code": 201,
            "data": post_json("abc")
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = authed_client(&mock_server);
    let post = Post::create(&client, PostParams::new("Body").in_collection("blog"))
        .await
        .unwrap();
    assert_eq!(post.id, "abc");
}

#[tokio::test]
async fn test_create_post_in_missing_collection() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/collections/nope/posts"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({"code": 404, "error_msg": "Not found."})),
        )
        .mount(&mock_server)
        .await;

    let client = authed_client(&mock_server);
    let err = Post::create(&client, PostParams::new("Body").in_collection("nope"))
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Collection not found.");
}

#[tokio::test]
async fn test_update_post_with_edit_token() {
    let mock_server = MockServer::start().await;

    let mut updated = post_json("rf3t35fkax0aw");
    updated["body"] = serde_json::json!("Updated body.");

    Mock::given(method("POST"))
        .and(path("/posts/rf3t35fkax0aw"))
        .and(body_json(serde_json::json!({
            "token": "edit-token",
            "body": "Updated body."
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "code": 200,
            "data": updated
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = anonymous_client(&mock_server);
    let post = Post::update(
        &client,
        "rf3t35fkax0aw".to_string(),
        PostParams::new("Updated body.").with_token("edit-token"),
    )
    .await
    .unwrap();

    assert_eq!(post.content, "Updated body.");
}

#[tokio::test]
async fn test_update_post_forbidden() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/posts/abc"))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_json(serde_json::json!({"code": 403, "error_msg": "Bad token."})),
        )
        .mount(&mock_server)
        .await;

    let client = anonymous_client(&mock_server);
    let err = Post::update(
        &client,
        "abc".to_string(),
        PostParams::new("x").with_token("wrong"),
    )
    .await
    .unwrap_err();

    assert_eq!(err.kind(), Some(DomainErrorKind::Forbidden));
    assert_eq!(err.server_message(), Some("Bad token."));
}

#[tokio::test]
async fn test_delete_post_sends_token_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/posts/rf3t35fkax0aw"))
        .and(query_param("token", "ozPEuJWYK8L1QsysBUcTUKy9za7yqQ4M"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = anonymous_client(&mock_server);
    Post::delete(
        &client,
        OwnedPostParams::new("rf3t35fkax0aw").with_token("ozPEuJWYK8L1QsysBUcTUKy9za7yqQ4M"),
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn test_delete_post_without_credentials() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/posts/abc"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({"code": 401, "error_msg": "No token."})),
        )
        .mount(&mock_server)
        .await;

    let client = anonymous_client(&mock_server);
    let err = Post::delete(&client, OwnedPostParams::new("abc"))
        .await
        .unwrap_err();

    assert!(err.is_not_authenticated());
    assert_eq!(err.status_code(), Some(401));

    // No token means no query string
    let requests = mock_server.received_requests().await.unwrap();
    assert!(requests[0].url.query().is_none());
}

#[tokio::test]
async fn test_claim_posts_reports_each_result() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/posts/claim"))
        .and(body_json(serde_json::json!([
            {"id": "a", "token": "tok-a"},
            {"id": "b", "token": "tok-b"}
        ])))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "code": 200,
            "data": [
                {"id": "a", "code": 200, "post": post_json("a")},
                {"id": "b", "code": 403, "error_msg": "Invalid token."}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = authed_client(&mock_server);
    let results = claim_posts(
        &client,
        &[
            OwnedPostParams::new("a").with_token("tok-a"),
            OwnedPostParams::new("b").with_token("tok-b"),
        ],
    )
    .await
    .unwrap();

    assert!(results[0].is_success());
    assert_eq!(results[1].code, 403);
    assert_eq!(results[1].error_message.as_deref(), Some("Invalid token."));
}

#[tokio::test]
async fn test_get_user_posts() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/me/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "code": 200,
            "data": [post_json("a"), post_json("b"), post_json("c")]
        })))
        .mount(&mock_server)
        .await;

    let client = authed_client(&mock_server);
    let posts = get_user_posts(&client).await.unwrap();
    assert_eq!(posts.len(), 3);
}

#[tokio::test]
async fn test_get_collection_post_by_slug() {
    let mock_server = MockServer::start().await;

    let mut found = post_json("olx6uk7064heqltf");
    found["slug"] = serde_json::json!("hello-world");

    Mock::given(method("GET"))
        .and(path("/collections/tester/posts/hello-world"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "code": 200,
            "data": found
        })))
        .mount(&mock_server)
        .await;

    let client = anonymous_client(&mock_server);
    let post = get_collection_post(&client, "tester", "hello-world")
        .await
        .unwrap();
    assert_eq!(post.slug.as_deref(), Some("hello-world"));
}

#[tokio::test]
async fn test_pin_post_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/collections/tester/pin"))
        .and(body_json(serde_json::json!([
            {"id": "olx6uk7064heqltf", "position": 1}
        ])))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "code": 200,
            "data": [{"id": "olx6uk7064heqltf", "code": 200}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = authed_client(&mock_server);
    pin_post(
        &client,
        "tester",
        &PinnedPostParams {
            id: "olx6uk7064heqltf".to_string(),
            position: Some(1),
        },
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn test_unpin_post_failure_in_result() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/collections/tester/unpin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "code": 200,
            "data": [{"id": "nope", "code": 404, "error_msg": "Post not found."}]
        })))
        .mount(&mock_server)
        .await;

    let client = authed_client(&mock_server);
    let err = unpin_post(
        &client,
        "tester",
        &PinnedPostParams {
            id: "nope".to_string(),
            position: None,
        },
    )
    .await
    .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.status_code(), Some(404));
    assert_eq!(err.to_string(), "Problem unpinning post: 404. Post not found.");
}

#[tokio::test]
async fn test_pin_post_not_authenticated() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/collections/tester/pin"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({"code": 401, "error_msg": "Bad token."})),
        )
        .mount(&mock_server)
        .await;

    let client = anonymous_client(&mock_server);
    let err = pin_post(
        &client,
        "tester",
        &PinnedPostParams {
            id: "x".to_string(),
            position: None,
        },
    )
    .await
    .unwrap_err();

    assert!(err.is_not_authenticated());
}

#[tokio::test]
async fn test_pin_post_with_no_result_is_wrong_data() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/collections/tester/pin"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"code": 200, "data": []})),
        )
        .mount(&mock_server)
        .await;

    let client = authed_client(&mock_server);
    let err = pin_post(
        &client,
        "tester",
        &PinnedPostParams {
            id: "olx6uk7064heqltf".to_string(),
            position: Some(1),
        },
    )
    .await
    .unwrap_err();

    assert!(matches!(err, WriteAsError::MissingData { status: 200 }));
}

#[tokio::test]
async fn test_pin_post_requires_ok_result_code() {
    let mock_server = MockServer::start().await;

    // Any code other than 200 in the per-post result is a failure
    Mock::given(method("POST"))
        .and(path("/collections/tester/pin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "code": 200,
            "data": [{"id": "olx6uk7064heqltf", "code": 201}]
        })))
        .mount(&mock_server)
        .await;

    let client = authed_client(&mock_server);
    let err = pin_post(
        &client,
        "tester",
        &PinnedPostParams {
            id: "olx6uk7064heqltf".to_string(),
            position: None,
        },
    )
    .await
    .unwrap_err();

    assert_eq!(err.status_code(), Some(201));
    assert_eq!(err.to_string(), "Problem pinning post: 201.");
}

#[tokio::test]
async fn test_dot_segments_are_rejected_before_sending() {
    let mock_server = MockServer::start().await;
    let client = authed_client(&mock_server);

    let err = Post::get(&client, "..".to_string()).await.unwrap_err();
    assert!(matches!(err, WriteAsError::InvalidParams(_)));

    let err = Post::delete(&client, OwnedPostParams::new("").with_token("tok"))
        .await
        .unwrap_err();
    assert!(matches!(err, WriteAsError::InvalidParams(_)));

    let err = Post::create(&client, PostParams::new("Body").in_collection("."))
        .await
        .unwrap_err();
    assert!(matches!(err, WriteAsError::InvalidParams(_)));

    let err = get_collection_post(&client, "tester", "..").await.unwrap_err();
    assert!(matches!(err, WriteAsError::InvalidParams(_)));

    let requests = mock_server.received_requests().await.unwrap();
    assert!(requests.is_empty());
}
