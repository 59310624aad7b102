//! DroneClient request/response mapping against a mock Drone server.

use drone_secrets_client::{
    ClientError, Credential, DroneClient, OrganisationClient, RemoteSecret, RepositoryClient,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> DroneClient {
    DroneClient::new(Credential::new(server.uri(), "t0ken")).unwrap()
}

/// An address nothing is listening on.
fn closed_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

async fn mount_ok(server: &MockServer, verb: &str, route: &str) {
    Mock::given(method(verb))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(server)
        .await;
}

// ---------------------------------------------------------------------------
// Endpoints
// ---------------------------------------------------------------------------

#[tokio::test(flavor = "multi_thread")]
async fn repo_list_sends_bearer_token_and_parses_names() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/repos/octocat/hello-world/secrets"))
        .and(header("Authorization", "Bearer t0ken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "API_KEY", "pull_request": false},
            {"name": "API_KEY___ab12"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let secrets = client(&server)
        .repo_secret_list("octocat", "hello-world")
        .expect("list");

    let names: Vec<_> = secrets.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["API_KEY", "API_KEY___ab12"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn repo_create_posts_name_and_data() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/repos/octocat/hello-world/secrets"))
        .and(body_json(json!({"name": "API_KEY", "data": "abc"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "API_KEY"})))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .repo_secret_create("octocat", "hello-world", &RemoteSecret::new("API_KEY", "abc"))
        .expect("create");
}

#[tokio::test(flavor = "multi_thread")]
async fn repo_update_patches_named_secret() {
    let server = MockServer::start().await;
    mount_ok(&server, "PATCH", "/api/repos/octocat/hello-world/secrets/API_KEY").await;

    client(&server)
        .repo_secret_update("octocat", "hello-world", &RemoteSecret::new("API_KEY", "abc"))
        .expect("update");
}

#[tokio::test(flavor = "multi_thread")]
async fn org_delete_targets_namespace_secret() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/secrets/octocat/API_KEY___ab12"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .org_secret_delete("octocat", "API_KEY___ab12")
        .expect("delete");
}

#[tokio::test(flavor = "multi_thread")]
async fn org_create_includes_namespace_when_set() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/secrets/octocat"))
        .and(body_json(json!({"namespace": "octocat", "name": "API_KEY", "data": "abc"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "API_KEY"})))
        .expect(1)
        .mount(&server)
        .await;
    let secret = RemoteSecret {
        namespace: Some("octocat".to_owned()),
        ..RemoteSecret::new("API_KEY", "abc")
    };

    client(&server)
        .org_secret_create("octocat", &secret)
        .expect("create");
}

// ---------------------------------------------------------------------------
// Path encoding
// ---------------------------------------------------------------------------

#[tokio::test(flavor = "multi_thread")]
async fn update_of_name_with_hash_stays_on_that_secret() {
    let server = MockServer::start().await;
    mount_ok(&server, "PATCH", "/api/secrets/octocat/A%23B").await;
    Mock::given(path("/api/secrets/octocat/A"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    client(&server)
        .org_secret_update("octocat", &RemoteSecret::new("A#B", "v"))
        .expect("update");
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_of_name_with_question_mark_sends_no_query() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/secrets/octocat/A%3Fx___ab"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .org_secret_delete("octocat", "A?x___ab")
        .expect("delete");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.query(), None);
}

#[tokio::test(flavor = "multi_thread")]
async fn repo_delete_of_name_with_slash_is_one_segment() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/repos/octocat/hello-world/secrets/a%2Fb"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .repo_secret_delete("octocat", "hello-world", "a/b")
        .expect("delete");
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[tokio::test(flavor = "multi_thread")]
async fn error_status_carries_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/secrets/octocat"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Unauthorized"})))
        .mount(&server)
        .await;

    let err = client(&server).org_secret_list("octocat").unwrap_err();

    match err {
        ClientError::Status {
            method,
            status,
            body,
            url,
        } => {
            assert_eq!(method, "GET");
            assert_eq!(status, 401);
            assert!(body.contains("Unauthorized"));
            assert!(url.ends_with("/api/secrets/octocat"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn malformed_listing_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"not": "a list"})))
        .mount(&server)
        .await;

    let err = client(&server)
        .repo_secret_list("octocat", "hello-world")
        .unwrap_err();

    assert!(matches!(err, ClientError::Decode { .. }), "got: {err}");
}

#[test]
fn unreachable_server_is_a_transport_error() {
    let client = DroneClient::new(Credential::new(closed_url(), "t0ken")).unwrap();
    let err = client.org_secret_list("octocat").unwrap_err();
    assert!(matches!(err, ClientError::Transport { .. }), "got: {err}");
}
