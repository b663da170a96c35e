//! Integration tests for the dispatcher and relay against a mockito server.

use std::sync::{Arc, Mutex};

use flow_relay::dispatch::Dispatcher;
use flow_relay::{
    aggregate_requests, Error, FlowRelay, HttpTransport, InvocationRequest, OutboundCall,
};

fn req(action: &str, cred: &str) -> InvocationRequest {
    InvocationRequest::new(action, cred, 58)
}

#[tokio::test]
async fn test_execute_issues_calls_in_order_on_success() {
    let mut server = mockito::Server::new_async().await;
    let base = server.url();

    // Each mock records its arrival into a shared log, so the in-chunk issue
    // order is asserted directly rather than inferred from hit counts.
    let arrivals: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let mut mocks = Vec::new();
    for name in ["A", "B", "C"] {
        let path = format!("/services/data/v58/actions/custom/flow/{name}");
        let log = Arc::clone(&arrivals);
        let mock = server
            .mock("POST", path.as_str())
            .match_header("content-type", "application/json; charset=UTF-8")
            .match_header("accept", "application/json")
            .match_request(move |request| {
                log.lock().unwrap().push(request.path().to_string());
                true
            })
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;
        mocks.push(mock);
    }

    let calls = aggregate_requests(&[
        req("A", &base).with_target_id("001"),
        req("B", &base).with_target_id("002"),
        req("C", &base).with_target_id("003"),
    ])
    .unwrap();

    let dispatcher = Dispatcher::new(HttpTransport::new().unwrap());
    dispatcher.execute(&calls).await.unwrap();

    for mock in &mocks {
        mock.assert_async().await;
    }
    assert_eq!(
        *arrivals.lock().unwrap(),
        vec![
            "/services/data/v58/actions/custom/flow/A".to_string(),
            "/services/data/v58/actions/custom/flow/B".to_string(),
            "/services/data/v58/actions/custom/flow/C".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_execute_sends_the_declared_verb() {
    let mut server = mockito::Server::new_async().await;
    let base = server.url();

    let patch = server
        .mock("PATCH", "/x")
        .with_status(200)
        .create_async()
        .await;
    // The verb must pass through untouched, never degrade to GET.
    let get = server.mock("GET", "/x").expect(0).create_async().await;

    let call = OutboundCall::new(format!("{base}/x"), "{}").with_method("PATCH");
    let dispatcher = Dispatcher::new(HttpTransport::new().unwrap());
    dispatcher.execute(&[call]).await.unwrap();

    patch.assert_async().await;
    get.assert_async().await;
}

#[tokio::test]
async fn test_invalid_method_is_rejected_without_network() {
    let call = OutboundCall::new("http://unused.invalid/x", "{}").with_method("NOT A VERB");
    let dispatcher = Dispatcher::new(HttpTransport::new().unwrap());
    assert!(matches!(
        dispatcher.execute(&[call]).await,
        Err(Error::Transport(_))
    ));
}

#[tokio::test]
async fn test_execute_fails_fast_on_first_error_status() {
    let mut server = mockito::Server::new_async().await;
    let base = server.url();

    let mock_a = server
        .mock("POST", "/services/data/v58/actions/custom/flow/A")
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;
    let mock_b = server
        .mock("POST", "/services/data/v58/actions/custom/flow/B")
        .with_status(500)
        .with_body("internal failure")
        .create_async()
        .await;
    // The third call must never be sent once the second has failed.
    let mock_c = server
        .mock("POST", "/services/data/v58/actions/custom/flow/C")
        .with_status(200)
        .expect(0)
        .create_async()
        .await;

    let calls = aggregate_requests(&[
        req("A", &base).with_target_id("001"),
        req("B", &base).with_target_id("002"),
        req("C", &base).with_target_id("003"),
    ])
    .unwrap();

    let dispatcher = Dispatcher::new(HttpTransport::new().unwrap());
    let err = dispatcher.execute(&calls).await.unwrap_err();
    match err {
        Error::Dispatch { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "internal failure");
        }
        other => panic!("expected Dispatch error, got {other}"),
    }

    mock_a.assert_async().await;
    mock_b.assert_async().await;
    mock_c.assert_async().await;
}

#[tokio::test]
async fn test_execute_rejects_chunk_over_quota() {
    let calls = aggregate_requests(&[
        req("A", "http://unused.invalid").with_target_id("001"),
        req("B", "http://unused.invalid").with_target_id("002"),
    ])
    .unwrap();

    let dispatcher = Dispatcher::new(HttpTransport::new().unwrap()).with_quota(1);
    // No network activity happens; the chunk is rejected up front.
    assert!(matches!(
        dispatcher.execute(&calls).await,
        Err(Error::Validation(_))
    ));
}

#[tokio::test]
async fn test_transport_fault_fails_the_chunk() {
    // Nothing listens on this port; the connection is refused.
    let calls = aggregate_requests(&[req("A", "http://127.0.0.1:9").with_target_id("001")]).unwrap();

    let dispatcher = Dispatcher::new(HttpTransport::new().unwrap());
    assert!(matches!(
        dispatcher.execute(&calls).await,
        Err(Error::Transport(_))
    ));
}

#[tokio::test]
async fn test_relay_end_to_end_merges_and_dispatches() {
    let mut server = mockito::Server::new_async().await;
    let base = server.url();

    let mock = server
        .mock("POST", "/services/data/v58/actions/custom/flow/A")
        .match_body(mockito::Matcher::Exact(
            r#"{"inputs":[{"targetId":"001"},{"targetId":"002"},{"targetId":"003"}]}"#.into(),
        ))
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let relay = FlowRelay::builder().build().unwrap();
    let handle = relay
        .submit_with_notify(&[
            req("A", &base).with_target_ids(["001", "002"]),
            req("A", &base).with_target_id("003"),
        ])
        .unwrap();

    let report = handle.wait().await.expect("batch should complete");
    assert!(report.all_succeeded());
    assert_eq!(report.outcomes.len(), 1);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_failed_chunk_does_not_cancel_other_chunks() {
    let mut server = mockito::Server::new_async().await;
    let base = server.url();

    let mock_a = server
        .mock("POST", "/services/data/v58/actions/custom/flow/A")
        .with_status(503)
        .with_body("unavailable")
        .create_async()
        .await;
    let mock_b = server
        .mock("POST", "/services/data/v58/actions/custom/flow/B")
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    // quota 1 forces one chunk per call; chunks are independent units.
    let relay = FlowRelay::builder().quota(1).build().unwrap();
    let handle = relay
        .submit_with_notify(&[
            req("A", &base).with_target_id("001"),
            req("B", &base).with_target_id("002"),
        ])
        .unwrap();

    let report = handle.wait().await.expect("batch should complete");
    assert_eq!(report.outcomes.len(), 2);
    assert_eq!(report.failure_count(), 1);
    assert!(!report.all_succeeded());

    mock_a.assert_async().await;
    mock_b.assert_async().await;
}
