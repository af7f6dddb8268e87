//! Lifecycle of a single bound operation: idle, pending, settled with data or error

mod common;

use common::FixtureTransport;
use schoolboard::models::ClassSummary;
use schoolboard::{AsyncOperation, LoadState, RawResponse, RequestError, TransportFault};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct ClassRef {
    id: u64,
    name: String,
}

#[tokio::test]
async fn test_success_returns_and_stores_decoded_value() {
    let op: AsyncOperation<(), ClassRef> = AsyncOperation::bind(|()| async {
        Ok(RawResponse::json(200, "OK", &json!({"id": 1, "name": "Class 1-A"})))
    });

    let value = op.invoke(()).await.unwrap();
    let expected = ClassRef {
        id: 1,
        name: "Class 1-A".to_string(),
    };

    assert_eq!(value, expected);
    let state = op.state();
    assert_eq!(state.data, Some(expected));
    assert!(!state.pending);
    assert!(state.error.is_none());
}

#[tokio::test]
async fn test_remote_failure_is_stored_and_returned() {
    let op: AsyncOperation<(), ClassRef> =
        AsyncOperation::bind(|()| async { Ok(RawResponse::new(404, "Not Found", Vec::new())) });

    let err = op.invoke(()).await.unwrap_err();
    let message = err.to_string();
    assert!(message.contains("404"));
    assert!(message.contains("Not Found"));

    let state = op.state();
    assert_eq!(state.error, Some(err));
    assert!(!state.pending);
    assert!(state.data.is_none());
}

#[tokio::test]
async fn test_transport_fault_keeps_previous_data() {
    let transport = FixtureTransport::new();
    transport.ok(
        "GET /classes/1",
        json!({"id": 1, "name": "Class 1-A", "teacher": "Ms. Johnson"}),
    );
    transport.fault("GET /classes/1", "network down");

    let classes = common::api(&transport).classes();
    let op: AsyncOperation<u64, ClassSummary> =
        AsyncOperation::bind(move |id| classes.get_by_id(id));

    let first = op.invoke(1).await.unwrap();
    let err = op.invoke(1).await.unwrap_err();

    assert!(matches!(err, RequestError::Transport(_)));
    assert!(err.to_string().contains("network down"));
    assert_eq!(op.data(), Some(first));
    assert_eq!(op.error(), Some(err));
    assert!(!op.is_pending());
}

#[tokio::test]
async fn test_new_invocation_clears_error_but_keeps_data() {
    let transport = FixtureTransport::new();
    transport.ok("GET /classes", common::sample_classes());
    transport.status("GET /classes", 503, "Service Unavailable");
    transport.ok("GET /classes", common::sample_classes());

    let classes = common::api(&transport).classes();
    let op: AsyncOperation<(), Vec<ClassSummary>> =
        AsyncOperation::bind(move |()| classes.get_all());

    op.invoke(()).await.unwrap();
    op.invoke(()).await.unwrap_err();
    assert!(op.error().is_some());

    let retry = op.invoke(());
    // Stale-while-revalidate: error gone, old data still visible
    assert!(op.is_pending());
    assert!(op.error().is_none());
    assert_eq!(op.data().map(|c| c.len()), Some(6));

    retry.await.unwrap();
    assert!(op.error().is_none());
    assert_eq!(transport.count("GET /classes"), 3);
}

#[tokio::test]
async fn test_binding_twice_gives_independent_state() {
    let transport = FixtureTransport::new();
    transport.ok("GET /subjects", common::sample_subjects());

    let subjects = common::api(&transport).subjects();
    let make = || {
        let subjects = subjects.clone();
        AsyncOperation::<(), serde_json::Value>::bind(move |()| subjects.get_all())
    };
    let a = make();
    let b = make();

    a.invoke(()).await.unwrap();
    assert!(a.data().is_some());
    assert!(b.state().is_idle());
    assert_eq!(b.load_state(), LoadState::Empty);
}

#[tokio::test]
async fn test_decode_failure_is_request_error() {
    let op: AsyncOperation<(), Vec<ClassSummary>> =
        AsyncOperation::bind(|()| async {
            Ok(RawResponse::json(200, "OK", &json!({"oops": true})))
        });

    let err = op.invoke(()).await.unwrap_err();
    assert!(matches!(err, RequestError::Decode(_)));
    assert_eq!(op.load_state(), LoadState::Failed(err));
}

#[tokio::test]
async fn test_invocation_can_be_spawned() {
    let op: AsyncOperation<u64, u64> =
        AsyncOperation::bind(|n: u64| async move {
            Ok(RawResponse::json(200, "OK", &json!(n + 1)))
        });

    let handle = tokio::spawn(op.invoke(41));
    assert_eq!(handle.await.unwrap().unwrap(), 42);
    assert_eq!(op.data(), Some(42));
}

#[tokio::test]
async fn test_fault_message_preserved() {
    let op: AsyncOperation<(), u8> =
        AsyncOperation::bind(|()| async { Err(TransportFault::new("connection reset by peer")) });

    let err = op.invoke(()).await.unwrap_err();
    assert_eq!(
        err,
        RequestError::Transport(TransportFault::new("connection reset by peer"))
    );
}
