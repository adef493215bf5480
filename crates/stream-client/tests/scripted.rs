//! Behavior of the scripted clients used by the worker tests.

use std::sync::Arc;
use stream_client::testing::{Recorder, Script, ScriptedClient, ScriptedClientFactory};
use stream_client::{
    ClientError, ClientFactory, SubmissionClient, SubmissionHandle, SubmissionStatus,
};

#[test]
fn test_succeed_immediately() {
    let recorder = Arc::new(Recorder::default());
    let mut client = ScriptedClient::new(Script::succeed_immediately(), recorder.clone());

    let mut handle = client.submit("stream", "1", "2", b"payload");
    assert!(matches!(handle.poll(), SubmissionStatus::Resolved(Ok(_))));

    assert_eq!(recorder.polls(), 1);
    let submitted = recorder.submitted();
    assert_eq!(submitted.len(), 1);
    assert_eq!(submitted[0].stream_name, "stream");
    assert_eq!(submitted[0].timestamp_key, "1");
    assert_eq!(submitted[0].partition_key, "2");
    assert_eq!(submitted[0].payload, b"payload");
}

#[test]
fn test_fail_after_pending_polls() {
    let recorder = Arc::new(Recorder::default());
    let mut client = ScriptedClient::new(Script::fail_after(2), recorder.clone());

    let mut handle = client.submit("stream", "1", "2", b"x");
    assert!(handle.poll().is_pending());
    assert!(handle.poll().is_pending());
    assert!(matches!(
        handle.poll(),
        SubmissionStatus::Resolved(Err(ClientError::Service(_)))
    ));
    assert_eq!(recorder.polls(), 3);
}

#[test]
fn test_never_resolve() {
    let recorder = Arc::new(Recorder::default());
    let mut client = ScriptedClient::new(Script::never_resolve(), recorder.clone());

    let mut handle = client.submit("stream", "1", "2", b"x");
    for _ in 0..1000 {
        assert!(handle.poll().is_pending());
    }
    assert_eq!(recorder.polls(), 1000);
}

#[tokio::test]
async fn test_factory_failure_for_one_worker() {
    let factory = ScriptedClientFactory::new(Script::succeed_immediately()).failing_for(2);

    assert!(factory.create(1).await.is_ok());
    assert!(matches!(
        factory.create(2).await,
        Err(ClientError::InvalidConfig(_))
    ));
    assert!(factory.create(3).await.is_ok());
    assert_eq!(factory.recorder().clients_created(), 2);
}
