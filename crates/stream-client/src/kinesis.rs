//! AWS Kinesis Data Streams client.

use crate::client::{ClientFactory, SubmissionClient, SubmissionOutcome, SubmissionReceipt};
use crate::config::{ClientConfig, CredentialStrategy};
use crate::error::ClientError;
use crate::handle::ChannelHandle;
use async_trait::async_trait;
use aws_config::retry::RetryConfig;
use aws_config::timeout::TimeoutConfig;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_kinesis::error::{DisplayErrorContext, SdkError};
use aws_sdk_kinesis::operation::put_record::PutRecordError;
use aws_sdk_kinesis::primitives::Blob;
use std::fmt::Debug;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, info};

/// Kinesis producer owned by a single worker.
///
/// Every `submit` spawns a `PutRecord` call on the runtime. Calls wait for
/// one of `max_connections` permits before going on the wire, so a client
/// never has more than that many requests outstanding. SDK retries are
/// disabled; a failed record resolves as a failure.
pub struct KinesisClient {
    client: aws_sdk_kinesis::Client,
    connections: Arc<Semaphore>,
}

impl KinesisClient {
    /// Build a client from `config`.
    pub async fn connect(config: &ClientConfig) -> Result<Self, ClientError> {
        config.validate()?;

        let timeouts = TimeoutConfig::builder()
            .operation_timeout(config.request_timeout)
            .build();

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .timeout_config(timeouts)
            .retry_config(RetryConfig::disabled());

        if let CredentialStrategy::Profile(name) = &config.credentials {
            loader = loader.profile_name(name);
        }

        let sdk_config = loader.load().await;

        Ok(Self {
            client: aws_sdk_kinesis::Client::new(&sdk_config),
            connections: Arc::new(Semaphore::new(config.max_connections)),
        })
    }
}

impl SubmissionClient for KinesisClient {
    type Handle = ChannelHandle;

    fn submit(
        &mut self,
        stream_name: &str,
        timestamp_key: &str,
        partition_key: &str,
        payload: &[u8],
    ) -> ChannelHandle {
        let (tx, handle) = ChannelHandle::channel();

        let request = self
            .client
            .put_record()
            .stream_name(stream_name)
            .partition_key(timestamp_key)
            .explicit_hash_key(partition_key)
            .data(Blob::new(payload.to_vec()));
        let connections = self.connections.clone();

        tokio::spawn(async move {
            let outcome: SubmissionOutcome =
                match with_connection(connections, request.send()).await {
                    Ok(Ok(output)) => Ok(SubmissionReceipt {
                        shard_id: output.shard_id().to_string(),
                        sequence_number: output.sequence_number().to_string(),
                    }),
                    Ok(Err(err)) => Err(classify(err)),
                    Err(err) => Err(err),
                };

            if tx.send(outcome).is_err() {
                debug!("Submission resolved after its handle was dropped");
            }
        });

        handle
    }
}

/// Run `request` while holding one connection permit.
async fn with_connection<F: Future>(
    connections: Arc<Semaphore>,
    request: F,
) -> Result<F::Output, ClientError> {
    let _permit = connections
        .acquire_owned()
        .await
        .map_err(|_| ClientError::Dropped)?;
    Ok(request.await)
}

fn classify<R>(err: SdkError<PutRecordError, R>) -> ClientError
where
    R: Debug + Send + Sync + 'static,
{
    if let SdkError::TimeoutError(_) = &err {
        return ClientError::Timeout;
    }
    // Service errors carry the raw response; only the modeled error is logged.
    if let Some(service) = err.as_service_error() {
        let message = DisplayErrorContext(service).to_string();
        return if service.is_provisioned_throughput_exceeded_exception() {
            ClientError::Throttled(message)
        } else {
            ClientError::Service(message)
        };
    }
    ClientError::Service(DisplayErrorContext(&err).to_string())
}

/// Creates a fresh [`KinesisClient`] for every worker.
#[derive(Debug, Clone)]
pub struct KinesisClientFactory {
    config: ClientConfig,
}

impl KinesisClientFactory {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ClientFactory for KinesisClientFactory {
    type Client = KinesisClient;

    async fn create(&self, worker_id: usize) -> Result<KinesisClient, ClientError> {
        info!(
            "Creating Kinesis client for worker {} (region: {}, max connections: {}, timeout: {:?})",
            worker_id, self.config.region, self.config.max_connections, self.config.request_timeout
        );
        KinesisClient::connect(&self.config).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_kinesis::config::http::HttpResponse;
    use aws_sdk_kinesis::types::error::{
        ProvisionedThroughputExceededException, ResourceNotFoundException,
    };
    use aws_smithy_types::body::SdkBody;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::oneshot;

    fn response(status: u16) -> HttpResponse {
        HttpResponse::new(status.try_into().unwrap(), SdkBody::empty())
    }

    #[test]
    fn test_classify_throughput_exceeded() {
        let err: SdkError<PutRecordError, HttpResponse> = SdkError::service_error(
            PutRecordError::ProvisionedThroughputExceededException(
                ProvisionedThroughputExceededException::builder()
                    .message("Rate exceeded for shard shardId-000000000000")
                    .build(),
            ),
            response(400),
        );

        match classify(err) {
            ClientError::Throttled(message) => {
                assert!(message.contains("Rate exceeded"), "{message}");
                assert!(!message.contains("SdkBody"), "{message}");
            }
            other => panic!("Expected Throttled, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_other_service_error() {
        let err: SdkError<PutRecordError, HttpResponse> = SdkError::service_error(
            PutRecordError::ResourceNotFoundException(
                ResourceNotFoundException::builder()
                    .message("Stream stress-test-stream not found")
                    .build(),
            ),
            response(400),
        );

        match classify(err) {
            ClientError::Service(message) => {
                assert!(message.contains("not found"), "{message}");
                assert!(!message.contains("Response {"), "{message}");
            }
            other => panic!("Expected Service, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_timeout() {
        let err: SdkError<PutRecordError, HttpResponse> =
            SdkError::timeout_error("operation timed out");
        assert!(matches!(classify(err), ClientError::Timeout));
    }

    #[tokio::test]
    async fn test_in_flight_requests_bounded_by_permits() {
        let connections = Arc::new(Semaphore::new(1));
        let started = Arc::new(AtomicUsize::new(0));
        let (release_tx, release_rx) = oneshot::channel::<()>();

        let first_started = started.clone();
        let first = tokio::spawn(with_connection(connections.clone(), async move {
            first_started.fetch_add(1, Ordering::SeqCst);
            let _ = release_rx.await;
        }));
        let second_started = started.clone();
        let second = tokio::spawn(with_connection(connections.clone(), async move {
            second_started.fetch_add(1, Ordering::SeqCst);
        }));

        while started.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        assert_eq!(started.load(Ordering::SeqCst), 1);
        assert_eq!(connections.available_permits(), 0);

        release_tx.send(()).unwrap();
        first.await.unwrap().unwrap();
        second.await.unwrap().unwrap();
        assert_eq!(started.load(Ordering::SeqCst), 2);
        assert_eq!(connections.available_permits(), 1);
    }

    #[tokio::test]
    async fn test_closed_semaphore_drops_request() {
        let connections = Arc::new(Semaphore::new(1));
        connections.close();
        let result = with_connection(connections, async { 1 }).await;
        assert!(matches!(result, Err(ClientError::Dropped)));
    }

    #[tokio::test]
    async fn test_connect_rejects_invalid_config() {
        let config = ClientConfig {
            max_connections: 0,
            ..Default::default()
        };
        let result = KinesisClient::connect(&config).await;
        assert!(matches!(result, Err(ClientError::InvalidConfig(_))));
    }

    #[tokio::test]
    async fn test_factory_propagates_config_errors() {
        let factory = KinesisClientFactory::new(ClientConfig {
            region: String::new(),
            ..Default::default()
        });
        assert!(matches!(
            factory.create(1).await,
            Err(ClientError::InvalidConfig(_))
        ));
    }
}
