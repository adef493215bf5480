//! CLI argument definitions for a stress run.

use crate::error::StressError;
use crate::settings::{StreamTarget, StressSettings};
use clap::Args;
use std::time::Duration;
use stream_client::{ClientConfig, CredentialStrategy};

/// Stress run arguments.
#[derive(Args, Clone, Debug)]
pub struct StressArgs {
    /// Number of records each worker submits
    #[arg(long, env = "STRESS_ITERATIONS", default_value = "100")]
    pub iterations: u64,

    /// Number of workers submitting in parallel
    #[arg(long, env = "STRESS_WORKERS", default_value = "4")]
    pub workers: usize,

    /// Target stream name
    #[arg(long, env = "STREAM_NAME", default_value = "stress-test-stream")]
    pub stream_name: String,

    /// Target AWS region
    #[arg(long, env = "AWS_REGION", default_value = "us-east-1")]
    pub region: String,

    /// Request timeout in milliseconds, after which a submission fails
    #[arg(long, env = "STRESS_REQUEST_TIMEOUT_MS", default_value = "60000")]
    pub request_timeout_ms: u64,

    /// Maximum requests in flight per worker client
    #[arg(long, env = "STRESS_MAX_CONNECTIONS", default_value = "1")]
    pub max_connections: usize,

    /// Sleep between polls of a pending submission, in milliseconds
    #[arg(long, env = "STRESS_POLL_INTERVAL_MS", default_value = "100")]
    pub poll_interval_ms: u64,

    /// AWS profile for credentials (default provider chain when unset)
    #[arg(long, env = "AWS_PROFILE")]
    pub profile: Option<String>,

    /// Dry-run mode: run the full worker loop against a local loopback client
    #[arg(long)]
    pub dry_run: bool,
}

impl StressArgs {
    /// Validate the arguments and freeze them into [`StressSettings`].
    pub fn settings(&self) -> Result<StressSettings, StressError> {
        if self.workers == 0 {
            return Err(StressError::InvalidConfig(
                "workers must be at least 1".to_string(),
            ));
        }
        if self.stream_name.trim().is_empty() {
            return Err(StressError::InvalidConfig(
                "stream name must not be empty".to_string(),
            ));
        }
        if self.poll_interval_ms == 0 {
            return Err(StressError::InvalidConfig(
                "poll interval must be greater than zero".to_string(),
            ));
        }

        let client = ClientConfig {
            region: self.region.clone(),
            max_connections: self.max_connections,
            request_timeout: Duration::from_millis(self.request_timeout_ms),
            credentials: match &self.profile {
                Some(name) => CredentialStrategy::Profile(name.clone()),
                None => CredentialStrategy::DefaultChain,
            },
        };
        client
            .validate()
            .map_err(|e| StressError::InvalidConfig(e.to_string()))?;

        Ok(StressSettings {
            worker_count: self.workers,
            iterations: self.iterations,
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            target: StreamTarget {
                stream_name: self.stream_name.clone(),
                region: self.region.clone(),
            },
            client,
            dry_run: self.dry_run,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: StressArgs,
    }

    fn parse(extra: &[&str]) -> StressArgs {
        let mut argv = vec!["stream-stress", "--region", "eu-west-1"];
        argv.extend_from_slice(extra);
        TestCli::try_parse_from(argv).unwrap().args
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["--stream-name", "orders"]);
        assert_eq!(args.iterations, 100);
        assert_eq!(args.workers, 4);
        assert_eq!(args.request_timeout_ms, 60_000);
        assert_eq!(args.max_connections, 1);
        assert_eq!(args.poll_interval_ms, 100);
        assert!(!args.dry_run);

        let settings = args.settings().unwrap();
        assert_eq!(settings.total_records(), 400);
        assert_eq!(settings.poll_interval, Duration::from_millis(100));
        assert_eq!(settings.client.request_timeout, Duration::from_secs(60));
        assert_eq!(settings.target.stream_name, "orders");
        assert_eq!(settings.target.region, "eu-west-1");
        assert_eq!(settings.client.region, "eu-west-1");
    }

    #[test]
    fn test_profile_selects_credential_strategy() {
        let settings = parse(&["--stream-name", "s", "--profile", "loadtest"])
            .settings()
            .unwrap();
        assert_eq!(
            settings.client.credentials,
            CredentialStrategy::Profile("loadtest".to_string())
        );
    }

    #[test]
    fn test_rejects_invalid_values() {
        for extra in [
            &["--stream-name", "s", "--workers", "0"][..],
            &["--stream-name", ""][..],
            &["--stream-name", "s", "--poll-interval-ms", "0"][..],
            &["--stream-name", "s", "--max-connections", "0"][..],
            &["--stream-name", "s", "--request-timeout-ms", "0"][..],
        ] {
            assert!(
                matches!(parse(extra).settings(), Err(StressError::InvalidConfig(_))),
                "expected {extra:?} to be rejected"
            );
        }
    }
}
