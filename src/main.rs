//! Command-line interface for stream-stress
//!
//! # Usage Examples
//!
//! ```bash
//! # 4 workers x 100 records against a Kinesis stream
//! stream-stress --stream-name my-stream --region us-east-1
//!
//! # Heavier run with a named AWS profile
//! stream-stress --stream-name my-stream --workers 16 --iterations 1000 \
//!   --max-connections 4 --profile loadtest
//!
//! # Exercise the worker loop without touching AWS
//! stream-stress --dry-run --workers 2 --iterations 10
//! ```
//!
//! Logging follows `RUST_LOG` (default `info`).

use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use stream_client::{ClientFactory, KinesisClientFactory, LoopbackClientFactory};
use stress_record::SequenceCounter;
use stress_worker::{format_table, PoolReport, StressArgs, StressSettings, WorkerPool};

#[derive(Parser)]
#[command(name = "stream-stress")]
#[command(about = "Concurrent load generator for AWS Kinesis Data Streams")]
#[command(long_about = None)]
struct Cli {
    #[command(flatten)]
    args: StressArgs,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    print!("{}", banner());

    let cli = Cli::parse();
    let settings = cli
        .args
        .settings()
        .context("Invalid stress test settings")?;

    // One runtime thread per worker, so workers run in parallel.
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(settings.worker_count)
        .thread_name("stress-worker")
        .enable_all()
        .build()
        .context("Failed to build the worker runtime")?;

    let sequence = Arc::new(SequenceCounter::new());

    let report = runtime.block_on(async {
        if settings.dry_run {
            tracing::info!("Dry run: submissions resolve locally, nothing is sent");
            run_pool(LoopbackClientFactory, &settings, sequence.clone()).await
        } else {
            let factory = KinesisClientFactory::new(settings.client.clone());
            run_pool(factory, &settings, sequence.clone()).await
        }
    })?;

    println!("{}", format_table(&report));

    tracing::info!(
        "Issued {} sequence values for {} planned records",
        sequence.current(),
        settings.total_records()
    );

    Ok(())
}

fn banner() -> String {
    let rule = "---------------------------------";
    format!(
        "{rule}\nStream Stress Tester v{}\n{rule}\n",
        env!("CARGO_PKG_VERSION")
    )
}

async fn run_pool<F: ClientFactory>(
    factory: F,
    settings: &StressSettings,
    sequence: Arc<SequenceCounter>,
) -> anyhow::Result<PoolReport> {
    let pool = WorkerPool::new(factory, settings.target.clone(), sequence)
        .with_poll_interval(settings.poll_interval);

    pool.run(settings.worker_count, settings.iterations)
        .await
        .with_context(|| {
            format!(
                "Stress run against stream '{}' failed",
                settings.target.stream_name
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_banner() {
        let banner = banner();
        let lines: Vec<&str> = banner.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], lines[2]);
        assert!(lines[1].starts_with("Stream Stress Tester v"));
        assert!(lines[1].ends_with(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_dry_run_flag() {
        let cli = Cli::try_parse_from(["stream-stress", "--dry-run", "--workers", "2"]).unwrap();
        assert!(cli.args.dry_run);
        assert_eq!(cli.args.workers, 2);
    }
}
