// Copyright 2025 S3Vac Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

mod config;
mod report;
mod s3_client;

use anyhow::{Context, Result};
use aws_config::meta::region::RegionProviderChain;
use aws_config::{BehaviorVersion, SdkConfig};
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{ProvideCredentials, Region};
use clap::Parser;
use s3vac_drain::{DrainMode, DrainOptions, DrainReport, ListingKind, drain};
use tokio_util::sync::CancellationToken;
use tracing::{Level, error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::config::Config;
use crate::report::{StdoutSink, summary_line};
use crate::s3_client::{DEFAULT_REGION, S3Storage, bucket_region};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    init_tracing(&config)?;

    if let Err(e) = run(&config).await {
        error!("s3vac failed: {e:#}");
        std::process::exit(1);
    }

    Ok(())
}

async fn run(config: &Config) -> Result<()> {
    let shared = load_aws_config(config).await?;

    // Region resolution is a precondition for correctness: nothing is
    // drained against a client bound to the wrong region.
    let bootstrap = build_client(&shared, config, None);
    let region = bucket_region(&bootstrap, &config.bucket).await?;
    info!("bucket '{}' is in region {}", config.bucket, region);

    let storage = S3Storage::new(build_client(&shared, config, Some(region)));

    let cancel = CancellationToken::new();
    let watcher = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, stopping after the current page");
            watcher.cancel();
        }
    });

    let options = DrainOptions {
        mode: if config.dry_run {
            DrainMode::DryRun
        } else {
            DrainMode::Live
        },
        ..Default::default()
    };
    let mut sink = StdoutSink::new(config.bucket.clone());

    let objects = drain(
        &storage,
        &config.bucket,
        ListingKind::Objects,
        options,
        &mut sink,
        &cancel,
    )
    .await;
    let versions = drain(
        &storage,
        &config.bucket,
        ListingKind::Versions,
        options,
        &mut sink,
        &cancel,
    )
    .await;

    println!("{}", summary_line(config.dry_run, &objects, &versions));

    finish(&objects, &versions)
}

/// Loads the shared AWS configuration and fails fast when the provider
/// chain yields no usable credentials, before any listing begins.
async fn load_aws_config(config: &Config) -> Result<SdkConfig> {
    let region_provider = RegionProviderChain::default_provider().or_else(DEFAULT_REGION);
    let shared = aws_config::defaults(BehaviorVersion::latest())
        .region(region_provider)
        .load()
        .await;

    let provider = shared
        .credentials_provider()
        .context("no AWS credentials provider is configured")?;
    provider
        .provide_credentials()
        .await
        .context("could not load AWS credentials")?;

    if let Some(endpoint) = &config.endpoint_url {
        info!("using custom endpoint: {}", endpoint);
    }

    Ok(shared)
}

fn build_client(shared: &SdkConfig, config: &Config, region: Option<String>) -> Client {
    let mut builder = aws_sdk_s3::config::Builder::from(shared);

    if let Some(region) = region {
        builder = builder.region(Region::new(region));
    }
    if let Some(endpoint) = &config.endpoint_url {
        builder = builder.endpoint_url(endpoint);
    }
    if config.use_path_style() {
        builder = builder.force_path_style(true);
    }

    Client::from_conf(builder.build())
}

/// Reports what went wrong, if anything. Per-target failures and aborted
/// drains both make the run fail: "processed" is never conflated with
/// "confirmed deleted".
fn finish(objects: &DrainReport, versions: &DrainReport) -> Result<()> {
    let mut clean = true;

    for (label, report) in [("objects", objects), ("versions", versions)] {
        for failure in &report.failures {
            warn!(
                "failed to delete {}: {} ({})",
                failure.target, failure.code, failure.message
            );
        }
        if let Some(err) = &report.aborted {
            error!("{} drain aborted: {}", label, err);
        }
        clean &= report.is_complete() && report.failures.is_empty();
    }

    if !clean {
        anyhow::bail!("the bucket was not fully emptied");
    }
    Ok(())
}

fn init_tracing(config: &Config) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .context("Failed to create log filter")?;

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::TRACE)
        .with_env_filter(filter)
        .with_target(false)
        // Logs go to stderr so dry-run output on stdout stays clean
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set global tracing subscriber")?;

    Ok(())
}
