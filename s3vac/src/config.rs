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

use clap::Parser;

/// Configuration for s3vac
#[derive(Parser, Debug, Clone)]
#[command(
    name = "s3vac",
    about = "Completely empty an S3 bucket: current objects, historical versions, and delete markers",
    version,
    long_about = r#"
s3vac - completely empty an S3 bucket

Walks the bucket's object listing and its version listing (historical
versions plus delete markers) and deletes everything in bounded batches.
Credentials come from the standard AWS provider chain (environment,
shared config/credentials files, credential_process, instance metadata).
The bucket's region is discovered automatically before anything runs.

EXAMPLES:
  # Preview what would be deleted, without deleting anything
  s3vac --dry-run my-bucket

  # Empty the bucket for real
  s3vac my-bucket

  # Against MinIO, LocalStack or another S3-compatible endpoint
  s3vac --endpoint-url http://localhost:9000 my-bucket
"#
)]
pub struct Config {
    /// Name of the bucket to empty
    #[arg(value_name = "BUCKET", help = "Name of the bucket to empty")]
    pub bucket: String,

    /// Preview mode
    #[arg(
        long = "dry-run",
        help = "Display the operations that would be performed without actually running them"
    )]
    pub dry_run: bool,

    /// Custom S3 endpoint URL
    #[arg(
        long = "endpoint-url",
        env = "AWS_ENDPOINT_URL",
        help = "Custom S3 endpoint URL (for MinIO, LocalStack, etc.)"
    )]
    pub endpoint_url: Option<String>,

    /// Force path-style addressing
    #[arg(
        long = "force-path-style",
        help = "Force path-style S3 addressing (automatically enabled for custom endpoints)"
    )]
    pub force_path_style: bool,

    /// Log level
    #[arg(
        long = "log-level",
        env = "RUST_LOG",
        default_value = "s3vac=info",
        help = "Log level configuration"
    )]
    pub log_level: String,
}

impl Config {
    /// Path-style addressing is required by most S3-compatible endpoints.
    pub fn use_path_style(&self) -> bool {
        self.endpoint_url.is_some() || self.force_path_style
    }
}
