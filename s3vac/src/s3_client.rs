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

use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::types::{Delete, ObjectIdentifier};
use tracing::{debug, warn};

use s3vac_drain::{
    Batch, DeleteFailure, DeleteOutcome, DeleteTarget, DrainError, ListedPage, ListingKind, Page,
    PageToken, StorageClient, VersionEntry,
};

/// Region used when the backend reports no location constraint.
pub const DEFAULT_REGION: &str = "us-east-1";

/// AWS-backed storage client. All SDK errors are classified into
/// [`DrainError`] here, at the capability boundary.
#[derive(Debug, Clone)]
pub struct S3Storage {
    client: Client,
}

impl S3Storage {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    async fn list_objects_page(
        &self,
        bucket: &str,
        token: Option<PageToken>,
    ) -> Result<ListedPage, DrainError> {
        let continuation = match token {
            Some(PageToken::Objects { continuation }) => Some(continuation),
            _ => None,
        };

        let response = self
            .client
            .list_objects_v2()
            .bucket(bucket)
            .set_continuation_token(continuation)
            .send()
            .await
            .map_err(|err| classify("ListObjectsV2", bucket, err))?;

        let keys: Vec<String> = response
            .contents()
            .iter()
            .filter_map(|obj| obj.key().map(str::to_string))
            .collect();

        let next = if response.is_truncated().unwrap_or(false) {
            response
                .next_continuation_token()
                .map(|token| PageToken::Objects {
                    continuation: token.to_string(),
                })
        } else {
            None
        };

        debug!("listed one page of {} objects from '{}'", keys.len(), bucket);
        Ok(ListedPage {
            page: Page::Objects { keys },
            next,
        })
    }

    async fn list_versions_page(
        &self,
        bucket: &str,
        token: Option<PageToken>,
    ) -> Result<ListedPage, DrainError> {
        let (key_marker, version_id_marker) = match token {
            Some(PageToken::Versions {
                key_marker,
                version_id_marker,
            }) => (key_marker, version_id_marker),
            _ => (None, None),
        };

        let response = self
            .client
            .list_object_versions()
            .bucket(bucket)
            .set_key_marker(key_marker)
            .set_version_id_marker(version_id_marker)
            .send()
            .await
            .map_err(|err| classify("ListObjectVersions", bucket, err))?;

        let versions: Vec<VersionEntry> = response
            .versions()
            .iter()
            .filter_map(|version| match (version.key(), version.version_id()) {
                (Some(key), Some(version_id)) => Some(VersionEntry {
                    key: key.to_string(),
                    version_id: version_id.to_string(),
                }),
                _ => None,
            })
            .collect();

        let delete_markers: Vec<VersionEntry> = response
            .delete_markers()
            .iter()
            .filter_map(|marker| match (marker.key(), marker.version_id()) {
                (Some(key), Some(version_id)) => Some(VersionEntry {
                    key: key.to_string(),
                    version_id: version_id.to_string(),
                }),
                _ => None,
            })
            .collect();

        let next = if response.is_truncated().unwrap_or(false) {
            Some(PageToken::Versions {
                key_marker: response.next_key_marker().map(str::to_string),
                version_id_marker: response.next_version_id_marker().map(str::to_string),
            })
        } else {
            None
        };

        debug!(
            "listed one page of {} versions and {} delete markers from '{}'",
            versions.len(),
            delete_markers.len(),
            bucket
        );
        Ok(ListedPage {
            page: Page::Versions {
                versions,
                delete_markers,
            },
            next,
        })
    }
}

#[async_trait]
impl StorageClient for S3Storage {
    async fn list_page(
        &self,
        bucket: &str,
        kind: ListingKind,
        token: Option<PageToken>,
    ) -> Result<ListedPage, DrainError> {
        match kind {
            ListingKind::Objects => self.list_objects_page(bucket, token).await,
            ListingKind::Versions => self.list_versions_page(bucket, token).await,
        }
    }

    async fn delete_batch(&self, bucket: &str, batch: Batch) -> Result<DeleteOutcome, DrainError> {
        let mut objects = Vec::with_capacity(batch.len());
        for target in batch.into_targets() {
            let mut builder = ObjectIdentifier::builder().key(target.key);
            if let Some(version_id) = target.version_id {
                builder = builder.version_id(version_id);
            }
            objects.push(
                builder
                    .build()
                    .map_err(|err| DrainError::backend("DeleteObjects", err.to_string()))?,
            );
        }

        let delete = Delete::builder()
            .set_objects(Some(objects))
            .build()
            .map_err(|err| DrainError::backend("DeleteObjects", err.to_string()))?;

        let response = self
            .client
            .delete_objects()
            .bucket(bucket)
            .delete(delete)
            .send()
            .await
            .map_err(|err| classify("DeleteObjects", bucket, err))?;

        let deleted = response.deleted().len() as u64;
        let failures: Vec<DeleteFailure> = response
            .errors()
            .iter()
            .map(|err| DeleteFailure {
                target: DeleteTarget {
                    key: err.key().unwrap_or_default().to_string(),
                    version_id: err.version_id().map(str::to_string),
                },
                code: err.code().unwrap_or("unknown").to_string(),
                message: err.message().unwrap_or("no message").to_string(),
            })
            .collect();

        if !failures.is_empty() {
            warn!(
                "batch delete on '{}' reported {} per-target errors",
                bucket,
                failures.len()
            );
        }

        Ok(DeleteOutcome { deleted, failures })
    }
}

/// Resolves the region a bucket lives in. An absent or empty location
/// constraint means the backend's default region.
pub async fn bucket_region(client: &Client, bucket: &str) -> Result<String, DrainError> {
    let response = client
        .get_bucket_location()
        .bucket(bucket)
        .send()
        .await
        .map_err(|err| classify("GetBucketLocation", bucket, err))?;

    let region = response
        .location_constraint()
        .map(|constraint| constraint.as_str().to_string())
        .filter(|region| !region.is_empty())
        .unwrap_or_else(|| DEFAULT_REGION.to_string());

    debug!("bucket '{}' resolved to region {}", bucket, region);
    Ok(region)
}

/// Classifies an SDK error into the drain taxonomy. Service errors keep
/// their S3 error code; anything else (network, timeout, construction
/// failure) is reported with the full error chain.
fn classify<E>(operation: &'static str, bucket: &str, err: SdkError<E>) -> DrainError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
{
    if let Some(service_err) = err.as_service_error() {
        return classify_code(
            operation,
            bucket,
            service_err.code().unwrap_or("unknown"),
            service_err.message().unwrap_or("no message"),
        );
    }
    DrainError::backend(operation, format!("{}", DisplayErrorContext(&err)))
}

fn classify_code(operation: &'static str, bucket: &str, code: &str, message: &str) -> DrainError {
    if code == "NoSuchBucket" {
        return DrainError::BucketNotFound {
            bucket: bucket.to_string(),
        };
    }
    DrainError::backend(operation, format!("{code}: {message}"))
}
