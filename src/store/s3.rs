//! S3 implementation of the object-store boundary

use super::{ObjectStore, RemoteObject};
use crate::types::BackupError;
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{Tag, Tagging};
use aws_sdk_s3::Client;
use std::collections::HashMap;

/// Object store backed by an S3 (or S3-compatible) endpoint.
pub struct S3ObjectStore {
    client: Client,
}

impl S3ObjectStore {
    /// Build a client from the ambient AWS configuration.
    ///
    /// `profile` selects a shared-config credential profile;
    /// `accelerate` switches the client to transfer-acceleration
    /// endpoints.
    pub async fn connect(profile: Option<&str>, accelerate: bool) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(name) = profile {
            loader = loader.profile_name(name);
        }
        let shared = loader.load().await;

        let config = aws_sdk_s3::config::Builder::from(&shared)
            .accelerate(accelerate)
            .build();

        Self {
            client: Client::from_conf(config),
        }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn probe_metadata(
        &self,
        bucket: &str,
        key: &str,
    ) -> Result<Option<RemoteObject>, BackupError> {
        match self
            .client
            .head_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
        {
            Ok(output) => Ok(Some(RemoteObject {
                size: output.content_length().unwrap_or(0).max(0) as u64,
                is_delete_marker: output.delete_marker().unwrap_or(false),
                metadata: output.metadata().cloned().unwrap_or_default(),
            })),
            Err(err) => {
                let service_error = err.into_service_error();
                if service_error.is_not_found() {
                    Ok(None)
                } else {
                    Err(BackupError::MetadataProbeFailed {
                        key: key.to_string(),
                        message: service_error.to_string(),
                    })
                }
            }
        }
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        metadata: HashMap<String, String>,
    ) -> Result<(), BackupError> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(body))
            .set_metadata(Some(metadata))
            .send()
            .await
            .map_err(|err| BackupError::UploadFailed {
                key: key.to_string(),
                message: err.into_service_error().to_string(),
            })?;

        Ok(())
    }

    async fn get_tags(
        &self,
        bucket: &str,
        key: &str,
    ) -> Result<Vec<(String, String)>, BackupError> {
        let output = self
            .client
            .get_object_tagging()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| BackupError::TagReadFailed {
                key: key.to_string(),
                message: err.into_service_error().to_string(),
            })?;

        Ok(output
            .tag_set()
            .iter()
            .map(|tag| (tag.key().to_string(), tag.value().to_string()))
            .collect())
    }

    async fn put_tags(
        &self,
        bucket: &str,
        key: &str,
        tags: Vec<(String, String)>,
    ) -> Result<(), BackupError> {
        let tag_failure = |message: String| BackupError::TagUpdateFailed {
            key: key.to_string(),
            message,
        };

        let tag_set = tags
            .into_iter()
            .map(|(tag_key, value)| {
                Tag::builder()
                    .key(tag_key)
                    .value(value)
                    .build()
                    .map_err(|err| tag_failure(err.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let tagging = Tagging::builder()
            .set_tag_set(Some(tag_set))
            .build()
            .map_err(|err| tag_failure(err.to_string()))?;

        self.client
            .put_object_tagging()
            .bucket(bucket)
            .key(key)
            .tagging(tagging)
            .send()
            .await
            .map_err(|err| tag_failure(err.into_service_error().to_string()))?;

        Ok(())
    }
}
