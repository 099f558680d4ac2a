//! AWS S3 implementation of the `ObjectStore` contract.

use crate::store::{ListPage, ObjectBody, ObjectStore, StoreError, StoreResult};
use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use futures::StreamExt;
use tokio_util::io::ReaderStream;
use tracing::debug;

/// S3-backed store scoped to a single bucket.
#[derive(Clone)]
pub struct S3Store {
    client: Client,
    bucket: String,
}

impl S3Store {
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn list_page(&self, prefix: &str, token: Option<&str>) -> StoreResult<ListPage> {
        let mut request = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .prefix(prefix);
        if let Some(token) = token {
            request = request.continuation_token(token);
        }

        let output = request
            .send()
            .await
            .map_err(|err| StoreError::Unavailable(DisplayErrorContext(&err).to_string()))?;

        let keys = output
            .contents()
            .iter()
            .filter_map(|object| object.key().map(str::to_string))
            .collect::<Vec<_>>();
        let next_token = if output.is_truncated().unwrap_or(false) {
            output.next_continuation_token().map(str::to_string)
        } else {
            None
        };

        debug!(
            "listed {} keys under `{}` (more: {})",
            keys.len(),
            prefix,
            next_token.is_some()
        );
        Ok(ListPage { keys, next_token })
    }

    async fn get(&self, key: &str) -> StoreResult<ObjectBody> {
        let output = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| {
                if err
                    .as_service_error()
                    .is_some_and(|service_err| service_err.is_no_such_key())
                {
                    StoreError::NotFound(key.to_string())
                } else {
                    StoreError::Unavailable(DisplayErrorContext(&err).to_string())
                }
            })?;

        Ok(ReaderStream::new(output.body.into_async_read()).boxed())
    }

    async fn put(&self, key: &str, body: Bytes) -> StoreResult<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|err| StoreError::Unavailable(DisplayErrorContext(&err).to_string()))?;
        Ok(())
    }
}
