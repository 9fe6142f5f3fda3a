use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_sdk_s3::operation::get_object::GetObjectError;
use aws_sdk_s3::{primitives::ByteStream as AwsByteStream, Client};
use bytes::Bytes;

use crate::store::key_under_base;
use crate::{AssetStore, BlobError, BlobResult, GetResult, PutResult};

/// Connection settings for an S3-compatible bucket.
#[derive(Debug, Clone)]
pub struct S3Config {
    pub bucket: String,
    pub region: String,
    pub endpoint_url: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    /// Base of the URLs written into records. Defaults to the
    /// path-style `endpoint_url/bucket`.
    pub public_base_url: Option<String>,
}

impl S3Config {
    pub fn public_base(&self) -> String {
        match &self.public_base_url {
            Some(base) if !base.trim().is_empty() => base.trim_end_matches('/').to_string(),
            _ => format!("{}/{}", self.endpoint_url.trim_end_matches('/'), self.bucket),
        }
    }
}

/// Asset store backed by an S3-compatible bucket (AWS SDK, path-style addressing)
#[derive(Clone)]
pub struct S3AssetStore {
    client: Client,
    bucket: String,
    public_base: String,
}

impl S3AssetStore {
    pub async fn new(config: S3Config) -> Self {
        let public_base = config.public_base();
        let bucket = config.bucket.clone();
        let client = Self::create_client(config).await;
        Self {
            client,
            bucket,
            public_base,
        }
    }

    async fn create_client(config: S3Config) -> Client {
        let credentials = Credentials::new(
            config.access_key_id,
            config.secret_access_key,
            None,
            None,
            "shopdesk",
        );

        let aws_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region))
            .credentials_provider(credentials)
            .endpoint_url(config.endpoint_url)
            .load()
            .await;

        Client::from_conf(
            aws_sdk_s3::config::Builder::from(&aws_config)
                .force_path_style(true)
                .build(),
        )
    }

    fn map_aws_error(err: impl std::error::Error + Send + Sync + 'static) -> BlobError {
        BlobError::backend(err)
    }
}

#[async_trait]
impl AssetStore for S3AssetStore {
    async fn put(
        &self,
        key: &str,
        content_type: Option<&str>,
        body: Bytes,
    ) -> BlobResult<PutResult> {
        let size_bytes = body.len() as u64;

        let mut request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(AwsByteStream::from(body));

        if let Some(ct) = content_type {
            request = request.content_type(ct);
        }

        let result = request.send().await.map_err(Self::map_aws_error)?;

        Ok(PutResult {
            etag: result.e_tag,
            size_bytes,
        })
    }

    async fn get(&self, key: &str) -> BlobResult<GetResult> {
        let result = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| match e.into_service_error() {
                GetObjectError::NoSuchKey(_) => BlobError::not_found(key),
                other => Self::map_aws_error(other),
            })?;

        let content_type = result.content_type;
        let etag = result.e_tag;
        let body = result.body.collect().await.map_err(Self::map_aws_error)?;

        Ok(GetResult {
            body: body.into_bytes(),
            content_type,
            etag,
        })
    }

    async fn delete(&self, key: &str) -> BlobResult<()> {
        // S3 deletes are idempotent: a missing key is not reported.
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(Self::map_aws_error)?;
        Ok(())
    }

    fn url_for(&self, key: &str) -> String {
        format!("{}/{}", self.public_base, key)
    }

    fn key_for_url(&self, reference: &str) -> Option<String> {
        key_under_base(&self.public_base, reference)
    }
}
