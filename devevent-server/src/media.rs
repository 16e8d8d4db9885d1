//! Image uploads to the hosted media service
//!
//! The server only needs "upload these bytes, get back a durable URL".
//! [`CloudinaryStore`] does that with a signed upload; tests swap in their
//! own [`MediaStore`].

use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use sha2::{Digest, Sha256};

/// Folder uploads land in unless configured otherwise
pub const DEFAULT_FOLDER: &str = "DevEvent";

/// Image payload from a publish request
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("media store is not configured")]
    NotConfigured,

    #[error("image payload is empty")]
    EmptyPayload,

    #[error("image upload failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("media store rejected upload ({status}): {message}")]
    Rejected { status: u16, message: String },
}

#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Store the image and return its public URL.
    async fn upload_image(&self, image: ImageUpload) -> Result<String, MediaError>;
}

/// Stand-in used when no media credentials are configured. Every upload
/// fails with [`MediaError::NotConfigured`].
pub struct UnconfiguredMedia;

#[async_trait]
impl MediaStore for UnconfiguredMedia {
    async fn upload_image(&self, _image: ImageUpload) -> Result<String, MediaError> {
        Err(MediaError::NotConfigured)
    }
}

#[derive(Debug, Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    pub folder: String,
}

pub struct CloudinaryStore {
    client: reqwest::Client,
    config: CloudinaryConfig,
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl CloudinaryStore {
    pub fn new(config: CloudinaryConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "https://api.cloudinary.com/v1_1/{}/image/upload",
            self.config.cloud_name
        )
    }
}

/// Sign upload parameters: sorted `key=value` pairs joined with `&`, the
/// API secret appended, SHA-256 hex digest.
fn sign(params: &[(&str, &str)], api_secret: &str) -> String {
    let mut sorted = params.to_vec();
    sorted.sort_by(|a, b| a.0.cmp(b.0));
    let joined = sorted
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    let digest = Sha256::digest(format!("{joined}{api_secret}").as_bytes());
    format!("{digest:x}")
}

#[async_trait]
impl MediaStore for CloudinaryStore {
    async fn upload_image(&self, image: ImageUpload) -> Result<String, MediaError> {
        if image.bytes.is_empty() {
            return Err(MediaError::EmptyPayload);
        }

        let timestamp = Utc::now().timestamp().to_string();
        let signature = sign(
            &[("folder", self.config.folder.as_str()), ("timestamp", timestamp.as_str())],
            &self.config.api_secret,
        );

        let size = image.bytes.len();
        let mut file = reqwest::multipart::Part::bytes(image.bytes).file_name(image.file_name);
        if let Some(content_type) = image.content_type.as_deref() {
            file = file.mime_str(content_type)?;
        }

        let form = reqwest::multipart::Form::new()
            .part("file", file)
            .text("api_key", self.config.api_key.clone())
            .text("folder", self.config.folder.clone())
            .text("timestamp", timestamp)
            .text("signature_algorithm", "sha256")
            .text("signature", signature);

        tracing::debug!(bytes = size, folder = %self.config.folder, "uploading image");
        let response = self.client.post(self.endpoint()).multipart(form).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(MediaError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let uploaded: UploadResponse = serde_json::from_str(&body).map_err(|e| MediaError::Rejected {
            status: status.as_u16(),
            message: format!("unexpected upload response: {e}"),
        })?;

        tracing::info!(url = %uploaded.secure_url, "image uploaded");
        Ok(uploaded.secure_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_sorts_params() {
        let a = sign(&[("timestamp", "1700000000"), ("folder", "DevEvent")], "secret");
        let b = sign(&[("folder", "DevEvent"), ("timestamp", "1700000000")], "secret");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn signature_depends_on_secret() {
        let params = [("folder", "DevEvent"), ("timestamp", "1")];
        assert_ne!(sign(&params, "one"), sign(&params, "two"));
    }

    #[tokio::test]
    async fn empty_payload_rejected_before_network() {
        let store = CloudinaryStore::new(CloudinaryConfig {
            cloud_name: "demo".into(),
            api_key: "key".into(),
            api_secret: "secret".into(),
            folder: DEFAULT_FOLDER.into(),
        });
        let err = store
            .upload_image(ImageUpload {
                file_name: "a.png".into(),
                content_type: None,
                bytes: Vec::new(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, MediaError::EmptyPayload));
    }

    #[tokio::test]
    async fn unconfigured_always_fails() {
        let err = UnconfiguredMedia
            .upload_image(ImageUpload {
                file_name: "a.png".into(),
                content_type: None,
                bytes: vec![1],
            })
            .await
            .unwrap_err();
        assert!(matches!(err, MediaError::NotConfigured));
    }
}
