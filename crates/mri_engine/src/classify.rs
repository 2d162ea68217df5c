use std::time::Duration;

use futures_util::StreamExt;
use mri_core::{normalize_prediction, CandidateFile, ClassificationResult, ConfidenceScale, FileId};
use mri_logging::{mri_debug, mri_info};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use url::Url;

use crate::{ClassifyError, FailureKind};

/// Multipart field the backend reads the upload from.
pub const IMAGE_FIELD: &str = "image";

#[derive(Debug, Clone)]
pub struct ClassifierSettings {
    pub endpoint: String,
    pub health_url: Option<String>,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_response_bytes: u64,
    pub confidence_scale: ConfidenceScale,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8000/api/predict/".to_string(),
            health_url: None,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_response_bytes: 64 * 1024,
            confidence_scale: ConfidenceScale::Percent,
        }
    }
}

/// Success payload of `POST /api/predict/`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PredictResponse {
    pub tumour_detected: bool,
    pub tumour_type: String,
    pub confidence: f64,
}

/// Payload of the backend's `GET /api/test/` probe.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub message: String,
}

#[async_trait::async_trait]
pub trait Classifier: Send + Sync {
    /// Issues exactly one classification request. Never retries.
    async fn classify(
        &self,
        file_id: FileId,
        file: &CandidateFile,
    ) -> Result<ClassificationResult, ClassifyError>;

    async fn health(&self) -> Result<HealthStatus, ClassifyError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestClassifier {
    settings: ClassifierSettings,
    endpoint: Url,
    health_url: Url,
    client: reqwest::Client,
}

impl ReqwestClassifier {
    pub fn new(settings: ClassifierSettings) -> Result<Self, ClassifyError> {
        let endpoint = parse_endpoint(&settings.endpoint)?;
        let health_url = match settings.health_url.as_deref() {
            Some(explicit) => parse_endpoint(explicit)?,
            None => derive_health_url(&endpoint),
        };
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ClassifyError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self {
            settings,
            endpoint,
            health_url,
            client,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn health_url(&self) -> &Url {
        &self.health_url
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, ClassifyError> {
        let max_bytes = self.settings.max_response_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(ClassifyError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(ClassifyError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }
}

#[async_trait::async_trait]
impl Classifier for ReqwestClassifier {
    async fn classify(
        &self,
        file_id: FileId,
        file: &CandidateFile,
    ) -> Result<ClassificationResult, ClassifyError> {
        let part = Part::bytes(file.bytes().to_vec())
            .file_name(file.name().to_string())
            .mime_str(file.media_type())
            .map_err(|err| ClassifyError::new(FailureKind::InvalidRequest, err.to_string()))?;
        let form = Form::new().part(IMAGE_FIELD, part);

        mri_info!(
            "POST {} file_id={} bytes={}",
            self.endpoint,
            file_id,
            file.size()
        );
        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            // Failure bodies are not parsed for detail.
            return Err(ClassifyError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let body = self.read_body(response).await?;
        let payload: PredictResponse = serde_json::from_slice(&body)
            .map_err(|err| ClassifyError::new(FailureKind::MalformedResponse, err.to_string()))?;
        mri_debug!("file_id={} raw prediction {:?}", file_id, payload);

        normalize_prediction(
            payload.tumour_detected,
            &payload.tumour_type,
            payload.confidence,
            self.settings.confidence_scale,
        )
        .map_err(|err| ClassifyError::new(FailureKind::MalformedResponse, err.to_string()))
    }

    async fn health(&self) -> Result<HealthStatus, ClassifyError> {
        let response = self
            .client
            .get(self.health_url.clone())
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClassifyError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }
        let body = self.read_body(response).await?;
        serde_json::from_slice(&body)
            .map_err(|err| ClassifyError::new(FailureKind::MalformedResponse, err.to_string()))
    }
}

fn parse_endpoint(raw: &str) -> Result<Url, ClassifyError> {
    let url = Url::parse(raw.trim())
        .map_err(|err| ClassifyError::new(FailureKind::InvalidEndpoint, err.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ClassifyError::new(
            FailureKind::InvalidEndpoint,
            format!("unsupported scheme {other}"),
        )),
    }
}

/// `.../api/predict/` probes `.../api/test/`; other paths probe a sibling `test/`.
pub fn derive_health_url(endpoint: &Url) -> Url {
    let mut health = endpoint.clone();
    let path = endpoint.path();
    let trimmed = path.trim_end_matches('/');
    let parent = match trimmed.rfind('/') {
        Some(idx) => &trimmed[..=idx],
        None => "/",
    };
    health.set_path(&format!("{parent}test/"));
    health.set_query(None);
    health
}

fn map_reqwest_error(err: reqwest::Error) -> ClassifyError {
    if err.is_timeout() {
        return ClassifyError::new(FailureKind::Timeout, err.to_string());
    }
    ClassifyError::new(FailureKind::Network, err.to_string())
}
