use std::time::Duration;

use reqwest::multipart::{Form, Part};
use sender_logging::{sender_debug, sender_info};
use url::Url;

use crate::{BackendReply, DispatchError, FailureKind, FileSubmission, TextSubmission};

const SEND_TEXT_PATH: &str = "send-text";
const SEND_TEXT_FILE_PATH: &str = "send-text-file";
const HEALTH_PATH: &str = "health";

#[derive(Debug, Clone)]
pub struct DispatchSettings {
    pub base_url: String,
    /// `None` leaves connection setup to the operating system.
    pub connect_timeout: Option<Duration>,
    /// Total request deadline. `None` lets a request run until the transport gives up.
    pub request_timeout: Option<Duration>,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            connect_timeout: None,
            request_timeout: None,
        }
    }
}

#[async_trait::async_trait]
pub trait Dispatcher: Send + Sync {
    async fn send_text(&self, submission: &TextSubmission) -> Result<BackendReply, DispatchError>;

    async fn send_text_file(
        &self,
        submission: &FileSubmission,
    ) -> Result<BackendReply, DispatchError>;

    /// Succeeds only when the health endpoint answers 2xx.
    async fn check_health(&self) -> Result<(), DispatchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestDispatcher {
    client: reqwest::Client,
    base_url: Url,
}

impl ReqwestDispatcher {
    pub fn new(settings: DispatchSettings) -> Result<Self, DispatchError> {
        let base_url = parse_base_url(&settings.base_url)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| DispatchError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, DispatchError> {
        self.base_url
            .join(path)
            .map_err(|err| DispatchError::new(FailureKind::InvalidUrl, err.to_string()))
    }
}

#[async_trait::async_trait]
impl Dispatcher for ReqwestDispatcher {
    async fn send_text(&self, submission: &TextSubmission) -> Result<BackendReply, DispatchError> {
        let url = self.endpoint(SEND_TEXT_PATH)?;
        sender_debug!(
            "POST {} numbers={} text_len={}",
            url,
            submission.numbers.len(),
            submission.text.len()
        );

        let response = self
            .client
            .post(url)
            .json(submission)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        read_reply(response).await
    }

    async fn send_text_file(
        &self,
        submission: &FileSubmission,
    ) -> Result<BackendReply, DispatchError> {
        let url = self.endpoint(SEND_TEXT_FILE_PATH)?;
        let bytes = tokio::fs::read(&submission.path).await.map_err(|err| {
            DispatchError::new(
                FailureKind::FileRead,
                format!("{}: {}", submission.path.display(), err),
            )
        })?;
        sender_debug!(
            "POST {} file={} bytes={}",
            url,
            submission.file_name,
            bytes.len()
        );

        let mut part = Part::bytes(bytes).file_name(submission.file_name.clone());
        if let Some(mime) = guess_mime(&submission.file_name) {
            part = part
                .mime_str(mime)
                .map_err(|err| DispatchError::new(FailureKind::FileRead, err.to_string()))?;
        }
        let form = Form::new()
            .text("text", submission.text.clone())
            .part("file", part);

        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        read_reply(response).await
    }

    async fn check_health(&self) -> Result<(), DispatchError> {
        let url = self.endpoint(HEALTH_PATH)?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if status.is_success() {
            sender_info!("Backend health ok ({})", status);
            Ok(())
        } else {
            Err(DispatchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ))
        }
    }
}

/// Parses the configured base URL so that endpoint paths join beneath it.
fn parse_base_url(raw: &str) -> Result<Url, DispatchError> {
    let mut url = Url::parse(raw.trim())
        .map_err(|err| DispatchError::new(FailureKind::InvalidUrl, err.to_string()))?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(DispatchError::new(
            FailureKind::InvalidUrl,
            format!("not an http(s) base url: {raw}"),
        ));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

async fn read_reply(response: reqwest::Response) -> Result<BackendReply, DispatchError> {
    let status = response.status().as_u16();
    let bytes = response.bytes().await.map_err(map_reqwest_error)?;
    let body = serde_json::from_slice(&bytes).map_err(|err| {
        DispatchError::new(
            FailureKind::InvalidResponse,
            format!("status {status}, body is not JSON: {err}"),
        )
    })?;
    Ok(BackendReply { status, body })
}

fn guess_mime(file_name: &str) -> Option<&'static str> {
    let extension = file_name.rsplit_once('.')?.1;
    if extension.eq_ignore_ascii_case("csv") {
        Some("text/csv")
    } else if extension.eq_ignore_ascii_case("txt") {
        Some("text/plain")
    } else {
        None
    }
}

fn map_reqwest_error(err: reqwest::Error) -> DispatchError {
    if err.is_timeout() {
        return DispatchError::new(FailureKind::Timeout, err.to_string());
    }
    DispatchError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gains_trailing_slash() {
        let url = parse_base_url("http://localhost:8000/api").unwrap();
        assert_eq!(
            url.join(SEND_TEXT_PATH).unwrap().as_str(),
            "http://localhost:8000/api/send-text"
        );

        let url = parse_base_url("http://localhost:8000").unwrap();
        assert_eq!(
            url.join(HEALTH_PATH).unwrap().as_str(),
            "http://localhost:8000/health"
        );
    }

    #[test]
    fn base_url_must_be_http() {
        assert_eq!(
            parse_base_url("mailto:someone@example.com").unwrap_err().kind,
            FailureKind::InvalidUrl
        );
        assert_eq!(
            parse_base_url("not a url").unwrap_err().kind,
            FailureKind::InvalidUrl
        );
    }

    #[test]
    fn default_settings_impose_no_timeouts() {
        let settings = DispatchSettings::default();
        assert_eq!(settings.connect_timeout, None);
        assert_eq!(settings.request_timeout, None);
        assert!(ReqwestDispatcher::new(settings).is_ok());
    }

    #[test]
    fn mime_follows_extension() {
        assert_eq!(guess_mime("numbers.CSV"), Some("text/csv"));
        assert_eq!(guess_mime("numbers.txt"), Some("text/plain"));
        assert_eq!(guess_mime("numbers.xlsx"), None);
        assert_eq!(guess_mime("numbers"), None);
    }
}
