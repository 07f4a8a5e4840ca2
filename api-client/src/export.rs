//! Organization export (backup) flow
//!
//! Requesting an export returns a token; the export is then prepared
//! asynchronously on the server side and has to be polled for completion.
//! The poller is bounded: the original flow waited forever, which is a
//! latent hang, so both a maximum attempt count and a cancellation signal
//! are part of the contract here.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use serde::{Deserialize, Deserializer};
use tokio::io::AsyncWriteExt;
use tokio::sync::watch;
use tracing::info;
use urlencoding::encode;

use crate::client::ApiClient;
use crate::error::{ApiError, Result};

/// Default seconds between status polls
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 60;
/// Default attempt bound (four hours at the default interval)
pub const DEFAULT_MAX_ATTEMPTS: u32 = 240;

/// Server-side progress detail attached to a status payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StageInfo {
    #[serde(default)]
    pub stage: String,
    pub progress: Option<u64>,
    pub total: Option<u64>,
}

/// One export status poll result.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportStatus {
    /// Host-relative download path once the export is ready. The API
    /// sends `false` until then, hence the custom deserializer.
    #[serde(default, deserialize_with = "falsy_or_string")]
    pub complete: Option<String>,
    #[serde(default)]
    pub status: StageInfo,
}

fn falsy_or_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::String(s) if !s.is_empty() => Ok(Some(s)),
        _ => Ok(None),
    }
}

#[derive(Deserialize)]
struct ExportRequested {
    token: String,
}

/// The two export endpoints, behind a trait so the poller can be tested
/// without a network.
#[async_trait]
pub trait ExportApi: Send + Sync {
    /// Request an export, returning the token used for status polls.
    async fn request_export(
        &self,
        org: &str,
        attachments: bool,
        attachment_age_days: u32,
    ) -> Result<String>;

    /// Fetch the current status of a requested export.
    async fn export_status(&self, org: &str, token: &str) -> Result<ExportStatus>;
}

#[async_trait]
impl ExportApi for ApiClient {
    async fn request_export(
        &self,
        org: &str,
        attachments: bool,
        attachment_age_days: u32,
    ) -> Result<String> {
        let attachments = if attachments { "true" } else { "false" };
        let age = attachment_age_days.to_string();
        let requested: ExportRequested = self
            .get_json(
                &format!("organizations/{}/export", encode(org)),
                &[("attachments", attachments), ("attachment_age", age.as_str())],
            )
            .await
            .map_err(eligibility_hint)?;
        Ok(requested.token)
    }

    async fn export_status(&self, org: &str, token: &str) -> Result<ExportStatus> {
        self.get_json(
            &format!("organizations/{}/export/{}/status", encode(org), encode(token)),
            &[],
        )
        .await
    }
}

/// The export endpoint is undocumented and answers any ineligible request
/// with a non-2xx, including 403 for organizations below the required
/// tier. Treat every response-level failure as an eligibility problem so
/// the paid-tier hint reaches the operator; transport and IO failures
/// pass through untouched.
fn eligibility_hint(err: ApiError) -> ApiError {
    match err {
        ApiError::Status { .. } | ApiError::Auth { .. } => ApiError::not_eligible(
            "no export token returned; check the organization id and \
             credentials, or the account may not be on a tier that includes \
             exports",
        ),
        other => other,
    }
}

/// Polls a requested export until its download path appears.
///
/// `Requested -> Polling -> Complete`, with `Failed` on any non-2xx
/// status poll. `Polling -> Polling` transitions sleep `poll_interval`
/// and count against `max_attempts`; exceeding the bound is
/// [`ApiError::Timeout`], and flipping the watch channel to `true` stops
/// the wait with [`ApiError::Cancelled`].
pub struct ExportPoller<'a, A: ExportApi> {
    api: &'a A,
    org: String,
    poll_interval: Duration,
    max_attempts: u32,
}

impl<'a, A: ExportApi> ExportPoller<'a, A> {
    pub fn new(api: &'a A, org: impl Into<String>) -> Self {
        Self {
            api,
            org: org.into(),
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Poll until the export completes, returning its host-relative
    /// download path.
    pub async fn run(&self, token: &str, mut shutdown: watch::Receiver<bool>) -> Result<String> {
        for attempt in 1..=self.max_attempts {
            let status = self.api.export_status(&self.org, token).await?;

            if let Some(path) = status.complete {
                info!(attempt, "export complete");
                return Ok(path);
            }

            match (status.status.progress, status.status.total) {
                (Some(progress), Some(total)) => {
                    info!(stage = %status.status.stage, attempt, "{} of {}", progress, total)
                }
                _ => info!(stage = %status.status.stage, attempt, "export not ready"),
            }

            tokio::select! {
                _ = tokio::time::sleep(self.poll_interval) => {}
                _ = cancelled(&mut shutdown) => return Err(ApiError::Cancelled),
            }
        }

        Err(ApiError::Timeout {
            attempts: self.max_attempts,
        })
    }
}

/// Resolves once the shutdown channel reads `true`. Never resolves if the
/// sender goes away without cancelling.
async fn cancelled(shutdown: &mut watch::Receiver<bool>) {
    loop {
        if *shutdown.borrow() {
            return;
        }
        if shutdown.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

/// Join a completion path to the download host. Absolute URLs pass
/// through untouched.
pub fn resolve_download_url(download_base: &str, completion_path: &str) -> String {
    if completion_path.starts_with("http://") || completion_path.starts_with("https://") {
        completion_path.to_string()
    } else {
        format!("{}{}", download_base.trim_end_matches('/'), completion_path)
    }
}

impl ApiClient {
    /// Stream a completed export archive to `out_file` in chunks.
    /// Returns the number of bytes written.
    pub async fn download_export(&self, completion_path: &str, out_file: &Path) -> Result<u64> {
        let url = resolve_download_url(&self.config.download_base, completion_path);
        let res = self.get_raw(&url).await?;

        let written = write_stream_to_file(res.bytes_stream(), out_file).await?;
        info!(bytes = written, path = %out_file.display(), "export archive written");
        Ok(written)
    }
}

/// Write a chunked byte stream to `out_file`, returning the byte count.
/// A mid-stream error leaves a partial file behind; the archive is only
/// usable when this returns `Ok`.
async fn write_stream_to_file<S, E>(mut stream: S, out_file: &Path) -> Result<u64>
where
    S: futures::Stream<Item = std::result::Result<bytes::Bytes, E>> + Unpin,
    E: Into<ApiError>,
{
    let mut file = tokio::fs::File::create(out_file).await?;
    let mut written: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let chunk: bytes::Bytes = chunk.map_err(Into::into)?;
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    file.flush().await?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct ScriptedApi {
        statuses: Mutex<Vec<ExportStatus>>,
    }

    impl ScriptedApi {
        fn new(statuses: Vec<ExportStatus>) -> Self {
            Self {
                statuses: Mutex::new(statuses),
            }
        }
    }

    #[async_trait]
    impl ExportApi for ScriptedApi {
        async fn request_export(&self, _org: &str, _a: bool, _age: u32) -> Result<String> {
            Ok("tok".to_string())
        }

        async fn export_status(&self, _org: &str, _token: &str) -> Result<ExportStatus> {
            let mut statuses = self.statuses.lock().unwrap();
            if statuses.is_empty() {
                Ok(ExportStatus {
                    complete: None,
                    status: StageInfo {
                        stage: "pending".into(),
                        ..StageInfo::default()
                    },
                })
            } else {
                Ok(statuses.remove(0))
            }
        }
    }

    fn incomplete(stage: &str) -> ExportStatus {
        ExportStatus {
            complete: None,
            status: StageInfo {
                stage: stage.into(),
                progress: Some(1),
                total: Some(10),
            },
        }
    }

    fn complete(path: &str) -> ExportStatus {
        ExportStatus {
            complete: Some(path.into()),
            status: StageInfo::default(),
        }
    }

    #[test]
    fn test_status_deserializes_false_complete() {
        let status: ExportStatus = serde_json::from_str(
            r#"{"complete": false, "status": {"stage": "export_scheduled"}}"#,
        )
        .unwrap();
        assert_eq!(status.complete, None);
        assert_eq!(status.status.stage, "export_scheduled");
    }

    #[test]
    fn test_status_deserializes_completion_path() {
        let status: ExportStatus = serde_json::from_str(
            r#"{"complete": "/organizations/acme/export.zip", "status": {"stage": "done", "progress": 10, "total": 10}}"#,
        )
        .unwrap();
        assert_eq!(
            status.complete.as_deref(),
            Some("/organizations/acme/export.zip")
        );
        assert_eq!(status.status.progress, Some(10));
    }

    #[tokio::test]
    async fn test_poller_returns_completion_path() {
        let api = ScriptedApi::new(vec![
            incomplete("export_scheduled"),
            incomplete("export_running"),
            complete("/organizations/acme/export.zip"),
        ]);
        let poller = ExportPoller::new(&api, "acme")
            .with_poll_interval(Duration::from_millis(1))
            .with_max_attempts(10);
        let (_tx, rx) = watch::channel(false);

        let path = poller.run("tok", rx).await.unwrap();
        assert_eq!(path, "/organizations/acme/export.zip");
    }

    #[tokio::test]
    async fn test_poller_times_out_at_attempt_bound() {
        let api = ScriptedApi::new(Vec::new());
        let poller = ExportPoller::new(&api, "acme")
            .with_poll_interval(Duration::from_millis(1))
            .with_max_attempts(3);
        let (_tx, rx) = watch::channel(false);

        let err = poller.run("tok", rx).await.unwrap_err();
        assert!(matches!(err, ApiError::Timeout { attempts: 3 }));
    }

    #[tokio::test]
    async fn test_poller_cancels_without_waiting_out_the_interval() {
        let api = ScriptedApi::new(Vec::new());
        // An interval long enough that only cancellation can end the test
        let poller = ExportPoller::new(&api, "acme")
            .with_poll_interval(Duration::from_secs(3600))
            .with_max_attempts(10);
        let (tx, rx) = watch::channel(false);
        tx.send(true).unwrap();

        let err = poller.run("tok", rx).await.unwrap_err();
        assert!(matches!(err, ApiError::Cancelled));
    }

    #[test]
    fn test_eligibility_hint_covers_status_failures() {
        let err = eligibility_hint(ApiError::Status {
            status: 400,
            url: "https://trello.com/1/organizations/acme/export".into(),
        });
        assert!(matches!(err, ApiError::NotEligible { .. }));
    }

    #[test]
    fn test_eligibility_hint_covers_forbidden_tiers() {
        // A free-tier org answers 403, which check_status reports as Auth;
        // the export request must still surface the tier hint
        let err = eligibility_hint(ApiError::auth("403 from the export endpoint"));
        assert!(matches!(err, ApiError::NotEligible { .. }));
    }

    #[test]
    fn test_eligibility_hint_passes_other_errors_through() {
        let err = eligibility_hint(ApiError::Cancelled);
        assert!(matches!(err, ApiError::Cancelled));
    }

    #[tokio::test]
    async fn test_write_stream_to_file_counts_and_preserves_bytes() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let out_file = temp_dir.path().join("export.zip");
        let chunks: Vec<std::result::Result<bytes::Bytes, ApiError>> = vec![
            Ok(bytes::Bytes::from_static(b"PK\x03\x04")),
            Ok(bytes::Bytes::from_static(b"payload ")),
            Ok(bytes::Bytes::from_static(b"bytes")),
        ];

        let written = write_stream_to_file(futures::stream::iter(chunks), &out_file)
            .await
            .unwrap();

        assert_eq!(written, 17);
        let contents = std::fs::read(&out_file).unwrap();
        assert_eq!(contents, b"PK\x03\x04payload bytes");
    }

    #[tokio::test]
    async fn test_write_stream_to_file_handles_empty_stream() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let out_file = temp_dir.path().join("export.zip");
        let chunks: Vec<std::result::Result<bytes::Bytes, ApiError>> = Vec::new();

        let written = write_stream_to_file(futures::stream::iter(chunks), &out_file)
            .await
            .unwrap();

        assert_eq!(written, 0);
        assert_eq!(std::fs::read(&out_file).unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_write_stream_to_file_propagates_mid_stream_errors() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let out_file = temp_dir.path().join("export.zip");
        let chunks: Vec<std::result::Result<bytes::Bytes, ApiError>> = vec![
            Ok(bytes::Bytes::from_static(b"partial")),
            Err(ApiError::Cancelled),
        ];

        let err = write_stream_to_file(futures::stream::iter(chunks), &out_file)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Cancelled));
    }

    #[test]
    fn test_resolve_download_url_joins_relative_path() {
        assert_eq!(
            resolve_download_url("https://trello.com", "/org/export.zip"),
            "https://trello.com/org/export.zip"
        );
    }

    #[test]
    fn test_resolve_download_url_passes_absolute_through() {
        assert_eq!(
            resolve_download_url("https://trello.com", "https://cdn.example.com/export.zip"),
            "https://cdn.example.com/export.zip"
        );
    }
}
