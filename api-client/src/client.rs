//! Request plumbing
//!
//! One `reqwest::Client` per [`ApiClient`], reused across the sequential
//! requests of a run. The credential pair rides along as query parameters
//! on every call; mutation payloads are form-encoded.

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::ApiConfig;
use crate::error::{ApiError, Result};

pub struct ApiClient {
    pub(crate) http: Client,
    pub(crate) config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            http: Client::builder()
                .build()
                .unwrap_or_else(|_| Client::new()),
            config,
        }
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    fn credential_query(&self) -> [(&'static str, &str); 2] {
        [
            ("key", self.config.credentials.key.as_str()),
            ("token", self.config.credentials.token.as_str()),
        ]
    }

    /// GET a JSON endpoint.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let url = self.url(path);
        debug!(%url, "GET");
        let res = self
            .http
            .get(&url)
            .query(&self.credential_query())
            .query(query)
            .send()
            .await?;
        let res = check_status(res, &url)?;
        Ok(res.json::<T>().await?)
    }

    /// PUT with a form-encoded payload, discarding the response body.
    pub(crate) async fn put_form(&self, path: &str, form: &[(&str, &str)]) -> Result<()> {
        let url = self.url(path);
        debug!(%url, "PUT");
        let res = self
            .http
            .put(&url)
            .query(&self.credential_query())
            .form(form)
            .send()
            .await?;
        check_status(res, &url)?;
        Ok(())
    }

    /// DELETE with a form-encoded payload, discarding the response body.
    pub(crate) async fn delete_form(&self, path: &str, form: &[(&str, &str)]) -> Result<()> {
        let url = self.url(path);
        debug!(%url, "DELETE");
        let res = self
            .http
            .delete(&url)
            .query(&self.credential_query())
            .form(form)
            .send()
            .await?;
        check_status(res, &url)?;
        Ok(())
    }

    /// GET an absolute URL without attaching credentials, for download
    /// links that embed their own authorization.
    pub(crate) async fn get_raw(&self, url: &str) -> Result<Response> {
        debug!(%url, "GET (raw)");
        let res = self.http.get(url).send().await?;
        check_status(res, url)
    }
}

/// Map non-2xx responses to errors: credential rejections become `Auth`,
/// everything else a `Status` carrying the failing URL.
pub(crate) fn check_status(res: Response, url: &str) -> Result<Response> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(ApiError::auth(format!(
            "the API rejected the key/token pair ({} from {})",
            status, url
        )));
    }
    Err(ApiError::Status {
        status: status.as_u16(),
        url: url.to_string(),
    })
}
