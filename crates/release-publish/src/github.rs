use std::time::Duration;

use release_core::ReleaseArtifact;
use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::error::PublishError;
use crate::request::{Publication, PublishRequest};

pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

pub const USER_AGENT: &str = concat!("wp-plugin-helper/", env!("CARGO_PKG_VERSION"));

const GITHUB_JSON: &str = "application/vnd.github+json";
const API_VERSION_HEADER: &str = "X-GitHub-Api-Version";
const API_VERSION: &str = "2022-11-28";
const ZIP_CONTENT_TYPE: &str = "application/zip";

#[derive(Debug, Deserialize)]
struct ReleaseResponse {
    id: u64,
    html_url: String,
    upload_url: String,
}

#[derive(Debug, Deserialize)]
struct AssetResponse {
    browser_download_url: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

#[derive(Debug, serde::Serialize)]
struct CreateRelease<'a> {
    tag_name: &'a str,
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<&'a str>,
    prerelease: bool,
}

/// Blocking GitHub Releases client.
#[derive(Debug, Clone)]
pub struct GitHubPublisher {
    api_url: String,
    client: Client,
}

impl GitHubPublisher {
    /// Client for `api_url` whose requests each time out after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns `PublishError::Client` if the HTTP client cannot be built.
    pub fn new(api_url: &str, timeout: Duration) -> Result<Self, PublishError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(PublishError::Client)?;

        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Uploads `artifact` to the release for `request.tag`, creating the
    /// release when the tag has none.
    ///
    /// # Errors
    ///
    /// Returns `PublishError::Auth` for rejected credentials,
    /// `PublishError::Network` when GitHub cannot be reached in time and
    /// `PublishError::Rejected` for any other unsuccessful response.
    pub fn publish(
        &self,
        artifact: &ReleaseArtifact,
        request: &PublishRequest,
    ) -> Result<Publication, PublishError> {
        let payload =
            std::fs::read(&artifact.path).map_err(|source| PublishError::ReadArtifact {
                path: artifact.path.clone(),
                source,
            })?;

        let (release, created_release) = match self.find_release(request)? {
            Some(release) => {
                info!(tag = %request.tag, id = release.id, "reusing existing GitHub release");
                (release, false)
            }
            None => {
                let release = self.create_release(request)?;
                info!(tag = %request.tag, id = release.id, "created GitHub release");
                (release, true)
            }
        };

        let file_name = artifact.file_name();
        let asset = self.upload_asset(&release, &file_name, payload, request)?;
        info!(url = %asset.browser_download_url, "uploaded release asset");

        Ok(Publication {
            release_id: release.id,
            html_url: release.html_url,
            asset_url: asset.browser_download_url,
            created_release,
        })
    }

    fn find_release(
        &self,
        request: &PublishRequest,
    ) -> Result<Option<ReleaseResponse>, PublishError> {
        let url = format!(
            "{}/repos/{}/{}/releases/tags/{}",
            self.api_url, request.owner, request.repo, request.tag
        );
        debug!(%url, "looking up release");

        let response = send(self.authorized(self.client.get(&url), request), &url)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = check_status(response, false)?;
        decode(response, &url).map(Some)
    }

    fn create_release(&self, request: &PublishRequest) -> Result<ReleaseResponse, PublishError> {
        let url = format!(
            "{}/repos/{}/{}/releases",
            self.api_url, request.owner, request.repo
        );
        let body = CreateRelease {
            tag_name: &request.tag,
            name: &request.title,
            body: request.body.as_deref(),
            prerelease: request.prerelease,
        };
        debug!(%url, tag = %request.tag, "creating release");

        let builder = self.authorized(self.client.post(&url), request).json(&body);
        let response = send(builder, &url)?;
        let response = check_status(response, request.token.is_none())?;
        decode(response, &url)
    }

    fn upload_asset(
        &self,
        release: &ReleaseResponse,
        file_name: &str,
        payload: Vec<u8>,
        request: &PublishRequest,
    ) -> Result<AssetResponse, PublishError> {
        let url = upload_endpoint(&release.upload_url);
        debug!(%url, file = file_name, bytes = payload.len(), "uploading asset");

        let builder = self
            .authorized(self.client.post(&url), request)
            .query(&[("name", file_name)])
            .header(CONTENT_TYPE, ZIP_CONTENT_TYPE)
            .body(payload);
        let response = send(builder, &url)?;
        let response = check_status(response, false)?;
        decode(response, &url)
    }

    fn authorized(&self, builder: RequestBuilder, request: &PublishRequest) -> RequestBuilder {
        let builder = builder
            .header(ACCEPT, GITHUB_JSON)
            .header(API_VERSION_HEADER, API_VERSION);
        match request.token.as_deref() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

/// Strips the RFC 6570 template suffix GitHub appends to `upload_url`.
fn upload_endpoint(upload_url: &str) -> String {
    upload_url
        .split_once('{')
        .map_or(upload_url, |(base, _)| base)
        .to_string()
}

fn send(builder: RequestBuilder, url: &str) -> Result<Response, PublishError> {
    builder.send().map_err(|source| PublishError::Network {
        url: url.to_string(),
        source,
    })
}

/// Maps unsuccessful statuses to errors. `not_found_is_auth` covers calls
/// that GitHub answers with 404 when no credentials were sent.
fn check_status(response: Response, not_found_is_auth: bool) -> Result<Response, PublishError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = error_message(response);
    let code = status.as_u16();
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(PublishError::Auth {
            status: code,
            message,
        }),
        StatusCode::NOT_FOUND if not_found_is_auth => Err(PublishError::Auth {
            status: code,
            message,
        }),
        _ => Err(PublishError::Rejected {
            status: code,
            message,
        }),
    }
}

fn error_message(response: Response) -> String {
    let status = response.status();
    let text = response.text().unwrap_or_default();
    serde_json::from_str::<ApiErrorBody>(&text)
        .map(|body| body.message)
        .ok()
        .or_else(|| {
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("no details").to_string())
}

fn decode<T: DeserializeOwned>(response: Response, url: &str) -> Result<T, PublishError> {
    let text = response.text().map_err(|source| PublishError::Network {
        url: url.to_string(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| PublishError::Decode {
        url: url.to_string(),
        source,
    })
}
