use super::error::IconError;
use super::types::Icon;
use futures::StreamExt;
use reqwest::{header, StatusCode};
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);
pub const DEFAULT_MAX_BODY_SIZE: usize = 15 * 1024 * 1024; // 15MB

/// Process-wide HTTP settings for icon lookups.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Sent when [`FetchOptions::user_agent`] is empty
    pub default_user_agent: String,
    /// Whole-request timeout, enforced by the HTTP client
    pub timeout: Duration,
    /// Pages and icons larger than this are rejected
    pub max_body_size: usize,
    /// Proxy used when [`FetchOptions::fetch_via_proxy`] is set
    pub proxy_url: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            default_user_agent: concat!("feedicon/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: DEFAULT_TIMEOUT,
            max_body_size: DEFAULT_MAX_BODY_SIZE,
            proxy_url: None,
        }
    }
}

/// Per-feed fetch settings.
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    pub user_agent: String,
    pub fetch_via_proxy: bool,
    pub allow_self_signed_certificates: bool,
}

/// Whether a response status means the request failed on the server side.
pub fn is_server_failure(status: StatusCode) -> bool {
    status.is_server_error()
}

/// Downloads an icon.
///
/// # Errors
///
/// - [`IconError::Network`] - connection, TLS or timeout failure
/// - [`IconError::ServerFailure`] - 5xx response
/// - [`IconError::Read`] - body could not be read
/// - [`IconError::ResponseTooLarge`] - body over `max_body_size`
/// - [`IconError::EmptyContent`] - zero-length body
pub async fn download_icon(
    config: &ClientConfig,
    icon_url: &str,
    options: &FetchOptions,
) -> Result<Icon, IconError> {
    let response = get(config, icon_url, options).await?;

    let mime_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_owned();

    let body = read_limited_bytes(response, icon_url, config.max_body_size).await?;

    Icon::from_content(body, mime_type).ok_or_else(|| IconError::EmptyContent {
        location: icon_url.to_owned(),
    })
}

/// Fetches an HTML page for icon discovery.
///
/// Invalid UTF-8 is replaced rather than rejected; the HTML parser copes with it.
/// A body that cannot be read surfaces as [`IconError::Parse`].
pub async fn fetch_html_document(
    config: &ClientConfig,
    page_url: &str,
    options: &FetchOptions,
) -> Result<String, IconError> {
    let response = get(config, page_url, options).await?;

    let bytes = match read_limited_bytes(response, page_url, config.max_body_size).await {
        Ok(bytes) => bytes,
        Err(e @ IconError::Read { .. }) => return Err(IconError::Parse(e.to_string())),
        Err(e) => return Err(e),
    };

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Issues one GET and rejects server failures. No retry.
async fn get(
    config: &ClientConfig,
    url: &str,
    options: &FetchOptions,
) -> Result<reqwest::Response, IconError> {
    let client = build_client(config, options)?;

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| IconError::Network {
            url: url.to_owned(),
            source,
        })?;

    let status = response.status();
    if is_server_failure(status) {
        return Err(IconError::ServerFailure {
            url: url.to_owned(),
            status: status.as_u16(),
        });
    }

    if !status.is_success() {
        tracing::debug!(url = %url, status = %status, "Non-success status, reading body anyway");
    }

    Ok(response)
}

fn build_client(
    config: &ClientConfig,
    options: &FetchOptions,
) -> Result<reqwest::Client, IconError> {
    let user_agent = if options.user_agent.trim().is_empty() {
        config.default_user_agent.as_str()
    } else {
        options.user_agent.as_str()
    };

    let mut builder = reqwest::Client::builder()
        .user_agent(user_agent)
        .timeout(config.timeout)
        .danger_accept_invalid_certs(options.allow_self_signed_certificates);

    builder = match (options.fetch_via_proxy, config.proxy_url.as_deref()) {
        (true, Some(proxy_url)) => {
            builder.proxy(reqwest::Proxy::all(proxy_url).map_err(IconError::Client)?)
        }
        // No explicit proxy configured: keep the environment's proxy settings
        (true, None) => builder,
        (false, _) => builder.no_proxy(),
    };

    builder.build().map_err(IconError::Client)
}

async fn read_limited_bytes(
    response: reqwest::Response,
    url: &str,
    limit: usize,
) -> Result<Vec<u8>, IconError> {
    let too_large = || IconError::ResponseTooLarge {
        url: url.to_owned(),
        limit,
    };

    // Fast path: check Content-Length header
    if let Some(len) = response.content_length() {
        if len > limit as u64 {
            return Err(too_large());
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|source| IconError::Read {
            url: url.to_owned(),
            source,
        })?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(too_large());
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}
