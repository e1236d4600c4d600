//! Website icon discovery and download.
//!
//! - **Discovery**: scan a site's home page for `<link rel="icon">` style tags
//! - **Resolution**: absolutize the candidate, or fall back to `/favicon.ico`
//! - **Decoding**: turn inline `data:` URLs straight into icons
//! - **Download**: fetch the icon bytes with the feed's HTTP settings
//!
//! # Architecture
//!
//! - [`scanner`] - HTML document wrapper and the icon link queries
//! - [`data_url`] - `data:` URL decoding
//! - [`fetcher`] - HTTP client setup and body reading
//!
//! [`find_icon`] runs them in sequence. It makes at most two requests (page,
//! then icon) and keeps no state between calls.
//!
//! # Example
//!
//! ```ignore
//! use feedicon::icon::{find_icon, ClientConfig, FetchOptions};
//!
//! let icon = find_icon(&ClientConfig::default(), "https://example.com/", None, FetchOptions::default()).await?;
//! println!("{} {} bytes", icon.mime_type(), icon.content().len());
//! ```

mod data_url;
mod error;
mod fetcher;
mod scanner;
mod types;

pub use data_url::parse_image_data_url;
pub use error::{DataUrlError, IconError};
pub use fetcher::{
    download_icon, fetch_html_document, is_server_failure, ClientConfig, FetchOptions,
    DEFAULT_MAX_BODY_SIZE, DEFAULT_TIMEOUT,
};
pub use scanner::{find_icon_url_in_html, Document, Element};
pub use types::{hash_bytes, Icon};

use crate::util::{absolute_url, join_base_url_and_path, root_url};
use data_url::DATA_URL_PREFIX;

/// Finds and retrieves the icon of a website.
///
/// # Arguments
///
/// * `config` - HTTP settings shared by every lookup
/// * `website_url` - the site the feed belongs to
/// * `feed_icon_url` - icon URL declared by the feed itself, if any
/// * `options` - per-feed user agent, proxy and certificate settings
///
/// # Behavior
///
/// 1. Without a feed icon URL, the site's root page is fetched and scanned for an icon link
/// 2. A `data:` candidate is decoded in place, with no further requests
/// 3. Otherwise the candidate is resolved against the site (empty means `/favicon.ico`)
/// 4. The resolved URL is downloaded
///
/// # Errors
///
/// The first failing step's [`IconError`] is returned. There are no partial results.
pub async fn find_icon(
    config: &ClientConfig,
    website_url: &str,
    feed_icon_url: Option<&str>,
    options: FetchOptions,
) -> Result<Icon, IconError> {
    let candidate = match feed_icon_url.filter(|url| !url.is_empty()) {
        Some(url) => url.to_owned(),
        None => fetch_html_document_and_find_icon_url(config, website_url, &options).await?,
    };

    if candidate.starts_with(DATA_URL_PREFIX) {
        return parse_image_data_url(&candidate);
    }

    let icon_url = resolve_icon_url(website_url, &candidate)?;
    tracing::debug!(website = %website_url, icon_url = %icon_url, "Downloading icon");

    download_icon(config, &icon_url, &options).await
}

/// Turns a candidate icon URL into an absolute one.
///
/// An empty (or blank) candidate resolves to `favicon.ico` at the site root.
pub fn resolve_icon_url(website_url: &str, candidate: &str) -> Result<String, IconError> {
    let candidate = candidate.trim();

    if candidate.is_empty() {
        return join_base_url_and_path(&root_url(website_url), "favicon.ico").map_err(|e| {
            IconError::MalformedUrl {
                url: website_url.to_owned(),
                reason: format!("unable to join base URL and path ({e})"),
            }
        });
    }

    absolute_url(website_url, candidate).map_err(|e| IconError::MalformedUrl {
        url: candidate.to_owned(),
        reason: format!("unable to convert icon URL to absolute URL ({e})"),
    })
}

async fn fetch_html_document_and_find_icon_url(
    config: &ClientConfig,
    website_url: &str,
    options: &FetchOptions,
) -> Result<String, IconError> {
    let page_url = root_url(website_url);
    tracing::debug!(url = %page_url, "Looking for icon in HTML page");

    let html = fetch_html_document(config, &page_url, options).await?;
    let icon_url = find_icon_url_in_html(&html)?;

    if icon_url.is_empty() {
        tracing::debug!(url = %page_url, "No icon link found, falling back to favicon.ico");
    }

    Ok(icon_url)
}
