//! Decoding of `data:` URLs into icons.
//!
//! Syntax: `data:[<mediatype>][;<encoding>],<data>`
//! (<https://developer.mozilla.org/en-US/docs/Web/HTTP/Basics_of_HTTP/Data_URIs#syntax>)

use super::error::{DataUrlError, IconError};
use super::types::Icon;
use base64::{engine::general_purpose, Engine};

pub(crate) const DATA_URL_PREFIX: &str = "data:";

/// Decodes an image `data:` URL into an [`Icon`].
///
/// Supports `base64` and the empty encoding (percent-escaped text). The media
/// type must be `image/*`.
///
/// # Errors
///
/// - [`IconError::MalformedDataUrl`] - missing prefix or comma, non-image media type,
///   unknown encoding, or an undecodable payload
/// - [`IconError::EmptyContent`] - the payload decodes to zero bytes
pub fn parse_image_data_url(value: &str) -> Result<Icon, IconError> {
    let malformed = |kind: DataUrlError| IconError::MalformedDataUrl {
        value: value.to_owned(),
        kind,
    };

    let rest = value
        .strip_prefix(DATA_URL_PREFIX)
        .ok_or_else(|| malformed(DataUrlError::MissingPrefix))?;

    let (header, data) = rest
        .split_once(',')
        .ok_or_else(|| malformed(DataUrlError::MissingComma))?;

    // A leading ';' does not start an encoding: the whole header is the media type
    let (media_type, encoding) = match header.find(';') {
        Some(pos) if pos > 0 => (&header[..pos], &header[pos + 1..]),
        _ => (header, ""),
    };

    if !media_type.starts_with("image/") {
        return Err(malformed(DataUrlError::InvalidMediaType(
            media_type.to_owned(),
        )));
    }

    let blob = match encoding {
        // Line breaks inside the payload are ignored, as in wrapped base64
        "base64" => general_purpose::STANDARD
            .decode(data.replace(['\r', '\n'], ""))
            .map_err(|e| malformed(DataUrlError::InvalidBase64(e)))?,
        "" => unescape_query(data).ok_or_else(|| malformed(DataUrlError::InvalidEscape))?,
        other => {
            return Err(malformed(DataUrlError::UnsupportedEncoding(
                other.to_owned(),
            )))
        }
    };

    tracing::debug!(
        media_type = %media_type,
        size = blob.len(),
        "Decoded icon from data URL"
    );

    Icon::from_content(blob, media_type).ok_or_else(|| IconError::EmptyContent {
        location: value.to_owned(),
    })
}

/// Percent-decodes with query-string rules: `+` is a space and every `%` must
/// be followed by two hex digits.
fn unescape_query(data: &str) -> Option<Vec<u8>> {
    let bytes = data.as_bytes();
    let mut pos = 0;

    while let Some(offset) = bytes[pos..].iter().position(|&b| b == b'%') {
        let start = pos + offset;
        let escape = bytes.get(start + 1..start + 3)?;
        if !escape.iter().all(u8::is_ascii_hexdigit) {
            return None;
        }
        pos = start + 3;
    }

    let spaced = data.replace('+', " ");
    Some(urlencoding::decode_binary(spaced.as_bytes()).into_owned())
}
