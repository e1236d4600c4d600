use sha2::{Digest, Sha256};
use std::fmt;

/// A website icon, ready for the caller to persist.
///
/// The hash is derived from the content and identifies the icon for
/// deduplication. Fields are read-only once built, and the content is never
/// empty.
#[derive(Clone, PartialEq, Eq)]
pub struct Icon {
    hash: String,
    mime_type: String,
    content: Vec<u8>,
}

impl Icon {
    /// Builds an icon from its raw bytes, or `None` when there are no bytes.
    pub(crate) fn from_content(content: Vec<u8>, mime_type: impl Into<String>) -> Option<Self> {
        if content.is_empty() {
            return None;
        }

        Some(Self {
            hash: hash_bytes(&content),
            mime_type: mime_type.into(),
            content,
        })
    }

    /// Hex-encoded SHA-256 digest of the content.
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// MIME type declared by the server or the data URL (may be empty for downloads
    /// that carried no `Content-Type`).
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn into_content(self) -> Vec<u8> {
        self.content
    }
}

// Icon bytes are noise in logs; show the size instead.
impl fmt::Debug for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Icon")
            .field("hash", &self.hash)
            .field("mime_type", &self.mime_type)
            .field("content_len", &self.content.len())
            .finish()
    }
}

/// Content hash used for icon identity.
pub fn hash_bytes(bytes: &[u8]) -> String {
    let hash = Sha256::digest(bytes);
    format!("{:x}", hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_content_is_rejected() {
        assert!(Icon::from_content(Vec::new(), "image/png").is_none());
    }

    #[test]
    fn test_hash_is_sha256_hex() {
        let icon = Icon::from_content(b"abc".to_vec(), "image/png").unwrap();
        assert_eq!(
            icon.hash(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(icon.hash().len(), 64);
    }

    #[test]
    fn test_identical_bytes_share_hash() {
        let a = Icon::from_content(vec![1, 2, 3], "image/png").unwrap();
        let b = Icon::from_content(vec![1, 2, 3], "image/x-icon").unwrap();
        let c = Icon::from_content(vec![1, 2, 4], "image/png").unwrap();

        assert_eq!(a.hash(), b.hash());
        assert_ne!(a.hash(), c.hash());
    }

    #[test]
    fn test_debug_hides_content() {
        let icon = Icon::from_content(vec![0xAB; 64], "image/png").unwrap();
        let debug_output = format!("{:?}", icon);
        assert!(debug_output.contains("content_len: 64"));
        assert!(!debug_output.contains("content:"));
    }
}
