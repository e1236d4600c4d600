//! URL helpers shared by the icon finder.
//!
//! - **Root extraction**: reduce a website URL to `scheme://host/`
//! - **Joining**: append a path to a base URL
//! - **Resolution**: turn a candidate href into an absolute URL
//!
//! # Examples
//!
//! ```
//! use feedicon::util::{absolute_url, join_base_url_and_path, root_url};
//!
//! let root = root_url("https://example.com/blog/");
//! assert_eq!(
//!     join_base_url_and_path(&root, "favicon.ico").unwrap(),
//!     "https://example.com/favicon.ico"
//! );
//!
//! assert_eq!(
//!     absolute_url("https://example.com/blog/", "icons/fav.png").unwrap(),
//!     "https://example.com/blog/icons/fav.png"
//! );
//! ```

mod url_resolver;

pub use url_resolver::{absolute_url, join_base_url_and_path, root_url, UrlError};
