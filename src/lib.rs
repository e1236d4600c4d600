//! Website icon finder for feed readers.
//!
//! Given a site URL and an optional icon URL from the feed, [`find_icon`]
//! returns the icon bytes with their MIME type and a content hash.

pub mod config;
pub mod icon;
pub mod util;

pub use config::{Config, ConfigError};
pub use icon::{find_icon, ClientConfig, FetchOptions, Icon, IconError};
