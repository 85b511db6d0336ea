//! URL modeling: normalization of discovered URLs and the local path each
//! one is mirrored to.
//!
//! Both operations are pure; nothing here touches the network or disk.

mod normalize;
mod path;

pub use normalize::normalize_url;
pub use path::{destination_path, filename_from_url_path};
