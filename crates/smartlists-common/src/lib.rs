//! Smartlists-Common: Shared types used across the smartlists crates.
//!
//! - **Media types**: the playlist types a document can target and which of
//!   them may reference each other
//! - **Sorting and grouping**: the closed vocabularies for `order` and `group`
//! - **Error handling**: common error type and result alias
//!
//! # Examples
//!
//! ```
//! use smartlists_common::{MediaType, SortBy};
//!
//! let media_type: MediaType = "movies".parse().unwrap();
//! assert!(media_type.is_video());
//! assert!(media_type.is_compatible_with(MediaType::Mixed));
//! assert_eq!(SortBy::Rating.to_string(), "rating");
//! ```

pub mod error;
pub mod group;
pub mod media;
pub mod sort;

pub use error::{Error, Result};
pub use group::GroupBy;
pub use media::MediaType;
pub use sort::{Order, SortAttributes, SortBy, SortDirection};
