//! Broadcast newly listed properties to a LINE channel.
//!
//! The pipeline is a straight line: read the scraper's CSV, keep listings
//! whose price carries the tier marker, render one line per listing, pack
//! lines into size-bounded messages under a timestamped header, and deliver
//! each message through the broadcast endpoint with bounded rate-limit
//! retries.

pub mod broadcast;
pub mod config;
pub mod error;
pub mod listing;
pub mod message;

pub use broadcast::Broadcaster;
pub use config::BroadcastConfig;
pub use error::{Error, Result};
pub use listing::{filter_and_format, read_listings, read_listings_from, Listing};
pub use message::{build_header, chunk_lines, jst_now};
