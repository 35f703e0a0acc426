//! Xen Orchestra object access.
//!
//! - [`ObjectSource`] - anything that can return every XO object at once
//! - [`client`] - REST API client
//! - [`dump`] - objects read from a JSON dump file
//! - [`fetch`] - time-based cache in front of a source

mod client;
mod dump;
mod fetch;

pub use client::{Credentials, XoRestClient, COLLECTIONS};
pub use dump::DumpFile;
pub use fetch::{ObjectFetcher, DEFAULT_CACHE_SECONDS, MAX_CACHE_SECONDS};

use crate::error::Result;
use crate::models::ObjectMap;
use async_trait::async_trait;

/// Source of Xen Orchestra objects.
#[async_trait]
pub trait ObjectSource {
    /// Fetch every object the source knows about, keyed by id.
    async fn get_all_objects(&self) -> Result<ObjectMap>;
}
