//! Cached object fetching.
//!
//! Provides [`ObjectFetcher`] to avoid repeated API calls within one run.

use super::ObjectSource;
use crate::error::Result;
use crate::models::ObjectMap;
use chrono::{DateTime, Duration, Utc};

/// Default maximum cache age.
pub const DEFAULT_CACHE_SECONDS: i64 = 10;

/// Largest accepted cache age: one year.
pub const MAX_CACHE_SECONDS: i64 = 365 * 24 * 3600;

/// Fetches objects by type, caching the full object set for a short time.
pub struct ObjectFetcher<S> {
    source: S,
    cache_seconds: i64,
    last_refresh: Option<DateTime<Utc>>,
    obj_cache: ObjectMap,
}

impl<S: ObjectSource> ObjectFetcher<S> {
    pub fn new(source: S) -> Self {
        Self::with_cache_seconds(source, DEFAULT_CACHE_SECONDS)
    }

    pub fn with_cache_seconds(source: S, cache_seconds: i64) -> Self {
        ObjectFetcher {
            source,
            cache_seconds,
            last_refresh: None,
            obj_cache: ObjectMap::new(),
        }
    }

    /// Return all cached objects of `obj_type`, refreshing the cache first when
    /// `refresh` is set, the cache is older than the limit, or it is empty.
    ///
    /// # Errors
    /// Source failures are returned unchanged; the previous cache is kept.
    pub async fn objects_by_type(&mut self, obj_type: &str, refresh: bool) -> Result<ObjectMap> {
        if refresh || self.is_stale(Utc::now()) || self.obj_cache.is_empty() {
            log::info!("Refreshing object cache (refresh={refresh})");
            self.obj_cache = self.source.get_all_objects().await?;
            self.last_refresh = Some(Utc::now());
            log::info!("Object cache holds {} objects", self.obj_cache.len());
        } else {
            log::debug!("Serving {obj_type} objects from cache");
        }

        Ok(self
            .obj_cache
            .iter()
            .filter(|(_, o)| o.obj_type == obj_type)
            .map(|(id, o)| (id.clone(), o.clone()))
            .collect())
    }

    fn is_stale(&self, now: DateTime<Utc>) -> bool {
        match self.last_refresh {
            // An age limit too large for chrono never expires.
            Some(last) => Duration::try_seconds(self.cache_seconds)
                .is_some_and(|max_age| now - last > max_age),
            None => true,
        }
    }

    /// The wrapped source.
    pub fn source(&self) -> &S {
        &self.source
    }
}
