//! In-process view cache

use crate::core::cache::{CachedView, ViewCache};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

#[derive(Default)]
struct CacheState {
    views: HashMap<String, String>,
    generations: HashMap<String, u64>,
    invalidations: Vec<String>,
}

impl CacheState {
    fn generation(&self, path: &str) -> u64 {
        self.generations.get(path).copied().unwrap_or(0)
    }
}

/// View cache held in process memory
///
/// Keeps a log of invalidated paths so callers can observe when a view was
/// marked stale.
#[derive(Clone, Default)]
pub struct InMemoryViewCache {
    state: Arc<RwLock<CacheState>>,
}

impl InMemoryViewCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a rendered body is cached for `path`
    pub fn is_cached(&self, path: &str) -> bool {
        self.state
            .read()
            .map(|s| s.views.contains_key(path))
            .unwrap_or(false)
    }

    /// Every path passed to `invalidate`, oldest first
    pub fn invalidated_paths(&self) -> Vec<String> {
        self.state
            .read()
            .map(|s| s.invalidations.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ViewCache for InMemoryViewCache {
    async fn get(&self, path: &str) -> Result<CachedView> {
        let state = self
            .state
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;
        Ok(CachedView {
            body: state.views.get(path).cloned(),
            generation: state.generation(path),
        })
    }

    async fn put(&self, path: &str, body: String, generation: u64) -> Result<bool> {
        let mut state = self
            .state
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;
        if state.generation(path) != generation {
            return Ok(false);
        }
        state.views.insert(path.to_string(), body);
        Ok(true)
    }

    async fn invalidate(&self, path: &str) -> Result<()> {
        let mut state = self
            .state
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;
        state.views.remove(path);
        *state.generations.entry(path.to_string()).or_insert(0) += 1;
        state.invalidations.push(path.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PATH: &str = "/dashboard/invoices";

    #[tokio::test]
    async fn test_invalidate_drops_cached_body() {
        let cache = InMemoryViewCache::new();
        let generation = cache.get(PATH).await.unwrap().generation;
        assert!(cache.put(PATH, "{}".to_string(), generation).await.unwrap());
        assert!(cache.is_cached(PATH));

        cache.invalidate(PATH).await.unwrap();
        assert!(!cache.is_cached(PATH));
        assert_eq!(cache.invalidated_paths(), vec![PATH]);
    }

    #[tokio::test]
    async fn test_invalidate_uncached_path_is_ok() {
        let cache = InMemoryViewCache::new();
        assert!(cache.invalidate("/nowhere").await.is_ok());
        assert_eq!(cache.get("/nowhere").await.unwrap().body, None);
    }

    #[tokio::test]
    async fn test_put_after_invalidation_is_discarded() {
        let cache = InMemoryViewCache::new();
        let read = cache.get(PATH).await.unwrap();

        cache.invalidate(PATH).await.unwrap();
        let stored = cache
            .put(PATH, "stale".to_string(), read.generation)
            .await
            .unwrap();

        assert!(!stored);
        assert!(!cache.is_cached(PATH));

        let fresh = cache.get(PATH).await.unwrap();
        assert_eq!(fresh.generation, read.generation + 1);
        assert!(cache.put(PATH, "fresh".to_string(), fresh.generation).await.unwrap());
        assert_eq!(cache.get(PATH).await.unwrap().body.as_deref(), Some("fresh"));
    }
}
