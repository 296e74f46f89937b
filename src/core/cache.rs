//! View cache seam
//!
//! Rendered views are cached by request path. A successful write marks the
//! affected path stale so the next request renders it from current data.
//!
//! Every path carries a generation that [`ViewCache::invalidate`] bumps. A
//! render reads the generation together with the cached body and hands it
//! back to [`ViewCache::put`]; the body is only stored if no invalidation
//! happened in between.

use anyhow::Result;
use async_trait::async_trait;

/// Cached body of a path and the generation it was read at
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CachedView {
    pub body: Option<String>,
    pub generation: u64,
}

/// Cache of rendered views keyed by path
#[async_trait]
pub trait ViewCache: Send + Sync {
    /// Get the cached body for `path`, if still fresh, with the current
    /// generation
    async fn get(&self, path: &str) -> Result<CachedView>;

    /// Store a body rendered at `generation`.
    ///
    /// Returns `false` without storing when `path` was invalidated since.
    async fn put(&self, path: &str, body: String, generation: u64) -> Result<bool>;

    /// Mark `path` stale. Invalidating an uncached path is not an error.
    async fn invalidate(&self, path: &str) -> Result<()>;
}
