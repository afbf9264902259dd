//! Time-bounded memoization of extractor metadata lookups.
//!
//! A stale or duplicate fetch only costs latency, never correctness, so the
//! cache tolerates racing refreshes (last write wins) and never evicts
//! beyond overwrite-on-refresh.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tracing::debug;

use ytaudio_models::VideoInfo;

use crate::error::MediaResult;
use crate::ytdlp::AudioExtractor;

/// Default entry lifetime: one hour.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(3600);

struct CacheEntry {
    info: VideoInfo,
    fetched_at: Instant,
}

/// Metadata cache keyed by video identifier.
///
/// An entry older than the TTL is treated as absent and refreshed
/// synchronously on the next lookup; there is no background eviction.
pub struct InfoCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    ttl: Duration,
    fetcher: Arc<dyn AudioExtractor>,
}

impl InfoCache {
    /// Create a cache with the default one-hour TTL.
    pub fn new(fetcher: Arc<dyn AudioExtractor>) -> Self {
        Self::with_ttl(fetcher, DEFAULT_CACHE_TTL)
    }

    /// Create a cache with an explicit TTL (used by tests).
    pub fn with_ttl(fetcher: Arc<dyn AudioExtractor>, ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
            fetcher,
        }
    }

    /// Return cached metadata for `video_id`, fetching upstream on a miss
    /// or an expired entry.
    pub async fn lookup(&self, video_id: &str) -> MediaResult<VideoInfo> {
        {
            let entries = self.entries.lock().expect("info cache lock poisoned");
            if let Some(entry) = entries.get(video_id) {
                if entry.fetched_at.elapsed() < self.ttl {
                    debug!(video_id = %video_id, "Using cached video info");
                    return Ok(entry.info.clone());
                }
            }
        }

        debug!(video_id = %video_id, "Fetching fresh video info");
        let info = self.fetcher.fetch_info(video_id).await?;

        let mut entries = self.entries.lock().expect("info cache lock poisoned");
        entries.insert(
            video_id.to_string(),
            CacheEntry {
                info: info.clone(),
                fetched_at: Instant::now(),
            },
        );

        Ok(info)
    }

    /// Number of cached entries (stale entries included).
    pub fn len(&self) -> usize {
        self.entries.lock().expect("info cache lock poisoned").len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    struct CountingFetcher {
        calls: AtomicUsize,
    }

    impl CountingFetcher {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl AudioExtractor for CountingFetcher {
        async fn fetch_info(&self, video_id: &str) -> MediaResult<VideoInfo> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(VideoInfo {
                title: format!("title-{video_id}"),
                duration: None,
                uploader: None,
                webpage_url: None,
            })
        }

        async fn extract(&self, _video_id: &str, _dir: &Path) -> MediaResult<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_second_lookup_within_ttl_hits_cache() {
        let fetcher = CountingFetcher::new();
        let cache = InfoCache::new(fetcher.clone());

        let a = cache.lookup("dQw4w9WgXcQ").await.unwrap();
        let b = cache.lookup("dQw4w9WgXcQ").await.unwrap();

        assert_eq!(a.title, b.title);
        assert_eq!(fetcher.calls(), 1);
    }

    #[tokio::test]
    async fn test_expired_entry_refetches() {
        let fetcher = CountingFetcher::new();
        let cache = InfoCache::with_ttl(fetcher.clone(), Duration::from_millis(10));

        cache.lookup("dQw4w9WgXcQ").await.unwrap();
        tokio::time::sleep(Duration::from_millis(25)).await;
        cache.lookup("dQw4w9WgXcQ").await.unwrap();

        assert_eq!(fetcher.calls(), 2);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_distinct_ids_fetch_separately() {
        let fetcher = CountingFetcher::new();
        let cache = InfoCache::new(fetcher.clone());

        cache.lookup("aaaaaaaaaaa").await.unwrap();
        cache.lookup("bbbbbbbbbbb").await.unwrap();

        assert_eq!(fetcher.calls(), 2);
        assert_eq!(cache.len(), 2);
    }
}
