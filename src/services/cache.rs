use std::time::Duration;

use crate::models::{ProfileKind, RecommendResponse};

/// In-process cache of the latest recommendation per seeker and profile
#[derive(Clone)]
pub struct RecommendationCache {
    inner: moka::future::Cache<String, RecommendResponse>,
}

impl RecommendationCache {
    pub fn new(capacity: u64, ttl_secs: u64) -> Self {
        let inner = moka::future::CacheBuilder::new(capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { inner }
    }

    pub async fn get(&self, seeker_id: &str, profile: ProfileKind) -> Option<RecommendResponse> {
        let key = CacheKey::recommendations(seeker_id, profile);
        let hit = self.inner.get(&key).await;

        if hit.is_some() {
            tracing::trace!("Cache hit: {}", key);
        } else {
            tracing::trace!("Cache miss: {}", key);
        }
        hit
    }

    /// Latest entry for a seeker under any profile, default profile first
    pub async fn latest(&self, seeker_id: &str, preferred: ProfileKind) -> Option<RecommendResponse> {
        if let Some(hit) = self.get(seeker_id, preferred).await {
            return Some(hit);
        }

        for profile in [ProfileKind::Thorough, ProfileKind::Quick] {
            if profile != preferred {
                if let Some(hit) = self.get(seeker_id, profile).await {
                    return Some(hit);
                }
            }
        }
        None
    }

    pub async fn insert(&self, response: RecommendResponse) {
        let key = CacheKey::recommendations(&response.seeker_id, response.profile);
        self.inner.insert(key.clone(), response).await;
        tracing::trace!("Cache set: {}", key);
    }

    pub async fn invalidate(&self, seeker_id: &str) {
        for profile in [ProfileKind::Thorough, ProfileKind::Quick] {
            self.inner
                .invalidate(&CacheKey::recommendations(seeker_id, profile))
                .await;
        }
    }

    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Build a cache key for a seeker's recommendations under one profile
    pub fn recommendations(seeker_id: &str, profile: ProfileKind) -> String {
        format!("seeker:{}:{}", seeker_id, profile)
    }
}
