use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use crate::config::CollectionSettings;
use crate::core::RecommendationResult;
use crate::models::{Candidate, ProfileKind, RankedRecommendation, Seeker};
use crate::services::store::{RecordStore, StoreError};

/// Saved ranked list for one seeker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredRecommendation {
    pub seeker_id: String,
    pub profile: ProfileKind,
    pub generated_at: DateTime<Utc>,
    pub total_candidates: usize,
    pub total_paths: usize,
    pub recommendations: Vec<RankedRecommendation>,
}

/// Typed access to the record store collections
#[derive(Clone)]
pub struct ReferralRepository {
    store: Arc<dyn RecordStore>,
    collections: CollectionSettings,
}

impl ReferralRepository {
    pub fn new(store: Arc<dyn RecordStore>, collections: CollectionSettings) -> Self {
        Self { store, collections }
    }

    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    /// Load a seeker by id, accepting records keyed by `id` or `student_id`
    pub async fn load_seeker(&self, seeker_id: &str) -> Result<Seeker, StoreError> {
        let collection = &self.collections.seekers;

        let mut records = self.store.find(collection, &json!({ "id": seeker_id })).await?;
        if records.is_empty() {
            records = self
                .store
                .find(collection, &json!({ "student_id": seeker_id }))
                .await?;
        }

        let record = records
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::NotFound(format!("seeker '{}'", seeker_id)))?;

        Ok(serde_json::from_value(record.body)?)
    }

    /// Load every candidate; records that do not parse are skipped with a warning
    pub async fn load_candidates(&self) -> Result<Vec<Candidate>, StoreError> {
        let records = self
            .store
            .find(&self.collections.candidates, &json!({}))
            .await?;
        let total = records.len();

        let candidates: Vec<Candidate> = records
            .into_iter()
            .filter_map(|record| match serde_json::from_value::<Candidate>(record.body) {
                Ok(candidate) => Some(candidate),
                Err(err) => {
                    tracing::warn!("Skipping unreadable candidate record {}: {}", record.id, err);
                    None
                }
            })
            .collect();

        tracing::debug!("Loaded {} of {} candidate records", candidates.len(), total);
        Ok(candidates)
    }

    pub async fn save_recommendations(
        &self,
        seeker_id: &str,
        profile: ProfileKind,
        result: &RecommendationResult,
    ) -> Result<String, StoreError> {
        let document = StoredRecommendation {
            seeker_id: seeker_id.to_string(),
            profile,
            generated_at: Utc::now(),
            total_candidates: result.total_candidates,
            total_paths: result.total_paths,
            recommendations: result.recommendations.clone(),
        };

        let id = self
            .store
            .insert(&self.collections.recommendations, serde_json::to_value(&document)?)
            .await?;

        tracing::info!(
            "Saved {} recommendations for seeker {} as {}",
            document.recommendations.len(),
            seeker_id,
            id
        );
        Ok(id)
    }

    pub async fn load_recommendations(&self, seeker_id: &str) -> Result<Vec<StoredRecommendation>, StoreError> {
        let records = self
            .store
            .find(&self.collections.recommendations, &json!({ "seeker_id": seeker_id }))
            .await?;

        records
            .into_iter()
            .map(|record| serde_json::from_value(record.body).map_err(StoreError::from))
            .collect()
    }
}
