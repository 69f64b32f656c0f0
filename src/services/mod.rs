// Service exports
pub mod cache;
pub mod postgres;
pub mod repository;
pub mod store;

pub use cache::{CacheKey, RecommendationCache};
pub use postgres::PostgresStore;
pub use repository::{ReferralRepository, StoredRecommendation};
pub use store::{MemoryStore, RecordStore, StoreError, StoredRecord};
