//! Repository trait for reads against the `station` table.

use async_trait::async_trait;

use super::error::RepositoryResult;

#[async_trait]
pub trait StationRepository: Send + Sync {
    /// Every station identifier, one per row, in storage order.
    async fn list_station_ids(&self) -> RepositoryResult<Vec<String>>;
}
