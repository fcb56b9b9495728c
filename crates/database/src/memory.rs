use crate::repository::{ReplaceOutcome, SalesRepository};
use crate::DbError;
use async_trait::async_trait;
use core_types::{NewSalesRecord, OwnerId, ProductTotal, RecordScope, SalesRecord};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Default)]
struct MemoryState {
    next_id: i64,
    records: Vec<SalesRecord>,
}

/// A process-local [`SalesRepository`].
///
/// Nothing is persisted. A replace happens under a single write lock, so
/// readers never observe a half-replaced owner.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    state: RwLock<MemoryState>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SalesRepository for InMemoryRepository {
    async fn list_records(&self, scope: RecordScope) -> Result<Vec<SalesRecord>, DbError> {
        let state = self.state.read().await;
        Ok(state
            .records
            .iter()
            .filter(|record| scope.includes(record.owner))
            .cloned()
            .collect())
    }

    async fn replace_all_for_owner(
        &self,
        owner: OwnerId,
        import_id: Uuid,
        records: &[NewSalesRecord],
    ) -> Result<ReplaceOutcome, DbError> {
        let mut state = self.state.write().await;

        let before = state.records.len();
        state.records.retain(|record| record.owner != owner);
        let deleted = (before - state.records.len()) as u64;

        for record in records {
            state.next_id += 1;
            let id = state.next_id;
            state.records.push(SalesRecord {
                id,
                owner,
                import_id,
                date: record.date.clone(),
                product: record.product.clone(),
                quantity: record.quantity,
            });
        }

        tracing::info!(%owner, %import_id, deleted, inserted = records.len(), "Replaced sales records (in memory)");
        Ok(ReplaceOutcome {
            deleted,
            inserted: records.len() as u64,
        })
    }

    async fn top_product_by_owner(&self, owner: OwnerId) -> Result<Option<ProductTotal>, DbError> {
        let records = self.list_records(RecordScope::Owner(owner)).await?;
        Ok(forecasting::best_selling_product(&records))
    }

    async fn count_by_owner(&self, owner: OwnerId) -> Result<u64, DbError> {
        let state = self.state.read().await;
        Ok(state.records.iter().filter(|r| r.owner == owner).count() as u64)
    }

    async fn clear_owner(&self, owner: OwnerId) -> Result<u64, DbError> {
        let mut state = self.state.write().await;
        let before = state.records.len();
        state.records.retain(|record| record.owner != owner);
        Ok((before - state.records.len()) as u64)
    }

    async fn clear_all(&self) -> Result<u64, DbError> {
        let mut state = self.state.write().await;
        let deleted = state.records.len() as u64;
        state.records.clear();
        Ok(deleted)
    }
}
