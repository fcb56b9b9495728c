use crate::DbError;
use async_trait::async_trait;
use core_types::{NewSalesRecord, OwnerId, ProductTotal, RecordScope, SalesRecord};
use sqlx::postgres::{PgPool, Postgres};
use sqlx::{FromRow, QueryBuilder};
use uuid::Uuid;

// Postgres caps a statement at 65535 bind parameters; each row binds five.
const INSERT_CHUNK_ROWS: usize = 5_000;

/// What a full replace of an owner's records did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplaceOutcome {
    pub deleted: u64,
    pub inserted: u64,
}

/// The storage interface for sales records.
///
/// Every method except `list_records(RecordScope::Global)` and `clear_all` is
/// scoped to a single owner.
#[async_trait]
pub trait SalesRepository: Send + Sync {
    /// Lists the records within `scope`, in insertion order.
    async fn list_records(&self, scope: RecordScope) -> Result<Vec<SalesRecord>, DbError>;

    /// Deletes every record of `owner` and stores `records` in their place.
    ///
    /// After this returns, no record from an earlier upload of `owner` remains.
    async fn replace_all_for_owner(
        &self,
        owner: OwnerId,
        import_id: Uuid,
        records: &[NewSalesRecord],
    ) -> Result<ReplaceOutcome, DbError>;

    /// The owner's product with the highest total quantity.
    ///
    /// Ties go to the lexicographically smallest product name. Totals saturate
    /// at `i64::MAX`.
    async fn top_product_by_owner(&self, owner: OwnerId) -> Result<Option<ProductTotal>, DbError>;

    async fn count_by_owner(&self, owner: OwnerId) -> Result<u64, DbError>;

    /// Deletes every record of `owner`, returning how many were removed.
    async fn clear_owner(&self, owner: OwnerId) -> Result<u64, DbError>;

    /// Deletes every record of every owner.
    async fn clear_all(&self) -> Result<u64, DbError>;
}

/// A row of the `sales` table.
#[derive(Debug, Clone, FromRow)]
struct DbSalesRecord {
    id: i64,
    owner_id: i64,
    import_id: Uuid,
    sale_date: String,
    product: String,
    quantity: i64,
}

impl From<DbSalesRecord> for SalesRecord {
    fn from(row: DbSalesRecord) -> Self {
        Self {
            id: row.id,
            owner: OwnerId(row.owner_id),
            import_id: row.import_id,
            date: row.sale_date,
            product: row.product,
            quantity: row.quantity,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
struct DbProductTotal {
    product: String,
    total_quantity: i64,
}

/// The PostgreSQL implementation of [`SalesRepository`].
#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: PgPool,
}

impl DbRepository {
    /// Creates a new `DbRepository` with a shared database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SalesRepository for DbRepository {
    async fn list_records(&self, scope: RecordScope) -> Result<Vec<SalesRecord>, DbError> {
        let rows = match scope {
            RecordScope::Owner(owner) => {
                sqlx::query_as::<_, DbSalesRecord>(
                    "SELECT id, owner_id, import_id, sale_date, product, quantity FROM sales WHERE owner_id = $1 ORDER BY id ASC",
                )
                .bind(owner.get())
                .fetch_all(&self.pool)
                .await?
            }
            RecordScope::Global => {
                sqlx::query_as::<_, DbSalesRecord>(
                    "SELECT id, owner_id, import_id, sale_date, product, quantity FROM sales ORDER BY id ASC",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(rows.into_iter().map(SalesRecord::from).collect())
    }

    async fn replace_all_for_owner(
        &self,
        owner: OwnerId,
        import_id: Uuid,
        records: &[NewSalesRecord],
    ) -> Result<ReplaceOutcome, DbError> {
        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query("DELETE FROM sales WHERE owner_id = $1")
            .bind(owner.get())
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let mut inserted = 0;
        for chunk in records.chunks(INSERT_CHUNK_ROWS) {
            let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
                "INSERT INTO sales (owner_id, import_id, sale_date, product, quantity) ",
            );
            builder.push_values(chunk, |mut row, record| {
                row.push_bind(owner.get())
                    .push_bind(import_id)
                    .push_bind(&record.date)
                    .push_bind(&record.product)
                    .push_bind(record.quantity);
            });
            inserted += builder.build().execute(&mut *tx).await?.rows_affected();
        }

        tx.commit().await?;

        tracing::info!(%owner, %import_id, deleted, inserted, "Replaced sales records");
        Ok(ReplaceOutcome { deleted, inserted })
    }

    async fn top_product_by_owner(&self, owner: OwnerId) -> Result<Option<ProductTotal>, DbError> {
        let row = sqlx::query_as::<_, DbProductTotal>(
            r#"
            SELECT product, LEAST(SUM(quantity), 9223372036854775807)::BIGINT AS total_quantity
            FROM sales
            WHERE owner_id = $1
            GROUP BY product
            ORDER BY total_quantity DESC, product COLLATE "C" ASC
            LIMIT 1
            "#,
        )
        .bind(owner.get())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| ProductTotal {
            product: r.product,
            total_quantity: r.total_quantity,
        }))
    }

    async fn count_by_owner(&self, owner: OwnerId) -> Result<u64, DbError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales WHERE owner_id = $1")
            .bind(owner.get())
            .fetch_one(&self.pool)
            .await?;
        Ok(count.max(0) as u64)
    }

    async fn clear_owner(&self, owner: OwnerId) -> Result<u64, DbError> {
        let deleted = sqlx::query("DELETE FROM sales WHERE owner_id = $1")
            .bind(owner.get())
            .execute(&self.pool)
            .await?
            .rows_affected();
        tracing::info!(%owner, deleted, "Cleared sales records");
        Ok(deleted)
    }

    async fn clear_all(&self) -> Result<u64, DbError> {
        let deleted = sqlx::query("DELETE FROM sales")
            .execute(&self.pool)
            .await?
            .rows_affected();
        tracing::warn!(deleted, "Cleared sales records of every owner");
        Ok(deleted)
    }
}
