//! Repository for the `points` and `point_items` tables.

use ecoleta_core::types::DbId;
use sqlx::PgPool;

use crate::models::point::{CreatedPoint, NewPoint, Point, PointFilter, PointItem};

/// Column list for `points` queries.
const COLUMNS: &str = "id, image, name, email, whatsapp, latitude, longitude, city, uf";

/// Same columns qualified with the `p` alias used in joins.
const P_COLUMNS: &str = "\
    p.id, p.image, p.name, p.email, p.whatsapp, \
    p.latitude, p.longitude, p.city, p.uf";

/// Provides point lookups and transactional registration.
pub struct PointRepo;

impl PointRepo {
    /// Insert a point and its item associations in a single transaction.
    ///
    /// If any association insert fails (e.g. an item id that does not
    /// exist), the transaction is dropped without commit and the point row
    /// is rolled back with it.
    pub async fn create(
        pool: &PgPool,
        input: &NewPoint,
        item_ids: &[DbId],
    ) -> Result<CreatedPoint, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let point_id: DbId = sqlx::query_scalar(
            "INSERT INTO points (image, name, email, whatsapp, latitude, longitude, city, uf) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING id",
        )
        .bind(&input.image)
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.whatsapp)
        .bind(input.latitude)
        .bind(input.longitude)
        .bind(&input.city)
        .bind(&input.uf)
        .fetch_one(&mut *tx)
        .await?;

        let items = Self::insert_items_inner(&mut tx, point_id, item_ids).await?;

        tx.commit().await?;

        Ok(CreatedPoint {
            id: point_id,
            point: input.clone(),
            items,
        })
    }

    /// Find a point by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Point>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM points WHERE id = $1");
        sqlx::query_as::<_, Point>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Distinct points in `city`/`uf` (exact, case-sensitive match) that
    /// accept at least one of the filter's items. Ordered by id.
    pub async fn list_filtered(
        pool: &PgPool,
        filter: &PointFilter,
    ) -> Result<Vec<Point>, sqlx::Error> {
        let query = format!(
            "SELECT DISTINCT {P_COLUMNS} \
             FROM points p \
             JOIN point_items pi ON pi.point_id = p.id \
             WHERE pi.item_id = ANY($1) \
               AND p.city = $2 \
               AND p.uf = $3 \
             ORDER BY p.id"
        );
        sqlx::query_as::<_, Point>(&query)
            .bind(filter.item_ids.as_slice())
            .bind(&filter.city)
            .bind(&filter.uf)
            .fetch_all(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Insert point-item associations within an existing transaction.
    async fn insert_items_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        point_id: DbId,
        item_ids: &[DbId],
    ) -> Result<Vec<PointItem>, sqlx::Error> {
        let mut inserted = Vec::with_capacity(item_ids.len());

        for &item_id in item_ids {
            let row = sqlx::query_as::<_, PointItem>(
                "INSERT INTO point_items (point_id, item_id) VALUES ($1, $2) \
                 RETURNING item_id, point_id",
            )
            .bind(point_id)
            .bind(item_id)
            .fetch_one(&mut **tx)
            .await?;
            inserted.push(row);
        }

        tracing::debug!(point_id, count = inserted.len(), "Point items inserted");

        Ok(inserted)
    }
}
