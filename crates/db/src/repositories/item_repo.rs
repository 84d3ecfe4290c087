//! Repository for the `items` table.

use ecoleta_core::types::DbId;
use sqlx::PgPool;

use crate::models::item::{Item, ItemTitle};

/// Read access to item categories. Items are seeded by migration and never
/// written by the application.
pub struct ItemRepo;

impl ItemRepo {
    /// List every item, ordered by id.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Item>, sqlx::Error> {
        sqlx::query_as::<_, Item>("SELECT id, title, image FROM items ORDER BY id")
            .fetch_all(pool)
            .await
    }

    /// Titles of the items a point accepts, ordered by item id.
    pub async fn titles_for_point(
        pool: &PgPool,
        point_id: DbId,
    ) -> Result<Vec<ItemTitle>, sqlx::Error> {
        sqlx::query_as::<_, ItemTitle>(
            "SELECT i.title \
             FROM items i \
             JOIN point_items pi ON pi.item_id = i.id \
             WHERE pi.point_id = $1 \
             ORDER BY i.id",
        )
        .bind(point_id)
        .fetch_all(pool)
        .await
    }

    /// Return the ids from `ids` that have no row in `items`, in input order.
    pub async fn find_missing(pool: &PgPool, ids: &[DbId]) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT t.id \
             FROM UNNEST($1::BIGINT[]) WITH ORDINALITY AS t(id, ord) \
             LEFT JOIN items i ON i.id = t.id \
             WHERE i.id IS NULL \
             ORDER BY t.ord",
        )
        .bind(ids)
        .fetch_all(pool)
        .await
    }
}
