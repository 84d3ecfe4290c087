//! Item (recyclable material category) models.

use ecoleta_core::media::image_url;
use ecoleta_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `items` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Item {
    pub id: DbId,
    pub title: String,
    pub image: String,
}

/// Title-only projection used in point detail responses.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct ItemTitle {
    pub title: String,
}

/// An item as listed by `GET /items`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemView {
    pub id: DbId,
    pub title: String,
    pub image_url: String,
}

impl Item {
    pub fn into_view(self, base_url: &str) -> ItemView {
        ItemView {
            image_url: image_url(base_url, &self.image),
            id: self.id,
            title: self.title,
        }
    }
}
