//! Collection point models and DTOs.

use ecoleta_core::items::parse_item_filter;
use ecoleta_core::media::image_url;
use ecoleta_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::item::ItemTitle;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `points` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Point {
    pub id: DbId,
    pub image: String,
    pub name: String,
    pub email: String,
    pub whatsapp: String,
    pub latitude: f64,
    pub longitude: f64,
    pub city: String,
    pub uf: String,
}

/// A row from the `point_items` junction table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct PointItem {
    pub item_id: DbId,
    pub point_id: DbId,
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Validated payload for inserting a point. `image` is the stored upload name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPoint {
    pub name: String,
    pub email: String,
    pub whatsapp: String,
    pub latitude: f64,
    pub longitude: f64,
    pub city: String,
    pub uf: String,
    pub image: String,
}

/// Result of a successful registration: the new id, the submitted fields
/// and the associations that were inserted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedPoint {
    pub id: DbId,
    #[serde(flatten)]
    pub point: NewPoint,
    pub items: Vec<PointItem>,
}

/// Query parameters for `GET /points`.
#[derive(Debug, Clone, Default)]
pub struct PointListParams {
    pub city: Option<String>,
    pub uf: Option<String>,
    /// Comma-separated item ids.
    pub items: Option<String>,
}

/// A fully specified list filter. All three criteria must match.
#[derive(Debug, Clone, PartialEq)]
pub struct PointFilter {
    pub city: String,
    pub uf: String,
    pub item_ids: Vec<DbId>,
}

impl PointListParams {
    /// Collect parameters from decoded query pairs.
    ///
    /// A repeated key has its values joined with `,`, so `items=1&items=2`
    /// reads as `items=1,2` and `city=a&city=b` as `city=a,b`. Unknown keys
    /// are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "city" => &mut params.city,
                "uf" => &mut params.uf,
                "items" => &mut params.items,
                _ => continue,
            };
            match slot {
                Some(existing) => {
                    existing.push(',');
                    existing.push_str(&value);
                }
                None => *slot = Some(value),
            }
        }
        params
    }

    /// Turn raw query parameters into a filter.
    ///
    /// Returns `None` when a parameter is missing or no item id survives
    /// parsing; such a filter can never match a point.
    pub fn into_filter(self) -> Option<PointFilter> {
        let item_ids = parse_item_filter(self.items.as_deref()?);
        if item_ids.is_empty() {
            return None;
        }
        Some(PointFilter {
            city: self.city?,
            uf: self.uf?,
            item_ids,
        })
    }
}

// ---------------------------------------------------------------------------
// Response views
// ---------------------------------------------------------------------------

/// A point enriched with its public image URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointView {
    #[serde(flatten)]
    pub point: Point,
    pub image_url: String,
}

/// A point with its image URL and the titles of the items it accepts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointDetail {
    #[serde(flatten)]
    pub point: Point,
    pub image_url: String,
    pub items: Vec<ItemTitle>,
}

impl Point {
    pub fn into_view(self, base_url: &str) -> PointView {
        PointView {
            image_url: image_url(base_url, &self.image),
            point: self,
        }
    }

    pub fn into_detail(self, base_url: &str, items: Vec<ItemTitle>) -> PointDetail {
        PointDetail {
            image_url: image_url(base_url, &self.image),
            point: self,
            items,
        }
    }
}
