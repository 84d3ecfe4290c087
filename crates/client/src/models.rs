//! Response types of the directory API as seen by the client.

use ecoleta_core::types::DbId;
use serde::{Deserialize, Serialize};

/// An item category from `GET /items`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: DbId,
    pub title: String,
    pub image_url: String,
}

/// A point from `GET /points`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointSummary {
    pub id: DbId,
    pub image: String,
    pub image_url: String,
    pub name: String,
    pub email: String,
    pub whatsapp: String,
    pub latitude: f64,
    pub longitude: f64,
    pub city: String,
    pub uf: String,
}

/// Title of an item accepted by a point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemTitle {
    pub title: String,
}

/// A point from `GET /points/{id}`, with the titles of its items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointDetail {
    #[serde(flatten)]
    pub point: PointSummary,
    pub items: Vec<ItemTitle>,
}

/// The `{ "point": ... }` envelope of the detail endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct PointEnvelope {
    pub point: PointDetail,
}

/// One association created by a registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredItem {
    pub item_id: DbId,
    pub point_id: DbId,
}

/// The response of `POST /signup`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Registration {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub whatsapp: String,
    pub latitude: f64,
    pub longitude: f64,
    pub city: String,
    pub uf: String,
    pub image: String,
    pub items: Vec<RegisteredItem>,
}

/// Filter for `GET /points`.
#[derive(Debug, Clone, PartialEq)]
pub struct PointQuery {
    pub city: String,
    pub uf: String,
    pub items: Vec<DbId>,
}
