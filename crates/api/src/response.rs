//! Response envelope types for API handlers.

use serde::Serialize;

/// `{ "point": T }` envelope returned by the point detail endpoint.
#[derive(Debug, Serialize)]
pub struct PointResponse<T: Serialize> {
    pub point: T,
}
