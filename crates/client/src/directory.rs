//! REST client for the Ecoleta directory API.
//!
//! Wraps the endpoints the registration flow needs (item categories,
//! point search, point detail and the multipart signup) using [`reqwest`].

use ecoleta_core::items::join_item_ids;
use ecoleta_core::types::DbId;

use crate::error::ClientError;
use crate::form::RegistrationForm;
use crate::models::{Item, PointDetail, PointEnvelope, PointQuery, PointSummary, Registration};

/// Message the directory answers with when a point id is unknown.
pub const POINT_NOT_FOUND_MESSAGE: &str = "Point not found.";

/// HTTP client for one directory API instance.
pub struct DirectoryClient {
    client: reqwest::Client,
    base_url: String,
}

impl DirectoryClient {
    /// Create a client for the API at `base_url`, e.g. `http://localhost:3333`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /items`
    pub async fn list_items(&self) -> Result<Vec<Item>, ClientError> {
        let response = self
            .client
            .get(format!("{}/items", self.base_url))
            .send()
            .await?;

        parse_response(response).await
    }

    /// `GET /points?city=&uf=&items=`
    pub async fn list_points(&self, query: &PointQuery) -> Result<Vec<PointSummary>, ClientError> {
        let items = join_item_ids(&query.items);
        let response = self
            .client
            .get(format!("{}/points", self.base_url))
            .query(&[
                ("city", query.city.as_str()),
                ("uf", query.uf.as_str()),
                ("items", items.as_str()),
            ])
            .send()
            .await?;

        parse_response(response).await
    }

    /// `GET /points/{id}`
    ///
    /// The API reports an unknown id as a 400 with a fixed message; that
    /// case becomes [`ClientError::PointNotFound`].
    pub async fn show_point(&self, id: DbId) -> Result<PointDetail, ClientError> {
        let response = self
            .client
            .get(format!("{}/points/{}", self.base_url, id))
            .send()
            .await?;

        match parse_response::<PointEnvelope>(response).await {
            Ok(envelope) => Ok(envelope.point),
            Err(ClientError::Api { status: 400, message }) if message == POINT_NOT_FOUND_MESSAGE => {
                Err(ClientError::PointNotFound(id))
            }
            Err(e) => Err(e),
        }
    }

    /// Validate the form and submit it as `POST /signup`.
    ///
    /// Nothing is sent when the form is incomplete.
    pub async fn register(&self, form: RegistrationForm) -> Result<Registration, ClientError> {
        form.validate()?;
        let multipart = form.into_multipart()?;

        let response = self
            .client
            .post(format!("{}/signup", self.base_url))
            .multipart(multipart)
            .send()
            .await?;

        let registration: Registration = parse_response(response).await?;
        tracing::info!(
            point_id = registration.id,
            item_count = registration.items.len(),
            "Point registered",
        );
        Ok(registration)
    }
}

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

/// Return the response unchanged on a success status, otherwise a
/// [`ClientError::Api`] built from the body.
pub(crate) async fn ensure_success(
    response: reqwest::Response,
) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        return Err(ClientError::from_body(status.as_u16(), &body));
    }
    Ok(response)
}

/// Parse a successful JSON response body into the expected type.
pub(crate) async fn parse_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    let response = ensure_success(response).await?;
    Ok(response.json::<T>().await?)
}
