//! Decoding and validation of the `POST /signup` multipart form.
//!
//! The form carries the point's text fields, a comma-separated `items`
//! list and an `image` file. Decoding is tolerant (unknown fields are
//! ignored, missing ones are left empty); validation then reports every
//! problem with the submitted values in a single message.

use axum::extract::Multipart;
use ecoleta_core::error::CoreError;
use ecoleta_core::items::parse_item_ids;
use ecoleta_core::types::DbId;
use ecoleta_db::models::point::NewPoint;
use validator::{Validate, ValidationErrors};

use crate::error::{AppError, AppResult};

/// A file received in the `image` field.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub filename: String,
    pub data: Vec<u8>,
}

/// Raw multipart fields as received.
#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub whatsapp: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub city: Option<String>,
    pub uf: Option<String>,
    pub items: Option<String>,
    pub image: Option<UploadedImage>,
}

/// Point fields after trimming and numeric parsing, checked with `validator`.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct PointFields {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 1, message = "whatsapp is required"))]
    pub whatsapp: String,
    #[validate(range(min = -90.0, max = 90.0, message = "latitude must be between -90 and 90"))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0, message = "longitude must be between -180 and 180"))]
    pub longitude: f64,
    #[validate(length(min = 1, message = "city is required"))]
    pub city: String,
    #[validate(length(equal = 2, message = "uf must be a two-letter state code"))]
    pub uf: String,
}

/// A fully validated registration, ready to be stored.
#[derive(Debug, Clone)]
pub struct Submission {
    pub fields: PointFields,
    pub item_ids: Vec<DbId>,
    pub image: UploadedImage,
}

impl SignupForm {
    /// Drain a multipart stream into a [`SignupForm`].
    pub async fn from_multipart(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = SignupForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?
        {
            let name = field.name().unwrap_or("").to_string();

            if name == "image" {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                // Browsers send an empty part when no file was chosen.
                if !data.is_empty() {
                    form.image = Some(UploadedImage {
                        filename,
                        data: data.to_vec(),
                    });
                }
                continue;
            }

            let slot = match name.as_str() {
                "name" => &mut form.name,
                "email" => &mut form.email,
                "whatsapp" => &mut form.whatsapp,
                "latitude" => &mut form.latitude,
                "longitude" => &mut form.longitude,
                "city" => &mut form.city,
                "uf" => &mut form.uf,
                "items" => &mut form.items,
                _ => continue,
            };
            let text = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            *slot = Some(text);
        }

        Ok(form)
    }

    /// Validate every field and produce a [`Submission`].
    ///
    /// The image is only checked for presence here; its format is checked
    /// by the handler against the file content.
    pub fn into_submission(self) -> Result<Submission, CoreError> {
        reject_nul_bytes(&[
            ("name", &self.name),
            ("email", &self.email),
            ("whatsapp", &self.whatsapp),
            ("city", &self.city),
            ("uf", &self.uf),
        ])?;

        let fields = PointFields {
            name: trimmed(self.name),
            email: trimmed(self.email),
            whatsapp: trimmed(self.whatsapp),
            latitude: parse_coordinate(self.latitude.as_deref(), "latitude")?,
            longitude: parse_coordinate(self.longitude.as_deref(), "longitude")?,
            city: trimmed(self.city),
            uf: trimmed(self.uf),
        };

        fields
            .validate()
            .map_err(|errors| CoreError::Validation(describe(&errors)))?;

        let item_ids = parse_item_ids(self.items.as_deref().unwrap_or(""))?;

        let image = self
            .image
            .ok_or_else(|| CoreError::Validation("image is required".to_string()))?;

        Ok(Submission {
            fields,
            item_ids,
            image,
        })
    }
}

impl PointFields {
    /// Attach the stored image name, producing the insert DTO.
    pub fn into_new_point(self, image: String) -> NewPoint {
        NewPoint {
            name: self.name,
            email: self.email,
            whatsapp: self.whatsapp,
            latitude: self.latitude,
            longitude: self.longitude,
            city: self.city,
            uf: self.uf,
            image,
        }
    }
}

/// Postgres text columns cannot hold NUL.
fn reject_nul_bytes(fields: &[(&str, &Option<String>)]) -> Result<(), CoreError> {
    match fields
        .iter()
        .find(|(_, value)| value.as_deref().is_some_and(|v| v.contains('\0')))
    {
        Some((name, _)) => Err(CoreError::Validation(format!(
            "{name} must not contain NUL characters"
        ))),
        None => Ok(()),
    }
}

fn trimmed(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

/// Parse a coordinate component. Absent or blank values default to `0`.
fn parse_coordinate(raw: Option<&str>, field: &str) -> Result<f64, CoreError> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(0.0),
        Some(raw) => raw,
    };

    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CoreError::Validation(format!("{field} must be a number")))
}

/// Flatten `validator` errors into a stable, human-readable message.
fn describe(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("{field} is invalid"),
            })
        })
        .collect();
    messages.sort();
    messages.join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> SignupForm {
        SignupForm {
            name: Some("Eco Shop".into()),
            email: Some("a@b.com".into()),
            whatsapp: Some("119999".into()),
            latitude: Some("-22.9".into()),
            longitude: Some("-43.2".into()),
            city: Some("Rio".into()),
            uf: Some("RJ".into()),
            items: Some("1,2".into()),
            image: Some(UploadedImage {
                filename: "photo.jpg".into(),
                data: vec![0xFF, 0xD8, 0xFF],
            }),
        }
    }

    #[test]
    fn valid_form_produces_submission() {
        let submission = valid_form().into_submission().unwrap();
        assert_eq!(submission.fields.name, "Eco Shop");
        assert_eq!(submission.fields.latitude, -22.9);
        assert_eq!(submission.item_ids, vec![1, 2]);
        assert_eq!(submission.image.filename, "photo.jpg");
    }

    #[test]
    fn text_fields_are_trimmed() {
        let form = SignupForm {
            name: Some("  Eco Shop ".into()),
            ..valid_form()
        };
        let submission = form.into_submission().unwrap();
        assert_eq!(submission.fields.name, "Eco Shop");
    }

    #[test]
    fn missing_coordinates_default_to_origin() {
        let form = SignupForm {
            latitude: None,
            longitude: Some(" ".into()),
            ..valid_form()
        };
        let submission = form.into_submission().unwrap();
        assert_eq!(submission.fields.latitude, 0.0);
        assert_eq!(submission.fields.longitude, 0.0);
    }

    #[test]
    fn non_numeric_coordinate_is_rejected() {
        let form = SignupForm {
            latitude: Some("north".into()),
            ..valid_form()
        };
        let err = form.into_submission().unwrap_err();
        assert_eq!(err.to_string(), "Validation failed: latitude must be a number");
    }

    #[test]
    fn non_finite_coordinate_is_rejected() {
        let form = SignupForm {
            longitude: Some("NaN".into()),
            ..valid_form()
        };
        assert!(form.into_submission().is_err());
    }

    #[test]
    fn out_of_range_coordinate_is_rejected() {
        let form = SignupForm {
            latitude: Some("91".into()),
            ..valid_form()
        };
        let err = form.into_submission().unwrap_err();
        assert!(err.to_string().contains("latitude must be between -90 and 90"));
    }

    #[test]
    fn all_field_problems_are_reported_together() {
        let form = SignupForm {
            name: Some("   ".into()),
            email: Some("not-an-email".into()),
            uf: Some("RJX".into()),
            ..valid_form()
        };
        let msg = form.into_submission().unwrap_err().to_string();
        assert!(msg.contains("name is required"));
        assert!(msg.contains("email must be a valid address"));
        assert!(msg.contains("uf must be a two-letter state code"));
    }

    #[test]
    fn nul_in_text_field_is_rejected() {
        let form = SignupForm {
            city: Some("Rio\0".into()),
            ..valid_form()
        };
        let err = form.into_submission().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation failed: city must not contain NUL characters"
        );
    }

    #[test]
    fn empty_items_are_rejected() {
        let form = SignupForm {
            items: None,
            ..valid_form()
        };
        let msg = form.into_submission().unwrap_err().to_string();
        assert!(msg.contains("At least one item must be selected"));
    }

    #[test]
    fn missing_image_is_rejected() {
        let form = SignupForm {
            image: None,
            ..valid_form()
        };
        let msg = form.into_submission().unwrap_err().to_string();
        assert!(msg.contains("image is required"));
    }

    #[test]
    fn new_point_takes_stored_image_name() {
        let submission = valid_form().into_submission().unwrap();
        let point = submission.fields.into_new_point("abc123-photo.jpg".into());
        assert_eq!(point.image, "abc123-photo.jpg");
        assert_eq!(point.uf, "RJ");
    }
}
