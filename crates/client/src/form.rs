//! Registration form state.
//!
//! Mirrors what a user fills in: contact details, a state and city picked
//! from the geography catalog, a map position, a set of item categories and
//! a photo. Selecting a different state clears the city, since the city
//! list has to be reloaded for the new state.

use std::path::Path;

use ecoleta_core::items::join_item_ids;
use ecoleta_core::media::{content_type_for, file_extension, SUPPORTED_IMAGE_EXTENSIONS};
use ecoleta_core::types::{Coordinates, DbId};
use reqwest::multipart::{Form, Part};

use crate::error::ClientError;

/// A photo attached to the form.
#[derive(Debug, Clone, PartialEq)]
pub struct Photo {
    pub file_name: String,
    pub data: Vec<u8>,
}

impl Photo {
    pub fn new(file_name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            data,
        }
    }

    /// Read a photo from disk, keeping only the file name part of `path`.
    pub async fn from_path(path: &Path) -> Result<Self, ClientError> {
        let data = tokio::fs::read(path).await.map_err(|source| ClientError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "photo".to_string());
        Ok(Self::new(file_name, data))
    }

    pub fn content_type(&self) -> &'static str {
        file_extension(&self.file_name)
            .map(|ext| content_type_for(&ext))
            .unwrap_or("application/octet-stream")
    }
}

/// Free-text inputs of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Name,
    Email,
    Whatsapp,
}

#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    name: String,
    email: String,
    whatsapp: String,
    uf: Option<String>,
    city: Option<String>,
    position: Coordinates,
    items: Vec<DbId>,
    photo: Option<Photo>,
}

impl RegistrationForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_text(&mut self, field: TextField, value: impl Into<String>) {
        let value = value.into();
        match field {
            TextField::Name => self.name = value,
            TextField::Email => self.email = value,
            TextField::Whatsapp => self.whatsapp = value,
        }
    }

    /// Select a state. Returns `true` when the selection changed, in which
    /// case the previously selected city has been cleared.
    pub fn select_uf(&mut self, uf: impl Into<String>) -> bool {
        let uf = uf.into();
        if self.uf.as_deref() == Some(uf.as_str()) {
            return false;
        }
        self.uf = Some(uf);
        self.city = None;
        true
    }

    pub fn select_city(&mut self, city: impl Into<String>) {
        self.city = Some(city.into());
    }

    /// Place the marker, as a click on the map would.
    pub fn pick_location(&mut self, latitude: f64, longitude: f64) {
        self.position = Coordinates::new(latitude, longitude);
    }

    /// Toggle membership of an item. Returns whether it is now selected.
    pub fn toggle_item(&mut self, id: DbId) -> bool {
        if let Some(index) = self.items.iter().position(|&item| item == id) {
            self.items.remove(index);
            false
        } else {
            self.items.push(id);
            true
        }
    }

    pub fn is_selected(&self, id: DbId) -> bool {
        self.items.contains(&id)
    }

    pub fn selected_items(&self) -> &[DbId] {
        &self.items
    }

    pub fn uf(&self) -> Option<&str> {
        self.uf.as_deref()
    }

    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    pub fn position(&self) -> Coordinates {
        self.position
    }

    pub fn attach_photo(&mut self, photo: Photo) {
        self.photo = Some(photo);
    }

    /// Check that everything the server needs is present.
    ///
    /// All problems are reported at once, separated by `; `.
    pub fn validate(&self) -> Result<(), ClientError> {
        let mut problems = Vec::new();

        if self.name.trim().is_empty() {
            problems.push("name is required".to_string());
        }
        if self.email.trim().is_empty() {
            problems.push("email is required".to_string());
        }
        if self.whatsapp.trim().is_empty() {
            problems.push("whatsapp is required".to_string());
        }
        if self.uf.is_none() {
            problems.push("select a state".to_string());
        }
        if self.city.is_none() {
            problems.push("select a city".to_string());
        }
        if !self.position.is_valid() {
            problems.push("location is outside valid coordinates".to_string());
        }
        if self.items.is_empty() {
            problems.push("select at least one item".to_string());
        }
        match &self.photo {
            None => problems.push("attach a photo".to_string()),
            Some(photo) => {
                let supported = file_extension(&photo.file_name)
                    .is_some_and(|ext| SUPPORTED_IMAGE_EXTENSIONS.contains(&ext.as_str()));
                if !supported {
                    problems.push(format!(
                        "photo '{}' must be a .jpg, .jpeg, .png or .webp file",
                        photo.file_name
                    ));
                }
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ClientError::InvalidForm(problems.join("; ")))
        }
    }

    /// The text parts of the multipart body, in submission order.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("name", self.name.clone()),
            ("email", self.email.clone()),
            ("whatsapp", self.whatsapp.clone()),
            ("uf", self.uf.clone().unwrap_or_default()),
            ("city", self.city.clone().unwrap_or_default()),
            ("latitude", self.position.latitude.to_string()),
            ("longitude", self.position.longitude.to_string()),
            ("items", join_item_ids(&self.items)),
        ]
    }

    /// Build the multipart body, with the photo (if any) in the `image` part.
    pub fn into_multipart(self) -> Result<Form, ClientError> {
        let mut form = self
            .fields()
            .into_iter()
            .fold(Form::new(), |form, (name, value)| form.text(name, value));

        if let Some(photo) = self.photo {
            let content_type = photo.content_type();
            let part = Part::bytes(photo.data)
                .file_name(photo.file_name)
                .mime_str(content_type)?;
            form = form.part("image", part);
        }

        Ok(form)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn complete_form() -> RegistrationForm {
        let mut form = RegistrationForm::new();
        form.set_text(TextField::Name, "Eco Shop");
        form.set_text(TextField::Email, "a@b.com");
        form.set_text(TextField::Whatsapp, "119999");
        form.select_uf("RJ");
        form.select_city("Rio de Janeiro");
        form.pick_location(-22.9, -43.2);
        form.toggle_item(1);
        form.toggle_item(2);
        form.attach_photo(Photo::new("photo.jpg", vec![0xFF, 0xD8, 0xFF]));
        form
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut form = RegistrationForm::new();
        assert!(form.toggle_item(3));
        assert!(form.toggle_item(1));
        assert!(form.is_selected(3));
        assert!(!form.toggle_item(3));
        assert!(!form.is_selected(3));
        assert_eq!(form.selected_items(), &[1]);
    }

    #[test]
    fn toggle_keeps_selection_order() {
        let mut form = RegistrationForm::new();
        for id in [5, 2, 9] {
            form.toggle_item(id);
        }
        form.toggle_item(2);
        form.toggle_item(2);
        assert_eq!(form.selected_items(), &[5, 9, 2]);
    }

    #[test]
    fn changing_state_clears_city() {
        let mut form = RegistrationForm::new();
        form.select_uf("RJ");
        form.select_city("Niterói");

        assert!(!form.select_uf("RJ"));
        assert_eq!(form.city(), Some("Niterói"));

        assert!(form.select_uf("SP"));
        assert_eq!(form.uf(), Some("SP"));
        assert_eq!(form.city(), None);
    }

    #[test]
    fn position_starts_at_origin() {
        let form = RegistrationForm::new();
        assert_eq!(form.position(), Coordinates::new(0.0, 0.0));
    }

    #[test]
    fn complete_form_validates() {
        complete_form().validate().unwrap();
    }

    #[test]
    fn empty_form_lists_every_problem() {
        let err = RegistrationForm::new().validate().unwrap_err();
        assert_matches!(err, ClientError::InvalidForm(ref msg) if {
            msg.contains("name is required")
                && msg.contains("select a state")
                && msg.contains("select a city")
                && msg.contains("select at least one item")
                && msg.contains("attach a photo")
        });
    }

    #[test]
    fn unsupported_photo_is_rejected() {
        let mut form = complete_form();
        form.attach_photo(Photo::new("clip.gif", vec![1, 2, 3]));
        let err = form.validate().unwrap_err();
        assert!(err.to_string().contains("photo 'clip.gif'"));
    }

    #[test]
    fn deselecting_last_item_invalidates() {
        let mut form = complete_form();
        form.toggle_item(1);
        form.toggle_item(2);
        assert!(form.validate().is_err());
    }

    #[test]
    fn fields_follow_submission_order() {
        let fields = complete_form().fields();
        let names: Vec<_> = fields.iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            vec!["name", "email", "whatsapp", "uf", "city", "latitude", "longitude", "items"]
        );
        assert_eq!(fields[3].1, "RJ");
        assert_eq!(fields[5].1, "-22.9");
        assert_eq!(fields[7].1, "1,2");
    }

    #[test]
    fn photo_content_type_from_extension() {
        assert_eq!(Photo::new("a.PNG", vec![]).content_type(), "image/png");
        assert_eq!(Photo::new("a.jpeg", vec![]).content_type(), "image/jpeg");
        assert_eq!(
            Photo::new("noext", vec![]).content_type(),
            "application/octet-stream"
        );
    }

    #[tokio::test]
    async fn photo_is_read_from_disk() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("shop.png");
        tokio::fs::write(&path, b"png-bytes").await.unwrap();

        let photo = Photo::from_path(&path).await.unwrap();
        assert_eq!(photo.file_name, "shop.png");
        assert_eq!(photo.data, b"png-bytes");
    }

    #[tokio::test]
    async fn missing_photo_file_is_an_io_error() {
        let err = Photo::from_path(Path::new("/definitely/not/here.png"))
            .await
            .unwrap_err();
        assert_matches!(err, ClientError::Io { .. });
    }
}
