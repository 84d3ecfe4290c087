//! Image handling shared by the server and the client: supported formats,
//! stored upload names and the public `image_url` derivation.

use image::ImageFormat;
use rand::Rng;

use crate::error::CoreError;

/// Extensions accepted for point photos.
pub const SUPPORTED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// Number of random bytes prefixed (hex encoded) to stored upload names.
const UPLOAD_PREFIX_BYTES: usize = 6;

/// Build the public URL of a stored image.
///
/// The base is expected to already end with `/` (see [`normalize_base_url`]);
/// the filename is appended verbatim.
///
/// ```
/// use ecoleta_core::media::image_url;
///
/// assert_eq!(
///     image_url("http://localhost:3333/uploads/", "photo.jpg"),
///     "http://localhost:3333/uploads/photo.jpg",
/// );
/// ```
pub fn image_url(base_url: &str, filename: &str) -> String {
    format!("{base_url}{filename}")
}

/// Ensure a base URL ends with exactly one trailing slash.
pub fn normalize_base_url(url: &str) -> String {
    format!("{}/", url.trim_end_matches('/'))
}

/// Lowercased extension of a filename, if it has one.
pub fn file_extension(filename: &str) -> Option<String> {
    let (stem, ext) = filename.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Check an uploaded photo by name and content.
///
/// The extension must be one of [`SUPPORTED_IMAGE_EXTENSIONS`] and the
/// leading bytes must be recognised as the format that extension names, so
/// the file is later served with the right content type. Returns the
/// lowercased extension.
pub fn validate_image_upload(filename: &str, data: &[u8]) -> Result<String, CoreError> {
    let ext = file_extension(filename).ok_or_else(|| {
        CoreError::Validation(format!("Image '{filename}' has no file extension"))
    })?;

    if !SUPPORTED_IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        return Err(CoreError::Validation(format!(
            "Unsupported image format '.{ext}'. Supported: .jpg, .jpeg, .png, .webp"
        )));
    }

    let detected = match image::guess_format(data) {
        Ok(format @ (ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::WebP)) => format,
        _ => {
            return Err(CoreError::Validation(format!(
                "File '{filename}' is not a valid image"
            )))
        }
    };

    if ImageFormat::from_extension(&ext) != Some(detected) {
        return Err(CoreError::Validation(format!(
            "Content of '{filename}' does not match its '.{ext}' extension"
        )));
    }

    Ok(ext)
}

/// Generate the name an upload is stored under: a random hex prefix followed
/// by the sanitised original name, e.g. `3fa2b9c01d4e-my_photo.jpg`.
pub fn upload_filename(original: &str) -> String {
    let mut bytes = [0u8; UPLOAD_PREFIX_BYTES];
    rand::rng().fill(&mut bytes);
    let prefix: String = bytes.iter().map(|b| format!("{b:02x}")).collect();

    format!("{prefix}-{}", sanitize_filename(original))
}

/// Strip any directory components and replace characters outside
/// `[A-Za-z0-9._-]` with `_`.
pub fn sanitize_filename(original: &str) -> String {
    let base = original
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or(original);

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.trim_matches('.').is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

/// MIME type for a supported image extension.
pub fn content_type_for(ext: &str) -> &'static str {
    match ext {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}
