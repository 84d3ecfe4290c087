#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use ecoleta_api::config::ServerConfig;
use ecoleta_api::router::build_app_router;
use ecoleta_api::state::AppState;
use ecoleta_api::uploads::UploadStore;

/// Public uploads URL used by every test app.
pub const UPLOADS_URL: &str = "http://test.local/uploads/";

/// Multipart boundary used by [`MultipartBody`].
const BOUNDARY: &str = "ecoleta-test-boundary";

/// Smallest byte sequence recognised as a PNG.
pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR\0\0\0\x01\0\0\0\x01";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(uploads_dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        uploads_dir: uploads_dir.to_path_buf(),
        public_uploads_url: UPLOADS_URL.to_string(),
        max_upload_bytes: 1024 * 1024,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool and uploads directory.
pub fn build_test_app(pool: PgPool, uploads_dir: &Path) -> Router {
    let config = test_config(uploads_dir);
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        uploads: Arc::new(UploadStore::new(uploads_dir)),
    };
    build_app_router(state, &config)
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_multipart(app: Router, uri: &str, body: MultipartBody) -> Response<Body> {
    let request = Request::post(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body.finish()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Hand-rolled `multipart/form-data` body builder.
#[derive(Default)]
pub struct MultipartBody {
    buf: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.buf.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, filename: &str, content_type: &str, data: &[u8]) -> Self {
        self.buf.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; \
                 filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        self.buf.extend_from_slice(data);
        self.buf.extend_from_slice(b"\r\n");
        self
    }

    fn finish(mut self) -> Vec<u8> {
        self.buf
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        self.buf
    }
}

/// Text fields of the registration used throughout the tests: "Eco Shop"
/// in Rio/RJ accepting items 1 and 2.
pub fn eco_shop_fields() -> Vec<(&'static str, &'static str)> {
    vec![
        ("name", "Eco Shop"),
        ("email", "a@b.com"),
        ("whatsapp", "119999"),
        ("latitude", "-22.9068"),
        ("longitude", "-43.1729"),
        ("city", "Rio"),
        ("uf", "RJ"),
        ("items", "1,2"),
    ]
}

/// Replace (or add) one text field of a field list.
pub fn with_field(
    mut fields: Vec<(&'static str, &'static str)>,
    name: &'static str,
    value: &'static str,
) -> Vec<(&'static str, &'static str)> {
    fields.retain(|(n, _)| *n != name);
    fields.push((name, value));
    fields
}

/// A multipart body with the given text fields and no file.
pub fn text_form(fields: &[(&str, &str)]) -> MultipartBody {
    fields
        .iter()
        .fold(MultipartBody::new(), |body, (name, value)| body.text(name, value))
}

/// The full "Eco Shop" registration, including a PNG photo.
pub fn eco_shop_form() -> MultipartBody {
    text_form(&eco_shop_fields()).file("image", "photo.png", "image/png", PNG_BYTES)
}
