#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// `id` is the key as it was requested, which may not be a valid id.
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),
}
