use std::collections::BTreeMap;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// Request fields that are missing or malformed, keyed by field name.
    #[error("Invalid request field(s): {}", field_names(.0))]
    Fields(BTreeMap<String, String>),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

fn field_names(fields: &BTreeMap<String, String>) -> String {
    fields.keys().cloned().collect::<Vec<_>>().join(", ")
}
