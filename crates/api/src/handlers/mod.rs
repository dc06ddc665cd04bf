pub mod analysis;
pub mod jobs;

use std::collections::BTreeMap;

use lexa_core::error::CoreError;
use validator::{Validate, ValidationErrors};

/// Message recorded against a required request field that is absent or empty.
pub const MISSING_FIELD: &str = "Missing required field";

/// Run derive-based validation, adding any failures to `fields`.
pub(crate) fn collect_field_errors<T: Validate>(input: &T, fields: &mut BTreeMap<String, String>) {
    if let Err(errors) = input.validate() {
        fields.extend(field_errors(&errors));
    }
}

/// `Ok` when no field failed, otherwise every failure at once.
pub(crate) fn fields_result(fields: BTreeMap<String, String>) -> Result<(), CoreError> {
    if fields.is_empty() {
        Ok(())
    } else {
        Err(CoreError::Fields(fields))
    }
}

/// Flatten validator output to one message per field.
pub(crate) fn field_errors(errors: &ValidationErrors) -> BTreeMap<String, String> {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let message = errs
                .first()
                .and_then(|e| e.message.as_ref().map(|m| m.to_string()))
                .unwrap_or_else(|| MISSING_FIELD.to_string());
            (field.to_string(), message)
        })
        .collect()
}
