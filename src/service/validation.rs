//! Required-field validation driven by the entity descriptors.

use crate::error::AppError;
use crate::model::{EntityDescriptor, Record};

pub struct RequestValidator;

impl RequestValidator {
    /// Every required column must be non-null. Reports the first offending property.
    pub fn validate(record: &Record, entity: &EntityDescriptor) -> Result<(), AppError> {
        for c in entity.columns.iter().filter(|c| c.required) {
            if record.is_null(c.name) {
                return Err(AppError::bad_request(
                    entity.entity_name,
                    "required",
                    format!("{} must not be null", c.property),
                ));
            }
        }
        Ok(())
    }
}
