//! Error conversion glue between the form, service and validator layers.

use validator::ValidationErrors;

use crate::forms::categories::CategoryFormError;
use crate::forms::posts::PostFormError;
use crate::forms::tags::TagFormError;
use crate::services::{FieldErrors, Rejection};

impl From<ValidationErrors> for FieldErrors {
    fn from(value: ValidationErrors) -> Self {
        let mut fields = FieldErrors::new();
        for (field, errors) in value.field_errors() {
            for error in errors.iter() {
                let message = error
                    .message
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| error.code.to_string());
                fields.insert(field.to_string(), message);
            }
        }
        fields
    }
}

impl From<CategoryFormError> for Rejection {
    fn from(val: CategoryFormError) -> Self {
        let CategoryFormError::TypeConstraint(fields) = val;
        Rejection::validation(fields)
    }
}

impl From<PostFormError> for Rejection {
    fn from(val: PostFormError) -> Self {
        match val {
            PostFormError::Validation(fields) | PostFormError::TypeConstraint(fields) => {
                Rejection::validation(fields)
            }
        }
    }
}

impl From<TagFormError> for Rejection {
    fn from(val: TagFormError) -> Self {
        let TagFormError::TypeConstraint(fields) = val;
        Rejection::validation(fields)
    }
}
