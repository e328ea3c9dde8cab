//! Custom `validator` functions shared by request DTOs.
//!
//! ```ignore
//! #[derive(Deserialize, Validate)]
//! struct NewUser {
//!     #[validate(custom(function = "axum_helpers::validation::not_blank"))]
//!     name: String,
//! }
//! ```

use validator::ValidationError;

/// Rejects empty and whitespace-only strings.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("must not be blank".into());
        return Err(error);
    }
    Ok(())
}
