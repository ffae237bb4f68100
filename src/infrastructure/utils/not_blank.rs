use validator::ValidationError;

/// Custom validator for required text: whitespace-only counts as missing.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
