use uuid::Uuid;

use crate::errors::AppError;

/// Parses a path or claim id, rejecting anything that is not a UUID.
pub fn valid_uuid(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id.trim()).map_err(|_| AppError::InvalidInput("Invalid UUID format".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_uuid_and_rejects_garbage() {
        let id = Uuid::new_v4();
        assert_eq!(valid_uuid(&id.to_string()).unwrap(), id);
        assert!(matches!(valid_uuid("42"), Err(AppError::InvalidInput(_))));
    }
}
