//! Error type shared by the library, the REST layer and the binaries.
//!
//! Domain variants carry the exact message shown to the user; infrastructure
//! variants wrap the underlying crate error.

use crate::models::Role;

#[derive(Debug, thiserror::Error)]
pub enum StayError {
    #[error("Please select check-in and check-out dates")]
    MissingStayDates,
    #[error("Please fill in all required fields")]
    MissingPropertyFields,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("User with this email already exists")]
    DuplicateEmail,
    #[error("Please log in to access this page")]
    LoginRequired,
    #[error("Access denied: You need to be a {} to view this page", .0.display_name())]
    AccessDenied(Role),
    #[error("Hotel {0} not found")]
    HotelNotFound(u32),
    #[error("No hotel selected")]
    NoHotelSelected,
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Storage error: {0}")]
    Storage(#[from] sled::Error),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Password hashing error: {0}")]
    Hash(#[from] bcrypt::BcryptError),
    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = StayError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_denied_names_the_role_in_words() {
        let err = StayError::AccessDenied(Role::HotelOwner);
        assert_eq!(
            err.to_string(),
            "Access denied: You need to be a hotel owner to view this page"
        );
    }

    #[test]
    fn io_errors_convert_with_question_mark() {
        fn read_missing() -> Result<String> {
            let path = std::env::temp_dir().join("staylink-no-such-dir").join("missing.txt");
            Ok(std::fs::read_to_string(path)?)
        }
        assert!(matches!(read_missing(), Err(StayError::Io(_))));
    }
}
