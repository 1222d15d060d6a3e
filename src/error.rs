//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the crate.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// A schema rule violation. Carries the head line plus the full
    /// type/field report produced by the validation engine.
    /// We ignore this for `From<String>` to avoid conflict with General.
    #[from(ignore)]
    #[display("Validation Error: {_0}")]
    Validation(String),

    /// Generator configuration errors (e.g. an unparseable hostname).
    #[from(ignore)]
    #[display("Config Error: {_0}")]
    Config(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_conversion() {
        // Test that String defaults to General, not Validation
        let msg = String::from("something wrong");
        let app_err: AppError = msg.into();
        match app_err {
            AppError::General(s) => assert_eq!(s, "something wrong"),
            _ => panic!("String should convert to AppError::General"),
        }
    }

    #[test]
    fn test_validation_manual_creation() {
        // Validation errors must be created explicitly
        let app_err = AppError::Validation("type Test\n\tfield".into());
        assert_eq!(
            format!("{}", app_err),
            "Validation Error: type Test\n\tfield"
        );
    }

    #[test]
    fn test_config_manual_creation() {
        let app_err = AppError::Config("bad hostname".into());
        assert_eq!(format!("{}", app_err), "Config Error: bad hostname");
    }
}
