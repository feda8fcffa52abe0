//! Unified error type for setting up the storefront.
//!
//! Store operations themselves never fail; errors only surface while opening
//! storage, reading configuration, or preparing a checkout payload.

use thiserror::Error;

use gallery_core::PriceError;

use crate::config::ConfigError;
use crate::persistence::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Storage backend could not be opened.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// A price could not be converted for checkout.
    #[error("Price error: {0}")]
    Price(#[from] PriceError),

    /// Checkout was requested for an empty cart.
    #[error("Cart is empty")]
    EmptyCart,
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::EmptyCart;
        assert_eq!(err.to_string(), "Cart is empty");

        let err = AppError::from(StorageError::InvalidKey("../x".to_string()));
        assert_eq!(err.to_string(), "Storage error: invalid storage key: ../x");

        let err = AppError::from(PriceError::UnknownCurrency("XYZ".to_string()));
        assert_eq!(err.to_string(), "Price error: unknown currency code: XYZ");
    }
}
