//! Input validation for logical keys, values and bucket names
//!
//! Every accessor runs these checks before touching the store, so a
//! malformed argument never opens a transaction.

use redlite_core::error::{Error, Result};
use redlite_core::keys::is_valid_logical_key;

/// Largest accepted logical key (64 KB)
pub const MAX_KEY_SIZE: usize = 64 * 1024;

/// Largest accepted value (64 MB)
pub const MAX_VALUE_SIZE: usize = 64 * 1024 * 1024;

/// Validates a logical key
///
/// - Rejects empty keys
/// - Rejects oversized keys (>64KB)
/// - Rejects the delimiter bytes `+`, `,`, `[` and `]`, which would let one
///   key's physical entries collide with another's
///
/// # Errors
///
/// Returns Error::InvalidArgument if validation fails
#[inline]
pub fn validate_key(key: &[u8]) -> Result<()> {
    if key.is_empty() {
        return Err(Error::InvalidArgument("Key cannot be empty".to_string()));
    }

    if key.len() > MAX_KEY_SIZE {
        return Err(Error::InvalidArgument(format!(
            "Key size {} exceeds maximum {}",
            key.len(),
            MAX_KEY_SIZE
        )));
    }

    if !is_valid_logical_key(key) {
        return Err(Error::InvalidArgument(
            "invalid key format includes +[],".to_string(),
        ));
    }

    Ok(())
}

/// Validates a value
///
/// # Errors
///
/// Returns Error::InvalidArgument if the value exceeds 64MB
#[inline]
pub fn validate_value(value: &[u8]) -> Result<()> {
    if value.len() > MAX_VALUE_SIZE {
        return Err(Error::InvalidArgument(format!(
            "Value size {} exceeds maximum {}",
            value.len(),
            MAX_VALUE_SIZE
        )));
    }

    Ok(())
}

/// Validates a bucket name
///
/// # Errors
///
/// Returns Error::InvalidArgument if the name is empty or longer than 256 bytes
#[inline]
pub fn validate_bucket_name(name: &[u8]) -> Result<()> {
    const MAX_BUCKET_NAME_LENGTH: usize = 256;

    if name.is_empty() {
        return Err(Error::InvalidArgument(
            "Bucket name cannot be empty".to_string(),
        ));
    }

    if name.len() > MAX_BUCKET_NAME_LENGTH {
        return Err(Error::InvalidArgument(format!(
            "Bucket name length {} exceeds maximum {}",
            name.len(),
            MAX_BUCKET_NAME_LENGTH
        )));
    }

    Ok(())
}
