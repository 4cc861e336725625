//! Address validation and shortening

use crate::error::{DelegacyError, DelegacyResult};

/// Hex digits kept on each side when shortening an address for tables
const TRUNCATE_KEEP: usize = 4;

/// Validation utilities for addresses
pub struct ValidationUtils;

impl ValidationUtils {
    /// Split `0x`-prefixed hex into its digits, if it is one
    fn hex_digits(address: &str) -> Option<&str> {
        let digits = address.strip_prefix("0x")?;
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        Some(digits)
    }

    /// Check that an address is `0x` followed by hex digits
    pub fn is_hex_address(address: &str) -> bool {
        Self::hex_digits(address).is_some()
    }

    /// Validate address format, used for configured program addresses
    pub fn validate_hex_address(address: &str, field_name: &str) -> DelegacyResult<()> {
        if address.is_empty() {
            return Err(DelegacyError::validation(format!(
                "{} cannot be empty",
                field_name
            )));
        }

        if address.len() > 66 {
            return Err(DelegacyError::validation(format!(
                "{} too long: {} chars (max 66)",
                field_name,
                address.len()
            )));
        }

        if !Self::is_hex_address(address) {
            return Err(DelegacyError::validation(format!(
                "{} must be 0x-prefixed hex, got {}",
                field_name, address
            )));
        }

        Ok(())
    }
}

/// Shortens an address to `0x1234…cdef`.
///
/// Only `0x` followed by at least eight hex digits is shortened; anything
/// else is returned unchanged.
pub fn truncate_address(address: &str) -> String {
    match ValidationUtils::hex_digits(address) {
        Some(digits) if digits.len() >= 2 * TRUNCATE_KEEP => format!(
            "0x{}…{}",
            &digits[..TRUNCATE_KEEP],
            &digits[digits.len() - TRUNCATE_KEEP..]
        ),
        _ => address.to_string(),
    }
}

/// Label for the connected account, e.g. `0x1234...bcdef`
pub fn short_account(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 11 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 5..].iter().collect();
    format!("{}...{}", head, tail)
}
