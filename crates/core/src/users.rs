//! Profile and settings rules.

use crate::error::CoreError;

/// Longest nickname (in characters) a user may register.
pub const MAX_NICKNAME_CHARS: u64 = 50;

/// Search modes a user may prefer in the mobile client.
pub const SEARCH_TYPES: &[&str] = &["name", "ingredient", "image"];

/// Search mode assigned to freshly registered users.
pub const DEFAULT_SEARCH_TYPE: &str = "name";

/// Check whether a preferred search type is one the client understands.
pub fn is_valid_search_type(search_type: &str) -> bool {
    SEARCH_TYPES.contains(&search_type)
}

/// Reject unknown search types with a validation error.
pub fn validate_search_type(search_type: &str) -> Result<(), CoreError> {
    if is_valid_search_type(search_type) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "preferred_search_type must be one of: {}",
            SEARCH_TYPES.join(", ")
        )))
    }
}
