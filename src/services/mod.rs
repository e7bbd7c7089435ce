//! Services Layer
//!
//! Business logic extracted from HTTP handlers. Services validate input,
//! open transactions for multi-row writes, and return API DTOs.

pub mod hotel_image_service;
pub mod hotel_service;
pub mod proposal_service;
pub mod receipt_service;
pub mod reference_service;

pub use reference_service::{next_proposal_number, next_receipt_number};

/// Trim an optional text field, treating blank input as absent
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Unicode-aware case-insensitive substring test; `needle` must already be lowercase
pub(crate) fn contains_ignoring_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
