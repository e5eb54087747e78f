//! Utility functions

pub mod slug;
pub mod validation;

pub use slug::{slugify, stored_file_name};
pub use validation::{non_blank, parse_social_networks, sanitize_string, validate_username};
