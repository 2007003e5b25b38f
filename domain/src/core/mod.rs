//! Core domain concepts shared across all subdomains.
//!
//! - [`error::CatalogError`]: catalog validation errors

pub mod error;
