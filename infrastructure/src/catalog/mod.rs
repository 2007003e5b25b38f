//! Survey catalog loading
//!
//! The catalog is read once at startup, either from the bundled default or
//! from a TOML file, and validated into an immutable
//! [`SurveyCatalog`](aftersale_domain::SurveyCatalog).

mod loader;

pub use loader::{BUNDLED_CATALOG, CatalogLoadError, CatalogLoader};
