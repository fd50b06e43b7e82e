//! Static business data: profile and product catalog.
//!
//! Both are built once at startup and shared read-only (`Arc`) for the
//! lifetime of the process.

pub mod catalog;
pub mod profile;

pub use catalog::{Catalog, ProductEntry, ProductKey};
pub use profile::BusinessProfile;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ProfileError;

/// Profile and catalog as loaded from a JSON file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessData {
    pub profile: BusinessProfile,
    pub catalog: Catalog,
}

impl BusinessData {
    /// Built-in packaging business data.
    pub fn packaging() -> Self {
        let catalog = Catalog::packaging();
        Self {
            profile: BusinessProfile::packaging(&catalog),
            catalog,
        }
    }

    /// Load business data from a JSON file.
    ///
    /// An empty `minimum_order_quantities` is filled in from the catalog.
    pub fn load(path: &Path) -> Result<Self, ProfileError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ProfileError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let mut data: Self = serde_json::from_str(&raw).map_err(|source| ProfileError::Parse {
            path: path.display().to_string(),
            source,
        })?;

        if data.profile.minimum_order_quantities.is_empty() {
            data.profile.minimum_order_quantities = data.catalog.moq_summary();
        }

        tracing::info!(
            path = %path.display(),
            business = %data.profile.name,
            products = data.catalog.len(),
            "Loaded business profile"
        );
        Ok(data)
    }
}
