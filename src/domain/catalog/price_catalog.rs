//! Immutable package-to-price mapping.

use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;

/// Errors raised by catalog construction and lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// No package with this identifier exists.
    #[error("Package not found: {0}")]
    NotFound(String),

    /// The same package identifier was supplied twice at construction.
    #[error("Duplicate package: {0}")]
    DuplicatePackage(String),
}

/// A purchasable offering with its authoritative price (IDR, no decimals).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Package {
    pub package_id: String,
    pub amount: i64,
}

impl Package {
    pub fn new(package_id: impl Into<String>, amount: i64) -> Self {
        Self {
            package_id: package_id.into(),
            amount,
        }
    }

    /// Zero-priced packages (trials) never go through the gateway.
    pub fn is_payable(&self) -> bool {
        self.amount > 0
    }
}

/// Read-only price catalog, loaded once at startup.
///
/// Lookups are exact: identifiers are matched byte-for-byte, including the
/// en dash in `Bundle Termin 1–2`.
#[derive(Debug, Clone)]
pub struct PriceCatalog {
    packages: Vec<Package>,
    index: HashMap<String, usize>,
}

impl PriceCatalog {
    /// Builds a catalog from entries, preserving their order for listing.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicatePackage` if an identifier repeats.
    pub fn from_entries(
        entries: impl IntoIterator<Item = Package>,
    ) -> Result<Self, CatalogError> {
        let mut packages = Vec::new();
        let mut index = HashMap::new();

        for package in entries {
            if index.contains_key(&package.package_id) {
                return Err(CatalogError::DuplicatePackage(package.package_id));
            }
            index.insert(package.package_id.clone(), packages.len());
            packages.push(package);
        }

        Ok(Self { packages, index })
    }

    /// Returns the authoritative amount for a package.
    pub fn lookup(&self, package_id: &str) -> Result<i64, CatalogError> {
        self.get(package_id)
            .map(|p| p.amount)
            .ok_or_else(|| CatalogError::NotFound(package_id.to_string()))
    }

    /// Returns the full package entry, if present.
    pub fn get(&self, package_id: &str) -> Option<&Package> {
        self.index.get(package_id).map(|&i| &self.packages[i])
    }

    /// All packages in catalog order.
    pub fn packages(&self) -> &[Package] {
        &self.packages
    }
}

impl Default for PriceCatalog {
    /// The packages offered on the landing page.
    fn default() -> Self {
        let packages = vec![
            Package::new("Free Trial", 0),
            Package::new("Muqarrar Termin 1", 90_000),
            Package::new("Bundle Termin 1–2", 150_000),
        ];
        let index = packages
            .iter()
            .enumerate()
            .map(|(i, p)| (p.package_id.clone(), i))
            .collect();
        Self { packages, index }
    }
}
