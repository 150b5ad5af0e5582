//! Fixtures
//!
//! YAML product catalogs. A fixture set lives at `<base>/products/<name>.yml`; the default set
//! is also compiled into the crate so the binary works from any directory.

use std::{
    fs,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::debug;

use crate::{
    catalog::{Catalog, CatalogError, Collection},
    fixtures::products::CatalogFixture,
    products::Product,
};

pub mod products;

/// The bundled default catalog.
pub const DEFAULT_CATALOG: &str = include_str!("../../fixtures/products/default.yml");

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price {price:?} for product {id}: {reason}")]
    InvalidPrice {
        /// Product identifier
        id: String,

        /// Price as written
        price: String,

        /// Why it was rejected
        reason: String,
    },

    /// Invalid product data
    #[error("Invalid product {id}: {reason}")]
    InvalidProduct {
        /// Product identifier
        id: String,

        /// Why it was rejected
        reason: String,
    },

    /// Catalog rejected a product
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Catalog built from the loaded files
    catalog: Catalog,
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            catalog: Catalog::new(),
        }
    }

    /// Load a fixture set by name from the base path
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or a product is invalid.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();
        fixture.load_products(name)?;

        Ok(fixture)
    }

    /// Load a single catalog file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or a product is invalid.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let path = path.as_ref();
        let mut fixture = Self::with_base_path(path.parent().unwrap_or(Path::new(".")));
        fixture.load_file(path)?;

        Ok(fixture)
    }

    /// Load products and collections from `<base>/products/<name>.yml`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or a product is invalid.
    pub fn load_products(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("products").join(format!("{name}.yml"));

        self.load_file(&file_path)
    }

    /// Load products and collections from a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or a product is invalid.
    pub fn load_file(&mut self, path: &Path) -> Result<&mut Self, FixtureError> {
        let contents = fs::read_to_string(path)?;

        debug!(path = %path.display(), "loading catalog fixture");

        self.load_yaml(&contents)
    }

    /// Load products and collections from YAML text
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML cannot be parsed, a product is invalid, or a product
    /// identifier is already loaded.
    pub fn load_yaml(&mut self, yaml: &str) -> Result<&mut Self, FixtureError> {
        let fixture: CatalogFixture = serde_norway::from_str(yaml)?;

        for product_fixture in fixture.products {
            let product: Product = product_fixture.try_into()?;

            self.catalog.insert(product)?;
        }

        for collection in fixture.collections {
            self.catalog.add_collection(Collection::from(collection));
        }

        Ok(self)
    }

    /// The catalog built so far
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Take the catalog
    pub fn into_catalog(self) -> Catalog {
        self.catalog
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a catalog from YAML text.
///
/// # Errors
///
/// Returns an error if the YAML cannot be parsed, a product is invalid, or an identifier is
/// repeated.
pub fn parse_catalog(yaml: &str) -> Result<Catalog, FixtureError> {
    let mut fixture = Fixture::new();
    fixture.load_yaml(yaml)?;

    Ok(fixture.into_catalog())
}

/// The bundled default catalog.
///
/// # Errors
///
/// Returns an error if the bundled YAML is invalid.
pub fn default_catalog() -> Result<Catalog, FixtureError> {
    parse_catalog(DEFAULT_CATALOG)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use testresult::TestResult;

    use crate::{catalog::CatalogQuery, products::Category};

    use super::*;

    #[test]
    fn default_catalog_loads() -> TestResult {
        let catalog = default_catalog()?;

        assert_eq!(catalog.len(), 12);
        assert_eq!(catalog.collections().len(), 4);
        assert!(catalog.collection("wedding").is_some());
        assert_eq!(
            catalog.get("royal-takchita").map(|product| product.category),
            Some(Category::Takchita)
        );

        Ok(())
    }

    #[test]
    fn fixture_from_set_reads_the_products_directory() -> TestResult {
        let fixture = Fixture::from_set("default")?;

        assert_eq!(fixture.catalog().len(), default_catalog()?.len());

        Ok(())
    }

    #[test]
    fn fixture_from_path_reads_a_single_file() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("small.yml");

        fs::write(
            &path,
            r#"
products:
  - id: plain-gandoura
    name: Plain Gandoura
    price: "60"
    category: gandoura
"#,
        )?;

        let catalog = Fixture::from_path(&path)?.into_catalog();

        assert_eq!(catalog.len(), 1);
        assert!(catalog.collections().is_empty());
        assert_eq!(catalog.browse(&CatalogQuery::new()).len(), 1);

        Ok(())
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = Fixture::with_base_path("./does-not-exist").load_products("default").map(|_| ());

        assert!(matches!(result, Err(FixtureError::Io(_))));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let yaml = r#"
products:
  - { id: twin, name: One, price: "10", category: caftan }
  - { id: twin, name: Two, price: "20", category: caftan }
"#;

        assert!(matches!(
            parse_catalog(yaml),
            Err(FixtureError::Catalog(CatalogError::DuplicateProduct(_)))
        ));
    }

    #[test]
    fn invalid_yaml_is_a_yaml_error() {
        assert!(matches!(
            parse_catalog("products: [unterminated"),
            Err(FixtureError::Yaml(_))
        ));
    }
}
