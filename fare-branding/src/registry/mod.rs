//! Branding reference data and the qualified brand registry.
//!
//! Programs and brands are loaded once per transaction and shared
//! read-only by every resolution pass. Markets refer to registry entries
//! by index.

mod brand;
mod program;
mod qualified;
mod response;

pub use brand::BrandInfo;
pub use program::{BrandProgram, DataSource};
pub use qualified::{BrandRegistry, QualifiedBrand, RegistryError, ensure_unique_programs};
pub use response::{BrandingData, InMemoryBrandingData, MarketResponse};
