//! Brand reference data.

use crate::domain::BrandCode;

/// A brand offered under one or more programs.
///
/// Immutable once loaded; shared between programs and transactions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandInfo {
    pub code: BrandCode,
    pub name: String,
    /// Merchandising tier, lower is more basic.
    pub tier: u16,
    /// Fare-id table whose fares hard-pass this brand (S8 programs).
    pub primary_fare_id_table: Option<u64>,
    /// Fare-id table whose fares soft-pass this brand (S8 programs).
    pub secondary_fare_id_table: Option<u64>,
    /// Booking codes that hard-pass this brand (CBAS programs).
    pub primary_booking_codes: Vec<String>,
    /// Booking codes that soft-pass this brand (CBAS programs).
    pub secondary_booking_codes: Vec<String>,
    /// Fare basis codes never eligible for this brand.
    pub excluded_fare_basis: Vec<String>,
}

impl BrandInfo {
    pub fn new(code: BrandCode) -> Self {
        Self {
            name: code.as_str().to_string(),
            code,
            tier: 0,
            primary_fare_id_table: None,
            secondary_fare_id_table: None,
            primary_booking_codes: Vec::new(),
            secondary_booking_codes: Vec::new(),
            excluded_fare_basis: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn with_tier(mut self, tier: u16) -> Self {
        self.tier = tier;
        self
    }

    pub fn with_fare_id_tables(mut self, primary: Option<u64>, secondary: Option<u64>) -> Self {
        self.primary_fare_id_table = primary;
        self.secondary_fare_id_table = secondary;
        self
    }

    pub fn with_booking_codes(mut self, primary: &[&str], secondary: &[&str]) -> Self {
        self.primary_booking_codes = primary.iter().map(|s| s.to_string()).collect();
        self.secondary_booking_codes = secondary.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_excluded_fare_basis(mut self, excluded: &[&str]) -> Self {
        self.excluded_fare_basis = excluded.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn excludes_fare_basis(&self, fare_basis: &str) -> bool {
        self.excluded_fare_basis.iter().any(|b| b == fare_basis)
    }
}
