//! Validation of ATPCO Record S8 branded fares.

use std::collections::HashMap;

use tracing::trace;

use crate::domain::{BrandStatus, FareCandidate};
use crate::registry::{BrandInfo, BrandProgram};

use super::{BrandValidator, grade, in_effect};

/// Fare-id tables keyed by table item number.
///
/// Each table lists fare class patterns. A pattern ending in `*` matches
/// every fare class with that prefix; any other pattern must match exactly.
#[derive(Debug, Clone, Default)]
pub struct FareIdTables {
    tables: HashMap<u64, Vec<String>>,
}

impl FareIdTables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, item_no: u64, patterns: Vec<String>) {
        self.tables.insert(item_no, patterns);
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Whether `fare_class` is listed in table `item_no`. Unknown tables
    /// match nothing.
    pub fn matches(&self, item_no: u64, fare_class: &str) -> bool {
        self.tables
            .get(&item_no)
            .is_some_and(|patterns| patterns.iter().any(|p| pattern_matches(p, fare_class)))
    }
}

fn pattern_matches(pattern: &str, fare_class: &str) -> bool {
    match pattern.strip_suffix('*') {
        Some(prefix) => fare_class.starts_with(prefix),
        None => pattern == fare_class,
    }
}

/// Qualifies fares by the brand's primary and secondary fare-id tables.
#[derive(Debug, Clone, Default)]
pub struct S8Validator {
    tables: FareIdTables,
}

impl S8Validator {
    pub fn new(tables: FareIdTables) -> Self {
        Self { tables }
    }

    fn in_table(&self, table: Option<u64>, fare: &FareCandidate) -> bool {
        table.is_some_and(|item| self.tables.matches(item, &fare.fare_class))
    }
}

impl BrandValidator for S8Validator {
    fn validate(
        &self,
        fare: &FareCandidate,
        program: &BrandProgram,
        brand: &BrandInfo,
        skip_hard_pass_only: bool,
    ) -> BrandStatus {
        if !in_effect(fare, program) {
            trace!(program = %program.id, "S8 program not in effect");
            return BrandStatus::Fail;
        }
        grade(
            self.in_table(brand.primary_fare_id_table, fare),
            skip_hard_pass_only,
            || self.in_table(brand.secondary_fare_id_table, fare),
        )
    }
}
