//! Brand programs.

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::{GlobalDirection, LocCode, ProgramId};

use super::BrandInfo;

/// Where a program's branding rules were published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataSource {
    /// ATPCO Record S8 branded fares.
    S8,
    /// Carrier-based availability service.
    Cbas,
}

impl DataSource {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "S8" | "ATP" => Some(DataSource::S8),
            "CBAS" | "C" => Some(DataSource::Cbas),
            _ => None,
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::S8 => f.write_str("S8"),
            DataSource::Cbas => f.write_str("CBAS"),
        }
    }
}

/// A set of eligibility rules under which brands are offered.
///
/// Program data is read-only for the life of a transaction. Directional
/// data derived per market lives in a pass-local cache instead, see
/// [`crate::selector::DirectionCache`].
#[derive(Debug, Clone)]
pub struct BrandProgram {
    pub id: ProgramId,
    pub vendor: String,
    pub program_code: String,
    pub program_name: String,
    pub sequence_no: u32,
    pub global_direction: GlobalDirection,
    /// Origin the program is filed from; `None` means both directions.
    pub origin_loc: Option<LocCode>,
    pub data_source: DataSource,
    pub brands: Vec<Arc<BrandInfo>>,
    pub effective_date: Option<NaiveDate>,
    pub discontinue_date: Option<NaiveDate>,
}

impl BrandProgram {
    pub fn new(id: ProgramId, data_source: DataSource) -> Self {
        Self {
            program_code: id.as_str().to_string(),
            program_name: id.as_str().to_string(),
            id,
            vendor: "ATP".to_string(),
            sequence_no: 0,
            global_direction: GlobalDirection::NoDir,
            origin_loc: None,
            data_source,
            brands: Vec::new(),
            effective_date: None,
            discontinue_date: None,
        }
    }

    pub fn with_vendor(mut self, vendor: &str) -> Self {
        self.vendor = vendor.to_string();
        self
    }

    pub fn with_program_name(mut self, name: &str) -> Self {
        self.program_name = name.to_string();
        self
    }

    pub fn with_sequence_no(mut self, sequence_no: u32) -> Self {
        self.sequence_no = sequence_no;
        self
    }

    pub fn with_global_direction(mut self, global_direction: GlobalDirection) -> Self {
        self.global_direction = global_direction;
        self
    }

    pub fn with_origin_loc(mut self, origin: LocCode) -> Self {
        self.origin_loc = Some(origin);
        self
    }

    pub fn with_brand(mut self, brand: Arc<BrandInfo>) -> Self {
        self.brands.push(brand);
        self
    }

    pub fn with_validity(mut self, effective: Option<NaiveDate>, discontinue: Option<NaiveDate>) -> Self {
        self.effective_date = effective;
        self.discontinue_date = discontinue;
        self
    }

    /// Whether the program is in effect on `date`. Open bounds always match.
    pub fn is_effective_on(&self, date: NaiveDate) -> bool {
        self.effective_date.is_none_or(|start| date >= start)
            && self.discontinue_date.is_none_or(|end| date <= end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parse_data_source() {
        assert_eq!(DataSource::parse("S8"), Some(DataSource::S8));
        assert_eq!(DataSource::parse("CBAS"), Some(DataSource::Cbas));
        assert_eq!(DataSource::parse("XYZ"), None);
        assert_eq!(DataSource::Cbas.to_string(), "CBAS");
    }

    #[test]
    fn open_validity_always_effective() {
        let program = BrandProgram::new(ProgramId::new("P1"), DataSource::S8);
        assert!(program.is_effective_on(date(2024, 1, 1)));
    }

    #[test]
    fn validity_window_is_inclusive() {
        let program = BrandProgram::new(ProgramId::new("P1"), DataSource::S8)
            .with_validity(Some(date(2024, 3, 1)), Some(date(2024, 3, 31)));
        assert!(!program.is_effective_on(date(2024, 2, 29)));
        assert!(program.is_effective_on(date(2024, 3, 1)));
        assert!(program.is_effective_on(date(2024, 3, 31)));
        assert!(!program.is_effective_on(date(2024, 4, 1)));
    }
}
