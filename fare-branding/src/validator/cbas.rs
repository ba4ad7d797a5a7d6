//! Validation of carrier-based branded fares.

use tracing::trace;

use crate::domain::{BrandStatus, FareCandidate};
use crate::registry::{BrandInfo, BrandProgram};

use super::{BrandValidator, grade, in_effect};

/// Qualifies fares by booking code, after excluding listed fare bases.
#[derive(Debug, Clone, Copy, Default)]
pub struct CbasValidator;

fn listed(codes: &[String], booking_code: &str) -> bool {
    codes.iter().any(|c| c == booking_code)
}

impl BrandValidator for CbasValidator {
    fn validate(
        &self,
        fare: &FareCandidate,
        program: &BrandProgram,
        brand: &BrandInfo,
        skip_hard_pass_only: bool,
    ) -> BrandStatus {
        if !in_effect(fare, program) {
            trace!(program = %program.id, "CBAS program not in effect");
            return BrandStatus::Fail;
        }
        if brand.excludes_fare_basis(&fare.fare_basis) {
            trace!(brand = %brand.code, fare_basis = %fare.fare_basis, "fare basis excluded");
            return BrandStatus::Fail;
        }
        grade(
            listed(&brand.primary_booking_codes, &fare.booking_code),
            skip_hard_pass_only,
            || listed(&brand.secondary_booking_codes, &fare.booking_code),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::domain::{BrandCode, CarrierCode, LegId, LocCode, ProgramId, TravelMarket, TravelSegment};
    use crate::registry::DataSource;

    fn fare(fare_basis: &str, booking_code: &str) -> FareCandidate {
        let loc = |s| LocCode::parse(s).unwrap();
        let market = TravelMarket::new(
            vec![TravelSegment::air(loc("AKL"), loc("ZQN"), LegId(0))],
            CarrierCode::parse("NZ").unwrap(),
        )
        .unwrap();
        FareCandidate::new(1, CarrierCode::parse("NZ").unwrap(), fare_basis, Arc::new(market))
            .with_fare_basis(fare_basis)
            .with_booking_code(booking_code)
    }

    fn brand() -> BrandInfo {
        BrandInfo::new(BrandCode::parse("SEAT").unwrap())
            .with_booking_codes(&["Q", "V"], &["T"])
            .with_excluded_fare_basis(&["QPROMO"])
    }

    fn program() -> BrandProgram {
        BrandProgram::new(ProgramId::new("NZ1"), DataSource::Cbas)
    }

    #[test]
    fn booking_code_tiers() {
        let v = CbasValidator;
        assert_eq!(v.validate(&fare("QSAVER", "Q"), &program(), &brand(), false), BrandStatus::HardPass);
        assert_eq!(v.validate(&fare("TSAVER", "T"), &program(), &brand(), false), BrandStatus::SoftPass);
        assert_eq!(v.validate(&fare("TSAVER", "T"), &program(), &brand(), true), BrandStatus::Fail);
        assert_eq!(v.validate(&fare("YFLEX", "Y"), &program(), &brand(), false), BrandStatus::Fail);
    }

    #[test]
    fn excluded_fare_basis_fails_even_with_primary_code() {
        let v = CbasValidator;
        assert_eq!(v.validate(&fare("QPROMO", "Q"), &program(), &brand(), false), BrandStatus::Fail);
    }
}
