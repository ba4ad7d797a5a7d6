//! Brand validation strategies.
//!
//! Each program is validated by the strategy matching the source its rules
//! were published in. The walker asks a [`ValidatorFactory`] for the
//! strategy and never looks at the data source itself.

mod cbas;
mod s8;

pub use cbas::CbasValidator;
pub use s8::{FareIdTables, S8Validator};

use crate::domain::{BrandStatus, FareCandidate};
use crate::registry::{BrandInfo, BrandProgram, DataSource};

/// Decides whether a fare qualifies for one brand of one program.
pub trait BrandValidator: Send + Sync {
    /// Validate `fare` against `brand` under `program`.
    ///
    /// With `skip_hard_pass_only` set, a hard pass is already established
    /// for the fare in this direction: the validator only checks whether the
    /// fare would also hard-pass and reports `Fail` otherwise.
    fn validate(
        &self,
        fare: &FareCandidate,
        program: &BrandProgram,
        brand: &BrandInfo,
        skip_hard_pass_only: bool,
    ) -> BrandStatus;
}

/// Chooses the validation strategy for a data source.
pub trait ValidatorFactory: Send + Sync {
    fn validator_for(&self, source: DataSource) -> &dyn BrandValidator;
}

/// The two built-in strategies.
#[derive(Debug, Clone, Default)]
pub struct StandardValidators {
    pub s8: S8Validator,
    pub cbas: CbasValidator,
}

impl StandardValidators {
    pub fn new(fare_id_tables: FareIdTables) -> Self {
        Self {
            s8: S8Validator::new(fare_id_tables),
            cbas: CbasValidator,
        }
    }
}

impl ValidatorFactory for StandardValidators {
    fn validator_for(&self, source: DataSource) -> &dyn BrandValidator {
        match source {
            DataSource::S8 => &self.s8,
            DataSource::Cbas => &self.cbas,
        }
    }
}

/// Whether the program is in effect on the fare's travel date.
///
/// Markets without a travel date accept every program.
fn in_effect(fare: &FareCandidate, program: &BrandProgram) -> bool {
    fare.market()
        .travel_date
        .is_none_or(|date| program.is_effective_on(date))
}

/// Grade a fare given whether it matched the brand's primary and secondary
/// qualifiers. The secondary qualifier is only consulted when soft passes
/// are still of interest.
fn grade(
    primary: bool,
    skip_hard_pass_only: bool,
    secondary: impl FnOnce() -> bool,
) -> BrandStatus {
    if primary {
        BrandStatus::HardPass
    } else if !skip_hard_pass_only && secondary() {
        BrandStatus::SoftPass
    } else {
        BrandStatus::Fail
    }
}
