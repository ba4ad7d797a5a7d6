//! Fare candidates and their per-brand eligibility.

use std::sync::Arc;

use super::{BrandCode, CarrierCode, Direction, FareDirectionality, GlobalDirection, ProgramId, TravelMarket};

/// Outcome of validating a fare against one brand.
///
/// Ordered so that a better status compares greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum BrandStatus {
    #[default]
    Fail,
    /// Provisional pass, pending validation elsewhere.
    SoftPass,
    HardPass,
}

impl BrandStatus {
    pub fn is_pass(self) -> bool {
        self != BrandStatus::Fail
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BrandStatus::Fail => "FAIL",
            BrandStatus::SoftPass => "SOFT_PASS",
            BrandStatus::HardPass => "HARD_PASS",
        }
    }
}

/// Eligibility of a fare for one qualified brand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BrandEligibility {
    pub status: BrandStatus,
    /// Direction of the program the status was established for.
    pub direction: Direction,
}

impl BrandEligibility {
    pub fn new(status: BrandStatus, direction: Direction) -> Self {
        Self { status, direction }
    }

    /// The initial value of every slot: fail, both ways.
    pub fn failed() -> Self {
        Self::default()
    }
}

/// Brand matched for a fare in fare display mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayBrandMatch {
    pub program_id: ProgramId,
    pub brand_code: BrandCode,
    pub status: BrandStatus,
}

/// Maps a registry index to the brand code registered there.
pub trait BrandLookup {
    fn brand_code(&self, index: usize) -> Option<&BrandCode>;
}

/// A priced fare whose brand eligibility is being resolved.
#[derive(Debug, Clone)]
pub struct FareCandidate {
    pub id: u64,
    pub carrier: CarrierCode,
    pub fare_class: String,
    pub fare_basis: String,
    pub booking_code: String,
    pub directionality: FareDirectionality,
    pub global_direction: GlobalDirection,
    market: Arc<TravelMarket>,
    /// Parallel to `market.brand_program_indices`.
    pub brand_status: Vec<BrandEligibility>,
    pub display_brands: Vec<DisplayBrandMatch>,
    /// Aggregate result of the last resolution pass.
    pub valid_for_branding: bool,
}

impl FareCandidate {
    /// Create a fare quoted on `market` with a blank eligibility vector.
    ///
    /// The fare starts with its market's global direction.
    pub fn new(id: u64, carrier: CarrierCode, fare_class: &str, market: Arc<TravelMarket>) -> Self {
        let global_direction = market.global_direction;
        Self {
            id,
            carrier,
            fare_class: fare_class.to_string(),
            fare_basis: fare_class.to_string(),
            booking_code: fare_class.chars().next().map(String::from).unwrap_or_default(),
            directionality: FareDirectionality::Both,
            global_direction,
            market,
            brand_status: Vec::new(),
            display_brands: Vec::new(),
            valid_for_branding: false,
        }
    }

    pub fn with_directionality(mut self, directionality: FareDirectionality) -> Self {
        self.directionality = directionality;
        self
    }

    pub fn with_global_direction(mut self, global_direction: GlobalDirection) -> Self {
        self.global_direction = global_direction;
        self
    }

    pub fn with_fare_basis(mut self, fare_basis: &str) -> Self {
        self.fare_basis = fare_basis.to_string();
        self
    }

    pub fn with_booking_code(mut self, booking_code: &str) -> Self {
        self.booking_code = booking_code.to_string();
        self
    }

    pub fn market(&self) -> &TravelMarket {
        &self.market
    }

    pub fn market_arc(&self) -> &Arc<TravelMarket> {
        &self.market
    }

    /// Registry indices of the brands applicable to this fare.
    pub fn brand_program_indices(&self) -> &[usize] {
        &self.market.brand_program_indices
    }

    /// Direction this fare applies in, derived from its directionality.
    pub fn direction(&self) -> Direction {
        self.directionality.as_direction()
    }

    /// Reset the eligibility vector to all-fail, one slot per applicable brand.
    pub fn reset_brand_status(&mut self) {
        let len = self.market.brand_program_indices.len();
        self.brand_status.clear();
        self.brand_status.resize(len, BrandEligibility::failed());
    }

    pub fn is_direction_consistent(&self, program_direction: Direction) -> bool {
        self.direction().is_consistent_with(program_direction)
    }

    fn slot_applies(&self, slot: &BrandEligibility, use_directionality: bool) -> bool {
        !use_directionality || self.is_direction_consistent(slot.direction)
    }

    /// Whether any slot passed (hard or soft).
    pub fn has_valid_brands(&self) -> bool {
        self.brand_status.iter().any(|s| s.status.is_pass())
    }

    /// Best status over all brands, ignoring direction-inconsistent slots
    /// when directionality is in use.
    pub fn best_status_in_any_brand(&self, use_directionality: bool) -> BrandStatus {
        self.brand_status
            .iter()
            .filter(|slot| self.slot_applies(slot, use_directionality))
            .map(|slot| slot.status)
            .max()
            .unwrap_or(BrandStatus::Fail)
    }

    /// Status of the first slot registered for `brand_code`.
    pub fn brand_status_for(
        &self,
        lookup: &impl BrandLookup,
        brand_code: &BrandCode,
        use_directionality: bool,
    ) -> BrandStatus {
        for (slot, &index) in self.brand_status.iter().zip(self.brand_program_indices()) {
            if lookup.brand_code(index) != Some(brand_code) {
                continue;
            }
            if self.slot_applies(slot, use_directionality) {
                return slot.status;
            }
        }
        BrandStatus::Fail
    }

    pub fn is_valid_for_brand(
        &self,
        lookup: &impl BrandLookup,
        brand_code: &BrandCode,
        hard_passed_only: bool,
        use_directionality: bool,
    ) -> bool {
        match self.brand_status_for(lookup, brand_code, use_directionality) {
            BrandStatus::Fail => false,
            BrandStatus::SoftPass => !hard_passed_only,
            BrandStatus::HardPass => true,
        }
    }

    /// An empty request accepts every fare.
    pub fn is_valid_for_requested_brands(
        &self,
        lookup: &impl BrandLookup,
        requested: &[BrandCode],
        hard_passed_only: bool,
        use_directionality: bool,
    ) -> bool {
        requested.is_empty()
            || requested
                .iter()
                .any(|code| self.is_valid_for_brand(lookup, code, hard_passed_only, use_directionality))
    }

    /// Registry indices of the brands this fare is valid for.
    pub fn valid_brand_indices(&self, hard_passed_only: bool, use_directionality: bool) -> Vec<usize> {
        self.brand_status
            .iter()
            .zip(self.brand_program_indices())
            .filter(|(slot, _)| match slot.status {
                BrandStatus::Fail => false,
                BrandStatus::SoftPass => !hard_passed_only,
                BrandStatus::HardPass => true,
            })
            .filter(|(slot, _)| self.slot_applies(slot, use_directionality))
            .map(|(_, &index)| index)
            .collect()
    }

    /// Registry index of a passing slot for `brand_code`.
    ///
    /// The same brand may be offered by two programs in opposite directions.
    /// For a fare valid both ways, a concrete `fare_usage_direction` picks the
    /// program consistent with how the fare is used.
    pub fn valid_brand_index(
        &self,
        lookup: &impl BrandLookup,
        brand_code: &BrandCode,
        fare_usage_direction: Direction,
        use_directionality: bool,
    ) -> Option<usize> {
        let check_usage = use_directionality
            && fare_usage_direction != Direction::Bothways
            && self.direction() == Direction::Bothways;

        self.brand_status
            .iter()
            .zip(self.brand_program_indices())
            .filter(|(slot, _)| slot.status.is_pass())
            .filter(|(slot, _)| self.slot_applies(slot, use_directionality))
            .filter(|(slot, _)| {
                !check_usage
                    || slot.direction == Direction::Bothways
                    || slot.direction == fare_usage_direction
            })
            .map(|(_, &index)| index)
            .find(|&index| lookup.brand_code(index) == Some(brand_code))
    }
}
