//! Per-fare brand eligibility walk.
//!
//! The walker visits every qualified brand applicable to a fare's market,
//! runs it through the filter pipeline and records the outcome in the
//! fare's eligibility vector. It returns whether the fare is usable.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, error, trace};

use crate::diagnostics::{DiagnosticsSink, NotFound};
use crate::domain::{
    BrandEligibility, BrandStatus, DisplayBrandMatch, Direction, FareCandidate, GlobalDirection,
    ProgramId,
};
use crate::registry::{BrandInfo, BrandProgram, BrandRegistry};
use crate::validator::ValidatorFactory;

use super::config::{EvaluationContext, TransactionKind};
use super::context::TransactionContext;
use super::directionality::{DirectionCache, DirectionResolution, DirectionalityResolver};

/// Whether a program's global direction admits a fare's.
///
/// A program without a direction admits every fare, and the `ZZ` wildcard
/// on either side admits everything. An unpublished program direction
/// admits nothing.
pub fn global_direction_matches(program: GlobalDirection, fare: GlobalDirection) -> bool {
    if program == GlobalDirection::Unpublished {
        return false;
    }
    program == GlobalDirection::NoDir
        || program.is_wildcard()
        || fare.is_wildcard()
        || program == fare
}

/// Mutable state of one fare's walk.
#[derive(Debug, Default)]
struct WalkState {
    programs_direction: HashMap<ProgramId, DirectionResolution>,
    hard_pass_original: bool,
    hard_pass_reversed: bool,
    any_soft_pass: bool,
}

impl WalkState {
    /// Whether a hard pass already covers `direction`.
    fn hard_pass_known(&self, direction: Direction, use_directionality: bool) -> bool {
        if !use_directionality {
            return self.hard_pass_original || self.hard_pass_reversed;
        }
        match direction {
            Direction::Original => self.hard_pass_original,
            Direction::Reversed => self.hard_pass_reversed,
            Direction::Bothways => self.hard_pass_original && self.hard_pass_reversed,
        }
    }

    fn record(&mut self, status: BrandStatus, direction: Direction) {
        match status {
            BrandStatus::HardPass => match direction {
                Direction::Original => self.hard_pass_original = true,
                Direction::Reversed => self.hard_pass_reversed = true,
                Direction::Bothways => {
                    self.hard_pass_original = true;
                    self.hard_pass_reversed = true;
                }
            },
            BrandStatus::SoftPass => self.any_soft_pass = true,
            BrandStatus::Fail => {}
        }
    }

    fn hard_passed_both_ways(&self) -> bool {
        self.hard_pass_original && self.hard_pass_reversed
    }

    fn hard_passed_any_way(&self) -> bool {
        self.hard_pass_original || self.hard_pass_reversed
    }
}

/// What the pipeline did with one (program, brand) entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Entry {
    /// Not evaluated.
    Skipped,
    /// Rejected by a filter or by the validator.
    Failed,
    /// The validator passed the fare.
    Passed(BrandStatus),
}

/// Walks the qualified brands of one fare.
pub struct SingleFareBrandWalker<'a, V> {
    registry: &'a BrandRegistry,
    ctx: &'a EvaluationContext,
    validators: &'a V,
    sink: &'a dyn DiagnosticsSink,
    directionality: DirectionalityResolver,
}

impl<'a, V: ValidatorFactory> SingleFareBrandWalker<'a, V> {
    pub fn new(
        registry: &'a BrandRegistry,
        ctx: &'a EvaluationContext,
        validators: &'a V,
        sink: &'a dyn DiagnosticsSink,
    ) -> Self {
        Self {
            registry,
            ctx,
            validators,
            sink,
            directionality: DirectionalityResolver::new(ctx.flags.use_directionality),
        }
    }

    pub fn from_context(tx: &'a TransactionContext<V>) -> Self {
        Self::new(&tx.registry, &tx.evaluation, &tx.validators, tx.sink())
    }

    /// Resolve the eligibility of `fare` for every brand of its market.
    ///
    /// The eligibility vector is reset first, so walking a fare twice gives
    /// the same result. Returns whether the fare is usable.
    pub fn walk(&self, fare: &mut FareCandidate, cache: &mut DirectionCache) -> bool {
        fare.reset_brand_status();
        let mut slots = std::mem::take(&mut fare.brand_status);
        let usable = self.walk_slots(fare, &mut slots, cache);
        fare.brand_status = slots;
        usable
    }

    fn walk_slots(
        &self,
        fare: &FareCandidate,
        slots: &mut [BrandEligibility],
        cache: &mut DirectionCache,
    ) -> bool {
        let mut state = WalkState::default();

        for (slot, &index) in slots.iter_mut().zip(fare.brand_program_indices()) {
            let Some(qualified) = self.registry.get(index) else {
                error!(
                    fare = fare.id,
                    index,
                    registry_len = self.registry.len(),
                    "brand program index out of range, abandoning fare"
                );
                return self.aggregate(&state);
            };

            let entry = self.evaluate(fare, &qualified.program, &qualified.brand, slot, &mut state, cache);
            let Entry::Passed(status) = entry else {
                continue;
            };

            if self.ctx.flags.soft_pass_disabled && state.hard_passed_both_ways() {
                debug!(fare = fare.id, "hard pass found in both directions");
                return true;
            }
            if !self.ctx.evaluates_all_brands() && self.ctx.kind != TransactionKind::Pricing {
                trace!(fare = fare.id, status = status.as_str(), "first usable brand suffices");
                return true;
            }
        }

        self.aggregate(&state)
    }

    /// Resolve a fare against the programs filed for its display market.
    ///
    /// Matches are appended to `fare.display_brands`. Stops at the first
    /// hard pass unless the transaction evaluates every brand.
    pub fn walk_programs(
        &self,
        fare: &mut FareCandidate,
        programs: &[Arc<BrandProgram>],
        cache: &mut DirectionCache,
    ) -> bool {
        let mut state = WalkState::default();
        let mut matches = Vec::new();
        let mut stopped = false;

        'programs: for program in programs {
            if program.brands.is_empty() {
                self.sink.not_found(NotFound::Brands(program.id.clone()));
                continue;
            }
            for brand in &program.brands {
                let mut slot = BrandEligibility::failed();
                let entry = self.evaluate(fare, program, brand, &mut slot, &mut state, cache);
                let Entry::Passed(status) = entry else {
                    continue;
                };
                matches.push(DisplayBrandMatch {
                    program_id: program.id.clone(),
                    brand_code: brand.code.clone(),
                    status,
                });
                if status == BrandStatus::HardPass && !self.ctx.kind.is_shopping() {
                    stopped = true;
                    break 'programs;
                }
            }
        }

        fare.display_brands.extend(matches);
        stopped || self.aggregate(&state)
    }

    fn aggregate(&self, state: &WalkState) -> bool {
        if state.hard_passed_any_way() {
            true
        } else if self.ctx.accepts_soft_pass() {
            state.any_soft_pass
        } else {
            false
        }
    }

    /// Run one (program, brand) entry through the pipeline, bracketed by
    /// diagnostic notifications.
    fn evaluate(
        &self,
        fare: &FareCandidate,
        program: &BrandProgram,
        brand: &BrandInfo,
        slot: &mut BrandEligibility,
        state: &mut WalkState,
        cache: &mut DirectionCache,
    ) -> Entry {
        self.sink.program_entered(program);
        self.sink.brand_entered(brand);
        let entry = self.pipeline(fare, program, brand, slot, state, cache);
        self.sink.brand_exited(brand, slot.status);
        self.sink.program_exited(program);
        entry
    }

    fn pipeline(
        &self,
        fare: &FareCandidate,
        program: &BrandProgram,
        brand: &BrandInfo,
        slot: &mut BrandEligibility,
        state: &mut WalkState,
        cache: &mut DirectionCache,
    ) -> Entry {
        let ctx = self.ctx;
        let flags = &ctx.flags;
        let market = fare.market();

        let foreign_brand = market.is_exchange()
            && market.exchange_original_brand.as_ref() != Some(&brand.code);
        if foreign_brand && !ctx.exchange.allows_brand_change() {
            trace!(brand = %brand.code, "brand differs from exchanged brand");
            return Entry::Skipped;
        }

        if !ctx.scope.is_for_vendor(&program.vendor)
            || !ctx.scope.is_for_program_name(&program.program_name)
        {
            trace!(program = %program.id, "program outside diagnostic scope");
            return Entry::Skipped;
        }

        if program.brands.is_empty() {
            trace!(program = %program.id, "program has no brands");
            return Entry::Skipped;
        }

        if !ctx.scope.is_for_brand_id(&brand.code) {
            slot.status = BrandStatus::Fail;
            return Entry::Failed;
        }

        if !global_direction_matches(program.global_direction, fare.global_direction) {
            debug!(
                program = %program.id,
                program_dir = %program.global_direction,
                fare_dir = %fare.global_direction,
                "global direction mismatch"
            );
            self.sink.global_direction_failed(program, fare);
            slot.status = BrandStatus::Fail;
            return Entry::Failed;
        }

        let direction = if flags.calculate_program_direction {
            let resolution = *state
                .programs_direction
                .entry(program.id.clone())
                .or_insert_with(|| self.directionality.resolve(program, market, cache));
            if !resolution.computed {
                trace!(program = %program.id, "program direction undetermined");
                return Entry::Skipped;
            }
            resolution.direction
        } else {
            Direction::Bothways
        };
        slot.direction = direction;

        if flags.check_directionality
            && !self
                .directionality
                .is_consistent(fare, program, direction, ctx.kind.is_shopping())
        {
            debug!(
                program = %program.id,
                program_direction = %direction,
                fare_dir = %fare.directionality,
                "directionality mismatch"
            );
            self.sink.directionality_failed(program, fare, direction);
            slot.status = BrandStatus::Fail;
            return Entry::Failed;
        }

        let hard_pass_known = state.hard_pass_known(direction, flags.use_directionality);
        if hard_pass_known && flags.soft_pass_disabled {
            trace!(program = %program.id, brand = %brand.code, "hard pass already known");
            return Entry::Skipped;
        }

        let status = self
            .validators
            .validator_for(program.data_source)
            .validate(fare, program, brand, hard_pass_known);
        if status == BrandStatus::Fail {
            return Entry::Failed;
        }

        *slot = BrandEligibility::new(status, direction);
        state.record(status, direction);
        Entry::Passed(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_direction_rules() {
        use GlobalDirection::*;

        assert!(global_direction_matches(NoDir, EH));
        assert!(!global_direction_matches(Unpublished, EH));
        assert!(!global_direction_matches(Unpublished, ZZ));
        assert!(global_direction_matches(ZZ, EH));
        assert!(global_direction_matches(AT, ZZ));
        assert!(global_direction_matches(AT, AT));
        assert!(!global_direction_matches(AT, EH));
        assert!(!global_direction_matches(AT, NoDir));
    }

    #[test]
    fn hard_pass_tracking() {
        let mut state = WalkState::default();
        assert!(!state.hard_pass_known(Direction::Original, true));

        state.record(BrandStatus::HardPass, Direction::Original);
        assert!(state.hard_pass_known(Direction::Original, true));
        assert!(!state.hard_pass_known(Direction::Reversed, true));
        assert!(!state.hard_pass_known(Direction::Bothways, true));
        assert!(state.hard_pass_known(Direction::Reversed, false));

        state.record(BrandStatus::SoftPass, Direction::Reversed);
        assert!(state.any_soft_pass);
        assert!(!state.hard_passed_both_ways());

        state.record(BrandStatus::HardPass, Direction::Bothways);
        assert!(state.hard_passed_both_ways());
    }
}
