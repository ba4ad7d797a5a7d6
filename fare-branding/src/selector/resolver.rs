//! Batch entry points for brand eligibility resolution.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::diagnostics::NotFound;
use crate::domain::{BrandEligibility, FareCandidate};
use crate::registry::BrandProgram;
use crate::validator::ValidatorFactory;

use super::config::TransactionKind;
use super::context::TransactionContext;
use super::directionality::DirectionCache;
use super::walker::SingleFareBrandWalker;

/// How a fare-market batch ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketOutcome {
    /// The market had no fares.
    NoFares,
    /// The transaction carries no branding data; every fare was left unbranded.
    NoBrandData,
    /// Brands are resolved upstream; each fare got a single blank slot.
    SingleBrandShopping,
    /// The governing carrier is outside the diagnostic scope.
    OutOfScope,
    /// Fares were walked.
    Evaluated { fares: usize, usable: usize },
}

/// Resolves brand eligibility for batches of fares.
pub struct BrandEligibilityResolver<'a, V> {
    tx: &'a TransactionContext<V>,
}

impl<'a, V: ValidatorFactory> BrandEligibilityResolver<'a, V> {
    pub fn new(tx: &'a TransactionContext<V>) -> Self {
        Self { tx }
    }

    fn walker(&self) -> SingleFareBrandWalker<'a, V> {
        SingleFareBrandWalker::from_context(self.tx)
    }

    /// Resolve the brands of a fare being displayed, walking the programs
    /// filed for its branding market.
    ///
    /// Matches from earlier passes are discarded. Returns whether any brand
    /// was matched.
    pub fn resolve_fare_display(&self, fare: &mut FareCandidate) -> bool {
        let ctx = &self.tx.evaluation;
        let sink = self.tx.sink();

        fare.display_brands.clear();
        fare.valid_for_branding = false;

        if ctx.kind != TransactionKind::FareDisplay {
            warn!(kind = ?ctx.kind, "fare display resolution requested outside fare display");
            return false;
        }

        let Some(market_id) = fare.market().brand_market_id else {
            sink.not_found(NotFound::MarketId { fare_id: fare.id });
            return false;
        };

        let responses = self.tx.branding_data.market_responses(market_id);
        if responses.is_empty() {
            sink.not_found(NotFound::MarketResponses(market_id));
            return false;
        }

        let walker = self.walker();
        let mut cache = DirectionCache::new();
        let mut carrier_found = false;
        let mut usable = false;

        let carrier = fare.carrier;
        sink.fare_entered(fare);
        for response in responses.iter().filter(|r| r.carrier == carrier) {
            carrier_found = true;
            let programs: Vec<Arc<BrandProgram>> = response
                .programs
                .iter()
                .filter(|p| ctx.scope.is_for_seq_number(p.sequence_no))
                .cloned()
                .collect();

            usable |= walker.walk_programs(fare, &programs, &mut cache);
            if usable && !ctx.kind.is_shopping() {
                break;
            }
        }

        if !carrier_found {
            sink.not_found(NotFound::Carrier { market_id, carrier });
        }

        fare.valid_for_branding = usable;
        sink.fare_exited(fare, usable);
        usable
    }

    /// Resolve every fare quoted on one fare market.
    ///
    /// All fares must share the same travel market.
    pub fn resolve_fare_market(&self, fares: &mut [FareCandidate]) -> MarketOutcome {
        let ctx = &self.tx.evaluation;
        let sink = self.tx.sink();

        let Some(first) = fares.first() else {
            debug!("no fares to brand");
            return MarketOutcome::NoFares;
        };
        let market = first.market_arc().clone();
        debug_assert!(
            fares.iter().all(|f| Arc::ptr_eq(f.market_arc(), &market)),
            "fares of one batch must share their market"
        );

        if !self.tx.branding_data.has_data() {
            debug!("no branding data for transaction");
            sink.not_found(NotFound::BrandingData);
            for fare in fares.iter_mut() {
                fare.reset_brand_status();
                fare.valid_for_branding = false;
            }
            return MarketOutcome::NoBrandData;
        }

        if ctx.flags.single_brand_shopping {
            for fare in fares.iter_mut() {
                fare.brand_status = vec![BrandEligibility::failed()];
                fare.valid_for_branding = false;
            }
            return MarketOutcome::SingleBrandShopping;
        }

        if !ctx.scope.is_for_carrier(&market.governing_carrier) {
            debug!(carrier = %market.governing_carrier, "carrier outside diagnostic scope");
            for fare in fares.iter_mut() {
                fare.reset_brand_status();
                fare.valid_for_branding = false;
            }
            return MarketOutcome::OutOfScope;
        }

        sink.sizes(self.tx.registry.len(), market.brand_program_indices.len());

        let mut cache = DirectionCache::new();
        let usable = self.walk_fares(fares, &mut cache);
        MarketOutcome::Evaluated {
            fares: fares.len(),
            usable,
        }
    }

    /// Re-brand an already selected set of fares.
    ///
    /// Only meaningful in single-brand shopping, where market batches skip
    /// the walk. Returns the number of usable fares.
    pub fn brand_fares(&self, fares: &mut [FareCandidate]) -> usize {
        if !self.tx.evaluation.flags.single_brand_shopping {
            warn!("explicit fare branding requested outside single-brand shopping");
            return 0;
        }
        let mut cache = DirectionCache::new();
        self.walk_fares(fares, &mut cache)
    }

    /// Whether a resolved fare offers one of the brands the requester asked
    /// for. Any fare qualifies when no brand was requested.
    pub fn offers_requested_brand(&self, fare: &FareCandidate) -> bool {
        let ctx = &self.tx.evaluation;
        fare.valid_for_branding
            && fare.is_valid_for_requested_brands(
                self.tx.registry.as_ref(),
                &ctx.requested_brands,
                false,
                ctx.flags.use_directionality,
            )
    }

    fn walk_fares(&self, fares: &mut [FareCandidate], cache: &mut DirectionCache) -> usize {
        let ctx = &self.tx.evaluation;
        let sink = self.tx.sink();
        let walker = self.walker();
        let mut usable_count = 0;

        for fare in fares.iter_mut() {
            sink.fare_entered(fare);

            let excluded = !ctx.scope.is_for_fare_class_code(&fare.fare_class)
                || (ctx.flags.ignore_yy_fares && fare.carrier.is_industry());
            let usable = if excluded {
                debug!(fare = fare.id, fare_class = %fare.fare_class, "fare excluded from branding");
                fare.reset_brand_status();
                false
            } else {
                walker.walk(fare, cache)
            };

            fare.valid_for_branding = usable;
            if usable {
                usable_count += 1;
            }
            sink.fare_exited(fare, usable);
        }

        usable_count
    }
}
