//! Evaluation settings for brand eligibility resolution.

use serde::Deserialize;

use crate::diagnostics::DiagnosticScope;
use crate::domain::BrandCode;

/// Kind of transaction requesting brand eligibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    #[default]
    Pricing,
    ShoppingMip,
    ShoppingIs,
    FareDisplay,
    /// Repricing an exchanged ticket.
    RexPricing,
    /// Shopping for an exchange.
    RexShopping,
    Refund,
}

impl TransactionKind {
    /// Whether the transaction evaluates every brand of a fare rather than
    /// stopping at the first usable one.
    pub fn is_shopping(self) -> bool {
        matches!(self, TransactionKind::ShoppingMip | TransactionKind::ShoppingIs)
    }
}

/// Feature flags, resolved once per transaction.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BrandingFlags {
    /// Compute program direction leg by leg instead of from market endpoints.
    pub use_directionality: bool,

    /// Resolve program direction at all. When off every program is taken to
    /// apply both ways.
    pub calculate_program_direction: bool,

    /// Reject fares whose directionality conflicts with the program's.
    pub check_directionality: bool,

    /// Only hard passes count; soft passes are neither sought nor reported.
    pub soft_pass_disabled: bool,

    /// Pricing request that searches all brands rather than the first fit.
    pub search_for_brands_pricing: bool,

    /// Shopping for a single brand: markets are not walked.
    pub single_brand_shopping: bool,

    /// Leave industry (YY) fares unbranded.
    pub ignore_yy_fares: bool,
}

impl BrandingFlags {
    /// Create flags with the given values.
    pub fn new(
        use_directionality: bool,
        calculate_program_direction: bool,
        check_directionality: bool,
        soft_pass_disabled: bool,
        search_for_brands_pricing: bool,
        single_brand_shopping: bool,
        ignore_yy_fares: bool,
    ) -> Self {
        Self {
            use_directionality,
            calculate_program_direction,
            check_directionality,
            soft_pass_disabled,
            search_for_brands_pricing,
            single_brand_shopping,
            ignore_yy_fares,
        }
    }
}

impl Default for BrandingFlags {
    fn default() -> Self {
        Self {
            use_directionality: true,
            calculate_program_direction: true,
            check_directionality: true,
            soft_pass_disabled: false,
            search_for_brands_pricing: false,
            single_brand_shopping: false,
            ignore_yy_fares: false,
        }
    }
}

/// Phase of an exchange transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct ExchangeState {
    /// Pricing the new itinerary, where any brand may be sold.
    pub new_itinerary_phase: bool,
    /// The original fare is kept, so its brand need not be preserved.
    pub keep_original_fare: bool,
}

impl ExchangeState {
    /// Whether brands other than the originally ticketed one may be offered.
    pub fn allows_brand_change(&self) -> bool {
        self.new_itinerary_phase || self.keep_original_fare
    }
}

/// Everything about the transaction that shapes one resolution pass.
#[derive(Debug, Clone, Default)]
pub struct EvaluationContext {
    pub kind: TransactionKind,
    pub flags: BrandingFlags,
    /// Brands the requester asked for; empty means any.
    pub requested_brands: Vec<BrandCode>,
    pub scope: DiagnosticScope,
    pub exchange: ExchangeState,
}

impl EvaluationContext {
    pub fn new(kind: TransactionKind, flags: BrandingFlags) -> Self {
        Self {
            kind,
            flags,
            ..Self::default()
        }
    }

    pub fn with_scope(mut self, scope: DiagnosticScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_exchange(mut self, exchange: ExchangeState) -> Self {
        self.exchange = exchange;
        self
    }

    pub fn with_requested_brands(mut self, brands: Vec<BrandCode>) -> Self {
        self.requested_brands = brands;
        self
    }

    /// Whether a walk must visit every brand instead of stopping at the
    /// first usable result.
    pub fn evaluates_all_brands(&self) -> bool {
        self.kind.is_shopping() || self.flags.search_for_brands_pricing
    }

    /// Whether soft passes make a fare usable when no hard pass was found.
    pub fn accepts_soft_pass(&self) -> bool {
        !self.flags.soft_pass_disabled
            && matches!(self.kind, TransactionKind::Pricing | TransactionKind::ShoppingMip)
    }
}
