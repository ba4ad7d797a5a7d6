//! Brand eligibility resolution.
//!
//! For each fare, the [`SingleFareBrandWalker`] decides per qualified brand
//! whether the fare fails, soft-passes or hard-passes, and whether the fare
//! is usable overall. The [`BrandEligibilityResolver`] drives the walker
//! over fare markets, explicit fare sets and fare display requests.

mod config;
mod context;
mod directionality;
mod resolver;
mod walker;


pub use config::{BrandingFlags, EvaluationContext, ExchangeState, TransactionKind};
pub use context::TransactionContext;
pub use directionality::{
    DirectionCache, DirectionResolution, DirectionalityResolver, ProgramDirections, legacy_match,
    legacy_match_shopping,
};
pub use resolver::{BrandEligibilityResolver, MarketOutcome};
pub use walker::{SingleFareBrandWalker, global_direction_matches};
