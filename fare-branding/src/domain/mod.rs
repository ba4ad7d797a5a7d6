//! Domain types for brand eligibility resolution.
//!
//! This module contains the core domain model: validated reference codes,
//! directionality, travel markets and the fare candidates whose brand
//! eligibility is being resolved. Codes enforce their invariants at
//! construction time, so code that receives them can trust their validity.

mod codes;
mod direction;
mod error;
mod fare;
mod market;

pub use codes::{
    BrandCode, CarrierCode, InvalidBrandCode, InvalidCarrierCode, InvalidLocCode, LocCode,
    ProgramId,
};
pub use direction::{Direction, FareDirectionality, GlobalDirection};
pub use error::DomainError;
pub use fare::{BrandEligibility, BrandLookup, BrandStatus, DisplayBrandMatch, FareCandidate};
pub use market::{LegId, LegSpan, MarketId, TravelMarket, TravelSegment};
