//! Diagnostics for brand eligibility resolution.
//!
//! The engine reports what it does through a [`DiagnosticsSink`]. Nothing
//! the sink does feeds back into eligibility decisions. Rendering the
//! collected events as text is left to the caller.

mod recording;
mod scope;
mod tracing_sink;

pub use recording::{DiagEvent, RecordingSink};
pub use scope::{DiagnosticParams, DiagnosticScope};
pub use tracing_sink::TracingSink;

use crate::domain::{BrandStatus, CarrierCode, Direction, FareCandidate, MarketId, ProgramId};
use crate::registry::{BrandInfo, BrandProgram};

/// Reference data the engine looked for and did not find.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotFound {
    /// The transaction carries no branding data at all.
    BrandingData,
    /// A fare's market has no branding market id.
    MarketId { fare_id: u64 },
    /// No responses were filed for the market.
    MarketResponses(MarketId),
    /// No response for the carrier.
    Carrier { market_id: MarketId, carrier: CarrierCode },
    /// The program offers no brands.
    Brands(ProgramId),
}

/// Receiver of diagnostic notifications.
///
/// Every method has an empty default so sinks implement only what they
/// record. Implementations must tolerate calls from several threads.
pub trait DiagnosticsSink: Send + Sync {
    fn fare_entered(&self, _fare: &FareCandidate) {}

    fn fare_exited(&self, _fare: &FareCandidate, _usable: bool) {}

    fn program_entered(&self, _program: &BrandProgram) {}

    fn program_exited(&self, _program: &BrandProgram) {}

    fn brand_entered(&self, _brand: &BrandInfo) {}

    fn brand_exited(&self, _brand: &BrandInfo, _status: BrandStatus) {}

    fn global_direction_failed(&self, _program: &BrandProgram, _fare: &FareCandidate) {}

    fn directionality_failed(
        &self,
        _program: &BrandProgram,
        _fare: &FareCandidate,
        _program_direction: Direction,
    ) {
    }

    fn sizes(&self, _programs: usize, _brands: usize) {}

    fn not_found(&self, _what: NotFound) {}
}

/// Sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl DiagnosticsSink for NoopSink {}
