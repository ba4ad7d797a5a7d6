//! Diagnostics sink that forwards to `tracing`.

use tracing::{debug, trace};

use crate::domain::{BrandStatus, Direction, FareCandidate};
use crate::registry::{BrandInfo, BrandProgram};

use super::{DiagnosticsSink, NotFound};

/// Emits every notification as a `tracing` event under the
/// `fare_branding::diag` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn fare_entered(&self, fare: &FareCandidate) {
        debug!(target: "fare_branding::diag", fare = fare.id, fare_class = %fare.fare_class, "fare entered");
    }

    fn fare_exited(&self, fare: &FareCandidate, usable: bool) {
        debug!(target: "fare_branding::diag", fare = fare.id, usable, "fare exited");
    }

    fn program_entered(&self, program: &BrandProgram) {
        trace!(target: "fare_branding::diag", program = %program.id, vendor = %program.vendor, "program entered");
    }

    fn program_exited(&self, program: &BrandProgram) {
        trace!(target: "fare_branding::diag", program = %program.id, "program exited");
    }

    fn brand_entered(&self, brand: &BrandInfo) {
        trace!(target: "fare_branding::diag", brand = %brand.code, "brand entered");
    }

    fn brand_exited(&self, brand: &BrandInfo, status: BrandStatus) {
        trace!(target: "fare_branding::diag", brand = %brand.code, status = status.as_str(), "brand exited");
    }

    fn global_direction_failed(&self, program: &BrandProgram, fare: &FareCandidate) {
        debug!(
            target: "fare_branding::diag",
            program = %program.id,
            program_dir = %program.global_direction,
            fare_dir = %fare.global_direction,
            "program global direction does not match fare"
        );
    }

    fn directionality_failed(
        &self,
        program: &BrandProgram,
        fare: &FareCandidate,
        program_direction: Direction,
    ) {
        debug!(
            target: "fare_branding::diag",
            program = %program.id,
            %program_direction,
            fare_dir = %fare.directionality,
            "program directionality does not match fare"
        );
    }

    fn sizes(&self, programs: usize, brands: usize) {
        debug!(target: "fare_branding::diag", programs, brands, "branding data size");
    }

    fn not_found(&self, what: NotFound) {
        debug!(target: "fare_branding::diag", ?what, "branding data not found");
    }
}
