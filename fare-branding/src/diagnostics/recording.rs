//! In-memory diagnostics sink.

use std::sync::Mutex;

use crate::domain::{BrandCode, BrandStatus, Direction, FareCandidate, ProgramId};
use crate::registry::{BrandInfo, BrandProgram};

use super::{DiagnosticsSink, NotFound};

/// A recorded notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagEvent {
    FareEntered { fare_id: u64 },
    FareExited { fare_id: u64, usable: bool },
    ProgramEntered(ProgramId),
    ProgramExited(ProgramId),
    BrandEntered(BrandCode),
    BrandExited { brand: BrandCode, status: BrandStatus },
    GlobalDirectionFailed { program: ProgramId, fare_id: u64 },
    DirectionalityFailed {
        program: ProgramId,
        fare_id: u64,
        program_direction: Direction,
    },
    Sizes { programs: usize, brands: usize },
    NotFound(NotFound),
}

/// Sink that appends every notification to a list.
///
/// Appends are serialized by a mutex, so one sink may be shared by fares
/// resolved on different threads.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<DiagEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, event: DiagEvent) {
        // A poisoned lock still holds complete events
        let mut events = self.events.lock().unwrap_or_else(|e| e.into_inner());
        events.push(event);
    }

    /// Snapshot of the events recorded so far.
    pub fn events(&self) -> Vec<DiagEvent> {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn count(&self, pred: impl Fn(&DiagEvent) -> bool) -> usize {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|e| pred(e))
            .count()
    }
}

impl DiagnosticsSink for RecordingSink {
    fn fare_entered(&self, fare: &FareCandidate) {
        self.record(DiagEvent::FareEntered { fare_id: fare.id });
    }

    fn fare_exited(&self, fare: &FareCandidate, usable: bool) {
        self.record(DiagEvent::FareExited {
            fare_id: fare.id,
            usable,
        });
    }

    fn program_entered(&self, program: &BrandProgram) {
        self.record(DiagEvent::ProgramEntered(program.id.clone()));
    }

    fn program_exited(&self, program: &BrandProgram) {
        self.record(DiagEvent::ProgramExited(program.id.clone()));
    }

    fn brand_entered(&self, brand: &BrandInfo) {
        self.record(DiagEvent::BrandEntered(brand.code.clone()));
    }

    fn brand_exited(&self, brand: &BrandInfo, status: BrandStatus) {
        self.record(DiagEvent::BrandExited {
            brand: brand.code.clone(),
            status,
        });
    }

    fn global_direction_failed(&self, program: &BrandProgram, fare: &FareCandidate) {
        self.record(DiagEvent::GlobalDirectionFailed {
            program: program.id.clone(),
            fare_id: fare.id,
        });
    }

    fn directionality_failed(
        &self,
        program: &BrandProgram,
        fare: &FareCandidate,
        program_direction: Direction,
    ) {
        self.record(DiagEvent::DirectionalityFailed {
            program: program.id.clone(),
            fare_id: fare.id,
            program_direction,
        });
    }

    fn sizes(&self, programs: usize, brands: usize) {
        self.record(DiagEvent::Sizes { programs, brands });
    }

    fn not_found(&self, what: NotFound) {
        self.record(DiagEvent::NotFound(what));
    }
}
