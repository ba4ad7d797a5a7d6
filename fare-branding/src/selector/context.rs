//! Per-transaction dependencies of the resolver.

use std::sync::Arc;

use crate::diagnostics::{DiagnosticsSink, NoopSink};
use crate::registry::{BrandRegistry, BrandingData};
use crate::validator::StandardValidators;

use super::config::EvaluationContext;

/// Everything a resolution pass reads, passed explicitly to every entry
/// point.
pub struct TransactionContext<V = StandardValidators> {
    pub registry: Arc<BrandRegistry>,
    pub evaluation: EvaluationContext,
    pub branding_data: Arc<dyn BrandingData>,
    pub validators: V,
    sink: Option<Arc<dyn DiagnosticsSink>>,
}

impl<V> TransactionContext<V> {
    pub fn new(
        registry: Arc<BrandRegistry>,
        evaluation: EvaluationContext,
        branding_data: Arc<dyn BrandingData>,
        validators: V,
    ) -> Self {
        Self {
            registry,
            evaluation,
            branding_data,
            validators,
            sink: None,
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticsSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// The diagnostics sink, or one that discards everything.
    pub fn sink(&self) -> &dyn DiagnosticsSink {
        match &self.sink {
            Some(sink) => sink.as_ref(),
            None => &NoopSink,
        }
    }
}
