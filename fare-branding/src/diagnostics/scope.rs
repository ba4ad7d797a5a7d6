//! Diagnostic scope predicates.
//!
//! A diagnostic request can narrow the engine to a vendor, program, brand,
//! carrier, fare class or program sequence number. The predicates are not
//! uniform: vendor, program name and brand only narrow the walk while a
//! diagnostic collector is active, whereas carrier, fare class and sequence
//! number always apply when the request carries the parameter.

use crate::domain::{BrandCode, CarrierCode};

/// Parameters of a diagnostic request. `None` accepts everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagnosticParams {
    pub vendor: Option<String>,
    pub program_name: Option<String>,
    pub brand_code: Option<BrandCode>,
    pub carrier: Option<CarrierCode>,
    pub fare_class: Option<String>,
    pub seq_number: Option<u32>,
}

/// The predicate set evaluated by the walker and the batch orchestrator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagnosticScope {
    /// Whether a diagnostic collector is active for this transaction.
    pub collector_active: bool,
    pub params: DiagnosticParams,
}

fn accepts<T: PartialEq + ?Sized>(filter: Option<&T>, value: &T) -> bool {
    filter.is_none_or(|f| f == value)
}

impl DiagnosticScope {
    /// Scope that accepts everything.
    pub fn inactive() -> Self {
        Self::default()
    }

    pub fn active(params: DiagnosticParams) -> Self {
        Self {
            collector_active: true,
            params,
        }
    }

    /// Gated by collector activity.
    pub fn is_for_vendor(&self, vendor: &str) -> bool {
        !self.collector_active || accepts(self.params.vendor.as_deref(), vendor)
    }

    /// Gated by collector activity.
    pub fn is_for_program_name(&self, program_name: &str) -> bool {
        !self.collector_active || accepts(self.params.program_name.as_deref(), program_name)
    }

    /// Gated by collector activity.
    pub fn is_for_brand_id(&self, brand_code: &BrandCode) -> bool {
        !self.collector_active || accepts(self.params.brand_code.as_ref(), brand_code)
    }

    /// Always evaluated.
    pub fn is_for_carrier(&self, carrier: &CarrierCode) -> bool {
        accepts(self.params.carrier.as_ref(), carrier)
    }

    /// Always evaluated.
    pub fn is_for_fare_class_code(&self, fare_class: &str) -> bool {
        accepts(self.params.fare_class.as_deref(), fare_class)
    }

    /// Always evaluated.
    pub fn is_for_seq_number(&self, seq_number: u32) -> bool {
        accepts(self.params.seq_number.as_ref(), &seq_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn narrowed() -> DiagnosticParams {
        DiagnosticParams {
            vendor: Some("ATP".into()),
            program_name: Some("QFDOM".into()),
            brand_code: Some(BrandCode::parse("FLEX").unwrap()),
            carrier: Some(CarrierCode::parse("QF").unwrap()),
            fare_class: Some("YOW".into()),
            seq_number: Some(7),
        }
    }

    #[test]
    fn inactive_scope_accepts_everything() {
        let scope = DiagnosticScope::inactive();
        assert!(scope.is_for_vendor("MMGR"));
        assert!(scope.is_for_program_name("ANY"));
        assert!(scope.is_for_brand_id(&BrandCode::parse("BASIC").unwrap()));
        assert!(scope.is_for_carrier(&CarrierCode::parse("VA").unwrap()));
        assert!(scope.is_for_fare_class_code("Y"));
        assert!(scope.is_for_seq_number(1));
    }

    #[test]
    fn gated_predicates_ignore_params_while_inactive() {
        let scope = DiagnosticScope {
            collector_active: false,
            params: narrowed(),
        };
        assert!(scope.is_for_vendor("MMGR"));
        assert!(scope.is_for_program_name("OTHER"));
        assert!(scope.is_for_brand_id(&BrandCode::parse("BASIC").unwrap()));
    }

    #[test]
    fn ungated_predicates_apply_while_inactive() {
        let scope = DiagnosticScope {
            collector_active: false,
            params: narrowed(),
        };
        assert!(!scope.is_for_carrier(&CarrierCode::parse("VA").unwrap()));
        assert!(scope.is_for_carrier(&CarrierCode::parse("QF").unwrap()));
        assert!(!scope.is_for_fare_class_code("Y"));
        assert!(scope.is_for_fare_class_code("YOW"));
        assert!(!scope.is_for_seq_number(1));
        assert!(scope.is_for_seq_number(7));
    }

    #[test]
    fn active_scope_narrows_everything() {
        let scope = DiagnosticScope::active(narrowed());
        assert!(scope.is_for_vendor("ATP"));
        assert!(!scope.is_for_vendor("MMGR"));
        assert!(scope.is_for_program_name("QFDOM"));
        assert!(!scope.is_for_program_name("OTHER"));
        assert!(scope.is_for_brand_id(&BrandCode::parse("FLEX").unwrap()));
        assert!(!scope.is_for_brand_id(&BrandCode::parse("BASIC").unwrap()));
    }
}
