//! Domain error types.
//!
//! These errors represent construction failures of domain values. They are
//! distinct from walk-time data quality issues, which are logged and skipped.

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DomainError {
    /// A travel market has no segments
    #[error("travel market must have at least one segment")]
    EmptyMarket,

    /// A market carries no air segment, so it has no leg to brand
    #[error("travel market has no air segment")]
    NoAirSegment,

    /// Reference value could not be parsed
    #[error("invalid {field}: {value}")]
    InvalidField { field: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DomainError::EmptyMarket;
        assert_eq!(err.to_string(), "travel market must have at least one segment");

        let err = DomainError::NoAirSegment;
        assert_eq!(err.to_string(), "travel market has no air segment");

        let err = DomainError::InvalidField {
            field: "fare directionality",
            value: "SIDEWAYS".into(),
        };
        assert_eq!(err.to_string(), "invalid fare directionality: SIDEWAYS");
    }
}
