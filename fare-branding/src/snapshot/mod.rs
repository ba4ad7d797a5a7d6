//! Branding snapshots loaded from JSON.
//!
//! A snapshot holds everything one transaction needs: settings, programs,
//! market responses and the fare markets to resolve. It stands in for the
//! reference-data layer, which is outside this crate.

mod convert;
mod types;

pub use types::{
    BrandDto, FareDto, FareIdTableDto, MarketDto, ProgramDto, QualifiedDto, ResponseDto,
    SegmentDto, SnapshotDto,
};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::domain::{DomainError, FareCandidate, TravelMarket};
use crate::registry::{BrandRegistry, InMemoryBrandingData, RegistryError};
use crate::selector::{EvaluationContext, TransactionContext};
use crate::validator::{FareIdTables, StandardValidators};

/// Errors while loading a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// The snapshot file could not be read
    #[error("failed to read snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a valid snapshot document
    #[error("invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A record holds an invalid value
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Records refer to programs or brands that do not exist
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Fares quoted on one travel market.
#[derive(Debug, Clone)]
pub struct MarketFares {
    pub market: Arc<TravelMarket>,
    pub fares: Vec<FareCandidate>,
}

/// A converted snapshot.
#[derive(Debug)]
pub struct Snapshot {
    pub evaluation: EvaluationContext,
    pub fare_id_tables: FareIdTables,
    pub registry: BrandRegistry,
    pub branding_data: InMemoryBrandingData,
    pub markets: Vec<MarketFares>,
}

impl Snapshot {
    /// Load and convert a snapshot file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot = Self::from_json(&contents)?;
        debug!(
            path = %path.display(),
            qualified = snapshot.registry.len(),
            markets = snapshot.markets.len(),
            "loaded branding snapshot"
        );
        Ok(snapshot)
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let dto: SnapshotDto = serde_json::from_str(json)?;
        Self::from_dto(&dto)
    }

    pub fn from_dto(dto: &SnapshotDto) -> Result<Self, SnapshotError> {
        let (programs, by_id) = convert::convert_programs(&dto.programs)?;
        let branding_data = convert::convert_responses(&dto.responses, &by_id)?;

        let mut registry = BrandRegistry::new();
        let markets = dto
            .markets
            .iter()
            .map(|m| {
                convert::convert_market(m, &by_id, &programs, &mut registry)
                    .map(|(market, fares)| MarketFares { market, fares })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let requested_brands = convert::convert_brand_codes(&dto.requested_brands)?;
        let evaluation = EvaluationContext::new(dto.kind, dto.flags.clone())
            .with_exchange(dto.exchange)
            .with_requested_brands(requested_brands);

        Ok(Self {
            evaluation,
            fare_id_tables: convert::convert_fare_id_tables(&dto.fare_id_tables),
            registry,
            branding_data,
            markets,
        })
    }

    /// Split into the transaction context and the fares to resolve.
    pub fn into_transaction(self) -> (TransactionContext, Vec<MarketFares>) {
        let tx = TransactionContext::new(
            Arc::new(self.registry),
            self.evaluation,
            Arc::new(self.branding_data),
            StandardValidators::new(self.fare_id_tables),
        );
        (tx, self.markets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use tempfile::NamedTempFile;

    use crate::domain::{BrandStatus, Direction, MarketId};
    use crate::registry::BrandingData;
    use crate::selector::{BrandEligibilityResolver, MarketOutcome, TransactionKind};

    const SNAPSHOT: &str = r#"{
        "kind": "SHOPPING_MIP",
        "flags": { "soft_pass_disabled": false },
        "requested_brands": ["FLEX"],
        "fare_id_tables": [
            { "item_no": 100, "fare_classes": ["Y*"] },
            { "item_no": 200, "fare_classes": ["Q*"] }
        ],
        "programs": [
            {
                "id": "QFDOM",
                "global_direction": "",
                "origin": "SYD",
                "data_source": "S8",
                "sequence_no": 1,
                "brands": [
                    { "code": "FLEX", "primary_fare_id_table": 100 },
                    { "code": "SAVER", "primary_fare_id_table": 200, "secondary_fare_id_table": 100 }
                ]
            },
            {
                "id": "QFCB",
                "data_source": "CBAS",
                "brands": [
                    { "code": "SEAT", "primary_booking_codes": ["Q"] }
                ]
            }
        ],
        "responses": [
            { "market_id": 7, "carrier": "QF", "programs": ["QFDOM", "QFCB"] }
        ],
        "markets": [
            {
                "brand_market_id": 7,
                "carrier": "QF",
                "travel_date": "2024-03-15",
                "segments": [ { "board": "SYD", "off": "MEL", "leg": 0 } ],
                "qualified": [ { "program": "QFDOM" }, { "program": "QFCB", "brand": "SEAT" } ],
                "fares": [
                    { "id": 1, "carrier": "QF", "fare_class": "YFLEX", "directionality": "FROM" },
                    { "id": 2, "carrier": "QF", "fare_class": "QSAVE", "booking_code": "Q", "directionality": "TO" }
                ]
            }
        ]
    }"#;

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn load_from_file() {
        let file = write_temp(SNAPSHOT);
        let snapshot = Snapshot::load(file.path()).unwrap();

        assert_eq!(snapshot.evaluation.kind, TransactionKind::ShoppingMip);
        assert_eq!(snapshot.evaluation.requested_brands.len(), 1);
        assert_eq!(snapshot.registry.len(), 3);
        assert_eq!(snapshot.fare_id_tables.len(), 2);
        assert_eq!(snapshot.branding_data.market_responses(MarketId(7)).len(), 1);
        assert_eq!(snapshot.markets.len(), 1);
        assert_eq!(snapshot.markets[0].fares.len(), 2);
        assert_eq!(snapshot.markets[0].market.brand_program_indices, vec![0, 1, 2]);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Snapshot::load(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, SnapshotError::Io { .. }));
    }

    #[test]
    fn malformed_json_rejected() {
        let file = write_temp("{ \"programs\": [");
        assert!(matches!(Snapshot::load(file.path()), Err(SnapshotError::Json(_))));
    }

    #[test]
    fn unknown_response_program_rejected() {
        let json = r#"{
            "programs": [],
            "responses": [ { "market_id": 1, "carrier": "QF", "programs": ["NOPE"] } ]
        }"#;
        assert!(matches!(
            Snapshot::from_json(json),
            Err(SnapshotError::Registry(RegistryError::UnknownProgram(_)))
        ));
    }

    #[test]
    fn bad_fare_directionality_rejected() {
        let json = SNAPSHOT.replace(r#""directionality": "TO""#, r#""directionality": "UP""#);
        let err = Snapshot::from_json(&json).unwrap_err();
        assert_eq!(err.to_string(), "invalid fare directionality: UP");
    }

    #[test]
    fn snapshot_resolves_end_to_end() {
        let (tx, mut markets) = Snapshot::from_json(SNAPSHOT).unwrap().into_transaction();
        let resolver = BrandEligibilityResolver::new(&tx);

        let outcome = resolver.resolve_fare_market(&mut markets[0].fares);
        assert_eq!(outcome, MarketOutcome::Evaluated { fares: 2, usable: 2 });

        // YFLEX outbound: FLEX hard-passes, so SAVER is only checked for a
        // hard pass and its secondary table is ignored. SEAT needs booking
        // code Q.
        let outbound = &markets[0].fares[0];
        let statuses: Vec<_> = outbound.brand_status.iter().map(|s| s.status).collect();
        assert_eq!(
            statuses,
            vec![BrandStatus::HardPass, BrandStatus::Fail, BrandStatus::Fail]
        );
        assert_eq!(outbound.brand_status[0].direction, Direction::Original);
        assert!(outbound.valid_for_branding);

        // The TO fare conflicts with the SYD-filed program; SEAT applies
        // both ways
        let inbound = &markets[0].fares[1];
        assert_eq!(inbound.brand_status[0].status, BrandStatus::Fail);
        assert_eq!(inbound.brand_status[1].status, BrandStatus::Fail);
        assert_eq!(inbound.brand_status[2].status, BrandStatus::HardPass);
        assert_eq!(inbound.brand_status[2].direction, Direction::Bothways);
        assert!(inbound.valid_for_branding);

        // Only the outbound fare offers the requested FLEX brand
        assert!(resolver.offers_requested_brand(outbound));
        assert!(!resolver.offers_requested_brand(inbound));
    }

    #[test]
    fn secondary_table_soft_passes_without_hard_pass() {
        let json = SNAPSHOT.replace(r#""fare_class": "YFLEX""#, r#""fare_class": "YSALE""#).replace(
            r#"{ "item_no": 100, "fare_classes": ["Y*"] }"#,
            r#"{ "item_no": 100, "fare_classes": ["YFLEX"] }, { "item_no": 300, "fare_classes": ["YS*"] }"#,
        );
        let json = json.replace(
            r#""secondary_fare_id_table": 100"#,
            r#""secondary_fare_id_table": 300"#,
        );
        let (tx, mut markets) = Snapshot::from_json(&json).unwrap().into_transaction();
        BrandEligibilityResolver::new(&tx).resolve_fare_market(&mut markets[0].fares);

        let outbound = &markets[0].fares[0];
        assert_eq!(outbound.brand_status[0].status, BrandStatus::Fail);
        assert_eq!(outbound.brand_status[1].status, BrandStatus::SoftPass);
        // Shopping MIP accepts a soft pass
        assert!(outbound.valid_for_branding);
    }
}
