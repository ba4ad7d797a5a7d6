//! JSON records of a branding snapshot.
//!
//! These mirror the file layout and are deliberately loose: codes are plain
//! strings and most fields are optional. Validation happens on conversion.

use serde::Deserialize;

use crate::selector::{BrandingFlags, ExchangeState, TransactionKind};

/// Root of a snapshot file.
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotDto {
    #[serde(default)]
    pub kind: TransactionKind,

    #[serde(default)]
    pub flags: BrandingFlags,

    #[serde(default)]
    pub exchange: ExchangeState,

    /// Brands the requester asked for; empty means any.
    #[serde(default)]
    pub requested_brands: Vec<String>,

    #[serde(default)]
    pub fare_id_tables: Vec<FareIdTableDto>,

    pub programs: Vec<ProgramDto>,

    /// Market responses for fare display.
    #[serde(default)]
    pub responses: Vec<ResponseDto>,

    #[serde(default)]
    pub markets: Vec<MarketDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FareIdTableDto {
    pub item_no: u64,
    pub fare_classes: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BrandDto {
    pub code: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub tier: u16,

    #[serde(default)]
    pub primary_fare_id_table: Option<u64>,

    #[serde(default)]
    pub secondary_fare_id_table: Option<u64>,

    #[serde(default)]
    pub primary_booking_codes: Vec<String>,

    #[serde(default)]
    pub secondary_booking_codes: Vec<String>,

    #[serde(default)]
    pub excluded_fare_basis: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProgramDto {
    pub id: String,

    #[serde(default)]
    pub vendor: Option<String>,

    #[serde(default)]
    pub program_code: Option<String>,

    #[serde(default)]
    pub program_name: Option<String>,

    #[serde(default)]
    pub sequence_no: u32,

    /// Two-letter global indicator; blank for none.
    #[serde(default)]
    pub global_direction: String,

    /// Origin location; absent for programs valid both ways.
    #[serde(default)]
    pub origin: Option<String>,

    /// `S8` or `CBAS`.
    pub data_source: String,

    /// `YYYY-MM-DD`
    #[serde(default)]
    pub effective_date: Option<String>,

    /// `YYYY-MM-DD`
    #[serde(default)]
    pub discontinue_date: Option<String>,

    pub brands: Vec<BrandDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseDto {
    pub market_id: u32,
    pub carrier: String,
    /// Program ids, in filing order.
    pub programs: Vec<String>,
}

fn default_air() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct SegmentDto {
    pub board: String,
    pub off: String,
    pub leg: u16,

    #[serde(default = "default_air")]
    pub air: bool,

    /// Defaults to the board city.
    #[serde(default)]
    pub origin_airport: Option<String>,

    /// Defaults to the off city.
    #[serde(default)]
    pub destination_airport: Option<String>,
}

/// A brand qualified for a market. Without a brand, every brand of the
/// program qualifies.
#[derive(Debug, Clone, Deserialize)]
pub struct QualifiedDto {
    pub program: String,

    #[serde(default)]
    pub brand: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FareDto {
    pub id: u64,
    pub carrier: String,
    pub fare_class: String,

    #[serde(default)]
    pub fare_basis: Option<String>,

    #[serde(default)]
    pub booking_code: Option<String>,

    /// `FROM`, `TO` or `BOTH`; blank means both.
    #[serde(default)]
    pub directionality: String,

    #[serde(default)]
    pub global_direction: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarketDto {
    #[serde(default)]
    pub brand_market_id: Option<u32>,

    pub carrier: String,

    #[serde(default)]
    pub global_direction: String,

    /// `YYYY-MM-DD`
    #[serde(default)]
    pub travel_date: Option<String>,

    #[serde(default)]
    pub exchange_original_brand: Option<String>,

    pub segments: Vec<SegmentDto>,

    #[serde(default)]
    pub qualified: Vec<QualifiedDto>,

    #[serde(default)]
    pub fares: Vec<FareDto>,
}
