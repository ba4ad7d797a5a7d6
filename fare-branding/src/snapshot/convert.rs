//! Conversion from snapshot records to domain and registry types.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::{
    BrandCode, CarrierCode, DomainError, FareCandidate, FareDirectionality, GlobalDirection,
    LegId, LocCode, MarketId, ProgramId, TravelMarket, TravelSegment,
};
use crate::registry::{
    BrandInfo, BrandProgram, BrandRegistry, DataSource, InMemoryBrandingData, MarketResponse,
    RegistryError, ensure_unique_programs,
};
use crate::validator::FareIdTables;

use super::SnapshotError;
use super::types::{
    BrandDto, FareDto, FareIdTableDto, MarketDto, ProgramDto, QualifiedDto, ResponseDto, SegmentDto,
};

fn invalid(field: &'static str, value: &str) -> DomainError {
    DomainError::InvalidField {
        field,
        value: value.to_string(),
    }
}

fn carrier(s: &str) -> Result<CarrierCode, DomainError> {
    CarrierCode::parse(s).map_err(|_| invalid("carrier code", s))
}

fn loc(s: &str) -> Result<LocCode, DomainError> {
    LocCode::parse(s).map_err(|_| invalid("location code", s))
}

fn brand_code(s: &str) -> Result<BrandCode, DomainError> {
    BrandCode::parse(s).map_err(|_| invalid("brand code", s))
}

fn date(s: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| invalid("date", s))
}

fn optional_date(s: Option<&str>) -> Result<Option<NaiveDate>, DomainError> {
    s.map(date).transpose()
}

/// Program lookup by id.
pub(super) type Programs = HashMap<ProgramId, Arc<BrandProgram>>;

pub(super) fn convert_brand_codes(codes: &[String]) -> Result<Vec<BrandCode>, DomainError> {
    codes.iter().map(|c| brand_code(c)).collect()
}

pub(super) fn convert_fare_id_tables(dtos: &[FareIdTableDto]) -> FareIdTables {
    let mut tables = FareIdTables::new();
    for dto in dtos {
        tables.insert(dto.item_no, dto.fare_classes.clone());
    }
    tables
}

fn convert_brand(dto: &BrandDto) -> Result<BrandInfo, DomainError> {
    let mut brand = BrandInfo::new(brand_code(&dto.code)?).with_tier(dto.tier);
    if let Some(name) = &dto.name {
        brand = brand.with_name(name);
    }
    brand.primary_fare_id_table = dto.primary_fare_id_table;
    brand.secondary_fare_id_table = dto.secondary_fare_id_table;
    brand.primary_booking_codes = dto.primary_booking_codes.clone();
    brand.secondary_booking_codes = dto.secondary_booking_codes.clone();
    brand.excluded_fare_basis = dto.excluded_fare_basis.clone();
    Ok(brand)
}

pub(super) fn convert_program(dto: &ProgramDto) -> Result<BrandProgram, DomainError> {
    let source =
        DataSource::parse(&dto.data_source).ok_or_else(|| invalid("data source", &dto.data_source))?;

    let mut program = BrandProgram::new(ProgramId::new(dto.id.as_str()), source)
        .with_sequence_no(dto.sequence_no)
        .with_global_direction(GlobalDirection::parse(&dto.global_direction))
        .with_validity(
            optional_date(dto.effective_date.as_deref())?,
            optional_date(dto.discontinue_date.as_deref())?,
        );
    if let Some(vendor) = &dto.vendor {
        program = program.with_vendor(vendor);
    }
    if let Some(code) = &dto.program_code {
        program.program_code = code.clone();
    }
    if let Some(name) = &dto.program_name {
        program = program.with_program_name(name);
    }
    if let Some(origin) = &dto.origin {
        program = program.with_origin_loc(loc(origin)?);
    }
    for brand in &dto.brands {
        program = program.with_brand(Arc::new(convert_brand(brand)?));
    }
    Ok(program)
}

/// Convert all programs, rejecting duplicate ids.
pub(super) fn convert_programs(
    dtos: &[ProgramDto],
) -> Result<(Vec<Arc<BrandProgram>>, Programs), SnapshotError> {
    let programs = dtos
        .iter()
        .map(|dto| convert_program(dto).map(Arc::new))
        .collect::<Result<Vec<_>, _>>()?;
    ensure_unique_programs(&programs)?;

    let by_id = programs
        .iter()
        .map(|p| (p.id.clone(), p.clone()))
        .collect();
    Ok((programs, by_id))
}

fn find<'p>(programs: &'p Programs, id: &str) -> Result<&'p Arc<BrandProgram>, RegistryError> {
    let id = ProgramId::new(id);
    programs
        .get(&id)
        .ok_or(RegistryError::UnknownProgram(id))
}

pub(super) fn convert_responses(
    dtos: &[ResponseDto],
    programs: &Programs,
) -> Result<InMemoryBrandingData, SnapshotError> {
    let mut data = InMemoryBrandingData::new();
    for dto in dtos {
        let programs = dto
            .programs
            .iter()
            .map(|id| find(programs, id).cloned())
            .collect::<Result<Vec<_>, _>>()?;
        data.add(MarketResponse {
            market_id: MarketId(dto.market_id),
            carrier: carrier(&dto.carrier)?,
            programs,
        });
    }
    Ok(data)
}

fn convert_segment(dto: &SegmentDto) -> Result<TravelSegment, DomainError> {
    let board = loc(&dto.board)?;
    let off = loc(&dto.off)?;
    let mut segment = TravelSegment::air(board, off, LegId(dto.leg));
    segment.is_air = dto.air;
    if let Some(airport) = &dto.origin_airport {
        segment.origin_airport = loc(airport)?;
    }
    if let Some(airport) = &dto.destination_airport {
        segment.destination_airport = loc(airport)?;
    }
    Ok(segment)
}

/// Register the market's qualified brands, reusing entries already
/// registered by earlier markets.
fn qualify(
    qualified: &[QualifiedDto],
    programs: &Programs,
    all_programs: &[Arc<BrandProgram>],
    registry: &mut BrandRegistry,
) -> Result<Vec<usize>, SnapshotError> {
    let mut indices = Vec::new();
    for q in qualified {
        let program = find(programs, &q.program)?;
        let codes = match &q.brand {
            Some(code) => vec![brand_code(code)?],
            None => program.brands.iter().map(|b| b.code.clone()).collect(),
        };
        for code in codes {
            let index = match registry.index_of(&program.id, &code) {
                Some(index) => index,
                None => registry.qualify_by_code(all_programs, &program.id, &code)?,
            };
            indices.push(index);
        }
    }
    Ok(indices)
}

fn convert_fare(dto: &FareDto, market: &Arc<TravelMarket>) -> Result<FareCandidate, DomainError> {
    let directionality = FareDirectionality::parse(&dto.directionality)
        .ok_or_else(|| invalid("fare directionality", &dto.directionality))?;

    let mut fare = FareCandidate::new(dto.id, carrier(&dto.carrier)?, &dto.fare_class, market.clone())
        .with_directionality(directionality);
    if !dto.global_direction.trim().is_empty() {
        fare = fare.with_global_direction(GlobalDirection::parse(&dto.global_direction));
    }
    if let Some(basis) = &dto.fare_basis {
        fare = fare.with_fare_basis(basis);
    }
    if let Some(code) = &dto.booking_code {
        fare = fare.with_booking_code(code);
    }
    Ok(fare)
}

pub(super) fn convert_market(
    dto: &MarketDto,
    programs: &Programs,
    all_programs: &[Arc<BrandProgram>],
    registry: &mut BrandRegistry,
) -> Result<(Arc<TravelMarket>, Vec<FareCandidate>), SnapshotError> {
    let segments = dto
        .segments
        .iter()
        .map(convert_segment)
        .collect::<Result<Vec<_>, _>>()?;
    let indices = qualify(&dto.qualified, programs, all_programs, registry)?;

    let mut market = TravelMarket::new(segments, carrier(&dto.carrier)?)?
        .with_global_direction(GlobalDirection::parse(&dto.global_direction))
        .with_brand_program_indices(indices);
    if let Some(id) = dto.brand_market_id {
        market = market.with_brand_market_id(MarketId(id));
    }
    if let Some(d) = &dto.travel_date {
        market = market.with_travel_date(date(d)?);
    }
    if let Some(code) = &dto.exchange_original_brand {
        market = market.with_exchange_original_brand(brand_code(code)?);
    }

    let market = Arc::new(market);
    let fares = dto
        .fares
        .iter()
        .map(|f| convert_fare(f, &market))
        .collect::<Result<Vec<_>, _>>()?;
    Ok((market, fares))
}
