//! Travel markets and their segments.

use chrono::NaiveDate;

use super::{BrandCode, CarrierCode, DomainError, GlobalDirection, LocCode};

/// Identifier of a journey leg within an itinerary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LegId(pub u16);

/// Identifier of a branding market, as assigned by the branding service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarketId(pub u32);

/// A single travel segment of a market.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TravelSegment {
    pub board_city: LocCode,
    pub off_city: LocCode,
    pub origin_airport: LocCode,
    pub destination_airport: LocCode,
    pub leg_id: LegId,
    /// False for surface (ARUNK) segments.
    pub is_air: bool,
}

impl TravelSegment {
    /// Create an air segment where city and airport codes coincide.
    pub fn air(board: LocCode, off: LocCode, leg_id: LegId) -> Self {
        Self {
            board_city: board,
            off_city: off,
            origin_airport: board,
            destination_airport: off,
            leg_id,
            is_air: true,
        }
    }

    /// Whether `loc` names the boarding city or airport.
    pub fn boards_at(&self, loc: &LocCode) -> bool {
        self.board_city == *loc || self.origin_airport == *loc
    }

    /// Whether `loc` names the deplaning city or airport.
    pub fn gets_off_at(&self, loc: &LocCode) -> bool {
        self.off_city == *loc || self.destination_airport == *loc
    }
}

/// Board and off points of one leg as seen by a market.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegSpan<'a> {
    pub leg_id: LegId,
    pub first: &'a TravelSegment,
    pub last: &'a TravelSegment,
}

/// A fare market: the travel being priced, shared by all fares quoted on it.
#[derive(Debug, Clone)]
pub struct TravelMarket {
    segments: Vec<TravelSegment>,
    pub governing_carrier: CarrierCode,
    pub global_direction: GlobalDirection,
    /// Brand of the original ticket for markets created by an exchange.
    pub exchange_original_brand: Option<BrandCode>,
    /// Registry indices of the qualified brands applicable to this market.
    pub brand_program_indices: Vec<usize>,
    /// Branding market id, used by fare display lookups.
    pub brand_market_id: Option<MarketId>,
    pub travel_date: Option<NaiveDate>,
}

impl TravelMarket {
    /// Create a market over the given segments.
    ///
    /// At least one segment must be an air segment.
    pub fn new(
        segments: Vec<TravelSegment>,
        governing_carrier: CarrierCode,
    ) -> Result<Self, DomainError> {
        if segments.is_empty() {
            return Err(DomainError::EmptyMarket);
        }
        if !segments.iter().any(|s| s.is_air) {
            return Err(DomainError::NoAirSegment);
        }
        Ok(Self {
            segments,
            governing_carrier,
            global_direction: GlobalDirection::NoDir,
            exchange_original_brand: None,
            brand_program_indices: Vec::new(),
            brand_market_id: None,
            travel_date: None,
        })
    }

    pub fn with_global_direction(mut self, global_direction: GlobalDirection) -> Self {
        self.global_direction = global_direction;
        self
    }

    pub fn with_brand_program_indices(mut self, indices: Vec<usize>) -> Self {
        self.brand_program_indices = indices;
        self
    }

    pub fn with_exchange_original_brand(mut self, brand: BrandCode) -> Self {
        self.exchange_original_brand = Some(brand);
        self
    }

    pub fn with_brand_market_id(mut self, id: MarketId) -> Self {
        self.brand_market_id = Some(id);
        self
    }

    pub fn with_travel_date(mut self, date: NaiveDate) -> Self {
        self.travel_date = Some(date);
        self
    }

    pub fn segments(&self) -> &[TravelSegment] {
        &self.segments
    }

    /// Air segments in travel order.
    pub fn air_segments(&self) -> impl Iterator<Item = &TravelSegment> {
        self.segments.iter().filter(|s| s.is_air)
    }

    /// First segment of the market.
    pub fn first_segment(&self) -> &TravelSegment {
        // Construction guarantees at least one segment
        &self.segments[0]
    }

    /// Last segment of the market.
    pub fn last_segment(&self) -> &TravelSegment {
        &self.segments[self.segments.len() - 1]
    }

    /// Whether this market was derived from an already issued ticket.
    pub fn is_exchange(&self) -> bool {
        self.exchange_original_brand.is_some()
    }

    /// Group consecutive air segments by leg id.
    ///
    /// Each span records the first and last air segment of the leg, so the
    /// leg's board point is `first.board_city` and its off point is
    /// `last.off_city`.
    pub fn legs(&self) -> Vec<LegSpan<'_>> {
        let mut spans: Vec<LegSpan<'_>> = Vec::new();
        for seg in self.air_segments() {
            match spans.last_mut() {
                Some(span) if span.leg_id == seg.leg_id => span.last = seg,
                _ => spans.push(LegSpan {
                    leg_id: seg.leg_id,
                    first: seg,
                    last: seg,
                }),
            }
        }
        spans
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(s: &str) -> LocCode {
        LocCode::parse(s).unwrap()
    }

    fn carrier() -> CarrierCode {
        CarrierCode::parse("QF").unwrap()
    }

    #[test]
    fn empty_market_rejected() {
        assert!(matches!(
            TravelMarket::new(vec![], carrier()),
            Err(DomainError::EmptyMarket)
        ));
    }

    #[test]
    fn surface_only_market_rejected() {
        let mut seg = TravelSegment::air(loc("SYD"), loc("MEL"), LegId(0));
        seg.is_air = false;
        assert!(matches!(
            TravelMarket::new(vec![seg], carrier()),
            Err(DomainError::NoAirSegment)
        ));
    }

    #[test]
    fn legs_group_consecutive_segments() {
        let market = TravelMarket::new(
            vec![
                TravelSegment::air(loc("SYD"), loc("MEL"), LegId(0)),
                TravelSegment::air(loc("MEL"), loc("AKL"), LegId(0)),
                TravelSegment::air(loc("AKL"), loc("SYD"), LegId(1)),
            ],
            carrier(),
        )
        .unwrap();

        let legs = market.legs();
        assert_eq!(legs.len(), 2);
        assert_eq!(legs[0].leg_id, LegId(0));
        assert_eq!(legs[0].first.board_city, loc("SYD"));
        assert_eq!(legs[0].last.off_city, loc("AKL"));
        assert_eq!(legs[1].first.board_city, loc("AKL"));
    }

    #[test]
    fn legs_skip_surface_segments() {
        let mut arunk = TravelSegment::air(loc("AKL"), loc("ZQN"), LegId(0));
        arunk.is_air = false;
        let market = TravelMarket::new(
            vec![
                TravelSegment::air(loc("SYD"), loc("AKL"), LegId(0)),
                arunk,
                TravelSegment::air(loc("ZQN"), loc("ROT"), LegId(0)),
            ],
            carrier(),
        )
        .unwrap();

        let legs = market.legs();
        assert_eq!(legs.len(), 1);
        assert_eq!(legs[0].last.off_city, loc("ROT"));
    }

    #[test]
    fn airport_codes_match_board_and_off() {
        let seg = TravelSegment {
            board_city: loc("NYC"),
            off_city: loc("LON"),
            origin_airport: loc("JFK"),
            destination_airport: loc("LHR"),
            leg_id: LegId(0),
            is_air: true,
        };
        assert!(seg.boards_at(&loc("NYC")));
        assert!(seg.boards_at(&loc("JFK")));
        assert!(!seg.boards_at(&loc("LHR")));
        assert!(seg.gets_off_at(&loc("LON")));
        assert!(seg.gets_off_at(&loc("LHR")));
    }

    #[test]
    fn exchange_marker() {
        let market = TravelMarket::new(
            vec![TravelSegment::air(loc("SYD"), loc("MEL"), LegId(0))],
            carrier(),
        )
        .unwrap();
        assert!(!market.is_exchange());
        let market = market.with_exchange_original_brand(BrandCode::parse("FL").unwrap());
        assert!(market.is_exchange());
    }
}
