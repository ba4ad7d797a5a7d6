//! Program direction relative to a travel market.
//!
//! A program filed from an origin applies outbound on legs that board at
//! that origin and inbound on legs that get off there. Directions observed
//! per leg are remembered for the rest of the pass in a [`DirectionCache`],
//! so markets sharing a leg agree on it.

use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::trace;

use crate::domain::{Direction, FareCandidate, FareDirectionality, LegId, LocCode, ProgramId, TravelMarket};
use crate::registry::BrandProgram;

/// Result of resolving a program's direction on a market.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectionResolution {
    /// False when no leg of the market could be classified; the program
    /// does not apply to the market.
    pub computed: bool,
    pub direction: Direction,
}

impl DirectionResolution {
    pub fn computed(direction: Direction) -> Self {
        Self {
            computed: true,
            direction,
        }
    }

    pub fn undetermined() -> Self {
        Self {
            computed: false,
            direction: Direction::Bothways,
        }
    }
}

/// Directional data derived for one program during a pass.
#[derive(Debug, Clone, Default)]
pub struct ProgramDirections {
    leg_directions: BTreeMap<LegId, Direction>,
    od_availability: HashSet<(LocCode, LocCode)>,
}

impl ProgramDirections {
    /// Record an observation for a leg; conflicting observations collapse
    /// to `Bothways`.
    fn record_leg(&mut self, leg: LegId, direction: Direction) {
        self.leg_directions
            .entry(leg)
            .and_modify(|d| *d = d.merge(direction))
            .or_insert(direction);
    }

    pub fn leg_direction(&self, leg: LegId) -> Option<Direction> {
        self.leg_directions.get(&leg).copied()
    }

    /// Whether the program was seen on a leg from `board` to `off`.
    pub fn has_availability(&self, board: LocCode, off: LocCode) -> bool {
        self.od_availability.contains(&(board, off))
    }
}

/// Pass-local directional data for every program resolved in the pass.
///
/// Created per batch and dropped with it; program reference data is never
/// modified.
#[derive(Debug, Clone, Default)]
pub struct DirectionCache {
    programs: HashMap<ProgramId, ProgramDirections>,
}

impl DirectionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn program(&self, id: &ProgramId) -> Option<&ProgramDirections> {
        self.programs.get(id)
    }

    fn entry(&mut self, id: &ProgramId) -> &mut ProgramDirections {
        self.programs.entry(id.clone()).or_default()
    }

    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }
}

/// Resolves the direction in which a program applies to a market.
#[derive(Debug, Clone, Copy)]
pub struct DirectionalityResolver {
    use_directionality: bool,
}

impl DirectionalityResolver {
    pub fn new(use_directionality: bool) -> Self {
        Self { use_directionality }
    }

    pub fn resolve(
        &self,
        program: &BrandProgram,
        market: &TravelMarket,
        cache: &mut DirectionCache,
    ) -> DirectionResolution {
        if self.use_directionality {
            resolve_by_legs(program, market, cache)
        } else {
            DirectionResolution::computed(resolve_by_endpoints(program, market))
        }
    }

    /// Whether a fare's directionality agrees with the program's.
    pub fn is_consistent(
        &self,
        fare: &FareCandidate,
        program: &BrandProgram,
        program_direction: Direction,
        shopping: bool,
    ) -> bool {
        if self.use_directionality {
            fare.is_direction_consistent(program_direction)
        } else if shopping {
            legacy_match_shopping(fare, program)
        } else {
            legacy_match(fare, program)
        }
    }
}

fn resolve_by_legs(
    program: &BrandProgram,
    market: &TravelMarket,
    cache: &mut DirectionCache,
) -> DirectionResolution {
    let Some(origin) = program.origin_loc else {
        return DirectionResolution::computed(Direction::Bothways);
    };

    let directions = cache.entry(&program.id);
    let mut market_direction: Option<Direction> = None;

    for leg in market.legs() {
        let observed = if leg.first.boards_at(&origin) {
            Some(Direction::Original)
        } else if leg.last.gets_off_at(&origin) {
            Some(Direction::Reversed)
        } else {
            None
        };

        directions
            .od_availability
            .insert((leg.first.board_city, leg.last.off_city));
        if let Some(d) = observed {
            directions.record_leg(leg.leg_id, d);
        }

        if let Some(recorded) = directions.leg_direction(leg.leg_id) {
            market_direction = Some(match market_direction {
                Some(d) => d.merge(recorded),
                None => recorded,
            });
        }
    }

    match market_direction {
        Some(direction) => DirectionResolution::computed(direction),
        None => {
            trace!(program = %program.id, %origin, "no leg touches program origin");
            DirectionResolution::undetermined()
        }
    }
}

fn resolve_by_endpoints(program: &BrandProgram, market: &TravelMarket) -> Direction {
    match program.origin_loc {
        None => Direction::Bothways,
        Some(origin) if market.first_segment().boards_at(&origin) => Direction::Original,
        Some(origin) if market.last_segment().gets_off_at(&origin) => Direction::Reversed,
        Some(_) => Direction::Bothways,
    }
}

/// Endpoint comparison used when pricing without leg directionality.
pub fn legacy_match(fare: &FareCandidate, program: &BrandProgram) -> bool {
    let Some(origin) = program.origin_loc else {
        return true;
    };
    let market = fare.market();
    match fare.directionality {
        FareDirectionality::Both => true,
        FareDirectionality::From => market.first_segment().boards_at(&origin),
        FareDirectionality::To => market.last_segment().gets_off_at(&origin),
    }
}

/// Shopping variant of [`legacy_match`]: any air segment of the market may
/// carry the program origin.
pub fn legacy_match_shopping(fare: &FareCandidate, program: &BrandProgram) -> bool {
    let Some(origin) = program.origin_loc else {
        return true;
    };
    let mut air = fare.market().air_segments();
    match fare.directionality {
        FareDirectionality::Both => true,
        FareDirectionality::From => air.any(|s| s.boards_at(&origin)),
        FareDirectionality::To => air.any(|s| s.gets_off_at(&origin)),
    }
}
