//! Directionality and global direction types.

use std::fmt;

/// Direction in which a brand program (or a fare) applies to a market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Applies in both directions.
    #[default]
    Bothways,
    /// Applies from the market origin (outbound).
    Original,
    /// Applies towards the market origin (inbound).
    Reversed,
}

impl Direction {
    /// Two directions are consistent if either side is `Bothways` or both
    /// are the same.
    ///
    /// ```
    /// use fare_branding::domain::Direction;
    ///
    /// assert!(Direction::Bothways.is_consistent_with(Direction::Reversed));
    /// assert!(Direction::Original.is_consistent_with(Direction::Original));
    /// assert!(!Direction::Original.is_consistent_with(Direction::Reversed));
    /// ```
    pub fn is_consistent_with(self, other: Direction) -> bool {
        self == Direction::Bothways || other == Direction::Bothways || self == other
    }

    /// Merge two observations of the same leg; disagreement yields `Bothways`.
    pub fn merge(self, other: Direction) -> Direction {
        if self == other {
            self
        } else {
            Direction::Bothways
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Bothways => "BOTHWAYS",
            Direction::Original => "ORIGINAL",
            Direction::Reversed => "REVERSED",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Published directionality of a fare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FareDirectionality {
    /// Fare applies from its origin.
    From,
    /// Fare applies to its origin.
    To,
    /// Fare applies either way.
    #[default]
    Both,
}

impl FareDirectionality {
    /// The program direction this fare directionality corresponds to.
    pub fn as_direction(self) -> Direction {
        match self {
            FareDirectionality::From => Direction::Original,
            FareDirectionality::To => Direction::Reversed,
            FareDirectionality::Both => Direction::Bothways,
        }
    }

    /// Parse the published code: `FROM`, `TO` or `BOTH` (blank means both).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "FROM" | "F" => Some(FareDirectionality::From),
            "TO" | "T" => Some(FareDirectionality::To),
            "BOTH" | "B" | "" => Some(FareDirectionality::Both),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FareDirectionality::From => "FROM",
            FareDirectionality::To => "TO",
            FareDirectionality::Both => "BOTH",
        }
    }
}

impl fmt::Display for FareDirectionality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse geographic routing classification (ATPCO global indicator).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GlobalDirection {
    /// No global direction configured.
    #[default]
    NoDir,
    AF,
    AP,
    AT,
    CA,
    CT,
    DI,
    DO,
    DU,
    EH,
    EM,
    EU,
    FE,
    IN,
    ME,
    NA,
    NP,
    PA,
    PE,
    PN,
    PO,
    PV,
    RU,
    RW,
    SA,
    SN,
    SP,
    TB,
    TS,
    TT,
    US,
    WH,
    XX,
    /// Wildcard: matches any global direction.
    ZZ,
    /// A value present in reference data that has no published code.
    Unpublished,
}

const PUBLISHED: &[(GlobalDirection, &str)] = &[
    (GlobalDirection::AF, "AF"),
    (GlobalDirection::AP, "AP"),
    (GlobalDirection::AT, "AT"),
    (GlobalDirection::CA, "CA"),
    (GlobalDirection::CT, "CT"),
    (GlobalDirection::DI, "DI"),
    (GlobalDirection::DO, "DO"),
    (GlobalDirection::DU, "DU"),
    (GlobalDirection::EH, "EH"),
    (GlobalDirection::EM, "EM"),
    (GlobalDirection::EU, "EU"),
    (GlobalDirection::FE, "FE"),
    (GlobalDirection::IN, "IN"),
    (GlobalDirection::ME, "ME"),
    (GlobalDirection::NA, "NA"),
    (GlobalDirection::NP, "NP"),
    (GlobalDirection::PA, "PA"),
    (GlobalDirection::PE, "PE"),
    (GlobalDirection::PN, "PN"),
    (GlobalDirection::PO, "PO"),
    (GlobalDirection::PV, "PV"),
    (GlobalDirection::RU, "RU"),
    (GlobalDirection::RW, "RW"),
    (GlobalDirection::SA, "SA"),
    (GlobalDirection::SN, "SN"),
    (GlobalDirection::SP, "SP"),
    (GlobalDirection::TB, "TB"),
    (GlobalDirection::TS, "TS"),
    (GlobalDirection::TT, "TT"),
    (GlobalDirection::US, "US"),
    (GlobalDirection::WH, "WH"),
    (GlobalDirection::XX, "XX"),
    (GlobalDirection::ZZ, "ZZ"),
];

impl GlobalDirection {
    /// Parse a global direction code.
    ///
    /// A blank string is `NoDir`; an unrecognised code is kept as
    /// `Unpublished` rather than rejected, since reference data may carry
    /// values this engine does not know.
    ///
    /// ```
    /// use fare_branding::domain::GlobalDirection;
    ///
    /// assert_eq!(GlobalDirection::parse("AT"), GlobalDirection::AT);
    /// assert_eq!(GlobalDirection::parse(""), GlobalDirection::NoDir);
    /// assert_eq!(GlobalDirection::parse("Q9"), GlobalDirection::Unpublished);
    /// ```
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() {
            return GlobalDirection::NoDir;
        }
        PUBLISHED
            .iter()
            .find(|(_, code)| *code == s)
            .map(|(dir, _)| *dir)
            .unwrap_or(GlobalDirection::Unpublished)
    }

    /// The published code, or an empty string for `NoDir`/`Unpublished`.
    pub fn as_str(&self) -> &'static str {
        PUBLISHED
            .iter()
            .find(|(dir, _)| dir == self)
            .map(|(_, code)| *code)
            .unwrap_or("")
    }

    pub fn is_wildcard(&self) -> bool {
        *self == GlobalDirection::ZZ
    }
}

impl fmt::Display for GlobalDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
