//! Validated reference codes: carriers, locations and brands.

use std::fmt;

/// Error returned when parsing an invalid carrier code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid carrier code: {reason}")]
pub struct InvalidCarrierCode {
    reason: &'static str,
}

/// A 2-character IATA airline designator.
///
/// Designators are uppercase ASCII letters or digits ("AA", "LH", "9W").
/// The industry pseudo-carrier `YY` is a valid designator.
///
/// # Examples
///
/// ```
/// use fare_branding::domain::CarrierCode;
///
/// let lh = CarrierCode::parse("LH").unwrap();
/// assert_eq!(lh.as_str(), "LH");
/// assert!(CarrierCode::parse("9W").is_ok());
///
/// assert!(CarrierCode::parse("lh").is_err());
/// assert!(CarrierCode::parse("LHX").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CarrierCode([u8; 2]);

impl CarrierCode {
    /// The industry (multi-carrier) designator.
    pub const INDUSTRY: CarrierCode = CarrierCode(*b"YY");

    /// Parse a carrier code from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidCarrierCode> {
        let bytes = s.as_bytes();

        if bytes.len() != 2 {
            return Err(InvalidCarrierCode {
                reason: "must be exactly 2 characters",
            });
        }

        for &b in bytes {
            if !(b.is_ascii_uppercase() || b.is_ascii_digit()) {
                return Err(InvalidCarrierCode {
                    reason: "must be uppercase ASCII letters or digits",
                });
            }
        }

        Ok(CarrierCode([bytes[0], bytes[1]]))
    }

    /// Returns the designator as a string slice.
    pub fn as_str(&self) -> &str {
        // SAFETY: We only store ASCII letters and digits
        std::str::from_utf8(&self.0).unwrap()
    }

    /// Whether this is the industry designator `YY`.
    pub fn is_industry(&self) -> bool {
        *self == Self::INDUSTRY
    }
}

impl fmt::Debug for CarrierCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CarrierCode({})", self.as_str())
    }
}

impl fmt::Display for CarrierCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an invalid location code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid location code: {reason}")]
pub struct InvalidLocCode {
    reason: &'static str,
}

/// A 3-letter IATA city or airport code.
///
/// Brand programs name their origin with either a city ("NYC") or an
/// airport ("JFK"); both share this representation.
///
/// # Examples
///
/// ```
/// use fare_branding::domain::LocCode;
///
/// let syd = LocCode::parse("SYD").unwrap();
/// assert_eq!(syd.to_string(), "SYD");
/// assert!(LocCode::parse("SY").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocCode([u8; 3]);

impl LocCode {
    /// Parse a location code from a string.
    ///
    /// The input must be exactly 3 uppercase ASCII letters (A-Z).
    pub fn parse(s: &str) -> Result<Self, InvalidLocCode> {
        let bytes = s.as_bytes();

        if bytes.len() != 3 {
            return Err(InvalidLocCode {
                reason: "must be exactly 3 characters",
            });
        }

        for &b in bytes {
            if !b.is_ascii_uppercase() {
                return Err(InvalidLocCode {
                    reason: "must be uppercase ASCII letters A-Z",
                });
            }
        }

        Ok(LocCode([bytes[0], bytes[1], bytes[2]]))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        // SAFETY: We only store valid ASCII uppercase letters
        std::str::from_utf8(&self.0).unwrap()
    }
}

impl fmt::Debug for LocCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LocCode({})", self.as_str())
    }
}

impl fmt::Display for LocCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an invalid brand code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid brand code: {reason}")]
pub struct InvalidBrandCode {
    reason: &'static str,
}

/// Maximum length of a brand code.
const MAX_BRAND_CODE_LEN: usize = 10;

/// A carrier-assigned brand identifier ("FL", "BASIC", "PREM1").
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BrandCode(String);

impl BrandCode {
    /// Parse a brand code: 1 to 10 uppercase ASCII letters or digits.
    pub fn parse(s: &str) -> Result<Self, InvalidBrandCode> {
        if s.is_empty() {
            return Err(InvalidBrandCode {
                reason: "must not be empty",
            });
        }
        if s.len() > MAX_BRAND_CODE_LEN {
            return Err(InvalidBrandCode {
                reason: "must be at most 10 characters",
            });
        }
        if !s
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
        {
            return Err(InvalidBrandCode {
                reason: "must be uppercase ASCII letters or digits",
            });
        }
        Ok(BrandCode(s.to_string()))
    }

    /// Returns the brand code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BrandCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BrandCode({})", self.0)
    }
}

impl fmt::Display for BrandCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a brand program, unique within a transaction.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProgramId(String);

impl ProgramId {
    pub fn new(id: impl Into<String>) -> Self {
        ProgramId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ProgramId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProgramId({})", self.0)
    }
}

impl fmt::Display for ProgramId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_carriers() {
        assert!(CarrierCode::parse("AA").is_ok());
        assert!(CarrierCode::parse("LH").is_ok());
        assert!(CarrierCode::parse("9W").is_ok());
        assert!(CarrierCode::parse("YY").unwrap().is_industry());
        assert!(!CarrierCode::parse("QF").unwrap().is_industry());
    }

    #[test]
    fn reject_bad_carriers() {
        assert!(CarrierCode::parse("").is_err());
        assert!(CarrierCode::parse("A").is_err());
        assert!(CarrierCode::parse("AAA").is_err());
        assert!(CarrierCode::parse("aa").is_err());
        assert!(CarrierCode::parse("A-").is_err());
    }

    #[test]
    fn carrier_display_and_debug() {
        let code = CarrierCode::parse("QF").unwrap();
        assert_eq!(format!("{}", code), "QF");
        assert_eq!(format!("{:?}", code), "CarrierCode(QF)");
    }

    #[test]
    fn parse_valid_locations() {
        assert!(LocCode::parse("SYD").is_ok());
        assert!(LocCode::parse("NYC").is_ok());
        assert_eq!(LocCode::parse("MEL").unwrap().as_str(), "MEL");
    }

    #[test]
    fn reject_bad_locations() {
        assert!(LocCode::parse("SY").is_err());
        assert!(LocCode::parse("SYDN").is_err());
        assert!(LocCode::parse("syd").is_err());
        assert!(LocCode::parse("S1D").is_err());
    }

    #[test]
    fn parse_brand_codes() {
        assert!(BrandCode::parse("FL").is_ok());
        assert!(BrandCode::parse("PREM1").is_ok());
        assert!(BrandCode::parse("ABCDEFGHIJ").is_ok());
        assert!(BrandCode::parse("").is_err());
        assert!(BrandCode::parse("ABCDEFGHIJK").is_err());
        assert!(BrandCode::parse("fl").is_err());
        assert!(BrandCode::parse("F L").is_err());
    }

    #[test]
    fn brand_code_display() {
        let code = BrandCode::parse("BASIC").unwrap();
        assert_eq!(code.to_string(), "BASIC");
        assert_eq!(format!("{:?}", code), "BrandCode(BASIC)");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any 2 uppercase letters or digits form a carrier code
        #[test]
        fn carrier_roundtrip(s in "[A-Z0-9]{2}") {
            let code = CarrierCode::parse(&s).unwrap();
            prop_assert_eq!(code.as_str(), s.as_str());
        }

        /// Any 3 uppercase letters form a location code
        #[test]
        fn loc_roundtrip(s in "[A-Z]{3}") {
            let code = LocCode::parse(&s).unwrap();
            prop_assert_eq!(code.as_str(), s.as_str());
        }

        /// Lowercase location codes are always rejected
        #[test]
        fn loc_lowercase_rejected(s in "[a-z]{3}") {
            prop_assert!(LocCode::parse(&s).is_err());
        }

        /// Brand codes up to 10 characters parse
        #[test]
        fn brand_roundtrip(s in "[A-Z0-9]{1,10}") {
            let code = BrandCode::parse(&s).unwrap();
            prop_assert_eq!(code.as_str(), s.as_str());
        }

        /// Over-long brand codes are rejected
        #[test]
        fn brand_too_long_rejected(s in "[A-Z0-9]{11,20}") {
            prop_assert!(BrandCode::parse(&s).is_err());
        }
    }
}
