//! Airline brand eligibility resolution.
//!
//! Given priced fares and the brand programs filed for their markets, this
//! crate decides per program and brand whether each fare fails,
//! soft-passes or hard-passes, and whether the fare is usable.

pub mod diagnostics;
pub mod domain;
pub mod registry;
pub mod selector;
pub mod snapshot;
pub mod validator;
