//! Market responses from the branding service.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::{CarrierCode, MarketId};

use super::BrandProgram;

/// Programs a carrier files for one branding market.
#[derive(Debug, Clone)]
pub struct MarketResponse {
    pub market_id: MarketId,
    pub carrier: CarrierCode,
    pub programs: Vec<Arc<BrandProgram>>,
}

/// Source of branding reference data.
///
/// This abstraction keeps the engine free of any storage concerns and
/// allows tests to supply data directly.
pub trait BrandingData: Send + Sync {
    /// Responses filed for a market, empty if none.
    fn market_responses(&self, market_id: MarketId) -> &[MarketResponse];

    /// Whether the transaction received any branding data at all.
    fn has_data(&self) -> bool;
}

/// In-memory snapshot of branding reference data.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBrandingData {
    responses: HashMap<MarketId, Vec<MarketResponse>>,
}

impl InMemoryBrandingData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, response: MarketResponse) {
        self.responses
            .entry(response.market_id)
            .or_default()
            .push(response);
    }

    pub fn len(&self) -> usize {
        self.responses.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }
}

impl BrandingData for InMemoryBrandingData {
    fn market_responses(&self, market_id: MarketId) -> &[MarketResponse] {
        self.responses
            .get(&market_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn has_data(&self) -> bool {
        !self.responses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_snapshot_has_no_data() {
        let data = InMemoryBrandingData::new();
        assert!(!data.has_data());
        assert!(data.market_responses(MarketId(1)).is_empty());
    }

    #[test]
    fn responses_grouped_by_market() {
        let mut data = InMemoryBrandingData::new();
        for carrier in ["QF", "VA"] {
            data.add(MarketResponse {
                market_id: MarketId(1),
                carrier: CarrierCode::parse(carrier).unwrap(),
                programs: vec![],
            });
        }
        data.add(MarketResponse {
            market_id: MarketId(2),
            carrier: CarrierCode::parse("NZ").unwrap(),
            programs: vec![],
        });

        assert!(data.has_data());
        assert_eq!(data.len(), 3);
        assert_eq!(data.market_responses(MarketId(1)).len(), 2);
        assert_eq!(data.market_responses(MarketId(2)).len(), 1);
        assert!(data.market_responses(MarketId(3)).is_empty());
    }
}
