//! Price Provider Trait

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::DomainResult;

/// Product name -> price per unit
pub type PriceMap = HashMap<String, f64>;

/// External source of current prices.
///
/// Results may be partial: names the provider knows nothing about are simply
/// absent from the returned map.
#[async_trait]
pub trait PriceProvider: Send + Sync {
    async fn fetch_prices(&self, names: &[String]) -> DomainResult<PriceMap>;
}

#[async_trait]
impl<P: PriceProvider + ?Sized> PriceProvider for Box<P> {
    async fn fetch_prices(&self, names: &[String]) -> DomainResult<PriceMap> {
        (**self).fetch_prices(names).await
    }
}
