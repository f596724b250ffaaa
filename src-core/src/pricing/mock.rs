//! Mock Price Provider
//!
//! Serves prices from a fixed table after an artificial delay. Unknown names
//! either get a random price or are left out of the result.

use std::collections::HashMap;
use std::ops::Range;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;

use super::provider::{PriceMap, PriceProvider};
use crate::domain::DomainResult;

pub const DEFAULT_DELAY: Duration = Duration::from_millis(800);

/// Range random fallback prices are drawn from
pub const FALLBACK_RANGE: Range<u32> = 30..500;

const KNOWN_PRICES: &[(&str, f64)] = &[
    ("Apples", 120.0),
    ("Bananas", 90.0),
    ("Cucumbers", 150.0),
    ("Tomatoes", 180.0),
    ("Potatoes", 45.0),
    ("Carrots", 60.0),
    ("Onions", 40.0),
    ("Milk", 85.0),
    ("Cheese", 450.0),
    ("Yogurt", 75.0),
    ("Cottage Cheese", 230.0),
    ("Sour Cream", 110.0),
    ("Chicken", 230.0),
    ("Beef", 450.0),
    ("Pork", 320.0),
    ("Salmon", 650.0),
    ("Cod", 380.0),
    ("Rice", 95.0),
    ("Pasta", 70.0),
    ("Buckwheat", 85.0),
    ("Flour", 65.0),
    ("Sugar", 80.0),
    ("Salt", 35.0),
    ("Water", 45.0),
    ("Juice", 120.0),
    ("Tea", 150.0),
    ("Coffee", 350.0),
];

#[derive(Debug, Clone)]
pub struct MockPriceProvider {
    known: HashMap<String, f64>,
    delay: Duration,
    random_fallback: bool,
}

impl Default for MockPriceProvider {
    fn default() -> Self {
        Self {
            known: KNOWN_PRICES
                .iter()
                .map(|(name, price)| (name.to_string(), *price))
                .collect(),
            delay: DEFAULT_DELAY,
            random_fallback: true,
        }
    }
}

impl MockPriceProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Same table, no delay, no random prices
    pub fn deterministic() -> Self {
        Self::default()
            .with_delay(Duration::ZERO)
            .with_random_fallback(false)
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_random_fallback(mut self, enabled: bool) -> Self {
        self.random_fallback = enabled;
        self
    }

    pub fn with_price(mut self, name: impl Into<String>, price: f64) -> Self {
        self.known.insert(name.into(), price);
        self
    }
}

#[async_trait]
impl PriceProvider for MockPriceProvider {
    async fn fetch_prices(&self, names: &[String]) -> DomainResult<PriceMap> {
        log::debug!("Fetching prices for {} names", names.len());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let mut rng = rand::thread_rng();
        let mut prices = PriceMap::with_capacity(names.len());
        for name in names {
            if let Some(price) = self.known.get(name) {
                prices.insert(name.clone(), *price);
            } else if self.random_fallback {
                prices.insert(name.clone(), f64::from(rng.gen_range(FALLBACK_RANGE)));
            }
        }
        Ok(prices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_known_prices() {
        let provider = MockPriceProvider::deterministic();
        let prices = provider.fetch_prices(&names(&["Milk", "Coffee"])).await.unwrap();
        assert_eq!(prices.get("Milk"), Some(&85.0));
        assert_eq!(prices.get("Coffee"), Some(&350.0));
    }

    #[tokio::test]
    async fn test_unknown_names_omitted_without_fallback() {
        let provider = MockPriceProvider::deterministic().with_price("Caviar", 3000.0);
        let prices = provider
            .fetch_prices(&names(&["Caviar", "Dragon fruit"]))
            .await
            .unwrap();
        assert_eq!(prices.len(), 1);
        assert_eq!(prices["Caviar"], 3000.0);
    }

    #[tokio::test]
    async fn test_random_fallback_in_range() {
        let provider = MockPriceProvider::deterministic().with_random_fallback(true);
        let prices = provider.fetch_prices(&names(&["Dragon fruit"])).await.unwrap();
        let price = prices["Dragon fruit"];
        assert!(price >= 30.0 && price < 500.0);
        assert_eq!(price.fract(), 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_is_applied() {
        let provider = MockPriceProvider::new().with_random_fallback(false);
        let started = tokio::time::Instant::now();
        provider.fetch_prices(&names(&["Milk"])).await.unwrap();
        assert!(started.elapsed() >= DEFAULT_DELAY);
    }
}
