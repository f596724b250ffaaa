//! HTTP Price Provider
//!
//! Asks a remote price service for current prices. The service receives
//! `{"names": [...]}` and answers with a JSON object mapping names to prices.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use super::provider::{PriceMap, PriceProvider};
use crate::domain::{DomainError, DomainResult};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Serialize)]
struct PriceQuery<'a> {
    names: &'a [String],
}

pub struct HttpPriceProvider {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpPriceProvider {
    pub fn new(endpoint: impl Into<String>) -> DomainResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Drop entries that could never be a valid price
fn sanitize(prices: PriceMap) -> PriceMap {
    prices
        .into_iter()
        .filter(|(name, price)| {
            let valid = price.is_finite() && *price >= 0.0;
            if !valid {
                log::warn!("Ignoring invalid price {} for {}", price, name);
            }
            valid
        })
        .collect()
}

#[async_trait]
impl PriceProvider for HttpPriceProvider {
    async fn fetch_prices(&self, names: &[String]) -> DomainResult<PriceMap> {
        log::debug!("POST {} ({} names)", self.endpoint, names.len());

        let response = self
            .client
            .post(&self.endpoint)
            .json(&PriceQuery { names })
            .send()
            .await
            .map_err(|e| DomainError::Provider(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::Provider(format!(
                "{} answered with status {}",
                self.endpoint, status
            )));
        }

        let prices: PriceMap = response
            .json()
            .await
            .map_err(|e| DomainError::Provider(format!("malformed price response: {}", e)))?;
        Ok(sanitize(prices))
    }
}
