//! Pricing Layer
//!
//! Price lookup seam and its implementations.

mod http;
mod mock;
mod provider;

pub use http::HttpPriceProvider;
pub use mock::{MockPriceProvider, DEFAULT_DELAY, FALLBACK_RANGE};
pub use provider::{PriceMap, PriceProvider};
