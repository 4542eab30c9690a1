pub mod snapshot;

pub use snapshot::{Candle, Fundamentals, MarketSnapshot};
