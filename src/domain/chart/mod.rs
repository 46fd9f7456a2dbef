//! Chart domain: candles, series metadata and the resolver sub-client.

pub mod client;
mod convert;
pub mod window;
pub mod wire;

use serde::Serialize;

pub use convert::shape_series;
pub use window::{RangeWindow, RelativeWindow};

// ─── Candle ──────────────────────────────────────────────────────────────────

/// One OHLC record. Prices are the server's raw integers-as-floats; `close`,
/// `high` and `low` are offsets from `open`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candle {
    pub datetime: String,
    pub open: f64,
    pub close: f64,
    pub high: f64,
    pub low: f64,
}

impl Candle {
    /// `(open + close) / 10^digits`, the decimal close price.
    pub fn close_price(&self, digits: u32) -> f64 {
        (self.open + self.close) / 10f64.powi(digits as i32)
    }
}

// ─── Series ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeriesMeta {
    pub digits: u32,
    /// Number of candles in the series. Smaller than the requested count
    /// when the server returns fewer candles.
    pub count: usize,
}

/// A shaped chart reply: one metadata record plus candles in server order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandleSeries {
    pub meta: SeriesMeta,
    pub candles: Vec<Candle>,
}

impl CandleSeries {
    pub fn latest(&self) -> Option<&Candle> {
        self.candles.last()
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    /// Flatten into `[meta, candle, candle, ...]`.
    pub fn into_records(self) -> Vec<ChartRecord> {
        let mut records = Vec::with_capacity(self.candles.len() + 1);
        records.push(ChartRecord::Meta(self.meta));
        records.extend(self.candles.into_iter().map(ChartRecord::Candle));
        records
    }
}

/// Element of the flat record sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChartRecord {
    Meta(SeriesMeta),
    Candle(Candle),
}
