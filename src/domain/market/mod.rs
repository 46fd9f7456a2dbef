//! Market domain: server time, instruments, margin and profit estimates.

pub mod client;
pub mod wire;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Server clock as reported by `getServerTime`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerTime {
    /// Epoch milliseconds.
    pub time: i64,
    /// Server-local rendering of `time`.
    pub time_string: String,
}

// ─── Symbol ──────────────────────────────────────────────────────────────────

/// One tradable instrument.
///
/// The commonly used fields are typed; everything else the server sends is
/// kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolRecord {
    pub symbol: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category_name: String,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub currency_profit: String,
    #[serde(default)]
    pub precision: u32,
    #[serde(default)]
    pub bid: f64,
    #[serde(default)]
    pub ask: f64,
    #[serde(default)]
    pub lot_min: f64,
    #[serde(default)]
    pub lot_max: f64,
    #[serde(default)]
    pub lot_step: f64,
    #[serde(default)]
    pub contract_size: f64,
    #[serde(default)]
    pub leverage: f64,
    #[serde(default)]
    pub time: i64,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl SymbolRecord {
    pub fn spread(&self) -> f64 {
        self.ask - self.bid
    }
}

/// Open/close price pair for profit estimates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePair {
    pub open: f64,
    pub close: f64,
}

impl PricePair {
    pub fn new(open: f64, close: f64) -> Self {
        Self { open, close }
    }
}
