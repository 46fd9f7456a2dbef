//! Wire types for market commands.

use crate::shared::TradeCmd;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct SymbolArgs<'a> {
    pub symbol: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarginTradeArgs<'a> {
    pub symbol: &'a str,
    pub volume: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitCalculationArgs<'a> {
    pub close_price: f64,
    pub cmd: TradeCmd,
    pub open_price: f64,
    pub symbol: &'a str,
    pub volume: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarginTradeReply {
    pub margin: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProfitReply {
    pub profit: f64,
}
