//! Wire types for trade commands.

use serde::{Deserialize, Serialize};

use crate::domain::trade::RequestStatus;
use crate::shared::{TradeCmd, TransactionType};

/// `tradeTransInfo` block of a `tradeTransaction`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeTransInfo {
    pub cmd: TradeCmd,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub volume: f64,
    pub order: i64,
    pub sl: f64,
    pub tp: f64,
    pub symbol: String,
    pub price: f64,
    pub expiration: i64,
    pub offset: i64,
    pub custom_comment: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeTransactionArgs {
    pub trade_trans_info: TradeTransInfo,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderReply {
    pub order: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderArgs {
    pub order: i64,
}

/// Reply of `tradeTransactionStatus`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeStatusReply {
    pub request_status: RequestStatus,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub custom_comment: Option<String>,
    #[serde(default)]
    pub ask: f64,
    #[serde(default)]
    pub bid: f64,
}
