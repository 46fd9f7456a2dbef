//! History domain: closed trades within a time window.

pub mod client;
pub mod wire;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::chart::RelativeWindow;
use crate::shared::TradeCmd;

/// Bounds for a trade-history query.
///
/// Textual bounds use `MM/DD/YYYY HH:MM:SS`; absent bounds are sent as 0,
/// which the server reads as "open-ended". A non-zero `range` overrides
/// `start` with `end - range`, where `end` defaults to server time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryWindow {
    pub start: Option<String>,
    pub end: Option<String>,
    pub range: RelativeWindow,
}

impl HistoryWindow {
    pub fn between(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: Some(start.into()),
            end: Some(end.into()),
            range: RelativeWindow::default(),
        }
    }

    pub fn last(range: RelativeWindow) -> Self {
        Self {
            range,
            ..Self::default()
        }
    }

    pub fn ending_at(mut self, end: impl Into<String>) -> Self {
        self.end = Some(end.into());
        self
    }
}

/// One closed trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub order: i64,
    #[serde(default)]
    pub order2: i64,
    #[serde(default)]
    pub position: i64,
    pub symbol: Option<String>,
    pub cmd: TradeCmd,
    pub volume: f64,
    #[serde(default)]
    pub open_price: f64,
    #[serde(default)]
    pub close_price: f64,
    #[serde(default)]
    pub open_time: i64,
    #[serde(default)]
    pub close_time: Option<i64>,
    #[serde(default)]
    pub profit: Option<f64>,
    #[serde(default)]
    pub sl: f64,
    #[serde(default)]
    pub tp: f64,
    #[serde(default)]
    pub closed: bool,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(rename = "customComment", default)]
    pub custom_comment: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}
