//! Account domain: balance and margin figures.

pub mod client;

use serde::{Deserialize, Serialize};

/// Reply of `getMarginLevel`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarginLevel {
    pub balance: f64,
    #[serde(default)]
    pub credit: f64,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub equity: f64,
    #[serde(default)]
    pub margin: f64,
    #[serde(default)]
    pub margin_free: f64,
    #[serde(default)]
    pub margin_level: f64,
}
