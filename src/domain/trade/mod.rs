//! Trade domain: order placement settings and transaction status.

pub mod client;
pub mod wire;

use serde::{Deserialize, Deserializer, Serialize};

use crate::shared::{TradeCmd, TransactionType};

/// Default lot size for a new order.
pub const DEFAULT_VOLUME: f64 = 0.01;

/// Parameters of a `tradeTransaction`.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeSettings {
    pub cmd: TradeCmd,
    pub transaction_type: TransactionType,
    pub volume: f64,
    /// Existing order number; 0 for a new order.
    pub order: i64,
    pub stop_loss: f64,
    pub take_profit: f64,
}

impl Default for TradeSettings {
    fn default() -> Self {
        Self {
            cmd: TradeCmd::Buy,
            transaction_type: TransactionType::Open,
            volume: DEFAULT_VOLUME,
            order: 0,
            stop_loss: 0.0,
            take_profit: 0.0,
        }
    }
}

impl TradeSettings {
    pub fn new(cmd: TradeCmd, volume: f64) -> Self {
        Self {
            cmd,
            volume,
            ..Self::default()
        }
    }

    pub fn with_transaction_type(mut self, transaction_type: TransactionType) -> Self {
        self.transaction_type = transaction_type;
        self
    }

    pub fn with_order(mut self, order: i64) -> Self {
        self.order = order;
        self
    }

    pub fn with_stop_loss(mut self, stop_loss: f64) -> Self {
        self.stop_loss = stop_loss;
        self
    }

    pub fn with_take_profit(mut self, take_profit: f64) -> Self {
        self.take_profit = take_profit;
        self
    }
}

// ─── RequestStatus ───────────────────────────────────────────────────────────

/// Processing state of a submitted transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestStatus {
    Error,
    Pending,
    /// Executed.
    Accepted,
    Rejected,
}

impl RequestStatus {
    pub fn code(&self) -> u8 {
        match self {
            Self::Error => 0,
            Self::Pending => 1,
            Self::Accepted => 3,
            Self::Rejected => 4,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Error),
            1 => Some(Self::Pending),
            3 => Some(Self::Accepted),
            4 => Some(Self::Rejected),
            _ => None,
        }
    }

    pub fn is_final(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl Serialize for RequestStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for RequestStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = u8::deserialize(deserializer)?;
        RequestStatus::from_code(code)
            .ok_or_else(|| serde::de::Error::custom(format!("Invalid request status: {}", code)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trade_settings_default() {
        let settings = TradeSettings::default();
        assert_eq!(settings.cmd, TradeCmd::Buy);
        assert_eq!(settings.transaction_type, TransactionType::Open);
        assert_eq!(settings.volume, 0.01);
        assert_eq!(settings.order, 0);
    }

    #[test]
    fn test_request_status_codes() {
        assert_eq!(RequestStatus::from_code(3), Some(RequestStatus::Accepted));
        assert_eq!(RequestStatus::from_code(2), None);
        assert_eq!(RequestStatus::Rejected.code(), 4);
        assert!(!RequestStatus::Pending.is_final());
        assert!(RequestStatus::Error.is_final());
    }

    #[test]
    fn test_request_status_deserialize_rejects_unknown() {
        assert!(serde_json::from_str::<RequestStatus>("2").is_err());
        assert_eq!(
            serde_json::from_str::<RequestStatus>("1").unwrap(),
            RequestStatus::Pending
        );
    }
}
