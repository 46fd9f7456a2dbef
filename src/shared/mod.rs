//! Shared enums and newtypes used across all domain modules.
//!
//! These types serialize identically to the raw values the server expects,
//! so they can be used directly in wire types without conversion overhead.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;
use thiserror::Error;

// ─── Period ──────────────────────────────────────────────────────────────────

/// A period token outside the supported set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unsupported period: {0}")]
pub struct InvalidPeriod(pub String);

/// Candle period. A closed set; the server only understands these lengths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Period {
    #[default]
    M1,
    M5,
    M15,
    M30,
    H1,
    H4,
    D1,
    W1,
    MN1,
}

impl Period {
    pub const ALL: [Period; 9] = [
        Self::M1,
        Self::M5,
        Self::M15,
        Self::M30,
        Self::H1,
        Self::H4,
        Self::D1,
        Self::W1,
        Self::MN1,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::M1 => "M1",
            Self::M5 => "M5",
            Self::M15 => "M15",
            Self::M30 => "M30",
            Self::H1 => "H1",
            Self::H4 => "H4",
            Self::D1 => "D1",
            Self::W1 => "W1",
            Self::MN1 => "MN1",
        }
    }

    /// Length of one candle in minutes. This is also the wire value.
    pub fn minutes(&self) -> i64 {
        match self {
            Self::M1 => 1,
            Self::M5 => 5,
            Self::M15 => 15,
            Self::M30 => 30,
            Self::H1 => 60,
            Self::H4 => 240,
            Self::D1 => 1440,
            Self::W1 => 10080,
            Self::MN1 => 43200,
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Period {
    type Err = InvalidPeriod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| InvalidPeriod(s.to_string()))
    }
}

impl Serialize for Period {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i64(self.minutes())
    }
}

/// Map a period token (`"M1"`, `"H4"`, ...) to its length in minutes.
pub fn resolve_period(code: &str) -> Result<i64, InvalidPeriod> {
    code.parse::<Period>().map(|p| p.minutes())
}

// ─── TradeCmd ────────────────────────────────────────────────────────────────

/// Trade operation code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TradeCmd {
    #[default]
    Buy,
    Sell,
    BuyLimit,
    SellLimit,
    BuyStop,
    SellStop,
    Balance,
    Credit,
}

impl TradeCmd {
    pub const ALL: [TradeCmd; 8] = [
        Self::Buy,
        Self::Sell,
        Self::BuyLimit,
        Self::SellLimit,
        Self::BuyStop,
        Self::SellStop,
        Self::Balance,
        Self::Credit,
    ];

    pub fn code(&self) -> u8 {
        match self {
            Self::Buy => 0,
            Self::Sell => 1,
            Self::BuyLimit => 2,
            Self::SellLimit => 3,
            Self::BuyStop => 4,
            Self::SellStop => 5,
            Self::Balance => 6,
            Self::Credit => 7,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
            Self::BuyLimit => "BUY_LIMIT",
            Self::SellLimit => "SELL_LIMIT",
            Self::BuyStop => "BUY_STOP",
            Self::SellStop => "SELL_STOP",
            Self::Balance => "BALANCE",
            Self::Credit => "CREDIT",
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }
}

impl std::fmt::Display for TradeCmd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TradeCmd {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|c| c.as_str() == s).ok_or_else(|| {
            let names: Vec<&str> = Self::ALL.iter().map(|c| c.as_str()).collect();
            format!("Invalid cmd_type '{}'. Must be one of {:?}", s, names)
        })
    }
}

impl Serialize for TradeCmd {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for TradeCmd {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let code = u8::deserialize(deserializer)?;
        TradeCmd::from_code(code)
            .ok_or_else(|| serde::de::Error::custom(format!("Invalid trade cmd: {}", code)))
    }
}

// ─── TransactionType ─────────────────────────────────────────────────────────

/// Kind of trade transaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TransactionType {
    #[default]
    Open,
    Pending,
    Close,
    Modify,
    Delete,
}

impl TransactionType {
    pub fn code(&self) -> u8 {
        match self {
            Self::Open => 0,
            Self::Pending => 1,
            Self::Close => 2,
            Self::Modify => 3,
            Self::Delete => 4,
        }
    }
}

impl Serialize for TransactionType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.code())
    }
}
