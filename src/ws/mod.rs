//! WebSocket layer: request/response envelopes and the transport seam.
//!
//! The protocol is strictly request/response over one socket: every
//! [`Request`] written is answered by exactly one [`Response`], in send order.
//! There is no request id, so callers must never interleave exchanges.
//!
//! The actual transport is pluggable through [`Connector`]/[`Transport`]:
//! - `ws-native` feature → `tokio-tungstenite` (native.rs)
//! - tests → scripted in-memory fakes

#[cfg(feature = "ws-native")]
pub mod native;

use std::future::Future;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{SdkError, WsError};

// ─── Commands ────────────────────────────────────────────────────────────────

/// Command names understood by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Command {
    Login,
    Logout,
    Ping,
    GetServerTime,
    GetChartLastRequest,
    GetChartRangeRequest,
    GetAllSymbols,
    GetSymbol,
    GetMarginLevel,
    GetMarginTrade,
    GetProfitCalculation,
    TradeTransaction,
    TradeTransactionStatus,
    GetTradesHistory,
}

impl Command {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Logout => "logout",
            Self::Ping => "ping",
            Self::GetServerTime => "getServerTime",
            Self::GetChartLastRequest => "getChartLastRequest",
            Self::GetChartRangeRequest => "getChartRangeRequest",
            Self::GetAllSymbols => "getAllSymbols",
            Self::GetSymbol => "getSymbol",
            Self::GetMarginLevel => "getMarginLevel",
            Self::GetMarginTrade => "getMarginTrade",
            Self::GetProfitCalculation => "getProfitCalculation",
            Self::TradeTransaction => "tradeTransaction",
            Self::TradeTransactionStatus => "tradeTransactionStatus",
            Self::GetTradesHistory => "getTradesHistory",
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ─── Outbound ────────────────────────────────────────────────────────────────

/// One command sent to the server.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Request {
    pub command: Command,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arguments: Option<serde_json::Value>,
}

impl Request {
    pub fn new(command: Command, arguments: Option<serde_json::Value>) -> Self {
        Self { command, arguments }
    }

    pub fn to_json(&self) -> Result<String, SdkError> {
        Ok(serde_json::to_string(self)?)
    }
}

// ─── Inbound ─────────────────────────────────────────────────────────────────

/// The server's answer to one [`Request`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub status: bool,
    #[serde(default)]
    pub return_data: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_descr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream_session_id: Option<String>,
}

impl Response {
    /// Decode one raw reply frame. Trailing whitespace is ignored.
    pub fn parse(raw: &str) -> Result<Self, SdkError> {
        serde_json::from_str(raw.trim_end())
            .map_err(|e| SdkError::Protocol(format!("Undecodable reply: {}", e)))
    }

    /// The `returnData` payload, or an [`SdkError::Api`] if `status` is false.
    pub fn into_data(self) -> Result<serde_json::Value, SdkError> {
        if self.status {
            Ok(self.return_data)
        } else {
            Err(SdkError::Api {
                code: self.error_code.unwrap_or_default(),
                description: self.error_descr.unwrap_or_default(),
            })
        }
    }

    /// Decode `returnData` into a typed wire struct.
    pub fn data<T: DeserializeOwned>(self) -> Result<T, SdkError> {
        decode(self.into_data()?)
    }
}

/// Decode a JSON value into a wire type, reporting mismatches as protocol errors.
pub(crate) fn decode<T: DeserializeOwned>(value: serde_json::Value) -> Result<T, SdkError> {
    serde_json::from_value(value)
        .map_err(|e| SdkError::Protocol(format!("Unexpected returnData shape: {}", e)))
}

// ─── Transport seam ──────────────────────────────────────────────────────────

/// One open, message-oriented connection.
pub trait Transport: Send {
    /// Write one text message.
    fn send(&mut self, text: String) -> impl Future<Output = Result<(), WsError>> + Send;

    /// Block until the next text message arrives.
    fn recv(&mut self) -> impl Future<Output = Result<String, WsError>> + Send;

    /// Close the connection.
    fn close(&mut self) -> impl Future<Output = Result<(), WsError>> + Send;
}

/// Opens new [`Transport`]s to an endpoint.
pub trait Connector: Send + Sync {
    type Transport: Transport;

    fn connect(&self, url: &str) -> impl Future<Output = Result<Self::Transport, WsError>> + Send;
}
