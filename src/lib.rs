//! # xapi-sdk
//!
//! An async Rust client for the xAPI broker trading protocol over a single
//! persistent WebSocket.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core**: period and trade enums, time utilities, errors, endpoints
//! 2. **WebSocket**: request/response envelopes and the pluggable transport
//! 3. **Session**: one socket, liveness reconnects, login/logout, `call()`
//! 4. **Domain**: candle resolver, market, account, trade and history sub-clients
//! 5. **High-Level Client**: `XapiClient` with nested sub-clients
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use xapi_sdk::prelude::*;
//!
//! let client = XapiClient::builder().build()?;
//! client.start(Credentials::from_env()?).await?;
//!
//! let candles = client
//!     .candles()
//!     .get_recent(Period::H1, "EURUSD", RelativeWindow::default(), 24)
//!     .await?;
//! let balance = client.account().balance().await?;
//!
//! client.logout().await?;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared enums used across all domains.
pub mod shared;

/// Wall clock, durations and the boundary date format.
pub mod time;

/// Unified SDK error types.
pub mod error;

/// Network URL constants.
pub mod network;

// ── Layer 2: WebSocket ───────────────────────────────────────────────────────

/// Envelopes, commands and the transport seam.
pub mod ws;

// ── Layer 3: Session ─────────────────────────────────────────────────────────

/// Connection lifecycle and request/response correlation.
pub mod session;

// ── Layer 4: Domain ──────────────────────────────────────────────────────────

/// Domain modules (vertical slices): types, wire types, sub-clients.
pub mod domain;

// ── Layer 5: High-Level Client ───────────────────────────────────────────────

/// `XapiClient`: the primary entry point.
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared enums
    pub use crate::shared::{resolve_period, Period, TradeCmd, TransactionType};

    // Domain types
    pub use crate::domain::account::MarginLevel;
    pub use crate::domain::chart::{
        Candle, CandleSeries, ChartRecord, RangeWindow, RelativeWindow, SeriesMeta,
    };
    pub use crate::domain::history::{HistoryWindow, TradeRecord};
    pub use crate::domain::market::{PricePair, ServerTime, SymbolRecord};
    pub use crate::domain::trade::{RequestStatus, TradeSettings};

    // Errors
    pub use crate::error::{AuthError, SdkError, WsError};

    // Network
    pub use crate::network::{DEFAULT_WS_URL, DEMO_WS_URL, REAL_WS_URL};

    // Session
    pub use crate::session::{Credentials, Gateway, Session, SessionConfig, SessionState};

    // Time
    pub use crate::time::{Clock, SystemClock};

    // Client + sub-clients
    pub use crate::client::{
        AccountClient, CandlesClient, HistoryClient, MarketsClient, TradesClient, XapiClient,
        XapiClientBuilder,
    };

    // Transport
    pub use crate::ws::{Command, Connector, Request, Response, Transport};
    #[cfg(feature = "ws-native")]
    pub use crate::ws::native::NativeConnector;
}
