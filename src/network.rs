//! Network URL constants for the xAPI endpoints.

/// Demo account WebSocket URL.
pub const DEMO_WS_URL: &str = "wss://ws.xapi.pro/demo";

/// Real account WebSocket URL.
pub const REAL_WS_URL: &str = "wss://ws.xapi.pro/real";

/// Default WebSocket URL.
pub const DEFAULT_WS_URL: &str = DEMO_WS_URL;
