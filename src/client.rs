//! High-level client: `XapiClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder, the session and the accessor methods.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDateTime;
use serde_json::Value;

use crate::domain::account::client::Account;
use crate::domain::chart::client::Candles;
use crate::domain::history::client::History;
use crate::domain::market::client::Markets;
use crate::domain::trade::client::Trades;
use crate::error::SdkError;
use crate::session::{Credentials, Gateway, Session, SessionConfig, SessionState};
use crate::time::{Clock, SystemClock};
use crate::ws::{Command, Connector, Response};

// Re-export sub-client types for convenience.
pub use crate::domain::account::client::Account as AccountClient;
pub use crate::domain::chart::client::Candles as CandlesClient;
pub use crate::domain::history::client::History as HistoryClient;
pub use crate::domain::market::client::Markets as MarketsClient;
pub use crate::domain::trade::client::Trades as TradesClient;

/// The primary entry point.
///
/// Provides nested sub-client accessors for each domain:
/// `client.candles()`, `client.market()`, etc. All of them share the one
/// underlying [`Session`].
pub struct XapiClient<C: Connector> {
    session: Session<C>,
}

#[cfg(feature = "ws-native")]
impl XapiClient<crate::ws::native::NativeConnector> {
    pub fn builder() -> XapiClientBuilder {
        XapiClientBuilder::default()
    }
}

impl<C: Connector> XapiClient<C> {
    pub fn session(&self) -> &Session<C> {
        &self.session
    }

    pub async fn state(&self) -> SessionState {
        self.session.state().await
    }

    pub async fn stream_session_id(&self) -> Option<String> {
        self.session.stream_session_id().await
    }

    // ── Lifecycle ────────────────────────────────────────────────────────

    pub async fn connect(&self) -> Result<(), SdkError> {
        self.session.connect().await
    }

    pub async fn login(&self, credentials: Credentials) -> Result<(), SdkError> {
        self.session.login(credentials).await
    }

    /// Connect, then log in.
    pub async fn start(&self, credentials: Credentials) -> Result<(), SdkError> {
        self.connect().await?;
        self.login(credentials).await
    }

    /// Log out and disconnect. The socket is closed even if logout fails.
    pub async fn logout(&self) -> Result<bool, SdkError> {
        self.session.logout().await
    }

    pub async fn disconnect(&self) {
        self.session.disconnect().await
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn candles(&self) -> Candles<'_, Self> {
        Candles::new(self)
    }

    pub fn market(&self) -> Markets<'_, Self> {
        Markets::new(self)
    }

    pub fn account(&self) -> Account<'_, Self> {
        Account::new(self)
    }

    pub fn trades(&self) -> Trades<'_, Self> {
        Trades::new(self)
    }

    pub fn history(&self) -> History<'_, Self> {
        History::new(self)
    }
}

impl<C: Connector> Gateway for XapiClient<C> {
    async fn call(&self, command: Command, arguments: Option<Value>) -> Result<Response, SdkError> {
        self.session.call(command, arguments).await
    }

    fn local_now(&self) -> NaiveDateTime {
        Gateway::local_now(&self.session)
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct XapiClientBuilder {
    config: SessionConfig,
    clock: Arc<dyn Clock>,
}

impl Default for XapiClientBuilder {
    fn default() -> Self {
        Self {
            config: SessionConfig::default(),
            clock: Arc::new(SystemClock),
        }
    }
}

impl XapiClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn url(mut self, url: &str) -> Self {
        self.config.url = url.to_string();
        self
    }

    /// Idle time after which the next call reconnects first.
    pub fn liveness_threshold(mut self, threshold: Duration) -> Self {
        self.config.liveness_threshold = threshold;
        self
    }

    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.config.read_timeout = Some(timeout);
        self
    }

    pub fn relogin_on_reconnect(mut self, enabled: bool) -> Self {
        self.config.relogin_on_reconnect = enabled;
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Build a client on the native `tokio-tungstenite` transport.
    #[cfg(feature = "ws-native")]
    pub fn build(self) -> Result<XapiClient<crate::ws::native::NativeConnector>, SdkError> {
        self.build_with(crate::ws::native::NativeConnector)
    }

    /// Build a client on a caller-supplied transport.
    pub fn build_with<C: Connector>(self, connector: C) -> Result<XapiClient<C>, SdkError> {
        if !(self.config.url.starts_with("ws://") || self.config.url.starts_with("wss://")) {
            return Err(SdkError::Validation(format!(
                "Endpoint must be a ws:// or wss:// URL, got {}",
                self.config.url
            )));
        }
        if self.config.liveness_threshold.is_zero() {
            return Err(SdkError::Validation(
                "Liveness threshold must be positive".to_string(),
            ));
        }
        Ok(XapiClient {
            session: Session::with_clock(connector, self.config, self.clock),
        })
    }
}
