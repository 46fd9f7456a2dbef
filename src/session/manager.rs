//! `Session`: owns the transport and serialises every exchange on it.
//!
//! Replies are matched to requests by order alone, so the whole
//! write-then-read exchange runs under one async mutex. Concurrent callers
//! sharing a `Session` queue on that mutex.

use std::sync::Arc;

use async_lock::Mutex;
use chrono::NaiveDateTime;
use serde_json::Value;

use crate::error::{AuthError, SdkError, WsError};
use crate::session::{Credentials, Gateway, Liveness, SessionConfig, SessionState};
use crate::time::{Clock, SystemClock};
use crate::ws::{Command, Connector, Request, Response, Transport};

/// The one logical session to the server.
pub struct Session<C: Connector> {
    connector: C,
    config: SessionConfig,
    clock: Arc<dyn Clock>,
    inner: Mutex<Inner<C::Transport>>,
}

struct Inner<T> {
    transport: Option<T>,
    state: SessionState,
    liveness: Liveness,
    credentials: Option<Credentials>,
    stream_session_id: Option<String>,
}

impl<C: Connector> Session<C> {
    pub fn new(connector: C, config: SessionConfig) -> Self {
        Self::with_clock(connector, config, Arc::new(SystemClock))
    }

    pub fn with_clock(connector: C, config: SessionConfig, clock: Arc<dyn Clock>) -> Self {
        let liveness = Liveness::new(config.liveness_threshold, clock.instant());
        Self {
            connector,
            config,
            clock,
            inner: Mutex::new(Inner {
                transport: None,
                state: SessionState::Disconnected,
                liveness,
                credentials: None,
                stream_session_id: None,
            }),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub async fn state(&self) -> SessionState {
        self.inner.lock().await.state
    }

    /// Stream session id handed out by the last successful login.
    pub async fn stream_session_id(&self) -> Option<String> {
        self.inner.lock().await.stream_session_id.clone()
    }

    // ── Lifecycle ────────────────────────────────────────────────────────

    /// Open a fresh transport. On failure the previous transport (if any) is kept.
    pub async fn connect(&self) -> Result<(), SdkError> {
        let mut inner = self.inner.lock().await;
        self.open(&mut inner).await?;
        inner.state = SessionState::Connected;
        inner.stream_session_id = None;
        Ok(())
    }

    /// Authenticate the connected session.
    pub async fn login(&self, credentials: Credentials) -> Result<(), SdkError> {
        let mut inner = self.inner.lock().await;
        match inner.state {
            SessionState::Disconnected => return Err(WsError::NotConnected.into()),
            SessionState::Authenticated => return Err(AuthError::AlreadyAuthenticated.into()),
            SessionState::Connected => {}
        }

        tracing::info!(user_id = %credentials.user_id, "Logging in");
        let request = Request::new(Command::Login, Some(credentials.login_arguments()));
        let response = self.dispatch(&mut inner, &request).await?;
        if !response.status {
            let err = login_failed(response);
            tracing::warn!("{}", err);
            return Err(err.into());
        }

        inner.state = SessionState::Authenticated;
        inner.credentials = Some(credentials);
        inner.stream_session_id = response.stream_session_id;
        tracing::info!("Login accepted");
        Ok(())
    }

    /// Send `logout`, then disconnect no matter how the logout went.
    ///
    /// Returns the server's logout status.
    pub async fn logout(&self) -> Result<bool, SdkError> {
        let mut inner = self.inner.lock().await;
        let result = if inner.state == SessionState::Authenticated {
            let request = Request::new(Command::Logout, None);
            self.dispatch(&mut inner, &request)
                .await
                .map(|response| response.status)
        } else {
            Err(AuthError::NotAuthenticated.into())
        };

        shutdown(&mut inner).await;
        tracing::info!("Logged out");
        result
    }

    /// Close the transport if open. Idempotent; close errors are only logged.
    pub async fn disconnect(&self) {
        let mut inner = self.inner.lock().await;
        shutdown(&mut inner).await;
    }

    // ── Request / response ───────────────────────────────────────────────

    /// Send one command and wait for its reply.
    pub async fn call(
        &self,
        command: Command,
        arguments: Option<Value>,
    ) -> Result<Response, SdkError> {
        let request = Request::new(command, arguments);
        let mut inner = self.inner.lock().await;
        self.dispatch(&mut inner, &request).await
    }

    /// Liveness check, exchange, then stamp the activity time.
    async fn dispatch(
        &self,
        inner: &mut Inner<C::Transport>,
        request: &Request,
    ) -> Result<Response, SdkError> {
        let now = self.clock.instant();
        let needs_reconnect = inner.state != SessionState::Disconnected
            && (inner.transport.is_none() || inner.liveness.is_stale(now));

        if needs_reconnect {
            tracing::debug!(
                idle_ms = inner.liveness.idle_for(now).as_millis() as u64,
                threshold_ms = inner.liveness.threshold().as_millis() as u64,
                "Reconnecting before {}",
                request.command
            );
            if let Err(e) = self.reconnect(inner).await {
                inner.liveness.touch(self.clock.instant());
                return Err(e);
            }
        }

        let result = self.exchange(inner, request).await;
        inner.liveness.touch(self.clock.instant());
        result
    }

    async fn reconnect(&self, inner: &mut Inner<C::Transport>) -> Result<(), SdkError> {
        if let Err(e) = self.open(inner).await {
            tracing::warn!("Reconnect failed: {}", e);
            if let Some(mut stale) = inner.transport.take() {
                close_quietly(&mut stale).await;
            }
            return Err(e);
        }

        if self.config.relogin_on_reconnect && inner.state == SessionState::Authenticated {
            if let Some(credentials) = inner.credentials.clone() {
                let request = Request::new(Command::Login, Some(credentials.login_arguments()));
                let response = self.exchange(inner, &request).await?;
                if !response.status {
                    inner.state = SessionState::Connected;
                    return Err(login_failed(response).into());
                }
                inner.stream_session_id = response.stream_session_id;
            }
        }
        Ok(())
    }

    /// Replace the transport with a freshly connected one.
    async fn open(&self, inner: &mut Inner<C::Transport>) -> Result<(), SdkError> {
        tracing::info!("Connecting to {}", self.config.url);
        let fresh = self.connector.connect(&self.config.url).await?;
        if let Some(mut previous) = inner.transport.replace(fresh) {
            close_quietly(&mut previous).await;
        }
        inner.liveness.touch(self.clock.instant());
        Ok(())
    }

    /// One write followed by exactly one read.
    ///
    /// A transport failure drops the socket: a late reply would otherwise be
    /// read as the answer to the next request.
    async fn exchange(
        &self,
        inner: &mut Inner<C::Transport>,
        request: &Request,
    ) -> Result<Response, SdkError> {
        let payload = request.to_json()?;
        let transport = inner.transport.as_mut().ok_or(WsError::NotConnected)?;

        tracing::debug!(command = %request.command, "Sending command");
        let raw = match send_and_receive(transport, payload, &self.config).await {
            Ok(raw) => raw,
            Err(e) => {
                if let Some(mut broken) = inner.transport.take() {
                    close_quietly(&mut broken).await;
                }
                return Err(e.into());
            }
        };
        Response::parse(&raw)
    }
}

impl<C: Connector> Gateway for Session<C> {
    async fn call(&self, command: Command, arguments: Option<Value>) -> Result<Response, SdkError> {
        Session::call(self, command, arguments).await
    }

    fn local_now(&self) -> NaiveDateTime {
        self.clock.local_now()
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

async fn send_and_receive<T: Transport>(
    transport: &mut T,
    payload: String,
    config: &SessionConfig,
) -> Result<String, WsError> {
    transport.send(payload).await?;
    match config.read_timeout {
        Some(limit) => tokio::time::timeout(limit, transport.recv())
            .await
            .map_err(|_| WsError::Timeout)?,
        None => transport.recv().await,
    }
}

async fn shutdown<T: Transport>(inner: &mut Inner<T>) {
    if let Some(mut transport) = inner.transport.take() {
        close_quietly(&mut transport).await;
    }
    inner.state = SessionState::Disconnected;
    inner.credentials = None;
    inner.stream_session_id = None;
}

async fn close_quietly<T: Transport>(transport: &mut T) {
    if let Err(e) = transport.close().await {
        tracing::warn!("Error while closing connection: {}", e);
    }
}

fn login_failed(response: Response) -> AuthError {
    AuthError::LoginFailed {
        code: response.error_code.unwrap_or_default(),
        description: response
            .error_descr
            .unwrap_or_else(|| "login rejected".to_string()),
    }
}
