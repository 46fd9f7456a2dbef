//! Session layer: one transport, its liveness, the login handshake and the
//! sequential `call()` primitive everything else is built on.

pub mod liveness;
pub mod manager;

use std::future::Future;
use std::time::Duration;

use chrono::NaiveDateTime;
use serde_json::Value;

use crate::error::SdkError;
use crate::ws::{Command, Response};

pub use liveness::Liveness;
pub use manager::Session;

/// Idle time after which the server is assumed to have dropped the socket.
pub const DEFAULT_LIVENESS_THRESHOLD: Duration = Duration::from_secs(8);

/// The narrow interface sub-clients depend on.
///
/// Implemented by [`Session`] and [`crate::client::XapiClient`]; tests
/// implement it with scripted fakes.
pub trait Gateway: Send + Sync {
    /// Send one command and wait for its reply.
    fn call(
        &self,
        command: Command,
        arguments: Option<Value>,
    ) -> impl Future<Output = Result<Response, SdkError>> + Send;

    /// Local wall-clock time.
    fn local_now(&self) -> NaiveDateTime;
}

/// Logical session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Disconnected,
    Connected,
    Authenticated,
}

/// Session configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub url: String,
    /// A call issued after this much idle time reconnects first.
    pub liveness_threshold: Duration,
    /// `None` blocks on a read until the server answers.
    pub read_timeout: Option<Duration>,
    /// Replay `login` on the fresh socket after a liveness reconnect.
    pub relogin_on_reconnect: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            url: crate::network::DEFAULT_WS_URL.to_string(),
            liveness_threshold: DEFAULT_LIVENESS_THRESHOLD,
            read_timeout: None,
            relogin_on_reconnect: false,
        }
    }
}

/// Account credentials. The password never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user_id: String,
    pub password: String,
}

impl Credentials {
    pub fn new(user_id: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            password: password.into(),
        }
    }

    /// Read `XAPI_USER_ID` and `XAPI_PASSWORD` from the environment.
    pub fn from_env() -> Result<Self, SdkError> {
        let read = |key: &str| {
            std::env::var(key)
                .ok()
                .filter(|v| !v.is_empty())
                .ok_or_else(|| SdkError::Validation(format!("{} not set", key)))
        };
        Ok(Self::new(read("XAPI_USER_ID")?, read("XAPI_PASSWORD")?))
    }

    pub(crate) fn login_arguments(&self) -> Value {
        serde_json::json!({
            "userId": self.user_id,
            "password": self.password,
        })
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("user_id", &self.user_id)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_redacts_password() {
        let creds = Credentials::new("12345", "hunter2");
        let printed = format!("{:?}", creds);
        assert!(printed.contains("12345"));
        assert!(!printed.contains("hunter2"));
    }

    #[test]
    fn test_login_arguments_shape() {
        let creds = Credentials::new("12345", "pw");
        assert_eq!(
            creds.login_arguments(),
            serde_json::json!({"userId": "12345", "password": "pw"})
        );
    }

    #[test]
    fn test_session_config_default() {
        let config = SessionConfig::default();
        assert_eq!(config.url, crate::network::DEMO_WS_URL);
        assert_eq!(config.liveness_threshold, Duration::from_secs(8));
        assert!(config.read_timeout.is_none());
        assert!(!config.relogin_on_reconnect);
    }
}
