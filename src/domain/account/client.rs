//! Account sub-client.

use crate::domain::account::MarginLevel;
use crate::error::SdkError;
use crate::session::Gateway;
use crate::ws::Command;

/// Sub-client for the logged-in account.
pub struct Account<'a, G: Gateway> {
    pub(crate) gateway: &'a G,
}

impl<'a, G: Gateway> Account<'a, G> {
    pub fn new(gateway: &'a G) -> Self {
        Self { gateway }
    }

    pub async fn margin_level(&self) -> Result<MarginLevel, SdkError> {
        self.gateway
            .call(Command::GetMarginLevel, None)
            .await?
            .data()
    }

    /// Current account balance.
    pub async fn balance(&self) -> Result<f64, SdkError> {
        Ok(self.margin_level().await?.balance)
    }
}
