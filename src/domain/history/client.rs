//! History sub-client.

use crate::domain::history::wire::TradesHistoryArgs;
use crate::domain::history::{HistoryWindow, TradeRecord};
use crate::domain::market::client::Markets;
use crate::error::SdkError;
use crate::session::Gateway;
use crate::time::to_epoch_millis;
use crate::ws::Command;

/// Sub-client for account history.
pub struct History<'a, G: Gateway> {
    pub(crate) gateway: &'a G,
}

impl<'a, G: Gateway> History<'a, G> {
    pub fn new(gateway: &'a G) -> Self {
        Self { gateway }
    }

    /// Trades closed within `window`.
    pub async fn trades(&self, window: HistoryWindow) -> Result<Vec<TradeRecord>, SdkError> {
        let args = self.resolve(&window).await?;
        tracing::debug!(start = args.start, end = args.end, "Requesting trade history");
        self.gateway
            .call(Command::GetTradesHistory, Some(serde_json::to_value(args)?))
            .await?
            .data()
    }

    async fn resolve(&self, window: &HistoryWindow) -> Result<TradesHistoryArgs, SdkError> {
        let mut start = match &window.start {
            Some(text) => to_epoch_millis(text)?,
            None => 0,
        };
        let mut end = match &window.end {
            Some(text) => to_epoch_millis(text)?,
            None => 0,
        };

        if !window.range.is_zero() {
            if end == 0 {
                end = Markets::new(self.gateway).server_time().await?.time;
            }
            start = end
                .checked_sub(window.range.checked_milliseconds()?)
                .ok_or_else(|| {
                    SdkError::Validation(format!("Window {:?} is out of range", window.range))
                })?;
        }

        if end != 0 && start > end {
            return Err(SdkError::Validation(format!(
                "Window start {} is after end {}",
                start, end
            )));
        }
        Ok(TradesHistoryArgs { start, end })
    }
}
