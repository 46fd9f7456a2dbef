//! Trades sub-client: placement and status polling.

use crate::domain::chart::client::Candles;
use crate::domain::chart::RelativeWindow;
use crate::domain::market::client::Markets;
use crate::domain::trade::wire::{
    OrderArgs, OrderReply, TradeStatusReply, TradeTransInfo, TradeTransactionArgs,
};
use crate::domain::trade::{RequestStatus, TradeSettings};
use crate::error::SdkError;
use crate::session::Gateway;
use crate::shared::Period;
use crate::ws::Command;

/// Expiration delay used when the caller passes an empty window.
const DEFAULT_EXPIRY_MS: i64 = 60_000;

/// Sub-client for trade transactions.
pub struct Trades<'a, G: Gateway> {
    pub(crate) gateway: &'a G,
}

impl<'a, G: Gateway> Trades<'a, G> {
    pub fn new(gateway: &'a G) -> Self {
        Self { gateway }
    }

    /// Submit a transaction at the latest M1 close price.
    ///
    /// The order expires `expiry` after server time (one minute when
    /// `expiry` is zero). Returns the order number assigned by the server.
    pub async fn open(
        &self,
        symbol: &str,
        settings: &TradeSettings,
        expiry: RelativeWindow,
        comment: &str,
    ) -> Result<i64, SdkError> {
        let price = self.latest_price(symbol).await?;
        let expiration = self.expiration(expiry).await?;

        let args = TradeTransactionArgs {
            trade_trans_info: TradeTransInfo {
                cmd: settings.cmd,
                transaction_type: settings.transaction_type,
                volume: settings.volume,
                order: settings.order,
                sl: settings.stop_loss,
                tp: settings.take_profit,
                symbol: symbol.to_string(),
                price,
                expiration,
                offset: -1,
                custom_comment: comment.to_string(),
            },
        };

        tracing::info!(%symbol, cmd = %settings.cmd, volume = settings.volume, price, "Submitting trade");
        let reply: OrderReply = self
            .gateway
            .call(Command::TradeTransaction, Some(serde_json::to_value(&args)?))
            .await?
            .data()?;
        Ok(reply.order)
    }

    /// Processing state of a previously submitted order.
    pub async fn status(&self, order: i64) -> Result<RequestStatus, SdkError> {
        let args = serde_json::to_value(OrderArgs { order })?;
        let reply: TradeStatusReply = self
            .gateway
            .call(Command::TradeTransactionStatus, Some(args))
            .await?
            .data()?;
        if let Some(message) = &reply.message {
            tracing::debug!(order, %message, "Trade status message");
        }
        Ok(reply.request_status)
    }

    async fn latest_price(&self, symbol: &str) -> Result<f64, SdkError> {
        let series = Candles::new(self.gateway)
            .get_recent(Period::M1, symbol, RelativeWindow::default(), 1)
            .await?;
        series
            .as_ref()
            .and_then(|s| s.latest().map(|c| c.close_price(s.meta.digits)))
            .ok_or_else(|| SdkError::Validation(format!("No price data found for {}", symbol)))
    }

    async fn expiration(&self, expiry: RelativeWindow) -> Result<i64, SdkError> {
        let delay = match expiry.checked_milliseconds()? {
            0 => DEFAULT_EXPIRY_MS,
            ms => ms,
        };
        let server_time = Markets::new(self.gateway).server_time().await?.time;
        server_time
            .checked_add(delay)
            .ok_or_else(|| SdkError::Validation(format!("Expiry {:?} is out of range", expiry)))
    }
}
