//! Markets sub-client: liveness ping, server clock, instruments and estimates.

use crate::domain::market::wire::{
    MarginTradeArgs, MarginTradeReply, ProfitCalculationArgs, ProfitReply, SymbolArgs,
};
use crate::domain::market::{PricePair, ServerTime, SymbolRecord};
use crate::error::SdkError;
use crate::session::Gateway;
use crate::shared::TradeCmd;
use crate::ws::Command;

/// Sub-client for market-wide operations.
pub struct Markets<'a, G: Gateway> {
    pub(crate) gateway: &'a G,
}

impl<'a, G: Gateway> Markets<'a, G> {
    pub fn new(gateway: &'a G) -> Self {
        Self { gateway }
    }

    /// `true` if the server answered the ping with `status: true`.
    ///
    /// Transport failures still propagate as errors.
    pub async fn ping(&self) -> Result<bool, SdkError> {
        let response = self.gateway.call(Command::Ping, None).await?;
        if !response.status {
            tracing::warn!(
                code = response.error_code.as_deref().unwrap_or(""),
                "Ping rejected"
            );
        }
        Ok(response.status)
    }

    pub async fn server_time(&self) -> Result<ServerTime, SdkError> {
        self.gateway.call(Command::GetServerTime, None).await?.data()
    }

    pub async fn all_symbols(&self) -> Result<Vec<SymbolRecord>, SdkError> {
        self.gateway.call(Command::GetAllSymbols, None).await?.data()
    }

    pub async fn symbol(&self, symbol: &str) -> Result<SymbolRecord, SdkError> {
        let args = serde_json::to_value(SymbolArgs { symbol })?;
        self.gateway
            .call(Command::GetSymbol, Some(args))
            .await?
            .data()
    }

    /// Expected margin for `volume` lots of `symbol`.
    pub async fn margin_trade(&self, symbol: &str, volume: f64) -> Result<f64, SdkError> {
        let args = serde_json::to_value(MarginTradeArgs { symbol, volume })?;
        let reply: MarginTradeReply = self
            .gateway
            .call(Command::GetMarginTrade, Some(args))
            .await?
            .data()?;
        Ok(reply.margin)
    }

    /// Estimated profit of a hypothetical trade. Calculator use only.
    pub async fn profit_calculation(
        &self,
        prices: PricePair,
        cmd: TradeCmd,
        symbol: &str,
        volume: f64,
    ) -> Result<f64, SdkError> {
        let args = serde_json::to_value(ProfitCalculationArgs {
            close_price: prices.close,
            cmd,
            open_price: prices.open,
            symbol,
            volume,
        })?;
        let reply: ProfitReply = self
            .gateway
            .call(Command::GetProfitCalculation, Some(args))
            .await?
            .data()?;
        Ok(reply.profit)
    }

    /// [`Self::profit_calculation`] with the command given by name
    /// (`"BUY"`, `"SELL_LIMIT"`, ...).
    pub async fn profit_calculation_named(
        &self,
        prices: PricePair,
        cmd: &str,
        symbol: &str,
        volume: f64,
    ) -> Result<f64, SdkError> {
        let cmd: TradeCmd = cmd.parse().map_err(SdkError::Validation)?;
        self.profit_calculation(prices, cmd, symbol, volume).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fake::{ok_reply, rejected_reply, server_time_reply, FakeGateway, SERVER_TIME};
    use serde_json::json;

    #[tokio::test]
    async fn test_ping() {
        let gw = FakeGateway::new(vec![json!({"status": true}), rejected_reply("EX000", "down")]);
        let markets = Markets::new(&gw);
        assert!(markets.ping().await.unwrap());
        assert!(!markets.ping().await.unwrap());
        assert_eq!(gw.sent()[0], (Command::Ping, None));
    }

    #[tokio::test]
    async fn test_server_time() {
        let gw = FakeGateway::new(vec![server_time_reply()]);
        let t = Markets::new(&gw).server_time().await.unwrap();
        assert_eq!(t.time, SERVER_TIME);
    }

    #[tokio::test]
    async fn test_server_time_missing_field_is_protocol_error() {
        let gw = FakeGateway::new(vec![ok_reply(json!({"timeString": "now"}))]);
        let err = Markets::new(&gw).server_time().await.unwrap_err();
        assert!(matches!(err, SdkError::Protocol(_)));
    }

    #[tokio::test]
    async fn test_symbol_sends_name() {
        let gw = FakeGateway::new(vec![ok_reply(json!({"symbol": "EURUSD", "bid": 1.1}))]);
        let record = Markets::new(&gw).symbol("EURUSD").await.unwrap();
        assert_eq!(record.bid, 1.1);
        assert_eq!(
            gw.sent()[0],
            (Command::GetSymbol, Some(json!({"symbol": "EURUSD"})))
        );
    }

    #[tokio::test]
    async fn test_all_symbols() {
        let gw = FakeGateway::new(vec![ok_reply(json!([
            {"symbol": "EURUSD"},
            {"symbol": "US500"}
        ]))]);
        let symbols = Markets::new(&gw).all_symbols().await.unwrap();
        let names: Vec<_> = symbols.iter().map(|s| s.symbol.as_str()).collect();
        assert_eq!(names, ["EURUSD", "US500"]);
    }

    #[tokio::test]
    async fn test_margin_trade() {
        let gw = FakeGateway::new(vec![ok_reply(json!({"margin": 4399.35}))]);
        let margin = Markets::new(&gw).margin_trade("EURPLN", 1.0).await.unwrap();
        assert_eq!(margin, 4399.35);
        assert_eq!(
            gw.sent()[0].1,
            Some(json!({"symbol": "EURPLN", "volume": 1.0}))
        );
    }

    #[tokio::test]
    async fn test_profit_calculation() {
        let gw = FakeGateway::new(vec![ok_reply(json!({"profit": 714.303}))]);
        let profit = Markets::new(&gw)
            .profit_calculation(PricePair::new(1.2233, 1.3), TradeCmd::Buy, "EURPLN", 1.0)
            .await
            .unwrap();
        assert_eq!(profit, 714.303);
        assert_eq!(
            gw.sent()[0].1,
            Some(json!({
                "closePrice": 1.3,
                "cmd": 0,
                "openPrice": 1.2233,
                "symbol": "EURPLN",
                "volume": 1.0
            }))
        );
    }

    #[tokio::test]
    async fn test_profit_calculation_unknown_cmd_sends_nothing() {
        let gw = FakeGateway::new(vec![]);
        let err = Markets::new(&gw)
            .profit_calculation_named(PricePair::new(1.0, 2.0), "HOLD", "EURPLN", 1.0)
            .await
            .unwrap_err();
        assert!(matches!(err, SdkError::Validation(ref msg) if msg.contains("HOLD")));
        assert!(gw.sent().is_empty());
    }

    #[tokio::test]
    async fn test_margin_trade_rejected() {
        let gw = FakeGateway::new(vec![rejected_reply("BE005", "Symbol not supported")]);
        let err = Markets::new(&gw).margin_trade("XYZ", 1.0).await.unwrap_err();
        assert!(matches!(err, SdkError::Api { .. }));
    }
}
