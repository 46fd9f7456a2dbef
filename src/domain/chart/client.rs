//! Candles sub-client: the candle resolver.

use crate::domain::chart::window::{recent_start, resolve_range};
use crate::domain::chart::wire::{ChartLastInfo, ChartRangeInfo, ChartRequest, ChartResponse};
use crate::domain::chart::{shape_series, CandleSeries, RangeWindow, RelativeWindow};
use crate::domain::market::client::Markets;
use crate::error::SdkError;
use crate::session::Gateway;
use crate::shared::Period;
use crate::ws::Command;

/// Sub-client for chart history.
pub struct Candles<'a, G: Gateway> {
    pub(crate) gateway: &'a G,
}

impl<'a, G: Gateway> Candles<'a, G> {
    pub fn new(gateway: &'a G) -> Self {
        Self { gateway }
    }

    /// Candles since `window` plus enough room for `desired_count` periods,
    /// measured back from server time.
    ///
    /// Returns `Ok(None)` when the server has no candles in the window.
    pub async fn get_recent(
        &self,
        period: Period,
        symbol: &str,
        window: RelativeWindow,
        desired_count: usize,
    ) -> Result<Option<CandleSeries>, SdkError> {
        let server_time = Markets::new(self.gateway).server_time().await?.time;
        let start = recent_start(server_time, &window, period, desired_count)?;

        tracing::debug!(%symbol, %period, start, desired_count, "Requesting recent candles");
        let request = ChartRequest {
            info: ChartLastInfo {
                period,
                start,
                symbol: symbol.to_string(),
            },
        };
        let response = self
            .gateway
            .call(Command::GetChartLastRequest, Some(serde_json::to_value(&request)?))
            .await?;
        let chart: ChartResponse = response.data()?;
        Ok(shape_series(chart, desired_count))
    }

    /// Candles between two local wall-clock bounds.
    ///
    /// A missing end means "now"; a missing start is derived from
    /// `desired_count` or `window.days`.
    pub async fn get_range(
        &self,
        period: Period,
        symbol: &str,
        window: RangeWindow,
        desired_count: usize,
    ) -> Result<Option<CandleSeries>, SdkError> {
        let (start, end) = resolve_range(&window, period, desired_count, self.gateway.local_now())?;

        tracing::debug!(%symbol, %period, start, end, desired_count, "Requesting candle range");
        let request = ChartRequest {
            info: ChartRangeInfo {
                symbol: symbol.to_string(),
                period,
                start,
                end,
                ticks: 0,
            },
        };
        let response = self
            .gateway
            .call(Command::GetChartRangeRequest, Some(serde_json::to_value(&request)?))
            .await?;
        let chart: ChartResponse = response.data()?;
        Ok(shape_series(chart, desired_count))
    }

    /// Whether `symbol` currently produces M1 candles.
    pub async fn is_market_open(&self, symbol: &str) -> Result<bool, SdkError> {
        let series = self
            .get_recent(Period::M1, symbol, RelativeWindow::default(), 1)
            .await?;
        Ok(series.is_some_and(|s| !s.is_empty()))
    }
}
