//! Wire types for chart requests and replies.

use crate::shared::Period;
use serde::{Deserialize, Serialize};

/// Scale factor assumed when the server omits `digits`.
pub const DEFAULT_DIGITS: u32 = 5;

fn default_digits() -> u32 {
    DEFAULT_DIGITS
}

/// `arguments` envelope shared by both chart commands.
#[derive(Debug, Clone, Serialize)]
pub struct ChartRequest<T> {
    pub info: T,
}

/// `getChartLastRequest` info block: everything since `start`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartLastInfo {
    pub period: Period,
    pub start: i64,
    pub symbol: String,
}

/// `getChartRangeRequest` info block: everything between `start` and `end`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartRangeInfo {
    pub symbol: String,
    pub period: Period,
    pub start: i64,
    pub end: i64,
    pub ticks: i64,
}

/// One rate record as sent by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateInfo {
    #[serde(default)]
    pub ctm: i64,
    pub ctm_string: String,
    pub open: f64,
    pub close: f64,
    pub high: f64,
    pub low: f64,
    #[serde(default)]
    pub vol: f64,
}

/// `returnData` of both chart commands.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartResponse {
    #[serde(default = "default_digits")]
    pub digits: u32,
    #[serde(default)]
    pub rate_infos: Vec<RateInfo>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_chart_last_info_serializes_period_as_minutes() {
        let req = ChartRequest {
            info: ChartLastInfo {
                period: Period::H1,
                start: 1_700_000_000_000,
                symbol: "EURUSD".into(),
            },
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"info": {"period": 60, "start": 1_700_000_000_000i64, "symbol": "EURUSD"}})
        );
    }

    #[test]
    fn test_chart_range_info_shape() {
        let info = ChartRangeInfo {
            symbol: "US500".into(),
            period: Period::D1,
            start: 0,
            end: 86_400_000,
            ticks: 0,
        };
        assert_eq!(
            serde_json::to_value(&info).unwrap(),
            json!({"symbol": "US500", "period": 1440, "start": 0, "end": 86_400_000, "ticks": 0})
        );
    }

    #[test]
    fn test_chart_response_defaults() {
        let resp: ChartResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(resp.digits, DEFAULT_DIGITS);
        assert!(resp.rate_infos.is_empty());
    }

    #[test]
    fn test_rate_info_deserialize() {
        let rate: RateInfo = serde_json::from_value(json!({
            "ctm": 1389362640000i64,
            "ctmString": "Jan 10, 2014 3:04:00 PM",
            "open": 6917.0,
            "close": 4.0,
            "high": 6.0,
            "low": 0.0,
            "vol": 0.0
        }))
        .unwrap();
        assert_eq!(rate.ctm_string, "Jan 10, 2014 3:04:00 PM");
        assert_eq!(rate.open, 6917.0);
        assert_eq!(rate.close, 4.0);
    }
}
