use super::wire::{ChartResponse, RateInfo};
use super::{Candle, CandleSeries, SeriesMeta};

impl From<RateInfo> for Candle {
    fn from(rate: RateInfo) -> Self {
        Self {
            datetime: rate.ctm_string,
            open: rate.open,
            close: rate.close,
            high: rate.high,
            low: rate.low,
        }
    }
}

/// Keep the trailing `desired_count` candles (all when 0).
///
/// An empty `rateInfos` yields `None`.
pub fn shape_series(response: ChartResponse, desired_count: usize) -> Option<CandleSeries> {
    if response.rate_infos.is_empty() {
        return None;
    }

    let mut rates = response.rate_infos;
    if desired_count > 0 && rates.len() > desired_count {
        rates.drain(..rates.len() - desired_count);
    }
    let candles: Vec<Candle> = rates.into_iter().map(Candle::from).collect();

    Some(CandleSeries {
        meta: SeriesMeta {
            digits: response.digits,
            count: candles.len(),
        },
        candles,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(n: usize, digits: u32) -> ChartResponse {
        ChartResponse {
            digits,
            rate_infos: (0..n)
                .map(|i| RateInfo {
                    ctm: i as i64 * 60_000,
                    ctm_string: format!("candle-{}", i),
                    open: 100.0 + i as f64,
                    close: 1.0,
                    high: 2.0,
                    low: -1.0,
                    vol: 0.0,
                })
                .collect(),
        }
    }

    #[test]
    fn test_keeps_trailing_candles_in_order() {
        let series = shape_series(response(10, 5), 3).unwrap();
        assert_eq!(series.meta, SeriesMeta { digits: 5, count: 3 });
        let names: Vec<_> = series.candles.iter().map(|c| c.datetime.as_str()).collect();
        assert_eq!(names, ["candle-7", "candle-8", "candle-9"]);
        assert_eq!(series.into_records().len(), 4);
    }

    #[test]
    fn test_zero_count_keeps_everything() {
        let series = shape_series(response(10, 2), 0).unwrap();
        assert_eq!(series.meta.count, 10);
        assert_eq!(series.meta.digits, 2);
        assert_eq!(series.into_records().len(), 11);
    }

    #[test]
    fn test_count_larger_than_reply() {
        let series = shape_series(response(2, 5), 50).unwrap();
        assert_eq!(series.meta.count, 2);
        assert_eq!(series.candles[0].datetime, "candle-0");
    }

    #[test]
    fn test_empty_reply_is_no_data() {
        assert!(shape_series(response(0, 5), 3).is_none());
        assert!(shape_series(response(0, 5), 0).is_none());
    }

    #[test]
    fn test_fields_forwarded_verbatim() {
        let series = shape_series(response(1, 5), 1).unwrap();
        let c = &series.candles[0];
        assert_eq!((c.open, c.close, c.high, c.low), (100.0, 1.0, 2.0, -1.0));
    }
}
